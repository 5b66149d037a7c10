//! Component C5: resolving the callers of a compile-time-declared logging
//! method across the project graph (spec.md §4.5). Consulted only for
//! `CompileTimeAttribute` findings — the other three families are
//! invocations themselves and need no caller lookup.

use crate::analyzers::shared::infer_type_display;
use crate::model::{InvocationSite, ParameterBinding, SourceKind};
use crate::operation_utils::classify_source_kind;
use crate::semantic::{MethodSymbol, ProjectGraph, RawCallSite};

/// Find every call site of `method` (declared on `declaring_type_fqn`),
/// sorted by `(project_name, file_path, start_line, start_column)`. Returns
/// an empty list — never an error — when `graph` is absent or the lookup
/// itself fails; a failure is logged at `warn` and swallowed (spec.md §7
/// error kind 5).
pub fn find_callers(
    graph: Option<&dyn ProjectGraph>,
    method: &MethodSymbol,
    declaring_type_fqn: &str,
) -> Vec<InvocationSite> {
    let Some(graph) = graph else {
        return Vec::new();
    };

    let mut raw_sites = match graph.find_invocations(declaring_type_fqn, method) {
        Ok(sites) => sites,
        Err(err) => {
            tracing::warn!(declaring_type_fqn, method = %method.name, error = %err, "cross-project caller lookup failed");
            return Vec::new();
        }
    };

    raw_sites.sort_by(|a, b| {
        (&a.project_name, &a.location.file_path, a.location.start_line, a.location.start_column).cmp(&(
            &b.project_name,
            &b.location.file_path,
            b.location.start_line,
            b.location.start_column,
        ))
    });

    raw_sites.into_iter().map(|site| mine_call_site(site, method)).collect()
}

fn mine_call_site(site: RawCallSite, method: &MethodSymbol) -> InvocationSite {
    let arguments: Vec<ParameterBinding> = site
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let name = arg
                .name
                .clone()
                .or_else(|| method.parameters.get(i).map(|p| p.name.clone()))
                .unwrap_or_else(|| i.to_string());
            let type_display = infer_type_display(&arg.value);
            let source_kind = classify_source_kind(&arg.value);
            ParameterBinding::new(name, type_display, source_kind_or_unresolved(source_kind, &type_display))
        })
        .collect();

    InvocationSite {
        containing_type_fqn: site.containing_type_fqn,
        location: site.location,
        arguments,
    }
}

/// An argument bound against a symbol the compilation never resolved falls
/// back to `type_display = "?"` / `source_kind = Invocation` (spec.md §7
/// error kind 4), regardless of what the raw operation shape suggested.
fn source_kind_or_unresolved(kind: SourceKind, type_display: &str) -> SourceKind {
    if type_display == "?" {
        SourceKind::Invocation
    } else {
        kind
    }
}
