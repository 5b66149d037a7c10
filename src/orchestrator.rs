//! Component C6: the extractor orchestrator (spec.md §4.6) — the one
//! programmatic entry point this crate exposes.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::analyzers::{all_analyzers, Analyzer};
use crate::caller_finder::find_callers;
use crate::config::{CancellationToken, ExtractionConfig};
use crate::model::{ExtractionResult, Finding};
use crate::progress::{clamp_percent, ProgressEvent, ProgressReporter};
use crate::registry::LoggingTypes;
use crate::semantic::{Compilation, MethodSymbol, ProjectGraph, RawCallSite, SyntaxTree};
use crate::summarizer::summarize;

/// A transient single-project workspace synthesised around `compilation`
/// when the caller has no multi-project [`ProjectGraph`] of their own
/// (spec.md §4.6 step 2) — gives component C5 a host to call into even when
/// there is only the one project being analyzed. It reports no cross-project
/// call sites of its own (there is no second project to search); callers who
/// want real cross-project invocations supply their own `ProjectGraph`.
///
/// Acquired right after `LoggingTypes` resolves and released on every exit
/// path, including an early return or an unwinding panic, via `Drop`
/// (spec.md §5 "Resource lifecycle").
struct TransientWorkspace<'c> {
    compilation: &'c dyn Compilation,
}

impl<'c> TransientWorkspace<'c> {
    fn acquire(compilation: &'c dyn Compilation) -> Self {
        tracing::debug!("transient single-project workspace acquired");
        Self { compilation }
    }
}

impl<'c> Drop for TransientWorkspace<'c> {
    fn drop(&mut self) {
        tracing::debug!("transient single-project workspace released");
    }
}

impl<'c> ProjectGraph for TransientWorkspace<'c> {
    fn find_invocations(&self, declaring_type_fqn: &str, method: &MethodSymbol) -> anyhow::Result<Vec<RawCallSite>> {
        let _ = (self.compilation, declaring_type_fqn, method);
        Ok(Vec::new())
    }
}

/// Run every analyzer over every syntax tree in `compilation` and return the
/// sorted findings plus their summary (spec.md §4.6).
///
/// `project_graph` is consulted only to attach `invocations` to
/// `CompileTimeAttribute` findings (component C5); its absence is not a
/// degraded mode (spec.md §4.5) — invocations are simply left empty.
pub fn extract(
    compilation: &dyn Compilation,
    project_graph: Option<&dyn ProjectGraph>,
    progress: Option<&dyn ProgressReporter>,
    cancel: Option<&CancellationToken>,
    config: &ExtractionConfig,
) -> ExtractionResult {
    let Some(types) = LoggingTypes::resolve(compilation) else {
        tracing::warn!("logger interface unresolved, returning empty extraction result");
        return ExtractionResult::empty();
    };

    let trees = compilation.syntax_trees();
    report(progress, 0.0, "workspace ready", None, None);

    // spec.md §4.6 step 2: synthesise a host for C5 when the caller didn't
    // bring their own project graph. Held in scope for the rest of `extract`
    // so `Drop` releases it on every exit path below, panic included.
    let transient_workspace = project_graph.is_none().then(|| TransientWorkspace::acquire(compilation));
    let effective_graph: Option<&dyn ProjectGraph> = project_graph.or(transient_workspace.as_ref().map(|w| w as &dyn ProjectGraph));

    let analyzers = all_analyzers(compilation);
    let worker_count = config.parallelism.resolve(trees.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .build()
        .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().expect("default rayon pool"));

    report(progress, 1.0, "analyzer phase start", None, None);

    let completed = AtomicUsize::new(0);
    let total_trees = trees.len().max(1);
    let total_ops = trees.iter().map(|t| t.nodes.len()).sum::<usize>().max(1);
    let ops_scanned = AtomicUsize::new(0);
    let last_bucket = AtomicUsize::new(0);

    let per_tree: Vec<Vec<Finding>> = pool.install(|| {
        trees
            .par_iter()
            .map(|tree| {
                if cancel.is_some_and(CancellationToken::is_cancelled) {
                    return Vec::new();
                }
                let findings = walk_tree(tree, &analyzers, &types, progress, &ops_scanned, total_ops, &last_bucket);
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                report(
                    progress,
                    5.0 + 90.0 * (done as f64 / total_trees as f64),
                    "project completion",
                    Some(tree.file_path.as_str()),
                    None,
                );
                findings
            })
            .collect()
    });

    let mut findings: Vec<Finding> = per_tree.into_iter().flatten().collect();

    attach_invocations(&mut findings, compilation, effective_graph);

    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let summary = summarize(&findings);
    report(progress, 100.0, "complete", None, None);

    // Checked after every tree has joined rather than once up front, so a
    // cancellation that trips mid-run is still reflected here (spec.md §5
    // "in-flight tasks attempt to complete the current file ... and return
    // whatever has been gathered so far, along with a cancelled indicator").
    let is_cancelled = cancel.is_some_and(CancellationToken::is_cancelled);

    ExtractionResult {
        findings,
        summary,
        cancelled: is_cancelled,
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_tree(
    tree: &SyntaxTree,
    analyzers: &[Box<dyn Analyzer + '_>],
    types: &LoggingTypes,
    progress: Option<&dyn ProgressReporter>,
    ops_scanned: &AtomicUsize,
    total_ops: usize,
    last_bucket: &AtomicUsize,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for node in &tree.nodes {
        for analyzer in analyzers {
            let outcome = catch_unwind(AssertUnwindSafe(|| analyzer.try_match(node, types)));
            match outcome {
                Ok(Some(finding)) => {
                    findings.push(finding);
                    break;
                }
                Ok(None) => continue,
                Err(_) => {
                    let loc = node.location();
                    tracing::warn!(
                        analyzer = analyzer.name(),
                        file = %loc.file_path,
                        line = loc.start_line,
                        "analyzer fault, skipping operation"
                    );
                    break;
                }
            }
        }
        let done = ops_scanned.fetch_add(1, Ordering::SeqCst) + 1;
        report_operation_progress(progress, done, total_ops, last_bucket, &tree.file_path);
    }
    findings
}

/// Reports progress at least every 5% of `total` operations scanned, in the
/// `[5, 95]` window between the "analyzer phase start" and final "complete"
/// milestones (spec.md §4.6 step 7). Concurrent workers race on `last_bucket`;
/// losing the race just means some other worker already reported this bucket,
/// which still satisfies "at least every 5%".
fn report_operation_progress(
    progress: Option<&dyn ProgressReporter>,
    done: usize,
    total: usize,
    last_bucket: &AtomicUsize,
    file: &str,
) {
    if progress.is_none() {
        return;
    }
    let fraction_of_window = 90.0 * (done as f64 / total as f64);
    let bucket = (fraction_of_window / 5.0).floor() as usize;
    let prev = last_bucket.load(Ordering::SeqCst);
    if bucket > prev && last_bucket.compare_exchange(prev, bucket, Ordering::SeqCst, Ordering::SeqCst).is_ok() {
        report(progress, 5.0 + fraction_of_window, "operations scanned", Some(file), None);
    }
}

fn attach_invocations(findings: &mut [Finding], compilation: &dyn Compilation, project_graph: Option<&dyn ProjectGraph>) {
    for finding in findings.iter_mut() {
        let Finding::CompileTimeAttribute {
            declaring_type,
            invocations,
            header,
            ..
        } = finding
        else {
            continue;
        };
        let Some(method) = compilation.resolve_method(declaring_type, &header.method_name) else {
            continue;
        };
        *invocations = find_callers(project_graph, &method, declaring_type);
    }
}

fn report(progress: Option<&dyn ProgressReporter>, percent: f64, description: &str, file: Option<&str>, analyzer: Option<&str>) {
    let Some(progress) = progress else { return };
    let event = ProgressEvent {
        percent: clamp_percent(percent),
        operation_description: description.to_string(),
        current_file: file.map(str::to_string),
        current_analyzer: analyzer.map(str::to_string),
    };
    if catch_unwind(AssertUnwindSafe(|| progress.report(event))).is_err() {
        tracing::warn!("progress reporter panicked, ignoring");
    }
}
