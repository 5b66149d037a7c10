//! Component C7: the second pass over findings — inconsistency detection,
//! common-name ranking, telemetry feature aggregation (spec.md §4.7). A
//! pure, total function: `summarize(findings) == summarize(shuffle(findings))`
//! once output ordering is canonicalised (spec.md §8).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::model::{
    CommonParameterName, CustomTagMapping, Finding, InconsistencyGroup, IssueKind, ParameterBinding,
    Summary, TagProviderSummary, TelemetryStats,
};

pub fn summarize(findings: &[Finding]) -> Summary {
    let bindings: Vec<&ParameterBinding> = findings.iter().flat_map(|f| f.message_parameters()).collect();

    let mut parameter_types_by_name: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for binding in &bindings {
        parameter_types_by_name
            .entry(binding.name.clone())
            .or_default()
            .insert(binding.type_display.clone());
    }

    let total_parameter_usage_count = bindings.len();
    let unique_parameter_name_count = parameter_types_by_name.len();

    let inconsistency_groups = find_inconsistency_groups(&bindings);
    let common_parameter_names = rank_common_parameter_names(&bindings);
    let telemetry_stats = aggregate_telemetry_stats(findings);

    Summary {
        parameter_types_by_name,
        total_parameter_usage_count,
        unique_parameter_name_count,
        inconsistency_groups,
        common_parameter_names,
        telemetry_stats,
    }
}

/// Clusters are keyed by case-insensitive name (spec.md §4.7 Group 2); a
/// cluster with only one exact-case name still reduces to the plain
/// per-exact-name partition of Group 1, so a single pass over these
/// clusters computes both rules and their combination (spec.md §8 scenario
/// 4: one cluster, both `TypeMismatch` and `CasingDifference`).
fn find_inconsistency_groups(bindings: &[&ParameterBinding]) -> Vec<InconsistencyGroup> {
    let mut clusters: BTreeMap<String, BTreeSet<(String, String)>> = BTreeMap::new();
    for b in bindings {
        clusters
            .entry(b.name.to_lowercase())
            .or_default()
            .insert((b.name.clone(), b.type_display.clone()));
    }

    clusters
        .into_values()
        .filter_map(|names_with_types| {
            let distinct_types: BTreeSet<&str> = names_with_types.iter().map(|(_, t)| t.as_str()).collect();
            let distinct_names: BTreeSet<&str> = names_with_types.iter().map(|(n, _)| n.as_str()).collect();

            let mut issue_kinds = BTreeSet::new();
            if distinct_types.len() > 1 {
                issue_kinds.insert(IssueKind::TypeMismatch);
            }
            if distinct_names.len() > 1 {
                issue_kinds.insert(IssueKind::CasingDifference);
            }
            if issue_kinds.is_empty() {
                return None;
            }
            Some(InconsistencyGroup {
                names_with_types: names_with_types.into_iter().collect(),
                issue_kinds,
            })
        })
        .collect()
}

fn rank_common_parameter_names(bindings: &[&ParameterBinding]) -> Vec<CommonParameterName> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut types_by_name: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
    for b in bindings {
        *counts.entry(&b.name).or_insert(0) += 1;
        *types_by_name
            .entry(&b.name)
            .or_default()
            .entry(&b.type_display)
            .or_insert(0) += 1;
    }

    let mut entries: Vec<CommonParameterName> = counts
        .into_iter()
        .map(|(name, count)| {
            let type_counts = &types_by_name[name];
            let max_count = type_counts.values().copied().max().unwrap_or(0);
            let most_common_type = type_counts
                .iter()
                .filter(|(_, &c)| c == max_count)
                .map(|(t, _)| *t)
                .min()
                .unwrap_or("")
                .to_string();
            CommonParameterName {
                name: name.to_string(),
                count,
                most_common_type,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

fn aggregate_telemetry_stats(findings: &[Finding]) -> TelemetryStats {
    let mut stats = TelemetryStats::default();

    for finding in findings {
        for binding in finding.message_parameters() {
            if let Some(tag) = &binding.custom_tag_name {
                stats.custom_tag_parameter_count += 1;
                stats.custom_tag_mappings.push(CustomTagMapping {
                    name: binding.name.clone(),
                    custom_tag_name: tag.clone(),
                });
            }
        }

        if let Finding::CompileTimeAttribute { log_properties_parameters, .. } = finding {
            for param in log_properties_parameters {
                if let Some(provider) = &param.tag_provider {
                    if provider.is_valid {
                        stats.tag_provider_valid_count += 1;
                    } else {
                        stats.tag_provider_invalid_count += 1;
                    }
                    stats.tag_providers.push(TagProviderSummary {
                        parameter_name: provider.parameter_name.clone(),
                        provider_type_fqn: provider.provider_type_fqn.clone(),
                        provider_method_name: provider.provider_method_name.clone(),
                        is_valid: provider.is_valid,
                        validation_message: provider.validation_message.clone(),
                    });
                }
                count_property_tree(&param.properties, &mut stats);
            }
        }
    }

    stats
}

fn count_property_tree(properties: &[crate::model::PropertyNode], stats: &mut TelemetryStats) {
    for prop in properties {
        if let Some(tag) = &prop.custom_tag_name {
            stats.custom_tag_property_count += 1;
            stats.custom_tag_mappings.push(CustomTagMapping {
                name: prop.original_name.clone(),
                custom_tag_name: tag.clone(),
            });
        }
        if let Some(nested) = &prop.nested {
            stats.transitive_property_count += nested.len();
            count_property_tree(nested, stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FindingHeader, SourceKind, SourceLocation};

    fn loc() -> SourceLocation {
        SourceLocation::new("a.cs", 1, 1)
    }

    fn finding_with(name: &str, ty: &str) -> Finding {
        Finding::ExtensionCall {
            header: FindingHeader {
                method_name: "LogInformation".to_string(),
                log_level: None,
                message_template: Some(format!("{{{name}}}")),
                event_id: None,
                message_parameters: vec![ParameterBinding::new(name, ty, SourceKind::Parameter)],
                location: loc(),
            },
        }
    }

    #[test]
    fn detects_type_mismatch_and_casing_difference() {
        let findings = vec![finding_with("userId", "int"), finding_with("UserId", "string")];
        let summary = summarize(&findings);
        assert_eq!(summary.inconsistency_groups.len(), 1);
        let group = &summary.inconsistency_groups[0];
        assert!(group.issue_kinds.contains(&IssueKind::TypeMismatch));
        assert!(group.issue_kinds.contains(&IssueKind::CasingDifference));
        assert_eq!(group.names_with_types.len(), 2);
    }

    #[test]
    fn total_usage_count_matches_invariant_6() {
        let findings = vec![finding_with("a", "int"), finding_with("b", "string")];
        let summary = summarize(&findings);
        assert_eq!(summary.total_parameter_usage_count, 2);
    }

    #[test]
    fn common_parameter_names_tie_broken_by_name() {
        let findings = vec![finding_with("b", "int"), finding_with("a", "int")];
        let summary = summarize(&findings);
        assert_eq!(summary.common_parameter_names[0].name, "a");
        assert_eq!(summary.common_parameter_names[1].name, "b");
    }

    #[test]
    fn summarizer_is_pure_under_reordering() {
        let mut findings = vec![finding_with("a", "int"), finding_with("b", "string")];
        let first = summarize(&findings);
        findings.reverse();
        let second = summarize(&findings);
        assert_eq!(first.parameter_types_by_name, second.parameter_types_by_name);
        assert_eq!(first.total_parameter_usage_count, second.total_parameter_usage_count);
    }
}
