//! Property tests for the summarizer (spec.md §8 "Testable properties" —
//! purity under reordering and the `total_parameter_usage_count` invariant).

use logging_usage_extractor::model::{
    Finding, FindingHeader, ParameterBinding, SourceKind, SourceLocation,
};
use logging_usage_extractor::summarizer::summarize;
use proptest::prelude::*;

fn finding_with_params(index: usize, names: Vec<(String, String)>) -> Finding {
    let message_parameters = names
        .into_iter()
        .map(|(name, ty)| ParameterBinding::new(name, ty, SourceKind::Constant))
        .collect();
    Finding::ExtensionCall {
        header: FindingHeader {
            method_name: "LogInformation".to_string(),
            log_level: None,
            message_template: None,
            event_id: None,
            message_parameters,
            location: SourceLocation::new(format!("File{index}.cs"), index as u32 + 1, 1),
        },
    }
}

fn arb_findings() -> impl Strategy<Value = Vec<Finding>> {
    prop::collection::vec(
        prop::collection::vec(
            ("[a-zA-Z]{1,6}", "(int|string|bool)"),
            0..4,
        ),
        0..8,
    )
    .prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(i, params)| finding_with_params(i, params))
            .collect()
    })
}

proptest! {
    #[test]
    fn total_usage_count_matches_sum_of_message_parameters(findings in arb_findings()) {
        let expected: usize = findings.iter().map(|f| f.message_parameters().len()).sum();
        let summary = summarize(&findings);
        prop_assert_eq!(summary.total_parameter_usage_count, expected);
    }

    #[test]
    fn summarizer_is_pure_under_shuffling(findings in arb_findings(), seed in 0u64..1000) {
        let first = summarize(&findings);

        let mut shuffled = findings.clone();
        // Deterministic pseudo-shuffle keyed on `seed`, avoiding a direct
        // dependency on a random-number crate for one test helper.
        let len = shuffled.len();
        if len > 1 {
            for i in 0..len {
                let j = ((seed as usize).wrapping_add(i * 2654435761)) % len;
                shuffled.swap(i, j);
            }
        }
        let second = summarize(&shuffled);

        prop_assert_eq!(first.parameter_types_by_name, second.parameter_types_by_name);
        prop_assert_eq!(first.total_parameter_usage_count, second.total_parameter_usage_count);
        prop_assert_eq!(first.unique_parameter_name_count, second.unique_parameter_name_count);
        prop_assert_eq!(first.inconsistency_groups, second.inconsistency_groups);

        let mut first_common = first.common_parameter_names.clone();
        let mut second_common = second.common_parameter_names.clone();
        first_common.sort_by(|a, b| a.name.cmp(&b.name));
        second_common.sort_by(|a, b| a.name.cmp(&b.name));
        prop_assert_eq!(first_common, second_common);
    }
}
