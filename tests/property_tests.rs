//! Property-based tests for case conversion and tag synthesis.

use easytags::{synthesize, to_camel, to_snake, CasePolicy, FieldContext, Rewrite, TagRequest};
use proptest::prelude::*;

/// Exported Go identifiers built from capitalized words and acronyms.
fn identifier() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof!["[A-Z][a-z]{1,6}", "[A-Z]{2,4}"],
        1..5,
    )
    .prop_map(|parts| parts.concat())
}

fn tag_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("json".to_string()),
        Just("xml".to_string()),
        Just("db".to_string()),
        Just("swaggertype".to_string()),
        "[a-z]{2,8}",
    ]
}

fn case_policy() -> impl Strategy<Value = CasePolicy> {
    prop_oneof![
        Just(CasePolicy::Snake),
        Just(CasePolicy::Camel),
        Just(CasePolicy::Pascal),
    ]
}

fn requests() -> impl Strategy<Value = Vec<TagRequest>> {
    prop::collection::vec(
        (tag_name(), case_policy()).prop_map(|(name, case)| TagRequest::new(name, case)),
        0..4,
    )
}

proptest! {
    /// snake_case never starts with an underscore and never doubles one.
    #[test]
    fn snake_has_clean_underscores(id in identifier()) {
        let snake = to_snake(&id);
        prop_assert!(!snake.starts_with('_'));
        prop_assert!(!snake.contains("__"));
        prop_assert_eq!(snake.replace('_', ""), id.to_lowercase());
    }

    /// camelCase only changes the leading capital run.
    #[test]
    fn camel_preserves_letters(id in identifier()) {
        let camel = to_camel(&id);
        prop_assert_eq!(camel.to_lowercase(), id.to_lowercase());
        prop_assert!(camel.chars().next().is_some_and(|c| c.is_lowercase()));
    }

    /// A second pass over an already synthesized tag changes nothing.
    #[test]
    fn synthesize_is_idempotent(id in identifier(), requests in requests()) {
        let first = synthesize(
            &FieldContext { identifier: Some(id.as_str()), current_tag: None, type_description: "int64" },
            &requests,
            false,
        );
        let current = match &first.rewrite {
            Rewrite::Replace(raw) => Some(raw.as_str()),
            _ => None,
        };
        let second = synthesize(
            &FieldContext { identifier: Some(id.as_str()), current_tag: current, type_description: "int64" },
            &requests,
            false,
        );
        prop_assert_eq!(second.rewrite, first.rewrite);
    }

    /// Removal strips any exported field, whatever was requested.
    #[test]
    fn remove_always_strips(id in identifier(), requests in requests()) {
        let out = synthesize(
            &FieldContext {
                identifier: Some(id.as_str()),
                current_tag: Some("`json:\"x\" other`"),
                type_description: "string",
            },
            &requests,
            true,
        );
        prop_assert_eq!(out.rewrite, Rewrite::Remove);
    }
}
