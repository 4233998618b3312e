//! Every registered action resolves from its exact path; distant tokens get no suggestions.

use adminctl::matcher::{distance, threshold};
use adminctl::output::OutputRecord;
use adminctl::registry::{Action, CommandRegistry, Invocation, Resolution};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn registry_from(paths: &BTreeSet<(String, String)>) -> CommandRegistry {
    let mut registry = CommandRegistry::new("adminctl", "");
    for (topic, action) in paths {
        registry
            .register(
                &[topic.as_str()],
                Action::new(action.clone(), "", |_: &Invocation| {
                    Ok(Vec::<OutputRecord>::new())
                }),
            )
            .unwrap();
    }
    registry
}

fn paths() -> impl Strategy<Value = BTreeSet<(String, String)>> {
    // Topics and actions drawn from disjoint alphabets so no name is both.
    prop::collection::btree_set(("[a-m]{2,8}", "[n-z]{2,8}"), 1..12)
}

proptest! {
    #[test]
    fn exact_paths_resolve_with_no_remaining_args(paths in paths()) {
        let registry = registry_from(&paths);
        for (topic, action) in &paths {
            match registry.resolve(&[topic.as_str(), action.as_str()]) {
                Resolution::Resolved { action: found, path, remaining_args } => {
                    prop_assert_eq!(found.name(), action.as_str());
                    prop_assert_eq!(path, vec![topic.clone(), action.clone()]);
                    prop_assert!(remaining_args.is_empty());
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn distant_tokens_get_no_suggestions(paths in paths(), token in "[0-9]{1,6}") {
        let registry = registry_from(&paths);
        let topics: Vec<&String> = paths.iter().map(|(t, _)| t).collect();
        prop_assume!(topics.iter().all(|t| distance(&token, t) > threshold(&token)));
        match registry.resolve(&[token.as_str()]) {
            Resolution::Unknown { suggestions, .. } => prop_assert!(suggestions.is_empty()),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
