//! Resolution of input tokens against a registry built the way an application builds one.

use super::test_utils::sample_registry;
use adminctl::error::StructuralError;
use adminctl::output::OutputRecord;
use adminctl::registry::{
    Action, ArgSpec, CommandNode, CommandRegistry, FlagSpec, Invocation, Resolution, Topic,
};

fn noop(name: &str) -> Action {
    Action::new(name, "", |_: &Invocation| Ok(Vec::<OutputRecord>::new()))
}

#[test]
fn test_exact_path_resolves_with_remaining_args() {
    let registry = sample_registry();
    match registry.resolve(&["user", "create", "ann@example.com", "--admin"]) {
        Resolution::Resolved {
            action,
            path,
            remaining_args,
        } => {
            assert_eq!(action.name(), "create");
            assert_eq!(path, vec!["user", "create"]);
            assert_eq!(remaining_args, vec!["ann@example.com", "--admin"]);
        }
        other => panic!("expected Resolved, got {:?}", other),
    }
}

#[test]
fn test_typo_in_topic_suggests_topic() {
    let registry = sample_registry();
    match registry.resolve(&["usr", "list"]) {
        Resolution::Unknown {
            attempted_path,
            token,
            suggestions,
        } => {
            assert!(attempted_path.is_empty());
            assert_eq!(token, "usr");
            assert_eq!(suggestions, vec!["user"]);
        }
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_typo_in_action_suggests_action() {
    let registry = sample_registry();
    match registry.resolve(&["user", "lsit"]) {
        Resolution::Unknown {
            attempted_path,
            token,
            suggestions,
        } => {
            assert_eq!(attempted_path, vec!["user"]);
            assert_eq!(token, "lsit");
            assert_eq!(suggestions, vec!["list"]);
        }
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_aliases_resolve_to_canonical_path() {
    let registry = sample_registry();
    match registry.resolve(&["users", "ls"]) {
        Resolution::Resolved { path, .. } => assert_eq!(path, vec!["user", "list"]),
        other => panic!("expected Resolved, got {:?}", other),
    }
}

#[test]
fn test_far_token_gets_no_suggestions() {
    let registry = sample_registry();
    match registry.resolve(&["user", "xyzzyplugh"]) {
        Resolution::Unknown { suggestions, .. } => assert!(suggestions.is_empty()),
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_suggestions_are_capped_at_three() {
    let mut registry = CommandRegistry::new("adminctl", "");
    for name in ["lisa", "lista", "listy", "lists", "liste"] {
        registry.register(&["user"], noop(name)).unwrap();
    }
    match registry.resolve(&["user", "list"]) {
        Resolution::Unknown { suggestions, .. } => {
            assert_eq!(suggestions.len(), 3);
            assert_eq!(suggestions, vec!["lisa", "lista", "liste"]);
        }
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_topic_without_action_is_incomplete() {
    let registry = sample_registry();
    match registry.resolve(&["team"]) {
        Resolution::Incomplete { topic_path, topic } => {
            assert_eq!(topic_path, vec!["team"]);
            let names: Vec<&str> = topic.children().iter().map(CommandNode::name).collect();
            assert_eq!(names, vec!["archive"]);
        }
        other => panic!("expected Incomplete, got {:?}", other),
    }
}

#[test]
fn test_children_keep_registration_order() {
    let registry = sample_registry();
    let names: Vec<&str> = registry
        .children(&["user"])
        .unwrap()
        .iter()
        .map(CommandNode::name)
        .collect();
    assert_eq!(names, vec!["list", "create", "delete"]);
}

#[test]
fn test_structural_errors_at_build_time() {
    let mut registry = sample_registry();
    assert!(matches!(
        registry.register(&["user", "list"], noop("x")),
        Err(StructuralError::ParentIsAction { .. })
    ));
    assert!(matches!(
        registry.register(&["user"], noop("create")),
        Err(StructuralError::DuplicateAction { .. })
    ));
    assert!(matches!(
        registry.register(&["user"], Topic::new("list", "")),
        Err(StructuralError::KindConflict { .. })
    ));
    assert!(matches!(
        registry.register(&["user"], noop("remove").alias("ls")),
        Err(StructuralError::AliasConflict { .. })
    ));
}

#[test]
fn test_unparseable_declarations_fail_at_build_time() {
    let mut registry = sample_registry();
    let declarations = [
        noop("a")
            .flag(FlagSpec::switch("x", ""))
            .flag(FlagSpec::switch("x", "")),
        noop("b").flag(FlagSpec::switch("help", "")),
        noop("c").flag(FlagSpec::switch("host", "").short('h')),
        noop("d")
            .arg(ArgSpec::optional("o", ""))
            .arg(ArgSpec::required("r", "")),
        noop("e")
            .arg(ArgSpec::required("v", "").variadic())
            .arg(ArgSpec::required("w", "")),
        noop("f")
            .flag(FlagSpec::switch("all", "").short('a'))
            .flag(FlagSpec::switch("any", "").short('a')),
    ];
    for action in declarations {
        let name = action.name().to_string();
        assert!(
            matches!(
                registry.register(&["user"], action),
                Err(StructuralError::InvalidDeclaration { .. })
            ),
            "{} should be rejected",
            name
        );
    }
    assert_eq!(registry.children(&["user"]).unwrap().len(), 3);
}

#[test]
fn test_help_cannot_be_a_top_level_command() {
    let mut registry = sample_registry();
    assert!(matches!(
        registry.register(&[] as &[&str], noop("help")),
        Err(StructuralError::ReservedName { .. })
    ));
    assert!(registry.find(&["help"]).is_none());
}
