//! Integration tests for word kinds, context levels and entity kinds.

use orgshell_foundation::{ContextLevel, EntityKind, WordKind};

#[test]
fn word_kinds_order_by_precedence() {
    let mut kinds = [
        WordKind::Attribute,
        WordKind::Entity,
        WordKind::Action,
        WordKind::Modifier,
    ];
    kinds.sort_by_key(|k| k.precedence());
    assert_eq!(kinds, WordKind::ALL);
    assert_eq!(WordKind::EXPECTED_ORDER, "ACTION → MODIFIER → ENTITY → ATTRIBUTES");
}

#[test]
fn context_levels_nest() {
    assert_eq!(ContextLevel::default(), ContextLevel::System);
    assert!(ContextLevel::System < ContextLevel::Organization);
    assert!(ContextLevel::Organization < ContextLevel::Application);
    assert_eq!(ContextLevel::Application.parent(), Some(ContextLevel::Organization));
    assert_eq!(ContextLevel::System.parent(), None);
    for level in [
        ContextLevel::System,
        ContextLevel::Organization,
        ContextLevel::Application,
    ] {
        assert_eq!(ContextLevel::from_depth(level.depth()), Some(level));
    }
    assert_eq!(ContextLevel::from_depth(3), None);
}

#[test]
fn entity_kinds_round_trip_names() {
    for kind in EntityKind::ALL {
        assert_eq!(EntityKind::from_name(kind.name()), Some(kind));
        assert_eq!(kind.to_string(), kind.name());
    }
    assert_eq!(EntityKind::from_name("spaceship"), None);
}
