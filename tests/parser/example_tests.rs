//! The worked examples of the command grammar.

use std::sync::Arc;

use orgshell_foundation::{ContextError, ContextLevel, EntityKind, ValueType, WordSetError};
use orgshell_parser::{
    ActionCategory, ActionWord, AttributeWord, CommandDef, CommandRegistry, Context, EntityWord,
    OrgId, Parser, TokenClass, VocabularyRegistry,
};

fn vocab() -> Arc<VocabularyRegistry> {
    let registry = VocabularyRegistry::new()
        .register(ActionWord::new("create", "Create", ActionCategory::Crud).requiring_entity())
        .and_then(|r| r.register(ActionWord::new("show", "Show", ActionCategory::Crud)))
        .and_then(|r| r.register(EntityWord::new("company", "Company", EntityKind::Company)))
        .and_then(|r| r.register(EntityWord::new("brand", "Brand", EntityKind::Brand)))
        .and_then(|r| {
            r.register(AttributeWord::new(
                "entity",
                "Legal form",
                ValueType::choice(["SA", "SAS"]),
            ))
        })
        .and_then(|r| {
            r.register(AttributeWord::new(
                "currency",
                "Currency",
                ValueType::choice(["EUR", "USD"]),
            ))
        })
        .unwrap();
    Arc::new(registry)
}

fn create_company() -> CommandDef {
    CommandDef::new("create_company", "Create a company")
        .requires(["create", "company"])
        .accepts(["entity", "currency"])
}

fn parser() -> Parser {
    let commands = CommandRegistry::new(vocab())
        .register(create_company())
        .unwrap();
    Parser::new(Arc::new(commands))
}

#[test]
fn example_a_create_company() {
    let result = parser().parse("create company ACME");
    let classes: Vec<_> = result.tokens.iter().map(|t| t.class).collect();
    assert_eq!(
        classes,
        [TokenClass::Word, TokenClass::Word, TokenClass::Value]
    );
    assert_eq!(result.entity_values.len(), 1);
    assert_eq!(result.entity_values["company_name"], "ACME");
    assert!(result.is_valid);
}

#[test]
fn example_b_out_of_order() {
    let result = parser().parse("company create ACME");
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("'create'"));
    assert!(result.errors[0].contains("ACTION → MODIFIER → ENTITY"));
}

#[test]
fn example_c_word_set_validation() {
    let vocab = vocab();
    let commands = CommandRegistry::new(Arc::clone(&vocab))
        .register(create_company())
        .unwrap();
    let command = commands.get("create_company").unwrap();

    assert_eq!(
        command.validate_words(&["create", "company", "entity"], &vocab),
        Ok(())
    );
    let err = command.validate_words(&["create"], &vocab).unwrap_err();
    assert_eq!(err, WordSetError::MissingRequired(vec!["company".to_string()]));
    assert_eq!(err.to_string(), "Missing required words: company");
}

#[test]
fn example_d_inconsistent_context() {
    let err = Context::new(ContextLevel::Organization, Some(OrgId(1)), None, None).unwrap_err();
    assert!(matches!(
        err,
        ContextError::LevelConsistency {
            level: ContextLevel::Organization,
            ..
        }
    ));
    assert!(Context::new(ContextLevel::Organization, None, None, None).is_err());
}

#[test]
fn example_e_ranking_prefers_satisfied_required_words() {
    let show_brand = CommandDef::new("show_brand", "Show a brand").requires(["show", "brand"]);
    let show_any = CommandDef::new("show_any", "Show anything")
        .requires(["show"])
        .accepts(["brand", "company"]);

    for defs in [
        [show_brand.clone(), show_any.clone()],
        [show_any.clone(), show_brand.clone()],
    ] {
        let commands = defs
            .into_iter()
            .try_fold(CommandRegistry::new(vocab()), CommandRegistry::register)
            .unwrap();
        let parser = Parser::new(Arc::new(commands));
        let first = parser.parse("show brand");
        for _ in 0..10 {
            assert_eq!(parser.parse("show brand"), first);
        }
        assert_eq!(first.matching_commands.len(), 2);
        assert_eq!(
            parser.selected(&first).map(|c| c.id()),
            Some("show_brand")
        );
    }
}
