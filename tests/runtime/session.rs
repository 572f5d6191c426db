//! Session integration tests
//!
//! Tests the parse, prepare and dispatch flow across parser and runtime.

use orgshell_foundation::{ContextLevel, ExecutionError};
use orgshell_parser::{Context, HandlerOutcome, InMemoryDirectory, Invocation, ParserConfig};
use orgshell_runtime::Session;

fn session() -> Session {
    Session::new(ParserConfig::default(), InMemoryDirectory::new()).unwrap()
}

// =============================================================================
// Workflows
// =============================================================================

#[test]
fn company_and_brand_workflow() {
    let mut s = session();

    let created = s.eval("cc Acme entity=SA currency=EUR");
    assert!(created.succeeded(), "{created:?}");
    assert_eq!(created.command.as_deref(), Some("create_company"));
    assert_eq!(s.directory().names(), ["Acme"]);

    assert!(s.eval("cd Acme").succeeded());
    assert_eq!(s.context().level(), ContextLevel::Organization);

    let brand = s.eval("ab name=Rocket");
    assert_eq!(
        brand.message.as_deref(),
        Some("add_brand at ~/Acme: brand with name=Rocket")
    );

    assert!(s.eval("cd app:crm").succeeded());
    assert_eq!(s.context().path(), "~/Acme/crm");
    assert!(s.eval("cd ..").succeeded());
    assert_eq!(s.context().path(), "~/Acme");
    assert!(s.eval("cd ~").succeeded());
    assert_eq!(s.context(), &Context::system());
}

#[test]
fn typos_are_interpreted() {
    let mut s = session();
    let result = s.eval("creat compny Initech");
    assert!(result.succeeded(), "{result:?}");
    assert_eq!(result.message.as_deref(), Some("Created company 'Initech'"));
    assert!(
        result
            .parse
            .suggestions
            .contains(&"Interpreted 'compny' as 'company'".to_string())
    );
    assert_eq!(result.words, ["create", "company"]);
}

#[test]
fn values_of_the_wrong_type_are_kept_as_text() {
    let mut s = session();
    let result = s.eval("cc Acme currency=XYZ");
    assert!(result.succeeded(), "{result:?}");
    assert_eq!(
        result.parse.warnings,
        ["Invalid value for 'currency': expected one of EUR, USD, GBP, CHF, CAD, got 'XYZ'"]
    );
    assert_eq!(
        result.message.as_deref(),
        Some("Created company 'Acme' with currency=XYZ")
    );
    assert_eq!(s.directory().names(), ["Acme"]);
}

// =============================================================================
// Handlers
// =============================================================================

#[test]
fn handlers_can_be_replaced() {
    let mut s = session();
    s.register_handler(
        "show_company",
        |inv: &Invocation, _: &Context| -> Result<HandlerOutcome, ExecutionError> {
            Ok(HandlerOutcome::message(format!(
                "{} has no records",
                inv.entity_value.as_deref().unwrap_or("nobody")
            )))
        },
    );
    let result = s.eval("show company Acme");
    assert_eq!(result.message.as_deref(), Some("Acme has no records"));
}

#[test]
fn failed_commands_keep_the_context() {
    let mut s = Session::new(
        ParserConfig::default(),
        InMemoryDirectory::new().with_organization("Globex"),
    )
    .unwrap();
    s.eval("cd Globex");
    let before = s.context().clone();

    let result = s.eval("cd Nowhere");
    assert_eq!(result.error.as_deref(), Some("Company 'Nowhere' does not exist"));
    assert_eq!(s.context(), &before);
    assert_eq!(result.context, before);
}

#[test]
fn shortcuts_can_be_disabled() {
    let mut s = Session::new(
        ParserConfig::default().with_shortcuts(false),
        InMemoryDirectory::new(),
    )
    .unwrap();
    let result = s.eval("cc Acme");
    assert!(result.command.is_none());
    assert!(s.directory().names().is_empty());
}
