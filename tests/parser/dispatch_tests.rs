//! Execution boundary tests.

use std::sync::Arc;

use orgshell_foundation::{
    ContextLevel, ContextLevelError, EntityKind, ExecutionError, NavigationError,
};
use orgshell_parser::{
    ActionCategory, ActionWord, CommandDef, CommandRegistry, Context, Dispatcher, EntityWord,
    HandlerOutcome, InMemoryDirectory, Invocation, NavigateHandler, OrgId, Parser,
    VocabularyRegistry, stdlib,
};

fn org() -> Context {
    Context::organization(OrgId(1), "Acme").unwrap()
}

#[test]
fn invocation_carries_typed_arguments() {
    let parser = stdlib::parser().unwrap();
    let result = parser.parse("update company Acme currency=usd closing=6");
    let invocation = Invocation::prepare(&result, parser.commands(), &org()).unwrap();

    assert_eq!(invocation.command_id, "update_company");
    assert_eq!(invocation.handler.name(), "update_company");
    assert_eq!(invocation.entity, Some(EntityKind::Company));
    assert_eq!(invocation.entity_value.as_deref(), Some("Acme"));
    assert_eq!(invocation.attribute_words, ["currency", "closing"]);
    assert_eq!(invocation.attributes["currency"].to_string(), "USD");
    assert_eq!(invocation.warning, None);
}

#[test]
fn invocation_requires_a_valid_parse() {
    let parser = stdlib::parser().unwrap();
    let ctx = Context::system();

    let result = parser.parse("company create");
    assert!(matches!(
        Invocation::prepare(&result, parser.commands(), &ctx),
        Err(ExecutionError::InvalidParse(_))
    ));

    let result = parser.parse("holding");
    assert!(result.is_valid);
    assert_eq!(
        Invocation::prepare(&result, parser.commands(), &ctx),
        Err(ExecutionError::NoCommand)
    );

    let result = parser.parse("update company currency=EUR");
    assert_eq!(
        Invocation::prepare(&result, parser.commands(), &ctx),
        Err(ExecutionError::ContextLevel(ContextLevelError {
            required: ContextLevel::Organization,
            current: ContextLevel::System,
        }))
    );
}

#[test]
fn word_levels_gate_execution() {
    let vocab = VocabularyRegistry::new()
        .register(ActionWord::new("show", "Show", ActionCategory::Crud))
        .and_then(|r| {
            r.register(
                EntityWord::new("brand", "Brand", EntityKind::Brand)
                    .with_min_level(ContextLevel::Organization),
            )
        })
        .unwrap();
    let commands = CommandRegistry::new(Arc::new(vocab))
        .register(CommandDef::new("peek", "Peek").requires(["show"]).accepts(["brand"]))
        .unwrap();
    let parser = Parser::new(Arc::new(commands));

    let result = parser.parse("show brand");
    let err = Invocation::prepare(&result, parser.commands(), &Context::system()).unwrap_err();
    assert!(matches!(
        err,
        ExecutionError::ContextLevel(ContextLevelError {
            required: ContextLevel::Organization,
            ..
        })
    ));
    assert!(Invocation::prepare(&result, parser.commands(), &org()).is_ok());
}

#[test]
fn destructive_actions_carry_a_warning() {
    let parser = stdlib::parser().unwrap();
    let result = parser.parse("delete brand name=Old");
    let invocation = Invocation::prepare(&result, parser.commands(), &org()).unwrap();
    assert_eq!(invocation.warning.as_deref(), Some("This permanently removes data"));
}

#[test]
fn dispatcher_routes_by_handler_name() {
    let parser = stdlib::parser().unwrap();
    let dispatcher = Dispatcher::new().with_handler(
        "add_brand",
        |inv: &Invocation, ctx: &Context| -> Result<HandlerOutcome, ExecutionError> {
            Ok(HandlerOutcome::message(format!(
                "{} brand(s) for {}",
                inv.attributes.len(),
                ctx.org_name().unwrap_or("?")
            )))
        },
    );

    let result = parser.parse("add brand name=Rocket vision=Orbit");
    let invocation = Invocation::prepare(&result, parser.commands(), &org()).unwrap();
    let outcome = dispatcher.dispatch(&invocation, &org()).unwrap();
    assert_eq!(outcome.message, "2 brand(s) for Acme");
    assert_eq!(outcome.context, None);

    let result = parser.parse("show brand");
    let invocation = Invocation::prepare(&result, parser.commands(), &org()).unwrap();
    assert_eq!(
        dispatcher.dispatch(&invocation, &org()),
        Err(ExecutionError::MissingHandler {
            command: "show_brand".to_string(),
            handler: "show_brand".to_string(),
        })
    );
}

#[test]
fn navigate_handler_moves_the_context() {
    let parser = stdlib::parser().unwrap();
    let directory = Arc::new(InMemoryDirectory::new().with_organization("Acme"));
    let dispatcher = Dispatcher::new().with_handler(
        stdlib::NAVIGATE_HANDLER,
        NavigateHandler::new(directory),
    );
    let run = |line: &str, ctx: &Context| -> Result<HandlerOutcome, ExecutionError> {
        let result = parser.parse(line);
        let invocation = Invocation::prepare(&result, parser.commands(), ctx)?;
        dispatcher.dispatch(&invocation, ctx)
    };

    let outcome = run("cd Acme", &Context::system()).unwrap();
    assert_eq!(outcome.message, "Now at ~/Acme");
    let org = outcome.context.unwrap();
    assert_eq!(org.level(), ContextLevel::Organization);

    let outcome = run("cd app:crm", &org).unwrap();
    assert_eq!(outcome.context.unwrap().path(), "~/Acme/crm");

    let outcome = run("cd", &org).unwrap();
    assert_eq!(outcome.context, Some(Context::system()));

    assert_eq!(
        run("goto Initech", &Context::system()),
        Err(ExecutionError::Navigation(NavigationError::NotFound {
            name: "Initech".to_string()
        }))
    );
}
