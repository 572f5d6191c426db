//! Standard vocabulary and commands for the business-entity shell.
//!
//! Everything here is registered explicitly at startup; build a ready
//! parser with [`parser`].

use std::sync::Arc;

use orgshell_foundation::{ContextLevel, EntityKind, RegistrationError, ValueType};

use crate::command::{CommandDef, CommandRegistry};
use crate::parser::Parser;
use crate::shortcuts::ShortcutTable;
use crate::vocabulary::{
    ActionCategory, ActionWord, AttributeWord, CrudOperation, EntityWord, ModifierWord, Word,
    VocabularyRegistry,
};

/// Legal forms accepted by the `entity` attribute.
pub const LEGAL_FORMS: [&str; 7] = ["SA", "SARL", "SAS", "LLC", "INC", "LTD", "GMBH"];

/// Currencies accepted by the `currency` attribute.
pub const CURRENCIES: [&str; 5] = ["EUR", "USD", "GBP", "CHF", "CAD"];

/// Reporting units accepted by the `unit` attribute.
pub const UNITS: [&str; 2] = ["THOUSANDS", "MILLIONS"];

/// Handler name of the navigation command.
pub const NAVIGATE_HANDLER: &str = "navigate";

/// Entities managed inside an organization, with their attribute words.
const CHILD_ENTITIES: [(&str, &[&str]); 5] = [
    (
        "brand",
        &["name", "brand_name", "vision", "mission", "personality", "promise"],
    ),
    ("metadata", &["key", "value", "name"]),
    ("offering", &["name", "value", "type"]),
    ("target", &["name", "value"]),
    ("values", &["name", "value"]),
];

const COMPANY_ATTRIBUTES: [&str; 8] = [
    "name",
    "entity",
    "type",
    "currency",
    "unit",
    "closing",
    "incorporation",
    "brand_name",
];

// Short forms stay at two letters or more so that names such as "HoldCo",
// "Inc" or "N" never resolve to a word.
fn actions() -> Vec<Word> {
    vec![
        ActionWord::new("create", "Create a new company", ActionCategory::Crud)
            .with_crud(CrudOperation::Create)
            .requiring_entity()
            .with_aliases(["init", "new"])
            .into(),
        ActionWord::new("add", "Add a record to the current company", ActionCategory::Crud)
            .with_crud(CrudOperation::Create)
            .requiring_entity()
            .into(),
        ActionWord::new("update", "Change an existing record", ActionCategory::Crud)
            .with_crud(CrudOperation::Update)
            .requiring_entity()
            .into(),
        ActionWord::new("show", "Display records", ActionCategory::Crud)
            .with_crud(CrudOperation::Read)
            .requiring_entity()
            .into(),
        ActionWord::new("delete", "Remove a record", ActionCategory::Crud)
            .with_crud(CrudOperation::Delete)
            .requiring_entity()
            .destructive("This permanently removes data")
            .with_aliases(["remove", "drop"])
            .into(),
        ActionWord::new("cd", "Change the current context", ActionCategory::Navigation)
            .with_aliases(["navigate", "goto"])
            .with_abbreviations(["nav"])
            .into(),
    ]
}

fn modifiers() -> Vec<Word> {
    vec![
        ModifierWord::new("holding", "A company that owns other companies")
            .applies_to(["company"])
            .exclusive_with(["operating"])
            .into(),
        ModifierWord::new("operating", "A company that runs a business")
            .applies_to(["company"])
            .exclusive_with(["holding"])
            .into(),
    ]
}

fn entities() -> Vec<Word> {
    let org = ContextLevel::Organization;
    vec![
        EntityWord::new("company", "A legal organization", EntityKind::Company)
            .with_aliases(["business", "firm"])
            .with_abbreviations(["co"])
            .into(),
        EntityWord::new("metadata", "Key/value facts about a company", EntityKind::Metadata)
            .with_aliases(["meta", "info"])
            .with_abbreviations(["md"])
            .with_min_level(org)
            .into(),
        EntityWord::new("brand", "Brand identity", EntityKind::Brand)
            .with_aliases(["branding", "identity"])
            .with_abbreviations(["br"])
            .with_min_level(org)
            .into(),
        EntityWord::new("offering", "A product or service", EntityKind::Offering)
            .with_aliases(["product", "service"])
            .with_min_level(org)
            .into(),
        EntityWord::new("target", "A target audience", EntityKind::Target)
            .with_aliases(["audience", "segment"])
            .with_abbreviations(["tgt"])
            .with_min_level(org)
            .into(),
        EntityWord::new("values", "Company values and principles", EntityKind::Values)
            .with_aliases(["principles"])
            .with_abbreviations(["val"])
            .with_min_level(org)
            .into(),
    ]
}

fn attributes() -> Vec<Word> {
    use EntityKind::{Brand, Company, Metadata, Offering, Target, Values};

    let text = |id: &str, description: &str| AttributeWord::new(id, description, ValueType::Text);
    vec![
        text("name", "Display name")
            .applies_to(EntityKind::ALL)
            .with_aliases(["title"])
            .into(),
        text("key", "Metadata key")
            .applies_to([Metadata])
            .with_aliases(["category"])
            .into(),
        text("value", "Free-form content")
            .applies_to([Metadata, Offering, Target, Values])
            .with_aliases(["description", "content"])
            .into(),
        AttributeWord::new("entity", "Legal form", ValueType::choice(LEGAL_FORMS))
            .applies_to([Company])
            .with_aliases(["entity_type", "legal_entity"])
            .with_abbreviations(["ent"])
            .into(),
        text("type", "Organization or offering type")
            .applies_to([Company, Offering])
            .with_aliases(["org_type", "organization_type"])
            .with_abbreviations(["typ"])
            .into(),
        AttributeWord::new("currency", "Reporting currency", ValueType::choice(CURRENCIES))
            .applies_to([Company])
            .with_aliases(["curr"])
            .with_abbreviations(["cur"])
            .into(),
        AttributeWord::new("unit", "Financial reporting unit", ValueType::choice(UNITS))
            .applies_to([Company])
            .with_aliases(["financial_unit"])
            .into(),
        AttributeWord::new("closing", "Fiscal year closing month", ValueType::Month)
            .applies_to([Company])
            .with_aliases(["fiscal_month", "fiscal_year_end"])
            .with_abbreviations(["cl"])
            .into(),
        AttributeWord::new("incorporation", "Date of incorporation", ValueType::Date)
            .applies_to([Company])
            .with_aliases(["incorporation_date", "founded"])
            .into(),
        text("vision", "Brand vision")
            .applies_to([Brand])
            .with_aliases(["vision_statement"])
            .with_abbreviations(["vis"])
            .into(),
        text("mission", "Brand mission")
            .applies_to([Brand])
            .with_aliases(["mission_statement"])
            .with_abbreviations(["mis"])
            .into(),
        text("personality", "Brand personality")
            .applies_to([Brand])
            .with_aliases(["brand_personality"])
            .with_abbreviations(["per"])
            .into(),
        text("promise", "Brand promise")
            .applies_to([Brand])
            .with_aliases(["brand_promise"])
            .with_abbreviations(["prom"])
            .into(),
        text("brand_name", "Public brand name")
            .applies_to([Company, Brand])
            .into(),
    ]
}

/// Builds the standard vocabulary.
///
/// # Errors
///
/// Returns a [`RegistrationError`] if the word lists conflict.
pub fn vocabulary() -> Result<VocabularyRegistry, RegistrationError> {
    actions()
        .into_iter()
        .chain(modifiers())
        .chain(entities())
        .chain(attributes())
        .try_fold(VocabularyRegistry::new(), VocabularyRegistry::register)
}

fn company_commands() -> Vec<CommandDef> {
    let org = ContextLevel::Organization;
    vec![
        CommandDef::new("create_company", "Create a new company")
            .requires(["create", "company"])
            .accepts(["holding", "operating"])
            .accepts(COMPANY_ATTRIBUTES)
            .with_example("create company ACME entity=SA currency=EUR")
            .with_example("cc ACME-CORP closing=12"),
        CommandDef::new("show_company", "Show companies")
            .requires(["show", "company"])
            .accepts(["holding", "operating", "name"])
            .with_example("show company"),
        CommandDef::new("update_company", "Update the current company")
            .requires(["update", "company"])
            .accepts(COMPANY_ATTRIBUTES)
            .with_min_level(org)
            .with_example("update company currency=USD"),
        CommandDef::new("delete_company", "Delete a company")
            .requires(["delete", "company"])
            .accepts(["name"])
            .with_example("delete company ACME"),
    ]
}

fn child_commands() -> Vec<CommandDef> {
    let org = ContextLevel::Organization;
    CHILD_ENTITIES
        .iter()
        .flat_map(|(entity, attrs)| {
            [
                ("add", "Add"),
                ("show", "Show"),
                ("update", "Update"),
                ("delete", "Delete"),
            ]
            .into_iter()
            .map(move |(action, verb)| {
                CommandDef::new(format!("{action}_{entity}"), format!("{verb} {entity}"))
                    .requires([action, *entity])
                    .accepts(attrs.iter().copied())
                    .with_min_level(org)
                    .with_example(format!("{action} {entity} name=example"))
            })
        })
        .collect()
}

/// Builds the standard command set over a vocabulary.
///
/// # Errors
///
/// Returns a [`RegistrationError`] if a command refers to a missing word.
pub fn commands(vocab: Arc<VocabularyRegistry>) -> Result<CommandRegistry, RegistrationError> {
    company_commands()
        .into_iter()
        .chain(child_commands())
        .chain([CommandDef::new("navigate", "Change the current context")
            .requires(["cd"])
            .with_handler(NAVIGATE_HANDLER)
            .with_example("cd ACME")
            .with_example("cd ..")
            .with_example("cd ~")])
        .try_fold(CommandRegistry::new(vocab), CommandRegistry::register)
}

/// The standard first-token shortcuts.
#[must_use]
pub fn shortcuts() -> ShortcutTable {
    let mut table = ShortcutTable::new().with("cc", ["create", "company"]);
    let entities = [
        ('c', "company"),
        ('b', "brand"),
        ('m', "metadata"),
        ('o', "offering"),
        ('t', "target"),
        ('v', "values"),
    ];
    for (prefix, action) in [('a', "add"), ('s', "show"), ('u', "update"), ('d', "delete")] {
        for (suffix, entity) in entities {
            if prefix == 'a' && suffix == 'c' {
                continue;
            }
            table = table.with(&format!("{prefix}{suffix}"), [action, entity]);
        }
    }
    table
}

/// Builds a parser with the standard vocabulary, commands and shortcuts.
///
/// # Errors
///
/// Returns a [`RegistrationError`] if the standard definitions conflict.
pub fn parser() -> Result<Parser, RegistrationError> {
    let vocab = Arc::new(vocabulary()?);
    let commands = Arc::new(commands(vocab)?);
    Ok(Parser::new(commands).with_shortcuts(shortcuts()))
}
