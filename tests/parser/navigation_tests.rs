//! Navigation context tests.

use orgshell_foundation::{ContextLevel, NavigationError};
use orgshell_parser::{Context, InMemoryDirectory, NavigationTarget, OrgId, navigate};

fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_organization("Acme")
        .with_organization("Globex")
}

fn go(from: &Context, target: &str) -> Result<Context, NavigationError> {
    navigate(from, &NavigationTarget::parse(target)?, &directory())
}

#[test]
fn targets_parse() {
    assert_eq!(NavigationTarget::parse("~"), Ok(NavigationTarget::Root));
    assert_eq!(NavigationTarget::parse("/"), Ok(NavigationTarget::Root));
    assert_eq!(NavigationTarget::parse("ROOT"), Ok(NavigationTarget::Root));
    assert_eq!(NavigationTarget::parse(".."), Ok(NavigationTarget::Up));
    assert_eq!(
        NavigationTarget::parse("app:crm"),
        Ok(NavigationTarget::Application("crm".to_string()))
    );
    assert_eq!(
        NavigationTarget::parse("Acme"),
        Ok(NavigationTarget::Organization("Acme".to_string()))
    );
    assert!(NavigationTarget::parse("app: ").is_err());
    assert!(NavigationTarget::parse("").is_err());
}

#[test]
fn walk_down_and_back_up() {
    let root = Context::system();
    let org = go(&root, "acme").unwrap();
    assert_eq!(org.level(), ContextLevel::Organization);
    assert_eq!(org.org_id(), Some(OrgId(1)));
    assert_eq!(org.path(), "~/acme");

    let app = go(&org, "app:crm").unwrap();
    assert_eq!(app.level(), ContextLevel::Application);
    assert_eq!(app.path(), "~/acme/crm");
    assert_eq!(app.to_string(), "~/acme/crm (app)");

    let back = go(&app, "..").unwrap();
    assert_eq!(back, org);
    assert_eq!(go(&back, "..").unwrap(), root);
    assert_eq!(go(&app, "~").unwrap(), root);

    // The starting contexts are untouched.
    assert_eq!(app.app_id(), Some("crm"));
    assert_eq!(root.level(), ContextLevel::System);
}

#[test]
fn up_from_root_stays_at_root() {
    assert_eq!(go(&Context::system(), "..").unwrap(), Context::system());
}

#[test]
fn switching_organizations_clears_the_application() {
    let app = Context::application(OrgId(1), "Acme", "crm").unwrap();
    let other = go(&app, "Globex").unwrap();
    assert_eq!(other.level(), ContextLevel::Organization);
    assert_eq!(other.org_id(), Some(OrgId(2)));
    assert_eq!(other.app_id(), None);
}

#[test]
fn navigation_failures() {
    assert_eq!(
        go(&Context::system(), "Initech"),
        Err(NavigationError::NotFound {
            name: "Initech".to_string()
        })
    );
    assert_eq!(
        go(&Context::system(), "app:crm"),
        Err(NavigationError::RequiresOrganization {
            app: "crm".to_string()
        })
    );
}

#[test]
fn context_requirements() {
    let org = Context::organization(OrgId(7), "Acme").unwrap();
    assert!(org.require(ContextLevel::System).is_ok());
    assert!(org.require(ContextLevel::Organization).is_ok());
    let err = org.require(ContextLevel::Application).unwrap_err();
    assert_eq!(err.required, ContextLevel::Application);
    assert_eq!(err.current, ContextLevel::Organization);

    assert!(Context::organization(OrgId(7), "   ").is_err());
    assert!(
        Context::new(
            ContextLevel::System,
            None,
            None,
            Some("crm".to_string())
        )
        .is_err()
    );
}

#[test]
fn directory_ids_are_stable() {
    let mut dir = directory();
    assert_eq!(dir.insert("ACME"), OrgId(1));
    assert_eq!(dir.insert("Initech"), OrgId(3));
    assert_eq!(dir.len(), 3);
    assert_eq!(dir.names().collect::<Vec<_>>(), ["Acme", "Globex", "Initech"]);
}
