//! Navigation context.
//!
//! A [`Context`] records where the shell is: the system root, inside an
//! organization, or inside one of its applications. Contexts are immutable;
//! [`navigate`] is the only transition and returns a new one.

use std::collections::BTreeMap;
use std::fmt;

use orgshell_foundation::{ContextError, ContextLevel, ContextLevelError, NavigationError};
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

/// Identifier of an organization in the directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OrgId(pub u64);

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the shell currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Context {
    level: ContextLevel,
    org_id: Option<OrgId>,
    org_name: Option<String>,
    app_id: Option<String>,
}

impl Context {
    /// Creates a context, checking that its fields agree with its level.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::LevelConsistency`] when fields required by
    /// the level are missing (or blank) or fields above it are set.
    pub fn new(
        level: ContextLevel,
        org_id: Option<OrgId>,
        org_name: Option<String>,
        app_id: Option<String>,
    ) -> Result<Self, ContextError> {
        let org_name = org_name.filter(|n| !n.trim().is_empty());
        let app_id = app_id.filter(|a| !a.trim().is_empty());
        let has_org = org_id.is_some() && org_name.is_some();
        let no_org = org_id.is_none() && org_name.is_none();

        let detail = match level {
            ContextLevel::System if !no_org || app_id.is_some() => {
                Some("org_id, org_name and app_id must not be set")
            }
            ContextLevel::Organization if !has_org || app_id.is_some() => {
                Some("org_id and org_name must be set and app_id must not be set")
            }
            ContextLevel::Application if !has_org || app_id.is_none() => {
                Some("org_id, org_name and app_id must be set")
            }
            _ => None,
        };
        if let Some(detail) = detail {
            return Err(ContextError::LevelConsistency { level, detail });
        }

        Ok(Self {
            level,
            org_id,
            org_name,
            app_id,
        })
    }

    /// The system root context.
    #[must_use]
    pub fn system() -> Self {
        Self::default()
    }

    /// A context inside an organization.
    ///
    /// # Errors
    ///
    /// Fails when the name is blank.
    pub fn organization(id: OrgId, name: impl Into<String>) -> Result<Self, ContextError> {
        Self::new(ContextLevel::Organization, Some(id), Some(name.into()), None)
    }

    /// A context inside an application of an organization.
    ///
    /// # Errors
    ///
    /// Fails when the organization name or application id is blank.
    pub fn application(
        id: OrgId,
        name: impl Into<String>,
        app: impl Into<String>,
    ) -> Result<Self, ContextError> {
        Self::new(
            ContextLevel::Application,
            Some(id),
            Some(name.into()),
            Some(app.into()),
        )
    }

    /// Current level.
    #[must_use]
    pub fn level(&self) -> ContextLevel {
        self.level
    }

    /// Current organization id.
    #[must_use]
    pub fn org_id(&self) -> Option<OrgId> {
        self.org_id
    }

    /// Current organization name.
    #[must_use]
    pub fn org_name(&self) -> Option<&str> {
        self.org_name.as_deref()
    }

    /// Current application id.
    #[must_use]
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    /// Checks that this context is at least `required`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextLevelError`] when the context is too shallow.
    pub fn require(&self, required: ContextLevel) -> Result<(), ContextLevelError> {
        if self.level < required {
            return Err(ContextLevelError {
                required,
                current: self.level,
            });
        }
        Ok(())
    }

    /// Path-like rendering: `~`, `~/Acme`, `~/Acme/crm`.
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::from("~");
        for part in [self.org_name(), self.app_id()].into_iter().flatten() {
            path.push('/');
            path.push_str(part);
        }
        path
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path(), self.level)
    }
}

/// Where a navigation should go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// The system root: `~`, `/`, `root`.
    Root,
    /// One level up: `..`.
    Up,
    /// An organization by name.
    Organization(String),
    /// An application of the current organization: `app:NAME`.
    Application(String),
}

impl NavigationTarget {
    /// Parses target text.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidTarget`] for blank text or an
    /// `app:` prefix without a name.
    pub fn parse(text: &str) -> Result<Self, NavigationError> {
        let text = text.trim();
        match text {
            "" => Err(NavigationError::InvalidTarget(text.to_string())),
            "~" | "/" => Ok(NavigationTarget::Root),
            ".." => Ok(NavigationTarget::Up),
            _ if text.eq_ignore_ascii_case("root") => Ok(NavigationTarget::Root),
            _ => match text.strip_prefix("app:") {
                Some(app) if app.trim().is_empty() => {
                    Err(NavigationError::InvalidTarget(text.to_string()))
                }
                Some(app) => Ok(NavigationTarget::Application(app.trim().to_string())),
                None => Ok(NavigationTarget::Organization(text.to_string())),
            },
        }
    }
}

/// Answers whether organizations exist.
pub trait OrganizationDirectory {
    /// Looks up an organization by name.
    fn lookup(&self, name: &str, context: &Context) -> Option<OrgId>;

    /// Whether an organization with this name exists.
    fn exists(&self, name: &str, context: &Context) -> bool {
        self.lookup(name, context).is_some()
    }
}

/// Directory held in memory, matched case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    orgs: BTreeMap<String, (OrgId, String)>,
    next_id: u64,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an organization, builder style.
    #[must_use]
    pub fn with_organization(mut self, name: impl Into<String>) -> Self {
        self.insert(name);
        self
    }

    /// Adds an organization and returns its id. Re-adding returns the
    /// existing id.
    pub fn insert(&mut self, name: impl Into<String>) -> OrgId {
        let name = name.into();
        let key = name.to_lowercase();
        if let Some((id, _)) = self.orgs.get(&key) {
            return *id;
        }
        self.next_id += 1;
        let id = OrgId(self.next_id);
        self.orgs.insert(key, (id, name));
        id
    }

    /// Organization names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.orgs.values().map(|(_, name)| name.as_str())
    }

    /// Number of organizations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orgs.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orgs.is_empty()
    }
}

impl OrganizationDirectory for InMemoryDirectory {
    fn lookup(&self, name: &str, _context: &Context) -> Option<OrgId> {
        self.orgs.get(&name.to_lowercase()).map(|(id, _)| *id)
    }
}

/// Computes the context reached from `current` by moving to `target`.
///
/// `current` is never modified. Going up from the root stays at the root.
///
/// # Errors
///
/// - [`NavigationError::NotFound`] when the directory has no such organization
/// - [`NavigationError::RequiresOrganization`] for an application target
///   outside an organization
pub fn navigate(
    current: &Context,
    target: &NavigationTarget,
    directory: &dyn OrganizationDirectory,
) -> Result<Context, NavigationError> {
    let next = match target {
        NavigationTarget::Root => Context::system(),
        NavigationTarget::Up => match current.level {
            ContextLevel::System | ContextLevel::Organization => Context::system(),
            ContextLevel::Application => Context::new(
                ContextLevel::Organization,
                current.org_id,
                current.org_name.clone(),
                None,
            )?,
        },
        NavigationTarget::Organization(name) => {
            let id = directory
                .lookup(name, current)
                .ok_or_else(|| NavigationError::NotFound { name: name.clone() })?;
            Context::organization(id, name.clone())?
        }
        NavigationTarget::Application(app) => {
            if current.level < ContextLevel::Organization {
                return Err(NavigationError::RequiresOrganization { app: app.clone() });
            }
            Context::new(
                ContextLevel::Application,
                current.org_id,
                current.org_name.clone(),
                Some(app.clone()),
            )?
        }
    };
    debug!(from = %current.path(), to = %next.path(), "navigate");
    Ok(next)
}
