//! Session state for the shell.
//!
//! The session owns the parser, the handler table, the organization
//! directory and the current [`Context`]. Each line goes through
//! [`Session::eval`], which parses, prepares and dispatches it.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};

use orgshell_foundation::{AttributeValue, ExecutionError, Result};
use orgshell_parser::stdlib::{self, NAVIGATE_HANDLER};
use orgshell_parser::{
    CommandHandler, Context, Dispatcher, HandlerOutcome, InMemoryDirectory, Invocation,
    NavigateHandler, OrgId, OrganizationDirectory, ParseResult, Parser, ParserConfig,
};
use serde::Serialize;
use tracing::{debug, info};

/// Handler name of the company creation command.
const CREATE_COMPANY: &str = "create_company";

/// Organization directory shared between the session and its handlers.
#[derive(Clone, Debug, Default)]
pub struct SharedDirectory(Arc<RwLock<InMemoryDirectory>>);

impl SharedDirectory {
    /// Wraps a directory.
    #[must_use]
    pub fn new(directory: InMemoryDirectory) -> Self {
        Self(Arc::new(RwLock::new(directory)))
    }

    /// Adds an organization and returns its id.
    pub fn insert(&self, name: &str) -> OrgId {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name)
    }

    /// Organization names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
            .map(String::from)
            .collect()
    }
}

impl OrganizationDirectory for SharedDirectory {
    fn lookup(&self, name: &str, context: &Context) -> Option<OrgId> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lookup(name, context)
    }
}

/// Everything the shell reports for one line.
#[derive(Clone, Debug, Serialize)]
pub struct Evaluation {
    /// The parse result.
    pub parse: ParseResult,
    /// Ids of the recognized words, in input order.
    pub words: Vec<String>,
    /// Id of the selected command.
    pub command: Option<String>,
    /// Warning of a destructive command.
    pub warning: Option<String>,
    /// Handler output.
    pub message: Option<String>,
    /// Why the line could not be executed.
    pub error: Option<String>,
    /// The context after the line ran.
    pub context: Context,
}

impl Evaluation {
    /// Whether the line parsed and its handler succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.parse.is_valid && self.error.is_none()
    }
}

/// State of an interactive session.
pub struct Session {
    parser: Parser,
    dispatcher: Dispatcher,
    directory: SharedDirectory,
    context: Context,
}

impl Session {
    /// Creates a session over the standard vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if the standard vocabulary fails to register.
    pub fn new(config: ParserConfig, directory: InMemoryDirectory) -> Result<Self> {
        let parser = stdlib::parser()?.with_config(config);
        Ok(Self::with_parser(parser, SharedDirectory::new(directory)))
    }

    /// Creates a session over a prepared parser.
    ///
    /// `navigate` and `create_company` get working handlers; every other
    /// command is answered with a preview of what would be executed.
    #[must_use]
    pub fn with_parser(parser: Parser, directory: SharedDirectory) -> Self {
        let mut dispatcher = Dispatcher::new()
            .with_handler(NAVIGATE_HANDLER, NavigateHandler::new(Arc::new(directory.clone())))
            .with_handler(CREATE_COMPANY, CreateCompany(directory.clone()));
        for (_, command) in parser.commands().iter() {
            let name = command.handler().name();
            if !dispatcher.has_handler(name) {
                dispatcher.register(name, preview);
            }
        }
        Self {
            parser,
            dispatcher,
            directory,
            context: Context::system(),
        }
    }

    /// Replaces a handler.
    pub fn register_handler(&mut self, name: &str, handler: impl CommandHandler + 'static) {
        self.dispatcher.register(name, handler);
    }

    /// The parser.
    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// The current context.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The organization directory.
    #[must_use]
    pub fn directory(&self) -> &SharedDirectory {
        &self.directory
    }

    /// Parses one line and, if it is valid, runs its handler.
    ///
    /// The context only changes when a handler returns a new one.
    pub fn eval(&mut self, line: &str) -> Evaluation {
        let parse = self.parser.parse(line);
        let mut evaluation = Evaluation {
            words: self
                .parser
                .word_ids(&parse)
                .into_iter()
                .map(String::from)
                .collect(),
            command: self.parser.selected(&parse).map(|c| c.id().to_string()),
            parse,
            warning: None,
            message: None,
            error: None,
            context: self.context.clone(),
        };
        if !evaluation.parse.is_valid {
            return evaluation;
        }

        let outcome = Invocation::prepare(&evaluation.parse, self.parser.commands(), &self.context)
            .and_then(|invocation| {
                evaluation.warning.clone_from(&invocation.warning);
                self.dispatcher.dispatch(&invocation, &self.context)
            });
        match outcome {
            Ok(HandlerOutcome { message, context }) => {
                if let Some(next) = context {
                    self.context = next;
                }
                evaluation.message = Some(message);
            }
            Err(e) => {
                debug!(error = %e, line, "execution failed");
                evaluation.error = Some(e.to_string());
            }
        }
        evaluation.context = self.context.clone();
        evaluation
    }
}

/// Registers the company in the directory so it can be navigated to.
struct CreateCompany(SharedDirectory);

impl CommandHandler for CreateCompany {
    fn handle(
        &self,
        invocation: &Invocation,
        _context: &Context,
    ) -> std::result::Result<HandlerOutcome, ExecutionError> {
        let name = invocation
            .entity_value
            .as_deref()
            .or_else(|| invocation.attributes.get("name").and_then(AttributeValue::as_str))
            .ok_or_else(|| ExecutionError::Handler {
                handler: invocation.handler.to_string(),
                message: "a company name is required".to_string(),
            })?;
        let id = self.0.insert(name);
        info!(name, %id, "registered company");
        let mut message = format!("Created company '{name}'");
        if !invocation.attributes.is_empty() {
            let _ = write!(message, " with {}", describe(&invocation.attributes));
        }
        Ok(HandlerOutcome::message(message))
    }
}

#[allow(clippy::unnecessary_wraps)]
fn preview(
    invocation: &Invocation,
    context: &Context,
) -> std::result::Result<HandlerOutcome, ExecutionError> {
    let mut message = format!("{} at {}", invocation.command_id, context.path());
    if let Some(entity) = invocation.entity {
        let _ = write!(message, ": {entity}");
    }
    if let Some(value) = &invocation.entity_value {
        let _ = write!(message, " '{value}'");
    }
    if !invocation.attributes.is_empty() {
        let _ = write!(message, " with {}", describe(&invocation.attributes));
    }
    Ok(HandlerOutcome::message(message))
}

fn describe(attributes: &BTreeMap<String, AttributeValue>) -> String {
    attributes
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
