//! Execution boundary.
//!
//! Turns a valid [`ParseResult`] into an [`Invocation`] and hands it to the
//! [`CommandHandler`] registered under the command's handler name.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use orgshell_foundation::{AttributeValue, EntityKind, ExecutionError, WordKind};
use tracing::info;

use crate::command::{CommandRef, CommandRegistry, HandlerRef};
use crate::context::{Context, NavigationTarget, OrganizationDirectory, navigate};
use crate::parser::ParseResult;
use crate::vocabulary::Word;

/// Arguments for one handler call.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    /// The selected command.
    pub command: CommandRef,
    /// Its id.
    pub command_id: String,
    /// The handler to call.
    pub handler: HandlerRef,
    /// Kind of the first entity word.
    pub entity: Option<EntityKind>,
    /// Value named for the entity, if any.
    pub entity_value: Option<String>,
    /// Typed attributes.
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Ids of the attribute words present.
    pub attribute_words: Vec<String>,
    /// Text of tokens that are not words, in input order.
    pub arguments: Vec<String>,
    /// Warning of a destructive action.
    pub warning: Option<String>,
}

impl Invocation {
    /// Prepares an invocation from a parse result.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::InvalidParse`] when the result has errors
    /// - [`ExecutionError::NoCommand`] when nothing was selected
    /// - [`ExecutionError::UnknownCommand`] when the selection is not in `commands`
    /// - [`ExecutionError::ContextLevel`] when the command or one of its
    ///   words needs a deeper context
    pub fn prepare(
        result: &ParseResult,
        commands: &CommandRegistry,
        context: &Context,
    ) -> Result<Self, ExecutionError> {
        if !result.is_valid {
            return Err(ExecutionError::InvalidParse(result.errors.clone()));
        }
        let command_ref = result.selected_command.ok_or(ExecutionError::NoCommand)?;
        let command = commands
            .command(command_ref)
            .ok_or_else(|| ExecutionError::UnknownCommand(format!("#{}", command_ref.index())))?;

        let vocab = commands.vocabulary();
        let words: Vec<_> = result
            .recognized_words
            .iter()
            .filter_map(|r| vocab.word(*r))
            .collect();

        let required = words
            .iter()
            .map(|w| w.min_level())
            .fold(command.min_level(), Ord::max);
        context.require(required)?;

        let entity_word = words.iter().find(|w| w.kind() == WordKind::Entity);
        let entity_value = entity_word
            .and_then(|w| result.entity_values.get(&format!("{}_name", w.id())))
            .or_else(|| result.entity_values.values().next())
            .cloned();

        Ok(Self {
            command: command_ref,
            command_id: command.id().to_string(),
            handler: command.handler().clone(),
            entity: entity_word.and_then(|w| w.entity_kind()),
            entity_value,
            attributes: result.attribute_values.clone(),
            attribute_words: words
                .iter()
                .filter(|w| w.kind() == WordKind::Attribute)
                .map(|w| w.id().to_string())
                .collect(),
            arguments: result
                .tokens
                .iter()
                .filter(|t| !t.is_word())
                .map(|t| t.text.clone())
                .collect(),
            warning: words.iter().find_map(|w| match w {
                Word::Action(a) if a.destructive => a.warning.clone(),
                _ => None,
            }),
        })
    }
}

/// What a handler produced.
#[derive(Clone, Debug, PartialEq)]
pub struct HandlerOutcome {
    /// Message for the user.
    pub message: String,
    /// The context to switch to, if the handler navigated.
    pub context: Option<Context>,
}

impl HandlerOutcome {
    /// An outcome that only reports.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
        }
    }

    /// Sets the context to switch to.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }
}

/// Executes prepared invocations.
pub trait CommandHandler: Send + Sync {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns an [`ExecutionError`] when the command cannot be carried out.
    fn handle(
        &self,
        invocation: &Invocation,
        context: &Context,
    ) -> Result<HandlerOutcome, ExecutionError>;
}

impl<F> CommandHandler for F
where
    F: Fn(&Invocation, &Context) -> Result<HandlerOutcome, ExecutionError> + Send + Sync,
{
    fn handle(
        &self,
        invocation: &Invocation,
        context: &Context,
    ) -> Result<HandlerOutcome, ExecutionError> {
        self(invocation, context)
    }
}

/// Maps handler names to handlers.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler, builder style.
    #[must_use]
    pub fn with_handler(mut self, name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        self.register(name, handler);
        self
    }

    /// Registers a handler, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, handler: impl CommandHandler + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Whether a handler is registered under this name.
    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Calls the invocation's handler.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::MissingHandler`] when no handler is
    /// registered, or whatever the handler returns.
    pub fn dispatch(
        &self,
        invocation: &Invocation,
        context: &Context,
    ) -> Result<HandlerOutcome, ExecutionError> {
        let handler = self
            .handlers
            .get(invocation.handler.name())
            .ok_or_else(|| ExecutionError::MissingHandler {
                command: invocation.command_id.clone(),
                handler: invocation.handler.name().to_string(),
            })?;
        handler.handle(invocation, context)
    }
}

/// Handler for `cd`: moves through the context hierarchy.
///
/// The target is the first non-word argument; without one the shell goes
/// to the root.
pub struct NavigateHandler {
    directory: Arc<dyn OrganizationDirectory + Send + Sync>,
}

impl NavigateHandler {
    /// Creates a navigation handler over a directory.
    #[must_use]
    pub fn new(directory: Arc<dyn OrganizationDirectory + Send + Sync>) -> Self {
        Self { directory }
    }
}

impl CommandHandler for NavigateHandler {
    fn handle(
        &self,
        invocation: &Invocation,
        context: &Context,
    ) -> Result<HandlerOutcome, ExecutionError> {
        let target = match invocation.arguments.first() {
            Some(text) => NavigationTarget::parse(text)?,
            None => NavigationTarget::Root,
        };
        let next = navigate(context, &target, self.directory.as_ref())?;
        info!(path = %next.path(), "changed context");
        Ok(HandlerOutcome::message(format!("Now at {}", next.path())).with_context(next))
    }
}
