//! The main REPL implementation.

use std::fmt::Write as _;
use std::io::{self, Write};

use orgshell_foundation::{Error, Result};
use orgshell_parser::CompositionRules;

use crate::editor::{Completions, LineEditor, ReadResult, RustylineEditor};
use crate::session::{Evaluation, Session};

/// Presentation settings for the REPL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplConfig {
    /// Prompt prefix; the current path is appended.
    pub prompt: String,
    /// Whether to show the welcome banner.
    pub banner: bool,
    /// Whether to print evaluations as JSON.
    pub json: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "orgshell".to_string(),
            banner: true,
            json: false,
        }
    }
}

impl ReplConfig {
    /// Sets the prompt prefix.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enables or disables JSON output.
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.banner = false;
        self
    }
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (parser, handlers, context).
    session: Session,

    /// Presentation settings.
    config: ReplConfig,

    /// Lines that failed to parse or execute.
    failures: usize,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_completions(Completions::from_parser(session.parser()));
        Self {
            editor,
            session,
            config: ReplConfig::default(),
            failures: 0,
        }
    }

    /// Replaces the presentation settings.
    #[must_use]
    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.config.banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Number of lines that failed so far.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// The prompt for the current context, e.g. `orgshell:~/Acme> `.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{}:{}> ", self.config.prompt, self.session.context().path())
    }

    /// Runs the REPL loop until EOF or `exit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.config.banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        if self.config.banner {
            println!("\nGoodbye!");
        }
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn read_eval_print(&mut self) -> Result<bool> {
        let prompt = self.prompt();
        let line = match self.editor.read_line(&prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(true),
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&line);

        if matches!(trimmed, "exit" | "quit") {
            return Ok(false);
        }
        if let Some(output) = self.eval_line(trimmed)? {
            println!("{output}");
        }
        let _ = io::stdout().flush();
        Ok(true)
    }

    /// Evaluates one line and renders the output.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON rendering fails.
    pub fn eval_line(&mut self, line: &str) -> Result<Option<String>> {
        if matches!(line, "help" | "?") {
            return Ok(Some(self.help()));
        }
        let evaluation = self.session.eval(line);
        if !evaluation.succeeded() {
            self.failures += 1;
        }
        if self.config.json {
            return serde_json::to_string_pretty(&evaluation)
                .map(Some)
                .map_err(|e| Error::internal(e.to_string()));
        }
        let text = render(&evaluation);
        Ok((!text.is_empty()).then_some(text))
    }

    /// Lists the commands, the shortcuts and the ordering rules.
    #[must_use]
    pub fn help(&self) -> String {
        let parser = self.session.parser();
        let mut out = String::from("Commands:\n");
        for (_, command) in parser.commands().iter() {
            let example = command.examples().first().map_or("", String::as_str);
            let _ = writeln!(out, "  {:<18} {:<36} {example}", command.id(), command.description());
        }
        let shortcuts: Vec<&str> = parser.shortcuts().iter().map(|(s, _)| s).collect();
        let _ = writeln!(out, "\nShortcuts: {}", shortcuts.join(", "));
        let _ = write!(out, "\n{}", CompositionRules::order_hint());
        out
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36morgshell\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type 'help' for commands. Use Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

/// Renders an evaluation as plain lines.
#[must_use]
pub fn render(evaluation: &Evaluation) -> String {
    let mut lines = Vec::new();
    lines.extend(evaluation.parse.errors.iter().map(|e| format!("error: {e}")));
    lines.extend(evaluation.parse.warnings.iter().map(|w| format!("warning: {w}")));
    if let Some(warning) = &evaluation.warning {
        lines.push(format!("warning: {warning}"));
    }
    if let Some(error) = &evaluation.error {
        lines.push(format!("error: {error}"));
    }
    if let Some(message) = &evaluation.message {
        lines.push(message.clone());
    }
    lines.extend(evaluation.parse.suggestions.iter().map(|s| format!("hint: {s}")));
    lines.join("\n")
}
