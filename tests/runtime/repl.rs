//! REPL integration tests
//!
//! Tests the read-eval-print loop over scripted and batch editors.

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

use orgshell_foundation::Result;
use orgshell_parser::{InMemoryDirectory, ParserConfig};
use orgshell_runtime::{Completions, LineEditor, LinesEditor, ReadResult, Repl, ReplConfig, Session};

/// Replays lines and records the prompts it was shown.
struct ScriptedEditor {
    lines: Vec<String>,
    prompts: Rc<RefCell<Vec<String>>>,
    history: Rc<RefCell<Vec<String>>>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().rev().map(|l| (*l).to_string()).collect(),
            prompts: Rc::default(),
            history: Rc::default(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.lines.pop().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, line: &str) {
        self.history.borrow_mut().push(line.to_string());
    }

    fn set_completions(&mut self, _completions: Completions) {}
}

fn session() -> Session {
    Session::new(ParserConfig::default(), InMemoryDirectory::new()).unwrap()
}

#[test]
fn prompt_tracks_navigation() {
    let editor = ScriptedEditor::new(&["cc Acme", "", "cd Acme", "cd app:crm", "cd .."]);
    let prompts = Rc::clone(&editor.prompts);
    let history = Rc::clone(&editor.history);

    let mut repl = Repl::with_editor(editor, session())
        .with_config(ReplConfig::default().with_prompt("shell").without_banner());
    repl.run().unwrap();

    assert_eq!(
        *prompts.borrow(),
        [
            "shell:~> ",
            "shell:~> ",
            "shell:~> ",
            "shell:~/Acme> ",
            "shell:~/Acme/crm> ",
            "shell:~/Acme> ",
        ]
    );
    assert_eq!(history.borrow().len(), 4);
    assert_eq!(repl.failures(), 0);
    assert_eq!(repl.session().context().path(), "~/Acme");
}

#[test]
fn failures_are_counted() {
    let editor = ScriptedEditor::new(&["company create Acme", "sb", "cc Acme", "quit", "cc Never"]);
    let mut repl = Repl::with_editor(editor, session()).without_banner();
    repl.run().unwrap();

    // Out of order, then brand outside an organization.
    assert_eq!(repl.failures(), 2);
    assert_eq!(repl.session().directory().names(), ["Acme"]);
}

#[test]
fn batch_input_runs_every_line() {
    let script = "cc Acme currency=usd\ncd Acme\nab name=Rocket\nuo name=Ghost\n";
    let mut repl = Repl::with_editor(LinesEditor::new(Cursor::new(script)), session())
        .without_banner();
    repl.run().unwrap();

    assert_eq!(repl.failures(), 0);
    assert_eq!(repl.session().context().path(), "~/Acme");
}

#[test]
fn rendered_output() {
    let mut repl = Repl::with_editor(LinesEditor::new(Cursor::new("")), session()).without_banner();

    let out = repl.eval_line("dc Acme").unwrap().unwrap();
    assert!(
        out.starts_with("warning: This permanently removes data\ndelete_company at ~: company 'Acme'"),
        "{out}"
    );
    assert!(out.contains("\nhint: Consider adding attributes like "));

    let out = repl.eval_line("ab name=Rocket").unwrap().unwrap();
    assert_eq!(
        out,
        "error: Command requires 'org' context, currently at 'sys' context"
    );
}

#[test]
fn value_warnings_are_rendered() {
    let mut repl = Repl::with_editor(LinesEditor::new(Cursor::new("")), session()).without_banner();
    let out = repl.eval_line("cc Acme closing=13").unwrap().unwrap();
    assert!(
        out.starts_with("warning: Invalid value for 'closing': "),
        "{out}"
    );
    assert!(out.contains("\nCreated company 'Acme' with closing=13"));
    assert_eq!(repl.failures(), 0);
}

#[test]
fn json_output() {
    let mut repl = Repl::with_editor(LinesEditor::new(Cursor::new("")), session())
        .with_config(ReplConfig::default().with_json(true).without_banner());
    let out = repl.eval_line("create compny Acme").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["command"], "create_company");
    assert_eq!(value["parse"]["is_valid"], true);
    assert_eq!(value["message"], "Created company 'Acme'");
}
