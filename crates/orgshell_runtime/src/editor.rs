//! Line editor abstraction for the REPL.
//!
//! This module provides a trait-based abstraction over line editing, so the
//! REPL can run on rustyline interactively or on any reader in batch mode.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::BufRead;

use orgshell_foundation::{Error, Result, WordKind};
use orgshell_parser::{CompositionRules, Parser};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set the words and values offered for completion.
    fn set_completions(&mut self, completions: Completions);
}

/// Words and attribute values the shell can complete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completions {
    words: BTreeMap<String, WordKind>,
    shortcuts: BTreeMap<String, Vec<WordKind>>,
    values: BTreeMap<String, Vec<String>>,
}

impl Completions {
    /// Collects every surface form and shortcut of a parser, plus the
    /// options of enumerated attributes keyed by each of their forms.
    #[must_use]
    pub fn from_parser(parser: &Parser) -> Self {
        let vocab = parser.vocabulary();
        let mut words = BTreeMap::new();
        let mut values = BTreeMap::new();
        for (_, word) in vocab.iter() {
            let forms: Vec<String> = std::iter::once(word.id())
                .chain(word.aliases().iter().map(String::as_str))
                .chain(word.abbreviations().iter().map(String::as_str))
                .map(str::to_lowercase)
                .collect();
            let options = word.value_type().map(|t| t.options()).unwrap_or_default();
            for form in forms {
                if !options.is_empty() {
                    values.insert(form.clone(), options.to_vec());
                }
                words.insert(form, word.kind());
            }
        }

        let shortcuts = parser
            .shortcuts()
            .iter()
            .map(|(shortcut, expansion)| {
                let kinds = expansion
                    .iter()
                    .filter_map(|w| vocab.lookup(w).and_then(|r| vocab.word(r)))
                    .map(|w| w.kind())
                    .collect();
                (shortcut.to_string(), kinds)
            })
            .collect();

        Self {
            words,
            shortcuts,
            values,
        }
    }

    /// Whether `text` is a known word or shortcut.
    #[must_use]
    pub fn is_word(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.words.contains_key(&text) || self.shortcuts.contains_key(&text)
    }

    /// Candidates for the word ending at byte `pos`, and where they start.
    ///
    /// After `key=` the options of the attribute are offered. Otherwise only
    /// words whose kind may follow the words already typed are offered, and
    /// shortcuts only as the first word.
    #[must_use]
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        if !line.is_char_boundary(pos) {
            return (pos, Vec::new());
        }
        let head = &line[..pos];
        let segment_start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let word = head[segment_start..].trim_start_matches("--");
        let start = pos - word.len();

        if let Some((key, partial)) = word.split_once('=') {
            let partial = partial.to_uppercase();
            let options = self
                .values
                .get(&key.to_lowercase())
                .map(|opts| {
                    opts.iter()
                        .filter(|o| o.to_uppercase().starts_with(&partial))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            return (start + key.len() + 1, options);
        }

        let before = &head[..segment_start];
        let allowed = CompositionRules::next_valid_kinds(self.kinds_of(before));
        let word = word.to_lowercase();
        let mut words: Vec<String> = self
            .words
            .iter()
            .filter(|(w, kind)| w.starts_with(&word) && allowed.contains(kind))
            .map(|(w, _)| w.clone())
            .collect();
        if before.trim().is_empty() {
            words.extend(self.shortcuts.keys().filter(|s| s.starts_with(&word)).cloned());
            words.sort();
        }
        (start, words)
    }

    /// Kinds of the known words in `text`, in order. Unknown segments and
    /// values are skipped.
    fn kinds_of(&self, text: &str) -> Vec<WordKind> {
        let mut kinds = Vec::new();
        for (i, segment) in text.split_whitespace().enumerate() {
            let segment = segment.trim_start_matches("--");
            let key = segment
                .split(['=', '<', '>', '!'])
                .next()
                .unwrap_or(segment)
                .to_lowercase();
            if i == 0 {
                if let Some(expansion) = self.shortcuts.get(&key) {
                    kinds.extend_from_slice(expansion);
                    continue;
                }
            }
            kinds.extend(self.words.get(&key).copied());
        }
        kinds
    }
}

/// Helper for rustyline that provides completion, hints and highlighting.
#[derive(Helper, Completer, Hinter, Validator)]
struct ShellHelper {
    #[rustyline(Completer)]
    completer: WordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let completions = &self.completer.completions;
        if !line.split_whitespace().any(|w| completions.is_word(w)) {
            return Cow::Borrowed(line);
        }
        let mut out = String::with_capacity(line.len() * 2);
        let mut rest = line;
        while !rest.is_empty() {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (segment, tail) = rest.split_at(end);
            if completions.is_word(segment) {
                out.push_str("\x1b[36m");
                out.push_str(segment);
                out.push_str("\x1b[0m");
            } else {
                out.push_str(segment);
            }
            let gap = tail.len() - tail.trim_start().len();
            out.push_str(&tail[..gap]);
            rest = &tail[gap..];
        }
        Cow::Owned(out)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completer over the shell's vocabulary.
#[derive(Default)]
struct WordCompleter {
    completions: Completions,
}

impl Completer for WordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.completions.candidates(line, pos);
        let pairs = candidates
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, pairs))
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::internal(e.to_string()))?
            .build();

        let helper = ShellHelper {
            completer: WordCompleter::default(),
            hinter: HistoryHinter::new(),
        };

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::internal(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_completions(&mut self, completions: Completions) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.completions = completions;
        }
    }
}

/// Reads lines from any reader, without prompting. Used for batch mode.
pub struct LinesEditor<R> {
    reader: R,
}

impl<R: BufRead> LinesEditor<R> {
    /// Creates an editor over a reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineEditor for LinesEditor<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(ReadResult::Eof);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(ReadResult::Line(line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_completions(&mut self, _completions: Completions) {}
}
