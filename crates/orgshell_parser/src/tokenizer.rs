//! Input tokenization.
//!
//! Splits a command line into positioned tokens. Whitespace separates
//! segments except inside quotes; a segment holding a comparison operator
//! becomes a key token and a value token.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::vocabulary::WordRef;

/// Comparison operators, longest first.
const OPERATORS: [(&str, Operator); 6] = [
    (">=", Operator::Ge),
    ("<=", Operator::Le),
    ("!=", Operator::Ne),
    ("=", Operator::Eq),
    (">", Operator::Gt),
    ("<", Operator::Lt),
];

const QUOTES: [char; 2] = ['"', '\''];

/// The operator joining a key and a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl Operator {
    /// Returns the operator's text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a token was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenClass {
    /// Resolved to a vocabulary word.
    Word,
    /// A literal value (right side of an operator, quoted text, or a name).
    Value,
    /// Not yet or not at all understood.
    Unknown,
}

/// A positioned piece of input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token {
    /// Text with quotes and `--` removed.
    pub text: String,
    /// Byte offset into the tokenized text.
    pub position: usize,
    /// Classification.
    pub class: TokenClass,
    /// The word this token resolved to.
    pub word: Option<WordRef>,
    /// Recognition confidence, 0-100.
    pub confidence: f64,
    /// Candidate word ids for unresolved or fuzzy tokens.
    pub suggestions: Vec<String>,
    /// The operator that introduced a value token.
    pub operator: Option<Operator>,
    /// Whether the text was quoted.
    pub quoted: bool,
}

impl Token {
    /// Creates an unresolved token.
    #[must_use]
    pub fn new(text: impl Into<String>, position: usize, class: TokenClass) -> Self {
        Self {
            text: text.into(),
            position,
            class,
            word: None,
            confidence: 0.0,
            suggestions: Vec::new(),
            operator: None,
            quoted: false,
        }
    }

    /// Whether this token resolved to a word.
    #[must_use]
    pub fn is_word(&self) -> bool {
        self.class == TokenClass::Word
    }

    /// Whether this token is a value.
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.class == TokenClass::Value
    }

    /// Whether this token is unknown.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.class == TokenClass::Unknown
    }

    fn value(text: &str, position: usize, operator: Option<Operator>) -> Self {
        let mut token = match unquote(text) {
            Some(inner) => {
                let mut t = Token::new(inner, position + 1, TokenClass::Value);
                t.quoted = true;
                t
            }
            None => Token::new(text, position, TokenClass::Value),
        };
        token.operator = operator;
        token
    }
}

/// Tokenizes command lines.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenizes a command line.
    ///
    /// - Quoted runs keep their whitespace; an unterminated quote runs to the end
    /// - A leading `--` is dropped from each segment
    /// - `key<op>value` splits into an `Unknown` key and a `Value`
    /// - A dangling operator degrades instead of failing
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (start, segment) in Self::segments(input) {
            Self::tokenize_segment(start, segment, &mut tokens);
        }
        tokens
    }

    /// Splits input into whitespace-separated segments, honouring quotes.
    ///
    /// A quote only opens at the start of a segment or directly after an
    /// operator character, so apostrophes inside words stay literal.
    #[must_use]
    pub fn segments(input: &str) -> Vec<(usize, &str)> {
        let mut segments = Vec::new();
        let mut start: Option<usize> = None;
        let mut quote: Option<char> = None;
        let mut prev: Option<char> = None;

        for (i, ch) in input.char_indices() {
            if let Some(q) = quote {
                if ch == q {
                    quote = None;
                }
                prev = Some(ch);
                continue;
            }
            if ch.is_whitespace() {
                if let Some(s) = start.take() {
                    segments.push((s, &input[s..i]));
                }
                prev = None;
                continue;
            }
            let at_start = start.is_none();
            if at_start {
                start = Some(i);
            }
            if QUOTES.contains(&ch) && (at_start || prev.is_some_and(is_operator_char)) {
                quote = Some(ch);
            }
            prev = Some(ch);
        }
        if let Some(s) = start {
            segments.push((s, &input[s..]));
        }
        segments
    }

    fn tokenize_segment(start: usize, segment: &str, tokens: &mut Vec<Token>) {
        let (start, segment) = match segment.strip_prefix("--") {
            Some(rest) => (start + 2, rest),
            None => (start, segment),
        };
        if segment.is_empty() {
            return;
        }

        if segment.starts_with(&QUOTES[..]) {
            let token = Token::value(segment, start, None);
            if !token.text.is_empty() {
                tokens.push(token);
            }
            return;
        }

        let Some((at, op_text, op)) = find_operator(segment) else {
            tokens.push(Token::new(segment, start, TokenClass::Unknown));
            return;
        };

        let key = &segment[..at];
        let value_at = at + op_text.len();
        let value = &segment[value_at..];
        match (key.is_empty(), value.is_empty()) {
            (false, false) => {
                tokens.push(Token::new(key, start, TokenClass::Unknown));
                tokens.push(Token::value(value, start + value_at, Some(op)));
            }
            (false, true) => tokens.push(Token::new(key, start, TokenClass::Unknown)),
            (true, false) => tokens.push(Token::value(value, start + value_at, Some(op))),
            (true, true) => tokens.push(Token::new(op_text, start, TokenClass::Unknown)),
        }
    }
}

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '=' | '<' | '>' | '!')
}

/// Finds the leftmost operator, preferring two-character operators at the
/// same position.
fn find_operator(segment: &str) -> Option<(usize, &'static str, Operator)> {
    segment.char_indices().find_map(|(i, _)| {
        let rest = &segment[i..];
        OPERATORS
            .iter()
            .find(|(text, _)| rest.starts_with(text))
            .map(|(text, op)| (i, *text, *op))
    })
}

/// Strips a leading quote and its matching closing quote, if present.
fn unquote(text: &str) -> Option<&str> {
    let first = text.chars().next().filter(|c| QUOTES.contains(c))?;
    let inner = &text[first.len_utf8()..];
    Some(inner.strip_suffix(first).unwrap_or(inner))
}
