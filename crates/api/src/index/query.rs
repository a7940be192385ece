//! Query language for the local index.
//!
//! A query is a list of `field:value` clauses joined by `AND`:
//!
//! ```text
//! name:*registration*
//! patientUuid:"p-1" AND status:"incomplete"
//! ```
//!
//! Value forms:
//! - `"quoted"`: exact, case-sensitive match. `\"` and `\\` are escapes.
//! - `bare`: case-insensitive equality. `\` escapes the next character.
//! - `pre*`, `*suf`, `*mid*`: case-insensitive prefix, suffix and contains.
//! - `*`: any value, as long as the field is present.
//!
//! The empty query matches every document. Field names may be dotted paths
//! into nested objects (`patient.uuid`).

use serde_json::Value;
use thiserror::Error;

/// Query syntax errors. Positions are byte offsets into the query text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unterminated quoted value starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("Missing field name before ':' at position {position}")]
    MissingField { position: usize },

    #[error("Expected ':' after field '{field}' at position {position}")]
    MissingColon { field: String, position: usize },

    #[error("Empty value for field '{field}' at position {position}")]
    EmptyValue { field: String, position: usize },

    #[error("'AND' at position {position} is not joining two clauses")]
    DanglingOperator { position: usize },

    #[error("Unexpected '{found}' at position {position}")]
    UnexpectedToken { found: char, position: usize },
}

impl QueryError {
    pub fn position(&self) -> usize {
        match self {
            Self::UnterminatedQuote { position }
            | Self::MissingField { position }
            | Self::MissingColon { position, .. }
            | Self::EmptyValue { position, .. }
            | Self::DanglingOperator { position }
            | Self::UnexpectedToken { position, .. } => *position,
        }
    }
}

const AND: &str = "AND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    Any,
    Exact(String),
    /// Case-insensitive; stored lowercased.
    Equals(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
}

impl Matcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            Matcher::Any => true,
            Matcher::Exact(expected) => value == expected,
            Matcher::Equals(expected) => value.to_lowercase() == *expected,
            Matcher::Prefix(prefix) => value.to_lowercase().starts_with(prefix.as_str()),
            Matcher::Suffix(suffix) => value.to_lowercase().ends_with(suffix.as_str()),
            Matcher::Contains(needle) => value.to_lowercase().contains(needle.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: String,
    pub matcher: Matcher,
}

impl Clause {
    fn matches(&self, doc: &Value) -> bool {
        let mut current = doc;
        for segment in self.field.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => return false,
            }
        }
        match current {
            Value::String(s) => self.matcher.matches(s),
            Value::Number(n) => self.matcher.matches(&n.to_string()),
            Value::Bool(b) => self.matcher.matches(if *b { "true" } else { "false" }),
            Value::Null | Value::Array(_) | Value::Object(_) => false,
        }
    }
}

/// A parsed query: every clause must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// Query that matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, QueryError> {
        Parser::new(input).parse()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses.iter().all(|clause| clause.matches(doc))
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// True when the input at the cursor is the `AND` keyword as a whole word.
    fn at_and(&self) -> bool {
        let rest = &self.input[self.pos..];
        rest.starts_with(AND)
            && rest[AND.len()..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace)
    }

    fn parse(mut self) -> Result<Query, QueryError> {
        let mut clauses = Vec::new();

        self.skip_whitespace();
        if self.peek().is_none() {
            return Ok(Query { clauses });
        }

        loop {
            if self.at_and() {
                return Err(QueryError::DanglingOperator { position: self.pos });
            }
            clauses.push(self.parse_clause()?);

            self.skip_whitespace();
            let Some(found) = self.peek() else {
                break;
            };
            if !self.at_and() {
                return Err(QueryError::UnexpectedToken {
                    found,
                    position: self.pos,
                });
            }
            let and_position = self.pos;
            self.pos += AND.len();
            self.skip_whitespace();
            if self.peek().is_none() {
                return Err(QueryError::DanglingOperator {
                    position: and_position,
                });
            }
        }

        Ok(Query { clauses })
    }

    fn parse_clause(&mut self) -> Result<Clause, QueryError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '-')
        {
            self.bump();
        }
        let field = self.input[start..self.pos].to_string();

        match self.peek() {
            Some(':') if field.is_empty() => {
                return Err(QueryError::MissingField { position: self.pos });
            }
            Some(':') => {
                self.bump();
            }
            Some(found) if field.is_empty() => {
                return Err(QueryError::UnexpectedToken {
                    found,
                    position: self.pos,
                });
            }
            _ => {
                return Err(QueryError::MissingColon {
                    field,
                    position: self.pos,
                });
            }
        }

        let matcher = match self.peek() {
            Some('"') => self.parse_quoted()?,
            Some(c) if !c.is_whitespace() => self.parse_bare(),
            _ => {
                return Err(QueryError::EmptyValue {
                    field,
                    position: self.pos,
                });
            }
        };

        Ok(Clause { field, matcher })
    }

    fn parse_quoted(&mut self) -> Result<Matcher, QueryError> {
        let open = self.pos;
        self.bump();

        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(QueryError::UnterminatedQuote { position: open }),
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(QueryError::UnterminatedQuote { position: open }),
                },
                Some(c) => value.push(c),
            }
        }

        if let Some(found) = self.peek()
            && !found.is_whitespace()
        {
            return Err(QueryError::UnexpectedToken {
                found,
                position: self.pos,
            });
        }

        Ok(Matcher::Exact(value))
    }

    fn parse_bare(&mut self) -> Matcher {
        // (character, escaped)
        let mut chars: Vec<(char, bool)> = Vec::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            self.bump();
            if c == '\\' {
                match self.bump() {
                    Some(escaped) => chars.push((escaped, true)),
                    None => chars.push(('\\', true)),
                }
            } else {
                chars.push((c, false));
            }
        }

        let leading = chars.first() == Some(&('*', false));
        if leading {
            chars.remove(0);
        }
        let trailing = chars.last() == Some(&('*', false));
        if trailing {
            chars.pop();
        }

        let term: String = chars.into_iter().map(|(c, _)| c).collect::<String>().to_lowercase();

        match (leading, trailing) {
            _ if term.is_empty() && (leading || trailing) => Matcher::Any,
            (true, true) => Matcher::Contains(term),
            (true, false) => Matcher::Suffix(term),
            (false, true) => Matcher::Prefix(term),
            (false, false) => Matcher::Equals(term),
        }
    }
}

/// Composes query text from raw values, escaping them as needed.
///
/// Empty values are skipped so an unset filter means "match any".
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    clauses: Vec<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive match on `field`.
    pub fn exact(mut self, field: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.clauses.push(format!("{field}:{}", quote(value)));
        }
        self
    }

    /// Case-insensitive substring match on `field`.
    pub fn contains(mut self, field: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.clauses.push(format!("{field}:*{}*", escape_bare(value)));
        }
        self
    }

    pub fn build(&self) -> String {
        self.clauses.join(" AND ")
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn escape_bare(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '*' || c == '"' || c.is_whitespace() {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
