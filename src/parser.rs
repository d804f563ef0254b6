// nmlio/src/parser.rs

//! Line-driven namelist reader.
//!
//! The parser strips comments, normalizes legacy `$` group spellings,
//! drives the tokenizer line by line and assembles an ordered document.
//! Unsupported constructs (index-qualified assignments, content outside a
//! group) are skipped, never raised: namelist files in the wild carry all
//! manner of decoration around the groups that matter.

use crate::error::Result;
use crate::namelist::{Namelist, NamelistGroup};
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::Value;
use log::debug;

/// Parser for Fortran namelist text.
///
/// One instance performs one read: the tokenizer it owns carries string
/// continuation state between lines and must not be shared across reads.
pub struct Parser {
    tokenizer: Tokenizer,
    /// The group currently being read, if any. Kept outside the document
    /// until its close marker so the document never holds a back
    /// reference to an in-progress group.
    frame: Option<(String, NamelistGroup)>,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            frame: None,
        }
    }

    /// Parse namelist text into an ordered document.
    pub fn parse(&mut self, content: &str) -> Result<Namelist> {
        let mut nml = Namelist::new();
        for line in content.lines() {
            self.parse_line(line, &mut nml)?;
        }
        // A group left open at end of input is attached as if closed.
        if let Some((name, group)) = self.frame.take() {
            debug!("group '{}' unterminated at end of input", name);
            nml.insert_group(&name).merge(group);
        }
        Ok(nml)
    }

    fn parse_line(&mut self, raw: &str, nml: &mut Namelist) -> Result<()> {
        // Strip everything from the first `;`, `!` or `#` onward. This is
        // not quote-aware: a string literal containing one of these
        // characters is truncated. Accepted limitation, kept as-is.
        let stripped = match raw.find(|c| matches!(c, ';' | '!' | '#')) {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let mut line = stripped.trim().to_string();
        if line.is_empty() {
            return Ok(());
        }

        // Normalize the legacy `$`-delimited spellings.
        line = line.replace('$', "&");
        if line == "&" || line.eq_ignore_ascii_case("&end") {
            line = "/".to_string();
        }

        let mut tokens = self.tokenizer.tokenize(&line)?;
        tokens.retain(|t| {
            let bare = t.text.strip_suffix(',').unwrap_or(t.text.as_str());
            t.kind != TokenKind::Whitespace && !bare.trim().is_empty()
        });
        let Some(first) = tokens.first() else {
            return Ok(());
        };

        if first.text == "&" {
            if let Some(name_token) = tokens.get(1) {
                self.open_group(&name_token.text.to_lowercase(), nml);
            }
            return Ok(());
        }

        if first.text == "/" {
            self.close_group(nml);
            return Ok(());
        }

        let Some((_, group)) = self.frame.as_mut() else {
            // Lines at top level are discarded regardless of content.
            return Ok(());
        };

        if tokens.len() >= 2 && tokens[1].text == "=" {
            let name = first.text.clone();
            match &tokens[2..] {
                [] => debug!("assignment to '{}' carries no value, skipped", name),
                [only] => {
                    group.insert(&name, Value::to_native(&only.text));
                }
                many => {
                    group.insert(&name, Value::Array(expand_values(many)));
                }
            }
        } else {
            // Index-qualified assignments and other unsupported syntax.
            debug!("unsupported line inside group, skipped: '{}'", line);
        }
        Ok(())
    }

    fn open_group(&mut self, name: &str, nml: &mut Namelist) {
        debug!("opening group '{}'", name);
        if let Some((prev_name, prev_group)) = self.frame.take() {
            // Missing close marker for the previous group.
            nml.insert_group(&prev_name).merge(prev_group);
        }
        self.frame = Some((name.to_string(), NamelistGroup::new()));
    }

    fn close_group(&mut self, nml: &mut Namelist) {
        // A stray close at top level is a no-op.
        if let Some((name, group)) = self.frame.take() {
            debug!("closing group '{}' with {} variables", name, group.len());
            // Reopened groups merge into their original position.
            nml.insert_group(&name).merge(group);
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `count * value` repetition triples left to right, then promote
/// the sequence to a common element type: any float makes every integer a
/// float.
fn expand_values(tokens: &[Token]) -> Vec<Value> {
    let mut values = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        if idx + 2 < tokens.len() && tokens[idx + 1].text == "*" {
            if let Ok(count) = tokens[idx].text.parse::<usize>() {
                let value = Value::to_native(&tokens[idx + 2].text);
                values.extend(std::iter::repeat(value).take(count));
                idx += 3;
                continue;
            }
        }
        values.push(Value::to_native(&tokens[idx].text));
        idx += 1;
    }

    if values.iter().any(Value::is_real) {
        for value in &mut values {
            if let Value::Int(i) = value {
                *value = Value::Real(*i as f64);
            }
        }
    }
    values
}
