// nmlio/src/tokenizer/lexer.rs

//! Stateful per-line scanner for Fortran namelist text.
//!
//! The tokenizer consumes one line at a time and carries two pieces of
//! state across consecutive lines of a single read: the delimiter of an
//! unterminated string literal, and the group-delimiter status that
//! decides whether line content is significant at all.

use super::token::{Token, TokenKind};
use crate::error::{NmlError, Result};

/// Single-character lexemes accepted outside the other scan branches.
/// This set is exhaustive over expected namelist input; anything else is
/// a fatal grammar violation.
const PUNCTUATION: &str = "=+-*/\\()[]{},:;%&~<>?`|$#@";

/// Letter runs that combine with a leading sign into one numeric lexeme.
const SPECIAL_NUMBERS: [&str; 3] = ["inf", "infinity", "nan"];

/// Group-delimiter status carried across line scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    /// No group marker seen yet; whole lines are non-significant.
    NeverOpened,
    /// Inside a group opened by `&` or `$`.
    Open(char),
    /// A group has been opened and closed. Unlike `NeverOpened`, lines
    /// are tokenized in full so that close markers and trailing text
    /// reach the reader, which discards them at top level.
    Closed,
}

/// Line-by-line lexer for Fortran namelist input.
///
/// One instance scans the consecutive lines of one read operation and
/// must not be shared across reads.
pub struct Tokenizer {
    chars: Vec<char>,
    idx: usize,
    line: usize,
    pending_delim: Option<char>,
    group: GroupState,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            idx: 0,
            line: 0,
            pending_delim: None,
            group: GroupState::NeverOpened,
        }
    }

    /// Scan one line into the ordered sequence of lexemes covering the
    /// entire line, whitespace and comment lexemes included. Callers
    /// filter out what they do not need.
    pub fn tokenize(&mut self, line: &str) -> Result<Vec<Token>> {
        self.chars = line.chars().collect();
        self.idx = 0;
        self.line += 1;

        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            // A string left open on the previous line resumes here
            // without reopening.
            if self.pending_delim.is_some() {
                tokens.push(self.scan_string());
                continue;
            }

            // Group-delimiter tracking happens before classification:
            // the opening `&` must already count as inside-group when
            // the significance check below runs, while the closing
            // character itself still gets tokenized.
            let group_event = match (self.group, c) {
                (GroupState::Open('&'), '/') | (GroupState::Open('$'), '$') => {
                    self.group = GroupState::Closed;
                    Some(TokenKind::GroupClose)
                }
                (_, '&') | (_, '$') => {
                    self.group = GroupState::Open(c);
                    Some(TokenKind::GroupOpen)
                }
                _ => None,
            };

            let token = if is_nml_whitespace(c) {
                self.scan_whitespace()
            } else if c == '!' || c == '#' || self.group == GroupState::NeverOpened {
                self.scan_comment()
            } else if c == '\'' || c == '"' {
                self.scan_string()
            } else if c.is_ascii_alphabetic() {
                self.scan_name()
            } else if c == '+' || c == '-' {
                self.scan_sign()
            } else if c.is_ascii_digit() {
                self.scan_number()
            } else if c == '.' {
                self.scan_dot()
            } else if PUNCTUATION.contains(c) {
                self.idx += 1;
                Token::new(group_event.unwrap_or(TokenKind::Punct), c.to_string())
            } else {
                return Err(NmlError::UnexpectedCharacter {
                    character: c,
                    line: self.line,
                    column: self.idx + 1,
                });
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn scan_whitespace(&mut self) -> Token {
        let start = self.idx;
        while matches!(self.peek(), Some(c) if is_nml_whitespace(c)) {
            self.idx += 1;
        }
        Token::new(TokenKind::Whitespace, self.slice(start))
    }

    fn scan_comment(&mut self) -> Token {
        let start = self.idx;
        self.idx = self.chars.len();
        Token::new(TokenKind::Comment, self.slice(start))
    }

    /// Scan a string literal, or resume one left open by a previous line.
    /// The raw lexeme keeps its delimiters; a doubled delimiter stays
    /// doubled and is collapsed by the value converter.
    fn scan_string(&mut self) -> Token {
        let mut text = String::new();
        let delim = match self.pending_delim.take() {
            Some(d) => d,
            None => {
                let d = self.chars[self.idx];
                text.push(d);
                self.idx += 1;
                d
            }
        };

        loop {
            match self.peek() {
                None => {
                    // Line ended before the delimiter closed; continue
                    // on the next line.
                    self.pending_delim = Some(delim);
                    break;
                }
                Some(c) if c == delim => {
                    self.idx += 1;
                    if self.peek() == Some(delim) {
                        // Escaped literal delimiter, not a close.
                        text.push(delim);
                        text.push(delim);
                        self.idx += 1;
                    } else {
                        text.push(delim);
                        break;
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.idx += 1;
                }
            }
        }

        Token::new(TokenKind::Str, text)
    }

    /// Scan an identifier. Fortran derived-type and component names may
    /// embed quote and underscore characters.
    fn scan_name(&mut self) -> Token {
        let start = self.idx;
        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_alphanumeric() || matches!(c, '\'' | '"' | '_')
        ) {
            self.idx += 1;
        }
        let text = self.slice(start);
        let kind = match text.to_lowercase().as_str() {
            "t" | "f" | "true" | "false" => TokenKind::Logical,
            _ => TokenKind::Name,
        };
        Token::new(kind, text)
    }

    /// Resolve an ambiguous `+`/`-` by a non-consuming lookahead over the
    /// letters that follow: a signed IEEE special value is one lexeme,
    /// anything else falls through to numeric scanning.
    fn scan_sign(&mut self) -> Token {
        let mut j = self.idx + 1;
        while j < self.chars.len() && self.chars[j].is_ascii_alphabetic() {
            j += 1;
        }
        let letters: String = self.chars[self.idx + 1..j].iter().collect();
        if SPECIAL_NUMBERS.contains(&letters.to_lowercase().as_str()) {
            let start = self.idx;
            self.idx = j;
            return Token::new(TokenKind::Number, self.slice(start));
        }
        self.scan_number()
    }

    /// Scan a numeric literal: optional sign, digits, at most one decimal
    /// point, optional `e`/`E`/`d`/`D` exponent with optional sign and
    /// trailing digits. No validation beyond this shape; a malformed
    /// number is deferred to the value converter.
    fn scan_number(&mut self) -> Token {
        let start = self.idx;
        if matches!(self.peek(), Some('+' | '-')) {
            self.idx += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.idx += 1;
        }
        if self.peek() == Some('.') {
            self.idx += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.idx += 1;
            }
        }
        if matches!(self.peek(), Some('e' | 'E' | 'd' | 'D')) {
            self.idx += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.idx += 1;
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.idx += 1;
            }
        }

        let text = self.slice(start);
        if text == "+" || text == "-" {
            // A lone sign with nothing numeric after it.
            Token::new(TokenKind::Punct, text)
        } else {
            Token::new(TokenKind::Number, text)
        }
    }

    /// Dispatch a leading dot: fractional number, dot-delimited logical
    /// or named constant, or a bare punctuation dot.
    fn scan_dot(&mut self) -> Token {
        match self.peek_at(self.idx + 1) {
            Some(c) if c.is_ascii_digit() => self.scan_number(),
            Some(c) if c.is_ascii_alphabetic() => {
                let mut j = self.idx + 1;
                while j < self.chars.len() && self.chars[j].is_ascii_alphabetic() {
                    j += 1;
                }
                if self.peek_at(j) == Some('.') {
                    let start = self.idx;
                    self.idx = j + 1;
                    Token::new(TokenKind::Logical, self.slice(start))
                } else {
                    self.idx += 1;
                    Token::new(TokenKind::Punct, ".".to_string())
                }
            }
            _ => {
                self.idx += 1;
                Token::new(TokenKind::Punct, ".".to_string())
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn slice(&self, start: usize) -> String {
        self.chars[start..self.idx].iter().collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_nml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0b' | '\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_scan_simple_group_line() {
        let mut tok = Tokenizer::new();
        let tokens = tok.tokenize("&data_nml x = 1").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::GroupOpen,
                TokenKind::Name,
                TokenKind::Whitespace,
                TokenKind::Name,
                TokenKind::Whitespace,
                TokenKind::Punct,
                TokenKind::Whitespace,
                TokenKind::Number,
            ]
        );
        assert_eq!(tokens[1].text, "data_nml");
    }

    #[test]
    fn test_line_before_any_group_is_one_comment() {
        let mut tok = Tokenizer::new();
        let tokens = tok.tokenize("this header text means nothing").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::Comment]);
        assert_eq!(tokens[0].text, "this header text means nothing");
    }

    #[test]
    fn test_group_close_then_comment_marker() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&grp").unwrap();
        let tokens = tok.tokenize("/ ! done").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::GroupClose);
        // The `!` after the close still starts a comment lexeme.
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Comment);
    }

    #[test]
    fn test_legacy_dollar_group_markers() {
        let mut tok = Tokenizer::new();
        let open = tok.tokenize("$grp").unwrap();
        assert_eq!(open[0].kind, TokenKind::GroupOpen);
        let close = tok.tokenize("$").unwrap();
        assert_eq!(close[0].kind, TokenKind::GroupClose);
    }

    #[test]
    fn test_scan_numbers() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let tokens = tok.tokenize("42 3.14 1.23e4 1.23d-5 .5 6.e2").unwrap();
        let numbers: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(numbers, vec!["42", "3.14", "1.23e4", "1.23d-5", ".5", "6.e2"]);
    }

    #[test]
    fn test_sign_lookahead_special_values() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let tokens = tok.tokenize("-inf +NaN -infinity -3 - x").unwrap();
        let meaningful: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        assert_eq!(meaningful[0].kind, TokenKind::Number);
        assert_eq!(meaningful[0].text, "-inf");
        assert_eq!(meaningful[1].text, "+NaN");
        assert_eq!(meaningful[2].text, "-infinity");
        assert_eq!(meaningful[3].text, "-3");
        // A sign with nothing numeric after it is plain punctuation.
        assert_eq!(meaningful[4].kind, TokenKind::Punct);
        assert_eq!(meaningful[4].text, "-");
    }

    #[test]
    fn test_scan_strings_with_escaped_delimiters() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let tokens = tok.tokenize(r#"'don''t' "said ""hi""""#).unwrap();
        let strings: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Str)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(strings, vec!["'don''t'", r#""said ""hi""""#]);
    }

    #[test]
    fn test_pending_delimiter_spans_lines() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let first = tok.tokenize("s = 'abc").unwrap();
        assert_eq!(first.last().unwrap().text, "'abc");
        // The next line resumes the same string instead of opening a new one.
        let second = tok.tokenize("def'").unwrap();
        assert_eq!(second[0].kind, TokenKind::Str);
        assert_eq!(second[0].text, "def'");
    }

    #[test]
    fn test_dot_forms() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let tokens = tok.tokenize(".true. .5 .x").unwrap();
        let meaningful: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        assert_eq!(meaningful[0].kind, TokenKind::Logical);
        assert_eq!(meaningful[0].text, ".true.");
        assert_eq!(meaningful[1].kind, TokenKind::Number);
        assert_eq!(meaningful[1].text, ".5");
        // No closing dot: the bare dot stands alone.
        assert_eq!(meaningful[2].kind, TokenKind::Punct);
        assert_eq!(meaningful[2].text, ".");
        assert_eq!(meaningful[3].kind, TokenKind::Name);
        assert_eq!(meaningful[3].text, "x");
    }

    #[test]
    fn test_bare_logical_names() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let tokens = tok.tokenize("T false flag").unwrap();
        let meaningful: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        assert_eq!(meaningful[0].kind, TokenKind::Logical);
        assert_eq!(meaningful[1].kind, TokenKind::Logical);
        assert_eq!(meaningful[2].kind, TokenKind::Name);
    }

    #[test]
    fn test_unexpected_character_is_fatal() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let err = tok.tokenize("x = \u{00b5}").unwrap_err();
        assert!(matches!(err, NmlError::UnexpectedCharacter { .. }));
    }

    #[test]
    fn test_whole_line_coverage() {
        let mut tok = Tokenizer::new();
        tok.tokenize("&g").unwrap();
        let line = "  x = 2*3.5 , y = 'a b'";
        let tokens = tok.tokenize(line).unwrap();
        let rebuilt: String = texts(&tokens).concat();
        assert_eq!(rebuilt, line);
    }
}
