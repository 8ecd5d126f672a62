//! Recursive-descent Boolean query parser (§4.4).
//!
//! Grammar:
//! ```text
//! query   := orExpr
//! orExpr  := andExpr ( '|' andExpr )*
//! andExpr := unary    ( '&' unary   )*     // implicit AND between adjacent primaries
//! unary   := '!' unary | primary
//! primary := '(' orExpr ')' | phrase | wildcardOrWord
//! phrase  := '"' word ( '\d' ? word )* '"'
//! word    := [A-Za-z0-9_*]+
//! ```
//!
//! Structured as tokenize-once-then-recursive-descend, following the teacher's
//! tokenize/lex/Parser shape (`search/elastic_query.rs`): a `Token` enum produced by a single
//! lexing pass, and a `Parser` holding a token cursor with one method per grammar production.
//! Unlike the teacher's text-rewrite-with-placeholder-characters strategy, this parser
//! recurses directly over the token stream — an equivalent, more directly testable way of
//! implementing the same grammar (see DESIGN.md).

use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

use super::{BinaryOp, Expr, UnaryOp};

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParseError {
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("a phrase must contain at least two words")]
    PhraseTooShort,
    #[error("phrase distances must be strictly increasing and positive")]
    InvalidPhraseDistances,
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("trailing input after a complete expression")]
    TrailingInput,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    And,
    Or,
    Not,
    LParen,
    RParen,
    Word(String),
    Phrase(Vec<String>, Vec<i64>),
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '*'
}

fn strip_control_characters(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let cleaned = strip_control_characters(input);
    let mut chars = cleaned.chars().peekable();
    let mut tokens = Vec::new();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '&' => {
                chars.next();
                tokens.push(Token::And);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Or);
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' => {
                chars.next();
                tokens.push(lex_phrase(&mut chars)?);
            }
            c if is_word_char(c) => {
                tokens.push(Token::Word(lex_word(&mut chars)));
            }
            other => {
                // Any other character is simply not in the token/operator alphabet.
                return Err(ParseError::UnexpectedToken(other.to_string()));
            }
        }
    }

    Ok(tokens)
}

fn lex_word(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if is_word_char(c) {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }
    word
}

fn lex_phrase(chars: &mut Peekable<Chars<'_>>) -> Result<Token, ParseError> {
    let mut words: Vec<String> = Vec::new();
    let mut distances: Vec<i64> = Vec::new();
    let mut next_default_distance: i64 = 1;
    let mut pending_distance: Option<i64> = None;

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            Some('"') => {
                chars.next();
                break;
            }
            None => return Err(ParseError::UnexpectedEof),
            Some('\\') => {
                let checkpoint = chars.clone();
                chars.next();
                if chars.peek() == Some(&'d') {
                    chars.next();
                    let mut digits = String::new();
                    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
                        digits.push(chars.next().unwrap());
                    }
                    if digits.is_empty() {
                        return Err(ParseError::UnexpectedToken("\\d".to_string()));
                    }
                    pending_distance = Some(
                        digits
                            .parse()
                            .map_err(|_| ParseError::InvalidPhraseDistances)?,
                    );
                } else {
                    *chars = checkpoint;
                    return Err(ParseError::UnexpectedToken("\\".to_string()));
                }
            }
            Some(&c) if is_word_char(c) => {
                let word = lex_word(chars);
                if words.is_empty() {
                    words.push(word);
                } else {
                    let distance = pending_distance.take().unwrap_or(next_default_distance);
                    if distance <= 0 || distances.last().is_some_and(|&last| distance <= last) {
                        return Err(ParseError::InvalidPhraseDistances);
                    }
                    distances.push(distance);
                    next_default_distance = distance + 1;
                    words.push(word);
                }
            }
            Some(&other) => return Err(ParseError::UnexpectedToken(other.to_string())),
        }
    }

    if words.is_empty() {
        return Err(ParseError::PhraseTooShort);
    }
    Ok(Token::Phrase(words, distances))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            while matches!(self.peek(), Some(Token::Or)) {
                self.advance();
            }
            let right = self.parse_and()?;
            left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::And) => {
                    while matches!(self.peek(), Some(Token::And)) {
                        self.advance();
                    }
                    let right = self.parse_unary()?;
                    left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
                }
                Some(Token::Or) | Some(Token::RParen) | None => break,
                Some(_) => {
                    // Adjacent primary with no explicit operator: implicit AND.
                    let right = self.parse_unary()?;
                    left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
                }
            }
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let mut negations = 0u32;
        while matches!(self.peek(), Some(Token::Not)) {
            self.advance();
            negations += 1;
        }
        let inner = self.parse_primary()?;
        if negations % 2 == 1 {
            Ok(Expr::Unary(UnaryOp::Not, Box::new(inner)))
        } else {
            Ok(inner)
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(ParseError::UnbalancedParens),
                }
            }
            Some(Token::Word(word)) => Ok(Expr::Value(word)),
            Some(Token::Phrase(words, distances)) => {
                if words.len() == 1 {
                    Ok(Expr::Value(words.into_iter().next().unwrap()))
                } else {
                    Expr::phrase(words, distances).ok_or(ParseError::InvalidPhraseDistances)
                }
            }
            Some(other) => Err(ParseError::UnexpectedToken(format!("{other:?}"))),
            None => Err(ParseError::UnexpectedEof),
        }
    }
}

/// Parse a Boolean query string into an [`Expr`] tree.
///
/// This is the fallible, low-level entry point; the retrieval facade wraps it so that a
/// parse failure (`InvalidQuery`) degrades to "no results" rather than propagating, per the
/// error-handling design.
pub fn parse_query(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEof);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(ParseError::TrailingInput);
    }
    Ok(expr)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
