//! @ai:module:intent Split Go source text into span-carrying tokens
//! @ai:module:layer infrastructure
//! @ai:module:public_api Token, TokenKind, tokenize
//! @ai:module:depends_on error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

/// @ai:intent Coarse token classes, enough to find struct types and their fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Punct(char),
    /// Interpreted string literal, `"..."`
    Str,
    /// Raw string literal, `` `...` ``
    RawStr,
    Rune,
    Number,
    Comment,
    Newline,
}

/// @ai:intent A token and where it sits in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    /// 1-based line of the first byte
    pub line: usize,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.span.clone()]
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TokenKind::Str | TokenKind::RawStr)
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_ident(&self, src: &str, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(src) == word
    }
}

struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |(i, _)| *i)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.chars.peek().is_some_and(|(_, c)| pred(*c)) {
            self.bump();
        }
    }

    fn unterminated(&self, what: &str, line: usize) -> Error {
        Error::Syntax {
            line,
            message: format!("unterminated {what}"),
        }
    }

    /// Consumes an escaped literal body up to and including `quote`.
    fn quoted(&mut self, quote: char, what: &str, line: usize) -> Result<()> {
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some('\n') | None => return Err(self.unterminated(what, line)),
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.eat_while(|c| c != '\n' && c.is_whitespace());

        let start = self.pos();
        let line = self.line;
        let Some(c) = self.bump() else {
            return Ok(None);
        };

        let kind = match c {
            '\n' => TokenKind::Newline,
            '"' => {
                self.quoted('"', "string literal", line)?;
                TokenKind::Str
            }
            '\'' => {
                self.quoted('\'', "rune literal", line)?;
                TokenKind::Rune
            }
            '`' => {
                loop {
                    match self.bump() {
                        Some('`') => break,
                        Some(_) => {}
                        None => return Err(self.unterminated("raw string literal", line)),
                    }
                }
                TokenKind::RawStr
            }
            '/' if self.chars.peek().is_some_and(|(_, n)| *n == '/') => {
                self.eat_while(|c| c != '\n');
                TokenKind::Comment
            }
            '/' if self.chars.peek().is_some_and(|(_, n)| *n == '*') => {
                self.bump();
                let mut prev = '\0';
                loop {
                    match self.bump() {
                        Some('/') if prev == '*' => break,
                        Some(c) => prev = c,
                        None => return Err(self.unterminated("block comment", line)),
                    }
                }
                TokenKind::Comment
            }
            c if c.is_alphabetic() || c == '_' => {
                self.eat_while(|c| c.is_alphanumeric() || c == '_');
                TokenKind::Ident
            }
            c if c.is_ascii_digit() => {
                self.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                TokenKind::Number
            }
            c => TokenKind::Punct(c),
        };

        Ok(Some(Token {
            kind,
            span: start..self.pos(),
            line,
        }))
    }
}

/// @ai:intent Tokenize Go source, keeping comments and newlines as tokens
/// @ai:post token spans are increasing and never overlap
/// @ai:edge_cases unterminated strings, runes and block comments are syntax errors
/// @ai:effects pure
pub fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer {
        src,
        chars: src.char_indices().peekable(),
        line: 1,
    };

    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
