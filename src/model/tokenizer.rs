//!
//! Tokenizer of the model description
//!
//! * a maximal run of `[A-Za-z0-9._-]` is a word
//! * each of `:` `;` `{` `}` is a token by itself
//! * lines starting with `#` are comments and skipped entirely
//!
use crate::error::{Error, Result};

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind<'a> {
    /// identifier or number
    Word(&'a str),
    Colon,
    Semicolon,
    OpenBrace,
    CloseBrace,
}

/// A token with its 1-based source line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub line: usize,
}

impl<'a> std::fmt::Display for TokenKind<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Word(w) => write!(f, "`{}`", w),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::OpenBrace => write!(f, "`{{`"),
            TokenKind::CloseBrace => write!(f, "`}}`"),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'
}

///
/// Split the model text into tokens.
///
/// Tokens borrow from `text`, so the token stream can be re-derived
/// from the same text at any time.
///
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.starts_with('#') {
            continue;
        }
        let line_no = i + 1;
        let mut chars = line.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            let kind = match c {
                ':' => TokenKind::Colon,
                ';' => TokenKind::Semicolon,
                '{' => TokenKind::OpenBrace,
                '}' => TokenKind::CloseBrace,
                c if c.is_whitespace() => continue,
                c if is_word_char(c) => {
                    let mut end = start + c.len_utf8();
                    while let Some(&(j, d)) = chars.peek() {
                        if !is_word_char(d) {
                            break;
                        }
                        end = j + d.len_utf8();
                        chars.next();
                    }
                    TokenKind::Word(&line[start..end])
                }
                c => {
                    return Err(Error::Syntax {
                        line: line_no,
                        message: format!("unexpected character `{}`", c),
                    })
                }
            };
            tokens.push(Token {
                kind,
                line: line_no,
            });
        }
    }
    Ok(tokens)
}
