//!
//! Grammar parser of the model description
//!
//! ```text
//! document := header state*
//! header   := "header" "{" (key [":"] value ";")* "}"
//! state    := name "{" field* "}"
//! field    := key [":"] value ";"
//! ```
//!
//! `trans` and `only` take either an ordered map `(name ":" float)*`
//! or a bare ordered list of names. `type` and `end` take an integer.
//! Every other key takes a single token.
//!
use super::tokenizer::{Token, TokenKind};
use crate::error::{Error, Result};
use std::collections::HashMap;

///
/// Value of a state field
///
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Scalar(String),
    Integer(i64),
    /// ordered `name -> probability` map
    Map(Vec<(String, f64)>),
    /// ordered list of names whose probabilities come from a tied state
    List(Vec<String>),
}

impl Field {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Field::Scalar(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_map(&self) -> Option<&[(String, f64)]> {
        match self {
            Field::Map(m) => Some(m),
            _ => None,
        }
    }
    ///
    /// Names listed in this field, in order.
    /// For a map these are its keys.
    ///
    pub fn names(&self) -> Option<Vec<&str>> {
        match self {
            Field::Map(m) => Some(m.iter().map(|(k, _)| k.as_str()).collect()),
            Field::List(l) => Some(l.iter().map(|k| k.as_str()).collect()),
            _ => None,
        }
    }
}

/// A parsed state block before tie resolution
#[derive(Debug, Clone, PartialEq)]
pub struct RawState {
    pub name: String,
    /// line of the state name
    pub line: usize,
    pub fields: HashMap<String, Field>,
}

impl RawState {
    pub fn new(name: &str, line: usize) -> RawState {
        RawState {
            name: name.to_string(),
            line,
            fields: HashMap::new(),
        }
    }
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }
    /// scalar field value such as `label` or `tied_trans`
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|f| f.as_scalar())
    }
}

///
/// Arena of raw states in declaration order,
/// with name -> index lookup.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStates {
    states: Vec<RawState>,
    index: HashMap<String, usize>,
}

impl RawStates {
    ///
    /// Append a state. A state name can be declared only once.
    ///
    pub fn push(&mut self, state: RawState) -> Result<()> {
        if self.index.contains_key(&state.name) {
            return Err(Error::Format(format!(
                "state `{}` is declared twice (line {})",
                state.name, state.line
            )));
        }
        self.index.insert(state.name.clone(), self.states.len());
        self.states.push(state);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.states.len()
    }
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
    pub fn get(&self, index: usize) -> &RawState {
        &self.states[index]
    }
    pub fn get_mut(&mut self, index: usize) -> &mut RawState {
        &mut self.states[index]
    }
    pub fn by_name(&self, name: &str) -> Option<&RawState> {
        self.index_of(name).map(|i| &self.states[i])
    }
    /// iterate over states in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &RawState> + '_ {
        self.states.iter()
    }
}

///
/// Metadata block at the head of a model file
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    fields: HashMap<String, String>,
}

impl Header {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_str())
    }
    ///
    /// Ordered observation characters (the `alphabet` value)
    ///
    pub fn alphabet(&self) -> Result<&str> {
        self.get("alphabet")
            .ok_or_else(|| Error::Format("header has no `alphabet`".to_string()))
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token<'a>>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }
    fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }
    fn peek(&self, offset: usize) -> Option<TokenKind<'a>> {
        self.tokens.get(self.position + offset).map(|t| t.kind)
    }
    fn last_line(&self) -> usize {
        self.tokens.last().map(|t| t.line).unwrap_or(0)
    }
    fn next(&mut self) -> Result<Token<'a>> {
        match self.tokens.get(self.position).copied() {
            Some(token) => {
                self.position += 1;
                Ok(token)
            }
            None => Err(Error::Syntax {
                line: self.last_line(),
                message: "unexpected end of input".to_string(),
            }),
        }
    }
    fn expect(&mut self, kind: TokenKind<'a>) -> Result<Token<'a>> {
        let token = self.next()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(Error::Syntax {
                line: token.line,
                message: format!("expected {}, found {}", kind, token.kind),
            })
        }
    }
    fn expect_word(&mut self) -> Result<(&'a str, usize)> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Word(w) => Ok((w, token.line)),
            kind => Err(Error::Syntax {
                line: token.line,
                message: format!("expected a name or a number, found {}", kind),
            }),
        }
    }
    /// `key : value` and `key value` are both accepted
    fn skip_colon(&mut self) {
        if self.peek(0) == Some(TokenKind::Colon) {
            self.position += 1;
        }
    }
    fn parse_header(&mut self) -> Result<Header> {
        let (keyword, line) = self.expect_word()?;
        if keyword != "header" {
            return Err(Error::Syntax {
                line,
                message: format!("expected `header`, found `{}`", keyword),
            });
        }
        self.expect(TokenKind::OpenBrace)?;
        let mut header = Header::default();
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::CloseBrace => break,
                TokenKind::Word(key) => {
                    self.skip_colon();
                    let (value, _) = self.expect_word()?;
                    self.expect(TokenKind::Semicolon)?;
                    header.fields.insert(key.to_string(), value.to_string());
                }
                kind => {
                    return Err(Error::Syntax {
                        line: token.line,
                        message: format!("expected a header key, found {}", kind),
                    })
                }
            }
        }
        Ok(header)
    }
    fn parse_state(&mut self) -> Result<RawState> {
        let (name, line) = self.expect_word()?;
        self.expect(TokenKind::OpenBrace)?;
        let mut state = RawState::new(name, line);
        loop {
            let token = self.next()?;
            let key = match token.kind {
                TokenKind::CloseBrace => break,
                TokenKind::Word(key) => key,
                kind => {
                    return Err(Error::Syntax {
                        line: token.line,
                        message: format!("expected a field of state `{}`, found {}", name, kind),
                    })
                }
            };
            self.skip_colon();
            let value = match key {
                "trans" | "only" => self.parse_map_or_list()?,
                "type" | "end" => self.parse_integer()?,
                _ => Field::Scalar(self.expect_word()?.0.to_string()),
            };
            self.expect(TokenKind::Semicolon)?;
            state.fields.insert(key.to_string(), value);
        }
        Ok(state)
    }
    ///
    /// Looks two tokens ahead: `name :` starts a map, anything else
    /// is a bare list. Nothing is consumed before the decision.
    ///
    fn parse_map_or_list(&mut self) -> Result<Field> {
        match (self.peek(0), self.peek(1)) {
            (Some(TokenKind::Semicolon), _) => Ok(Field::Map(Vec::new())),
            (Some(TokenKind::Word(_)), Some(TokenKind::Colon)) => self.parse_map().map(Field::Map),
            _ => self.parse_list().map(Field::List),
        }
    }
    fn parse_map(&mut self) -> Result<Vec<(String, f64)>> {
        let mut map = Vec::new();
        while self.peek(0) != Some(TokenKind::Semicolon) {
            let (name, _) = self.expect_word()?;
            self.expect(TokenKind::Colon)?;
            let (value, line) = self.expect_word()?;
            let prob: f64 = value.parse().map_err(|_| Error::Syntax {
                line,
                message: format!("`{}` is not a probability", value),
            })?;
            map.push((name.to_string(), prob));
        }
        Ok(map)
    }
    fn parse_list(&mut self) -> Result<Vec<String>> {
        let mut list = Vec::new();
        while self.peek(0) != Some(TokenKind::Semicolon) {
            let (name, _) = self.expect_word()?;
            list.push(name.to_string());
        }
        Ok(list)
    }
    fn parse_integer(&mut self) -> Result<Field> {
        let (value, line) = self.expect_word()?;
        value.parse().map(Field::Integer).map_err(|_| Error::Syntax {
            line,
            message: format!("`{}` is not an integer", value),
        })
    }
}

///
/// Build the header and the raw state arena from the token stream.
///
/// Every token must be consumed by the header or a state block.
///
pub fn parse_tokens(tokens: Vec<Token<'_>>) -> Result<(Header, RawStates)> {
    let mut parser = Parser::new(tokens);
    let header = parser.parse_header()?;
    let mut states = RawStates::default();
    while !parser.is_exhausted() {
        let state = parser.parse_state()?;
        states.push(state)?;
    }
    Ok((header, states))
}

#[cfg(test)]
mod tests {
    use super::super::tokenizer::tokenize;
    use super::*;

    fn parse(text: &str) -> Result<(Header, RawStates)> {
        parse_tokens(tokenize(text)?)
    }

    #[test]
    fn parse_header_and_states() {
        let (header, states) = parse(
            "header { alphabet ACD; version 2; }
             begin { trans a:0.4 b:0.6; type 0; end 0; letter NULL; }
             a { trans a:1.0; only A:0.5 C:0.25 D:0.25; label i; }
             b { tied_trans a; trans b; tied_letter a; label M; }",
        )
        .unwrap();
        assert_eq!(header.alphabet().unwrap(), "ACD");
        assert_eq!(header.get("version"), Some("2"));
        assert_eq!(states.len(), 3);
        assert_eq!(states.index_of("a"), Some(1));

        let begin = states.by_name("begin").unwrap();
        assert_eq!(
            begin.get("trans"),
            Some(&Field::Map(vec![("a".to_string(), 0.4), ("b".to_string(), 0.6)]))
        );
        assert_eq!(begin.get("type"), Some(&Field::Integer(0)));
        assert_eq!(begin.scalar("letter"), Some("NULL"));

        let a = states.by_name("a").unwrap();
        assert_eq!(a.scalar("label"), Some("i"));
        assert_eq!(a.get("only").and_then(|f| f.as_map()).map(|m| m.len()), Some(3));

        let b = states.by_name("b").unwrap();
        assert_eq!(b.get("trans"), Some(&Field::List(vec!["b".to_string()])));
        assert_eq!(b.scalar("tied_trans"), Some("a"));
        assert_eq!(b.scalar("tied_letter"), Some("a"));
    }
    #[test]
    fn parse_accepts_colon_after_key() {
        let (header, states) =
            parse("header { alphabet: XY; } B { tied_trans: A; trans: X Y; label: o; }").unwrap();
        assert_eq!(header.alphabet().unwrap(), "XY");
        let b = states.by_name("B").unwrap();
        assert_eq!(b.scalar("tied_trans"), Some("A"));
        assert_eq!(b.scalar("label"), Some("o"));
        assert_eq!(
            b.get("trans"),
            Some(&Field::List(vec!["X".to_string(), "Y".to_string()]))
        );
    }
    #[test]
    fn parse_map_keeps_declaration_order() {
        let (_, states) = parse("header { alphabet A; } s { trans z:0.1 a:0.2 m:0.7; }").unwrap();
        let names = states.by_name("s").unwrap().get("trans").unwrap().names().unwrap();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
    #[test]
    fn parse_empty_trans_is_an_empty_map() {
        let (_, states) = parse("header { alphabet A; } s { trans ; }").unwrap();
        assert_eq!(states.by_name("s").unwrap().get("trans"), Some(&Field::Map(vec![])));
    }
    #[test]
    fn parse_errors() {
        // missing header
        assert!(matches!(parse("begin { }"), Err(Error::Syntax { .. })));
        // unterminated state block
        assert!(matches!(
            parse("header { alphabet A; }\ns { label i;"),
            Err(Error::Syntax { line: 2, .. })
        ));
        // leftover tokens that do not form a state
        assert!(matches!(
            parse("header { alphabet A; } s { label i; } t"),
            Err(Error::Syntax { .. })
        ));
        // map entry without a colon after the map started
        assert!(matches!(
            parse("header { alphabet A; } s { trans a:0.5 b; }"),
            Err(Error::Syntax { .. })
        ));
        // bad numbers
        assert!(matches!(
            parse("header { alphabet A; } s { trans a:x; }"),
            Err(Error::Syntax { .. })
        ));
        assert!(matches!(
            parse("header { alphabet A; } s { type 0.5; }"),
            Err(Error::Syntax { .. })
        ));
        // duplicated state
        assert!(matches!(
            parse("header { alphabet A; }\ns { }\ns { }"),
            Err(Error::Format(_))
        ));
    }
}
