use crate::{
    error::{Found, PathError, SyntaxError},
    key::Segment,
    lexer::{Lexer, Token},
    path::Path,
};
use std::mem;

/// Single-pass path-expression parser with one token of lookahead.
///
/// ```
/// use valpath::{Lexer, Parser};
///
/// let mut parser = Parser::new(Lexer::new(".items[-1].name")).unwrap();
/// let path = parser.parse().unwrap();
/// assert_eq!(path.to_string(), ".items[-1].name");
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    /// Offset where `current_token` starts.
    token_start: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, PathError> {
        let token_start = lexer.position();
        let current_token = match lexer.next_token() {
            Ok(token) => token,
            Err(e) => {
                return Err(PathError::Syntax {
                    text: lexer.text(),
                    consumed: lexer.prefix(token_start),
                    cause: e.into(),
                });
            }
        };
        Ok(Parser {
            lexer,
            current_token,
            token_start,
        })
    }

    fn advance(&mut self) -> Result<(), PathError> {
        self.token_start = self.lexer.position();
        self.current_token = self
            .lexer
            .next_token()
            .map_err(|e| self.error(e.into()))?;
        Ok(())
    }

    fn error(&self, cause: SyntaxError) -> PathError {
        PathError::Syntax {
            text: self.lexer.text(),
            consumed: self.lexer.prefix(self.token_start),
            cause,
        }
    }

    fn unexpected(&self, expected: &'static str) -> PathError {
        let found = match &self.current_token {
            Token::Eof => Found::Eof,
            token => Found::Text(token.to_string()),
        };
        self.error(SyntaxError::Unexpected { expected, found })
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), PathError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Parse the whole input into a path.
    pub fn parse(&mut self) -> Result<Path, PathError> {
        let mut path = Path::root();

        // A lone "." is the root.
        if self.check(&Token::Dot) {
            self.advance()?;
            if self.check(&Token::Eof) {
                return Ok(path);
            }
            path.push(self.parse_field()?);
        }

        loop {
            match self.current_token {
                Token::Eof => return Ok(path),
                Token::Dot => {
                    self.advance()?;
                    path.push(self.parse_field()?);
                }
                Token::LBracket => {
                    self.advance()?;
                    let segment = self.parse_bracket()?;
                    self.expect(Token::RBracket, "]")?;
                    path.push(segment);
                }
                _ => return Err(self.unexpected(". or [")),
            }
        }
    }

    /// Identifier following a '.'.
    fn parse_field(&mut self) -> Result<Segment, PathError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                Ok(Segment::Field(name))
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("identifier"))
            }
        }
    }

    /// Contents between '[' and ']'. Leaves the ']' unconsumed.
    fn parse_bracket(&mut self) -> Result<Segment, PathError> {
        match &self.current_token {
            Token::String(name) => {
                let segment = Segment::Field(name.clone());
                self.advance()?;
                Ok(segment)
            }
            // `[]` and `[*]` both spell the full range `[:]`.
            Token::RBracket => Ok(Segment::all()),
            Token::Star => {
                self.advance()?;
                Ok(Segment::all())
            }
            Token::Colon => {
                self.advance()?;
                if self.check(&Token::RBracket) {
                    return Ok(Segment::all());
                }
                if !self.check(&Token::Minus) && !self.check(&Token::Integer(String::new())) {
                    return Err(self.unexpected("end index or ]"));
                }
                let end = self.parse_signed_integer()?;
                Ok(Segment::Range {
                    start: 0,
                    end: Some(end),
                })
            }
            Token::Minus | Token::Integer(_) => {
                let start = self.parse_signed_integer()?;
                match self.current_token {
                    Token::RBracket => Ok(Segment::Index(start)),
                    Token::Colon => {
                        self.advance()?;
                        if self.check(&Token::RBracket) {
                            return Ok(Segment::Range { start, end: None });
                        }
                        let end = self.parse_signed_integer()?;
                        Ok(Segment::Range {
                            start,
                            end: Some(end),
                        })
                    }
                    _ => Err(self.unexpected(": or ]")),
                }
            }
            _ => Err(self.unexpected("an index or range")),
        }
    }

    fn parse_signed_integer(&mut self) -> Result<i64, PathError> {
        let negative = self.check(&Token::Minus);
        if negative {
            self.advance()?;
        }
        let digits = match &self.current_token {
            Token::Integer(digits) => digits.clone(),
            _ => return Err(self.unexpected("integer")),
        };
        let literal = if negative {
            format!("-{}", digits)
        } else {
            digits
        };
        let value = literal
            .parse::<i64>()
            .map_err(|_| self.error(SyntaxError::IntegerOverflow(literal.clone())))?;
        self.advance()?;
        Ok(value)
    }
}
