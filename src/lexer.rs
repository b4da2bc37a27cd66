use std::fmt;

use thiserror::Error;

/// Lexical tokens of a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Field selector prefix
    ///
    /// # Examples
    /// ```text
    /// .name
    /// ```
    Dot,

    /// Opens an index, range or quoted field
    LBracket,

    /// Closes an index, range or quoted field
    RBracket,

    /// Separates range bounds
    ///
    /// # Examples
    /// ```text
    /// [1:3]
    /// [:]
    /// ```
    Colon,

    /// Sign of a negative index
    Minus,

    /// Wildcard, only meaningful as `[*]`
    Star,

    /// Field name: a letter or underscore followed by letters, digits or
    /// underscores (ASCII).
    Identifier(String),

    /// Unsigned run of decimal digits, kept as written.
    Integer(String),

    /// Double-quoted field name with escapes already decoded
    ///
    /// # Examples
    /// ```text
    /// ["content-type"]
    /// ["say \"hi\""]
    /// ```
    String(String),

    /// Any other character, including whitespace. The lexer never skips
    /// input; the parser decides whether the character is an error.
    Unexpected(char),

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Dot => f.write_str("."),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::Colon => f.write_str(":"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Identifier(name) => f.write_str(name),
            Token::Integer(digits) => f.write_str(digits),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Unexpected(ch) => write!(f, "{}", ch),
            Token::Eof => f.write_str("<EOF>"),
        }
    }
}

/// Character offset into the expression, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}", self.offset)
    }
}

/// Errors from malformed quoted field names.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid escape sequence '\\{ch}' at {position}")]
    InvalidEscape { ch: char, position: Position },
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The whole expression being lexed.
    pub fn text(&self) -> String {
        self.input.iter().collect()
    }

    /// The first `offset` characters of the expression.
    pub fn prefix(&self, offset: usize) -> String {
        self.input.iter().take(offset).collect()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = Position {
            offset: self.position,
        };
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_at = Position {
                        offset: self.position,
                    };
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            return Err(LexError::InvalidEscape {
                                ch: other,
                                position: escape_at,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = match self.current_char() {
            None => Token::Eof,
            Some('"') => Token::String(self.read_string()?),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                Token::Identifier(self.read_while(|c| c.is_ascii_alphanumeric() || c == '_'))
            }
            Some(ch) if ch.is_ascii_digit() => {
                Token::Integer(self.read_while(|c| c.is_ascii_digit()))
            }
            Some(ch) => {
                self.advance();
                match ch {
                    '.' => Token::Dot,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    ':' => Token::Colon,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    other => Token::Unexpected(other),
                }
            }
        };
        Ok(token)
    }
}

#[test]
fn test_field_chain() {
    let mut lexer = Lexer::new(".foo[-1]");
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("foo".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Minus);
    assert_eq!(lexer.next_token().unwrap(), Token::Integer("1".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_whitespace_is_a_token() {
    let mut lexer = Lexer::new(" x");
    assert_eq!(lexer.next_token().unwrap(), Token::Unexpected(' '));
    assert_eq!(lexer.position(), 1);
}
