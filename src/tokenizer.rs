//! Pull-model tokenizer for the statement grammar.
//!
//! The [`Tokenizer`] borrows the input text and exposes exactly one token at
//! a time. [`Tokenizer::advance`] never fails: bytes that match no rule come
//! out as one-character [`TokenKind::Unknown`] tokens and rejection is left
//! to the parser.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Longest token text kept; anything beyond is silently truncated.
pub const MAX_TOKEN_TEXT: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    Identifier,
    StringLiteral,
    NumericLiteral,
    Unknown,
    // Keywords
    Create,
    Drop,
    Delete,
    Truncate,
    Update,
    Alter,
    Select,
    Insert,
    Database,
    Table,
    From,
    Where,
    And,
    Or,
    Not,
    Between,
    Like,
    In,
    Is,
    Null,
    Into,
    Values,
    // Comparison operators
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    // Arithmetic operators
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl TokenKind {
    /// Debug name used in diagnostics ("Expected IDENTIFIER ...").
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::NumericLiteral => "NUMERIC_LITERAL",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Create => "CREATE",
            TokenKind::Drop => "DROP",
            TokenKind::Delete => "DELETE",
            TokenKind::Truncate => "TRUNCATE",
            TokenKind::Update => "UPDATE",
            TokenKind::Alter => "ALTER",
            TokenKind::Select => "SELECT",
            TokenKind::Insert => "INSERT",
            TokenKind::Database => "DATABASE",
            TokenKind::Table => "TABLE",
            TokenKind::From => "FROM",
            TokenKind::Where => "WHERE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Between => "BETWEEN",
            TokenKind::Like => "LIKE",
            TokenKind::In => "IN",
            TokenKind::Is => "IS",
            TokenKind::Null => "NULL",
            TokenKind::Into => "INTO",
            TokenKind::Values => "VALUES",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
                | TokenKind::Less
                | TokenKind::LessEqual
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: String) -> Self {
        Token { kind, text }
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("CREATE", TokenKind::Create);
        m.insert("DROP", TokenKind::Drop);
        m.insert("DELETE", TokenKind::Delete);
        m.insert("TRUNCATE", TokenKind::Truncate);
        m.insert("UPDATE", TokenKind::Update);
        m.insert("ALTER", TokenKind::Alter);
        m.insert("SELECT", TokenKind::Select);
        m.insert("INSERT", TokenKind::Insert);
        m.insert("DATABASE", TokenKind::Database);
        m.insert("TABLE", TokenKind::Table);
        m.insert("FROM", TokenKind::From);
        m.insert("WHERE", TokenKind::Where);
        m.insert("AND", TokenKind::And);
        m.insert("OR", TokenKind::Or);
        m.insert("NOT", TokenKind::Not);
        m.insert("BETWEEN", TokenKind::Between);
        m.insert("LIKE", TokenKind::Like);
        m.insert("IN", TokenKind::In);
        m.insert("IS", TokenKind::Is);
        m.insert("NULL", TokenKind::Null);
        m.insert("INTO", TokenKind::Into);
        m.insert("VALUES", TokenKind::Values);
        m
    };
}

/// Multi-character operators are tried before single-character ones, longest
/// first, so ">=" never lexes as ">" followed by "=".
const MULTI_CHAR_OPS: [(&str, TokenKind); 6] = [
    (">=", TokenKind::GreaterEqual),
    ("<=", TokenKind::LessEqual),
    ("!=", TokenKind::NotEqual),
    ("=", TokenKind::Equal),
    (">", TokenKind::Greater),
    ("<", TokenKind::Less),
];

const SINGLE_CHAR_TOKENS: [(u8, TokenKind, &str); 8] = [
    (b',', TokenKind::Comma, ","),
    (b';', TokenKind::Semicolon, ";"),
    (b'(', TokenKind::LeftParen, "("),
    (b')', TokenKind::RightParen, ")"),
    (b'+', TokenKind::Plus, "+"),
    (b'-', TokenKind::Minus, "-"),
    (b'*', TokenKind::Multiply, "*"),
    (b'/', TokenKind::Divide, "/"),
];

pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    current: Token,
}

impl<'a> Tokenizer<'a> {
    /// The input must stay alive and unmodified for the tokenizer's lifetime.
    /// No token is produced until the first [`Tokenizer::advance`].
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input: input.as_bytes(),
            pos: 0,
            current: Token::new(TokenKind::Unknown, String::new()),
        }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn text(&self) -> &str {
        &self.current.text
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    /// Scan the next token into `current`. Total: an exhausted stream keeps
    /// yielding [`TokenKind::Eof`] and unrecognized bytes become
    /// [`TokenKind::Unknown`].
    pub fn advance(&mut self) {
        self.skip_whitespace();

        let c = match self.peek() {
            None => {
                self.current = Token::new(TokenKind::Eof, "EOF".to_string());
                return;
            }
            Some(c) => c,
        };

        if self.match_operator() {
            return;
        }
        if self.match_single_char() {
            return;
        }
        if c == b'\'' {
            self.scan_string();
            return;
        }
        if c.is_ascii_digit() {
            self.scan_number();
            return;
        }
        if c.is_ascii_alphabetic() || c == b'_' {
            self.scan_identifier();
            return;
        }

        self.current = Token::new(TokenKind::Unknown, (c as char).to_string());
        self.pos += 1;
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn match_operator(&mut self) -> bool {
        for (text, kind) in MULTI_CHAR_OPS {
            if self.input[self.pos..].starts_with(text.as_bytes()) {
                self.current = Token::new(kind, text.to_string());
                self.pos += text.len();
                return true;
            }
        }
        false
    }

    fn match_single_char(&mut self) -> bool {
        let c = self.input[self.pos];
        for (ch, kind, text) in SINGLE_CHAR_TOKENS {
            if c == ch {
                self.current = Token::new(kind, text.to_string());
                self.pos += 1;
                return true;
            }
        }
        false
    }

    /// No escape mechanism: the literal runs to the next quote. A missing
    /// closing quote ends the literal at end-of-input.
    fn scan_string(&mut self) {
        self.pos += 1;
        let start = self.pos;
        while self.peek().map_or(false, |c| c != b'\'') {
            self.pos += 1;
        }
        let text = self.lexeme(start);
        if self.peek() == Some(b'\'') {
            self.pos += 1;
        }
        self.current = Token::new(TokenKind::StringLiteral, text);
    }

    /// Digits with at most one dot; a second dot ends the scan.
    fn scan_number(&mut self) {
        let start = self.pos;
        let mut dot_seen = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == b'.' && !dot_seen {
                dot_seen = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        self.current = Token::new(TokenKind::NumericLiteral, self.lexeme(start));
    }

    fn scan_identifier(&mut self) {
        let start = self.pos;
        while self
            .peek()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.pos += 1;
        }
        let text = self.lexeme(start);
        let kind = KEYWORDS
            .get(text.to_ascii_uppercase().as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        self.current = Token::new(kind, text);
    }

    fn lexeme(&self, start: usize) -> String {
        let raw = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        raw.chars().take(MAX_TOKEN_TEXT).collect()
    }
}
