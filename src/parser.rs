//! Recursive-descent parser: one function per grammar production.
//!
//! The parser pulls tokens from a [`Tokenizer`] with one token of lookahead
//! and builds a [`Node`] tree. A failed rule drops whatever it had built and
//! propagates the deepest diagnostic; the caller never sees a partial tree.

use crate::ast::{Node, NodeKind};
use crate::error::ParseError;
use crate::tokenizer::{TokenKind, Tokenizer};

pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        Parser { tokenizer }
    }

    /// Parse one statement. Primes the tokenizer, dispatches on the leading
    /// token and, unless the input ended right after the statement, requires
    /// a terminating semicolon.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        self.tokenizer.advance();
        let root = self.parse_statement()?;
        if !self.tokenizer.is_eof() {
            self.consume(TokenKind::Semicolon)?;
        }
        Ok(root)
    }

    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        match self.tokenizer.kind() {
            TokenKind::Create => {
                self.tokenizer.advance();
                match self.tokenizer.kind() {
                    TokenKind::Database => {
                        self.tokenizer.advance();
                        self.parse_create_database()
                    }
                    TokenKind::Table => {
                        self.tokenizer.advance();
                        self.parse_create_table()
                    }
                    _ => Err(self.unexpected_token()),
                }
            }
            TokenKind::Drop => {
                self.tokenizer.advance();
                self.parse_drop_table()
            }
            TokenKind::Select => {
                self.tokenizer.advance();
                self.parse_select()
            }
            TokenKind::Insert => {
                self.tokenizer.advance();
                self.parse_insert()
            }
            _ => Err(self.unexpected_token()),
        }
    }

    fn parse_create_database(&mut self) -> Result<Node, ParseError> {
        let mut node = Node::new(NodeKind::CreateDatabase);
        node.add_child(self.parse_identifier()?);
        Ok(node)
    }

    fn parse_create_table(&mut self) -> Result<Node, ParseError> {
        let mut node = Node::new(NodeKind::CreateTable);
        node.add_child(self.parse_identifier()?);
        node.add_child(self.parse_column_list()?);
        Ok(node)
    }

    fn parse_drop_table(&mut self) -> Result<Node, ParseError> {
        self.consume(TokenKind::Table)?;
        let mut node = Node::new(NodeKind::DropTable);
        node.add_child(self.parse_identifier()?);
        Ok(node)
    }

    /// Column spec is either a bare `*` or a comma-separated identifier
    /// list, then a mandatory FROM table and an optional WHERE clause.
    fn parse_select(&mut self) -> Result<Node, ParseError> {
        let mut node = Node::new(NodeKind::Select);
        if self.tokenizer.is(TokenKind::Multiply) {
            node.add_child(Node::with_text(NodeKind::Literal, self.tokenizer.text()));
            self.tokenizer.advance();
        } else {
            let mut columns = Node::new(NodeKind::ColumnList);
            columns.add_child(self.parse_identifier()?);
            while self.tokenizer.is(TokenKind::Comma) {
                self.tokenizer.advance();
                columns.add_child(self.parse_identifier()?);
            }
            node.add_child(columns);
        }
        self.consume(TokenKind::From)?;
        node.add_child(self.parse_identifier()?);
        if let Some(clause) = self.parse_where_clause()? {
            node.add_child(clause);
        }
        Ok(node)
    }

    /// INSERT INTO name (columns) VALUES (...) [, (...)]*
    fn parse_insert(&mut self) -> Result<Node, ParseError> {
        self.consume(TokenKind::Into)?;
        let mut node = Node::new(NodeKind::Insert);
        node.add_child(self.parse_identifier()?);
        node.add_child(self.parse_column_list()?);
        self.consume(TokenKind::Values)?;
        node.add_child(self.parse_value_list()?);
        while self.tokenizer.is(TokenKind::Comma) {
            self.tokenizer.advance();
            node.add_child(self.parse_value_list()?);
        }
        Ok(node)
    }

    fn parse_identifier(&mut self) -> Result<Node, ParseError> {
        self.expect(TokenKind::Identifier)?;
        let node = Node::with_text(NodeKind::Identifier, self.tokenizer.text());
        self.tokenizer.advance();
        Ok(node)
    }

    /// One identifier (name), optionally followed by a second one (type).
    fn parse_column_def(&mut self) -> Result<Node, ParseError> {
        let mut node = Node::new(NodeKind::ColumnDef);
        node.add_child(self.parse_identifier()?);
        if self.tokenizer.is(TokenKind::Identifier) {
            node.add_child(self.parse_identifier()?);
        }
        Ok(node)
    }

    /// `( columnDef (, columnDef)* )`, at least one column, no trailing
    /// comma.
    fn parse_column_list(&mut self) -> Result<Node, ParseError> {
        self.consume(TokenKind::LeftParen)?;
        let mut node = Node::new(NodeKind::ColumnList);
        node.add_child(self.parse_column_def()?);
        while self.tokenizer.is(TokenKind::Comma) {
            self.tokenizer.advance();
            node.add_child(self.parse_column_def()?);
        }
        self.consume(TokenKind::RightParen)?;
        Ok(node)
    }

    /// Operand, optionally compared against a full expression. The
    /// right-hand side recurses, so comparison chains nest to the right.
    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let operand = match self.tokenizer.kind() {
            TokenKind::Identifier => {
                Node::with_text(NodeKind::Identifier, self.tokenizer.text())
            }
            TokenKind::StringLiteral | TokenKind::NumericLiteral => {
                Node::with_text(NodeKind::Literal, self.tokenizer.text())
            }
            _ => return Err(self.expected_operand()),
        };
        self.tokenizer.advance();

        if self.tokenizer.kind().is_comparison() {
            let mut op = Node::with_text(NodeKind::Operator, self.tokenizer.text());
            self.tokenizer.advance();
            op.add_child(operand);
            op.add_child(self.parse_expression()?);
            return Ok(op);
        }
        Ok(operand)
    }

    fn parse_where_clause(&mut self) -> Result<Option<Node>, ParseError> {
        if !self.tokenizer.is(TokenKind::Where) {
            return Ok(None);
        }
        self.tokenizer.advance();
        let mut node = Node::new(NodeKind::WhereClause);
        node.add_child(self.parse_expression()?);
        Ok(Some(node))
    }

    /// `( expression (, expression)* )`, at least one value.
    fn parse_value_list(&mut self) -> Result<Node, ParseError> {
        self.consume(TokenKind::LeftParen)?;
        if self.tokenizer.is(TokenKind::RightParen) {
            return Err(self.expected_expression());
        }
        let mut node = Node::new(NodeKind::ValueList);
        node.add_child(self.parse_expression()?);
        while self.tokenizer.is(TokenKind::Comma) {
            self.tokenizer.advance();
            node.add_child(self.parse_expression()?);
        }
        self.consume(TokenKind::RightParen)?;
        Ok(node)
    }

    fn expect(&self, kind: TokenKind) -> Result<(), ParseError> {
        if self.tokenizer.is(kind) {
            Ok(())
        } else {
            Err(ParseError::MissingExpectedToken {
                expected: kind.name(),
                found: self.tokenizer.text().to_string(),
            })
        }
    }

    fn consume(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        self.expect(kind)?;
        self.tokenizer.advance();
        Ok(())
    }

    fn unexpected_token(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.tokenizer.text().to_string(),
        }
    }

    fn expected_operand(&self) -> ParseError {
        ParseError::ExpectedOperand {
            found: self.tokenizer.text().to_string(),
        }
    }

    fn expected_expression(&self) -> ParseError {
        ParseError::ExpectedExpression {
            found: self.tokenizer.text().to_string(),
        }
    }
}

/// Parse one statement with a fresh tokenizer/parser pair.
pub fn parse_sql(input: &str) -> Result<Node, ParseError> {
    let mut parser = Parser::new(Tokenizer::new(input));
    parser.parse()
}
