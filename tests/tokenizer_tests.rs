#[cfg(test)]
mod tests {
    use minisql::tokenizer::{TokenKind, Tokenizer, MAX_TOKEN_TEXT};

    fn tokens(input: &str) -> Vec<(TokenKind, String)> {
        let mut tokenizer = Tokenizer::new(input);
        let mut out = Vec::new();
        loop {
            tokenizer.advance();
            out.push((tokenizer.kind(), tokenizer.text().to_string()));
            if tokenizer.is_eof() {
                break;
            }
        }
        out
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokens(input).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn every_keyword_round_trips() {
        let table = [
            ("CREATE", TokenKind::Create),
            ("DROP", TokenKind::Drop),
            ("DELETE", TokenKind::Delete),
            ("TRUNCATE", TokenKind::Truncate),
            ("UPDATE", TokenKind::Update),
            ("ALTER", TokenKind::Alter),
            ("SELECT", TokenKind::Select),
            ("INSERT", TokenKind::Insert),
            ("DATABASE", TokenKind::Database),
            ("TABLE", TokenKind::Table),
            ("FROM", TokenKind::From),
            ("WHERE", TokenKind::Where),
            ("AND", TokenKind::And),
            ("OR", TokenKind::Or),
            ("NOT", TokenKind::Not),
            ("BETWEEN", TokenKind::Between),
            ("LIKE", TokenKind::Like),
            ("IN", TokenKind::In),
            ("IS", TokenKind::Is),
            ("NULL", TokenKind::Null),
            ("INTO", TokenKind::Into),
            ("VALUES", TokenKind::Values),
        ];
        for (text, expected) in table {
            assert_eq!(kinds(text), vec![expected, TokenKind::Eof], "{}", text);
            let lower = text.to_lowercase();
            assert_eq!(kinds(&lower), vec![expected, TokenKind::Eof], "{}", lower);
            let mut mixed = String::new();
            for (i, c) in text.chars().enumerate() {
                if i % 2 == 0 {
                    mixed.extend(c.to_lowercase());
                } else {
                    mixed.push(c);
                }
            }
            assert_eq!(kinds(&mixed), vec![expected, TokenKind::Eof], "{}", mixed);
        }
    }

    #[test]
    fn keyword_needs_a_word_boundary() {
        assert_eq!(kinds("CREATED"), vec![TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(kinds("SELECT_"), vec![TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(kinds("FROM2"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn multi_char_operators_win_over_single() {
        assert_eq!(kinds(">="), vec![TokenKind::GreaterEqual, TokenKind::Eof]);
        assert_eq!(kinds("<="), vec![TokenKind::LessEqual, TokenKind::Eof]);
        assert_eq!(kinds("!="), vec![TokenKind::NotEqual, TokenKind::Eof]);
        assert_eq!(
            kinds("a>=5"),
            vec![
                TokenKind::Identifier,
                TokenKind::GreaterEqual,
                TokenKind::NumericLiteral,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn single_char_tokens() {
        assert_eq!(
            kinds(", ; ( ) + - * /"),
            vec![
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Multiply,
                TokenKind::Divide,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn string_literal_drops_the_quotes() {
        let out = tokens("'hello world'");
        assert_eq!(out[0], (TokenKind::StringLiteral, "hello world".to_string()));
    }

    #[test]
    fn unterminated_string_is_accepted() {
        let out = tokens("'dangling");
        assert_eq!(out[0], (TokenKind::StringLiteral, "dangling".to_string()));
        assert_eq!(out[1].0, TokenKind::Eof);
    }

    #[test]
    fn number_takes_at_most_one_dot() {
        let out = tokens("3.14");
        assert_eq!(out[0], (TokenKind::NumericLiteral, "3.14".to_string()));

        let out = tokens("1.2.3");
        assert_eq!(out[0], (TokenKind::NumericLiteral, "1.2".to_string()));
        assert_eq!(out[1], (TokenKind::Unknown, ".".to_string()));
        assert_eq!(out[2], (TokenKind::NumericLiteral, "3".to_string()));
    }

    #[test]
    fn unrecognized_byte_becomes_unknown() {
        let out = tokens("@");
        assert_eq!(out[0], (TokenKind::Unknown, "@".to_string()));
        assert_eq!(out[1].0, TokenKind::Eof);
    }

    #[test]
    fn long_identifier_is_truncated() {
        let long = "x".repeat(MAX_TOKEN_TEXT + 17);
        let out = tokens(&long);
        assert_eq!(out[0].0, TokenKind::Identifier);
        assert_eq!(out[0].1.len(), MAX_TOKEN_TEXT);
        assert_eq!(out[1].0, TokenKind::Eof);
    }

    #[test]
    fn long_string_is_truncated_but_fully_consumed() {
        let input = format!("'{}' 42", "y".repeat(200));
        let out = tokens(&input);
        assert_eq!(out[0].0, TokenKind::StringLiteral);
        assert_eq!(out[0].1.len(), MAX_TOKEN_TEXT);
        assert_eq!(out[1], (TokenKind::NumericLiteral, "42".to_string()));
    }

    #[test]
    fn current_is_idempotent_until_advance() {
        let mut tokenizer = Tokenizer::new("SELECT 1");
        tokenizer.advance();
        assert_eq!(tokenizer.kind(), TokenKind::Select);
        assert_eq!(tokenizer.kind(), TokenKind::Select);
        assert_eq!(tokenizer.text(), "SELECT");
        tokenizer.advance();
        assert_eq!(tokenizer.kind(), TokenKind::NumericLiteral);
    }

    #[test]
    fn exhausted_stream_keeps_yielding_eof() {
        let mut tokenizer = Tokenizer::new("  ");
        tokenizer.advance();
        assert!(tokenizer.is_eof());
        tokenizer.advance();
        assert!(tokenizer.is_eof());
        assert_eq!(tokenizer.text(), "EOF");
    }

    #[test]
    fn full_statement_token_stream() {
        assert_eq!(
            kinds("INSERT INTO users (id) VALUES (1);"),
            vec![
                TokenKind::Insert,
                TokenKind::Into,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::Values,
                TokenKind::LeftParen,
                TokenKind::NumericLiteral,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }
}
