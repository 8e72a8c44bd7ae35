use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input).map(|token| token.kind).collect()
}

#[test]
fn test_basic_tokens() {
    let input = "var x : int := 5;";
    let mut lexer = Lexer::new(input);

    assert_eq!(lexer.next_token().kind, TokenKind::KeywordVar);
    assert_eq!(lexer.next_token().kind, TokenKind::Ident("x".to_string()));
    assert_eq!(lexer.next_token().kind, TokenKind::Colon);
    assert_eq!(lexer.next_token().kind, TokenKind::IntType);
    assert_eq!(lexer.next_token().kind, TokenKind::Assign);
    assert_eq!(lexer.next_token().kind, TokenKind::IntLiteral(5));
    assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    lexer.next_token();
    for _ in 0..3 {
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}

#[test]
fn test_all_operators_and_keywords() {
    assert_eq!(
        kinds("+ - * / < = & ! := .. ( ) ; : var for end in do read print assert string bool"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::Less,
            TokenKind::Equal,
            TokenKind::And,
            TokenKind::Not,
            TokenKind::Assign,
            TokenKind::Range,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::KeywordVar,
            TokenKind::KeywordFor,
            TokenKind::KeywordEnd,
            TokenKind::KeywordIn,
            TokenKind::KeywordDo,
            TokenKind::KeywordRead,
            TokenKind::KeywordPrint,
            TokenKind::KeywordAssert,
            TokenKind::StringType,
            TokenKind::BoolType,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("variable for_each integer"),
        vec![
            TokenKind::Ident("variable".to_string()),
            TokenKind::Ident("for_each".to_string()),
            TokenKind::Ident("integer".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_integer_positions() {
    let tokens: Vec<Token> = Lexer::new("  42\n\t 7 0").collect();

    assert_eq!(tokens[0], Token::new(TokenKind::IntLiteral(42), Position::new(1, 3)));
    assert_eq!(tokens[1], Token::new(TokenKind::IntLiteral(7), Position::new(2, 3)));
    assert_eq!(tokens[2], Token::new(TokenKind::IntLiteral(0), Position::new(2, 5)));
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_leading_zero_is_error() {
    let mut lexer = Lexer::new("0123;");
    let token = lexer.next_token();
    assert!(matches!(&token.kind, TokenKind::Error(msg) if msg.contains("leading zero")));
    assert_eq!(token.position, Position::new(1, 1));
    assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
}

#[test]
fn test_integer_out_of_range() {
    let mut lexer = Lexer::new("99999999999999999999");
    assert!(matches!(lexer.next_token().kind, TokenKind::Error(msg) if msg.contains("out of range")));
}

#[test]
fn test_string_token() {
    let mut lexer = Lexer::new(r#""hello\nworld \"quoted\" \\ \t""#);
    assert_eq!(
        lexer.next_token().kind,
        TokenKind::StringLiteral("hello\nworld \"quoted\" \\ \t".to_string())
    );
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_unterminated_string_at_end_of_line() {
    let tokens: Vec<Token> = Lexer::new("print \"abc\nprint 1;").collect();

    assert!(matches!(&tokens[1].kind, TokenKind::Error(msg) if msg.contains("unterminated string")));
    assert_eq!(tokens[1].position, Position::new(1, 7));
    assert_eq!(tokens[2].kind, TokenKind::KeywordPrint);
    assert_eq!(tokens[2].position, Position::new(2, 1));
}

#[test]
fn test_unterminated_string_at_end_of_input() {
    let tokens = kinds("\"abc\\\"");
    assert!(matches!(&tokens[0], TokenKind::Error(msg) if msg.contains("unterminated string")));
    assert_eq!(tokens[1], TokenKind::Eof);
}

#[test]
fn test_comments_are_skipped() {
    let input = "// line comment\n/* block\n comment */ print /* inline */ 1; // trailing";
    let tokens: Vec<Token> = Lexer::new(input).collect();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0], Token::new(TokenKind::KeywordPrint, Position::new(3, 13)));
    assert_eq!(tokens[1].kind, TokenKind::IntLiteral(1));
    assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_only_whitespace_and_comments_is_single_eof() {
    assert_eq!(kinds("  \n\t// nothing\n/* here */  "), vec![TokenKind::Eof]);
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_block_comments_do_not_nest() {
    assert_eq!(
        kinds("/* outer /* inner */ print"),
        vec![TokenKind::KeywordPrint, TokenKind::Eof]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let tokens: Vec<Token> = Lexer::new("print 1;\n  /* never closed\n print 2;").collect();

    assert_eq!(tokens.len(), 5);
    assert!(matches!(&tokens[3].kind, TokenKind::Error(msg) if msg.contains("unterminated block comment")));
    assert_eq!(tokens[3].position, Position::new(2, 3));
    assert_eq!(tokens[4].kind, TokenKind::Eof);
}

#[test]
fn test_error_recovery() {
    let input = "var @ x . y";
    let mut lexer = Lexer::new(input);

    assert_eq!(lexer.next_token().kind, TokenKind::KeywordVar);
    let bad = lexer.next_token();
    assert_eq!(bad.kind, TokenKind::Error("unrecognized character '@'".to_string()));
    assert_eq!(bad.position, Position::new(1, 5));
    assert_eq!(lexer.next_token().kind, TokenKind::Ident("x".to_string()));
    assert!(matches!(lexer.next_token().kind, TokenKind::Error(_)));
    assert_eq!(lexer.next_token().kind, TokenKind::Ident("y".to_string()));
}

#[test]
fn test_range_between_integers() {
    assert_eq!(
        kinds("1..n"),
        vec![
            TokenKind::IntLiteral(1),
            TokenKind::Range,
            TokenKind::Ident("n".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_columns_count_characters() {
    let tokens: Vec<Token> = Lexer::new("\"äö\" x").collect();
    assert_eq!(tokens[1].position, Position::new(1, 6));
}
