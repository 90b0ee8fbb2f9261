//! FILENAME: core/parser/src/tests.rs
//! PURPOSE: Consolidated unit tests for the parser crate.

use crate::ast::{Expression, Literal};
use crate::error::{LexError, ParseError};
use crate::lexer::{tokenize, Lexer, TokenizeStatus};
use crate::parser::{operator_function, parse, MAX_NESTING_DEPTH};
use crate::token::{Token, TokenKind};

fn lex(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let status = tokenize(input, &mut tokens).unwrap();
    assert_eq!(status, TokenizeStatus::Ok, "input left open scopes: {}", input);
    tokens
}

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).into_iter().map(|t| t.kind).collect()
}

fn parse_str(input: &str) -> Result<Option<Expression>, ParseError> {
    parse(&lex(input))
}

fn inspect(input: &str) -> String {
    parse_str(input).unwrap().unwrap().inspect()
}

// ========================================
// TOKENIZER TESTS
// ========================================

#[test]
fn lexer_tokenizes_simple_math() {
    assert_eq!(
        kinds("1 + 2 * 3"),
        vec![
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::Number
        ]
    );
}

#[test]
fn lexer_records_offsets_and_values() {
    let tokens = lex("SUM( 12.5 ,$3)");
    assert_eq!(tokens[0], Token::new(TokenKind::Name, Some("SUM".into()), 0));
    assert_eq!(tokens[1], Token::of_kind(TokenKind::BracketL, 3));
    assert_eq!(tokens[1].value, "(");
    assert_eq!(tokens[2], Token::new(TokenKind::Number, Some("12.5".into()), 5));
    assert_eq!(tokens[3].kind, TokenKind::Comma);
    assert_eq!(tokens[4], Token::new(TokenKind::Cell, Some("3".into()), 11));
    assert_eq!(tokens[5].offset, 13);
}

#[test]
fn lexer_tokenizes_comparison_operators() {
    assert_eq!(
        kinds("< > <= >= <> != = =="),
        vec![
            TokenKind::LessT,
            TokenKind::GreaterT,
            TokenKind::LessEq,
            TokenKind::GreaterEq,
            TokenKind::NotEqual,
            TokenKind::NotEqual,
            TokenKind::Equal,
            TokenKind::Equal
        ]
    );
}

#[test]
fn lexer_keeps_numbers_whole() {
    let tokens = lex("1.5e-3 .25 42");
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["1.5e-3", ".25", "42"]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn lexer_names_allow_underscore_and_at() {
    let tokens = lex("_tmp @x GET_CELL2");
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Name));
    assert_eq!(tokens[2].value, "GET_CELL2");
}

#[test]
fn lexer_unescapes_strings() {
    let tokens = lex(r#""a""b" 'it''s' `x"y`"#);
    assert_eq!(tokens[0].value, r#"a"b"#);
    assert_eq!(tokens[1].value, "it's");
    assert_eq!(tokens[2].value, r#"x"y"#);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::String));
}

#[test]
fn lexer_strips_cell_sigils() {
    let tokens = lex("$10:20");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::new(TokenKind::Cell, Some("10".into()), 0));
    assert_eq!(tokens[1], Token::new(TokenKind::Cell, Some("20".into()), 3));
}

#[test]
fn lexer_skips_comments() {
    assert_eq!(kinds("1 # + 2"), vec![TokenKind::Number]);
    assert!(lex("   # only a comment").is_empty());
}

#[test]
fn lexer_rejects_unknown_character() {
    let mut tokens = Vec::new();
    let err = tokenize("1 + ?", &mut tokens).unwrap_err();
    assert_eq!(err, LexError::UnexpectedCharacter { offset: 4 });
    assert!(tokens.is_empty());
}

#[test]
fn lexer_rejects_unterminated_string() {
    let mut tokens = Vec::new();
    let err = tokenize("\"abc", &mut tokens).unwrap_err();
    assert_eq!(err, LexError::UnexpectedCharacter { offset: 0 });
}

#[test]
fn lexer_needs_more_until_bracket_closes() {
    let mut tokens = Vec::new();
    assert_eq!(
        tokenize("FOO(1, 2", &mut tokens).unwrap(),
        TokenizeStatus::NeedsMore
    );
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokenize(")", &mut tokens).unwrap(), TokenizeStatus::Ok);
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[5].offset, 0);
}

#[test]
fn lexer_unbalanced_close_clears_tokens() {
    let mut tokens = lex("1 + 2");
    let err = tokenize(")", &mut tokens).unwrap_err();
    assert_eq!(err, LexError::UnbalancedCloseBracket { offset: 0 });
    assert!(tokens.is_empty());
}

#[test]
fn lexer_error_mid_statement_clears_carry() {
    let mut lexer = Lexer::new();
    assert_eq!(lexer.feed("ADD(1,").unwrap(), TokenizeStatus::NeedsMore);
    assert!(lexer.is_continuing());
    assert!(lexer.feed("2 ~").is_err());
    assert!(lexer.tokens().is_empty());
    assert!(!lexer.is_continuing());
}

#[test]
fn stateful_lexer_hands_over_statement() {
    let mut lexer = Lexer::new();
    assert_eq!(lexer.feed("(1,").unwrap(), TokenizeStatus::NeedsMore);
    assert_eq!(lexer.feed("2)").unwrap(), TokenizeStatus::Ok);
    let tokens = lexer.take_tokens();
    assert_eq!(tokens.len(), 5);
    assert!(lexer.tokens().is_empty());

    lexer.feed("(").unwrap();
    lexer.reset();
    assert!(!lexer.is_continuing());
}

// ========================================
// PARSER TESTS - LITERALS AND EMPTY INPUT
// ========================================

#[test]
fn parser_empty_input_is_no_result() {
    assert_eq!(parse(&[]), Ok(None));
    assert_eq!(parse_str("# nothing"), Ok(None));
}

#[test]
fn parser_parses_number_literal() {
    assert_eq!(parse_str("42").unwrap(), Some(Expression::number(42.0)));
    assert_eq!(parse_str("3.5E2").unwrap(), Some(Expression::number(350.0)));
}

#[test]
fn parser_rejects_overflowing_number_literal() {
    assert_eq!(
        parse_str("1e400"),
        Err(ParseError::InvalidNumber("1e400".to_string()))
    );
    assert_eq!(
        parse_str("2 * 1E999"),
        Err(ParseError::InvalidNumber("1E999".to_string()))
    );
    // Underflow to zero is still a finite value.
    assert_eq!(parse_str("1e-400").unwrap(), Some(Expression::number(0.0)));
}

#[test]
fn parser_parses_escaped_string_literal() {
    assert_eq!(
        parse_str(r#""a""b""#).unwrap(),
        Some(Expression::Literal(Literal::String(r#"a"b"#.to_string())))
    );
}

// ========================================
// PARSER TESTS - OPERATORS
// ========================================

#[test]
fn parser_respects_precedence() {
    assert_eq!(inspect("1 + 2 * 3"), "ADD(1, MULTIPLY(2, 3))");
    assert_eq!(inspect("(1 + 2) * 3"), "MULTIPLY(ADD(1, 2), 3)");
    assert_eq!(inspect("1 + 2 < 4 & \"x\""), "CONCAT(LESS_THAN(ADD(1, 2), 4), \"x\")");
}

#[test]
fn parser_chains_left_associative_levels() {
    assert_eq!(inspect("1 - 2 - 3"), "SUBTRACT(SUBTRACT(1, 2), 3)");
    assert_eq!(inspect("8 / 4 / 2"), "DIVIDE(DIVIDE(8, 4), 2)");
    assert_eq!(inspect("1 & 2 & 3"), "CONCAT(CONCAT(1, 2), 3)");
}

#[test]
fn parser_maps_every_comparison() {
    assert_eq!(inspect("1 = 2"), "EQUAL(1, 2)");
    assert_eq!(inspect("1 == 2"), "EQUAL(1, 2)");
    assert_eq!(inspect("1 != 2"), "NOT_EQUAL(1, 2)");
    assert_eq!(inspect("1 <> 2"), "NOT_EQUAL(1, 2)");
    assert_eq!(inspect("1 < 2"), "LESS_THAN(1, 2)");
    assert_eq!(inspect("1 <= 2"), "LESS_EQUAL(1, 2)");
    assert_eq!(inspect("1 > 2"), "GREATER_THAN(1, 2)");
    assert_eq!(inspect("1 >= 2"), "GREATER_EQUAL(1, 2)");
}

#[test]
fn parser_equality_binds_looser_than_relation() {
    assert_eq!(inspect("1 < 2 = 2 > 1"), "EQUAL(LESS_THAN(1, 2), GREATER_THAN(2, 1))");
}

#[test]
fn parser_equality_and_relation_do_not_chain() {
    assert!(matches!(
        parse_str("1 = 2 = 3"),
        Err(ParseError::TrailingTokens { found: TokenKind::Equal, .. })
    ));
    assert!(matches!(
        parse_str("1 < 2 < 3"),
        Err(ParseError::TrailingTokens { found: TokenKind::LessT, .. })
    ));
}

#[test]
fn parser_unary_signs() {
    assert_eq!(inspect("-5"), "NEGATE(5)");
    assert_eq!(inspect("+5"), "ABS(5)");
    assert_eq!(inspect("2 * -$1"), "MULTIPLY(2, NEGATE(GET_CELL(1)))");
    assert_eq!(inspect("-(1 + 2)"), "NEGATE(ADD(1, 2))");
}

#[test]
fn parser_rejects_double_sign() {
    assert_eq!(
        parse_str("--5"),
        Err(ParseError::MissingUnaryOperand {
            operator: TokenKind::Minus,
            found: TokenKind::Minus
        })
    );
}

#[test]
fn parser_rejects_missing_right_operand() {
    assert_eq!(
        parse_str("1 +"),
        Err(ParseError::MissingRightOperand {
            operator: TokenKind::Plus
        })
    );
    assert_eq!(
        parse_str("(1 *)"),
        Err(ParseError::MissingRightOperand {
            operator: TokenKind::Star
        })
    );
}

// ========================================
// PARSER TESTS - CALLS, GROUPS AND BLOCKS
// ========================================

#[test]
fn parser_bare_name_is_zero_argument_call() {
    assert_eq!(
        parse_str("pi").unwrap(),
        Some(Expression::call("pi", Vec::new()))
    );
    assert_eq!(inspect("pi()"), "pi()");
}

#[test]
fn parser_parses_function_arguments() {
    assert_eq!(
        parse_str("Foo(1, \"a\" & 2, bar)").unwrap(),
        Some(Expression::call(
            "Foo",
            vec![
                Expression::number(1.0),
                Expression::call(
                    "CONCAT",
                    vec![Expression::string("a"), Expression::number(2.0)]
                ),
                Expression::call("bar", Vec::new()),
            ]
        ))
    );
}

#[test]
fn parser_block_argument_stays_one_argument() {
    assert_eq!(inspect("F((1, 2), 3)"), "F((1, 2), 3)");
}

#[test]
fn parser_rejects_empty_arguments() {
    assert_eq!(
        parse_str("F(1, )"),
        Err(ParseError::EmptyArgument {
            name: "F".to_string()
        })
    );
    assert_eq!(
        parse_str("F(, 1)"),
        Err(ParseError::EmptyArgument {
            name: "F".to_string()
        })
    );
}

#[test]
fn parser_builds_blocks() {
    assert_eq!(
        parse_str("(1, 2, 3)").unwrap(),
        Some(Expression::Block(vec![
            Expression::number(1.0),
            Expression::number(2.0),
            Expression::number(3.0),
        ]))
    );
    assert_eq!(inspect("1, 2"), "(1, 2)");
}

#[test]
fn parser_rejects_malformed_groups() {
    assert_eq!(parse_str("()"), Err(ParseError::EmptyGroup));
    assert_eq!(parse_str("(, 1)"), Err(ParseError::EmptyBeforeComma));
    assert_eq!(parse_str("(1, )"), Err(ParseError::EmptyAfterComma));
}

#[test]
fn parser_rejects_trailing_tokens() {
    let err = parse_str("1 2").unwrap_err();
    assert_eq!(
        err,
        ParseError::TrailingTokens {
            offset: 2,
            found: TokenKind::Number
        }
    );
    assert!(err.to_string().contains("missing bracket?"));
}

#[test]
fn parser_reports_missing_close_bracket() {
    // Hand-built list: the tokenizer would have asked for more input.
    let tokens = vec![
        Token::of_kind(TokenKind::BracketL, 0),
        Token::new(TokenKind::Number, Some("1".into()), 1),
    ];
    assert_eq!(
        parse(&tokens),
        Err(ParseError::UnexpectedToken {
            expected: TokenKind::BracketR,
            found: TokenKind::EOF
        })
    );
}

#[test]
fn parser_limits_bracket_nesting() {
    let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse_str(&nested(MAX_NESTING_DEPTH)).unwrap(), Some(Expression::number(1.0)));
    assert_eq!(
        parse_str(&nested(MAX_NESTING_DEPTH + 1)),
        Err(ParseError::NestingTooDeep {
            max: MAX_NESTING_DEPTH
        })
    );
    assert_eq!(
        parse_str(&nested(100_000)),
        Err(ParseError::NestingTooDeep {
            max: MAX_NESTING_DEPTH
        })
    );
}

#[test]
fn parser_limits_call_nesting() {
    let depth = MAX_NESTING_DEPTH + 1;
    let source = format!("{}1{}", "F(".repeat(depth), ")".repeat(depth));
    assert!(matches!(
        parse_str(&source),
        Err(ParseError::NestingTooDeep { .. })
    ));
    let source = format!("{}1{}", "F(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
    assert!(parse_str(&source).is_ok());
}

#[test]
fn every_binary_operator_maps_to_a_function() {
    let table = [
        (TokenKind::Plus, "ADD"),
        (TokenKind::Minus, "SUBTRACT"),
        (TokenKind::Star, "MULTIPLY"),
        (TokenKind::Slash, "DIVIDE"),
        (TokenKind::GreaterEq, "GREATER_EQUAL"),
        (TokenKind::GreaterT, "GREATER_THAN"),
        (TokenKind::LessT, "LESS_THAN"),
        (TokenKind::LessEq, "LESS_EQUAL"),
        (TokenKind::Equal, "EQUAL"),
        (TokenKind::NotEqual, "NOT_EQUAL"),
        (TokenKind::Ampersand, "CONCAT"),
    ];
    for (kind, name) in table {
        assert_eq!(operator_function(kind), Some(name));
    }
    assert_eq!(operator_function(TokenKind::Comma), None);
    assert_eq!(operator_function(TokenKind::BracketL), None);
}

// ========================================
// PARSER TESTS - CELL REFERENCES
// ========================================

#[test]
fn parser_parses_cell_reference() {
    assert_eq!(
        parse_str("$7").unwrap(),
        Some(Expression::call("GET_CELL", vec![Expression::number(7.0)]))
    );
    assert_eq!(inspect(":7"), "GET_CELL(7)");
}

#[test]
fn parser_parses_range() {
    assert_eq!(inspect("$2:5"), "GET_RANGE(2, 5)");
    assert_eq!(inspect("$9 $3"), "GET_RANGE(9, 3)");
}

#[test]
fn parser_accepts_nine_digit_cell() {
    assert_eq!(inspect("$999999999"), "GET_CELL(999999999)");
}

#[test]
fn parser_rejects_long_cell_index() {
    assert_eq!(
        parse_str("$1234567890"),
        Err(ParseError::CellIndexTooLong {
            value: "1234567890".to_string(),
            max: 9
        })
    );
    assert!(matches!(
        parse_str("$1:0000000001"),
        Err(ParseError::CellIndexTooLong { .. })
    ));
}

// ========================================
// INSPECT
// ========================================

#[test]
fn inspect_quotes_strings_canonically() {
    assert_eq!(inspect("'it''s' & `a\"b`"), r#"CONCAT("it's", "a""b")"#);
}

#[test]
fn inspect_output_reparses_to_same_tree() {
    for source in [
        "1 + 2 * 3",
        "-(4 / 2) & \"x\"\"y\"",
        "AND(1 < 2, NOT(0)), $3:4",
        "0.125 * 1e3 >= 12",
    ] {
        let tree = parse_str(source).unwrap().unwrap();
        let again = parse_str(&tree.inspect()).unwrap().unwrap();
        assert_eq!(tree, again, "round trip of {}", source);
    }
}
