//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Precedence-climbing parser that converts a token list into an expression tree.
//! CONTEXT: Second stage of the pipeline. Operators are lowered to calls of fixed
//! function names and cell references to GET_CELL / GET_RANGE calls, so the tree only
//! has literals, calls and blocks.
//!
//! GRAMMAR (lowest to highest precedence):
//!   sequence       --> concatenation ( "," concatenation )*         // 2+ items: Block
//!   concatenation  --> equality ( "&" equality )*
//!   equality       --> relation ( ("=" | "==" | "!=" | "<>") relation )?
//!   relation       --> additive ( (">=" | ">" | "<" | "<=") additive )?
//!   additive       --> term ( ("+" | "-") term )*
//!   term           --> unary ( ("*" | "/") unary )*
//!   unary          --> ("+" | "-")? factor                          // ABS / NEGATE
//!   factor         --> NUMBER | STRING | call | "(" sequence ")" | CELL CELL?
//!   call           --> NAME ( "(" ( concatenation ( "," concatenation )* )? ")" )?

use crate::ast::Expression;
use crate::error::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};
use log::debug;

/// Longest accepted cell index, in digits.
pub const MAX_CELL_DIGITS: usize = 9;

/// Deepest accepted nesting of brackets and argument lists.
pub const MAX_NESTING_DEPTH: usize = 64;

/// One binary precedence level.
struct Level {
    /// Each operator with the function it is lowered to.
    operators: &'static [(TokenKind, &'static str)],
    /// Non-chaining levels apply their operator at most once (`1 < 2 < 3` is an error).
    chaining: bool,
}

impl Level {
    fn function_for(&self, kind: TokenKind) -> Option<&'static str> {
        self.operators
            .iter()
            .find(|(op, _)| *op == kind)
            .map(|(_, name)| *name)
    }
}

/// Binary levels from lowest to highest precedence; unary/factor sit below the last one.
const LEVELS: [Level; 5] = [
    Level {
        operators: &[(TokenKind::Ampersand, "CONCAT")],
        chaining: true,
    },
    Level {
        operators: &[(TokenKind::Equal, "EQUAL"), (TokenKind::NotEqual, "NOT_EQUAL")],
        chaining: false,
    },
    Level {
        operators: &[
            (TokenKind::GreaterEq, "GREATER_EQUAL"),
            (TokenKind::GreaterT, "GREATER_THAN"),
            (TokenKind::LessT, "LESS_THAN"),
            (TokenKind::LessEq, "LESS_EQUAL"),
        ],
        chaining: false,
    },
    Level {
        operators: &[(TokenKind::Plus, "ADD"), (TokenKind::Minus, "SUBTRACT")],
        chaining: true,
    },
    Level {
        operators: &[(TokenKind::Star, "MULTIPLY"), (TokenKind::Slash, "DIVIDE")],
        chaining: true,
    },
];

/// Tokens that can start a factor.
const FACTOR_START: &[TokenKind] = &[
    TokenKind::Number,
    TokenKind::String,
    TokenKind::Name,
    TokenKind::Cell,
    TokenKind::BracketL,
];

/// Name of the function a binary operator is lowered to.
pub fn operator_function(kind: TokenKind) -> Option<&'static str> {
    LEVELS.iter().find_map(|level| level.function_for(kind))
}

/// Single-pass cursor over a token list.
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parses the whole token list. An empty list yields `None`.
    pub fn parse(&mut self) -> ParseResult<Option<Expression>> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let expr = self.parse_sequence()?;

        if let Some(token) = self.peek() {
            return Err(ParseError::TrailingTokens {
                offset: token.offset,
                found: token.kind,
            });
        }

        Ok(Some(expr))
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Kind of the current token, EOF past the end.
    fn current_kind(&self) -> TokenKind {
        self.peek().map_or(TokenKind::EOF, |t| t.kind)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Consumes the current token if it has the expected kind.
    fn expect(&mut self, expected: TokenKind) -> ParseResult<()> {
        let found = self.current_kind();
        if found == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken { expected, found })
        }
    }

    /// Opens one nesting level; the caller closes it.
    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// A statement or bracket interior: one expression, or a Block for several.
    fn parse_sequence(&mut self) -> ParseResult<Expression> {
        if self.current_kind() == TokenKind::Comma {
            return Err(ParseError::EmptyBeforeComma);
        }

        let first = self.parse_binary(0)?;
        if self.current_kind() != TokenKind::Comma {
            return Ok(first);
        }

        let mut body = vec![first];
        while self.current_kind() == TokenKind::Comma {
            self.advance();
            if !self.starts_operand() {
                return Err(ParseError::EmptyAfterComma);
            }
            body.push(self.parse_binary(0)?);
        }

        Ok(Expression::Block(body))
    }

    /// Parses binary level `level`, falling through to unary below the last level.
    fn parse_binary(&mut self, level: usize) -> ParseResult<Expression> {
        let Some(tier) = LEVELS.get(level) else {
            return self.parse_unary();
        };

        let mut left = self.parse_binary(level + 1)?;

        while let Some(name) = tier.function_for(self.current_kind()) {
            let operator = self.current_kind();
            self.advance();

            if !self.starts_operand() {
                return Err(ParseError::MissingRightOperand { operator });
            }
            let right = self.parse_binary(level + 1)?;
            left = Expression::call(name, vec![left, right]);

            if !tier.chaining {
                break;
            }
        }

        Ok(left)
    }

    fn starts_operand(&self) -> bool {
        let kind = self.current_kind();
        kind.is_any(FACTOR_START) || kind.is_any(&[TokenKind::Plus, TokenKind::Minus])
    }

    /// A leading sign applies to a single factor: `-x` is NEGATE(x), `+x` is ABS(x).
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let operator = self.current_kind();
        if !operator.is_any(&[TokenKind::Plus, TokenKind::Minus]) {
            return self.parse_factor();
        }

        self.advance();
        let found = self.current_kind();
        if !found.is_any(FACTOR_START) {
            return Err(ParseError::MissingUnaryOperand { operator, found });
        }

        let factor = self.parse_factor()?;
        let name = if operator == TokenKind::Minus {
            "NEGATE"
        } else {
            "ABS"
        };
        Ok(Expression::call(name, vec![factor]))
    }

    fn parse_factor(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.peek() else {
            return Err(ParseError::ExpectedExpression {
                found: TokenKind::EOF,
            });
        };

        match token.kind {
            TokenKind::Number => {
                self.advance();
                let n = token
                    .value
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| ParseError::InvalidNumber(token.value.clone()))?;
                Ok(Expression::number(n))
            }

            TokenKind::String => {
                self.advance();
                Ok(Expression::string(token.value.clone()))
            }

            TokenKind::Name => {
                self.advance();
                if self.current_kind() == TokenKind::BracketL {
                    self.enter()?;
                    let args = self.parse_arguments(&token.value);
                    self.depth -= 1;
                    Ok(Expression::call(token.value.clone(), args?))
                } else {
                    Ok(Expression::call(token.value.clone(), Vec::new()))
                }
            }

            TokenKind::BracketL => {
                self.advance();
                if self.current_kind() == TokenKind::BracketR {
                    return Err(ParseError::EmptyGroup);
                }
                self.enter()?;
                let expr = self.parse_sequence();
                self.depth -= 1;
                let expr = expr?;
                self.expect(TokenKind::BracketR)?;
                Ok(expr)
            }

            TokenKind::Cell => {
                self.advance();
                let begin = cell_address(&token.value)?;

                // Two adjacent cell tokens form a range: $1:5
                if let Some(next) = self.peek().filter(|t| t.kind == TokenKind::Cell) {
                    self.advance();
                    let end = cell_address(&next.value)?;
                    return Ok(Expression::call(
                        "GET_RANGE",
                        vec![Expression::number(begin as f64), Expression::number(end as f64)],
                    ));
                }

                Ok(Expression::call(
                    "GET_CELL",
                    vec![Expression::number(begin as f64)],
                ))
            }

            found => Err(ParseError::ExpectedExpression { found }),
        }
    }

    /// Parses `( arg, arg, ... )` after a function name.
    fn parse_arguments(&mut self, name: &str) -> ParseResult<Vec<Expression>> {
        self.expect(TokenKind::BracketL)?;

        let mut args = Vec::new();
        if self.current_kind() == TokenKind::BracketR {
            self.advance();
            return Ok(args);
        }

        loop {
            if self
                .current_kind()
                .is_any(&[TokenKind::Comma, TokenKind::BracketR])
            {
                return Err(ParseError::EmptyArgument {
                    name: name.to_string(),
                });
            }
            args.push(self.parse_binary(0)?);

            if self.current_kind() == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(TokenKind::BracketR)?;
        Ok(args)
    }
}

/// Converts the digits of a cell token (sigil already stripped) into an address.
pub fn cell_address(digits: &str) -> ParseResult<u32> {
    if digits.len() > MAX_CELL_DIGITS {
        return Err(ParseError::CellIndexTooLong {
            value: digits.to_string(),
            max: MAX_CELL_DIGITS,
        });
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidCellIndex(digits.to_string()));
    }
    digits
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidCellIndex(digits.to_string()))
}

/// Parses a complete token list.
pub fn parse(tokens: &[Token]) -> ParseResult<Option<Expression>> {
    let result = Parser::new(tokens).parse();
    match &result {
        Ok(Some(expr)) => debug!("PARSER {} token(s) -> {}", tokens.len(), expr),
        Ok(None) => {}
        Err(e) => debug!("PARSER failed: {}", e),
    }
    result
}
