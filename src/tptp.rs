use std::fmt;

use crate::clause::{Clause, ClauseType};
use crate::literal::{Literal, EQUALITY};
use crate::term::Term;

// A reader for the CNF subset of TPTP: a sequence of
// cnf(name, role, ( literal | ... )). inputs with % line comments.
// Infix = and != are sugar for an ordinary equality predicate.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    LowerWord,
    UpperWord,
    OpenParen,
    CloseParen,
    Comma,
    Pipe,
    Tilde,
    Dot,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    text: String,

    // Position of the token, for error reporting. Lines and columns count
    // from one; the full line text is kept so errors can show it.
    line: usize,
    column: usize,
    line_text: String,
}

// An input error, anchored to the place in the text it happened at.
#[derive(Debug)]
pub struct ParseError {
    message: String,
    line: usize,
    column: usize,
    line_text: String,
}

impl ParseError {
    fn at_token(token: &Token, message: &str) -> ParseError {
        ParseError {
            message: message.to_string(),
            line: token.line,
            column: token.column,
            line_text: token.line_text.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {}",
            self.line, self.column, self.message
        )?;
        if !self.line_text.trim().is_empty() {
            write!(f, "\n{}\n", self.line_text)?;
            for _ in 1..self.column {
                write!(f, " ")?;
            }
            write!(f, "^")?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = vec![];
    for (line_index, line_text) in input.lines().enumerate() {
        let mut chars = line_text.char_indices().peekable();
        while let Some(&(start, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            if c == '%' {
                // Comment until the end of the line.
                break;
            }
            let token = |kind: TokenKind, text: &str| Token {
                kind,
                text: text.to_string(),
                line: line_index + 1,
                column: start + 1,
                line_text: line_text.to_string(),
            };
            match c {
                '(' => tokens.push(token(TokenKind::OpenParen, "(")),
                ')' => tokens.push(token(TokenKind::CloseParen, ")")),
                ',' => tokens.push(token(TokenKind::Comma, ",")),
                '|' => tokens.push(token(TokenKind::Pipe, "|")),
                '~' => tokens.push(token(TokenKind::Tilde, "~")),
                '.' => tokens.push(token(TokenKind::Dot, ".")),
                '=' => tokens.push(token(TokenKind::Equal, "=")),
                '!' => {
                    chars.next();
                    match chars.peek() {
                        Some(&(_, '=')) => tokens.push(token(TokenKind::NotEqual, "!=")),
                        _ => {
                            return Err(ParseError {
                                message: "expected '=' after '!'".to_string(),
                                line: line_index + 1,
                                column: start + 1,
                                line_text: line_text.to_string(),
                            })
                        }
                    }
                }
                c if c.is_alphanumeric() || c == '_' => {
                    let mut end = start;
                    while let Some(&(i, c)) = chars.peek() {
                        if c.is_alphanumeric() || c == '_' {
                            end = i + c.len_utf8();
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    let text = &line_text[start..end];
                    let kind = if c.is_uppercase() || c == '_' {
                        TokenKind::UpperWord
                    } else {
                        TokenKind::LowerWord
                    };
                    tokens.push(Token {
                        kind,
                        text: text.to_string(),
                        line: line_index + 1,
                        column: start + 1,
                        line_text: line_text.to_string(),
                    });
                    continue;
                }
                _ => {
                    return Err(ParseError {
                        message: format!("unexpected character '{}'", c),
                        line: line_index + 1,
                        column: start + 1,
                        line_text: line_text.to_string(),
                    })
                }
            }
            chars.next();
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Parser> {
        Ok(Parser {
            tokens: tokenize(input)?,
            position: 0,
        })
    }

    fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.position).map(|token| token.kind)
    }

    fn next_token(&mut self, expected: &str) -> Result<Token> {
        match self.tokens.get(self.position) {
            Some(token) => {
                self.position += 1;
                Ok(token.clone())
            }
            None => Err(self.end_of_input(expected)),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        let token = self.next_token(expected)?;
        if token.kind != kind {
            return Err(ParseError::at_token(
                &token,
                &format!("expected {}, found '{}'", expected, token.text),
            ));
        }
        Ok(token)
    }

    fn end_of_input(&self, expected: &str) -> ParseError {
        match self.tokens.last() {
            Some(token) => ParseError {
                message: format!("expected {} before the end of the input", expected),
                line: token.line,
                column: token.column + token.text.len(),
                line_text: token.line_text.clone(),
            },
            None => ParseError {
                message: format!("expected {} in an empty input", expected),
                line: 1,
                column: 1,
                line_text: String::new(),
            },
        }
    }

    fn parse_term(&mut self) -> Result<Term> {
        let token = self.next_token("a term")?;
        match token.kind {
            TokenKind::UpperWord => Ok(Term::Variable(token.text)),
            TokenKind::LowerWord => {
                if self.peek_kind() != Some(TokenKind::OpenParen) {
                    return Ok(Term::Application(token.text, vec![]));
                }
                self.expect(TokenKind::OpenParen, "'('")?;
                let mut args = vec![self.parse_term()?];
                while self.peek_kind() == Some(TokenKind::Comma) {
                    self.expect(TokenKind::Comma, "','")?;
                    args.push(self.parse_term()?);
                }
                self.expect(TokenKind::CloseParen, "')'")?;
                Ok(Term::Application(token.text, args))
            }
            _ => Err(ParseError::at_token(
                &token,
                &format!("expected a term, found '{}'", token.text),
            )),
        }
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        let mut positive = true;
        while self.peek_kind() == Some(TokenKind::Tilde) {
            self.expect(TokenKind::Tilde, "'~'")?;
            positive = !positive;
        }
        let start = self.position;
        let term = self.parse_term()?;
        match self.peek_kind() {
            Some(TokenKind::Equal) => {
                self.expect(TokenKind::Equal, "'='")?;
                let right = self.parse_term()?;
                Ok(Literal::new(
                    positive,
                    Term::Application(EQUALITY.to_string(), vec![term, right]),
                ))
            }
            Some(TokenKind::NotEqual) => {
                self.expect(TokenKind::NotEqual, "'!='")?;
                let right = self.parse_term()?;
                Ok(Literal::new(
                    !positive,
                    Term::Application(EQUALITY.to_string(), vec![term, right]),
                ))
            }
            _ => {
                if term.is_variable() {
                    return Err(ParseError::at_token(
                        &self.tokens[start],
                        "an atom needs a predicate symbol",
                    ));
                }
                Ok(Literal::new(positive, term))
            }
        }
    }

    fn parse_disjunction(&mut self) -> Result<Vec<Literal>> {
        let mut literals = vec![self.parse_literal()?];
        while self.peek_kind() == Some(TokenKind::Pipe) {
            self.expect(TokenKind::Pipe, "'|'")?;
            literals.push(self.parse_literal()?);
        }
        Ok(literals)
    }

    // A clause body, with or without surrounding parentheses. No atom starts
    // with '(', so a leading parenthesis always means grouping.
    fn parse_formula(&mut self) -> Result<Vec<Literal>> {
        if self.peek_kind() == Some(TokenKind::OpenParen) {
            self.expect(TokenKind::OpenParen, "'('")?;
            let literals = self.parse_disjunction()?;
            self.expect(TokenKind::CloseParen, "')'")?;
            Ok(literals)
        } else {
            self.parse_disjunction()
        }
    }

    fn parse_clause(&mut self) -> Result<Clause> {
        let keyword = self.expect(TokenKind::LowerWord, "'cnf'")?;
        if keyword.text != "cnf" {
            return Err(ParseError::at_token(
                &keyword,
                &format!("expected 'cnf', found '{}'", keyword.text),
            ));
        }
        self.expect(TokenKind::OpenParen, "'('")?;
        let name = self.expect(TokenKind::LowerWord, "a clause name")?;
        self.expect(TokenKind::Comma, "','")?;
        let role = self.expect(TokenKind::LowerWord, "a clause role")?;
        self.expect(TokenKind::Comma, "','")?;
        let literals = self.parse_formula()?;
        self.expect(TokenKind::CloseParen, "')'")?;
        self.expect(TokenKind::Dot, "'.'")?;
        Ok(Clause::new(
            &name.text,
            ClauseType::from_role(&role.text),
            literals,
        ))
    }

    fn expect_end(&mut self, parsed: &str) -> Result<()> {
        if let Some(token) = self.tokens.get(self.position) {
            return Err(ParseError::at_token(
                token,
                &format!("trailing input after {}", parsed),
            ));
        }
        Ok(())
    }
}

// Parses a whole problem: any number of cnf inputs.
pub fn parse_problem(input: &str) -> Result<Vec<Clause>> {
    let mut parser = Parser::new(input)?;
    let mut clauses = vec![];
    while !parser.at_end() {
        clauses.push(parser.parse_clause()?);
    }
    Ok(clauses)
}

pub fn parse_clause(input: &str) -> Result<Clause> {
    let mut parser = Parser::new(input)?;
    let clause = parser.parse_clause()?;
    parser.expect_end("the clause")?;
    Ok(clause)
}

pub fn parse_literal(input: &str) -> Result<Literal> {
    let mut parser = Parser::new(input)?;
    let literal = parser.parse_literal()?;
    parser.expect_end("the literal")?;
    Ok(literal)
}

pub fn parse_term(input: &str) -> Result<Term> {
    let mut parser = Parser::new(input)?;
    let term = parser.parse_term()?;
    parser.expect_end("the term")?;
    Ok(term)
}
