use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::query::lexer::{tokenize, Token, TokenKind};
use std::fmt;

/// Parsed query representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub root: QueryNode,
}

/// Query AST node.
///
/// Chains of the same operator are flattened into one n-ary node, so tree
/// depth grows only with parenthesis nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    /// Lower-cased query word, normalized at evaluation time
    Term(String),
    /// Set intersection (implicit, whitespace); at least two operands
    And(Vec<QueryNode>),
    /// Set union (`|`); at least two operands
    Or(Vec<QueryNode>),
    /// Parenthesized sub-expression
    Group(Box<QueryNode>),
}

impl QueryNode {
    /// Indented tree rendering, one node per line
    pub fn tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            QueryNode::Term(word) => out.push_str(&format!("{indent}Term({word})\n")),
            QueryNode::And(operands) | QueryNode::Or(operands) => {
                let label = if matches!(self, QueryNode::And(_)) { "And" } else { "Or" };
                out.push_str(&format!("{indent}{label}\n"));
                for operand in operands {
                    operand.write_tree(out, depth + 1);
                }
            }
            QueryNode::Group(inner) => {
                out.push_str(&format!("{indent}Group\n"));
                inner.write_tree(out, depth + 1);
            }
        }
    }

    /// Wrap `operands` in `make` unless there is only one
    fn chain(mut operands: Vec<QueryNode>, make: fn(Vec<QueryNode>) -> QueryNode) -> QueryNode {
        if operands.len() == 1 {
            operands.swap_remove(0)
        } else {
            make(operands)
        }
    }
}

/// Canonical query text; parsing it again yields the same tree
impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Term(word) => write!(f, "{}", word),
            QueryNode::And(operands) | QueryNode::Or(operands) => {
                let separator = if matches!(self, QueryNode::And(_)) { " " } else { " | " };
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    write!(f, "{}", operand)?;
                }
                Ok(())
            }
            QueryNode::Group(inner) => write!(f, "({})", inner),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}

/// Parse a query string into a Query structure
pub fn parse_query(input: &str) -> Result<Query, SyntaxError> {
    parse_query_with_limit(input, DEFAULT_MAX_NESTING_DEPTH)
}

/// Parse a query, rejecting parentheses nested deeper than `max_depth`
pub fn parse_query_with_limit(input: &str, max_depth: usize) -> Result<Query, SyntaxError> {
    QueryParser::new(tokenize(input), max_depth).parse()
}

/// Recursive-descent parser over the token stream.
///
/// ```text
/// Query := Or End
/// Or    := And ('|' And)*      (n-ary)
/// And   := Atom (Space Atom)*  (n-ary)
/// Atom  := '(' Or ')' | Word
/// ```
struct QueryParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl QueryParser {
    fn new(tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn parse(&mut self) -> Result<Query, SyntaxError> {
        if self.peek().kind == TokenKind::End {
            return Err(SyntaxError::new(SyntaxErrorKind::EmptyQuery, 0));
        }

        let root = self.parse_or()?;

        let next = self.peek();
        match next.kind {
            TokenKind::End => Ok(Query { root }),
            TokenKind::RParen => Err(SyntaxError::new(
                SyntaxErrorKind::UnmatchedCloseParen,
                next.offset,
            )),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_or(&mut self) -> Result<QueryNode, SyntaxError> {
        let mut operands = vec![self.parse_and()?];

        while self.consume(&TokenKind::Pipe) {
            operands.push(self.parse_and()?);
        }

        Ok(QueryNode::chain(operands, QueryNode::Or))
    }

    fn parse_and(&mut self) -> Result<QueryNode, SyntaxError> {
        let mut operands = vec![self.parse_atom()?];

        while self.consume(&TokenKind::Space) {
            operands.push(self.parse_atom()?);
        }

        Ok(QueryNode::chain(operands, QueryNode::And))
    }

    fn parse_atom(&mut self) -> Result<QueryNode, SyntaxError> {
        let token = self.advance();

        match token.kind {
            TokenKind::Word(word) => Ok(QueryNode::Term(word)),
            TokenKind::LParen => self.parse_group(token.offset),
            TokenKind::End => Err(SyntaxError::new(SyntaxErrorKind::UnexpectedEnd, token.offset)),
            TokenKind::RParen if self.depth == 0 => Err(SyntaxError::new(
                SyntaxErrorKind::UnmatchedCloseParen,
                token.offset,
            )),
            other => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken(other.to_string()),
                token.offset,
            )),
        }
    }

    /// Parse the inside of a group whose `(` sits at `open_offset`
    fn parse_group(&mut self, open_offset: usize) -> Result<QueryNode, SyntaxError> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::new(
                SyntaxErrorKind::NestingTooDeep(self.max_depth),
                open_offset,
            ));
        }

        self.depth += 1;
        let inner = self.parse_or()?;
        self.depth -= 1;

        if self.consume(&TokenKind::RParen) {
            return Ok(QueryNode::Group(Box::new(inner)));
        }

        if self.peek().kind == TokenKind::End {
            Err(SyntaxError::new(SyntaxErrorKind::UnmatchedOpenParen, open_offset))
        } else {
            Err(self.unexpected())
        }
    }

    fn peek(&self) -> &Token {
        // tokenize() always appends End, and advance() never moves past it
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn consume(&mut self, expected: &TokenKind) -> bool {
        if &self.peek().kind == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> SyntaxError {
        let token = self.peek();
        SyntaxError::new(
            SyntaxErrorKind::UnexpectedToken(token.kind.to_string()),
            token.offset,
        )
    }
}
