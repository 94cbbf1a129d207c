pub mod executor;
pub mod lexer;
pub mod parser;

pub use executor::{evaluate, evaluate_batch, MatchSet, QueryExecutor};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse_query, parse_query_with_limit, Query, QueryNode};
