//! Query tokenizer.
//!
//! Scans the query once, lower-casing word fragments and emitting the
//! special characters `(`, `)`, `|` as their own tokens. Whitespace becomes
//! a single [`TokenKind::Space`] (the AND operator) only where it separates
//! two operands; elsewhere it is dropped. The stream always ends with
//! [`TokenKind::End`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Lower-cased word fragment, never empty
    Word(String),
    /// Implicit AND between two operands
    Space,
    LParen,
    RParen,
    Pipe,
    /// End-of-stream sentinel
    End,
}

impl TokenKind {
    /// True for tokens that can end an operand (`word` or `)`)
    fn ends_operand(&self) -> bool {
        matches!(self, TokenKind::Word(_) | TokenKind::RParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(word) => write!(f, "word `{}`", word),
            TokenKind::Space => write!(f, "whitespace"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Pipe => write!(f, "`|`"),
            TokenKind::End => write!(f, "end of query"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset of the token's first character
    pub offset: usize,
}

impl Token {
    fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Split a query into tokens
pub fn tokenize(query: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(query);
    for (char_offset, (byte_offset, ch)) in query.char_indices().enumerate() {
        lexer.push(byte_offset, char_offset, ch);
    }
    lexer.finish(query.chars().count())
}

struct Lexer<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    /// (byte offset, char offset) where the pending word began
    word_start: Option<(usize, usize)>,
    /// Offset of whitespace seen after an operand, not yet emitted
    pending_space: Option<usize>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: Vec::new(),
            word_start: None,
            pending_space: None,
        }
    }

    fn push(&mut self, byte_offset: usize, char_offset: usize, ch: char) {
        match ch {
            '(' => {
                self.flush_word(byte_offset);
                self.begin_operand();
                self.tokens.push(Token::new(TokenKind::LParen, char_offset));
            }
            ')' | '|' => {
                self.flush_word(byte_offset);
                self.pending_space = None;
                let kind = if ch == ')' { TokenKind::RParen } else { TokenKind::Pipe };
                self.tokens.push(Token::new(kind, char_offset));
            }
            ch if ch.is_whitespace() => {
                self.flush_word(byte_offset);
                let after_operand = self.tokens.last().is_some_and(|t| t.kind.ends_operand());
                if after_operand && self.pending_space.is_none() {
                    self.pending_space = Some(char_offset);
                }
            }
            _ => {
                if self.word_start.is_none() {
                    self.begin_operand();
                    self.word_start = Some((byte_offset, char_offset));
                }
            }
        }
    }

    /// An operand starts here: whitespace since the previous operand is an AND
    fn begin_operand(&mut self) {
        if let Some(offset) = self.pending_space.take() {
            self.tokens.push(Token::new(TokenKind::Space, offset));
        }
    }

    fn flush_word(&mut self, end: usize) {
        if let Some((start, offset)) = self.word_start.take() {
            let word = self.input[start..end].to_lowercase();
            self.tokens.push(Token::new(TokenKind::Word(word), offset));
        }
    }

    fn finish(mut self, char_len: usize) -> Vec<Token> {
        self.flush_word(self.input.len());
        self.tokens.push(Token::new(TokenKind::End, char_len));
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(query: &str) -> Vec<TokenKind> {
        tokenize(query).into_iter().map(|t| t.kind).collect()
    }

    fn word(w: &str) -> TokenKind {
        TokenKind::Word(w.to_string())
    }

    #[test]
    fn test_single_word() {
        assert_eq!(kinds("Cat"), vec![word("cat"), TokenKind::End]);
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(kinds(""), vec![TokenKind::End]);
        assert_eq!(kinds("   "), vec![TokenKind::End]);
    }

    #[test]
    fn test_implicit_and() {
        assert_eq!(
            kinds("cat dog"),
            vec![word("cat"), TokenKind::Space, word("dog"), TokenKind::End]
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            kinds("  cat \t  dog  "),
            vec![word("cat"), TokenKind::Space, word("dog"), TokenKind::End]
        );
    }

    #[test]
    fn test_any_unicode_whitespace_separates() {
        let expected = vec![word("cat"), TokenKind::Space, word("dog"), TokenKind::End];
        assert_eq!(kinds("cat\tdog"), expected);
        assert_eq!(kinds("cat\u{a0}dog"), expected);
    }

    #[test]
    fn test_pipe_with_and_without_spaces() {
        let expected = vec![word("cat"), TokenKind::Pipe, word("dog"), TokenKind::End];
        assert_eq!(kinds("cat|dog"), expected);
        assert_eq!(kinds("cat | dog"), expected);
        assert_eq!(kinds("cat |dog"), expected);
    }

    #[test]
    fn test_parens() {
        assert_eq!(
            kinds("a (b | c)"),
            vec![
                word("a"),
                TokenKind::Space,
                TokenKind::LParen,
                word("b"),
                TokenKind::Pipe,
                word("c"),
                TokenKind::RParen,
                TokenKind::End,
            ]
        );
        assert_eq!(
            kinds("( a ) b"),
            vec![
                TokenKind::LParen,
                word("a"),
                TokenKind::RParen,
                TokenKind::Space,
                word("b"),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_adjacent_operands_get_no_space() {
        assert_eq!(
            kinds("a(b)"),
            vec![word("a"), TokenKind::LParen, word("b"), TokenKind::RParen, TokenKind::End]
        );
    }

    #[test]
    fn test_lowercases_unicode() {
        assert_eq!(kinds("КОШКА"), vec![word("кошка"), TokenKind::End]);
    }

    #[test]
    fn test_offsets_are_char_based() {
        let tokens = tokenize("кот | (пёс)");
        let offsets: Vec<_> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 4, 6, 7, 10, 11]);
    }

    #[test]
    fn test_no_empty_words() {
        for query in ["((a))", "a||b", " | ", "()"] {
            assert!(
                tokenize(query)
                    .iter()
                    .all(|t| !matches!(&t.kind, TokenKind::Word(w) if w.is_empty())),
                "query {query:?}"
            );
        }
    }
}
