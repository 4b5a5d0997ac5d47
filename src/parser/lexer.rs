//! Lexer (tokenizer) for preprocessed C source
//!
//! Converts source text into a [`TokenStream`] consumed by the parser. Tokens
//! are recognised by trying an ordered table of patterns at every position and
//! committing to the first one that matches, so the table order is the
//! priority order: multi-character operators come before their one-character
//! prefixes and keywords come before the generic identifier pattern.
//!
//! The lexer expects comments and line continuations to have been removed
//! already; a `/` is always the division operator here.

use super::ast::SourceLocation;
use super::token_stream::TokenStream;
use std::fmt;
use thiserror::Error;

/// All token kinds produced by the lexer.
///
/// Type names such as `int` or `void` are plain identifiers; only control-flow
/// keywords and intrinsic names get their own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Stream delimiters
    Eos,
    Bos,

    // Literals
    IntLiteral,
    StringLiteral,
    CharLiteral,

    // Names
    Identifier,
    Intrinsic,

    // Keywords
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    Lt,    // <
    Gt,    // >
    Le,    // <=
    Ge,    // >=
    EqEq,  // ==
    NotEq, // !=

    Assign, // =

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Semicolon, // ;
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Eos => "end of input",
            TokenKind::Bos => "beginning of input",
            TokenKind::IntLiteral => "int literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "char literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Intrinsic => "intrinsic",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Return => "'return'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Le => "'<='",
            TokenKind::Ge => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Assign => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
        };
        f.write_str(text)
    }
}

/// A single token. Literal, identifier and intrinsic tokens carry their text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<String>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Token {
            kind,
            value: None,
            location,
        }
    }

    pub fn with_value(kind: TokenKind, value: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            value: Some(value.into()),
            location,
        }
    }

    /// The captured text, or an empty string for tokens without one.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::StringLiteral, Some(v)) => write!(f, "string literal \"{}\"", v),
            (TokenKind::CharLiteral, Some(v)) => write!(f, "char literal '{}'", v),
            (kind, Some(v)) => write!(f, "{} '{}'", kind, v),
            (kind, None) => write!(f, "{}", kind),
        }
    }
}

/// Lexer error: no pattern in the table matches at `location`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Lexer error at {location}: unexpected character '{found}'")]
pub struct LexError {
    pub found: char,
    pub location: SourceLocation,
}

/// How a table entry recognises its token.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Exact operator or punctuation text
    Exact(&'static str),
    /// Reserved word; must not be followed by an identifier character
    Keyword(&'static str),
    /// `[0-9]+`
    Digits,
    /// `[a-zA-Z_][a-zA-Z0-9_]*`
    Identifier,
    /// Text between two quote characters on one line, backslash escapes allowed
    Quoted(char),
}

impl Pattern {
    /// Length in bytes of the match at the start of `input`, if any.
    fn match_len(self, input: &str) -> Option<usize> {
        match self {
            Pattern::Exact(text) => input.starts_with(text).then_some(text.len()),
            Pattern::Keyword(word) => {
                let after = input.strip_prefix(word)?;
                match after.chars().next() {
                    Some(ch) if is_ident_char(ch) => None,
                    _ => Some(word.len()),
                }
            }
            Pattern::Digits => {
                let len = input
                    .find(|ch: char| !ch.is_ascii_digit())
                    .unwrap_or(input.len());
                (len > 0).then_some(len)
            }
            Pattern::Identifier => {
                let first = input.chars().next()?;
                if !(first.is_ascii_alphabetic() || first == '_') {
                    return None;
                }
                Some(input.find(|ch: char| !is_ident_char(ch)).unwrap_or(input.len()))
            }
            Pattern::Quoted(quote) => {
                let mut chars = input.char_indices();
                if chars.next()?.1 != quote {
                    return None;
                }
                while let Some((idx, ch)) = chars.next() {
                    match ch {
                        '\n' => return None,
                        '\\' => match chars.next() {
                            Some((_, '\n')) | None => return None,
                            Some(_) => {}
                        },
                        c if c == quote => return Some(idx + c.len_utf8()),
                        _ => {}
                    }
                }
                None
            }
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Token patterns in priority order. The first match wins.
const TOKEN_PATTERNS: &[(TokenKind, Pattern)] = &[
    (TokenKind::StringLiteral, Pattern::Quoted('"')),
    (TokenKind::CharLiteral, Pattern::Quoted('\'')),
    (TokenKind::IntLiteral, Pattern::Digits),
    (TokenKind::LParen, Pattern::Exact("(")),
    (TokenKind::RParen, Pattern::Exact(")")),
    (TokenKind::Plus, Pattern::Exact("+")),
    (TokenKind::Minus, Pattern::Exact("-")),
    (TokenKind::Slash, Pattern::Exact("/")),
    (TokenKind::Star, Pattern::Exact("*")),
    (TokenKind::Percent, Pattern::Exact("%")),
    (TokenKind::Ge, Pattern::Exact(">=")),
    (TokenKind::Le, Pattern::Exact("<=")),
    (TokenKind::Lt, Pattern::Exact("<")),
    (TokenKind::Gt, Pattern::Exact(">")),
    (TokenKind::EqEq, Pattern::Exact("==")),
    (TokenKind::NotEq, Pattern::Exact("!=")),
    (TokenKind::Assign, Pattern::Exact("=")),
    (TokenKind::Comma, Pattern::Exact(",")),
    (TokenKind::While, Pattern::Keyword("while")),
    (TokenKind::For, Pattern::Keyword("for")),
    (TokenKind::If, Pattern::Keyword("if")),
    (TokenKind::Else, Pattern::Keyword("else")),
    (TokenKind::Intrinsic, Pattern::Keyword("printf")),
    (TokenKind::Return, Pattern::Keyword("return")),
    (TokenKind::Break, Pattern::Keyword("break")),
    (TokenKind::Continue, Pattern::Keyword("continue")),
    (TokenKind::Identifier, Pattern::Identifier),
    (TokenKind::Semicolon, Pattern::Exact(";")),
    (TokenKind::LBrace, Pattern::Exact("{")),
    (TokenKind::RBrace, Pattern::Exact("}")),
    (TokenKind::LBracket, Pattern::Exact("[")),
    (TokenKind::RBracket, Pattern::Exact("]")),
];

/// Tokenize a preprocessed source buffer.
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    let tokens = Lexer::new(source).tokenize()?;
    log::debug!("lexed {} tokens", tokens.len());
    Ok(TokenStream::new(tokens))
}

/// Lexer for preprocessed C source
pub struct Lexer<'a> {
    input: &'a str,
    position: usize, // byte offset into `input`
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, bracketed by `Bos` and `Eos`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![Token::new(TokenKind::Bos, self.current_location())];

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eos, self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Match the next token against the pattern table
    fn next_token(&mut self) -> Result<Token, LexError> {
        let location = self.current_location();
        let input = self.input;
        let rest = &input[self.position..];

        for &(kind, pattern) in TOKEN_PATTERNS {
            let Some(len) = pattern.match_len(rest) else {
                continue;
            };
            let text = &rest[..len];
            self.advance_by(len);

            let token = match kind {
                TokenKind::IntLiteral | TokenKind::Identifier | TokenKind::Intrinsic => {
                    Token::with_value(kind, text, location)
                }
                // Strip the surrounding quotes
                TokenKind::StringLiteral | TokenKind::CharLiteral => {
                    Token::with_value(kind, &text[1..len - 1], location)
                }
                _ => Token::new(kind, location),
            };
            return Ok(token);
        }

        Err(LexError {
            found: rest.chars().next().unwrap_or('\0'),
            location,
        })
    }

    fn skip_whitespace(&mut self) {
        let input = self.input;
        let rest = &input[self.position..];
        let trimmed = rest.trim_start();
        self.advance_by(rest.len() - trimmed.len());
    }

    /// Advance `len` bytes, keeping line and column in sync
    fn advance_by(&mut self, len: usize) {
        let input = self.input;
        for ch in input[self.position..self.position + len].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += len;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("int main() { return 0; }"),
            vec![
                TokenKind::Bos,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_empty_input_is_bracketed() {
        assert_eq!(kinds("   \n\t "), vec![TokenKind::Bos, TokenKind::Eos]);
    }

    #[test]
    fn test_multi_char_operators_win() {
        assert_eq!(
            kinds("<= >= == != < > ="),
            vec![
                TokenKind::Bos,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Assign,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_keywords_need_a_boundary() {
        let tokens = Lexer::new("while whilex if(iffy) printf").tokenize().unwrap();
        assert_eq!(tokens[1].kind, TokenKind::While);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].text(), "whilex");
        assert_eq!(tokens[3].kind, TokenKind::If);
        assert_eq!(tokens[5].kind, TokenKind::Identifier);
        assert_eq!(tokens[5].text(), "iffy");
        assert_eq!(tokens[7].kind, TokenKind::Intrinsic);
        assert_eq!(tokens[7].text(), "printf");
    }

    #[test]
    fn test_literals_capture_text() {
        let tokens = Lexer::new(r#"42 "hello\n\"x\"" 'c' '\n'"#).tokenize().unwrap();
        assert_eq!(tokens[1].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].text(), "42");
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].text(), r#"hello\n\"x\""#);
        assert_eq!(tokens[3].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[3].text(), "c");
        assert_eq!(tokens[4].text(), r"\n");
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("int x;\n  x = 1;").tokenize().unwrap();
        assert_eq!(tokens[1].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[2].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[4].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_unmatched_character_is_an_error() {
        let err = Lexer::new("int x = 1;\nx = @;").tokenize().unwrap_err();
        assert_eq!(err.found, '@');
        assert_eq!(err.location, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let err = Lexer::new("\"abc\ndef\"").tokenize().unwrap_err();
        assert_eq!(err.found, '"');
    }
}
