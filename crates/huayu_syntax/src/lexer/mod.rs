//! Lexer for the Huayu language.
//!
//! Handles tokenization including:
//! - Bilingual keywords (`while` / `每当`, `object` / `对象`, ...)
//! - Structural punctuation with fullwidth alternates (`[` / `【`, `.` / `。`, ...)
//! - Identifiers, decimal number literals, and escaped string literals
//!   (straight or curly quotes)
//! - Operators, the init operator `:=`, and `//` line comments
//!
//! ## Module structure
//!
//! - `tokens` - Token types (`TokenKind`, `Token`)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::diagnostics::{LexError, LexErrorKind};
use huayu_core::lang::operators::OperatorId;
use huayu_core::lang::punctuation::{self, PunctuationId};

/// Lexer for Huayu source code.
///
/// ## Notes
/// - The scanner works on characters (not bytes) so that CJK punctuation and
///   identifiers are single steps; token offsets are character indices.
/// - The lexer is fail-fast: the first unrecognized character, unterminated
///   string, or invalid escape aborts scanning.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    tokens: Vec<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source code.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an [`TokenKind::Eof`] token.
    ///
    /// ## Errors
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }
        let end = self.pos;
        self.push_at(TokenKind::Eof, end);
        Ok(self.tokens)
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), LexError> {
        let c = self.peek();
        let start = self.pos;

        if c == ' ' || c == '\t' || c == '\r' {
            self.advance();
            return Ok(());
        }
        if c == '\n' {
            self.advance();
            self.line += 1;
            return Ok(());
        }

        if let Some(id) = punctuation::from_char(c) {
            self.advance();
            // A colon directly followed by `=` composes the init operator.
            if id == PunctuationId::Colon && self.try_consume('=') {
                self.push_at(TokenKind::Punctuation(PunctuationId::Init), start);
            } else {
                self.push_at(TokenKind::Punctuation(id), start);
            }
            return Ok(());
        }

        match c {
            '+' => self.operator(OperatorId::Plus, OperatorId::PlusEq, start),
            '-' => self.operator(OperatorId::Minus, OperatorId::MinusEq, start),
            '*' => self.operator(OperatorId::Star, OperatorId::StarEq, start),
            '%' => self.operator(OperatorId::Percent, OperatorId::PercentEq, start),
            '/' => {
                self.advance();
                if self.try_consume('/') {
                    self.skip_comment();
                } else if self.try_consume('=') {
                    self.push_at(TokenKind::Operator(OperatorId::SlashEq), start);
                } else {
                    self.push_at(TokenKind::Operator(OperatorId::Slash), start);
                }
            }
            '=' => {
                self.advance();
                if self.try_consume('=') {
                    self.push_at(TokenKind::Operator(OperatorId::EqEq), start);
                } else {
                    self.push_at(TokenKind::Operator(OperatorId::Eq), start);
                }
            }
            '<' => {
                self.advance();
                if self.try_consume('=') {
                    self.push_at(TokenKind::Operator(OperatorId::LtEq), start);
                } else {
                    self.push_at(TokenKind::Operator(OperatorId::Lt), start);
                }
            }
            '>' => {
                self.advance();
                if self.try_consume('=') {
                    self.push_at(TokenKind::Operator(OperatorId::GtEq), start);
                } else {
                    self.push_at(TokenKind::Operator(OperatorId::Gt), start);
                }
            }
            '!' => {
                self.advance();
                if self.try_consume('=') {
                    self.push_at(TokenKind::Operator(OperatorId::NotEq), start);
                } else {
                    return Err(self.error(
                        LexErrorKind::UnrecognizedChar,
                        "Unrecognized character '!' (did you mean '!='?)",
                    ));
                }
            }
            _ if c.is_ascii_digit() => self.scan_number(),
            _ if is_quote(c) => self.scan_string()?,
            _ if is_ident_char(c) => self.scan_identifier(),
            _ => {
                return Err(self.error(
                    LexErrorKind::UnrecognizedChar,
                    format!("Unrecognized character '{c}' [U+{:04X}]", c as u32),
                ));
            }
        }
        Ok(())
    }

    /// Scan a one-character operator that may be followed by `=` to form its
    /// compound-assignment spelling.
    fn operator(&mut self, plain: OperatorId, compound: OperatorId, start: usize) {
        self.advance();
        if self.try_consume('=') {
            self.push_at(TokenKind::Operator(compound), start);
        } else {
            self.push_at(TokenKind::Operator(plain), start);
        }
    }

    fn skip_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_identifier(&mut self) {
        let start = self.pos;
        while !self.is_at_end() && is_ident_char(self.peek()) {
            self.advance();
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        match keyword_id(&name) {
            Some(id) => self.push_at(TokenKind::Keyword(id), start),
            None => self.push_at(TokenKind::Ident(name), start),
        }
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }
        // A single fractional part; the dot must be followed by a digit so
        // that `799。` and `5.` still end their statements.
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        self.push_at(TokenKind::Number(raw), start);
    }

    fn scan_string(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        // Opening quote
        self.advance();
        let mut value = String::new();
        loop {
            if self.is_at_end() {
                return Err(self.error(LexErrorKind::UnterminatedString, "Unterminated string"));
            }
            let c = self.advance();
            if is_quote(c) {
                break;
            }
            if c == '\\' {
                value.push(self.scan_escape()?);
            } else {
                if c == '\n' {
                    self.line += 1;
                }
                value.push(c);
            }
        }
        self.push_at(TokenKind::Str(value), start);
        Ok(())
    }

    fn scan_escape(&mut self) -> Result<char, LexError> {
        if self.is_at_end() {
            return Err(self.error(LexErrorKind::UnterminatedString, "Unterminated string"));
        }
        let c = self.advance();
        match c {
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            _ => Err(self.error(
                LexErrorKind::InvalidEscape,
                format!("Invalid escape sequence '\\{c}'"),
            )),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn try_consume(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn push_at(&mut self, kind: TokenKind, offset: usize) {
        self.tokens.push(Token::new(kind, self.line, offset));
    }

    fn error(&self, kind: LexErrorKind, message: impl Into<String>) -> LexError {
        LexError::new(kind, message, self.line, self.pos)
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\u{201C}' || c == '\u{201D}'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize Huayu source text.
///
/// This is the main public entrypoint for lexing.
///
/// ## Errors
/// Returns the first [`LexError`] encountered.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::LexErrorKind;
    use huayu_core::lang::keywords::KeywordId;

    #[test]
    fn simple_expression() {
        let tokens = lex("5.14+16*3").unwrap();
        assert_eq!(tokens.len(), 6);
        assert!(matches!(&tokens[0].kind, TokenKind::Number(raw) if raw == "5.14"));
        assert!(matches!(tokens[1].kind, TokenKind::Operator(OperatorId::Plus)));
        assert!(matches!(&tokens[2].kind, TokenKind::Number(raw) if raw == "16"));
        assert!(matches!(tokens[3].kind, TokenKind::Operator(OperatorId::Star)));
        assert!(matches!(&tokens[4].kind, TokenKind::Number(raw) if raw == "3"));
        assert!(matches!(tokens[5].kind, TokenKind::Eof));
    }

    #[test]
    fn quoted_string() {
        let tokens = lex(r#""hello, world!""#).unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(matches!(&tokens[0].kind, TokenKind::Str(s) if s == "hello, world!"));
    }

    #[test]
    fn curly_quoted_string() {
        let tokens = lex("“你好”").unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::Str(s) if s == "你好"));
    }

    #[test]
    fn escaped_string() {
        let tokens = lex(r#""a\tb\"c""#).unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::Str(s) if s == "a\tb\"c"));
    }

    #[test]
    fn identifiers_across_lines() {
        let tokens = lex("foo = 10.\nbar = 5.").unwrap();
        assert_eq!(tokens.len(), 9);
        assert!(matches!(&tokens[0].kind, TokenKind::Ident(s) if s == "foo"));
        assert!(matches!(&tokens[4].kind, TokenKind::Ident(s) if s == "bar"));
        assert_eq!(tokens[4].line, 1);
    }

    #[test]
    fn comments_are_skipped() {
        let source = "foo = 10. // assign to 10\n// nothing\nbar = 5. // assign to 5";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens.len(), 9);
        assert!(matches!(
            tokens[3].kind,
            TokenKind::Punctuation(PunctuationId::Dot)
        ));
        assert!(matches!(&tokens[4].kind, TokenKind::Ident(s) if s == "bar"));
    }

    #[test]
    fn bilingual_keywords() {
        let tokens = lex("while 每当 object 对象 返回 return").unwrap();
        for t in &tokens[..6] {
            assert!(matches!(
                t.kind,
                TokenKind::Keyword(KeywordId::While)
                    | TokenKind::Keyword(KeywordId::Object)
                    | TokenKind::Keyword(KeywordId::Return)
            ));
        }
    }

    #[test]
    fn fullwidth_punctuation() {
        let tokens = lex("【】。（），：｜").unwrap();
        let expected = [
            PunctuationId::LBracket,
            PunctuationId::RBracket,
            PunctuationId::Dot,
            PunctuationId::LParen,
            PunctuationId::RParen,
            PunctuationId::Comma,
            PunctuationId::Colon,
            PunctuationId::VBar,
        ];
        for (t, id) in tokens.iter().zip(expected) {
            assert_eq!(t.kind, TokenKind::Punctuation(id));
        }
    }

    #[test]
    fn init_operator() {
        let tokens = lex("账户甲 := 1。").unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::Ident(s) if s == "账户甲"));
        assert!(matches!(
            tokens[1].kind,
            TokenKind::Punctuation(PunctuationId::Init)
        ));
    }

    #[test]
    fn statement_dot_after_integer() {
        // The fraction dot requires a following digit, so `10.` ends a statement.
        let tokens = lex("x = 10.").unwrap();
        assert!(matches!(&tokens[2].kind, TokenKind::Number(raw) if raw == "10"));
        assert!(matches!(
            tokens[3].kind,
            TokenKind::Punctuation(PunctuationId::Dot)
        ));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = lex("\"abc").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn invalid_escape_is_an_error() {
        let err = lex(r#""a\qb""#).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidEscape);
    }

    #[test]
    fn unrecognized_character_is_an_error() {
        let err = lex("x = §。").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnrecognizedChar);
        assert_eq!(err.line, 0);
    }
}
