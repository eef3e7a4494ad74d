/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// peeking/consuming tokens, matching/expecting keywords, operators, and
/// punctuation, and identifier extraction.
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Return the token after the current one without consuming it.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        matches!(self.peek().kind, TokenKind::Keyword(k) if k == id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        matches!(self.peek().kind, TokenKind::Punctuation(p) if p == id)
    }

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    /// Return `true` if the current token is an identifier followed by `:=`.
    fn next_is_init(&self) -> bool {
        matches!(
            self.peek_next().kind,
            TokenKind::Punctuation(PunctuationId::Init)
        )
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<&Token, ParseError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(msg, self.peek()))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, ParseError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(msg, self.peek()))
        }
    }

    /// Expect the end-of-statement token `.` / `。`.
    fn expect_dot(&mut self, what: &str) -> Result<(), ParseError> {
        self.expect_punct(
            PunctuationId::Dot,
            &format!("Expected '.' to end {what}"),
        )?;
        Ok(())
    }

    fn identifier(&mut self, msg: &str) -> Result<Ident, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::expected(msg, self.peek())),
        }
    }
}
