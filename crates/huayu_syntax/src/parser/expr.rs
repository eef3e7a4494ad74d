/// Expression parsing methods.
///
/// Binary expressions use precedence climbing over the static table in
/// `huayu_core::lang::operators` (multiplicative > additive > relational >
/// equality > assignment; assignment right-associative). Message sends are
/// parsed greedily: selector/argument pairs accumulate while the next token
/// is an identifier, and a trailing `,` chains the next send onto the call
/// built so far.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.binary_expr(0)
    }

    fn binary_expr(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let mut left = self.primary()?;
        loop {
            let TokenKind::Operator(op) = self.peek().kind else {
                break;
            };
            let info = operators::info_for(op);
            if info.precedence < min_precedence {
                break;
            }
            // The assignment family requires an lvalue on its left.
            if operators::is_assignment(op) && !left.is_lvalue() {
                return Err(ParseError::invalid_lvalue(self.peek()));
            }
            self.advance();
            let next_min = match info.associativity {
                Associativity::Right => info.precedence,
                Associativity::Left => info.precedence + 1,
            };
            let right = self.binary_expr(next_min)?;
            left = Expr::Binary(BinaryExpr {
                left: Box::new(left),
                op,
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match &self.peek().kind {
            TokenKind::Number(_) => Ok(Expr::Literal(self.number_literal()?)),
            TokenKind::Str(s) => {
                let value = s.clone();
                self.advance();
                Ok(Expr::Literal(Literal {
                    raw: value.clone(),
                    value: LiteralValue::Str(value),
                }))
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Ok(Expr::Literal(keyword_literal("true", LiteralValue::Bool(true))))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Ok(Expr::Literal(keyword_literal("false", LiteralValue::Bool(false))))
            }
            TokenKind::Keyword(KeywordId::Null) => {
                self.advance();
                Ok(Expr::Literal(keyword_literal("null", LiteralValue::Null)))
            }
            TokenKind::Keyword(KeywordId::Undefined) => {
                self.advance();
                Ok(Expr::Literal(keyword_literal(
                    "undefined",
                    LiteralValue::Undefined,
                )))
            }
            TokenKind::Keyword(KeywordId::SelfKw) => {
                self.advance();
                // `self` can itself receive a message: `自己 存入: 1`.
                if self.check_ident() {
                    self.message_send(Some(Expr::SelfRef))
                } else {
                    Ok(Expr::SelfRef)
                }
            }
            TokenKind::Ident(name) => {
                if matches!(self.peek_next().kind, TokenKind::Ident(_)) {
                    // Identifier followed by identifier: a send with the
                    // first identifier as receiver.
                    let name = name.clone();
                    self.advance();
                    self.message_send(Some(Expr::Ref(RefExpr { name })))
                } else if matches!(
                    self.peek_next().kind,
                    TokenKind::Punctuation(PunctuationId::Colon)
                ) {
                    // Identifier followed by ':': a receiver-less keyword send.
                    self.message_send(None)
                } else {
                    let name = name.clone();
                    self.advance();
                    Ok(Expr::Ref(RefExpr { name }))
                }
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let expr = self.expression()?;
                self.expect_punct(PunctuationId::RParen, "Unclosed parentheses")?;
                Ok(expr)
            }
            _ => Err(ParseError::expected("Expected expression", self.peek())),
        }
    }

    // ========================================================================
    // Message sends
    // ========================================================================

    /// Parse one send, then fold any `,`-chained sends onto it: each chained
    /// send's receiver is the call built so far, never the original receiver.
    fn message_send(&mut self, caller: Option<Expr>) -> Result<Expr, ParseError> {
        let mut call = self.message_send_one(caller)?;
        while self.match_punct(PunctuationId::Comma) {
            call = self.message_send_one(Some(call))?;
        }
        Ok(call)
    }

    fn message_send_one(&mut self, caller: Option<Expr>) -> Result<Expr, ParseError> {
        let caller = caller.map(Box::new);
        let mut parts: Vec<CallSelector> = Vec::new();
        loop {
            let selector = self.identifier("Expected selector")?;
            if !self.match_punct(PunctuationId::Colon) {
                if parts.is_empty() {
                    return Ok(Expr::Call(CallExpr {
                        caller,
                        selectors: CallSelectors::Nullary(selector),
                    }));
                }
                return Err(ParseError::malformed_selector(
                    "Expected ':' after selector",
                    self.peek(),
                ));
            }
            let arg = self.expression()?;
            parts.push(CallSelector { selector, arg });
            // Keep scanning selector/argument pairs greedily while the next
            // token is still an identifier.
            if !self.check_ident() {
                break;
            }
        }
        Ok(Expr::Call(CallExpr {
            caller,
            selectors: CallSelectors::Nary(parts),
        }))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn number_literal(&mut self) -> Result<Literal, ParseError> {
        let token = self.peek().clone();
        let TokenKind::Number(raw) = &token.kind else {
            return Err(ParseError::expected("Expected number", &token));
        };
        let value: f64 = raw
            .parse()
            .map_err(|_| ParseError::invalid_literal(format!("Invalid number literal '{raw}'"), &token))?;
        self.advance();
        Ok(Literal {
            raw: raw.clone(),
            value: LiteralValue::Number(value),
        })
    }
}

/// Literal for a keyword spelling (`true`, `null`, ...). The raw text is the
/// canonical English spelling regardless of the script used in the source.
fn keyword_literal(raw: &str, value: LiteralValue) -> Literal {
    Literal {
        raw: raw.to_string(),
        value,
    }
}
