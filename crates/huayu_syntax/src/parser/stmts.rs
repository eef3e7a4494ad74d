/// Statement parsing methods.
///
/// This chunk parses `[...]` blocks and the statement forms (`if`, `while`,
/// `return`, `break`, `continue`, `:=` init, expression statements).
///
/// ## Notes
/// - `|`-declared locals are collected per block and hoisted to its top;
///   `:=` locals are registered by the resolver at the statement position.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn block(&mut self) -> Result<CodeBlock, ParseError> {
        self.expect_punct(PunctuationId::LBracket, "Expected '['")?;
        let mut block = CodeBlock::default();
        while !self.check_punct(PunctuationId::RBracket) {
            if self.check_punct(PunctuationId::VBar) {
                block.locals.push(self.var_decl()?);
            } else {
                block.statements.push(self.statmt()?);
            }
        }
        self.expect_punct(PunctuationId::RBracket, "Expected ']'")?;
        Ok(block)
    }

    fn statmt(&mut self) -> Result<Statmt, ParseError> {
        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::If) => Ok(Statmt::If(self.if_statmt()?)),
            TokenKind::Keyword(KeywordId::While) => Ok(Statmt::While(self.while_statmt()?)),
            TokenKind::Keyword(KeywordId::Return) => Ok(Statmt::Return(self.return_statmt()?)),
            TokenKind::Keyword(KeywordId::Break) => {
                self.advance();
                self.expect_dot("'break'")?;
                Ok(Statmt::Break)
            }
            TokenKind::Keyword(KeywordId::Continue) => {
                self.advance();
                self.expect_dot("'continue'")?;
                Ok(Statmt::Continue)
            }
            TokenKind::Ident(_) if self.next_is_init() => Ok(Statmt::Init(self.init_statmt()?)),
            _ => Ok(Statmt::Expr(self.expr_statmt()?)),
        }
    }

    fn if_statmt(&mut self) -> Result<IfStatmt, ParseError> {
        self.expect_keyword(KeywordId::If, "Expected 'if'")?;
        self.if_tail()
    }

    /// Condition and branches of an `if`, after its keyword was consumed.
    ///
    /// A cascading `elif` becomes a nested `If` held in the alternate block;
    /// an `else` after an `elif` chain is consumed by the innermost recursion.
    fn if_tail(&mut self) -> Result<IfStatmt, ParseError> {
        let condition = self.expression()?;
        let consequent = self.block()?;
        let alternate = if self.match_keyword(KeywordId::Elif) {
            Some(CodeBlock {
                locals: Vec::new(),
                statements: vec![Statmt::If(self.if_tail()?)],
            })
        } else if self.match_keyword(KeywordId::Else) {
            Some(self.block()?)
        } else {
            None
        };
        Ok(IfStatmt {
            condition,
            consequent,
            alternate,
        })
    }

    fn while_statmt(&mut self) -> Result<WhileStatmt, ParseError> {
        self.expect_keyword(KeywordId::While, "Expected 'while'")?;
        let condition = self.expression()?;
        let body = self.block()?;
        Ok(WhileStatmt { condition, body })
    }

    fn return_statmt(&mut self) -> Result<ReturnStatmt, ParseError> {
        self.expect_keyword(KeywordId::Return, "Expected 'return'")?;
        let value = self.expression()?;
        self.expect_dot("'return'")?;
        Ok(ReturnStatmt { value })
    }

    fn init_statmt(&mut self) -> Result<InitStatmt, ParseError> {
        let name = self.identifier("Expected identifier")?;
        self.expect_punct(PunctuationId::Init, "Expected ':='")?;
        let value = self.expression()?;
        self.expect_dot("':='")?;
        Ok(InitStatmt { name, value })
    }

    fn expr_statmt(&mut self) -> Result<ExprStatmt, ParseError> {
        let expr = self.expression()?;
        self.expect_dot("expression")?;
        Ok(ExprStatmt { expr })
    }
}
