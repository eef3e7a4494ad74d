/// Declaration parsing methods.
///
/// This chunk parses `object` declarations, `func` declarations, selector
/// sequences, and `|`-delimited variable declaration lists.
///
/// ## Notes
/// - Overloaded constructors/methods are recorded in source order; signature
///   collisions are rejected by the resolver, not here.
impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    fn object_decl(&mut self) -> Result<ObjDecl, ParseError> {
        self.expect_keyword(KeywordId::Object, "Expected 'object'")?;
        let name = self.identifier("Expected identifier after 'object'")?;
        self.expect_punct(
            PunctuationId::LBracket,
            "Expected '[' to start object declaration",
        )?;

        let mut fields = Vec::new();
        let mut ctors = Vec::new();
        let mut methods = Vec::new();
        let mut class_methods = Vec::new();

        while !self.check_punct(PunctuationId::RBracket) {
            match &self.peek().kind {
                TokenKind::Punctuation(PunctuationId::VBar) => {
                    fields.push(self.var_decl()?);
                }
                TokenKind::Keyword(KeywordId::Method) => {
                    self.advance();
                    methods.push(self.func_tail()?);
                }
                TokenKind::Ident(id) if *id == name => {
                    // Constructor: leading selector is the object's own name.
                    self.advance();
                    ctors.push(self.func_tail()?);
                }
                TokenKind::Ident(_) => {
                    class_methods.push(self.func_tail()?);
                }
                _ => {
                    return Err(ParseError::expected(
                        "Unrecognized token in object declaration; expected a field list, constructor, or method",
                        self.peek(),
                    ));
                }
            }
        }
        self.expect_punct(
            PunctuationId::RBracket,
            "Expected ']' to end object declaration",
        )?;

        Ok(ObjDecl {
            name,
            fields,
            ctors,
            methods,
            class_methods,
        })
    }

    fn func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        self.expect_keyword(KeywordId::Func, "Expected 'func'")?;
        self.func_tail()
    }

    /// Selector sequence plus body, shared by functions, constructors, and
    /// both method kinds.
    fn func_tail(&mut self) -> Result<FuncDecl, ParseError> {
        let selectors = self.func_selectors()?;
        let body = self.block()?;
        Ok(FuncDecl { selectors, body })
    }

    fn func_selectors(&mut self) -> Result<Selectors, ParseError> {
        let mut parts: Vec<SelectorDecl> = Vec::new();
        loop {
            let selector = self.identifier("Expected selector")?;
            if !self.match_punct(PunctuationId::Colon) {
                if parts.is_empty() {
                    return Ok(Selectors::Nullary(selector));
                }
                return Err(ParseError::malformed_selector(
                    "Expected ':' after selector",
                    self.peek(),
                ));
            }
            let param = match &self.peek().kind {
                TokenKind::Keyword(KeywordId::Discard) => {
                    self.advance();
                    None
                }
                TokenKind::Ident(name) => {
                    let name = name.clone();
                    self.advance();
                    Some(name)
                }
                _ => {
                    return Err(ParseError::expected(
                        "Expected parameter name (or '_' to discard)",
                        self.peek(),
                    ));
                }
            };
            parts.push(SelectorDecl { selector, param });
            // Keep scanning while the next token is still an identifier.
            if !self.check_ident() {
                break;
            }
        }
        Ok(Selectors::Nary(parts))
    }

    fn var_decl(&mut self) -> Result<VarDecl, ParseError> {
        self.expect_punct(
            PunctuationId::VBar,
            "Expected '|' to start variable declaration",
        )?;
        let mut names = Vec::new();
        while !self.check_punct(PunctuationId::VBar) {
            names.push(self.identifier("Expected variable name")?);
        }
        self.expect_punct(
            PunctuationId::VBar,
            "Expected '|' to end variable declaration",
        )?;
        Ok(VarDecl { names })
    }
}
