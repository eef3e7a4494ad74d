/// Parser core type and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()`
/// entrypoint; the grammar rules live in the other parser chunks.
///
/// ## Notes
/// - The parser is fail-fast: the first malformed construct aborts parsing
///   and surfaces as a [`ParseError`] carrying the offending token.

/// Parser state.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `huayu_syntax::lexer`, ending in
    ///   an `Eof` token.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the entire token stream into a [`FileDef`].
    ///
    /// ## Errors
    /// Returns the first [`ParseError`] encountered.
    pub fn parse(mut self) -> Result<FileDef, ParseError> {
        let mut top_levels = Vec::new();
        while !self.is_at_end() {
            top_levels.push(self.top_level()?);
        }
        Ok(FileDef { top_levels })
    }

    fn top_level(&mut self) -> Result<TopLevel, ParseError> {
        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Object) => Ok(TopLevel::Obj(self.object_decl()?)),
            TokenKind::Keyword(KeywordId::Func) => Ok(TopLevel::Func(self.func_decl()?)),
            TokenKind::Punctuation(PunctuationId::VBar) => Ok(TopLevel::Vars(self.var_decl()?)),
            TokenKind::Ident(_) if self.next_is_init() => Ok(TopLevel::Init(self.init_statmt()?)),
            _ => Ok(TopLevel::Expr(self.expr_statmt()?)),
        }
    }
}
