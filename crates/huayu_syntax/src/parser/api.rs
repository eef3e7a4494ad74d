/// Parse a token stream into a [`FileDef`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `huayu_syntax::lexer`.
///
/// ## Errors
/// Returns the first [`ParseError`] encountered; the parser does not recover.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<FileDef, ParseError> {
    Parser::new(tokens).parse()
}
