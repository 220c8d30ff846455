use crate::executor::Evaluator;
use crate::parser::Parser;
use crate::storage::Context;
use crate::tokenizer::Tokenizer;

/// Runs one statement through the full pipeline against the given context.
/// Parse diagnostics pass through verbatim; execution failures are prefixed.
pub fn process_query(ctx: &mut Context, query: &str) -> Result<String, String> {
    // Step 1 + 2: a fresh tokenizer/parser pair per statement.
    let tokenizer = Tokenizer::new(query);
    let mut parser = Parser::new(tokenizer);
    let statement = parser.parse().map_err(|e| e.to_string())?;

    // Step 3: map the tree onto the catalog.
    Evaluator::new(ctx)
        .evaluate(&statement)
        .map_err(|e| format!("Execution error: {}", e))
}
