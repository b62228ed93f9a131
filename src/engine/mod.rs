mod errors;
mod statement_engine;
#[cfg(test)]
mod tests;

pub use errors::StatementError;
pub use statement_engine::StatementEngine;
