pub mod dump;
pub mod lookup;

#[cfg(test)]
mod lookup_tests;
#[cfg(test)]
mod test_utils;

use snipgraph_bytecode::{ContainerError, LookupError};
use snipgraph_core::KeyError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot load container: {0}")]
    Load(#[from] ContainerError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("cannot render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print the command's output, or its error and exit with status 1.
fn finish(result: Result<String, CliError>) {
    match result {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
