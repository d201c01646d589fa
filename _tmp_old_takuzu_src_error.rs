//! Error type tying together the engine's errors, the parser's errors and I/O.

use std::fmt;
use std::io;

use crate::parser::ParseError;

#[derive(Debug)]
pub enum CliError {
    Takuzu(takuzu_engine::TakuzuError),
    Parse(ParseError),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Takuzu(e) => write!(f, "{e}"),
            CliError::Parse(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<takuzu_engine::TakuzuError> for CliError {
    fn from(e: takuzu_engine::TakuzuError) -> Self {
        CliError::Takuzu(e)
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}


