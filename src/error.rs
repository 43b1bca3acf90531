use std::error::Error;
use std::fmt::{Display, Formatter};

/// Possible errors that arise due to issues with an input linkage table.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkageError {
    EmptyTable,
    InvalidShape(String),
    InvalidIdentifier(String),
    NonFiniteValue(String),
    IdentifierOverflow(String),
}

impl Error for LinkageError {}

impl Display for LinkageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            LinkageError::EmptyTable => String::from("The linkage table provided is empty"),
            LinkageError::InvalidShape(msg) =>
                format!("Linkage table has an invalid shape: {msg}"),
            LinkageError::InvalidIdentifier(msg) =>
                format!("Invalid cluster identifier: {msg}"),
            LinkageError::NonFiniteValue(msg) =>
                format!("Non finite value: {msg}"),
            LinkageError::IdentifierOverflow(msg) =>
                format!("Ran out of representable identifiers: {msg}"),
        };
        write!(f, "{message}")
    }
}
