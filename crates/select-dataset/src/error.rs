//! Error types for select-dataset

use thiserror::Error;

/// Errors that may occur while rendering a [`SelectDataset`](crate::SelectDataset)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
   /// The dataset names a dialect this crate cannot render.
   #[error("unknown SQL dialect: {0}")]
   UnknownDialect(String),

   /// A table or column identifier is empty.
   #[error("invalid identifier '{name}': identifiers must not be empty")]
   InvalidIdentifier { name: String },

   /// An IN predicate was built with no values.
   #[error("IN list for column '{column}' has no values")]
   EmptyInList { column: String },

   /// A join has no usable ON expressions or no USING columns.
   #[error("join on '{table}' has no join condition")]
   EmptyJoinCondition { table: String },
}

impl Error {
   /// Extract a structured error code from the error type.
   pub fn error_code(&self) -> String {
      match self {
         Error::UnknownDialect(_) => "UNKNOWN_DIALECT".to_string(),
         Error::InvalidIdentifier { .. } => "INVALID_IDENTIFIER".to_string(),
         Error::EmptyInList { .. } => "EMPTY_IN_LIST".to_string(),
         Error::EmptyJoinCondition { .. } => "EMPTY_JOIN_CONDITION".to_string(),
      }
   }
}

/// A type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
