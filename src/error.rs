/// Result type alias for select-building operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for assembling SELECT statements.
///
/// Statement values never leak out of a failed build: either every option
/// applies and the statement is returned or rendered, or one of these errors
/// is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from the statement builder (dialect, identifiers, rendering).
   #[error(transparent)]
   Dataset(#[from] select_dataset::Error),

   /// Descriptor resolved to no selectable columns.
   #[error("descriptor {descriptor} has no selectable columns")]
   NoSelectableColumns { descriptor: String },

   /// Table name is empty or contains a NUL character.
   #[error("invalid table name '{name}': must be non-empty and contain no NUL characters")]
   InvalidTableName { name: String },

   /// Column name cannot be used.
   ///
   /// Descriptor columns must be non-empty and free of NUL characters.
   /// Keyset columns must be `name` or `table.name`, each part matching
   /// `[a-zA-Z_][a-zA-Z0-9_]*`.
   #[error("invalid column name '{name}'")]
   InvalidColumnName { name: String },

   /// Keyset pagination requires at least one column.
   #[error("keyset pagination requires at least one column")]
   EmptyKeysetColumns,

   /// Boundary length does not match keyset column count.
   #[error("cursor has {cursor_len} values but keyset has {keyset_len} columns")]
   CursorLengthMismatch {
      cursor_len: usize,
      keyset_len: usize,
   },

   /// Keyset column not found in a result row.
   #[error("keyset column '{column}' not found in row")]
   CursorColumnNotFound { column: String },
}

impl Error {
   /// Extract a structured error code from the error type.
   ///
   /// This provides machine-readable error codes for error handling.
   pub fn error_code(&self) -> String {
      match self {
         Error::Dataset(e) => e.error_code(),
         Error::NoSelectableColumns { .. } => "NO_SELECTABLE_COLUMNS".to_string(),
         Error::InvalidTableName { .. } => "INVALID_TABLE_NAME".to_string(),
         Error::InvalidColumnName { .. } => "INVALID_COLUMN_NAME".to_string(),
         Error::EmptyKeysetColumns => "EMPTY_KEYSET_COLUMNS".to_string(),
         Error::CursorLengthMismatch { .. } => "CURSOR_LENGTH_MISMATCH".to_string(),
         Error::CursorColumnNotFound { .. } => "CURSOR_COLUMN_NOT_FOUND".to_string(),
      }
   }
}
