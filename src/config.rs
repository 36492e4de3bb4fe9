//! Configuration for statement assembly

use select_dataset::Dialect;
use serde::{Deserialize, Serialize};

/// Configuration applied to the initial statement of every build
///
/// Options run after the configuration, so `with_select_dialect` and
/// `with_select_prepared` override these values for a single build.
///
/// # Examples
///
/// ```
/// use keyset_select::{Dialect, SelectConfig};
///
/// // Use defaults
/// let config = SelectConfig::default();
///
/// // Override just one field
/// let config = SelectConfig {
///     dialect: Dialect::Postgres,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectConfig {
   /// Dialect used to render the statement
   ///
   /// Default: `Dialect::Default`
   pub dialect: Dialect,

   /// Render with placeholders and a separate parameter list
   ///
   /// When false, literals are inlined and the parameter list is empty.
   ///
   /// Default: true
   pub prepared: bool,
}

impl Default for SelectConfig {
   fn default() -> Self {
      Self {
         dialect: Dialect::Default,
         prepared: true,
      }
   }
}
