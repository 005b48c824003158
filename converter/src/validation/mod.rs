//! Column binding checks, run once before any row is processed.
//!
//! Mandatory bindings (`code`, display) must name an existing column or the
//! conversion is rejected up front. Optional designation bindings that name
//! an unknown column are reported back as warnings; rows simply never carry
//! a value for them.

use crate::error::{ConfigError, ConfigResult};
use crate::models::FieldBindings;

/// Check bindings against the dataset's columns.
///
/// # Returns
/// * `Ok(warnings)` - one message per optional binding naming an unknown column
/// * `Err(ConfigError::MissingColumn)` - for the first missing mandatory column
///
/// # Example
/// ```
/// use fshgen::{validate_bindings, FieldBindings};
///
/// let columns = vec!["code".to_string(), "uz".to_string()];
/// assert!(validate_bindings(&columns, &FieldBindings::new("code", "uz")).is_ok());
/// assert!(validate_bindings(&columns, &FieldBindings::new("id", "uz")).is_err());
/// ```
pub fn validate_bindings(columns: &[String], bindings: &FieldBindings) -> ConfigResult<Vec<String>> {
    let has = |name: &str| columns.iter().any(|c| c == name);

    for mandatory in [&bindings.code, &bindings.display] {
        if !has(mandatory) {
            return Err(ConfigError::MissingColumn {
                column: mandatory.clone(),
            });
        }
    }

    let warnings = bindings
        .secondary
        .iter()
        .filter_map(|b| {
            let column = b.column.as_deref()?;
            (!has(column)).then(|| {
                format!(
                    "Column \"{}\" for designation #{} not found; it will be skipped",
                    column, b.language
                )
            })
        })
        .collect();

    Ok(warnings)
}
