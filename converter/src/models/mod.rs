//! Domain models for the FSH conversion pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`CellValue`] - A single, possibly missing, scalar cell
//! - [`Row`] - One record keyed by column name
//! - [`Dataset`] - Ordered columns plus ordered rows
//! - [`LanguageTag`] - Two-letter lowercase designation language
//! - [`FieldBindings`] - Which columns supply code, display and designations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigError;

// =============================================================================
// Cell Value
// =============================================================================

/// A scalar cell read from a table.
///
/// Missing cells, empty strings and whitespace-only strings are all treated
/// as "no data" by [`CellValue::normalized`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value (empty cell, absent column, short row).
    #[default]
    Missing,
    /// Textual cell.
    Text(String),
    /// Floating-point cell as produced by spreadsheet engines.
    Number(f64),
    /// Integer cell, kept exact.
    Integer(i64),
    /// Boolean cell.
    Bool(bool),
}

impl CellValue {
    /// Render the raw cell as text, without trimming.
    ///
    /// Integral numbers render without a fractional part so that a code
    /// stored as `100.0` by a spreadsheet comes out as `100`.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Integer(i) => Some(i.to_string()),
            Self::Bool(b) => Some(b.to_string()),
        }
    }

    /// Trimmed text, or `None` when the cell is missing or blank.
    pub fn normalized(&self) -> Option<String> {
        let rendered = self.render()?;
        let trimmed = rendered.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// =============================================================================
// Row & Dataset
// =============================================================================

static MISSING: CellValue = CellValue::Missing;

/// One table record: column name to cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, replacing any previous value for the column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Cell for a column; absent columns read as [`CellValue::Missing`].
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// A loaded table: ordered column names plus ordered rows.
///
/// Column names are trimmed on construction. Uniqueness is not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

// =============================================================================
// Language Tag
// =============================================================================

/// Two-character lowercase language tag (`ru`, `en`, `la`, ...).
///
/// Tags are opaque: only the shape is checked, not membership in any
/// registry of real languages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: &str) -> Result<Self, ConfigError> {
        let lowered = tag.trim().to_lowercase();
        if lowered.chars().count() == 2 && lowered.chars().all(char::is_alphabetic) {
            Ok(Self(lowered))
        } else {
            Err(ConfigError::InvalidLanguageTag(tag.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

// =============================================================================
// Field Bindings
// =============================================================================

/// Tags of the conventional secondary designations, in emission order.
pub const CONVENTIONAL_LANGUAGES: [&str; 3] = ["ru", "en", "la"];

/// A conventional secondary designation and the column feeding it, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryBinding {
    pub language: LanguageTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// Assignment of semantic roles to column names.
///
/// `code` and `display` are mandatory. `secondary` lists the conventional
/// designations in the order they are emitted; an entry without a column is
/// never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBindings {
    pub code: String,
    pub display: String,
    #[serde(default = "default_secondary")]
    pub secondary: Vec<SecondaryBinding>,
}

fn default_secondary() -> Vec<SecondaryBinding> {
    CONVENTIONAL_LANGUAGES
        .iter()
        .map(|tag| SecondaryBinding {
            language: LanguageTag(tag.to_string()),
            column: None,
        })
        .collect()
}

impl FieldBindings {
    /// Bindings with the conventional `ru`, `en`, `la` designations unset.
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
            secondary: default_secondary(),
        }
    }

    /// Bind a secondary designation. Known tags keep their position, new
    /// tags are appended.
    pub fn with_secondary(mut self, language: LanguageTag, column: impl Into<String>) -> Self {
        self.set_secondary(language, Some(column.into()));
        self
    }

    pub fn set_secondary(&mut self, language: LanguageTag, column: Option<String>) {
        match self.secondary.iter_mut().find(|b| b.language == language) {
            Some(binding) => binding.column = column,
            None => self.secondary.push(SecondaryBinding { language, column }),
        }
    }

    /// Column bound to a secondary language, if set.
    pub fn secondary_column(&self, language: &str) -> Option<&str> {
        self.secondary
            .iter()
            .find(|b| b.language.as_str() == language)
            .and_then(|b| b.column.as_deref())
    }

    /// Tags claimed by the conventional designations, bound or not.
    pub fn conventional_tags(&self) -> impl Iterator<Item = &LanguageTag> {
        self.secondary.iter().map(|b| &b.language)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_normalization() {
        assert_eq!(CellValue::Missing.normalized(), None);
        assert_eq!(CellValue::from("   ").normalized(), None);
        assert_eq!(CellValue::from("\t\n").normalized(), None);
        assert_eq!(CellValue::from("  head ").normalized(), Some("head".into()));
        assert_eq!(CellValue::from("").normalized(), None);
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(CellValue::Number(100.0).normalized(), Some("100".into()));
        assert_eq!(CellValue::Number(-7.0).normalized(), Some("-7".into()));
        assert_eq!(CellValue::Number(1.5).normalized(), Some("1.5".into()));
        assert_eq!(CellValue::Bool(true).normalized(), Some("true".into()));
        assert_eq!(
            CellValue::from(9_007_199_254_740_993_i64).normalized(),
            Some("9007199254740993".into())
        );
    }

    #[test]
    fn test_row_missing_column_reads_missing() {
        let row = Row::new().with("code", "100");
        assert_eq!(row.get("code"), &CellValue::from("100"));
        assert_eq!(row.get("uz"), &CellValue::Missing);
    }

    #[test]
    fn test_dataset_trims_columns() {
        let ds = Dataset::new(&[" code ", "uz\t"]);
        assert_eq!(ds.columns, vec!["code", "uz"]);
        assert!(ds.has_column("uz"));
        assert!(!ds.has_column(" uz"));
    }

    #[test]
    fn test_language_tag_validation() {
        assert_eq!(LanguageTag::new("RU").unwrap().as_str(), "ru");
        assert_eq!(LanguageTag::new("ўз").unwrap().as_str(), "ўз");
        assert!(LanguageTag::new("eng").is_err());
        assert!(LanguageTag::new("e1").is_err());
        assert!(LanguageTag::new("").is_err());
    }

    #[test]
    fn test_bindings_default_order() {
        let b = FieldBindings::new("code", "uz");
        let tags: Vec<&str> = b.conventional_tags().map(LanguageTag::as_str).collect();
        assert_eq!(tags, vec!["ru", "en", "la"]);
        assert!(b.secondary.iter().all(|s| s.column.is_none()));
    }

    #[test]
    fn test_with_secondary_keeps_position() {
        let b = FieldBindings::new("code", "uz")
            .with_secondary(LanguageTag::new("en").unwrap(), "English")
            .with_secondary(LanguageTag::new("kk").unwrap(), "Kazakh");
        assert_eq!(b.secondary[1].column.as_deref(), Some("English"));
        assert_eq!(b.secondary[3].language.as_str(), "kk");
        assert_eq!(b.secondary_column("en"), Some("English"));
        assert_eq!(b.secondary_column("ru"), None);
    }

    #[test]
    fn test_bindings_json_defaults_secondary() {
        let b: FieldBindings = serde_json::from_str(r#"{"code":"c","display":"d"}"#).unwrap();
        assert_eq!(b.secondary.len(), 3);

        let bad = serde_json::from_str::<FieldBindings>(
            r#"{"code":"c","display":"d","secondary":[{"language":"xyz"}]}"#,
        );
        assert!(bad.is_err());
    }
}
