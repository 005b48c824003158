//! High-level conversion API.
//!
//! [`generate_fsh`] is the pure core: dataset and bindings in, FSH text out.
//! [`convert_file`] wraps it with the file adapters: read table, check
//! bindings, generate, write.
//!
//! # Example
//!
//! ```rust,ignore
//! use fshgen::{convert_file, ConvertOptions, FieldBindings};
//!
//! let options = ConvertOptions::new("terms.xlsx", FieldBindings::new("code", "uz"));
//! let report = convert_file(&options)?;
//! println!("Wrote {} concepts to {}", report.stats.blocks_emitted, report.output.display());
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::classifier::{classify, ExtraLanguageMap};
use super::emitter::{emit, render_document, OutputBlock};
use crate::error::{ConfigResult, OutputError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{Dataset, FieldBindings};
use crate::parser::{read_table, ReadOptions};
use crate::validation::validate_bindings;

/// Counters describing one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    pub rows_read: usize,
    pub blocks_emitted: usize,
    pub rows_skipped: usize,
    pub designations_emitted: usize,
    /// Extra language tags in emission order.
    pub extra_languages: Vec<String>,
}

/// FSH text plus the counters that produced it.
#[derive(Debug, Clone)]
pub struct Generated {
    pub document: String,
    pub stats: ConversionStats,
    /// Optional bindings naming unknown columns.
    pub warnings: Vec<String>,
}

/// Extra language columns for a dataset, minus the conventional tags.
pub fn extra_languages(columns: &[String], bindings: &FieldBindings) -> ExtraLanguageMap {
    classify(columns).excluding(bindings.conventional_tags())
}

/// Transform a dataset into an FSH concept list.
///
/// Bindings are checked before any row is looked at; a missing code or
/// display column fails the whole run. Rows without code or display are
/// skipped silently.
///
/// # Example
/// ```
/// use fshgen::{generate_fsh, Dataset, FieldBindings, Row};
///
/// let mut ds = Dataset::new(&["code", "uz", "lang:tr"]);
/// ds.push_row(Row::new().with("code", "100").with("uz", "bosh").with("lang:tr", "baş"));
///
/// let out = generate_fsh(&ds, &FieldBindings::new("code", "uz")).unwrap();
/// assert_eq!(
///     out.document,
///     "* #100 \"bosh\"\n  * ^designation[0].language = #tr\n  * ^designation[=].value = \"baş\"\n"
/// );
/// ```
pub fn generate_fsh(dataset: &Dataset, bindings: &FieldBindings) -> ConfigResult<Generated> {
    let warnings = validate_bindings(&dataset.columns, bindings)?;
    let extra = extra_languages(&dataset.columns, bindings);

    let blocks: Vec<OutputBlock> = dataset
        .rows
        .iter()
        .filter_map(|row| emit(row, bindings, &extra))
        .collect();

    let stats = ConversionStats {
        rows_read: dataset.rows.len(),
        blocks_emitted: blocks.len(),
        rows_skipped: dataset.rows.len() - blocks.len(),
        designations_emitted: blocks.iter().map(|b| b.designations.len()).sum(),
        extra_languages: extra.tags().map(ToString::to_string).collect(),
    };

    Ok(Generated {
        document: render_document(&blocks),
        stats,
        warnings,
    })
}

/// [`generate_fsh`] returning only the text.
pub fn generate_document(dataset: &Dataset, bindings: &FieldBindings) -> ConfigResult<String> {
    generate_fsh(dataset, bindings).map(|g| g.document)
}

/// Options for [`convert_file`].
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    /// Output path (default: input with `.fsh` extension)
    pub output: Option<PathBuf>,
    pub read: ReadOptions,
    pub bindings: FieldBindings,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, bindings: FieldBindings) -> Self {
        Self {
            input: input.into(),
            output: None,
            read: ReadOptions::default(),
            bindings,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `terms.xlsx` -> `terms.fsh`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("fsh")
}

/// Result of a file conversion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub output: PathBuf,
    #[serde(flatten)]
    pub stats: ConversionStats,
}

/// Read a table, generate FSH and write it out.
pub fn convert_file(options: &ConvertOptions) -> PipelineResult<ConversionReport> {
    log_info(format!("Reading {}", options.input.display()));
    let table = read_table(&options.input, &options.read)?;

    if let Some(ref encoding) = table.encoding {
        log_success(format!("Detected encoding: {}", encoding));
    }
    if let Some(delimiter) = table.delimiter {
        log_success(format!("Separator: '{}'", format_delimiter(delimiter)));
    }
    if let Some(ref sheet) = table.sheet {
        log_success(format!("Sheet: {}", sheet));
    }
    log_success(format!(
        "Read {} rows, {} columns",
        table.dataset.rows.len(),
        table.dataset.columns.len()
    ));

    let generated = generate_fsh(&table.dataset, &options.bindings)?;
    for warning in &generated.warnings {
        log_warning(warning.clone());
    }

    let stats = generated.stats;
    if !stats.extra_languages.is_empty() {
        log_info(format!("Extra languages: {}", stats.extra_languages.join(", ")));
    }
    log_success(format!(
        "Generated {} concepts with {} designations",
        stats.blocks_emitted, stats.designations_emitted
    ));
    if stats.rows_skipped > 0 {
        log_warning(format!("{} rows skipped (blank code or display)", stats.rows_skipped));
    }

    let output = options.output_path();
    write_document(&output, &generated.document)?;
    log_info_indent(format!("Wrote {}", output.display()), 1);

    Ok(ConversionReport { output, stats })
}

/// Write the document as UTF-8.
pub fn write_document(path: &Path, document: &str) -> Result<(), OutputError> {
    fs::write(path, document).map_err(|source| OutputError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
