//! # fshgen - terminology tables to FSH
//!
//! Converts spreadsheet or CSV/TSV terminology tables (a code column, a
//! display column and optional translations) into FSH concept entries with
//! language-tagged designations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐     ┌───────────┐
//! │ XLSX/CSV/TSV │────▶│   Parser    │────▶│  Transform   │────▶│ .fsh text │
//! │              │     │ (Dataset)   │     │ (classify +  │     │           │
//! └──────────────┘     └─────────────┘     │  emit rows)  │     └───────────┘
//!                                          └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fshgen::{convert_file, ConvertOptions, FieldBindings, LanguageTag};
//!
//! let bindings = FieldBindings::new("code", "uz")
//!     .with_secondary(LanguageTag::new("ru")?, "ru")
//!     .with_secondary(LanguageTag::new("en")?, "en");
//! let report = convert_file(&ConvertOptions::new("terms.xlsx", bindings))?;
//! println!("{} concepts", report.stats.blocks_emitted);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Cells, rows, datasets, bindings
//! - [`parser`] - CSV/TSV and workbook readers
//! - [`transform`] - Column classification, escaping, emission, pipeline
//! - [`validation`] - Binding checks
//! - [`config`] - Mapping profiles and environment defaults
//! - [`logs`] - Progress log broadcasting

// Core modules
pub mod error;
pub mod models;

// Input
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Configuration
pub mod config;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, InputError, OutputError, PipelineError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    CellValue,
    Dataset,
    FieldBindings,
    LanguageTag,
    Row,
    SecondaryBinding,
    CONVENTIONAL_LANGUAGES,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{read_table, LoadedTable, ReadOptions, TableFormat};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    classify,
    emit,
    escape,
    convert_file,
    generate_document,
    generate_fsh,
    ConversionReport,
    ConversionStats,
    ConvertOptions,
    ExtraLanguageMap,
    OutputBlock,
};

// =============================================================================
// Re-exports - Validation & Config
// =============================================================================

pub use validation::validate_bindings;

pub use config::{example_mapping, load_mapping, resolve_bindings, BindingOverrides, EnvDefaults};
