//! Transformation module.
//!
//! This module turns a loaded table into FSH:
//! - Classifier: discovers `lang:xx` extra language columns
//! - Escape: FSH string literal escaping
//! - Emitter: one concept block per admitted row
//! - Pipeline: whole-dataset generation and file conversion

pub mod classifier;
pub mod emitter;
pub mod escape;
pub mod pipeline;

pub use classifier::{classify, extra_language_tag, ExtraLanguageMap, EXTRA_LANGUAGE_PREFIX};
pub use emitter::{emit, render_document, Designation, IndexMarker, OutputBlock};
pub use escape::{escape, escape_opt};
pub use pipeline::*;
