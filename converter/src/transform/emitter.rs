//! Per-row FSH concept emission.
//!
//! A row turns into one concept block:
//!
//! ```text
//! * #<code> "<display>"
//!   * ^designation[0].language = #<tag>
//!   * ^designation[=].value = "<text>"
//!   * ^designation[+].language = #<tag>
//!   * ^designation[=].value = "<text>"
//! ```
//!
//! Designations follow the conventional bindings in order, then the extra
//! language columns in scan order. Blank values produce no lines.

use std::fmt::Write as _;

use super::classifier::ExtraLanguageMap;
use super::escape::escape;
use crate::models::{FieldBindings, LanguageTag, Row};

/// Index marker on a designation's language line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMarker {
    /// `[0]`: opens the designation list.
    Initial,
    /// `[+]`: appends to it.
    Next,
}

impl IndexMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "0",
            Self::Next => "+",
        }
    }
}

/// Tracks whether a row has emitted any designation yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum DesignationState {
    #[default]
    Empty,
    Started,
}

impl DesignationState {
    fn marker(self) -> IndexMarker {
        match self {
            Self::Empty => IndexMarker::Initial,
            Self::Started => IndexMarker::Next,
        }
    }

    fn advance(self) -> Self {
        Self::Started
    }
}

/// A language-tagged label for a concept. `value` is trimmed, unescaped.
#[derive(Debug, Clone, PartialEq)]
pub struct Designation {
    pub language: LanguageTag,
    pub value: String,
    pub marker: IndexMarker,
}

/// The emitted unit for one admitted row.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBlock {
    /// Trimmed code, written verbatim.
    pub code: String,
    /// Trimmed display text, unescaped.
    pub display: String,
    pub designations: Vec<Designation>,
}

impl OutputBlock {
    /// Render the block lines, each terminated by `\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, "* #{} \"{}\"", self.code, escape(&self.display));
        for d in &self.designations {
            let _ = writeln!(
                out,
                "  * ^designation[{}].language = #{}",
                d.marker.as_str(),
                d.language
            );
            let _ = writeln!(out, "  * ^designation[=].value = \"{}\"", escape(&d.value));
        }
        out
    }
}

/// Build the block for one row, or `None` if code or display is blank.
pub fn emit(row: &Row, bindings: &FieldBindings, extra: &ExtraLanguageMap) -> Option<OutputBlock> {
    let code = row.get(&bindings.code).normalized()?;
    let display = row.get(&bindings.display).normalized()?;

    let conventional = bindings
        .secondary
        .iter()
        .map(|b| (&b.language, b.column.as_deref()));
    let extras = extra.iter().map(|(tag, column)| (tag, Some(column)));

    let mut state = DesignationState::default();
    let mut designations = Vec::new();

    for (language, column) in conventional.chain(extras) {
        let Some(column) = column else { continue };
        let Some(value) = row.get(column).normalized() else {
            continue;
        };
        designations.push(Designation {
            language: language.clone(),
            value,
            marker: state.marker(),
        });
        state = state.advance();
    }

    Some(OutputBlock {
        code,
        display,
        designations,
    })
}

/// Join rendered blocks with a blank line. Always ends in exactly one `\n`.
pub fn render_document<'a, I>(blocks: I) -> String
where
    I: IntoIterator<Item = &'a OutputBlock>,
{
    let rendered: Vec<String> = blocks.into_iter().map(OutputBlock::render).collect();
    if rendered.is_empty() {
        return "\n".to_string();
    }
    rendered.join("\n")
}
