//! Extra language column discovery.
//!
//! Columns named `lang:xx` (case-insensitive, surrounding whitespace ignored)
//! contribute a designation in language `xx` after the conventional ones.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::LanguageTag;

/// Prefix marking an extra language column.
pub const EXTRA_LANGUAGE_PREFIX: &str = "lang:";

static EXTRA_LANGUAGE_COLUMN: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"^{}(\p{{Alphabetic}}{{2}})$", regex::escape(EXTRA_LANGUAGE_PREFIX));
    Regex::new(&pattern).expect("extra language pattern is valid")
});

/// Ordered mapping from language tag to the column supplying it.
///
/// Iteration follows column-scan order. A tag seen twice keeps its first
/// position and takes the later column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraLanguageMap {
    entries: Vec<(LanguageTag, String)>,
}

impl ExtraLanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: LanguageTag, column: String) {
        match self.entries.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = column,
            None => self.entries.push((tag, column)),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t.as_str() == tag)
            .map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageTag, &str)> {
        self.entries.iter().map(|(t, c)| (t, c.as_str()))
    }

    pub fn tags(&self) -> impl Iterator<Item = &LanguageTag> {
        self.entries.iter().map(|(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop tags already covered elsewhere, keeping the order of the rest.
    pub fn excluding<'a, I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = &'a LanguageTag>,
    {
        let excluded: Vec<&LanguageTag> = tags.into_iter().collect();
        self.entries.retain(|(t, _)| !excluded.contains(&t));
        self
    }
}

/// Language tag encoded in a column name, if it follows the convention.
pub fn extra_language_tag(column: &str) -> Option<LanguageTag> {
    let lowered = column.trim().to_lowercase();
    let caps = EXTRA_LANGUAGE_COLUMN.captures(&lowered)?;
    LanguageTag::new(caps.get(1)?.as_str()).ok()
}

/// Scan columns in order and collect every extra language column.
///
/// The map values are the column names exactly as given, for row lookups.
pub fn classify<S: AsRef<str>>(columns: &[S]) -> ExtraLanguageMap {
    let mut map = ExtraLanguageMap::new();
    for column in columns {
        let column = column.as_ref();
        if let Some(tag) = extra_language_tag(column) {
            map.insert(tag, column.to_string());
        }
    }
    map
}
