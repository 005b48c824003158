//! Mapping profiles and environment defaults.
//!
//! A mapping profile is a JSON file holding [`FieldBindings`], so a column
//! layout can be configured once and reused across exports:
//!
//! ```json
//! {
//!   "code": "Code",
//!   "display": "Uzbek",
//!   "secondary": [
//!     { "language": "ru", "column": "Russian" },
//!     { "language": "en", "column": "English" },
//!     { "language": "la" }
//!   ]
//! }
//! ```
//!
//! Environment variables (a `.env` file is honoured by the CLI):
//! - `FSHGEN_MAPPING` - default mapping profile path
//! - `FSHGEN_SHEET` - default worksheet name

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{FieldBindings, LanguageTag};

pub const ENV_MAPPING: &str = "FSHGEN_MAPPING";
pub const ENV_SHEET: &str = "FSHGEN_SHEET";

impl FieldBindings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Load a mapping profile from disk.
pub fn load_mapping(path: &Path) -> ConfigResult<FieldBindings> {
    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::InvalidMapping(format!("cannot read '{}': {}", path.display(), e))
    })?;
    Ok(FieldBindings::from_json(&content)?)
}

/// Profile matching the classic `code / uz / ru / en / la` layout.
pub fn example_mapping() -> FieldBindings {
    let mut bindings = FieldBindings::new("code", "uz");
    for tag in ["ru", "en", "la"] {
        if let Ok(language) = LanguageTag::new(tag) {
            bindings.set_secondary(language, Some(tag.to_string()));
        }
    }
    bindings
}

/// Defaults read from the process environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvDefaults {
    pub mapping: Option<PathBuf>,
    pub sheet: Option<String>,
}

impl EnvDefaults {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            mapping: get(ENV_MAPPING).map(PathBuf::from),
            sheet: get(ENV_SHEET),
        }
    }
}

/// Column flags given on the command line; each one overrides the profile.
#[derive(Debug, Clone, Default)]
pub struct BindingOverrides {
    pub code: Option<String>,
    pub display: Option<String>,
    pub secondary: Vec<(LanguageTag, String)>,
}

/// Merge an optional profile with command-line overrides.
///
/// Fails when neither source provides the code or display column.
pub fn resolve_bindings(
    profile: Option<FieldBindings>,
    overrides: BindingOverrides,
) -> ConfigResult<FieldBindings> {
    let (code, display) = match &profile {
        Some(p) => (
            overrides.code.unwrap_or_else(|| p.code.clone()),
            overrides.display.unwrap_or_else(|| p.display.clone()),
        ),
        None => (
            overrides
                .code
                .ok_or_else(|| ConfigError::InvalidMapping("no code column given".into()))?,
            overrides
                .display
                .ok_or_else(|| ConfigError::InvalidMapping("no display column given".into()))?,
        ),
    };

    let mut bindings = match profile {
        Some(p) => FieldBindings { code, display, ..p },
        None => FieldBindings::new(code, display),
    };
    for (language, column) in overrides.secondary {
        bindings.set_secondary(language, Some(column));
    }

    Ok(bindings)
}
