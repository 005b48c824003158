//! Table loading: turns a file on disk into a [`Dataset`].
//!
//! The format is chosen by file extension:
//!
//! | Extension                          | Reader                  |
//! |------------------------------------|-------------------------|
//! | `.csv`                             | delimited, comma        |
//! | `.tsv`, `.tab`                     | delimited, tab          |
//! | `.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods` | spreadsheet (one sheet) |
//!
//! [`ReadOptions::delimiter`] overrides the separator of either text format.
//!
//! Nothing here knows about FSH; the transformation only sees the dataset.

pub mod delimited;
pub mod spreadsheet;

use std::fmt;
use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::models::Dataset;

pub use delimited::{decode_content, detect_encoding, parse_delimited};
pub use spreadsheet::read_workbook;

/// Source table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Spreadsheet,
}

impl TableFormat {
    /// Format for a path, from its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> InputResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" => Ok(Self::Tsv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            "" => Err(InputError::UnsupportedFormat("(no extension)".to_string())),
            other => Err(InputError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
            Self::Spreadsheet => "spreadsheet",
        };
        f.write_str(name)
    }
}

/// Reader settings.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Worksheet name for spreadsheets (default: first sheet).
    pub sheet: Option<String>,
    /// Separator override for delimited text.
    pub delimiter: Option<char>,
}

/// A loaded table with metadata about how it was read.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub dataset: Dataset,
    pub format: TableFormat,
    /// Detected encoding (delimited text only).
    pub encoding: Option<String>,
    /// Separator used (delimited text only).
    pub delimiter: Option<char>,
    /// Sheet read (spreadsheets only).
    pub sheet: Option<String>,
}

/// Load a table from disk.
///
/// # Errors
/// * [`InputError::NotFound`] - path does not exist
/// * [`InputError::UnsupportedFormat`] - unknown extension
/// * [`InputError::Unreadable`] - I/O, decoding or parse failure
/// * [`InputError::SheetNotFound`] - named sheet missing from the workbook
/// * [`InputError::Empty`] - no header row
pub fn read_table(path: &Path, options: &ReadOptions) -> InputResult<LoadedTable> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }

    let format = TableFormat::from_path(path)?;

    match format {
        TableFormat::Spreadsheet => {
            let (dataset, sheet) = read_workbook(path, options.sheet.as_deref())?;
            Ok(LoadedTable {
                dataset,
                format,
                encoding: None,
                delimiter: None,
                sheet: Some(sheet),
            })
        }
        TableFormat::Csv | TableFormat::Tsv => {
            let bytes = std::fs::read(path).map_err(|e| InputError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            parse_bytes(&bytes, format, options.delimiter).map_err(|e| match e {
                InputError::Unreadable { message, .. } => InputError::Unreadable {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            })
        }
    }
}

/// Parse delimited bytes: detect encoding, pick the separator, read rows.
///
/// `.csv` uses `,` and `.tsv` uses tab unless `delimiter` is given.
pub fn parse_bytes(
    bytes: &[u8],
    format: TableFormat,
    delimiter: Option<char>,
) -> InputResult<LoadedTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);

    if content.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let delimiter = match (delimiter, format) {
        (Some(d), _) => d,
        (None, TableFormat::Tsv) => '\t',
        (None, _) => ',',
    };

    let unreadable = |message: String| InputError::Unreadable {
        path: Default::default(),
        message,
    };

    if !delimiter.is_ascii() {
        return Err(unreadable(format!("delimiter '{}' is not ASCII", delimiter)));
    }
    let dataset =
        parse_delimited(&content, delimiter as u8).map_err(|e| unreadable(e.to_string()))?;

    if dataset.columns.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(LoadedTable {
        dataset,
        format,
        encoding: Some(encoding),
        delimiter: Some(delimiter),
        sheet: None,
    })
}

/// Header cell as a column name: trimmed, blank headers become `Unnamed: <index>`.
pub(crate) fn header_name(raw: &str, index: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("Unnamed: {}", index)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("a.CSV")).unwrap(), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("a.tab")).unwrap(), TableFormat::Tsv);
        assert_eq!(
            TableFormat::from_path(Path::new("dir/a.xlsx")).unwrap(),
            TableFormat::Spreadsheet
        );
        assert!(matches!(
            TableFormat::from_path(Path::new("a.json")),
            Err(InputError::UnsupportedFormat(ext)) if ext == ".json"
        ));
        assert!(TableFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_csv_defaults_to_comma() {
        let table = parse_bytes(b"code,uz\n1,bir", TableFormat::Csv, None).unwrap();
        assert_eq!(table.delimiter, Some(','));
        assert_eq!(table.encoding.as_deref(), Some("utf-8"));
        assert_eq!(table.dataset.columns, vec!["code", "uz"]);
    }

    #[test]
    fn test_semicolons_in_quoted_header_stay_in_cell() {
        let bytes = b"code,uz,\"note; a; b; c\"\n100,bosh,x\n";
        let table = parse_bytes(bytes, TableFormat::Csv, None).unwrap();

        assert_eq!(table.delimiter, Some(','));
        assert_eq!(table.dataset.columns, vec!["code", "uz", "note; a; b; c"]);

        let generated =
            crate::transform::generate_fsh(&table.dataset, &crate::FieldBindings::new("code", "uz"))
                .unwrap();
        assert_eq!(generated.document, "* #100 \"bosh\"\n");
    }

    #[test]
    fn test_semicolon_csv_needs_explicit_delimiter() {
        let bytes = b"code;uz\n1;bir";

        let table = parse_bytes(bytes, TableFormat::Csv, None).unwrap();
        assert_eq!(table.dataset.columns, vec!["code;uz"]);

        let table = parse_bytes(bytes, TableFormat::Csv, Some(';')).unwrap();
        assert_eq!(table.delimiter, Some(';'));
        assert_eq!(table.dataset.columns, vec!["code", "uz"]);
    }

    #[test]
    fn test_tsv_uses_tab_even_with_commas() {
        let table = parse_bytes(b"code\tuz\n1\ta, b, c", TableFormat::Tsv, None).unwrap();
        assert_eq!(table.delimiter, Some('\t'));
        assert_eq!(table.dataset.rows[0].get("uz").normalized(), Some("a, b, c".into()));
    }

    #[test]
    fn test_explicit_delimiter_wins() {
        let table = parse_bytes(b"a;b|c\n1;2|3", TableFormat::Csv, Some('|')).unwrap();
        assert_eq!(table.dataset.columns, vec!["a;b", "c"]);
    }

    #[test]
    fn test_non_byte_delimiter_rejected() {
        let err = parse_bytes(b"a,b", TableFormat::Csv, Some('→')).unwrap_err();
        assert!(matches!(err, InputError::Unreadable { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_bytes(b"  \n", TableFormat::Csv, None),
            Err(InputError::Empty)
        ));
    }

    #[test]
    fn test_read_table_not_found() {
        let err = read_table(&PathBuf::from("/definitely/missing.csv"), &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
    }

    #[test]
    fn test_read_table_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.json");
        std::fs::write(&path, "{}").unwrap();

        let err = read_table(&path, &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, InputError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_read_table_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.csv");
        std::fs::write(&path, "code,uz,lang:tr\n100,bosh,baş\n").unwrap();

        let table = read_table(&path, &ReadOptions::default()).unwrap();
        assert_eq!(table.format, TableFormat::Csv);
        assert_eq!(table.dataset.columns, vec!["code", "uz", "lang:tr"]);
        assert_eq!(table.dataset.rows.len(), 1);
        assert!(table.sheet.is_none());
    }

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("  code ", 0), "code");
        assert_eq!(header_name(" ", 3), "Unnamed: 3");
    }
}
