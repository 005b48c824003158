//! CSV/TSV reading with encoding detection.

use csv::ReaderBuilder;

use super::header_name;
use crate::models::{CellValue, Dataset, Row};

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always reported as `utf-8`; otherwise chardet decides.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes with the given encoding label, dropping a leading BOM.
///
/// Unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let charset = encoding.to_string();
    let label = chardet::charset2encoding(&charset);
    let decoded = match encoding_rs::Encoding::for_label(label.as_bytes()) {
        Some(enc) => enc.decode(bytes).0.into_owned(),
        None => String::from_utf8_lossy(bytes).into_owned(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Parse decoded delimited text into a [`Dataset`].
///
/// The first record is the header. Empty cells and cells past the end of a
/// short record read as [`CellValue::Missing`]; cells beyond the header
/// width are dropped.
pub fn parse_delimited(content: &str, delimiter: u8) -> Result<Dataset, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(h, i))
        .collect();

    let mut dataset = Dataset::new(&headers);

    for record in reader.records() {
        let record = record?;
        let row: Row = dataset
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cell = match record.get(i) {
                    Some(value) if !value.is_empty() => CellValue::from(value),
                    _ => CellValue::Missing,
                };
                (column.clone(), cell)
            })
            .collect();
        dataset.push_row(row);
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let ds = parse_delimited("code,uz,ru\n100,bosh,голова\n101,qo'l,", b',').unwrap();

        assert_eq!(ds.columns, vec!["code", "uz", "ru"]);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0].get("ru"), &CellValue::from("голова"));
        assert_eq!(ds.rows[1].get("ru"), &CellValue::Missing);
    }

    #[test]
    fn test_quoted_values_keep_delimiters_and_newlines() {
        let csv = "code,uz\n1,\"a, b\"\n2,\"line1\nline2\"\n3,\"say \"\"hi\"\"\"\n";
        let ds = parse_delimited(csv, b',').unwrap();

        assert_eq!(ds.rows[0].get("uz"), &CellValue::from("a, b"));
        assert_eq!(ds.rows[1].get("uz"), &CellValue::from("line1\nline2"));
        assert_eq!(ds.rows[2].get("uz"), &CellValue::from("say \"hi\""));
    }

    #[test]
    fn test_tab_delimiter_and_trimmed_headers() {
        let ds = parse_delimited(" code \t uz\n1\tbir", b'\t').unwrap();
        assert_eq!(ds.columns, vec!["code", "uz"]);
        assert_eq!(ds.rows[0].get("uz"), &CellValue::from("bir"));
    }

    #[test]
    fn test_short_and_long_rows() {
        let ds = parse_delimited("a,b,c\n1\n1,2,3,4", b',').unwrap();
        assert_eq!(ds.rows[0].get("b"), &CellValue::Missing);
        assert_eq!(ds.rows[1].get("c"), &CellValue::from("3"));
        assert_eq!(ds.rows[1].len(), 3);
    }

    #[test]
    fn test_empty_lines_skipped() {
        let ds = parse_delimited("a,b\n1,2\n\n3,4\n", b',').unwrap();
        assert_eq!(ds.rows.len(), 2);
    }

    #[test]
    fn test_blank_header_named() {
        let ds = parse_delimited("code,,uz\n1,x,y", b',').unwrap();
        assert_eq!(ds.columns, vec!["code", "Unnamed: 1", "uz"]);
    }

    #[test]
    fn test_utf8_detected_without_chardet() {
        assert_eq!(detect_encoding("qo'l,голова".as_bytes()), "utf-8");
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = "\u{feff}code,uz".as_bytes();
        assert_eq!(decode_content(bytes, "utf-8"), "code,uz");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        assert_eq!(decode_content(bytes, "iso-8859-1"), "Société");
    }
}
