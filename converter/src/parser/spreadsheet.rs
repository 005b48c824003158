//! Workbook reading (xlsx, xlsm, xls, xlsb, ods) through calamine.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use super::header_name;
use crate::error::{InputError, InputResult};
use crate::models::{CellValue, Dataset, Row};

/// Convert a spreadsheet cell.
///
/// Error cells (`#N/A`, `#REF!`, ...) read as missing.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

/// Build a dataset from sheet rows; the first row is the header.
pub fn rows_to_dataset<'a, I>(mut rows: I) -> InputResult<Dataset>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows.next().ok_or(InputError::Empty)?;
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let raw = cell_value(cell).render().unwrap_or_default();
            header_name(&raw, i)
        })
        .collect();

    let mut dataset = Dataset::new(&columns);
    for cells in rows {
        let row: Row = dataset
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cell = cells.get(i).map(cell_value).unwrap_or_default();
                (column.clone(), cell)
            })
            .collect();
        dataset.push_row(row);
    }

    Ok(dataset)
}

/// Read one sheet of a workbook: `sheet` by name, or the first sheet.
///
/// Returns the dataset and the name of the sheet actually read.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> InputResult<(Dataset, String)> {
    let unreadable = |message: String| InputError::Unreadable {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| InputError::SheetNotFound(wanted.to_string()))?,
        None => names.first().cloned().ok_or(InputError::Empty)?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| unreadable(e.to_string()))?;

    let dataset = rows_to_dataset(range.rows())?;
    Ok((dataset, name))
}
