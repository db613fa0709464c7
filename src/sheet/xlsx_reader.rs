use crate::model::SheetError;
use calamine::{Data, Reader, Xlsx, open_workbook};

/// Seam for row acquisition; the pipeline only ever sees string cells.
pub trait SheetReader {
    fn load_rows(&self) -> Result<Vec<Vec<String>>, SheetError>;
}

pub struct XlsxSheetReader {
    path: String,
}

impl XlsxSheetReader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SheetReader for XlsxSheetReader {
    /// Загружает первый лист книги; пустые ячейки нормализуются в "".
    fn load_rows(&self) -> Result<Vec<Vec<String>>, SheetError> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .ok_or(SheetError::NoSheet)?
            .clone();

        let range = workbook.worksheet_range(&sheet_name)?;

        Ok(range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect())
            .collect())
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        // Date cells surface as their raw serial number, same as the export
        // this sheet historically came from. The numeric parser's sanity
        // ceiling rejects them downstream.
        Data::DateTime(dt) => format_float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}
