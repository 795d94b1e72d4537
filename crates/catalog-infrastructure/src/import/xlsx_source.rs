// ============================================================================
// Catalog Infrastructure - XLSX Import Source
// File: crates/catalog-infrastructure/src/import/xlsx_source.rs
// ============================================================================
//! Reads the first worksheet of an `.xlsx` file with calamine. The sheet has
//! no header row. Cell positions are absolute: calamine trims leading empty
//! rows and columns from the used range, so they are added back here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use tracing::debug;

use catalog_core::error::DomainError;
use catalog_core::import::{ImportRow, ImportSource};

pub struct XlsxImportSource {
    path: PathBuf,
}

impl XlsxImportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(d) => Some(d.to_string()),
        Data::DateTimeIso(d) => Some(d.clone()),
        Data::DurationIso(d) => Some(d.clone()),
        Data::Error(_) | Data::Empty => None,
    }
}

fn range_rows(range: &Range<Data>) -> Vec<ImportRow> {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));

    range
        .rows()
        .enumerate()
        .map(|(offset, cells)| {
            let mut row: Vec<Option<String>> = vec![None; first_col as usize];
            row.extend(cells.iter().map(cell_text));
            ImportRow::new(first_row as usize + offset + 1, row)
        })
        .collect()
}

fn read_workbook(path: &Path) -> Result<Option<Vec<ImportRow>>, DomainError> {
    if !path.exists() {
        return Ok(None);
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| DomainError::ImportError(format!("Failed to open {}: {}", path.display(), e)))?;

    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Some(Vec::new()));
    };
    let range = range
        .map_err(|e| DomainError::ImportError(format!("Failed to read worksheet: {}", e)))?;

    Ok(Some(range_rows(&range)))
}

#[async_trait]
impl ImportSource for XlsxImportSource {
    async fn read_rows(&self) -> Result<Option<Vec<ImportRow>>, DomainError> {
        let path = self.path.clone();
        let rows = tokio::task::spawn_blocking(move || read_workbook(&path))
            .await
            .map_err(|e| DomainError::InternalError(format!("Import task failed: {}", e)))??;

        if let Some(rows) = &rows {
            debug!("Read {} rows from {}", rows.len(), self.path.display());
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let source = XlsxImportSource::new(dir.path().join("Menu.xlsx"));

        assert_eq!(source.read_rows().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Menu.xlsx");
        std::fs::write(&path, b"not a spreadsheet").unwrap();

        let result = XlsxImportSource::new(&path).read_rows().await;

        assert!(matches!(result, Err(DomainError::ImportError(_))));
    }

    #[test]
    fn test_cell_text_conversion() {
        assert_eq!(cell_text(&Data::Float(12.5)).as_deref(), Some("12.5"));
        assert_eq!(cell_text(&Data::Float(9.0)).as_deref(), Some("9"));
        assert_eq!(cell_text(&Data::Int(3)).as_deref(), Some("3"));
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn test_range_offsets_are_restored() {
        let mut range = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("a".into()));
        range.set_value((3, 2), Data::String("b".into()));

        let rows = range_rows(&range);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 3);
        assert_eq!(rows[0].cell(1), Some("a"));
        assert_eq!(rows[1].cell(2), Some("b"));
        assert_eq!(rows[1].cell(0), None);
    }
}
