//! Spreadsheet import: the source port and the row parser.

pub mod parser;

pub use parser::{parse_rows, CandidateDish, CandidateMenu, CandidateSubmenu, CandidateTree};

use async_trait::async_trait;

use crate::error::DomainError;

/// One row of the import sheet, header-less. `number` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub number: usize,
    pub cells: Vec<Option<String>>,
}

impl ImportRow {
    pub fn new(number: usize, cells: Vec<Option<String>>) -> Self {
        Self { number, cells }
    }

    /// Trimmed cell text, `None` when the cell is missing or blank.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells
            .get(column)
            .and_then(|c| c.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        (0..self.cells.len()).all(|c| self.cell(c).is_none())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// All rows of the source, or `None` when the source does not exist.
    async fn read_rows(&self) -> Result<Option<Vec<ImportRow>>, DomainError>;
}
