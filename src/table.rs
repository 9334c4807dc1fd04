//! Append-only table backed by lazily allocated pages.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::page::Page;
use crate::row::Row;
use crate::{ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

/// What `append` does with text longer than its column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Refuse the row with `Error::FieldTooLong`.
    #[default]
    Reject,
    /// Keep the longest whole-character prefix that fits and log a warning.
    Truncate,
}

/// An in-memory table of fixed-width rows.
///
/// Row `i` lives on page `i / ROWS_PER_PAGE` at byte offset
/// `(i % ROWS_PER_PAGE) * ROW_SIZE`. Every page holding a row below
/// `num_rows` is allocated.
pub struct Table {
    num_rows: usize,
    pages: [Option<Page>; TABLE_MAX_PAGES],
    policy: OverflowPolicy,
}

impl Table {
    pub fn new() -> Self {
        Self::with_policy(OverflowPolicy::default())
    }

    pub fn with_policy(policy: OverflowPolicy) -> Self {
        Self {
            num_rows: 0,
            pages: std::array::from_fn(|_| None),
            policy,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= TABLE_MAX_ROWS
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Number of page slots that currently hold a page.
    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_some()).count()
    }

    /// Page index and byte offset of `row`, allocating its page if absent.
    ///
    /// This is the only place pages are created. Addressing a row on an
    /// already allocated page leaves the page as is.
    pub fn address_of(&mut self, row: usize) -> Result<(usize, usize)> {
        if row >= TABLE_MAX_ROWS {
            return Err(Error::RowOutOfBounds {
                row,
                max: TABLE_MAX_ROWS,
            });
        }

        let page_num = row / ROWS_PER_PAGE;
        let offset = (row % ROWS_PER_PAGE) * ROW_SIZE;

        if self.pages[page_num].is_none() {
            debug!(page = page_num, "allocating page");
            self.pages[page_num] = Some(Page::new());
        }

        Ok((page_num, offset))
    }

    /// Append `row` as row number `num_rows`.
    ///
    /// Fails with `Error::TableFull` once `TABLE_MAX_ROWS` rows are stored;
    /// a failed append leaves the table unchanged.
    pub fn append(&mut self, row: &Row) -> Result<()> {
        if self.is_full() {
            warn!(rows = self.num_rows, "table full");
            return Err(Error::TableFull {
                max: TABLE_MAX_ROWS,
            });
        }

        match self.policy {
            OverflowPolicy::Reject => row.validate()?,
            OverflowPolicy::Truncate => row.check_nul()?,
        }

        let row_num = self.num_rows;
        let (page_num, offset) = self.address_of(row_num)?;
        let page = self.pages[page_num]
            .as_mut()
            .ok_or(Error::RowOutOfBounds {
                row: row_num,
                max: TABLE_MAX_ROWS,
            })?;
        page.write_row(offset / ROW_SIZE, &row.encode());
        self.num_rows += 1;

        debug!(row = row_num, page = page_num, offset, id = row.id, "appended row");
        Ok(())
    }

    /// Decode every stored row, in insertion order.
    pub fn scan_all(&self) -> Result<Vec<Row>> {
        (0..self.num_rows).map(|i| self.read(i)).collect()
    }

    // Reads never allocate: every page below `num_rows` already exists.
    fn read(&self, row: usize) -> Result<Row> {
        let page = self.pages[row / ROWS_PER_PAGE]
            .as_ref()
            .ok_or(Error::RowOutOfBounds {
                row,
                max: self.num_rows,
            })?;
        Row::decode(&page.read_row(row % ROWS_PER_PAGE))
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
