//! In-memory, page-backed row store.
//!
//! Rows have a fixed schema (`id`, `username`, `email`) and a fixed encoded
//! width, so a table is just an array of 4KB pages with rows packed back to
//! back. Pages are allocated on first write.

pub mod error;
pub mod page;
pub mod row;
pub mod statement;
pub mod table;

pub use error::{Error, Result};
pub use page::Page;
pub use row::{Field, Row};
pub use statement::{MetaCommand, PrepareError, Statement};
pub use table::{OverflowPolicy, Table};

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;
pub const ID_SIZE: usize = size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;
