//! Fixed-width row codec.
//!
//! Layout of an encoded row (`ROW_SIZE` bytes):
//!
//! ```text
//! [0..4)     id, u32 little-endian
//! [4..36)    username, zero-padded
//! [36..291)  email, zero-padded
//! ```

use std::fmt;

use tracing::warn;

use crate::error::{Error, Result};
use crate::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

/// Text columns of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
}

impl Field {
    pub const fn offset(self) -> usize {
        match self {
            Field::Username => USERNAME_OFFSET,
            Field::Email => EMAIL_OFFSET,
        }
    }

    pub const fn size(self) -> usize {
        match self {
            Field::Username => USERNAME_SIZE,
            Field::Email => EMAIL_SIZE,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Username => f.write_str("username"),
            Field::Email => f.write_str("email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    fn text(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
        }
    }

    /// Check that both text fields fit their columns and contain no NUL
    /// bytes, i.e. that the row survives an encode/decode round trip.
    pub fn validate(&self) -> Result<()> {
        self.check_nul()?;
        for field in [Field::Username, Field::Email] {
            let len = self.text(field).len();
            if len > field.size() {
                return Err(Error::FieldTooLong {
                    field,
                    len,
                    max: field.size(),
                });
            }
        }
        Ok(())
    }

    /// NUL bytes are indistinguishable from padding once encoded.
    pub(crate) fn check_nul(&self) -> Result<()> {
        for field in [Field::Username, Field::Email] {
            if self.text(field).as_bytes().contains(&0) {
                return Err(Error::EmbeddedNul { field });
            }
        }
        Ok(())
    }

    /// Encode into a fresh buffer. Text longer than its column is cut to the
    /// longest prefix of whole characters that fits.
    pub fn encode(&self) -> [u8; ROW_SIZE] {
        let mut buf = [0u8; ROW_SIZE];
        serialize_row(self, &mut buf);
        buf
    }

    pub fn decode(src: &[u8]) -> Result<Self> {
        deserialize_row(src)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

/// Write `row` into `dst`, which must be exactly `ROW_SIZE` bytes.
///
/// Every byte of `dst` is overwritten, padding included.
pub fn serialize_row(row: &Row, dst: &mut [u8; ROW_SIZE]) {
    dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&row.id.to_le_bytes());
    for field in [Field::Username, Field::Email] {
        write_text(row.id, field, row.text(field), dst);
    }
}

fn write_text(id: u32, field: Field, text: &str, dst: &mut [u8; ROW_SIZE]) {
    let column = &mut dst[field.offset()..field.offset() + field.size()];
    let bytes = text.as_bytes();
    let len = char_floor(text, field.size());
    if len < bytes.len() {
        warn!(id, %field, len = bytes.len(), max = field.size(), "truncating text");
    }
    column[..len].copy_from_slice(&bytes[..len]);
    column[len..].fill(0);
}

// Largest `n <= max` such that `text[..n]` ends on a char boundary.
fn char_floor(text: &str, max: usize) -> usize {
    if text.len() <= max {
        return text.len();
    }
    (0..=max).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0)
}

pub fn deserialize_row(src: &[u8]) -> Result<Row> {
    if src.len() != ROW_SIZE {
        return Err(Error::RowSize {
            expected: ROW_SIZE,
            actual: src.len(),
        });
    }

    let mut id = [0u8; ID_SIZE];
    id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

    Ok(Row {
        id: u32::from_le_bytes(id),
        username: read_text(Field::Username, src)?,
        email: read_text(Field::Email, src)?,
    })
}

fn read_text(field: Field, src: &[u8]) -> Result<String> {
    let column = &src[field.offset()..field.offset() + field.size()];
    let end = column.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8(column[..end].to_vec()).map_err(|_| Error::InvalidUtf8 { field })
}
