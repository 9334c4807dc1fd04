//! Text front end: meta-commands and `insert`/`select` statements.

use thiserror::Error;

use crate::error::Result;
use crate::row::Row;
use crate::table::{OverflowPolicy, Table};
use crate::{EMAIL_SIZE, USERNAME_SIZE};

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ => {
                if input.starts_with('.') {
                    Some(MetaCommand::Unrecognized)
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("String is too long.")]
    StringTooLong,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("Unrecognized command: {0}")]
    Unrecognized(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

impl Statement {
    /// Parse one input line. Under `OverflowPolicy::Reject`, over-long text
    /// is refused here so the user sees it before anything is stored.
    pub fn prepare(
        input: &str,
        policy: OverflowPolicy,
    ) -> std::result::Result<Self, PrepareError> {
        let mut words = input.split_whitespace();
        match words.next() {
            Some("select") => Ok(Statement::Select),
            Some("insert") => {
                let (Some(id), Some(username), Some(email)) =
                    (words.next(), words.next(), words.next())
                else {
                    return Err(PrepareError::SyntaxError);
                };

                let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
                if id < 0 {
                    return Err(PrepareError::NegativeId);
                }
                let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

                if policy == OverflowPolicy::Reject
                    && (username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE)
                {
                    return Err(PrepareError::StringTooLong);
                }

                Ok(Statement::Insert(Row::new(id, username, email)))
            }
            _ => Err(PrepareError::Unrecognized(input.to_string())),
        }
    }

    /// Run against `table`. Inserts return no rows; select returns them all.
    pub fn execute(&self, table: &mut Table) -> Result<Vec<Row>> {
        match self {
            Statement::Insert(row) => {
                table.append(row)?;
                Ok(Vec::new())
            }
            Statement::Select => table.scan_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn prepare(input: &str) -> std::result::Result<Statement, PrepareError> {
        Statement::prepare(input, OverflowPolicy::Reject)
    }

    #[test]
    fn test_meta_commands() {
        assert_eq!(MetaCommand::parse(".exit"), Some(MetaCommand::Exit));
        assert_eq!(MetaCommand::parse(".tables"), Some(MetaCommand::Unrecognized));
        assert_eq!(MetaCommand::parse("select"), None);
    }

    #[test]
    fn test_prepare_insert() {
        assert_eq!(
            prepare("insert 1 user1 person1@example.com").unwrap(),
            Statement::Insert(Row::new(1, "user1", "person1@example.com"))
        );
        assert_eq!(prepare("select").unwrap(), Statement::Select);
    }

    #[test]
    fn test_prepare_errors() {
        assert_eq!(prepare("insert 1 user1").unwrap_err(), PrepareError::SyntaxError);
        assert_eq!(prepare("insert x user1 e").unwrap_err(), PrepareError::SyntaxError);
        assert_eq!(
            prepare("insert 4294967296 user1 e").unwrap_err(),
            PrepareError::SyntaxError
        );
        assert_eq!(prepare("insert -1 user1 e").unwrap_err(), PrepareError::NegativeId);
        assert_eq!(
            prepare("delete 1").unwrap_err(),
            PrepareError::Unrecognized("delete 1".to_string())
        );
    }

    #[test]
    fn test_prepare_string_too_long() {
        let input = format!("insert 1 {} e", "a".repeat(USERNAME_SIZE + 1));
        assert_eq!(prepare(&input).unwrap_err(), PrepareError::StringTooLong);

        let input = format!("insert 1 u {}", "a".repeat(EMAIL_SIZE + 1));
        assert_eq!(prepare(&input).unwrap_err(), PrepareError::StringTooLong);

        let input = format!("insert 1 {} e", "a".repeat(USERNAME_SIZE + 1));
        assert!(Statement::prepare(&input, OverflowPolicy::Truncate).is_ok());
    }

    #[test]
    fn test_execute() {
        let mut table = Table::new();
        let insert = prepare("insert 1 user1 person1@example.com").unwrap();

        assert!(insert.execute(&mut table).unwrap().is_empty());
        assert_eq!(
            Statement::Select.execute(&mut table).unwrap(),
            vec![Row::new(1, "user1", "person1@example.com")]
        );
    }

    #[test]
    fn test_execute_table_full() {
        let mut table = Table::new();
        for i in 0..crate::TABLE_MAX_ROWS as u32 {
            Statement::Insert(Row::new(i, "u", "e")).execute(&mut table).unwrap();
        }
        let err = Statement::Insert(Row::new(0, "u", "e"))
            .execute(&mut table)
            .unwrap_err();
        assert!(matches!(err, Error::TableFull { .. }));
    }
}
