//! Window session persistence.
//!
//! # Responsibility
//! - Remember the last geometry of each `(app id, window key)` pair.
//! - Keep SQL details behind the `LayoutStore` contract.
//!
//! # Invariants
//! - Persistence is best-effort from the desktop's point of view: a store
//!   failure is logged and never blocks a window transition.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod layout_store;

pub use layout_store::{LayoutStore, SqliteLayoutStore, WindowLayout};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    Db(DbError),
    InvalidData(String),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted layout data: {message}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SessionError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SessionError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
