//! Session schema upgrades keyed by `PRAGMA user_version`.
//!
//! # Invariants
//! - Step versions are strictly increasing, starting at 1.
//! - All pending steps commit together or not at all.
//! - Every table in `SESSION_TABLES` exists once an upgrade returns `Ok`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "window_layouts",
    sql: include_str!("0001_window_layouts.sql"),
}];

const SESSION_TABLES: &[&str] = &["window_layouts"];

/// Versions before and after one upgrade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    pub from: u32,
    pub to: u32,
}

impl SchemaUpgrade {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Newest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Current `user_version` of an open connection.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the session schema up to `latest_version()`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    if from < to {
        let tx = conn.transaction()?;
        for step in STEPS.iter().skip_while(|step| step.version <= from) {
            tx.execute_batch(step.sql)?;
            tx.pragma_update(None, "user_version", step.version)?;
            info!(
                "event=db_migrate module=db status=ok version={} name={}",
                step.version, step.name
            );
        }
        tx.commit()?;
    }

    verify_session_tables(conn)?;
    Ok(SchemaUpgrade { from, to })
}

fn verify_session_tables(conn: &Connection) -> DbResult<()> {
    for &table in SESSION_TABLES {
        let present: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table],
            |row| row.get(0),
        )?;
        if !present {
            return Err(DbError::MissingTable(table));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, schema_version, SchemaUpgrade};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn fresh_database_upgrades_from_zero() {
        let mut conn = Connection::open_in_memory().expect("open");
        let upgrade = apply_migrations(&mut conn).expect("upgrade");
        assert_eq!(
            upgrade,
            SchemaUpgrade {
                from: 0,
                to: latest_version()
            }
        );
        assert!(!upgrade.is_noop());
        assert!(apply_migrations(&mut conn).expect("second run").is_noop());
    }

    #[test]
    fn dropped_session_table_is_reported() {
        let mut conn = Connection::open_in_memory().expect("open");
        apply_migrations(&mut conn).expect("upgrade");
        conn.execute_batch("DROP TABLE window_layouts;")
            .expect("drop table");

        let err = apply_migrations(&mut conn).unwrap_err();
        assert!(matches!(err, DbError::MissingTable("window_layouts")));
        assert_eq!(schema_version(&conn).expect("version"), latest_version());
    }
}
