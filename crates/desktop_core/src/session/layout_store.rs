//! Window layout store contract and SQLite implementation.

use crate::model::geometry::{Position, Size};
use crate::model::window::WindowInstance;
use crate::session::{SessionError, SessionResult};
use rusqlite::{params, Connection, Row};
use std::time::{SystemTime, UNIX_EPOCH};

/// Last known geometry of one window template for one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLayout {
    pub app_id: String,
    pub window_key: String,
    pub position: Position,
    pub size: Size,
    pub maximized: bool,
}

impl WindowLayout {
    /// Captures the live geometry of `window`.
    pub fn capture(app_id: impl Into<String>, window: &WindowInstance) -> Self {
        Self {
            app_id: app_id.into(),
            window_key: window.window_key.clone(),
            position: window.position,
            size: window.size,
            maximized: window.maximized,
        }
    }

    /// Writes this layout onto a freshly created window.
    pub fn apply_to(&self, window: &mut WindowInstance) {
        window.position = self.position;
        window.size = self.size;
        window.maximized = self.maximized && window.capabilities.maximizable;
    }
}

pub trait LayoutStore {
    fn load(&self, app_id: &str, window_key: &str) -> SessionResult<Option<WindowLayout>>;
    fn save(&self, layout: &WindowLayout) -> SessionResult<()>;
    /// Drops every layout of one app; returns the number of removed rows.
    fn forget(&self, app_id: &str) -> SessionResult<usize>;
}

/// SQLite-backed layout store over the `window_layouts` table.
pub struct SqliteLayoutStore {
    conn: Connection,
}

impl SqliteLayoutStore {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl LayoutStore for SqliteLayoutStore {
    fn load(&self, app_id: &str, window_key: &str) -> SessionResult<Option<WindowLayout>> {
        let mut stmt = self.conn.prepare(
            "SELECT app_id, window_key, x, y, width, height, maximized
             FROM window_layouts
             WHERE app_id = ?1 AND window_key = ?2;",
        )?;
        let mut rows = stmt.query(params![app_id, window_key])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_layout_row(row)?)),
            None => Ok(None),
        }
    }

    fn save(&self, layout: &WindowLayout) -> SessionResult<()> {
        self.conn.execute(
            "INSERT INTO window_layouts (app_id, window_key, x, y, width, height, maximized, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT (app_id, window_key) DO UPDATE SET
                x = excluded.x,
                y = excluded.y,
                width = excluded.width,
                height = excluded.height,
                maximized = excluded.maximized,
                updated_at = excluded.updated_at;",
            params![
                layout.app_id,
                layout.window_key,
                layout.position.x,
                layout.position.y,
                layout.size.width,
                layout.size.height,
                i64::from(layout.maximized),
                now_epoch_ms(),
            ],
        )?;
        Ok(())
    }

    fn forget(&self, app_id: &str) -> SessionResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM window_layouts WHERE app_id = ?1;", [app_id])?;
        Ok(removed)
    }
}

fn parse_layout_row(row: &Row<'_>) -> SessionResult<WindowLayout> {
    let maximized: i64 = row.get(6)?;
    let maximized = match maximized {
        0 => false,
        1 => true,
        other => {
            return Err(SessionError::InvalidData(format!(
                "maximized flag must be 0 or 1, got {other}"
            )))
        }
    };
    Ok(WindowLayout {
        app_id: row.get(0)?,
        window_key: row.get(1)?,
        position: Position::new(row.get(2)?, row.get(3)?),
        size: Size::new(row.get(4)?, row.get(5)?),
        maximized,
    })
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
