//! SQLite-backed stand-in for the platform reminder service.
//!
//! Pending reminders live in `pending_reminders`; a host process polls
//! `due_on` to deliver them.

use super::{ReminderError, ReminderRequest, ReminderScheduler};
use crate::model::vaccine::VaccineId;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const FIRE_ON_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteReminderScheduler<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderScheduler<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// All pending reminders ordered by fire day, then id.
    pub fn pending(&self) -> Result<Vec<ReminderRequest>, ReminderError> {
        let mut stmt = self.conn.prepare(
            "SELECT vaccine_id, title, body, fire_on
             FROM pending_reminders
             ORDER BY fire_on ASC, vaccine_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut requests = Vec::new();
        while let Some(row) = rows.next()? {
            requests.push(parse_reminder_row(row)?);
        }
        Ok(requests)
    }

    /// Pending reminders firing on or before `day`.
    pub fn due_on(&self, day: NaiveDate) -> Result<Vec<ReminderRequest>, ReminderError> {
        let mut stmt = self.conn.prepare(
            "SELECT vaccine_id, title, body, fire_on
             FROM pending_reminders
             WHERE fire_on <= ?1
             ORDER BY fire_on ASC, vaccine_id ASC;",
        )?;
        let mut rows = stmt.query([day.format(FIRE_ON_FORMAT).to_string()])?;
        let mut requests = Vec::new();
        while let Some(row) = rows.next()? {
            requests.push(parse_reminder_row(row)?);
        }
        Ok(requests)
    }
}

impl ReminderScheduler for SqliteReminderScheduler<'_> {
    fn add(&self, request: &ReminderRequest) -> Result<(), ReminderError> {
        self.conn.execute(
            "INSERT INTO pending_reminders (vaccine_id, title, body, fire_on)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(vaccine_id) DO UPDATE SET
                title = excluded.title,
                body = excluded.body,
                fire_on = excluded.fire_on;",
            params![
                request.id.to_string(),
                request.title.as_str(),
                request.body.as_str(),
                request.fire_on.format(FIRE_ON_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    fn remove_pending(&self, ids: &[VaccineId]) -> Result<(), ReminderError> {
        let mut stmt = self
            .conn
            .prepare("DELETE FROM pending_reminders WHERE vaccine_id = ?1;")?;
        for id in ids {
            stmt.execute([id.to_string()])?;
        }
        Ok(())
    }
}

fn parse_reminder_row(row: &Row<'_>) -> Result<ReminderRequest, ReminderError> {
    let id_text: String = row.get("vaccine_id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        ReminderError::Backend(format!(
            "invalid uuid `{id_text}` in pending_reminders.vaccine_id"
        ))
    })?;

    let fire_on_text: String = row.get("fire_on")?;
    let fire_on = NaiveDate::parse_from_str(&fire_on_text, FIRE_ON_FORMAT).map_err(|_| {
        ReminderError::Backend(format!(
            "invalid date `{fire_on_text}` in pending_reminders.fire_on"
        ))
    })?;

    Ok(ReminderRequest {
        id,
        title: row.get("title")?,
        body: row.get("body")?,
        fire_on,
    })
}
