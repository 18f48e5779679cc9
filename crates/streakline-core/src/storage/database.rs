//! SQLite-based habit and completion storage.
//!
//! Provides persistent storage for:
//! - Habits (create, list, archive, delete)
//! - Per-day completion records, one per `(habit_id, date)`

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::data_dir;
use super::migrations;
use crate::error::{DatabaseError, Result, ValidationError};
use crate::habit::{CompletionRecord, Habit, NewHabit};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Anything that can hand back every completion record of a habit.
pub trait CompletionSource {
    /// All records for `habit_id`, in no particular order.
    ///
    /// # Errors
    /// Returns an error if the underlying store cannot be read.
    fn completions_for(&self, habit_id: &str) -> Result<Vec<CompletionRecord>>;
}

impl<T: CompletionSource + ?Sized> CompletionSource for &T {
    fn completions_for(&self, habit_id: &str) -> Result<Vec<CompletionRecord>> {
        (**self).completions_for(habit_id)
    }
}

/// SQLite database for habits and completions.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/streakline.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("streakline.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("opened database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a habit from validated input.
    ///
    /// # Errors
    /// Returns a validation error for bad input or a database error if the
    /// insert fails.
    pub fn create_habit(&self, new: &NewHabit) -> Result<Habit> {
        new.validate()?;

        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            description: new
                .description
                .as_ref()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            created_at: Utc::now(),
            archived: false,
        };

        self.conn.execute(
            "INSERT INTO habits (id, name, description, created_at, archived)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![
                habit.id,
                habit.name,
                habit.description,
                habit.created_at.to_rfc3339(),
            ],
        )?;

        tracing::info!(habit_id = %habit.id, name = %habit.name, "created habit");
        Ok(habit)
    }

    /// Look up a habit by id.
    ///
    /// # Errors
    /// Returns [`DatabaseError::HabitNotFound`] if no such habit exists.
    pub fn get_habit(&self, id: &str) -> Result<Habit> {
        let habit = self
            .conn
            .query_row(
                "SELECT id, name, description, created_at, archived FROM habits WHERE id = ?1",
                params![id],
                row_to_habit,
            )
            .optional()?;
        habit.ok_or_else(|| DatabaseError::HabitNotFound(id.to_string()).into())
    }

    /// List habits, oldest first.
    pub fn list_habits(&self, include_archived: bool) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, created_at, archived
             FROM habits
             WHERE ?1 OR archived = 0
             ORDER BY created_at ASC, name ASC",
        )?;
        let habits = stmt
            .query_map(params![include_archived], row_to_habit)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(habits)
    }

    /// Archive or restore a habit.
    ///
    /// # Errors
    /// Returns [`DatabaseError::HabitNotFound`] if no such habit exists.
    pub fn set_archived(&self, id: &str, archived: bool) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE habits SET archived = ?2 WHERE id = ?1",
            params![id, archived],
        )?;
        if changed == 0 {
            return Err(DatabaseError::HabitNotFound(id.to_string()).into());
        }
        tracing::info!(habit_id = %id, archived, "updated habit archive flag");
        Ok(())
    }

    /// Delete a habit together with all of its completions.
    ///
    /// # Errors
    /// Returns [`DatabaseError::HabitNotFound`] if no such habit exists.
    pub fn delete_habit(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::HabitNotFound(id.to_string()).into());
        }
        tracing::info!(habit_id = %id, "deleted habit");
        Ok(())
    }

    /// Report the outcome of `habit_id` on `date`, replacing any earlier
    /// report for that day.
    ///
    /// # Errors
    /// Returns [`DatabaseError::HabitNotFound`] for an unknown habit and a
    /// validation error for an archived one.
    pub fn record_completion(
        &self,
        habit_id: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<CompletionRecord> {
        let habit = self.get_habit(habit_id)?;
        if habit.archived {
            return Err(ValidationError::InvalidValue {
                field: "habit_id".to_string(),
                message: format!("habit '{}' is archived", habit.name),
            }
            .into());
        }

        self.conn.execute(
            "INSERT INTO completions (habit_id, date, completed, recorded_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(habit_id, date)
             DO UPDATE SET completed = excluded.completed, recorded_at = excluded.recorded_at",
            params![
                habit_id,
                date.format(DATE_FORMAT).to_string(),
                completed,
                Utc::now().to_rfc3339(),
            ],
        )?;

        tracing::info!(habit_id = %habit_id, %date, completed, "recorded completion");
        Ok(CompletionRecord::new(habit_id, date, completed))
    }

    /// Remove the record for `habit_id` on `date`. Returns whether one existed.
    pub fn clear_completion(&self, habit_id: &str, date: NaiveDate) -> Result<bool> {
        let changed = self.conn.execute(
            "DELETE FROM completions WHERE habit_id = ?1 AND date = ?2",
            params![habit_id, date.format(DATE_FORMAT).to_string()],
        )?;
        tracing::info!(habit_id = %habit_id, %date, removed = changed > 0, "cleared completion");
        Ok(changed > 0)
    }

    /// Records for `habit_id` between `start` and `end` inclusive, ascending.
    pub fn completions_in_range(
        &self,
        habit_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT habit_id, date, completed
             FROM completions
             WHERE habit_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date ASC",
        )?;
        let records = stmt
            .query_map(
                params![
                    habit_id,
                    start.format(DATE_FORMAT).to_string(),
                    end.format(DATE_FORMAT).to_string(),
                ],
                row_to_completion,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

impl CompletionSource for Database {
    fn completions_for(&self, habit_id: &str) -> Result<Vec<CompletionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT habit_id, date, completed FROM completions WHERE habit_id = ?1",
        )?;
        let records = stmt
            .query_map(params![habit_id], row_to_completion)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn row_to_habit(row: &rusqlite::Row) -> std::result::Result<Habit, rusqlite::Error> {
    let created_at: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at,
        archived: row.get(4)?,
    })
}

fn row_to_completion(row: &rusqlite::Row) -> std::result::Result<CompletionRecord, rusqlite::Error> {
    let date: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(CompletionRecord {
        habit_id: row.get(0)?,
        date,
        completed: row.get(2)?,
    })
}
