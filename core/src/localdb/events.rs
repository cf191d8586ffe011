// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use lunacal_lunar::CalendarDate;
use sqlx::SqlitePool;

use crate::Pager;

/// The event store.
#[derive(Debug, Clone)]
pub struct Events {
    pool: SqlitePool,
}

impl Events {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new event and returns its id. The `id` of `event` is ignored.
    pub async fn insert(&self, event: &EventRecord) -> Result<i64, sqlx::Error> {
        const SQL: &str = "\
INSERT INTO events (title, description, date, start_time, end_time, reminder, schedule_handle)
VALUES (?, ?, ?, ?, ?, ?, ?);
";

        let result = sqlx::query(SQL)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.date)
            .bind(&event.start_time)
            .bind(&event.end_time)
            .bind(event.reminder)
            .bind(&event.schedule_handle)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites every field of an existing event. Returns `false` if it does not exist.
    pub async fn update(&self, event: &EventRecord) -> Result<bool, sqlx::Error> {
        const SQL: &str = "\
UPDATE events SET
    title           = ?,
    description     = ?,
    date            = ?,
    start_time      = ?,
    end_time        = ?,
    reminder        = ?,
    schedule_handle = ?
WHERE id = ?;
";

        let result = sqlx::query(SQL)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.date)
            .bind(&event.start_time)
            .bind(&event.end_time)
            .bind(event.reminder)
            .bind(&event.schedule_handle)
            .bind(event.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Records the schedule handle of an event's reminder.
    pub async fn set_schedule_handle(
        &self,
        id: i64,
        handle: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        const SQL: &str = "UPDATE events SET schedule_handle = ? WHERE id = ?;";

        let result = sqlx::query(SQL)
            .bind(handle)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM events WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: i64) -> Result<Option<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, title, description, date, start_time, end_time, reminder, schedule_handle
FROM events
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Lists events whose date lies in `[from, to]`, in chronological order.
    pub async fn list_by_date_range(
        &self,
        from: CalendarDate,
        to: CalendarDate,
        pager: &Pager,
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, title, description, date, start_time, end_time, reminder, schedule_handle
FROM events
WHERE date >= ? AND date <= ?
ORDER BY date ASC, start_time ASC, id ASC
LIMIT ? OFFSET ?;
";

        sqlx::query_as(SQL)
            .bind(from.to_string())
            .bind(to.to_string())
            .bind(pager.limit)
            .bind(pager.offset)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count_by_date_range(
        &self,
        from: CalendarDate,
        to: CalendarDate,
    ) -> Result<i64, sqlx::Error> {
        const SQL: &str = "SELECT COUNT(*) FROM events WHERE date >= ? AND date <= ?;";

        let row: (i64,) = sqlx::query_as(SQL)
            .bind(from.to_string())
            .bind(to.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

/// An event row. Dates and times are kept in their stable text forms.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub reminder: i64,
    pub schedule_handle: Option<String>,
}
