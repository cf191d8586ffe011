// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

/// The local notification outbox.
#[derive(Debug, Clone)]
pub struct Notifications {
    pool: SqlitePool,
}

impl Notifications {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &NotificationRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO notifications (handle, event_id, title, body, data, deliver_at, delivered_at)
VALUES (?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.handle)
            .bind(record.event_id)
            .bind(&record.title)
            .bind(&record.body)
            .bind(&record.data)
            .bind(record.deliver_at)
            .bind(record.delivered_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[cfg(test)]
    pub async fn get(&self, handle: &str) -> Result<Option<NotificationRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT handle, event_id, title, body, data, deliver_at, delivered_at
FROM notifications
WHERE handle = ?;
";

        sqlx::query_as(SQL)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete(&self, handle: &str) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM notifications WHERE handle = ?;";

        let result = sqlx::query(SQL).bind(handle).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Undelivered notifications whose delivery time is at or before `now` (unix seconds).
    /// Those without a delivery time come first.
    pub async fn due(&self, now: i64) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT handle, event_id, title, body, data, deliver_at, delivered_at
FROM notifications
WHERE delivered_at IS NULL
  AND (deliver_at IS NULL OR deliver_at <= ?)
ORDER BY COALESCE(deliver_at, 0) ASC, handle ASC;
";

        sqlx::query_as(SQL).bind(now).fetch_all(&self.pool).await
    }

    /// Marks a pending notification as delivered. Returns `false` if there is none.
    pub async fn mark_delivered(&self, handle: &str, at: i64) -> Result<bool, sqlx::Error> {
        const SQL: &str = "\
UPDATE notifications SET delivered_at = ?
WHERE handle = ? AND delivered_at IS NULL;
";

        let result = sqlx::query(SQL)
            .bind(at)
            .bind(handle)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drops notifications delivered before `before` (unix seconds). Returns how many went.
    pub async fn purge_delivered(&self, before: i64) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM notifications WHERE delivered_at < ?;";

        let result = sqlx::query(SQL).bind(before).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// A notification row. Instants are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct NotificationRecord {
    pub handle: String,
    pub event_id: i64,
    pub title: String,
    pub body: String,
    pub data: String,
    pub deliver_at: Option<i64>,
    pub delivered_at: Option<i64>,
}
