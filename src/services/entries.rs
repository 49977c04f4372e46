use chrono::{NaiveDate, Utc};
use sqlx::SqliteConnection;

use crate::{
    models::entry::{EntryFields, JournalEntry, ListOrder},
    services::metrics::ENTRY_WRITES_COUNTER,
};

const COLUMNS: &str =
    "id, created_at, entry_date, reading, exercise, no_meat, flossing, health, notes";

/// Storage for journal entries. Callers hand in the connection they acquired for
/// the request, so it goes back to the pool whichever way the request ends.
pub struct EntryService;

impl EntryService {
    /// Insert a new entry. The store assigns `id` and `created_at`.
    pub async fn create(
        conn: &mut SqliteConnection,
        fields: &EntryFields,
    ) -> Result<JournalEntry, sqlx::Error> {
        let entry = sqlx::query_as::<_, JournalEntry>(&format!(
            r#"INSERT INTO entries
                   (created_at, entry_date, reading, exercise, no_meat, flossing, health, notes)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {COLUMNS}"#
        ))
        .bind(Utc::now())
        .bind(fields.entry_date)
        .bind(fields.reading)
        .bind(fields.exercise)
        .bind(fields.no_meat)
        .bind(fields.flossing)
        .bind(&fields.health)
        .bind(&fields.notes)
        .fetch_one(&mut *conn)
        .await?;

        ENTRY_WRITES_COUNTER.with_label_values(&["create"]).inc();
        tracing::info!(id = entry.id, date = %entry.entry_date, "journal entry created");
        Ok(entry)
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<JournalEntry>, sqlx::Error> {
        sqlx::query_as::<_, JournalEntry>(&format!("SELECT {COLUMNS} FROM entries WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Entries in the given order, at most `limit` of them when set.
    pub async fn list(
        conn: &mut SqliteConnection,
        order: ListOrder,
        limit: Option<i64>,
    ) -> Result<Vec<JournalEntry>, sqlx::Error> {
        // SQLite treats a negative LIMIT as "no limit".
        sqlx::query_as::<_, JournalEntry>(&format!(
            "SELECT {COLUMNS} FROM entries ORDER BY {} LIMIT ?",
            order.sql()
        ))
        .bind(limit.unwrap_or(-1))
        .fetch_all(&mut *conn)
        .await
    }

    /// Entries with `entry_date` in `[start, end]`, oldest first.
    pub async fn list_by_date_range(
        conn: &mut SqliteConnection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>, sqlx::Error> {
        sqlx::query_as::<_, JournalEntry>(&format!(
            r#"SELECT {COLUMNS} FROM entries
               WHERE entry_date BETWEEN ? AND ?
               ORDER BY {}"#,
            ListOrder::DateAsc.sql()
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&mut *conn)
        .await
    }

    /// Replace every mutable field. Returns false when no entry has this id.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        fields: &EntryFields,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"UPDATE entries SET
                   entry_date = ?,
                   reading    = ?,
                   exercise   = ?,
                   no_meat    = ?,
                   flossing   = ?,
                   health     = ?,
                   notes      = ?
               WHERE id = ?"#,
        )
        .bind(fields.entry_date)
        .bind(fields.reading)
        .bind(fields.exercise)
        .bind(fields.no_meat)
        .bind(fields.flossing)
        .bind(&fields.health)
        .bind(&fields.notes)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            ENTRY_WRITES_COUNTER.with_label_values(&["update"]).inc();
            tracing::info!(id, "journal entry updated");
        }
        Ok(updated)
    }

    /// Returns false when no entry has this id.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            ENTRY_WRITES_COUNTER.with_label_values(&["delete"]).inc();
            tracing::info!(id, "journal entry deleted");
        }
        Ok(deleted)
    }

    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM entries")
            .fetch_one(&mut *conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields(y: i32, m: u32, d: u32) -> EntryFields {
        EntryFields::new(date(y, m, d))
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let submitted = EntryFields {
            entry_date: date(2024, 1, 5),
            reading: true,
            exercise: false,
            no_meat: 3,
            flossing: true,
            health: "good".into(),
            notes: "ran 5k <fast>".into(),
        };
        let created = EntryService::create(&mut conn, &submitted).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.fields(), submitted);

        let fetched = EntryService::get(&mut conn, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let a = EntryService::create(&mut conn, &fields(2024, 1, 1)).await.unwrap();
        let b = EntryService::create(&mut conn, &fields(2024, 1, 1)).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        assert!(EntryService::get(&mut conn, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn date_range_is_inclusive_and_ascending() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        for (y, m, d) in [(2024, 2, 1), (2024, 1, 20), (2024, 1, 5)] {
            EntryService::create(&mut conn, &fields(y, m, d)).await.unwrap();
        }

        let found = EntryService::list_by_date_range(&mut conn, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        let dates: Vec<_> = found.iter().map(|e| e.entry_date).collect();
        assert_eq!(dates, vec![date(2024, 1, 5), date(2024, 1, 20)]);

        let edges = EntryService::list_by_date_range(&mut conn, date(2024, 1, 20), date(2024, 2, 1))
            .await
            .unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[tokio::test]
    async fn list_orders_and_limits() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let first = EntryService::create(&mut conn, &fields(2024, 3, 1)).await.unwrap();
        let second = EntryService::create(&mut conn, &fields(2024, 1, 1)).await.unwrap();
        let third = EntryService::create(&mut conn, &fields(2024, 2, 1)).await.unwrap();

        let by_id = EntryService::list(&mut conn, ListOrder::IdDesc, None).await.unwrap();
        let ids: Vec<_> = by_id.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let by_date = EntryService::list(&mut conn, ListOrder::DateDesc, None).await.unwrap();
        let ids: Vec<_> = by_date.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, third.id, second.id]);

        let oldest = EntryService::list(&mut conn, ListOrder::DateAsc, Some(1)).await.unwrap();
        assert_eq!(oldest.len(), 1);
        assert_eq!(oldest[0].id, second.id);
    }

    #[tokio::test]
    async fn list_is_capped_at_limit() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        for day in 1..=28 {
            EntryService::create(&mut conn, &fields(2024, 2, day)).await.unwrap();
            EntryService::create(&mut conn, &fields(2024, 3, day)).await.unwrap();
        }
        let page = EntryService::list(&mut conn, ListOrder::IdDesc, Some(50)).await.unwrap();
        assert_eq!(page.len(), 50);
        assert_eq!(EntryService::count(&mut conn).await.unwrap(), 56);
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let original = EntryService::create(
            &mut conn,
            &EntryFields {
                entry_date: date(2024, 1, 5),
                reading: true,
                exercise: true,
                no_meat: 2,
                flossing: true,
                health: "great".into(),
                notes: "first".into(),
            },
        )
        .await
        .unwrap();

        let replacement = fields(2024, 1, 6);
        assert!(EntryService::update(&mut conn, original.id, &replacement).await.unwrap());

        let after = EntryService::get(&mut conn, original.id).await.unwrap().unwrap();
        assert_eq!(after.fields(), replacement);
        assert_eq!(after.id, original.id);
        assert_eq!(after.created_at, original.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_id_change_nothing() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let kept = EntryService::create(&mut conn, &fields(2024, 1, 5)).await.unwrap();

        assert!(!EntryService::update(&mut conn, kept.id + 100, &fields(2020, 1, 1)).await.unwrap());
        assert!(!EntryService::delete(&mut conn, kept.id + 100).await.unwrap());

        assert_eq!(EntryService::count(&mut conn).await.unwrap(), 1);
        assert_eq!(EntryService::get(&mut conn, kept.id).await.unwrap().unwrap(), kept);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let pool = db::memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let entry = EntryService::create(&mut conn, &fields(2024, 1, 5)).await.unwrap();

        assert!(EntryService::delete(&mut conn, entry.id).await.unwrap());
        assert!(EntryService::get(&mut conn, entry.id).await.unwrap().is_none());
        assert!(!EntryService::delete(&mut conn, entry.id).await.unwrap());
    }
}
