use crate::db::models::{Note, NoteInput};
use crate::db::schema::{NOTES_TABLE, TableSpec};
use crate::error::NotesError;
use sqlx::{Pool, Row, Sqlite};
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

const SELECT_NOTE: &str =
    "SELECT id, title, content, image_data, created_at, updated_at FROM notes";

#[derive(Clone)]
pub struct NotesStorage {
    pool: SqlitePool,
}

impl NotesStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Wait for in-flight work and close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create the notes table if absent, then add any nullable columns an
    /// older store is missing. Safe to run on every startup.
    pub async fn ensure_schema(&self) -> Result<(), NotesError> {
        self.reconcile(&NOTES_TABLE).await
    }

    async fn reconcile(&self, table: &TableSpec) -> Result<(), NotesError> {
        sqlx::query(&table.create_sql()).execute(&self.pool).await?;

        let existing = self.column_names(table.name).await?;
        let missing = table.missing_columns(existing.iter().map(String::as_str));

        for column in missing {
            if !column.is_nullable() {
                return Err(NotesError::Schema(format!(
                    "table `{}` lacks required column `{}` and it cannot be added in place",
                    table.name, column.name
                )));
            }
            sqlx::query(&column.add_column_sql(table.name))
                .execute(&self.pool)
                .await?;
            info!(table = table.name, column = column.name, "added missing column");
        }
        Ok(())
    }

    pub async fn column_names(&self, table: &str) -> Result<Vec<String>, NotesError> {
        let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| row.try_get::<String, _>("name").map_err(NotesError::from))
            .collect()
    }

    /// Newest first by parsed `created_at`; equal timestamps fall back to id.
    pub async fn list(&self) -> Result<Vec<Note>, NotesError> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "{SELECT_NOTE} ORDER BY datetime(created_at) DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Note, NotesError> {
        sqlx::query_as::<_, Note>(&format!("{SELECT_NOTE} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(NotesError::NotFound)
    }

    /// Insert and read the stored row back inside one transaction.
    pub async fn insert(&self, input: NoteInput, now: &str) -> Result<Note, NotesError> {
        let mut tx = self.pool.begin().await?;

        let new_id = sqlx::query(
            r#"
            INSERT INTO notes (title, content, image_data, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(input.image_data)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let note = sqlx::query_as::<_, Note>(&format!("{SELECT_NOTE} WHERE id = ?"))
            .bind(new_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(note)
    }

    /// Rewrite every mutable field of the row. Zero rows affected is `NotFound`.
    pub async fn update_by_id(
        &self,
        id: i64,
        input: NoteInput,
        now: &str,
    ) -> Result<Note, NotesError> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE notes
            SET title = ?, content = ?, image_data = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(input.image_data)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(NotesError::NotFound);
        }

        let note = sqlx::query_as::<_, Note>(&format!("{SELECT_NOTE} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(note)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), NotesError> {
        let affected = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(NotesError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite")
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let storage = NotesStorage::new(memory_pool().await);
        storage.ensure_schema().await.expect("first run");
        storage.ensure_schema().await.expect("second run");

        let cols = storage.column_names("notes").await.unwrap();
        assert_eq!(
            cols,
            vec!["id", "title", "content", "image_data", "created_at", "updated_at"]
        );
    }

    #[tokio::test]
    async fn ensure_schema_adds_image_data_to_legacy_table() {
        let pool = memory_pool().await;
        sqlx::query(
            r#"CREATE TABLE notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES ('old', 'row', '2023-01-01T00:00:00', '2023-01-01T00:00:00')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let storage = NotesStorage::new(pool);
        storage.ensure_schema().await.expect("migration");
        storage.ensure_schema().await.expect("re-run");

        let cols = storage.column_names("notes").await.unwrap();
        assert!(cols.iter().any(|c| c == "image_data"));

        let legacy = storage.get_by_id(1).await.unwrap();
        assert_eq!(legacy.title, "old");
        assert_eq!(legacy.image_data, None);
    }

    #[tokio::test]
    async fn ensure_schema_rejects_missing_required_column() {
        let pool = memory_pool().await;
        sqlx::query("CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();

        let storage = NotesStorage::new(pool);
        assert!(matches!(
            storage.ensure_schema().await,
            Err(NotesError::Schema(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let storage = NotesStorage::new(memory_pool().await);
        storage.ensure_schema().await.unwrap();

        let err = storage
            .update_by_id(42, NoteInput::new("t", "c"), "2024-01-01T00:00:00.000000")
            .await
            .unwrap_err();
        assert!(matches!(err, NotesError::NotFound));
        assert!(matches!(
            storage.delete_by_id(42).await,
            Err(NotesError::NotFound)
        ));
    }

    #[tokio::test]
    async fn list_orders_by_parsed_timestamp_then_id() {
        let storage = NotesStorage::new(memory_pool().await);
        storage.ensure_schema().await.unwrap();

        // Lexically "2024-01-02 ..." < "2024-01-02T...", but parsed they are equal
        // to the second, so the later id wins the tie.
        let a = storage
            .insert(NoteInput::new("a", "x"), "2024-01-01T10:00:00.000000")
            .await
            .unwrap();
        let b = storage
            .insert(NoteInput::new("b", "x"), "2024-01-02T09:00:00.000000")
            .await
            .unwrap();
        let c = storage
            .insert(NoteInput::new("c", "x"), "2024-01-02 09:00:00")
            .await
            .unwrap();

        let ids: Vec<i64> = storage.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }
}
