use super::models::SettingModel;
use chrono::Utc;
use sqlx::{Error as SqlxError, sqlite::SqlitePool};

/// Finds a setting by key
pub async fn find_by_key(
    pool: &SqlitePool,
    key: &str,
) -> Result<Option<SettingModel>, SqlxError> {
    sqlx::query_as::<_, SettingModel>(
        r#"
        SELECT key, value, updated_at
        FROM settings
        WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}

/// Stores a value under `key`, replacing any previous one
pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> Result<SettingModel, SqlxError> {
    let updated_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(&updated_at)
    .execute(pool)
    .await?;

    Ok(SettingModel {
        key: key.to_string(),
        value: value.to_string(),
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_key_is_none() {
        let pool = memory_pool().await.unwrap();
        assert_eq!(find_by_key(&pool, "nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn upsert_replaces_the_previous_value() {
        let pool = memory_pool().await.unwrap();
        upsert(&pool, "memoryBestScores", r#"{"easy":10}"#)
            .await
            .unwrap();
        let stored = upsert(&pool, "memoryBestScores", r#"{"easy":8}"#)
            .await
            .unwrap();

        let found = find_by_key(&pool, "memoryBestScores").await.unwrap();
        assert_eq!(found.as_ref(), Some(&stored));
        assert_eq!(stored.value, r#"{"easy":8}"#);
    }
}
