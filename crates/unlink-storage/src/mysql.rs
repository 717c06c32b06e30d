use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{MySqlPool, Row};
use std::net::IpAddr;
use unlink_core::error::StorageError;
use unlink_core::record::{Shortcut, ShortcutRecord, Visit};
use unlink_core::repository::{ReadRepository, Repository, Result};

/// MySQL implementation of the repository contract.
///
/// Records live in `shortcuts`; the visit log lives in the append-only
/// `shortcut_visits` child table, ordered by auto-increment id, with an
/// `ON DELETE CASCADE` foreign key so a record and its history are
/// removed together. The owner-gated writes are single conditional
/// statements (`... WHERE shortcut = ? AND owner = ?`), so the
/// check-then-act never spans two round trips.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_visitor_ip(raw: &str) -> Result<IpAddr> {
    raw.parse::<IpAddr>()
        .map_err(|e| StorageError::InvalidData(format!("invalid visitor ip '{}': {e}", raw)))
}

fn parse_visited_at(millis: i64) -> Result<Timestamp> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid visit timestamp '{}': {e}", millis))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_foreign_key_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, shortcut: &Shortcut) -> Result<Option<ShortcutRecord>> {
        let row = sqlx::query(
            r#"
            SELECT target_url, owner
            FROM shortcuts
            WHERE shortcut = ?
            LIMIT 1
            "#,
        )
        .bind(shortcut.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let target_url: String = row.try_get("target_url").map_err(map_sqlx_error)?;
        let owner: String = row.try_get("owner").map_err(map_sqlx_error)?;

        let visit_rows = sqlx::query(
            r#"
            SELECT visitor_ip, visited_at_ms
            FROM shortcut_visits
            WHERE shortcut = ?
            ORDER BY id
            "#,
        )
        .bind(shortcut.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut visitors = Vec::with_capacity(visit_rows.len());
        for visit_row in visit_rows {
            let ip_raw: String = visit_row.try_get("visitor_ip").map_err(map_sqlx_error)?;
            let at_millis: i64 = visit_row.try_get("visited_at_ms").map_err(map_sqlx_error)?;
            visitors.push(Visit {
                ip: parse_visitor_ip(&ip_raw)?,
                at: parse_visited_at(at_millis)?,
            });
        }

        Ok(Some(ShortcutRecord {
            shortcut: shortcut.clone(),
            target_url,
            owner,
            visitors,
        }))
    }

    async fn exists(&self, shortcut: &Shortcut) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM shortcuts
            WHERE shortcut = ?
            LIMIT 1
            "#,
        )
        .bind(shortcut.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, record: ShortcutRecord) -> Result<()> {
        // Records are always born with an empty visit log; visits only
        // enter through `push_visit`.
        let result = sqlx::query(
            r#"
            INSERT INTO shortcuts (shortcut, target_url, owner)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(record.shortcut.as_str())
        .bind(record.target_url)
        .bind(record.owner)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(record.shortcut.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn update_target(
        &self,
        shortcut: &Shortcut,
        owner: &str,
        target_url: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE shortcuts
            SET target_url = ?
            WHERE shortcut = ?
              AND owner = ?
            "#,
        )
        .bind(target_url)
        .bind(shortcut.as_str())
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, shortcut: &Shortcut, owner: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM shortcuts
            WHERE shortcut = ?
              AND owner = ?
            "#,
        )
        .bind(shortcut.as_str())
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn push_visit(&self, shortcut: &Shortcut, visit: Visit) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO shortcut_visits (shortcut, visitor_ip, visited_at_ms)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(shortcut.as_str())
        .bind(visit.ip.to_string())
        .bind(visit.at.as_millisecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            // No parent row: the shortcut does not exist, and a visit
            // must never create one.
            Err(err) if is_foreign_key_violation(&err) => Ok(false),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
