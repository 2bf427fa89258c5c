//! Run one SQL statement with positional parameters and marshal the rows.

use crate::error::AppError;
use crate::sql::{row_to_json, SqliteBindValue};
use serde_json::Value;
use sqlx::SqlitePool;

pub struct QueryService;

impl QueryService {
    /// Execute `sql` binding `params` to `?` placeholders in order. Statements that return
    /// no rows (DDL, INSERT without RETURNING) yield an empty list.
    pub async fn execute(pool: &SqlitePool, sql: &str, params: &[Value]) -> Result<Vec<Value>, AppError> {
        tracing::info!("Executing SQL: {} with params: {:?}", sql, params);
        let mut query = sqlx::query(sql);
        for p in params {
            query = query.bind(SqliteBindValue::from_json(p));
        }
        let rows = query.fetch_all(pool).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(row_to_json(row)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::open_database;
    use serde_json::json;

    #[tokio::test]
    async fn storage_classes_map_to_json() {
        let pool = open_database(":memory:", None).await.unwrap();
        let rows = QueryService::execute(
            &pool,
            "SELECT 1 AS i, 2.5 AS r, 'txt' AS t, NULL AS n, x'6869' AS b",
            &[],
        )
        .await
        .unwrap();
        assert_eq!(rows, vec![json!({"i": 1, "r": 2.5, "t": "txt", "n": null, "b": "hi"})]);
    }

    #[tokio::test]
    async fn non_finite_reals_and_invalid_utf8_blobs() {
        let pool = open_database(":memory:", None).await.unwrap();
        let rows = QueryService::execute(&pool, "SELECT 1e308 * 10 AS inf, x'ff68' AS b", &[])
            .await
            .unwrap();
        assert_eq!(rows, vec![json!({"inf": null, "b": "\u{FFFD}h"})]);
    }

    #[tokio::test]
    async fn integers_beyond_i64_bind_as_text() {
        let pool = open_database(":memory:", None).await.unwrap();
        let rows = QueryService::execute(&pool, "SELECT ? AS v, typeof(?) AS t", &[json!(u64::MAX), json!(u64::MAX)])
            .await
            .unwrap();
        assert_eq!(rows, vec![json!({"v": u64::MAX.to_string(), "t": "text"})]);
    }

    #[tokio::test]
    async fn binds_positional_params() {
        let pool = open_database(":memory:", None).await.unwrap();
        let rows = QueryService::execute(
            &pool,
            "SELECT ? AS a, ? AS b, ? AS c, ? AS d, json_extract(?, '$.k') AS e",
            &[json!(7), json!("x"), json!(null), json!(true), json!({"k": "v"})],
        )
        .await
        .unwrap();
        assert_eq!(rows, vec![json!({"a": 7, "b": "x", "c": null, "d": 1, "e": "v"})]);
    }

    #[tokio::test]
    async fn statements_without_rows_return_empty() {
        let pool = open_database(":memory:", None).await.unwrap();
        let rows = QueryService::execute(&pool, "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", &[])
            .await
            .unwrap();
        assert!(rows.is_empty());
        QueryService::execute(&pool, "INSERT INTO t (name) VALUES (?)", &[json!("a")])
            .await
            .unwrap();
        let rows = QueryService::execute(&pool, "SELECT id, name FROM t", &[]).await.unwrap();
        assert_eq!(rows, vec![json!({"id": 1, "name": "a"})]);
    }

    #[tokio::test]
    async fn sql_errors_surface_engine_message() {
        let pool = open_database(":memory:", None).await.unwrap();
        let err = QueryService::execute(&pool, "SELECT * FROM missing_table", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
        assert!(err.to_string().contains("no such table"));
    }
}
