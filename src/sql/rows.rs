//! SQLite rows to JSON objects, keyed by column name.

use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Convert one row. The storage class of each value decides the JSON type; BLOBs become lossy UTF-8 strings.
pub fn row_to_json(row: &SqliteRow) -> Result<Value, sqlx::Error> {
    let mut obj = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let storage = {
            let raw = row.try_get_raw(i)?;
            if raw.is_null() {
                None
            } else {
                Some(raw.type_info().name().to_string())
            }
        };
        let value = match storage.as_deref() {
            None => Value::Null,
            Some("INTEGER") => Value::from(row.try_get_unchecked::<i64, _>(i)?),
            Some("REAL") => Number::from_f64(row.try_get_unchecked::<f64, _>(i)?)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Some("BLOB") => {
                let bytes: Vec<u8> = row.try_get_unchecked(i)?;
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            }
            Some(_) => Value::String(row.try_get_unchecked::<String, _>(i)?),
        };
        obj.insert(column.name().to_string(), value);
    }
    Ok(Value::Object(obj))
}
