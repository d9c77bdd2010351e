//! [`Value`] conversions for tokio-postgres.

use bytes::BytesMut;
use chrono::{NaiveDateTime, Utc};
use tokio_postgres::types::{IsNull, ToSql, Type};

use super::Value;
use crate::error::{ProwlError, Result};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => b.to_sql(ty, out),
            Value::Integer(i) => {
                if *ty == Type::INT2 {
                    i16::try_from(*i)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*i)?.to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (*i as f64).to_sql(ty, out)
                } else {
                    i.to_sql(ty, out)
                }
            }
            Value::Real(r) => {
                if *ty == Type::FLOAT4 {
                    (*r as f32).to_sql(ty, out)
                } else {
                    r.to_sql(ty, out)
                }
            }
            Value::Text(s) => s.to_sql(ty, out),
            Value::Blob(b) => b.to_sql(ty, out),
            Value::Date(d) => {
                if *ty == Type::DATE {
                    d.to_sql(ty, out)
                } else {
                    to_timestamp(d.and_time(chrono::NaiveTime::MIN), ty, out)
                }
            }
            Value::DateTime(dt) => to_timestamp(*dt, ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

fn to_timestamp(
    dt: NaiveDateTime,
    ty: &Type,
    out: &mut BytesMut,
) -> std::result::Result<IsNull, BoxError> {
    if *ty == Type::TIMESTAMPTZ {
        dt.and_utc().to_sql(ty, out)
    } else {
        dt.to_sql(ty, out)
    }
}

/// Reads column `idx` of a postgres row as a [`Value`], dispatching on the
/// column's declared type.
pub fn value_at(row: &tokio_postgres::Row, idx: usize) -> Result<Value> {
    let ty = row.columns()[idx].type_();
    let map = |e: tokio_postgres::Error| ProwlError::Mapping(e.to_string());

    let value: Value = match ty.name() {
        "bool" => row.try_get::<_, Option<bool>>(idx).map_err(map)?.into(),
        "int2" => row.try_get::<_, Option<i16>>(idx).map_err(map)?.into(),
        "int4" => row.try_get::<_, Option<i32>>(idx).map_err(map)?.into(),
        "int8" => row.try_get::<_, Option<i64>>(idx).map_err(map)?.into(),
        "float4" => row.try_get::<_, Option<f32>>(idx).map_err(map)?.into(),
        "float8" => row.try_get::<_, Option<f64>>(idx).map_err(map)?.into(),
        "text" | "varchar" | "bpchar" | "name" => {
            row.try_get::<_, Option<String>>(idx).map_err(map)?.into()
        }
        "bytea" => row.try_get::<_, Option<Vec<u8>>>(idx).map_err(map)?.into(),
        "date" => row
            .try_get::<_, Option<chrono::NaiveDate>>(idx)
            .map_err(map)?
            .into(),
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)
            .map_err(map)?
            .into(),
        "timestamptz" => row
            .try_get::<_, Option<chrono::DateTime<Utc>>>(idx)
            .map_err(map)?
            .map(|dt| dt.naive_utc())
            .into(),
        other => {
            return Err(ProwlError::Mapping(format!(
                "unsupported postgres column type `{other}`"
            )));
        }
    };
    Ok(value)
}
