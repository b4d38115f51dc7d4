pub mod appointment_repository;
pub mod diagnosis_repository;
pub mod medical_record_repository;
pub mod profile_repository;

use crate::{DbError, Result as DbErrorResult};

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M";

// Column decoding shared by the repositories. Stored values that no longer
// parse are reported as `DbError::Decode` instead of panicking.

pub(crate) fn parse_uuid(column: &'static str, value: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::decode(column, value, e))
}

pub(crate) fn parse_timestamp(column: &'static str, secs: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::decode(column, secs.to_string(), "timestamp out of range"))
}

pub(crate) fn parse_date(column: &'static str, value: &str) -> DbErrorResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| DbError::decode(column, value, e))
}

pub(crate) fn parse_time(column: &'static str, value: &str) -> DbErrorResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| DbError::decode(column, value, e))
}

pub(crate) fn parse_enum<T>(column: &'static str, value: &str) -> DbErrorResult<T>
where
    T: FromStr,
    T::Err: ToString,
{
    T::from_str(value).map_err(|e| DbError::decode(column, value, e))
}

pub(crate) fn parse_json<T>(column: &'static str, value: &str) -> DbErrorResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(value).map_err(|e| DbError::decode(column, value, e))
}

pub(crate) fn to_json<T: serde::Serialize>(column: &'static str, value: &T) -> DbErrorResult<String> {
    serde_json::to_string(value).map_err(|e| DbError::decode(column, "<unserializable>", e))
}
