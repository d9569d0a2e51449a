use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use super::API_DATETIME_FORMAT;
use crate::error::AppError;

/// Typed accessors over one raw JSON object.
///
/// Missing keys and explicit nulls read as absent. Integers are accepted as
/// JSON numbers or numeric strings, since persisted rows often hand back
/// strings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(data: &'a Value, entity: &str) -> Result<Self, AppError> {
        match data {
            Value::Object(map) => Ok(Self { map }),
            other => Err(AppError::invalid_param(
                format!("{entity} data should be an object"),
                other.to_string(),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    pub fn required_string(&self, key: &str) -> Result<String, AppError> {
        self.string(key)
            .ok_or_else(|| AppError::invalid_param(format!("{key} is required"), key))
    }

    pub fn int(&self, key: &str) -> Result<Option<i64>, AppError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };

        let parsed = match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().filter(|f| is_whole_i64(*f)).map(|f| f as i64)),
            Value::String(raw) => raw.trim().parse::<i64>().ok(),
            _ => None,
        };

        parsed.map(Some).ok_or_else(|| {
            AppError::invalid_param(format!("{key} should be an integer: {value}"), value.to_string())
        })
    }

    pub fn int_or_zero(&self, key: &str) -> Result<i64, AppError> {
        Ok(self.int(key)?.unwrap_or_default())
    }

    pub fn bool(&self, key: &str) -> Result<bool, AppError> {
        let Some(value) = self.get(key) else {
            return Ok(false);
        };

        match value {
            Value::Bool(flag) => Ok(*flag),
            Value::Number(number) => Ok(number.as_i64().unwrap_or_default() != 0),
            Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => Ok(true),
                "" | "0" | "false" => Ok(false),
                _ => Err(AppError::invalid_param(
                    format!("{key} should be a boolean: {raw}"),
                    raw.as_str(),
                )),
            },
            other => Err(AppError::invalid_param(
                format!("{key} should be a boolean: {other}"),
                other.to_string(),
            )),
        }
    }

    /// Parses `key` with `format`. For the API layout a trailing `Z` and
    /// fractional seconds are accepted.
    pub fn datetime(&self, key: &str, format: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        let Some(raw) = self.string(key) else {
            return Ok(None);
        };

        let parsed = if format == API_DATETIME_FORMAT {
            let trimmed = raw.strip_suffix('Z').unwrap_or(&raw);
            NaiveDateTime::parse_from_str(trimmed, &format!("{format}%.f"))
        } else {
            NaiveDateTime::parse_from_str(&raw, format)
        };

        parsed.map(|naive| Some(naive.and_utc())).map_err(|_| {
            AppError::invalid_param(
                format!("{key} doesn't match the date format {format}: {raw}"),
                raw.as_str(),
            )
        })
    }

    pub fn array(&self, key: &str) -> Result<&'a [Value], AppError> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(values)) => Ok(values.as_slice()),
            Some(other) => Err(AppError::invalid_param(
                format!("{key} should be a list"),
                other.to_string(),
            )),
        }
    }
}

/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn is_whole_i64(value: f64) -> bool {
    value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factories::DB_DATETIME_FORMAT;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn rejects_non_objects() {
        assert!(Fields::of(&json!(""), "plan").is_err());
        assert!(Fields::of(&json!([1, 2]), "plan").is_err());
        assert!(Fields::of(&json!({}), "plan").unwrap().is_empty());
    }

    #[test]
    fn nulls_read_as_missing() {
        let data = json!({ "name": null });
        let fields = Fields::of(&data, "plan").unwrap();
        assert!(!fields.has("name"));
        assert_eq!(fields.string("name"), None);
    }

    #[test]
    fn integers_from_numbers_and_strings() {
        let data = json!({ "a": 1990, "b": "250", "c": 10.0, "d": "ten" });
        let fields = Fields::of(&data, "charge").unwrap();
        assert_eq!(fields.int("a").unwrap(), Some(1990));
        assert_eq!(fields.int("b").unwrap(), Some(250));
        assert_eq!(fields.int("c").unwrap(), Some(10));
        assert_eq!(fields.int("missing").unwrap(), None);
        assert!(fields.int("d").is_err());
    }

    #[test]
    fn integers_out_of_range_are_rejected() {
        let data = json!({ "float": 1e30, "negative": -1e30, "unsigned": u64::MAX, "edge": 9.3e18 });
        let fields = Fields::of(&data, "charge").unwrap();
        assert!(fields.int("float").is_err());
        assert!(fields.int("negative").is_err());
        assert!(fields.int("unsigned").is_err());
        assert!(fields.int("edge").is_err());
    }

    #[test]
    fn booleans_accept_row_flags() {
        let data = json!({ "a": true, "b": "1", "c": 0, "d": "maybe" });
        let fields = Fields::of(&data, "plan").unwrap();
        assert!(fields.bool("a").unwrap());
        assert!(fields.bool("b").unwrap());
        assert!(!fields.bool("c").unwrap());
        assert!(!fields.bool("missing").unwrap());
        assert!(fields.bool("d").is_err());
    }

    #[test]
    fn parses_both_timestamp_layouts() {
        let data = json!({
            "api": "2019-10-01T10:12:00",
            "api_z": "2019-10-01T10:12:00.123Z",
            "db": "2019-10-01 10:12:00",
        });
        let fields = Fields::of(&data, "transaction").unwrap();

        let api = fields.datetime("api", API_DATETIME_FORMAT).unwrap().unwrap();
        assert_eq!((api.year(), api.month(), api.day()), (2019, 10, 1));
        assert_eq!((api.hour(), api.minute()), (10, 12));

        assert!(fields.datetime("api_z", API_DATETIME_FORMAT).unwrap().is_some());
        assert!(fields.datetime("db", DB_DATETIME_FORMAT).unwrap().is_some());
        assert!(fields.datetime("missing", DB_DATETIME_FORMAT).unwrap().is_none());
    }

    #[test]
    fn layouts_are_not_interchangeable() {
        let data = json!({ "api": "2019-10-01T10:12:00", "db": "2019-10-01 10:12:00" });
        let fields = Fields::of(&data, "transaction").unwrap();
        assert!(fields.datetime("api", DB_DATETIME_FORMAT).is_err());
        assert!(fields.datetime("db", API_DATETIME_FORMAT).is_err());
    }
}
