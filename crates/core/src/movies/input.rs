use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use super::{MovieKey, YEAR};

/// Errors raised while reading route input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Invalid integer for `{field}`: {value}")]
    InvalidInteger { field: &'static str, value: String },
}

/// Parse an integer field given as a JSON number or as decimal text.
///
/// Query strings and URL-encoded bodies always carry text; JSON bodies may
/// carry either.
pub fn parse_year(field: &'static str, value: Option<&Value>) -> Result<i64, RequestError> {
    let invalid = |value: String| RequestError::InvalidInteger { field, value };
    match value {
        None | Some(Value::Null) => Err(RequestError::MissingField(field)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| invalid(n.to_string())),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid(s.clone())),
        Some(other) => Err(invalid(other.to_string())),
    }
}

/// A present field stays `Some`, even when it is JSON `null`. Only an
/// absent field is undefined.
fn defined<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Body of `/create-item`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieInput {
    #[serde(default, deserialize_with = "defined")]
    pub year: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub info: Option<Value>,
}

impl MovieInput {
    pub fn year(&self) -> Result<i64, RequestError> {
        parse_year(YEAR, self.year.as_ref())
    }
}

/// `year` and `title`, from a query string or a body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieKeyInput {
    #[serde(default, deserialize_with = "defined")]
    pub year: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub title: Option<Value>,
}

impl MovieKeyInput {
    pub fn key(&self) -> Result<MovieKey, RequestError> {
        Ok(MovieKey {
            year: parse_year(YEAR, self.year.as_ref())?,
            title: self.title.clone(),
        })
    }
}

/// Body of `/update-item`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInfoInput {
    #[serde(default, deserialize_with = "defined")]
    pub year: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub info: Option<Value>,
}

impl UpdateInfoInput {
    pub fn key(&self) -> Result<MovieKey, RequestError> {
        MovieKeyInput {
            year: self.year.clone(),
            title: self.title.clone(),
        }
        .key()
    }

    /// A field of `info`; undefined when `info` or the field is absent.
    pub fn info_field(&self, name: &str) -> Option<Value> {
        self.info.as_ref().and_then(|info| info.get(name)).cloned()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearQuery {
    #[serde(default, deserialize_with = "defined")]
    pub year: Option<Value>,
}

impl YearQuery {
    pub fn year(&self) -> Result<i64, RequestError> {
        parse_year(YEAR, self.year.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearTitleRangeQuery {
    #[serde(default, deserialize_with = "defined")]
    pub year: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub letter1: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub letter2: Option<Value>,
}

impl YearTitleRangeQuery {
    pub fn year(&self) -> Result<i64, RequestError> {
        parse_year(YEAR, self.year.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearRangeQuery {
    #[serde(default, deserialize_with = "defined")]
    pub start_yr: Option<Value>,
    #[serde(default, deserialize_with = "defined")]
    pub end_yr: Option<Value>,
}

impl YearRangeQuery {
    pub fn years(&self) -> Result<(i64, i64), RequestError> {
        Ok((
            parse_year("start_yr", self.start_yr.as_ref())?,
            parse_year("end_yr", self.end_yr.as_ref())?,
        ))
    }
}
