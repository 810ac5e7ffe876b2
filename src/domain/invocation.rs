use crate::utils::error::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A single argument of a method call.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Null,
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Temporal(DateTime<FixedOffset>),
    Date(NaiveDate),
    File(PathBuf),
    Json(serde_json::Value),
}

impl ArgValue {
    /// Serializes any value into a JSON argument.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(ArgValue::Json(serde_json::to_value(value)?))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    /// Textual form used for path, query and header parameters.
    pub fn as_param_string(&self) -> Option<String> {
        match self {
            ArgValue::Null => None,
            ArgValue::Text(s) => Some(s.clone()),
            ArgValue::Number(n) => Some(n.to_string()),
            ArgValue::Bool(b) => Some(b.to_string()),
            ArgValue::Temporal(t) => Some(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            ArgValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            ArgValue::File(p) => Some(p.display().to_string()),
            ArgValue::Json(serde_json::Value::Null) => None,
            ArgValue::Json(serde_json::Value::String(s)) => Some(s.clone()),
            ArgValue::Json(other) => Some(other.to_string()),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

macro_rules! number_arg {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ArgValue {
                fn from(value: $t) -> Self {
                    ArgValue::Number(value.into())
                }
            }
        )*
    };
}

number_arg!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(ArgValue::Number)
            .unwrap_or(ArgValue::Null)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<DateTime<FixedOffset>> for ArgValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        ArgValue::Temporal(value)
    }
}

impl From<DateTime<Utc>> for ArgValue {
    fn from(value: DateTime<Utc>) -> Self {
        ArgValue::Temporal(value.fixed_offset())
    }
}

impl From<NaiveDate> for ArgValue {
    fn from(value: NaiveDate) -> Self {
        ArgValue::Date(value)
    }
}

impl From<PathBuf> for ArgValue {
    fn from(value: PathBuf) -> Self {
        ArgValue::File(value)
    }
}

impl From<&Path> for ArgValue {
    fn from(value: &Path) -> Self {
        ArgValue::File(value.to_path_buf())
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ArgValue::Null,
            other => ArgValue::Json(other),
        }
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ArgValue::Null)
    }
}

/// One method call against a service API: the method name and its arguments
/// in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    method: String,
    args: Vec<ArgValue>,
}

impl Invocation {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Adds a JSON-serialized argument.
    pub fn json_arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.args.push(ArgValue::json(value)?);
        Ok(self)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[ArgValue] {
        &self.args
    }

    pub fn parameter(&self, index: usize) -> &ArgValue {
        static NULL: ArgValue = ArgValue::Null;
        self.args.get(index).unwrap_or(&NULL)
    }
}
