//! Raw driver values and conversions to/from Rust field types.
//!
//! [`CqlValue`] is what the session binds and returns. [`ToCql`] turns a field into a
//! bound value (and answers whether the field holds its zero value); [`FromCql`] is the
//! single best-effort conversion step used when decoding rows.

use crate::error::{OrmError, OrmResult, TypeMismatch};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::net::IpAddr;
use uuid::Uuid;

/// A raw CQL value as exchanged with the session.
#[derive(Debug, Clone, PartialEq)]
pub enum CqlValue {
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Counter(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Blob(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Inet(IpAddr),
    List(Vec<CqlValue>),
    Set(Vec<CqlValue>),
    Map(Vec<(CqlValue, CqlValue)>),
}

impl CqlValue {
    /// CQL type name of this value, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::TinyInt(_) => "tinyint",
            Self::SmallInt(_) => "smallint",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Counter(_) => "counter",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Uuid(_) => "uuid",
            Self::Timestamp(_) => "timestamp",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Inet(_) => "inet",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::TinyInt(v) => Some(i64::from(*v)),
            Self::SmallInt(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::BigInt(v) | Self::Counter(v) => Some(*v),
            _ => None,
        }
    }
}

/// Conversion of a Rust field into a bound CQL value.
pub trait ToCql {
    fn to_cql(&self) -> OrmResult<CqlValue>;

    /// Whether the value equals its type's zero/default value.
    ///
    /// Zero-skip extraction omits such fields from predicates and partial writes.
    fn is_zero(&self) -> bool;
}

/// The conversion step from a raw CQL value to a Rust field type.
pub trait FromCql: Sized {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch>;
}

impl<T: ToCql + ?Sized> ToCql for &T {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        (**self).to_cql()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl ToCql for CqlValue {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(self.clone())
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

impl FromCql for CqlValue {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        Ok(value)
    }
}

macro_rules! impl_int {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl ToCql for $ty {
            fn to_cql(&self) -> OrmResult<CqlValue> {
                Ok(CqlValue::$variant(*self))
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }
        }

        impl FromCql for $ty {
            fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
                let found = value.kind();
                let wide = value
                    .as_i64()
                    .ok_or_else(|| TypeMismatch::new($name, found))?;
                <$ty>::try_from(wide).map_err(|_| TypeMismatch::new($name, "out-of-range integer"))
            }
        }
    };
}

impl_int!(i8, TinyInt, "tinyint");
impl_int!(i16, SmallInt, "smallint");
impl_int!(i32, Int, "int");
impl_int!(i64, BigInt, "bigint");

impl ToCql for f32 {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Float(*self))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl FromCql for f32 {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Float(v) => Ok(v),
            CqlValue::Double(v) => Ok(v as f32),
            other => other
                .as_i64()
                .map(|v| v as f32)
                .ok_or_else(|| TypeMismatch::new("float", other.kind())),
        }
    }
}

impl ToCql for f64 {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Double(*self))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl FromCql for f64 {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Double(v) => Ok(v),
            CqlValue::Float(v) => Ok(f64::from(v)),
            other => other
                .as_i64()
                .map(|v| v as f64)
                .ok_or_else(|| TypeMismatch::new("double", other.kind())),
        }
    }
}

impl ToCql for bool {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Boolean(*self))
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl FromCql for bool {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Boolean(v) => Ok(v),
            other => Err(TypeMismatch::new("boolean", other.kind())),
        }
    }
}

impl ToCql for str {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Text(self.to_string()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ToCql for String {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Text(self.clone()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FromCql for String {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Text(v) => Ok(v),
            other => Err(TypeMismatch::new("text", other.kind())),
        }
    }
}

impl ToCql for Uuid {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Uuid(*self))
    }

    fn is_zero(&self) -> bool {
        self.is_nil()
    }
}

impl FromCql for Uuid {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Uuid(v) => Ok(v),
            other => Err(TypeMismatch::new("uuid", other.kind())),
        }
    }
}

impl ToCql for DateTime<Utc> {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Timestamp(*self))
    }

    fn is_zero(&self) -> bool {
        *self == DateTime::<Utc>::default()
    }
}

impl FromCql for DateTime<Utc> {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Timestamp(v) => Ok(v),
            CqlValue::BigInt(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| TypeMismatch::new("timestamp", "out-of-range bigint")),
            other => Err(TypeMismatch::new("timestamp", other.kind())),
        }
    }
}

impl ToCql for NaiveDate {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Date(*self))
    }

    fn is_zero(&self) -> bool {
        *self == DateTime::<Utc>::default().date_naive()
    }
}

impl FromCql for NaiveDate {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Date(v) => Ok(v),
            CqlValue::Timestamp(v) => Ok(v.date_naive()),
            other => Err(TypeMismatch::new("date", other.kind())),
        }
    }
}

impl ToCql for NaiveTime {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Time(*self))
    }

    fn is_zero(&self) -> bool {
        Some(*self) == NaiveTime::from_hms_opt(0, 0, 0)
    }
}

impl FromCql for NaiveTime {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Time(v) => Ok(v),
            other => Err(TypeMismatch::new("time", other.kind())),
        }
    }
}

impl ToCql for IpAddr {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Inet(*self))
    }

    fn is_zero(&self) -> bool {
        self.is_unspecified()
    }
}

impl FromCql for IpAddr {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Inet(v) => Ok(v),
            other => Err(TypeMismatch::new("inet", other.kind())),
        }
    }
}

impl<T: ToCql> ToCql for Option<T> {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        match self {
            Some(v) => v.to_cql(),
            None => Ok(CqlValue::Null),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T: FromCql> FromCql for Option<T> {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Null => Ok(None),
            other => T::from_cql(other).map(Some),
        }
    }
}

// `Vec<u8>` is a list of tinyint here; blob columns use [`Blob`].
impl<T: ToCql> ToCql for Vec<T> {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        self.iter()
            .map(ToCql::to_cql)
            .collect::<OrmResult<Vec<_>>>()
            .map(CqlValue::List)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FromCql> FromCql for Vec<T> {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::List(items) | CqlValue::Set(items) => {
                items.into_iter().map(T::from_cql).collect()
            }
            CqlValue::Null => Ok(Vec::new()),
            other => Err(TypeMismatch::new("list", other.kind())),
        }
    }
}

impl<T: ToCql + Eq + Hash> ToCql for HashSet<T> {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        self.iter()
            .map(ToCql::to_cql)
            .collect::<OrmResult<Vec<_>>>()
            .map(CqlValue::Set)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FromCql + Eq + Hash> FromCql for HashSet<T> {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Set(items) | CqlValue::List(items) => {
                items.into_iter().map(T::from_cql).collect()
            }
            CqlValue::Null => Ok(HashSet::new()),
            other => Err(TypeMismatch::new("set", other.kind())),
        }
    }
}

impl<K: ToCql + Eq + Hash, V: ToCql> ToCql for HashMap<K, V> {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        self.iter()
            .map(|(k, v)| Ok((k.to_cql()?, v.to_cql()?)))
            .collect::<OrmResult<Vec<_>>>()
            .map(CqlValue::Map)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K: FromCql + Eq + Hash, V: FromCql> FromCql for HashMap<K, V> {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_cql(k)?, V::from_cql(v)?)))
                .collect(),
            CqlValue::Null => Ok(HashMap::new()),
            other => Err(TypeMismatch::new("map", other.kind())),
        }
    }
}

/// A `blob` column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

impl ToCql for Blob {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        Ok(CqlValue::Blob(self.0.clone()))
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromCql for Blob {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Blob(v) => Ok(Blob(v)),
            other => Err(TypeMismatch::new("blob", other.kind())),
        }
    }
}

/// Stores any serde type as a JSON `text` column.
///
/// The zero value is `Json(T::default())`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Json<T>(pub T);

impl<T: Serialize + Default + PartialEq> ToCql for Json<T> {
    fn to_cql(&self) -> OrmResult<CqlValue> {
        serde_json::to_string(&self.0)
            .map(CqlValue::Text)
            .map_err(|e| OrmError::mapping(format!("cannot serialize JSON value: {e}")))
    }

    fn is_zero(&self) -> bool {
        self.0 == T::default()
    }
}

impl<T: DeserializeOwned> FromCql for Json<T> {
    fn from_cql(value: CqlValue) -> Result<Self, TypeMismatch> {
        match value {
            CqlValue::Text(text) => serde_json::from_str(&text)
                .map(Json)
                .map_err(|_| TypeMismatch::new("json", "malformed json text")),
            other => Err(TypeMismatch::new("json", other.kind())),
        }
    }
}
