//! The record capability: a static field table plus per-field accessors.
//!
//! This trait should typically be derived using `#[derive(Record)]` from the
//! `cqlorm-derive` crate.
//!
//! # Example
//!
//! ```ignore
//! use cqlorm::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct User {
//!     id: i64,
//!     #[orm(column = "nick")]
//!     name: String,
//! }
//!
//! assert_eq!(cqlorm::naming::table_name::<User>(), "user");
//! ```

use crate::error::{OrmResult, TypeMismatch};
use crate::value::CqlValue;

/// One entry of a record's static field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust field name.
    pub name: &'static str,
    /// Column name. `None` means the snake_case form of `name`.
    pub column: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: Option<&'static str>) -> Self {
        Self { name, column }
    }
}

/// A typed record that maps to one table.
///
/// Field indices are positions in [`Record::FIELDS`] (declaration order).
pub trait Record {
    /// Rust type name, used when no explicit table name is given.
    const TYPE_NAME: &'static str;

    /// Table name. `None` means the snake_case form of [`Record::TYPE_NAME`].
    const TABLE: Option<&'static str> = None;

    /// Fields in declaration order. A record with no fields cannot be mapped.
    const FIELDS: &'static [FieldDef];

    /// Extract the value of the field at `index`.
    fn field_value(&self, index: usize) -> OrmResult<CqlValue>;

    /// Whether the field at `index` holds its zero value.
    fn field_is_zero(&self, index: usize) -> bool;

    /// Assign a raw value to the field at `index`.
    fn set_field(&mut self, index: usize, value: CqlValue) -> Result<(), TypeMismatch>;
}
