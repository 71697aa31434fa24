//! Resolved table/column correspondence for a record type, and field extraction.

use crate::error::{OrmError, OrmResult};
use crate::naming;
use crate::record::Record;
use crate::value::CqlValue;
use std::collections::HashMap;

/// The resolved `{table name, column -> field index}` of one record type.
///
/// Built once per builder from a record type and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Mapper {
    record: String,
    table: String,
    columns: Vec<String>,
    fields: HashMap<String, usize>,
}

impl Mapper {
    /// Build the mapper of a record type.
    ///
    /// Fails if the record has no fields or maps two fields to the same column.
    pub fn of<T: Record>() -> OrmResult<Self> {
        if T::FIELDS.is_empty() {
            return Err(OrmError::mapping(format!(
                "{} has no mapped fields",
                T::TYPE_NAME
            )));
        }

        let columns: Vec<String> = T::FIELDS.iter().map(naming::column_name).collect();
        let mut fields = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if fields.insert(column.clone(), index).is_some() {
                return Err(OrmError::mapping(format!(
                    "{} maps column '{}' more than once",
                    T::TYPE_NAME,
                    column
                )));
            }
        }

        Ok(Self {
            record: T::TYPE_NAME.to_string(),
            table: naming::table_name::<T>(),
            columns,
            fields,
        })
    }

    /// A mapper for a literal table name with no field correspondence.
    pub fn table_only(table: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            record: format!("table {table}"),
            table,
            columns: Vec::new(),
            fields: HashMap::new(),
        }
    }

    pub fn record_name(&self) -> &str {
        &self.record
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Mapped columns in field declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look up the field index of a column.
    pub fn field_index(&self, column: &str) -> OrmResult<usize> {
        self.fields
            .get(column)
            .copied()
            .ok_or_else(|| OrmError::unknown_field(&self.record, column))
    }
}

/// Field extraction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Every field in declaration order.
    All,
    /// Every field except those holding their zero value.
    SkipZero,
}

/// Walk a record's fields, producing ordered `(column, value)` pairs.
pub fn extract<T: Record>(record: &T, mode: Extract) -> OrmResult<Vec<(String, CqlValue)>> {
    if T::FIELDS.is_empty() {
        return Err(OrmError::mapping(format!(
            "{} is not introspectable: it has no fields",
            T::TYPE_NAME
        )));
    }

    T::FIELDS
        .iter()
        .enumerate()
        .filter(|(index, _)| mode == Extract::All || !record.field_is_zero(*index))
        .map(|(index, field)| Ok((naming::column_name(field), record.field_value(index)?)))
        .collect()
}
