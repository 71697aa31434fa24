//! Positional row decoding into records.

use crate::error::{OrmError, OrmResult};
use crate::mapper::Mapper;
use crate::record::Record;
use crate::value::CqlValue;
use std::marker::PhantomData;

/// Writes raw rows into records of type `T`.
///
/// Decoding is positional: `columns[i]` names the field that receives `values[i]`.
#[derive(Debug)]
pub struct Decoder<T> {
    mapper: Mapper,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Decoder<T> {
    pub fn new() -> OrmResult<Self> {
        Ok(Self {
            mapper: Mapper::of::<T>()?,
            _record: PhantomData,
        })
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Overwrite the mapped fields of `record` with one row.
    ///
    /// A column the record does not map is an [`OrmError::UnknownField`]; a value that
    /// does not convert is an [`OrmError::Conversion`]. Fields assigned before the
    /// failing column keep their new values.
    pub fn decode(
        &self,
        record: &mut T,
        columns: &[String],
        values: Vec<CqlValue>,
    ) -> OrmResult<()> {
        if columns.len() != values.len() {
            return Err(OrmError::mapping(format!(
                "row has {} values for {} columns",
                values.len(),
                columns.len()
            )));
        }

        for (column, value) in columns.iter().zip(values) {
            let index = self.mapper.field_index(column)?;
            record
                .set_field(index, value)
                .map_err(|mismatch| mismatch.at_column(column))?;
        }
        Ok(())
    }

    /// Decode one row into a fresh record and push it onto `out`.
    ///
    /// `out` is left untouched when decoding fails.
    pub fn append(
        &self,
        out: &mut Vec<T>,
        columns: &[String],
        values: Vec<CqlValue>,
    ) -> OrmResult<()>
    where
        T: Default,
    {
        let mut record = T::default();
        self.decode(&mut record, columns, values)?;
        out.push(record);
        Ok(())
    }
}
