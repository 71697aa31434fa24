//! Attribute parsing for the Record derive macro.
//!
//! Handles struct-level `#[orm(table = "...")]` and field-level `#[orm(column = "...")]`.

use crate::cql_ident::{parse_cql_ident, parse_table_name};
use syn::{DeriveInput, LitStr, Result};

/// Struct-level attributes.
#[derive(Default)]
pub(crate) struct RecordAttr {
    pub table: Option<String>,
}

/// Field-level attributes.
#[derive(Default)]
pub(crate) struct FieldAttr {
    pub column: Option<String>,
}

pub(crate) fn parse_record_attr(input: &DeriveInput) -> Result<RecordAttr> {
    let mut out = RecordAttr::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                if out.table.is_some() {
                    return Err(meta.error("duplicate `table` attribute"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                out.table = Some(parse_table_name(&lit)?);
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported #[orm] attribute on a record; expected `table = \"...\"`",
                ))
            }
        })?;
    }

    Ok(out)
}

pub(crate) fn parse_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut out = FieldAttr::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                if out.column.is_some() {
                    return Err(meta.error("duplicate `column` attribute"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                out.column = Some(parse_cql_ident(&lit, "column name")?);
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported #[orm] attribute on a field; expected `column = \"...\"`",
                ))
            }
        })?;
    }

    Ok(out)
}
