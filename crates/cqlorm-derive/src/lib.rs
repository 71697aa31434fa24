//! Derive macros for cqlorm
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod cql_ident;
mod record;

/// Derive the `Record` capability for a struct.
///
/// # Example
///
/// ```ignore
/// use cqlorm::Record;
///
/// #[derive(Debug, Default, Record)]
/// #[orm(table = "users")]
/// struct User {
///     id: i64,
///     #[orm(column = "display_name")]
///     name: String,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Explicit table name, optionally keyspace-qualified
///   (`"app.users"`). Without it the table name is the snake_case form of the struct name.
/// - `#[orm(column = "name")]` - Map field to a different column name. Without it the
///   column name is the snake_case form of the field name.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
