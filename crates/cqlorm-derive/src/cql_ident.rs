use proc_macro2::Span;
use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_cql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `table` or `keyspace.table`.
pub(crate) fn is_valid_table_name(s: &str) -> bool {
    match s.split_once('.') {
        Some((keyspace, table)) => is_valid_cql_ident(keyspace) && is_valid_cql_ident(table),
        None => is_valid_cql_ident(s),
    }
}

pub(crate) fn parse_cql_ident(lit: &LitStr, what: &str) -> Result<String> {
    check_name(lit.value().trim(), lit.span(), what, is_valid_cql_ident, "[A-Za-z_][A-Za-z0-9_]*")
}

pub(crate) fn parse_table_name(lit: &LitStr) -> Result<String> {
    check_name(
        lit.value().trim(),
        lit.span(),
        "table name",
        is_valid_table_name,
        "[keyspace.]table, each part [A-Za-z_][A-Za-z0-9_]*",
    )
}

fn check_name(
    s: &str,
    span: Span,
    what: &str,
    valid: fn(&str) -> bool,
    expected: &str,
) -> Result<String> {
    if s.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !valid(s) {
        return Err(Error::new(
            span,
            format!("{what} must be a valid CQL identifier (expected {expected})"),
        ));
    }
    Ok(s.to_string())
}
