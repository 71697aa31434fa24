//! Table and column name resolution.
//!
//! Names supplied by a [`Record`] always win. `#[derive(Record)]` supplies every name at
//! compile time; for hand-written impls that leave them out, the Rust name is converted
//! to snake_case.

use crate::record::{FieldDef, Record};
use heck::ToSnakeCase;

/// Resolve the table name of a record type.
pub fn table_name<T: Record>() -> String {
    match T::TABLE {
        Some(table) => table.to_string(),
        None => T::TYPE_NAME.to_snake_case(),
    }
}

/// Resolve the column name of a single field.
pub fn column_name(field: &FieldDef) -> String {
    match field.column {
        Some(column) => column.to_string(),
        None => field.name.to_snake_case(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(name: &'static str) -> String {
        column_name(&FieldDef::new(name, None))
    }

    #[test]
    fn pascal_and_camel_case() {
        assert_eq!(derived("User"), "user");
        assert_eq!(derived("UserProfile"), "user_profile");
        assert_eq!(derived("createdAt"), "created_at");
    }

    #[test]
    fn acronyms() {
        assert_eq!(derived("HTTPServer"), "http_server");
        assert_eq!(derived("UserID"), "user_id");
        assert_eq!(derived("ID"), "id");
    }

    #[test]
    fn digits() {
        assert_eq!(derived("Address2Line"), "address2_line");
        assert_eq!(derived("V2"), "v2");
    }

    #[test]
    fn idempotent_on_snake_case() {
        for name in ["user", "user_profile", "created_at", "http_server", "a1_b2"] {
            assert_eq!(derived(name), name);
        }
        assert_eq!(derived("HTTPServerLog").to_snake_case(), "http_server_log");
    }

    #[test]
    fn column_override_wins() {
        let field = FieldDef::new("displayName", Some("nick"));
        assert_eq!(column_name(&field), "nick");
        assert_eq!(derived("displayName"), "display_name");
    }
}
