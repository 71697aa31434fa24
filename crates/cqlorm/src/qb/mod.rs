//! Query builders.
//!
//! Builders are created by a [`Session`](crate::Session), accumulate clauses through
//! consuming fluent calls, and are spent by exactly one terminal call.
//!
//! Fluent calls never fail. An error (a record that cannot be mapped, a value that
//! cannot be converted) is latched and returned by the terminal call before anything
//! reaches the session.
//!
//! The first call that names a table, directly or through a record, binds it; later
//! records do not change it.
//!
//! ```ignore
//! let adults: Vec<User> = session
//!     .select()
//!     .from::<User>()
//!     .gte("age", 18)
//!     .order_by("age", Order::Desc)
//!     .limit(50)
//!     .allow_filtering()
//!     .all()
//!     .await?;
//! ```

pub mod delete;
pub mod expr;
pub mod insert;
mod latch;
pub mod scanner;
pub mod select;
pub mod update;


pub use delete::Delete;
pub use expr::{Argument, Operator, Order};
pub use insert::Insert;
pub use scanner::Scanner;
pub use select::Select;
pub use update::Update;

use crate::consistency::Consistency;
use crate::error::{OrmError, OrmResult};
use crate::mapper::{Extract, Mapper, extract};
use crate::record::Record;
use crate::value::{CqlValue, ToCql};
use latch::ErrorLatch;

/// Rendered query text plus its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub cql: String,
    pub values: Vec<CqlValue>,
}

/// State every builder shares: the bound table, the error latch, the predicate list
/// and the consistency level.
#[derive(Debug)]
pub(crate) struct State {
    target: Option<Mapper>,
    latch: ErrorLatch,
    predicates: Vec<Argument>,
    consistency: Consistency,
}

impl State {
    pub(crate) fn new(consistency: Consistency) -> Self {
        Self {
            target: None,
            latch: ErrorLatch::default(),
            predicates: Vec::new(),
            consistency,
        }
    }

    /// Bind to `T`'s table unless a table is already bound.
    pub(crate) fn bind<T: Record>(&mut self) {
        if self.target.is_none() {
            self.target = self.latch.capture(Mapper::of::<T>());
        }
    }

    /// Bind to a literal table unless a table is already bound.
    pub(crate) fn bind_table(&mut self, table: &str) {
        if self.target.is_none() {
            self.target = Some(Mapper::table_only(table));
        }
    }

    pub(crate) fn mapper(&self) -> Option<&Mapper> {
        self.target.as_ref()
    }

    /// Bound table name; empty while unbound.
    pub(crate) fn table(&self) -> &str {
        self.target.as_ref().map_or("", Mapper::table)
    }

    pub(crate) fn set_consistency(&mut self, consistency: Consistency) {
        self.consistency = consistency;
    }

    pub(crate) fn consistency(&self) -> Consistency {
        self.consistency
    }

    pub(crate) fn latch(&mut self, err: OrmError) {
        self.latch.record(err);
    }

    /// Unwrap `result`, latching its error.
    pub(crate) fn capture<T>(&mut self, result: OrmResult<T>) -> Option<T> {
        self.latch.capture(result)
    }

    /// Convert `value`, latching a failure.
    pub(crate) fn convert(&mut self, value: impl ToCql) -> Option<CqlValue> {
        self.latch.capture(value.to_cql())
    }

    pub(crate) fn push_predicate(&mut self, column: &str, operator: Operator, value: impl ToCql) {
        if let Some(value) = self.convert(value) {
            self.predicates.push(Argument::new(column, operator, value));
        }
    }

    /// One predicate per non-zero field of `record`, binding `T`'s table first.
    pub(crate) fn push_record<T: Record>(&mut self, record: &T, operator: Operator) {
        self.bind::<T>();
        if let Some(pairs) = self.latch.capture(extract(record, Extract::SkipZero)) {
            self.predicates.extend(
                pairs
                    .into_iter()
                    .map(|(column, value)| Argument::new(column, operator, value)),
            );
        }
    }

    pub(crate) fn has_predicates(&self) -> bool {
        !self.predicates.is_empty()
    }

    /// Append ` WHERE a AND b` when there are predicates.
    pub(crate) fn render_where(&self, cql: &mut String) {
        if self.predicates.is_empty() {
            return;
        }
        let rendered: Vec<String> = self
            .predicates
            .iter()
            .map(Argument::render_predicate)
            .collect();
        cql.push_str(" WHERE ");
        cql.push_str(&rendered.join(" AND "));
    }

    pub(crate) fn into_predicate_values(self) -> impl Iterator<Item = CqlValue> {
        self.predicates.into_iter().map(Argument::into_value)
    }

    /// Surface the latched error, then require a bound table.
    pub(crate) fn ready(&mut self) -> OrmResult<()> {
        self.latch.check()?;
        if self.target.is_none() {
            return Err(OrmError::mapping(
                "no table bound: name one with from/table or pass a record",
            ));
        }
        Ok(())
    }
}

/// `"a","b"`
pub(crate) fn render_columns<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| expr::quote(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// `?,?,?`
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

/// Refuse an UPDATE/DELETE without predicates unless allowed.
pub(crate) fn check_scoped(statement: &str, state: &State, allowed: bool) -> OrmResult<()> {
    if state.has_predicates() || allowed {
        return Ok(());
    }
    Err(OrmError::validation(format!(
        "refusing unscoped {statement} on {}: add a predicate or call allow_unscoped()",
        state.table()
    )))
}
