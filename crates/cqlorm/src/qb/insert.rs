//! INSERT builder.

use crate::consistency::Consistency;
use crate::error::{OrmError, OrmResult};
use crate::mapper::{Extract, extract};
use crate::qb::{BuiltQuery, State, placeholders, render_columns};
use crate::record::Record;
use crate::session::{CqlSession, Session};
use crate::value::{CqlValue, ToCql};

/// INSERT builder.
///
/// Renders `INSERT INTO <table> ("a","b") VALUES (?,?) [IF NOT EXISTS]`. Records are
/// written whole: zero-valued fields are inserted too.
#[derive(Debug)]
pub struct Insert<'a, S> {
    session: &'a Session<S>,
    state: State,
    columns: Vec<String>,
    values: Vec<CqlValue>,
    if_not_exists: bool,
}

impl<'a, S: CqlSession> Insert<'a, S> {
    pub(crate) fn new(session: &'a Session<S>) -> Self {
        Self {
            session,
            state: State::new(session.config().consistency),
            columns: Vec::new(),
            values: Vec::new(),
            if_not_exists: false,
        }
    }

    /// Write every field of `record`, binding its table.
    ///
    /// Replaces the columns of any earlier `values` or `value` call.
    pub fn values<T: Record>(mut self, record: &T) -> Self {
        self.state.bind::<T>();
        if let Some(pairs) = self.state.capture(extract(record, Extract::All)) {
            (self.columns, self.values) = pairs.into_iter().unzip();
        }
        self
    }

    /// Bind to a literal table name.
    pub fn table(mut self, table: &str) -> Self {
        self.state.bind_table(table);
        self
    }

    /// Write a single column.
    pub fn value<V: ToCql>(mut self, column: &str, value: V) -> Self {
        if let Some(value) = self.state.convert(value) {
            self.columns.push(column.to_string());
            self.values.push(value);
        }
        self
    }

    /// Only insert when no row with the same primary key exists.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.state.set_consistency(consistency);
        self
    }

    /// Render the current state for inspection.
    pub fn to_cql(&self) -> String {
        let mut cql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.state.table(),
            render_columns(&self.columns),
            placeholders(self.columns.len())
        );
        if self.if_not_exists {
            cql.push_str(" IF NOT EXISTS");
        }
        cql
    }

    /// Check the builder and render it.
    pub fn build(mut self) -> OrmResult<BuiltQuery> {
        self.state.ready()?;
        if self.columns.is_empty() {
            return Err(OrmError::mapping(format!(
                "nothing to insert into {}",
                self.state.table()
            )));
        }
        Ok(BuiltQuery {
            cql: self.to_cql(),
            values: self.values,
        })
    }

    /// Execute the insert.
    pub async fn exec(self) -> OrmResult<()> {
        let session = self.session;
        let consistency = self.state.consistency();
        let context = format!("insert into {}", self.state.table());
        let query = self.build()?;
        session.execute_built(&context, &query, consistency).await
    }
}
