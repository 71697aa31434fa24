//! DELETE builder.

use crate::consistency::Consistency;
use crate::error::OrmResult;
use crate::qb::expr::Operator;
use crate::qb::{BuiltQuery, State, check_scoped};
use crate::record::Record;
use crate::session::{CqlSession, Session};
use crate::value::ToCql;

/// DELETE builder.
///
/// Renders `DELETE FROM <table> [WHERE ..]`. A delete without predicates removes every
/// row; [`Delete::exec`] refuses it unless [`Delete::allow_unscoped`] or
/// [`SessionConfig::allow_unscoped_mutations`](crate::SessionConfig::allow_unscoped_mutations)
/// is set.
#[derive(Debug)]
pub struct Delete<'a, S> {
    session: &'a Session<S>,
    state: State,
    allow_unscoped: bool,
}

impl<'a, S: CqlSession> Delete<'a, S> {
    pub(crate) fn new(session: &'a Session<S>) -> Self {
        Self {
            session,
            state: State::new(session.config().consistency),
            allow_unscoped: session.config().allow_unscoped_mutations,
        }
    }

    /// Bind to `T`'s table.
    pub fn from<T: Record>(mut self) -> Self {
        self.state.bind::<T>();
        self
    }

    /// Bind to a literal table name.
    pub fn table(mut self, table: &str) -> Self {
        self.state.bind_table(table);
        self
    }

    /// `"field" = ?` for every non-zero field of `record`.
    pub fn filter<T: Record>(mut self, record: &T) -> Self {
        self.state.push_record(record, Operator::Eq);
        self
    }

    pub fn eq<V: ToCql>(mut self, column: &str, value: V) -> Self {
        self.state.push_predicate(column, Operator::Eq, value);
        self
    }

    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.state.set_consistency(consistency);
        self
    }

    /// Execute even without predicates.
    pub fn allow_unscoped(mut self) -> Self {
        self.allow_unscoped = true;
        self
    }

    /// Render the current state for inspection.
    pub fn to_cql(&self) -> String {
        let mut cql = format!("DELETE FROM {}", self.state.table());
        self.state.render_where(&mut cql);
        cql
    }

    /// Check the builder and render it.
    ///
    /// Does not apply the unscoped-delete check; [`Delete::exec`] does.
    pub fn build(mut self) -> OrmResult<BuiltQuery> {
        self.state.ready()?;
        let cql = self.to_cql();
        Ok(BuiltQuery {
            cql,
            values: self.state.into_predicate_values().collect(),
        })
    }

    /// Execute the delete.
    pub async fn exec(self) -> OrmResult<()> {
        let session = self.session;
        let consistency = self.state.consistency();
        let context = format!("delete from {}", self.state.table());
        let scoped = check_scoped("DELETE", &self.state, self.allow_unscoped);
        let query = self.build()?;
        scoped?;
        session.execute_built(&context, &query, consistency).await
    }
}
