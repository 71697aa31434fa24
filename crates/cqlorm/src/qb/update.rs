//! UPDATE builder.

use crate::consistency::Consistency;
use crate::error::{OrmError, OrmResult};
use crate::mapper::{Extract, extract};
use crate::qb::expr::Operator;
use crate::qb::{BuiltQuery, State, check_scoped, placeholders, render_columns};
use crate::record::Record;
use crate::session::{CqlSession, Session};
use crate::value::{CqlValue, ToCql};

/// UPDATE builder.
///
/// Renders `UPDATE <table> ("a") VALUES (?) [WHERE ..]`, with set values bound before
/// predicate values. Only non-zero fields of a record are written.
///
/// An update without predicates touches every row; [`Update::exec`] refuses it unless
/// [`Update::allow_unscoped`] or
/// [`SessionConfig::allow_unscoped_mutations`](crate::SessionConfig::allow_unscoped_mutations)
/// is set.
#[derive(Debug)]
pub struct Update<'a, S> {
    session: &'a Session<S>,
    state: State,
    set_columns: Vec<String>,
    set_values: Vec<CqlValue>,
    allow_unscoped: bool,
}

impl<'a, S: CqlSession> Update<'a, S> {
    pub(crate) fn new(session: &'a Session<S>) -> Self {
        Self {
            session,
            state: State::new(session.config().consistency),
            set_columns: Vec::new(),
            set_values: Vec::new(),
            allow_unscoped: session.config().allow_unscoped_mutations,
        }
    }

    /// Write the non-zero fields of `record`, binding its table.
    ///
    /// Replaces the set list of any earlier `set` or `set_value` call. A record with no
    /// non-zero field latches a mapping error.
    pub fn set<T: Record>(mut self, record: &T) -> Self {
        self.state.bind::<T>();
        match self.state.capture(extract(record, Extract::SkipZero)) {
            Some(pairs) if pairs.is_empty() => self.state.latch(OrmError::mapping(format!(
                "{} has no non-zero fields to set",
                T::TYPE_NAME
            ))),
            Some(pairs) => {
                (self.set_columns, self.set_values) = pairs.into_iter().unzip();
            }
            None => {}
        }
        self
    }

    /// Write a single column.
    pub fn set_value<V: ToCql>(mut self, column: &str, value: V) -> Self {
        if let Some(value) = self.state.convert(value) {
            self.set_columns.push(column.to_string());
            self.set_values.push(value);
        }
        self
    }

    /// Bind to a literal table name.
    pub fn table(mut self, table: &str) -> Self {
        self.state.bind_table(table);
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

    // ==================== Record predicates (non-zero fields) ====================

    /// `"field" = ?` for every non-zero field of `record`.
    pub fn filter<T: Record>(mut self, record: &T) -> Self {
        self.state.push_record(record, Operator::Eq);
        self
    }

    /// `"field" > ?` for every non-zero field of `record`.
    pub fn filter_gt<T: Record>(mut self, record: &T) -> Self {
        self.state.push_record(record, Operator::Gt);
        self
    }

    /// `"field" >= ?` for every non-zero field of `record`.
    pub fn filter_gte<T: Record>(mut self, record: &T) -> Self {
        self.state.push_record(record, Operator::Gte);
        self
    }

    /// `"field" < ?` for every non-zero field of `record`.
    pub fn filter_lt<T: Record>(mut self, record: &T) -> Self {
        self.state.push_record(record, Operator::Lt);
        self
    }

    /// `"field" <= ?` for every non-zero field of `record`.
    pub fn filter_lte<T: Record>(mut self, record: &T) -> Self {
        self.state.push_record(record, Operator::Lte);
        self
    }

    /// `"column" IN ?`, binding `values` as one list.
    pub fn filter_in<V: ToCql>(mut self, column: &str, values: Vec<V>) -> Self {
        self.state.push_predicate(column, Operator::In, values);
        self
    }

    // ==================== Literal predicates ====================

    pub fn eq<V: ToCql>(mut self, column: &str, value: V) -> Self {
        self.state.push_predicate(column, Operator::Eq, value);
        self
    }

    pub fn gt<V: ToCql>(mut self, column: &str, value: V) -> Self {
        self.state.push_predicate(column, Operator::Gt, value);
        self
    }

    pub fn gte<V: ToCql>(mut self, column: &str, value: V) -> Self {
        self.state.push_predicate(column, Operator::Gte, value);
        self
    }

    pub fn lt<V: ToCql>(mut self, column: &str, value: V) -> Self {
        self.state.push_predicate(column, Operator::Lt, value);
        self
    }

    pub fn lte<V: ToCql>(mut self, column: &str, value: V) -> Self {
        self.state.push_predicate(column, Operator::Lte, value);
        self
    }

    // ==================== Build ====================

    /// Render the current state for inspection.
    pub fn to_cql(&self) -> String {
        let mut cql = format!(
            "UPDATE {} ({}) VALUES ({})",
            self.state.table(),
            render_columns(&self.set_columns),
            placeholders(self.set_columns.len())
        );
        self.state.render_where(&mut cql);
        cql
    }

    /// Check the builder and render it.
    ///
    /// Does not apply the unscoped-update check; [`Update::exec`] does.
    pub fn build(mut self) -> OrmResult<BuiltQuery> {
        self.state.ready()?;
        if self.set_columns.is_empty() {
            return Err(OrmError::mapping(format!(
                "nothing to set on {}",
                self.state.table()
            )));
        }
        let cql = self.to_cql();
        let mut values = self.set_values;
        values.extend(self.state.into_predicate_values());
        Ok(BuiltQuery { cql, values })
    }

    /// Execute the update.
    pub async fn exec(self) -> OrmResult<()> {
        let session = self.session;
        let consistency = self.state.consistency();
        let context = format!("update {}", self.state.table());
        let scoped = check_scoped("UPDATE", &self.state, self.allow_unscoped);
        let query = self.build()?;
        scoped?;
        session.execute_built(&context, &query, consistency).await
    }
}
