//! SELECT builder.

use crate::consistency::Consistency;
use crate::decode::Decoder;
use crate::error::{OrmError, OrmResult};
use crate::qb::expr::{Operator, Order, quote};
use crate::qb::scanner::Scanner;
use crate::qb::{BuiltQuery, State, render_columns};
use crate::naming;
use crate::record::Record;
use crate::session::{CqlSession, RowIter, Session, transport_failed};
use crate::value::ToCql;

/// SELECT builder.
///
/// Renders `SELECT <cols> FROM <table> [WHERE ..] [ORDER BY "col" DIR] [LIMIT n]
/// [ALLOW FILTERING]`.
#[derive(Debug)]
pub struct Select<'a, S> {
    session: &'a Session<S>,
    state: State,
    /// Explicit projection; empty means every mapped column
    columns: Vec<String>,
    order: Option<(String, Order)>,
    /// 0 means unbounded
    limit: usize,
    allow_filtering: bool,
}

impl<'a, S: CqlSession> Select<'a, S> {
    pub(crate) fn new(session: &'a Session<S>) -> Self {
        Self {
            session,
            state: State::new(session.config().consistency),
            columns: Vec::new(),
            order: None,
            limit: 0,
            allow_filtering: false,
        }
    }

    /// Project these columns instead of every mapped column.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
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

    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.state.set_consistency(consistency);
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

    // ==================== Modifiers ====================

    /// Order by a single column; a later call replaces an earlier one.
    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    /// Limit the row count; 0 means unbounded.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = n;
        self
    }

    pub fn allow_filtering(mut self) -> Self {
        self.allow_filtering = true;
        self
    }

    // ==================== Rendering ====================

    /// Explicit columns, else the bound record's columns.
    fn projection(&self) -> Option<Vec<String>> {
        if !self.columns.is_empty() {
            return Some(self.columns.clone());
        }
        self.state
            .mapper()
            .map(|m| m.columns().to_vec())
            .filter(|c| !c.is_empty())
    }

    fn render(&self, projection: &[String]) -> String {
        let columns = if projection.is_empty() {
            "*".to_string()
        } else {
            render_columns(projection)
        };
        let mut cql = format!("SELECT {} FROM {}", columns, self.state.table());
        self.state.render_where(&mut cql);
        if let Some((column, order)) = &self.order {
            cql.push_str(&format!(" ORDER BY {} {}", quote(column), order.as_str()));
        }
        if self.limit > 0 {
            cql.push_str(&format!(" LIMIT {}", self.limit));
        }
        if self.allow_filtering {
            cql.push_str(" ALLOW FILTERING");
        }
        cql
    }

    /// Render the current state for inspection.
    pub fn to_cql(&self) -> String {
        self.render(&self.projection().unwrap_or_default())
    }

    /// Check the builder and render it.
    pub fn build(mut self) -> OrmResult<BuiltQuery> {
        self.state.ready()?;
        let projection = self.projection().unwrap_or_default();
        Ok(self.finish(&projection))
    }

    fn finish(self, projection: &[String]) -> BuiltQuery {
        let cql = self.render(projection);
        BuiltQuery {
            cql,
            values: self.state.into_predicate_values().collect(),
        }
    }

    fn context(&self) -> String {
        format!("select from {}", self.state.table())
    }

    // ==================== Terminals ====================

    /// Open a cursor decoding rows into `T`.
    ///
    /// Binds `T`'s table if none is bound yet. The caller must drain or close the
    /// returned scanner.
    pub async fn scanner<T: Record>(mut self) -> OrmResult<Scanner<T, S::Rows>> {
        self.state.bind::<T>();
        self.state.ready()?;
        let decoder = Decoder::<T>::new()?;
        let projection = self
            .projection()
            .unwrap_or_else(|| decoder.mapper().columns().to_vec());

        let session = self.session;
        let consistency = self.state.consistency();
        let context = self.context();
        let query = self.finish(&projection);
        let rows = session.query_built(&context, &query, consistency).await?;
        Ok(Scanner::new(rows, projection, decoder))
    }

    /// Fetch the first row into `record`; [`OrmError::NotFound`] when there is none.
    ///
    /// Forces `LIMIT 1`.
    pub async fn one_into<T: Record>(self, record: &mut T) -> OrmResult<()> {
        let table = match self.state.table() {
            "" => naming::table_name::<T>(),
            bound => bound.to_string(),
        };
        let mut scanner = self.limit(1).scanner::<T>().await?;
        let outcome = match scanner.next_row().await {
            Ok(true) => scanner.scan(record),
            Ok(false) => Err(OrmError::not_found(format!(
                "no {} row matched in {}",
                T::TYPE_NAME, table
            ))),
            Err(err) => Err(err),
        };
        let closed = scanner.close().await;
        outcome?;
        closed
    }

    /// Fetch the first row as a new `T`.
    pub async fn one<T: Record + Default>(self) -> OrmResult<T> {
        let mut record = T::default();
        self.one_into(&mut record).await?;
        Ok(record)
    }

    /// Append every row to `out`.
    ///
    /// Rows decoded before a failure stay in `out`.
    pub async fn all_into<T: Record + Default>(self, out: &mut Vec<T>) -> OrmResult<()> {
        let mut scanner = self.scanner::<T>().await?;
        let outcome = scanner.append_remaining(out).await;
        let closed = scanner.close().await;
        outcome?;
        closed
    }

    /// Fetch every row.
    pub async fn all<T: Record + Default>(self) -> OrmResult<Vec<T>> {
        let mut out = Vec::new();
        self.all_into(&mut out).await?;
        Ok(out)
    }

    /// Number of rows the query returns, without decoding them.
    pub async fn count(mut self) -> OrmResult<usize> {
        self.state.ready()?;
        let projection = self.projection().unwrap_or_default();

        let session = self.session;
        let consistency = self.state.consistency();
        let context = self.context();
        let query = self.finish(&projection);
        let rows = session.query_built(&context, &query, consistency).await?;
        let count = rows.row_count();
        rows.close()
            .await
            .map_err(|e| transport_failed(&context, e))?;
        Ok(count)
    }
}
