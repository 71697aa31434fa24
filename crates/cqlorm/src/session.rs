//! The session boundary: the driver traits builders execute against, and the
//! [`Session`] facade that hands out builders.

use crate::config::SessionConfig;
use crate::consistency::Consistency;
use crate::error::{BoxError, OrmError, OrmResult};
use crate::qb::{BuiltQuery, Delete, Insert, Select, Update};
use crate::value::CqlValue;
use std::borrow::Cow;
use std::future::Future;

/// A cursor over the raw rows of one query.
///
/// Implementations release their server-side resources in `close` and, failing
/// that, when dropped.
pub trait RowIter: Send {
    /// Fetch the next row, or `None` once the result set is exhausted.
    fn next_row(
        &mut self,
    ) -> impl Future<Output = Result<Option<Vec<CqlValue>>, BoxError>> + Send;

    /// Number of rows in the result set.
    fn row_count(&self) -> usize;

    /// Release the cursor, reporting any error the driver deferred.
    fn close(self) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// A connection-level driver that executes CQL text with bound values.
///
/// Cancellation and timeouts belong to the caller: drop or wrap the returned futures.
pub trait CqlSession: Send + Sync {
    type Rows: RowIter;

    /// Execute a statement that returns no rows.
    fn execute(
        &self,
        cql: &str,
        values: &[CqlValue],
        consistency: Consistency,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Execute a query and return a cursor over its rows.
    fn query(
        &self,
        cql: &str,
        values: &[CqlValue],
        consistency: Consistency,
    ) -> impl Future<Output = Result<Self::Rows, BoxError>> + Send;
}

/// A driver plus the configuration builders are created with.
///
/// ```ignore
/// let session = Session::new(driver);
///
/// let user: User = session.select().filter(&User { id: 1, ..Default::default() }).one().await?;
/// session.insert().values(&user).if_not_exists().exec().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Session<S> {
    inner: S,
    config: SessionConfig,
}

impl<S: CqlSession> Session<S> {
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, SessionConfig::default())
    }

    pub fn with_config(inner: S, config: SessionConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Access the underlying driver.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Start a SELECT.
    pub fn select(&self) -> Select<'_, S> {
        Select::new(self)
    }

    /// Start an INSERT.
    pub fn insert(&self) -> Insert<'_, S> {
        Insert::new(self)
    }

    /// Start an UPDATE.
    pub fn update(&self) -> Update<'_, S> {
        Update::new(self)
    }

    /// Start a DELETE.
    pub fn delete(&self) -> Delete<'_, S> {
        Delete::new(self)
    }

    pub(crate) async fn execute_built(
        &self,
        context: &str,
        query: &BuiltQuery,
        consistency: Consistency,
    ) -> OrmResult<()> {
        self.log_statement(context, &query.cql, consistency);
        self.inner
            .execute(&query.cql, &query.values, consistency)
            .await
            .map_err(|e| transport_failed(context, e))
    }

    pub(crate) async fn query_built(
        &self,
        context: &str,
        query: &BuiltQuery,
        consistency: Consistency,
    ) -> OrmResult<S::Rows> {
        self.log_statement(context, &query.cql, consistency);
        self.inner
            .query(&query.cql, &query.values, consistency)
            .await
            .map_err(|e| transport_failed(context, e))
    }

    #[cfg(feature = "tracing")]
    fn log_statement(&self, context: &str, cql: &str, consistency: Consistency) {
        if self.config.log_queries {
            tracing::debug!(
                target: "cqlorm.cql",
                context,
                consistency = %consistency,
                cql = %truncate_cql(cql, self.config.max_log_length),
                "cql"
            );
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn log_statement(&self, _context: &str, _cql: &str, _consistency: Consistency) {}
}

/// Wrap a driver error with call-site context.
pub(crate) fn transport_failed(context: &str, source: BoxError) -> OrmError {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "cqlorm.cql", context, error = %source, "session error");

    OrmError::transport(context, source)
}

/// Cut `cql` to at most `max` bytes on a char boundary.
pub(crate) fn truncate_cql(cql: &str, max: Option<usize>) -> Cow<'_, str> {
    match max {
        Some(max) if cql.len() > max => {
            let mut end = max;
            while !cql.is_char_boundary(end) {
                end -= 1;
            }
            Cow::Owned(format!("{}...", &cql[..end]))
        }
        _ => Cow::Borrowed(cql),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_cql("SELECT", None), "SELECT");
        assert_eq!(truncate_cql("SELECT", Some(10)), "SELECT");
        assert_eq!(truncate_cql("SELECT", Some(3)), "SEL...");
        // 'é' is two bytes; cutting inside it backs off.
        assert_eq!(truncate_cql("aé", Some(2)), "a...");
    }

    #[test]
    fn transport_failure_keeps_context() {
        let err = transport_failed("insert into user", "node unavailable".into());
        assert!(err.is_transport());
        assert!(err.to_string().contains("insert into user"));
    }
}
