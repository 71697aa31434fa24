//! Streaming row cursor.

use crate::decode::Decoder;
use crate::error::{OrmError, OrmResult};
use crate::record::Record;
use crate::session::{RowIter, transport_failed};
use crate::value::CqlValue;
use futures_core::Stream;
use futures_util::stream;

/// A cursor over query results, decoding one row at a time into `T`.
///
/// Drain it or call [`Scanner::close`] on every path. A scanner dropped early still
/// releases the cursor through the row iterator's `Drop`, but any deferred driver
/// error is lost.
///
/// ```ignore
/// let mut scanner = session.select().from::<User>().scanner::<User>().await?;
/// while let Some(user) = scanner.next().await? {
///     println!("{}", user.name);
/// }
/// scanner.close().await?;
/// ```
pub struct Scanner<T, R: RowIter> {
    rows: Option<R>,
    columns: Vec<String>,
    decoder: Decoder<T>,
    current: Option<Vec<CqlValue>>,
    drained: bool,
}

impl<T: Record, R: RowIter> Scanner<T, R> {
    pub(crate) fn new(rows: R, columns: Vec<String>, decoder: Decoder<T>) -> Self {
        Self {
            rows: Some(rows),
            columns,
            decoder,
            current: None,
            drained: false,
        }
    }

    /// Projected columns, in the order each row's values arrive.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows in the result set.
    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map_or(0, R::row_count)
    }

    /// Advance to the next row. Returns `false` once the rows are exhausted.
    pub async fn next_row(&mut self) -> OrmResult<bool> {
        self.current = None;
        let Some(rows) = self.rows.as_mut() else {
            return Ok(false);
        };
        match rows.next_row().await {
            Ok(Some(values)) => {
                self.current = Some(values);
                Ok(true)
            }
            Ok(None) => {
                self.drained = true;
                Ok(false)
            }
            Err(err) => Err(transport_failed("fetch next row", err)),
        }
    }

    /// Decode the current row into `record`, consuming it.
    pub fn scan(&mut self, record: &mut T) -> OrmResult<()> {
        let values = self
            .current
            .take()
            .ok_or_else(|| OrmError::mapping("scan called without a current row"))?;
        self.decoder.decode(record, &self.columns, values)
    }

    /// Advance and decode the next row into a fresh `T`.
    pub async fn next(&mut self) -> OrmResult<Option<T>>
    where
        T: Default,
    {
        if !self.next_row().await? {
            return Ok(None);
        }
        let mut record = T::default();
        self.scan(&mut record)?;
        Ok(Some(record))
    }

    /// Decode every remaining row onto `out`, stopping at the first error.
    pub async fn append_remaining(&mut self, out: &mut Vec<T>) -> OrmResult<()>
    where
        T: Default,
    {
        while self.next_row().await? {
            if let Some(values) = self.current.take() {
                self.decoder.append(out, &self.columns, values)?;
            }
        }
        Ok(())
    }

    /// Release the cursor, surfacing any error the driver deferred.
    pub async fn close(mut self) -> OrmResult<()> {
        match self.rows.take() {
            Some(rows) => rows
                .close()
                .await
                .map_err(|err| transport_failed("close rows", err)),
            None => Ok(()),
        }
    }

    /// Turn the scanner into a stream of records.
    ///
    /// The stream ends after the first error and closes the cursor once drained.
    pub fn into_stream(self) -> impl Stream<Item = OrmResult<T>>
    where
        T: Default,
    {
        stream::unfold(Some(self), |state| async move {
            let mut scanner = state?;
            match scanner.next().await {
                Ok(Some(record)) => Some((Ok(record), Some(scanner))),
                Ok(None) => match scanner.close().await {
                    Ok(()) => None,
                    Err(err) => Some((Err(err), None)),
                },
                Err(err) => {
                    // The scan error wins; the close error is only logged.
                    if let Err(close_err) = scanner.close().await {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            target: "cqlorm.scanner",
                            error = %close_err,
                            scan_error = %err,
                            "closing rows failed after a scan error"
                        );
                        #[cfg(not(feature = "tracing"))]
                        drop(close_err);
                    }
                    Some((Err(err), None))
                }
            }
        })
    }
}

impl<T, R: RowIter> Drop for Scanner<T, R> {
    fn drop(&mut self) {
        if self.rows.is_some() && !self.drained {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "cqlorm.scanner",
                columns = ?self.columns,
                "scanner dropped before it was drained or closed"
            );
        }
    }
}

impl<T, R: RowIter> std::fmt::Debug for Scanner<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("columns", &self.columns)
            .field("open", &self.rows.is_some())
            .field("drained", &self.drained)
            .finish()
    }
}
