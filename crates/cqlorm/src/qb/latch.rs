//! Deferred builder errors.

use crate::error::{OrmError, OrmResult};

/// Holds the first error a builder's fluent calls produced.
///
/// Later errors are dropped. Terminal calls take the error out before doing any work.
#[derive(Debug, Default)]
pub(crate) struct ErrorLatch(Option<OrmError>);

impl ErrorLatch {
    pub(crate) fn record(&mut self, err: OrmError) {
        if self.0.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "cqlorm.latch", error = %err, "dropping error, latch already set");
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "cqlorm.latch", error = %err, "latched builder error");
        self.0 = Some(err);
    }

    /// Unwrap `result`, latching its error.
    pub(crate) fn capture<T>(&mut self, result: OrmResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.record(err);
                None
            }
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Fail with the latched error, if any.
    pub(crate) fn check(&mut self) -> OrmResult<()> {
        match self.0.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
