//! Convenient imports for typical `cqlorm` usage.
//!
//! ```ignore
//! use cqlorm::prelude::*;
//! ```

pub use crate::{
    Consistency, CqlSession, CqlValue, OrmError, OrmResult, Order, Record, RowIter, Session,
    SessionConfig,
};
pub use crate::{Blob, Json};
