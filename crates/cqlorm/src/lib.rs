//! # cqlorm
//!
//! Record mapping and fluent query builders for CQL stores.
//!
//! ## Features
//!
//! - **Typed records**: `#[derive(Record)]` generates a static field table, so no
//!   per-call introspection happens
//! - **Deterministic CQL**: builders render text and positional values; values are always
//!   bound, never inlined
//! - **Deferred errors**: fluent calls never fail; the terminal call reports the first
//!   error before touching the session
//! - **Streaming**: [`Scanner`] decodes rows one at a time and converts into a `Stream`
//! - **Safe defaults**: UPDATE/DELETE without a WHERE clause are refused unless allowed
//! - **Driver agnostic**: implement [`CqlSession`] and [`RowIter`] for any driver
//!
//! ## Example
//!
//! ```ignore
//! use cqlorm::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let session = Session::new(driver);
//!
//! session.insert().values(&User { id: 1, name: "alice".into() }).exec().await?;
//!
//! let user: User = session
//!     .select()
//!     .from::<User>()
//!     .filter(&User { id: 1, ..Default::default() })
//!     .one()
//!     .await?;
//!
//! session
//!     .update()
//!     .set(&User { name: "alicia".into(), ..Default::default() })
//!     .eq("id", 1_i64)
//!     .exec()
//!     .await?;
//!
//! session.delete().from::<User>().eq("id", 1_i64).exec().await?;
//! ```

extern crate self as cqlorm;

pub mod config;
pub mod consistency;
pub mod decode;
pub mod error;
pub mod mapper;
pub mod naming;
pub mod prelude;
pub mod qb;
pub mod record;
pub mod session;
pub mod value;

pub use config::SessionConfig;
pub use consistency::Consistency;
pub use decode::Decoder;
pub use error::{BoxError, OrmError, OrmResult, TypeMismatch};
pub use mapper::{Extract, Mapper, extract};
pub use qb::{Argument, BuiltQuery, Delete, Insert, Operator, Order, Scanner, Select, Update};
pub use record::{FieldDef, Record};
pub use session::{CqlSession, RowIter, Session};
pub use value::{Blob, CqlValue, FromCql, Json, ToCql};

#[cfg(feature = "derive")]
pub use cqlorm_derive::Record;
