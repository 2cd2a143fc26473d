//! A builder for SQL MERGE statements.
//!
//! ```ignore
//! use query_builder::{ast::{common::TableRef, merge::MatchingSituation}, merge};
//!
//! let (target, source) = (TableRef::new("target"), TableRef::new("source"));
//! let sql = merge(target.clone())
//!     .using(source.clone())?
//!     .on(source.field("id").equals(target.field("id")))?
//!     .delete(MatchingSituation::NotMatchedBySource, None)?
//!     .to_sql()?;
//! ```

use crate::{ast::common::TableRef, builder::merge::MergeBuilder};

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod error;
pub mod macros;
pub mod renderer;
pub mod validation;

/// Starts a MERGE statement into `target`.
pub fn merge(target: TableRef) -> MergeBuilder {
    MergeBuilder::with_target(target)
}
