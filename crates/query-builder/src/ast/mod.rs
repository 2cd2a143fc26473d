pub mod common;
pub mod expr;
pub mod functions;
pub mod merge;
