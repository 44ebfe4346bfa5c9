//! Blockfall (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `blockfall::{core,input,term,types}` and holds the
//! pieces shared by the two binaries.

pub mod logging;
pub mod script;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
