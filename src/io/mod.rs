//! Input/output helpers.
//!
//! - trained-model bundle loading (`bundle`)
//! - batch CSV ingest + results export (`batch`)
//! - prediction JSON read/write (`export`)

pub mod batch;
pub mod bundle;
pub mod export;

pub use batch::*;
pub use bundle::*;
pub use export::*;
