//! Fitted model components loaded from the bundle.
//!
//! Both are plain data plus pure evaluation functions, so they can be shared
//! freely once loaded.

pub mod model;
pub mod scaler;

pub use model::*;
pub use scaler::*;
