//! Feature encoding: raw car attributes -> the vector the model was fit on.
//!
//! - `frequency`: per-field category frequency lookups
//! - `schema`: the ordered training columns and the plan compiled from them
//! - `encoder`: the per-request transformation

pub mod encoder;
pub mod frequency;
pub mod schema;

pub use encoder::*;
pub use frequency::*;
pub use schema::*;
