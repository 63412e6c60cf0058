//! Asset loading and validation for spell rewards.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
