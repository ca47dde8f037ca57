//! Individual transformation stages
//!
//! Each stage implements the `Runnable` trait.

pub mod parse;
pub mod walk;

pub use parse::ParseStage;
pub use walk::WalkStage;
