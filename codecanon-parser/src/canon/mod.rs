//! Main module for codecanon library functionality

pub mod adapters;
pub mod error;
pub mod language;
pub mod literals;
pub mod parsing;
pub mod scope;
pub mod testing;
pub mod tokenizer;
pub mod transforms;
pub mod walker;
