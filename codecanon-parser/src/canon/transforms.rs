//! Transform pipeline infrastructure
//!
//! Tokenization is a chain of stages, each turning one typed value into the next. Any stage
//! can be chained with another whose input type matches its output type, and the compiler
//! checks the chain.
//!
//! # The `Runnable` Trait
//!
//! The interface every stage implements:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, CanonError>;
//! }
//! ```
//!
//! # The `Transform<I, O>` Type
//!
//! A boxed, thread safe wrapper providing `.then()` for chaining:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(ParseStage::new(ParseOptions::default()))   // SourceFile → ParsedSource
//!     .then(WalkStage::new(WalkOptions::default()));    // ParsedSource → Tokenized
//! ```
//!
//! # Static Lazy Transforms
//!
//! The default pipeline is built once as a `once_cell::sync::Lazy` static, see
//! [`standard`]. Pipelines with non-default options are built by
//! [`standard::tokenize_pipeline`].
//!
//! # Module Organization
//!
//! - [`stages`]: the parse and walk stages
//! - [`standard`]: pre-built pipelines

pub mod stages;
pub mod standard;

use crate::canon::error::CanonError;

/// Anything that can transform an input to an output
///
/// Implemented by the individual stages; [`Transform`] composes them.
pub trait Runnable<I, O> {
    /// Turn `input` into the next representation
    fn run(&self, input: I) -> Result<O, CanonError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    pipeline: Box<dyn Fn(I) -> Result<O, CanonError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Wrap a function as a single-stage pipeline
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, CanonError> + Send + Sync + 'static,
    {
        Transform {
            pipeline: Box::new(f),
        }
    }

    /// Feed the output of this pipeline into `stage`
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        self.chain(move |value| stage.run(value))
    }

    fn chain<O2, F>(self, next: F) -> Transform<I, O2>
    where
        F: Fn(O) -> Result<O2, CanonError> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let first = self.pipeline;
        Transform::from_fn(move |input| next(first(input)?))
    }

    pub fn run(&self, input: I) -> Result<O, CanonError> {
        (self.pipeline)(input)
    }
}

impl<I: 'static, O: 'static> Runnable<I, O> for Transform<I, O> {
    fn run(&self, input: I) -> Result<O, CanonError> {
        (self.pipeline)(input)
    }
}
