//! Walk stage - canonicalizes a parsed tree into tokens

use crate::canon::adapters::adapter;
use crate::canon::error::CanonError;
use crate::canon::parsing::ParsedSource;
use crate::canon::tokenizer::Tokenized;
use crate::canon::transforms::Runnable;
use crate::canon::walker::{walk, WalkOptions};

/// Walk stage: `ParsedSource` → `Tokenized`
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkStage {
    options: WalkOptions,
}

impl WalkStage {
    pub fn new(options: WalkOptions) -> Self {
        WalkStage { options }
    }
}

impl Runnable<ParsedSource, Tokenized> for WalkStage {
    fn run(&self, input: ParsedSource) -> Result<Tokenized, CanonError> {
        let walked = walk(
            &input.tree,
            &input.source,
            adapter(input.language),
            self.options,
        );
        Ok(Tokenized {
            language: input.language,
            tokens: walked.to_strings(),
            strategy: input.strategy,
            report: input.report,
            trace: walked.trace,
        })
    }
}
