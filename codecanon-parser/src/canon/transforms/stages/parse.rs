//! Parse stage - produces a syntax tree with the two-tier driver

use crate::canon::error::CanonError;
use crate::canon::parsing::{ParseDriver, ParseOptions, ParsedSource, SourceFile};
use crate::canon::transforms::Runnable;

/// Parse stage: `SourceFile` → `ParsedSource`
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseStage {
    driver: ParseDriver,
}

impl ParseStage {
    pub fn new(options: ParseOptions) -> Self {
        ParseStage {
            driver: ParseDriver::new(options),
        }
    }
}

impl Runnable<SourceFile, ParsedSource> for ParseStage {
    fn run(&self, input: SourceFile) -> Result<ParsedSource, CanonError> {
        let parsed = self.driver.parse(input.language, input.source)?;
        Ok(parsed)
    }
}
