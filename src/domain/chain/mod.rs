//! Fallback chains - ordered producers with a static default

mod executor;
mod producer;

pub use executor::{ChainOutcome, FallbackChain, StepOutcome, StepResult};
pub use producer::Producer;

#[cfg(test)]
pub use producer::mock;
