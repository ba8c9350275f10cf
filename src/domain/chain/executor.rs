//! Fallback chain - ordered producers with a guaranteed static default

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::producer::Producer;
use crate::domain::DomainError;
use crate::domain::cache::SourceStatus;

/// What happened at one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Non-empty result, chain stopped here
    Produced(usize),
    /// Producer succeeded with nothing
    Empty,
    /// Producer returned an error
    Failed(String),
}

/// Result of running a single step
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Producer name
    pub producer: String,
    pub outcome: StepOutcome,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Result of running a whole chain
#[derive(Debug, Clone)]
pub struct ChainOutcome<T> {
    /// Never empty
    pub payload: Vec<T>,
    /// `Live` when a producer answered, `FallbackDefault` otherwise
    pub status: SourceStatus,
    /// Name of the producer whose result was taken
    pub producer: Option<String>,
    /// Results from each attempted step, in order
    pub steps: Vec<StepResult>,
}

/// Ordered list of producers ending in a non-empty static default.
///
/// Producers are tried strictly in order and the first non-empty result wins; later producers
/// are never invoked once an earlier one answered. Running a chain never fails.
pub struct FallbackChain<T> {
    label: String,
    producers: Vec<Arc<dyn Producer<T>>>,
    default: Vec<T>,
}

impl<T: Send> fmt::Debug for FallbackChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackChain")
            .field("label", &self.label)
            .field(
                "producers",
                &self.producers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("default_len", &self.default.len())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> FallbackChain<T> {
    /// Create a chain with no producers yet. The default must be non-empty.
    pub fn new(label: impl Into<String>, default: Vec<T>) -> Result<Self, DomainError> {
        let label = label.into();

        if default.is_empty() {
            return Err(DomainError::configuration(format!(
                "Fallback chain '{}' needs a non-empty default",
                label
            )));
        }

        Ok(Self {
            label,
            producers: Vec::new(),
            default,
        })
    }

    /// Append a producer after the existing ones
    pub fn with_producer(mut self, producer: Arc<dyn Producer<T>>) -> Self {
        self.producers.push(producer);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Run the producers in order and return the first non-empty result, or the default
    pub async fn run(&self) -> ChainOutcome<T> {
        let mut steps = Vec::with_capacity(self.producers.len());

        for producer in &self.producers {
            let start = Instant::now();
            let result = producer.produce().await;
            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(records) if !records.is_empty() => {
                    debug!(
                        chain = %self.label,
                        producer = %producer.name(),
                        count = records.len(),
                        latency_ms,
                        "Chain step produced data"
                    );

                    steps.push(StepResult {
                        producer: producer.name().to_string(),
                        outcome: StepOutcome::Produced(records.len()),
                        latency_ms,
                    });

                    return ChainOutcome {
                        payload: records,
                        status: SourceStatus::Live,
                        producer: Some(producer.name().to_string()),
                        steps,
                    };
                }
                Ok(_) => {
                    debug!(chain = %self.label, producer = %producer.name(), "Chain step empty");
                    steps.push(StepResult {
                        producer: producer.name().to_string(),
                        outcome: StepOutcome::Empty,
                        latency_ms,
                    });
                }
                Err(e) => {
                    warn!(
                        chain = %self.label,
                        producer = %producer.name(),
                        error = %e,
                        "Chain step failed"
                    );
                    steps.push(StepResult {
                        producer: producer.name().to_string(),
                        outcome: StepOutcome::Failed(e.to_string()),
                        latency_ms,
                    });
                }
            }
        }

        debug!(chain = %self.label, "All producers exhausted, using default");

        ChainOutcome {
            payload: self.default.clone(),
            status: SourceStatus::FallbackDefault,
            producer: None,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain::mock::StaticProducer;

    #[test]
    fn test_empty_default_rejected() {
        let result = FallbackChain::<u32>::new("news:english", Vec::new());
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_debug_lists_producer_names() {
        let chain = FallbackChain::new("weather:guntur", vec![0u32])
            .unwrap()
            .with_producer(Arc::new(StaticProducer::ok("open-meteo", vec![1u32])))
            .with_producer(Arc::new(StaticProducer::<u32>::empty("backup")));

        let debug = format!("{:?}", chain);

        assert!(debug.contains("weather:guntur"));
        assert!(debug.contains(r#"["open-meteo", "backup"]"#));
        assert!(debug.contains("default_len: 1"));
    }

    #[tokio::test]
    async fn test_first_non_empty_wins_and_short_circuits() {
        let first = Arc::new(StaticProducer::<u32>::empty("primary"));
        let second = Arc::new(StaticProducer::ok("backup", vec![7, 8]));
        let third = Arc::new(StaticProducer::ok("never", vec![9]));

        let chain = FallbackChain::new("test", vec![0])
            .unwrap()
            .with_producer(first.clone())
            .with_producer(second.clone())
            .with_producer(third.clone());

        let outcome = chain.run().await;

        assert_eq!(outcome.payload, vec![7, 8]);
        assert_eq!(outcome.status, SourceStatus::Live);
        assert_eq!(outcome.producer.as_deref(), Some("backup"));
        assert_eq!(outcome.steps.len(), 2);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 0);
    }

    #[tokio::test]
    async fn test_errors_fall_through_to_next_producer() {
        let chain = FallbackChain::new("test", vec![0])
            .unwrap()
            .with_producer(Arc::new(StaticProducer::<u32>::err("broken", "503")))
            .with_producer(Arc::new(StaticProducer::ok("healthy", vec![1])));

        let outcome = chain.run().await;

        assert_eq!(outcome.payload, vec![1]);
        assert!(matches!(outcome.steps[0].outcome, StepOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_all_failing_returns_default() {
        let chain = FallbackChain::new("test", vec![42])
            .unwrap()
            .with_producer(Arc::new(StaticProducer::<u32>::err("a", "timeout")))
            .with_producer(Arc::new(StaticProducer::<u32>::empty("b")));

        let outcome = chain.run().await;

        assert_eq!(outcome.payload, vec![42]);
        assert_eq!(outcome.status, SourceStatus::FallbackDefault);
        assert!(outcome.producer.is_none());
        assert_eq!(outcome.steps.len(), 2);
    }

    #[tokio::test]
    async fn test_chain_without_producers_returns_default() {
        let chain = FallbackChain::new("test", vec!["offline"]).unwrap();

        assert!(chain.is_empty());
        assert_eq!(chain.run().await.payload, vec!["offline"]);
    }
}
