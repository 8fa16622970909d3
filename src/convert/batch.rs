//! Batch conversion - runs many file jobs concurrently and reports progress

use crate::convert::{ConversionJob, Converter};
use crate::error::{BetterMdError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// How many jobs may run at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionStrategy {
    /// One file at a time; start order is not guaranteed
    #[default]
    Sequential,

    /// Every file at once
    Parallel,

    /// At most N files at once
    LimitedParallel(usize),
}

impl ConversionStrategy {
    fn permits(&self, jobs: usize) -> usize {
        match self {
            ConversionStrategy::Sequential => 1,
            ConversionStrategy::Parallel => jobs.max(1),
            ConversionStrategy::LimitedParallel(max) => (*max).max(1),
        }
    }
}

/// Progress events emitted while a batch runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionEvent {
    BatchStarted {
        total: usize,
    },
    JobStarted {
        input: PathBuf,
    },
    JobCompleted {
        input: PathBuf,
        output: PathBuf,
    },
    JobFailed {
        input: PathBuf,
        error: String,
    },
    BatchCompleted {
        succeeded: usize,
        failed: usize,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ConversionEvent) + Send + Sync>;

/// Result of one job
#[derive(Debug)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<()>,
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs conversion jobs; a failed job never stops the others
pub struct BatchConverter {
    converter: Arc<Converter>,
    strategy: ConversionStrategy,
    event_handlers: Vec<EventHandler>,
}

impl BatchConverter {
    pub fn new(converter: Converter, strategy: ConversionStrategy) -> Self {
        Self {
            converter: Arc::new(converter),
            strategy,
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ConversionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Run every job, returning outcomes in job order
    pub async fn run(&self, jobs: Vec<ConversionJob>) -> Vec<ConversionOutcome> {
        let total = jobs.len();
        let handlers: Arc<[EventHandler]> = self.event_handlers.clone().into();

        info!("Converting {} file(s) ({:?})", total, self.strategy);
        emit(&handlers, ConversionEvent::BatchStarted { total });

        let semaphore = Arc::new(Semaphore::new(self.strategy.permits(total)));
        let mut tasks = JoinSet::new();

        for (index, job) in jobs.into_iter().enumerate() {
            let converter = self.converter.clone();
            let semaphore = semaphore.clone();
            let handlers = handlers.clone();
            let (input, output) = (job.input.clone(), job.output.clone());

            let work = async move {
                let _permit = semaphore.acquire_owned().await;
                emit(&handlers, ConversionEvent::JobStarted {
                    input: job.input.clone(),
                });

                let blocking_job = job.clone();
                let result = match tokio::task::spawn_blocking(move || converter.convert_file(&blocking_job)).await {
                    Ok(result) => result,
                    Err(e) => Err(BetterMdError::Task(e.to_string())),
                };

                match &result {
                    Ok(()) => emit(&handlers, ConversionEvent::JobCompleted {
                        input: job.input.clone(),
                        output: job.output.clone(),
                    }),
                    Err(e) => {
                        warn!("Failed to convert {}: {}", job.input.display(), e);
                        emit(&handlers, ConversionEvent::JobFailed {
                            input: job.input.clone(),
                            error: e.to_string(),
                        });
                    }
                }
                result
            };

            // The outer task only waits, so every job reports back with its index
            tasks.spawn(async move {
                let result = match tokio::spawn(work).await {
                    Ok(result) => result,
                    Err(e) => {
                        error!("Conversion task for {} did not finish: {}", input.display(), e);
                        Err(BetterMdError::Task(e.to_string()))
                    }
                };
                (index, ConversionOutcome { input, output, result })
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!("Conversion task did not finish: {}", e),
            }
        }
        outcomes.sort_by_key(|(index, _)| *index);
        let outcomes: Vec<ConversionOutcome> = outcomes.into_iter().map(|(_, o)| o).collect();

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - succeeded;
        info!("Batch finished: {} succeeded, {} failed", succeeded, failed);
        emit(&handlers, ConversionEvent::BatchCompleted { succeeded, failed });

        outcomes
    }
}

fn emit(handlers: &[EventHandler], event: ConversionEvent) {
    for handler in handlers {
        handler(event.clone());
    }
}
