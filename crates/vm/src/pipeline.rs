//! Chains several engines into a feedback loop.
//!
//! Each stage's output is the next stage's input, and the final stage feeds
//! the first. Stages are driven round-robin on one thread: a stage runs until
//! it yields a value, which is handed to the next stage still running.

use crate::coroutine::{Coroutine, CoroutineState};
use crate::error::{VmError, VmResult};
use crate::execution_engine::ExecutionEngine;

/// A ring of coroutines driven round-robin.
#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<Coroutine>,
    rounds: u64,
}

impl Pipeline {
    /// Wraps `engines` as stages, in order.
    pub fn new<I>(engines: I) -> Self
    where
        I: IntoIterator<Item = ExecutionEngine>,
    {
        Self {
            stages: engines.into_iter().map(Coroutine::new).collect(),
            rounds: 0,
        }
    }

    /// Creates one stage per entry of `settings`, each over its own copy of
    /// `program` with its setting queued as the first input.
    pub fn from_program(program: &[i64], settings: &[i64]) -> Self {
        Self::new(settings.iter().map(|&setting| {
            let mut engine = ExecutionEngine::new(program);
            engine.push_input(setting);
            engine
        }))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Completed round-robin passes over the stages.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn stages(&self) -> &[Coroutine] {
        &self.stages
    }

    /// Returns true once every stage has halted.
    pub fn is_complete(&self) -> bool {
        self.stages.iter().all(Coroutine::is_complete)
    }

    pub fn into_engines(self) -> Vec<ExecutionEngine> {
        self.stages.into_iter().map(Coroutine::into_engine).collect()
    }

    /// Runs the feedback loop until every stage has halted.
    ///
    /// `seed` is handed to the first stage. Each stage that has not halted is
    /// resumed in order with the value in flight, and the value it yields
    /// replaces it. A stage that halts consumes the value in flight, so the
    /// stages after it are resumed with no new input. A stage that then needs
    /// input faults with [`VmError::InputExhausted`].
    ///
    /// Yielded values are routed by the pipeline, so each stage's output
    /// device is drained as it yields and holds nothing afterwards.
    ///
    /// Returns every value the final stage yielded, in order.
    pub fn run_feedback(&mut self, seed: i64) -> VmResult<Vec<i64>> {
        let last = match self.stages.len().checked_sub(1) {
            Some(last) => last,
            None => return Ok(Vec::new()),
        };

        let mut in_flight = Some(seed);
        let mut results = Vec::new();

        while !self.is_complete() {
            for (index, stage) in self.stages.iter_mut().enumerate() {
                if stage.is_complete() {
                    continue;
                }
                match stage.resume(in_flight.take())? {
                    CoroutineState::Yielded(value) => {
                        stage.engine_mut().take_output();
                        if index == last {
                            results.push(value);
                        }
                        in_flight = Some(value);
                    }
                    CoroutineState::Complete => {
                        log::debug!("pipeline stage {} completed", index);
                    }
                }
            }

            self.rounds += 1;
            log::debug!(
                "pipeline round {} finished, value in flight {:?}",
                self.rounds,
                in_flight
            );
        }

        Ok(results)
    }
}
