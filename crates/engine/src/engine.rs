//! The zip-map engine.
//!
//! A run validates its arguments, then either returns a deep copy of a lone
//! input (no callback given) or drives one [`Adapter`] per input in
//! lock-step. Every round advances every adapter, even exhausted ones, so
//! shorter inputs contribute `Null` for all remaining rounds and the run
//! lasts exactly as many rounds as the longest input has entries.

use zipmap_core::{OrderedMap, Value};

use crate::adapter::Adapter;
use crate::callable::{Callable, ZipRows};
use crate::pool::BufferPool;
use crate::{EngineConfig, MapError};

/// What a validated run will do.
enum Plan<'i, 'c> {
    /// One input, no callback.
    DeepCopy(&'i OrderedMap),
    /// Several inputs, no callback: each round becomes a row.
    Zip,
    Call(&'c mut dyn Callable),
}

/// Runs zip-maps. Argument buffers are pooled across runs of one engine.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    pool: BufferPool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            pool: BufferPool::new(config.pool.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Maps `callback` over `inputs` in lock-step.
    ///
    /// Preconditions are checked in order and the first failure wins:
    /// `inputs` must be non-empty ([`MapError::NoInputs`]), every slot must
    /// hold a collection ([`MapError::MissingInput`], 1-based), and the
    /// callback must accept the arity ([`MapError::InvalidCallback`]).
    ///
    /// Without a callback, a single input is deep-copied with its keys and
    /// several inputs are zipped into rows keyed `0..N`. With exactly one
    /// input the output keeps that input's keys; otherwise it is keyed
    /// `0..max_len`.
    ///
    /// Values the callback writes into its argument slice are written back
    /// into the inputs after each round. A callback failure aborts the run
    /// and discards the output built so far.
    pub fn run(
        &self,
        inputs: &mut [Option<OrderedMap>],
        callback: Option<&mut dyn Callable>,
    ) -> Result<OrderedMap, MapError> {
        let plan = match validate(inputs, callback) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!(error = %e, "zip-map rejected");
                return Err(e);
            }
        };
        match plan {
            Plan::DeepCopy(source) => {
                tracing::debug!(len = source.len(), "zip-map without callback, copying input");
                Ok(source.deep_copy())
            }
            Plan::Zip => self.iterate(inputs, &mut ZipRows),
            Plan::Call(callback) => self.iterate(inputs, callback),
        }
    }

    fn iterate(
        &self,
        inputs: &mut [Option<OrderedMap>],
        callback: &mut dyn Callable,
    ) -> Result<OrderedMap, MapError> {
        let arity = inputs.len();
        let preserve_keys = arity == 1;
        let mut adapters: Vec<Adapter<'_>> =
            inputs.iter_mut().flatten().map(Adapter::new).collect();

        let capacity = if self.config.presize_output {
            adapters.iter().map(Adapter::len).max().unwrap_or(0)
        } else {
            0
        };
        let mut output = OrderedMap::with_capacity(capacity);
        let mut args = self.pool.acquire(arity);
        let mut rounds = 0usize;

        loop {
            let mut live = false;
            for (slot, adapter) in args.iter_mut().zip(adapters.iter_mut()) {
                if adapter.advance() {
                    live = true;
                    *slot = adapter.current_value();
                } else {
                    *slot = Value::Null;
                }
            }
            if !live {
                break;
            }
            rounds += 1;

            let result = callback
                .invoke(&mut args)
                .map_err(|source| MapError::Callback {
                    round: rounds,
                    source,
                })?;

            match adapters.first().and_then(Adapter::current_key) {
                Some(key) if preserve_keys => {
                    output.insert(key.clone(), result);
                }
                _ => {
                    output.push(result);
                }
            }

            // The callback may have replaced by-reference arguments.
            for (slot, adapter) in args.iter_mut().zip(adapters.iter_mut()) {
                if adapter.is_positioned() {
                    adapter.write_back(std::mem::take(slot).into_value())?;
                }
            }
        }

        tracing::debug!(arity, rounds, preserve_keys, "zip-map finished");
        Ok(output)
    }
}

fn validate<'i, 'c>(
    inputs: &'i [Option<OrderedMap>],
    callback: Option<&'c mut dyn Callable>,
) -> Result<Plan<'i, 'c>, MapError> {
    if inputs.is_empty() {
        return Err(MapError::NoInputs);
    }
    if let Some(i) = inputs.iter().position(Option::is_none) {
        return Err(MapError::MissingInput { position: i + 1 });
    }
    match (callback, inputs) {
        (Some(callback), _) => {
            callback
                .check(inputs.len())
                .map_err(MapError::InvalidCallback)?;
            Ok(Plan::Call(callback))
        }
        (None, [Some(only)]) => Ok(Plan::DeepCopy(only)),
        (None, _) => Ok(Plan::Zip),
    }
}
