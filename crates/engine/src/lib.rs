//! Lock-step zip-map over ordered collections.
//!
//! Given N input collections and an optional combining function, a run
//! produces one collection whose i-th entry is the function applied to the
//! i-th entry of every input, with `Null` standing in for inputs that have
//! run out:
//!
//! - one input keeps its keys; several inputs are re-keyed `0..max_len`;
//! - one input and no function returns a deep copy of the input;
//! - several inputs and no function zip the inputs into rows.
//!
//! The combining function runs once per round, in order, on the calling
//! thread.

pub mod adapter;
pub mod callable;
pub mod config;
pub mod engine;
pub mod error;
pub mod pool;

pub use adapter::{Adapter, CursorState};
pub use callable::{pure, Arity, Callable, Pure, ZipRows};
pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use error::{CallbackError, CursorError, MapError};
pub use pool::{BufferPool, PoolConfig, PooledBuffer};
pub use zipmap_core::{Key, OrderedMap, SharedCell, Value, ValueError};

/// Run a zip-map once with a default [`Engine`].
///
/// Reuse an `Engine` instead when mapping repeatedly, so that argument
/// buffers are pooled between runs.
pub fn array_map(
    callback: Option<&mut dyn Callable>,
    inputs: &mut [Option<OrderedMap>],
) -> Result<OrderedMap, MapError> {
    Engine::default().run(inputs, callback)
}
