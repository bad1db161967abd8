//! Argument buffer pooling.
//!
//! Buffers are pooled by arity. A buffer is cleared when it goes back to the
//! pool and filled with `Null` when it comes out, so no value from an
//! earlier run is ever visible to a later one. Release happens in `Drop`,
//! which covers every exit path of a run: success, precondition failure and
//! callback failure alike.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use serde::Deserialize;
use zipmap_core::Value;

/// Retention limits for a [`BufferPool`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// When false every buffer is freed on release.
    pub enabled: bool,
    /// Buffers for more inputs than this are never retained.
    pub max_arity: usize,
    /// Idle buffers kept per arity.
    pub max_idle_per_arity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_arity: 64,
            max_idle_per_arity: 4,
        }
    }
}

#[derive(Debug, Default)]
pub struct BufferPool {
    config: PoolConfig,
    idle: RefCell<HashMap<usize, Vec<Vec<Value>>>>,
}

impl BufferPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            idle: RefCell::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Hands out a buffer of exactly `arity` `Null` slots.
    ///
    /// The pool is only borrowed for the duration of this call, so a
    /// callback running while the buffer is out may acquire another one.
    pub fn acquire(&self, arity: usize) -> PooledBuffer<'_> {
        let reused = self
            .idle
            .borrow_mut()
            .get_mut(&arity)
            .and_then(|stack| stack.pop());
        let mut buf = match reused {
            Some(buf) => {
                tracing::trace!(arity, "reusing pooled argument buffer");
                buf
            }
            None => Vec::with_capacity(arity),
        };
        buf.resize(arity, Value::Null);
        PooledBuffer {
            pool: self,
            buf,
            arity,
        }
    }

    /// Idle buffers currently held for `arity`.
    pub fn idle(&self, arity: usize) -> usize {
        self.idle.borrow().get(&arity).map_or(0, Vec::len)
    }

    fn release(&self, arity: usize, mut buf: Vec<Value>) {
        buf.clear();
        if !self.config.enabled || arity > self.config.max_arity {
            return;
        }
        let Ok(mut idle) = self.idle.try_borrow_mut() else {
            return;
        };
        let stack = idle.entry(arity).or_default();
        if stack.len() < self.config.max_idle_per_arity {
            stack.push(buf);
        } else {
            tracing::trace!(arity, "pool full, dropping argument buffer");
        }
    }
}

/// A buffer on loan from a [`BufferPool`]; returned when dropped.
#[derive(Debug)]
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Vec<Value>,
    arity: usize,
}

impl Deref for PooledBuffer<'_> {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(self.arity, std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_buffers_are_reused_and_cleared() {
        let pool = BufferPool::default();
        {
            let mut buf = pool.acquire(3);
            buf[0] = Value::Int(1);
            buf[2] = Value::from("left over");
        }
        assert_eq!(pool.idle(3), 1);

        let buf = pool.acquire(3);
        assert_eq!(pool.idle(3), 0);
        assert!(buf.iter().all(Value::is_null));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn buffers_are_keyed_by_arity() {
        let pool = BufferPool::default();
        drop(pool.acquire(2));
        let buf = pool.acquire(5);
        assert_eq!(buf.len(), 5);
        assert_eq!(pool.idle(2), 1);
    }

    #[test]
    fn nested_acquire_while_a_buffer_is_out() {
        let pool = BufferPool::default();
        let outer = pool.acquire(2);
        let inner = pool.acquire(2);
        drop(inner);
        drop(outer);
        assert_eq!(pool.idle(2), 2);
    }

    #[test]
    fn retention_limits_are_honoured() {
        let pool = BufferPool::new(PoolConfig {
            enabled: true,
            max_arity: 2,
            max_idle_per_arity: 1,
        });
        let a = pool.acquire(2);
        let b = pool.acquire(2);
        drop(a);
        drop(b);
        assert_eq!(pool.idle(2), 1);

        drop(pool.acquire(3));
        assert_eq!(pool.idle(3), 0);
    }

    #[test]
    fn disabled_pool_keeps_nothing() {
        let pool = BufferPool::new(PoolConfig {
            enabled: false,
            ..PoolConfig::default()
        });
        drop(pool.acquire(1));
        assert_eq!(pool.idle(1), 0);
    }
}
