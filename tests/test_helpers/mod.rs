//! Scoped environment overrides for tests that read configuration from the
//! process environment.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Restores the previous values of the variables it changed when dropped.
pub struct EnvVarGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes`, where `None` unsets the variable.
    pub fn set_many(changes: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let previous = changes
            .iter()
            .map(|&(key, value)| {
                let old = env::var(key).ok();
                unsafe {
                    // SAFETY: ENV_MUTEX serializes environment mutation across tests.
                    match value {
                        Some(new_value) => env::set_var(key, new_value),
                        None => env::remove_var(key),
                    }
                }
                (key, old)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            unsafe {
                // SAFETY: the guard still holds ENV_MUTEX.
                match value {
                    Some(previous) => env::set_var(key, previous),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
