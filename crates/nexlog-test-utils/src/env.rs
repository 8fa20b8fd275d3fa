// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Scoped environment-variable overrides for settings tests.

use std::collections::HashMap;

/// Sets environment variables on construction and restores the previous
/// values on drop.
///
/// Tests touching the environment should hold one of these (and run
/// single-threaded over the affected variables) to avoid cross-test bleed.
pub struct EnvGuard {
    previous: HashMap<String, Option<String>>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, &str)]) -> Self {
        let mut previous = HashMap::new();
        for (key, value) in vars {
            previous.insert((*key).to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }
        EnvGuard { previous }
    }

    /// Remove the listed variables, remembering their previous values.
    pub fn unset(vars: &[&str]) -> Self {
        let mut previous = HashMap::new();
        for key in vars {
            previous.insert((*key).to_string(), std::env::var(key).ok());
            std::env::remove_var(key);
        }
        EnvGuard { previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}
