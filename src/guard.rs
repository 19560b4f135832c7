use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

use crate::error::{AppError, AppResult};

/// Per-resource in-flight guard for mutations. A second mutation for the
/// same key while one is outstanding gets 409 instead of double-submitting;
/// distinct resources never block each other. Reads are not guarded.
#[derive(Clone, Default)]
pub struct MutationGuard {
    inflight: Arc<Mutex<HashSet<String>>>,
}

impl MutationGuard {
    /// Claim `key` for the duration of the returned permit.
    pub fn begin(&self, key: impl Into<String>) -> AppResult<MutationPermit> {
        let key = key.into();
        let mut held = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !held.insert(key.clone()) {
            return Err(AppError::Busy(key));
        }
        Ok(MutationPermit {
            key,
            inflight: Arc::clone(&self.inflight),
        })
    }
}

/// Releases its key on drop, including on error paths.
#[derive(Debug)]
pub struct MutationPermit {
    key: String,
    inflight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for MutationPermit {
    fn drop(&mut self) {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_mutation_is_rejected() {
        let guard = MutationGuard::default();
        let permit = guard.begin("order:o-1").expect("first claim");

        let err = guard.begin("order:o-1").expect_err("second claim");
        assert!(matches!(err, AppError::Busy(key) if key == "order:o-1"));

        drop(permit);
        guard.begin("order:o-1").expect("free after drop");
    }

    #[test]
    fn distinct_resources_do_not_block() {
        let guard = MutationGuard::default();
        let _order = guard.begin("order:o-1").expect("order");
        let _product = guard.begin("product:p-1").expect("product");
        let _settings = guard.begin("settings").expect("settings");
    }
}
