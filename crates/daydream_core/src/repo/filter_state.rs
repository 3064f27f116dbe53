//! Active view filter owner.

use crate::model::filter::TaskFilter;
use crate::storage::{KvBackend, StoreAdapter};
use log::{info, warn};

/// Process-wide filter selection; always a valid member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    current: TaskFilter,
}

impl FilterState {
    /// Restores the stored filter, coercing anything unrecognized to `all`.
    pub fn load<B: KvBackend>(store: &StoreAdapter<B>) -> Self {
        let stored = store.load_filter_token();
        let current = TaskFilter::coerce(stored.as_deref());
        if let Some(raw) = stored.as_deref().filter(|raw| TaskFilter::parse(raw).is_none()) {
            warn!(
                "event=filter_load module=repo status=repaired error_code=unknown_filter raw_len={}",
                raw.len()
            );
        }
        Self { current }
    }

    pub fn current(&self) -> TaskFilter {
        self.current
    }

    /// Applies a raw token (invalid tokens select `all`) and persists it.
    pub fn set<B: KvBackend>(&mut self, store: &mut StoreAdapter<B>, value: &str) -> TaskFilter {
        self.select(store, TaskFilter::coerce(Some(value)))
    }

    /// Applies an already-typed filter and persists it.
    pub fn select<B: KvBackend>(
        &mut self,
        store: &mut StoreAdapter<B>,
        filter: TaskFilter,
    ) -> TaskFilter {
        self.current = filter;
        store.save_filter(filter);
        info!("event=filter_set module=repo status=ok filter={filter}");
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::FilterState;
    use crate::model::filter::TaskFilter;
    use crate::storage::{MemoryKvStore, StoreAdapter};

    #[test]
    fn set_coerces_unknown_tokens() {
        let mut store = StoreAdapter::open(MemoryKvStore::new());
        let mut state = FilterState::default();

        assert_eq!(state.set(&mut store, "active"), TaskFilter::Active);
        assert_eq!(state.set(&mut store, "bogus"), TaskFilter::All);
        assert_eq!(store.load_filter_token().as_deref(), Some("all"));
    }

    #[test]
    fn load_restores_valid_and_repairs_invalid_tokens() {
        let mut store = StoreAdapter::open(MemoryKvStore::new());
        assert_eq!(FilterState::load(&store).current(), TaskFilter::All);

        let key = store.keys().filter.clone();
        store.try_write(&key, b"completed");
        assert_eq!(FilterState::load(&store).current(), TaskFilter::Completed);

        store.try_write(&key, b"\"completed\"");
        assert_eq!(FilterState::load(&store).current(), TaskFilter::All);
    }
}
