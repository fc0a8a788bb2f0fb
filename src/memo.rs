use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::model::ArticlesIndex;

/// Upper bound on memoized views per snapshot; free-text keys are unbounded otherwise.
const MAX_VIEWS: usize = 256;

struct MemoState<K, V> {
    snapshot: Weak<ArticlesIndex>,
    views: HashMap<K, V>,
}

/// Derived views memoized by argument tuple and tied to one index snapshot.
///
/// Handing in a different snapshot drops every view computed from the previous one.
pub(crate) struct Memo<K, V> {
    state: Mutex<MemoState<K, V>>,
}

impl<K: Eq + Hash, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoState {
                snapshot: Weak::new(),
                views: HashMap::new(),
            }),
        }
    }

    pub fn get_or_compute(
        &self,
        snapshot: &Arc<ArticlesIndex>,
        key: K,
        compute: impl FnOnce(&ArticlesIndex) -> V,
    ) -> V {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if !Weak::ptr_eq(&state.snapshot, &Arc::downgrade(snapshot)) {
            state.snapshot = Arc::downgrade(snapshot);
            state.views.clear();
        }
        if let Some(view) = state.views.get(&key) {
            return view.clone();
        }

        if state.views.len() >= MAX_VIEWS {
            state.views.clear();
        }
        let view = compute(snapshot.as_ref());
        state.views.insert(key, view.clone());
        view
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .views
            .len()
    }
}
