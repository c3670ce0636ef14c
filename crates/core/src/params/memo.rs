//! Change detection keyed by request identity.

use super::builder::RequestParams;

/// Remembers the last observed request key.
///
/// Consumers re-fetch only when [`ParamsMemo::observe`] reports a change, so
/// re-assembling identical params never triggers a duplicate request.
#[derive(Debug, Clone, Default)]
pub struct ParamsMemo {
    last_key: Option<String>,
}

impl ParamsMemo {
    /// Creates an empty memo. The first observation always counts as a change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `params` and returns true if its key differs from the previous one.
    pub fn observe(&mut self, params: &RequestParams) -> bool {
        self.observe_key(params.request_key())
    }

    /// Records a precomputed request key and returns true if it changed.
    pub fn observe_key(&mut self, key: String) -> bool {
        if self.last_key.as_deref() == Some(key.as_str()) {
            return false;
        }
        self.last_key = Some(key);
        true
    }

    /// Key of the last observed params.
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_deref()
    }
}
