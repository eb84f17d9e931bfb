/// Hook registry: typed side-effect callbacks fired on scene/dialog entry.
///
/// Story data references hooks by opaque token; the host registers a
/// callback under each token it uses. Firing happens through one narrow
/// invocation site that isolates failures, so a broken hook can never
/// derail navigation.
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::schema::story::HookId;

/// What a hook reports back. An `Err` is logged and absorbed.
pub type HookResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A host-supplied side effect. `FnMut` so hooks may carry state
/// (counters, channels, audio handles).
pub type HookFn = Box<dyn FnMut() -> HookResult>;

#[derive(Default)]
pub struct HookRegistry {
    hooks: FxHashMap<HookId, HookFn>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            hooks: FxHashMap::default(),
        }
    }

    pub fn register(&mut self, id: HookId, hook: HookFn) {
        self.hooks.insert(id, hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Fire the hook registered under `id`, if any. An unregistered token
    /// and a failing hook are both reported and absorbed; neither is fatal
    /// to playback.
    pub fn fire(&mut self, id: &HookId) {
        match self.hooks.get_mut(id) {
            Some(hook) => {
                if let Err(e) = hook() {
                    warn!(hook = %id, error = %e, "hook failed");
                }
            }
            None => {
                warn!(hook = %id, "no hook registered for token");
            }
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("registered", &self.hooks.len())
            .finish()
    }
}
