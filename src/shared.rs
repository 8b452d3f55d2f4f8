//! Thread-safe handle around an [`Engine`].
//!
//! All writes go through one write lock per engine; reads share the read
//! lock, so a `get` never observes a half-applied write between alias
//! resolution and the layer scan.

use std::sync::{Arc, OnceLock};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::coerce::Coerce;
use crate::engine::Engine;
use crate::error::Result;
use crate::value::Value;

#[derive(Clone, Default)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Hold the read lock for several reads against one snapshot.
    pub fn read(&self) -> RwLockReadGuard<'_, Engine> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Engine> {
        self.inner.write()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().get(key)
    }

    pub fn get_as<T: Coerce>(&self, key: &str) -> Result<T> {
        self.inner.read().get_as(key)
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.inner.read().is_set(key)
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.inner.write().set(key, value);
    }

    pub fn set_default(&self, key: &str, value: impl Into<Value>) {
        self.inner.write().set_default(key, value);
    }

    pub fn register_alias(&self, alias: &str, target: &str) -> bool {
        self.inner.write().register_alias(alias, target)
    }

    pub fn read_config(&self, content: &str) -> Result<()> {
        self.inner.write().read_config(content)
    }
}

impl From<Engine> for SharedEngine {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}

/// Process-wide engine, created on first use.
///
/// Nothing in the crate reads it; it is only for applications that want one
/// ambient configuration instead of passing a handle around.
pub fn global() -> &'static SharedEngine {
    static GLOBAL: OnceLock<SharedEngine> = OnceLock::new();
    GLOBAL.get_or_init(SharedEngine::default)
}
