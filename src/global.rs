//! Optional process-wide default console
//!
//! Tools that do not want to pass a [`Console`] around can install one here.
//! The engine itself never looks at it.

use std::sync::Arc;

use parking_lot::{const_rwlock, RwLock};

use crate::core::console::Console;

static GLOBAL: RwLock<Option<Arc<Console>>> = const_rwlock(None);

/// The installed default console, if any
pub fn global() -> Option<Arc<Console>> {
    GLOBAL.read().clone()
}

/// Install (or with `None`, remove) the default console
pub fn set_global(console: Option<Arc<Console>>) -> Option<Arc<Console>> {
    std::mem::replace(&mut *GLOBAL.write(), console)
}
