// SPDX-License-Identifier: GPL-3.0-only
//! Display manager
//!
//! Maps display IDs to open connections. Attaching a display creates its
//! session (counter and lock); detaching drops the manager's reference, and
//! the session goes away with the last in-flight caller.
//!
//! # Thread Safety
//!
//! Uses `RwLock<HashMap>` for the map itself. Lookups take a read lock and
//! hand out an `Arc`, so exchanges never run while the map is locked.
//! Serializing exchanges on one display is the session's job.
//!
//! # Usage
//!
//! ```no_run
//! # fn example(transport: eizo_hid_control::protocols::hidraw::HidapiTransport) -> eizo_hid_control::Result<()> {
//! use eizo_hid_control::monitor::DisplayManager;
//!
//! let manager = DisplayManager::new();
//! let id = manager.attach(transport, "21345678".into(), "EV2760".into())?;
//! let brightness = manager.read(&id, "brightness")?;
//! # Ok::<(), eizo_hid_control::EizoError>(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{EizoError, Result};
use crate::protocols::Transport;
use crate::protocols::eizo_hid::EizoHidDisplay;

pub type DisplayId = String;

/// Owner of every open display connection
pub struct DisplayManager<T> {
    displays: RwLock<HashMap<DisplayId, Arc<EizoHidDisplay<T>>>>,
}

impl<T: Transport> DisplayManager<T> {
    pub fn new() -> Self {
        Self {
            displays: RwLock::new(HashMap::new()),
        }
    }

    /// Start a connection for a newly opened device
    ///
    /// A display already attached under the same ID is replaced; its old
    /// session is dropped once callers holding it are done.
    pub fn attach(&self, transport: T, serial: String, product: String) -> Result<DisplayId> {
        let display = Arc::new(EizoHidDisplay::new(transport, serial, product));
        let id = display.id();

        let mut displays = self.displays.write().map_err(|e| {
            error!("Display {} not attached: {}", id, e);
            EizoError::ResourceUnavailable(format!("display map poisoned: {e}"))
        })?;
        if displays.insert(id.clone(), display).is_some() {
            warn!("Display {} re-attached, previous session dropped", id);
        } else {
            info!("Display {} attached", id);
        }

        Ok(id)
    }

    /// Tear down a connection
    ///
    /// Returns `false` if no display was attached under `id`.
    pub fn detach(&self, id: &str) -> bool {
        let removed = match self.displays.write() {
            Ok(mut displays) => displays.remove(id).is_some(),
            Err(e) => {
                error!("Display {} not detached: {}", id, e);
                false
            }
        };
        if removed {
            info!("Display {} detached", id);
        }
        removed
    }

    /// Get a display by ID
    pub fn get(&self, id: &str) -> Result<Arc<EizoHidDisplay<T>>> {
        let displays = self
            .displays
            .read()
            .map_err(|e| EizoError::ResourceUnavailable(format!("display map poisoned: {e}")))?;
        displays
            .get(id)
            .cloned()
            .ok_or_else(|| EizoError::ResourceUnavailable(format!("display {id} is not attached")))
    }

    /// Get all display IDs currently managed
    pub fn get_all_ids(&self) -> Vec<DisplayId> {
        self.displays
            .read()
            .map(|displays| displays.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.displays.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn read(&self, id: &str, attribute: &str) -> Result<i32> {
        self.get(id)?.read(attribute)
    }

    pub fn write(&self, id: &str, attribute: &str, value: i32) -> Result<()> {
        self.get(id)?.write(attribute, value)
    }
}

impl<T: Transport> Default for DisplayManager<T> {
    fn default() -> Self {
        Self::new()
    }
}
