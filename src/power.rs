//! Suspend suppression during flash operations
//!
//! A system suspend in the middle of a status-register write sequence can
//! leave the chip mid-transition. Platform power managers watch a
//! well-known lock directory: any PID-bearing lock file inside it requests
//! that the machine not suspend or shut down until the file is removed.
//!
//! Everything here is best-effort. On platforms without the lock directory
//! the feature is simply inapplicable, and a failure to remove the lock is
//! logged rather than propagated - neither condition may fail the flash
//! operation itself.

use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::string::ToString;

/// Default lock directory on Linux systems
const RUN_LOCK_DIR: &str = "/run/lock";

/// Subdirectory scanned for arbitrary lock files by current power managers
const OVERRIDE_DIR: &str = "power_override";

/// Lock file name inside the override directory
const LOCK_NAME: &str = "norwp.lock";

/// Legacy flat lock file, kept for older platform versions that only watch
/// this fixed path
const LEGACY_LOCK_NAME: &str = "norwp_powerd.lock";

/// Pick the lock file path under the given run-lock directory.
///
/// Prefers the override directory when it exists; falls back to the legacy
/// flat path so a new build keeps working against an old OS during a
/// system update.
fn lock_file_path(run_lock: &Path) -> PathBuf {
    let override_dir = run_lock.join(OVERRIDE_DIR);
    if override_dir.is_dir() {
        override_dir.join(LOCK_NAME)
    } else {
        run_lock.join(LEGACY_LOCK_NAME)
    }
}

/// RAII guard suppressing system suspend while it is held
///
/// Dropping the guard removes the lock file. Removal failures are logged
/// at `warn` and swallowed.
#[derive(Debug)]
pub struct SuspendLock {
    path: Option<PathBuf>,
}

impl SuspendLock {
    /// Request suspend suppression using the system lock directory
    pub fn acquire() -> Self {
        Self::acquire_in(Path::new(RUN_LOCK_DIR))
    }

    /// Request suspend suppression using a specific run-lock directory
    pub fn acquire_in(run_lock: &Path) -> Self {
        if !run_lock.is_dir() {
            // not a platform with a power manager lock directory
            debug!("{}: no lock directory, suspend suppression inapplicable", run_lock.display());
            return Self { path: None };
        }

        let path = lock_file_path(run_lock);
        debug!("disabling power management via {}", path.display());

        match fs::write(&path, process::id().to_string()) {
            Ok(()) => Self { path: Some(path) },
            Err(e) => {
                warn!("failed to write {}: {}", path.display(), e);
                Self { path: None }
            }
        }
    }

    /// Whether a lock file is actually held
    pub fn is_held(&self) -> bool {
        self.path.is_some()
    }
}

impl Drop for SuspendLock {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        debug!("re-enabling power management");
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("failed to unlink {}: {}", path.display(), e);
            }
        }
    }
}
