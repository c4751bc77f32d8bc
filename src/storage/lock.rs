//! Cross-process write lock for a storage root
//!
//! Every process opening the same root serializes its mutations on an
//! advisory exclusive lock over `<root>/.lock`. Each acquisition opens its own
//! file handle, so separate `FileStorage` handles inside one process exclude
//! each other as well.

use crate::error::{HelpdeskError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

/// Lock file name under the storage root
pub const LOCK_FILE: &str = ".lock";

/// How long a writer waits for the lock before giving up
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(10);

const RETRY_INTERVAL: Duration = Duration::from_millis(5);

/// RAII guard for the exclusive store lock; released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    /// Acquire the exclusive lock on `path`, waiting up to `timeout`
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self> {
        let start = Instant::now();
        loop {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(path)?;

            if file.try_lock_exclusive().is_ok() {
                return Ok(Self { file });
            }

            if start.elapsed() >= timeout {
                return Err(HelpdeskError::LockTimeout {
                    path: path.to_path_buf(),
                    waited: start.elapsed(),
                });
            }

            thread::sleep(RETRY_INTERVAL);
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
