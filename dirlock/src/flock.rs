//! Cross-platform advisory lock, backed by the OS file lock.

use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use fs2::FileExt as _;

/// An exclusive advisory lock on a single filesystem path.
///
/// The handle starts out detached: [`Flock::new`] only records the path, and
/// the lock state is first consulted by [`Flock::try_lock`]. Once released, a
/// handle is spent; locking the same path again requires a new handle.
///
/// `try_lock` and `unlock` take `&mut self`, so a handle shared between
/// threads requires external synchronization. The handle itself is `Send` and
/// `Sync`.
pub struct Flock {
    path: PathBuf,
    state: State,
}

enum State {
    Unacquired,
    Held(File),
    Released,
}

impl Flock {
    /// Creates a handle for the lock file at `path` without touching it.
    ///
    /// Nothing is opened or created until [`Flock::try_lock`] is called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Flock {
            path: path.as_ref().to_path_buf(),
            state: State::Unacquired,
        }
    }

    /// Attempts to take exclusive ownership of the lock file without blocking.
    ///
    /// Returns `Ok(true)` when the lock was acquired and `Ok(false)` when
    /// another process (or another handle in this process) holds it.
    /// Contention is a normal outcome, not an error; an `Err` means the
    /// attempt itself could not be made, e.g. the lock file could not be
    /// created.
    ///
    /// While the handle already holds the lock this reports `Ok(true)` without
    /// consulting the OS again.
    pub fn try_lock(&mut self) -> anyhow::Result<bool> {
        match self.state {
            State::Held(_) => return Ok(true),
            State::Released => anyhow::bail!(
                "lock handle for {} was already released",
                self.path.display()
            ),
            State::Unacquired => (),
        }

        let lock_fd = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("failed to open lock file {}", self.path.display()))?;

        match lock_fd.try_lock_exclusive() {
            Ok(()) => {
                self.state = State::Held(lock_fd);
                Ok(true)
            }
            Err(e) if is_contended(&e) => {
                // Dropping the just-opened descriptor leaves the holder's lock
                // intact.
                Ok(false)
            }
            Err(e) => {
                Err(e).with_context(|| format!("failed to lock file {}", self.path.display()))
            }
        }
    }

    /// Releases the lock and closes the underlying descriptor.
    ///
    /// Safe to call unconditionally: releasing a handle that holds nothing is
    /// a no-op. A release failure is reported, but the handle counts as
    /// released and the descriptor is closed either way.
    pub fn unlock(&mut self) -> anyhow::Result<()> {
        match std::mem::replace(&mut self.state, State::Released) {
            State::Held(lock_fd) => lock_fd
                .unlock()
                .with_context(|| format!("failed to unlock file {}", self.path.display())),
            State::Released => Ok(()),
            State::Unacquired => {
                // Never acquired, so there is nothing to release; the handle
                // stays usable.
                self.state = State::Unacquired;
                Ok(())
            }
        }
    }

    /// Returns true while this handle owns the lock.
    pub fn is_held(&self) -> bool {
        matches!(self.state, State::Held(_))
    }
}

impl Drop for Flock {
    fn drop(&mut self) {
        if let State::Held(lock_fd) = std::mem::replace(&mut self.state, State::Released) {
            if let Err(e) = lock_fd.unlock() {
                log::warn!("failed to unlock file {}: {e}", self.path.display());
            }
        }
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
