//! Stub used on targets without OS advisory file locks, e.g. wasm.
//!
//! The surface matches the OS-backed implementation, but `try_lock` always
//! reports success and nothing is enforced: two processes pointed at the same
//! directory will not see each other. Callers on these targets must not
//! assume lock protection.

use std::path::{Path, PathBuf};

/// No-op stand-in for the exclusive advisory lock.
///
/// Tracks the handle state machine but never consults any OS lock.
pub struct Flock {
    path: PathBuf,
    state: State,
}

enum State {
    Unacquired,
    Held,
    Released,
}

impl Flock {
    /// Creates a handle for the lock file at `path` without touching it.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Flock {
            path: path.as_ref().to_path_buf(),
            state: State::Unacquired,
        }
    }

    /// Always reports the lock as acquired. No exclusion is enforced.
    pub fn try_lock(&mut self) -> anyhow::Result<bool> {
        match self.state {
            State::Released => anyhow::bail!(
                "lock handle for {} was already released",
                self.path.display()
            ),
            State::Unacquired | State::Held => {
                self.state = State::Held;
                Ok(true)
            }
        }
    }

    /// Releases nothing; only advances the handle state.
    pub fn unlock(&mut self) -> anyhow::Result<()> {
        if let State::Held = self.state {
            self.state = State::Released;
        }
        Ok(())
    }

    /// Returns true while this handle is nominally held.
    pub fn is_held(&self) -> bool {
        matches!(self.state, State::Held)
    }
}
