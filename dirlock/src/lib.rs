//! An exclusive advisory lock on a database directory.
//!
//! An embedded storage engine must never have two processes mutating the same
//! data directory. At startup the engine takes an exclusive advisory lock on a
//! marker file inside the directory (conventionally `LOCK`); a second process
//! pointed at the same directory observes the lock as taken and aborts instead
//! of corrupting on-disk state.
//!
//! The lock is advisory: it excludes only processes that check it, and the OS
//! drops it when the holding process exits or the descriptor closes. The
//! acquisition attempt never blocks — a contended lock reports `false`
//! immediately so the engine can fail fast.
//!
//! The expected call sequence is one [`Flock::new`] per data directory, one
//! [`Flock::try_lock`] at startup (abort on `false` or on error), and one
//! [`Flock::unlock`] during clean shutdown.
//!
//! Targets without OS advisory file locks get a no-op stub with the same
//! surface; it reports success without enforcing anything.

cfg_if::cfg_if! {
    if #[cfg(any(unix, windows))] {
        mod flock;
        pub use flock::Flock;
    } else {
        mod unsupported;
        pub use unsupported::Flock;
    }
}
