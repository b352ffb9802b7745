//! Filesystem utilities for bara-sync.
//!
//! The rendered copy.bara.sky is bind-mounted into the container, so it is
//! written atomically: the container never sees a half-written document.

pub mod atomic;

pub use atomic::{atomic_write_file, install_file};
