use crate::config::CopybaraConfig;
use crate::copybara::host::HostPaths;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The process cwd is global; serialize changes even if a #[serial] is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Minimal valid config: `a/b` mirrored to `c/d`, committer `x`.
pub(crate) fn sample_config() -> CopybaraConfig {
    let mut config = CopybaraConfig::default();
    config.sot.repo = "a/b".to_string();
    config.destination.repo = "c/d".to_string();
    config.committer = "x".to_string();
    config.push.include = vec!["**".to_string()];
    config.pr.include = vec!["**".to_string()];
    config
}

/// Config whose host files all live under `home`.
pub(crate) fn sample_config_in(home: &Path) -> CopybaraConfig {
    let mut config = sample_config();
    config.host = HostPaths::from_home(home);
    config
}
