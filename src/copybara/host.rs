//! Host files mounted into the Copybara container.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Working directory of the container; the host cwd is mounted here.
pub const CONTAINER_WORKDIR: &str = "/usr/src/app";
pub const CONTAINER_SSH_KEY: &str = "/root/.ssh/id_rsa";
pub const CONTAINER_KNOWN_HOSTS: &str = "/root/.ssh/known_hosts";
pub const CONTAINER_CONFIG: &str = "/root/copy.bara.sky";
pub const CONTAINER_GIT_CONFIG: &str = "/root/.gitconfig";
pub const CONTAINER_GIT_CREDENTIALS: &str = "/root/.git-credentials";

/// Host-side paths of the files bind-mounted into the container.
///
/// bara-sync only reads these; creating them is up to the caller, with the
/// exception of `config`, which `run` writes before starting the container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostPaths {
    /// SSH private key. Mounted only when it exists.
    pub ssh_key: PathBuf,
    pub known_hosts: PathBuf,
    /// Rendered (or custom) copy.bara.sky.
    pub config: PathBuf,
    pub git_config: PathBuf,
    pub git_credentials: PathBuf,
}

impl HostPaths {
    /// Conventional locations under `home`.
    pub fn from_home(home: &Path) -> Self {
        let ssh = home.join(".ssh");
        Self {
            ssh_key: ssh.join("id_rsa"),
            known_hosts: ssh.join("known_hosts"),
            config: home.join("copy.bara.sky"),
            git_config: home.join(".gitconfig"),
            git_credentials: home.join(".git-credentials"),
        }
    }
}

impl Default for HostPaths {
    fn default() -> Self {
        let home = home::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::from_home(&home)
    }
}
