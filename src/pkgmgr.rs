use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
}

impl PackageManager {
    pub const PROBE_ORDER: [PackageManager; 5] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Yum,
        PackageManager::Pacman,
        PackageManager::Zypper,
    ];

    pub fn executable(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
        }
    }

    pub fn install_command(self, package: &str) -> Command {
        let mut cmd = Command::new(self.executable());
        match self {
            PackageManager::Apt | PackageManager::Dnf | PackageManager::Yum => {
                cmd.args(["install", "-y", package]);
            }
            PackageManager::Pacman => {
                cmd.args(["-S", "--noconfirm", "--needed", package]);
            }
            PackageManager::Zypper => {
                cmd.args(["--non-interactive", "install", package]);
            }
        }
        cmd
    }
}

pub fn detect() -> Option<PackageManager> {
    detect_with(|name| find_in_path(name).is_some())
}

pub fn detect_with(mut available: impl FnMut(&str) -> bool) -> Option<PackageManager> {
    PackageManager::PROBE_ORDER
        .into_iter()
        .find(|pm| available(pm.executable()))
}

pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
