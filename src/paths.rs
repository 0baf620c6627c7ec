use std::path::{Path, PathBuf};

use crate::{cli::Config, config};

#[derive(Debug, Clone)]
pub struct Paths {
    pub install_dir: PathBuf,
    pub app_dir: PathBuf,
    pub applications_dir: PathBuf,
    pub icon_root: PathBuf,
    pub mime_dir: PathBuf,
}

impl Paths {
    pub fn new(cfg: &Config) -> Self {
        Self::rooted(cfg, Path::new("/"))
    }

    // Test fixtures re-root the fixed system tree under a temp directory.
    pub fn rooted(cfg: &Config, prefix: &Path) -> Self {
        Self {
            install_dir: cfg.install_dir.clone(),
            app_dir: cfg.app_dir.clone(),
            applications_dir: prefix.join("usr/share/applications"),
            icon_root: prefix.join("usr/share/icons/hicolor"),
            mime_dir: prefix.join("usr/share/mime"),
        }
    }

    pub fn launcher(&self) -> PathBuf {
        self.install_dir.join(config::LAUNCHER_NAME)
    }

    pub fn current_link(&self) -> PathBuf {
        self.install_dir.join("current")
    }

    pub fn app_binary(&self) -> PathBuf {
        self.current_link().join(config::APP_NAME)
    }

    pub fn desktop_file(&self) -> PathBuf {
        self.applications_dir.join(config::DESKTOP_FILE)
    }

    pub fn icon_file(&self, size: u32) -> PathBuf {
        self.icon_root
            .join(format!("{size}x{size}"))
            .join("apps")
            .join(format!("{}.png", config::ICON_NAME))
    }

    pub fn mime_packages_dir(&self) -> PathBuf {
        self.mime_dir.join("packages")
    }

    pub fn mime_xml(&self) -> PathBuf {
        self.mime_packages_dir().join(config::MIME_PACKAGE)
    }

    pub fn mimeapps_list(&self) -> PathBuf {
        self.applications_dir.join("mimeapps.list")
    }
}
