use anyhow::{Context, Result};
use std::path::Path;
use tempfile::TempDir;

// One working directory per run, removed when the run ends however it ends:
// Drop covers normal completion and errors, the signal handler covers ^C.
pub struct Workdir {
    dir: TempDir,
}

impl Workdir {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("webex-installer-")
            .tempdir()
            .context("create temporary working directory")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn install_signal_cleanup(&self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        ctrlc::set_handler(move || {
            let _ = std::fs::remove_dir_all(&path);
            std::process::exit(130);
        })
        .context("install signal handler")
    }
}
