use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use crate::{config, fs_ops, logging, paths::Paths};

pub fn build(
    paths: &Paths,
    icon: &Path,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<PathBuf> {
    fs::create_dir_all(&paths.app_dir)
        .with_context(|| format!("create {}", paths.app_dir.display()))?;

    let mut cmd = packager_command(&paths.app_dir, icon);
    let status = exec(&mut cmd)?;
    if !status.success() {
        bail!("nativefier failed (exit {:?})", status.code());
    }

    let output = locate_output(&paths.app_dir)?;
    normalize_permissions(&output);
    link_current(paths, &output)?;
    Ok(output)
}

pub fn packager_command(app_dir: &Path, icon: &Path) -> Command {
    let mut cmd = Command::new("nativefier");
    cmd.arg("--name")
        .arg(config::APP_NAME)
        .arg("--icon")
        .arg(icon)
        .arg("--user-agent")
        .arg(config::USER_AGENT)
        .arg("--enable-features")
        .arg("WebRTCPipeWireCapturer")
        .arg("--enable-es3-apis")
        .arg("--single-instance")
        .arg("--tray")
        .arg("false")
        .arg("--disable-dev-tools")
        .arg("--background-color")
        .arg(config::BACKGROUND_COLOR)
        .arg("--internal-urls")
        .arg(config::INTERNAL_URLS)
        .arg("--browser-window-options")
        .arg(config::BROWSER_WINDOW_OPTIONS)
        .arg(config::APP_URL)
        .arg(app_dir);
    cmd
}

pub fn locate_output(app_dir: &Path) -> Result<PathBuf> {
    for suffix in ["linux-arm64", "linux-x64"] {
        let candidate = app_dir.join(format!("{}-{suffix}", config::APP_NAME));
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }
    bail!("packager output not found under {}", app_dir.display())
}

// The packaged binary must be executable; chrome-sandbox needs the setuid
// bit to sandbox renderers when running under a non-root user.
fn normalize_permissions(output: &Path) {
    let binary = output.join(config::APP_NAME);
    if binary.exists() {
        if let Err(err) = fs_ops::set_mode(&binary, 0o755) {
            logging::warn(&format!("chmod of packaged binary failed: {err:#}"));
        }
    }
    let sandbox = output.join("chrome-sandbox");
    if sandbox.exists() {
        if let Err(err) = fs_ops::set_mode(&sandbox, 0o4755) {
            logging::warn(&format!("chmod of chrome-sandbox failed: {err:#}"));
        }
    }
}

pub fn link_current(paths: &Paths, target: &Path) -> Result<()> {
    let link = paths.current_link();
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs_ops::remove_file_if_exists(&link)?;
    std::os::unix::fs::symlink(target, &link)
        .with_context(|| format!("symlink {} -> {}", link.display(), target.display()))?;
    Ok(())
}
