use anyhow::{bail, Context, Result};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
    time::UNIX_EPOCH,
};

use crate::{config, fs_ops, logging, net, pkgmgr};

pub fn prompt_consent(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read stdin")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub fn ensure_node(
    manager: Option<pkgmgr::PackageManager>,
    workdir: &Path,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
    consent: &mut dyn FnMut(&str) -> Result<bool>,
) -> Result<()> {
    if pkgmgr::find_in_path("node").is_some() {
        return Ok(());
    }

    if !consent("Node.js is required but not installed. Install it now?")? {
        bail!("Node.js installation declined");
    }

    match manager {
        Some(pm) => {
            for package in ["nodejs", "npm"] {
                let mut cmd = pm.install_command(package);
                let status = exec(&mut cmd)?;
                if !status.success() {
                    bail!(
                        "{} install of {package} failed (exit {:?})",
                        pm.executable(),
                        status.code()
                    );
                }
            }
        }
        None => install_node_via_nvm(workdir, exec)?,
    }

    if pkgmgr::find_in_path("node").is_none() {
        bail!("node not found on PATH after installation");
    }
    Ok(())
}

pub fn ensure_nativefier(
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
    consent: &mut dyn FnMut(&str) -> Result<bool>,
) -> Result<()> {
    if pkgmgr::find_in_path("nativefier").is_some() {
        return Ok(());
    }

    if !consent("nativefier is required but not installed. Install it now?")? {
        bail!("nativefier installation declined");
    }

    let mut cmd = Command::new("npm");
    cmd.args(["install", "-g", "nativefier"]);
    let status = exec(&mut cmd)?;
    if !status.success() {
        bail!("npm install -g nativefier failed (exit {:?})", status.code());
    }

    if pkgmgr::find_in_path("nativefier").is_none() {
        bail!("nativefier not found on PATH after installation");
    }
    Ok(())
}

fn install_node_via_nvm(
    workdir: &Path,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<()> {
    logging::warn("no usable package manager, bootstrapping Node.js via nvm");

    let script = workdir.join("install-nvm.sh");
    net::download_file(config::NVM_INSTALL_URL, &script)
        .context("download nvm bootstrap script")?;

    let mut bootstrap = Command::new("bash");
    bootstrap.arg(&script);
    let status = exec(&mut bootstrap)?;
    if !status.success() {
        bail!("nvm bootstrap failed (exit {:?})", status.code());
    }

    let nvm_dir = nvm_dir();
    let mut install = Command::new("bash");
    install.arg("-c").arg(format!(
        "export NVM_DIR=\"{0}\"; . \"{0}/nvm.sh\"; nvm install --lts",
        nvm_dir.display()
    ));
    let status = exec(&mut install)?;
    if !status.success() {
        bail!("nvm install --lts failed (exit {:?})", status.code());
    }

    link_node_binaries(&nvm_dir, Path::new("/usr/local/bin"))
}

fn nvm_dir() -> PathBuf {
    std::env::var_os("NVM_DIR")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".nvm")))
        .unwrap_or_else(|| PathBuf::from("/root/.nvm"))
}

pub fn link_node_binaries(nvm_dir: &Path, bin_dir: &Path) -> Result<()> {
    let versions = nvm_dir.join("versions").join("node");
    let release = newest_entry(&versions)?;
    let node_bin = release.join("bin");

    fs::create_dir_all(bin_dir).with_context(|| format!("create {}", bin_dir.display()))?;
    for tool in ["node", "npm", "npx"] {
        let target = node_bin.join(tool);
        let link = bin_dir.join(tool);
        fs_ops::remove_file_if_exists(&link)?;
        std::os::unix::fs::symlink(&target, &link)
            .with_context(|| format!("symlink {} -> {}", link.display(), target.display()))?;
    }
    Ok(())
}

fn newest_entry(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir).with_context(|| format!("read_dir {}", dir.display()))?;

    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let modified = entry.metadata()?.modified().unwrap_or(UNIX_EPOCH);
        if newest.as_ref().map(|(seen, _)| modified >= *seen).unwrap_or(true) {
            newest = Some((modified, entry.path()));
        }
    }

    newest
        .map(|(_, path)| path)
        .with_context(|| format!("no Node.js release found under {}", dir.display()))
}
