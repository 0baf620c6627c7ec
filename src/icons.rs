use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use crate::{config, fs_ops, logging, net, paths::Paths};

pub fn acquire(
    workdir: &Path,
    convert: Option<&Path>,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<PathBuf> {
    acquire_from(
        &[config::ICON_URL, config::ICON_FALLBACK_URL],
        workdir,
        convert,
        exec,
    )
}

pub fn acquire_from(
    urls: &[&str],
    workdir: &Path,
    convert: Option<&Path>,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<PathBuf> {
    let source = workdir.join("icon.png");

    for url in urls {
        match net::download_file(url, &source) {
            Ok(()) => return Ok(source),
            Err(err) => logging::warn(&format!("icon fetch from {url} failed: {err:#}")),
        }
    }

    synthesize_placeholder(&source, convert, exec)?;
    Ok(source)
}

fn synthesize_placeholder(
    dest: &Path,
    convert: Option<&Path>,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<()> {
    if let Some(convert) = convert {
        let mut cmd = Command::new(convert);
        cmd.args(["-size", "256x256"])
            .arg(format!("xc:{}", config::BACKGROUND_COLOR))
            .arg(dest);
        match exec(&mut cmd) {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => logging::warn(&format!(
                "placeholder synthesis failed (exit {:?})",
                status.code()
            )),
            Err(err) => logging::warn(&format!("placeholder synthesis failed: {err:#}")),
        }
    }

    logging::warn("using embedded placeholder icon");
    fs::write(dest, config::PLACEHOLDER_ICON)
        .with_context(|| format!("write {}", dest.display()))
}

pub fn install_all(
    source: &Path,
    paths: &Paths,
    convert: Option<&Path>,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<()> {
    for size in config::ICON_SIZES {
        let dest = paths.icon_file(size);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }

        if let Some(convert) = convert {
            let mut cmd = Command::new(convert);
            cmd.arg(source)
                .args(["-resize", &format!("{size}x{size}")])
                .arg(&dest);
            match exec(&mut cmd) {
                Ok(status) if status.success() => {
                    fs_ops::set_mode(&dest, 0o644)?;
                    continue;
                }
                Ok(status) => logging::warn(&format!(
                    "resize to {size}px failed (exit {:?}), copying source instead",
                    status.code()
                )),
                Err(err) => logging::warn(&format!(
                    "resize to {size}px failed ({err:#}), copying source instead"
                )),
            }
        }

        fs::copy(source, &dest)
            .with_context(|| format!("copy {} -> {}", source.display(), dest.display()))?;
        fs_ops::set_mode(&dest, 0o644)?;
    }
    Ok(())
}
