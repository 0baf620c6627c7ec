use anyhow::{Context, Result};
use std::{
    fs,
    path::Path,
    process::{Command, ExitStatus},
};

use crate::{artifacts, cli::Config, config, fs_ops, logging, paths::Paths};

pub fn run_default(cfg: &Config) -> Result<()> {
    let paths = Paths::new(cfg);
    let user_list = artifacts::user_mimeapps_list();
    run(&paths, user_list.as_deref(), &mut |cmd: &mut Command| {
        cmd.status().context("spawn command")
    })
}

pub fn run(
    paths: &Paths,
    user_list: Option<&Path>,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<()> {
    fs_ops::remove_dir_if_exists(&paths.app_dir)?;
    fs_ops::remove_dir_if_exists(&paths.install_dir)?;
    fs_ops::remove_file_if_exists(&paths.desktop_file())?;
    for size in config::ICON_SIZES {
        fs_ops::remove_file_if_exists(&paths.icon_file(size))?;
    }
    fs_ops::remove_file_if_exists(&paths.mime_xml())?;

    let mut refresh = Command::new("update-mime-database");
    refresh.arg(&paths.mime_dir);
    let _ = exec(&mut refresh);

    strip_associations(&paths.mimeapps_list())?;
    if let Some(user_list) = user_list {
        if let Err(err) = strip_associations(user_list) {
            logging::warn(&format!("user mimeapps cleanup failed: {err:#}"));
        }
    }

    let mut desktop_db = Command::new("update-desktop-database");
    desktop_db.arg(&paths.applications_dir);
    let _ = exec(&mut desktop_db);

    let mut icon_cache = Command::new("gtk-update-icon-cache");
    icon_cache.args(["-f", "-t"]).arg(&paths.icon_root);
    let _ = exec(&mut icon_cache);

    logging::info("Webex has been uninstalled");
    Ok(())
}

pub fn strip_associations(list: &Path) -> Result<()> {
    if !list.exists() {
        return Ok(());
    }

    let contents =
        fs::read_to_string(list).with_context(|| format!("read {}", list.display()))?;
    let kept: Vec<&str> = contents
        .lines()
        .filter(|line| !line.contains(config::DESKTOP_FILE))
        .collect();
    let collapsed = collapse_empty_added_associations(&kept);

    let mut out = collapsed.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    fs::write(list, out).with_context(|| format!("write {}", list.display()))
}

// Drops an "[Added Associations]" header left with no keys before the next
// section. Assumes line removal emptied the section; unrelated associations
// that were never touched keep it alive.
fn collapse_empty_added_associations<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.trim() == "[Added Associations]" {
            let mut j = i + 1;
            let mut has_keys = false;
            while j < lines.len() && !lines[j].trim_start().starts_with('[') {
                if !lines[j].trim().is_empty() {
                    has_keys = true;
                }
                j += 1;
            }
            if !has_keys {
                i = j;
                continue;
            }
        }
        out.push(line);
        i += 1;
    }
    out
}
