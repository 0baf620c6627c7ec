use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use crate::{config, fs_ops, logging, paths::Paths};

// The PULSE_SERVER uid lookup stays in the script so the launcher works for
// whichever user runs it, not the root user that installed it.
const LAUNCHER_TEMPLATE: &str = r#"#!/usr/bin/env bash
export ELECTRON_ENABLE_LOGGING=1
export ELECTRON_ENABLE_STACK_DUMPING=1
export ELECTRON_DISABLE_SECURITY_WARNINGS=true
export LD_LIBRARY_PATH="@APP_ROOT@${LD_LIBRARY_PATH:+:$LD_LIBRARY_PATH}"
export PULSE_SERVER="unix:/run/user/$(id -u)/pulse/native"
exec "@APP_BINARY@" "$@"
"#;

const DESKTOP_TEMPLATE: &str = r#"[Desktop Entry]
Version=1.0
Type=Application
Name=Webex
Comment=Cisco Webex meetings and messaging
Exec=@LAUNCHER@ %u
Icon=webex
Terminal=false
StartupNotify=true
StartupWMClass=Webex
Categories=Network;
MimeType=x-scheme-handler/webex;x-scheme-handler/wbx;
"#;

const MIME_INFO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mime-info xmlns="http://www.freedesktop.org/standards/shared-mime-info">
  <mime-type type="x-scheme-handler/webex">
    <comment>Webex meeting link</comment>
    <glob pattern="webex:*"/>
  </mime-type>
  <mime-type type="x-scheme-handler/wbx">
    <comment>Webex cross-launch link</comment>
    <glob pattern="wbx:*"/>
  </mime-type>
</mime-info>
"#;

const ADDED_ASSOCIATIONS_HEADER: &str = "[Added Associations]";

pub fn render_launcher(paths: &Paths) -> String {
    LAUNCHER_TEMPLATE
        .replace("@APP_ROOT@", &paths.current_link().display().to_string())
        .replace("@APP_BINARY@", &paths.app_binary().display().to_string())
}

pub fn render_desktop_entry(paths: &Paths) -> String {
    DESKTOP_TEMPLATE.replace("@LAUNCHER@", &paths.launcher().display().to_string())
}

pub fn render_mime_info() -> String {
    MIME_INFO.to_string()
}

pub fn write_all(paths: &Paths) -> Result<()> {
    fs_ops::write_executable(&paths.launcher(), &render_launcher(paths))?;
    fs_ops::write_data(&paths.desktop_file(), &render_desktop_entry(paths))?;
    fs_ops::write_data(&paths.mime_xml(), &render_mime_info())?;
    Ok(())
}

pub fn register(
    paths: &Paths,
    user_list: Option<&Path>,
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<()> {
    // Cache refreshes and handler defaults are best-effort; the desktop
    // still picks the entry up on the next login without them.
    let mut refresh = Command::new("update-mime-database");
    refresh.arg(&paths.mime_dir);
    let _ = exec(&mut refresh);

    append_associations(&paths.mimeapps_list())?;
    if let Some(user_list) = user_list {
        if let Err(err) = append_associations(user_list) {
            logging::warn(&format!("user mimeapps update failed: {err:#}"));
        }
    }

    for scheme in config::SCHEMES {
        let mut default = Command::new("xdg-mime");
        default
            .arg("default")
            .arg(config::DESKTOP_FILE)
            .arg(format!("x-scheme-handler/{scheme}"));
        let _ = exec(&mut default);
    }

    let mut desktop_db = Command::new("update-desktop-database");
    desktop_db.arg(&paths.applications_dir);
    let _ = exec(&mut desktop_db);

    let mut icon_cache = Command::new("gtk-update-icon-cache");
    icon_cache.args(["-f", "-t"]).arg(&paths.icon_root);
    let _ = exec(&mut icon_cache);

    Ok(())
}

pub fn association_lines() -> Vec<String> {
    config::SCHEMES
        .iter()
        .map(|scheme| format!("x-scheme-handler/{scheme}={};", config::DESKTOP_FILE))
        .collect()
}

pub fn append_associations(list: &Path) -> Result<()> {
    let mut contents = match fs::read_to_string(list) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("read {}", list.display()));
        }
    };

    for line in association_lines() {
        // Substring match: an existing key means some install already
        // registered the handler, whatever its trailing form.
        let key = line.trim_end_matches(';');
        if contents.contains(key) {
            continue;
        }
        if !contents.contains(ADDED_ASSOCIATIONS_HEADER) {
            if !contents.is_empty() && !contents.ends_with('\n') {
                contents.push('\n');
            }
            contents.push_str(ADDED_ASSOCIATIONS_HEADER);
            contents.push('\n');
        }
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        contents.push_str(&line);
        contents.push('\n');
    }

    if let Some(parent) = list.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(list, contents).with_context(|| format!("write {}", list.display()))
}

pub fn user_mimeapps_list() -> Option<PathBuf> {
    if let Ok(user) = std::env::var("SUDO_USER") {
        let home = Path::new("/home").join(user);
        if home.is_dir() {
            return Some(home.join(".config").join("mimeapps.list"));
        }
    }
    dirs::config_dir().map(|dir| dir.join("mimeapps.list"))
}
