use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub install_dir: PathBuf,
    pub app_dir: PathBuf,
    pub force: bool,
    pub uninstall: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from(config::DEFAULT_INSTALL_DIR),
            app_dir: PathBuf::from(config::DEFAULT_APP_DIR),
            force: false,
            uninstall: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Config),
    Help,
    Readme,
}

pub const USAGE: &str = "\
Usage: webex-installer [OPTIONS]

Packages the Webex web client as a desktop application and registers it
with the desktop environment.

Options:
  --install-dir PATH  override the install directory (default: /opt/webex)
  --app-dir PATH      override the application directory (default: /opt/webex/app)
  --force             rebuild even if the application directory exists
  --uninstall         remove an existing installation
  -h, --help          print this help and exit
  --readme            print extended documentation and exit";

pub const README: &str = "\
webex-installer builds a native desktop wrapper around https://web.webex.com/
using nativefier and integrates it with the desktop environment.

What an install does:
  1. Verifies root privilege.
  2. Detects a package manager (apt-get, dnf, yum, pacman, zypper) and
     installs Node.js and nativefier if they are missing, asking first.
     Without a package manager, Node.js is bootstrapped through nvm and its
     binaries are linked into /usr/local/bin.
  3. Fetches the Webex icon (with a fallback URL and a generated placeholder
     as last resort) and installs it at six hicolor resolutions.
  4. Runs nativefier once with a fixed set of flags and links the build
     output from <install-dir>/current.
  5. Writes a launcher script, a .desktop entry, and a shared-MIME-info
     descriptor, then registers the webex: and wbx: URI schemes so meeting
     links open in the app.

Running the installer again is a no-op while the application directory
exists; pass --force to rebuild. --uninstall removes everything the install
created, tolerating artifacts that are already gone.

Meeting URLs passed to the launcher script are forwarded verbatim to the
packaged application.";

pub fn parse(args: &[String]) -> Result<Invocation> {
    let mut cfg = Config::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--install-dir" => {
                let Some(value) = iter.next() else {
                    bail!("--install-dir requires a value");
                };
                cfg.install_dir = PathBuf::from(value);
            }
            "--app-dir" => {
                let Some(value) = iter.next() else {
                    bail!("--app-dir requires a value");
                };
                cfg.app_dir = PathBuf::from(value);
            }
            "--force" => cfg.force = true,
            "--uninstall" => cfg.uninstall = true,
            "-h" | "--help" => return Ok(Invocation::Help),
            "--readme" => return Ok(Invocation::Readme),
            other => bail!("unknown option: {other}"),
        }
    }
    Ok(Invocation::Run(cfg))
}
