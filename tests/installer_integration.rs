#[path = "../src/config.rs"]
mod config;
#[path = "../src/logging.rs"]
mod logging;
#[path = "../src/fs_ops.rs"]
mod fs_ops;
#[path = "../src/cli.rs"]
mod cli;
#[path = "../src/paths.rs"]
mod paths;
#[path = "../src/net.rs"]
mod net;
#[path = "../src/pkgmgr.rs"]
mod pkgmgr;
#[path = "../src/deps.rs"]
mod deps;
#[path = "../src/icons.rs"]
mod icons;
#[path = "../src/packaging.rs"]
mod packaging;
#[path = "../src/artifacts.rs"]
mod artifacts;
#[path = "../src/uninstall.rs"]
mod uninstall;
#[path = "../src/workdir.rs"]
mod workdir;
#[path = "../src/installer.rs"]
mod installer;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use cli::Config;
use paths::Paths;

fn fixture(tmp: &Path) -> (Config, Paths) {
    let cfg = Config {
        install_dir: tmp.join("opt/webex"),
        app_dir: tmp.join("opt/webex/app"),
        force: false,
        uninstall: false,
    };
    let paths = Paths::rooted(&cfg, tmp);
    (cfg, paths)
}

fn ok_status() -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(0)
}

// Fake executor: pretends every tool succeeds and materializes the
// packager output directory the way nativefier would.
fn fake_install(cfg: &Config, paths: &Paths, icon: &Path, packager_runs: &mut usize) {
    let icon = icon.to_path_buf();
    let mut runs = 0usize;
    let mut exec = |cmd: &mut Command| {
        if cmd.get_program().to_string_lossy() == "nativefier" {
            runs += 1;
            fs::create_dir_all(paths.app_dir.join("Webex-linux-x64")).unwrap();
        }
        Ok(ok_status())
    };
    installer::run_with_deps(
        cfg,
        paths,
        None,
        |_exec: &mut _| Ok(()),
        |_exec: &mut _| Ok(icon.clone()),
        &mut exec,
    )
    .unwrap();
    *packager_runs += runs;
}

#[test]
fn fresh_install_lays_out_every_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, paths) = fixture(tmp.path());
    let icon = tmp.path().join("icon.png");
    fs::write(&icon, "png").unwrap();

    let mut packager_runs = 0;
    fake_install(&cfg, &paths, &icon, &mut packager_runs);

    assert_eq!(packager_runs, 1);
    assert_eq!(
        fs::read_link(paths.current_link()).unwrap(),
        paths.app_dir.join("Webex-linux-x64")
    );
    assert!(paths.launcher().exists());
    assert!(paths.desktop_file().exists());
    assert!(paths.mime_xml().exists());
    assert!(paths.mimeapps_list().exists());
}

#[test]
fn second_install_is_skipped_while_app_dir_exists() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, paths) = fixture(tmp.path());
    let icon = tmp.path().join("icon.png");
    fs::write(&icon, "png").unwrap();

    let mut packager_runs = 0;
    fake_install(&cfg, &paths, &icon, &mut packager_runs);
    fake_install(&cfg, &paths, &icon, &mut packager_runs);

    assert_eq!(packager_runs, 1, "second install must not repackage");
}

#[test]
fn reinstall_produces_byte_identical_desktop_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let (mut cfg, paths) = fixture(tmp.path());
    let icon = tmp.path().join("icon.png");
    fs::write(&icon, "png").unwrap();

    let mut packager_runs = 0;
    fake_install(&cfg, &paths, &icon, &mut packager_runs);
    let first = fs::read(paths.desktop_file()).unwrap();

    cfg.force = true;
    fake_install(&cfg, &paths, &icon, &mut packager_runs);
    let second = fs::read(paths.desktop_file()).unwrap();

    assert_eq!(packager_runs, 2);
    assert_eq!(first, second);
}

#[test]
fn install_then_uninstall_round_trip_leaves_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, paths) = fixture(tmp.path());
    let icon = tmp.path().join("icon.png");
    fs::write(&icon, "png").unwrap();

    let mut packager_runs = 0;
    fake_install(&cfg, &paths, &icon, &mut packager_runs);

    let mut exec = |_cmd: &mut Command| Ok(ok_status());
    uninstall::run(&paths, None, &mut exec).unwrap();

    let leftovers: Vec<PathBuf> = [
        paths.app_dir.clone(),
        paths.install_dir.clone(),
        paths.desktop_file(),
        paths.mime_xml(),
    ]
    .into_iter()
    .chain(config::ICON_SIZES.iter().map(|size| paths.icon_file(*size)))
    .filter(|path| path.exists())
    .collect();
    assert!(leftovers.is_empty(), "leftover artifacts: {leftovers:?}");
}

#[test]
fn packaging_failure_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, paths) = fixture(tmp.path());
    let icon = tmp.path().join("icon.png");
    fs::write(&icon, "png").unwrap();

    let mut exec = |cmd: &mut Command| {
        use std::os::unix::process::ExitStatusExt;
        if cmd.get_program().to_string_lossy() == "nativefier" {
            return Ok(ExitStatus::from_raw(256)); // exit code 1
        }
        Ok(ok_status())
    };

    let icon_path = icon.clone();
    let err = installer::run_with_deps(
        &cfg,
        &paths,
        None,
        |_exec: &mut _| Ok(()),
        |_exec: &mut _| Ok(icon_path.clone()),
        &mut exec,
    )
    .unwrap_err();

    assert!(err.to_string().contains("nativefier failed"));
}
