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
#[path = "../src/artifacts.rs"]
mod artifacts;
#[path = "../src/uninstall.rs"]
mod uninstall;

use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

use cli::Config;
use paths::Paths;

fn fixture(tmp: &Path) -> Paths {
    let cfg = Config {
        install_dir: tmp.join("opt/webex"),
        app_dir: tmp.join("opt/webex/app"),
        force: false,
        uninstall: true,
    };
    Paths::rooted(&cfg, tmp)
}

fn ok_exec(_cmd: &mut Command) -> anyhow::Result<ExitStatus> {
    use std::os::unix::process::ExitStatusExt;
    Ok(ExitStatus::from_raw(0))
}

fn install_everything(paths: &Paths) {
    fs::create_dir_all(paths.app_dir.join("Webex-linux-x64")).unwrap();
    artifacts::write_all(paths).unwrap();
    for size in config::ICON_SIZES {
        let icon = paths.icon_file(size);
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(icon, "png").unwrap();
    }
    artifacts::append_associations(&paths.mimeapps_list()).unwrap();
}

#[test]
fn uninstall_removes_every_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = fixture(tmp.path());
    install_everything(&paths);

    uninstall::run(&paths, None, &mut ok_exec).unwrap();

    assert!(!paths.app_dir.exists());
    assert!(!paths.install_dir.exists());
    assert!(!paths.desktop_file().exists());
    for size in config::ICON_SIZES {
        assert!(!paths.icon_file(size).exists(), "icon {size}px still present");
    }
    assert!(!paths.mime_xml().exists());
}

#[test]
fn uninstall_strips_associations_and_collapses_header() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = fixture(tmp.path());
    install_everything(&paths);

    uninstall::run(&paths, None, &mut ok_exec).unwrap();

    let contents = fs::read_to_string(paths.mimeapps_list()).unwrap();
    assert!(!contents.contains("webex.desktop"));
    assert!(!contents.contains("[Added Associations]"));
}

#[test]
fn uninstall_on_clean_system_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = fixture(tmp.path());

    uninstall::run(&paths, None, &mut ok_exec).unwrap();
}

#[test]
fn uninstall_cleans_user_associations_best_effort() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = fixture(tmp.path());
    install_everything(&paths);

    let user_list = tmp.path().join("user-mimeapps.list");
    artifacts::append_associations(&user_list).unwrap();

    uninstall::run(&paths, Some(&user_list), &mut ok_exec).unwrap();

    let contents = fs::read_to_string(&user_list).unwrap();
    assert!(!contents.contains("webex.desktop"));
}
