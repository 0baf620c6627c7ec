use anyhow::{Context, Result};
use std::{
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use crate::{
    artifacts, cli::Config, deps, fs_ops, icons, logging, packaging, paths::Paths, pkgmgr,
    workdir::Workdir,
};

pub fn run(cfg: &Config) -> Result<()> {
    let paths = Paths::new(cfg);
    let workdir = Workdir::create()?;
    workdir.install_signal_cleanup()?;

    let manager = pkgmgr::detect();
    if manager.is_none() {
        logging::warn(
            "no supported package manager detected (apt-get, dnf, yum, pacman, zypper)",
        );
    }

    let workdir_path = workdir.path().to_path_buf();
    let user_list = artifacts::user_mimeapps_list();
    let mut exec = exec_logged;
    run_with_deps(
        cfg,
        &paths,
        user_list.as_deref(),
        |exec| {
            let mut consent = deps::prompt_consent;
            deps::ensure_node(manager, &workdir_path, &mut *exec, &mut consent)?;
            deps::ensure_nativefier(&mut *exec, &mut consent)
        },
        |exec| {
            let convert = pkgmgr::find_in_path("convert");
            let icon = icons::acquire(&workdir_path, convert.as_deref(), &mut *exec)?;
            icons::install_all(&icon, &paths, convert.as_deref(), &mut *exec)?;
            Ok(icon)
        },
        &mut exec,
    )
}

pub fn run_with_deps<E>(
    cfg: &Config,
    paths: &Paths,
    user_list: Option<&Path>,
    ensure_deps_fn: impl FnOnce(&mut E) -> Result<()>,
    prepare_icon_fn: impl FnOnce(&mut E) -> Result<PathBuf>,
    exec: &mut E,
) -> Result<()>
where
    E: FnMut(&mut Command) -> Result<ExitStatus>,
{
    if paths.app_dir.exists() && !cfg.force {
        logging::info("Webex is already installed, nothing to do (use --force to rebuild)");
        return Ok(());
    }
    if cfg.force {
        fs_ops::remove_dir_if_exists(&paths.app_dir)?;
    }

    ensure_deps_fn(&mut *exec)?;

    let icon = prepare_icon_fn(&mut *exec)?;

    packaging::build(paths, &icon, &mut *exec)?;

    artifacts::write_all(paths)?;
    artifacts::register(paths, user_list, &mut *exec)?;

    logging::info("Webex installed successfully");
    Ok(())
}

fn exec_logged(cmd: &mut Command) -> Result<ExitStatus> {
    logging::info(&format!("> {}", format_command(cmd)));
    cmd.status()
        .with_context(|| format!("spawn {}", cmd.get_program().to_string_lossy()))
}

fn format_command(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {args}")
    }
}
