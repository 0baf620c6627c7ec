mod artifacts;
mod cli;
mod config;
mod deps;
mod fs_ops;
mod icons;
mod installer;
mod logging;
mod net;
mod packaging;
mod paths;
mod pkgmgr;
mod privileges;
mod uninstall;
mod workdir;

use anyhow::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let invocation = match cli::parse(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            logging::error(&format!("{err:#}"));
            eprintln!("{}", cli::USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logging::error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(invocation: cli::Invocation) -> Result<()> {
    match invocation {
        cli::Invocation::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        cli::Invocation::Readme => {
            println!("{}", cli::README);
            Ok(())
        }
        cli::Invocation::Run(cfg) => {
            privileges::require_root()?;
            if cfg.uninstall {
                uninstall::run_default(&cfg)
            } else {
                installer::run(&cfg)
            }
        }
    }
}
