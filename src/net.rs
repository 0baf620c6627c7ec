use anyhow::{Context, Result};
use std::{fs, io, path::Path};

pub fn download_file(url: &str, dest: &Path) -> Result<()> {
    let mut resp = reqwest::blocking::get(url)
        .context("http GET failed")?
        .error_for_status()
        .context("http error")?;

    let mut file =
        fs::File::create(dest).with_context(|| format!("create {}", dest.display()))?;

    io::copy(&mut resp, &mut file).with_context(|| format!("write {}", dest.display()))?;

    Ok(())
}
