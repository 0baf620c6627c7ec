use anyhow::{bail, Result};

pub fn require_root() -> Result<()> {
    if !is_root() {
        bail!("this installer must run as root (try sudo)");
    }
    Ok(())
}

#[cfg(unix)]
fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    false
}
