//! `webui-provision fingerprint` – content fingerprint of a directory.

use anyhow::Result;
use std::path::Path;
use webui_core::fingerprint::directory_fingerprint;

pub fn run_fingerprint(dir: &Path) -> Result<()> {
    let digest = directory_fingerprint(dir)?;
    println!("{}  {}", digest, dir.display());
    Ok(())
}
