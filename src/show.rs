use std::path::PathBuf;

use deploycat_filebacked as filebacked;

use super::Result;

/// Print the deployments in a file in normalised form
///
/// Defaults are filled in, unsupported fields dropped, and quantities kept as written.
pub fn deployments(pth: PathBuf, json: bool) -> Result<()> {
    let loaded = filebacked::load_file(&pth, true)?;
    for d in &loaded.deployments {
        if json {
            print!("{}\n", serde_json::to_string_pretty(d)?);
        } else {
            print!("{}\n", d.to_yaml()?);
        }
    }
    Ok(())
}
