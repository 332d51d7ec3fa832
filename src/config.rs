use std::env;
use std::path::PathBuf;

use super::{Config, Result};

/// Where to look for a config when none is given explicitly
fn candidates() -> Vec<PathBuf> {
    let mut res = vec![];
    if let Ok(p) = env::var("DEPLOYCAT_CONFIG") {
        res.push(PathBuf::from(p));
    }
    res.push(PathBuf::from("deploycat.yml"));
    if let Some(home) = dirs::home_dir() {
        res.push(home.join(".deploycat.yml"));
    }
    res
}

/// Resolve the config to validate against
///
/// An explicit path must exist. Otherwise `DEPLOYCAT_CONFIG`, `./deploycat.yml`
/// and `~/.deploycat.yml` are tried in order, falling back to the default policy.
pub fn resolve(explicit: Option<&str>) -> Result<Config> {
    let conf = if let Some(p) = explicit {
        Config::read_from(&PathBuf::from(p))?
    } else if let Some(p) = candidates().into_iter().find(|p| p.is_file()) {
        Config::read_from(&p)?
    } else {
        debug!("No config found, using default policy");
        Config::default()
    };
    conf.verify()?;
    Ok(conf)
}

pub fn show(conf: &Config) -> Result<()> {
    conf.print()?;
    Ok(())
}

pub fn verify(conf: &Config) -> Result<()> {
    conf.verify()?;
    info!("config verified");
    Ok(())
}
