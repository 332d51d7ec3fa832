use std::path::PathBuf;

use deploycat_filebacked as filebacked;

use super::{Config, ErrorKind, Result, ValidationError};

/// Validation result for one deployment
#[derive(Serialize, Debug, Clone)]
pub struct Report {
    pub name: String,
    pub errors: Vec<ValidationError>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse and validate every deployment under the given paths
///
/// Returns one report per deployment plus the number of skipped documents.
pub fn reports(paths: &[PathBuf], conf: &Config, strict: bool) -> Result<(Vec<Report>, usize)> {
    let loaded = filebacked::load_paths(paths, strict)?;
    let reports = loaded
        .deployments
        .iter()
        .map(|d| Report {
            name: d.name().to_string(),
            errors: d.validate_against(conf),
        })
        .collect();
    Ok((reports, loaded.skipped))
}

/// Machine readable form of a set of reports
pub fn to_json(reports: &[Report]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Validate manifests in files or directories
///
/// Every finding is logged before failing, so one run shows all the problems.
/// With `json` the reports are also printed to stdout.
pub fn manifests(paths: Vec<PathBuf>, conf: &Config, strict: bool, json: bool) -> Result<()> {
    let (reports, skipped) = reports(&paths, conf, strict)?;
    if json {
        println!("{}", to_json(&reports)?);
    }
    let mut failed = 0;
    for r in &reports {
        if r.is_valid() {
            info!("validated {}", r.name);
        } else {
            failed += 1;
            for e in &r.errors {
                warn!("{}: {}", r.name, e);
            }
        }
    }
    if failed > 0 {
        bail!(ErrorKind::InvalidDeployments(failed, reports.len()));
    }
    if skipped > 0 {
        bail!(ErrorKind::SkippedDocuments(skipped));
    }
    Ok(())
}
