//! This file contains the `deploycat resources` subcommand
use deploycat_definitions::math::ResourceTotals;
use deploycat_filebacked as filebacked;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::Result;

#[derive(Serialize, Default)]
pub struct ResourceSummary {
    /// Totals per deployment (rounded: cores and GB)
    pub deployments: BTreeMap<String, ResourceTotals>,
    /// Sum across all deployments
    pub total: ResourceTotals,
}

/// Compute resource totals for every deployment under the paths
pub fn resource_summary(paths: &[PathBuf]) -> Result<ResourceSummary> {
    let loaded = filebacked::load_paths(paths, true)?;
    let mut res = ResourceSummary::default();
    for d in &loaded.deployments {
        let totals = d.compute_resource_totals()?;
        res.total += totals;
        let mut rounded = totals;
        rounded.round();
        res.deployments.insert(d.name().to_string(), rounded);
    }
    res.total.round();
    Ok(res)
}

pub fn resources(paths: Vec<PathBuf>) -> Result<()> {
    let output = resource_summary(&paths)?;
    print!("{}\n", serde_json::to_string_pretty(&output)?);
    Ok(())
}
