use std::collections::BTreeMap;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use super::deserializers::{relaxed_map, RelaxedString};
use super::structs::{parse_cpu, parse_memory};
use super::{ErrorKind, Result, ResultExt};

/// Validation policy for a set of deployments
///
/// Everything is opt-in; the default config only runs the built-in checks.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Registries images may be pulled from (`docker.io` for unqualified images)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowedRegistries: Vec<String>,
    /// Largest cpu limit a single container may set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxCpu: Option<RelaxedString>,
    /// Largest memory limit a single container may set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxMemory: Option<RelaxedString>,
    /// Require every container to limit both cpu and memory
    pub requireLimits: bool,
    /// Node selector pairs every deployment must carry
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "relaxed_map")]
    pub requiredNodeSelector: BTreeMap<String, String>,
}

impl Config {
    /// Read a config file
    pub fn read_from(pth: &Path) -> Result<Config> {
        if !pth.exists() {
            bail!(ErrorKind::MissingPath(pth.display().to_string()));
        }
        let mut f = File::open(pth)?;
        let mut data = String::new();
        f.read_to_string(&mut data)?;
        debug!("Reading config from {}", pth.display());
        let conf: Config = serde_yaml::from_str(&data)
            .chain_err(|| format!("could not parse config {}", pth.display()))?;
        Ok(conf)
    }

    /// Sanity check the config values
    pub fn verify(&self) -> Result<()> {
        if let Some(c) = &self.maxCpu {
            parse_cpu(c.as_str()).chain_err(|| "invalid maxCpu")?;
        }
        if let Some(m) = &self.maxMemory {
            parse_memory(m.as_str()).chain_err(|| "invalid maxMemory")?;
        }
        for r in &self.allowedRegistries {
            if r.is_empty() || r.contains('/') {
                bail!("allowedRegistries entry '{}' must be a bare registry host", r);
            }
        }
        Ok(())
    }

    /// Print the config as yaml
    pub fn print(&self) -> Result<()> {
        print!("{}\n", serde_yaml::to_string(self)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn parse_and_verify() {
        let conf: Config = serde_yaml::from_str(
            "allowedRegistries: [mcr.microsoft.com]\nmaxCpu: 2\nmaxMemory: 4Gi\nrequireLimits: true\n",
        )
        .unwrap();
        assert_eq!(conf.maxCpu.as_ref().map(|c| c.as_str()), Some("2"));
        assert!(conf.verify().is_ok());
        assert!(conf.requireLimits);
        assert!(conf.requiredNodeSelector.is_empty());
    }

    #[test]
    fn verify_rejects_nonsense() {
        let bad_cpu = Config { maxCpu: Some("two".into()), ..Config::default() };
        assert!(bad_cpu.verify().is_err());
        let bad_reg = Config { allowedRegistries: vec!["quay.io/babylonhealth".into()], ..Config::default() };
        assert!(bad_reg.verify().is_err());
        assert!(Config::default().verify().is_ok());
    }

    #[test]
    fn unknown_keys_fail() {
        assert!(serde_yaml::from_str::<Config>("maxCpus: '2'\n").is_err());
    }
}
