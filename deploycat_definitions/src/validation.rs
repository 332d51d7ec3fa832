use std::collections::BTreeSet;
use std::fmt;

use super::structs::metadata::{is_dns_label, is_dns_subdomain};
use super::structs::{parse_cpu, parse_memory, ImageReference};
use super::{Config, Deployment, Result};

/// A semantic problem with a parsed deployment
///
/// These are reported as data; nothing here aborts a validation run.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    /// selector.matchLabels is empty
    EmptySelector,
    /// selector pairs that the pod template labels do not carry
    SelectorMismatch { unmatched: Vec<(String, String)> },
    NoContainers,
    DuplicateContainerName { name: String },
    NegativeReplicas { replicas: i32 },
    /// `rule` is the DNS-1123 form the name must take
    InvalidName { name: String, rule: String },
    InvalidImage { container: String, image: String, reason: String },
    InvalidToleration { index: usize, reason: String },
    InvalidPort { container: String, port: i32 },
    DuplicatePort { container: String, port: i32 },
    InvalidUser { container: String, uid: i64 },
    ResourceConflict { container: String, reason: String },

    // policy findings, only produced by validate_against
    DisallowedRegistry { container: String, registry: String },
    MissingLimits { container: String },
    ResourceCeiling { container: String, reason: String },
    MissingNodeSelector { key: String, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ValidationError::*;
        match self {
            EmptySelector => write!(f, "selector.matchLabels must not be empty"),
            SelectorMismatch { unmatched } => {
                let pairs = unmatched
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "selector does not match template labels (unmatched: {})", pairs)
            }
            NoContainers => write!(f, "pod template has no containers"),
            DuplicateContainerName { name } => write!(f, "container name '{}' is used more than once", name),
            NegativeReplicas { replicas } => write!(f, "replicas must be non-negative, got {}", replicas),
            InvalidName { name, rule } => write!(f, "'{}' is not a valid DNS-1123 {}", name, rule),
            InvalidImage { container, image, reason } => {
                write!(f, "container '{}' has invalid image '{}': {}", container, image, reason)
            }
            InvalidToleration { index, reason } => write!(f, "toleration {}: {}", index, reason),
            InvalidPort { container, port } => write!(f, "container '{}' port {} is out of range", container, port),
            DuplicatePort { container, port } => write!(f, "container '{}' opens port {} twice", container, port),
            InvalidUser { container, uid } => write!(f, "container '{}' has negative runAsUser {}", container, uid),
            ResourceConflict { container, reason } => write!(f, "container '{}': {}", container, reason),
            DisallowedRegistry { container, registry } => {
                write!(f, "container '{}' pulls from disallowed registry '{}'", container, registry)
            }
            MissingLimits { container } => write!(f, "container '{}' has no cpu and memory limits", container),
            ResourceCeiling { container, reason } => write!(f, "container '{}': {}", container, reason),
            MissingNodeSelector { key, value } => write!(f, "nodeSelector must contain {}={}", key, value),
        }
    }
}

/// Built-in checks on a deployment
pub fn validate(d: &Deployment) -> Vec<ValidationError> {
    let mut res = vec![];
    let spec = &d.spec;

    check_name(&d.metadata.name, "subdomain", is_dns_subdomain, &mut res);

    if spec.replicas < 0 {
        res.push(ValidationError::NegativeReplicas { replicas: spec.replicas });
    }

    if spec.selector.matchLabels.is_empty() {
        res.push(ValidationError::EmptySelector);
    } else {
        let unmatched = spec.selector.unmatched(&spec.template.metadata.labels);
        if !unmatched.is_empty() {
            res.push(ValidationError::SelectorMismatch { unmatched });
        }
    }

    for (i, t) in spec.template.spec.tolerations.iter().enumerate() {
        for reason in t.problems() {
            res.push(ValidationError::InvalidToleration { index: i, reason });
        }
    }

    let containers = d.containers();
    if containers.is_empty() {
        res.push(ValidationError::NoContainers);
    }
    let mut seen = BTreeSet::new();
    for c in containers {
        if !seen.insert(c.name.as_str()) {
            res.push(ValidationError::DuplicateContainerName { name: c.name.clone() });
        }
        check_name(&c.name, "label", is_dns_label, &mut res);

        if let Err(e) = ImageReference::parse(&c.image) {
            res.push(ValidationError::InvalidImage {
                container: c.name.clone(),
                image: c.image.clone(),
                reason: e.to_string(),
            });
        }

        let mut ports = BTreeSet::new();
        for p in &c.ports {
            if !p.in_range() {
                res.push(ValidationError::InvalidPort { container: c.name.clone(), port: p.container_port });
            } else if !ports.insert((p.container_port, p.protocol.clone())) {
                res.push(ValidationError::DuplicatePort { container: c.name.clone(), port: p.container_port });
            }
        }

        if let Some(uid) = c.security_context.as_ref().and_then(|s| s.runAsUser) {
            if uid < 0 {
                res.push(ValidationError::InvalidUser { container: c.name.clone(), uid });
            }
        }

        if let Some(r) = &c.resources {
            match r.conflicts() {
                Ok(conflicts) => {
                    for reason in conflicts {
                        res.push(ValidationError::ResourceConflict { container: c.name.clone(), reason });
                    }
                }
                Err(e) => res.push(ValidationError::ResourceConflict {
                    container: c.name.clone(),
                    reason: e.to_string(),
                }),
            }
        }
    }
    debug!("{} built-in findings for {}", res.len(), d.name());
    res
}

fn check_name<F>(name: &str, rule: &str, valid: F, res: &mut Vec<ValidationError>)
where
    F: Fn(&str) -> Result<bool>,
{
    // a regex compile failure is reported the same way as a bad name
    if !valid(name).unwrap_or(false) {
        res.push(ValidationError::InvalidName { name: name.to_string(), rule: rule.to_string() });
    }
}

/// Policy checks from the config
///
/// Assumes the quantities in the config have passed `Config::verify`.
pub fn validate_policy(d: &Deployment, conf: &Config) -> Vec<ValidationError> {
    let mut res = vec![];
    for (k, v) in &conf.requiredNodeSelector {
        if d.spec.template.spec.nodeSelector.get(k) != Some(v) {
            res.push(ValidationError::MissingNodeSelector { key: k.clone(), value: v.clone() });
        }
    }

    let max_cpu = conf.maxCpu.as_ref().and_then(|c| parse_cpu(c.as_str()).ok());
    let max_mem = conf.maxMemory.as_ref().and_then(|m| parse_memory(m.as_str()).ok());
    for c in d.containers() {
        if !conf.allowedRegistries.is_empty() {
            if let Ok(img) = ImageReference::parse(&c.image) {
                let registry = img.registry.unwrap_or_else(|| "docker.io".to_string());
                if !conf.allowedRegistries.contains(&registry) {
                    res.push(ValidationError::DisallowedRegistry { container: c.name.clone(), registry });
                }
            }
        }

        let limits = c
            .resources
            .as_ref()
            .and_then(|r| r.limits.as_ref())
            .and_then(|l| l.normalised().ok());
        let limits = match limits {
            Some(l) => l,
            None => {
                if conf.requireLimits {
                    res.push(ValidationError::MissingLimits { container: c.name.clone() });
                }
                continue;
            }
        };
        if conf.requireLimits && (limits.cpu.is_none() || limits.memory.is_none()) {
            res.push(ValidationError::MissingLimits { container: c.name.clone() });
        }
        if let (Some(max), Some(cpu)) = (max_cpu, limits.cpu) {
            if cpu > max {
                res.push(ValidationError::ResourceCeiling {
                    container: c.name.clone(),
                    reason: format!("cpu limit of {} cores exceeds the {} core ceiling", cpu, max),
                });
            }
        }
        if let (Some(max), Some(mem)) = (max_mem, limits.memory) {
            if mem > max {
                res.push(ValidationError::ResourceCeiling {
                    container: c.name.clone(),
                    reason: format!("memory limit of {} bytes exceeds the {} byte ceiling", mem, max),
                });
            }
        }
    }
    res
}
