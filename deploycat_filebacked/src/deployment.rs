use std::collections::BTreeMap;

use deploycat_definitions::deployment::{PodSpec, PodTemplateSpec, API_VERSION, KIND};
use deploycat_definitions::deserializers::{relaxed_map, RelaxedString};
use deploycat_definitions::structs::{Effect, LabelSelector, ObjectMeta, Operator, TemplateMeta, Toleration};
use deploycat_definitions::{Deployment, DeploymentSpec, ErrorKind, Result};
use serde::de::{self, Deserialize, Deserializer};

use crate::container::ContainerSource;
use crate::util::{Build, Require};

/// Source form of an apps/v1 Deployment
///
/// Every field is optional here so that a missing one is reported by its path
/// rather than as a generic deserialization failure.
#[derive(Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentSource {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    pub metadata: Option<MetadataSource>,
    pub spec: Option<DeploymentSpecSource>,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct MetadataSource {
    pub name: Option<String>,
    pub namespace: Option<String>,
    #[serde(deserialize_with = "relaxed_map")]
    pub labels: BTreeMap<String, String>,
    #[serde(deserialize_with = "relaxed_map")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct DeploymentSpecSource {
    pub replicas: Option<i64>,
    pub selector: Option<SelectorSource>,
    pub template: Option<TemplateSource>,

    /// strategy, revisionHistoryLimit, minReadySeconds, ..
    #[serde(flatten)]
    pub unsupported: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorSource {
    #[serde(deserialize_with = "relaxed_map")]
    pub match_labels: BTreeMap<String, String>,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct TemplateSource {
    pub metadata: Option<MetadataSource>,
    pub spec: Option<PodSpecSource>,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PodSpecSource {
    pub tolerations: Option<Vec<TolerationSource>>,
    #[serde(deserialize_with = "relaxed_map")]
    pub node_selector: BTreeMap<String, String>,
    pub containers: Option<Vec<ContainerSource>>,

    #[serde(flatten)]
    pub unsupported: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TolerationSource {
    pub key: Option<String>,
    pub operator: Option<Operator>,
    pub value: Option<RelaxedString>,
    #[serde(deserialize_with = "any_effect")]
    pub effect: Option<Effect>,
    pub toleration_seconds: Option<i64>,
}

/// An empty effect matches every taint effect, same as leaving it out
fn any_effect<'de, D>(deserializer: D) -> std::result::Result<Option<Effect>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(ref e) if !e.is_empty() => serde_yaml::from_value(serde_yaml::Value::String(e.clone()))
            .map(Some)
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl Build<Toleration, ()> for TolerationSource {
    fn build(self, _: &()) -> Result<Toleration> {
        Ok(Toleration {
            key: self.key,
            operator: self.operator.unwrap_or_default(),
            value: self.value.map(RelaxedString::into_inner),
            effect: self.effect,
            tolerationSeconds: self.toleration_seconds,
        })
    }
}

impl Build<Deployment, ()> for DeploymentSource {
    fn build(self, _: &()) -> Result<Deployment> {
        let api_version = self.api_version.unwrap_or_else(|| API_VERSION.to_string());
        let kind = self.kind.unwrap_or_else(|| KIND.to_string());
        if api_version != API_VERSION || kind != KIND {
            bail!(ErrorKind::UnsupportedKind(api_version, kind));
        }

        let md = self.metadata.require("metadata.name")?;
        let name = md.name.require("metadata.name")?;
        let spec = self.spec.require("spec.selector")?;
        if !spec.unsupported.is_empty() {
            let keys = spec.unsupported.keys().cloned().collect::<Vec<_>>();
            debug!("Ignoring deployment spec fields {:?} on {}", keys, name);
        }

        let replicas = spec.replicas.unwrap_or(1);
        if replicas < 0 {
            bail!(ErrorKind::NegativeReplicas(replicas));
        }
        if replicas > i64::from(i32::max_value()) {
            bail!("replicas {} does not fit in an int32", replicas);
        }
        let selector = spec.selector.require("spec.selector")?;

        let template = spec.template.require("spec.template.spec.containers")?;
        let pod = template.spec.require("spec.template.spec.containers")?;
        if !pod.unsupported.is_empty() {
            let keys = pod.unsupported.keys().cloned().collect::<Vec<_>>();
            debug!("Ignoring pod spec fields {:?} on {}", keys, name);
        }
        let containers = pod.containers.require("spec.template.spec.containers")?;
        let template_labels = template.metadata.map(|m| m.labels).unwrap_or_default();

        Ok(Deployment {
            apiVersion: api_version,
            kind,
            metadata: ObjectMeta {
                name,
                namespace: md.namespace,
                labels: md.labels,
                annotations: md.annotations,
            },
            spec: DeploymentSpec {
                replicas: replicas as i32,
                selector: LabelSelector { matchLabels: selector.match_labels },
                template: PodTemplateSpec {
                    metadata: TemplateMeta { labels: template_labels },
                    spec: PodSpec {
                        tolerations: pod.tolerations.unwrap_or_default().build(&())?,
                        nodeSelector: pod.node_selector,
                        containers: containers.build(&())?,
                    },
                },
            },
        })
    }
}
