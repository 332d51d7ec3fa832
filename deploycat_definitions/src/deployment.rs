use std::collections::BTreeMap;

use super::structs::{Container, LabelSelector, ObjectMeta, TemplateMeta, Toleration};
use super::validation::{self, ValidationError};
use super::{Config, ErrorKind, Result};

pub const API_VERSION: &str = "apps/v1";
pub const KIND: &str = "Deployment";

/// An apps/v1 Deployment
///
/// The desired state of one replicated workload, as submitted to a control plane.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Deployment {
    pub apiVersion: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: DeploymentSpec,
}

/// The desired state of a Deployment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeploymentSpec {
    /// Target number of concurrently running pods
    ///
    /// Signed so that records built in code can carry (and be flagged for) nonsense.
    pub replicas: i32,
    pub selector: LabelSelector,
    pub template: PodTemplateSpec,
}

/// Template for the pods a Deployment creates
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PodTemplateSpec {
    #[serde(default)]
    pub metadata: TemplateMeta,
    pub spec: PodSpec,
}

/// Pod level scheduling constraints and containers
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PodSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodeSelector: BTreeMap<String, String>,
    pub containers: Vec<Container>,
}

impl Deployment {
    /// Name of the deployment
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Containers in the pod template
    pub fn containers(&self) -> &[Container] {
        &self.spec.template.spec.containers
    }

    /// Run the built-in semantic checks
    ///
    /// Never fails; the caller decides whether findings block submission.
    pub fn validate(&self) -> Vec<ValidationError> {
        validation::validate(self)
    }

    /// Built-in checks plus the policy from a `Config`
    pub fn validate_against(&self, conf: &Config) -> Vec<ValidationError> {
        let mut res = validation::validate(self);
        res.extend(validation::validate_policy(self, conf));
        res
    }

    /// Verify the deployment against a config, logging every finding
    pub fn verify(&self, conf: &Config) -> Result<()> {
        let errs = self.validate_against(conf);
        for e in &errs {
            warn!("{}: {}", self.name(), e);
        }
        if !errs.is_empty() {
            bail!(ErrorKind::InvalidManifest(self.name().to_string(), errs.len()));
        }
        Ok(())
    }

    /// Serialize back into a yaml document
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// Cross-crate test deployment creator
impl Deployment {
    /// The hello world deployment running an ASP.NET sample on Windows nodes
    pub fn test(name: &str) -> Deployment {
        use serde_json::json;
        let labels = json!({ "app": name });
        serde_json::from_value(json!({
            "apiVersion": API_VERSION,
            "kind": KIND,
            "metadata": { "name": name, "labels": labels },
            "spec": {
                "replicas": 1,
                "selector": { "matchLabels": labels },
                "template": {
                    "metadata": { "labels": labels },
                    "spec": {
                        "tolerations": [{
                            "key": "windows",
                            "operator": "Equal",
                            "value": "2019",
                            "effect": "NoSchedule"
                        }],
                        "nodeSelector": { "kubernetes.io/os": "windows" },
                        "containers": [{
                            "name": name,
                            "image": "mcr.microsoft.com/dotnet/framework/samples:aspnetapp",
                            "securityContext": { "runAsUser": 1000 },
                            "resources": { "limits": { "cpu": "1", "memory": "800M" } },
                            "ports": [{ "containerPort": 80 }]
                        }]
                    }
                }
            }
        }))
        .expect("test deployment is well formed")
    }
}

#[cfg(test)]
mod tests {
    use super::Deployment;

    #[test]
    fn test_deployment_is_valid() {
        let d = Deployment::test("helloworld");
        assert_eq!(d.name(), "helloworld");
        assert_eq!(d.spec.replicas, 1);
        assert_eq!(d.containers().len(), 1);
        assert!(d.validate().is_empty());
    }

    #[test]
    fn yaml_output_is_kube_shaped() {
        let yaml = Deployment::test("helloworld").to_yaml().unwrap();
        assert!(yaml.contains("apiVersion: apps/v1"));
        assert!(yaml.contains("matchLabels"));
        assert!(yaml.contains("containerPort: 80"));
        assert!(yaml.contains("runAsUser: 1000"));
        assert!(yaml.contains("kubernetes.io/os"));
    }

    #[test]
    fn verify_blocks_invalid() {
        let conf = crate::Config::default();
        let mut d = Deployment::test("helloworld");
        assert!(d.verify(&conf).is_ok());
        d.spec.template.spec.containers.clear();
        assert!(d.verify(&conf).is_err());
    }
}
