use std::collections::BTreeMap;

use deploycat_definitions::deserializers::RelaxedString;
use deploycat_definitions::structs::{
    parse_cpu, parse_memory, Container, ContainerPort, PortProtocol, ResourceList, ResourceRequirements,
    SecurityContext,
};
use deploycat_definitions::{ErrorKind, Result};

use crate::util::{Build, Require};

/// Source configuration for a container, as written in the pod template
#[derive(Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerSource {
    pub name: Option<String>,
    pub image: Option<String>,
    pub security_context: Option<SecurityContext>,
    pub resources: Option<ResourceRequirementsSource>,
    pub ports: Option<Vec<PortSource>>,

    /// Everything else kubernetes allows on a container (env, probes, ..)
    #[serde(flatten)]
    pub unsupported: BTreeMap<String, serde_yaml::Value>,
}

impl Build<Container, ()> for ContainerSource {
    fn build(self, _: &()) -> Result<Container> {
        let name = self.name.require("containers[].name")?;
        if !self.unsupported.is_empty() {
            let keys = self.unsupported.keys().cloned().collect::<Vec<_>>();
            debug!("Ignoring container fields {:?} on {}", keys, name);
        }
        Ok(Container {
            image: self.image.require(&format!("containers[{}].image", name))?,
            security_context: self.security_context,
            resources: self.resources.build(&())?,
            ports: self.ports.unwrap_or_default().build(&name)?,
            name,
        })
    }
}

/// A container port entry
#[derive(Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PortSource {
    pub name: Option<String>,
    pub container_port: Option<RelaxedString>,
    pub protocol: Option<PortProtocol>,
}

/// Ports are built with the name of their container for error reporting
impl Build<ContainerPort, String> for PortSource {
    fn build(self, container: &String) -> Result<ContainerPort> {
        let raw = self
            .container_port
            .require(&format!("containers[{}].ports[].containerPort", container))?;
        let container_port = raw
            .as_str()
            .parse::<i32>()
            .map_err(|_| ErrorKind::InvalidContainerPort(container.clone(), raw.to_string()))?;
        Ok(ContainerPort {
            name: self.name,
            container_port,
            protocol: self.protocol.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct ResourceRequirementsSource {
    pub limits: Option<ResourceListSource>,
    pub requests: Option<ResourceListSource>,
}

impl Build<ResourceRequirements<String>, ()> for ResourceRequirementsSource {
    fn build(self, params: &()) -> Result<ResourceRequirements<String>> {
        Ok(ResourceRequirements {
            limits: self.limits.build(params)?,
            requests: self.requests.build(params)?,
        })
    }
}

#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct ResourceListSource {
    pub cpu: Option<RelaxedString>,
    pub memory: Option<RelaxedString>,
}

/// Quantities keep their written form once they are known to parse
impl Build<ResourceList<String>, ()> for ResourceListSource {
    fn build(self, _: &()) -> Result<ResourceList<String>> {
        if let Some(c) = &self.cpu {
            parse_cpu(c.as_str())?;
        }
        if let Some(m) = &self.memory {
            parse_memory(m.as_str())?;
        }
        Ok(ResourceList {
            cpu: self.cpu.map(RelaxedString::into_inner),
            memory: self.memory.map(RelaxedString::into_inner),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ContainerSource, PortSource};
    use crate::util::Build;
    use deploycat_definitions::structs::PortProtocol;
    use deploycat_definitions::ErrorKind;

    fn container(yaml: &str) -> ContainerSource {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn builds_hello_world() {
        let c = container(
            r#"
name: helloworld
image: mcr.microsoft.com/dotnet/framework/samples:aspnetapp
securityContext:
  runAsUser: 1000
resources:
  limits:
    cpu: 1
    memory: 800M
ports:
  - containerPort: 80
env:
  - name: FOO
    value: bar
"#,
        )
        .build(&())
        .unwrap();
        assert_eq!(c.name, "helloworld");
        assert_eq!(c.security_context.unwrap().runAsUser, Some(1000));
        let limits = c.resources.unwrap().limits.unwrap();
        assert_eq!(limits.cpu, Some("1".to_string()));
        assert_eq!(limits.memory, Some("800M".to_string()));
        assert_eq!(c.ports[0].container_port, 80);
        assert_eq!(c.ports[0].protocol, PortProtocol::Tcp);
    }

    #[test]
    fn missing_fields() {
        let err = container("image: nginx\n").build(&()).unwrap_err();
        match err.kind() {
            ErrorKind::MissingField(f) => assert_eq!(f, "containers[].name"),
            e => panic!("unexpected error {}", e),
        }
        assert!(container("name: web\n").build(&()).is_err());
    }

    #[test]
    fn bad_quantities() {
        let err = container("name: web\nimage: nginx\nresources:\n  limits:\n    cpu: lots\n")
            .build(&())
            .unwrap_err();
        match err.kind() {
            ErrorKind::InvalidQuantity(r, v) => {
                assert_eq!(r, "cpu");
                assert_eq!(v, "lots");
            }
            e => panic!("unexpected error {}", e),
        }
        assert!(container("name: web\nimage: nginx\nresources:\n  requests:\n    memory: 1GB\n")
            .build(&())
            .is_err());
    }

    #[test]
    fn ports() {
        let p: PortSource = serde_yaml::from_str("containerPort: '8080'\nprotocol: UDP\n").unwrap();
        let built = p.build(&"web".to_string()).unwrap();
        assert_eq!(built.container_port, 8080);
        assert_eq!(built.protocol, PortProtocol::Udp);

        let p: PortSource = serde_yaml::from_str("containerPort: http\n").unwrap();
        match p.build(&"web".to_string()).unwrap_err().kind() {
            ErrorKind::InvalidContainerPort(c, v) => {
                assert_eq!(c, "web");
                assert_eq!(v, "http");
            }
            e => panic!("unexpected error {}", e),
        }

        let p: PortSource = serde_yaml::from_str("name: http\n").unwrap();
        assert!(p.build(&"web".to_string()).is_err());
    }
}
