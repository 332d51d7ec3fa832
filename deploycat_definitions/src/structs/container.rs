use super::{ContainerPort, ResourceRequirements, SecurityContext};

/// A container in the pod template
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Name of container (unique within the pod)
    pub name: String,

    /// Image reference, e.g. `mcr.microsoft.com/dotnet/framework/samples:aspnetapp`
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,

    /// Resource requests and limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements<String>>,

    /// Ports to open
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
}
