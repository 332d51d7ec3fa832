#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortProtocol {
    Tcp,
    Udp,
    Sctp,
}

impl Default for PortProtocol {
    fn default() -> Self { PortProtocol::Tcp }
}

/// Port to open on a container
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    /// Optional name of the port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Port number opened inside the container
    pub container_port: i32,
    /// Port protocol
    #[serde(default)]
    pub protocol: PortProtocol,
}

impl ContainerPort {
    pub fn in_range(&self) -> bool {
        self.container_port >= 1 && self.container_port <= 65535
    }
}
