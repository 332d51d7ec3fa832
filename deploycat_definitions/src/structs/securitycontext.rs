/// Container security context
///
/// Only the ownership fields are modelled; Windows nodes ignore the rest.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SecurityContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runAsUser: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runAsGroup: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runAsNonRoot: Option<bool>,
}
