use regex::Regex;
use std::collections::BTreeMap;

use super::Result;

/// Object metadata for the deployment itself
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ObjectMeta {
    /// Name, unique within its namespace
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Metadata on the pod template
///
/// Kubernetes ignores a template name, so only labels are carried.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct TemplateMeta {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Label selector of a deployment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct LabelSelector {
    #[serde(default)]
    pub matchLabels: BTreeMap<String, String>,
}

impl LabelSelector {
    /// Selector pairs that are missing from, or differ in, the given labels
    pub fn unmatched(&self, labels: &BTreeMap<String, String>) -> Vec<(String, String)> {
        self.matchLabels
            .iter()
            .filter(|(k, v)| labels.get(*k) != Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Whether a name is a valid DNS-1123 label (max 63 chars)
pub fn is_dns_label(name: &str) -> Result<bool> {
    let re = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$")?;
    Ok(name.len() <= 63 && re.is_match(name))
}

/// Whether a name is a valid DNS-1123 subdomain (dot separated labels, max 253 chars)
pub fn is_dns_subdomain(name: &str) -> Result<bool> {
    let re = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")?;
    Ok(name.len() <= 253 && re.is_match(name))
}

#[cfg(test)]
mod tests {
    use super::{is_dns_label, is_dns_subdomain, LabelSelector};
    use maplit::btreemap;

    #[test]
    fn selector_subsets() {
        let sel = LabelSelector { matchLabels: btreemap!{ "app".to_string() => "helloworld".to_string() } };
        let labels = btreemap!{
            "app".to_string() => "helloworld".to_string(),
            "tier".to_string() => "web".to_string(),
        };
        assert!(sel.unmatched(&labels).is_empty());

        let other = btreemap!{ "app".to_string() => "other".to_string() };
        assert_eq!(sel.unmatched(&other), vec![("app".to_string(), "helloworld".to_string())]);
        assert_eq!(sel.unmatched(&btreemap!{}).len(), 1);
    }

    #[test]
    fn dns_labels() {
        assert!(is_dns_label("helloworld").unwrap());
        assert!(is_dns_label("hello-world-2").unwrap());
        assert!(!is_dns_label("-hello").unwrap());
        assert!(!is_dns_label("hello-").unwrap());
        assert!(!is_dns_label("Hello").unwrap());
        assert!(!is_dns_label("hello_world").unwrap());
        assert!(!is_dns_label(&"a".repeat(64)).unwrap());
    }

    #[test]
    fn dns_subdomains() {
        assert!(is_dns_subdomain("helloworld").unwrap());
        assert!(is_dns_subdomain("web.v2").unwrap());
        assert!(is_dns_subdomain("api.shop.example").unwrap());
        assert!(!is_dns_subdomain("web..v2").unwrap());
        assert!(!is_dns_subdomain(".web").unwrap());
        assert!(!is_dns_subdomain("web.-v2").unwrap());
        assert!(!is_dns_subdomain("Web.v2").unwrap());
        let long = vec!["a".repeat(63); 4].join(".");
        assert_eq!(long.len(), 255);
        assert!(!is_dns_subdomain(&long).unwrap());
        assert!(is_dns_subdomain(&long[2..]).unwrap());
    }
}
