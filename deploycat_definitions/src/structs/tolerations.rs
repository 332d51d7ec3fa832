/// Operator for a toleration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Operator {
    Exists,
    Equal,
}
impl Default for Operator {
    fn default() -> Self {
        Operator::Equal
    }
}

/// Effect of a toleration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Effect {
    NoSchedule,
    NoExecute,
    PreferNoSchedule,
}

/// Kubernetes toleration for a pod
///
/// An absent effect tolerates every effect of a matching taint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Toleration {
    /// Taint key the toleration applies to (empty with Exists matches all taints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Operator (Exists / Equal)
    #[serde(default)]
    pub operator: Operator,
    /// Value to match against (only with Operator::Equal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// How long to stay bound after the taint appears (only for NoExecute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerationSeconds: Option<i64>,
}

impl Toleration {
    /// Problems with this toleration, as described by the kube api rules
    pub fn problems(&self) -> Vec<String> {
        let mut res = vec![];
        match self.operator {
            Operator::Exists => {
                if self.value.as_ref().map_or(false, |v| !v.is_empty()) {
                    res.push("value must be empty when operator is Exists".to_string());
                }
            }
            Operator::Equal => {
                if self.key.as_ref().map_or(true, |k| k.is_empty()) {
                    res.push("key is required when operator is Equal".to_string());
                }
            }
        }
        if self.tolerationSeconds.is_some() && self.effect != Some(Effect::NoExecute) {
            res.push("tolerationSeconds requires effect NoExecute".to_string());
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::{Effect, Operator, Toleration};

    fn windows() -> Toleration {
        Toleration {
            key: Some("windows".into()),
            operator: Operator::Equal,
            value: Some("2019".into()),
            effect: Some(Effect::NoSchedule),
            tolerationSeconds: None,
        }
    }

    #[test]
    fn valid_tolerations() {
        assert!(windows().problems().is_empty());
        let any = Toleration { operator: Operator::Exists, ..Toleration::default() };
        assert!(any.problems().is_empty());
        let evict = Toleration {
            effect: Some(Effect::NoExecute),
            tolerationSeconds: Some(300),
            ..windows()
        };
        assert!(evict.problems().is_empty());
    }

    #[test]
    fn invalid_tolerations() {
        let exists_with_value = Toleration { operator: Operator::Exists, ..windows() };
        assert_eq!(exists_with_value.problems().len(), 1);

        let equal_without_key = Toleration { key: None, ..windows() };
        assert_eq!(equal_without_key.problems().len(), 1);

        let seconds = Toleration { tolerationSeconds: Some(10), ..windows() };
        assert_eq!(seconds.problems(), vec!["tolerationSeconds requires effect NoExecute".to_string()]);
    }
}
