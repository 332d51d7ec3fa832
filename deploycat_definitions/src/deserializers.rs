use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};

/// A scalar that is kept as the text it was written as
///
/// Manifests are hand written, and YAML happily turns `windows: 2019` or `cpu: 1`
/// into numbers. Kubernetes treats label values and quantities as strings, so
/// numbers and booleans are accepted and stringified. A null becomes the empty string.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RelaxedString(String);

impl RelaxedString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RelaxedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelaxedString {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for RelaxedString {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl<'de> Deserialize<'de> for RelaxedString {
    fn deserialize<D>(deserializer: D) -> Result<RelaxedString, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RelaxedStringVisitor)
    }
}

struct RelaxedStringVisitor;

macro_rules! visit_tostring {
    ( $name:ident, $type:ty ) => {
        fn $name<E>(self, v: $type) -> Result<Self::Value, E> where E: Error {
            Ok(RelaxedString(v.to_string()))
        }
    };
}

impl<'de> Visitor<'de> for RelaxedStringVisitor {
    type Value = RelaxedString;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, number, boolean or null")
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> where E: Error {
        Ok(RelaxedString(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> where E: Error {
        Ok(RelaxedString::default())
    }

    visit_tostring!(visit_bool, bool);
    visit_tostring!(visit_str, &str);
    visit_tostring!(visit_i64, i64);
    visit_tostring!(visit_u64, u64);
    visit_tostring!(visit_f64, f64);
}

/// Deserialize a string map whose values may be written as any scalar
///
/// Used with `#[serde(deserialize_with = "relaxed_map")]` on label-like maps.
pub fn relaxed_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RelaxedMapVisitor;

    impl<'de> Visitor<'de> for RelaxedMapVisitor {
        type Value = BTreeMap<String, String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of scalars")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> where E: Error {
            Ok(BTreeMap::new())
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut res = BTreeMap::new();
            while let Some((k, v)) = access.next_entry::<RelaxedString, RelaxedString>()? {
                res.insert(k.into_inner(), v.into_inner());
            }
            Ok(res)
        }
    }
    deserializer.deserialize_any(RelaxedMapVisitor)
}
