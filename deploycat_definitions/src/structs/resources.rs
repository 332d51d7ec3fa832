use super::{ErrorKind, Result};

// Kubernetes resource structs
//
// Manifests carry quantities as strings (T = String) so they serialize back
// exactly as written. A normalised version (T = f64) holds cores and bytes
// and is what the arithmetic in `math` and the policy checks work with.

/// A set of cpu/memory quantities (either requests or limits)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ResourceList<T> {
    /// CPU quantity (cores, or millicores with an `m` suffix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<T>,
    /// Memory quantity (bytes with an optional SI or binary suffix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<T>,
}

/// Kubernetes container resources
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ResourceRequirements<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceList<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceList<T>>,
}

impl ResourceList<String> {
    /// Convert quantity strings to cores and bytes
    pub fn normalised(&self) -> Result<ResourceList<f64>> {
        Ok(ResourceList {
            cpu: self.cpu.as_ref().map(|c| parse_cpu(c)).transpose()?,
            memory: self.memory.as_ref().map(|m| parse_memory(m)).transpose()?,
        })
    }
}

impl ResourceRequirements<String> {
    pub fn normalised(&self) -> Result<ResourceRequirements<f64>> {
        Ok(ResourceRequirements {
            limits: self.limits.as_ref().map(|l| l.normalised()).transpose()?,
            requests: self.requests.as_ref().map(|r| r.normalised()).transpose()?,
        })
    }

    /// Check that requests never exceed limits
    ///
    /// Returns a description of every conflict found.
    pub fn conflicts(&self) -> Result<Vec<String>> {
        let n = self.normalised()?;
        let mut res = vec![];
        if let (Some(req), Some(lim)) = (&n.requests, &n.limits) {
            if let (Some(r), Some(l)) = (req.cpu, lim.cpu) {
                if r > l {
                    res.push("requested more cpu than what was limited".to_string());
                }
            }
            if let (Some(r), Some(l)) = (req.memory, lim.memory) {
                if r > l {
                    res.push("requested more memory than what was limited".to_string());
                }
            }
        }
        Ok(res)
    }
}

/// Split a quantity into its numeric part and its suffix
///
/// Exponent notation (`129e6`) is folded into the number.
fn split_quantity(s: &str) -> (String, String) {
    let digits = s
        .chars()
        .take_while(|ch| ch.is_digit(10) || *ch == '.')
        .collect::<String>();
    let unit = s[digits.len()..].to_string();
    if unit.starts_with('e') || unit.starts_with('E') {
        let exp = &unit[1..];
        if !exp.is_empty() && exp.parse::<i32>().is_ok() {
            return (s.to_string(), String::new());
        }
    }
    (digits, unit)
}

/// Parse a k8s memory quantity into bytes
pub fn parse_memory(s: &str) -> Result<f64> {
    let invalid = || ErrorKind::InvalidQuantity("memory".into(), s.into());
    let (digits, unit) = split_quantity(s.trim());
    let num: f64 = digits.parse().map_err(|_| invalid())?;
    trace!("Parsed memory {} ({})", digits, unit);
    let scale = match unit.as_str() {
        "" => 1.0,
        "k" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        "T" => 1e12,
        "P" => 1e15,
        "E" => 1e18,
        "Ki" => 1024.0,
        "Mi" => 1024.0 * 1024.0,
        "Gi" => 1024.0 * 1024.0 * 1024.0,
        "Ti" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        "Pi" => 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0,
        "Ei" => 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return Err(invalid().into()),
    };
    trace!("Returned {} bytes", num * scale);
    Ok(num * scale)
}

/// Parse a k8s cpu quantity into cores
///
/// Binary suffixes make no sense for cpu and are refused.
pub fn parse_cpu(s: &str) -> Result<f64> {
    let invalid = || ErrorKind::InvalidQuantity("cpu".into(), s.into());
    let (digits, unit) = split_quantity(s.trim());
    let num: f64 = digits.parse().map_err(|_| invalid())?;
    trace!("Parsed cpu {} ({})", digits, unit);
    let res = match unit.as_str() {
        "" => num,
        "m" => num / 1000.0,
        "k" => num * 1000.0,
        _ => return Err(invalid().into()),
    };
    trace!("Returned {} cores", res);
    Ok(res)
}
