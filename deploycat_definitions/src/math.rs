use std::ops::{Add, AddAssign, Mul};

use super::structs::ResourceList;
use super::{Deployment, Result};

/// Normalised cpu (cores) and memory (bytes)
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct ResourceAmount {
    pub cpu: f64,
    pub memory: f64,
}

impl From<&ResourceList<f64>> for ResourceAmount {
    fn from(l: &ResourceList<f64>) -> Self {
        ResourceAmount {
            cpu: l.cpu.unwrap_or_default(),
            memory: l.memory.unwrap_or_default(),
        }
    }
}

impl Add for ResourceAmount {
    type Output = ResourceAmount;

    fn add(self, rhs: ResourceAmount) -> ResourceAmount {
        ResourceAmount {
            cpu: self.cpu + rhs.cpu,
            memory: self.memory + rhs.memory,
        }
    }
}

impl Mul<u32> for ResourceAmount {
    type Output = ResourceAmount;

    fn mul(self, scalar: u32) -> ResourceAmount {
        ResourceAmount {
            cpu: self.cpu * f64::from(scalar),
            memory: self.memory * f64::from(scalar),
        }
    }
}

/// Total resource usage of one or more deployments
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct ResourceTotals {
    /// Sum of container requests across all replicas
    pub requests: ResourceAmount,
    /// Sum of container limits across all replicas
    pub limits: ResourceAmount,
}

impl Add for ResourceTotals {
    type Output = ResourceTotals;

    fn add(self, rhs: ResourceTotals) -> ResourceTotals {
        ResourceTotals {
            requests: self.requests + rhs.requests,
            limits: self.limits + rhs.limits,
        }
    }
}

impl AddAssign for ResourceTotals {
    fn add_assign(&mut self, rhs: ResourceTotals) {
        *self = *self + rhs;
    }
}

impl ResourceTotals {
    /// Convert memory to gigabytes and round everything to two decimals
    pub fn round(&mut self) {
        round_amount(&mut self.requests);
        round_amount(&mut self.limits);
    }
}

fn round_amount(a: &mut ResourceAmount) {
    a.memory = (a.memory * 100.0 / (1024.0 * 1024.0 * 1024.0)).round() / 100.0;
    a.cpu = (a.cpu * 100.0).round() / 100.0;
}

/// Calculations done based on values in deployments
impl Deployment {
    /// Compute the total resource usage of a deployment
    ///
    /// Per container amounts are multiplied by the replica count.
    /// A negative replica count counts as zero.
    pub fn compute_resource_totals(&self) -> Result<ResourceTotals> {
        let replicas = if self.spec.replicas < 0 { 0 } else { self.spec.replicas as u32 };
        let mut totals = ResourceTotals::default();
        for c in self.containers() {
            if let Some(r) = &c.resources {
                let n = r.normalised()?;
                let requests = n.requests.as_ref().map(ResourceAmount::from).unwrap_or_default();
                let limits = n.limits.as_ref().map(ResourceAmount::from).unwrap_or_default();
                totals += ResourceTotals {
                    requests: requests * replicas,
                    limits: limits * replicas,
                };
            } else {
                debug!("{} has no resources for container {}", self.name(), c.name);
            }
        }
        Ok(totals)
    }
}
