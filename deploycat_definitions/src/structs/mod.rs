#![allow(non_snake_case)]

/// Allow normal error handling from structs
pub use super::{ErrorKind, Result, ResultExt};

// Kubernetes structs - straight translations of the apps/v1 and core/v1 shapes

/// Object metadata and label selectors
pub mod metadata;
pub use self::metadata::{LabelSelector, ObjectMeta, TemplateMeta};

/// Kubernetes resource structs
pub mod resources;
pub use self::resources::{parse_cpu, parse_memory, ResourceList, ResourceRequirements};

/// Kubernetes tolerations
pub mod tolerations;
pub use self::tolerations::{Effect, Operator, Toleration};

mod securitycontext;
pub use self::securitycontext::SecurityContext;

pub mod port;
pub use self::port::{ContainerPort, PortProtocol};

/// Container image references
pub mod image;
pub use self::image::ImageReference;

// Kubernetes Containers
pub mod container;
pub use self::container::Container;
