#![recursion_limit = "1024"]
#![allow(renamed_and_removed_lints)]
#![allow(non_snake_case)]

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;

#[macro_use]
extern crate log;

extern crate regex;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {}
    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error);
        Float(::std::num::ParseFloatError);
        Int(::std::num::ParseIntError);
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
        Regex(regex::Error);
    }
    errors {
        MissingField(field: String) {
            description("required field missing")
            display("missing required field `{}`", &field)
        }
        NegativeReplicas(replicas: i64) {
            description("negative replica count")
            display("replicas must be non-negative, got {}", replicas)
        }
        InvalidQuantity(resource: String, value: String) {
            description("invalid resource quantity")
            display("'{}' is not a valid {} quantity", &value, &resource)
        }
        InvalidContainerPort(container: String, value: String) {
            description("invalid container port")
            display("container '{}' has a non-numeric containerPort '{}'", &container, &value)
        }
        UnsupportedKind(api_version: String, kind: String) {
            description("unsupported resource kind")
            display("expected apps/v1 Deployment, got {} {}", &api_version, &kind)
        }
        InvalidManifest(name: String, count: usize) {
            description("manifest does not validate")
            display("manifest for {} does not validate ({} errors)", &name, count)
        }
        MissingPath(path: String) {
            description("path does not exist")
            display("path '{}' does not exist", &path)
        }
    }
}

/// Policy config for validation runs
pub mod config;
pub use config::Config;

/// Structs for the deployment
pub mod structs;

pub mod deployment;
pub use deployment::{Deployment, DeploymentSpec};

/// Semantic validation findings
pub mod validation;
pub use validation::ValidationError;

/// Computational helpers
pub mod math;

/// Serde helpers for loosely typed scalars
pub mod deserializers;
