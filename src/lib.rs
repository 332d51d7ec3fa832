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

extern crate dirs;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {
        Defs(deploycat_definitions::Error, deploycat_definitions::ErrorKind);
    }
    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error);
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
    }
    errors {
        InvalidDeployments(failed: usize, total: usize) {
            description("deployments do not validate")
            display("{} of {} deployments do not validate", failed, total)
        }
        SkippedDocuments(skipped: usize) {
            description("documents could not be parsed")
            display("{} document(s) could not be parsed", skipped)
        }
    }
}

pub use deploycat_definitions::{Config, Deployment, ValidationError};

/// Config resolution and the `config` subcommand
pub mod config;

/// Validation of manifest files
pub mod validate;

/// Normalised output of manifests
pub mod show;

/// Reducers across manifests
pub mod get;
