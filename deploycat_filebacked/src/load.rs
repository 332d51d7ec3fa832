use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use deploycat_definitions::{Deployment, ErrorKind, Result, ResultExt};
use serde_yaml::Value;
use walkdir::WalkDir;

use crate::deployment::DeploymentSource;
use crate::util::Build;

/// Deployments read from a stream of documents
#[derive(Debug, Default)]
pub struct Loaded {
    pub deployments: Vec<Deployment>,
    /// Documents that failed to parse and were skipped (non-strict loads only)
    pub skipped: usize,
}

impl Loaded {
    fn extend(&mut self, other: Loaded) {
        self.deployments.extend(other.deployments);
        self.skipped += other.skipped;
    }
}

/// Split a yaml stream on `---` separators
///
/// Documents with nothing but whitespace and comments are dropped.
pub fn split_documents(raw: &str) -> Vec<String> {
    let mut docs = vec![];
    let mut current = String::new();
    for line in raw.lines() {
        let is_separator = line.starts_with("---") && {
            let rest = line[3..].trim();
            rest.is_empty() || rest.starts_with('#')
        };
        if is_separator || line.trim_end() == "..." {
            docs.push(std::mem::replace(&mut current, String::new()));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    docs.push(current);
    docs.into_iter()
        .filter(|d| d.lines().any(|l| {
            let l = l.trim();
            !l.is_empty() && !l.starts_with('#')
        }))
        .collect()
}

/// Parse one document into the deployments it holds
///
/// A document is a single Deployment, a sequence of them, or a `kind: List`.
fn parse_document(doc: &str) -> Result<Vec<Deployment>> {
    let value: Value = serde_yaml::from_str(doc)?;
    let items = match value {
        Value::Sequence(items) => items,
        Value::Mapping(ref m) if m.get(&Value::from("kind")) == Some(&Value::from("List")) => {
            match m.get(&Value::from("items")) {
                Some(Value::Sequence(items)) => items.clone(),
                Some(Value::Null) | None => vec![],
                Some(_) => bail!("List items must be a sequence"),
            }
        }
        v => vec![v],
    };
    items
        .into_iter()
        .map(|v| {
            let src: DeploymentSource = serde_yaml::from_value(v)?;
            src.build(&())
        })
        .collect()
}

/// Parse raw text holding exactly one deployment
pub fn parse(raw: &str) -> Result<Deployment> {
    let docs = split_documents(raw);
    if docs.is_empty() {
        bail!("no document found");
    }
    let mut all = vec![];
    for d in docs {
        all.extend(parse_document(&d)?);
    }
    if all.len() != 1 {
        bail!("expected exactly one deployment, found {}", all.len());
    }
    Ok(all.remove(0))
}

/// Parse a multi-document stream
///
/// With `strict` the first bad document aborts the load. Otherwise it is
/// logged, counted and skipped.
pub fn parse_all(raw: &str, strict: bool) -> Result<Loaded> {
    let mut res = Loaded::default();
    for (i, doc) in split_documents(raw).iter().enumerate() {
        match parse_document(doc) {
            Ok(ds) => res.deployments.extend(ds),
            Err(e) => {
                if strict {
                    return Err(e).chain_err(|| format!("document {} is malformed", i + 1));
                }
                warn!("Skipping malformed document {}: {}", i + 1, e);
                res.skipped += 1;
            }
        }
    }
    Ok(res)
}

/// Read and parse every document in a file
pub fn load_file(pth: &Path, strict: bool) -> Result<Loaded> {
    debug!("Loading deployments from {}", pth.display());
    let mut f = File::open(pth).chain_err(|| format!("could not open {}", pth.display()))?;
    let mut data = String::new();
    f.read_to_string(&mut data)?;
    parse_all(&data, strict).chain_err(|| format!("failed to load {}", pth.display()))
}

fn is_manifest(pth: &Path) -> bool {
    match pth.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext == "yml" || ext == "yaml" || ext == "json",
        None => false,
    }
}

/// Expand a list of files and directories into manifest files
///
/// Directories are walked recursively, following symlinks, and sorted by path.
/// An entry that cannot be read fails the whole expansion.
pub fn manifest_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut res = vec![];
    for p in paths {
        if !p.exists() {
            bail!(ErrorKind::MissingPath(p.display().to_string()));
        }
        if p.is_dir() {
            let mut found = vec![];
            let walker = WalkDir::new(p)
                .follow_links(true)
                .sort_by(|a, b| a.file_name().cmp(b.file_name()));
            for entry in walker {
                let e = entry.chain_err(|| format!("could not read entries under {}", p.display()))?;
                if e.file_type().is_file() && is_manifest(e.path()) {
                    found.push(e.path().to_path_buf());
                }
            }
            debug!("Found {} manifests in {}", found.len(), p.display());
            res.append(&mut found);
        } else {
            res.push(p.clone());
        }
    }
    Ok(res)
}

/// Load every deployment from files and directories
pub fn load_paths(paths: &[PathBuf], strict: bool) -> Result<Loaded> {
    let mut res = Loaded::default();
    for f in manifest_files(paths)? {
        res.extend(load_file(&f, strict)?);
    }
    Ok(res)
}
