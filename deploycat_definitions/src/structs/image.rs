use regex::Regex;
use std::fmt;

use super::Result;

/// A parsed container image reference
///
/// `[registry[:port]/]path[:tag][@digest]`, following the docker reference grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageReference {
    /// Registry host (with port), if the first component looks like one
    pub registry: Option<String>,
    /// Slash separated repository path
    pub repository: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    pub fn parse(image: &str) -> Result<ImageReference> {
        let (rest, digest) = match image.find('@') {
            Some(idx) => (&image[..idx], Some(image[idx + 1..].to_string())),
            None => (image, None),
        };
        // a tag colon must come after the last slash, otherwise it is a registry port
        let last_slash = rest.rfind('/').map(|i| i + 1).unwrap_or(0);
        let (name, tag) = match rest[last_slash..].rfind(':') {
            Some(idx) => {
                let split = last_slash + idx;
                (&rest[..split], Some(rest[split + 1..].to_string()))
            }
            None => (rest, None),
        };

        let (registry, repository) = match name.find('/') {
            Some(idx) if is_registry(&name[..idx]) => (Some(&name[..idx]), &name[idx + 1..]),
            _ => (None, name),
        };
        // hostname labels joined by dots, with an optional port
        let host_re = Regex::new(
            r"^[a-zA-Z\d]([a-zA-Z\d-]*[a-zA-Z\d])?(\.[a-zA-Z\d]([a-zA-Z\d-]*[a-zA-Z\d])?)*(:\d+)?$",
        )?;
        if let Some(r) = registry {
            if !host_re.is_match(r) {
                bail!("The image {} has an invalid registry host {}", image, r);
            }
        }
        // path components are lowercase alphanumerics joined by single separators
        let component_re = Regex::new(r"^[a-z\d]+(([._]|__|-+)[a-z\d]+)*$")?;
        if !repository.split('/').all(|c| component_re.is_match(c)) {
            bail!("The image {} does not match a valid image repository", image);
        }
        if let Some(t) = &tag {
            let tag_re = Regex::new(r"^[[:alnum:]_][[:alnum:]\-_.]{0,127}$")?;
            if !tag_re.is_match(t) {
                bail!("The tag {} is not a valid image tag", t);
            }
        }
        if let Some(d) = &digest {
            let digest_re = Regex::new(r"^[A-Za-z][A-Za-z\d]*([-_+.][A-Za-z][A-Za-z\d]*)*:[[:xdigit:]]{32,}$")?;
            if !digest_re.is_match(d) {
                bail!("The digest {} is not a valid image digest", d);
            }
        }

        Ok(ImageReference {
            registry: registry.map(String::from),
            repository: repository.to_string(),
            tag,
            digest,
        })
    }
}

// docker treats the first component as a host if it has a dot, a port, or is localhost
fn is_registry(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(r) = &self.registry {
            write!(f, "{}/", r)?;
        }
        write!(f, "{}", self.repository)?;
        if let Some(t) = &self.tag {
            write!(f, ":{}", t)?;
        }
        if let Some(d) = &self.digest {
            write!(f, "@{}", d)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ImageReference;

    #[test]
    fn references() {
        let mcr = ImageReference::parse("mcr.microsoft.com/dotnet/framework/samples:aspnetapp").unwrap();
        assert_eq!(mcr.registry, Some("mcr.microsoft.com".into()));
        assert_eq!(mcr.repository, "dotnet/framework/samples");
        assert_eq!(mcr.tag, Some("aspnetapp".into()));
        assert_eq!(mcr.to_string(), "mcr.microsoft.com/dotnet/framework/samples:aspnetapp");

        let plain = ImageReference::parse("nginx").unwrap();
        assert_eq!(plain.registry, None);
        assert_eq!(plain.tag, None);

        let hub = ImageReference::parse("circleci/ruby:2.6").unwrap();
        assert_eq!(hub.registry, None);
        assert_eq!(hub.repository, "circleci/ruby");

        let port = ImageReference::parse("localhost:5000/foo/bar").unwrap();
        assert_eq!(port.registry, Some("localhost:5000".into()));
        assert_eq!(port.tag, None);

        let digest = format!("alpine@sha256:{}", "a".repeat(64));
        let pinned = ImageReference::parse(&digest).unwrap();
        assert!(pinned.digest.unwrap().starts_with("sha256:"));
    }

    #[test]
    fn bad_references() {
        assert!(ImageReference::parse("").is_err());
        assert!(ImageReference::parse("Upper/Case").is_err());
        assert!(ImageReference::parse("alpine:").is_err());
        assert!(ImageReference::parse("alpine:-dash").is_err());
        assert!(ImageReference::parse("alpine@sha256:short").is_err());
        assert!(ImageReference::parse("foo bar").is_err());
        assert!(ImageReference::parse("my registry/app").is_err());
        assert!(ImageReference::parse("Upper/case").is_err());
        assert!(ImageReference::parse("-/-").is_err());
        assert!(ImageReference::parse("!!!/app").is_err());
        assert!(ImageReference::parse(".").is_err());
        assert!(ImageReference::parse("app/").is_err());
        assert!(ImageReference::parse("app/-web").is_err());
        assert!(ImageReference::parse("bad_host.io:port/app").is_err());
        assert!(ImageReference::parse("registry.example.com-/app").is_err());
    }

    #[test]
    fn separators() {
        assert!(ImageReference::parse("a__b").is_ok());
        assert!(ImageReference::parse("a.b_c").is_ok());
        assert!(ImageReference::parse("team/d--e.f").is_ok());
        assert!(ImageReference::parse("a___b").is_err());
        assert!(ImageReference::parse("a..b").is_err());
        let host = ImageReference::parse("Registry.Example.com:443/team/app").unwrap();
        assert_eq!(host.registry, Some("Registry.Example.com:443".into()));
        assert_eq!(host.repository, "team/app");
    }
}
