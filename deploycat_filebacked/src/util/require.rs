use deploycat_definitions::{ErrorKind, Result};

pub trait Require<T> {
    /// Unwrap a required field, naming its path on failure
    fn require(self, field: &str) -> Result<T>;
}

impl<T> Require<T> for Option<T> {
    fn require(self, field: &str) -> Result<T> {
        match self {
            Some(t) => Ok(t),
            None => bail!(ErrorKind::MissingField(field.to_string())),
        }
    }
}
