use std::{env, path::PathBuf, sync::Once};

static START: Once = Once::new();

/// Path to the test manifests, also making sure no stray config is picked up
///
/// The manifests directory provides valid and invalid deployments for verification
pub fn setup() -> PathBuf {
    START.call_once(|| {
        env::remove_var("DEPLOYCAT_CONFIG");
    });
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("manifests")
}

#[allow(dead_code)]
pub fn manifest(name: &str) -> PathBuf {
    setup().join(name)
}
