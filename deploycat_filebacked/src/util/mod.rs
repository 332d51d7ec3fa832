mod build;
mod require;

pub use build::Build;
pub use require::Require;
