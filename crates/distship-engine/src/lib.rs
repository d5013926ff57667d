//! Archive assembly and deploy orchestration for distship.

pub mod archive;
pub mod deploy;
pub mod error;

pub use archive::{assemble, ContentClassifier, InspectClassifier};
pub use deploy::{build_deploy_args, deploy, dest_path, package, DeployResult};
pub use error::EngineError;
