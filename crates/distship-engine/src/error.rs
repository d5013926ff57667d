//! Error types for distship-engine.

/// Errors produced by packaging and deployment.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A filesystem operation failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A utility operation failed.
    #[error("{0}")]
    Util(#[from] distship_util::error::UtilError),

    /// The project metadata could not be read.
    #[error("{0}")]
    Metadata(#[from] distship_config::metadata::MetadataError),

    /// Deploy was requested without any configured repository.
    #[error("at least one repository must be configured to deploy")]
    NoRepositories,

    /// A configuration field required by this operation is unset.
    #[error("configuration field `{field}` is required but not set")]
    MissingField { field: &'static str },

    /// The configured text encoding is not supported.
    #[error("unsupported file encoding \"{encoding}\" — expected utf-8, ascii, or latin1")]
    UnsupportedEncoding { encoding: String },

    /// Writing an entry into the archive container failed.
    #[error("cannot write archive {path}: {message}")]
    Archive { path: String, message: String },

    /// The external deploy tool exited with a failure.
    #[error("mvn deploy:deploy-file failed:\n{stderr}")]
    MavenFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
}
