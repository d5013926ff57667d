//! Deployment options: raw input, defaults, and the resolved configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::metadata::ProjectMetadata;
use crate::template;

const DEFAULT_ARTIFACT_ID: &str = "{{name}}";
const DEFAULT_BUILD_DIR: &str = "dist";
const DEFAULT_FILE_NAME: &str = "{{name}}";
const DEFAULT_PACKAGING: &str = "zip";
const DEFAULT_FILE_ENCODING: &str = "utf-8";

/// A named deploy target within a Maven-style artifact repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository identifier, matched against the `--repository` selection.
    pub id: String,
    /// Upload URL handed to the deploy tool as `-Durl=`.
    pub url: String,
}

/// Caller-supplied options, typically parsed from `distship.toml`.
///
/// Every field is optional; whatever is present overrides the built-in
/// default for that field. String fields may contain `{{key}}` placeholders
/// resolved against the project metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOptions {
    pub artifact_id: Option<String>,
    pub build_dir: Option<String>,
    pub file_name: Option<String>,
    /// Archive extension and Maven packaging classifier.
    #[serde(alias = "type")]
    pub packaging: Option<String>,
    pub file_encoding: Option<String>,
    pub group_id: Option<String>,
    pub version: Option<String>,
    /// Optional artifact-name suffix distinguishing build variants.
    pub postfix: Option<String>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

impl RawOptions {
    /// Read and parse a `distship.toml` from the given path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn from_path(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path).map_err(|e| OptionsError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let options: RawOptions = toml::from_str(&content).map_err(|e| OptionsError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(options)
    }
}

/// Fully resolved deployment configuration.
///
/// Constructed once per invocation by [`Config::resolve`] and immutable
/// thereafter. All string fields have been templated; placeholders whose key
/// is absent from the metadata remain verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub artifact_id: String,
    pub build_dir: String,
    pub file_name: String,
    pub packaging: String,
    pub file_encoding: String,
    pub group_id: Option<String>,
    pub version: Option<String>,
    pub postfix: Option<String>,
    pub repositories: Vec<Repository>,
}

impl Config {
    /// Merge `raw` over the built-in defaults and resolve `{{key}}`
    /// placeholders in every string field against `metadata`.
    ///
    /// `repositories` is not string-valued and passes through untouched.
    pub fn resolve(raw: RawOptions, metadata: &ProjectMetadata) -> Self {
        let expand = |value: String| template::expand(&value, |key| metadata.get(key));

        Self {
            artifact_id: expand(or_default(raw.artifact_id, DEFAULT_ARTIFACT_ID)),
            build_dir: expand(or_default(raw.build_dir, DEFAULT_BUILD_DIR)),
            file_name: expand(or_default(raw.file_name, DEFAULT_FILE_NAME)),
            packaging: expand(or_default(raw.packaging, DEFAULT_PACKAGING)),
            file_encoding: expand(or_default(raw.file_encoding, DEFAULT_FILE_ENCODING)),
            group_id: raw.group_id.map(&expand),
            version: raw.version.map(&expand),
            postfix: raw.postfix.map(&expand),
            repositories: raw.repositories,
        }
    }

    /// The postfix, if configured and non-empty. An empty string counts as
    /// no postfix at all.
    pub fn active_postfix(&self) -> Option<&str> {
        self.postfix.as_deref().filter(|p| !p.is_empty())
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_owned())
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid distship.toml at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    fn metadata(json: &str) -> ProjectMetadata {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        fs::write(&path, json).unwrap();
        ProjectMetadata::from_path(&path).unwrap()
    }

    #[test]
    fn defaults_template_against_package_name() {
        let meta = metadata(r#"{"name": "my-app"}"#);
        let config = Config::resolve(RawOptions::default(), &meta);

        assert_eq!(config.artifact_id, "my-app");
        assert_eq!(config.file_name, "my-app");
        assert_eq!(config.build_dir, "dist");
        assert_eq!(config.packaging, "zip");
        assert_eq!(config.file_encoding, "utf-8");
        assert_eq!(config.group_id, None);
        assert_eq!(config.version, None);
        assert_eq!(config.postfix, None);
        assert!(config.repositories.is_empty());
    }

    #[test]
    fn supplied_fields_override_defaults() {
        let meta = metadata(r#"{"name": "my-app"}"#);
        let raw = RawOptions {
            build_dir: Some("build/output".to_owned()),
            packaging: Some("war".to_owned()),
            ..RawOptions::default()
        };
        let config = Config::resolve(raw, &meta);

        assert_eq!(config.build_dir, "build/output");
        assert_eq!(config.packaging, "war");
        // Untouched fields still carry templated defaults.
        assert_eq!(config.artifact_id, "my-app");
    }

    #[test]
    fn optional_fields_are_templated_too() {
        let meta = metadata(r#"{"name": "my-app", "version": "2.4.0"}"#);
        let raw = RawOptions {
            group_id: Some("com.example.{{name}}".to_owned()),
            version: Some("{{version}}".to_owned()),
            ..RawOptions::default()
        };
        let config = Config::resolve(raw, &meta);

        assert_eq!(config.group_id.as_deref(), Some("com.example.my-app"));
        assert_eq!(config.version.as_deref(), Some("2.4.0"));
    }

    #[test]
    fn unknown_placeholder_stays_verbatim() {
        let meta = metadata(r#"{"name": "foo"}"#);
        let raw = RawOptions {
            file_name: Some("{{name}}-{{missing}}".to_owned()),
            ..RawOptions::default()
        };
        let config = Config::resolve(raw, &meta);
        assert_eq!(config.file_name, "foo-{{missing}}");
    }

    #[test]
    fn repositories_pass_through_untouched() {
        let meta = metadata(r#"{"name": "foo", "id": "boom"}"#);
        let repos = vec![Repository {
            id: "{{id}}".to_owned(),
            url: "https://repo.example.com/{{name}}".to_owned(),
        }];
        let raw = RawOptions {
            repositories: repos.clone(),
            ..RawOptions::default()
        };
        let config = Config::resolve(raw, &meta);
        assert_eq!(config.repositories, repos);
    }

    #[test]
    fn active_postfix_treats_empty_as_absent() {
        let meta = metadata(r#"{"name": "foo"}"#);
        let mut config = Config::resolve(RawOptions::default(), &meta);
        assert_eq!(config.active_postfix(), None);

        config.postfix = Some(String::new());
        assert_eq!(config.active_postfix(), None);

        config.postfix = Some("rc1".to_owned());
        assert_eq!(config.active_postfix(), Some("rc1"));
    }

    #[test]
    fn from_path_parses_full_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("distship.toml");
        fs::write(
            &path,
            r#"
group_id = "com.example"
version = "{{version}}"
type = "zip"
postfix = "web"

[[repositories]]
id = "releases"
url = "https://repo.example.com/releases"

[[repositories]]
id = "snapshots"
url = "https://repo.example.com/snapshots"
"#,
        )
        .unwrap();

        let raw = RawOptions::from_path(&path).unwrap();
        assert_eq!(raw.group_id.as_deref(), Some("com.example"));
        // `type` is accepted as an alias for `packaging`.
        assert_eq!(raw.packaging.as_deref(), Some("zip"));
        assert_eq!(raw.postfix.as_deref(), Some("web"));
        assert_eq!(raw.repositories.len(), 2);
        assert_eq!(raw.repositories.first().unwrap().id, "releases");
    }

    #[test]
    fn from_path_missing_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let result = RawOptions::from_path(&tmp.path().join("distship.toml"));
        assert!(matches!(result, Err(OptionsError::Read { .. })));
    }

    #[test]
    fn from_path_invalid_toml_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("distship.toml");
        fs::write(&path, "repositories = \"not an array\"").unwrap();
        let result = RawOptions::from_path(&path);
        assert!(matches!(result, Err(OptionsError::Parse { .. })));
    }
}
