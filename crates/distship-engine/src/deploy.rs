//! Deploy orchestration: deterministic naming, mvn argument construction,
//! and the package/deploy entry points.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use distship_config::{Config, ProjectMetadata, RawOptions};
use distship_util::process::{render_command, run_command};

use crate::archive;
use crate::error::EngineError;

/// Result of a successful deploy.
#[derive(Debug)]
pub struct DeployResult {
    /// Path of the archive that was uploaded.
    pub archive_path: PathBuf,
    /// Standard output of the deploy tool.
    pub stdout: String,
    /// How long packaging plus upload took.
    pub duration: Duration,
}

/// The deterministic archive path, relative to the project root:
/// `build_dir/file_name[_postfix]-version[-SNAPSHOT].packaging`.
///
/// This same path is both the archive's write location and the `-Dfile=`
/// argument handed to the deploy tool.
///
/// # Errors
/// Returns [`EngineError::MissingField`] when no version is configured.
pub fn dest_path(config: &Config, is_snapshot: bool) -> Result<PathBuf, EngineError> {
    let version = config
        .version
        .as_deref()
        .ok_or(EngineError::MissingField { field: "version" })?;

    let mut name = config.file_name.clone();
    if let Some(postfix) = config.active_postfix() {
        name.push('_');
        name.push_str(postfix);
    }
    name.push('-');
    name.push_str(version);
    if is_snapshot {
        name.push_str("-SNAPSHOT");
    }
    name.push('.');
    name.push_str(&config.packaging);

    Ok(Path::new(&config.build_dir).join(name))
}

/// Build the ordered `-D<key>=<value>` argument list for
/// `mvn deploy:deploy-file`.
///
/// Always contains packaging, groupId, artifactId, and version, followed by
/// repositoryId/url when `repository_id` names a configured repository, and
/// finally the archive file path. With duplicate repository ids the last
/// match wins; an id that matches nothing adds no repository tokens at all.
///
/// # Errors
/// Returns [`EngineError::MissingField`] when group id or version is not
/// configured.
pub fn build_deploy_args(
    config: &Config,
    repository_id: Option<&str>,
    is_snapshot: bool,
) -> Result<Vec<String>, EngineError> {
    let group_id = config
        .group_id
        .as_deref()
        .ok_or(EngineError::MissingField { field: "group_id" })?;
    let version = config
        .version
        .as_deref()
        .ok_or(EngineError::MissingField { field: "version" })?;

    let mut args: Vec<(&'static str, String)> = vec![
        ("packaging", config.packaging.clone()),
        ("groupId", group_id.to_owned()),
        ("artifactId", config.artifact_id.clone()),
        ("version", version.to_owned()),
    ];

    if let Some(id) = repository_id.filter(|id| !id.is_empty()) {
        for repo in config.repositories.iter().filter(|r| r.id == id) {
            set_arg(&mut args, "repositoryId", repo.id.clone());
            set_arg(&mut args, "url", repo.url.clone());
        }
    }

    // The postfix concatenates onto the already-templated artifact id.
    if let Some(postfix) = config.active_postfix() {
        if let Some(entry) = args.iter_mut().find(|(key, _)| *key == "artifactId") {
            entry.1.push('_');
            entry.1.push_str(postfix);
        }
    }

    if is_snapshot {
        if let Some(entry) = args.iter_mut().find(|(key, _)| *key == "version") {
            entry.1.push_str("-SNAPSHOT");
        }
    }

    args.push(("file", dest_path(config, is_snapshot)?.display().to_string()));

    Ok(args
        .into_iter()
        .map(|(key, value)| format!("-D{key}={value}"))
        .collect())
}

fn set_arg(args: &mut Vec<(&'static str, String)>, key: &'static str, value: String) {
    if let Some(entry) = args.iter_mut().find(|(k, _)| *k == key) {
        entry.1 = value;
    } else {
        args.push((key, value));
    }
}

/// Package the build directory into its archive without deploying.
///
/// # Errors
/// Returns an error if archive assembly fails; see [`archive::assemble`].
pub fn package(
    project_root: &Path,
    config: &Config,
    is_snapshot: bool,
) -> Result<PathBuf, EngineError> {
    archive::assemble(project_root, config, is_snapshot)
}

/// Run the full deploy pipeline.
///
/// Steps:
/// 1. Resolve options against `package.json`
/// 2. Require at least one configured repository (before any archive I/O)
/// 3. Assemble the archive at its deterministic destination
/// 4. Build the `deploy:deploy-file` argument list
/// 5. Echo the command line, then invoke `mvn -B deploy:deploy-file`
///
/// Single attempt, no retry, no timeout. Success resolves to the tool's
/// standard output; a non-zero exit or spawn failure is an error carrying
/// the tool's diagnostics.
///
/// # Errors
/// Returns an error if any step fails (metadata read, missing repositories
/// or fields, archive assembly, or the mvn invocation itself).
pub fn deploy(
    project_root: &Path,
    repository_id: Option<&str>,
    is_snapshot: bool,
    raw: RawOptions,
) -> Result<DeployResult, EngineError> {
    let start = Instant::now();

    // 1. Resolve options against project metadata.
    let metadata = ProjectMetadata::from_path(&project_root.join("package.json"))?;
    let config = Config::resolve(raw, &metadata);

    // 2. A deploy needs somewhere to deploy to.
    if config.repositories.is_empty() {
        return Err(EngineError::NoRepositories);
    }

    // 3. Assemble the archive.
    let archive_path = archive::assemble(project_root, &config, is_snapshot)?;

    // 4. Build the argument list.
    let args = build_deploy_args(&config, repository_id, is_snapshot)?;

    // 5. Invoke mvn from the project root, so the relative file path resolves.
    let mut cmd = Command::new("mvn");
    cmd.arg("-B")
        .arg("deploy:deploy-file")
        .args(&args)
        .current_dir(project_root);
    eprintln!("     Running `{}`", render_command(&cmd));

    let output = run_command(&mut cmd)?;
    if !output.success {
        return Err(EngineError::MavenFailed {
            exit_code: output.exit_code,
            stderr: output.stderr,
        });
    }

    Ok(DeployResult {
        archive_path,
        stdout: output.stdout,
        duration: start.elapsed(),
    })
}
