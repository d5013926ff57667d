//! Archive assembly: walk the build directory and write one DEFLATE zip.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use content_inspector::ContentType;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use distship_config::Config;
use distship_util::fs::collect_files;

use crate::deploy::dest_path;
use crate::error::EngineError;

/// How many leading bytes to hand to the classifier.
const SNIFF_LEN: usize = 8192;

/// Decides whether a file's content is binary.
///
/// Binary files go into the archive as raw bytes; everything else is read
/// as text in the configured encoding. The decision is made from content
/// alone, never from the file extension.
pub trait ContentClassifier {
    /// `true` when `buffer` (a prefix of the file) looks like binary data.
    fn is_binary(&self, buffer: &[u8]) -> bool;
}

/// Default classifier backed by byte-content inspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct InspectClassifier;

impl ContentClassifier for InspectClassifier {
    fn is_binary(&self, buffer: &[u8]) -> bool {
        content_inspector::inspect(buffer) == ContentType::BINARY
    }
}

/// Assemble the build directory into a zip archive at the deterministic
/// destination path, using the default content classifier.
///
/// # Errors
/// Returns an error if the build directory cannot be walked, any file cannot
/// be read, the configured encoding is unsupported, or the destination
/// cannot be written. Fail-fast: a partial archive is not cleaned up.
pub fn assemble(
    project_root: &Path,
    config: &Config,
    is_snapshot: bool,
) -> Result<PathBuf, EngineError> {
    assemble_with(project_root, config, is_snapshot, &InspectClassifier)
}

/// [`assemble`] with an explicit content classifier.
///
/// # Errors
/// See [`assemble`].
pub fn assemble_with(
    project_root: &Path,
    config: &Config,
    is_snapshot: bool,
    classifier: &dyn ContentClassifier,
) -> Result<PathBuf, EngineError> {
    let build_dir = project_root.join(&config.build_dir);

    // Collect before creating the destination, so the archive never
    // includes itself even though it lands inside the build directory.
    let files = collect_files(&build_dir)?;

    let dest = project_root.join(dest_path(config, is_snapshot)?);
    let file = File::create(&dest).map_err(|source| EngineError::Io {
        path: dest.display().to_string(),
        source,
    })?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        let data = std::fs::read(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let probe = data.get(..SNIFF_LEN.min(data.len())).unwrap_or(&data);
        let bytes = if classifier.is_binary(probe) {
            data
        } else {
            decode_text(&data, &config.file_encoding)?
        };

        writer
            .start_file(entry_name(&build_dir, path)?, options)
            .map_err(|e| EngineError::Archive {
                path: dest.display().to_string(),
                message: e.to_string(),
            })?;
        writer.write_all(&bytes).map_err(|source| EngineError::Io {
            path: dest.display().to_string(),
            source,
        })?;
    }

    writer.finish().map_err(|e| EngineError::Archive {
        path: dest.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(dest)
}

/// The `/`-separated archive entry name for `path`, relative to `base`.
fn entry_name(base: &Path, path: &Path) -> Result<String, EngineError> {
    let Ok(rel) = path.strip_prefix(base) else {
        return Err(EngineError::Io {
            path: path.display().to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file is outside the build directory",
            ),
        });
    };
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Decode text-file bytes in the configured encoding, re-encoded as UTF-8.
///
/// utf-8 input is decoded lossily, mirroring a text-mode read; latin1 is
/// transcoded byte-for-byte.
fn decode_text(bytes: &[u8], encoding: &str) -> Result<Vec<u8>, EngineError> {
    match encoding.trim().to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" | "us-ascii" => {
            Ok(String::from_utf8_lossy(bytes).into_owned().into_bytes())
        }
        "latin1" | "latin-1" | "iso-8859-1" => {
            Ok(bytes.iter().map(|&b| char::from(b)).collect::<String>().into_bytes())
        }
        _ => Err(EngineError::UnsupportedEncoding {
            encoding: encoding.to_owned(),
        }),
    }
}
