use std::io::Write;
use std::path::Path;

use crate::error::{CorpusError, Result};
use crate::models::ManifestEntry;
use crate::parser::Transcript;

/// Build the manifest line for one transcript.
///
/// With `should_exist`, both companion files must be on disk; the audio
/// file is checked first.
pub fn manifest_entry(
    transcript: &Transcript,
    audio_filepath: &Path,
    rttm_filepath: &Path,
    should_exist: bool,
) -> Result<ManifestEntry> {
    if should_exist {
        if !audio_filepath.exists() {
            return Err(CorpusError::MissingAudio(audio_filepath.to_path_buf()));
        }
        if !rttm_filepath.exists() {
            return Err(CorpusError::MissingRttm(rttm_filepath.to_path_buf()));
        }
    }

    Ok(ManifestEntry::new(
        audio_filepath.display().to_string(),
        rttm_filepath.display().to_string(),
        transcript.duration,
        transcript.num_speakers(),
    ))
}

/// Write entries as JSON lines, creating the parent directory
pub fn write_manifest(path: &Path, entries: &[ManifestEntry]) -> Result<()> {
    if path.extension().is_none_or(|ext| ext != "jsonl") {
        return Err(CorpusError::InvalidManifestPath(path.to_path_buf()));
    }

    let write_err = |source| CorpusError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path).map_err(write_err)?);
    for entry in entries {
        serde_json::to_writer(&mut file, entry)?;
        file.write_all(b"\n").map_err(write_err)?;
    }
    file.flush().map_err(write_err)?;
    Ok(())
}
