use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{CorpusError, Result};
use crate::formatter::Formatter;
use crate::models::ManifestEntry;
use crate::parser::Transcript;

use super::input::{find_files, read_transcript_file, with_appended_extension, CHA_EXTENSION};
use super::manifest::{manifest_entry, write_manifest};

/// A directory of CHAT transcripts.
///
/// Each transcript is keyed by its path relative to the corpus root with the
/// extension dropped, so `Eng/Brown/Adam/010203.cha` becomes
/// `Eng/Brown/Adam/010203`. The same key locates its `.rttm` and `.wav`.
#[derive(Debug, Clone)]
pub struct Corpus {
    transcripts: BTreeMap<PathBuf, Transcript>,
}

impl Corpus {
    pub fn new(transcripts: BTreeMap<PathBuf, Transcript>) -> Result<Self> {
        if transcripts.is_empty() {
            return Err(CorpusError::EmptyCorpus(PathBuf::new()));
        }
        Ok(Self { transcripts })
    }

    /// Load every `.cha` file below `cha_dir`
    pub fn from_dir(cha_dir: &Path, formatter: Formatter) -> Result<Self> {
        let mut transcripts = BTreeMap::new();

        for path in find_files(cha_dir, CHA_EXTENSION)? {
            let key = path
                .strip_prefix(cha_dir)
                .unwrap_or(&path)
                .with_extension("");
            let transcript = read_transcript_file(&path, formatter.clone())?;
            transcripts.insert(key, transcript);
        }

        if transcripts.is_empty() {
            return Err(CorpusError::EmptyCorpus(cha_dir.to_path_buf()));
        }

        info!("Loaded {} transcripts from {:?}", transcripts.len(), cha_dir);
        Ok(Self { transcripts })
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    pub fn get(&self, key: &Path) -> Option<&Transcript> {
        self.transcripts.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Transcript)> {
        self.transcripts.iter()
    }

    /// Write `<rttm_dir>/<key>.rttm` for every transcript
    pub fn save_rttms(&self, rttm_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.transcripts.len());

        for (key, transcript) in &self.transcripts {
            let path = with_appended_extension(&rttm_dir.join(key), "rttm");
            let write_err = |source| CorpusError::Write {
                path: path.clone(),
                source,
            };

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
            std::fs::write(&path, transcript.to_rttm()).map_err(write_err)?;
            written.push(path);
        }

        info!("Wrote {} RTTM files to {:?}", written.len(), rttm_dir);
        Ok(written)
    }

    /// One manifest entry per transcript whose wav and rttm both exist.
    ///
    /// With `skip`, transcripts missing either file are left out; otherwise
    /// the first missing file is returned as an error.
    pub fn to_manifest(&self, rttm_dir: &Path, wav_dir: &Path, skip: bool) -> Result<Vec<ManifestEntry>> {
        let mut entries = Vec::with_capacity(self.transcripts.len());

        for (key, transcript) in &self.transcripts {
            let audio = with_appended_extension(&wav_dir.join(key), "wav");
            let rttm = with_appended_extension(&rttm_dir.join(key), "rttm");

            match manifest_entry(transcript, &audio, &rttm, true) {
                Ok(entry) => entries.push(entry),
                Err(e) if skip && e.is_missing_file() => {
                    warn!("Skipping {:?}: {}", key, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(entries)
    }

    /// Build the manifest and write it as JSON lines.
    ///
    /// Run after [`Corpus::save_rttms`] with the same `rttm_dir`.
    pub fn save_manifest(&self, manifest_path: &Path, rttm_dir: &Path, wav_dir: &Path, skip: bool) -> Result<usize> {
        if manifest_path.extension().is_none_or(|ext| ext != "jsonl") {
            return Err(CorpusError::InvalidManifestPath(manifest_path.to_path_buf()));
        }

        let entries = self.to_manifest(rttm_dir, wav_dir, skip)?;
        write_manifest(manifest_path, &entries)?;

        info!(
            "Wrote {} of {} manifest entries to {:?}",
            entries.len(),
            self.transcripts.len(),
            manifest_path
        );
        Ok(entries.len())
    }
}
