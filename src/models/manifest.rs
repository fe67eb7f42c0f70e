use serde::{Deserialize, Serialize};

/// One line of a NeMo diarization manifest (`.jsonl`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub audio_filepath: String,
    /// Always `-`; diarization manifests carry no reference text
    pub text: String,
    pub offset: u64,
    /// Whole seconds, truncated
    pub duration: u64,
    pub num_speakers: usize,
    pub rttm_filepath: String,
}

impl ManifestEntry {
    pub fn new(
        audio_filepath: impl Into<String>,
        rttm_filepath: impl Into<String>,
        duration_secs: f64,
        num_speakers: usize,
    ) -> Self {
        Self {
            audio_filepath: audio_filepath.into(),
            text: "-".to_string(),
            offset: 0,
            duration: duration_secs.trunc() as u64,
            num_speakers,
            rttm_filepath: rttm_filepath.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_entry_json() {
        let entry = ManifestEntry::new("wav/a.wav", "rttm/a.rttm", 12.9, 2);
        assert_eq!(entry.duration, 12);

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"audio_filepath":"wav/a.wav","text":"-","offset":0,"duration":12,"num_speakers":2,"rttm_filepath":"rttm/a.rttm"}"#
        );
    }
}
