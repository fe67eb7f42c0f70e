use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CorpusError, Result};
use crate::formatter::Formatter;
use crate::parser::Transcript;

pub const CHA_EXTENSION: &str = "cha";

/// Read and parse a `.cha` file.
///
/// The transcript is named after the file with its `.cha` suffix removed,
/// which is also the id written into its RTTM records.
pub fn read_transcript_file(path: &Path, formatter: Formatter) -> Result<Transcript> {
    let content = std::fs::read_to_string(path).map_err(|source| CorpusError::ReadTranscript {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Transcript::new(transcript_name(path), &content, formatter))
}

/// File name without a trailing `.cha`
pub fn transcript_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(".cha") {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

/// All files under `root` with the given extension, sorted by path
pub fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| CorpusError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(extension)) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `path` with `.extension` appended, keeping any dots already in the name
pub fn with_appended_extension(path: &Path, extension: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".");
    os.push(extension);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_transcript_name() {
        assert_eq!(transcript_name(Path::new("corpus/Eng/010203.cha")), "010203");
        assert_eq!(transcript_name(Path::new("notes.txt")), "notes.txt");
    }

    #[test]
    fn test_read_transcript_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("020304.cha");
        std::fs::write(&path, "*MOT:\tlook at that . \u{15}0_1500\u{15}\n").unwrap();

        let transcript = read_transcript_file(&path, Formatter::default()).unwrap();
        assert_eq!(transcript.name, "020304");
        assert_eq!(transcript.utterances[0].text.as_deref(), Some("look at that."));
        assert!(transcript.to_rttm().starts_with("SPEAKER 020304 1 0.000 1.500"));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_transcript_file(Path::new("/definitely/not/here.cha"), Formatter::default());
        assert!(matches!(result, Err(CorpusError::ReadTranscript { .. })));
    }

    #[test]
    fn test_find_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("b/c")).unwrap();
        std::fs::write(dir.path().join("b/c/z.cha"), "").unwrap();
        std::fs::write(dir.path().join("a.cha"), "").unwrap();
        std::fs::write(dir.path().join("b/readme.txt"), "").unwrap();

        let files = find_files(dir.path(), CHA_EXTENSION).unwrap();
        let relative: Vec<PathBuf> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(relative, vec![PathBuf::from("a.cha"), PathBuf::from("b/c/z.cha")]);
    }

    #[test]
    fn test_with_appended_extension() {
        assert_eq!(
            with_appended_extension(Path::new("out/a.b"), "rttm"),
            PathBuf::from("out/a.b.rttm")
        );
    }
}
