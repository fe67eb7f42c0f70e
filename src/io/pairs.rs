use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{CorpusError, Result};

use super::input::find_files;

/// Match `.wav` files to `.rttm` files laid out in the same tree.
///
/// `{wav_dir}/A/B.wav` pairs with `{rttm_dir}/A/B.rttm` but not with
/// `{rttm_dir}/B.rttm`. Pairs come back sorted by wav path.
pub fn wav_rttm_pairs(wav_dir: &Path, rttm_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    for dir in [wav_dir, rttm_dir] {
        if !dir.exists() {
            return Err(CorpusError::MissingDirectory(dir.to_path_buf()));
        }
    }

    let rttm_files: BTreeSet<PathBuf> = find_files(rttm_dir, "rttm")?.into_iter().collect();

    let pairs = find_files(wav_dir, "wav")?
        .into_iter()
        .filter_map(|wav| {
            let relative = wav.strip_prefix(wav_dir).ok()?;
            let rttm = rttm_dir.join(relative).with_extension("rttm");
            rttm_files.contains(&rttm).then_some((wav, rttm))
        })
        .collect();

    Ok(pairs)
}
