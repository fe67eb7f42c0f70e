pub mod error;
pub mod formatter;
pub mod io;
pub mod models;
pub mod parser;
pub mod render;

pub use error::{CorpusError, Result};
pub use formatter::{normalize, Formatter, FormatterConfig};
pub use io::{manifest_entry, read_transcript_file, wav_rttm_pairs, write_manifest, Corpus};
pub use models::{ManifestEntry, SpeakerSegment, TimeSegment, Utterance};
pub use parser::{classify_line, LineKind, SpeakerTurn, Transcript};
pub use render::to_rttm;
