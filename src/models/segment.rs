use serde::{Deserialize, Serialize};

/// A time range in seconds.
///
/// `start <= end` is expected but not checked; transcripts are taken as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSegment {
    pub start: f64,
    pub end: f64,
}

impl TimeSegment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build from the millisecond pair embedded in a CHAT line
    pub fn from_millis(start_ms: f64, end_ms: f64) -> Self {
        Self {
            start: start_ms / 1_000.0,
            end: end_ms / 1_000.0,
        }
    }

    /// Length of the segment in seconds (negative if the bounds are swapped)
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A segment attributed to a speaker, in the order it was read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    pub segment: TimeSegment,
    pub speaker: String,
}

/// One timestamped speaker turn after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Speaker code, e.g. `CHI` or `MOT`
    pub speaker: String,
    pub segment: TimeSegment,
    /// Normalized text, `None` when the formatter discarded it
    pub text: Option<String>,
}

impl Utterance {
    pub fn is_discarded(&self) -> bool {
        self.text.is_none()
    }
}
