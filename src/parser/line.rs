use regex::Regex;
use std::sync::OnceLock;

use crate::models::TimeSegment;

/// Delimiter wrapped around the `<start>_<end>` media bullet
pub const TIMESTAMP_BRACE: char = '\u{15}';

pub const PARTICIPANTS_HEADER: &str = "@Participants:";

fn speaker_regex() -> &'static Regex {
    static SPEAKER_REGEX: OnceLock<Regex> = OnceLock::new();
    SPEAKER_REGEX.get_or_init(|| Regex::new(r"^\*[A-Z]+:").expect("Failed to compile speaker regex"))
}

fn timestamp_regex() -> &'static Regex {
    static TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_REGEX.get_or_init(|| {
        Regex::new(r"\x15([0-9]+)_([0-9]+)\x15").expect("Failed to compile timestamp regex")
    })
}

/// Classification of one raw CHAT line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    /// `@Participants:` header, with the marker stripped and trimmed
    Participants(&'a str),
    /// `*SPK:\t...` main tier line
    SpeakerTurn(SpeakerTurn<'a>),
    /// Anything else: other headers, dependent tiers, blank lines
    Unrecognized,
}

/// A speaker tier line split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerTurn<'a> {
    pub speaker: &'a str,
    /// Utterance text with every timestamp bullet removed, not yet formatted
    pub utterance: String,
    /// First timestamp bullet on the line, if any
    pub segment: Option<TimeSegment>,
}

/// Classify a line without touching any transcript state
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix(PARTICIPANTS_HEADER) {
        return LineKind::Participants(rest.trim());
    }

    if !speaker_regex().is_match(line) {
        return LineKind::Unrecognized;
    }

    let mut fields = line.split('\t');
    let speaker = fields.next().map(speaker_code).unwrap_or_default();

    // `*SPK:` with no tab carries no utterance field
    let Some(text) = fields.next() else {
        return LineKind::SpeakerTurn(SpeakerTurn {
            speaker,
            utterance: String::new(),
            segment: None,
        });
    };

    LineKind::SpeakerTurn(SpeakerTurn {
        speaker,
        utterance: timestamp_regex().replace_all(text, "").into_owned(),
        segment: parse_timestamp(text),
    })
}

/// Drop the leading `*` and the trailing character (normally `:`)
fn speaker_code(field: &str) -> &str {
    let inner = field.strip_prefix('*').unwrap_or(field);
    match inner.char_indices().last() {
        Some((last, _)) => &inner[..last],
        None => inner,
    }
}

fn parse_timestamp(text: &str) -> Option<TimeSegment> {
    let caps = timestamp_regex().captures(text)?;
    let start_ms: f64 = caps[1].parse().ok()?;
    let end_ms: f64 = caps[2].parse().ok()?;
    Some(TimeSegment::from_millis(start_ms, end_ms))
}
