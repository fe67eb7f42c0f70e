use std::collections::BTreeSet;

use tracing::debug;

use crate::formatter::Formatter;
use crate::models::{SpeakerSegment, Utterance};
use crate::render::to_rttm;

use super::line::{classify_line, LineKind, SpeakerTurn};

/// A CHAT transcript reduced to timestamped speaker turns.
///
/// Built in one pass over the raw text. Only speaker lines carrying a
/// timestamp bullet contribute speakers, segments and utterances; every
/// other line is skipped silently.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Identifier used as the RTTM file id
    pub name: String,
    /// Distinct speaker codes with at least one timestamped turn
    pub speakers: BTreeSet<String>,
    /// Turns in line order, text already normalized
    pub utterances: Vec<Utterance>,
    /// Largest segment end in seconds, 0 when there are none
    pub duration: f64,
    segments: Vec<SpeakerSegment>,
    formatter: Formatter,
}

impl Transcript {
    /// Parse a whole transcript
    pub fn new(name: impl Into<String>, raw_transcription: &str, formatter: Formatter) -> Self {
        let mut transcript = Self::empty(name, formatter);
        for line in raw_transcription.split('\n') {
            transcript.parse_line(line);
        }
        transcript
    }

    /// A transcript with no lines yet
    pub fn empty(name: impl Into<String>, formatter: Formatter) -> Self {
        Self {
            name: name.into(),
            speakers: BTreeSet::new(),
            utterances: Vec::new(),
            duration: 0.0,
            segments: Vec::new(),
            formatter,
        }
    }

    /// Feed one line. Lines are expected in file order.
    pub fn parse_line(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::SpeakerTurn(turn) => self.add_turn(turn),
            // Participants are not registered until a timestamped turn shows up
            LineKind::Participants(_) | LineKind::Unrecognized => {}
        }
    }

    fn add_turn(&mut self, turn: SpeakerTurn<'_>) {
        let Some(segment) = turn.segment else {
            debug!("Skipping *{}: line without timestamp", turn.speaker);
            return;
        };

        let speaker = turn.speaker.to_string();
        self.speakers.insert(speaker.clone());
        self.segments.push(SpeakerSegment {
            segment,
            speaker: speaker.clone(),
        });

        let text = self.formatter.format_line(&turn.utterance);
        self.utterances.push(Utterance {
            speaker,
            segment,
            text,
        });

        self.duration = self.duration.max(segment.end);
    }

    /// Segments in the order they were read
    pub fn segments(&self) -> &[SpeakerSegment] {
        &self.segments
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn num_speakers(&self) -> usize {
        self.speakers.len()
    }

    /// Utterances the formatter kept, with their text
    pub fn kept_utterances(&self) -> impl Iterator<Item = (&Utterance, &str)> {
        self.utterances
            .iter()
            .filter_map(|u| u.text.as_deref().map(|text| (u, text)))
    }

    /// RTTM text for all segments, one record per line
    pub fn to_rttm(&self) -> String {
        to_rttm(&self.name, &self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::FormatterConfig;
    use crate::models::TimeSegment;

    const SAMPLE: &str = "@UTF8\n\
@Begin\n\
@Participants:\tCHI Target_Child, MOT Mother\n\
*CHI:\thi \u{15}1000_2500\u{15}\n\
%mor:\tco|hi .\n\
*MOT:\thello sweetie [!] . \u{15}2600_4100\u{15}\n\
*CHI:\tyyy . \u{15}4200_4800\u{15}\n\
*MOT:\tno timestamp here .\n\
@End";

    #[test]
    fn test_single_speaker_turn() {
        let transcript = Transcript::new("t", "*CHI:\thi \u{15}1000_2500\u{15}", Formatter::default());

        assert_eq!(transcript.segments().len(), 1);
        assert_eq!(transcript.segments()[0].segment, TimeSegment::new(1.0, 2.5));
        assert_eq!(transcript.segments()[0].speaker, "CHI");
        assert!(transcript.speakers.contains("CHI"));
        assert_eq!(transcript.duration, 2.5);
    }

    #[test]
    fn test_line_without_timestamp_changes_nothing() {
        let mut transcript = Transcript::new("t", "*CHI:\thi \u{15}1000_2500\u{15}", Formatter::default());
        transcript.parse_line("*MOT:\tno bullet here .");

        assert_eq!(transcript.segments().len(), 1);
        assert_eq!(transcript.utterances.len(), 1);
        assert!(!transcript.speakers.contains("MOT"));
        assert_eq!(transcript.duration, 2.5);
    }

    #[test]
    fn test_sample_transcript() {
        let transcript = Transcript::new("sample", SAMPLE, Formatter::default());

        assert_eq!(transcript.num_speakers(), 2);
        assert_eq!(transcript.utterances.len(), 3);
        assert_eq!(transcript.duration, 4.8);

        let texts: Vec<Option<&str>> = transcript
            .utterances
            .iter()
            .map(|u| u.text.as_deref())
            .collect();
        // "hi" is too short to keep and "yyy ." is empty after stripping
        assert_eq!(texts, vec![None, Some("hello sweetie."), None]);

        let speakers: Vec<&str> = transcript
            .segments()
            .iter()
            .map(|s| s.speaker.as_str())
            .collect();
        assert_eq!(speakers, vec!["CHI", "MOT", "CHI"]);
    }

    #[test]
    fn test_duration_is_max_end() {
        let raw = "*CHI:\ta b c \u{15}5000_9000\u{15}\n*MOT:\td e f \u{15}1000_2000\u{15}";
        let transcript = Transcript::new("t", raw, Formatter::default());
        assert_eq!(transcript.duration, 9.0);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new("t", "@Begin\n@End\n", Formatter::default());
        assert_eq!(transcript.duration, 0.0);
        assert!(transcript.speakers.is_empty());
        assert!(transcript.segments().is_empty());
        assert_eq!(transcript.to_rttm(), "");
    }

    #[test]
    fn test_duplicate_segments_are_kept() {
        let raw = "*CHI:\tone two \u{15}0_1000\u{15}\n*MOT:\tthree four \u{15}0_1000\u{15}";
        let transcript = Transcript::new("t", raw, Formatter::default());
        assert_eq!(transcript.segments().len(), 2);
    }

    #[test]
    fn test_uses_configured_formatter() {
        let formatter = Formatter::new(FormatterConfig {
            discard_empty: false,
            ..Default::default()
        });
        let transcript = Transcript::new("t", "*CHI:\thi \u{15}1000_2500\u{15}", formatter);
        assert_eq!(transcript.utterances[0].text.as_deref(), Some("hi"));
        assert_eq!(transcript.kept_utterances().count(), 1);
    }
}
