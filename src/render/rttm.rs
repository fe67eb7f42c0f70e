use tracing::warn;

use crate::models::SpeakerSegment;

/// Placeholder for RTTM columns that carry no value
const NA: &str = "<NA>";

/// Render segments as RTTM, one `SPEAKER` record per segment.
///
/// Records follow input order with no sorting, merging or overlap checks:
/// `SPEAKER <uri> 1 <start> <duration> <NA> <NA> <speaker> <NA> <NA>`
pub fn to_rttm(uri: &str, segments: &[SpeakerSegment]) -> String {
    let uri = rttm_field(uri, "uri");
    let mut output = String::new();

    for s in segments {
        let speaker = rttm_field(&s.speaker, "speaker");
        output.push_str(&format!(
            "SPEAKER {} 1 {:.3} {:.3} {NA} {NA} {} {NA} {NA}\n",
            uri,
            s.segment.start,
            s.segment.duration(),
            speaker
        ));
    }

    output
}

/// RTTM is whitespace separated, so spaces inside a field become `_`
fn rttm_field(value: &str, field: &str) -> String {
    if value.is_empty() {
        return NA.to_string();
    }
    if value.contains(' ') {
        warn!("RTTM {} {:?} contains spaces, replacing with underscores", field, value);
        return value.replace(' ', "_");
    }
    value.to_string()
}
