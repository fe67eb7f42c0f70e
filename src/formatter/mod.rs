pub mod config;
pub mod patterns;

pub use config::*;

use regex::{NoExpand, Regex};

/// Strips CHAT transcription markup from utterance text.
///
/// Rules run in a fixed order because later ones depend on earlier ones:
/// 1. Remove `xxx` / `yyy`
/// 2. Remove `&+`, `&-`, `&~`, `&=` codes, `+` terminators, `[...]` and `<...>`
/// 3. Shortenings `(...)`
/// 4. Special forms `word@form`
/// 5. Remove `xxx` / `yyy` again, since step 2 can leave new ones behind
/// 6. Collapse whitespace and attach punctuation to the preceding word
/// 7. Replace `_` with a space
/// 8. Final character filter
/// 9. Discard check
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: FormatterConfig,
}

impl Formatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Format a single utterance (speaker code and timestamp already removed).
    ///
    /// Returns `None` when `discard_empty` is set and nothing usable is left.
    pub fn format_line(&self, line: &str) -> Option<String> {
        let config = &self.config;

        let mut line = self.remove_unclear(line.to_string());

        let removals: [(bool, &Regex); 7] = [
            (config.phonological_fragment, patterns::phonological_fragment()),
            (config.fillers, patterns::filler()),
            (config.nonwords, patterns::nonword()),
            (config.simple_events, patterns::simple_event()),
            (config.terminators, patterns::terminator()),
            (config.brackets, patterns::bracket()),
            (config.scopes, patterns::scope()),
        ];
        for (enabled, pattern) in removals {
            if enabled {
                line = pattern.replace_all(&line, "").into_owned();
            }
        }

        line = if config.shortenings {
            patterns::shortening().replace_all(&line, "").into_owned()
        } else {
            line.replace(['(', ')'], "")
        };

        line = if config.special_form {
            patterns::special_form().replace_all(&line, "").into_owned()
        } else {
            restore_special_form_root(&line)
        };

        line = self.remove_unclear(line);

        let line = patterns::whitespace_run().replace_all(&line, " ");
        let line = patterns::space_before_punctuation().replace_all(&line, "$1");

        // Underscores join compounds and named entities
        let mut line = line.trim().replace('_', " ");

        if config.final_filter {
            line = final_filter(&line);
        }

        if config.discard_empty && should_discard(&line) {
            return None;
        }

        Some(line)
    }

    fn remove_unclear(&self, mut line: String) -> String {
        if self.config.unintelligible {
            line = line.replace("xxx", "");
        }
        if self.config.uninterpretable {
            line = line.replace("yyy", "");
        }
        line
    }
}

/// Normalize `text` with a one-off formatter built from `config`
pub fn normalize(text: &str, config: &FormatterConfig) -> Option<String> {
    Formatter::new(*config).format_line(text)
}

/// Every `root@form` is replaced with the root of the first match.
fn restore_special_form_root(line: &str) -> String {
    let pattern = patterns::special_form();
    match pattern.captures(line).and_then(|caps| caps.get(1)) {
        Some(root) => pattern
            .replace_all(line, NoExpand(root.as_str()))
            .into_owned(),
        None => line.to_string(),
    }
}

/// Keep ASCII letters, digits and whitespace, plus a punctuation mark in the
/// very last position.
fn final_filter(line: &str) -> String {
    let last = line.chars().count().saturating_sub(1);
    line.chars()
        .enumerate()
        .filter(|&(i, ch)| {
            ch.is_ascii_alphanumeric()
                || is_ascii_whitespace(ch)
                || (i == last && ch.is_ascii_punctuation())
        })
        .map(|(_, ch)| ch)
        .collect()
}

// Includes vertical tab, unlike char::is_ascii_whitespace
fn is_ascii_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

// A leftover `0` marks an omitted word that no rule removed
fn should_discard(line: &str) -> bool {
    line.chars().count() <= 2 || line.contains('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(line: &str) -> Option<String> {
        Formatter::default().format_line(line)
    }

    #[test]
    fn test_simple_event_removed() {
        assert_eq!(format("&=yells hm .").as_deref(), Some("hm."));
    }

    #[test]
    fn test_repetition_brackets_removed() {
        assert_eq!(
            format("yeah [/] yeah [/] yeah .").as_deref(),
            Some("yeah yeah yeah.")
        );
    }

    #[test]
    fn test_terminator_removed() {
        assert_eq!(format("oh nope +/.").as_deref(), Some("oh nope"));
    }

    #[test]
    fn test_discard_markup_only_utterances() {
        assert_eq!(format("yyy ."), None);
        assert_eq!(format("yyy yyy yyy &=squeals !"), None);
        assert_eq!(format("&=yells &=vocalizes ."), None);
    }

    #[test]
    fn test_replacement_and_underscore() {
        assert_eq!(
            format("yeah we gotta [: have to] sit on the pee_pee pot .").as_deref(),
            Some("yeah we gotta sit on the pee pee pot.")
        );
    }

    #[test]
    fn test_unintelligible_removed() {
        assert_eq!(format("xxx do it .").as_deref(), Some("do it."));
    }

    #[test]
    fn test_phonological_fragment_removed() {
        assert_eq!(format("&+ba back").as_deref(), Some("back"));
    }

    #[test]
    fn test_shortening_kept_without_final_filter() {
        let formatter = Formatter::new(FormatterConfig {
            final_filter: false,
            ..Default::default()
        });
        assert_eq!(formatter.format_line("don('t)").as_deref(), Some("don't"));
    }

    #[test]
    fn test_final_filter_drops_inner_apostrophe() {
        assert_eq!(format("don('t)").as_deref(), Some("dont"));
        assert_eq!(format("what's that ?").as_deref(), Some("whats that?"));
    }

    #[test]
    fn test_shortening_removed_when_enabled() {
        let formatter = Formatter::new(FormatterConfig {
            shortenings: true,
            ..Default::default()
        });
        assert_eq!(
            formatter.format_line("I don('t) know .").as_deref(),
            Some("I don know.")
        );
    }

    #[test]
    fn test_special_form_marker_removed_by_default() {
        assert_eq!(format("dada@c went .").as_deref(), Some("dada went."));
    }

    #[test]
    fn test_special_form_uses_first_root() {
        assert_eq!(
            format("gaga@c and dada@c .").as_deref(),
            Some("gaga and gaga.")
        );
    }

    #[test]
    fn test_special_form_removed_when_enabled() {
        let formatter = Formatter::new(FormatterConfig {
            special_form: true,
            ..Default::default()
        });
        assert_eq!(formatter.format_line("dada@c went .").as_deref(), Some("went."));
    }

    #[test]
    fn test_scopes_and_fillers() {
        assert_eq!(
            format("<I want> [/] I want it .").as_deref(),
            Some("I want it.")
        );
        assert_eq!(format("&-um I think so .").as_deref(), Some("I think so."));
        assert_eq!(format("&~gaga more juice .").as_deref(), Some("more juice."));
    }

    #[test]
    fn test_second_unclear_pass() {
        // Removing the scope joins the two halves into "xxx"
        assert_eq!(format("xx<a>x hello .").as_deref(), Some("hello."));
    }

    #[test]
    fn test_zero_discards() {
        assert_eq!(format("0is that right ."), None);

        let formatter = Formatter::new(FormatterConfig {
            discard_empty: false,
            ..Default::default()
        });
        assert_eq!(
            formatter.format_line("0is that right .").as_deref(),
            Some("0is that right.")
        );
        assert_eq!(formatter.format_line("yyy .").as_deref(), Some("."));
    }

    #[test]
    fn test_disabled_toggles_keep_markup() {
        let formatter = Formatter::new(FormatterConfig {
            brackets: false,
            final_filter: false,
            ..Default::default()
        });
        assert_eq!(
            formatter.format_line("yeah [/] yeah .").as_deref(),
            Some("yeah [/] yeah.")
        );
    }

    #[test]
    fn test_non_ascii_kept_without_final_filter() {
        let config = FormatterConfig {
            final_filter: false,
            ..Default::default()
        };
        assert_eq!(normalize("café au lait .", &config).as_deref(), Some("café au lait."));
        assert_eq!(
            normalize("café au lait .", &FormatterConfig::default()).as_deref(),
            Some("caf au lait.")
        );
    }

    #[test]
    fn test_normalized_text_is_stable() {
        let config = FormatterConfig::default();
        for raw in ["&=yells hm .", "yeah [/] yeah [/] yeah .", "xxx do it .", "oh nope +/."] {
            let once = normalize(raw, &config).unwrap();
            let twice = normalize(&once, &config).unwrap();
            assert_eq!(once, twice);
        }
    }
}
