use regex::Regex;
use std::sync::OnceLock;

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        pub fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| {
                Regex::new($pattern)
                    .expect(concat!("Failed to compile ", stringify!($name), " regex"))
            })
        }
    };
}

// `[A-Za-z0-9:]+` is the word root shared by `&` codes and special forms
static_regex!(phonological_fragment, r"&\+[A-Za-z0-9:]+");
static_regex!(filler, r"&-[A-Za-z0-9:]+");
static_regex!(nonword, r"&~[A-Za-z0-9:]+");
static_regex!(simple_event, r"&=[A-Za-z0-9:]+");
static_regex!(terminator, r"\+[^\s\\]+");
static_regex!(bracket, r"\[.*?\]");
static_regex!(scope, r"<.*?>");
static_regex!(shortening, r"\(.*?\)");
static_regex!(special_form, r"([A-Za-z0-9:]+)@[a-z:]+");

static_regex!(whitespace_run, r"\s+");
static_regex!(space_before_punctuation, r"\s+([.,!?;:])");
