/*!
The engines and the executors layered over them: a keyword scanner for the
musts, a DFA prefilter for the wrapped pattern, and a confirming regex, all
driven per buffer to find the first matching line.
*/

pub(crate) mod dfa;
pub(crate) mod fixed;
pub(crate) mod keyword;
pub(crate) mod layered;
#[cfg(feature = "perl")]
pub(crate) mod pcre;
pub(crate) mod regex;

use memchr::{memchr, memrchr};

use crate::{
    engine::{dfa::DfaProgram, keyword::KeywordSet, regex::RegexProgram},
    matcher::config::SearchConfig,
};

/// One compiled alternative: the confirming regex built from the raw
/// translation, the DFA prefilter built from the wrapped one, and the
/// optional keyword set built from the musts.
#[derive(Clone)]
pub(crate) struct Bundle {
    pub regex: RegexProgram,
    pub dfa: DfaProgram,
    pub keywords: Option<KeywordSet>,
    pub backrefs: bool,
}

/// Bounds of the line containing `pos`: just past the previous terminator
/// through just past the next one (or the end of the haystack).
pub(crate) fn line_bounds(haystack: &[u8], pos: usize, line_terminator: u8) -> (usize, usize) {
    let start = memrchr(line_terminator, &haystack[..pos]).map_or(0, |i| i + 1);
    let end = memchr(line_terminator, &haystack[pos..]).map_or(haystack.len(), |i| pos + i + 1);
    (start, end)
}

/// The line content within `start..end`, excluding the trailing terminator
/// when one is present.
pub(crate) fn line_content(haystack: &[u8], start: usize, end: usize, line_terminator: u8) -> &[u8] {
    let limit = if end > start && haystack[end - 1] == line_terminator {
        end - 1
    } else {
        end
    };
    &haystack[start..limit]
}

/// The shared parse configuration: the dialects are byte-oriented, so
/// Unicode modes stay off; only the DFA runs with multi-line anchors.
pub(crate) fn syntax_config(
    config: &SearchConfig,
    multi_line: bool,
) -> regex_automata::util::syntax::Config {
    regex_automata::util::syntax::Config::new()
        .unicode(false)
        .utf8(false)
        .case_insensitive(config.case_insensitive)
        .multi_line(multi_line)
        .line_terminator(config.line_terminator)
}
