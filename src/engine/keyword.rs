/*!
The keyword-set engine: an Aho-Corasick automaton over the musts of an
alternative, or over the pattern lines themselves in fixed-strings mode.
*/

use aho_corasick::{AhoCorasick, MatchKind};

use crate::{error::Error, syntax::literal::Must};

/// Exact musts are inserted before probable ones, so a hit with
/// `index < exact_count()` is a confirmed match that needs no DFA or regex
/// confirmation.
#[derive(Clone)]
pub(crate) struct KeywordSet {
    ac: AhoCorasick,
    exact: usize,
}

pub(crate) struct KeywordMatch {
    /// Absolute start offset in the searched haystack.
    pub start: usize,
    pub len: usize,
    /// Index of the matched keyword; ties at one position resolve to the
    /// earliest-inserted keyword, i.e. exact ones first.
    pub index: usize,
}

impl KeywordSet {
    /// Build from the musts of one alternative, exact keywords first.
    /// Returns `None` when there are no musts to index.
    pub(crate) fn from_musts(
        musts: Vec<Must>,
        case_insensitive: bool,
    ) -> Result<Option<KeywordSet>, Error> {
        if musts.is_empty() {
            return Ok(None);
        }
        let (exact, probable): (Vec<Must>, Vec<Must>) =
            musts.into_iter().partition(|must| must.exact);
        let exact_count = exact.len();
        let keywords: Vec<Vec<u8>> = exact
            .into_iter()
            .chain(probable)
            .map(|must| must.bytes)
            .collect();
        Ok(Some(KeywordSet {
            ac: build(&keywords, case_insensitive)?,
            exact: exact_count,
        }))
    }

    /// Build from literal pattern lines (fixed-strings mode); every keyword
    /// is a whole pattern.
    pub(crate) fn from_lines(
        lines: Vec<&[u8]>,
        case_insensitive: bool,
    ) -> Result<KeywordSet, Error> {
        let exact = lines.len();
        Ok(KeywordSet {
            ac: build(&lines, case_insensitive)?,
            exact,
        })
    }

    pub(crate) fn exact_count(&self) -> usize {
        self.exact
    }

    /// Leftmost keyword occurrence at or after `start`.
    pub(crate) fn find(&self, haystack: &[u8], start: usize) -> Option<KeywordMatch> {
        self.ac.find(&haystack[start..]).map(|m| KeywordMatch {
            start: start + m.start(),
            len: m.len(),
            index: m.pattern().as_usize(),
        })
    }

    /// Leftmost keyword occurrence wholly inside `window`; offsets are
    /// window-relative.
    pub(crate) fn find_in(&self, window: &[u8]) -> Option<KeywordMatch> {
        self.ac.find(window).map(|m| KeywordMatch {
            start: m.start(),
            len: m.len(),
            index: m.pattern().as_usize(),
        })
    }
}

fn build<K: AsRef<[u8]>>(keywords: &[K], case_insensitive: bool) -> Result<AhoCorasick, Error> {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostFirst)
        .ascii_case_insensitive(case_insensitive)
        .build(keywords)
        .map_err(Error::syntax)
}
