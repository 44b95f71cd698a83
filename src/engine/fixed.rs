/*!
The fixed-strings executor: nothing but the keyword set, every pattern line
a literal. The whole-word relaxation here retries the scan in progressively
shorter windows anchored at the first hit, then gives up and moves past it.
*/

use crate::{
    engine::{keyword::KeywordSet, line_bounds},
    error::Error,
    matcher::{
        config::{is_word_byte, SearchConfig},
        LineMatch,
    },
    multibyte,
};

pub(crate) fn execute(
    keywords: &KeywordSet,
    config: &SearchConfig,
    haystack: &[u8],
    exact: bool,
) -> Result<Option<LineMatch>, Error> {
    let eol = config.line_terminator;
    let properties = config.multibyte.then(|| multibyte::classify(haystack));
    let mut beg = 0;
    while beg <= haystack.len() {
        let Some(hit) = keywords.find(haystack, beg) else {
            return Ok(None);
        };
        if properties
            .as_deref()
            .is_some_and(|p| p.get(hit.start) == Some(&0))
        {
            beg = hit.start + 1;
            continue;
        }
        if exact {
            return Ok(Some(LineMatch::new(hit.start, hit.start + hit.len)));
        }
        let accepted = if config.whole_line {
            let left = hit.start == 0 || haystack[hit.start - 1] == eol;
            let right =
                hit.start + hit.len == haystack.len() || haystack[hit.start + hit.len] == eol;
            (left && right).then_some(hit.start)
        } else if config.whole_word {
            word_match(keywords, haystack, hit.start, hit.len)
        } else {
            Some(hit.start)
        };
        match accepted {
            Some(pos) => {
                let (line_start, line_end) = line_bounds(haystack, pos, eol);
                return Ok(Some(LineMatch::new(line_start, line_end)));
            }
            None => beg = hit.start + 1,
        }
    }
    Ok(None)
}

/// Try the hit itself, then every keyword occurrence in a window one byte
/// short of the current match end, always anchored at the first hit.
fn word_match(
    keywords: &KeywordSet,
    haystack: &[u8],
    first: usize,
    first_len: usize,
) -> Option<usize> {
    let (mut start, mut len) = (first, first_len);
    loop {
        if start > 0 && is_word_byte(haystack[start - 1]) {
            return None;
        }
        if start + len == haystack.len() || !is_word_byte(haystack[start + len]) {
            return Some(start);
        }
        if start + len <= first + 1 {
            return None;
        }
        let window = &haystack[first..start + len - 1];
        let hit = keywords.find_in(window)?;
        start = first + hit.start;
        len = hit.len;
    }
}
