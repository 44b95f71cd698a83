/*!
The layered executor: keyword scan, DFA prefilter and regex confirmation
cooperating to find the first line any bundle matches.

The cursor walks the buffer producing candidate lines. A keyword hit on an
exact must confirms a line outright; a probable hit narrows the region the
DFA has to check. When the pattern has no backreferences the DFA ran the
wrapped pattern and its verdict is final, so the whole-word and whole-line
constraints cost nothing extra. Only backreference patterns reach the
backtracking engine, where the word constraint is enforced by the shrinking
retry loop.

Bundles are searched independently and the earliest line wins; compilation
order only breaks ties within one line, so swapping two alternatives never
changes the reported offset.
*/

use crate::{
    engine::{line_bounds, line_content, Bundle},
    error::Error,
    matcher::{
        config::{is_word_byte, SearchConfig},
        LineMatch,
    },
    multibyte,
};

pub(crate) fn execute(
    bundles: &[Bundle],
    config: &SearchConfig,
    haystack: &[u8],
    exact: bool,
) -> Result<Option<LineMatch>, Error> {
    // Computed at most once, shared by every bundle that wants it.
    let mut properties: Option<Vec<u8>> = None;
    let mut best: Option<LineMatch> = None;
    for bundle in bundles {
        let props: Option<&[u8]> = if config.multibyte && bundle.keywords.is_some() {
            Some(properties.get_or_insert_with(|| multibyte::classify(haystack)))
        } else {
            None
        };
        if let Some(found) = bundle_search(bundle, config, haystack, exact, props)? {
            if best.map_or(true, |b| found.start() < b.start()) {
                best = Some(found);
            }
            if best.is_some_and(|b| b.start() == 0) {
                break;
            }
        }
    }
    Ok(best)
}

/// One bundle's first match on the buffer.
fn bundle_search(
    bundle: &Bundle,
    config: &SearchConfig,
    haystack: &[u8],
    exact: bool,
    props: Option<&[u8]>,
) -> Result<Option<LineMatch>, Error> {
    let eol = config.line_terminator;
    let mut beg = 0;
    while beg < haystack.len() {
        let end;
        if exact {
            end = haystack.len();
        } else {
            if let Some(keywords) = &bundle.keywords {
                let Some(hit) = keywords.find(haystack, beg) else {
                    return Ok(None);
                };
                // A hit inside a multibyte character is bytes, not text.
                if props.is_some_and(|p| p.get(hit.start) == Some(&0)) {
                    beg = hit.start + 1;
                    continue;
                }
                let (line_start, line_end) = line_bounds(haystack, hit.start, eol);
                beg = line_start;
                end = line_end;
                if hit.index < keywords.exact_count() {
                    return Ok(Some(LineMatch::new(beg, end)));
                }
                if bundle.dfa.search(haystack, beg..end)?.is_none() {
                    beg = end;
                    continue;
                }
            } else {
                let Some(offset) = bundle.dfa.search(haystack, beg..haystack.len())? else {
                    return Ok(None);
                };
                // A zero-width match just past the final terminator belongs
                // to no line.
                if offset == haystack.len() && haystack.last() == Some(&eol) {
                    return Ok(None);
                }
                let (line_start, line_end) = line_bounds(haystack, offset, eol);
                beg = line_start;
                end = line_end;
            }
            // The DFA ran the wrapped pattern, so without backreferences
            // its hit is the whole verdict.
            if !bundle.backrefs {
                return Ok(Some(LineMatch::new(beg, end)));
            }
        }
        let line = line_content(haystack, beg, end, eol);
        match bundle.regex.search(line, 0)? {
            None => beg = end,
            Some((start, match_end)) => {
                if exact {
                    return Ok(Some(LineMatch::new(beg + start, beg + match_end)));
                }
                let len = match_end - start;
                if (!config.whole_line && !config.whole_word)
                    || (config.whole_line && len == line.len())
                {
                    return Ok(Some(LineMatch::new(beg, end)));
                }
                if config.whole_word && word_match(&bundle.regex, line, start, len)?.is_some() {
                    return Ok(Some(LineMatch::new(beg, end)));
                }
                beg = end;
            }
        }
    }
    Ok(None)
}

/// The whole-word relaxation: the line may hold several occurrences, and a
/// shorter alternative at the same start may sit on a word boundary where
/// the longer one does not. Shrink the end limit first, then re-search from
/// the next start, until the line is exhausted.
fn word_match(
    regex: &crate::engine::regex::RegexProgram,
    line: &[u8],
    mut start: usize,
    mut len: usize,
) -> Result<Option<(usize, usize)>, Error> {
    loop {
        let left_ok = start == 0 || !is_word_byte(line[start - 1]);
        let right_ok = start + len == line.len() || !is_word_byte(line[start + len]);
        if left_ok && right_ok {
            return Ok(Some((start, len)));
        }
        let shorter = if len > 0 {
            regex.match_at(line, start, start + len - 1)?
        } else {
            None
        };
        match shorter {
            Some(shorter_len) => len = shorter_len,
            None => {
                if start == line.len() {
                    return Ok(None);
                }
                start += 1;
                match regex.search(line, start)? {
                    Some((next_start, next_end)) => {
                        start = next_start;
                        len = next_end - next_start;
                    }
                    None => return Ok(None),
                }
            }
        }
    }
}
