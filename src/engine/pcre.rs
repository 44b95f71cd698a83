/*!
The Perl-compatible executor: one PCRE2 search over the whole buffer, with
the envelope folded into the pattern itself (`\b` for whole-word, multi-line
`^`/`$` for whole-line). The pattern blob is not split into alternatives.
*/

use pcre2::bytes::{Regex, RegexBuilder};

use crate::{
    engine::line_bounds,
    error::Error,
    matcher::{config::SearchConfig, LineMatch},
};

#[derive(Clone)]
pub(crate) struct PerlProgram {
    regex: Regex,
}

impl PerlProgram {
    pub(crate) fn compile(pattern: &[u8], config: &SearchConfig) -> Result<PerlProgram, Error> {
        if config.line_terminator != b'\n' {
            return Err(Error::config(
                "Perl-compatible matching cannot be combined with a NUL line terminator",
            ));
        }
        let encoded = encode_nuls(pattern);
        let pattern = String::from_utf8(encoded)
            .map_err(|_| Error::syntax("invalid UTF-8 in Perl-compatible pattern"))?;
        let pattern = if config.whole_line {
            format!("^(?:{pattern})$")
        } else if config.whole_word {
            format!(r"\b(?:{pattern})\b")
        } else {
            pattern
        };
        log::trace!("perl pattern: {pattern:?}");
        let regex = RegexBuilder::new()
            .multi_line(true)
            .caseless(config.case_insensitive)
            .jit_if_available(true)
            .build(&pattern)
            .map_err(Error::syntax)?;
        Ok(PerlProgram { regex })
    }

    pub(crate) fn execute(
        &self,
        haystack: &[u8],
        line_terminator: u8,
        exact: bool,
    ) -> Result<Option<LineMatch>, Error> {
        let Some(found) = self.regex.find(haystack).map_err(Error::engine)? else {
            return Ok(None);
        };
        if exact {
            return Ok(Some(LineMatch::new(found.start(), found.end())));
        }
        let (start, _) = line_bounds(haystack, found.start(), line_terminator);
        let (_, end) = line_bounds(haystack, found.end(), line_terminator);
        Ok(Some(LineMatch::new(start, end)))
    }
}

/// PCRE2 patterns cannot carry NUL bytes, so each becomes the four-character
/// escape `\000`. A preceding odd run of backslashes would swallow the
/// escape's own backslash; one backslash is dropped to keep the parity.
fn encode_nuls(pattern: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(pattern.len());
    for &b in pattern {
        if b == 0 {
            let backslashes = out.iter().rev().take_while(|&&c| c == b'\\').count();
            if backslashes % 2 == 1 {
                out.pop();
            }
            out.extend_from_slice(b"\\000");
        } else {
            out.push(b);
        }
    }
    out
}
