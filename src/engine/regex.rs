/*!
The confirming regex program of a bundle.

Alternatives without backreferences compile into `regex-automata`'s meta
engine, which searches raw bytes; its `Input` span controls keep the
anchors honest, so `^` only matches at the true start of the line and `$`
cannot match at a truncated end limit. Alternatives with backreferences
fall back to the backtracking `fancy-regex` engine, which searches `&str`;
a candidate line that is not valid UTF-8 cannot match a backreference
pattern here.
*/

use regex_automata::{meta, Anchored, Input};

use crate::{
    engine::syntax_config,
    error::Error,
    matcher::config::SearchConfig,
    syntax::Translation,
};

#[derive(Clone)]
pub(crate) enum RegexProgram {
    Automata(meta::Regex),
    Backtrack(fancy_regex::Regex),
}

impl RegexProgram {
    pub(crate) fn new(translation: &Translation, config: &SearchConfig) -> Result<RegexProgram, Error> {
        if translation.backrefs {
            let regex = fancy_regex::RegexBuilder::new(&translation.regex)
                .case_insensitive(config.case_insensitive)
                .build()
                .map_err(Error::syntax)?;
            Ok(RegexProgram::Backtrack(regex))
        } else {
            let regex = meta::Regex::builder()
                .syntax(syntax_config(config, false))
                .configure(meta::Config::new().utf8_empty(false))
                .build(&translation.regex)
                .map_err(Error::syntax)?;
            Ok(RegexProgram::Automata(regex))
        }
    }

    /// First match within `line[start..]`. The whole line stays visible to
    /// the engine so the anchors keep their true positions.
    pub(crate) fn search(
        &self,
        line: &[u8],
        start: usize,
    ) -> Result<Option<(usize, usize)>, Error> {
        match self {
            RegexProgram::Automata(regex) => Ok(regex
                .find(Input::new(line).span(start..line.len()))
                .map(|m| (m.start(), m.end()))),
            RegexProgram::Backtrack(regex) => {
                let Ok(text) = std::str::from_utf8(line) else {
                    return Ok(None);
                };
                let start = ceil_char_boundary(text, start);
                let found = regex.find_from_pos(text, start).map_err(Error::engine)?;
                Ok(found.map(|m| (m.start(), m.end())))
            }
        }
    }

    /// Longest match anchored at `start` ending at or before `limit`. A
    /// zero-length result counts as absent; the word-relaxation loop treats
    /// an empty retry as exhausted.
    pub(crate) fn match_at(
        &self,
        line: &[u8],
        start: usize,
        limit: usize,
    ) -> Result<Option<usize>, Error> {
        match self {
            RegexProgram::Automata(regex) => Ok(regex
                .find(
                    Input::new(line)
                        .anchored(Anchored::Yes)
                        .span(start..limit),
                )
                .map(|m| m.len())
                .filter(|&len| len > 0)),
            RegexProgram::Backtrack(regex) => {
                let Ok(text) = std::str::from_utf8(line) else {
                    return Ok(None);
                };
                if !text.is_char_boundary(start) || !text.is_char_boundary(limit) {
                    return Ok(None);
                }
                let found = regex
                    .find_from_pos(&text[..limit], start)
                    .map_err(Error::engine)?;
                Ok(found
                    .filter(|m| m.start() == start)
                    .map(|m| m.end() - m.start())
                    .filter(|&len| len > 0))
            }
        }
    }
}

fn ceil_char_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
