/*!
The DFA prefilter: a dense DFA compiled from the wrapped pattern, searched
over whole byte ranges with multi-line anchors tied to the configured
terminator. For alternatives without backreferences its verdict is exact;
with backreferences the compiled pattern is a widened superset and a hit
only nominates a candidate line.
*/

use regex_automata::{
    dfa::{dense, Automaton},
    nfa::thompson,
    util::look::LookMatcher,
    Input,
};

use crate::{
    engine::syntax_config,
    error::Error,
    matcher::config::SearchConfig,
};

#[derive(Clone)]
pub(crate) struct DfaProgram {
    dfa: dense::DFA<Vec<u32>>,
}

impl DfaProgram {
    pub(crate) fn new(pattern: &str, config: &SearchConfig) -> Result<DfaProgram, Error> {
        let mut look = LookMatcher::new();
        look.set_line_terminator(config.line_terminator);
        // DFAs do not support captures, so the translated group syntax is
        // compiled without them.
        let thompson = thompson::Config::new()
            .utf8(false)
            .which_captures(thompson::WhichCaptures::None)
            .look_matcher(look);
        let dfa = dense::Builder::new()
            .syntax(syntax_config(config, true))
            .thompson(thompson)
            .build(pattern)
            .map_err(Error::syntax)?;
        Ok(DfaProgram { dfa })
    }

    /// End offset of the leftmost match within `range`, if any. The offset
    /// always falls inside (or at the zero-width position of) the matching
    /// line, which is all the executor needs to expand to line bounds.
    pub(crate) fn search(
        &self,
        haystack: &[u8],
        range: std::ops::Range<usize>,
    ) -> Result<Option<usize>, Error> {
        let input = Input::new(haystack).range(range);
        let half = self.dfa.try_search_fwd(&input).map_err(Error::engine)?;
        Ok(half.map(|m| m.offset()))
    }
}
