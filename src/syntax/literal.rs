/*!
Must extraction: fixed strings, at least one of which occurs in any match
of a compiled alternative. The keyword prefilter is built from these.
*/

use regex_syntax::hir::{
    literal::{ExtractKind, Extractor},
    Hir,
};

/// A fixed string every match provably starts with. `exact` marks a literal
/// that *is* an entire match, so a keyword hit on it needs no confirmation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Must {
    pub bytes: Vec<u8>,
    pub exact: bool,
}

/// Extract the musts of `hir`, or an empty list when no finite, useful set
/// exists (an empty literal would make the prefilter fire everywhere).
pub(crate) fn musts(hir: &Hir) -> Vec<Must> {
    let mut extractor = Extractor::new();
    extractor.kind(ExtractKind::Prefix);
    let seq = extractor.extract(hir);
    let Some(literals) = seq.literals() else {
        return Vec::new();
    };
    if literals.is_empty() || literals.iter().any(|l| l.is_empty()) {
        return Vec::new();
    }
    literals
        .iter()
        .map(|l| Must {
            bytes: l.as_bytes().to_vec(),
            exact: l.is_exact(),
        })
        .collect()
}
