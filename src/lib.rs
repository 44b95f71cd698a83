/*!
A layered pattern-matching core for line-oriented searching.

Given a pattern blob in a grep-family dialect, [`Searcher`] compiles each
alternative into a bundle of cooperating engines: a fixed-string keyword
scanner over the pattern's "musts", a DFA prefilter, and a backtracking
regex for confirmation. Per buffer, it reports the byte span of the first
line containing a match.

The layering is what makes the common case fast: most buffers are decided
by the keyword scan alone, most of the rest by the DFA, and only patterns
with backreferences ever reach the backtracking engine. Whole-word and
whole-line matching, NUL-separated records and UTF-8-aware hit rejection
are handled by the executors, not the caller.

## Usage

```
use linegrep::{Dialect, Searcher};

let searcher = Searcher::builder(b"ba[rz]")
    .dialect(Dialect::Basic)
    .build()?;
assert_eq!(
    searcher.find_line(b"foo\nbar\n")?.map(|m| m.range()),
    Some(4..8),
);

// Alternatives are separated by the line terminator; the first matching
// line wins regardless of which alternative matched it.
let searcher = Searcher::builder(b"nope\nfoo")
    .dialect(Dialect::Extended)
    .whole_word(true)
    .build()?;
assert!(searcher.is_match(b"a foo b\n")?);
assert!(!searcher.is_match(b"foobar\n")?);
# Ok::<(), linegrep::Error>(())
```

## Dialects

* [`Dialect::Basic`]: basic regular expressions (the `grep` default).
* [`Dialect::Extended`]: POSIX extended regular expressions (`egrep`).
* [`Dialect::Awk`]: AWK syntax.
* [`Dialect::Fixed`]: literal strings (`fgrep`), keyword engine only.
* [`Dialect::Perl`]: PCRE2, behind the `perl` cargo feature.

## Crate features

* **`perl`**: enables the `perl` dialect via the `pcre2` crate. Without
  it, compiling a Perl-dialect pattern fails with a configuration error.
*/

pub mod matcher;
pub mod syntax;

mod engine;
mod error;
mod multibyte;

pub use crate::{
    error::Error,
    matcher::{LineMatch, Searcher},
    syntax::Dialect,
};
