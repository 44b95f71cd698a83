/*!
The public matcher facade: compile a pattern blob once into a [`Searcher`],
then run it over buffers.

A pattern blob holds one alternative per line (separated by the configured
terminator). For the layered dialects every alternative compiles into its
own bundle of engines; the fixed-strings dialect indexes all lines in one
keyword set; the Perl dialect hands the whole blob to PCRE2.
*/

use bon::bon;

use crate::{
    engine::{self, dfa::DfaProgram, keyword::KeywordSet, regex::RegexProgram, Bundle},
    error::Error,
    syntax::{self, Dialect},
};

pub(crate) mod config;
mod matches;

pub use matches::LineMatch;

use config::SearchConfig;

/// A compiled pattern set.
///
/// Searching never mutates the searcher, so one `Searcher` can serve any
/// number of buffers, from any number of threads.
///
/// # Example
///
/// ```
/// use linegrep::{Dialect, Searcher};
///
/// let searcher = Searcher::builder(b"ba[rz]")
///     .dialect(Dialect::Basic)
///     .build()?;
/// assert_eq!(
///     searcher.find_line(b"foo\nbar\n")?.map(|m| m.range()),
///     Some(4..8),
/// );
/// # Ok::<(), linegrep::Error>(())
/// ```
#[derive(Clone)]
pub struct Searcher {
    config: SearchConfig,
    imp: SearcherI,
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher").field("config", &self.config).finish()
    }
}

#[derive(Clone)]
enum SearcherI {
    Layered(Vec<Bundle>),
    Fixed(KeywordSet),
    #[cfg(feature = "perl")]
    Perl(engine::pcre::PerlProgram),
}

#[bon]
impl Searcher {
    /// Compile a pattern blob. Compilation is all-or-nothing: any syntax or
    /// configuration error leaves no partial pattern set behind.
    #[builder]
    pub fn new(
        /// The raw pattern blob, one alternative per line.
        #[builder(start_fn)]
        pattern: &[u8],
        /// Dialect the alternatives are written in.
        #[builder(default)]
        dialect: Dialect,
        /// Fold ASCII case in every engine layer.
        #[builder(default = false)]
        case_insensitive: bool,
        /// Only report matches whose ends sit on non-word bytes
        /// (`[0-9A-Za-z_]` complements). Ignored when `whole_line` is set.
        #[builder(default = false)]
        whole_word: bool,
        /// Only report matches covering an entire line.
        #[builder(default = false)]
        whole_line: bool,
        /// The byte separating records; `0x00` selects NUL-separated mode.
        #[builder(default = b'\n')]
        line_terminator: u8,
        /// Classify buffer bytes as UTF-8 so keyword hits inside multibyte
        /// characters are rejected.
        #[builder(default = false)]
        multibyte: bool,
    ) -> Result<Searcher, Error> {
        let config = SearchConfig {
            case_insensitive,
            whole_word: whole_word && !whole_line,
            whole_line,
            line_terminator,
            multibyte,
        };
        let imp = match dialect {
            Dialect::Fixed => SearcherI::Fixed(compile_fixed(pattern, &config)?),
            #[cfg(feature = "perl")]
            Dialect::Perl => SearcherI::Perl(engine::pcre::PerlProgram::compile(pattern, &config)?),
            #[cfg(not(feature = "perl"))]
            Dialect::Perl => {
                return Err(Error::config(
                    "Perl-compatible matching is not supported in this build \
                     (enable the `perl` feature)",
                ))
            }
            Dialect::Basic | Dialect::Extended | Dialect::Awk => {
                SearcherI::Layered(compile_layered(dialect, pattern, &config)?)
            }
        };
        Ok(Searcher { config, imp })
    }
}

impl Searcher {
    /// Find the first line containing a match and return its whole span,
    /// including the trailing terminator when the buffer has one.
    ///
    /// ```
    /// use linegrep::Searcher;
    ///
    /// let searcher = Searcher::builder(b"b.r").build()?;
    /// let m = searcher.find_line(b"foo\nbar\nbaz\n")?.unwrap();
    /// assert_eq!((m.start(), m.len()), (4, 4));
    /// # Ok::<(), linegrep::Error>(())
    /// ```
    pub fn find_line(&self, haystack: &[u8]) -> Result<Option<LineMatch>, Error> {
        self.execute(haystack, false)
    }

    /// Find the first match and return its exact span.
    ///
    /// ```
    /// use linegrep::{Dialect, Searcher};
    ///
    /// let searcher = Searcher::builder(b"a|bc").dialect(Dialect::Extended).build()?;
    /// let m = searcher.find(b"xbcx\n")?.unwrap();
    /// assert_eq!(m.range(), 1..3);
    /// # Ok::<(), linegrep::Error>(())
    /// ```
    pub fn find(&self, haystack: &[u8]) -> Result<Option<LineMatch>, Error> {
        self.execute(haystack, true)
    }

    /// Whether any line of `haystack` matches.
    pub fn is_match(&self, haystack: &[u8]) -> Result<bool, Error> {
        Ok(self.execute(haystack, false)?.is_some())
    }

    fn execute(&self, haystack: &[u8], exact: bool) -> Result<Option<LineMatch>, Error> {
        match &self.imp {
            SearcherI::Layered(bundles) => {
                engine::layered::execute(bundles, &self.config, haystack, exact)
            }
            SearcherI::Fixed(keywords) => {
                engine::fixed::execute(keywords, &self.config, haystack, exact)
            }
            #[cfg(feature = "perl")]
            SearcherI::Perl(program) => {
                program.execute(haystack, self.config.line_terminator, exact)
            }
        }
    }
}

/// Compile one bundle per alternative. Splitting on the terminator keeps a
/// trailing empty alternative, which matches every line.
fn compile_layered(
    dialect: Dialect,
    pattern: &[u8],
    config: &SearchConfig,
) -> Result<Vec<Bundle>, Error> {
    let mut bundles = Vec::new();
    for alternative in pattern.split(|&b| b == config.line_terminator) {
        let translation = syntax::translate(dialect, alternative)?;
        let dfa_pattern = if config.whole_line {
            syntax::wrap_whole_line(&translation.dfa)
        } else if config.whole_word {
            syntax::wrap_whole_word(&translation.dfa, config.line_terminator)
        } else {
            translation.dfa.clone()
        };
        log::trace!(
            "alternative {:?}: regex {:?}, dfa {:?}",
            alternative,
            translation.regex,
            dfa_pattern,
        );
        let regex = RegexProgram::new(&translation, config)?;
        let dfa = DfaProgram::new(&dfa_pattern, config)?;
        let hir = regex_syntax::ParserBuilder::new()
            .unicode(false)
            .utf8(false)
            .build()
            .parse(&translation.dfa)
            .map_err(Error::syntax)?;
        let mut musts = syntax::literal::musts(&hir);
        // Under an envelope no keyword can prove a match by itself.
        if config.whole_line || config.whole_word {
            for must in &mut musts {
                must.exact = false;
            }
        }
        let keywords = KeywordSet::from_musts(musts, config.case_insensitive)?;
        bundles.push(Bundle {
            regex,
            dfa,
            keywords,
            backrefs: translation.backrefs,
        });
    }
    Ok(bundles)
}

fn compile_fixed(pattern: &[u8], config: &SearchConfig) -> Result<KeywordSet, Error> {
    let lines: Vec<&[u8]> = pattern.split(|&b| b == config.line_terminator).collect();
    KeywordSet::from_lines(lines, config.case_insensitive)
}
