/*!
Dialect handling: translation of the grep-family pattern dialects into the
one syntax the engines consume, plus the envelopes applied for whole-word
and whole-line matching.

The engines share a single pattern grammar, so dialect selection is a
byte-by-byte rewrite instead of a pair of syntax-bit words. Each alternative
is translated twice in lockstep: a faithful rendering for the confirming
regex engine, and a second rendering for the DFA in which every
backreference is widened to `(?:.*)`. The widened pattern matches a superset
of the real one, which is exactly what a prefilter needs; the translator
also reports whether any backreference occurred so the executor knows the
DFA is not authoritative.
*/

use bstr::decode_utf8;

use crate::error::Error;

mod basic;
mod extended;
pub(crate) mod literal;

/// Pattern dialect selection.
///
/// `Basic` and the historical `default`/`grep` names are synonyms; see
/// [`Dialect::from_name`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Dialect {
    /// Basic regular expressions.
    #[default]
    Basic,
    /// POSIX extended regular expressions.
    Extended,
    /// AWK regular expressions: extended syntax without backreferences or
    /// the GNU escape operators, and with backslash escapes inside bracket
    /// expressions.
    Awk,
    /// Fixed strings; every pattern line is a literal.
    Fixed,
    /// Perl-compatible regular expressions (requires the `perl` feature).
    Perl,
}

impl Dialect {
    /// Resolve a matcher name as used by the grep family of tools.
    ///
    /// ```
    /// use linegrep::Dialect;
    ///
    /// assert_eq!(Dialect::from_name("grep"), Some(Dialect::Basic));
    /// assert_eq!(Dialect::from_name("default"), Some(Dialect::Basic));
    /// assert_eq!(Dialect::from_name("egrep"), Some(Dialect::Extended));
    /// assert_eq!(Dialect::from_name("rg"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Dialect> {
        Some(match name {
            "default" | "grep" => Dialect::Basic,
            "egrep" => Dialect::Extended,
            "awk" => Dialect::Awk,
            "fgrep" => Dialect::Fixed,
            "perl" => Dialect::Perl,
            _ => return None,
        })
    }
}

/// The two renderings of one translated alternative.
pub(crate) struct Translation {
    /// Faithful pattern for the confirming regex engine.
    pub regex: String,
    /// Pattern for the DFA prefilter: identical except that backreferences
    /// are widened to `(?:.*)`.
    pub dfa: String,
    /// Whether any backreference occurred.
    pub backrefs: bool,
}

pub(crate) fn translate(dialect: Dialect, pattern: &[u8]) -> Result<Translation, Error> {
    match dialect {
        Dialect::Basic => basic::translate(pattern),
        Dialect::Extended => extended::translate(pattern, false),
        Dialect::Awk => extended::translate(pattern, true),
        Dialect::Fixed | Dialect::Perl => {
            unreachable!("literal and Perl dialects are not translated")
        }
    }
}

/// The whole-line envelope for the DFA program, under multi-line anchors.
pub(crate) fn wrap_whole_line(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

/// The whole-word envelope for the DFA program. The terminator byte is
/// excluded from the non-word classes so the envelope can never consume it;
/// the anchor branches cover word boundaries at the edges of a line.
pub(crate) fn wrap_whole_word(pattern: &str, line_terminator: u8) -> String {
    let t = format!(r"\x{line_terminator:02X}");
    format!("(?:^|[^0-9A-Za-z_{t}])(?:{pattern})(?:[^0-9A-Za-z_{t}]|$)")
}

/// Accumulates the two renderings of a translation in lockstep.
pub(crate) struct Out {
    regex: String,
    dfa: String,
    backrefs: bool,
}

impl Out {
    pub(crate) fn new() -> Out {
        Out {
            regex: String::new(),
            dfa: String::new(),
            backrefs: false,
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.regex.push(c);
        self.dfa.push(c);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.regex.push_str(s);
        self.dfa.push_str(s);
    }

    /// A backreference to group `n`: faithful in the regex rendering,
    /// widened in the DFA rendering.
    pub(crate) fn backref(&mut self, n: u8) {
        self.regex.push('\\');
        self.regex.push((b'0' + n) as char);
        self.dfa.push_str("(?:.*)");
        self.backrefs = true;
    }

    /// Emit the ordinary character starting at `pattern[i]`, escaping
    /// whatever the engine grammar would otherwise interpret. Returns the
    /// number of bytes consumed.
    pub(crate) fn literal(&mut self, pattern: &[u8], i: usize) -> usize {
        let b = pattern[i];
        if b.is_ascii() {
            self.literal_ascii(b);
            return 1;
        }
        match decode_utf8(&pattern[i..]) {
            (Some(c), size) => {
                self.push(c);
                size
            }
            // A byte that is not part of any character; the parse runs with
            // UTF-8 mode off, so a byte escape matches it exactly.
            (None, _) => {
                self.push_str(&format!(r"\x{b:02X}"));
                1
            }
        }
    }

    pub(crate) fn literal_ascii(&mut self, b: u8) {
        let c = b as char;
        if regex_syntax::is_meta_character(c) {
            self.push('\\');
            self.push(c);
        } else if b.is_ascii_graphic() || b == b' ' {
            self.push(c);
        } else {
            self.push_str(&format!(r"\x{b:02X}"));
        }
    }

    pub(crate) fn into_translation(self) -> Translation {
        Translation {
            regex: self.regex,
            dfa: self.dfa,
            backrefs: self.backrefs,
        }
    }
}

/// Translate one bracket expression starting at `pattern[i] == b'['`;
/// returns the index just past the closing `]`.
///
/// A backslash inside a POSIX bracket expression is an ordinary character;
/// awk (`backslash_escapes`) treats it as an escape.
pub(crate) fn bracket(
    out: &mut Out,
    pattern: &[u8],
    i: usize,
    backslash_escapes: bool,
) -> Result<usize, Error> {
    debug_assert_eq!(pattern[i], b'[');
    out.push('[');
    let mut j = i + 1;
    if pattern.get(j) == Some(&b'^') {
        out.push('^');
        j += 1;
    }
    // A `]` in the first position is a member, not the closing bracket.
    if pattern.get(j) == Some(&b']') {
        out.push_str(r"\]");
        j += 1;
    }
    loop {
        let Some(&b) = pattern.get(j) else {
            return Err(Error::syntax("Unmatched [ or [^"));
        };
        match b {
            b']' => {
                out.push(']');
                return Ok(j + 1);
            }
            b'[' if matches!(pattern.get(j + 1), Some(&(b':' | b'.' | b'='))) => {
                j = bracket_item(out, pattern, j)?;
            }
            b'[' => {
                out.push_str(r"\[");
                j += 1;
            }
            b'\\' if backslash_escapes => {
                let Some(&c) = pattern.get(j + 1) else {
                    return Err(Error::syntax("Trailing backslash"));
                };
                if c.is_ascii() {
                    out.push('\\');
                    out.push(c as char);
                    j += 2;
                } else {
                    j = j + 1 + member(out, pattern, j + 1);
                }
            }
            b'\\' => {
                out.push_str(r"\\");
                j += 1;
            }
            // Set-operation characters of the engine grammar; plain members
            // in the POSIX dialects.
            b'&' | b'~' | b'-' if pattern.get(j + 1) == Some(&b) => {
                out.push('\\');
                out.push(b as char);
                j += 1;
            }
            _ => {
                j += member(out, pattern, j);
            }
        }
    }
}

/// One ordinary bracket-expression member.
fn member(out: &mut Out, pattern: &[u8], i: usize) -> usize {
    let b = pattern[i];
    if !b.is_ascii() {
        return match decode_utf8(&pattern[i..]) {
            (Some(c), size) => {
                out.push(c);
                size
            }
            (None, _) => {
                out.push_str(&format!(r"\x{b:02X}"));
                1
            }
        };
    }
    if b.is_ascii_graphic() || b == b' ' {
        out.push(b as char);
    } else {
        out.push_str(&format!(r"\x{b:02X}"));
    }
    1
}

/// `[:class:]`, `[.coll.]` or `[=equiv=]` inside a bracket expression.
/// Character classes pass through for the engine parser to validate;
/// collating forms are only supported for a single character.
fn bracket_item(out: &mut Out, pattern: &[u8], i: usize) -> Result<usize, Error> {
    let kind = pattern[i + 1];
    let start = i + 2;
    let close = [kind, b']'];
    let Some(off) = pattern[start..]
        .windows(2)
        .position(|window| window == close)
    else {
        return Err(Error::syntax("Unmatched [ or [^"));
    };
    let body = &pattern[start..start + off];
    let end = start + off + 2;
    if kind == b':' {
        if !body.iter().all(u8::is_ascii_alphabetic) {
            return Err(Error::syntax("Invalid character class name"));
        }
        out.push_str("[:");
        for &b in body {
            out.push(b as char);
        }
        out.push_str(":]");
        return Ok(end);
    }
    let one_char = match decode_utf8(body) {
        (Some(_), size) if size == body.len() => true,
        _ => body.len() == 1,
    };
    if !one_char {
        return Err(Error::syntax("Invalid collation character"));
    }
    // The character stands alone, so punctuation the class grammar could
    // misread (a dash starting a range, a closing bracket) gets escaped.
    if body[0].is_ascii_punctuation() {
        out.push('\\');
        out.push(body[0] as char);
    } else {
        member(out, body, 0);
    }
    Ok(end)
}
