/*!
POSIX extended regular expressions (`egrep`), and the awk variant.

Extended syntax is close to the engine grammar already; the work here is
the pieces that differ: `{` only opens an interval when one actually
follows (otherwise it is an ordinary character), backreferences are a GNU
extension absent from awk, and awk turns off the GNU escape operators while
turning on backslash escapes inside bracket expressions.
*/

use crate::{
    error::Error,
    syntax::{bracket, Out, Translation},
};

pub(crate) fn translate(pattern: &[u8], awk: bool) -> Result<Translation, Error> {
    let mut out = Out::new();
    let mut groups: u8 = 0;
    let mut open = 0usize;
    let mut i = 0;
    while i < pattern.len() {
        let b = pattern[i];
        match b {
            b'\\' => {
                let Some(&c) = pattern.get(i + 1) else {
                    return Err(Error::syntax("Trailing backslash"));
                };
                i += 2;
                match c {
                    b'1'..=b'9' if !awk => {
                        if c - b'0' > groups {
                            return Err(Error::syntax("Invalid back reference"));
                        }
                        out.backref(c - b'0');
                    }
                    b'<' | b'>' if !awk => out.push_str(r"\b"),
                    b'w' | b'W' | b's' | b'S' | b'b' | b'B' if !awk => {
                        out.push('\\');
                        out.push(c as char);
                    }
                    _ if c.is_ascii() => out.literal_ascii(c),
                    _ => {
                        i = i - 1 + out.literal(pattern, i - 1);
                    }
                }
            }
            b'(' => {
                groups = groups.saturating_add(1);
                open += 1;
                out.push('(');
                i += 1;
            }
            b')' => {
                if open == 0 {
                    // awk demotes an unmatched `)` to an ordinary character.
                    if awk {
                        out.push_str(r"\)");
                        i += 1;
                        continue;
                    }
                    return Err(Error::syntax("Unmatched ) or \\)"));
                }
                open -= 1;
                out.push(')');
                i += 1;
            }
            // awk has no interval operator at all.
            b'{' if !awk => match scan_interval(pattern, i) {
                Some((spec, next)) => {
                    out.push_str(&spec);
                    i = next;
                }
                None => {
                    out.push_str(r"\{");
                    i += 1;
                }
            },
            b'{' => {
                out.push_str(r"\{");
                i += 1;
            }
            b'}' => {
                out.push_str(r"\}");
                i += 1;
            }
            b'[' => i = bracket(&mut out, pattern, i, awk)?,
            b'|' | b'*' | b'+' | b'?' | b'.' | b'^' | b'$' => {
                out.push(b as char);
                i += 1;
            }
            _ => i += out.literal(pattern, i),
        }
    }
    if open > 0 {
        return Err(Error::syntax("Unmatched ( or \\("));
    }
    Ok(out.into_translation())
}

/// Returns the normalized interval text and the index past `}` when
/// `pattern[i..]` opens a valid `{m}`, `{m,}`, `{m,n}` or `{,n}` interval.
fn scan_interval(pattern: &[u8], i: usize) -> Option<(String, usize)> {
    let mut j = i + 1;
    let mut spec = String::from("{");
    let low_start = j;
    while matches!(pattern.get(j), Some(&(b'0'..=b'9'))) {
        spec.push(pattern[j] as char);
        j += 1;
    }
    let has_low = j > low_start;
    if !has_low {
        spec.push('0');
    }
    let mut has_high = has_low;
    if pattern.get(j) == Some(&b',') {
        spec.push(',');
        j += 1;
        let high_start = j;
        while matches!(pattern.get(j), Some(&(b'0'..=b'9'))) {
            spec.push(pattern[j] as char);
            j += 1;
        }
        has_high = j > high_start;
    }
    if pattern.get(j) == Some(&b'}') && (has_low || has_high) {
        spec.push('}');
        Some((spec, j + 1))
    } else {
        None
    }
}
