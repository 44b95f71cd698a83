/*!
Byte classification for multibyte-aware matching.

A keyword hit that lands inside a multibyte character is a false positive:
the keyword bytes exist in the buffer but do not form characters. The
classification array lets the executors reject such hits in O(1) per hit.
*/

use bstr::decode_utf8;

/// Classify every byte of `haystack`: index `i` holds `1` for a single-byte
/// character, the sequence length for the first byte of a multibyte
/// character, and `0` for a continuation byte.
///
/// Undecodable bytes count as single-byte characters so the scan (and any
/// match starting on them) always makes progress on malformed input; the
/// trailing bytes of a broken sequence stay `0`.
pub(crate) fn classify(haystack: &[u8]) -> Vec<u8> {
    let mut properties = vec![0u8; haystack.len()];
    let mut i = 0;
    while i < haystack.len() {
        let (ch, size) = decode_utf8(&haystack[i..]);
        match ch {
            Some(_) if size > 1 => {
                properties[i] = size as u8;
                i += size;
            }
            Some(_) => {
                properties[i] = 1;
                i += 1;
            }
            None => {
                properties[i] = 1;
                i += size.max(1);
            }
        }
    }
    properties
}
