/// Options shared by compilation and searching, carried inside the compiled
/// [`Searcher`](crate::Searcher) rather than living in process globals. Every
/// engine reads the terminator and case flag from here, so the three layers
/// cannot disagree.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SearchConfig {
    pub case_insensitive: bool,
    pub whole_word: bool,
    pub whole_line: bool,
    pub line_terminator: u8,
    pub multibyte: bool,
}

/// Word constituents are `[0-9A-Za-z_]` on the raw byte domain; no locale
/// classification happens in the executors.
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
