use linegrep::{Dialect, LineMatch, Searcher};

fn span(m: Option<LineMatch>) -> Option<(usize, usize)> {
    m.map(|m| (m.start(), m.len()))
}

#[test]
fn basic_reports_the_whole_first_line() {
    let searcher = Searcher::builder(b"foo").build().unwrap();
    assert_eq!(span(searcher.find_line(b"foo\nbar\n").unwrap()), Some((0, 4)));
    assert_eq!(span(searcher.find_line(b"bar\nfoo\n").unwrap()), Some((4, 4)));
    assert_eq!(searcher.find_line(b"bar\nbaz\n").unwrap(), None);
}

#[test]
fn basic_whole_word_skips_embedded_occurrences() {
    let searcher = Searcher::builder(b"foo").whole_word(true).build().unwrap();
    assert_eq!(
        span(searcher.find_line(b"foobar\nfoo bar\n").unwrap()),
        Some((7, 8)),
    );
    assert_eq!(searcher.find_line(b"foobar\n").unwrap(), None);
}

#[test]
fn extended_alternation_line_and_exact_spans() {
    let searcher = Searcher::builder(b"a|bc")
        .dialect(Dialect::Extended)
        .build()
        .unwrap();
    assert_eq!(span(searcher.find_line(b"xbcx\n").unwrap()), Some((0, 5)));
    assert_eq!(span(searcher.find(b"xbcx\n").unwrap()), Some((1, 2)));
}

#[test]
fn fixed_strings_and_whole_word() {
    let searcher = Searcher::builder(b"he\nshe")
        .dialect(Dialect::Fixed)
        .build()
        .unwrap();
    assert_eq!(
        span(searcher.find_line(b"the shell\n").unwrap()),
        Some((0, 10)),
    );

    let word = Searcher::builder(b"he\nshe")
        .dialect(Dialect::Fixed)
        .whole_word(true)
        .build()
        .unwrap();
    assert_eq!(word.find_line(b"the shell\n").unwrap(), None);
    assert_eq!(span(word.find_line(b"the she\n").unwrap()), Some((0, 8)));
}

#[test]
fn fixed_strings_exact_and_whole_line() {
    let searcher = Searcher::builder(b"he\nshe")
        .dialect(Dialect::Fixed)
        .build()
        .unwrap();
    assert_eq!(span(searcher.find(b"the shell\n").unwrap()), Some((1, 2)));

    let line = Searcher::builder(b"he\nshe")
        .dialect(Dialect::Fixed)
        .whole_line(true)
        .build()
        .unwrap();
    assert_eq!(span(line.find_line(b"she\n").unwrap()), Some((0, 4)));
    assert_eq!(line.find_line(b"ashe\n").unwrap(), None);
    assert_eq!(span(line.find_line(b"x\nhe\n").unwrap()), Some((2, 3)));
}

#[test]
fn backreferences_are_decided_by_the_regex_engine() {
    // The widened DFA pattern accepts any line containing "aa"; only the
    // backtracking engine can reject the first buffer.
    let searcher = Searcher::builder(br"\(aa\)\1").build().unwrap();
    assert_eq!(searcher.find_line(b"xxaaxx\n").unwrap(), None);
    assert_eq!(span(searcher.find_line(b"xxaaaa\n").unwrap()), Some((0, 7)));
    assert_eq!(span(searcher.find(b"xxaaaa\n").unwrap()), Some((2, 4)));
}

#[test]
fn multibyte_rejects_hits_inside_characters() {
    // 0xBC is the second byte of "漢" (E6 BC A2).
    let searcher = Searcher::builder(b"\xBC").multibyte(true).build().unwrap();
    assert_eq!(searcher.find_line("漢\n".as_bytes()).unwrap(), None);

    let raw = Searcher::builder(b"\xBC").build().unwrap();
    assert_eq!(span(raw.find_line("漢\n".as_bytes()).unwrap()), Some((0, 4)));

    let fixed = Searcher::builder(b"\xBC")
        .dialect(Dialect::Fixed)
        .multibyte(true)
        .build()
        .unwrap();
    assert_eq!(fixed.find_line("漢\n".as_bytes()).unwrap(), None);
    assert_eq!(span(fixed.find_line(b"\xBC\n").unwrap()), Some((0, 2)));
}

#[test]
fn earliest_line_wins_regardless_of_alternative_order() {
    let haystack = b"foo\nbar\n";
    let ab = Searcher::builder(b"bar\nfoo").build().unwrap();
    let ba = Searcher::builder(b"foo\nbar").build().unwrap();
    assert_eq!(span(ab.find_line(haystack).unwrap()), Some((0, 4)));
    assert_eq!(span(ba.find_line(haystack).unwrap()), Some((0, 4)));
}

#[test]
fn compilation_is_idempotent() {
    let haystack = b"alpha\nbeta\ngamma\n";
    let first = Searcher::builder(b"beta").build().unwrap();
    let second = Searcher::builder(b"beta").build().unwrap();
    assert_eq!(
        first.find_line(haystack).unwrap(),
        second.find_line(haystack).unwrap(),
    );
}

#[test]
fn reported_spans_sit_on_line_boundaries() {
    let haystack = b"one two\nthree four\nfive six\n";
    for pattern in [b"three".as_slice(), b"six", b"o"] {
        let searcher = Searcher::builder(pattern).build().unwrap();
        let m = searcher.find_line(haystack).unwrap().unwrap();
        assert!(m.start() == 0 || haystack[m.start() - 1] == b'\n');
        assert_eq!(haystack[m.end() - 1], b'\n');
    }
}

#[test]
fn whole_line_matches_exactly_one_line() {
    let searcher = Searcher::builder(b"foo").whole_line(true).build().unwrap();
    assert_eq!(searcher.find_line(b"afoo\nfoob\n").unwrap(), None);
    assert_eq!(
        span(searcher.find_line(b"afoo\nfoo\n").unwrap()),
        Some((5, 4)),
    );
}

#[test]
fn whole_line_takes_precedence_over_whole_word() {
    let searcher = Searcher::builder(b"foo")
        .whole_line(true)
        .whole_word(true)
        .build()
        .unwrap();
    assert_eq!(searcher.find_line(b"a foo b\n").unwrap(), None);
    assert_eq!(span(searcher.find_line(b"foo\n").unwrap()), Some((0, 4)));
}

#[test]
fn whole_line_with_backreferences() {
    let searcher = Searcher::builder(br"\(x\)\1")
        .whole_line(true)
        .build()
        .unwrap();
    assert_eq!(span(searcher.find_line(b"xxx\nxx\n").unwrap()), Some((4, 3)));
}

#[test]
fn whole_word_relaxation_accepts_a_shorter_match() {
    // "aa%" fails the right boundary; the anchored retry finds "aa".
    let searcher = Searcher::builder(br"\(a\)\1%\?")
        .whole_word(true)
        .build()
        .unwrap();
    assert_eq!(
        span(searcher.find_line(b"x aa%b x\n").unwrap()),
        Some((0, 9)),
    );
}

#[test]
fn whole_word_relaxation_advances_to_a_later_occurrence() {
    let searcher = Searcher::builder(br"\(ab\|a\)\1")
        .whole_word(true)
        .build()
        .unwrap();
    assert_eq!(
        span(searcher.find_line(b"x ababy aa\n").unwrap()),
        Some((0, 11)),
    );
    assert_eq!(searcher.find_line(b"xababy\n").unwrap(), None);
}

#[test]
fn case_insensitive_layers_agree() {
    let searcher = Searcher::builder(b"foo")
        .case_insensitive(true)
        .build()
        .unwrap();
    assert_eq!(span(searcher.find_line(b"FOO\n").unwrap()), Some((0, 4)));
    assert_eq!(span(searcher.find(b"xFoOx\n").unwrap()), Some((1, 3)));

    let fixed = Searcher::builder(b"foo")
        .dialect(Dialect::Fixed)
        .case_insensitive(true)
        .build()
        .unwrap();
    assert_eq!(span(fixed.find_line(b"FOO\n").unwrap()), Some((0, 4)));
}

#[test]
fn nul_separated_records() {
    let searcher = Searcher::builder(b"b").line_terminator(0).build().unwrap();
    assert_eq!(span(searcher.find_line(b"a\x00b\x00").unwrap()), Some((2, 2)));

    let line = Searcher::builder(b"b")
        .line_terminator(0)
        .whole_line(true)
        .build()
        .unwrap();
    assert_eq!(span(line.find_line(b"ab\x00b\x00").unwrap()), Some((3, 2)));
}

#[test]
fn empty_pattern_matches_every_line() {
    let searcher = Searcher::builder(b"").build().unwrap();
    assert_eq!(span(searcher.find_line(b"anything\n").unwrap()), Some((0, 9)));
}

#[test]
fn trailing_terminator_adds_an_empty_alternative() {
    let searcher = Searcher::builder(b"zzz\n").build().unwrap();
    assert_eq!(span(searcher.find_line(b"abc\n").unwrap()), Some((0, 4)));
}

#[test]
fn empty_pattern_whole_line_matches_only_empty_lines() {
    let searcher = Searcher::builder(b"").whole_line(true).build().unwrap();
    assert_eq!(span(searcher.find_line(b"abc\n\nx\n").unwrap()), Some((4, 1)));
    assert_eq!(searcher.find_line(b"abc\n").unwrap(), None);
}

#[test]
fn final_line_may_lack_a_terminator() {
    let searcher = Searcher::builder(b"bar").build().unwrap();
    assert_eq!(span(searcher.find_line(b"foo\nbar").unwrap()), Some((4, 3)));
    assert_eq!(span(searcher.find(b"foo\nbar").unwrap()), Some((4, 3)));
}

#[test]
fn basic_dialect_treats_parens_as_literals() {
    let searcher = Searcher::builder(b"(a+)").build().unwrap();
    assert_eq!(span(searcher.find_line(b"x(a+)y\n").unwrap()), Some((0, 7)));
    assert_eq!(searcher.find_line(b"aaa\n").unwrap(), None);
}

#[test]
fn basic_intervals_and_anchors() {
    let searcher = Searcher::builder(br"^a\{2,3\}$").build().unwrap();
    assert_eq!(span(searcher.find_line(b"a\naa\n").unwrap()), Some((2, 3)));
    assert_eq!(searcher.find_line(b"a\naaaa\n").unwrap(), None);
}

#[test]
fn extended_intervals() {
    let searcher = Searcher::builder(b"ab{2}c")
        .dialect(Dialect::Extended)
        .build()
        .unwrap();
    assert_eq!(span(searcher.find_line(b"abbc\n").unwrap()), Some((0, 5)));
    assert_eq!(searcher.find_line(b"abc\n").unwrap(), None);
}

#[test]
fn awk_has_no_backreferences() {
    // `\1` is a literal digit in awk.
    let searcher = Searcher::builder(br"(a)\1")
        .dialect(Dialect::Awk)
        .build()
        .unwrap();
    assert_eq!(span(searcher.find_line(b"xa1y\n").unwrap()), Some((0, 5)));
    assert_eq!(searcher.find_line(b"aa\n").unwrap(), None);
}

#[test]
fn syntax_errors_fail_compilation() {
    assert!(Searcher::builder(br"\(a").build().is_err());
    assert!(Searcher::builder(b"(a")
        .dialect(Dialect::Extended)
        .build()
        .is_err());
    assert!(Searcher::builder(br"\2").build().is_err());
    assert!(Searcher::builder(b"[a").build().is_err());
}

#[test]
fn searchers_are_shareable_across_threads() {
    let searcher = Searcher::builder(b"needle").build().unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(
                    span(searcher.find_line(b"hay\nneedle\n").unwrap()),
                    Some((4, 7)),
                );
            });
        }
    });
}

#[cfg(not(feature = "perl"))]
#[test]
fn perl_dialect_requires_the_feature() {
    let err = Searcher::builder(b"foo")
        .dialect(Dialect::Perl)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("not supported"));
}

#[cfg(feature = "perl")]
mod perl {
    use super::*;

    #[test]
    fn perl_reports_the_enclosing_line() {
        let searcher = Searcher::builder(br"fo+")
            .dialect(Dialect::Perl)
            .build()
            .unwrap();
        assert_eq!(
            span(searcher.find_line(b"bar\nfoo baz\n").unwrap()),
            Some((4, 8)),
        );
        assert_eq!(span(searcher.find(b"bar\nfoo baz\n").unwrap()), Some((4, 3)));
    }

    #[test]
    fn perl_whole_word_and_whole_line() {
        let word = Searcher::builder(b"foo")
            .dialect(Dialect::Perl)
            .whole_word(true)
            .build()
            .unwrap();
        assert_eq!(word.find_line(b"foobar\n").unwrap(), None);
        assert!(word.is_match(b"a foo b\n").unwrap());

        let line = Searcher::builder(b"foo")
            .dialect(Dialect::Perl)
            .whole_line(true)
            .build()
            .unwrap();
        assert_eq!(line.find_line(b"afoo\n").unwrap(), None);
        assert_eq!(span(line.find_line(b"foo\n").unwrap()), Some((0, 4)));
    }

    #[test]
    fn perl_patterns_may_contain_nul_bytes() {
        let searcher = Searcher::builder(b"a\x00b")
            .dialect(Dialect::Perl)
            .build()
            .unwrap();
        assert_eq!(span(searcher.find_line(b"xa\x00by\n").unwrap()), Some((0, 6)));
    }

    #[test]
    fn perl_rejects_nul_separated_records() {
        let err = Searcher::builder(b"foo")
            .dialect(Dialect::Perl)
            .line_terminator(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn perl_backreferences() {
        let searcher = Searcher::builder(br"(\w+) \1")
            .dialect(Dialect::Perl)
            .build()
            .unwrap();
        assert_eq!(
            span(searcher.find_line(b"one two\ntwo two\n").unwrap()),
            Some((8, 8)),
        );
    }
}
