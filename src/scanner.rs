//! Low-level lexical scanners (spec §4.2).
//!
//! These operate directly on a [`CharCursor`] rather than chunked byte
//! slices, since the input here is already character-addressed (spec §4.1).
//! The *shape* of each scanner — try-and-restore literal matching, a
//! dedicated "seen how much of the terminator so far" state machine for
//! scan-until-string — is grounded on the teacher's `parser::comment`,
//! `parser::cdata` chunked-feed parsers and `quick_dtd::quoted::QuotedParser`
//! (`examples/tafia-quick-xml/quick-dtd/src/quoted.rs`), adapted from
//! "feed a byte slice, remember partial progress across chunks" to "pull one
//! char at a time from an unbounded-pushback cursor".

use crate::cursor::{CharCursor, EOF_CHAR};
use crate::entities;
use crate::source::CharSource;

/// Whitespace per spec §4.2: space, tab, CR (already normalized away by the
/// cursor, but checked for completeness), LF. Form feed is deliberately
/// excluded — "downstream XML serializers reject it" (spec §4.2).
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '.' || c == '-'
}

/// Attempts to match the literal `s` at the cursor's current position.
/// `ignore_case` folds ASCII A-Z only (spec §4.2). On mismatch, every
/// character read during the attempt is pushed back so the cursor ends up
/// exactly where it started.
pub fn match_literal<S: CharSource>(cursor: &mut CharCursor<S>, s: &str, ignore_case: bool) -> bool {
    let mut consumed = Vec::with_capacity(s.len());
    for expected in s.chars() {
        let c = cursor.read();
        consumed.push(c);
        let matches = if ignore_case {
            c.to_ascii_lowercase() == expected.to_ascii_lowercase()
        } else {
            c == expected
        };
        if !matches {
            for &c in consumed.iter().rev() {
                cursor.unread(c);
            }
            return false;
        }
    }
    true
}

/// Accumulates characters until `terminator` is found (consumed, not
/// returned) or EOF is reached.
pub fn scan_until_char<S: CharSource>(cursor: &mut CharCursor<S>, terminator: char) -> String {
    let mut out = String::new();
    loop {
        let c = cursor.read();
        if c == terminator || (c == EOF_CHAR && cursor.eof()) {
            break;
        }
        out.push(c);
    }
    out
}

/// The KMP prefix function for `term`: `fail[i]` is the length of the
/// longest proper prefix of `term[..=i]` that is also a suffix of it. Used
/// by [`scan_until_string`] to fall back to the correct partial-match
/// length on a mismatch, rather than restarting at 0/1, so terminators
/// whose own prefix overlaps itself (`-->`, `]]>`) are matched correctly.
fn kmp_failure(term: &[char]) -> Vec<usize> {
    let mut fail = vec![0usize; term.len()];
    let mut k = 0usize;
    for i in 1..term.len() {
        while k > 0 && term[i] != term[k] {
            k = fail[k - 1];
        }
        if term[i] == term[k] {
            k += 1;
        }
        fail[i] = k;
    }
    fail
}

/// Accumulates characters until the literal string `terminator` is found
/// (consumed, not returned) or EOF is reached. Tracks the longest matched
/// prefix of `terminator` seen so far; on a mismatch, falls back to the
/// KMP failure function instead of restarting the match from scratch, so
/// a terminator whose own leading characters repeat (`-->`, `]]>`) is
/// still found correctly even when the input contains a false start that
/// overlaps it (e.g. `x--->` must stop at the real `-->`, not run to EOF).
pub fn scan_until_string<S: CharSource>(cursor: &mut CharCursor<S>, terminator: &str) -> String {
    if terminator.is_empty() {
        return String::new();
    }
    let term: Vec<char> = terminator.chars().collect();
    let fail = kmp_failure(&term);
    let mut out = String::new();
    let mut matched = 0usize;
    loop {
        let c = cursor.read();
        if c == EOF_CHAR && cursor.eof() {
            // Flush whatever partial match we were holding onto as data.
            out.extend(term[..matched].iter());
            break;
        }
        while matched > 0 && c != term[matched] {
            let fallback = fail[matched - 1];
            // The characters between the fallback point and the old match
            // length can never be part of a later match; they're exactly
            // `term[fallback..matched]` (that's what "matched" means), so
            // flush them as literal data now.
            out.extend(term[fallback..matched].iter());
            matched = fallback;
        }
        if c == term[matched] {
            matched += 1;
            if matched == term.len() {
                break;
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Skips (and discards) a run of whitespace, returning it as a `String`
/// (callers that only need to know "was there any" can check `.is_empty()`).
pub fn skip_whitespace<S: CharSource>(cursor: &mut CharCursor<S>) -> String {
    let mut out = String::new();
    loop {
        let c = cursor.peek();
        if c == EOF_CHAR || !is_whitespace(c) {
            break;
        }
        out.push(cursor.read());
    }
    out
}

/// Scans a name per spec §4.2: `NameStart` then zero or more `NameChar`.
/// ASCII-lowercased; a single embedded `:` splits into `(prefix, local)`.
/// Returns `(prefix, local)`, both empty if no name was found at all (the
/// cursor is left unconsumed in that case).
pub fn scan_name<S: CharSource>(cursor: &mut CharCursor<S>) -> (String, String) {
    let first = cursor.peek();
    if !is_name_start(first) {
        return (String::new(), String::new());
    }
    let mut raw = String::new();
    raw.push(cursor.read().to_ascii_lowercase());
    loop {
        let c = cursor.peek();
        if c == EOF_CHAR || !is_name_char(c) {
            break;
        }
        raw.push(cursor.read().to_ascii_lowercase());
    }
    match raw.find(':') {
        // A leading or trailing ':' is not a meaningful prefix split; treat
        // the whole thing as a local name in that degenerate case.
        Some(idx) if idx > 0 && idx < raw.len() - 1 => {
            let local = raw[idx + 1..].to_string();
            let mut prefix = raw;
            prefix.truncate(idx);
            (prefix, local)
        }
        _ => (String::new(), raw),
    }
}

/// Scans an attribute value per spec §4.2: leading whitespace is skipped;
/// a quoted value runs until the matching quote (or NUL); an unquoted value
/// runs while `IsOkAttrCharUnquoted`. The result is HTML-decoded.
pub fn scan_attr_value<S: CharSource>(cursor: &mut CharCursor<S>) -> String {
    skip_whitespace(cursor);
    let quote = cursor.peek();
    let raw = if quote == '"' || quote == '\'' {
        cursor.read();
        let mut out = String::new();
        loop {
            let c = cursor.read();
            if c == quote {
                break;
            }
            if c == EOF_CHAR && cursor.eof() {
                break;
            }
            out.push(c);
        }
        out
    } else {
        let mut out = String::new();
        loop {
            let c = cursor.peek();
            if !is_ok_attr_char_unquoted(c) {
                break;
            }
            out.push(cursor.read());
        }
        out
    };
    entities::decode(&raw).into_owned()
}

/// Scans raw text for `script`/`style`-family elements (SPEC_FULL.md §4
/// Supplemented): everything up to, but not including, the opening `<` of
/// the matching case-insensitive end tag. The end tag itself is left for
/// the ordinary markup scanner to consume, so tree construction pops the
/// stack the same way it does for any other end tag. Not entity-decoded.
pub fn scan_raw_text<S: CharSource>(cursor: &mut CharCursor<S>, tag_name: &str) -> String {
    let mut out = String::new();
    loop {
        let c = cursor.peek();
        if c == EOF_CHAR && cursor.eof() {
            break;
        }
        if c == '<' && looks_like_end_tag(cursor, tag_name) {
            break;
        }
        out.push(cursor.read());
    }
    out
}

/// Peeks (without permanently consuming) whether the cursor sits at
/// `</tag_name` followed by whitespace, `/`, `>`, or EOF — enough to tell a
/// genuine close tag from a `<` that merely happens to precede text like
/// "a < b scripted".
fn looks_like_end_tag<S: CharSource>(cursor: &mut CharCursor<S>, tag_name: &str) -> bool {
    let mut consumed = Vec::new();
    let matched = (|| {
        let c = cursor.read();
        consumed.push(c);
        if c != '<' {
            return false;
        }
        let c = cursor.read();
        consumed.push(c);
        if c != '/' {
            return false;
        }
        for expected in tag_name.chars() {
            let c = cursor.read();
            consumed.push(c);
            if c.to_ascii_lowercase() != expected {
                return false;
            }
        }
        let next = cursor.peek();
        next == EOF_CHAR || next == '>' || next == '/' || is_whitespace(next)
    })();
    for &c in consumed.iter().rev() {
        cursor.unread(c);
    }
    matched
}

fn is_ok_attr_char_unquoted(c: char) -> bool {
    c > '\u{20}' && c != EOF_CHAR && !matches!(c, '"' | '\'' | '=' | '<' | '>' | '`')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn cursor(s: &str) -> CharCursor<StrSource<'_>> {
        CharCursor::new(StrSource::new(s))
    }

    #[test]
    fn match_literal_succeeds_and_consumes() {
        let mut c = cursor("![CDATA[data");
        assert!(match_literal(&mut c, "![CDATA[", false));
        assert_eq!(scan_until_char(&mut c, ']'), "data");
    }

    #[test]
    fn match_literal_restores_on_mismatch() {
        let mut c = cursor("!DOCTYPE html>");
        assert!(!match_literal(&mut c, "![CDATA[", false));
        // cursor must be fully restored
        let mut probe = String::new();
        for _ in 0.."!DOCTYPE".chars().count() {
            probe.push(c.read());
        }
        assert_eq!(probe, "!DOCTYPE");
    }

    #[test]
    fn match_literal_case_insensitive() {
        let mut c = cursor("DOCTYPE");
        assert!(match_literal(&mut c, "doctype", true));
    }

    #[test]
    fn scan_until_string_finds_terminator() {
        let mut c = cursor("hello--> world");
        assert_eq!(scan_until_string(&mut c, "-->"), "hello");
        assert_eq!(scan_until_char(&mut c, '\0'), " world");
    }

    #[test]
    fn scan_until_string_handles_partial_false_starts() {
        let mut c = cursor("a-b--c-->end");
        assert_eq!(scan_until_string(&mut c, "-->"), "a-b--c");
    }

    #[test]
    fn scan_until_string_finds_terminator_overlapping_a_false_start() {
        // The dashes right before the real "-->" look like the start of
        // another match attempt; the scan must not restart from scratch
        // and run past the genuine terminator.
        let mut c = cursor("x--->end");
        assert_eq!(scan_until_string(&mut c, "-->"), "x-");
        assert_eq!(scan_until_char(&mut c, '\0'), "end");
    }

    #[test]
    fn scan_until_string_handles_repeating_cdata_terminator_prefix() {
        let mut c = cursor("]]]>rest");
        assert_eq!(scan_until_string(&mut c, "]]>"), "]");
        assert_eq!(scan_until_char(&mut c, '\0'), "rest");
    }

    #[test]
    fn scan_name_splits_prefix() {
        let mut c = cursor("svg:circle rest");
        assert_eq!(
            scan_name(&mut c),
            ("svg".to_string(), "circle".to_string())
        );
    }

    #[test]
    fn scan_name_lowercases() {
        let mut c = cursor("DIV");
        assert_eq!(scan_name(&mut c), (String::new(), "div".to_string()));
    }

    #[test]
    fn scan_name_empty_when_not_name_start() {
        let mut c = cursor("123abc");
        assert_eq!(scan_name(&mut c), (String::new(), String::new()));
    }

    #[test]
    fn scan_attr_value_quoted_decodes_entities() {
        let mut c = cursor("\"a &amp; b\" rest");
        assert_eq!(scan_attr_value(&mut c), "a & b");
    }

    #[test]
    fn scan_attr_value_unquoted() {
        let mut c = cursor("value/>");
        assert_eq!(scan_attr_value(&mut c), "value");
    }

    #[test]
    fn scan_raw_text_stops_before_matching_close_tag() {
        let mut c = cursor("var x = 1 < 2;</script>");
        assert_eq!(scan_raw_text(&mut c, "script"), "var x = 1 < 2;");
        assert!(match_literal(&mut c, "</script>", false));
    }

    #[test]
    fn scan_raw_text_ignores_unrelated_close_tags() {
        let mut c = cursor("a </b> b</style>");
        assert_eq!(scan_raw_text(&mut c, "style"), "a </b> b");
    }
}
