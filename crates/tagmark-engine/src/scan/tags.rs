use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// The marker character that introduces each tag token.
pub const TAG_MARKER: char = '#';

static SEQ_START_REGEX: OnceLock<Regex> = OnceLock::new();
static ATTR_SEP_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches a colon that could introduce a tag sequence: the `#` may follow
/// the colon directly or after a whitespace run (`: #a` == `:#a`).
fn seq_start_regex() -> &'static Regex {
    SEQ_START_REGEX.get_or_init(|| Regex::new(r":\s*#").expect("Invalid sequence-start regex"))
}

/// Attribute groups accept either `;` or `,` between pairs.
fn attr_sep_regex() -> &'static Regex {
    ATTR_SEP_REGEX.get_or_init(|| Regex::new(r"[;,]").expect("Invalid attribute-separator regex"))
}

/// The parsed result of one trailing-tag string.
///
/// Names keep their source order with duplicates preserved. Attributes from
/// every tag in the sequence merge into one flat map scoped to the span,
/// later tags overwriting earlier ones on key collision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSequence {
    pub names: Vec<String>,
    pub attrs: BTreeMap<String, String>,
}

impl TagSequence {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parses a raw trailing-tag string (leading colon included) into a
/// [`TagSequence`].
///
/// A string without a leading colon, or a colon with no `#`-prefixed token
/// after it, yields an empty sequence. Absence of tags is not an error.
pub fn parse_sequence(s: &str) -> TagSequence {
    let trimmed = s.trim_start();
    match trimmed.strip_prefix(':') {
        Some(tail) => consume_tokens(tail).0,
        None => TagSequence::default(),
    }
}

/// Inner tagging: finds a tag sequence anchored at the end of a span
/// interior.
///
/// Returns the byte offset where the display text ends (the colon position)
/// and the parsed sequence. The winning colon is the rightmost one whose
/// entire tail tokenizes as tag tokens; text after the last token other
/// than whitespace disqualifies a candidate.
pub fn match_trailing(interior: &str) -> Option<(usize, TagSequence)> {
    let candidates: Vec<usize> = seq_start_regex()
        .find_iter(interior)
        .map(|m| m.start())
        .collect();
    for &colon in candidates.iter().rev() {
        let tail = &interior[colon + 1..];
        let (seq, used) = consume_tokens(tail);
        if seq.is_empty() {
            continue;
        }
        if !tail[used..].trim().is_empty() {
            continue;
        }
        return Some((colon, seq));
    }
    None
}

/// Outer tagging: finds a tag sequence anchored at the start of the text
/// following a span's closing delimiter.
///
/// Returns the byte length of the matched prefix (which the caller must
/// treat as consumed) and the parsed sequence. Unlike [`match_trailing`],
/// the sequence need not extend to the end of the text.
pub fn match_leading(trailing: &str) -> Option<(usize, TagSequence)> {
    let ws = trailing.len() - trailing.trim_start().len();
    let rest = &trailing[ws..];
    if !rest.starts_with(':') {
        return None;
    }
    let tail = &rest[1..];
    let (seq, used) = consume_tokens(tail);
    if seq.is_empty() {
        return None;
    }
    Some((ws + 1 + used, seq))
}

/// Consumes whitespace-separated `#name(attrs)` tokens from the start of
/// `s`, returning the parsed sequence and the byte length consumed through
/// the end of the last token.
fn consume_tokens(s: &str) -> (TagSequence, usize) {
    let mut seq = TagSequence::default();
    let mut consumed = 0;
    loop {
        let rest = &s[consumed..];
        let ws = rest.len() - rest.trim_start().len();
        let start = consumed + ws;
        if !s[start..].starts_with(TAG_MARKER) {
            break;
        }
        let name_start = start + TAG_MARKER.len_utf8();
        let name_len: usize = s[name_start..]
            .chars()
            .take_while(|c| !c.is_whitespace() && !matches!(c, ':' | '(' | ')'))
            .map(char::len_utf8)
            .sum();
        if name_len == 0 {
            // A bare marker ends the token run.
            break;
        }
        let name_end = name_start + name_len;
        let mut end = name_end;
        if s[name_end..].starts_with('(') {
            match s[name_end + 1..].find(')') {
                Some(off) => {
                    merge_attrs(&s[name_end + 1..name_end + 1 + off], &mut seq.attrs);
                    end = name_end + 1 + off + 1;
                }
                None => {
                    // Unbalanced group: the attributes are dropped but the
                    // name is still recorded, and the rest of the sequence
                    // text is swallowed with the broken group.
                    end = s.len();
                }
            }
        }
        seq.names.push(s[name_start..name_end].to_string());
        consumed = end;
        if consumed >= s.len() {
            break;
        }
    }
    (seq, consumed)
}

/// Splits one parenthesized attribute group into key/value pairs and merges
/// them into the span-level map. Pairs missing a non-empty key or value are
/// silently dropped.
fn merge_attrs(group: &str, attrs: &mut BTreeMap<String, String>) {
    for part in attr_sep_regex().split(group) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        attrs.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case(": #a #b(note=x)", &["a", "b"], &[("note", "x")])]
    #[case(":#a", &["a"], &[])]
    #[case(":   #a", &["a"], &[])]
    #[case(": #a(x=1;y=2) #a(y=3)", &["a", "a"], &[("x", "1"), ("y", "3")])]
    #[case(": #a(x=1, y=2)", &["a"], &[("x", "1"), ("y", "2")])]
    #[case(": #a(justkey)", &["a"], &[])]
    #[case(": #a()", &["a"], &[])]
    #[case(": #a( = ; x = 1 )", &["a"], &[("x", "1")])]
    fn parse_sequence_cases(
        #[case] input: &str,
        #[case] names: &[&str],
        #[case] expected_attrs: &[(&str, &str)],
    ) {
        let seq = parse_sequence(input);
        assert_eq!(seq.names, names);
        assert_eq!(seq.attrs, attrs(expected_attrs));
    }

    #[test]
    fn unicode_tag_names() {
        let seq = parse_sequence(": #気分 #外出");
        assert_eq!(seq.names, vec!["気分", "外出"]);
    }

    #[test]
    fn colon_without_marker_yields_empty() {
        assert!(parse_sequence(": nothing here").is_empty());
        assert!(parse_sequence(":").is_empty());
        assert!(parse_sequence("plain text").is_empty());
    }

    #[test]
    fn unbalanced_group_keeps_name_drops_attrs() {
        let seq = parse_sequence(": #a(x=1");
        assert_eq!(seq.names, vec!["a"]);
        assert!(seq.attrs.is_empty());
    }

    #[test]
    fn attr_value_keeps_internal_equals() {
        // Only the first `=` splits key from value.
        let seq = parse_sequence(": #a(expr=x=y)");
        assert_eq!(seq.attrs, attrs(&[("expr", "x=y")]));
    }

    #[test]
    fn match_trailing_splits_display_text() {
        let (end, seq) = match_trailing("日記: #気分 #外出").unwrap();
        assert_eq!(&"日記: #気分 #外出"[..end], "日記");
        assert_eq!(seq.names, vec!["気分", "外出"]);
    }

    #[test]
    fn match_trailing_requires_end_anchor() {
        // Tags followed by ordinary text are not a trailing sequence.
        assert!(match_trailing("note: #a and more words").is_none());
    }

    #[test]
    fn match_trailing_allows_trailing_whitespace() {
        let interior = " 対象 : #tag1 #tag2(note=メモ) ";
        let (end, seq) = match_trailing(interior).unwrap();
        assert_eq!(interior[..end].trim(), "対象");
        assert_eq!(seq.names, vec!["tag1", "tag2"]);
        assert_eq!(seq.attrs, attrs(&[("note", "メモ")]));
    }

    #[test]
    fn match_trailing_picks_rightmost_viable_colon() {
        let interior = "x: #a: #b";
        let (end, seq) = match_trailing(interior).unwrap();
        // `#a:` cannot tokenize through to the end, so the later colon wins.
        assert_eq!(&interior[..end], "x: #a");
        assert_eq!(seq.names, vec!["b"]);
    }

    #[test]
    fn match_trailing_colon_inside_attr_group() {
        let interior = "t: #a(u=b:#c)";
        let (end, seq) = match_trailing(interior).unwrap();
        assert_eq!(&interior[..end], "t");
        assert_eq!(seq.names, vec!["a"]);
        assert_eq!(seq.attrs, attrs(&[("u", "b:#c")]));
    }

    #[test]
    fn match_leading_consumes_prefix_only() {
        let trailing = ": #t1 #t2 and the rest";
        let (used, seq) = match_leading(trailing).unwrap();
        assert_eq!(seq.names, vec!["t1", "t2"]);
        assert_eq!(&trailing[used..], " and the rest");
    }

    #[test]
    fn match_leading_allows_space_before_colon() {
        let (used, seq) = match_leading(" : #t").unwrap();
        assert_eq!(seq.names, vec!["t"]);
        assert_eq!(used, " : #t".len());
    }

    #[test]
    fn match_leading_rejects_non_sequence() {
        assert!(match_leading("no tags here").is_none());
        assert!(match_leading(": not a tag").is_none());
        assert!(match_leading("").is_none());
    }
}
