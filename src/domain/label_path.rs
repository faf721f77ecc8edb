//! Decoding subroutes into hierarchical label paths.
//!
//! A subroute is a small grammar:
//!
//! ```text
//! subroute = group *( "+" group )
//! group    = segment *( "." segment )
//! segment  = word *( "_" word )
//! ```
//!
//! Each group becomes one label path. Segments are joined with `/` and each
//! word is title-cased, so `abc.def+foo_bar` decodes to `Abc/Def` and
//! `Foo Bar`. Empty groups, segments and words are passed through as empty
//! components; whether such a path resolves is up to the label store.

use std::fmt;

use super::subroute::Subroute;

/// Separates independent label paths within a subroute.
pub const GROUP_DELIMITER: char = '+';
/// Separates nesting levels within one path.
pub const HIERARCHY_DELIMITER: char = '.';
/// Separates words within one segment.
pub const WORD_DELIMITER: char = '_';
/// Joins nesting levels in the decoded label name.
pub const PATH_SEPARATOR: &str = "/";

/// A `/`-delimited hierarchical label name such as `Abc/Def`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelPath(String);

impl LabelPath {
    /// Returns the full label name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the nesting levels of this path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR)
    }

    /// Returns true if any nesting level is empty.
    pub fn has_empty_segment(&self) -> bool {
        self.segments().any(str::is_empty)
    }
}

impl fmt::Display for LabelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LabelPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for LabelPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LabelPath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Decodes a subroute into label paths, one per group, in order.
pub fn decode(subroute: &Subroute) -> Vec<LabelPath> {
    subroute
        .as_str()
        .split(GROUP_DELIMITER)
        .map(decode_group)
        .collect()
}

fn decode_group(group: &str) -> LabelPath {
    let segments: Vec<String> = group.split(HIERARCHY_DELIMITER).map(decode_segment).collect();
    LabelPath(segments.join(PATH_SEPARATOR))
}

fn decode_segment(segment: &str) -> String {
    segment
        .split(WORD_DELIMITER)
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first character of `word` and lowercases the rest.
///
/// Casing uses the locale-independent Unicode mappings. An empty word stays
/// empty.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode_str(raw: &str) -> Vec<String> {
        decode(&Subroute::new(raw))
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    #[test]
    fn decodes_groups_in_order() {
        assert_eq!(
            decode_str("abc.def+foo_bar+biz"),
            vec!["Abc/Def", "Foo Bar", "Biz"]
        );
    }

    #[test]
    fn decodes_full_example() {
        assert_eq!(decode_str("abc.def+foo_bar"), vec!["Abc/Def", "Foo Bar"]);
    }

    #[test]
    fn title_cases_mixed_case_words() {
        assert_eq!(decode_str("nEWS_lETTER.mOnThLy"), vec!["News Letter/Monthly"]);
    }

    #[test]
    fn direct_sentinel_decodes_to_single_label() {
        assert_eq!(decode(&Subroute::direct()), vec![LabelPath("Direct".into())]);
    }

    #[test]
    fn empty_components_are_kept() {
        assert_eq!(decode_str(""), vec![""]);
        assert_eq!(decode_str("a++b"), vec!["A", "", "B"]);
        assert_eq!(decode_str("a..b"), vec!["A//B"]);
        assert_eq!(decode_str("foo__bar"), vec!["Foo  Bar"]);
        assert_eq!(decode_str(".x"), vec!["/X"]);
    }

    #[test]
    fn is_deterministic() {
        let subroute = Subroute::new("one.two+three");
        assert_eq!(decode(&subroute), decode(&subroute));
    }

    #[test]
    fn path_segments() {
        let paths = decode(&Subroute::new("abc.def_ghi"));
        let segments: Vec<&str> = paths[0].segments().collect();
        assert_eq!(segments, vec!["Abc", "Def Ghi"]);
        assert!(!paths[0].has_empty_segment());

        let empty = decode(&Subroute::new("abc..def"));
        assert!(empty[0].has_empty_segment());
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("hello"), "Hello");
        assert_eq!(title_case("WORLD"), "World");
        assert_eq!(title_case("x"), "X");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("1st"), "1st");
        assert_eq!(title_case("élan"), "Élan");
    }
}
