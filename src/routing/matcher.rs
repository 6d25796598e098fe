//! Best-match lookup against a route tree.
//!
//! # Responsibilities
//! - Walk the tree one path segment at a time (literal first, then regex)
//! - Remember the latest recording: a node with a destination, or a
//!   capturing regex match (which drops any shallower destination)
//! - Substitute `$n` placeholders with accumulated regex captures
//! - Reattach unmatched tail segments and the original query/fragment
//!
//! # Design Decisions
//! - No backtracking: once a segment is consumed the walk never revisits it
//! - A dead end stops the walk; it is not a failure
//! - Regex children are tried in insertion order, first full match wins

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::routing::path::{collapse_slashes, normalize_path, split_query_and_hash};
use crate::routing::tree::RouteTree;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)").expect("placeholder pattern is valid"));

/// Find the best rewrite of `url` in `tree`.
///
/// Returns `None` when nothing in the tree applies.
pub fn find_best_match(tree: &RouteTree, url: &str) -> Option<String> {
    let (path, misc) = split_query_and_hash(url);
    let normalized = normalize_path(path);

    if normalized.is_empty() {
        if let Some(root_route) = tree.root_route() {
            return Some(format!("{root_route}{misc}"));
        }
    }

    if !tree.root().has_children() {
        return None;
    }

    let segments: Vec<&str> = normalized.split('/').collect();
    let mut node = tree.root();
    // Latest recording: destination (if any) and the segment index it was made at.
    let mut recorded: Option<(Option<&str>, usize)> = None;
    let mut captures: Vec<&str> = Vec::new();

    for (index, &segment) in segments.iter().enumerate() {
        if let Some(child) = node.literal_child(segment) {
            if let Some(value) = child.value() {
                recorded = Some((Some(value), index));
            }
            node = child;
            continue;
        }

        let Some((groups, child)) = node
            .regex_children()
            .find_map(|(regex, child)| regex.captures(segment).map(|groups| (groups, child)))
        else {
            break;
        };

        // A capturing match is a recording even without a destination; it
        // moves the index and clears any shallower destination.
        if child.value().is_some() || groups.len() > 1 {
            recorded = Some((child.value(), index));
            captures.extend(
                groups
                    .iter()
                    .skip(1)
                    .map(|group| group.map_or("", |m| m.as_str())),
            );
        }
        node = child;
    }

    let (value, index) = match recorded {
        Some((Some(value), index)) => (value, index),
        _ => return None,
    };

    let mut result = String::with_capacity(url.len() + value.len() + 1);
    result.push('/');
    result.push_str(&substitute(value, &captures));

    let tail = &segments[index + 1..];
    if !tail.is_empty() {
        result.push('/');
        result.push_str(&tail.join("/"));
    }

    let mut result = collapse_slashes(&result);
    result.push_str(misc);
    Some(result)
}

/// Replace `$1`, `$2`, ... with the matching capture.
///
/// Placeholders past the number of captures are left as written.
fn substitute(template: &str, captures: &[&str]) -> String {
    if captures.is_empty() {
        return template.to_string();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| captures.get(n))
                .map_or_else(|| caps[0].to_string(), |value| value.to_string())
        })
        .into_owned()
}

impl RouteTree {
    /// Best rewrite of `url` in this tree. See [`find_best_match`].
    pub fn find(&self, url: &str) -> Option<String> {
        find_best_match(self, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::mapping::RouteMapping;

    fn tree(pairs: &[(&str, &str)]) -> RouteTree {
        RouteTree::from_mapping(&RouteMapping::from_pairs(pairs.iter().copied())).unwrap()
    }

    #[test]
    fn test_root_route() {
        let t = tree(&[("/", "OnlineSbisRu")]);
        assert_eq!(t.find("/"), Some("/OnlineSbisRu".into()));
        assert_eq!(t.find(""), Some("/OnlineSbisRu".into()));
        assert_eq!(t.find("/?x=1"), Some("/OnlineSbisRu?x=1".into()));
        assert_eq!(t.find("/other"), None);
    }

    #[test]
    fn test_literal_match() {
        let t = tree(&[("/my-page", "MyModule/my-page")]);
        assert_eq!(t.find("/my-page"), Some("/MyModule/my-page".into()));
        assert_eq!(t.find("my-page/"), Some("/MyModule/my-page".into()));
        assert_eq!(t.find("/your-page"), None);
    }

    #[test]
    fn test_regex_capture_substitution() {
        let t = tree(&[("/regex:^([0-9]{5})$", "SomeModule/$1")]);
        assert_eq!(t.find("/12345"), Some("/SomeModule/12345".into()));
        assert_eq!(t.find("/1234"), None);
        assert_eq!(t.find("/123456"), None);
    }

    #[test]
    fn test_capturing_regex_without_value_clears_shallower_match() {
        let t = tree(&[("/a", "A/$1"), ("/a/regex:(\\d+)/b", "B")]);
        assert_eq!(t.find("/a/5/c"), None);
        assert_eq!(t.find("/a/5/b/c"), Some("/B/c".into()));
        assert_eq!(t.find("/a/x"), Some("/A/$1/x".into()));
    }

    #[test]
    fn test_non_capturing_regex_without_value_keeps_match() {
        let t = tree(&[("/a", "A"), ("/a/regex:\\d+/b", "B")]);
        assert_eq!(t.find("/a/5/c"), Some("/A/5/c".into()));
    }

    #[test]
    fn test_regex_must_match_whole_segment() {
        let t = tree(&[("/regex:[0-9]+", "Num/$0")]);
        assert_eq!(t.find("/12ab"), None);
        assert_eq!(t.find("/12"), Some("/Num/$0".into()));
    }

    #[test]
    fn test_captures_accumulate_across_segments() {
        let t = tree(&[("/user/regex:(\\d+)/regex:(\\w+)-(\\w+)", "Profile/$3/$1/$2")]);
        assert_eq!(t.find("/user/42/foo-bar"), Some("/Profile/bar/42/foo".into()));
    }

    #[test]
    fn test_placeholders_are_parsed_greedily() {
        let t = tree(&[("/regex:(a)", "M/$1/$12")]);
        assert_eq!(t.find("/a"), Some("/M/a/$12".into()));
    }

    #[test]
    fn test_regex_alternatives_in_insertion_order() {
        let t = tree(&[("/regex:(\\d+)", "Digits/$1"), ("/regex:(.+)", "Any/$1")]);
        assert_eq!(t.find("/77"), Some("/Digits/77".into()));
        assert_eq!(t.find("/abc"), Some("/Any/abc".into()));
    }

    #[test]
    fn test_literal_preferred_over_regex() {
        let t = tree(&[("/regex:(.+)", "Any/$1"), ("/fixed", "Fixed")]);
        assert_eq!(t.find("/fixed"), Some("/Fixed".into()));
    }

    #[test]
    fn test_tail_preservation() {
        let t = tree(&[("/a/b", "X")]);
        assert_eq!(t.find("/a/b/c/d"), Some("/X/c/d".into()));
        assert_eq!(t.find("/a"), None);
    }

    #[test]
    fn test_deepest_value_wins() {
        let t = tree(&[("/a", "A"), ("/a/b/c", "ABC")]);
        assert_eq!(t.find("/a/b"), Some("/A/b".into()));
        assert_eq!(t.find("/a/b/c/d"), Some("/ABC/d".into()));
        assert_eq!(t.find("/a/x/c"), Some("/A/x/c".into()));
    }

    #[test]
    fn test_query_and_fragment_passthrough() {
        let t = tree(&[("/a", "A")]);
        assert_eq!(t.find("/a?x=1"), Some("/A?x=1".into()));
        assert_eq!(t.find("/a#top"), Some("/A#top".into()));
        assert_eq!(t.find("/a/b?x=1#top"), Some("/A/b?x=1#top".into()));
    }

    #[test]
    fn test_scheme_is_stripped() {
        let t = tree(&[("/host/a", "A")]);
        assert_eq!(t.find("https://host/a/b"), Some("/A/b".into()));
    }

    #[test]
    fn test_slashes_collapsed() {
        let t = tree(&[("/a", "/Module/")]);
        assert_eq!(t.find("/a"), Some("/Module/".into()));
        assert_eq!(t.find("/a/b"), Some("/Module/b".into()));
    }

    #[test]
    fn test_empty_tree() {
        let t = RouteTree::empty();
        assert_eq!(t.find("/"), None);
        assert_eq!(t.find("/anything"), None);
    }

    #[test]
    fn test_substitute_without_captures() {
        assert_eq!(substitute("M/$1", &[]), "M/$1");
        assert_eq!(substitute("M/$1-$1", &["x"]), "M/x-x");
    }
}
