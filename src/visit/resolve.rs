//! Handler resolution over the kind hierarchy.
//!
//! Resolution is a breadth-first search outward from the node's concrete
//! kind: the first depth at which the visitor declares any matching kind
//! wins, and among same-depth matches the unique most specific one is
//! chosen. Two incomparable matches are a programming error, reported with
//! both kind names. The search is deterministic and depends only on the
//! declared kind set and the static hierarchy, which is what makes its
//! results cacheable.

use crate::node::{Kind, KindSet};

use super::error::VisitError;

/// Outcome of a resolution: the declared kind whose handler applies, or
/// proof that the hierarchy was exhausted. Both outcomes are cacheable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Handler(Kind),
    NotFound,
}

pub(crate) fn resolve(
    visitor: &'static str,
    declared: KindSet,
    concrete: Kind,
) -> Result<Resolution, VisitError> {
    let mut frontier = vec![concrete];
    let mut visited = KindSet::EMPTY;
    visited.insert(concrete);

    while !frontier.is_empty() {
        let matches: Vec<Kind> = frontier
            .iter()
            .copied()
            .filter(|&kind| declared.contains(kind))
            .collect();
        if !matches.is_empty() {
            return most_specific(visitor, concrete, matches);
        }
        let mut next = Vec::new();
        for kind in frontier {
            for &sup in kind.supers() {
                if !visited.contains(sup) {
                    visited.insert(sup);
                    next.push(sup);
                }
            }
        }
        frontier = next;
    }
    Ok(Resolution::NotFound)
}

/// Pick the candidate that is a sub-kind of every other candidate; if no
/// such candidate exists, two of them are incomparable and resolution
/// fails.
fn most_specific(
    visitor: &'static str,
    node: Kind,
    candidates: Vec<Kind>,
) -> Result<Resolution, VisitError> {
    if candidates.len() == 1 {
        return Ok(Resolution::Handler(candidates[0]));
    }
    if let Some(&best) = candidates
        .iter()
        .find(|&&m| candidates.iter().all(|&c| m.is_subkind_of(c)))
    {
        return Ok(Resolution::Handler(best));
    }
    for (i, &first) in candidates.iter().enumerate() {
        for &second in &candidates[i + 1..] {
            if !first.is_subkind_of(second) && !second.is_subkind_of(first) {
                return Err(VisitError::ambiguous(visitor, node, first, second));
            }
        }
    }
    Err(VisitError::ambiguous(
        visitor,
        node,
        candidates[0],
        candidates[1],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(kinds: &[Kind]) -> KindSet {
        kinds.iter().copied().collect()
    }

    #[test]
    fn test_concrete_kind_wins_at_depth_zero() {
        let set = declared(&[Kind::Text, Kind::TextBearing]);
        let got = resolve("t", set, Kind::Text).unwrap();
        assert_eq!(got, Resolution::Handler(Kind::Text));
    }

    #[test]
    fn test_capability_found_one_level_up() {
        let set = declared(&[Kind::ListNode]);
        let got = resolve("t", set, Kind::Document).unwrap();
        assert_eq!(got, Resolution::Handler(Kind::ListNode));
    }

    #[test]
    fn test_any_node_is_the_catch_all() {
        let set = declared(&[Kind::AnyNode]);
        let got = resolve("t", set, Kind::Url).unwrap();
        assert_eq!(got, Resolution::Handler(Kind::AnyNode));
    }

    #[test]
    fn test_exhausted_hierarchy_is_not_found() {
        let set = declared(&[Kind::Url]);
        let got = resolve("t", set, Kind::Text).unwrap();
        assert_eq!(got, Resolution::NotFound);
    }

    #[test]
    fn test_unrelated_capabilities_are_ambiguous() {
        let set = declared(&[Kind::ListNode, Kind::BlockNode]);
        let err = resolve("t", set, Kind::Paragraph).unwrap_err();
        match err {
            VisitError::AmbiguousHandler {
                node, first, second, ..
            } => {
                assert_eq!(node, "paragraph");
                let mut pair = [first, second];
                pair.sort_unstable();
                assert_eq!(pair, ["block-node", "list-node"]);
            }
            other => panic!("expected AmbiguousHandler, got {other:?}"),
        }
    }

    #[test]
    fn test_deeper_match_never_shadows_shallower() {
        // any-node is declared but list-node sits closer to document
        let set = declared(&[Kind::AnyNode, Kind::ListNode]);
        let got = resolve("t", set, Kind::Document).unwrap();
        assert_eq!(got, Resolution::Handler(Kind::ListNode));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let set = declared(&[Kind::ListNode, Kind::Text]);
        let first = resolve("t", set, Kind::Title).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve("t", set, Kind::Title).unwrap(), first);
        }
    }
}
