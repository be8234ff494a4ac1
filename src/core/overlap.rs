//! Overlap resolution between competing candidate spans.
//!
//! Enhancer spans that touch a built-in match are discarded first. After
//! that the most encompassing match wins; among equal-length spans the one
//! with the higher-ranked (numerically lower) priority wins.

use std::cmp::Reverse;

use super::models::{PatternType, Span};

/// Select a non-overlapping subset of `candidates`, sorted by start offset.
pub fn resolve(mut candidates: Vec<Span>) -> Vec<Span> {
    drop_entities_over_builtins(&mut candidates);
    candidates.sort_by_key(|s| (s.start, Reverse(s.len()), s.priority));

    let mut accepted: Vec<Span> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let Some(last) = accepted.last_mut() else {
            accepted.push(candidate);
            continue;
        };

        if candidate.start >= last.end {
            accepted.push(candidate);
        } else if supersedes(&candidate, last) {
            // Accepted spans never overlap and are sorted, so the candidate
            // cannot reach back past `last`
            *last = candidate;
        }
    }

    accepted
}

/// Enhancer guesses never override a built-in structural match
fn drop_entities_over_builtins(candidates: &mut Vec<Span>) {
    let structural: Vec<(usize, usize)> = candidates
        .iter()
        .filter(|s| matches!(s.pattern_type, PatternType::Builtin(_)))
        .map(|s| (s.start, s.end))
        .collect();
    if structural.is_empty() {
        return;
    }

    candidates.retain(|s| {
        !matches!(s.pattern_type, PatternType::Entity(_))
            || !structural
                .iter()
                .any(|&(start, end)| s.start < end && start < s.end)
    });
}

/// Whether `candidate` should replace an overlapping, already accepted span
fn supersedes(candidate: &Span, existing: &Span) -> bool {
    if candidate.len() != existing.len() {
        return candidate.len() > existing.len();
    }
    candidate.priority < existing.priority
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::BuiltinPattern;

    fn span(start: usize, end: usize, kind: BuiltinPattern) -> Span {
        Span {
            start,
            end,
            pattern_type: PatternType::Builtin(kind),
            priority: kind.priority(),
            matched: String::new(),
            value: String::new(),
        }
    }

    #[test]
    fn test_url_encloses_hostname() {
        let url = span(0, 10, BuiltinPattern::Url);
        let host = span(4, 8, BuiltinPattern::Hostname);

        let resolved = resolve(vec![host, url.clone()]);
        assert_eq!(resolved, vec![url]);
    }

    #[test]
    fn test_equal_range_prefers_priority() {
        let jwt = span(5, 40, BuiltinPattern::Jwt);
        let key = span(5, 40, BuiltinPattern::ApiKey);

        let resolved = resolve(vec![key, jwt.clone()]);
        assert_eq!(resolved, vec![jwt]);
    }

    #[test]
    fn test_disjoint_spans_sorted() {
        let a = span(20, 25, BuiltinPattern::Ipv4);
        let b = span(0, 5, BuiltinPattern::Email);
        let c = span(5, 9, BuiltinPattern::Date);

        let resolved = resolve(vec![a.clone(), b.clone(), c.clone()]);
        assert_eq!(resolved, vec![b, c, a]);
    }

    #[test]
    fn test_partial_overlap_keeps_longer() {
        let short = span(0, 6, BuiltinPattern::Email);
        let long = span(3, 15, BuiltinPattern::Date);

        let resolved = resolve(vec![short, long.clone()]);
        assert_eq!(resolved, vec![long]);
    }

    #[test]
    fn test_partial_overlap_equal_length_uses_priority() {
        let low = span(0, 6, BuiltinPattern::Date);
        let high = span(3, 9, BuiltinPattern::Email);

        let resolved = resolve(vec![low, high.clone()]);
        assert_eq!(resolved, vec![high]);
    }

    #[test]
    fn test_nested_chain() {
        let url = span(0, 30, BuiltinPattern::Url);
        let host = span(8, 20, BuiltinPattern::Hostname);
        let path = span(20, 30, BuiltinPattern::Path);
        let ip = span(31, 38, BuiltinPattern::Ipv4);

        let resolved = resolve(vec![path, ip.clone(), host, url.clone()]);
        assert_eq!(resolved, vec![url, ip]);
    }

    #[test]
    fn test_result_never_overlaps() {
        let candidates = vec![
            span(0, 4, BuiltinPattern::Ipv4),
            span(2, 8, BuiltinPattern::Hostname),
            span(6, 12, BuiltinPattern::Email),
            span(11, 13, BuiltinPattern::Date),
            span(12, 20, BuiltinPattern::Url),
        ];
        let resolved = resolve(candidates);
        for pair in resolved.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    fn entity(start: usize, end: usize, label: &str) -> Span {
        Span {
            start,
            end,
            pattern_type: PatternType::Entity(label.to_string()),
            priority: 100,
            matched: String::new(),
            value: String::new(),
        }
    }

    #[test]
    fn test_enclosing_entity_does_not_displace_builtin() {
        let jwt = span(12, 60, BuiltinPattern::Jwt);
        let person = entity(5, 60, "PERSON");

        let resolved = resolve(vec![person, jwt.clone()]);
        assert_eq!(resolved, vec![jwt]);
    }

    #[test]
    fn test_partially_overlapping_entity_is_dropped() {
        let ip = span(5, 13, BuiltinPattern::Ipv4);
        let org = entity(0, 8, "ORG");
        let elsewhere = entity(20, 30, "ORG");

        let resolved = resolve(vec![org, ip.clone(), elsewhere.clone()]);
        assert_eq!(resolved, vec![ip, elsewhere]);
    }

    #[test]
    fn test_entity_still_beats_shorter_custom() {
        let custom = Span {
            start: 4,
            end: 8,
            pattern_type: PatternType::Custom("TICKET".to_string()),
            priority: 1000,
            matched: String::new(),
            value: String::new(),
        };
        let org = entity(0, 10, "ORG");

        let resolved = resolve(vec![custom, org.clone()]);
        assert_eq!(resolved, vec![org]);
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve(Vec::new()).is_empty());
    }
}
