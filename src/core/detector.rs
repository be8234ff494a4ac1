//! Candidate detection: every enabled pattern scanned independently.

use regex::Captures;

use super::models::Span;
use crate::patterns::PatternDefinition;

/// Scan `text` with each pattern and merge in enhancer-contributed spans.
///
/// Each pattern contributes its own non-overlapping matches; spans from
/// different patterns may overlap freely and are left for the resolver.
pub fn detect<'a, I>(text: &str, patterns: I, enhancer_spans: Vec<Span>) -> Vec<Span>
where
    I: IntoIterator<Item = &'a PatternDefinition>,
{
    let mut candidates = Vec::new();

    for def in patterns {
        scan_pattern(text, def, &mut candidates);
    }

    for span in enhancer_spans {
        if span_in_bounds(text, &span) {
            candidates.push(span);
        } else {
            tracing::debug!(
                start = span.start,
                end = span.end,
                pattern = %span.pattern_type,
                "dropping out-of-range enhancer span"
            );
        }
    }

    candidates
}

/// All candidate spans for a single pattern.
///
/// Scanning resumes right after each extracted value, so trailing context a
/// match consumed (a table cell's closing `|`) can lead the next match.
pub fn scan_pattern(text: &str, def: &PatternDefinition, out: &mut Vec<Span>) {
    let mut at = 0;
    while at <= text.len() {
        let Some(caps) = def.regex.captures_at(text, at) else {
            break;
        };
        let Some(full) = caps.get(0) else {
            break;
        };
        let range = value_range(&caps, def.group).filter(|&(start, end)| start < end);

        at = match range {
            Some((_, end)) => end,
            None if full.end() > full.start() => full.end(),
            None => step_past(text, full.end()),
        };
        let Some((start, end)) = range else {
            continue;
        };

        let value = &text[start..end];
        if let Some(validator) = def.validator {
            if !validator(value) {
                tracing::trace!(pattern = %def.pattern_type, "candidate failed validation");
                continue;
            }
        }

        out.push(Span {
            start,
            end,
            pattern_type: def.pattern_type.clone(),
            priority: def.priority,
            matched: full.as_str().to_string(),
            value: value.to_string(),
        });
    }
}

/// Offset of the character after `at`, or past the end
fn step_past(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// Byte range of the value inside a match.
///
/// An explicit group must have participated. Otherwise the first non-empty
/// group wins, falling back to the whole match.
fn value_range(caps: &Captures<'_>, group: Option<usize>) -> Option<(usize, usize)> {
    if let Some(index) = group {
        return caps.get(index).map(|m| (m.start(), m.end()));
    }

    let full = caps.get(0)?;
    let chosen = (1..caps.len())
        .filter_map(|i| caps.get(i))
        .find(|m| !m.as_str().is_empty())
        .unwrap_or(full);

    Some((chosen.start(), chosen.end()))
}

fn span_in_bounds(text: &str, span: &Span) -> bool {
    span.start < span.end
        && span.end <= text.len()
        && text.is_char_boundary(span.start)
        && text.is_char_boundary(span.end)
        && text[span.start..span.end] == span.value
}
