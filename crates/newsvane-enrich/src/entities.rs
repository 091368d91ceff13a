//! Heuristic named-entity extraction.
//!
//! Language-neutral and regex based: capitalized phrases are harvested and
//! classified by fixed-priority rules. No model, no I/O, never fails.

use std::collections::HashSet;

use regex::Regex;

use newsvane_core::EntityKind;

/// One extracted entity with its coarse classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntity {
    pub name: String,
    pub kind: EntityKind,
}

/// Suffix tokens that mark a phrase as an organization.
const ORG_SUFFIXES: &[&str] = &[
    "Group",
    "Corp",
    "Company",
    "Council",
    "Party",
    "Bank",
    "University",
    "Committee",
    "Agency",
    "Authority",
    "Ministry",
    "Parliament",
    "Police",
    "Court",
    "Institute",
    "Foundation",
];

/// Exact-match geographic terms.
const GEO_TERMS: &[&str] = &[
    "Sweden",
    "Stockholm",
    "Gothenburg",
    "G\u{f6}teborg",
    "Malmo",
    "Malm\u{f6}",
    "Uppsala",
    "Europe",
    "EU",
    "Nordic",
    "Scandinavia",
];

/// Extracts up to `limit` named entities from free text.
///
/// Harvests capitalized phrases of one to four words (Nordic initials
/// included) and classifies each by the first matching rule, checked in
/// fixed priority order: organizational suffix, geographic term, two or
/// more capitalized words (person), otherwise other. The result is
/// deduplicated by name preserving first-seen order and capped at `limit`.
/// Blank input yields an empty sequence. Deterministic for a given text
/// and limit.
#[must_use]
pub fn extract_entities(text: &str, limit: usize) -> Vec<ExtractedEntity> {
    if text.trim().is_empty() || limit == 0 {
        return Vec::new();
    }

    let caps_phrase = Regex::new(
        r"\b([A-Z\u{c5}\u{c4}\u{d6}][\p{L}\u{2019}'-]+(?:\s+[A-Z\u{c5}\u{c4}\u{d6}][\p{L}\u{2019}'-]+){0,3})\b",
    )
    .expect("valid capitalized-phrase regex");

    let mut seen: HashSet<String> = HashSet::new();
    let mut entities: Vec<ExtractedEntity> = Vec::new();

    for capture in caps_phrase.captures_iter(text) {
        let name = capture[1].to_string();
        if name.chars().count() < 3 {
            continue;
        }
        if seen.contains(&name) {
            continue;
        }

        let kind = classify(&name);
        seen.insert(name.clone());
        entities.push(ExtractedEntity { name, kind });

        if entities.len() == limit {
            break;
        }
    }

    entities
}

/// First matching rule wins; rules are checked in fixed priority order so
/// ties cannot occur.
fn classify(name: &str) -> EntityKind {
    let last = name.split_whitespace().last().unwrap_or("");

    if ORG_SUFFIXES.contains(&last) {
        return EntityKind::Organization;
    }

    if GEO_TERMS.contains(&name) {
        return EntityKind::Place;
    }

    if name.split_whitespace().count() >= 2 {
        return EntityKind::Person;
    }

    EntityKind::Other
}
