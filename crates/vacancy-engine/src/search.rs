//! Building lookup by approximate name.
//!
//! Users rarely type a building name exactly as the dataset spells it. A
//! query is matched case-insensitively against each name: an exact match
//! ranks first, then names that start with the query, then names that
//! contain it, then names within a small edit distance (typos). Results
//! always carry the stored name, so they can be passed straight to
//! [`RoomRepository::rooms_by_building`](crate::repository::RoomRepository::rooms_by_building).

use serde::Serialize;

/// Queries shorter than this (after trimming) match nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Default result limit.
pub const DEFAULT_MAX_RESULTS: usize = 10;

const EXACT: f64 = 1.0;
const PREFIX: f64 = 0.9;
const SUBSTRING: f64 = 0.7;
/// Similarity a typo must exceed to count as a match at all.
const FUZZY_THRESHOLD: f64 = 0.6;
/// Fuzzy matches are scaled down so they always rank below substring hits.
const FUZZY_WEIGHT: f64 = 0.5;

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingMatch {
    pub name: String,
    pub score: f64,
}

/// Rank `names` against `query`, best first, at most `max` results.
///
/// Names are compared both as stored and with a repeated-name suffix removed
/// (see [`clean_building_name`]). Ties keep the order of `names`.
pub fn search_buildings<I, S>(names: I, query: &str, max: usize) -> Vec<BuildingMatch>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let mut matches: Vec<BuildingMatch> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let stored = name.to_lowercase();
            let cleaned = clean_building_name(name).to_lowercase();
            let score = [stored.as_str(), cleaned.as_str()]
                .into_iter()
                .filter_map(|candidate| rank(&query, candidate))
                .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))))?;
            Some(BuildingMatch {
                name: name.to_string(),
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(max);
    matches
}

fn rank(query: &str, name: &str) -> Option<f64> {
    if name == query {
        Some(EXACT)
    } else if name.starts_with(query) {
        Some(PREFIX)
    } else if name.contains(query) {
        Some(SUBSTRING)
    } else {
        let ratio = similarity(query, name);
        (ratio > FUZZY_THRESHOLD).then_some(ratio * FUZZY_WEIGHT)
    }
}

/// `1 - distance / longer_len`, in `0.0..=1.0`.
fn similarity(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 1.0;
    }
    (longer - levenshtein(a, b)) as f64 / longer as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Strip the duplicated form some registrar exports produce, where the name
/// repeats after a room number: `"Foellinger Auditorium 120 Foellinger
/// Auditorium"` becomes `"Foellinger Auditorium"`. Up to three repeats are
/// recognized; anything else is returned unchanged.
pub fn clean_building_name(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();

    for len in 1..words.len() {
        let (unit, rest) = words.split_at(len);
        let chunk = len + 1;
        if rest.is_empty() || rest.len() % chunk != 0 || rest.len() / chunk > 3 {
            continue;
        }
        let repeats = rest.chunks(chunk).all(|part| {
            part[0].chars().all(|c| c.is_ascii_digit()) && &part[1..] == unit
        });
        if repeats {
            return unit.join(" ");
        }
    }
    name.to_string()
}
