//! Incremental search ranking over a category's items.
//!
//! [`rank`] is a pure function of `(items, query)`, cheap enough to run on
//! every keystroke. Matching is case-insensitive substring matching against
//! the name, description and id/code of each item.
//!
//! # Scoring
//!
//! | Condition                         | Points |
//! |-----------------------------------|--------|
//! | name equals query                 | 100    |
//! | name starts with query            | 50     |
//! | name contains query               | 30     |
//! | description contains query        | +20    |
//! | id or code contains query         | +10    |
//!
//! The three name conditions are mutually exclusive; the highest applicable
//! one counts. Results are sorted by descending score with a stable sort, so
//! equal scores keep fetch order.

use crate::domain::Item;

const NAME_EXACT: u32 = 100;
const NAME_PREFIX: u32 = 50;
const NAME_CONTAINS: u32 = 30;
const DESCRIPTION_CONTAINS: u32 = 20;
const CODE_CONTAINS: u32 = 10;

/// Lowercases and trims a raw query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Filters and orders `items` for `query`.
///
/// An empty (or whitespace-only) query returns every item in its original
/// order.
///
/// # Example
///
/// ```rust
/// use catalog_browser::app::ranking::rank;
/// use catalog_browser::domain::Item;
///
/// let items = vec![Item::named("IntelliJ IDEA"), Item::named("DataGrip"), Item::named("Idea Helper")];
/// let ranked = rank(&items, "idea");
/// let names: Vec<&str> = ranked.iter().map(|i| i.name.as_str()).collect();
/// assert_eq!(names, ["Idea Helper", "IntelliJ IDEA"]);
/// ```
#[must_use]
pub fn rank(items: &[Item], query: &str) -> Vec<Item> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return items.to_vec();
    }

    let _span = tracing::trace_span!("rank", total = items.len(), query_len = needle.len()).entered();

    let mut scored: Vec<(u32, &Item)> = items
        .iter()
        .filter_map(|item| score(item, &needle).map(|s| (s, item)))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    tracing::trace!(matched = scored.len(), "ranked items");

    scored.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Score of `item` against an already normalized, non-empty `needle`.
///
/// Returns `None` when the item does not match at all.
#[must_use]
pub fn score(item: &Item, needle: &str) -> Option<u32> {
    let name = item.name.to_lowercase();
    let name_points = if name == needle {
        NAME_EXACT
    } else if name.starts_with(needle) {
        NAME_PREFIX
    } else if name.contains(needle) {
        NAME_CONTAINS
    } else {
        0
    };

    let description_hit = item
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(needle));

    let code_hit = [item.id.as_deref(), item.code.as_deref()]
        .into_iter()
        .flatten()
        .any(|c| c.to_lowercase().contains(needle));

    if name_points == 0 && !description_hit && !code_hit {
        return None;
    }

    let mut total = name_points;
    if description_hit {
        total += DESCRIPTION_CONTAINS;
    }
    if code_hit {
        total += CODE_CONTAINS;
    }
    Some(total)
}

/// Character ranges of every non-overlapping occurrence of `query` in `text`.
///
/// Ranges are `(start, end)` character indices with exclusive end, suitable
/// for highlighting. Matching is case-insensitive; texts whose lowercase form
/// changes length are matched on a per-character basis so indices stay valid.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = normalize_query(query).chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    let hay: Vec<char> = text
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            Item::named("IntelliJ IDEA").with_code("II"),
            Item::named("DataGrip").with_code("DB"),
            Item::named("Idea Helper").with_description("IDEA plugin"),
            Item::named("Rider").with_code("RD").with_description("for .NET"),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let items = sample();
        assert_eq!(rank(&items, ""), items);
        assert_eq!(rank(&items, "   "), items);
    }

    #[test]
    fn example_ordering() {
        let items = vec![
            Item::named("IntelliJ IDEA"),
            Item::named("DataGrip"),
            Item::named("Idea Helper").with_description("IDEA plugin"),
        ];
        assert_eq!(names(&rank(&items, "idea")), ["Idea Helper", "IntelliJ IDEA"]);
    }

    #[test]
    fn query_is_trimmed_and_case_folded() {
        let items = sample();
        assert_eq!(names(&rank(&items, "  DATAgrip ")), ["DataGrip"]);
    }

    #[test]
    fn exact_name_beats_prefix() {
        let items = vec![Item::named("Go Tools"), Item::named("Go")];
        assert_eq!(names(&rank(&items, "go")), ["Go", "Go Tools"]);
    }

    #[test]
    fn code_and_description_matches_are_included() {
        let items = sample();
        assert_eq!(names(&rank(&items, "rd")), ["Rider"]);
        assert_eq!(names(&rank(&items, ".net")), ["Rider"]);
    }

    #[test]
    fn id_or_code_bonus_counts_once() {
        let item = Item::named("Zed").with_id("ab").with_code("ab");
        assert_eq!(score(&item, "ab"), Some(CODE_CONTAINS));
    }

    #[test]
    fn equal_scores_keep_fetch_order() {
        let items = vec![
            Item::named("Alpha tool"),
            Item::named("Beta tool"),
            Item::named("Tool"),
            Item::named("Gamma tool"),
        ];
        assert_eq!(
            names(&rank(&items, "tool")),
            ["Tool", "Alpha tool", "Beta tool", "Gamma tool"]
        );
    }

    #[test]
    fn output_is_scored_subset_in_non_increasing_order() {
        let items = sample();
        for query in ["i", "id", "a", "r", "plugin", "x"] {
            let needle = normalize_query(query);
            let ranked = rank(&items, query);
            let scores: Vec<u32> = ranked.iter().map(|i| score(i, &needle).unwrap()).collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]), "query {query}");
            let expected = items.iter().filter(|i| score(i, &needle).is_some()).count();
            assert_eq!(ranked.len(), expected, "query {query}");
            assert_eq!(rank(&items, query), ranked);
        }
    }

    #[test]
    fn match_ranges_are_character_indices() {
        assert_eq!(match_ranges("Idea idea", "IDEA"), vec![(0, 4), (5, 9)]);
        assert_eq!(match_ranges("Ünïcode idé", "idé"), vec![(8, 11)]);
        assert!(match_ranges("anything", " ").is_empty());
    }
}
