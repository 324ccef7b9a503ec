//! Fuzzy ranking on top of `fuzzy-matcher`'s skim algorithm.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// One ranked hit: the position of the text in the searched collection and the
/// character offsets that matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub index: usize,
    pub score: i64,
    pub offsets: Vec<usize>,
}

/// Rank `texts` against `query`.
///
/// Only texts containing the query as an ordered subsequence are returned, best score
/// first; equal scores keep their original order.
pub fn rank<'a, I>(query: &str, texts: I) -> Vec<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = SkimMatcherV2::default().smart_case();
    let mut matches: Vec<FuzzyMatch> = texts
        .into_iter()
        .enumerate()
        .filter_map(|(index, text)| {
            matcher
                .fuzzy_indices(text, query)
                .map(|(score, offsets)| FuzzyMatch {
                    index,
                    score,
                    offsets,
                })
        })
        .collect();

    // stable: ties stay in population order
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_subsequence(query: &str, text: &str) -> bool {
        let mut chars = text.chars().map(|c| c.to_ascii_lowercase());
        query
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .all(|q| chars.any(|c| c == q))
    }

    #[test]
    fn only_subsequence_matches_are_returned() {
        let texts = ["a.txt", "b.txt", "ab.go"];
        let ranked = rank("ab", texts.iter().copied());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].index, 2);
        for hit in &ranked {
            assert!(is_subsequence("ab", texts[hit.index]));
        }
    }

    #[test]
    fn offsets_point_at_matched_characters() {
        let ranked = rank("sr", ["src/main.rs"].iter().copied());
        let hit = &ranked[0];
        let chars: Vec<char> = "src/main.rs".chars().collect();

        assert_eq!(hit.offsets.len(), 2);
        assert!(hit.offsets.iter().all(|&o| o < chars.len()));
        assert_eq!(chars[hit.offsets[0]], 's');
        assert_eq!(chars[hit.offsets[1]], 'r');
    }

    #[test]
    fn offsets_are_character_based_for_multibyte_text() {
        let ranked = rank("ab", ["ü-ab"].iter().copied());
        assert_eq!(ranked[0].offsets, vec![2, 3]);
    }

    #[test]
    fn better_matches_rank_first_and_ties_keep_order() {
        let texts = ["main_loop", "readme", "main", "main"];
        let ranked = rank("main", texts.iter().copied());
        let order: Vec<usize> = ranked.iter().map(|m| m.index).collect();

        assert_eq!(order.len(), 3);
        let first_plain = order.iter().position(|&i| i == 2).unwrap();
        let second_plain = order.iter().position(|&i| i == 3).unwrap();
        assert!(first_plain < second_plain);
    }
}
