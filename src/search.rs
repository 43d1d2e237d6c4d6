//! Approximate meal search.
//!
//! A meal matches when any of its keywords is within a normalised
//! Levenshtein similarity of [`SIMILARITY_THRESHOLD`] of the query. Matches
//! keep catalog order; they are not ranked.

use crate::model::Meal;

/// Minimum similarity for a keyword to count as a match.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Keyword matcher over a meal catalog. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct MealMatcher;

impl MealMatcher {
    /// `1 - distance / longer_length` over case-folded characters.
    ///
    /// Two empty strings are identical (1.0).
    pub fn similarity(a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.to_lowercase().chars().collect();
        let b: Vec<char> = b.to_lowercase().chars().collect();
        let longer = a.len().max(b.len());
        if longer == 0 {
            return 1.0;
        }
        1.0 - levenshtein(&a, &b) as f64 / longer as f64
    }

    /// Meals with a keyword similar to `query`. A blank query returns the whole catalog.
    pub fn search<'a>(query: &str, catalog: &'a [Meal]) -> Vec<&'a Meal> {
        let query = query.trim();
        if query.is_empty() {
            return catalog.iter().collect();
        }
        catalog
            .iter()
            .filter(|meal| {
                meal.keywords
                    .iter()
                    .any(|keyword| Self::similarity(query, keyword) >= SIMILARITY_THRESHOLD)
            })
            .collect()
    }
}

/// Edit distance with a single rolling row.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}
