//! Composite scoring and per-category highlights.
//!
//! Weights are expressed in whole percent so the weighted sum stays in
//! integer arithmetic and rounding is exact half-up.

use crate::models::{Category, CategoryScores};

/// Categories scoring strictly below this earn a burn.
pub const BURN_THRESHOLD: u8 = 50;

/// Categories scoring at or above this earn a compliment.
pub const COMPLIMENT_THRESHOLD: u8 = 80;

pub const MAX_BURNS: usize = 4;

/// Only the first three qualifying categories are complimented.
pub const MAX_COMPLIMENTS: usize = 3;

/// Weight of a category in percent. The four weights sum to 100.
pub fn weight(category: Category) -> u32 {
    match category {
        Category::Performance => 35,
        Category::Accessibility => 25,
        Category::Seo => 20,
        Category::BestPractices => 20,
    }
}

/// Compute the weighted composite score, rounded half-up.
pub fn composite_score(scores: &CategoryScores) -> u8 {
    let weighted: u32 = scores
        .iter()
        .map(|(category, score)| u32::from(score) * weight(category))
        .sum();

    // weighted is the composite scaled by 100
    let rounded = (weighted + 50) / 100;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

fn burn_line(category: Category) -> &'static str {
    match category {
        Category::Performance => "Your site loads slower than a sloth",
        Category::Accessibility => "Screen readers probably file lawsuits",
        Category::Seo => "Google probably doesn't know this site exists",
        Category::BestPractices => "Best practices? More like 'any practices'",
    }
}

fn compliment_line(category: Category) -> &'static str {
    match category {
        Category::Performance => "Actually loads pretty fast",
        Category::Accessibility => "Accessibility is solid",
        Category::Seo => "Google probably likes you",
        Category::BestPractices => "Following best practices",
    }
}

/// Burns for every category below [`BURN_THRESHOLD`], in canonical order.
pub fn burns(scores: &CategoryScores) -> Vec<String> {
    scores
        .iter()
        .filter(|(_, score)| *score < BURN_THRESHOLD)
        .map(|(category, _)| burn_line(category).to_string())
        .take(MAX_BURNS)
        .collect()
}

/// Compliments for every category at or above [`COMPLIMENT_THRESHOLD`],
/// in canonical order, capped at [`MAX_COMPLIMENTS`].
pub fn compliments(scores: &CategoryScores) -> Vec<String> {
    scores
        .iter()
        .filter(|(_, score)| *score >= COMPLIMENT_THRESHOLD)
        .map(|(category, _)| compliment_line(category).to_string())
        .take(MAX_COMPLIMENTS)
        .collect()
}
