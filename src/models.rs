//! Data models for the roaster.
//!
//! This module contains the plain records passed between the fetcher,
//! the aggregator and the roast selector, plus the HTTP request/response
//! bodies built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Lighthouse category tracked by the roaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Performance,
    Accessibility,
    Seo,
    BestPractices,
}

impl Category {
    /// All categories in their canonical order.
    ///
    /// Burns and compliments are always emitted in this order.
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Accessibility,
        Category::Seo,
        Category::BestPractices,
    ];

    /// Category name as understood by the PageSpeed API.
    pub fn api_name(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::Seo => "seo",
            Category::BestPractices => "best-practices",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Performance => write!(f, "Performance"),
            Category::Accessibility => write!(f, "Accessibility"),
            Category::Seo => write!(f, "SEO"),
            Category::BestPractices => write!(f, "Best Practices"),
        }
    }
}

/// Per-category scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub performance: u8,
    pub accessibility: u8,
    pub seo: u8,
    pub best_practices: u8,
}

impl CategoryScores {
    /// Returns the score for a single category.
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Performance => self.performance,
            Category::Accessibility => self.accessibility,
            Category::Seo => self.seo,
            Category::BestPractices => self.best_practices,
        }
    }

    /// Iterate `(category, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Overall verdict shown next to a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    ActuallyImpressive,
    PrettySolid,
    Decent,
    NeedsWork,
    Yikes,
    DumpsterFire,
    CrimeAgainstTheInternet,
}

impl Verdict {
    /// Picks the verdict for a composite score.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Verdict::ActuallyImpressive,
            80..=89 => Verdict::PrettySolid,
            70..=79 => Verdict::Decent,
            60..=69 => Verdict::NeedsWork,
            50..=59 => Verdict::Yikes,
            40..=49 => Verdict::DumpsterFire,
            _ => Verdict::CrimeAgainstTheInternet,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::ActuallyImpressive => "Actually Impressive",
            Verdict::PrettySolid => "Pretty Solid",
            Verdict::Decent => "Decent",
            Verdict::NeedsWork => "Needs Work",
            Verdict::Yikes => "Yikes",
            Verdict::DumpsterFire => "Dumpster Fire",
            Verdict::CrimeAgainstTheInternet => "A Crime Against the Internet",
        }
    }

    /// Returns an emoji representation of the verdict.
    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::ActuallyImpressive => "🏆",
            Verdict::PrettySolid => "🌟",
            Verdict::Decent => "👍",
            Verdict::NeedsWork => "😐",
            Verdict::Yikes => "😬",
            Verdict::DumpsterFire => "💀",
            Verdict::CrimeAgainstTheInternet => "☠️",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inbound body of `POST /api/roast`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoastRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// The complete answer for one roasted site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastResult {
    /// URL exactly as submitted.
    pub url: String,
    /// Weighted composite score.
    pub score: u8,
    /// The roast text, generated or canned.
    pub roast: String,
    pub metrics: CategoryScores,
    /// At most four category burns.
    pub burns: Vec<String>,
    /// At most three category compliments.
    pub compliments: Vec<String>,
}

impl RoastResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.score)
    }

    /// Text suitable for sharing the result.
    pub fn share_text(&self) -> String {
        format!(
            "My website got roasted! Score: {}/100 {}",
            self.score,
            self.verdict().emoji()
        )
    }
}
