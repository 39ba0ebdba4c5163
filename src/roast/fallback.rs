//! Canned roasts used when no model is configured or the model call fails.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Score bucket a composite score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// `0..30`
    Terrible,
    /// `30..50`
    Bad,
    /// `50..70`
    Mediocre,
    /// `70..85`
    Good,
    /// `85..=100`
    Great,
}

impl Bucket {
    pub fn for_score(score: u8) -> Self {
        match score {
            0..=29 => Bucket::Terrible,
            30..=49 => Bucket::Bad,
            50..=69 => Bucket::Mediocre,
            70..=84 => Bucket::Good,
            _ => Bucket::Great,
        }
    }

    /// The canned lines for this bucket.
    pub fn pool(&self) -> &'static [&'static str] {
        match self {
            Bucket::Terrible => TERRIBLE,
            Bucket::Bad => BAD,
            Bucket::Mediocre => MEDIOCRE,
            Bucket::Good => GOOD,
            Bucket::Great => GREAT,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Terrible => write!(f, "terrible"),
            Bucket::Bad => write!(f, "bad"),
            Bucket::Mediocre => write!(f, "mediocre"),
            Bucket::Good => write!(f, "good"),
            Bucket::Great => write!(f, "great"),
        }
    }
}

const TERRIBLE: &[&str] = &[
    "This website looks like it was designed by someone who learned HTML from a 1998 textbook.",
    "I've seen better user experiences on a 404 page.",
    "Your website has more issues than a magazine stand.",
];

const BAD: &[&str] = &[
    "Your website is like a participation trophy - it exists, and that's about all.",
    "This website is proof that 'technically functional' is a very low bar.",
];

const MEDIOCRE: &[&str] = &[
    "Congratulations, your website is aggressively average.",
    "Your site is like plain oatmeal - it'll do the job, but nobody's excited.",
];

const GOOD: &[&str] = &[
    "Alright, your website doesn't completely make my eyes bleed. Well done.",
    "Your site is actually decent. I'm almost disappointed I can't roast it harder.",
];

const GREAT: &[&str] = &[
    "Okay fine, your website is actually good. Not much to burn here.",
    "This is... actually impressive? I feel like I'm being set up.",
];

/// Pick a canned roast for `score`, uniformly from its bucket.
pub fn fallback_roast<R: Rng + ?Sized>(score: u8, rng: &mut R) -> &'static str {
    let pool = Bucket::for_score(score).pool();
    // pools are non-empty constants
    pool.choose(rng).copied().unwrap_or(MEDIOCRE[0])
}
