//! Chooses between the generated and the canned roast.

use super::fallback::{fallback_roast, Bucket};
use super::generator::{RoastContext, RoastGenerator};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces exactly one roast per request and never fails.
pub struct RoastSelector {
    generator: Option<Arc<dyn RoastGenerator>>,
    rng: Mutex<StdRng>,
}

impl RoastSelector {
    /// Create a selector. With `seed` set, fallback picks are reproducible.
    pub fn new(generator: Option<Arc<dyn RoastGenerator>>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            generator,
            rng: Mutex::new(rng),
        }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Pick the roast for a scored site.
    pub async fn select(&self, ctx: RoastContext<'_>) -> String {
        if let Some(ref generator) = self.generator {
            match generator.generate(ctx).await {
                Ok(roast) => return roast,
                Err(e) => warn!("Roast generation failed, using fallback: {}", e),
            }
        } else {
            debug!("No roast generator configured, using fallback");
        }

        self.fallback(ctx.score)
    }

    /// Canned roast for a composite score.
    pub fn fallback(&self, score: u8) -> String {
        debug!("Picking a {} roast for score {}", Bucket::for_score(score), score);
        let mut rng = self.rng.lock();
        fallback_roast(score, &mut *rng).to_string()
    }
}
