//! The roast pipeline: fetch scores, aggregate, pick a roast.

use crate::analysis::{burns, composite_score, compliments};
use crate::models::RoastResult;
use crate::pagespeed::{FetchError, ScoreSource};
use crate::roast::{RoastContext, RoastSelector};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Runs one URL through the whole pipeline.
pub struct RoastService {
    scores: Arc<dyn ScoreSource>,
    selector: RoastSelector,
}

impl RoastService {
    pub fn new(scores: Arc<dyn ScoreSource>, selector: RoastSelector) -> Self {
        Self { scores, selector }
    }

    pub fn selector(&self) -> &RoastSelector {
        &self.selector
    }

    /// Roast `url`. Only the score fetch can fail; roast generation falls
    /// back to canned text and is never attempted when the fetch fails.
    pub async fn roast(&self, url: &str) -> Result<RoastResult, FetchError> {
        let start_time = Instant::now();

        let metrics = self.scores.fetch_scores(url).await?;
        let score = composite_score(&metrics);

        let roast = self
            .selector
            .select(RoastContext {
                url,
                metrics: &metrics,
                score,
            })
            .await;

        info!(
            "Roasted {} (score {}) in {:.1}s",
            url,
            score,
            start_time.elapsed().as_secs_f64()
        );

        Ok(RoastResult {
            url: url.to_string(),
            score,
            roast,
            metrics,
            burns: burns(&metrics),
            compliments: compliments(&metrics),
        })
    }
}
