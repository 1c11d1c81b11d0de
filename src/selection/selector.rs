use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::catalog::Bird;
use crate::types::identifiers::BirdId;

/// Which fallbacks fired while narrowing the candidate set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Fallbacks {
    /// The subregion filter matched no catalog bird, so the whole region was used.
    pub subregion_ignored: bool,
    /// Every candidate was inside the cooldown window, so cooldown was ignored.
    pub cooldown_ignored: bool,
}

/// The chosen bird plus how it was reached.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub bird: &'a Bird,
    /// Size of the pool the bird was drawn from.
    pub pool_size: usize,
    pub fallbacks: Fallbacks,
}

/// Picks one bird per region-day.
///
/// Owns its own generator, seeded from system entropy by default, and is
/// never reseeded by subregion sampling.
pub struct BirdSelector<R = StdRng> {
    rng: R,
}

impl Default for BirdSelector<StdRng> {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> BirdSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Narrow `birds` and draw one uniformly.
    ///
    /// Precedence: an answer always wins over the cooldown, and the cooldown
    /// wins over the subregion. Returns `None` only when `birds` is empty.
    pub fn select<'a>(
        &mut self,
        birds: &'a [Bird],
        excluded: &BTreeSet<BirdId>,
        subregion_filter: Option<&BTreeSet<BirdId>>,
    ) -> Option<Selection<'a>> {
        let mut fallbacks = Fallbacks::default();

        // 1. Subregion restriction, best-effort
        let mut candidates: Vec<&Bird> = match subregion_filter {
            Some(filter) => birds.iter().filter(|b| filter.contains(&b.id)).collect(),
            None => birds.iter().collect(),
        };
        if subregion_filter.is_some() && candidates.is_empty() {
            tracing::warn!("No birds available in subregion, using all region birds");
            fallbacks.subregion_ignored = true;
            candidates = birds.iter().collect();
        }

        // 2. Cooldown exclusion
        let available: Vec<&Bird> = candidates
            .iter()
            .copied()
            .filter(|b| !excluded.contains(&b.id))
            .collect();

        // 3. Repeats beat no answer
        let pool = if available.is_empty() {
            if !candidates.is_empty() {
                tracing::warn!(
                    candidates = candidates.len(),
                    "No birds available outside the cooldown window, ignoring cooldown"
                );
                fallbacks.cooldown_ignored = true;
            }
            candidates
        } else {
            available
        };

        // 4./5. Empty region yields nothing; otherwise uniform draw
        let bird = *pool.choose(&mut self.rng)?;
        Some(Selection {
            bird,
            pool_size: pool.len(),
            fallbacks,
        })
    }
}
