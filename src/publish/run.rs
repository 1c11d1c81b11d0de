use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::catalog::{load_regions, Catalog, Region, SubregionMap};
use crate::config::{DataPaths, RunConfig};
use crate::history::HistoryLedger;
use crate::publish::token::{SaltedFoldToken, TokenScheme};
use crate::publish::writer::{commit, discard, stage_json};
use crate::publish::PublishError;
use crate::selection::{choose_subregion, BirdSelector, Fallbacks};
use crate::types::identifiers::{BirdId, RegionId};
use crate::types::records::DailyAnswer;

/// Everything a run reads besides the ledger.
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    pub regions: Vec<Region>,
    pub catalog: Catalog,
    pub subregions: Option<SubregionMap>,
}

impl RunInputs {
    pub fn load(paths: &DataPaths) -> Result<Self, PublishError> {
        let regions = load_regions(&paths.regions())?;
        let catalog = Catalog::load(&paths.birds())?;
        let subregions = match paths.subregions() {
            Some(path) => SubregionMap::load_optional(path)?,
            None => None,
        };
        Ok(Self {
            regions,
            catalog,
            subregions,
        })
    }
}

/// What happened to one region during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOutcome {
    pub region: RegionId,
    pub produced: bool,
    pub subregion: Option<String>,
    /// Ids inside the cooldown window.
    pub excluded: usize,
    /// Birds in the region's catalog.
    pub candidates: usize,
    pub fallbacks: Fallbacks,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub answers: Vec<DailyAnswer>,
    pub outcomes: Vec<RegionOutcome>,
}

impl RunReport {
    pub fn skipped(&self) -> impl Iterator<Item = &RegionOutcome> {
        self.outcomes.iter().filter(|o| !o.produced)
    }
}

/// Selects, tokenizes and records one answer per configured region.
pub struct DailyPublisher<T = SaltedFoldToken, R = StdRng> {
    tokens: T,
    selector: BirdSelector<R>,
}

impl DailyPublisher<SaltedFoldToken, StdRng> {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            tokens: SaltedFoldToken::new(config.secret_salt.clone()),
            selector: BirdSelector::default(),
        }
    }
}

impl<T, R> DailyPublisher<T, R>
where
    T: TokenScheme,
    R: Rng,
{
    pub fn new(tokens: T, selector: BirdSelector<R>) -> Self {
        Self { tokens, selector }
    }

    /// Process every region in order. Regions without birds are skipped
    /// with a warning; they never fail the run.
    pub fn run(
        &mut self,
        inputs: &RunInputs,
        ledger: &mut HistoryLedger,
        config: &RunConfig,
    ) -> RunReport {
        let mut report = RunReport::default();

        for region in &inputs.regions {
            let (outcome, answer) = self.publish_region(region, inputs, ledger, config);
            if let Some(answer) = answer {
                report.answers.push(answer);
            }
            report.outcomes.push(outcome);
        }

        report
    }

    fn publish_region(
        &mut self,
        region: &Region,
        inputs: &RunInputs,
        ledger: &mut HistoryLedger,
        config: &RunConfig,
    ) -> (RegionOutcome, Option<DailyAnswer>) {
        let region_id = region.id.as_str();
        let birds = inputs.catalog.birds(region_id);
        tracing::info!(region = region_id, name = %region.name, birds = birds.len(), "Processing region");

        let mut outcome = RegionOutcome {
            region: region.id.clone(),
            produced: false,
            subregion: None,
            excluded: 0,
            candidates: birds.len(),
            fallbacks: Fallbacks::default(),
        };

        if birds.is_empty() {
            tracing::warn!(region = region_id, "No birds found for region, skipping");
            return (outcome, None);
        }

        let pick = inputs
            .subregions
            .as_ref()
            .and_then(|map| choose_subregion(map, region_id, config.target_date));
        match &pick {
            Some(pick) => tracing::info!(
                region = region_id,
                subregion = %pick.name,
                species = pick.bird_ids.len(),
                "Selected subregion"
            ),
            None if inputs.subregions.is_some() => {
                tracing::info!(region = region_id, "No subregion data available for this region")
            }
            None => {}
        }

        let excluded: BTreeSet<BirdId> =
            ledger.recent_answers(region_id, config.target_date, config.cooldown_days);
        outcome.excluded = excluded.len();
        tracing::debug!(region = region_id, ?excluded, "Recent answers to avoid");

        let filter = pick.as_ref().map(|p| &p.bird_ids);
        let Some(selection) = self.selector.select(birds, &excluded, filter) else {
            tracing::warn!(region = region_id, "Could not select a bird for region");
            return (outcome, None);
        };
        let bird = selection.bird;
        let subregion = pick.map(|p| p.name);

        let token = self.tokens.token(bird.id.as_str());
        tracing::info!(
            region = region_id,
            pool = selection.pool_size,
            token = %token,
            "Selected answer"
        );
        tracing::debug!(region = region_id, bird = %bird.id, name = %bird.name, "Selected bird");

        let answer = DailyAnswer {
            date: config.target_date,
            region: region.id.clone(),
            answer_hash: token,
            subregion: subregion.clone(),
        };

        ledger.record(&region.id, config.target_date, bird, subregion.as_deref());
        let pruned = ledger.prune(region_id, config.target_date, config.retention_days());
        if pruned > 0 {
            tracing::debug!(region = region_id, pruned, "Pruned old history entries");
        }

        outcome.produced = true;
        outcome.subregion = subregion;
        outcome.fallbacks = selection.fallbacks;
        (outcome, Some(answer))
    }
}

/// Full job: load inputs, run every region, then replace `daily.json`
/// and `history.json` together. Nothing is written if any step fails.
pub fn run_daily(paths: &DataPaths, config: &RunConfig) -> Result<RunReport, PublishError> {
    let inputs = RunInputs::load(paths)?;
    let mut ledger = HistoryLedger::load(&paths.history())?;

    let mut publisher = DailyPublisher::from_config(config);
    let report = publisher.run(&inputs, &mut ledger, config);

    let daily = stage_json(&paths.daily(), &report.answers)?;
    let history = match stage_json(&paths.history(), &ledger) {
        Ok(staged) => staged,
        Err(e) => {
            discard(vec![daily]);
            return Err(e);
        }
    };
    commit(vec![daily, history])?;

    tracing::info!(
        answers = report.answers.len(),
        skipped = report.skipped().count(),
        "Wrote daily answers and history"
    );
    Ok(report)
}
