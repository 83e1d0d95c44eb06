//! Opportunity pipeline filters and aggregates.
//!
//! Sums are plain `f64` accumulation, fine for display and not meant for
//! accounting.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Opportunity, Stage};

#[must_use]
pub fn by_stage(opportunities: &[Opportunity], stage: Stage) -> Vec<&Opportunity> {
    opportunities.iter().filter(|o| o.stage == stage).collect()
}

/// Case-insensitive match on deal name or client.
#[must_use]
pub fn matches_search(opp: &Opportunity, term: &str) -> bool {
    let needle = term.to_lowercase();
    opp.name.to_lowercase().contains(&needle) || opp.client.to_lowercase().contains(&needle)
}

#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    pub stage: Option<Stage>,
    pub search: Option<String>,
}

impl OpportunityFilter {
    #[must_use]
    pub fn matches(&self, opp: &Opportunity) -> bool {
        self.stage.is_none_or(|s| opp.stage == s)
            && self
                .search
                .as_deref()
                .is_none_or(|term| matches_search(opp, term))
    }

    #[must_use]
    pub fn apply<'a>(&self, opportunities: &'a [Opportunity]) -> Vec<&'a Opportunity> {
        opportunities.iter().filter(|o| self.matches(o)).collect()
    }
}

/// Count and total value of the deals in one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StageSummary {
    pub count: usize,
    pub value: f64,
}

/// Pipeline-wide aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub total: usize,
    pub total_value: f64,
    /// Sum of value × probability / 100.
    pub weighted_value: f64,
    /// Every stage, in pipeline order, including empty ones.
    pub by_stage: BTreeMap<Stage, StageSummary>,
    pub won: usize,
    pub lost: usize,
}

impl PipelineStats {
    #[must_use]
    pub fn from_opportunities(opportunities: &[Opportunity]) -> Self {
        let mut by_stage: BTreeMap<Stage, StageSummary> = Stage::ALL
            .into_iter()
            .map(|s| (s, StageSummary::default()))
            .collect();

        let mut total_value = 0.0;
        let mut weighted_value = 0.0;
        for opp in opportunities {
            total_value += opp.value;
            weighted_value += opp.weighted_value();
            let summary = by_stage.entry(opp.stage).or_default();
            summary.count += 1;
            summary.value += opp.value;
        }

        Self {
            total: opportunities.len(),
            total_value,
            weighted_value,
            won: by_stage[&Stage::ClosedWon].count,
            lost: by_stage[&Stage::ClosedLost].count,
            by_stage,
        }
    }

    #[must_use]
    pub fn stage(&self, stage: Stage) -> StageSummary {
        self.by_stage.get(&stage).copied().unwrap_or_default()
    }
}
