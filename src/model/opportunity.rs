//! Opportunity model.
//!
//! Opportunities are deals moving through the sales pipeline. Unlike the
//! other records they are persisted, so the JSON shape here is also the
//! on-disk format under the `crm_opportunities` key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time-derived string identifier.
pub type OpportunityId = String;

/// Pipeline position of an opportunity, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    pub const ALL: [Self; 6] = [
        Self::Prospecting,
        Self::Qualification,
        Self::Proposal,
        Self::Negotiation,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prospecting => "prospecting",
            Self::Qualification => "qualification",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::ClosedWon => "closed-won",
            Self::ClosedLost => "closed-lost",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Prospecting
    }
}

/// A deal in the sales pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: OpportunityId,
    pub name: String,
    pub client: String,
    /// Monetary value, non-negative.
    pub value: f64,
    pub stage: Stage,
    /// Win probability percentage, 0-100.
    pub probability: u8,
    pub expected_close_date: NaiveDate,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: NaiveDate,
    pub last_updated: NaiveDate,
}

impl Opportunity {
    /// Value scaled by win probability.
    #[must_use]
    pub fn weighted_value(&self) -> f64 {
        self.value * f64::from(self.probability) / 100.0
    }
}

/// Input for creating an opportunity; the store assigns id and dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOpportunity {
    pub name: String,
    pub client: String,
    pub value: f64,
    pub stage: Stage,
    pub probability: u8,
    pub expected_close_date: NaiveDate,
    pub owner: String,
    pub source: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl NewOpportunity {
    /// Create opportunity input; new deals start prospecting at 20%.
    pub fn new(name: &str, client: &str, value: f64, expected_close_date: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            client: client.to_string(),
            value,
            stage: Stage::Prospecting,
            probability: 20,
            expected_close_date,
            owner: String::new(),
            source: String::new(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = probability;
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = owner.to_string();
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub(crate) fn into_opportunity(self, id: OpportunityId, today: NaiveDate) -> Opportunity {
        Opportunity {
            id,
            name: self.name,
            client: self.client,
            value: self.value,
            stage: self.stage,
            probability: self.probability,
            expected_close_date: self.expected_close_date,
            owner: self.owner,
            source: self.source,
            description: self.description,
            tags: self.tags,
            created_at: today,
            last_updated: today,
        }
    }
}

/// Partial update for an opportunity. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityPatch {
    pub name: Option<String>,
    pub client: Option<String>,
    pub value: Option<f64>,
    pub stage: Option<Stage>,
    pub probability: Option<u8>,
    pub expected_close_date: Option<NaiveDate>,
    pub owner: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl OpportunityPatch {
    /// Merge over `opp`, refreshing `last_updated` to `today`.
    #[must_use]
    pub fn apply(self, opp: &Opportunity, today: NaiveDate) -> Opportunity {
        let mut next = opp.clone();
        if let Some(v) = self.name {
            next.name = v;
        }
        if let Some(v) = self.client {
            next.client = v;
        }
        if let Some(v) = self.value {
            next.value = v;
        }
        if let Some(v) = self.stage {
            next.stage = v;
        }
        if let Some(v) = self.probability {
            next.probability = v;
        }
        if let Some(v) = self.expected_close_date {
            next.expected_close_date = v;
        }
        if let Some(v) = self.owner {
            next.owner = v;
        }
        if let Some(v) = self.source {
            next.source = v;
        }
        if let Some(v) = self.description {
            next.description = v;
        }
        if let Some(v) = self.tags {
            next.tags = v;
        }
        next.last_updated = today;
        next
    }
}
