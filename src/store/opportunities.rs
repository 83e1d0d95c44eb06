//! Opportunity store.
//!
//! The only entity store backed by durable storage. The whole list is
//! rewritten under [`keys::OPPORTUNITIES`] after every mutation, and the
//! in-memory snapshot only changes once that write has succeeded.

use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{NewOpportunity, Opportunity, OpportunityId, OpportunityPatch, Stage};
use crate::query::pipeline::{self, PipelineStats};
use crate::storage::{KeyValueStore, keys, read_json, write_json};
use crate::store::collection::{Collection, Record};
use crate::store::observer::{Change, SubscriptionId};
use crate::store::seed;

impl Record for Opportunity {
    type Id = OpportunityId;

    fn id(&self) -> &OpportunityId {
        &self.id
    }
}

pub struct OpportunityStore {
    kv: Rc<dyn KeyValueStore>,
    items: Collection<Opportunity>,
}

impl OpportunityStore {
    /// Load persisted opportunities, falling back to the sample deals.
    ///
    /// The fallback list is written back so the next load sees it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptValue`] if the stored list does not parse, or a
    /// storage error if the read or the initial write fails.
    pub fn load(kv: Rc<dyn KeyValueStore>) -> Result<Self> {
        let records = match read_json::<Vec<Opportunity>>(kv.as_ref(), keys::OPPORTUNITIES)? {
            Some(records) => {
                info!(count = records.len(), "Loaded opportunities");
                records
            }
            None => {
                let records = seed::opportunities();
                write_json(kv.as_ref(), keys::OPPORTUNITIES, &records)?;
                info!(count = records.len(), "Seeded opportunities");
                records
            }
        };
        Ok(Self {
            kv,
            items: Collection::new(records),
        })
    }

    #[must_use]
    pub fn list(&self) -> Rc<Vec<Opportunity>> {
        self.items.snapshot()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a deal with a fresh time-derived id and today's dates.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails; the store is unchanged.
    pub fn add(&mut self, new: NewOpportunity) -> Result<Opportunity> {
        let now = Utc::now();
        let id = self.next_id(now.timestamp_millis());
        let opp = new.into_opportunity(id.clone(), now.date_naive());
        let next = self.items.staged_push(opp.clone());
        self.persist(&next)?;
        debug!(id = %id, name = %opp.name, "Adding opportunity");
        self.items.commit(next, &Change::Added(id));
        Ok(opp)
    }

    /// Merge `patch` into the deal with `id` and refresh `lastUpdated`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OpportunityNotFound`] for an unknown id, or a storage
    /// error if persisting fails.
    pub fn update(&mut self, id: &str, patch: OpportunityPatch) -> Result<Opportunity> {
        let today = Utc::now().date_naive();
        let key = id.trim().to_string();
        let Some((next, updated)) = self.items.staged_replace(&key, |o| patch.apply(o, today)) else {
            warn!(id = %key, "Update for unknown opportunity");
            return Err(Error::OpportunityNotFound { id: key });
        };
        self.persist(&next)?;
        debug!(id = %key, stage = updated.stage.as_str(), "Updated opportunity");
        self.items.commit(next, &Change::Updated(key));
        Ok(updated)
    }

    /// Remove a deal. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn remove(&mut self, id: &str) -> Result<Option<Opportunity>> {
        let key = id.trim().to_string();
        let Some((next, removed)) = self.items.staged_remove(&key) else {
            return Ok(None);
        };
        self.persist(&next)?;
        debug!(id = %key, "Removed opportunity");
        self.items.commit(next, &Change::Removed(key));
        Ok(Some(removed))
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Opportunity> {
        self.items.get(&id.trim().to_string()).cloned()
    }

    #[must_use]
    pub fn by_stage(&self, stage: Stage) -> Vec<Opportunity> {
        pipeline::by_stage(self.items.as_slice(), stage)
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn pipeline_stats(&self) -> PipelineStats {
        PipelineStats::from_opportunities(self.items.as_slice())
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&Change<OpportunityId>) + 'static,
    ) -> SubscriptionId {
        self.items.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.items.unsubscribe(id)
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.items.clear_subscribers();
    }

    fn persist(&self, records: &[Opportunity]) -> Result<()> {
        write_json(self.kv.as_ref(), keys::OPPORTUNITIES, records)
    }

    /// Millisecond timestamp as a string, bumped past any id already taken.
    fn next_id(&self, millis: i64) -> OpportunityId {
        let mut candidate = millis;
        while self.items.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl std::fmt::Debug for OpportunityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpportunityStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryKv, SqliteKv};
    use chrono::NaiveDate;

    /// Reads from an inner store; every write fails.
    struct ReadOnlyKv(MemoryKv);

    impl KeyValueStore for ReadOnlyKv {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Other("read-only".into()))
        }
        fn remove(&self, _key: &str) -> Result<bool> {
            Err(Error::Other("read-only".into()))
        }
        fn keys(&self) -> Result<Vec<String>> {
            self.0.keys()
        }
    }

    fn kv() -> Rc<dyn KeyValueStore> {
        Rc::new(MemoryKv::new())
    }

    fn new_deal() -> NewOpportunity {
        NewOpportunity::new(
            "Initech - Support Contract",
            "Initech",
            30_000.0,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        )
    }

    fn stored(kv: &dyn KeyValueStore) -> Vec<Opportunity> {
        read_json(kv, keys::OPPORTUNITIES).unwrap().unwrap()
    }

    #[test]
    fn test_first_load_seeds_and_persists() {
        let kv = kv();
        let store = OpportunityStore::load(Rc::clone(&kv)).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(stored(kv.as_ref()).len(), 5);
    }

    #[test]
    fn test_persisted_list_wins_over_seed() {
        let kv = kv();
        write_json(kv.as_ref(), keys::OPPORTUNITIES, &seed::opportunities()[..2]).unwrap();
        let store = OpportunityStore::load(kv).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get_by_id("3").is_none());
    }

    #[test]
    fn test_corrupt_list_is_an_error() {
        let kv = kv();
        kv.set(keys::OPPORTUNITIES, "[{not json").unwrap();
        let err = OpportunityStore::load(kv).unwrap_err();
        assert!(matches!(err, Error::CorruptValue { .. }));
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let kv: Rc<dyn KeyValueStore> = Rc::new(SqliteKv::open_memory().unwrap());
        let mut store = OpportunityStore::load(Rc::clone(&kv)).unwrap();

        let added = store.add(new_deal()).unwrap();
        assert!(added.id.parse::<i64>().is_ok());
        assert_eq!(added.stage, Stage::Prospecting);
        assert_eq!(added.created_at, Utc::now().date_naive());

        let reloaded = OpportunityStore::load(kv).unwrap();
        assert_eq!(reloaded.len(), 6);
        assert_eq!(reloaded.get_by_id(&added.id), Some(added));
    }

    #[test]
    fn test_ids_unique_within_one_millisecond() {
        let mut store = OpportunityStore::load(kv()).unwrap();
        let a = store.add(new_deal()).unwrap();
        let b = store.add(new_deal()).unwrap();
        let c = store.add(new_deal()).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_update_refreshes_last_updated() {
        let kv = kv();
        let mut store = OpportunityStore::load(Rc::clone(&kv)).unwrap();
        let patch = OpportunityPatch {
            stage: Some(Stage::ClosedWon),
            probability: Some(100),
            ..OpportunityPatch::default()
        };
        let updated = store.update("2", patch).unwrap();
        assert_eq!(updated.stage, Stage::ClosedWon);
        assert_eq!(updated.last_updated, Utc::now().date_naive());

        let saved = stored(kv.as_ref());
        assert_eq!(saved.iter().find(|o| o.id == "2").unwrap().probability, 100);

        let err = store.update("nope", OpportunityPatch::default()).unwrap_err();
        assert!(matches!(err, Error::OpportunityNotFound { .. }));
    }

    #[test]
    fn test_padded_id_matches_everywhere() {
        let kv = kv();
        let mut store = OpportunityStore::load(Rc::clone(&kv)).unwrap();
        let id = store.add(new_deal()).unwrap().id;
        let padded = format!("  {id} ");

        assert!(store.get_by_id(&padded).is_some());

        let patch = OpportunityPatch {
            probability: Some(40),
            ..OpportunityPatch::default()
        };
        assert_eq!(store.update(&padded, patch).unwrap().probability, 40);

        assert!(store.remove(&padded).unwrap().is_some());
        assert!(store.get_by_id(&id).is_none());
        assert!(!stored(kv.as_ref()).iter().any(|o| o.id == id));
    }

    #[test]
    fn test_remove_persists_even_when_empty() {
        let kv = kv();
        let mut store = OpportunityStore::load(Rc::clone(&kv)).unwrap();
        for id in ["1", "2", "3", "4", "5"] {
            assert!(store.remove(id).unwrap().is_some());
        }
        assert!(store.is_empty());
        assert!(stored(kv.as_ref()).is_empty());
        assert!(store.remove("1").unwrap().is_none());

        // An empty persisted list is respected rather than reseeded.
        assert!(OpportunityStore::load(kv).unwrap().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let inner = MemoryKv::new();
        write_json(&inner, keys::OPPORTUNITIES, &seed::opportunities()).unwrap();
        let mut store = OpportunityStore::load(Rc::new(ReadOnlyKv(inner))).unwrap();

        assert!(store.add(new_deal()).is_err());
        assert!(store.remove("1").is_err());
        assert_eq!(store.len(), 5);
        assert!(store.get_by_id("1").is_some());
    }

    #[test]
    fn test_pipeline_queries() {
        let store = OpportunityStore::load(kv()).unwrap();
        assert_eq!(store.by_stage(Stage::Negotiation)[0].id, "2");
        assert_eq!(store.pipeline_stats().won, 1);
    }
}
