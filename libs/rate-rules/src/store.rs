//! In-memory rate store
//!
//! Single process-wide collection of validated rules behind a snapshot
//! reference: readers clone an `Arc` to the current rule vector and are
//! never exposed to a half-applied bulk replace. The id counter lives for
//! the whole process; delete and drop remove rules but never reset it.

use crate::error::{RateError, Result};
use crate::types::{RateDraft, Rule};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

#[derive(Default)]
struct StoreInner {
    /// Current snapshot, insertion order. Replaced wholesale on mutation
    /// when readers still hold the previous snapshot.
    rates: Arc<Vec<Rule>>,

    /// Last assigned id; first created rule gets 1
    counter: u64,
}

/// In-memory collection of rate rules with monotonic id assignment
#[derive(Default)]
pub struct RateStore {
    inner: RwLock<StoreInner>,
}

impl RateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a validated draft, assigning the next sequential id
    pub fn create(&self, draft: RateDraft) -> Rule {
        let mut inner = self.inner.write();
        Self::push_rule(&mut inner, draft)
    }

    /// Look up a rule by id
    pub fn get(&self, id: u64) -> Option<Rule> {
        self.inner
            .read()
            .rates
            .iter()
            .find(|rule| rule.id == id)
            .cloned()
    }

    /// Remove a rule by id; `RateNotFound` if absent
    pub fn delete(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.write();
        let rates = Arc::make_mut(&mut inner.rates);
        let index = rates
            .iter()
            .position(|rule| rule.id == id)
            .ok_or(RateError::RateNotFound(id))?;
        rates.remove(index);
        Ok(())
    }

    /// Remove all rules. The id counter is left untouched.
    pub fn drop_all(&self) {
        let mut inner = self.inner.write();
        inner.rates = Arc::new(Vec::new());
        info!("Dropped all existing rates");
    }

    /// Snapshot of all rules in insertion order
    pub fn list(&self) -> Arc<Vec<Rule>> {
        Arc::clone(&self.inner.read().rates)
    }

    /// Number of stored rules
    pub fn len(&self) -> usize {
        self.inner.read().rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole rule set under a single write lock: concurrent
    /// readers observe either the previous or the new snapshot, never an
    /// intermediate state. Ids continue from the process-lifetime counter.
    ///
    /// Inputs must already be validated; all-or-nothing validation of a
    /// replace batch happens before this call.
    pub fn replace_all(&self, drafts: Vec<RateDraft>) -> Vec<Rule> {
        let mut inner = self.inner.write();
        inner.rates = Arc::new(Vec::with_capacity(drafts.len()));
        let created = drafts
            .into_iter()
            .map(|draft| Self::push_rule(&mut inner, draft))
            .collect();
        info!("Replaced rate set");
        created
    }

    fn push_rule(inner: &mut StoreInner, draft: RateDraft) -> Rule {
        inner.counter += 1;
        let rule = Rule {
            id: inner.counter,
            window: draft.window,
            days: draft.days,
            tz: draft.tz,
            price: draft.price,
        };
        Arc::make_mut(&mut inner.rates).push(rule.clone());
        rule
    }
}
