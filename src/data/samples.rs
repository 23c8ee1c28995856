//! # Sample Aggregation
//!
//! Raw sample observations grouped by their shared reference key before
//! matrix values are computed.
//!
//! Many sample locations snap to the same reference key (a routing-graph
//! anchor), and the per-key computation is the expensive part. The
//! aggregator keeps one group per distinct key so the engine runs that
//! computation once per entry in `unique_reference_keys()`, then fans the
//! result out to every sample in the group, corrected by each sample's
//! own offset distance.

use std::collections::HashMap;

use crate::error::{MatrixError, Result};

/// One raw observation: a sample snapped to a reference key, plus the
/// last-mile offset between the sample and that key. Immutable once made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplePoint<S> {
    pub reference_key: i64,
    pub sample_id: S,
    pub offset_distance: i32,
}

/// All sample points sharing one reference key. Created lazily on first
/// insertion; owned exclusively by the aggregator.
#[derive(Clone, Debug)]
pub struct SampleGroup<S> {
    reference_key: i64,
    points: Vec<SamplePoint<S>>,
}

impl<S> SampleGroup<S> {
    fn new(reference_key: i64) -> Self {
        Self {
            reference_key,
            points: Vec::new(),
        }
    }

    /// The shared reference key.
    pub fn reference_key(&self) -> i64 {
        self.reference_key
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[SamplePoint<S>] {
        &self.points
    }

    /// Number of points in the group.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Append-only container mapping reference keys to their sample groups,
/// with flat per-sample tracking sequences alongside.
#[derive(Clone, Debug, Default)]
pub struct SampleAggregator<S> {
    groups: HashMap<i64, SampleGroup<S>>,
    sample_ids: Vec<S>,
    reference_keys: Vec<i64>,
    unique_reference_keys: Vec<i64>,
}

impl<S: Clone> SampleAggregator<S> {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            sample_ids: Vec::new(),
            reference_keys: Vec::new(),
            unique_reference_keys: Vec::new(),
        }
    }

    /// Record one observation, creating the group on the key's first
    /// occurrence and tracking the key in first-seen order when new.
    pub fn add_point(&mut self, reference_key: i64, sample_id: S, offset_distance: i32) {
        self.sample_ids.push(sample_id.clone());
        self.reference_keys.push(reference_key);
        let group = self.groups.entry(reference_key).or_insert_with(|| {
            self.unique_reference_keys.push(reference_key);
            SampleGroup::new(reference_key)
        });
        group.points.push(SamplePoint {
            reference_key,
            sample_id,
            offset_distance,
        });
    }

    /// Whether any sample has been recorded for this key.
    pub fn contains_group(&self, reference_key: i64) -> bool {
        self.groups.contains_key(&reference_key)
    }

    /// The group for a reference key.
    pub fn group(&self, reference_key: i64) -> Result<&SampleGroup<S>> {
        self.groups
            .get(&reference_key)
            .ok_or_else(|| MatrixError::key_not_found(format!("reference key {reference_key}")))
    }

    /// Every sample id, one per recorded point.
    pub fn all_sample_ids(&self) -> &[S] {
        &self.sample_ids
    }

    /// Every reference key, one per recorded point (duplicates kept).
    pub fn all_reference_keys(&self) -> &[i64] {
        &self.reference_keys
    }

    /// Distinct reference keys in first-seen order. The computation
    /// engine runs once per entry here, not once per sample.
    pub fn unique_reference_keys(&self) -> &[i64] {
        &self.unique_reference_keys
    }

    /// Total number of recorded points.
    pub fn len(&self) -> usize {
        self.reference_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference_keys.is_empty()
    }
}
