//! Weighted solution sets returned by sampler backends.

use indexmap::IndexMap;
use jss_core::errors::{ErrorInfo, JssError};
use serde::{Deserialize, Serialize};

/// Raw variable assignment: label to binary value, in backend order.
///
/// Iteration order is insertion order. The decoder's duplicate policy is
/// defined against this order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(IndexMap<String, u8>);

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `label` to `value`, keeping the original position of an existing label.
    pub fn insert(&mut self, label: impl Into<String>, value: u8) {
        self.0.insert(label.into(), value);
    }

    /// Value of `label`, if present.
    pub fn get(&self, label: &str) -> Option<u8> {
        self.0.get(label).copied()
    }

    /// Iterates `(label, value)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.0.iter().map(|(label, value)| (label.as_str(), *value))
    }

    /// Labels whose value is 1, in assignment order.
    pub fn selected(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .filter(|(_, value)| *value == 1)
            .map(|(label, _)| label)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the assignment has no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u8)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (K, u8)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        )
    }
}

/// One distinct assignment together with its energy and read count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub assignment: Assignment,
    #[serde(default)]
    pub energy: f64,
    pub num_occurrences: u64,
}

/// Weighted collection of candidate assignments plus the lowest-energy member.
///
/// A serialized set may omit `best`; it is then recomputed from the records.
/// Records with a zero occurrence count are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleSet")]
pub struct SampleSet {
    records: Vec<SampleRecord>,
    best: Option<Assignment>,
}

#[derive(Deserialize)]
struct RawSampleSet {
    records: Vec<SampleRecord>,
    #[serde(default)]
    best: Option<Assignment>,
}

impl TryFrom<RawSampleSet> for SampleSet {
    type Error = JssError;

    fn try_from(raw: RawSampleSet) -> Result<Self, Self::Error> {
        if let Some(index) = raw
            .records
            .iter()
            .position(|record| record.num_occurrences == 0)
        {
            return Err(JssError::Serde(
                ErrorInfo::new("zero-occurrences", "occurrence count must be positive")
                    .with_context("record", index.to_string()),
            ));
        }
        Ok(match raw.best {
            Some(best) => Self::with_best(raw.records, best),
            None => Self::new(raw.records),
        })
    }
}

impl SampleSet {
    /// Wraps `records`, picking the lowest-energy record as best (first on ties).
    pub fn new(records: Vec<SampleRecord>) -> Self {
        let best = lowest_energy(&records).map(|record| record.assignment.clone());
        Self { records, best }
    }

    /// Wraps `records` with a best assignment chosen by the backend.
    pub fn with_best(records: Vec<SampleRecord>, best: Assignment) -> Self {
        Self {
            records,
            best: Some(best),
        }
    }

    /// Collapses raw reads over `labels` into weighted records.
    ///
    /// Bit-identical reads are merged with a summed weight. Records are
    /// ordered by ascending energy, ties keeping first-seen order, and the
    /// first record becomes the best assignment.
    pub fn from_reads<I>(labels: &[String], reads: I) -> Result<Self, JssError>
    where
        I: IntoIterator<Item = (Vec<u8>, f64)>,
    {
        let mut merged: IndexMap<Vec<u8>, (f64, u64)> = IndexMap::new();
        for (state, energy) in reads {
            if state.len() != labels.len() {
                return Err(JssError::MalformedModel(
                    ErrorInfo::new("read-width", "read width does not match the label count")
                        .with_context("labels", labels.len().to_string())
                        .with_context("read", state.len().to_string()),
                ));
            }
            merged
                .entry(state)
                .and_modify(|entry| entry.1 += 1)
                .or_insert((energy, 1));
        }
        let mut records: Vec<SampleRecord> = merged
            .into_iter()
            .map(|(state, (energy, num_occurrences))| SampleRecord {
                assignment: labels.iter().cloned().zip(state).collect(),
                energy,
                num_occurrences,
            })
            .collect();
        records.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        let best = records.first().map(|record| record.assignment.clone());
        Ok(Self { records, best })
    }

    /// Records in set order.
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// The distinguished lowest-energy assignment, absent for an empty set.
    pub fn best(&self) -> Option<&Assignment> {
        self.best.as_ref()
    }

    /// Sum of all occurrence counts.
    pub fn total_occurrences(&self) -> u64 {
        self.records.iter().map(|record| record.num_occurrences).sum()
    }

    /// Parses a sample set from JSON.
    pub fn from_json(json: &str) -> Result<Self, JssError> {
        serde_json::from_str(json)
            .map_err(|err| JssError::Serde(ErrorInfo::new("sampleset-parse", err.to_string())))
    }
}

fn lowest_energy(records: &[SampleRecord]) -> Option<&SampleRecord> {
    records.iter().reduce(|best, record| {
        if record.energy < best.energy {
            record
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn identical_reads_collapse() {
        let set = SampleSet::from_reads(
            &labels(),
            vec![
                (vec![1, 0], 2.0),
                (vec![0, 1], -1.0),
                (vec![1, 0], 2.0),
                (vec![1, 0], 2.0),
            ],
        )
        .unwrap();
        assert_eq!(set.records().len(), 2);
        assert_eq!(set.total_occurrences(), 4);
        assert_eq!(set.records()[0].num_occurrences, 1);
        assert_eq!(set.records()[1].num_occurrences, 3);
        assert_eq!(set.best().and_then(|best| best.get("b")), Some(1));
    }

    #[test]
    fn width_mismatch_is_malformed() {
        let err = SampleSet::from_reads(&labels(), vec![(vec![1], 0.0)]).unwrap_err();
        assert_eq!(err.info().code, "read-width");
    }

    #[test]
    fn new_picks_first_lowest_energy() {
        let first: Assignment = [("x", 1u8)].into_iter().collect();
        let second: Assignment = [("x", 0u8)].into_iter().collect();
        let set = SampleSet::new(vec![
            SampleRecord {
                assignment: first.clone(),
                energy: -3.0,
                num_occurrences: 1,
            },
            SampleRecord {
                assignment: second,
                energy: -3.0,
                num_occurrences: 5,
            },
        ]);
        assert_eq!(set.best(), Some(&first));
    }

    #[test]
    fn json_without_best_recomputes_it() {
        let set = SampleSet::from_json(
            r#"{"records": [
                {"assignment": {"x": 0}, "energy": 5.0, "num_occurrences": 2},
                {"assignment": {"x": 1}, "energy": -1.0, "num_occurrences": 1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(set.best().and_then(|best| best.get("x")), Some(1));
    }

    #[test]
    fn json_keeps_explicit_best() {
        let set = SampleSet::from_json(
            r#"{"records": [{"assignment": {"x": 0}, "energy": 5.0, "num_occurrences": 2}],
                "best": {"x": 1}}"#,
        )
        .unwrap();
        assert_eq!(set.best().and_then(|best| best.get("x")), Some(1));
    }

    #[test]
    fn zero_weight_record_rejected() {
        let err = SampleSet::from_json(
            r#"{"records": [{"assignment": {"x": 0}, "num_occurrences": 0}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.family(), "serde");
        assert!(err.info().message.contains("occurrence count must be positive"));
    }

    #[test]
    fn empty_set_has_no_best() {
        let set = SampleSet::new(Vec::new());
        assert!(set.best().is_none());
        assert_eq!(set.total_occurrences(), 0);
    }
}
