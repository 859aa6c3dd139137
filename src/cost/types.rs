//! Cost data carried per resource and per evaluated solution.

use std::collections::BTreeMap;

use super::weights::CostWeights;

/// Per-execution cost of running one step on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostVector {
    pub energy: f64,
    /// Wear / occupancy cost of using the resource once.
    pub usage: f64,
    pub co2: f64,
}

impl CostVector {
    pub const ZERO: Self = Self {
        energy: 0.0,
        usage: 0.0,
        co2: 0.0,
    };

    pub fn new(energy: f64, usage: f64, co2: f64) -> Self {
        Self { energy, usage, co2 }
    }

    /// Adds `other` into this vector.
    pub fn accumulate(&mut self, other: &CostVector) {
        self.energy += other.energy;
        self.usage += other.usage;
        self.co2 += other.co2;
    }

    /// Per-dimension products with the weights.
    pub fn weighted(&self, weights: &CostWeights) -> CostVector {
        CostVector {
            energy: self.energy * weights.energy,
            usage: self.usage * weights.usage,
            co2: self.co2 * weights.co2,
        }
    }

    /// Weighted sum across all dimensions.
    pub fn composite(&self, weights: &CostWeights) -> f64 {
        let weighted = self.weighted(weights);
        weighted.energy + weighted.usage + weighted.co2
    }
}

/// Cost vectors keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CostTable(BTreeMap<String, CostVector>);

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: impl Into<String>, costs: CostVector) {
        self.0.insert(resource.into(), costs);
    }

    /// Chainable form of [`insert`](Self::insert).
    pub fn with_resource(mut self, resource: impl Into<String>, costs: CostVector) -> Self {
        self.insert(resource, costs);
        self
    }

    pub fn get(&self, resource: &str) -> Option<&CostVector> {
        self.0.get(resource)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CostVector)> for CostTable {
    fn from_iter<I: IntoIterator<Item = (K, CostVector)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, costs)| (key.into(), costs))
                .collect(),
        )
    }
}

/// Cost breakdown of one solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostEvaluation {
    pub solution_id: usize,
    /// Unweighted sum over all step assignments.
    pub total: CostVector,
    /// Per-dimension weighted breakdown of `total`.
    pub weighted: CostVector,
    /// Scalar ranking score.
    pub composite: f64,
    /// How often each resource is used, keyed by canonical resource name.
    pub usage_histogram: BTreeMap<String, usize>,
}
