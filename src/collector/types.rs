use crate::collector::error::HealthError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulates instance counts per family. Entries only ever start at 1.
#[derive(Debug, Clone, Default)]
pub struct FamilyCounts {
    counts: BTreeMap<String, u64>,
}

impl FamilyCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, family: &str) {
        *self.counts.entry(family.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }
}

impl<'a> FromIterator<&'a str> for FamilyCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Self::new();
        for family in iter {
            counts.record(family);
        }
        counts
    }
}

/// Snapshot statistics for one document. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "WireHealthMetrics")]
pub struct HealthMetrics {
    #[serde(rename = "TotalElements")]
    total_elements: u64,

    #[serde(rename = "Warnings")]
    warning_count: u64,

    #[serde(rename = "Families")]
    family_instance_counts: BTreeMap<String, u64>,
}

#[derive(Deserialize)]
struct WireHealthMetrics {
    #[serde(rename = "TotalElements")]
    total_elements: u64,

    #[serde(rename = "Warnings")]
    warning_count: u64,

    #[serde(rename = "Families")]
    family_instance_counts: BTreeMap<String, u64>,
}

impl TryFrom<WireHealthMetrics> for HealthMetrics {
    type Error = HealthError;

    fn try_from(wire: WireHealthMetrics) -> Result<Self, Self::Error> {
        if wire.family_instance_counts.keys().any(|family| family.is_empty()) {
            return Err(HealthError::EmptyFamilyName);
        }
        if let Some((family, _)) = wire.family_instance_counts.iter().find(|(_, n)| **n == 0) {
            return Err(HealthError::ZeroFamilyCount(family.clone()));
        }

        Ok(Self {
            total_elements: wire.total_elements,
            warning_count: wire.warning_count,
            family_instance_counts: wire.family_instance_counts,
        })
    }
}

impl HealthMetrics {
    pub fn new(total_elements: u64, warning_count: u64, families: FamilyCounts) -> Self {
        Self {
            total_elements,
            warning_count,
            family_instance_counts: families.counts,
        }
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn warning_count(&self) -> u64 {
        self.warning_count
    }

    pub fn family_instance_counts(&self) -> &BTreeMap<String, u64> {
        &self.family_instance_counts
    }

    pub fn family_count(&self, family: &str) -> Option<u64> {
        self.family_instance_counts.get(family).copied()
    }

    /// Number of family instances across all families
    pub fn family_instance_total(&self) -> u64 {
        self.family_instance_counts.values().sum()
    }

    /// Text shown to the user before the metrics are published.
    pub fn summary(&self) -> String {
        format!(
            "Total Elements: {}\nWarnings: {}",
            self.total_elements, self.warning_count
        )
    }
}
