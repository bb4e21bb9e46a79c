use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::types::{Stage, Teeth};
use crate::utils::validation::{check_inventory_limit, is_valid_teeth, MAX_TEETH};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Gear inventory is empty")]
    Empty,

    #[error("Invalid gear with {0} teeth (must be between 1 and {MAX_TEETH})")]
    InvalidTeeth(Teeth),

    #[error("{0}")]
    TooManyGears(String),
}

/// The change gears available on the lathe: a multiset of tooth counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearInventory {
    /// Tooth count -> number of gears with that count
    counts: BTreeMap<Teeth, usize>,

    /// Total number of physical gears
    total: usize,
}

impl GearInventory {
    /// Build an inventory from a list of tooth counts, one entry per gear
    ///
    /// # Errors
    ///
    /// Returns `InventoryError` if the list is empty, holds a tooth count
    /// outside `1..=MAX_TEETH`, or exceeds the inventory size limit.
    pub fn new(gears: &[Teeth]) -> Result<Self, InventoryError> {
        if gears.is_empty() {
            return Err(InventoryError::Empty);
        }

        let mut counts: BTreeMap<Teeth, usize> = BTreeMap::new();
        for (total, &teeth) in gears.iter().enumerate() {
            if !is_valid_teeth(teeth) {
                return Err(InventoryError::InvalidTeeth(teeth));
            }
            if let Some(msg) = check_inventory_limit(total) {
                return Err(InventoryError::TooManyGears(msg));
            }
            *counts.entry(teeth).or_default() += 1;
        }

        Ok(Self {
            counts,
            total: gears.len(),
        })
    }

    /// Number of physical gears
    pub fn len(&self) -> usize {
        self.total
    }

    /// Always false for a constructed inventory; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// How many gears have exactly `teeth` teeth
    pub fn count(&self, teeth: Teeth) -> usize {
        self.counts.get(&teeth).copied().unwrap_or(0)
    }

    /// Distinct tooth counts, ascending
    pub fn distinct(&self) -> impl Iterator<Item = Teeth> + '_ {
        self.counts.keys().copied()
    }

    /// Every gear, ascending, duplicates repeated
    pub fn gears(&self) -> Vec<Teeth> {
        self.counts
            .iter()
            .flat_map(|(&teeth, &count)| std::iter::repeat(teeth).take(count))
            .collect()
    }

    pub fn smallest(&self) -> Option<Teeth> {
        self.counts.keys().next().copied()
    }

    pub fn largest(&self) -> Option<Teeth> {
        self.counts.keys().next_back().copied()
    }

    /// Check that the stages can all be mounted at once from this inventory
    pub fn can_supply(&self, stages: &[Stage]) -> bool {
        let mut used: BTreeMap<Teeth, usize> = BTreeMap::new();
        for stage in stages {
            *used.entry(stage.driver).or_default() += 1;
            *used.entry(stage.driven).or_default() += 1;
        }
        used.iter().all(|(&teeth, &n)| n <= self.count(teeth))
    }
}

impl std::fmt::Display for GearInventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(teeth, count)| {
                if *count > 1 {
                    format!("{teeth}x{count}")
                } else {
                    teeth.to_string()
                }
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
