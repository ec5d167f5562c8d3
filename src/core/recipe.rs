//! Recipes and the per-worker tally of collected parts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::{FactoryError, Result};
use super::types::{ComponentType, RobotType};

const MAIN_UNITS_PER_ROBOT: u32 = 1;
const BROOMS_PER_DRY2000: u32 = 2;
const MOPS_PER_WET2000: u32 = 2;

/// Quantities of each component one robot needs. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequirement {
    needed: BTreeMap<ComponentType, u32>,
}

impl RecipeRequirement {
    /// Build a custom recipe
    ///
    /// Rejects an empty recipe and zero quantities: a worker holding such a
    /// recipe would either never take anything or assemble out of thin air.
    pub fn new(needed: impl IntoIterator<Item = (ComponentType, u32)>) -> Result<Self> {
        let needed: BTreeMap<_, _> = needed.into_iter().collect();
        if needed.is_empty() {
            return Err(FactoryError::InvalidRecipe(
                "recipe must need at least one component".to_string(),
            ));
        }
        if let Some((component, _)) = needed.iter().find(|(_, qty)| **qty == 0) {
            return Err(FactoryError::InvalidRecipe(format!(
                "quantity for {} must be at least 1",
                component
            )));
        }
        Ok(Self { needed })
    }

    /// Built-in recipe for a robot type
    pub fn for_robot(robot: RobotType) -> Self {
        let needed = match robot {
            RobotType::Dry2000 => [
                (ComponentType::MainUnit, MAIN_UNITS_PER_ROBOT),
                (ComponentType::Broom, BROOMS_PER_DRY2000),
            ],
            RobotType::Wet2000 => [
                (ComponentType::MainUnit, MAIN_UNITS_PER_ROBOT),
                (ComponentType::Mop, MOPS_PER_WET2000),
            ],
        };
        Self {
            needed: needed.into_iter().collect(),
        }
    }

    /// Quantity needed for a component, `None` when the recipe does not use it
    pub fn needed(&self, component: ComponentType) -> Option<u32> {
        self.needed.get(&component).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentType, u32)> + '_ {
        self.needed.iter().map(|(c, q)| (*c, *q))
    }
}

/// What a worker currently holds against its recipe.
///
/// Owned by a single worker and never shared, so no locking is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeState {
    requirement: RecipeRequirement,
    held: BTreeMap<ComponentType, u32>,
}

impl RecipeState {
    pub fn new(requirement: RecipeRequirement) -> Self {
        let held = requirement.iter().map(|(c, _)| (c, 0)).collect();
        Self { requirement, held }
    }

    pub fn requirement(&self) -> &RecipeRequirement {
        &self.requirement
    }

    /// Count held for a component (zero for anything outside the recipe)
    pub fn held(&self, component: ComponentType) -> u32 {
        self.held.get(&component).copied().unwrap_or(0)
    }

    /// Snapshot of held counts for every recipe entry
    pub fn held_counts(&self) -> BTreeMap<ComponentType, u32> {
        self.held.clone()
    }

    /// True when the recipe uses `component` and its quota is not met yet
    pub fn needs(&self, component: ComponentType) -> bool {
        match self.requirement.needed(component) {
            Some(needed) => self.held(component) < needed,
            None => false,
        }
    }

    /// Record one more unit of `component`
    ///
    /// Returns false and leaves the tally untouched if the part is not needed,
    /// so a held count can never exceed its quota.
    pub fn add(&mut self, component: ComponentType) -> bool {
        if !self.needs(component) {
            return false;
        }
        *self.held.entry(component).or_insert(0) += 1;
        true
    }

    /// Every quota is met
    pub fn is_complete(&self) -> bool {
        self.requirement
            .iter()
            .all(|(component, needed)| self.held(component) >= needed)
    }

    pub fn is_empty(&self) -> bool {
        self.held.values().all(|count| *count == 0)
    }

    /// Drop everything held, after an assembly
    pub fn reset(&mut self) {
        for count in self.held.values_mut() {
            *count = 0;
        }
    }
}
