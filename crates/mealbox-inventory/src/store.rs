//! Cached access to the plan inputs.
//!
//! Workbooks are re-read only when one of their fingerprints changes, so
//! files replaced on a mounted data volume are picked up by the next request.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use mealbox_common::config::DataConfig;
use mealbox_common::error::Result;
use mealbox_common::types::{Category, PlanInputs};

use crate::fingerprint::{Fingerprint, fingerprint_file};
use crate::main_inventory::load_main_inventory;
use crate::reference::FoodReference;
use crate::senior_box::SeniorBox;

/// Fingerprints of the reference, senior box and main inventory workbooks.
type WorkbookFingerprints = [Fingerprint; 3];

#[derive(Debug)]
struct CacheEntry {
    fingerprints: WorkbookFingerprints,
    inputs: PlanInputs,
}

/// Loads plan inputs from the configured workbooks.
#[derive(Debug)]
pub struct DataStore {
    data: DataConfig,
    categories: BTreeMap<String, Category>,
    cache: Mutex<HashMap<u8, CacheEntry>>,
}

impl DataStore {
    /// Creates a store over the given workbook locations.
    #[must_use]
    pub fn new(data: DataConfig, categories: BTreeMap<String, Category>) -> Self {
        Self {
            data,
            categories,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the inputs for `cycle` (1, 2 or 3), reading workbooks only if
    /// they changed since the last call for the same cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if any workbook, sheet, or required column is missing.
    pub fn inputs(&self, cycle: u8) -> Result<PlanInputs> {
        let fingerprints = self.fingerprints()?;
        {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = cache.get(&cycle).filter(|e| e.fingerprints == fingerprints) {
                tracing::debug!(cycle, "plan inputs served from cache");
                return Ok(entry.inputs.clone());
            }
        }

        let inputs = self.load(cycle)?;
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = cache.insert(
            cycle,
            CacheEntry {
                fingerprints,
                inputs: inputs.clone(),
            },
        );
        Ok(inputs)
    }

    /// Reads every workbook, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if any workbook, sheet, or required column is missing.
    pub fn load(&self, cycle: u8) -> Result<PlanInputs> {
        tracing::info!(cycle, dir = %self.data.dir.display(), "reading plan inputs");
        let reference = FoodReference::load(&self.data.food_reference_path())?;
        let senior_box = SeniorBox::load(
            &self.data.senior_box_path(),
            self.data.senior_box_sheet(cycle),
            &reference,
            &self.categories,
        )?;
        let main_items = load_main_inventory(
            &self.data.main_inventory_path(),
            &self.data.inventory_sheet,
            &reference,
            &self.categories,
        )?;
        Ok(PlanInputs {
            senior_box_records: senior_box.records,
            box_items: senior_box.items,
            main_items,
        })
    }

    fn fingerprints(&self) -> Result<WorkbookFingerprints> {
        Ok([
            fingerprint_file(&self.data.food_reference_path())?,
            fingerprint_file(&self.data.senior_box_path())?,
            fingerprint_file(&self.data.main_inventory_path())?,
        ])
    }

    /// Number of cycle months currently cached.
    #[must_use]
    pub fn cached_cycles(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
