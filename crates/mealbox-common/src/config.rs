//! Configuration model for the mealbox service.
//!
//! Every field has a default, so an empty or partial YAML file is valid.
//! Command-line flags are applied on top of the loaded values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{MealboxError, Result};
use crate::types::Category;

/// Root configuration for the mealbox service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealboxConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Workbook locations.
    pub data: DataConfig,
    /// Number of days in a monthly plan, at most a year.
    pub plan_days: u32,
    /// Raw reference category (lowercase) to standard food group.
    pub categories: BTreeMap<String, Category>,
    /// Meals planned each day, in serving order.
    pub meals: Vec<MealRequirement>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

/// Workbook file and sheet names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory containing all workbooks.
    pub dir: PathBuf,
    /// Food reference workbook, relative to `dir`.
    pub food_reference: PathBuf,
    /// Senior box workbook, relative to `dir`.
    pub senior_box: PathBuf,
    /// Main inventory workbook, relative to `dir`.
    pub main_inventory: PathBuf,
    /// Sheet of the main inventory workbook to read.
    pub inventory_sheet: String,
    /// Senior box sheet for each cycle month.
    pub senior_box_sheets: [String; 3],
}

/// Servings of each food group one meal must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRequirement {
    /// Label reported as the meal's `meal_time`.
    pub meal_time: String,
    /// Servings required per category.
    pub requirements: BTreeMap<Category, u32>,
}

impl MealRequirement {
    /// Creates a requirement from `(category, servings)` pairs.
    #[must_use]
    pub fn new(meal_time: impl Into<String>, servings: &[(Category, u32)]) -> Self {
        Self {
            meal_time: meal_time.into(),
            requirements: servings.iter().copied().collect(),
        }
    }

    /// Total servings the meal needs across all categories.
    #[must_use]
    pub fn total_servings(&self) -> u32 {
        self.requirements.values().sum()
    }
}

impl Default for MealboxConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            plan_days: constants::PLAN_DAYS,
            categories: default_categories(),
            meals: default_meals(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            food_reference: PathBuf::from(constants::FOOD_REFERENCE_FILE),
            senior_box: PathBuf::from(constants::SENIOR_BOX_FILE),
            main_inventory: PathBuf::from(constants::MAIN_INVENTORY_FILE),
            inventory_sheet: constants::MAIN_INVENTORY_SHEET.to_string(),
            senior_box_sheets: constants::SENIOR_BOX_SHEETS.map(String::from),
        }
    }
}

impl DataConfig {
    /// Full path of the food reference workbook.
    #[must_use]
    pub fn food_reference_path(&self) -> PathBuf {
        self.dir.join(&self.food_reference)
    }

    /// Full path of the senior box workbook.
    #[must_use]
    pub fn senior_box_path(&self) -> PathBuf {
        self.dir.join(&self.senior_box)
    }

    /// Full path of the main inventory workbook.
    #[must_use]
    pub fn main_inventory_path(&self) -> PathBuf {
        self.dir.join(&self.main_inventory)
    }

    /// Senior box sheet for a cycle month; anything past 2 reads the last sheet.
    #[must_use]
    pub fn senior_box_sheet(&self, cycle: u8) -> &str {
        match cycle {
            0 | 1 => &self.senior_box_sheets[0],
            2 => &self.senior_box_sheets[1],
            _ => &self.senior_box_sheets[2],
        }
    }
}

impl MealboxConfig {
    /// Loads a configuration file, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails [`MealboxConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading configuration");
        let raw = std::fs::read_to_string(path).map_err(|e| MealboxError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&raw)
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML or fails validation.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let mut config: Self = if raw.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(raw).map_err(|e| MealboxError::Config {
                message: e.to_string(),
            })?
        };
        config.categories = config
            .categories
            .into_iter()
            .map(|(raw, cat)| (raw.trim().to_lowercase(), cat))
            .collect();
        config.validate()?;
        Ok(config)
    }

    /// Checks semantic constraints the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`MealboxError::Config`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if !(1..=constants::MAX_PLAN_DAYS).contains(&self.plan_days) {
            return Err(MealboxError::Config {
                message: format!(
                    "plan_days must be between 1 and {}, got {}",
                    constants::MAX_PLAN_DAYS, self.plan_days
                ),
            });
        }
        if self.meals.is_empty() {
            return Err(MealboxError::Config {
                message: "at least one meal must be configured".to_string(),
            });
        }
        if let Some(meal) = self.meals.iter().find(|m| m.meal_time.trim().is_empty()) {
            return Err(MealboxError::Config {
                message: format!("meal with requirements {:?} has no meal_time", meal.requirements),
            });
        }
        Ok(())
    }
}

fn default_categories() -> BTreeMap<String, Category> {
    [
        ("seasonal & local fruits/vegetables", Category::FruitVeg),
        ("milk & dairy", Category::Dairy),
        ("meat/fish/eggs/pulses", Category::Protein),
        ("grains", Category::Cereal),
        ("oil", Category::Oil),
    ]
    .into_iter()
    .map(|(raw, cat)| (raw.to_string(), cat))
    .collect()
}

// The 5-4-3-2-1 plan: five fruit/veg, four cereal, two dairy, one protein,
// three oil servings a day.
fn default_meals() -> Vec<MealRequirement> {
    use Category::{Cereal, Dairy, FruitVeg, Oil, Protein};
    vec![
        MealRequirement::new(
            "Breakfast",
            &[(FruitVeg, 1), (Cereal, 1), (Dairy, 1), (Protein, 0), (Oil, 0)],
        ),
        MealRequirement::new(
            "Lunch",
            &[(FruitVeg, 2), (Cereal, 1), (Dairy, 0), (Protein, 1), (Oil, 1)],
        ),
        MealRequirement::new(
            "Dinner",
            &[(FruitVeg, 2), (Cereal, 2), (Dairy, 1), (Protein, 0), (Oil, 2)],
        ),
    ]
}
