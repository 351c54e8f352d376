use serde::Serialize;

/// Categories the footprint tracker asks about, in display order.
pub const FOOTPRINT_CATEGORIES: [&str; 5] = ["Plastic", "Metal", "Cardboard", "Food", "Glass"];

const DAYS_PER_YEAR: f64 = 365.0;

/// Self-reported daily waste per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WasteFootprint {
    daily_grams: Vec<(String, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyFootprint {
    pub per_category_kg: Vec<(String, f64)>,
    pub total_kg: f64,
}

impl Default for WasteFootprint {
    fn default() -> Self {
        Self {
            daily_grams: FOOTPRINT_CATEGORIES.iter().map(|c| (c.to_string(), 0)).collect(),
        }
    }
}

impl WasteFootprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the grams-per-day figure for `category`.
    ///
    /// Returns `false` and leaves the footprint unchanged if the category is not tracked.
    pub fn set_daily_grams(&mut self, category: &str, grams: u32) -> bool {
        match self
            .daily_grams
            .iter_mut()
            .find(|(c, _)| c.eq_ignore_ascii_case(category.trim()))
        {
            Some(entry) => {
                entry.1 = grams;
                true
            }
            None => false,
        }
    }

    pub fn daily_grams(&self, category: &str) -> Option<u32> {
        self.daily_grams
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(category.trim()))
            .map(|&(_, g)| g)
    }

    pub fn yearly(&self) -> YearlyFootprint {
        let per_category_kg: Vec<(String, f64)> = self
            .daily_grams
            .iter()
            .map(|(c, g)| (c.clone(), f64::from(*g) / 1000.0 * DAYS_PER_YEAR))
            .collect();
        let total_kg = per_category_kg.iter().map(|(_, kg)| kg).sum();
        YearlyFootprint {
            per_category_kg,
            total_kg,
        }
    }
}
