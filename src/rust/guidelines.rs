use std::collections::HashMap;

pub const FALLBACK_GUIDELINE: &str = "No recycling information available.";

/// Static recycling advice keyed by lowercased category name.
#[derive(Debug, Clone)]
pub struct GuidelineTable {
    entries: HashMap<String, String>,
}

impl Default for GuidelineTable {
    fn default() -> Self {
        Self::from_entries([
            ("cardboard", "Flatten and keep dry before recycling."),
            ("plastic", "Rinse and check recycling symbols before disposal."),
            ("glass", "Remove lids and rinse before recycling."),
            ("metal", "Clean and sort metals before disposal."),
        ])
    }
}

impl GuidelineTable {
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    pub fn lookup(&self, category: &str) -> &str {
        self.entries
            .get(&category.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(FALLBACK_GUIDELINE)
    }
}
