//! Session EXP and achievements.
//!
//! A [`SessionProgress`] value belongs to one user session. It is handed to
//! [`ProgressTracker::award`] after every successful classification and the
//! updated value is handed back; nothing is stored globally.

use serde::Serialize;
use log::info;

/// EXP at which the progress display is full. Points keep accumulating past it.
pub const DISPLAY_CEILING: u32 = 500;

const DEFAULT_POINTS: &[(&str, u32)] = &[
    ("plastic", 10),
    ("metal", 15),
    ("cardboard", 5),
    ("food", 3),
    ("glass", 8),
];

const DEFAULT_MILESTONES: &[(u32, &str)] = &[
    (50, "Eco Starter"),
    (100, "Waste Warrior"),
    (200, "Green Hero"),
    (500, "Planet Protector"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub experience_points: u32,
    /// Unlocked achievement names in unlock order, each present once
    pub achievements: Vec<String>,
}

impl SessionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a == name)
    }

    /// Fill level of the progress bar, saturating at 1.0.
    pub fn progress_fraction(&self) -> f32 {
        (self.experience_points as f32 / DISPLAY_CEILING as f32).min(1.0)
    }
}

/// What a single classification earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Award {
    pub category: String,
    pub points: u32,
    pub unlocked: Vec<String>,
}

/// Fixed point values per category and ascending achievement thresholds.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    points: Vec<(String, u32)>,
    milestones: Vec<(u32, String)>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS.iter().map(|&(c, p)| (c.to_string(), p)).collect(),
            milestones: DEFAULT_MILESTONES.iter().map(|&(t, n)| (t, n.to_string())).collect(),
        }
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points a category is worth; matching ignores case and unknown categories score 0.
    pub fn points_for(&self, category: &str) -> u32 {
        let category = category.trim().to_lowercase();
        self.points
            .iter()
            .find(|(c, _)| *c == category)
            .map(|&(_, p)| p)
            .unwrap_or(0)
    }

    pub fn milestones(&self) -> impl Iterator<Item = (u32, &str)> {
        self.milestones.iter().map(|(t, n)| (*t, n.as_str()))
    }

    /// Adds the category's points and unlocks every newly reached milestone.
    pub fn award(&self, mut progress: SessionProgress, category: &str) -> (SessionProgress, Award) {
        let points = self.points_for(category);
        progress.experience_points = progress.experience_points.saturating_add(points);

        let mut unlocked = Vec::new();
        for (threshold, name) in &self.milestones {
            if *threshold <= progress.experience_points && !progress.has_achievement(name) {
                info!("Achievement unlocked: {} ({} EXP)", name, progress.experience_points);
                progress.achievements.push(name.clone());
                unlocked.push(name.clone());
            }
        }

        let award = Award {
            category: category.to_string(),
            points,
            unlocked,
        };
        (progress, award)
    }
}
