//! Seed data provider
//!
//! The built-in taxonomy of eight columns and the six sample entries the board
//! starts with, plus loaders for replacing them from a file.

use crate::error::SeedError;
use crate::types::{Column, ColumnId, Entry, EntryId, EntryType, ImpactLevel, Status, Tags};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Initial columns and entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl SeedData {
    /// Built-in seed
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            columns: default_columns(),
            entries: sample_entries(),
        }
    }

    /// Built-in columns with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: default_columns(),
            entries: Vec::new(),
        }
    }

    /// Load seed data from a `.json`, `.yaml`/`.yml` or `.toml` file
    ///
    /// # Errors
    /// Fails on I/O, parse errors, unknown extensions or duplicate entry ids.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let seed: Self = match ext.as_str() {
            "json" => serde_json::from_str(&raw)?,
            "yaml" | "yml" => serde_yaml::from_str(&raw)?,
            "toml" => toml::from_str(&raw)?,
            other => return Err(SeedError::UnsupportedFormat(other.to_string())),
        };
        seed.check()?;
        tracing::debug!(
            path = %path.display(),
            columns = seed.columns.len(),
            entries = seed.entries.len(),
            "loaded seed data"
        );
        Ok(seed)
    }

    /// Verify entry ids are unique
    ///
    /// Column references are deliberately not checked: entries pointing at an
    /// unknown column are accepted and simply stay off the board.
    ///
    /// # Errors
    /// Returns the first duplicated id.
    pub fn check(&self) -> Result<(), SeedError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(&entry.id) {
                return Err(SeedError::DuplicateId(entry.id.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The eight board columns, in board order
#[must_use]
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new(
            "foundations",
            "Foundations",
            "BookOpen",
            "Key theories, frameworks, and baseline knowledge",
        ),
        Column::new(
            "ecosystem",
            "Ecosystem Mapping",
            "Globe",
            "Stakeholder maps, trend notes, comparative industries",
        ),
        Column::new(
            "experiments",
            "Experiments",
            "FlaskConical",
            "Live or past pilots you're tracking",
        ),
        Column::new(
            "metrics",
            "Metrics & Analytics",
            "BarChart3",
            "KPIs, dashboards, data observations",
        ),
        Column::new(
            "cases",
            "Case Studies",
            "FileText",
            "Media + cross-industry lessons",
        ),
        Column::new(
            "ideas",
            "Ideas & Sandbox",
            "Lightbulb",
            "Creative brainstorms, sketches, \"wild\" retention experiments",
        ),
        Column::new(
            "reflections",
            "Reflections & Frameworks",
            "Eye",
            "Personal insights, what worked, your playbook in progress",
        ),
        Column::new(
            "growth",
            "Professional Growth",
            "TrendingUp",
            "Skills, mentors, workshops, MBA learnings, industry notes",
        ),
    ]
}

struct SampleEntry {
    id: &'static str,
    title: &'static str,
    entry_type: EntryType,
    status: Status,
    tags: &'static [&'static str],
    source: &'static str,
    day: u32,
    impact: ImpactLevel,
    notes: &'static str,
    column: &'static str,
}

impl SampleEntry {
    fn build(&self) -> Entry {
        Entry {
            id: EntryId::new(self.id),
            title: self.title.to_string(),
            entry_type: self.entry_type,
            status: self.status,
            tags: self.tags.iter().collect::<Tags>(),
            source: self.source.to_string(),
            // every sample is dated January 2024
            date_added: NaiveDate::from_ymd_opt(2024, 1, self.day).unwrap_or_default(),
            impact_level: self.impact,
            notes: self.notes.to_string(),
            column: ColumnId::new(self.column),
        }
    }
}

const SAMPLES: &[SampleEntry] = &[
    SampleEntry {
        id: "1",
        title: "Hooked Model (Nir Eyal)",
        entry_type: EntryType::Concept,
        status: Status::Complete,
        tags: &["Behavioral Science", "Retention"],
        source: "Book",
        day: 15,
        impact: ImpactLevel::High,
        notes: "Framework for habit formation (Trigger → Action → Variable Reward → Investment). Could map directly to onboarding journeys.",
        column: "foundations",
    },
    SampleEntry {
        id: "2",
        title: "Renewal Reminder Pilot",
        entry_type: EntryType::Experiment,
        status: Status::InProgress,
        tags: &["Renewal", "Churn Prevention"],
        source: "Internal Pilot",
        day: 10,
        impact: ImpactLevel::Medium,
        notes: "Test hypothesis that SMS reminders within 3 days of renewal deadline reduce churn.",
        column: "experiments",
    },
    SampleEntry {
        id: "3",
        title: "Print Loyalty Club (\"Ink Society\")",
        entry_type: EntryType::Idea,
        status: Status::ToExplore,
        tags: &["Community", "Loyalty", "Print"],
        source: "Personal Idea",
        day: 12,
        impact: ImpactLevel::High,
        notes: "Points for tenure, crosswords solved, community events. Inspired by Sephora's loyalty model.",
        column: "ideas",
    },
    SampleEntry {
        id: "4",
        title: "NPA Slack Takeaway – Personalization",
        entry_type: EntryType::Note,
        status: Status::Complete,
        tags: &["Industry Learning"],
        source: "News Product Alliance Slack",
        day: 8,
        impact: ImpactLevel::Medium,
        notes: "Key insight — retention efforts must balance personalization with newsroom capacity.",
        column: "growth",
    },
    SampleEntry {
        id: "5",
        title: "Subscriber Churn Analysis Q4 2023",
        entry_type: EntryType::Metric,
        status: Status::Complete,
        tags: &["Churn", "Analytics", "Digital"],
        source: "Internal Data",
        day: 5,
        impact: ImpactLevel::High,
        notes: "Monthly churn rate increased 0.3% in Q4. Primary factors: price sensitivity and content engagement decline.",
        column: "metrics",
    },
    SampleEntry {
        id: "6",
        title: "NYT Cooking Subscription Model",
        entry_type: EntryType::CaseStudy,
        status: Status::Complete,
        tags: &["Subscription", "Content Strategy", "Cross-Industry"],
        source: "Article",
        day: 20,
        impact: ImpactLevel::High,
        notes: "Standalone product with dedicated community features. 90% retention rate through recipe personalization.",
        column: "cases",
    },
];

/// The six sample entries, in store order
#[must_use]
pub fn sample_entries() -> Vec<Entry> {
    SAMPLES.iter().map(SampleEntry::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_seed_shape() {
        let seed = SeedData::builtin();
        assert_eq!(seed.columns.len(), 8);
        assert_eq!(seed.entries.len(), 6);
        let ids: Vec<&str> = seed.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert!(seed.check().is_ok());
    }

    #[test]
    fn every_sample_lands_in_a_known_column() {
        let seed = SeedData::builtin();
        for entry in &seed.entries {
            assert!(seed.columns.iter().any(|c| c.id == entry.column), "{}", entry.id);
        }
    }

    #[test]
    fn sample_dates_are_january_2024() {
        let entry = &sample_entries()[0];
        assert_eq!(entry.date_added, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut seed = SeedData::builtin();
        let copy = seed.entries[0].clone();
        seed.entries.push(copy);
        assert!(matches!(seed.check(), Err(SeedError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn load_json_seed_round_trips() {
        let seed = SeedData::builtin();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(&seed).unwrap().as_bytes())
            .unwrap();

        let loaded = SeedData::load(file.path()).unwrap();
        assert_eq!(loaded, seed);
    }

    #[test]
    fn load_toml_seed() {
        let toml = r#"
[[columns]]
id = "inbox"
title = "Inbox"
icon = "BookOpen"
description = "Unsorted"

[[entries]]
id = "a1"
title = "Trial extension survey"
type = "Case Study"
status = "In Progress"
tags = ["Trials", "Survey", "Trials"]
source = "Interview"
dateAdded = "2024-02-01"
impactLevel = "High"
notes = "Ask lapsed trial users why they left"
column = "inbox"
"#;
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let loaded = SeedData::load(file.path()).unwrap();
        assert_eq!(loaded.columns.len(), 1);
        assert_eq!(loaded.entries.len(), 1);

        let entry = &loaded.entries[0];
        assert_eq!(entry.id.as_str(), "a1");
        assert_eq!(entry.entry_type, EntryType::CaseStudy);
        assert_eq!(entry.impact_level, ImpactLevel::High);
        assert_eq!(entry.date_added, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(entry.tags.iter().collect::<Vec<_>>(), vec!["Trials", "Survey"]);
    }

    #[test]
    fn load_yaml_seed_without_entries() {
        let yaml = "columns:\n  - id: inbox\n    title: Inbox\n    icon: BookOpen\n    description: Unsorted\n";
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = SeedData::load(file.path()).unwrap();
        assert_eq!(loaded.columns.len(), 1);
        assert_eq!(loaded.columns[0].id.as_str(), "inbox");
        assert!(loaded.entries.is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        assert!(matches!(
            SeedData::load(file.path()),
            Err(SeedError::UnsupportedFormat(ext)) if ext == "csv"
        ));
    }
}
