use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::models::MoodLabel;

/// One priority slot in the keyword table: a mood label and the compiled
/// matcher over its trigger keywords.
struct MoodEntry {
    label: MoodLabel,
    matcher: AhoCorasick,
}

/// Ordered mood keyword table.
///
/// The entry order IS the classification priority: the first label with at
/// least one keyword occurrence wins, so this must stay an ordered list and
/// never become an unordered map. Read-only after load; share via `Arc`.
pub struct MoodKeywordTable {
    entries: Vec<MoodEntry>,
}

/// YAML shape for a keyword table override file.
#[derive(Debug, Deserialize)]
struct KeywordTableEntry {
    mood: MoodLabel,
    keywords: Vec<String>,
}

static SHARED_TABLE: Lazy<Arc<MoodKeywordTable>> = Lazy::new(|| {
    let table = MoodKeywordTable::from_config("config/mood_keywords.yaml")
        .unwrap_or_else(|e| {
            info!("No mood keyword config found or failed to load ({}), using built-in table", e);
            MoodKeywordTable::default_table()
        });
    Arc::new(table)
});

impl MoodKeywordTable {
    /// Process-wide table, loaded once on first use.
    pub fn shared() -> Arc<MoodKeywordTable> {
        SHARED_TABLE.clone()
    }

    /// Builds a table from ordered (label, keywords) pairs.
    pub fn from_pairs<S: AsRef<str>>(
        pairs: Vec<(MoodLabel, Vec<S>)>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (label, keywords) in pairs {
            let matcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(keywords.iter().map(|k| k.as_ref()))?;
            entries.push(MoodEntry { label, matcher });
        }
        Ok(Self { entries })
    }

    /// Loads the table from a YAML file (ordered list of mood/keywords entries).
    pub fn from_config(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !Path::new(path).exists() {
            return Err("file does not exist".into());
        }

        let content = std::fs::read_to_string(path)?;
        let raw: Vec<KeywordTableEntry> = serde_yaml::from_str(&content)?;
        if raw.is_empty() {
            return Err("keyword table is empty".into());
        }

        let table = Self::from_pairs(
            raw.into_iter().map(|e| (e.mood, e.keywords)).collect(),
        )?;

        info!("Loaded mood keyword table from {} ({} labels)", path, table.entries.len());
        Ok(table)
    }

    /// Built-in table matching the documented classifier contract.
    pub fn default_table() -> Self {
        // Compiled-in patterns are all non-empty ASCII; building cannot fail
        Self::from_pairs(default_keyword_pairs()).expect("built-in keyword table must compile")
    }

    /// Finds the winning label for a text: first entry in priority order with
    /// at least one keyword occurrence, together with the summed occurrence
    /// count for that entry.
    pub fn best_match(&self, text: &str) -> Option<(MoodLabel, usize)> {
        for entry in &self.entries {
            let matches = entry.matcher.find_iter(text).count();
            if matches > 0 {
                return Some((entry.label, matches));
            }
        }
        None
    }

    pub fn labels(&self) -> impl Iterator<Item = MoodLabel> + '_ {
        self.entries.iter().map(|e| e.label)
    }
}

fn default_keyword_pairs() -> Vec<(MoodLabel, Vec<&'static str>)> {
    vec![
        (
            MoodLabel::Happy,
            vec!["happy", "excited", "great", "wonderful", "amazing", "fantastic", "joyful", "cheerful"],
        ),
        (
            MoodLabel::Tired,
            vec!["tired", "exhausted", "sleepy", "drained", "weary", "fatigued"],
        ),
        (
            MoodLabel::Stressed,
            vec!["stressed", "anxious", "worried", "nervous", "overwhelmed", "tense", "pressured"],
        ),
        (
            MoodLabel::Bored,
            vec!["bored", "uninterested", "dull", "monotonous", "unmotivated"],
        ),
        (
            MoodLabel::Focused,
            vec!["focused", "concentrated", "determined", "motivated", "energized"],
        ),
    ]
}

/// Mapping from mood label to recommended study session length.
///
/// Intentionally coarse: elevated-energy moods get longer sessions, fatigue
/// and stress get shorter ones, everything else the neutral baseline. This
/// table is the conformance contract for the fallback path, not a model.
pub struct StudyHoursPolicy;

impl StudyHoursPolicy {
    pub const DEFAULT_HOURS: f32 = 3.0;

    pub fn recommended_hours(label: MoodLabel) -> f32 {
        match label {
            MoodLabel::Happy | MoodLabel::Focused => 4.0,
            MoodLabel::Tired | MoodLabel::Stressed => 2.0,
            MoodLabel::Bored => 3.0,
            _ => Self::DEFAULT_HOURS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_is_fixed() {
        let table = MoodKeywordTable::default_table();
        let order: Vec<MoodLabel> = table.labels().collect();

        assert_eq!(
            order,
            vec![
                MoodLabel::Happy,
                MoodLabel::Tired,
                MoodLabel::Stressed,
                MoodLabel::Bored,
                MoodLabel::Focused,
            ]
        );
    }

    #[test]
    fn test_first_matching_label_wins() {
        let table = MoodKeywordTable::default_table();

        // Matches both happy ("happy") and tired ("tired"); happy is checked first
        let (label, _) = table.best_match("happy but tired").unwrap();
        assert_eq!(label, MoodLabel::Happy);
    }

    #[test]
    fn test_occurrences_within_winning_label_are_summed() {
        let table = MoodKeywordTable::default_table();

        let (label, matches) = table.best_match("exhausted and drained").unwrap();
        assert_eq!(label, MoodLabel::Tired);
        assert_eq!(matches, 2);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let table = MoodKeywordTable::default_table();

        let (label, matches) = table.best_match("FEELING HAPPY AND EXCITED").unwrap();
        assert_eq!(label, MoodLabel::Happy);
        assert_eq!(matches, 2);
    }

    #[test]
    fn test_no_keywords_means_no_match() {
        let table = MoodKeywordTable::default_table();
        assert!(table.best_match("the weather is nice today").is_none());
    }

    #[test]
    fn test_study_hours_policy_table() {
        assert_eq!(StudyHoursPolicy::recommended_hours(MoodLabel::Happy), 4.0);
        assert_eq!(StudyHoursPolicy::recommended_hours(MoodLabel::Focused), 4.0);
        assert_eq!(StudyHoursPolicy::recommended_hours(MoodLabel::Tired), 2.0);
        assert_eq!(StudyHoursPolicy::recommended_hours(MoodLabel::Stressed), 2.0);
        assert_eq!(StudyHoursPolicy::recommended_hours(MoodLabel::Bored), 3.0);
        assert_eq!(StudyHoursPolicy::recommended_hours(MoodLabel::Neutral), 3.0);
    }

    #[test]
    fn test_study_hours_policy_is_total_and_idempotent() {
        let all = [
            MoodLabel::Happy,
            MoodLabel::Excited,
            MoodLabel::Tired,
            MoodLabel::Stressed,
            MoodLabel::Bored,
            MoodLabel::Anxious,
            MoodLabel::Focused,
            MoodLabel::Relaxed,
            MoodLabel::Neutral,
            MoodLabel::Sad,
            MoodLabel::Angry,
        ];

        for label in all {
            let first = StudyHoursPolicy::recommended_hours(label);
            let second = StudyHoursPolicy::recommended_hours(label);
            assert_eq!(first, second);
            assert!((0.5..=8.0).contains(&first));
        }
    }

    #[test]
    fn test_from_config_rejects_missing_file() {
        assert!(MoodKeywordTable::from_config("config/does_not_exist.yaml").is_err());
    }
}
