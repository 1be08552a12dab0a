use chrono::{DateTime, Utc};
use serde::Serialize;

/// A decrypted journal payload with the row's creation time attached.
#[derive(Debug, Clone)]
pub struct JournalSample {
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingFrequency {
    Daily,
    Regular,
    Occasional,
    Low,
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeFrequency {
    pub theme: &'static str,
    pub frequency: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalInsights {
    pub total_entries: usize,
    pub average_length: u64,
    pub common_themes: Vec<ThemeFrequency>,
    pub writing_frequency: WritingFrequency,
    /// Same values as `common_themes`; the field is duplicated for caller
    /// convenience and kept that way.
    pub emotional_trends: Vec<ThemeFrequency>,
}

/// Theme detection is literal lowercase substring matching, nothing more.
/// An entry counts toward every theme with at least one keyword hit.
const THEMES: [(&str, &[&str]); 5] = [
    ("academic", &["study", "exam", "assignment", "class", "homework", "grade"]),
    ("social", &["friend", "roommate", "relationship", "social", "party"]),
    ("stress", &["stress", "anxiety", "overwhelmed", "pressure", "worried"]),
    ("health", &["sleep", "exercise", "health", "tired", "sick"]),
    ("future", &["career", "job", "future", "plan", "goal"]),
];

/// Aggregate decrypted journal history (most recent first) into length,
/// cadence, and theme statistics.
pub fn analyze_journal_patterns(entries: &[JournalSample]) -> JournalInsights {
    if entries.is_empty() {
        return JournalInsights {
            total_entries: 0,
            average_length: 0,
            common_themes: vec![],
            writing_frequency: WritingFrequency::None,
            emotional_trends: vec![],
        };
    }

    let total = entries.len();

    let total_length: usize = entries
        .iter()
        .map(|e| e.text.as_deref().map_or(0, |t| t.chars().count()))
        .sum();
    let average_length = (total_length as f64 / total as f64).round() as u64;

    let writing_frequency = classify_frequency(entries);

    let mut theme_counts: Vec<(&'static str, usize)> = Vec::new();
    for entry in entries {
        let text = entry.text.as_deref().unwrap_or("").to_lowercase();
        for (theme, keywords) in THEMES {
            if keywords.iter().any(|k| text.contains(k)) {
                match theme_counts.iter_mut().find(|(t, _)| *t == theme) {
                    Some((_, count)) => *count += 1,
                    None => theme_counts.push((theme, 1)),
                }
            }
        }
    }
    theme_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let common_themes: Vec<ThemeFrequency> = theme_counts
        .into_iter()
        .take(3)
        .map(|(theme, count)| ThemeFrequency {
            theme,
            frequency: count,
            percentage: (count as f64 / total as f64 * 100.0).round() as u32,
        })
        .collect();

    JournalInsights {
        total_entries: total,
        average_length,
        emotional_trends: common_themes.clone(),
        common_themes,
        writing_frequency,
    }
}

/// Mean entries per active calendar day, bucketed. Only days with at least
/// one entry count toward the denominator.
fn classify_frequency(entries: &[JournalSample]) -> WritingFrequency {
    let mut day_counts: Vec<(chrono::NaiveDate, usize)> = Vec::new();
    for entry in entries {
        let day = entry.created_at.date_naive();
        match day_counts.iter_mut().find(|(d, _)| *d == day) {
            Some((_, count)) => *count += 1,
            None => day_counts.push((day, 1)),
        }
    }

    let per_day =
        day_counts.iter().map(|(_, c)| c).sum::<usize>() as f64 / day_counts.len() as f64;

    if per_day >= 1.0 {
        WritingFrequency::Daily
    } else if per_day >= 0.5 {
        WritingFrequency::Regular
    } else if per_day >= 0.2 {
        WritingFrequency::Occasional
    } else {
        WritingFrequency::Low
    }
}
