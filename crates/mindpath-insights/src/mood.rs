use mindpath_types::models::MoodRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
    Neutral,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionFrequency {
    pub emotion: String,
    /// Occurrence count divided by total entry count (not total mentions).
    pub frequency: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StressPattern {
    pub context: String,
    pub frequency: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodInsights {
    pub average_mood: f64,
    pub mood_trend: MoodTrend,
    pub common_emotions: Vec<EmotionFrequency>,
    pub stress_patterns: Vec<StressPattern>,
    pub recommendations: Vec<Recommendation>,
    pub data_points: usize,
}

/// Aggregate a user's decrypted mood history (most recent first, typically
/// the last 30 days) into trend and frequency statistics.
pub fn analyze_mood_patterns(entries: &[MoodRecord]) -> MoodInsights {
    if entries.is_empty() {
        return MoodInsights {
            average_mood: 0.0,
            mood_trend: MoodTrend::Neutral,
            common_emotions: vec![],
            stress_patterns: vec![],
            recommendations: vec![],
            data_points: 0,
        };
    }

    let total = entries.len();
    let avg_mood = entries.iter().map(|e| e.mood as f64).sum::<f64>() / total as f64;

    let mood_trend = classify_trend(entries, avg_mood);

    // Count emotions, preserving first-encountered order so the later
    // stable sort breaks frequency ties deterministically.
    let mut emotion_counts: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        for emotion in &entry.emotions {
            match emotion_counts.iter_mut().find(|(e, _)| e == emotion) {
                Some((_, count)) => *count += 1,
                None => emotion_counts.push((emotion.clone(), 1)),
            }
        }
    }
    emotion_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let common_emotions: Vec<EmotionFrequency> = emotion_counts
        .into_iter()
        .take(5)
        .map(|(emotion, count)| EmotionFrequency {
            emotion,
            frequency: count as f64 / total as f64,
        })
        .collect();

    // Contexts repeated three or more times count as a stress pattern.
    let mut context_counts: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        if let Some(context) = entry.context.as_deref().filter(|c| !c.is_empty()) {
            match context_counts.iter_mut().find(|(c, _)| c == context) {
                Some((_, count)) => *count += 1,
                None => context_counts.push((context.to_string(), 1)),
            }
        }
    }

    let stress_patterns: Vec<StressPattern> = context_counts
        .into_iter()
        .filter(|(_, count)| *count >= 3)
        .map(|(context, count)| StressPattern {
            context,
            frequency: count,
            percentage: round1(count as f64 / total as f64 * 100.0),
        })
        .collect();

    let recommendations = recommend(avg_mood, &common_emotions, &stress_patterns);

    MoodInsights {
        average_mood: round1(avg_mood),
        mood_trend,
        common_emotions,
        stress_patterns,
        recommendations,
        data_points: total,
    }
}

/// Compare the mean of the most recent (up to) 7 entries against the mean of
/// the 7 before them. When fewer than 8 entries exist the older window is
/// empty and falls back to the overall average, which classifies as stable.
fn classify_trend(entries: &[MoodRecord], avg_mood: f64) -> MoodTrend {
    let recent = &entries[..entries.len().min(7)];
    let recent_avg =
        recent.iter().map(|e| e.mood as f64).sum::<f64>() / recent.len() as f64;

    let older = &entries[entries.len().min(7)..entries.len().min(14)];
    let older_avg = if older.is_empty() {
        avg_mood
    } else {
        older.iter().map(|e| e.mood as f64).sum::<f64>() / older.len() as f64
    };

    if recent_avg > older_avg {
        MoodTrend::Improving
    } else if recent_avg < older_avg {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

fn recommend(
    avg_mood: f64,
    common_emotions: &[EmotionFrequency],
    stress_patterns: &[StressPattern],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if avg_mood < 5.0 {
        recommendations.push(Recommendation {
            kind: "support",
            title: "Consider Additional Support",
            description: "Your mood has been lower than average. Consider reaching out to campus counseling.",
        });
    }

    let has_anxiety = common_emotions
        .iter()
        .any(|e| ["Anxious", "Stressed", "Overwhelmed"].contains(&e.emotion.as_str()));
    if has_anxiety {
        recommendations.push(Recommendation {
            kind: "technique",
            title: "Try Breathing Exercises",
            description: "Anxiety is common. Practice the 4-7-8 breathing technique daily.",
        });
    }

    let has_exam_stress = stress_patterns.iter().any(|p| {
        let context = p.context.to_lowercase();
        context.contains("exam") || context.contains("test")
    });
    if has_exam_stress {
        recommendations.push(Recommendation {
            kind: "academic",
            title: "Exam Preparation Strategy",
            description: "Create a study schedule and use the Pomodoro technique for better focus.",
        });
    }

    recommendations
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(mood: i64, emotions: &[&str], context: Option<&str>) -> MoodRecord {
        MoodRecord {
            mood,
            emotions: emotions.iter().map(|s| s.to_string()).collect(),
            context: context.map(|s| s.to_string()),
            timestamp: None,
            date: None,
        }
    }

    #[test]
    fn empty_history_yields_zero_state() {
        let insights = analyze_mood_patterns(&[]);
        assert_eq!(insights.average_mood, 0.0);
        assert_eq!(insights.mood_trend, MoodTrend::Neutral);
        assert!(insights.common_emotions.is_empty());
        assert!(insights.stress_patterns.is_empty());
        assert!(insights.recommendations.is_empty());
        assert_eq!(insights.data_points, 0);
    }

    #[test]
    fn recent_window_above_older_window_is_improving() {
        // Most recent first: seven 8s followed by seven 4s
        let mut entries: Vec<_> = (0..7).map(|_| entry(8, &[], None)).collect();
        entries.extend((0..7).map(|_| entry(4, &[], None)));
        assert_eq!(analyze_mood_patterns(&entries).mood_trend, MoodTrend::Improving);
    }

    #[test]
    fn recent_window_below_older_window_is_declining() {
        let mut entries: Vec<_> = (0..7).map(|_| entry(4, &[], None)).collect();
        entries.extend((0..7).map(|_| entry(8, &[], None)));
        assert_eq!(analyze_mood_patterns(&entries).mood_trend, MoodTrend::Declining);
    }

    #[test]
    fn equal_windows_are_stable() {
        let entries: Vec<_> = (0..14).map(|_| entry(6, &[], None)).collect();
        assert_eq!(analyze_mood_patterns(&entries).mood_trend, MoodTrend::Stable);
    }

    #[test]
    fn short_history_falls_back_to_overall_average() {
        // Fewer than 8 entries: the older window is empty, so the recent
        // window is compared against itself via the overall average.
        let entries: Vec<_> = (0..5).map(|_| entry(7, &[], None)).collect();
        assert_eq!(analyze_mood_patterns(&entries).mood_trend, MoodTrend::Stable);
    }

    #[test]
    fn average_mood_rounds_to_one_decimal() {
        let entries = vec![entry(7, &[], None), entry(6, &[], None), entry(6, &[], None)];
        let insights = analyze_mood_patterns(&entries);
        assert_eq!(insights.average_mood, 6.3);
        assert_eq!(insights.data_points, 3);
    }

    #[test]
    fn emotion_frequency_is_per_entry_and_tie_order_is_stable() {
        let entries = vec![
            entry(6, &["Tired", "Anxious"], None),
            entry(6, &["Anxious"], None),
            entry(6, &["Calm", "Bored", "Restless", "Curious", "Hopeful"], None),
        ];
        let insights = analyze_mood_patterns(&entries);

        assert_eq!(insights.common_emotions.len(), 5);
        assert_eq!(insights.common_emotions[0].emotion, "Anxious");
        assert_eq!(insights.common_emotions[0].frequency, 2.0 / 3.0);
        // Singletons keep first-encountered order after the stable sort
        assert_eq!(insights.common_emotions[1].emotion, "Tired");
        assert_eq!(insights.common_emotions[2].emotion, "Calm");
    }

    #[test]
    fn stress_pattern_requires_three_occurrences() {
        let mut entries = vec![
            entry(5, &[], Some("Roommate conflict")),
            entry(5, &[], Some("Roommate conflict")),
        ];
        assert!(analyze_mood_patterns(&entries).stress_patterns.is_empty());

        entries.push(entry(5, &[], Some("Roommate conflict")));
        entries.push(entry(5, &[], Some("Weather")));
        let insights = analyze_mood_patterns(&entries);
        assert_eq!(insights.stress_patterns.len(), 1);
        assert_eq!(insights.stress_patterns[0].context, "Roommate conflict");
        assert_eq!(insights.stress_patterns[0].frequency, 3);
        assert_eq!(insights.stress_patterns[0].percentage, 75.0);
    }

    #[test]
    fn recommendations_accumulate_independently() {
        let entries: Vec<_> = (0..4)
            .map(|_| entry(3, &["Anxious"], Some("Final exams")))
            .collect();
        let insights = analyze_mood_patterns(&entries);

        let kinds: Vec<_> = insights.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec!["support", "technique", "academic"]);
    }

    #[test]
    fn good_mood_without_stressors_yields_no_recommendations() {
        let entries: Vec<_> = (0..3).map(|_| entry(8, &["Happy"], None)).collect();
        assert!(analyze_mood_patterns(&entries).recommendations.is_empty());
    }
}
