use serde::Serialize;

/// At or above this severity, one audit row is written for the submission.
pub const ALERT_THRESHOLD: i64 = 5;

/// Action label recorded on the audit row.
pub const ALERT_ACTION: &str = "Alert generated";

const CRITICAL_EMOTIONS: [&str; 3] = ["Hopeless", "Worthless", "Suicidal"];
const WARNING_EMOTIONS: [&str; 3] = ["Anxious", "Overwhelmed", "Depressed"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisAssessment {
    pub severity_level: i64,
    pub detected_patterns: Vec<String>,
}

impl CrisisAssessment {
    pub fn needs_alert(&self) -> bool {
        self.severity_level >= ALERT_THRESHOLD
    }
}

/// Score a single mood submission for crisis risk.
///
/// The mood level contributes at most one pattern (very low beats low);
/// each emotion contributes independently on a case-sensitive exact match
/// against the critical and warning sets. Unrecognized emotions contribute
/// nothing.
pub fn score(mood: i64, emotions: &[String]) -> CrisisAssessment {
    let mut severity_level = 0;
    let mut detected_patterns = Vec::new();

    if mood <= 2 {
        severity_level += 2;
        detected_patterns.push("Very low mood".to_string());
    } else if mood <= 4 {
        severity_level += 1;
        detected_patterns.push("Low mood".to_string());
    }

    for emotion in emotions {
        if CRITICAL_EMOTIONS.contains(&emotion.as_str()) {
            severity_level += 3;
            detected_patterns.push(format!("Critical emotion: {emotion}"));
        } else if WARNING_EMOTIONS.contains(&emotion.as_str()) {
            severity_level += 1;
            detected_patterns.push(format!("Warning emotion: {emotion}"));
        }
    }

    CrisisAssessment {
        severity_level,
        detected_patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emotions(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn low_mood_plus_critical_emotion_crosses_threshold() {
        let assessment = score(1, &emotions(&["Hopeless"]));
        assert_eq!(assessment.severity_level, 5);
        assert_eq!(
            assessment.detected_patterns,
            vec!["Very low mood", "Critical emotion: Hopeless"]
        );
        assert!(assessment.needs_alert());
    }

    #[test]
    fn single_warning_emotion_stays_below_threshold() {
        let assessment = score(8, &emotions(&["Anxious"]));
        assert_eq!(assessment.severity_level, 1);
        assert_eq!(assessment.detected_patterns, vec!["Warning emotion: Anxious"]);
        assert!(!assessment.needs_alert());
    }

    #[test]
    fn mood_bands_are_mutually_exclusive() {
        assert_eq!(score(2, &[]).detected_patterns, vec!["Very low mood"]);
        assert_eq!(score(4, &[]).detected_patterns, vec!["Low mood"]);
        assert!(score(5, &[]).detected_patterns.is_empty());
    }

    #[test]
    fn emotion_match_is_case_sensitive() {
        let assessment = score(7, &emotions(&["hopeless", "ANXIOUS"]));
        assert_eq!(assessment.severity_level, 0);
        assert!(assessment.detected_patterns.is_empty());
    }

    #[test]
    fn emotions_accumulate_independently_in_order() {
        let assessment = score(3, &emotions(&["Overwhelmed", "Suicidal", "Calm"]));
        assert_eq!(assessment.severity_level, 1 + 1 + 3);
        assert_eq!(
            assessment.detected_patterns,
            vec![
                "Low mood",
                "Warning emotion: Overwhelmed",
                "Critical emotion: Suicidal"
            ]
        );
    }
}
