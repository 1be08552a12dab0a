use std::sync::LazyLock;

use mindpath_types::models::MoodRecord;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub id: u32,
    pub category: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ContextPools {
    context: String,
    pool1: Vec<Strategy>,
    pool2: Vec<Strategy>,
}

#[derive(Debug, Deserialize)]
struct EmotionPools {
    emotion: String,
    contexts: Vec<ContextPools>,
}

/// Pre-authored coping-strategy pools keyed by emotion, then context.
/// Content lives in an embedded JSON resource so it can be revised without
/// touching selection logic; declaration order matters for loose matching.
static POOL_TABLE: LazyLock<Vec<EmotionPools>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/strategy_pools.json"))
        .expect("embedded strategy pool table parses")
});

/// Pick 4 strategies for the user's most recent mood entry: 2 random picks
/// from each of the matched context's two pools, pool1 picks first.
///
/// The lookup keys off the entry's first emotion and its context, both
/// lowercased and trimmed. A miss (unknown emotion, no context match, or an
/// entry with no emotions) is not an error — it returns an empty list.
pub fn select_strategies(latest: &MoodRecord) -> Vec<Strategy> {
    select_with_rng(latest, &mut rand::rng())
}

fn select_with_rng<R: rand::Rng + ?Sized>(latest: &MoodRecord, rng: &mut R) -> Vec<Strategy> {
    let Some(first_emotion) = latest.emotions.first() else {
        return vec![];
    };
    let emotion = first_emotion.trim().to_lowercase();
    let context = latest
        .context
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    let Some(pools) = lookup(&POOL_TABLE, &emotion, &context) else {
        return vec![];
    };

    let mut pool1 = pools.pool1.clone();
    let mut pool2 = pools.pool2.clone();
    pool1.shuffle(rng);
    pool2.shuffle(rng);

    pool1
        .into_iter()
        .take(2)
        .chain(pool2.into_iter().take(2))
        .collect()
}

/// Exact context match first, then the first loose match in declaration
/// order: a table key that is a substring of the input context or vice versa.
fn lookup<'a>(
    table: &'a [EmotionPools],
    emotion: &str,
    context: &str,
) -> Option<&'a ContextPools> {
    let entry = table.iter().find(|e| e.emotion == emotion)?;

    entry
        .contexts
        .iter()
        .find(|c| c.context == context)
        .or_else(|| {
            entry
                .contexts
                .iter()
                .find(|c| c.context.contains(context) || context.contains(&c.context))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mood(emotions: &[&str], context: &str) -> MoodRecord {
        MoodRecord {
            mood: 5,
            emotions: emotions.iter().map(|s| s.to_string()).collect(),
            context: Some(context.to_string()),
            timestamp: None,
            date: None,
        }
    }

    #[test]
    fn pool_table_is_well_formed() {
        for emotion in POOL_TABLE.iter() {
            for ctx in &emotion.contexts {
                assert_eq!(ctx.pool1.len(), 4, "{}/{}", emotion.emotion, ctx.context);
                assert_eq!(ctx.pool2.len(), 4, "{}/{}", emotion.emotion, ctx.context);
            }
        }
    }

    #[test]
    fn returns_two_picks_from_each_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        // anxious/exams-tests pools carry ids 101-104 and 105-108
        for _ in 0..50 {
            let picks = select_with_rng(&mood(&["Anxious"], "Exams/Tests"), &mut rng);
            assert_eq!(picks.len(), 4);
            assert!(picks[..2].iter().all(|s| (101..=104).contains(&s.id)));
            assert!(picks[2..].iter().all(|s| (105..=108).contains(&s.id)));
            assert_ne!(picks[0].id, picks[1].id);
            assert_ne!(picks[2].id, picks[3].id);
        }
    }

    #[test]
    fn shuffle_actually_varies_the_selection() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let picks = select_with_rng(&mood(&["anxious"], "exams/tests"), &mut rng);
            seen.insert(picks.iter().map(|s| s.id).collect::<Vec<_>>());
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn loose_match_accepts_substring_contexts() {
        let mut rng = StdRng::seed_from_u64(1);
        // "exam" is a substring of the table key "exams/tests"
        let picks = select_with_rng(&mood(&["Anxious"], "exam"), &mut rng);
        assert_eq!(picks.len(), 4);
        assert!(picks[0].id >= 101 && picks[0].id <= 104);

        // and the reverse relation also matches
        let picks = select_with_rng(
            &mood(&["Anxious"], "dreading my exams/tests this week"),
            &mut rng,
        );
        assert_eq!(picks.len(), 4);
    }

    #[test]
    fn lookup_normalizes_case_and_whitespace() {
        let mut rng = StdRng::seed_from_u64(2);
        let picks = select_with_rng(&mood(&["  ANXIOUS  "], "  EXAMS/TESTS  "), &mut rng);
        assert_eq!(picks.len(), 4);
    }

    #[test]
    fn unknown_emotion_returns_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(select_with_rng(&mood(&["Ecstatic"], "exams/tests"), &mut rng).is_empty());
    }

    #[test]
    fn entry_without_emotions_returns_empty() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(select_with_rng(&mood(&[], "exams/tests"), &mut rng).is_empty());
    }

    #[test]
    fn unmatched_context_returns_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let picks = select_with_rng(&mood(&["Anxious"], "intramural soccer"), &mut rng);
        assert!(picks.is_empty());
    }
}
