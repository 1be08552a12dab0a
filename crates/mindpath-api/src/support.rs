use serde_json::json;
use tracing::warn;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Canned response used whenever the remote model is unconfigured or fails.
const FALLBACK_RESPONSE: &str = "Thank you for sharing your thoughts. While I couldn't process \
this with AI right now, remember that your feelings are valid. Consider trying the coping \
strategies in the app, and don't hesitate to reach out to campus counseling if you need \
additional support.";

/// Generates the supportive response stored (unencrypted) alongside each
/// journal entry. Degrades to a canned fallback on any failure — a journal
/// save never fails because the remote model did.
#[derive(Clone)]
pub struct SupportClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl SupportClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    pub async fn respond(&self, journal_text: &str, year_in_school: Option<&str>) -> String {
        let Some(api_key) = &self.api_key else {
            return FALLBACK_RESPONSE.to_string();
        };

        match self.request(api_key, journal_text, year_in_school).await {
            Ok(text) => text,
            Err(e) => {
                warn!("supportive-response request failed: {}", e);
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    async fn request(
        &self,
        api_key: &str,
        journal_text: &str,
        year_in_school: Option<&str>,
    ) -> anyhow::Result<String> {
        let system_prompt = format!(
            "You are MindPath, a supportive AI companion for college students. \
You provide empathetic, evidence-based mental health support while maintaining complete privacy.\n\n\
Student Context:\n- Year in school: {}\n\n\
Guidelines:\n\
- Be empathetic and validating - acknowledge their feelings first\n\
- Provide specific, actionable coping strategies tailored to college life\n\
- Reference academic context when relevant (exams, assignments, social life)\n\
- Suggest campus resources when appropriate (counseling, health services)\n\
- Keep responses concise but warm (2-3 paragraphs)\n\
- If detecting crisis signs, gently suggest professional support\n\
- Use a supportive, non-judgmental tone\n\
- Include practical tips that can be implemented immediately",
            year_in_school.unwrap_or("unknown")
        );

        let body = json!({
            "model": "gpt-3.5-turbo",
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": journal_text },
            ],
            "max_tokens": 300,
            "temperature": 0.7,
        });

        let response: serde_json::Value = self
            .http
            .post(COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("unexpected completion response shape"))
    }
}
