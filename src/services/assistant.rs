use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;

const SYSTEM_PROMPT: &str = "You are Bobo, a warm and knowledgeable AI parenting assistant. You help parents with questions about:
- Baby sleep schedules and sleep training
- Feeding (breastfeeding, formula, solids, weaning)
- Developmental milestones
- Baby health and wellness
- Parenting tips and strategies
- Work-life balance with children

Guidelines:
1. Be warm, supportive, and non-judgmental - parenting is hard!
2. Provide evidence-based advice when possible
3. Always recommend consulting a pediatrician for medical concerns
4. Acknowledge that every baby is different
5. Keep responses concise but helpful (aim for 2-3 paragraphs max)
6. Use emojis sparingly to be friendly but professional
7. If asked about something outside parenting, gently redirect to parenting topics

You are NOT a replacement for medical advice. Always encourage parents to consult healthcare professionals for medical concerns.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String, // "user" | "assistant"
    pub content: String,
}

/// Context fields appended to the system prompt when a baby is selected.
#[derive(Debug, Clone)]
pub struct BabyContext {
    pub name: String,
    pub age_months: i64,
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionError {
    error: Option<CompletionErrorBody>,
}

#[derive(Debug, Deserialize)]
struct CompletionErrorBody {
    message: String,
}

pub struct AssistantService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl AssistantService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
        }
    }

    pub fn build_system_prompt(baby: Option<&BabyContext>) -> String {
        match baby {
            Some(b) => format!(
                "{SYSTEM_PROMPT}\n\nContext about the user's baby:\n- Name: {}\n- Age: {} months old\n- Gender: {}",
                b.name,
                b.age_months,
                b.gender.as_deref().unwrap_or("Unknown"),
            ),
            None => SYSTEM_PROMPT.to_string(),
        }
    }

    /// One chat-completion round trip. No streaming, no retries — upstream
    /// errors come back verbatim.
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        baby: Option<&BabyContext>,
    ) -> anyhow::Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "AI service not configured. Please add OPENAI_API_KEY to environment variables."
            )
        })?;

        let mut messages = vec![json!({
            "role": "system",
            "content": Self::build_system_prompt(baby),
        })];
        for m in history {
            messages.push(json!({ "role": m.role, "content": m.content }));
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "max_tokens": 500,
                "temperature": 0.7,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CompletionError>(&body)
                .ok()
                .and_then(|e| e.error)
                .map(|e| e.message)
                .unwrap_or(body);
            anyhow::bail!("Chat completion failed ({status}): {message}");
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("Empty response from assistant"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_without_baby() {
        let prompt = AssistantService::build_system_prompt(None);
        assert!(prompt.starts_with("You are Bobo"));
        assert!(!prompt.contains("Context about the user's baby"));
    }

    #[test]
    fn test_system_prompt_with_baby_context() {
        let baby = BabyContext {
            name: "Emma".to_string(),
            age_months: 6,
            gender: None,
        };
        let prompt = AssistantService::build_system_prompt(Some(&baby));
        assert!(prompt.contains("- Name: Emma"));
        assert!(prompt.contains("- Age: 6 months old"));
        assert!(prompt.contains("- Gender: Unknown"));
    }
}
