//! Mentor advice collaborator.
//!
//! The generative service behind [`AdviceService`] is external. Callers go
//! through [`mentor_advice`] or [`ask_mentor`], which ask at most once and
//! replace any failure with [`MENTOR_FALLBACK`] so no raw error ever reaches
//! the member.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::SkillLevel;

/// Shown whenever the advice service cannot answer.
pub const MENTOR_FALLBACK: &str = "mentor unavailable, try again";

/// Suggestions kept from one reply.
pub const MAX_SUGGESTIONS: usize = 3;

/// Upper bound the mentor is asked to respect.
const ADVICE_WORD_LIMIT: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRequest {
    pub topic: String,
    pub level: SkillLevel,
    pub prompt: String,
}

impl AdviceRequest {
    pub fn new(topic: impl Into<String>, level: SkillLevel, prompt: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            level,
            prompt: prompt.into(),
        }
    }

    /// User turn sent to the model.
    pub fn contents(&self) -> String {
        format!("I am a {} in {}. {}", self.level, self.topic, self.prompt)
    }

    pub fn system_instruction(&self) -> String {
        format!(
            "You are an expert mentor for {topic}. Provide encouraging, practical, and highly \
             specific advice for a {level}. Focus on skill-building and next steps. Keep it \
             under {limit} words.",
            topic = self.topic,
            level = self.level,
            limit = ADVICE_WORD_LIMIT,
        )
    }
}

/// A hobby group proposed from free-text interests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HobbySuggestion {
    pub name: String,
    pub reason: String,
    pub skill_to_focus_on: String,
}

#[async_trait]
pub trait AdviceService: Send + Sync {
    async fn get_advice(&self, request: &AdviceRequest) -> Result<String, AppError>;

    /// Raw JSON array of [`HobbySuggestion`] for the given interests.
    async fn get_suggestions(&self, interests: &str) -> Result<String, AppError> {
        let _ = interests;
        Err(AppError::Collaborator(
            "Hobby suggestions are not supported".to_string(),
        ))
    }
}

/// Ask the mentor once, falling back to a fixed message on any failure.
pub async fn mentor_advice<A: AdviceService + ?Sized>(
    service: &A,
    topic: &str,
    level: SkillLevel,
    prompt: &str,
) -> String {
    ask_mentor(service, &AdviceRequest::new(topic, level, prompt)).await
}

pub async fn ask_mentor<A: AdviceService + ?Sized>(service: &A, request: &AdviceRequest) -> String {
    let topic = request.topic.as_str();

    match service.get_advice(request).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            tracing::warn!(topic, "Advice service returned no text");
            MENTOR_FALLBACK.to_string()
        }
        Err(e) => {
            tracing::warn!(topic, "Advice service failed: {}", e);
            MENTOR_FALLBACK.to_string()
        }
    }
}

/// Up to [`MAX_SUGGESTIONS`] hobby groups for `interests`; empty on any failure.
pub async fn hobby_suggestions<A: AdviceService + ?Sized>(
    service: &A,
    interests: &str,
) -> Vec<HobbySuggestion> {
    let raw = match service.get_suggestions(interests).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Suggestion service failed: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HobbySuggestion>>(&raw) {
        Ok(mut suggestions) => {
            suggestions.truncate(MAX_SUGGESTIONS);
            suggestions
        }
        Err(e) => {
            tracing::warn!("Discarding malformed suggestions: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedMentor {
        reply: Result<String, AppError>,
        suggestions: Option<Result<String, AppError>>,
        calls: AtomicUsize,
    }

    impl ScriptedMentor {
        fn new(reply: Result<String, AppError>) -> Self {
            Self {
                reply,
                suggestions: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn suggesting(raw: Result<String, AppError>) -> Self {
            Self {
                suggestions: Some(raw),
                ..Self::new(Ok(String::new()))
            }
        }
    }

    #[async_trait]
    impl AdviceService for ScriptedMentor {
        async fn get_advice(&self, _request: &AdviceRequest) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }

        async fn get_suggestions(&self, _interests: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.suggestions {
                Some(raw) => raw.clone(),
                None => Err(AppError::Collaborator("no script".to_string())),
            }
        }
    }

    /// Implements only the required method.
    struct AdviceOnly;

    #[async_trait]
    impl AdviceService for AdviceOnly {
        async fn get_advice(&self, _request: &AdviceRequest) -> Result<String, AppError> {
            Ok("Practice.".to_string())
        }
    }

    #[test]
    fn test_request_rendering() {
        let request = AdviceRequest::new("Photography", SkillLevel::Beginner, "How do I start?");
        assert_eq!(
            request.contents(),
            "I am a Beginner in Photography. How do I start?"
        );
        assert!(request.system_instruction().contains("expert mentor for Photography"));
        assert!(request.system_instruction().contains("under 150 words"));
    }

    #[tokio::test]
    async fn test_mentor_advice_passes_reply_through() {
        let mentor = ScriptedMentor::new(Ok("Shoot every day.".to_string()));
        let advice = mentor_advice(&mentor, "Photography", SkillLevel::Pro, "Tips?").await;
        assert_eq!(advice, "Shoot every day.");
    }

    #[tokio::test]
    async fn test_mentor_advice_falls_back_once() {
        let mentor = ScriptedMentor::new(Err(AppError::Collaborator("quota".to_string())));
        let advice = mentor_advice(&mentor, "Coding", SkillLevel::Beginner, "Help").await;

        assert_eq!(advice, MENTOR_FALLBACK);
        assert_eq!(mentor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mentor_advice_empty_reply_falls_back() {
        let mentor = ScriptedMentor::new(Ok("   ".to_string()));
        let advice = mentor_advice(&mentor, "Music", SkillLevel::Intermediate, "Scales?").await;
        assert_eq!(advice, MENTOR_FALLBACK);
    }

    #[tokio::test]
    async fn test_hobby_suggestions_capped_at_three() {
        let raw = serde_json::json!([
            {"name": "Robotics", "reason": "You like building", "skillToFocusOn": "Soldering"},
            {"name": "Coding", "reason": "Logic", "skillToFocusOn": "Rust"},
            {"name": "Photography", "reason": "Visuals", "skillToFocusOn": "Composition"},
            {"name": "Music", "reason": "Rhythm", "skillToFocusOn": "Scales"}
        ])
        .to_string();
        let mentor = ScriptedMentor::suggesting(Ok(raw));

        let suggestions = hobby_suggestions(&mentor, "tinkering, cameras").await;
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0].skill_to_focus_on, "Soldering");
        assert_eq!(mentor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hobby_suggestions_fall_back_to_empty() {
        let failing = ScriptedMentor::suggesting(Err(AppError::Collaborator("down".to_string())));
        assert!(hobby_suggestions(&failing, "cooking").await.is_empty());

        let malformed = ScriptedMentor::suggesting(Ok("not json".to_string()));
        assert!(hobby_suggestions(&malformed, "cooking").await.is_empty());

        assert!(hobby_suggestions(&AdviceOnly, "cooking").await.is_empty());
    }
}
