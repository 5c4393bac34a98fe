//! AI resume optimization — packages the editor text and target role into a
//! rewrite prompt and parses the strictly-typed response.
//!
//! The backend sits behind the `OptimizeBackend` trait so the session flow
//! and handlers can be exercised against a stub. Any malformed or
//! missing-field response is a terminal failure for that request — callers
//! keep their prior state and nothing retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::optimize::prompts::{OPTIMIZE_PROMPT_TEMPLATE, OPTIMIZE_SYSTEM};

pub mod handlers;
pub mod prompts;

/// Seniority label for the target role. Drives phrasing in the rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Entry,
    Mid,
    #[default]
    Senior,
    Lead,
    Executive,
}

impl Seniority {
    pub fn label(&self) -> &'static str {
        match self {
            Seniority::Entry => "entry-level",
            Seniority::Mid => "mid-level",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
            Seniority::Executive => "executive",
        }
    }
}

/// Input to a single optimization request.
#[derive(Debug, Clone)]
pub struct OptimizeInput {
    pub resume_text: String,
    pub target_title: String,
    pub seniority: Seniority,
    pub job_description: Option<String>,
    pub notes: Option<String>,
}

/// Strictly-typed optimization result. A response missing any field fails
/// deserialization and surfaces as one AI error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedResume {
    /// Rewritten resume body in the editor's markdown dialect.
    pub optimized_text: String,
    /// Change summaries, ordered by impact.
    pub key_changes: Vec<String>,
    /// Skills worth adding if the candidate has them.
    pub suggested_skills: Vec<String>,
    /// Heuristic ATS compatibility score, 0–100, computed by the model.
    pub ats_score: u8,
}

/// Pluggable optimization backend. Production uses `LlmOptimizer`.
#[async_trait]
pub trait OptimizeBackend: Send + Sync {
    async fn optimize(&self, input: &OptimizeInput) -> Result<OptimizedResume, AppError>;
}

/// Production backend: one prompt, one LLM call, strict parse.
pub struct LlmOptimizer {
    llm: LlmClient,
}

impl LlmOptimizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl OptimizeBackend for LlmOptimizer {
    async fn optimize(&self, input: &OptimizeInput) -> Result<OptimizedResume, AppError> {
        let prompt = build_optimize_prompt(input);
        let response: OptimizedResume = self
            .llm
            .complete_json(&prompt, OPTIMIZE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume optimization failed: {e}")))?;
        validate_response(&response)?;
        Ok(response)
    }
}

pub(crate) fn build_optimize_prompt(input: &OptimizeInput) -> String {
    let jd_section = input
        .job_description
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|jd| format!("TARGET JOB DESCRIPTION:\n{jd}\n\n"))
        .unwrap_or_default();
    let notes_section = input
        .notes
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|notes| format!("ADDITIONAL CONTEXT FROM THE CANDIDATE:\n{notes}\n\n"))
        .unwrap_or_default();

    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{target_title}", &input.target_title)
        .replace("{seniority}", input.seniority.label())
        .replace("{job_description_section}", &jd_section)
        .replace("{notes_section}", &notes_section)
        .replace("{resume_text}", &input.resume_text)
}

/// Response-shape check beyond what the type system enforces.
fn validate_response(response: &OptimizedResume) -> Result<(), AppError> {
    if response.optimized_text.trim().is_empty() {
        return Err(AppError::Llm(
            "optimization response has an empty resume body".to_string(),
        ));
    }
    if response.ats_score > 100 {
        return Err(AppError::Llm(format!(
            "ATS score {} is outside 0-100",
            response.ats_score
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_input() -> OptimizeInput {
        OptimizeInput {
            resume_text: "# Jane Doe\n- Built systems".to_string(),
            target_title: "Platform Engineer".to_string(),
            seniority: Seniority::Senior,
            job_description: Some("Own the deployment platform".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_seniority_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Seniority::Lead).unwrap(), "\"lead\"");
        let parsed: Seniority = serde_json::from_str("\"executive\"").unwrap();
        assert_eq!(parsed, Seniority::Executive);
    }

    #[test]
    fn test_seniority_default_is_senior() {
        assert_eq!(Seniority::default(), Seniority::Senior);
    }

    #[test]
    fn test_prompt_contains_role_and_resume() {
        let prompt = build_optimize_prompt(&make_input());
        assert!(prompt.contains("Platform Engineer"));
        assert!(prompt.contains("senior"));
        assert!(prompt.contains("# Jane Doe"));
        assert!(prompt.contains("Own the deployment platform"));
    }

    #[test]
    fn test_prompt_omits_empty_optional_sections() {
        let mut input = make_input();
        input.job_description = None;
        input.notes = Some("   ".to_string());
        let prompt = build_optimize_prompt(&input);
        assert!(!prompt.contains("TARGET JOB DESCRIPTION"));
        assert!(!prompt.contains("ADDITIONAL CONTEXT"));
    }

    #[test]
    fn test_response_deserializes_from_full_json() {
        let json = r##"{
            "optimized_text": "# Jane Doe\n## Experience\n- Led **platform** work",
            "key_changes": ["Led with platform experience"],
            "suggested_skills": ["Kubernetes", "Terraform"],
            "ats_score": 84
        }"##;
        let parsed: OptimizedResume = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.ats_score, 84);
        assert_eq!(parsed.key_changes.len(), 1);
        assert_eq!(parsed.suggested_skills.len(), 2);
        assert!(validate_response(&parsed).is_ok());
    }

    #[test]
    fn test_response_missing_field_fails_deserialization() {
        let json = r#"{"optimized_text": "x", "key_changes": [], "ats_score": 50}"#;
        assert!(serde_json::from_str::<OptimizedResume>(json).is_err());
    }

    #[test]
    fn test_ats_score_above_100_is_rejected() {
        let response = OptimizedResume {
            optimized_text: "# X".to_string(),
            key_changes: vec![],
            suggested_skills: vec![],
            ats_score: 150,
        };
        assert!(matches!(
            validate_response(&response),
            Err(AppError::Llm(_))
        ));
    }

    #[test]
    fn test_empty_rewritten_body_is_rejected() {
        let response = OptimizedResume {
            optimized_text: "  \n ".to_string(),
            key_changes: vec![],
            suggested_skills: vec![],
            ats_score: 50,
        };
        assert!(matches!(
            validate_response(&response),
            Err(AppError::Llm(_))
        ));
    }
}
