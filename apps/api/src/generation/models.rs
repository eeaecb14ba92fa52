//! Request and response bodies for the generation endpoints.
//!
//! Request text fields are `Option` on the wire so a missing field reaches the
//! gateway's validation (400) instead of failing JSON extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::templates::IndustryTemplate;

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /generate-minimal`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalRequest {
    pub resume: Option<String>,
    pub job_description: Option<String>,
}

/// Body of `POST /generate-professional`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalRequest {
    pub resume: Option<String>,
    pub job_description: Option<String>,
    /// Layout template name chosen in the client (e.g. "modern", "executive").
    pub template: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<String>,
}

/// Body of `POST /generate-team`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRequest {
    pub resume: Option<String>,
    pub job_description: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<String>,
    pub custom_prompt: Option<String>,
    pub template: Option<IndustryTemplate>,
    #[serde(default, rename = "useLinkedIn")]
    pub use_linkedin: bool,
}

/// What the candidate text is. Changes how the prompt labels it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    #[default]
    Resume,
    LinkedinProfile,
}

impl InputKind {
    pub fn from_linkedin_flag(use_linkedin: bool) -> Self {
        if use_linkedin {
            InputKind::LinkedinProfile
        } else {
            InputKind::Resume
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputKind::Resume => "Resume",
            InputKind::LinkedinProfile => "LinkedIn Profile",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result
// ────────────────────────────────────────────────────────────────────────────

/// The generated package. Which optional parts are present depends on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub resume: String,
    pub cover_letter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Model-estimated fit analysis. Every score is a percentage in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub match_score: f64,
    pub key_strengths: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub recommendations: Vec<String>,
    pub ats_score: f64,
    pub industry_fit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_areas: Option<Vec<String>>,
}

impl Analysis {
    /// All score fields that are present, by wire name.
    pub fn scores(&self) -> Vec<(&'static str, f64)> {
        let mut scores = vec![("matchScore", self.match_score), ("atsScore", self.ats_score)];
        if let Some(confidence) = self.confidence_score {
            scores.push(("confidenceScore", confidence));
        }
        scores
    }
}

/// Stamped locally on team generations. `version` is always [`METADATA_VERSION`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generated_at: DateTime<Utc>,
    pub template: String,
    pub industry: String,
    pub version: u32,
}

/// There is no version tracking; every generation is version 1.
pub const METADATA_VERSION: u32 = 1;
