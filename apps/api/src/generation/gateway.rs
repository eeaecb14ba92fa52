//! Generation Gateway — validates a request, builds the prompt, makes exactly one
//! provider call, checks the structured output, and returns it.
//!
//! Flow: validate → build_prompt → generate_structured → check shape → (team) stamp metadata.
//!
//! A request either fully succeeds or fully fails. Nothing is retried or partially returned.

use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::generation::builder::{build_prompt, PromptInput, PromptVariant, ValidationError};
use crate::generation::models::{
    GenerationResult, InputKind, Metadata, MinimalRequest, ProfessionalRequest, TeamRequest,
    METADATA_VERSION,
};
use crate::llm_client::schema::OutputShape;
use crate::llm_client::{LlmError, StructuredGenerator};
use crate::templates::TemplateCatalog;

const REQUIRED_TEXTS_MESSAGE: &str = "Resume and job description are required";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("Provider output violates the response contract: {0}")]
    SchemaViolation(String),
}

impl From<ValidationError> for GenerationError {
    fn from(err: ValidationError) -> Self {
        GenerationError::InvalidRequest(err.0)
    }
}

/// One generation request, tagged with the response shape the caller asked for.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    Minimal(MinimalRequest),
    Professional(ProfessionalRequest),
    Team(TeamRequest),
}

impl GenerationRequest {
    pub fn variant(&self) -> PromptVariant {
        match self {
            GenerationRequest::Minimal(_) => PromptVariant::Minimal,
            GenerationRequest::Professional(_) => PromptVariant::Professional,
            GenerationRequest::Team(_) => PromptVariant::Team,
        }
    }
}

/// Runs one generation end to end.
///
/// Validation failures return before the provider is touched.
pub async fn generate(
    generator: &dyn StructuredGenerator,
    catalog: &TemplateCatalog,
    request: GenerationRequest,
) -> Result<GenerationResult, GenerationError> {
    let variant = request.variant();
    let request_id = Uuid::new_v4();

    let (input, team_stamp) = prepare(&request, catalog)?;
    let prompt = build_prompt(variant, &input)?;

    info!(
        "Generating {} package (request {request_id}, prompt {} chars)",
        variant.as_str(),
        prompt.instruction.len()
    );
    let started = Instant::now();

    let raw = generator
        .generate_structured(&prompt.instruction, &prompt.output_shape)
        .await?;

    let mut result = match check_output(&prompt.output_shape, raw) {
        Ok(result) => result,
        Err(e) => {
            warn!("Request {request_id}: provider output rejected: {e}");
            return Err(e);
        }
    };

    if let Some(analysis) = &result.analysis {
        debug!("Request {request_id} scores: {:?}", analysis.scores());
    }

    if let Some((template, industry)) = team_stamp {
        result.metadata = Some(Metadata {
            generated_at: Utc::now(),
            template,
            industry,
            version: METADATA_VERSION,
        });
    }

    info!(
        "Generated {} package (request {request_id}) in {}ms",
        variant.as_str(),
        started.elapsed().as_millis()
    );

    Ok(result)
}

/// Validates the variant-specific fields and maps the request onto builder input.
/// For team requests also returns the (template name, industry) pair to stamp.
fn prepare<'a>(
    request: &'a GenerationRequest,
    catalog: &'a TemplateCatalog,
) -> Result<(PromptInput<'a>, Option<(String, String)>), GenerationError> {
    match request {
        GenerationRequest::Minimal(r) => {
            let (candidate_text, job_description) =
                required_texts(r.resume.as_deref(), r.job_description.as_deref())?;
            Ok((
                PromptInput {
                    candidate_text,
                    job_description,
                    ..PromptInput::default()
                },
                None,
            ))
        }
        GenerationRequest::Professional(r) => {
            let (candidate_text, job_description) =
                required_texts(r.resume.as_deref(), r.job_description.as_deref())?;
            let industry = non_blank(r.industry.as_deref());
            Ok((
                PromptInput {
                    candidate_text,
                    job_description,
                    template: industry.and_then(|id| catalog.get(id)),
                    layout_template: non_blank(r.template.as_deref()),
                    industry,
                    experience_level: non_blank(r.experience_level.as_deref()),
                    ..PromptInput::default()
                },
                None,
            ))
        }
        GenerationRequest::Team(r) => {
            let (candidate_text, job_description) =
                required_texts(r.resume.as_deref(), r.job_description.as_deref())?;
            let industry = non_blank(r.industry.as_deref())
                .ok_or_else(|| GenerationError::InvalidRequest("Industry is required".to_string()))?;
            let template = r.template.as_ref().ok_or_else(|| {
                GenerationError::InvalidRequest("Industry template is required".to_string())
            })?;
            let custom_instructions = non_blank(r.custom_prompt.as_deref())
                .or_else(|| non_blank(Some(template.default_custom_prompt.as_str())));

            Ok((
                PromptInput {
                    candidate_text,
                    job_description,
                    input_kind: InputKind::from_linkedin_flag(r.use_linkedin),
                    template: Some(template),
                    layout_template: None,
                    industry: Some(industry),
                    experience_level: non_blank(r.experience_level.as_deref()),
                    custom_instructions,
                },
                Some((template.name.clone(), industry.to_string())),
            ))
        }
    }
}

fn required_texts<'a>(
    resume: Option<&'a str>,
    job_description: Option<&'a str>,
) -> Result<(&'a str, &'a str), GenerationError> {
    match (non_blank(resume), non_blank(job_description)) {
        (Some(r), Some(j)) => Ok((r, j)),
        _ => Err(GenerationError::InvalidRequest(
            REQUIRED_TEXTS_MESSAGE.to_string(),
        )),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checks raw provider output against the shape and converts it to a typed result.
///
/// `metadata` is dropped first because the service stamps it itself. Keys the
/// shape does not name are pruned at every depth before validation.
fn check_output(shape: &OutputShape, mut raw: Value) -> Result<GenerationResult, GenerationError> {
    if let Some(fields) = raw.as_object_mut() {
        fields.remove("metadata");
    }
    shape.retain_known(&mut raw);

    shape
        .check(&raw)
        .map_err(|violations| GenerationError::SchemaViolation(violations.join("; ")))?;

    let result: GenerationResult = serde_json::from_value(raw)
        .map_err(|e| GenerationError::SchemaViolation(e.to_string()))?;

    if result.resume.trim().is_empty() {
        return Err(GenerationError::SchemaViolation(
            "resume is empty".to_string(),
        ));
    }
    if result.cover_letter.trim().is_empty() {
        return Err(GenerationError::SchemaViolation(
            "coverLetter is empty".to_string(),
        ));
    }

    Ok(result)
}
