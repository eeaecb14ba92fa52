//! Prompt-Template Builder — turns typed generation inputs into an output-shape
//! contract plus the instruction text sent to the model.
//!
//! Pure and deterministic: same input, same prompt. No I/O, no randomness.

use thiserror::Error;

use crate::generation::models::InputKind;
use crate::generation::prompts::{
    MINIMAL_PROMPT_TEMPLATE, PROFESSIONAL_INDUSTRY_GUIDELINES, PROFESSIONAL_PROMPT_TEMPLATE,
    TEAM_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{ACCURACY_INSTRUCTION, NOT_SPECIFIED};
use crate::llm_client::schema::{FieldSpec, OutputShape};
use crate::templates::IndustryTemplate;

/// How many template keywords the team prompt calls out for strategic placement.
const TOP_KEYWORD_COUNT: usize = 8;

/// Which result shape to request. Always chosen by the caller, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// resume + cover letter
    Minimal,
    /// + analysis
    Professional,
    /// + extended analysis + metadata
    Team,
}

impl PromptVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptVariant::Minimal => "minimal",
            PromptVariant::Professional => "professional",
            PromptVariant::Team => "team",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Everything the builder needs. Optional inputs render as "Not specified".
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptInput<'a> {
    pub candidate_text: &'a str,
    pub job_description: &'a str,
    pub input_kind: InputKind,
    pub template: Option<&'a IndustryTemplate>,
    /// Layout template name (professional variant only).
    pub layout_template: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub experience_level: Option<&'a str>,
    pub custom_instructions: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct BuiltPrompt {
    pub output_shape: OutputShape,
    pub instruction: String,
}

/// Builds the output shape and instruction text for `variant`.
///
/// Fails if the candidate text or the job description is empty or whitespace-only.
pub fn build_prompt(
    variant: PromptVariant,
    input: &PromptInput<'_>,
) -> Result<BuiltPrompt, ValidationError> {
    if input.candidate_text.trim().is_empty() {
        return Err(ValidationError(format!(
            "{} text is required",
            input.input_kind.label()
        )));
    }
    if input.job_description.trim().is_empty() {
        return Err(ValidationError(
            "Job description text is required".to_string(),
        ));
    }

    let output_shape = output_shape(variant);
    let shape_listing = output_shape.describe();

    let instruction = match variant {
        PromptVariant::Minimal => render(
            MINIMAL_PROMPT_TEMPLATE,
            &[
                ("accuracy_instruction", ACCURACY_INSTRUCTION),
                ("resume", input.candidate_text),
                ("job_description", input.job_description),
                ("output_shape", shape_listing.as_str()),
            ],
        ),
        PromptVariant::Professional => {
            let guidelines = input
                .template
                .map(|t| {
                    let keywords = join_or_placeholder(&t.keywords);
                    let ats = join_or_placeholder(&t.ats_optimizations);
                    render(
                        PROFESSIONAL_INDUSTRY_GUIDELINES,
                        &[
                            ("keywords", keywords.as_str()),
                            ("tone", or_placeholder(Some(t.tone_guidelines.as_str()))),
                            ("ats_optimizations", ats.as_str()),
                        ],
                    )
                })
                .unwrap_or_default();

            render(
                PROFESSIONAL_PROMPT_TEMPLATE,
                &[
                    ("accuracy_instruction", ACCURACY_INSTRUCTION),
                    ("layout_template", or_placeholder(input.layout_template)),
                    ("industry", or_placeholder(input.industry)),
                    ("experience_level", or_placeholder(input.experience_level)),
                    ("industry_guidelines", guidelines.as_str()),
                    ("resume", input.candidate_text),
                    ("job_description", input.job_description),
                    ("output_shape", shape_listing.as_str()),
                ],
            )
        }
        PromptVariant::Team => {
            let industry = or_placeholder(input.industry);
            let industry_upper = industry.to_uppercase();
            let input_label_upper = input.input_kind.label().to_uppercase();
            let (keywords, top_keywords, tone, ats) = match input.template {
                Some(t) => (
                    join_or_placeholder(&t.keywords),
                    join_or_placeholder(
                        &t.keywords[..t.keywords.len().min(TOP_KEYWORD_COUNT)],
                    ),
                    or_placeholder(Some(t.tone_guidelines.as_str())).to_string(),
                    join_or_placeholder(&t.ats_optimizations),
                ),
                None => (
                    NOT_SPECIFIED.to_string(),
                    NOT_SPECIFIED.to_string(),
                    NOT_SPECIFIED.to_string(),
                    NOT_SPECIFIED.to_string(),
                ),
            };

            render(
                TEAM_PROMPT_TEMPLATE,
                &[
                    ("accuracy_instruction", ACCURACY_INSTRUCTION),
                    ("industry", industry),
                    ("industry_upper", industry_upper.as_str()),
                    ("experience_level", or_placeholder(input.experience_level)),
                    ("input_label", input.input_kind.label()),
                    ("input_label_upper", input_label_upper.as_str()),
                    ("custom_instructions", or_placeholder(input.custom_instructions)),
                    ("keywords", keywords.as_str()),
                    ("top_keywords", top_keywords.as_str()),
                    ("tone", tone.as_str()),
                    ("ats_optimizations", ats.as_str()),
                    ("resume", input.candidate_text),
                    ("job_description", input.job_description),
                    ("output_shape", shape_listing.as_str()),
                ],
            )
        }
    };

    Ok(BuiltPrompt {
        output_shape,
        instruction,
    })
}

/// The field-level contract the model must satisfy for `variant`.
pub fn output_shape(variant: PromptVariant) -> OutputShape {
    match variant {
        PromptVariant::Minimal => OutputShape::new(
            "tailored_documents",
            vec![
                FieldSpec::text("resume", "The customized resume content"),
                FieldSpec::text("coverLetter", "The personalized cover letter content"),
            ],
        ),
        PromptVariant::Professional => OutputShape::new(
            "professional_package",
            vec![
                FieldSpec::text(
                    "resume",
                    "The professionally customized resume content with optimal formatting",
                ),
                FieldSpec::text("coverLetter", "The personalized cover letter content"),
                FieldSpec::object(
                    "analysis",
                    "Scored analysis of resume-job fit",
                    analysis_fields(),
                ),
            ],
        ),
        PromptVariant::Team => {
            let mut analysis = analysis_fields();
            analysis.push(FieldSpec::score(
                "confidenceScore",
                "Overall confidence in the match, 0-100",
            ));
            analysis.push(FieldSpec::text_list(
                "improvementAreas",
                "Areas that need improvement",
            ));

            OutputShape::new(
                "team_package",
                vec![
                    FieldSpec::text("resume", "The professionally customized resume content"),
                    FieldSpec::text("coverLetter", "The personalized cover letter content"),
                    FieldSpec::object("analysis", "Extended team analysis", analysis),
                    // Stamped by the service after generation.
                    FieldSpec::object(
                        "metadata",
                        "Generation metadata; the service fills this in and the model may omit it",
                        vec![
                            FieldSpec::text("generatedAt", "Generation timestamp (ISO-8601)"),
                            FieldSpec::text("template", "Template used"),
                            FieldSpec::text("industry", "Target industry"),
                            FieldSpec::integer("version", "Version number"),
                        ],
                    )
                    .optional(),
                ],
            )
        }
    }
}

fn analysis_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::score(
            "matchScore",
            "Percentage match between resume and job requirements, 0-100",
        ),
        FieldSpec::text_list("keyStrengths", "Top 3-5 strengths that align with the job"),
        FieldSpec::text_list("skillGaps", "Areas for improvement or missing skills"),
        FieldSpec::text_list("recommendations", "Specific actionable recommendations"),
        FieldSpec::score(
            "atsScore",
            "ATS (Applicant Tracking System) compatibility score, 0-100",
        ),
        FieldSpec::text("industryFit", "How well the resume fits the target industry"),
    ]
}

fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

fn join_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so braces inside user text are left
/// verbatim. Unknown placeholders are emitted unchanged.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let key_len = after.find(|c: char| c == '}' || c == '{' || c.is_whitespace());

        match key_len {
            Some(len) if after[len..].starts_with('}') => {
                let key = &after[..len];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[len + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
