// Shared prompt constants and prompt-building utilities.
// Variant-specific templates live in generation/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System instruction sent with every structured-generation call.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only, matching the response schema exactly. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Placeholder substituted for any optional prompt input the caller left out.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Common instruction appended to all generation prompts.
pub const ACCURACY_INSTRUCTION: &str = "\
    CRITICAL: Keep all factual information from the candidate's material accurate. \
    Do NOT invent employers, titles, dates, degrees, certifications, or metrics \
    that are not present in the source text. Rephrase and reorder; never fabricate.";
