//! Industry Template Catalog — static reference data loaded once at startup.
//!
//! Either the built-in table or a JSON array read from `TEMPLATES_PATH`.
//! Nothing mutates the catalog after it lands in `AppState`.

pub mod handlers;

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A named bundle of keywords, tone guidance, and ATS hints used to steer generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tone_guidelines: String,
    /// Custom instructions used when the caller sends none.
    #[serde(rename = "customPrompt", alias = "defaultCustomPrompt", default)]
    pub default_custom_prompt: String,
    #[serde(default)]
    pub ats_optimizations: Vec<String>,
    #[serde(default)]
    pub sample_achievements: Vec<String>,
}

/// Ordered lookup table from template id to template.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<IndustryTemplate>,
}

impl TemplateCatalog {
    /// Builds a catalog, rejecting an empty list and duplicate ids.
    pub fn new(templates: Vec<IndustryTemplate>) -> Result<Self> {
        if templates.is_empty() {
            bail!("Template catalog must contain at least one template");
        }

        {
            let mut seen = HashSet::new();
            for template in &templates {
                if template.id.trim().is_empty() {
                    bail!("Template '{}' has an empty id", template.name);
                }
                if !seen.insert(template.id.as_str()) {
                    bail!("Duplicate template id '{}'", template.id);
                }
            }
        }

        Ok(Self { templates })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template catalog {}", path.display()))?;
        let templates: Vec<IndustryTemplate> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid template catalog JSON in {}", path.display()))?;
        Self::new(templates)
    }

    pub fn get(&self, id: &str) -> Option<&IndustryTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn list(&self) -> &[IndustryTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// The six industry templates the product ships with.
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    description: &str,
    keywords: &[&str],
    tone_guidelines: &str,
    default_custom_prompt: &str,
    ats_optimizations: &[&str],
    sample_achievements: &[&str],
) -> IndustryTemplate {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    IndustryTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        keywords: owned(keywords),
        tone_guidelines: tone_guidelines.to_string(),
        default_custom_prompt: default_custom_prompt.to_string(),
        ats_optimizations: owned(ats_optimizations),
        sample_achievements: owned(sample_achievements),
    }
}

fn builtin_templates() -> Vec<IndustryTemplate> {
    vec![
        template(
            "technology",
            "Technology & Software",
            "Optimized for software engineers, developers, and tech professionals",
            &["agile", "scrum", "API", "cloud", "DevOps", "full-stack", "microservices", "CI/CD"],
            "Technical, results-driven, innovation-focused",
            "Emphasize technical skills, project impact, and scalability achievements",
            &["Technical skills section", "Project-based experience", "Quantified performance metrics"],
            &["Reduced load time by 40%", "Implemented CI/CD pipeline", "Led team of 5 developers"],
        ),
        template(
            "finance",
            "Finance & Banking",
            "Tailored for financial analysts, bankers, and investment professionals",
            &["ROI", "P&L", "risk management", "compliance", "portfolio", "financial modeling", "due diligence"],
            "Professional, analytical, detail-oriented",
            "Highlight financial impact, regulatory knowledge, and analytical skills",
            &["Quantified financial results", "Regulatory compliance experience", "Risk assessment skills"],
            &["Managed $50M portfolio", "Reduced costs by 25%", "Ensured 100% regulatory compliance"],
        ),
        template(
            "healthcare",
            "Healthcare & Medical",
            "Designed for healthcare professionals, doctors, and medical staff",
            &["patient care", "clinical", "EMR", "HIPAA", "quality improvement", "evidence-based", "interdisciplinary"],
            "Compassionate, professional, patient-focused",
            "Emphasize patient outcomes, clinical expertise, and healthcare quality improvements",
            &["Clinical certifications", "Patient outcome metrics", "Healthcare technology proficiency"],
            &["Improved patient satisfaction by 30%", "Reduced readmission rates", "Led quality initiative"],
        ),
        template(
            "creative",
            "Creative & Design",
            "Perfect for designers, marketers, and creative professionals",
            &["brand identity", "user experience", "creative strategy", "visual design", "campaign", "engagement"],
            "Creative, innovative, brand-conscious",
            "Showcase creative impact, brand results, and innovative solutions",
            &["Portfolio highlights", "Brand impact metrics", "Creative tool proficiency"],
            &["Increased brand engagement by 60%", "Won design award", "Led rebranding initiative"],
        ),
        template(
            "education",
            "Education & Academia",
            "Optimized for educators, researchers, and academic professionals",
            &["curriculum", "pedagogy", "research", "publications", "grants", "student outcomes", "assessment"],
            "Scholarly, evidence-based, student-centered",
            "Highlight educational impact, research contributions, and student success",
            &["Teaching philosophy", "Research publications", "Student achievement data"],
            &["Published 15 research papers", "Improved test scores by 25%", "Secured $500K grant"],
        ),
        template(
            "legal",
            "Legal & Law",
            "Tailored for lawyers, paralegals, and legal professionals",
            &["litigation", "compliance", "contract negotiation", "legal research", "case management", "regulatory"],
            "Precise, authoritative, detail-oriented",
            "Emphasize legal expertise, case outcomes, and regulatory knowledge",
            &["Legal specializations", "Case win rates", "Regulatory compliance"],
            &["Won 85% of cases", "Negotiated $10M settlement", "Ensured regulatory compliance"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_has_six_unique_templates() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        // Re-validate through the checked constructor.
        assert!(TemplateCatalog::new(catalog.list().to_vec()).is_ok());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = TemplateCatalog::builtin();
        let tech = catalog.get("technology").unwrap();
        assert_eq!(tech.name, "Technology & Software");
        assert!(tech.keywords.contains(&"CI/CD".to_string()));
        assert!(catalog.get("astrology").is_none());
    }

    #[test]
    fn test_list_preserves_order() {
        let ids: Vec<_> = TemplateCatalog::builtin()
            .list()
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(
            ids,
            vec!["technology", "finance", "healthcare", "creative", "education", "legal"]
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut templates = TemplateCatalog::builtin().list().to_vec();
        templates.push(templates[0].clone());
        let err = TemplateCatalog::new(templates).unwrap_err();
        assert!(err.to_string().contains("Duplicate template id 'technology'"));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(TemplateCatalog::new(vec![]).is_err());
    }

    #[test]
    fn test_deserializes_client_payload_with_custom_prompt_key() {
        // Shape the browser client sends, including fields we do not model.
        let json = serde_json::json!({
            "id": "finance",
            "name": "Finance & Banking",
            "description": "d",
            "icon": { "type": "svg", "props": {} },
            "keywords": ["ROI"],
            "toneGuidelines": "Professional",
            "customPrompt": "Highlight financial impact",
            "atsOptimizations": ["Quantified financial results"],
            "sampleAchievements": []
        });
        let template: IndustryTemplate = serde_json::from_value(json).unwrap();
        assert_eq!(template.default_custom_prompt, "Highlight financial impact");
        assert_eq!(template.tone_guidelines, "Professional");
    }

    #[test]
    fn test_accepts_default_custom_prompt_alias() {
        let json = serde_json::json!({
            "id": "x",
            "name": "X",
            "defaultCustomPrompt": "Be brief"
        });
        let template: IndustryTemplate = serde_json::from_value(json).unwrap();
        assert_eq!(template.default_custom_prompt, "Be brief");
        assert!(template.keywords.is_empty());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "ops", "name": "Operations", "keywords": ["lean", "six sigma"],
                "toneGuidelines": "Pragmatic", "customPrompt": "Show process wins",
                "atsOptimizations": ["Certifications"]}}]"#
        )
        .unwrap();

        let catalog = TemplateCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("ops").unwrap().keywords, vec!["lean", "six sigma"]);
    }

    #[test]
    fn test_from_json_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = TemplateCatalog::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid template catalog JSON"));
    }
}
