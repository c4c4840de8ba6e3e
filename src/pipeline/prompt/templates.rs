use crate::models::PromptTemplate;

pub const CONTEXT_PLACEHOLDER: &str = "{{MEDICAL_CONTEXT}}";
pub const DICTATION_PLACEHOLDER: &str = "{{DICTATION_TEXT}}";
pub const WORD_LIMIT_PLACEHOLDER: &str = "{{WORD_LIMIT}}";

/// Word limit used when the template does not set one.
pub const DEFAULT_WORD_LIMIT: u32 = 500;

/// Sent alongside every provider request.
pub const VALIDATION_SYSTEM_PROMPT: &str = "You are a radiology order validation assistant. \
You review physician dictations for imaging orders against evidence-based appropriateness \
criteria and ICD-10/CPT coding rules. Respond with a single JSON object and nothing else.";

/// Appended verbatim when the physician has overridden a prior decision.
pub const OVERRIDE_INSTRUCTION: &str = "\n\nIMPORTANT: The physician has chosen to override \
a previous validation decision. The dictation contains the physician's justification for the \
override. Weigh that justification carefully: if it provides clinically sound reasoning, \
reflect it in your assessment and use validationStatus \"override\" when the order should \
proceed on the physician's judgement.";

/// Used when no active template exists in the database.
pub const BUILT_IN_TEMPLATE: &str = r#"You are validating a radiology order dictation.

MEDICAL REFERENCE CONTEXT:
{{MEDICAL_CONTEXT}}

PHYSICIAN DICTATION:
{{DICTATION_TEXT}}

Assess whether the requested imaging is clinically appropriate for the documented indication.
Keep the feedback under {{WORD_LIMIT}} words.

Respond with JSON only, in exactly this shape:
{
  "validationStatus": "appropriate" | "inappropriate" | "needs_clarification" | "override",
  "complianceScore": 0-9,
  "feedback": "feedback for the ordering physician",
  "suggestedICD10Codes": [{"code": "R51", "description": "Headache", "isPrimary": true}],
  "suggestedCPTCodes": [{"code": "70450", "description": "CT head without contrast"}],
  "internalReasoning": "reasoning for reviewers, not shown to the physician"
}"#;

/// The built-in template as a `PromptTemplate` (id 0, no word limit).
pub fn built_in_template() -> PromptTemplate {
    PromptTemplate {
        id: 0,
        name: "Built-in radiology validation".to_string(),
        content: BUILT_IN_TEMPLATE.to_string(),
        word_limit: None,
    }
}
