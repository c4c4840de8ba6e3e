//! Seed data shared by database-backed tests.

use rusqlite::Connection;

use super::open_memory_database;

const SEED_SQL: &str = r#"
INSERT INTO medical_icd10_codes (icd10_code, description, clinical_notes, imaging_modalities, primary_imaging) VALUES
    ('R51', 'Headache', 'Screen for red flags: thunderclap onset, focal deficit, papilledema', 'CT, MRI', 'CT head without contrast'),
    ('M54.5', 'Low back pain', NULL, 'MRI, X-ray', 'MRI lumbar spine without contrast'),
    ('R07.9', 'Chest pain, unspecified', 'Exclude acute coronary syndrome first', 'X-ray, CT', 'Chest X-ray'),
    ('G43.909', 'Migraine, unspecified, not intractable', NULL, NULL, NULL),
    ('S83.209A', 'Tear of meniscus of knee, initial encounter', NULL, 'MRI', 'MRI knee without contrast');

INSERT INTO medical_cpt_codes (cpt_code, description, modality, body_part) VALUES
    ('70450', 'CT head/brain without contrast material', 'CT', 'Head'),
    ('70551', 'MRI brain without contrast material', 'MRI', 'Brain'),
    ('72148', 'MRI lumbar spine without contrast material', 'MRI', 'Lumbar spine'),
    ('71046', 'Radiologic examination, chest; 2 views', 'X-ray', 'Chest'),
    ('73721', 'MRI lower extremity joint without contrast material', 'MRI', NULL);

INSERT INTO medical_cpt_icd10_mappings (icd10_code, cpt_code, appropriateness, evidence_source, refined_justification) VALUES
    ('R51', '70450', 7, 'ACR Appropriateness Criteria', 'CT is appropriate for sudden severe headache'),
    ('R51', '70551', 8, 'ACR Appropriateness Criteria', NULL),
    ('M54.5', '72148', 6, NULL, 'MRI indicated after 6 weeks of failed conservative therapy'),
    ('R07.9', '71046', 9, 'ACR', 'Initial imaging for chest pain');

INSERT INTO medical_icd10_markdown_docs (icd10_code, content) VALUES
    ('R51', '# Headache imaging
Neuroimaging is not routinely indicated for primary headache without red flags.'),
    ('M54.5', '# Low back pain
Imaging is usually not indicated in the first 6 weeks without red flags.');

INSERT INTO prompt_templates (name, template_type, content_template, word_limit, active) VALUES
    ('Radiology validation v1', 'default', 'OLD {{DICTATION_TEXT}}', 300, 0),
    ('Radiology validation v2', 'default', 'CONTEXT:
{{MEDICAL_CONTEXT}}

DICTATION:
{{DICTATION_TEXT}}

Keep feedback under {{WORD_LIMIT}} words.', 400, 1);
"#;

/// In-memory reference database with a small realistic code set.
pub(crate) fn seeded_connection() -> Connection {
    let conn = open_memory_database().expect("in-memory database");
    conn.execute_batch(SEED_SQL).expect("seed data");
    conn
}
