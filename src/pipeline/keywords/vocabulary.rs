//! Fixed term lists used by the keyword extractor and categorizer.

use std::sync::LazyLock;

use regex::Regex;

/// Body regions and organs.
pub const ANATOMY_TERMS: &[&str] = &[
    "head", "brain", "skull", "face", "sinus", "sinuses", "orbit", "orbits",
    "neck", "throat", "thyroid",
    "chest", "lung", "lungs", "heart", "cardiac", "breast", "rib", "ribs",
    "abdomen", "abdominal", "pelvis", "pelvic", "liver", "gallbladder",
    "pancreas", "spleen", "kidney", "kidneys", "renal", "bladder", "prostate",
    "uterus", "ovary", "ovaries", "bowel", "colon", "appendix",
    "spine", "spinal", "cervical", "thoracic", "lumbar", "sacral", "sacrum",
    "shoulder", "elbow", "wrist", "hand", "finger", "hip", "knee", "ankle",
    "foot", "toe", "femur", "tibia", "humerus", "joint", "extremity",
    "aorta", "carotid", "vascular", "artery", "vein",
];

/// Imaging modalities and common spellings.
pub const MODALITY_TERMS: &[&str] = &[
    "ct", "cta", "mri", "mra", "x-ray", "xray", "radiograph", "ultrasound",
    "sonogram", "doppler", "pet", "pet/ct", "spect", "mammogram", "mammography",
    "fluoroscopy", "dexa", "nuclear", "angiography", "angiogram", "echocardiogram",
    "contrast", "tomography", "scan",
];

/// Presenting complaints, findings and clinical qualifiers.
pub const SYMPTOM_TERMS: &[&str] = &[
    "pain", "ache", "headache", "migraine", "fever", "nausea", "vomiting",
    "dizziness", "vertigo", "syncope", "seizure", "numbness", "tingling",
    "weakness", "fatigue", "cough", "hemoptysis", "dyspnea",
    "shortness of breath", "wheezing", "palpitations", "swelling", "edema",
    "mass", "lump", "nodule", "lesion", "tenderness", "bleeding", "hematuria",
    "trauma", "fracture", "injury", "fall", "sprain", "tear", "instability",
    "stiffness", "radiculopathy", "sciatica", "weight loss", "jaundice",
    "diarrhea", "constipation", "obstruction", "infection", "inflammation",
    "cancer", "tumor", "malignancy", "metastasis", "stroke", "aneurysm",
    "thrombosis", "embolism", "red flag", "red flags", "neurological deficit",
    "chronic", "acute", "worsening", "persistent", "recurrent",
];

/// Diagnosis-code shape: letter, two digits, optional `.` and 1-2 digits.
pub static DIAGNOSIS_CODE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z][0-9]{2}(?:\.[0-9]{1,2})?$").unwrap());

/// Procedure-code shape: exactly five digits.
pub static PROCEDURE_CODE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

/// True when the token looks like a diagnosis or procedure code.
pub fn is_code_shaped(token: &str) -> bool {
    let token = token.trim();
    DIAGNOSIS_CODE_SHAPE.is_match(token) || PROCEDURE_CODE_SHAPE.is_match(token)
}

pub fn is_anatomy_term(term: &str) -> bool {
    ANATOMY_TERMS.contains(&term)
}

pub fn is_modality_term(term: &str) -> bool {
    MODALITY_TERMS.contains(&term)
}
