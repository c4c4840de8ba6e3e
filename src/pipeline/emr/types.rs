use serde::{Deserialize, Serialize};

use crate::models::Relationship;

/// Patient contact fields found in pasted text. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPatientInfo {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ParsedPatientInfo {
    pub fn field_count(&self) -> usize {
        [
            &self.address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.phone,
            &self.email,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

/// Insurance fields found in pasted text. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInsuranceInfo {
    pub insurer_name: Option<String>,
    pub policy_number: Option<String>,
    pub group_number: Option<String>,
    pub authorization_number: Option<String>,
    pub policy_holder_name: Option<String>,
    pub policy_holder_relationship: Option<Relationship>,
}

impl ParsedInsuranceInfo {
    pub fn field_count(&self) -> usize {
        [
            &self.insurer_name,
            &self.policy_number,
            &self.group_number,
            &self.authorization_number,
            &self.policy_holder_name,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
            + usize::from(self.policy_holder_relationship.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmrExtraction {
    pub patient_info: ParsedPatientInfo,
    pub insurance_info: ParsedInsuranceInfo,
}
