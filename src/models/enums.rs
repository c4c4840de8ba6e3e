use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {value}")]
pub struct InvalidEnumValue {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$attr:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $(#[$attr])*
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnumValue {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Clinical-appropriateness verdict.
    ValidationStatus {
        Appropriate => "appropriate",
        Inappropriate => "inappropriate",
        NeedsClarification => "needs_clarification",
        Override => "override",
    }
);

impl ValidationStatus {
    /// Case-insensitive match that also accepts space/hyphen separators
    /// ("Needs Clarification", "needs-clarification"). Anything else is None.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        key.parse().ok()
    }
}

str_enum!(
    /// Policy holder's relationship to the patient.
    Relationship {
        SelfInsured => "Self",
        Spouse => "Spouse",
        Child => "Child",
        Parent => "Parent",
        Other => "Other",
    }
);

impl Relationship {
    /// Map free-text relationship words onto the fixed set; unknown -> Other.
    pub fn from_free_text(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "self" | "patient" | "same" | "insured" | "subscriber" => Self::SelfInsured,
            "spouse" | "husband" | "wife" | "partner" | "domestic partner" => Self::Spouse,
            "child" | "son" | "daughter" | "dependent" | "stepchild" => Self::Child,
            "parent" | "mother" | "father" | "mom" | "dad" | "guardian" => Self::Parent,
            _ => Self::Other,
        }
    }
}
