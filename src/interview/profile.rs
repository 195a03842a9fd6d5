use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic category used to pick a control layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TinnitusType {
    BilateralSymmetric,
    BilateralAsymmetric,
    Unilateral,
}

impl TinnitusType {
    /// Map the numbered menu choice (1-3) to a type
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(TinnitusType::BilateralSymmetric),
            2 => Some(TinnitusType::BilateralAsymmetric),
            3 => Some(TinnitusType::Unilateral),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TinnitusType::BilateralSymmetric => "bilateral symmetric",
            TinnitusType::BilateralAsymmetric => "bilateral asymmetric",
            TinnitusType::Unilateral => "unilateral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    /// Accepts exactly "left" or "right", ignoring case
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "left" => Some(Ear::Left),
            "right" => Some(Ear::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ear::Left => "left",
            Ear::Right => "right",
        }
    }
}

impl fmt::Display for Ear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers accumulated during one interview session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub is_new_user: Option<bool>,
    pub name: String,
    /// Free text, never validated
    pub date_of_birth: String,
    pub phone_number: String,
    pub tinnitus_type: Option<TinnitusType>,
    /// Only set for unilateral tinnitus once classification completes
    pub affected_ear: Option<Ear>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classification result, once it is complete
    pub fn classification(&self) -> Option<TinnitusProfile> {
        let tinnitus_type = self.tinnitus_type?;
        match (tinnitus_type, self.affected_ear) {
            (TinnitusType::Unilateral, None) => None,
            (TinnitusType::Unilateral, ear) => Some(TinnitusProfile {
                tinnitus_type,
                affected_ear: ear,
            }),
            (_, _) => Some(TinnitusProfile {
                tinnitus_type,
                affected_ear: None,
            }),
        }
    }
}

/// Classification emitted when the interview completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TinnitusProfile {
    pub tinnitus_type: TinnitusType,
    pub affected_ear: Option<Ear>,
}
