use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::InvalidEnumValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietaryPreference {
    Omnivore,
    Vegetarian,
    Vegan,
}

impl DietaryPreference {
    pub const ALL: [DietaryPreference; 3] = [
        DietaryPreference::Omnivore,
        DietaryPreference::Vegetarian,
        DietaryPreference::Vegan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryPreference::Omnivore => "omnivore",
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::Vegan => "vegan",
        }
    }

    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|p| p.as_str().to_string()).collect()
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryPreference {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "omnivore" => Ok(DietaryPreference::Omnivore),
            "vegetarian" => Ok(DietaryPreference::Vegetarian),
            "vegan" => Ok(DietaryPreference::Vegan),
            _ => Err(InvalidEnumValue(s.to_string())),
        }
    }
}
