use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::InvalidEnumValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationRole {
    Delegate,
    Chair,
}

impl ApplicationRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationRole::Delegate => "delegate",
            ApplicationRole::Chair => "chair",
        }
    }
}

impl fmt::Display for ApplicationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationRole {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delegate" => Ok(ApplicationRole::Delegate),
            "chair" => Ok(ApplicationRole::Chair),
            _ => Err(InvalidEnumValue(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShirtSize {
    S,
    M,
    L,
    XL,
    XXL,
}

impl ShirtSize {
    pub const ALL: [ShirtSize; 5] = [
        ShirtSize::S,
        ShirtSize::M,
        ShirtSize::L,
        ShirtSize::XL,
        ShirtSize::XXL,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShirtSize::S => "S",
            ShirtSize::M => "M",
            ShirtSize::L => "L",
            ShirtSize::XL => "XL",
            ShirtSize::XXL => "XXL",
        }
    }

    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl fmt::Display for ShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShirtSize {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(ShirtSize::S),
            "M" => Ok(ShirtSize::M),
            "L" => Ok(ShirtSize::L),
            "XL" => Ok(ShirtSize::XL),
            "XXL" => Ok(ShirtSize::XXL),
            _ => Err(InvalidEnumValue(s.to_string())),
        }
    }
}
