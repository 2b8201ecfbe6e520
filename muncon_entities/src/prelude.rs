pub use crate::schema::prelude::*;

pub use crate::domain::{
    application::{ApplicationRole, ShirtSize},
    committee::Difficulty,
    user::DietaryPreference,
    InvalidEnumValue,
};

pub use crate::queries::{ReferenceProvider, ReferenceSnapshot};
