//! The form schemas behind every write endpoint.
//!
//! Raw structs mirror what the client submits, with every field optional so
//! that a missing field surfaces as an error on that field rather than as a
//! deserialization failure. `check` normalizes along the way: an empty phone
//! becomes absent, a delegation id of -1 becomes "no delegation", country
//! codes are uppercased, and an omitted birthdate defaults to today.

use std::str::FromStr;

use chrono::NaiveDate;
use muncon_entities::{
    domain::{application::ShirtSize, committee::Difficulty, user::DietaryPreference},
    queries::ReferenceSnapshot,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::validate::{FieldError, Schema};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

// Digits only after normalization, optional leading +.
static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("mobile pattern is valid"));

const PASSWORD_MIN: usize = 8;
const STATEMENT_MIN: usize = 10;
const STATEMENT_MAX: usize = 4000;
const DELEGATION_NAME_MIN: usize = 10;
const DELEGATION_NAME_MAX: usize = 100;

fn collect<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or_else(|| FieldError::shape(field, "is required"))
}

fn email_address(field: &str, value: Option<String>) -> Result<String, FieldError> {
    let value = required(field, value)?;
    if EMAIL_PATTERN.is_match(&value) {
        Ok(value)
    } else {
        Err(FieldError::shape(field, "must be a valid email address"))
    }
}

fn password(field: &str, value: Option<String>) -> Result<String, FieldError> {
    let value = required(field, value)?;
    if value.chars().count() < PASSWORD_MIN {
        Err(FieldError::shape(
            field,
            format!("must be at least {} characters", PASSWORD_MIN),
        ))
    } else {
        Ok(value)
    }
}

fn bounded_text(
    field: &str,
    value: Option<String>,
    min: usize,
    max: usize,
) -> Result<String, FieldError> {
    let value = required(field, value)?;
    let length = value.chars().count();
    if length < min || length > max {
        Err(FieldError::shape(
            field,
            format!("must be between {} and {} characters", min, max),
        ))
    } else {
        Ok(value)
    }
}

fn country_code(field: &str, value: Option<String>) -> Result<String, FieldError> {
    let value = required(field, value)?;
    let value = value.trim().to_uppercase();
    match isocountry::CountryCode::for_alpha2(&value) {
        Ok(_) => Ok(value),
        Err(_) => Err(FieldError::shape(
            field,
            "must be an ISO 3166-1 alpha-2 country code",
        )),
    }
}

/// An absent or empty phone means "no phone"; anything else has to look
/// like a mobile number after separators are stripped.
fn mobile_number(field: &str, value: Option<String>) -> Result<Option<String>, FieldError> {
    let value = match value {
        Some(value) => value,
        None => return Ok(None),
    };
    let normalized: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if normalized.is_empty() {
        return Ok(None);
    }
    if MOBILE_PATTERN.is_match(&normalized) {
        Ok(Some(normalized))
    } else {
        Err(FieldError::shape(field, "must be a valid mobile number"))
    }
}

fn dietary_preference(
    field: &str,
    value: Option<String>,
) -> Result<Option<DietaryPreference>, FieldError> {
    match value {
        None => Ok(None),
        Some(value) => DietaryPreference::from_str(&value).map(Some).map_err(|_| {
            FieldError::shape_with_options(
                field,
                "must be one of the offered dietary preferences",
                DietaryPreference::names(),
            )
        }),
    }
}

/// The web form submits the literal string "none" for no shirt.
fn shirt_size(field: &str, value: Option<String>) -> Result<Option<ShirtSize>, FieldError> {
    match value.as_deref() {
        None | Some("none") => Ok(None),
        Some(value) => ShirtSize::from_str(value).map(Some).map_err(|_| {
            FieldError::shape_with_options(
                field,
                "must be one of the offered shirt sizes or \"none\"",
                ShirtSize::names(),
            )
        }),
    }
}

fn committee_choice(field: &str, value: Option<i32>) -> Result<i32, FieldError> {
    let value = required(field, value)?;
    if value < 0 {
        Err(FieldError::shape(field, "must be a non-negative committee id"))
    } else {
        Ok(value)
    }
}

fn chosen_country(field: &str, value: Option<String>) -> Result<String, FieldError> {
    let value = required(field, value)?;
    let value = value.trim().to_uppercase();
    if value.chars().count() < 2 {
        Err(FieldError::shape(field, "must be at least 2 characters"))
    } else {
        Ok(value)
    }
}

/// The web form submits -1 for "no delegation".
fn delegation_choice(field: &str, value: Option<i32>) -> Result<Option<i32>, FieldError> {
    match value {
        None => Ok(None),
        Some(-1) => Ok(None),
        Some(id) if id >= 0 => Ok(Some(id)),
        Some(_) => Err(FieldError::shape(field, "must be a delegation id or -1")),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSignupForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub dietary_preference: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub birthdate: NaiveDate,
    pub nationality: String,
    pub dietary_preference: Option<DietaryPreference>,
}

impl Schema for SignupForm {
    type Raw = RawSignupForm;

    fn check(raw: RawSignupForm) -> Result<SignupForm, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = collect(&mut errors, email_address("email", raw.email));
        let password = collect(&mut errors, password("password", raw.password));
        let password_confirm = collect(
            &mut errors,
            required("password_confirm", raw.password_confirm),
        );
        // The equality check only makes sense once both sides passed their
        // own shape checks.
        if let (Some(password), Some(password_confirm)) = (&password, &password_confirm) {
            if password != password_confirm {
                errors.push(FieldError::cross_field(
                    "password_confirm",
                    "does not match the password",
                ));
            }
        }
        let phone = collect(&mut errors, mobile_number("phone", raw.phone));
        let birthdate = raw
            .birthdate
            .unwrap_or_else(|| chrono::Utc::now().date_naive());
        let nationality = collect(&mut errors, country_code("nationality", raw.nationality));
        let dietary_preference = collect(
            &mut errors,
            dietary_preference("dietary_preference", raw.dietary_preference),
        );

        match (email, password, phone, nationality, dietary_preference) {
            (Some(email), Some(password), Some(phone), Some(nationality), Some(dietary_preference))
                if errors.is_empty() =>
            {
                Ok(SignupForm {
                    email,
                    password,
                    phone,
                    birthdate,
                    nationality,
                    dietary_preference,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Schema for LoginForm {
    type Raw = RawLoginForm;

    fn check(raw: RawLoginForm) -> Result<LoginForm, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = collect(&mut errors, email_address("email", raw.email));
        let password = match required("password", raw.password) {
            Ok(password) if password.is_empty() => {
                errors.push(FieldError::shape("password", "is required"));
                None
            }
            result => collect(&mut errors, result),
        };

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => {
                Ok(LoginForm { email, password })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegateChoice {
    pub committee: i32,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDelegateApplication {
    pub motivation: Option<String>,
    pub experience: Option<String>,
    pub delegation_id: Option<i32>,
    pub shirt_size: Option<String>,
    pub choice1_committee: Option<i32>,
    pub choice1_country: Option<String>,
    pub choice2_committee: Option<i32>,
    pub choice2_country: Option<String>,
    pub choice3_committee: Option<i32>,
    pub choice3_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegateApplicationForm {
    pub motivation: String,
    pub experience: String,
    pub delegation_id: Option<i32>,
    pub shirt_size: Option<ShirtSize>,
    pub choices: [DelegateChoice; 3],
}

impl Schema for DelegateApplicationForm {
    type Raw = RawDelegateApplication;

    const REFINES_AGAINST_REFERENCES: bool = true;

    fn check(raw: RawDelegateApplication) -> Result<DelegateApplicationForm, Vec<FieldError>> {
        let mut errors = Vec::new();

        let motivation = collect(
            &mut errors,
            bounded_text("motivation", raw.motivation, STATEMENT_MIN, STATEMENT_MAX),
        );
        let experience = collect(
            &mut errors,
            bounded_text("experience", raw.experience, STATEMENT_MIN, STATEMENT_MAX),
        );
        let delegation_id = collect(
            &mut errors,
            delegation_choice("delegation_id", raw.delegation_id),
        );
        let shirt_size = collect(&mut errors, shirt_size("shirt_size", raw.shirt_size));

        let slots = [
            (raw.choice1_committee, raw.choice1_country),
            (raw.choice2_committee, raw.choice2_country),
            (raw.choice3_committee, raw.choice3_country),
        ];
        let mut choices = Vec::new();
        for (idx, (committee, country)) in slots.into_iter().enumerate() {
            let slot = idx + 1;
            let committee = collect(
                &mut errors,
                committee_choice(&format!("choice{}_committee", slot), committee),
            );
            let country = collect(
                &mut errors,
                chosen_country(&format!("choice{}_country", slot), country),
            );
            if let (Some(committee), Some(country)) = (committee, country) {
                choices.push(DelegateChoice { committee, country });
            }
        }

        match (
            motivation,
            experience,
            delegation_id,
            shirt_size,
            <[DelegateChoice; 3]>::try_from(choices),
        ) {
            (
                Some(motivation),
                Some(experience),
                Some(delegation_id),
                Some(shirt_size),
                Ok(choices),
            ) if errors.is_empty() => Ok(DelegateApplicationForm {
                motivation,
                experience,
                delegation_id,
                shirt_size,
                choices,
            }),
            _ => Err(errors),
        }
    }

    fn cross_check(&self, references: &ReferenceSnapshot) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for (idx, choice) in self.choices.iter().enumerate() {
            let slot = idx + 1;
            if !references.has_committee(choice.committee) {
                errors.push(FieldError::reference(
                    format!("choice{}_committee", slot),
                    format!("committee {} does not exist", choice.committee),
                    references
                        .committee_ids()
                        .iter()
                        .map(|id| id.to_string())
                        .collect(),
                ));
                // Reporting a country mismatch against a committee that does
                // not exist would only confuse; skip the dependent check.
                continue;
            }
            let countries = references.countries_for(choice.committee);
            if !countries.iter().any(|c| c == &choice.country) {
                errors.push(FieldError::reference(
                    format!("choice{}_country", slot),
                    format!(
                        "country {} is not available in committee {}",
                        choice.country, choice.committee
                    ),
                    countries,
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawChairApplication {
    pub motivation: Option<String>,
    pub experience: Option<String>,
    pub delegation_id: Option<i32>,
    pub shirt_size: Option<String>,
    pub choice1_committee: Option<i32>,
    pub choice2_committee: Option<i32>,
    pub choice3_committee: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChairApplicationForm {
    pub motivation: String,
    pub experience: String,
    pub delegation_id: Option<i32>,
    pub shirt_size: Option<ShirtSize>,
    pub choices: [i32; 3],
}

impl Schema for ChairApplicationForm {
    type Raw = RawChairApplication;

    const REFINES_AGAINST_REFERENCES: bool = true;

    fn check(raw: RawChairApplication) -> Result<ChairApplicationForm, Vec<FieldError>> {
        let mut errors = Vec::new();

        let motivation = collect(
            &mut errors,
            bounded_text("motivation", raw.motivation, STATEMENT_MIN, STATEMENT_MAX),
        );
        let experience = collect(
            &mut errors,
            bounded_text("experience", raw.experience, STATEMENT_MIN, STATEMENT_MAX),
        );
        let delegation_id = collect(
            &mut errors,
            delegation_choice("delegation_id", raw.delegation_id),
        );
        let shirt_size = collect(&mut errors, shirt_size("shirt_size", raw.shirt_size));

        let slots = [
            raw.choice1_committee,
            raw.choice2_committee,
            raw.choice3_committee,
        ];
        let mut choices = Vec::new();
        for (idx, committee) in slots.into_iter().enumerate() {
            let slot = idx + 1;
            if let Some(committee) = collect(
                &mut errors,
                committee_choice(&format!("choice{}_committee", slot), committee),
            ) {
                choices.push(committee);
            }
        }

        match (
            motivation,
            experience,
            delegation_id,
            shirt_size,
            <[i32; 3]>::try_from(choices),
        ) {
            (
                Some(motivation),
                Some(experience),
                Some(delegation_id),
                Some(shirt_size),
                Ok(choices),
            ) if errors.is_empty() => Ok(ChairApplicationForm {
                motivation,
                experience,
                delegation_id,
                shirt_size,
                choices,
            }),
            _ => Err(errors),
        }
    }

    fn cross_check(&self, references: &ReferenceSnapshot) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for (idx, committee) in self.choices.iter().enumerate() {
            let slot = idx + 1;
            if !references.has_committee(*committee) {
                errors.push(FieldError::reference(
                    format!("choice{}_committee", slot),
                    format!("committee {} does not exist", committee),
                    references
                        .committee_ids()
                        .iter()
                        .map(|id| id.to_string())
                        .collect(),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDelegationForm {
    pub name: Option<String>,
    pub country: Option<String>,
    pub estimated_delegates: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegationForm {
    pub name: String,
    pub country: String,
    pub estimated_delegates: i32,
}

impl Schema for DelegationForm {
    type Raw = RawDelegationForm;

    fn check(raw: RawDelegationForm) -> Result<DelegationForm, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = collect(
            &mut errors,
            bounded_text(
                "name",
                raw.name,
                DELEGATION_NAME_MIN,
                DELEGATION_NAME_MAX,
            ),
        );
        let country = collect(&mut errors, country_code("country", raw.country));
        let estimated_delegates = match required("estimated_delegates", raw.estimated_delegates) {
            Ok(count) if count < 1 => {
                errors.push(FieldError::shape("estimated_delegates", "must be at least 1"));
                None
            }
            result => collect(&mut errors, result),
        };

        match (name, country, estimated_delegates) {
            (Some(name), Some(country), Some(estimated_delegates)) if errors.is_empty() => {
                Ok(DelegationForm {
                    name,
                    country,
                    estimated_delegates,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitteeFilter {
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitteeFilter {
    pub difficulty: Option<Difficulty>,
}

impl Schema for CommitteeFilter {
    type Raw = RawCommitteeFilter;

    fn check(raw: RawCommitteeFilter) -> Result<CommitteeFilter, Vec<FieldError>> {
        let difficulty = match raw.difficulty {
            None => None,
            Some(value) => match Difficulty::from_str(&value) {
                Ok(difficulty) => Some(difficulty),
                Err(_) => {
                    return Err(vec![FieldError::shape_with_options(
                        "difficulty",
                        "must be one of the committee difficulty ratings",
                        Difficulty::names(),
                    )])
                }
            },
        };
        Ok(CommitteeFilter { difficulty })
    }
}
