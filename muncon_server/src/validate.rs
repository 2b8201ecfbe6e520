//! Generic request validation.
//!
//! A form schema turns a loosely typed raw payload into a normalized value,
//! collecting one error per offending field instead of failing fast. Schemas
//! that cross-reference committee data additionally run a refinement step
//! against a [`ReferenceSnapshot`]; the extractors below fetch the snapshot
//! before refining, so handlers only ever see fully validated values.
//!
//! Every validation failure is answered with the same 422 shape:
//! `{"statusCode": 422, "message": "Bad Request", "description": [<report>...]}`
//! with one report per failed request part (body and/or query).

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequest, FromRequestParts, Query},
    http::{self, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use muncon_entities::queries::{ReferenceProvider, ReferenceSnapshot};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{response::handle_error, state::AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A field violates a type, format, length or range constraint.
    Shape,
    /// A submitted value does not exist in the reference snapshot.
    Reference,
    /// Two individually valid fields are mutually inconsistent.
    CrossField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub field: String,
    pub message: String,
    /// The currently valid alternatives, for enumeration and reference
    /// violations.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options: Option<Vec<String>>,
}

impl FieldError {
    pub fn shape(field: impl Into<String>, message: impl Into<String>) -> FieldError {
        FieldError {
            kind: ErrorKind::Shape,
            field: field.into(),
            message: message.into(),
            options: None,
        }
    }

    pub fn shape_with_options(
        field: impl Into<String>,
        message: impl Into<String>,
        options: Vec<String>,
    ) -> FieldError {
        FieldError {
            kind: ErrorKind::Shape,
            field: field.into(),
            message: message.into(),
            options: Some(options),
        }
    }

    pub fn reference(
        field: impl Into<String>,
        message: impl Into<String>,
        options: Vec<String>,
    ) -> FieldError {
        FieldError {
            kind: ErrorKind::Reference,
            field: field.into(),
            message: message.into(),
            options: Some(options),
        }
    }

    pub fn cross_field(field: impl Into<String>, message: impl Into<String>) -> FieldError {
        FieldError {
            kind: ErrorKind::CrossField,
            field: field.into(),
            message: message.into(),
            options: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestPart {
    Body,
    Query,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub part: RequestPart,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRejection {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub description: Vec<ErrorReport>,
}

impl ValidationRejection {
    pub fn new(description: Vec<ErrorReport>) -> Self {
        ValidationRejection {
            status_code: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
            message: "Bad Request".to_string(),
            description,
        }
    }

    pub fn invalid_body(errors: Vec<FieldError>) -> Self {
        Self::new(vec![ErrorReport {
            part: RequestPart::Body,
            errors,
        }])
    }

    pub fn invalid_query(errors: Vec<FieldError>) -> Self {
        Self::new(vec![ErrorReport {
            part: RequestPart::Query,
            errors,
        }])
    }
}

/// Body and query validate independently; the reports of both failed parts
/// end up in one rejection. Returns None when neither part failed.
pub fn collect_reports(
    body: Option<Vec<FieldError>>,
    query: Option<Vec<FieldError>>,
) -> Option<ValidationRejection> {
    let mut description = Vec::new();
    if let Some(errors) = body {
        if !errors.is_empty() {
            description.push(ErrorReport {
                part: RequestPart::Body,
                errors,
            });
        }
    }
    if let Some(errors) = query {
        if !errors.is_empty() {
            description.push(ErrorReport {
                part: RequestPart::Query,
                errors,
            });
        }
    }
    if description.is_empty() {
        None
    } else {
        Some(ValidationRejection::new(description))
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

/// A validated form. `check` runs the per-field shape constraints and any
/// synchronous cross-field refinements; `cross_check` runs after it against
/// a reference snapshot, for schemas that set `REFINES_AGAINST_REFERENCES`.
///
/// Validation is a pure function of the raw input and the snapshot: schemas
/// must not consult any ambient state.
pub trait Schema: Sized + Send {
    type Raw: DeserializeOwned + Send;

    /// Whether `cross_check` consults reference data. When set, the
    /// extractors fetch a snapshot (one read per request) before refining.
    const REFINES_AGAINST_REFERENCES: bool = false;

    fn check(raw: Self::Raw) -> Result<Self, Vec<FieldError>>;

    fn cross_check(&self, _references: &ReferenceSnapshot) -> Result<(), Vec<FieldError>> {
        Ok(())
    }
}

async fn check_body<B>(
    req: Request<Body>,
    state: &AppState,
) -> Result<Result<B, Vec<FieldError>>, Response>
where
    B: Schema,
{
    let raw = match Json::<B::Raw>::from_request(req, state).await {
        Ok(Json(raw)) => raw,
        Err(rejection) => {
            return Ok(Err(vec![FieldError::shape("body", rejection.to_string())]));
        }
    };

    let value = match B::check(raw) {
        Ok(value) => value,
        Err(errors) => return Ok(Err(errors)),
    };

    if B::REFINES_AGAINST_REFERENCES {
        let references = state
            .db
            .reference_snapshot()
            .await
            .map_err(|e| handle_error(e).into_response())?;
        if let Err(errors) = value.cross_check(&references) {
            return Ok(Err(errors));
        }
    }

    Ok(Ok(value))
}

async fn check_query<Q>(
    parts: &mut http::request::Parts,
    state: &AppState,
) -> Result<Q, Vec<FieldError>>
where
    Q: Schema,
{
    let raw = match Query::<Q::Raw>::from_request_parts(parts, state).await {
        Ok(Query(raw)) => raw,
        Err(rejection) => {
            return Err(vec![FieldError::shape("query", rejection.to_string())]);
        }
    };
    Q::check(raw)
}

/// Extracts and validates a JSON body against the schema `B`.
pub struct ValidatedJson<B>(pub B);

#[async_trait]
impl<B> FromRequest<AppState, Body> for ValidatedJson<B>
where
    B: Schema,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, state: &AppState) -> Result<Self, Self::Rejection> {
        match check_body::<B>(req, state).await? {
            Ok(value) => Ok(ValidatedJson(value)),
            Err(errors) => Err(ValidationRejection::invalid_body(errors).into_response()),
        }
    }
}

/// Extracts and validates the query string against the schema `Q`.
pub struct ValidatedQuery<Q>(pub Q);

#[async_trait]
impl<Q> FromRequestParts<AppState> for ValidatedQuery<Q>
where
    Q: Schema,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match check_query::<Q>(parts, state).await {
            Ok(value) => Ok(ValidatedQuery(value)),
            Err(errors) => Err(ValidationRejection::invalid_query(errors).into_response()),
        }
    }
}

/// Validates body and query in one go. Unlike stacking the two single-part
/// extractors, a request failing both parts is answered with both reports.
pub struct ValidatedRequest<B, Q> {
    pub body: B,
    pub query: Q,
}

#[async_trait]
impl<B, Q> FromRequest<AppState, Body> for ValidatedRequest<B, Q>
where
    B: Schema,
    Q: Schema,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, state: &AppState) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let query = check_query::<Q>(&mut parts, state).await;
        let req = Request::from_parts(parts, body);
        let body = check_body::<B>(req, state).await?;

        match (body, query) {
            (Ok(body), Ok(query)) => Ok(ValidatedRequest { body, query }),
            (body, query) => {
                let rejection = collect_reports(body.err(), query.err())
                    .map(IntoResponse::into_response)
                    .unwrap_or_else(|| {
                        // Both parts passed individually; nothing to report.
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    });
                Err(rejection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{CommitteeFilter, LoginForm};

    async fn run_validated_request(
        uri: &str,
        body: &str,
    ) -> Result<ValidatedRequest<LoginForm, CommitteeFilter>, ValidationRejection> {
        let state = AppState::new_test_app().await;
        let req = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        match ValidatedRequest::<LoginForm, CommitteeFilter>::from_request(req, &state).await {
            Ok(validated) => Ok(validated),
            Err(response) => {
                assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

                use http_body::Body as _;
                let mut body = response.into_body();
                let mut buf = Vec::new();
                while let Some(chunk) = body.data().await {
                    buf.extend_from_slice(&chunk.unwrap());
                }
                Err(serde_json::from_slice(&buf).unwrap())
            }
        }
    }

    #[tokio::test]
    async fn test_validated_request_accepts_valid_parts() {
        let validated = run_validated_request(
            "/login?difficulty=Beginner",
            r#"{"email": "anna@example.com", "password": "testtest1"}"#,
        )
        .await
        .unwrap();

        assert_eq!(validated.body.email, "anna@example.com");
        assert!(validated.query.difficulty.is_some());
    }

    #[tokio::test]
    async fn test_validated_request_reports_only_the_failing_part() {
        let rejection = run_validated_request(
            "/login?difficulty=Impossible",
            r#"{"email": "anna@example.com", "password": "testtest1"}"#,
        )
        .await
        .unwrap_err();

        assert_eq!(rejection.description.len(), 1);
        assert_eq!(rejection.description[0].part, RequestPart::Query);
        assert_eq!(rejection.description[0].errors[0].field, "difficulty");
    }

    #[tokio::test]
    async fn test_validated_request_collects_both_failing_parts() {
        let rejection = run_validated_request(
            "/login?difficulty=Impossible",
            r#"{"email": "not-an-email", "password": "testtest1"}"#,
        )
        .await
        .unwrap_err();

        assert_eq!(rejection.description.len(), 2);
        assert_eq!(rejection.description[0].part, RequestPart::Body);
        assert_eq!(rejection.description[0].errors[0].field, "email");
        assert_eq!(rejection.description[1].part, RequestPart::Query);
    }

    #[test]
    fn test_no_errors_yields_no_rejection() {
        assert_eq!(collect_reports(None, None), None);
        assert_eq!(collect_reports(Some(vec![]), Some(vec![])), None);
    }

    #[test]
    fn test_body_and_query_reports_are_kept_apart() {
        let rejection = collect_reports(
            Some(vec![FieldError::shape("motivation", "is required")]),
            Some(vec![FieldError::shape("difficulty", "unknown value")]),
        )
        .unwrap();

        assert_eq!(rejection.status_code, 422);
        assert_eq!(rejection.message, "Bad Request");
        assert_eq!(rejection.description.len(), 2);
        assert_eq!(rejection.description[0].part, RequestPart::Body);
        assert_eq!(rejection.description[1].part, RequestPart::Query);
    }

    #[test]
    fn test_invalid_query_with_valid_body_reports_only_the_query() {
        let rejection = collect_reports(
            None,
            Some(vec![FieldError::shape("difficulty", "unknown value")]),
        )
        .unwrap();

        assert_eq!(rejection.description.len(), 1);
        assert_eq!(rejection.description[0].part, RequestPart::Query);
        assert_eq!(rejection.description[0].errors[0].field, "difficulty");
    }

    #[test]
    fn test_rejection_serialization_shape() {
        let rejection = ValidationRejection::invalid_body(vec![FieldError::reference(
            "choice1_committee",
            "committee 5 does not exist",
            vec!["1".to_string(), "2".to_string()],
        )]);

        let value = serde_json::to_value(&rejection).unwrap();
        assert_eq!(value["statusCode"], 422);
        assert_eq!(value["message"], "Bad Request");
        assert_eq!(value["description"][0]["part"], "body");
        assert_eq!(
            value["description"][0]["errors"][0]["field"],
            "choice1_committee"
        );
        assert_eq!(value["description"][0]["errors"][0]["kind"], "reference");
        assert_eq!(
            value["description"][0]["errors"][0]["options"][0],
            "1"
        );
    }

    #[test]
    fn test_options_are_omitted_for_plain_shape_errors() {
        let value =
            serde_json::to_value(FieldError::shape("password", "too short")).unwrap();
        assert!(value.get("options").is_none());
    }
}
