//! HTTP endpoint glue
//!
//! A single axum handler that decodes a `query` string parameter (plus an
//! optional JSON-encoded `variables` parameter), executes it against the
//! assembled schema, and serializes the engine's response envelope as JSON:
//! 200 for a clean response, 500 when the response carries errors.

use async_graphql::dynamic::Schema;
use async_graphql::{Request, Variables};
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query-string parameters accepted by the endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The GraphQL query string.
    pub query: Option<String>,

    /// Variables as a JSON-encoded string. Unparsable values degrade to no
    /// variables.
    pub variables: Option<String>,
}

/// GraphQL endpoint handler; expects the assembled schema as an extension.
///
/// # Example
///
/// ```rust,no_run
/// use axum::{routing::get, Extension, Router};
/// use graphql_entities::{graphql_handler, schema, SchemaOpts};
///
/// # fn main() -> graphql_entities::Result<()> {
/// let schema = schema(SchemaOpts::default(), vec![])?;
/// let app: Router = Router::new()
///     .route("/graphql", get(graphql_handler))
///     .layer(Extension(schema));
/// # Ok(())
/// # }
/// ```
pub async fn graphql_handler(
    Extension(schema): Extension<Schema>,
    Query(params): Query<QueryParams>,
) -> impl IntoResponse {
    let variables = params
        .variables
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .map(Variables::from_json)
        .unwrap_or_default();

    let request = Request::new(params.query.unwrap_or_default()).variables(variables);
    let response = schema.execute(request).await;

    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(response))
}
