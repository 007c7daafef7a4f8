use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use std::convert::Infallible;

#[derive(Debug, Deserialize)]
struct RegionQuery {
    region: Option<String>,
}

/// Region from the `?region=` query parameter.
///
/// Never rejects: a missing, empty or malformed parameter yields `None`.
#[derive(Debug)]
pub struct RegionParam(pub Option<String>);

impl RegionParam {
    pub fn or_default(self, default: impl Into<String>) -> String {
        self.0.unwrap_or_else(|| default.into())
    }
}

impl<S> FromRequestParts<S> for RegionParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let region = Query::<RegionQuery>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Query(query)| query.region)
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(RegionParam(region))
    }
}
