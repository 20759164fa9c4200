//! RadElement registry API client

use crate::error::{Error, Result};
use radcde_models::CdeSet;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const RADELEMENT_BASE_URL: &str = "https://api3.rsna.org/radelement/v1";

/// Client for the RadElement CDE registry.
///
/// A fetch is a single best-effort attempt: one request, no retry. The
/// client's only state is the connection pool; independent in-flight fetches
/// share no mutable state.
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a new registry client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_base_url(RADELEMENT_BASE_URL.to_string())
    }

    /// Create a registry client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch a set by identifier and validate it against the set schema.
    ///
    /// The registry wraps the record in a `{ "data": <set-record> }`
    /// envelope. Any failure (network, non-2xx status, missing envelope,
    /// schema mismatch) is returned as a typed error after a diagnostic log.
    pub async fn get_set(&self, id: &str) -> Result<CdeSet> {
        let url = format!("{}/sets/{}", self.base_url, id);
        tracing::debug!(%url, "fetching set from registry");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!(id, "set not found in registry");
            return Err(Error::SetNotFound(id.to_string()));
        }
        if !status.is_success() {
            tracing::warn!(id, %status, "registry fetch failed");
            return Err(Error::Registry(format!(
                "Fetch for {id} failed with status: {status}"
            )));
        }

        let body: Value = response.json().await?;
        let set = parse_envelope(&body).map_err(|err| {
            tracing::warn!(id, %err, "registry response failed set validation");
            err
        })?;
        Ok(set)
    }
}

/// Extract and validate the set record from the registry's `data` envelope.
fn parse_envelope(body: &Value) -> Result<CdeSet> {
    let record = body
        .get("data")
        .ok_or_else(|| Error::Registry("Response body has no 'data' envelope".to_string()))?;
    Ok(CdeSet::from_value(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enveloped_set() -> Value {
        json!({
            "data": {
                "id": "RDES3",
                "name": "Acute aortic syndrome",
                "schema_version": "1.0.0",
                "set_version": { "number": 1, "date": "2024-02-01" },
                "status": { "date": "2024-02-01", "name": "published" },
                "elements": [
                    {
                        "id": "RDE41",
                        "parent_set": "RDES3",
                        "name": "Dissection flap",
                        "element_version": { "number": 1, "date": "2024-02-01" },
                        "schema_version": "1.0.0",
                        "status": { "date": "2024-02-01", "name": "published" },
                        "boolean_value": "boolean"
                    }
                ]
            }
        })
    }

    #[test]
    fn parses_data_envelope() {
        let set = parse_envelope(&enveloped_set()).unwrap();
        assert_eq!(set.id, "RDES3");
        assert_eq!(set.elements.len(), 1);
    }

    #[test]
    fn rejects_body_without_data_envelope() {
        let body = json!({ "id": "RDES3" });
        assert!(matches!(parse_envelope(&body), Err(Error::Registry(_))));
    }

    #[test]
    fn rejects_envelope_with_invalid_record() {
        let body = json!({ "data": { "name": "missing everything" } });
        assert!(matches!(parse_envelope(&body), Err(Error::Model(_))));
    }

    #[test]
    fn base_url_is_overridable() {
        let client = RegistryClient::with_base_url("http://localhost:9999".to_string()).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
