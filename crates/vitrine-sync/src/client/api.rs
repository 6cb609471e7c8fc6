//! MediaWiki Action API implementation of [`EditClient`].
//!
//! Writes go through the Action API (`wbeditentity`, `wbsetlabel`,
//! `wbsetdescription`) with a bot-password session; reads use the
//! `Special:EntityData` endpoint, which needs no authentication.
//! `connect` performs the full login handshake up front so that a bad
//! credential set fails before any record is processed.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use vitrine_core::model::{Claim, NewEntity, Qid};

use crate::client::{EditClient, RemoteEntity};
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};

/// Unauthenticated read endpoint for full entity JSON.
const ENTITY_DATA_URL: &str = "https://www.wikidata.org/wiki/Special:EntityData";

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    query: TokenQuery,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    tokens: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    login: LoginResult,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    result: String,
}

/// Wrapper for the `Special:EntityData` JSON response.
#[derive(Debug, Deserialize)]
struct EntityDataWrapper {
    entities: HashMap<String, RemoteEntity>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Logged-in Action API client.
///
/// The session cookie lives in the underlying `reqwest` cookie store;
/// the CSRF token is fetched once at connect time and reused for every
/// write, which is how the API expects bot sessions to behave.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_endpoint: String,
    csrf_token: String,
}

impl ApiClient {
    /// Validate credentials, log in, and obtain a CSRF token.
    ///
    /// # Errors
    /// Returns [`SyncError::Credentials`] when the configuration is
    /// incomplete, and an API or HTTP error when the handshake fails.
    pub async fn connect(config: &SyncConfig) -> SyncResult<Self> {
        config.validate_credentials()?;

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        let api_endpoint = config.api_endpoint.clone();

        let login_token = fetch_token(&http, &api_endpoint, "login").await?;

        // Credentials are validated above; the fallbacks never fire.
        let bot_username = config.bot_username.clone().unwrap_or_default();
        let bot_password = config.bot_password.clone().unwrap_or_default();

        let response: LoginResponse = post_json(
            &http,
            &api_endpoint,
            &[
                ("action", "login"),
                ("lgname", bot_username.as_str()),
                ("lgpassword", bot_password.as_str()),
                ("lgtoken", login_token.as_str()),
                ("format", "json"),
            ],
        )
        .await?;

        if response.login.result != "Success" {
            return Err(SyncError::Api {
                code: "login-failed".to_string(),
                info: response.login.result,
            });
        }

        let csrf_token = fetch_token(&http, &api_endpoint, "csrf").await?;

        Ok(Self {
            http,
            api_endpoint,
            csrf_token,
        })
    }

    /// POST an edit action and return the parsed response body after
    /// checking for an API error payload.
    async fn post_edit(&self, params: &[(&str, &str)]) -> SyncResult<Value> {
        let mut form: Vec<(&str, &str)> = params.to_vec();
        form.push(("token", self.csrf_token.as_str()));
        form.push(("format", "json"));
        form.push(("bot", "1"));

        let body: Value = self
            .http
            .post(&self.api_endpoint)
            .form(&form)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::Http {
                operation: "edit",
                message: e.to_string(),
            })?
            .json()
            .await?;

        check_api_error(&body)?;
        Ok(body)
    }
}

/// Fetch a token of the given type (`login` or `csrf`).
async fn fetch_token(http: &Client, endpoint: &str, kind: &str) -> SyncResult<String> {
    let response: TokenResponse = http
        .get(endpoint)
        .query(&[
            ("action", "query"),
            ("meta", "tokens"),
            ("type", kind),
            ("format", "json"),
        ])
        .send()
        .await?
        .error_for_status()
        .map_err(|e| SyncError::Http {
            operation: "token fetch",
            message: e.to_string(),
        })?
        .json()
        .await?;

    response
        .query
        .tokens
        .get(&format!("{kind}token"))
        .cloned()
        .ok_or_else(|| SyncError::Api {
            code: "no-token".to_string(),
            info: format!("response carried no {kind} token"),
        })
}

/// POST a form and deserialize the JSON response.
async fn post_json<T: for<'de> Deserialize<'de>>(
    http: &Client,
    endpoint: &str,
    form: &[(&str, &str)],
) -> SyncResult<T> {
    let value = http
        .post(endpoint)
        .form(form)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| SyncError::Http {
            operation: "api post",
            message: e.to_string(),
        })?
        .json()
        .await?;
    Ok(value)
}

/// Map a MediaWiki `{"error": {...}}` payload to [`SyncError::Api`].
fn check_api_error(body: &Value) -> SyncResult<()> {
    if let Some(error) = body.get("error") {
        let code = error
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let info = error
            .get("info")
            .and_then(Value::as_str)
            .unwrap_or("no further information")
            .to_string();
        return Err(SyncError::Api { code, info });
    }
    Ok(())
}

#[async_trait]
impl EditClient for ApiClient {
    async fn create_entity(&self, entity: &NewEntity, summary: &str) -> SyncResult<Qid> {
        let data = entity.to_json().to_string();

        let body = self
            .post_edit(&[
                ("action", "wbeditentity"),
                ("new", "item"),
                ("data", data.as_str()),
                ("summary", summary),
            ])
            .await?;

        let id = body
            .get("entity")
            .and_then(|e| e.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| SyncError::Api {
                code: "no-entity-id".to_string(),
                info: "create response carried no entity id".to_string(),
            })?;

        Ok(Qid::new(id)?)
    }

    async fn fetch_entity(&self, qid: &Qid) -> SyncResult<RemoteEntity> {
        let url = format!("{ENTITY_DATA_URL}/{qid}.json");

        let wrapper: EntityDataWrapper = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::Http {
                operation: "entity fetch",
                message: e.to_string(),
            })?
            .json()
            .await?;

        // EntityData follows redirects, so the response key may differ
        // from the requested id; take whichever entity came back.
        wrapper
            .entities
            .into_values()
            .next()
            .ok_or_else(|| SyncError::NotFound {
                qid: qid.to_string(),
            })
    }

    async fn set_label(
        &self,
        qid: &Qid,
        language: &str,
        value: &str,
        summary: &str,
    ) -> SyncResult<()> {
        self.post_edit(&[
            ("action", "wbsetlabel"),
            ("id", qid.as_str()),
            ("language", language),
            ("value", value),
            ("summary", summary),
        ])
        .await?;
        Ok(())
    }

    async fn set_description(
        &self,
        qid: &Qid,
        language: &str,
        value: &str,
        summary: &str,
    ) -> SyncResult<()> {
        self.post_edit(&[
            ("action", "wbsetdescription"),
            ("id", qid.as_str()),
            ("language", language),
            ("value", value),
            ("summary", summary),
        ])
        .await?;
        Ok(())
    }

    async fn add_claim(&self, qid: &Qid, claim: &Claim, summary: &str) -> SyncResult<()> {
        // wbcreateclaim cannot attach qualifiers or references in the
        // same call; merging through wbeditentity can.
        let data = json!({ "claims": [claim.to_json()] }).to_string();

        self.post_edit(&[
            ("action", "wbeditentity"),
            ("id", qid.as_str()),
            ("data", data.as_str()),
            ("summary", summary),
        ])
        .await?;
        Ok(())
    }
}
