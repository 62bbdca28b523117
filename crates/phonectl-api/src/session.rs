// Session lifecycle against one phone.
//
// A `PhoneSession` wraps a shared `reqwest::Client` with one device's base
// URL and the bearer token for the current login. Operation endpoints
// (phone book, parameters, maintenance) are implemented as inherent
// methods in separate files to keep this module focused on the
// login/logout protocol and response classification.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::Address;
use crate::error::Error;
use crate::multipart::EncodedForm;

/// An authenticated (or not-yet-authenticated) connection to one device.
///
/// Owned exclusively by the task managing its address; never shared. The
/// token is set by a successful [`login`](Self::login) and cleared by
/// [`logout`](Self::logout). Logging out twice sends an empty bearer and
/// earns an auth error from the device -- callers treat that as expected.
pub struct PhoneSession {
    http: reqwest::Client,
    address: Address,
    token: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl PhoneSession {
    /// Create an unauthenticated session for one device.
    ///
    /// `http` is the invocation-wide client (cheap to clone); the
    /// per-request timeout configured on it is the only deadline applied
    /// to this session's requests.
    pub fn new(http: reqwest::Client, address: Address) -> Self {
        Self {
            http,
            address,
            token: None,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Whether a login has succeeded and not yet been logged out.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Authenticate against the device.
    ///
    /// POSTs `{login, password}` to `<address>/Login` and stores the
    /// returned token. 401/403 map to [`Error::Authentication`], any other
    /// status >= 299 to [`Error::Http`], and a malformed token body to
    /// [`Error::Deserialization`] naming this address. Never retries.
    pub async fn login(&mut self, login: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.endpoint("Login");
        debug!("POST {url}");

        let resp = self
            .http
            .post(&url)
            .json(&LoginRequest {
                login,
                password: password.expose_secret(),
            })
            .send()
            .await
            .map_err(Error::Transport)?;

        let resp = classify_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        let decoded: LoginResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                address: self.address.to_string(),
                message: format!("{e} (body preview: {:?})", preview(&body)),
            })?;

        self.token = Some(decoded.token);
        debug!("login successful for {}", self.address);
        Ok(())
    }

    /// End the session.
    ///
    /// POSTs to `<address>/Logout` with the current bearer token and clears
    /// it on success. When no token is held (login failed, or a previous
    /// logout already cleared it) the request goes out with an empty bearer
    /// and the device answers 401; that outcome is reported, not escalated.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let url = self.endpoint("Logout");
        debug!("POST {url}");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(self.token.as_deref().unwrap_or_default())
            .send()
            .await
            .map_err(Error::Transport)?;

        classify_status(resp).await?;
        self.token = None;
        debug!("logout complete for {}", self.address);
        Ok(())
    }

    // ── Request helpers for the operation modules ────────────────────

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.address)
    }

    fn bearer(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    /// Authenticated GET, classified through the shared status policy.
    pub(crate) async fn get_authed(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = self.endpoint(path);
        debug!("GET {url}");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(Error::Transport)?;
        classify_status(resp).await
    }

    /// Authenticated POST with a JSON body.
    pub(crate) async fn post_authed_json<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, Error> {
        let url = self.endpoint(path);
        debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(self.bearer())
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        classify_status(resp).await
    }

    /// Authenticated POST with an empty body.
    pub(crate) async fn post_authed_empty(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = self.endpoint(path);
        debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(Error::Transport)?;
        classify_status(resp).await
    }

    /// Authenticated multipart POST with a pre-encoded form body.
    pub(crate) async fn post_authed_form(
        &self,
        path: &str,
        form: EncodedForm,
    ) -> Result<reqwest::Response, Error> {
        let url = self.endpoint(path);
        debug!("POST {url} (multipart)");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(self.bearer())
            .header(CONTENT_TYPE, form.content_type())
            .body(form.body)
            .send()
            .await
            .map_err(Error::Transport)?;
        classify_status(resp).await
    }

    /// Decode a JSON response body, wrapping failures with this address.
    pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(
        &self,
        body: &str,
    ) -> Result<T, Error> {
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            address: self.address.to_string(),
            message: format!("{e} (body preview: {:?})", preview(body)),
        })
    }
}

/// Shared response classification: 401/403 are authentication errors
/// (carrying status and body when available), anything else >= 299 is a
/// generic HTTP error. 2xx responses pass through untouched.
async fn classify_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Authentication {
            status: status.as_u16(),
            body,
        });
    }

    if status.as_u16() >= 299 {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Http {
            status: status.as_u16(),
            body: preview(&body),
        });
    }

    Ok(resp)
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
