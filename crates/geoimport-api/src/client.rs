// Importer REST HTTP client
//
// Wraps `reqwest::Client` with URL construction against the two base URLs
// (importer and workspace REST), optional basic auth, and uniform response
// handling. Endpoint groups (imports, tasks, transforms, workspaces) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Username and password sent as HTTP basic auth on every request.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: SecretString,
}

/// Raw HTTP client for the importer and workspace REST endpoints.
///
/// `base_url` is the root the importer paths hang off (`{base}imports/...`);
/// `workspace_url` is the root of the catalog REST API
/// (`{wsBase}workspaces/...`). Both are normalised to end with `/`.
pub struct ImporterClient {
    http: reqwest::Client,
    base_url: Url,
    workspace_url: Url,
    auth: Option<BasicAuth>,
}

impl ImporterClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(
        base_url: Url,
        workspace_url: Url,
        auth: Option<BasicAuth>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, workspace_url, auth))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        workspace_url: Url,
        auth: Option<BasicAuth>,
    ) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
            workspace_url: with_trailing_slash(workspace_url),
            auth,
        }
    }

    /// The importer REST root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The workspace REST root.
    pub fn workspace_url(&self) -> &Url {
        &self.workspace_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a URL under the importer root: `{base}{path}`.
    pub(crate) fn import_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// Build a URL under the workspace root: `{wsBase}{path}`.
    pub(crate) fn rest_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.workspace_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.auth {
            Some(auth) => builder.basic_auth(&auth.username, Some(auth.password.expose_secret())),
            None => builder,
        }
    }

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.request(Method::GET, url).send().await?;
        handle_response(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self.request(Method::POST, url).json(body).send().await?;
        handle_response(resp).await
    }

    /// Send a POST request with a JSON body, ignoring the response body.
    pub(crate) async fn post_no_response<B: Serialize + ?Sized + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), Error> {
        debug!("POST {url}");
        let resp = self.request(Method::POST, url).json(body).send().await?;
        handle_empty(resp).await
    }

    /// Send a PUT request with a JSON body.
    ///
    /// Returns `None` when the service acknowledges without a body.
    pub(crate) async fn put_optional<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Option<T>, Error> {
        debug!("PUT {url}");
        let resp = self.request(Method::PUT, url).json(body).send().await?;
        handle_optional(resp).await
    }

    /// Send a DELETE request, ignoring the response body.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self.request(Method::DELETE, url).send().await?;
        handle_empty(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

pub(crate) async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }
    let body = resp.text().await?;
    decode(body)
}

pub(crate) async fn handle_optional<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Option<T>, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }
    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    decode(body).map(Some)
}

pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    let message = if raw.trim().is_empty() {
        status.to_string()
    } else {
        raw.trim().to_owned()
    };

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Authentication { message };
    }

    Error::Service {
        status: status.as_u16(),
        message,
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
