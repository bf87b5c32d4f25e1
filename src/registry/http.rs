//! npm-compatible registry client over blocking HTTP

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, warn};

use crate::config::RegistrySettings;
use crate::error::{PublishVersionError, Result};
use crate::registry::{PackageDocument, RegistryClient};

/// Registry implementation for npm-compatible HTTP registries
pub struct HttpRegistry {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRegistry {
    /// Creates a client from resolved registry settings
    ///
    /// # Errors
    /// * `Network` - if the HTTP client cannot be initialized
    pub fn new(settings: &RegistrySettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.url.clone(),
            token: settings.token.clone(),
        })
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }

    /// Full document URL for a package
    pub fn package_url(&self, package_name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            Self::encode_package_name(package_name)
        )
    }
}

impl RegistryClient for HttpRegistry {
    fn fetch_package(&self, package_name: &str) -> Result<PackageDocument> {
        let url = self.package_url(package_name);
        debug!(%url, authenticated = self.token.is_some(), "fetching package document");

        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        let document: PackageDocument = serde_json::from_str(&body).map_err(|e| {
            warn!(%url, %status, "registry returned a non-JSON body");
            PublishVersionError::network(format!(
                "Registry returned an unparsable response for {} (status {}): {}",
                url, status, e
            ))
        })?;

        if let Some(message) = document.error_message() {
            return Err(PublishVersionError::network(format!("NPM Error: {}", message)));
        }

        if !status.is_success() {
            return Err(PublishVersionError::network(format!(
                "Unexpected status {} from {}",
                status, url
            )));
        }

        Ok(document)
    }
}
