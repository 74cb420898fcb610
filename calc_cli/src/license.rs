//! License check.
//!
//! Access is granted when an `email:key` pair appears in a plain-text license
//! list. The list is either fetched once from a URL or taken from the local
//! config. This is a gate, not a security boundary: any fetch failure simply
//! denies access and nothing is retried.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Something that can decide whether an email/key pair is licensed
pub trait LicenseVerifier {
    fn is_authorized(&self, email: &str, key: &str) -> bool;
}

/// Lower-case and trim an email for comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check credentials and return the normalized identity on success.
pub fn authorize(verifier: &dyn LicenseVerifier, email: &str, key: &str) -> CliResult<String> {
    let identity = normalize_email(email);
    let key = key.trim();
    if !identity.is_empty() && !key.is_empty() && verifier.is_authorized(&identity, key) {
        info!(identity = %identity, "access granted");
        Ok(identity)
    } else {
        warn!(identity = %identity, "access denied");
        Err(CliError::AccessDenied { email: identity })
    }
}

/// Build the verifier selected by the configuration.
pub fn verifier_from_config(config: &Config) -> Box<dyn LicenseVerifier> {
    match &config.license_url {
        Some(url) => Box::new(RemoteLicenseList::new(url.clone(), config.license_timeout())),
        None => Box::new(LocalLicenseList::new(
            config.local_licenses.iter().map(|(e, k)| (e.as_str(), k.as_str())),
        )),
    }
}

/// Search a license list body for a matching `email:key` line.
///
/// Lines without a colon are ignored; both sides are trimmed and the email
/// side is compared case-insensitively.
pub fn list_contains(body: &str, email: &str, key: &str) -> bool {
    let email = normalize_email(email);
    let key = key.trim();
    body.lines()
        .filter_map(|line| line.split_once(':'))
        .any(|(remote_email, remote_key)| normalize_email(remote_email) == email && remote_key.trim() == key)
}

/// License list held in memory
#[derive(Debug, Clone, Default)]
pub struct LocalLicenseList {
    entries: HashMap<String, String>,
}

impl LocalLicenseList {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        LocalLicenseList {
            entries: entries
                .into_iter()
                .map(|(email, key)| (normalize_email(email), key.trim().to_string()))
                .collect(),
        }
    }
}

impl LicenseVerifier for LocalLicenseList {
    fn is_authorized(&self, email: &str, key: &str) -> bool {
        self.entries
            .get(&normalize_email(email))
            .is_some_and(|expected| expected == key.trim())
    }
}

/// License list downloaded from a URL, one request per check
#[derive(Debug, Clone)]
pub struct RemoteLicenseList {
    url: String,
    timeout: Duration,
}

impl RemoteLicenseList {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        RemoteLicenseList {
            url: url.into(),
            timeout,
        }
    }

    fn fetch(&self) -> Result<String, String> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("Computo/{}", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("License server returned {}", response.status()));
        }

        response
            .text()
            .map_err(|e| format!("Failed to read license list: {}", e))
    }
}

impl LicenseVerifier for RemoteLicenseList {
    fn is_authorized(&self, email: &str, key: &str) -> bool {
        check_fetched(&self.url, self.fetch(), email, key)
    }
}

/// Decide on a fetched list. A failed fetch denies access.
fn check_fetched(url: &str, fetched: Result<String, String>, email: &str, key: &str) -> bool {
    match fetched {
        Ok(body) => list_contains(&body, email, key),
        Err(reason) => {
            warn!(%url, %reason, "license list unavailable");
            false
        }
    }
}
