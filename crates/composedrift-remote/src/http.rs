use crate::{RemoteError, SourceConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

/// Blocking HTTP client for the compose source.
///
/// Two endpoints exist upstream:
/// - `GET <base>/` — directory listing page, scanned as plain text
/// - `GET <base>/<composeId>/compose/metadata/rpms.json` — per-compose
///   package manifest
pub struct ComposeClient {
    config: SourceConfig,
    agent: ureq::Agent,
}

/// `rpms.json` document, reduced to the path the tool reads. The package
/// set for one architecture lives at `payload.rpms.Everything.x86_64` as
/// a map keyed by package build string; the values are ignored.
#[derive(Deserialize)]
struct RpmsDocument {
    payload: RpmsPayload,
}

#[derive(Deserialize)]
struct RpmsPayload {
    rpms: RpmsVariants,
}

#[derive(Deserialize)]
struct RpmsVariants {
    #[serde(rename = "Everything")]
    everything: RpmsArches,
}

#[derive(Deserialize)]
struct RpmsArches {
    x86_64: BTreeMap<String, serde_json::Value>,
}

impl ComposeClient {
    pub fn new(config: SourceConfig) -> Self {
        let agent = ureq::Agent::new_with_defaults();
        Self { config, agent }
    }

    fn listing_url(&self) -> String {
        format!("{}/", self.config.base_url)
    }

    fn manifest_url(&self, compose_id: &str) -> String {
        format!(
            "{}/{}/compose/metadata/rpms.json",
            self.config.base_url, compose_id
        )
    }

    fn do_get(&self, url: &str) -> Result<String, RemoteError> {
        let resp = match self.agent.get(url).call() {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(code)) => {
                return Err(RemoteError::Status {
                    code,
                    url: url.to_owned(),
                });
            }
            Err(e) => return Err(RemoteError::Http(e.to_string())),
        };

        let code = resp.status().as_u16();
        if code != 200 {
            return Err(RemoteError::Status {
                code,
                url: url.to_owned(),
            });
        }

        let mut reader = resp.into_body().into_reader();
        let mut body = String::new();
        reader
            .read_to_string(&mut body)
            .map_err(|e| RemoteError::Http(e.to_string()))?;
        Ok(body)
    }

    /// Fetch the directory listing page as raw text for the discoverer to
    /// scan. No structured parsing happens here.
    pub fn fetch_listing(&self) -> Result<String, RemoteError> {
        let url = self.listing_url();
        debug!("GET {url}");
        self.do_get(&url)
    }

    /// Download one compose's `rpms.json` and flatten it to the list of
    /// package build strings.
    ///
    /// A 200 body without the expected nested path is
    /// [`RemoteError::MalformedManifest`]; it never degrades to an empty
    /// manifest.
    pub fn fetch_manifest_document(&self, compose_id: &str) -> Result<Vec<String>, RemoteError> {
        let url = self.manifest_url(compose_id);
        debug!("GET {url}");
        let body = self.do_get(&url)?;
        let document: RpmsDocument =
            serde_json::from_str(&body).map_err(|e| RemoteError::MalformedManifest {
                compose_id: compose_id.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(document.payload.rpms.everything.x86_64.into_keys().collect())
    }
}
