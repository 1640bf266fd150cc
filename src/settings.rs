use crate::client::ClientConfig;
use crate::error::{Error, Result};
use crate::hooks::with_basic_auth;
use crate::transport::reqwest::{ReqwestTransport, TransportConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Client settings as stored in a JSON file.
///
/// ```json
/// {
///     "base_url": "https://pokeapi.co/api/v2",
///     "headers": {"accept": "application/json"},
///     "basic_auth": {"username": "snorlax", "password": "s3cr3t"},
///     "timeout_secs": 30
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub base_url: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub basic_auth: Option<BasicAuth>,
    pub proxy: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Settings> {
        let contents = read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Settings> {
        serde_json::from_str(json).map_err(Error::SettingsParse)
    }

    /// Builds a client configuration backed by a [`ReqwestTransport`].
    pub fn into_config(self) -> Result<ClientConfig> {
        let mut transport_config = TransportConfig::new();
        if let Some(proxy) = &self.proxy {
            let proxy = Url::parse(proxy).map_err(|source| Error::UrlParse {
                url: proxy.clone(),
                source,
            })?;
            transport_config = transport_config.proxy(proxy);
        }
        if let Some(secs) = self.timeout_secs {
            transport_config = transport_config.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = self.user_agent {
            transport_config = transport_config.user_agent(user_agent);
        }
        let transport = ReqwestTransport::create(transport_config).map_err(Error::TransportSetup)?;

        let mut config = ClientConfig::new(transport);
        if let Some(base_url) = self.base_url {
            config.set_base_url(base_url)?;
        }
        for (key, value) in &self.headers {
            config.set_header(key, value)?;
        }
        if let Some(BasicAuth { username, password }) = self.basic_auth {
            config.add_request_hook(with_basic_auth(username, password));
        }
        Ok(config)
    }
}
