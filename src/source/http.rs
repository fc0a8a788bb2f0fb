use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{ArticleSource, MAX_RESPONSE_BYTES, SourceError};
use crate::config::CatalogConfig;
use crate::model::{ArticleFullContent, ArticlesIndex};

const INDEX_FILE: &str = "articles-index.json";
const CONTENT_DIR: &str = "articles";

/// Characters to percent-encode in an article id so it stays a single path segment.
const ID_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b'\\')
    .add(b'?')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b';')
    .add(b'=');

fn encode_id(id: &str) -> String {
    utf8_percent_encode(id, ID_ENCODE_SET).to_string()
}

/// Fetches the catalog's static JSON files over HTTP(S).
///
/// `base_url` is the directory holding `articles-index.json`; a trailing slash is added
/// when missing so relative joins stay inside it.
#[derive(Clone, Debug)]
pub struct HttpSource {
    http: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(http: Client, base_url: &str) -> Result<Self, SourceError> {
        let mut base_url = Url::parse(base_url)?;

        match base_url.scheme() {
            "http" | "https" => {}
            _ => return Err(SourceError::InvalidScheme),
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    /// Build a client with the configured timeouts and point it at the configured base URL.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Self::new(http, &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn index_url(&self) -> Result<Url, SourceError> {
        Ok(self.base_url.join(INDEX_FILE)?)
    }

    fn content_url(&self, id: &str) -> Result<Url, SourceError> {
        if id.trim().is_empty() {
            return Err(SourceError::InvalidId(id.to_string()));
        }
        Ok(self
            .base_url
            .join(&format!("{CONTENT_DIR}/{}.json", encode_id(id)))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        let body = download(&self.http, url.as_str()).await?;
        debug!(url = %url, bytes = body.len(), "catalog file fetched");
        Ok(serde_json::from_slice(&body)?)
    }
}

impl ArticleSource for HttpSource {
    async fn fetch_index(&self) -> Result<ArticlesIndex, SourceError> {
        let url = self.index_url()?;
        self.get_json(url).await
    }

    async fn fetch_content(&self, id: &str) -> Result<ArticleFullContent, SourceError> {
        let url = self.content_url(id)?;
        self.get_json(url).await
    }
}

async fn download(client: &Client, url: &str) -> Result<Vec<u8>, SourceError> {
    let response = client
        .get(url)
        .header("User-Agent", crate::USER_AGENT)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }

    if let Some(len) = response.content_length()
        && len as usize > MAX_RESPONSE_BYTES
    {
        return Err(SourceError::TooLarge);
    }

    let mut body = Vec::new();
    let mut stream = response;
    while let Some(chunk) = stream.chunk().await? {
        body.extend_from_slice(&chunk);
        if body.len() > MAX_RESPONSE_BYTES {
            return Err(SourceError::TooLarge);
        }
    }
    Ok(body)
}
