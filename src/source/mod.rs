//! Retrieval of statements and result batches from volby.cz.

use instant::Instant;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://volby.cz";
pub const DEFAULT_MUNICIPALITY: &str = "562394";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Which municipal election to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Election {
    Kv2022,
    Kv2018,
}

impl Election {
    pub fn from_previous_flag(previous: bool) -> Election {
        if previous {
            Election::Kv2018
        } else {
            Election::Kv2022
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Election::Kv2022 => "kv2022",
            Election::Kv2018 => "kv2018",
        }
    }

    /// Election day query value; only needed for archived elections.
    fn date(&self) -> Option<&'static str> {
        match self {
            Election::Kv2022 => None,
            Election::Kv2018 => Some("20181005"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub election: Election,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            election: Election::Kv2022,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SourceConfig {
    fn endpoint(&self, report: &str, params: &[(&str, String)]) -> String {
        let mut query: Vec<String> = Vec::new();
        if let Some(date) = self.election.date() {
            query.push(format!("datumvoleb={}", date));
        }
        query.extend(params.iter().map(|(k, v)| format!("{}={}", k, v)));

        format!(
            "{}/pls/{}/{}?{}",
            self.base_url.trim_end_matches('/'),
            self.election.path(),
            report,
            query.join("&")
        )
    }

    pub fn statement_url(&self, municipality: &str) -> String {
        self.endpoint("vysledky_obec", &[("cislo_obce", municipality.to_string())])
    }

    /// Batch 0 addresses the batch index.
    pub fn batch_url(&self, batch: u32) -> String {
        let id = if batch == 0 {
            String::new()
        } else {
            batch.to_string()
        };
        self.endpoint("vysledky_okrsky", &[("davka", id)])
    }
}

/// Whether `code` has the six-digit shape of a municipality code.
pub fn is_municipality_code(code: &str) -> bool {
    lazy_static! {
        static ref CODE_RX: Regex = Regex::new(r"^\d{6}$").unwrap();
    }
    CODE_RX.is_match(code)
}

pub struct StatementClient {
    client: reqwest::Client,
    config: SourceConfig,
}

impl StatementClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        log::debug!(
            "GET {} returned {} bytes in {} ms",
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    /// Download the results statement of one municipality.
    pub async fn download_statement(&self, municipality: &str) -> Result<String> {
        self.get_text(&self.config.statement_url(municipality)).await
    }

    pub async fn download_batch(&self, batch: u32) -> Result<String> {
        self.get_text(&self.config.batch_url(batch)).await
    }
}

/// Read a statement saved to disk.
pub fn read_statement_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })
}
