use crate::allocation::AllocationError;
use crate::formats::cz_volby::StatementError;
use crate::model::election::Turnout;
use crate::source::SourceError;
use serde::{Deserialize, Serialize};

pub mod generator;
pub mod table;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Statement error: {0}")]
    Statement(#[from] StatementError),
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Computed mandates for one municipality, as printed or emitted as JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct MunicipalityReport {
    pub info: MunicipalityInfo,
    pub turnout: Turnout,
    /// False when no polling division had reported and nothing was computed.
    pub computed: bool,
    #[serde(rename = "thresholdPct")]
    pub threshold_pct: Option<i32>,
    #[serde(rename = "lowestWinningQuotient")]
    pub lowest_winning_quotient: Option<f64>,
    pub parties: Vec<PartyResult>,
    #[serde(rename = "statementSha1")]
    pub statement_sha1: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MunicipalityInfo {
    pub code: String,
    pub name: String,
    pub timestamp: String,
    #[serde(rename = "isFinal")]
    pub is_final: bool,
    #[serde(rename = "councilorSeats")]
    pub councilor_seats: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PartyResult {
    pub order: u32,
    pub name: String,
    pub votes: u64,
    #[serde(rename = "candidateCount")]
    pub candidate_count: u32,
    pub qualified: bool,
    #[serde(rename = "computedSeats")]
    pub computed_seats: Option<u32>,
    #[serde(rename = "reportedSeats")]
    pub reported_seats: u32,
}

impl MunicipalityReport {
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn party(&self, order: u32) -> Option<&PartyResult> {
        self.parties.iter().find(|party| party.order == order)
    }
}
