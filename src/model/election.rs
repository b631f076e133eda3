use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One electoral unit (a municipal council).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub code: String,
    pub name: String,
    #[serde(rename = "councilorSeats")]
    pub councilor_seats: u32,
    #[serde(rename = "isFinal")]
    pub is_final: bool,
    pub timestamp: NaiveDateTime,
}

/// Participation counts for a municipality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Turnout {
    #[serde(rename = "submittedEnvelopes")]
    pub submitted_envelopes: u64,
    #[serde(rename = "validVotes")]
    pub valid_votes: u64,
    #[serde(rename = "totalPollingDivisions")]
    pub total_polling_divisions: u32,
    #[serde(rename = "processedPollingDivisions")]
    pub processed_polling_divisions: u32,
}

impl Turnout {
    /// Whether at least one polling division has reported.
    pub fn has_results(&self) -> bool {
        self.processed_polling_divisions > 0
    }
}

/// A competing party list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Ballot position; the identity used to join results back to parties.
    pub order: u32,
    pub name: String,
    pub votes: u64,
    #[serde(rename = "candidateCount")]
    pub candidate_count: u32,
    /// Seats as published by the source. Informational only.
    #[serde(rename = "reportedSeats")]
    pub reported_seats: u32,
}

impl Party {
    pub fn new(order: u32, name: impl Into<String>, votes: u64, candidate_count: u32) -> Party {
        Party {
            order,
            name: name.into(),
            votes,
            candidate_count,
            reported_seats: 0,
        }
    }
}

/// Everything parsed out of a single results statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub municipality: Municipality,
    pub turnout: Turnout,
    pub parties: Vec<Party>,
}
