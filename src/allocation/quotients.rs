use crate::model::election::Party;
use serde::{Deserialize, Serialize};

/// One claim to a seat: a party's votes divided by a seat index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quotient {
    pub value: f64,
    /// Ballot position of the claiming party.
    pub party: u32,
}

/// Truncate `value` to `digits` decimal places, always rounding down.
pub fn truncate(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).floor() / scale
}

/// Quotients `votes / i` for `i` in `1..=candidate_count` of every party,
/// party by party in the given order.
pub fn generate_quotients(parties: &[&Party]) -> Vec<Quotient> {
    parties
        .iter()
        .flat_map(|party| {
            (1..=party.candidate_count).map(move |divisor| Quotient {
                value: truncate(party.votes as f64 / divisor as f64, 2),
                party: party.order,
            })
        })
        .collect()
}

/// Highest quotient first. Equal quotients keep their generation order.
pub fn rank_quotients(mut quotients: Vec<Quotient>) -> Vec<Quotient> {
    quotients.sort_by(|a, b| b.value.total_cmp(&a.value));
    quotients
}
