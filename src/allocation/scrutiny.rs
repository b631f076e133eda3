use super::options::ScrutinyRules;
use super::{AllocationError, Result};
use crate::model::election::Party;

/// Parties admitted to seat distribution and the threshold that admitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrutiny<'a> {
    pub threshold_pct: i32,
    pub qualified: Vec<&'a Party>,
}

/// Vote share of `party` relative to the votes its list size entitles it to.
///
/// A list that fields fewer candidates than there are seats is measured
/// against a proportionally smaller base.
pub fn party_ratio(party: &Party, valid_votes: u64, councilor_seats: u32) -> f64 {
    if party.votes == 0 || councilor_seats == 0 {
        return 0.0;
    }

    let eligible_seats = councilor_seats.min(party.candidate_count);
    let base = valid_votes as f64 / councilor_seats as f64 * eligible_seats as f64;
    if base == 0.0 {
        return 0.0;
    }

    party.votes as f64 / base * 100.0
}

/// Parties whose ratio reaches `threshold_pct`, in input order.
pub fn qualifying(
    parties: &[Party],
    valid_votes: u64,
    councilor_seats: u32,
    threshold_pct: i32,
) -> Vec<&Party> {
    parties
        .iter()
        .filter(|party| party_ratio(party, valid_votes, councilor_seats) >= threshold_pct as f64)
        .collect()
}

/// Lower the threshold one percent at a time until enough parties clear it.
///
/// Every round re-scans the full party list.
pub fn scrutinize<'a>(
    parties: &'a [Party],
    valid_votes: u64,
    councilor_seats: u32,
    rules: &ScrutinyRules,
) -> Result<Scrutiny<'a>> {
    if parties.is_empty() {
        return Err(AllocationError::EmptyPartySet);
    }

    let mut threshold_pct = rules.initial_threshold_pct;
    for _ in 0..rules.max_rounds() {
        let qualified = qualifying(parties, valid_votes, councilor_seats, threshold_pct);
        if qualified.len() >= rules.min_qualified_parties {
            return Ok(Scrutiny {
                threshold_pct,
                qualified,
            });
        }
        threshold_pct -= 1;
    }

    Err(AllocationError::ThresholdExhausted {
        floor: rules.threshold_floor_pct,
        required: rules.min_qualified_parties,
    })
}
