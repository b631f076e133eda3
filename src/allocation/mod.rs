//! Council seat allocation by the highest-averages (D'Hondt) method.
//!
//! Parties first pass a scrutiny step that admits lists reaching a minimum
//! vote share. Each admitted list then claims `votes / i` for every candidate
//! `i` it fielded, and the council seats go to the highest claims.
//!
//! Everything here is a pure function of its inputs.

use crate::model::election::{Municipality, Party, Turnout};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod options;
pub mod quotients;
pub mod scrutiny;

pub use options::ScrutinyRules;
pub use quotients::{generate_quotients, rank_quotients, truncate, Quotient};
pub use scrutiny::{scrutinize, Scrutiny};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error("Municipality {0} has no council seats to fill")]
    InvalidMunicipalityConfiguration(String),
    #[error("No parties to allocate seats to")]
    EmptyPartySet,
    #[error("Fewer than {required} parties qualified before the threshold reached {floor}%")]
    ThresholdExhausted { floor: i32, required: usize },
}

pub type Result<T> = std::result::Result<T, AllocationError>;

/// Outcome of an allocation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Allocation {
    /// No polling division has reported yet, so nothing was computed.
    Skipped,
    Computed(SeatAllocation),
}

impl Allocation {
    pub fn is_computed(&self) -> bool {
        matches!(self, Allocation::Computed(_))
    }

    pub fn computed(&self) -> Option<&SeatAllocation> {
        match self {
            Allocation::Computed(seats) => Some(seats),
            Allocation::Skipped => None,
        }
    }

    /// Seats computed for the party with ballot position `order`, if
    /// allocation ran.
    pub fn seats_for(&self, order: u32) -> Option<u32> {
        self.computed().map(|seats| seats.seats_for(order))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatAllocation {
    #[serde(rename = "thresholdPct")]
    pub threshold_pct: i32,
    /// Ballot positions of the parties admitted by scrutiny.
    pub qualified: Vec<u32>,
    /// Seats per ballot position. Contains every input party.
    pub seats: BTreeMap<u32, u32>,
    #[serde(rename = "lowestWinningQuotient")]
    pub lowest_winning_quotient: Option<f64>,
}

impl SeatAllocation {
    pub fn seats_for(&self, order: u32) -> u32 {
        self.seats.get(&order).copied().unwrap_or(0)
    }

    pub fn total_seats(&self) -> u32 {
        self.seats.values().sum()
    }
}

/// Count the top `councilor_seats` ranked quotients per party.
pub fn assign_seats(
    ranked: &[Quotient],
    parties: &[Party],
    councilor_seats: u32,
) -> BTreeMap<u32, u32> {
    let winners = &ranked[..ranked.len().min(councilor_seats as usize)];

    let mut seats: BTreeMap<u32, u32> = parties.iter().map(|party| (party.order, 0)).collect();
    for quotient in winners {
        *seats.entry(quotient.party).or_insert(0) += 1;
    }
    seats
}

/// Allocate the council seats of `municipality` among `parties`.
pub fn allocate(
    municipality: &Municipality,
    turnout: &Turnout,
    parties: &[Party],
    rules: &ScrutinyRules,
) -> Result<Allocation> {
    if municipality.councilor_seats == 0 {
        return Err(AllocationError::InvalidMunicipalityConfiguration(
            municipality.code.clone(),
        ));
    }
    if parties.is_empty() {
        return Err(AllocationError::EmptyPartySet);
    }
    if !turnout.has_results() {
        return Ok(Allocation::Skipped);
    }

    let scrutiny = scrutinize(
        parties,
        turnout.valid_votes,
        municipality.councilor_seats,
        rules,
    )?;
    let ranked = rank_quotients(generate_quotients(&scrutiny.qualified));
    let seats = assign_seats(&ranked, parties, municipality.councilor_seats);

    let winning = ranked.len().min(municipality.councilor_seats as usize);
    let lowest_winning_quotient = winning
        .checked_sub(1)
        .and_then(|last| ranked.get(last))
        .map(|quotient| quotient.value);

    Ok(Allocation::Computed(SeatAllocation {
        threshold_pct: scrutiny.threshold_pct,
        qualified: scrutiny.qualified.iter().map(|party| party.order).collect(),
        seats,
        lowest_winning_quotient,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn municipality(seats: u32) -> Municipality {
        Municipality {
            code: "562394".to_string(),
            name: "Český Krumlov".to_string(),
            councilor_seats: seats,
            is_final: true,
            timestamp: NaiveDate::from_ymd_opt(2022, 9, 24)
                .unwrap()
                .and_hms_opt(16, 30, 0)
                .unwrap(),
        }
    }

    fn turnout(valid_votes: u64, processed: u32) -> Turnout {
        Turnout {
            submitted_envelopes: valid_votes / 9,
            valid_votes,
            total_polling_divisions: 12,
            processed_polling_divisions: processed,
        }
    }

    fn three_parties() -> Vec<Party> {
        vec![
            Party::new(1, "A", 500, 9),
            Party::new(2, "B", 300, 9),
            Party::new(3, "C", 50, 3),
        ]
    }

    #[test]
    fn allocates_highest_quotients() {
        let allocation = allocate(
            &municipality(9),
            &turnout(1000, 12),
            &three_parties(),
            &ScrutinyRules::default(),
        )
        .unwrap();

        let seats = allocation.computed().unwrap();
        assert_eq!(seats.threshold_pct, 5);
        assert_eq!(seats.qualified, vec![1, 2, 3]);
        assert_eq!(seats.seats_for(1), 6);
        assert_eq!(seats.seats_for(2), 3);
        assert_eq!(seats.seats_for(3), 0);
        assert_eq!(seats.total_seats(), 9);
        assert_eq!(seats.lowest_winning_quotient, Some(83.33));
    }

    #[test]
    fn skips_when_no_division_reported() {
        let allocation = allocate(
            &municipality(9),
            &turnout(1000, 0),
            &three_parties(),
            &ScrutinyRules::default(),
        )
        .unwrap();

        assert_eq!(allocation, Allocation::Skipped);
        assert_eq!(allocation.seats_for(1), None);
    }

    #[test]
    fn skipped_differs_from_zero_seats() {
        let parties = vec![Party::new(1, "A", 10, 0), Party::new(2, "B", 10, 0)];
        let allocation = allocate(
            &municipality(5),
            &turnout(20, 1),
            &parties,
            &ScrutinyRules::default(),
        )
        .unwrap();

        assert!(allocation.is_computed());
        assert_eq!(allocation.seats_for(1), Some(0));
        assert_eq!(allocation.seats_for(2), Some(0));
    }

    #[test]
    fn short_lists_leave_seats_empty() {
        let parties = vec![Party::new(1, "A", 600, 2), Party::new(2, "B", 400, 3)];
        let allocation = allocate(
            &municipality(9),
            &turnout(1000, 3),
            &parties,
            &ScrutinyRules::default(),
        )
        .unwrap();

        let seats = allocation.computed().unwrap();
        assert_eq!(seats.seats_for(1), 2);
        assert_eq!(seats.seats_for(2), 3);
        assert_eq!(seats.total_seats(), 5);
        assert_eq!(seats.lowest_winning_quotient, Some(133.33));
    }

    #[test]
    fn excluded_parties_keep_zero_seats() {
        let parties = vec![
            Party::new(1, "Dominant", 980, 15),
            Party::new(2, "Small", 12, 15),
            Party::new(3, "Tiny", 8, 15),
        ];
        let allocation = allocate(
            &municipality(15),
            &turnout(1000, 4),
            &parties,
            &ScrutinyRules::default(),
        )
        .unwrap();

        let seats = allocation.computed().unwrap();
        assert_eq!(seats.threshold_pct, 1);
        assert_eq!(seats.qualified, vec![1, 2]);
        assert_eq!(seats.seats_for(1), 15);
        assert_eq!(seats.seats_for(3), 0);
        assert!(seats.seats.contains_key(&3));
    }

    #[test]
    fn ties_go_to_the_earlier_generated_quotient() {
        let first = vec![Party::new(7, "Seven", 100, 1), Party::new(3, "Three", 100, 1)];
        let allocation = allocate(
            &municipality(1),
            &turnout(200, 1),
            &first,
            &ScrutinyRules::default(),
        )
        .unwrap();
        assert_eq!(allocation.seats_for(7), Some(1));
        assert_eq!(allocation.seats_for(3), Some(0));

        let reversed: Vec<Party> = first.into_iter().rev().collect();
        let allocation = allocate(
            &municipality(1),
            &turnout(200, 1),
            &reversed,
            &ScrutinyRules::default(),
        )
        .unwrap();
        assert_eq!(allocation.seats_for(3), Some(1));
        assert_eq!(allocation.seats_for(7), Some(0));
    }

    #[test]
    fn rejects_zero_seat_municipality() {
        let err = allocate(
            &municipality(0),
            &turnout(1000, 12),
            &three_parties(),
            &ScrutinyRules::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AllocationError::InvalidMunicipalityConfiguration("562394".to_string())
        );
    }

    #[test]
    fn configuration_errors_win_over_skip() {
        let err = allocate(
            &municipality(9),
            &turnout(0, 0),
            &[],
            &ScrutinyRules::default(),
        )
        .unwrap_err();
        assert_eq!(err, AllocationError::EmptyPartySet);
    }

    #[test]
    fn assign_seats_joins_by_order() {
        let parties = vec![Party::new(20, "X", 1, 1), Party::new(10, "Y", 1, 1)];
        let ranked = vec![
            Quotient { value: 9.0, party: 10 },
            Quotient { value: 8.0, party: 10 },
            Quotient { value: 7.0, party: 20 },
        ];

        let seats = assign_seats(&ranked, &parties, 2);
        assert_eq!(seats.get(&10), Some(&2));
        assert_eq!(seats.get(&20), Some(&0));
    }
}
