use super::{MunicipalityInfo, MunicipalityReport, PartyResult, ReportResult};
use crate::allocation::{allocate, Allocation, ScrutinyRules};
use crate::formats::cz_volby::read_statement;
use crate::model::election::Statement;
use itertools::Itertools;
use sha1::{Digest, Sha1};

/// Parse a raw statement, allocate its seats and assemble the report.
pub fn generate_municipality_report(
    raw_statement: &str,
    rules: &ScrutinyRules,
) -> ReportResult<MunicipalityReport> {
    let statement = read_statement(raw_statement)?;
    let allocation = allocate(
        &statement.municipality,
        &statement.turnout,
        &statement.parties,
        rules,
    )?;

    log::debug!(
        "Allocation for {} ({}): {:?}",
        statement.municipality.name,
        statement.municipality.code,
        allocation
    );

    Ok(build_report(
        statement,
        &allocation,
        format!("{:x}", Sha1::digest(raw_statement.as_bytes())),
    ))
}

/// Combine parsed records with their allocation. Parties are listed by
/// computed seats, most first; equal counts keep ballot order.
pub fn build_report(
    statement: Statement,
    allocation: &Allocation,
    statement_sha1: String,
) -> MunicipalityReport {
    let computed = allocation.computed();

    let parties = statement
        .parties
        .into_iter()
        .map(|party| PartyResult {
            qualified: computed.map_or(false, |seats| seats.qualified.contains(&party.order)),
            computed_seats: allocation.seats_for(party.order),
            order: party.order,
            name: party.name,
            votes: party.votes,
            candidate_count: party.candidate_count,
            reported_seats: party.reported_seats,
        })
        .sorted_by(|a, b| b.computed_seats.cmp(&a.computed_seats))
        .collect();

    let municipality = statement.municipality;
    MunicipalityReport {
        info: MunicipalityInfo {
            code: municipality.code,
            name: municipality.name,
            timestamp: municipality.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            is_final: municipality.is_final,
            councilor_seats: municipality.councilor_seats,
        },
        turnout: statement.turnout,
        computed: allocation.is_computed(),
        threshold_pct: computed.map(|seats| seats.threshold_pct),
        lowest_winning_quotient: computed.and_then(|seats| seats.lowest_winning_quotient),
        parties,
        statement_sha1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportError;

    fn statement(processed: u32) -> String {
        format!(
            r#"<VYSLEDKY_OBEC xmlns="http://www.volby.cz/kv/" DATUM_CAS_GENEROVANI="2022-09-24T16:05:00">
  <OBEC KODZASTUP="545970" NAZEVZAST="Testov" VOLENO_ZASTUP="9" JE_SPOCTENO="true">
    <VYSLEDEK>
      <UCAST OKRSKY_CELKEM="3" OKRSKY_ZPRAC="{}" ODEVZDANE_OBALKY="120" PLATNE_HLASY="1000"/>
      <VOLEBNI_STRANA POR_STR_HLAS_LIST="3" NAZEV_STRANY="C" HLASY="50" KANDIDATU_POCET="3" ZASTUPITELE_POCET="0"/>
      <VOLEBNI_STRANA POR_STR_HLAS_LIST="2" NAZEV_STRANY="B" HLASY="300" KANDIDATU_POCET="9" ZASTUPITELE_POCET="3"/>
      <VOLEBNI_STRANA POR_STR_HLAS_LIST="1" NAZEV_STRANY="A" HLASY="500" KANDIDATU_POCET="9" ZASTUPITELE_POCET="6"/>
    </VYSLEDEK>
  </OBEC>
</VYSLEDKY_OBEC>"#,
            processed
        )
    }

    #[test]
    fn orders_parties_by_computed_seats() {
        let report =
            generate_municipality_report(&statement(3), &ScrutinyRules::default()).unwrap();

        assert!(report.computed);
        assert_eq!(report.threshold_pct, Some(5));
        let rows: Vec<(u32, Option<u32>)> = report
            .parties
            .iter()
            .map(|p| (p.order, p.computed_seats))
            .collect();
        assert_eq!(rows, vec![(1, Some(6)), (2, Some(3)), (3, Some(0))]);
        assert!(report.party(3).unwrap().qualified);
        assert_eq!(report.statement_sha1.len(), 40);
    }

    #[test]
    fn skipped_allocation_keeps_ballot_listing() {
        let report =
            generate_municipality_report(&statement(0), &ScrutinyRules::default()).unwrap();

        assert!(!report.computed);
        assert_eq!(report.threshold_pct, None);
        let orders: Vec<u32> = report.parties.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![3, 2, 1]);
        assert!(report.parties.iter().all(|p| p.computed_seats.is_none() && !p.qualified));
    }

    #[test]
    fn same_document_gives_same_report() {
        let first = generate_municipality_report(&statement(2), &ScrutinyRules::default())
            .unwrap()
            .to_json()
            .unwrap();
        let second = generate_municipality_report(&statement(2), &ScrutinyRules::default())
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn surfaces_allocation_errors() {
        let xml = statement(3).replace(r#"VOLENO_ZASTUP="9""#, r#"VOLENO_ZASTUP="0""#);
        let err = generate_municipality_report(&xml, &ScrutinyRules::default()).unwrap_err();
        assert!(matches!(err, ReportError::Allocation(_)));
    }
}
