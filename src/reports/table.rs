use super::MunicipalityReport;
use colored::*;

fn status_label(report: &MunicipalityReport) -> ColoredString {
    if report.info.is_final {
        "FINAL RESULTS".green().bold()
    } else {
        "INCOMPLETE RESULTS".yellow().bold()
    }
}

/// Console rendering: a short header followed by the mandates table.
pub fn render(report: &MunicipalityReport) -> String {
    let mut lines = vec![
        format!(
            "Calculated municipal elections results for {}",
            report.info.name.bright_cyan()
        ),
        format!(
            "Timestamp: {}, district parts {}/{} {}:",
            report.info.timestamp,
            report.turnout.processed_polling_divisions,
            report.turnout.total_polling_divisions,
            status_label(report)
        ),
        "=".repeat(80),
    ];

    match report.threshold_pct {
        Some(pct) => lines.push(format!(
            "Scrutiny threshold: {} %, seats: {}",
            pct.to_string().bright_yellow(),
            report.info.councilor_seats
        )),
        None => lines.push(format!(
            "{}",
            "No polling divisions processed yet, mandates not calculated".yellow()
        )),
    }

    lines.push("Mandates   M.Off.   Party".to_string());
    lines.push("--------   ------   -----".to_string());
    for party in &report.parties {
        let computed = party
            .computed_seats
            .map_or_else(|| "-".to_string(), |seats| seats.to_string());
        lines.push(format!(
            "{:>8}   {:>6}   {}",
            computed, party.reported_seats, party.name
        ));
    }

    lines.join("\n")
}

pub fn print_report(report: &MunicipalityReport) {
    println!();
    println!("{}", render(report));
    println!();
}
