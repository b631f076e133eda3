use colored::Colorize;
use council_mandates::allocation::ScrutinyRules;
use council_mandates::reports::generator::generate_municipality_report;
use council_mandates::reports::table::print_report;
use council_mandates::reports::{MunicipalityReport, ReportResult};
use council_mandates::source::{read_statement_file, SourceConfig, StatementClient};
use std::path::PathBuf;

pub struct CalculateOptions {
    pub municipalities: Vec<String>,
    /// Statement saved on disk; replaces downloading.
    pub file: Option<PathBuf>,
    pub json: bool,
    pub source: SourceConfig,
    pub rules: ScrutinyRules,
}

pub async fn calculate(options: &CalculateOptions) -> ReportResult<()> {
    let reports = match &options.file {
        Some(file) => {
            eprintln!(
                "📄 Reading statement from {}",
                file.display().to_string().cyan()
            );
            let raw = read_statement_file(file)?;
            vec![generate_municipality_report(&raw, &options.rules)?]
        }
        None => download_and_calculate(options).await?,
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    Ok(())
}

async fn download_and_calculate(options: &CalculateOptions) -> ReportResult<Vec<MunicipalityReport>> {
    let client = StatementClient::new(options.source.clone())?;
    let mut reports = Vec::with_capacity(options.municipalities.len());

    for code in &options.municipalities {
        eprintln!(
            "🔍 Downloading statement for {} from {}",
            code.cyan(),
            client.config().base_url
        );
        let raw = client.download_statement(code).await?;

        eprintln!("📊 Calculating mandates...");
        let report = generate_municipality_report(&raw, &options.rules)?;
        if !report.computed {
            log::info!("{} has no processed polling divisions yet", code);
        }
        reports.push(report);
    }

    Ok(reports)
}
