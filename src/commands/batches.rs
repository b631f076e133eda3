use colored::Colorize;
use council_mandates::formats::cz_volby::{batch_mentions, read_batch_count};
use council_mandates::reports::ReportResult;
use council_mandates::source::{SourceConfig, StatementClient};

/// Walk all published result batches and list the ones covering `municipality`.
pub async fn batches(municipality: &str, source: SourceConfig) -> ReportResult<Vec<u32>> {
    let client = StatementClient::new(source)?;

    let index = client.download_batch(0).await?;
    let batch_max = read_batch_count(&index)?;
    println!(
        "📋 {} batches published",
        batch_max.to_string().bright_yellow()
    );

    let mut found = Vec::new();
    for batch in 1..=batch_max {
        eprintln!("Downloading batch id={}...", batch);
        let xml = client.download_batch(batch).await?;
        if batch_mentions(&xml, municipality)? {
            println!("  📦 Found {} in batch {}", municipality.cyan(), batch);
            found.push(batch);
        }
    }

    println!(
        "✅ Amount of batches with {}: {}",
        municipality.cyan(),
        found.len().to_string().bright_green()
    );
    Ok(found)
}
