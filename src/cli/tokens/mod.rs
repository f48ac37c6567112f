//! Tokens command - lists catalog entries and their match tokens

use super::CatalogArgs;
use crate::domain::CategoryEntry;

/// Run the tokens command
pub async fn run(catalog: CatalogArgs) -> anyhow::Result<()> {
    let config = super::bootstrap(&catalog);
    let resolver = crate::create_resolver(&config).await?;

    let snapshot = resolver.snapshot().await?;

    for entry in snapshot.entries() {
        println!("{}", format_entry(entry));
    }

    Ok(())
}

fn format_entry(entry: &CategoryEntry) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        entry.id(),
        entry.name(),
        entry.slug().unwrap_or("-"),
        entry.tokens().join(" | ")
    )
}
