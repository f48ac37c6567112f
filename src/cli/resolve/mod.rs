//! Resolve command - resolves labels against the configured catalog

use clap::Args;
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::category::CategoryMatch;

use super::CatalogArgs;

/// Arguments for the resolve command
#[derive(Args, Clone)]
pub struct ResolveArgs {
    /// Labels to resolve
    #[arg(required = true)]
    pub labels: Vec<String>,

    /// Print one JSON object per label
    #[arg(long)]
    pub json: bool,
}

/// Run the resolve command
pub async fn run(catalog: CatalogArgs, args: ResolveArgs) -> anyhow::Result<()> {
    let config = super::bootstrap(&catalog);
    let resolver = crate::create_resolver(&config).await?;

    let mut failures = 0;

    for label in &args.labels {
        let outcome = split_fatal(resolver.resolve(label).await)?;

        if outcome.is_err() {
            failures += 1;
        }

        if args.json {
            println!("{}", format_json(label, &outcome));
        } else {
            println!("{}", format_outcome(label, &outcome));
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} labels could not be resolved", failures, args.labels.len());
    }

    Ok(())
}

/// Separate errors that abort the run from per-label resolution failures
fn split_fatal(
    outcome: Result<CategoryMatch, DomainError>,
) -> Result<Result<CategoryMatch, DomainError>, DomainError> {
    match outcome {
        Err(e) if !e.is_resolution_failure() => Err(e),
        outcome => Ok(outcome),
    }
}

fn format_outcome(label: &str, outcome: &Result<CategoryMatch, DomainError>) -> String {
    match outcome {
        Ok(m) => format!("{} -> {} ({})", label, m.id, m.kind),
        Err(e) => format!("{} -> error: {}", label, e),
    }
}

fn format_json(label: &str, outcome: &Result<CategoryMatch, DomainError>) -> serde_json::Value {
    match outcome {
        Ok(m) => json!({ "label": label, "match": m }),
        Err(e) => json!({ "label": label, "error": e.to_string() }),
    }
}
