use clap::Parser;
use category_resolver::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(args) => cli::resolve::run(cli.catalog, args).await,
        Command::Tokens => cli::tokens::run(cli.catalog).await,
        Command::Normalize(args) => cli::normalize::run(args),
    }
}
