use anyhow::{Context, Result};
use clap::Parser;

use license_reviewr::cli::Cli;
use license_reviewr::config::load_config;
use license_reviewr::models::ReviewItem;
use license_reviewr::registry::npm::NpmRegistry;
use license_reviewr::registry::HttpRemoteCheck;
use license_reviewr::report;
use license_reviewr::review::{DocumentBuilder, Submitter};
use license_reviewr::tracker::gitlab::GitLabTracker;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let project = cli
        .project
        .clone()
        .unwrap_or_else(|| config.review.project.clone());

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;
    let items: Vec<ReviewItem> =
        serde_json::from_str(&content).context("malformed review summary")?;

    if items.is_empty() {
        eprintln!("Nothing needs review.");
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let registry = NpmRegistry::new(client.clone());
    let remote = HttpRemoteCheck::new(client.clone());
    let builder = DocumentBuilder::new(&project, &registry, &remote);

    if cli.dry_run {
        for item in &items {
            let document = builder.build(item).await;
            println!("=== {}", document.title);
            println!("{}", document.body);
        }
        return Ok(());
    }

    // The tracker connection lives exactly as long as the batch.
    let batch = {
        let tracker = GitLabTracker::connect(client, &config.gitlab)?;
        let submitter = Submitter::new(builder, &tracker);
        let mut stdout = std::io::stdout();
        submitter.submit(&items, &mut stdout).await?
    };

    report::render(&batch, items.len(), cli.quiet);

    if batch.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
