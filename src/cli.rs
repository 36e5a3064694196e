use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-reviewr",
    about = "Open license review requests in a GitLab tracker from aggregated license data",
    version
)]
pub struct Cli {
    /// JSON summary of content items needing review
    pub input: PathBuf,

    /// Config file [default: ./.license-reviewr/config.toml, fallback ~/.config/license-reviewr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project the content belongs to (overrides the config file)
    #[arg(long)]
    pub project: Option<String>,

    /// Render the review documents without contacting the tracker
    #[arg(long)]
    pub dry_run: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}
