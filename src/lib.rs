//! `license-reviewr` — turn aggregated license data into review requests on
//! a GitLab issue tracker.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load settings ([`config::load_config`]).
//! 3. Read the JSON summary of items needing review ([`models::ReviewItem`]).
//! 4. For each item, render a review document ([`review::DocumentBuilder`])
//!    enriched from the npm registry and Maven Central ([`registry`]).
//! 5. Deduplicate against open issues and create new ones, capped per run
//!    ([`review::Submitter`], [`tracker`]).
//! 6. Render the batch report ([`report`]).
//! 7. Exit `0` (clean) or `1` (the batch halted on a tracker failure).

pub mod cli;
pub mod config;
pub mod models;
pub mod registry;
pub mod report;
pub mod review;
pub mod tracker;
