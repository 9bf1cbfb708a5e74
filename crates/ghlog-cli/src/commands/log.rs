//! The activity log command.

use std::io::Write;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use ghlog_api::Client;
use ghlog_core::{ActivityQuery, EventFilter};

use crate::commands::util::{dedup_list, parse_target_date};
use crate::source::GithubSource;
use crate::{Cli, Config};

/// Settings for one run, merged from flags and configuration.
#[derive(Debug)]
pub struct LogOptions {
    pub user: Option<String>,
    pub day: NaiveDate,
    pub orgs: Vec<String>,
    pub events: Vec<String>,
}

impl LogOptions {
    /// Flags win over configuration. `today` anchors relative dates.
    pub fn resolve(cli: &Cli, config: &Config, today: NaiveDate) -> Result<Self> {
        let day = match cli.date.as_deref() {
            Some(date) => parse_target_date(date, today)?,
            None => today,
        };
        let orgs = if cli.orgs.is_empty() {
            &config.orgs
        } else {
            &cli.orgs
        };
        let events = if cli.events.is_empty() {
            &config.events
        } else {
            &cli.events
        };
        Ok(Self {
            user: cli.user.clone(),
            day,
            orgs: dedup_list(orgs),
            events: dedup_list(events),
        })
    }
}

/// Picks the token from the flag, else from configuration.
pub fn resolve_token<'a>(cli: &'a Cli, config: &'a Config) -> Result<&'a str> {
    cli.token
        .as_deref()
        .or(config.token.as_deref())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| anyhow!("missing GitHub token (pass --token, or set GHLOG_TOKEN or GITHUB_TOKEN)"))
}

/// Runs the log command, writing one line per event.
pub fn run<W: Write>(writer: &mut W, cli: &Cli, config: &Config) -> Result<()> {
    let token = resolve_token(cli, config)?;
    let options = LogOptions::resolve(cli, config, Local::now().date_naive())?;
    tracing::debug!(?options, "resolved options");

    let client = Client::new(token)
        .context("failed to create GitHub client")?
        .with_base_url(config.api_url.as_str())
        .with_per_page(config.per_page);
    let source = GithubSource::new(client)?;
    let identity = source
        .resolve_identity()
        .context("failed to resolve GitHub identity")?;

    let user = options.user.unwrap_or_else(|| identity.login.clone());
    let mut query = ActivityQuery::new(identity, user, options.day, Local);
    query.orgs = options.orgs;
    query.filter = EventFilter::new(&options.events);
    query.max_pages = config.max_pages;

    let lines = query
        .render(&source)
        .context("failed to build activity log")?;
    for line in lines {
        writeln!(writer, "{line}")?;
    }

    Ok(())
}
