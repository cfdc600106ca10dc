use anyhow::{Result, bail};

use crate::view::Filters;

pub const USAGE: &str = "\
Usage: repodash [--url URL] [COMMAND]

Commands:
  (none)          Open the dashboard
  snapshot        Print the filtered repository table once
  update          Ask the backend to refresh its repository data
  config path     Print the config file location

Snapshot options:
  --filter TEXT   Match TEXT against name or owner
  --hide-archived Skip archived repositories
  --issues        Only repositories with open issues
  --no-issues     Include repositories without open issues
  --prs           Only repositories with open pull requests

Options:
  --url URL       Backend base URL (overrides config and REPODASH_URL)
  -h, --help      Show this help
  -V, --version   Show version";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub url: Option<String>,
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Dashboard,
    Snapshot(SnapshotOptions),
    Update,
    ConfigPath,
    Help,
    Version,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub filter_text: Option<String>,
    pub hide_archived: bool,
    pub require_open_issues: Option<bool>,
    pub require_open_prs: bool,
}

impl SnapshotOptions {
    /// Layers the command-line flags over the configured defaults.
    pub fn apply(&self, base: &Filters) -> Filters {
        let mut filters = base.clone();
        if let Some(text) = &self.filter_text {
            filters.filter_text = text.clone();
        }
        if self.hide_archived {
            filters.hide_archived = true;
        }
        if let Some(require) = self.require_open_issues {
            filters.require_open_issues = require;
        }
        if self.require_open_prs {
            filters.require_open_prs = true;
        }
        filters
    }
}

pub fn parse_args(args: &[String]) -> Result<Cli> {
    let mut url = None;
    let mut positional = Vec::new();
    let mut snapshot = SnapshotOptions::default();
    let mut snapshot_flags = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Cli { url, command: CliCommand::Help }),
            "-V" | "--version" => return Ok(Cli { url, command: CliCommand::Version }),
            "--url" => match iter.next() {
                Some(value) => url = Some(value.clone()),
                None => bail!("--url needs a value"),
            },
            "--filter" => match iter.next() {
                Some(value) => {
                    snapshot.filter_text = Some(value.clone());
                    snapshot_flags = true;
                }
                None => bail!("--filter needs a value"),
            },
            "--hide-archived" => {
                snapshot.hide_archived = true;
                snapshot_flags = true;
            }
            "--issues" => {
                snapshot.require_open_issues = Some(true);
                snapshot_flags = true;
            }
            "--no-issues" => {
                snapshot.require_open_issues = Some(false);
                snapshot_flags = true;
            }
            "--prs" => {
                snapshot.require_open_prs = true;
                snapshot_flags = true;
            }
            value if value.starts_with('-') => bail!("Unknown option: {}\n\n{}", value, USAGE),
            value => positional.push(value),
        }
    }

    let command = match positional.as_slice() {
        [] => CliCommand::Dashboard,
        ["snapshot"] => CliCommand::Snapshot(snapshot),
        ["update"] => CliCommand::Update,
        ["config", "path"] => CliCommand::ConfigPath,
        _ => bail!("Unknown command: {}\n\n{}", positional.join(" "), USAGE),
    };

    if snapshot_flags && !matches!(command, CliCommand::Snapshot(_)) {
        bail!("Filter options only apply to `snapshot`\n\n{}", USAGE);
    }

    Ok(Cli { url, command })
}
