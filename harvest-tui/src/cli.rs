use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "harvest-tui")]
#[command(about = "Terminal UI for recording harvest inventory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured sheets and Telegram bot
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Load one sheet and write it as an HTML report
    Report {
        /// Source name (defaults to the first configured source)
        #[arg(long)]
        source: Option<String>,
        /// Output file (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Column filter as COLUMN=TEXT, repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(usize, String)>,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

fn parse_filter(raw: &str) -> Result<(usize, String), String> {
    let (column, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=TEXT, got `{raw}`"))?;
    let column = column
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("column must be a number, got `{column}`"))?;
    Ok((column, text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["harvest-tui"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_collects_filters() {
        let cli = Cli::try_parse_from([
            "harvest-tui",
            "report",
            "--source",
            "Archive",
            "--filter",
            "0=2024-01",
            "--filter",
            "1=P45",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Report {
                source, filters, ..
            }) => {
                assert_eq!(source.as_deref(), Some("Archive"));
                assert_eq!(
                    filters,
                    vec![(0, "2024-01".to_string()), (1, "P45".to_string())]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_filter_is_rejected() {
        assert!(parse_filter("date=2024").is_err());
        assert!(parse_filter("2024").is_err());
        assert_eq!(parse_filter("3=").unwrap(), (3, String::new()));
    }
}
