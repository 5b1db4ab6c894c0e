use chrono::{Duration, Local};
use clap::{Args, Subcommand};
use healthlog_core::interchange::report;
use healthlog_core::{KeyValueStore, ReportStyle, Store};
use std::str::FromStr;

use super::parse_date;
use crate::config::Config;

#[derive(Args)]
pub struct ShareCommand {
    #[command(subcommand)]
    pub command: ShareSubcommand,
}

#[derive(Args)]
pub struct RangeArgs {
    /// Start date (YYYY-MM-DD), defaults to `share_days` days before --to
    #[arg(long)]
    from: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<String>,

    /// Header style, defaults to the configured `report_style`
    #[arg(long, value_parser = ReportStyle::from_str)]
    style: Option<ReportStyle>,
}

#[derive(Subcommand)]
pub enum ShareSubcommand {
    /// Medication list
    Meds {
        /// Header style, defaults to the configured `report_style`
        #[arg(long, value_parser = ReportStyle::from_str)]
        style: Option<ReportStyle>,
    },

    /// Log history for a date range
    History(RangeArgs),

    /// Medication list followed by log history
    All(RangeArgs),
}

impl ShareCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        store: &Store<S>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let text = match &self.command {
            ShareSubcommand::Meds { style } => {
                let style = resolve_style(*style, config);
                report::medication_report(&store.get_medications(), style)
            }
            ShareSubcommand::History(range) => {
                let (start, end) = resolve_range(range, config.share_days.value)?;
                let style = resolve_style(range.style, config);
                report::log_history_report(&store.get_logs(), &start, &end, style)
            }
            ShareSubcommand::All(range) => {
                let (start, end) = resolve_range(range, config.share_days.value)?;
                let style = resolve_style(range.style, config);
                report::full_report(
                    &store.get_medications(),
                    &store.get_logs(),
                    &start,
                    &end,
                    style,
                )
            }
        };

        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}

fn resolve_style(style: Option<ReportStyle>, config: &Config) -> ReportStyle {
    style.unwrap_or(config.report_style.value)
}

fn resolve_range(range: &RangeArgs, share_days: u32) -> Result<(String, String), String> {
    let end = match &range.to {
        Some(to) => parse_date(to)?,
        None => Local::now().date_naive(),
    };
    let start = match &range.from {
        Some(from) => parse_date(from)?,
        None => end
            .checked_sub_signed(Duration::days(i64::from(share_days)))
            .ok_or_else(|| format!("share_days {} reaches before the earliest date", share_days))?,
    };
    if start > end {
        return Err(format!("--from {} is after --to {}", start, end));
    }
    Ok((
        start.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(from: Option<&str>, to: Option<&str>) -> RangeArgs {
        RangeArgs {
            from: from.map(String::from),
            to: to.map(String::from),
            style: None,
        }
    }

    #[test]
    fn test_default_range_ends_at_to() {
        let (start, end) = resolve_range(&range(None, Some("2024-01-31")), 30).unwrap();
        assert_eq!(start, "2024-01-01");
        assert_eq!(end, "2024-01-31");
    }

    #[test]
    fn test_explicit_range() {
        let (start, end) =
            resolve_range(&range(Some("2024-01-05"), Some("2024-01-06")), 30).unwrap();
        assert_eq!(start, "2024-01-05");
        assert_eq!(end, "2024-01-06");
    }

    #[test]
    fn test_huge_share_days_is_an_error() {
        let err = resolve_range(&range(None, Some("2024-01-31")), u32::MAX).unwrap_err();
        assert!(err.contains("share_days"));
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(resolve_range(&range(Some("2024-02-01"), Some("2024-01-01")), 30).is_err());
        assert!(resolve_range(&range(Some("Jan 1"), None), 30).is_err());
    }
}
