//! Display utilities and output formatting for the stargauge CLI.

use anyhow::Result;
use clap::ValueEnum;
use stargauge_lib::prelude::*;

/// Output format for analytics results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
}

/// Levels used for the recent-activity sparkline.
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Prints an analytics result in the chosen format.
pub(crate) fn print_analytics(analytics: &StarAnalytics, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(analytics)?),
        Format::Table => print_table(analytics),
    }
    Ok(())
}

/// Human-readable summary of one analytics result.
fn print_table(analytics: &StarAnalytics) {
    let trends = &analytics.trends;

    println!("{}", analytics.repo);
    println!("  Stars:        {}", analytics.total_stars);
    println!(
        "  Created:      {} ({} days ago)",
        analytics.created_at.format("%Y-%m-%d"),
        analytics.age_in_days
    );
    println!("  Average:      {:.2} stars/day", analytics.avg_per_day);
    println!(
        "  Last 7 days:  {:.2} stars/day (velocity {:.2})",
        trends.avg_7d, trends.velocity
    );
    println!("  Last 30 days: {:.2} stars/day", trends.avg_30d);
    println!(
        "  Peak day:     {} ({} stars)",
        trends.peak_day.date, trends.peak_day.daily_count
    );
    println!(
        "  Trend:        {} ({:+.1}% over 30 days)",
        trends.direction, trends.growth_rate_percent
    );
    if analytics.data_completeness < 100.0 {
        println!(
            "  Completeness: {:.1}% (sampled or rate-limited fetch)",
            analytics.data_completeness
        );
    }
    println!(
        "  Recent:       {}",
        sparkline(&analytics.recent_activity)
    );
}

/// Renders daily counts as a one-line sparkline, oldest to newest.
fn sparkline(days: &[stargauge_lib::DailyBucket]) -> String {
    let max = days.iter().map(|d| d.daily_count).max().unwrap_or(0);
    if max == 0 {
        return SPARK_LEVELS[0].to_string().repeat(days.len());
    }

    days.iter()
        .map(|d| {
            let level = (d.daily_count * (SPARK_LEVELS.len() as u64 - 1)).div_ceil(max);
            SPARK_LEVELS[level as usize]
        })
        .collect()
}

/// Compresses a page plan into `a-b, c-d` range notation.
pub(crate) fn format_page_ranges(pages: &[u32]) -> String {
    let mut ranges: Vec<(u32, u32)> = Vec::new();
    for &page in pages {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == page => *end = page,
            _ => ranges.push((page, page)),
        }
    }

    ranges
        .iter()
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
