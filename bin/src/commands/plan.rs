//! Plan command implementation.

use anyhow::Result;
use stargauge_lib::prelude::*;

use crate::display::format_page_ranges;

/// Print the page plan for a hypothetical star count.
pub(crate) fn plan(stars: u64, full_scan: bool) -> Result<()> {
    let pages = plan_pages(stars, full_scan);
    let total_pages = stars.div_ceil(u64::from(PAGE_SIZE));

    println!("Stars:         {stars}");
    println!("Total pages:   {total_pages}");
    println!("Planned pages: {}", pages.len());
    if !pages.is_empty() {
        println!("Pages:         {}", format_page_ranges(&pages));
    }
    if !full_scan && (pages.len() as u64) < total_pages {
        println!("Mode:          sampled (head + tail); middle pages are skipped");
    } else {
        println!("Mode:          full scan");
    }

    Ok(())
}
