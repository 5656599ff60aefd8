//! Page sampling plans.

use stargauge_types::PAGE_SIZE;

/// Hard cap on pages requested for one repository in partial mode.
pub const MAX_SAMPLED_PAGES: u32 = 100;

/// Pages taken from the start of history in partial mode (early growth shape).
pub const HEAD_PAGES: u32 = 30;

/// Pages taken from the end of history in partial mode (current velocity).
pub const TAIL_PAGES: u32 = 70;

/// Decides which page numbers to request for a collection of `total_items`.
///
/// Small collections (and explicit full scans) fetch every page. Large
/// collections fetch the first [`HEAD_PAGES`] and last [`TAIL_PAGES`] pages,
/// capturing both ends of the star history while bounding the request count
/// at [`MAX_SAMPLED_PAGES`] no matter how large the repository is. The days
/// covered by neither end read as zero in the daily series; the completeness
/// correction reconciles the cumulative curve afterwards.
///
/// The returned list is strictly increasing, duplicate-free, and every entry
/// is a valid page number in `[1, total_pages]`.
#[must_use]
pub fn plan_pages(total_items: u64, full_scan: bool) -> Vec<u32> {
    let total_pages = total_items.div_ceil(u64::from(PAGE_SIZE)) as u32;

    if total_pages == 0 {
        return Vec::new();
    }

    if full_scan || total_pages <= MAX_SAMPLED_PAGES {
        return (1..=total_pages).collect();
    }

    let tail_start = total_pages - (TAIL_PAGES - 1);
    let mut pages: Vec<u32> = (1..=HEAD_PAGES).collect();
    // tail_start > HEAD_PAGES whenever total_pages > MAX_SAMPLED_PAGES, but
    // filter anyway so the no-duplicates guarantee never rests on arithmetic
    pages.extend((tail_start..=total_pages).filter(|&p| p > HEAD_PAGES));
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_has_no_plan() {
        assert!(plan_pages(0, false).is_empty());
        assert!(plan_pages(0, true).is_empty());
    }

    #[test]
    fn test_small_collection_fetches_everything() {
        // 5000 items -> 50 pages, under the cap
        let plan = plan_pages(5000, false);
        assert_eq!(plan, (1..=50).collect::<Vec<u32>>());
    }

    #[test]
    fn test_partial_page_rounds_up() {
        assert_eq!(plan_pages(1, false), vec![1]);
        assert_eq!(plan_pages(101, false), vec![1, 2]);
        assert_eq!(plan_pages(200, false), vec![1, 2]);
    }

    #[test]
    fn test_exactly_at_cap_fetches_everything() {
        let plan = plan_pages(10_000, false);
        assert_eq!(plan.len(), 100);
        assert_eq!(plan.first(), Some(&1));
        assert_eq!(plan.last(), Some(&100));
    }

    #[test]
    fn test_large_collection_samples_head_and_tail() {
        // 25_000 items -> 250 pages
        let plan = plan_pages(25_000, false);

        assert_eq!(plan.len(), 100);
        assert_eq!(&plan[..30], &(1..=30).collect::<Vec<u32>>()[..]);
        assert_eq!(&plan[30..], &(181..=250).collect::<Vec<u32>>()[..]);
    }

    #[test]
    fn test_full_scan_overrides_sampling() {
        let plan = plan_pages(25_000, true);
        assert_eq!(plan.len(), 250);
        assert_eq!(plan, (1..=250).collect::<Vec<u32>>());
    }

    #[test]
    fn test_plan_invariants_hold_across_sizes() {
        for total_items in [1u64, 99, 100, 9_999, 10_001, 50_000, 2_000_000] {
            let plan = plan_pages(total_items, false);
            let total_pages = total_items.div_ceil(100) as u32;

            assert!(plan.len() <= 100, "plan too large for {total_items}");
            for pair in plan.windows(2) {
                assert!(pair[0] < pair[1], "not strictly increasing");
            }
            assert!(plan.iter().all(|&p| p >= 1 && p <= total_pages));
        }
    }
}
