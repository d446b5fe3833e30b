pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

pub fn total_pages(total_count: usize, page_size: u32) -> u32 {
    let size = page_size.max(1) as usize;
    let pages = total_count.div_ceil(size);
    (pages.max(1)) as u32
}

/// Pages are 1-based. A stale page number after a filter change clamps into
/// range instead of producing an out-of-range slice.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

pub fn slice_bounds(page: u32, page_size: u32, len: usize) -> (usize, usize) {
    let size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    (start, end)
}

/// Compact pagination-button model: first and last page always present, the
/// `current ± delta` window in between, and a single ellipsis token over any
/// gap wider than one page.
pub fn page_window(current_page: u32, total_pages: u32, delta: u32) -> Vec<PageToken> {
    let total = total_pages.max(1);
    let current = clamp_page(current_page, total);

    let window_start = current.saturating_sub(delta).max(1);
    let window_end = current.saturating_add(delta).min(total);

    let mut kept = Vec::with_capacity((window_end - window_start + 3) as usize);
    kept.push(1);
    for page in window_start..=window_end {
        if page > 1 && page < total {
            kept.push(page);
        }
    }
    if total > 1 {
        kept.push(total);
    }

    let mut tokens = Vec::with_capacity(kept.len() + 2);
    let mut previous: Option<u32> = None;
    for page in kept {
        if let Some(last) = previous {
            if page - last > 1 {
                tokens.push(PageToken::Ellipsis);
            }
        }
        tokens.push(PageToken::Page(page));
        previous = Some(page);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, page_window, slice_bounds, total_pages, PageToken};

    fn pages(tokens: &[PageToken]) -> Vec<i64> {
        tokens
            .iter()
            .map(|token| match token {
                PageToken::Page(page) => i64::from(*page),
                PageToken::Ellipsis => -1,
            })
            .collect()
    }

    #[test]
    fn total_pages_rounds_up_and_never_hits_zero() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
    }

    #[test]
    fn slice_bounds_clip_to_length() {
        assert_eq!(slice_bounds(1, 10, 25), (0, 10));
        assert_eq!(slice_bounds(3, 10, 25), (20, 25));
        assert_eq!(slice_bounds(4, 10, 25), (25, 25));
    }

    #[test]
    fn window_mid_range() {
        assert_eq!(
            pages(&page_window(5, 10, 2)),
            vec![1, -1, 3, 4, 5, 6, 7, -1, 10]
        );
    }

    #[test]
    fn window_touching_either_edge_has_no_ellipsis_there() {
        assert_eq!(pages(&page_window(2, 10, 2)), vec![1, 2, 3, 4, -1, 10]);
        assert_eq!(pages(&page_window(9, 10, 2)), vec![1, -1, 7, 8, 9, 10]);
        assert_eq!(pages(&page_window(1, 3, 2)), vec![1, 2, 3]);
    }

    #[test]
    fn window_never_emits_consecutive_ellipses() {
        for total in 1..=30u32 {
            for current in 1..=total {
                let tokens = page_window(current, total, 2);
                for pair in tokens.windows(2) {
                    assert!(
                        !(pair[0] == PageToken::Ellipsis && pair[1] == PageToken::Ellipsis),
                        "double ellipsis at current={current} total={total}"
                    );
                }
                assert_eq!(tokens.first(), Some(&PageToken::Page(1)));
                assert_eq!(tokens.last(), Some(&PageToken::Page(total)));
            }
        }
    }

    #[test]
    fn window_single_page() {
        assert_eq!(pages(&page_window(1, 1, 2)), vec![1]);
        assert_eq!(pages(&page_window(7, 1, 2)), vec![1]);
    }
}
