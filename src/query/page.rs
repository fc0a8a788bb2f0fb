use std::num::NonZeroUsize;

/// Number of pages needed for `total` items. An empty list still has one (empty) page.
pub fn total_pages(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get()).max(1)
}

pub fn is_valid_page(page: usize, total: usize, page_size: NonZeroUsize) -> bool {
    (1..=total_pages(total, page_size)).contains(&page)
}

/// Items `[(page-1)*size, page*size)` of `items`, 1-indexed.
///
/// The page number is not clamped: page 0 or a page past the end yields an empty window.
/// Callers check [`is_valid_page`] first.
pub fn window<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size.get()))
    else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size.get()).min(items.len());
    &items[start..end]
}

/// One button in a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(usize),
    Gap,
}

/// Page buttons around `current`: every page up to 7 pages, otherwise first, last,
/// and the neighbours of `current` with gaps in between.
pub fn visible_pages(current: usize, total: usize) -> Vec<PageSlot> {
    if total <= 7 {
        return (1..=total).map(PageSlot::Page).collect();
    }

    let mut pages = vec![PageSlot::Page(1)];
    if current > 3 {
        pages.push(PageSlot::Gap);
    }
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    pages.extend((start..=end).map(PageSlot::Page));
    if current + 2 < total {
        pages.push(PageSlot::Gap);
    }
    pages.push(PageSlot::Page(total));
    pages
}

const DISPLAY_STEP: usize = 12;

/// "Load more" window over a result list: shows the first `count` items and grows by a
/// fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    count: usize,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self {
            count: DISPLAY_STEP,
        }
    }
}

impl DisplayWindow {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.count.min(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.count
    }

    pub fn grow(&mut self) {
        self.grow_by(1);
    }

    /// Grow by `steps` steps at once. Saturates instead of overflowing.
    pub fn grow_by(&mut self, steps: usize) {
        self.count = self
            .count
            .saturating_add(DISPLAY_STEP.saturating_mul(steps));
    }

    /// Back to the first step, e.g. after the query changes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
