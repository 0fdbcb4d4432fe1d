//! Pagination control.
//!
//! A pure function of `(current, page_size, total)`. It has no state of its
//! own; the owning table keeps the current page and applies the
//! [`PageChange`] requests this control emits.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::Theme;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Request to move to another page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange(pub usize);

/// What the pagination control shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// `"{start}–{end} of {total}"`, absent when there are no items.
    pub label: Option<String>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// The requested page clamped into `[1, last_page]`.
    pub effective_page: usize,
    /// `ceil(total / page_size)`; zero when `total` is zero.
    pub last_page: usize,
}

/// The pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    page_size: usize,
    total: usize,
}

impl Pagination {
    /// Create a control. A zero page size is treated as one.
    pub fn new(current: usize, page_size: usize, total: usize) -> Self {
        Self {
            current,
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn last_page(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// The current page clamped into range.
    pub fn effective_page(&self) -> usize {
        self.current.clamp(1, self.last_page().max(1))
    }

    /// Index range of the visible items, `[start, end)`.
    pub fn slice_range(&self) -> std::ops::Range<usize> {
        let page = self.effective_page();
        let start = ((page - 1) * self.page_size).min(self.total);
        let end = (page * self.page_size).min(self.total);
        start..end
    }

    /// Compute the visible state.
    pub fn view(&self) -> PaginationView {
        let last_page = self.last_page();
        let effective_page = self.effective_page();

        let label = (self.total > 0).then(|| {
            let start = (effective_page - 1) * self.page_size + 1;
            let end = (effective_page * self.page_size).min(self.total);
            format!("{}–{} of {}", start, end, self.total)
        });

        PaginationView {
            label,
            prev_enabled: !(effective_page <= 1 || self.total == 0),
            next_enabled: !(effective_page == last_page || self.total == 0),
            effective_page,
            last_page,
        }
    }

    /// Activate the previous control.
    pub fn previous(&self) -> Option<PageChange> {
        self.view()
            .prev_enabled
            .then(|| PageChange(self.current.saturating_sub(1)))
    }

    /// Activate the next control.
    pub fn next(&self) -> Option<PageChange> {
        self.view().next_enabled.then(|| PageChange(self.current + 1))
    }

    /// Draw as a right-aligned `label  ‹ ›` line.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.view();
        let control = |symbol: &'static str, enabled: bool| {
            if enabled {
                Span::styled(symbol, theme.key())
            } else {
                Span::styled(symbol, theme.button_disabled())
            }
        };

        let mut spans = Vec::new();
        if let Some(label) = view.label {
            spans.push(Span::styled(label, theme.text()));
            spans.push(Span::raw("  "));
        }
        spans.push(control("‹", view.prev_enabled));
        spans.push(Span::raw(" "));
        spans.push(control("›", view.next_enabled));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
            area,
        );
    }
}
