// Presentation-side page counter.
//
// Tracks the page a view intends to request next, independently of the
// store's `current_page`. Stepping back is only permitted above page 1.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page the view currently intends to show.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Advance and return the page to request.
    pub fn next(&mut self) -> u32 {
        self.page += 1;
        self.page
    }

    /// Step back and return the page to request; `None` at page 1.
    pub fn prev(&mut self) -> Option<u32> {
        if self.page > 1 {
            self.page -= 1;
            Some(self.page)
        } else {
            None
        }
    }

    /// Back to page 1 (e.g. when a new repository is loaded).
    pub fn reset(&mut self) {
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_page_one() {
        assert_eq!(Pager::new().page(), 1);
    }

    #[test]
    fn next_then_prev_round_trips() {
        let mut pager = Pager::new();
        assert_eq!(pager.next(), 2);
        assert_eq!(pager.next(), 3);
        assert_eq!(pager.prev(), Some(2));
        assert_eq!(pager.prev(), Some(1));
    }

    #[test]
    fn prev_is_refused_at_page_one() {
        let mut pager = Pager::new();
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn reset_returns_to_page_one() {
        let mut pager = Pager::new();
        pager.next();
        pager.next();
        pager.reset();
        assert_eq!(pager.page(), 1);
    }
}
