//! Paged tile carousel

/// Swipe speed (units per second) that always flips a page
pub const SNAP_VELOCITY: f64 = 800.0;

/// Current page of the tile carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    page: usize,
    page_count: usize,
}

impl Carousel {
    pub fn new(page_count: usize) -> Self {
        Self {
            page: 0,
            page_count: page_count.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Change the number of pages, keeping the current page in range
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count.max(1);
        self.page = self.page.min(self.page_count - 1);
    }

    /// Advance one page; `false` on the last page
    pub fn next(&mut self) -> bool {
        if self.page + 1 < self.page_count {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; `false` on the first page
    pub fn prev(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a page, clamped to the last one
    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.page_count - 1);
    }

    /// Page a drag gesture should come to rest on
    ///
    /// A fast swipe moves one page against its direction of travel; a slow
    /// one only moves if it was dragged more than a quarter page. Positive
    /// values mean the track moved right, which reveals the previous page.
    pub fn settle(&mut self, velocity: f64, offset: f64, page_width: f64) -> usize {
        let towards_previous = if velocity.abs() > SNAP_VELOCITY {
            Some(velocity > 0.0)
        } else if offset.abs() > page_width / 4.0 {
            Some(offset > 0.0)
        } else {
            None
        };

        match towards_previous {
            Some(true) => {
                self.prev();
            }
            Some(false) => {
                self.next();
            }
            None => {}
        }
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_navigation_clamps() {
        let mut carousel = Carousel::new(2);
        assert!(!carousel.prev());
        assert!(carousel.next());
        assert!(!carousel.next());
        assert_eq!(carousel.page(), 1);

        carousel.go_to(7);
        assert_eq!(carousel.page(), 1);
        carousel.set_page_count(1);
        assert_eq!(carousel.page(), 0);
    }

    #[test]
    fn test_zero_pages_is_one() {
        let carousel = Carousel::new(0);
        assert_eq!(carousel.page_count(), 1);
    }

    #[rstest]
    #[case::fast_left(-900.0, 0.0, 2)]
    #[case::fast_right(900.0, 0.0, 0)]
    #[case::long_drag_left(0.0, -100.0, 2)]
    #[case::long_drag_right(0.0, 100.0, 0)]
    #[case::short_drag(0.0, -80.0, 1)]
    #[case::slow_at_threshold(800.0, 85.0, 1)]
    #[case::velocity_wins(-900.0, 200.0, 2)]
    fn test_settle(
        #[case] velocity: f64,
        #[case] offset: f64,
        #[case] expected: usize,
    ) {
        let mut carousel = Carousel::new(3);
        carousel.go_to(1);
        assert_eq!(carousel.settle(velocity, offset, 340.0), expected);
    }
}
