//! Image carousel position, wrapping at both ends.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Arrows are only shown with more than one image.
    pub fn has_controls(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) {
        if self.has_controls() {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.has_controls() {
            self.index = if self.index == 0 { self.len - 1 } else { self.index - 1 };
        }
    }

    /// Jump to a thumbnail; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    /// "2 / 5" style position label.
    pub fn label(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("{} / {}", self.index + 1, self.len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_in_both_directions() {
        let mut carousel = Carousel::new(3);
        carousel.prev();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.next();
        carousel.next();
        assert_eq!(carousel.label(), "3 / 3");
    }

    #[test]
    fn test_single_image_has_no_controls() {
        let mut carousel = Carousel::new(1);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        assert!(!carousel.has_controls());
        assert_eq!(Carousel::new(0).label(), "");
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut carousel = Carousel::new(2);
        carousel.select(1);
        carousel.select(5);
        assert_eq!(carousel.index(), 1);
    }
}
