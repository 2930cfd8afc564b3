//! FAQ accordion.

/// A list of questions of which at most one is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    /// Accordion over `len` questions, all collapsed.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Handle a click on question `index`.
    ///
    /// Everything collapses; the clicked question then opens unless it was
    /// the one already open. Indices past the end are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Collapse every question.
    pub fn close_all(&mut self) {
        self.open = None;
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// The expanded question, if any.
    #[must_use]
    pub const fn open_index(&self) -> Option<usize> {
        self.open
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_open() {
        let mut faq = Accordion::new(3);
        faq.toggle(0);
        faq.toggle(2);
        assert!(!faq.is_open(0));
        assert!(faq.is_open(2));
        assert_eq!(faq.open_index(), Some(2));
    }

    #[test]
    fn test_clicking_open_question_collapses_it() {
        let mut faq = Accordion::new(3);
        faq.toggle(1);
        faq.toggle(1);
        assert_eq!(faq.open_index(), None);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut faq = Accordion::new(2);
        faq.toggle(0);
        faq.toggle(5);
        assert_eq!(faq.open_index(), Some(0));
    }
}
