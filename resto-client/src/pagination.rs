//! Page cursor shared by the food catalog and the order list

use shared::Paginated;

/// Current page and how many there are (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub last_page: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            last_page: 1,
        }
    }
}

impl PageState {
    pub fn from_paginated<T>(page: &Paginated<T>) -> Self {
        Self {
            page: page.current_page,
            last_page: page.last_page,
        }
    }

    /// "Previous" is enabled iff `page > 1`.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// "Next" is enabled iff `page < last_page`.
    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons() {
        let first = PageState {
            page: 1,
            last_page: 3,
        };
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.next(), Some(2));
        assert_eq!(first.previous(), None);

        let last = PageState {
            page: 3,
            last_page: 3,
        };
        assert!(last.has_previous());
        assert!(!last.has_next());

        // a single page disables both
        let only = PageState::default();
        assert!(!only.has_previous());
        assert!(!only.has_next());

        // server says page 0 or past the end: both stay safe
        let odd = PageState {
            page: 0,
            last_page: 0,
        };
        assert!(!odd.has_previous());
        assert!(!odd.has_next());
    }
}
