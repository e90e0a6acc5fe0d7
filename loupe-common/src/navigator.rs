use thiserror::Error;

/// Lightbox state as seen by the navigation cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    /// Overlay is showing the gallery item at this index
    Open(usize),
}

/// What the caller has to do to honour an `open` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAction {
    /// Nothing was open, show `index`
    Show(usize),
    /// An overlay at `previous` is open and must be torn down before showing `index`
    Replace { previous: usize, index: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Gallery index {index} out of range (gallery has {len} items)")]
    OutOfRange { index: usize, len: usize },
}

/// Pure cursor over a gallery of `len` items.
///
/// Decides every open/next/previous/close transition without touching the DOM.
/// Navigation stops at both ends: there is no wraparound.
#[derive(Debug, Clone)]
pub struct Navigator {
    len: usize,
    state: LightboxState,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: LightboxState::Closed,
        }
    }

    /// Open at `index`. Fails without changing state if the index is out of range.
    pub fn open(&mut self, index: usize) -> Result<OpenAction, NavigationError> {
        if index >= self.len {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.len,
            });
        }

        let action = match self.state {
            LightboxState::Closed => OpenAction::Show(index),
            LightboxState::Open(previous) => OpenAction::Replace { previous, index },
        };
        self.state = LightboxState::Open(index);
        Ok(action)
    }

    /// Move forward one item. Returns the new cursor, or None if nothing moved.
    pub fn next(&mut self) -> Option<usize> {
        match self.state {
            LightboxState::Open(current) if current + 1 < self.len => {
                self.state = LightboxState::Open(current + 1);
                Some(current + 1)
            }
            _ => None,
        }
    }

    /// Move back one item. Returns the new cursor, or None if nothing moved.
    pub fn previous(&mut self) -> Option<usize> {
        match self.state {
            LightboxState::Open(current) if current > 0 => {
                self.state = LightboxState::Open(current - 1);
                Some(current - 1)
            }
            _ => None,
        }
    }

    /// Close the lightbox. Returns the index that was showing, or None if already closed.
    pub fn close(&mut self) -> Option<usize> {
        match std::mem::take(&mut self.state) {
            LightboxState::Open(current) => Some(current),
            LightboxState::Closed => None,
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            LightboxState::Open(current) => Some(current),
            LightboxState::Closed => None,
        }
    }

    pub fn can_previous(&self) -> bool {
        matches!(self.state, LightboxState::Open(current) if current > 0)
    }

    pub fn can_next(&self) -> bool {
        matches!(self.state, LightboxState::Open(current) if current + 1 < self.len)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let nav = Navigator::new(3);
        assert_eq!(nav.state(), LightboxState::Closed);
        assert_eq!(nav.cursor(), None);
    }

    #[test]
    fn test_open_from_closed_shows() {
        let mut nav = Navigator::new(3);
        assert_eq!(nav.open(1), Ok(OpenAction::Show(1)));
        assert_eq!(nav.cursor(), Some(1));
    }

    #[test]
    fn test_open_while_open_replaces() {
        let mut nav = Navigator::new(3);
        nav.open(0).unwrap();
        assert_eq!(
            nav.open(2),
            Ok(OpenAction::Replace {
                previous: 0,
                index: 2
            })
        );
        assert_eq!(nav.cursor(), Some(2));
    }

    #[test]
    fn test_open_out_of_range_keeps_state() {
        let mut nav = Navigator::new(2);
        nav.open(1).unwrap();
        assert_eq!(
            nav.open(2),
            Err(NavigationError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(nav.cursor(), Some(1));
    }

    #[test]
    fn test_open_empty_gallery() {
        let mut nav = Navigator::new(0);
        assert!(nav.open(0).is_err());
        assert_eq!(nav.state(), LightboxState::Closed);
    }

    #[test]
    fn test_next_stops_at_last() {
        let mut nav = Navigator::new(3);
        nav.open(1).unwrap();
        assert_eq!(nav.next(), Some(2));
        assert_eq!(nav.next(), None);
        assert_eq!(nav.cursor(), Some(2));
    }

    #[test]
    fn test_previous_stops_at_first() {
        let mut nav = Navigator::new(3);
        nav.open(1).unwrap();
        assert_eq!(nav.previous(), Some(0));
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.cursor(), Some(0));
    }

    #[test]
    fn test_navigation_while_closed_is_noop() {
        let mut nav = Navigator::new(3);
        assert_eq!(nav.next(), None);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.state(), LightboxState::Closed);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut nav = Navigator::new(3);
        nav.open(2).unwrap();
        assert_eq!(nav.close(), Some(2));
        assert_eq!(nav.close(), None);
        assert_eq!(nav.cursor(), None);
    }

    #[test]
    fn test_bounds_flags() {
        let mut nav = Navigator::new(2);
        assert!(!nav.can_previous());
        assert!(!nav.can_next());

        nav.open(0).unwrap();
        assert!(!nav.can_previous());
        assert!(nav.can_next());

        nav.next();
        assert!(nav.can_previous());
        assert!(!nav.can_next());
    }

    #[test]
    fn test_single_item_gallery() {
        let mut nav = Navigator::new(1);
        nav.open(0).unwrap();
        assert_eq!(nav.next(), None);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.cursor(), Some(0));
    }

    #[test]
    fn test_walkthrough() {
        let mut nav = Navigator::new(3);
        nav.open(1).unwrap();
        nav.next();
        nav.next();
        assert_eq!(nav.cursor(), Some(2));
        nav.previous();
        nav.previous();
        assert_eq!(nav.cursor(), Some(0));
        nav.close();
        assert_eq!(nav.state(), LightboxState::Closed);
    }
}
