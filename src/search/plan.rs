//! Pagination Plan
//!
//! The ordered list of sets a session will visit. A search-all plan starts
//! with a small window of the newest sets and grows window by window, always
//! as a prefix of the known universe. A single-set plan never grows.

#[derive(Debug, Clone)]
pub struct PaginationPlan {
    /// Every key this plan may ever cover, newest first.
    universe: Vec<String>,
    /// Length of the planned prefix of `universe`.
    planned: usize,
    /// Index of the next key to visit. Always `<= planned`.
    cursor: usize,
    extension_window: usize,
}

impl PaginationPlan {
    /// Plan that visits exactly one set.
    pub fn for_set(set_code: impl Into<String>) -> Self {
        Self {
            universe: vec![set_code.into()],
            planned: 1,
            cursor: 0,
            extension_window: 0,
        }
    }

    /// Plan over the whole universe, starting with `initial_window` keys.
    pub fn search_all(
        universe: Vec<String>,
        initial_window: usize,
        extension_window: usize,
    ) -> Self {
        let planned = initial_window.max(1).min(universe.len());
        Self {
            universe,
            planned,
            cursor: 0,
            extension_window: extension_window.max(1),
        }
    }

    /// Returns the next unvisited key and moves the cursor past it.
    pub fn next_key(&mut self) -> Option<String> {
        if !self.has_unvisited() {
            return None;
        }
        let key = self.universe[self.cursor].clone();
        self.cursor += 1;
        Some(key)
    }

    pub fn has_unvisited(&self) -> bool {
        self.cursor < self.planned
    }

    pub fn can_extend(&self) -> bool {
        self.planned < self.universe.len()
    }

    /// Appends the next window of keys. Returns `false` once the universe is
    /// fully planned.
    pub fn extend(&mut self) -> bool {
        if !self.can_extend() {
            return false;
        }
        self.planned = (self.planned + self.extension_window).min(self.universe.len());
        true
    }

    /// No unvisited keys and nothing left to plan.
    pub fn is_exhausted(&self) -> bool {
        !self.has_unvisited() && !self.can_extend()
    }

    pub fn planned(&self) -> &[String] {
        &self.universe[..self.planned]
    }

    pub fn visited(&self) -> &[String] {
        &self.universe[..self.cursor]
    }

    /// Keys not visited yet, planned or not.
    pub fn remaining(&self) -> usize {
        self.universe.len() - self.cursor
    }
}
