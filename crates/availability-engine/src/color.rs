//! Deterministic display colours for project and calendar names.

use std::collections::HashMap;

/// Fixed cyclic palette.
pub const PALETTE: [&str; 12] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac", "#1f77b4", "#2ca02c",
];

/// Hands out palette entries in first-encounter order.
///
/// One allocator lives for exactly one computation run; it is not shared, so
/// identical input order always yields identical colours.
#[derive(Debug, Clone, Default)]
pub struct ColorAllocator {
    assigned: HashMap<String, &'static str>,
}

impl ColorAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The colour for `name`, allocating the next palette entry on first sight.
    pub fn color_for(&mut self, name: &str) -> &'static str {
        if let Some(&color) = self.assigned.get(name) {
            return color;
        }
        let color = PALETTE[self.assigned.len() % PALETTE.len()];
        self.assigned.insert(name.to_string(), color);
        color
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
