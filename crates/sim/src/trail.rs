//! Fixed-capacity position history.

use sky_core::vector::Vector3;

/// Circular buffer of scene positions.
///
/// Storage is allocated once in [`Trail::new`]; pushes are O(1) and never
/// reallocate. Once full, each push overwrites the oldest sample.
#[derive(Debug, Clone)]
pub struct Trail {
    slots: Box<[Vector3]>,
    cursor: usize,
    filled: usize,
}

impl Trail {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![[0.0; 3]; capacity.max(1)].into_boxed_slice(),
            cursor: 0,
            filled: 0,
        }
    }

    pub fn push(&mut self, position: Vector3) {
        self.slots[self.cursor] = position;
        self.cursor = (self.cursor + 1) % self.slots.len();
        if self.filled < self.slots.len() {
            self.filled += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index of the slot the next push writes to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Vector3> + '_ {
        let start = if self.is_full() { self.cursor } else { 0 };
        let cap = self.slots.len();
        (0..self.filled).map(move |i| &self.slots[(start + i) % cap])
    }

    pub fn latest(&self) -> Option<&Vector3> {
        if self.filled == 0 {
            return None;
        }
        let cap = self.slots.len();
        Some(&self.slots[(self.cursor + cap - 1) % cap])
    }

    /// Raw backing storage in slot order, including unfilled slots.
    pub fn slots(&self) -> &[Vector3] {
        &self.slots
    }

    pub fn to_vec(&self) -> Vec<Vector3> {
        self.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.cursor = 0;
        self.filled = 0;
    }
}
