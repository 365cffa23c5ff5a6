//! Bounded history of recent agent positions.

use std::collections::VecDeque;

use super::Position;

/// Upper bound on the positions reserved up front. Longer trails grow on demand.
const PREALLOCATED: usize = 1024;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trail {
    positions: VecDeque<Position>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: VecDeque::with_capacity(capacity.min(PREALLOCATED)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends the newest position, dropping the oldest ones beyond the capacity.
    pub fn push(&mut self, position: Position) {
        self.positions.push_back(position);
        while self.positions.len() > self.capacity {
            self.positions.pop_front();
        }
    }

    /// Positions from oldest to newest.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_trail_keeps_newest_positions() {
        let mut trail = Trail::new(3);
        for x in 0..5 {
            trail.push(Position::new(x as f64, 0.0));
        }

        assert_eq!(trail.len(), 3);
        assert_eq!(
            trail.positions().map(|p| p.x()).collect::<Vec<_>>(),
            vec![2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_trail_below_capacity() {
        let mut trail = Trail::new(10);
        trail.push(Position::new(1.0, 2.0));
        trail.push(Position::new(3.0, 4.0));

        assert_eq!(
            trail.positions().collect::<Vec<_>>(),
            vec![Position::new(1.0, 2.0), Position::new(3.0, 4.0)]
        );
    }

    #[test]
    fn test_trail_zero_capacity() {
        let mut trail = Trail::new(0);
        trail.push(Position::new(1.0, 2.0));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_trail_huge_capacity() {
        let mut trail = Trail::new(usize::MAX / 8);
        trail.push(Position::new(1.0, 2.0));

        assert_eq!(trail.len(), 1);
        assert_eq!(
            trail.positions().collect::<Vec<_>>(),
            vec![Position::new(1.0, 2.0)]
        );
    }

    #[test]
    fn test_trail_clear() {
        let mut trail = Trail::new(2);
        trail.push(Position::new(1.0, 2.0));
        trail.clear();
        assert!(trail.is_empty());

        trail.push(Position::new(3.0, 4.0));
        trail.push(Position::new(5.0, 6.0));
        trail.push(Position::new(7.0, 8.0));
        assert_eq!(trail.len(), 2);
    }
}
