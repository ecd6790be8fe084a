use std::collections::VecDeque;

use crate::game::Direction;

/// Bounded FIFO of pending headings.
///
/// Each push is validated against the last pending heading (or the snake's
/// current heading when nothing is pending), so two quick presses can never
/// add up to a reversal. Rejected pushes are dropped without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
    capacity: usize,
}

impl DirectionQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue `direction` given the snake's `current` heading.
    ///
    /// Repeats of the last pending heading are dropped too, so held keys do not
    /// fill the queue.
    pub fn push(&mut self, direction: Direction, current: Direction) -> bool {
        if self.pending.len() >= self.capacity {
            return false;
        }

        let reference = self.last().unwrap_or(current);
        if direction == reference || !reference.accepts(direction) {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    /// Most recently queued heading
    pub fn last(&self) -> Option<Direction> {
        self.pending.back().copied()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = DirectionQueue::new(3);
        assert!(queue.push(Direction::Left, Direction::Up));
        assert!(queue.push(Direction::Down, Direction::Up));
        assert!(queue.push(Direction::Right, Direction::Up));

        assert_eq!(queue.pop(), Some(Direction::Left));
        assert_eq!(queue.pop(), Some(Direction::Down));
        assert_eq!(queue.pop(), Some(Direction::Right));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_full_queue_drops() {
        let mut queue = DirectionQueue::new(3);
        queue.push(Direction::Left, Direction::Up);
        queue.push(Direction::Up, Direction::Up);
        queue.push(Direction::Right, Direction::Up);

        assert!(!queue.push(Direction::Down, Direction::Up));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.last(), Some(Direction::Right));
    }

    #[test]
    fn test_validity_chains_through_pending() {
        let mut queue = DirectionQueue::new(3);

        // Reversal of the current heading
        assert!(!queue.push(Direction::Down, Direction::Up));

        // Up then Left is fine, but Left followed by Right is not
        assert!(queue.push(Direction::Left, Direction::Up));
        assert!(!queue.push(Direction::Right, Direction::Up));

        // Down is only a reversal of the current heading, not of the pending Left
        assert!(queue.push(Direction::Down, Direction::Up));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_repeats_dropped() {
        let mut queue = DirectionQueue::new(3);
        assert!(!queue.push(Direction::Up, Direction::Up));
        assert!(queue.push(Direction::Left, Direction::Up));
        assert!(!queue.push(Direction::Left, Direction::Up));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_paused_reference_accepts_anything() {
        let mut queue = DirectionQueue::new(3);
        assert!(queue.push(Direction::Paused, Direction::Up));
        assert!(queue.push(Direction::Down, Direction::Up));

        let mut queue = DirectionQueue::new(3);
        assert!(queue.push(Direction::Down, Direction::Paused));
    }

    #[test]
    fn test_clear() {
        let mut queue = DirectionQueue::new(2);
        queue.push(Direction::Left, Direction::Up);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 2);
    }
}
