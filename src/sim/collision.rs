//! Collision predicates for the rectangular playfield
//!
//! All entities collide as axis-aligned rects. The helpers here stay
//! stateless so `tick` owns every mutation.

use super::rect::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Rect touches or crosses the top screen edge
#[inline]
pub fn hits_top_edge(rect: &Rect) -> bool {
    rect.top() <= 0.0
}

/// Rect touches or crosses either side screen edge
#[inline]
pub fn hits_side_edge(rect: &Rect) -> bool {
    rect.left() <= 0.0 || rect.right() >= SCREEN_WIDTH
}

/// Rect has fully fallen below the playfield (top edge past the bottom)
#[inline]
pub fn below_screen(rect: &Rect) -> bool {
    rect.top() > SCREEN_HEIGHT
}

/// Rect has fully risen above the playfield (bottom edge past the top)
#[inline]
pub fn above_screen(rect: &Rect) -> bool {
    rect.bottom() < 0.0
}

/// Index of the first rect in iteration order that overlaps `rect`
///
/// Iteration order is insertion order, so at most one hit resolves per frame
/// and earlier bricks win ties.
pub fn first_overlap<'a, I>(rect: &Rect, others: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    others.into_iter().position(|other| rect.intersects(other))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_edges() {
        let inside = Rect::new(100.0, 100.0, 20.0, 20.0);
        assert!(!hits_top_edge(&inside));
        assert!(!hits_side_edge(&inside));
        assert!(!below_screen(&inside));
        assert!(!above_screen(&inside));

        assert!(hits_top_edge(&Rect::new(100.0, -1.0, 20.0, 20.0)));
        assert!(hits_side_edge(&Rect::new(-1.0, 100.0, 20.0, 20.0)));
        assert!(hits_side_edge(&Rect::new(781.0, 100.0, 20.0, 20.0)));
        assert!(below_screen(&Rect::new(100.0, 601.0, 20.0, 20.0)));
        assert!(above_screen(&Rect::new(100.0, -21.0, 20.0, 20.0)));
    }

    #[test]
    fn test_corner_rect_hits_both_edges() {
        // A rect jammed into the top-left corner satisfies both wall checks
        let corner = Rect::new(-2.0, -2.0, 20.0, 20.0);
        assert!(hits_top_edge(&corner));
        assert!(hits_side_edge(&corner));
    }

    #[test]
    fn test_first_overlap_insertion_order() {
        let probe = Rect::new(10.0, 10.0, 20.0, 20.0);
        let others = [
            Rect::new(100.0, 100.0, 20.0, 20.0),
            Rect::new(15.0, 15.0, 20.0, 20.0),
            Rect::new(12.0, 12.0, 20.0, 20.0),
        ];
        // Both index 1 and 2 overlap; the first in order wins
        assert_eq!(first_overlap(&probe, others.iter()), Some(1));

        let clear = Rect::new(500.0, 500.0, 5.0, 5.0);
        assert_eq!(first_overlap(&clear, others.iter()), None);
    }
}
