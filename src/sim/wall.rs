//! Brick wall construction
//!
//! Levels are a fixed table of row/column counts. Bricks are laid out on a
//! uniform grid: column width is floor(screen / cols) minus a gutter, row
//! height is fixed, with padding between cells and a top offset. Row index
//! modulo the palette length cycles the colors.

use super::rect::Rect;
use super::state::Brick;
use crate::consts::*;

/// Row/column counts for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    pub rows: u32,
    pub cols: u32,
}

/// The fixed campaign, easiest first
pub const LEVELS: [LevelSpec; 3] = [
    LevelSpec { rows: 4, cols: 10 },
    LevelSpec { rows: 5, cols: 10 },
    LevelSpec { rows: 6, cols: 10 },
];

/// Cyclic row palette: firebrick, orange, gold, lime green
pub const BRICK_PALETTE: [[f32; 4]; 4] = [
    [0.70, 0.13, 0.13, 1.0],
    [1.00, 0.65, 0.00, 1.0],
    [1.00, 0.84, 0.00, 1.0],
    [0.20, 0.80, 0.20, 1.0],
];

/// Lay out the brick wall for a level
pub fn build_brick_wall(level: &LevelSpec) -> Vec<Brick> {
    let brick_width = (SCREEN_WIDTH / level.cols as f32).floor() - BRICK_GUTTER;
    let mut bricks = Vec::with_capacity((level.rows * level.cols) as usize);

    for row in 0..level.rows {
        for col in 0..level.cols {
            let x = col as f32 * (brick_width + BRICK_PADDING) + BRICK_PADDING;
            let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + WALL_TOP_OFFSET;
            bricks.push(Brick {
                rect: Rect::new(x, y, brick_width, BRICK_HEIGHT),
                color: BRICK_PALETTE[row as usize % BRICK_PALETTE.len()],
            });
        }
    }

    bricks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_counts_per_level() {
        assert_eq!(build_brick_wall(&LEVELS[0]).len(), 40);
        assert_eq!(build_brick_wall(&LEVELS[1]).len(), 50);
        assert_eq!(build_brick_wall(&LEVELS[2]).len(), 60);
    }

    #[test]
    fn test_bricks_do_not_overlap() {
        let bricks = build_brick_wall(&LEVELS[2]);
        for (i, a) in bricks.iter().enumerate() {
            for b in bricks.iter().skip(i + 1) {
                assert!(!a.rect.intersects(&b.rect));
            }
        }
    }

    #[test]
    fn test_wall_fits_on_screen() {
        for level in &LEVELS {
            for brick in build_brick_wall(level) {
                assert!(brick.rect.left() >= 0.0);
                assert!(brick.rect.right() <= SCREEN_WIDTH);
                assert!(brick.rect.top() >= WALL_TOP_OFFSET);
            }
        }
    }

    #[test]
    fn test_row_colors_cycle_palette() {
        let bricks = build_brick_wall(&LEVELS[2]);
        let cols = LEVELS[2].cols as usize;
        // Row 0 and row 4 share a color; adjacent rows differ
        assert_eq!(bricks[0].color, bricks[4 * cols].color);
        assert_ne!(bricks[0].color, bricks[cols].color);
    }

    #[test]
    fn test_uniform_spacing() {
        let bricks = build_brick_wall(&LEVELS[0]);
        let cols = LEVELS[0].cols as usize;
        let gap_x = bricks[1].rect.left() - bricks[0].rect.right();
        let gap_y = bricks[cols].rect.top() - bricks[0].rect.bottom();
        assert!((gap_x - BRICK_PADDING).abs() < 1e-4);
        assert!((gap_y - BRICK_PADDING).abs() < 1e-4);
    }
}
