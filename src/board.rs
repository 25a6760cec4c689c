//! Board geometry: a rectangle of `rows` x `cols` cells whose outermost ring
//! is the wall. Everything strictly inside the wall is playable.

use rand::Rng;

use crate::{BoardInt, Coords};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: BoardInt,
    cols: BoardInt,
}

impl Board {
    pub fn new(rows: BoardInt, cols: BoardInt) -> Self {
        Board { rows, cols }
    }

    pub fn rows(&self) -> BoardInt {
        self.rows
    }

    pub fn cols(&self) -> BoardInt {
        self.cols
    }

    pub fn center(&self) -> Coords {
        (self.rows / 2, self.cols / 2)
    }

    /// True when `pos` lies on or beyond the border.
    pub fn is_wall(&self, pos: Coords) -> bool {
        let (row, col) = pos;
        row <= 0 || row >= self.rows - 1 || col <= 0 || col >= self.cols - 1
    }

    pub fn is_interior(&self, pos: Coords) -> bool {
        !self.is_wall(pos)
    }

    pub fn interior_cells(&self) -> usize {
        let inner_rows = (self.rows - 2).max(0) as usize;
        let inner_cols = (self.cols - 2).max(0) as usize;
        inner_rows * inner_cols
    }

    pub fn interior(&self) -> impl Iterator<Item = Coords> {
        let (rows, cols) = (self.rows, self.cols);
        (1..rows - 1).flat_map(move |row| (1..cols - 1).map(move |col| (row, col)))
    }

    /// A uniformly random interior cell.
    pub fn random_interior<R: Rng + ?Sized>(&self, rng: &mut R) -> Coords {
        let row = rng.gen_range(1..self.rows - 1);
        let col = rng.gen_range(1..self.cols - 1);
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn wall_is_outer_ring() {
        let board = Board::new(20, 10);

        assert!(board.is_wall((0, 5)));
        assert!(board.is_wall((19, 5)));
        assert!(board.is_wall((5, 0)));
        assert!(board.is_wall((5, 9)));
        assert!(board.is_wall((-1, 5)));
        assert!(board.is_wall((5, 12)));

        assert!(board.is_interior((1, 1)));
        assert!(board.is_interior((18, 8)));
    }

    #[test]
    fn center_is_half_of_each_side() {
        assert_eq!(Board::new(20, 10).center(), (10, 5));
    }

    #[test]
    fn interior_iterates_every_playable_cell() {
        let board = Board::new(5, 6);
        let cells: Vec<Coords> = board.interior().collect();

        assert_eq!(cells.len(), board.interior_cells());
        assert_eq!(cells.len(), 3 * 4);
        assert!(cells.iter().all(|&c| board.is_interior(c)));
    }

    #[test]
    fn random_cells_stay_inside() {
        let board = Board::new(7, 9);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            assert!(board.is_interior(board.random_interior(&mut rng)));
        }
    }
}
