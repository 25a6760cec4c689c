use crate::board::Board;
use crate::error::GameError;
use crate::game::Status;
use crate::Coords;

/// Cells to repaint between two consecutive snapshots, applied in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellPlan {
    pub blank: Vec<Coords>,
    pub snake: Vec<Coords>,
    /// Set when the fruit moved or the snake just uncovered it.
    pub fruit: Option<Coords>,
}

/// What the renderer needs to know about one moment of play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Tail first, head last.
    pub segments: Vec<Coords>,
    pub fruit: Coords,
    pub score: u32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Coords> {
        self.segments.last().copied()
    }

    /// Cells covered in `self` but not in `next`.
    pub fn vacated_by(&self, next: &Snapshot) -> Vec<Coords> {
        let mut cells: Vec<Coords> = self
            .segments
            .iter()
            .copied()
            .filter(|pos| !next.segments.contains(pos))
            .collect();
        cells.dedup();
        cells
    }

    /// Cells covered in `next` but not in `self`.
    pub fn entered_by(&self, next: &Snapshot) -> Vec<Coords> {
        next.vacated_by(self)
    }

    pub fn cell_plan(&self, next: &Snapshot) -> CellPlan {
        let mut blank = self.vacated_by(next);
        let moved = self.fruit != next.fruit;

        if moved && !next.segments.contains(&self.fruit) && !blank.contains(&self.fruit) {
            blank.push(self.fruit);
        }

        // A fruit that spawned under the body shows again once the tail leaves it.
        let uncovered = blank.contains(&next.fruit);
        blank.retain(|&pos| pos != next.fruit);

        CellPlan {
            blank,
            snake: self.entered_by(next),
            fruit: (moved || uncovered).then_some(next.fruit),
        }
    }
}

pub trait RenderSink {
    /// Border, score line and footer. Drawn once before play starts.
    fn draw_static(&mut self, board: &Board) -> Result<(), GameError>;

    fn draw_full(&mut self, snapshot: &Snapshot) -> Result<(), GameError>;

    /// Redraws only what changed between two consecutive snapshots.
    fn draw_update(&mut self, before: &Snapshot, after: &Snapshot) -> Result<(), GameError>;

    fn draw_outcome(&mut self, status: Status, score: u32) -> Result<(), GameError>;
}
