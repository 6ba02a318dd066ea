//! core::layout
//!
//! Lane positions for local commits.
//!
//! A commit's position is a logical grid cell: `col` grows with every new
//! commit, `row` is the lane of the branch the commit was created on.
//! Converting cells into drawing coordinates belongs to the renderer.

use serde::{Deserialize, Serialize};

use super::model::Commit;

/// Grid cell of a commit in the graph drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, in creation order.
    pub col: u32,
    /// Lane, equal to the owning branch's row.
    pub row: u32,
}

impl Position {
    /// Create a position.
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Largest column used by any commit (0 for an empty graph).
pub fn max_col(commits: &[Commit]) -> u32 {
    commits.iter().map(|c| c.position.col).max().unwrap_or(0)
}

/// Position for the next commit placed on lane `row`.
pub fn next_position(commits: &[Commit], row: u32) -> Position {
    Position::new(max_col(commits) + 1, row)
}
