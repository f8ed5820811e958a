//! Fixed-point propagation between the board and the per-line patterns.
//!
//! Every line's pattern is compiled once and bound to the cells the line
//! runs through; each cell is shared by exactly three bindings, one per
//! axial direction. A propagation round pushes every cell's candidate set
//! into the corresponding pattern slot, then intersects every cell with
//! what its three patterns still allow. Both moves only ever shrink sets,
//! so the loop reaches a fixed point.

use serde::Serialize;

use crate::error::Error;
use crate::hexgrid::{CellId, HexGrid};
use crate::letterset::LetterSet;
use crate::nfsm::Nfsm;

/// One pattern bound to the ordered cells of its line.
#[derive(Debug)]
struct Binding {
    nfsm: Nfsm,
    cells: Vec<CellId>,
}

#[derive(Debug)]
pub struct Solver {
    grid: HexGrid<LetterSet>,
    bindings: Vec<Binding>,
}

impl Solver {
    /// Build the board and compile one pattern per line. Patterns bind in
    /// three consecutive blocks of `2 * side - 1`: rows left-to-right, then
    /// upper-right diagonals, then lower-right diagonals.
    pub fn new(side: usize, alphabet: LetterSet, patterns: &[&str]) -> Result<Solver, Error> {
        let grid = HexGrid::new(side, || alphabet);
        let lines = grid.line_count();
        if patterns.len() != 3 * lines {
            return Err(Error::PatternCount {
                expected: 3 * lines,
                actual: patterns.len(),
            });
        }

        let mut bindings = Vec::with_capacity(patterns.len());
        for (k, pattern) in patterns.iter().enumerate() {
            let index = k % lines;
            let cells: Vec<CellId> = match k / lines {
                0 => grid.traverse_l2r(index).collect(),
                1 => grid.traverse_ur2ll(index).collect(),
                _ => grid.traverse_lr2ul(index).collect(),
            };
            let nfsm = Nfsm::new(pattern, cells.len(), alphabet)?;
            bindings.push(Binding { nfsm, cells });
        }

        Ok(Solver { grid, bindings })
    }

    /// One full round: constrain every pattern with the current cells, then
    /// narrow every cell with what the patterns allow. Returns whether any
    /// cell changed.
    pub fn step(&mut self) -> bool {
        for binding in &mut self.bindings {
            for (i, &cell) in binding.cells.iter().enumerate() {
                binding.nfsm.constrain_slot(i, self.grid[cell]);
            }
        }

        let mut changed = false;
        for binding in &self.bindings {
            for (i, &cell) in binding.cells.iter().enumerate() {
                let narrowed = self.grid[cell] & binding.nfsm.peek_slot(i);
                if narrowed != self.grid[cell] {
                    self.grid[cell] = narrowed;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Iterate [`Solver::step`] to the fixed point, invoking the observer
    /// after every round (including the final, unchanged one). Returns the
    /// number of rounds taken.
    pub fn run(&mut self, mut observer: impl FnMut(usize, &Solver)) -> usize {
        let mut rounds = 0;
        loop {
            let changed = self.step();
            rounds += 1;
            observer(rounds, self);
            if !changed {
                return rounds;
            }
        }
    }

    pub fn grid(&self) -> &HexGrid<LetterSet> {
        &self.grid
    }

    /// Whether every cell has narrowed to a single letter.
    pub fn is_solved(&self) -> bool {
        self.grid.cells().all(|cell| self.grid[cell].singleton().is_some())
    }

    /// The bound patterns with their current line renderings, in binding
    /// order. Undecided cells render as `_`.
    pub fn lines(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.bindings
            .iter()
            .map(|binding| (binding.nfsm.pattern(), self.render(binding)))
    }

    fn render(&self, binding: &Binding) -> String {
        binding
            .cells
            .iter()
            .map(|&cell| self.grid[cell].singleton().unwrap_or('_'))
            .collect()
    }

    /// Snapshot of the board for machine-readable output.
    pub fn report(&self, rounds: usize) -> Report {
        Report {
            rounds,
            solved: self.is_solved(),
            lines: self
                .bindings
                .iter()
                .map(|binding| LineReport {
                    pattern: binding.nfsm.pattern().to_owned(),
                    cells: self.render(binding),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub rounds: usize,
    pub solved: bool,
    pub lines: Vec<LineReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    pub pattern: String,
    pub cells: String,
}
