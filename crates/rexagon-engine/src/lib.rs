//! Constraint propagation engine for regular expression crosswords on
//! hexagonal boards.
//!
//! A puzzle is a hexagon of cells, each holding a set of candidate letters.
//! Every straight line of cells (in three axial directions) is governed by
//! one pattern from a narrow regex sublanguage. [`Nfsm`] compiles a pattern
//! into an explicit disjunction of fixed-length chains, and [`Solver`]
//! alternates pushing cell knowledge into the patterns and pulling pattern
//! knowledge back into the cells until nothing shrinks any further.

pub mod error;
pub mod hexgrid;
pub mod letterset;
pub mod nfsm;
mod parse;
pub mod solver;

pub use error::Error;
pub use hexgrid::{CellId, HexGrid, Link};
pub use letterset::LetterSet;
pub use nfsm::{Chain, Nfsm};
pub use solver::{LineReport, Report, Solver};
