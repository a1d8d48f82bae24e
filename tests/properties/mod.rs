//! Randomised checks of the graph invariants
//!
//! Graphs are generated as a node count plus raw index pairs; pairs are folded into range with
//! `%` so every generated case is usable.

mod sorting;
