//! Race Sorter
//!
//! Animates QuickSort as a car race. The core is a sorting engine with a
//! randomized and a deterministic pivot policy that reports every pivot it
//! picks. Drawing and input handling live in the embedding application.

pub mod race_sorter;

pub use race_sorter::*;
