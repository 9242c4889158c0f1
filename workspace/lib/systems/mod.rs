//! Collection of pre-defined systems.

pub mod ring;
pub mod chain;
pub mod disordered;
