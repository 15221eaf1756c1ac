//! gp-plot: stacked "river" plots of executed queries.
//!
//! `RiverPlotter::river_plot` reduces a query to a (time, stream) table and
//! stacks one band per stream; `save_plot` renders the figure with plotters.

pub mod error;
pub mod figure;
pub mod render;

pub use error::{PlotError, PlotResult};
pub use figure::{Band, Figure, RiverRequest};
pub use render::RiverPlotter;
