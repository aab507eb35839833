#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod beachline;
mod diagram;
mod edge;
mod geom;
mod num;
mod queue;

pub use diagram::Voronoi;
pub use edge::Edge;
pub use geom::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
/// The input sites were faulty.
pub enum Error {
    /// At least one of the inputs was infinite.
    Infinity,
    /// At least one of the inputs was not a number.
    NaN,
    /// Two of the input sites coincided exactly.
    DuplicateSite(Point),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Infinity => write!(f, "one of the inputs was infinite"),
            Error::NaN => write!(f, "one of the inputs had a NaN"),
            Error::DuplicateSite(p) => write!(f, "the input site {p:?} appeared twice"),
        }
    }
}

impl std::error::Error for Error {}

/// Computes the Voronoi diagram of `sites` within the box
/// `[0, width] × [0, height]`, returning its edges.
///
/// This is a convenience wrapper around [`Voronoi::edges`]; build a
/// [`Voronoi`] directly to reuse its allocations across calls or to read
/// back the diagram vertices afterwards.
pub fn edges(sites: &[Point], width: f64, height: f64) -> Result<Vec<Edge>, Error> {
    Voronoi::new().edges(sites, width, height)
}
