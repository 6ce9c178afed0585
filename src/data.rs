pub(crate) mod point;
pub mod polygon;
mod triangle;
mod vertex;

pub use triangle::*;
pub use vertex::*;

#[doc(inline)]
pub use crate::data::polygon::Polygon;
pub use point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
