use std::ops::Range;

use crate::data::{Point, Polygon, TriangleIds, VertexId};
use crate::{Error, Orientation, PolygonScalar};

pub mod earclip;
mod holes;

/// Default cap on the number of triangles a single triangulation may emit.
pub const DEFAULT_TRIANGLE_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangulationSettings {
  /// Outer boundary is clockwise (holes counter-clockwise) instead of the
  /// other way around.
  pub reverse_direction: bool,
  /// Safety valve: triangulation stops once this many triangles exist.
  pub triangle_limit: usize,
}

impl Default for TriangulationSettings {
  fn default() -> TriangulationSettings {
    TriangulationSettings {
      reverse_direction: false,
      triangle_limit: DEFAULT_TRIANGLE_LIMIT,
    }
  }
}

impl TriangulationSettings {
  #[must_use]
  pub fn with_reverse_direction(mut self, reverse_direction: bool) -> TriangulationSettings {
    self.reverse_direction = reverse_direction;
    self
  }

  #[must_use]
  pub fn with_triangle_limit(mut self, triangle_limit: usize) -> TriangulationSettings {
    self.triangle_limit = triangle_limit;
    self
  }

  /// The turn direction of a convex vertex on the outer boundary.
  pub fn winding(&self) -> Orientation {
    if self.reverse_direction {
      Orientation::ClockWise
    } else {
      Orientation::CounterClockWise
    }
  }
}

pub trait Triangulate {
  fn triangulate(self) -> Result<Vec<TriangleIds>, Error>;
}

impl<T: PolygonScalar> Triangulate for &Polygon<T> {
  fn triangulate(self) -> Result<Vec<TriangleIds>, Error> {
    let points: Vec<Point<T, 2>> = self
      .vertices
      .iter()
      .map(|vertex| vertex.position.clone())
      .collect();
    earclip::earclip(&points, &self.hole_starts, &self.settings)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Ring layout

// Outer boundary followed by contiguous holes, all within one vertex array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rings {
  outer: Range<usize>,
  holes: Vec<Range<usize>>,
}

impl Rings {
  pub(crate) fn new(len: usize, hole_starts: &[usize]) -> Result<Rings, Error> {
    if len < 3 {
      return Err(Error::InsufficientVertices);
    }
    if let Some(&index) = hole_starts.iter().find(|&&start| start >= len) {
      return Err(Error::IndexOutOfRange { index, len });
    }
    let mut bounds = Vec::with_capacity(hole_starts.len() + 2);
    bounds.push(0);
    bounds.extend_from_slice(hole_starts);
    bounds.push(len);
    // Every ring, outer or hole, needs at least three vertices.
    if bounds.windows(2).any(|w| w[0] + 3 > w[1]) {
      return Err(Error::InvalidHole);
    }
    let mut rings = bounds.windows(2).map(|w| w[0]..w[1]);
    let outer = rings.next().ok_or(Error::InsufficientVertices)?;
    Ok(Rings {
      outer,
      holes: rings.collect(),
    })
  }

  pub(crate) fn outer(&self) -> impl Iterator<Item = VertexId> {
    self.outer.clone().map(VertexId)
  }

  pub(crate) fn holes(&self) -> impl Iterator<Item = Range<usize>> + '_ {
    self.holes.iter().cloned()
  }
}

/// Twice the signed area of a closed ring (shoelace formula). Positive for
/// counter-clockwise rings.
pub(crate) fn signed_area_2x<T: PolygonScalar>(points: &[Point<T, 2>], ring: &[VertexId]) -> f64 {
  let n = ring.len();
  (0..n)
    .map(|i| {
      let p = points[ring[i].usize()].to_f64();
      let q = points[ring[(i + 1) % n].usize()].to_f64();
      p[0] * q[1] - q[0] * p[1]
    })
    .sum()
}
