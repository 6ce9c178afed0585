use super::{Point, PointLocation};
use crate::{Orientation, PolygonScalar, TotalOrd};

/// Three borrowed corners. Either winding is accepted, which lets the same
/// view serve counter-clockwise and clockwise (reversed) polygons.
#[derive(Debug)]
pub struct TriangleView<'a, T>([&'a Point<T, 2>; 3]);

impl<T> Clone for TriangleView<'_, T> {
  fn clone(&self) -> Self {
    *self
  }
}
impl<T> Copy for TriangleView<'_, T> {}

impl<'a, T> TriangleView<'a, T>
where
  T: PolygonScalar,
{
  pub fn new(pts: [&'a Point<T, 2>; 3]) -> TriangleView<'a, T> {
    TriangleView(pts)
  }

  pub fn corners(&self) -> [&'a Point<T, 2>; 3] {
    self.0
  }

  pub fn orientation(&self) -> Orientation {
    let [a, b, c] = self.0;
    Orientation::new(a, b, c)
  }

  pub fn is_degenerate(&self) -> bool {
    self.orientation().is_colinear()
  }

  // O(1)
  // Points on an edge or corner are reported as `OnBoundary`. A degenerate
  // triangle covers the segment spanned by its corners.
  pub fn locate(&self, pt: &Point<T, 2>) -> PointLocation {
    let [a, b, c] = self.0;
    let winding = self.orientation();
    let ab = a.orientation(b, pt);
    let bc = b.orientation(c, pt);
    let ca = c.orientation(a, pt);
    if winding.is_colinear() {
      if ab.is_colinear() && bc.is_colinear() && ca.is_colinear() && within_bounds(self.0, pt) {
        PointLocation::OnBoundary
      } else {
        PointLocation::Outside
      }
    } else if ab == winding.reverse() || bc == winding.reverse() || ca == winding.reverse() {
      PointLocation::Outside
    } else if ab.is_colinear() || bc.is_colinear() || ca.is_colinear() {
      PointLocation::OnBoundary
    } else {
      PointLocation::Inside
    }
  }

  /// Twice the signed area. Positive for counter-clockwise corners.
  pub fn signed_area_2x(&self) -> f64 {
    let [a, b, c] = self.0.map(Point::to_f64);
    a[0] * b[1] - b[0] * a[1] + b[0] * c[1] - c[0] * b[1] + c[0] * a[1] - a[0] * c[1]
    // x1*y2 - x2*y1 +
    // x2*y3 - x3*y2 +
    // x3*y1 - x1*y3
  }

  /// Unsigned area from the side lengths (Heron's formula).
  pub fn area(&self) -> f64 {
    let [a, b, c] = self.0.map(Point::to_f64);
    let ab = a.euclidean_distance(&b);
    let bc = b.euclidean_distance(&c);
    let ca = c.euclidean_distance(&a);
    let s = (ab + bc + ca) / 2.0;
    // Rounding can push the product of a sliver slightly below zero.
    (s * (s - ab) * (s - bc) * (s - ca)).max(0.0).sqrt()
  }

  pub fn centroid(&self) -> Point<f64, 2> {
    let [a, b, c] = self.0.map(Point::to_f64);
    Point::new([(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0])
  }
}

fn within_bounds<T: PolygonScalar>(corners: [&Point<T, 2>; 3], pt: &Point<T, 2>) -> bool {
  (0..2).all(|axis| {
    let min = corners
      .iter()
      .map(|p| &p.array[axis])
      .reduce(TotalOrd::total_min);
    let max = corners
      .iter()
      .map(|p| &p.array[axis])
      .reduce(TotalOrd::total_max);
    match (min, max) {
      (Some(min), Some(max)) => {
        min.total_cmp(&pt.array[axis]).is_le() && max.total_cmp(&pt.array[axis]).is_ge()
      }
      _ => false,
    }
  })
}
