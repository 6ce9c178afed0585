use std::collections::VecDeque;

use super::{holes, signed_area_2x, Rings, TriangulationSettings};
use crate::data::{Point, PointLocation, TriangleIds, TriangleView, VertexId};
use crate::{Error, Orientation, PolygonScalar};

// Ear clipping over a single merged loop. Holes are first stitched into the
// outer boundary, then:
//
// Create a linked list of positions. O(n)
// Classify every position as reflex, convex, or ear. O(n^2)
// While more than three positions remain:
//   Pop the oldest ear from the queue, skipping stale entries.
//   Emit (prev, ear, next) and unlink the ear.
//   Re-classify prev and next; queue them if they became ears. O(n)
// If the queue runs dry, re-classify everything once. If that finds nothing,
// re-classify again accepting flat (collinear) ears before giving up.
//
// A flat ear leaves its middle vertex lying on the new edge. When that vertex
// is a bridge endpoint, its second copy then blocks every ear touching the
// edge, so flat ears are only taken as a last resort.

/// Triangulate a polygon given as an outer boundary followed by holes.
///
/// `hole_starts` lists the (ascending) index at which each hole begins; the
/// outer boundary is everything before the first hole. The outer boundary
/// must wind in the direction given by `settings`. Holes may wind either way.
///
/// # Errors
///
/// See [`Error`]. Hitting `settings.triangle_limit` is not an error; the
/// triangles found so far are returned.
pub fn earclip<T: PolygonScalar>(
  points: &[Point<T, 2>],
  hole_starts: &[usize],
  settings: &TriangulationSettings,
) -> Result<Vec<TriangleIds>, Error> {
  let rings = Rings::new(points.len(), hole_starts)?;
  let winding = settings.winding();

  let mut order: Vec<VertexId> = rings.outer().collect();
  let area = signed_area_2x(points, &order);
  if (winding.is_ccw() && area < 0.0) || (winding.is_cw() && area > 0.0) {
    return Err(Error::WindingViolation);
  }

  holes::stitch_holes(points, &mut order, &rings, winding)?;

  let triangles = EarClipper::new(points, &order, winding).run(settings.triangle_limit)?;
  log::debug!(
    "earclip: {} vertices, {} holes, {} positions, {} triangles",
    points.len(),
    hole_starts.len(),
    order.len(),
    triangles.len()
  );
  Ok(triangles)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classification {
  Reflex,
  Convex,
  Ear,
  Clipped,
}

struct EarClipper<'a, T> {
  points: &'a [Point<T, 2>],
  order: &'a [VertexId],
  winding: Orientation,
  vertices: List,
  tags: Vec<Classification>,
  ears: VecDeque<usize>,
  // Any position still in the list.
  anchor: usize,
  // Whether collinear positions may be classified as ears.
  allow_flat: bool,
}

impl<'a, T> EarClipper<'a, T>
where
  T: PolygonScalar,
{
  fn new(points: &'a [Point<T, 2>], order: &'a [VertexId], winding: Orientation) -> Self {
    let mut clipper = EarClipper {
      points,
      order,
      winding,
      vertices: List::new(order.len()),
      tags: vec![Classification::Convex; order.len()],
      ears: VecDeque::with_capacity(order.len()),
      anchor: 0,
      allow_flat: false,
    };
    clipper.classify_all();
    clipper
  }

  fn point(&self, position: usize) -> &'a Point<T, 2> {
    let points: &'a [Point<T, 2>] = self.points;
    &points[self.order[position].usize()]
  }

  fn classify(&self, position: usize) -> Classification {
    let prev = self.vertices.prev(position);
    let next = self.vertices.next(position);
    let turn = self
      .point(prev)
      .orientation(self.point(position), self.point(next));
    if turn == self.winding.reverse() {
      Classification::Reflex
    } else if turn.is_colinear() && !self.allow_flat {
      Classification::Convex
    } else if self.is_ear(prev, position, next) {
      Classification::Ear
    } else {
      Classification::Convex
    }
  }

  // No other remaining position may lie inside or on the triangle, unless it
  // is a copy of one of the corners (bridge endpoints appear twice).
  fn is_ear(&self, a: usize, b: usize, c: usize) -> bool {
    let corners = [self.order[a], self.order[b], self.order[c]];
    let trig = TriangleView::new([self.point(a), self.point(b), self.point(c)]);
    let mut focus = self.vertices.next(c);
    while focus != a {
      if !corners.contains(&self.order[focus])
        && trig.locate(self.point(focus)) != PointLocation::Outside
      {
        return false;
      }
      focus = self.vertices.next(focus);
    }
    true
  }

  fn classify_all(&mut self) {
    self.ears.clear();
    let mut focus = self.anchor;
    for _ in 0..self.vertices.len() {
      let tag = self.classify(focus);
      self.tags[focus] = tag;
      if tag == Classification::Ear {
        self.ears.push_back(focus);
      }
      focus = self.vertices.next(focus);
    }
  }

  fn retest(&mut self, position: usize) {
    let tag = self.classify(position);
    if tag == Classification::Ear && self.tags[position] != Classification::Ear {
      self.ears.push_back(position);
    }
    self.tags[position] = tag;
  }

  // Queue entries whose tag changed since they were pushed are skipped.
  fn next_ear(&mut self) -> Option<usize> {
    while let Some(position) = self.ears.pop_front() {
      if self.tags[position] == Classification::Ear {
        return Some(position);
      }
    }
    None
  }

  fn clip(&mut self, focus: usize) -> TriangleIds {
    let prev = self.vertices.prev(focus);
    let next = self.vertices.next(focus);
    self.vertices.delete(focus);
    self.tags[focus] = Classification::Clipped;
    self.anchor = next;
    self.allow_flat = false;
    self.retest(prev);
    self.retest(next);
    let triangle = (self.order[prev], self.order[focus], self.order[next]);
    log::trace!(
      "clipped ear {} ({}, {}, {})",
      focus,
      triangle.0,
      triangle.1,
      triangle.2
    );
    triangle
  }

  fn run(mut self, limit: usize) -> Result<Vec<TriangleIds>, Error> {
    let n = self.vertices.len();
    let mut triangles = Vec::with_capacity(n.saturating_sub(2).min(limit));
    while self.vertices.len() > 3 {
      if triangles.len() >= limit {
        log::warn!(
          "triangle limit of {} reached with {} positions left",
          limit,
          self.vertices.len()
        );
        return Ok(triangles);
      }
      let focus = match self.next_ear() {
        Some(focus) => focus,
        None => {
          log::debug!(
            "ear queue empty with {} positions left, rescanning",
            self.vertices.len()
          );
          self.classify_all();
          match self.next_ear() {
            Some(focus) => focus,
            None => {
              log::debug!("no proper ear left, accepting flat ears");
              self.allow_flat = true;
              self.classify_all();
              self.next_ear().ok_or(Error::CannotTriangulate)?
            }
          }
        }
      };
      triangles.push(self.clip(focus));
    }
    if triangles.len() < limit {
      let a = self.anchor;
      let prev = self.vertices.prev(a);
      let next = self.vertices.next(a);
      triangles.push((self.order[prev], self.order[a], self.order[next]));
    } else {
      log::warn!("triangle limit of {} reached before the last triangle", limit);
    }
    Ok(triangles)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  use claims::{assert_err_eq, assert_ok};
  use num_bigint::BigInt;
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn ids(order: &[usize]) -> Vec<VertexId> {
    order.iter().copied().map(VertexId).collect()
  }

  fn trig_area_2x<T: PolygonScalar + Into<BigInt>>(
    points: &[Point<T, 2>],
    triangles: &[TriangleIds],
  ) -> BigInt {
    triangles
      .iter()
      .map(|&(a, b, c)| {
        let [a, b, c] = [a, b, c].map(|id| points[id.usize()].cast(Into::<BigInt>::into));
        (&b.array[0] - &a.array[0]) * (&c.array[1] - &a.array[1])
          - (&b.array[1] - &a.array[1]) * (&c.array[0] - &a.array[0])
      })
      .sum()
  }

  fn poly_area_2x<T: PolygonScalar + Into<BigInt>>(points: &[Point<T, 2>]) -> BigInt {
    let n = points.len();
    (0..n)
      .map(|i| {
        let p = points[i].cast(Into::<BigInt>::into);
        let q = points[(i + 1) % n].cast(Into::<BigInt>::into);
        &p.array[0] * &q.array[1] - &q.array[0] * &p.array[1]
      })
      .sum()
  }

  fn triangulate(points: &[Point<i64, 2>]) -> Vec<TriangleIds> {
    assert_ok!(earclip(points, &[], &TriangulationSettings::default()))
  }

  #[test]
  fn basic_1() {
    let pts = [[0, 0], [1, 0], [1, 1]].map(Point::new);
    assert_eq!(triangulate(&pts), vec![(VertexId(2), VertexId(0), VertexId(1))]);
  }

  #[test]
  fn basic_2() {
    let pts = [[0, 0], [1, 0], [2, 0], [3, 0], [4, 0], [1, 1]].map(Point::new);
    let triangles = triangulate(&pts);
    assert_eq!(triangles.len(), 4);
    assert_eq!(poly_area_2x(&pts), trig_area_2x(&pts, &triangles));
  }

  #[test]
  fn square() {
    let pts = [[0, 0], [1, 0], [1, 1], [0, 1]].map(Point::new);
    let triangles = triangulate(&pts);
    assert_eq!(
      triangles,
      vec![
        (VertexId(3), VertexId(0), VertexId(1)),
        (VertexId(3), VertexId(1), VertexId(2)),
      ]
    );
  }

  #[test]
  fn l_shape() {
    let pts = [[0, 0], [2, 0], [2, 1], [1, 1], [1, 2], [0, 2]].map(Point::new);
    let triangles = triangulate(&pts);
    assert_eq!(triangles.len(), 4);
    assert_eq!(poly_area_2x(&pts), trig_area_2x(&pts, &triangles));
  }

  #[test]
  fn reverse_direction() {
    let pts = [[0, 0], [0, 1], [1, 1], [1, 0]].map(Point::new);
    let settings = TriangulationSettings::default().with_reverse_direction(true);
    let triangles = assert_ok!(earclip(&pts, &[], &settings));
    assert_eq!(triangles.len(), 2);
    assert_err_eq!(
      earclip(&pts, &[], &TriangulationSettings::default()),
      Error::WindingViolation
    );
  }

  #[test]
  fn triangle_limit() {
    let pts = [[0, 0], [2, 0], [3, 1], [2, 2], [0, 2], [-1, 1]].map(Point::new);
    for limit in 0..=4 {
      let settings = TriangulationSettings::default().with_triangle_limit(limit);
      let triangles = assert_ok!(earclip(&pts, &[], &settings));
      assert_eq!(triangles.len(), limit);
    }
    let settings = TriangulationSettings::default().with_triangle_limit(100);
    assert_eq!(assert_ok!(earclip(&pts, &[], &settings)).len(), 4);
  }

  #[test]
  fn rejects_short_rings() {
    let pts = [[0, 0], [1, 0]].map(Point::new);
    assert_err_eq!(
      earclip(&pts, &[], &TriangulationSettings::default()),
      Error::InsufficientVertices
    );
  }

  #[test]
  fn exhausted_ears() {
    // Clockwise input against a counter-clockwise clipper has no ears.
    let pts = [[0, 0], [0, 1], [1, 1], [1, 0]].map(Point::new);
    let order = ids(&[0, 1, 2, 3]);
    let clipper = EarClipper::new(&pts, &order, Orientation::CounterClockWise);
    assert_err_eq!(clipper.run(100), Error::CannotTriangulate);
  }

  #[test]
  fn duplicated_corners_are_ignored() {
    // A square with a zero-width slit to an interior point, the shape hole
    // stitching produces.
    let pts = [[0, 0], [4, 0], [4, 4], [0, 4], [2, 2]].map(Point::new);
    let order = ids(&[0, 1, 4, 1, 2, 3]);
    let triangles = assert_ok!(EarClipper::new(&pts, &order, Orientation::CounterClockWise).run(100));
    assert_eq!(triangles.len(), 4);
    assert_eq!(poly_area_2x(&pts[..4]), trig_area_2x(&pts, &triangles));
  }

  #[test]
  fn flat_ears_are_a_last_resort() {
    // A zero-width spike: every position is collinear.
    let pts = [[0, 0], [1, 0], [2, 0]].map(Point::new);
    let order = ids(&[0, 1, 2, 1]);
    let triangles = assert_ok!(EarClipper::new(&pts, &order, Orientation::CounterClockWise).run(100));
    assert_eq!(triangles.len(), 2);
    assert_eq!(trig_area_2x(&pts, &triangles), BigInt::from(0));
  }

  #[test]
  fn bridge_along_hole_edge() {
    // The rectangle's bridge runs along y = 883 to the triangle's left
    // corner, collinear with the triangle's base.
    let pts = [
      [0, 0],
      [1000, 0],
      [1000, 1000],
      [0, 1000],
      [585, 883],
      [606, 907],
      [627, 883],
      [114, 836],
      [114, 883],
      [191, 883],
      [191, 836],
    ]
    .map(Point::new);
    let triangles = assert_ok!(earclip(&pts, &[4, 7], &TriangulationSettings::default()));
    assert_eq!(triangles.len(), 13);
    let expected = poly_area_2x(&pts[..4]) + poly_area_2x(&pts[4..7]) + poly_area_2x(&pts[7..]);
    assert_eq!(expected, BigInt::from(2_000_000 - 1008 - 7238));
    assert_eq!(trig_area_2x(&pts, &triangles), expected);
  }

  #[proptest]
  fn equal_area_prop(#[strategy(star_polygon(3..30))] pts: Vec<Point<i64, 2>>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let triangles = earclip(&pts, &[], &TriangulationSettings::default()).unwrap();
    prop_assert_eq!(triangles.len(), pts.len() - 2);
    prop_assert_eq!(poly_area_2x(&pts), trig_area_2x(&pts, &triangles));
  }

  #[proptest]
  fn multi_hole_area_prop(
    #[strategy(grid_polygon_with_holes(1..8))] input: (Vec<Point<i64, 2>>, Vec<usize>),
  ) {
    let _ = env_logger::builder().is_test(true).try_init();
    let (pts, starts) = input;
    let triangles = earclip(&pts, &starts, &TriangulationSettings::default()).unwrap();
    prop_assert_eq!(triangles.len(), pts.len() - 2 + 2 * starts.len());

    // Holes are clockwise, so their shoelace areas are negative.
    let mut bounds = starts.clone();
    bounds.push(pts.len());
    let holes: BigInt = bounds.windows(2).map(|w| poly_area_2x(&pts[w[0]..w[1]])).sum();
    prop_assert_eq!(poly_area_2x(&pts[..starts[0]]) + holes, trig_area_2x(&pts, &triangles));
  }
}

///////////////////////////////////////////////////////////////////////////////
// Linked List that supports deletions

struct List {
  prev: Vec<usize>,
  next: Vec<usize>,
  len: usize,
}

impl List {
  fn new(size: usize) -> List {
    let mut prev = Vec::with_capacity(size);
    let mut next = Vec::with_capacity(size);
    prev.resize(size, 0);
    next.resize(size, 0);
    for i in 0..size {
      prev[(i + 1) % size] = i;
      next[i] = (i + 1) % size;
    }
    List {
      prev,
      next,
      len: size,
    }
  }

  fn len(&self) -> usize {
    self.len
  }

  fn prev(&self, vertex: usize) -> usize {
    self.prev[vertex]
  }

  fn next(&self, vertex: usize) -> usize {
    self.next[vertex]
  }

  fn delete(&mut self, vertex: usize) {
    let prev = self.prev[vertex];
    let next = self.next[vertex];
    self.next[prev] = next;
    self.prev[next] = prev;
    self.len -= 1;
  }
}
