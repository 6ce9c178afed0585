use std::cmp::Ordering;
use std::ops::Range;

use super::{signed_area_2x, Rings};
use crate::data::{Point, PointLocation, TriangleView, VertexId};
use crate::{Error, Orientation, PolygonScalar, TotalOrd};

// Holes are joined to the outer boundary one at a time, right to left, by a
// pair of coincident edges (a bridge). The bridge runs from the hole's
// right-most vertex M to a vertex P of the merged loop that M can see.
//
// 1. Cast a ray from M towards +x and find the closest loop edge it hits.
// 2. If the hit is a vertex, that vertex is P.
// 3. Otherwise take the edge endpoint with the larger x. If any reflex vertex
//    lies in the triangle (M, hit, endpoint) the endpoint may be hidden; pick
//    the reflex vertex with the smallest angle to the ray instead.
// 4. If P occurs more than once (an earlier bridge ends there), use the
//    occurrence whose interior wedge contains M.
// 5. Splice M, the rest of the hole, M again and P back into the loop.
pub(crate) fn stitch_holes<T: PolygonScalar>(
  points: &[Point<T, 2>],
  order: &mut Vec<VertexId>,
  rings: &Rings,
  winding: Orientation,
) -> Result<(), Error> {
  let mut holes: Vec<Hole> = rings
    .holes()
    .map(|range| Hole::new(points, range, winding))
    .collect();
  // Right-most hole first so a ray never meets a hole that is not yet joined.
  holes.sort_by(|a, b| b.cut_key(points).total_cmp(&a.cut_key(points)));
  for hole in &holes {
    stitch_hole(points, order, hole, winding)?;
  }
  Ok(())
}

struct Hole {
  ring: Vec<VertexId>,
  // Index of M within `ring`.
  cut: usize,
}

impl Hole {
  // Holes wind opposite to the outer boundary; rings given the other way
  // around are reversed.
  fn new<T: PolygonScalar>(
    points: &[Point<T, 2>],
    range: Range<usize>,
    winding: Orientation,
  ) -> Hole {
    let mut ring: Vec<VertexId> = range.map(VertexId).collect();
    let area = signed_area_2x(points, &ring);
    if (winding.is_ccw() && area > 0.0) || (winding.is_cw() && area < 0.0) {
      log::debug!("reversing hole starting at {}", ring[0]);
      ring.reverse();
    }
    let cut = cut_vertex(points, &ring);
    Hole { ring, cut }
  }

  fn cut_vertex(&self) -> VertexId {
    self.ring[self.cut]
  }

  fn cut_key<'a, T>(&self, points: &'a [Point<T, 2>]) -> (&'a T, &'a T) {
    let m = &points[self.cut_vertex().usize()];
    (m.x_coord(), m.y_coord())
  }
}

// Largest x, ties broken by largest y.
fn cut_vertex<T: PolygonScalar>(points: &[Point<T, 2>], ring: &[VertexId]) -> usize {
  let key = |id: &VertexId| {
    let pt = &points[id.usize()];
    (pt.x_coord(), pt.y_coord())
  };
  ring
    .iter()
    .enumerate()
    .max_by(|(_, a), (_, b)| key(*a).total_cmp(&key(*b)))
    .map_or(0, |(idx, _)| idx)
}

fn stitch_hole<T: PolygonScalar>(
  points: &[Point<T, 2>],
  order: &mut Vec<VertexId>,
  hole: &Hole,
  winding: Orientation,
) -> Result<(), Error> {
  let m = hole.cut_vertex();
  let bridge = find_bridge(points, order, &points[m.usize()], winding)?;
  let p = order[bridge];
  log::debug!("bridging hole vertex {} to {}", m, p);
  let spliced: Vec<VertexId> = hole.ring[hole.cut..]
    .iter()
    .chain(&hole.ring[..hole.cut])
    .copied()
    .chain([m, p])
    .collect();
  order.splice(bridge + 1..bridge + 1, spliced);
  Ok(())
}

// Position in `order` of the vertex M connects to.
fn find_bridge<T: PolygonScalar>(
  points: &[Point<T, 2>],
  order: &[VertexId],
  m: &Point<T, 2>,
  winding: Orientation,
) -> Result<usize, Error> {
  let n = order.len();
  let point = |position: usize| &points[order[position].usize()];

  let (hit_x, edge) = cast_ray(points, order, m, winding).ok_or(Error::CannotTriangulate)?;
  let (a, b) = (edge, (edge + 1) % n);

  let mut candidate = if point(a).y_coord().total_cmp(m.y_coord()).is_eq() {
    a
  } else if point(b).y_coord().total_cmp(m.y_coord()).is_eq() {
    b
  } else {
    let endpoint = furthest_endpoint(point(a), point(b), m, a, b);
    hidden_by_reflex(points, order, m, hit_x, endpoint, winding).unwrap_or(endpoint)
  };

  let target = order[candidate];
  let copies: Vec<usize> = (0..n).filter(|&position| order[position] == target).collect();
  if copies.len() > 1 {
    if let Some(&position) = copies
      .iter()
      .find(|&&position| locally_inside(points, order, position, m, winding))
    {
      candidate = position;
    }
  }
  Ok(candidate)
}

// Closest intersection (by x) of the ray from `m` towards +x with an edge of
// the loop whose interior side faces `m`. Returns the hit x and the position
// of the edge's first endpoint.
fn cast_ray<T: PolygonScalar>(
  points: &[Point<T, 2>],
  order: &[VertexId],
  m: &Point<T, 2>,
  winding: Orientation,
) -> Option<(f64, usize)> {
  let n = order.len();
  let my = m.y_coord().to_f64();
  let mut best: Option<(f64, usize)> = None;
  for a in 0..n {
    let pa = &points[order[a].usize()];
    let pb = &points[order[(a + 1) % n].usize()];
    // Interior on the left (counter-clockwise): such edges point upwards
    // where they pass M. Mirrored for clockwise loops.
    let (lo, hi) = if winding.is_ccw() { (pa, pb) } else { (pb, pa) };
    if lo.y_coord() > m.y_coord() || hi.y_coord() < m.y_coord() {
      continue;
    }
    if lo.y_coord() >= hi.y_coord() {
      continue;
    }
    if pa.orientation(pb, m) != winding {
      continue;
    }
    let (pa, pb) = (pa.to_f64(), pb.to_f64());
    let x = if pb[1] == pa[1] {
      pa[0].max(pb[0])
    } else {
      pa[0] + (my - pa[1]) * (pb[0] - pa[0]) / (pb[1] - pa[1])
    };
    if best.map_or(true, |(best_x, _)| x < best_x) {
      best = Some((x, a));
    }
  }
  best
}

// Of the two endpoints of the hit edge, the one with the larger x. On a tie,
// the one closer to the ray.
fn furthest_endpoint<T: PolygonScalar>(
  pa: &Point<T, 2>,
  pb: &Point<T, 2>,
  m: &Point<T, 2>,
  a: usize,
  b: usize,
) -> usize {
  match pa.x_coord().total_cmp(pb.x_coord()) {
    Ordering::Greater => a,
    Ordering::Less => b,
    Ordering::Equal => {
      let my = m.y_coord().to_f64();
      let da = (pa.y_coord().to_f64() - my).abs();
      let db = (pb.y_coord().to_f64() - my).abs();
      if da <= db {
        a
      } else {
        b
      }
    }
  }
}

// Reflex loop vertices inside triangle (M, hit, endpoint) can block the view
// from M to the endpoint. The one making the smallest angle with the ray is
// visible; ties go to the closest.
fn hidden_by_reflex<T: PolygonScalar>(
  points: &[Point<T, 2>],
  order: &[VertexId],
  m: &Point<T, 2>,
  hit_x: f64,
  endpoint: usize,
  winding: Orientation,
) -> Option<usize> {
  let n = order.len();
  let point = |position: usize| &points[order[position].usize()];
  let mf = m.to_f64();
  let hit = Point::new([hit_x, mf[1]]);
  let pf = point(endpoint).to_f64();
  let trig = TriangleView::new([&mf, &hit, &pf]);

  let mut best: Option<(f64, f64, usize)> = None;
  for r in 0..n {
    if order[r] == order[endpoint] {
      continue;
    }
    let prev = point((r + n - 1) % n);
    let next = point((r + 1) % n);
    if prev.orientation(point(r), next) != winding.reverse() {
      continue;
    }
    let rf = point(r).to_f64();
    let dx = rf[0] - mf[0];
    if dx <= 0.0 || trig.locate(&rf) == PointLocation::Outside {
      continue;
    }
    let tan = (rf[1] - mf[1]).abs() / dx;
    let dist = mf.squared_euclidean_distance(&rf);
    let better = match best {
      None => true,
      Some((best_tan, best_dist, _)) => tan < best_tan || (tan == best_tan && dist < best_dist),
    };
    if better {
      best = Some((tan, dist, r));
    }
  }
  best.map(|(_, _, r)| r)
}

// Does the interior wedge at `position` contain the direction towards `m`?
fn locally_inside<T: PolygonScalar>(
  points: &[Point<T, 2>],
  order: &[VertexId],
  position: usize,
  m: &Point<T, 2>,
  winding: Orientation,
) -> bool {
  let n = order.len();
  let point = |position: usize| &points[order[position].usize()];
  let prev = point((position + n - 1) % n);
  let here = point(position);
  let next = point((position + 1) % n);
  let enters = prev.orientation(here, m) == winding;
  let leaves = here.orientation(next, m) == winding;
  if prev.orientation(here, next) == winding.reverse() {
    enters || leaves
  } else {
    enters && leaves
  }
}
