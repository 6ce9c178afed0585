// Strategies shared by the unit tests:
//  * points (integer and float)
//  * star-shaped polygons
//  * squares with several holes
// A Strategy is a way to generate a shrinkable value.
use crate::data::Point;

use core::ops::Range;
use proptest::collection::*;
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::f64::consts::PI;

// Full i64 range. The fixed-precision predicates must not overflow.
pub fn any_64() -> impl Strategy<Value = Point<i64, 2>> {
  any::<[i64; 2]>().prop_map(Point::new)
}

// Finite floats only. NaN and infinities are rejected by construction.
pub fn any_f64() -> impl Strategy<Value = Point<f64, 2>> {
  [-1e6..1e6f64, -1e6..1e6f64].prop_map(Point::new)
}

// Vertex `i` sits at angle `2π(i + jitter)/n` and radius 500..1000 around
// the origin. Angles strictly increase and consecutive gaps stay below π,
// so the result is a simple, counter-clockwise, star-shaped polygon.
pub fn star_polygon(size: Range<usize>) -> impl Strategy<Value = Vec<Point<i64, 2>>> {
  size.prop_flat_map(|n| vec((0.0..0.4f64, 500.0..1000.0f64), n)).prop_map(|params| {
    let n = params.len() as f64;
    params
      .iter()
      .enumerate()
      .map(|(i, &(jitter, radius))| {
        let angle = 2.0 * PI * (i as f64 + jitter) / n;
        Point::new([
          (radius * angle.cos()).round() as i64,
          (radius * angle.sin()).round() as i64,
        ])
      })
      .collect()
  })
}

// A star polygon followed by a small clockwise square hole around the
// origin. The hole starts at the returned index. Needs at least six outer
// vertices for the hole to stay clear of the boundary.
pub fn star_polygon_with_hole(
  size: Range<usize>,
) -> impl Strategy<Value = (Vec<Point<i64, 2>>, usize)> {
  (star_polygon(size), 10..100i64).prop_map(|(mut pts, half)| {
    let start = pts.len();
    pts.extend([[-half, -half], [-half, half], [half, half], [half, -half]].map(Point::new));
    (pts, start)
  })
}

// Corner offsets within a grid cell. Few values, so holes in the same row
// often share a y coordinate.
const OFFSETS: [i64; 6] = [20, 60, 100, 140, 180, 230];

// The square 0..1000 followed by clockwise holes, each in its own cell of a
// 4x4 grid (cells are 250 wide). Holes are rectangles or triangles with a
// flat base. Returns the points and the hole starts. At most 16 holes.
pub fn grid_polygon_with_holes(
  holes: Range<usize>,
) -> impl Strategy<Value = (Vec<Point<i64, 2>>, Vec<usize>)> {
  holes
    .prop_flat_map(|k| {
      let offsets = || subsequence(OFFSETS.to_vec(), 2);
      (
        Just((0..16).collect::<Vec<i64>>()).prop_shuffle(),
        vec((offsets(), offsets(), any::<bool>()), k),
      )
    })
    .prop_map(|(cells, shapes)| {
      let mut pts: Vec<Point<i64, 2>> = [[0, 0], [1000, 0], [1000, 1000], [0, 1000]]
        .into_iter()
        .map(Point::new)
        .collect();
      let mut starts = Vec::with_capacity(shapes.len());
      for (cell, (xs, ys, triangle)) in cells.into_iter().zip(shapes) {
        let (cx, cy) = (cell % 4 * 250, cell / 4 * 250);
        let (x0, x1) = (cx + xs[0], cx + xs[1]);
        let (y0, y1) = (cy + ys[0], cy + ys[1]);
        starts.push(pts.len());
        if triangle {
          pts.extend([[x0, y0], [(x0 + x1) / 2, y1], [x1, y0]].map(Point::new));
        } else {
          pts.extend([[x0, y0], [x0, y1], [x1, y1], [x1, y0]].map(Point::new));
        }
      }
      (pts, starts)
    })
}
