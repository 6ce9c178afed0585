#![doc(test(no_crate_inject))]
//! Polygon fill triangulation for 2D widgets.
//!
//! A [`Polygon`](data::Polygon) owns render vertices (position, color and
//! texture coordinates) plus a list of hole start indices. Calling
//! [`update`](data::Polygon::update) turns that state into triangles by
//! ear clipping, stitching every hole into the outer boundary first. The
//! triangles can then be expanded into a flat vertex buffer or queried for
//! area, containment and centers.
//!
//! ```rust
//! # use rtessellate::data::{Point, Polygon};
//! let mut square = Polygon::from_points(vec![
//!   Point::new([0.0, 0.0]),
//!   Point::new([1.0, 0.0]),
//!   Point::new([1.0, 1.0]),
//!   Point::new([0.0, 1.0]),
//! ]);
//! square.update().unwrap();
//! assert_eq!(square.triangles().len(), 2);
//! assert!((square.area() - 1.0).abs() < 1e-9);
//! ```
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::cmp::Ordering;

pub mod algorithms;
pub mod data;
mod orientation;

pub use orientation::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  InsufficientVertices,
  /// A vertex id, hole start or hole number does not exist.
  IndexOutOfRange {
    index: usize,
    len: usize,
  },
  /// Hole starts are not ascending or leave a ring with fewer than three vertices.
  InvalidHole,
  /// The outer boundary is wound against the configured direction. Such a
  /// loop has no ears, so this is reported up front in place of
  /// `CannotTriangulate`.
  WindingViolation,
  /// No ear could be found: the boundary self-intersects or a hole lies outside it.
  CannotTriangulate,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::InsufficientVertices => write!(f, "Insufficient vertices"),
      Error::IndexOutOfRange { index, len } => {
        write!(f, "Index {} out of range (length {})", index, len)
      }
      Error::InvalidHole => write!(f, "Invalid hole start indices"),
      Error::WindingViolation => write!(f, "Winding violation"),
      Error::CannotTriangulate => write!(
        f,
        "Polygon cannot be triangulated: self intersections or inconsistent winding"
      ),
    }
  }
}

impl std::error::Error for Error {}

pub trait TotalOrd {
  fn total_cmp(&self, other: &Self) -> Ordering;

  fn total_min(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::min_by(self, other, TotalOrd::total_cmp)
  }

  fn total_max(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::max_by(self, other, TotalOrd::total_cmp)
  }
}

impl<A: TotalOrd> TotalOrd for &A {
  fn total_cmp(&self, other: &Self) -> Ordering {
    (*self).total_cmp(*other)
  }
}

impl<A: TotalOrd, B: TotalOrd> TotalOrd for (A, B) {
  fn total_cmp(&self, other: &Self) -> Ordering {
    self
      .0
      .total_cmp(&other.0)
      .then_with(|| self.1.total_cmp(&other.1))
  }
}

/// Coordinate types the triangulator can work with.
///
/// `cmp_slope(p, q, r)` returns the sign of the cross product `(q - p) × (r - q)`:
/// `Greater` for a counter-clockwise turn, `Less` for a clockwise turn and
/// `Equal` for colinear points. Implementations must be exact or use a robust
/// predicate; ear classification silently breaks otherwise.
pub trait PolygonScalar: std::fmt::Debug + Clone + PartialOrd + TotalOrd {
  fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering;

  /// Lossy conversion used for measurements (areas, centers, ray hits).
  fn to_f64(&self) -> f64;
}

macro_rules! fixed_precision {
  ( $ty:ty, $uty:ty, $long:ty, $ulong: ty ) => {
    impl TotalOrd for $ty {
      fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
      }
    }

    impl PolygonScalar for $ty {
      fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
        // Return the absolute difference along with its sign.
        // diff(0, 10) => (10, true)
        // diff(10, 0) => (10, false)
        // diff(i8::MIN,i8:MAX) => (255_u16, true)
        // diff(a,b) = (c, sign) where a = if sign { b-c } else { b+c }
        fn diff(a: $ty, b: $ty) -> ($ulong, bool) {
          if b > a {
            (b.wrapping_sub(a) as $uty as $ulong, true)
          } else {
            (a.wrapping_sub(b) as $uty as $ulong, false)
          }
        }
        let (ux, ux_neg) = diff(q[0], p[0]);
        let (vy, vy_neg) = diff(r[1], p[1]);
        let ux_vy_neg = (ux_neg ^ vy_neg) && ux != 0 && vy != 0;
        let (uy, uy_neg) = diff(q[1], p[1]);
        let (vx, vx_neg) = diff(r[0], p[0]);
        let uy_vx_neg = (uy_neg ^ vx_neg) && uy != 0 && vx != 0;
        match (ux_vy_neg, uy_vx_neg) {
          (true, false) => Ordering::Less,
          (false, true) => Ordering::Greater,
          (true, true) => (uy * vx).cmp(&(ux * vy)),
          (false, false) => (ux * vy).cmp(&(uy * vx)),
        }
      }

      fn to_f64(&self) -> f64 {
        *self as f64
      }
    }
  };
}

macro_rules! arbitrary_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          self.cmp(other)
        }
      }

      impl PolygonScalar for $ty {
        fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          let slope1 = (&r[1] - &q[1]) * (&q[0] - &p[0]);
          let slope2 = (&q[1] - &p[1]) * (&r[0] - &q[0]);
          slope1.cmp(&slope2)
        }

        fn to_f64(&self) -> f64 {
          ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
        }
      }
    )*
  };
}

// Uses the adaptive precision machinery of `geometry_predicates`. Exact for
// every finite input, and only slower than the naive cross product when the
// points are nearly colinear.
fn orient2d_ordering(p: [f64; 2], q: [f64; 2], r: [f64; 2]) -> Ordering {
  let orient = geometry_predicates::predicates::orient2d(p, q, r);
  if orient > 0.0 {
    Ordering::Greater
  } else if orient < 0.0 {
    Ordering::Less
  } else {
    Ordering::Equal
  }
}

macro_rules! wrapped_floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          self.cmp(other)
        }
      }

      impl PolygonScalar for $ty {
        fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          orient2d_ordering(
            [p[0].into_inner() as f64, p[1].into_inner() as f64],
            [q[0].into_inner() as f64, q[1].into_inner() as f64],
            [r[0].into_inner() as f64, r[1].into_inner() as f64],
          )
        }

        fn to_f64(&self) -> f64 {
          self.into_inner() as f64
        }
      }
    )*
  };
}

macro_rules! floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          <$ty>::total_cmp(self, other)
        }
      }

      impl PolygonScalar for $ty {
        fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          orient2d_ordering(
            [p[0] as f64, p[1] as f64],
            [q[0] as f64, q[1] as f64],
            [r[0] as f64, r[1] as f64],
          )
        }

        fn to_f64(&self) -> f64 {
          *self as f64
        }
      }
    )*
  };
}

fixed_precision!(i8, u8, i16, u16);
fixed_precision!(i16, u16, i32, u32);
fixed_precision!(i32, u32, i64, u64);
fixed_precision!(i64, u64, i128, u128);
fixed_precision!(isize, usize, i128, u128);
arbitrary_precision!(BigInt);
wrapped_floating_precision!(ordered_float::OrderedFloat<f32>);
wrapped_floating_precision!(ordered_float::OrderedFloat<f64>);
wrapped_floating_precision!(ordered_float::NotNan<f32>);
wrapped_floating_precision!(ordered_float::NotNan<f64>);
floating_precision!(f32);
floating_precision!(f64);

#[cfg(test)]
pub mod testing;
