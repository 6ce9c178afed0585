use array_init::array_init;
use std::ops::Deref;
use std::ops::Index;

use crate::Orientation;
use crate::PolygonScalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Point<T, const N: usize> {
  pub array: [T; N],
}

// Methods on N-dimensional points.
impl<T, const N: usize> Point<T, N> {
  pub const fn new(array: [T; N]) -> Point<T, N> {
    Point { array }
  }

  pub fn cast<U, F>(&self, f: F) -> Point<U, N>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Point {
      array: array_init(|i| f(self.array[i].clone())),
    }
  }

  pub fn to_f64(&self) -> Point<f64, N>
  where
    T: PolygonScalar,
  {
    Point {
      array: array_init(|i| self.array[i].to_f64()),
    }
  }
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T> From<(T, T)> for Point<T, 2> {
  fn from(point: (T, T)) -> Point<T, 2> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl<T, const N: usize> From<[T; N]> for Point<T, N> {
  fn from(array: [T; N]) -> Point<T, N> {
    Point { array }
  }
}

// Methods on two-dimensional points.
impl<T> Point<T, 2> {
  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }

  pub fn orientation(&self, q: &Point<T, 2>, r: &Point<T, 2>) -> Orientation
  where
    T: PolygonScalar,
  {
    Orientation::new(&self.array, &q.array, &r.array)
  }
}

impl Point<f64, 2> {
  pub fn squared_euclidean_distance(&self, rhs: &Point<f64, 2>) -> f64 {
    let dx = self.array[0] - rhs.array[0];
    let dy = self.array[1] - rhs.array[1];
    dx * dx + dy * dy
  }

  pub fn euclidean_distance(&self, rhs: &Point<f64, 2>) -> f64 {
    self.squared_euclidean_distance(rhs).sqrt()
  }
}

impl<T, const N: usize> Deref for Point<T, N> {
  type Target = [T; N];
  fn deref(&self) -> &[T; N] {
    &self.array
  }
}
