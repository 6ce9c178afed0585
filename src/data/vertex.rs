use super::Point;

/// Position of a vertex in a polygon's vertex array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
  pub fn usize(self) -> usize {
    self.0
  }
}

impl From<usize> for VertexId {
  fn from(idx: usize) -> VertexId {
    VertexId(idx)
  }
}

impl std::fmt::Display for VertexId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Indices of one output triangle.
pub type TriangleIds = (VertexId, VertexId, VertexId);

/// 8-bit RGBA.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Color {
  pub const WHITE: Color = Color::new(255, 255, 255, 255);
  pub const BLACK: Color = Color::new(0, 0, 0, 255);
  pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color { r, g, b, a }
  }

  pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::new(r, g, b, 255)
  }
}

impl Default for Color {
  fn default() -> Color {
    Color::WHITE
  }
}

/// A render vertex. Only the position takes part in triangulation; color and
/// texture coordinates are copied into the expanded vertex buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex<T> {
  pub position: Point<T, 2>,
  pub color: Color,
  pub tex_coords: Point<f32, 2>,
}

impl<T> Vertex<T> {
  pub fn new(position: Point<T, 2>) -> Vertex<T> {
    Vertex {
      position,
      color: Color::WHITE,
      tex_coords: Point::new([0.0, 0.0]),
    }
  }

  #[must_use]
  pub fn with_color(mut self, color: Color) -> Vertex<T> {
    self.color = color;
    self
  }

  #[must_use]
  pub fn with_tex_coords(mut self, tex_coords: Point<f32, 2>) -> Vertex<T> {
    self.tex_coords = tex_coords;
    self
  }
}

impl<T> From<Point<T, 2>> for Vertex<T> {
  fn from(position: Point<T, 2>) -> Vertex<T> {
    Vertex::new(position)
  }
}
