use claims::debug_assert_ok;

use crate::algorithms::triangulation::{signed_area_2x, Triangulate, TriangulationSettings};
use crate::data::{Color, Point, PointLocation, TriangleIds, TriangleView, Vertex, VertexId};
use crate::{Error, PolygonScalar};

/// A filled polygon: render vertices, hole layout, triangulation settings and
/// the triangles produced by the last [`update`](Polygon::update).
///
/// The first ring (everything before the first hole start) is the outer
/// boundary. Each hole start begins a new ring that runs until the next hole
/// start or the end of the vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<T> {
  pub(crate) vertices: Vec<Vertex<T>>,
  pub(crate) hole_starts: Vec<usize>,
  pub(crate) settings: TriangulationSettings,
  triangles: Vec<TriangleIds>,
}

impl<T> Polygon<T> {
  /// Create a polygon without holes. Nothing is triangulated until
  /// [`update`](Polygon::update) is called.
  pub fn new(vertices: Vec<Vertex<T>>) -> Polygon<T> {
    Polygon {
      vertices,
      hole_starts: Vec::new(),
      settings: TriangulationSettings::default(),
      triangles: Vec::new(),
    }
  }

  /// White vertices with zero texture coordinates.
  pub fn from_points(points: Vec<Point<T, 2>>) -> Polygon<T> {
    Polygon::new(points.into_iter().map(Vertex::new).collect())
  }

  pub fn len(&self) -> usize {
    self.vertices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn vertices(&self) -> &[Vertex<T>] {
    &self.vertices
  }

  pub fn vertex(&self, id: VertexId) -> Result<&Vertex<T>, Error> {
    let len = self.vertices.len();
    self.vertices.get(id.usize()).ok_or(Error::IndexOutOfRange {
      index: id.usize(),
      len,
    })
  }

  pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex<T>, Error> {
    let len = self.vertices.len();
    self.vertices.get_mut(id.usize()).ok_or(Error::IndexOutOfRange {
      index: id.usize(),
      len,
    })
  }

  /// Moving a vertex does not re-triangulate; call [`update`](Polygon::update).
  pub fn set_position(&mut self, id: VertexId, position: Point<T, 2>) -> Result<(), Error> {
    self.vertex_mut(id)?.position = position;
    Ok(())
  }

  pub fn set_color(&mut self, id: VertexId, color: Color) -> Result<(), Error> {
    self.vertex_mut(id)?.color = color;
    Ok(())
  }

  pub fn set_tex_coords(&mut self, id: VertexId, tex_coords: Point<f32, 2>) -> Result<(), Error> {
    self.vertex_mut(id)?.tex_coords = tex_coords;
    Ok(())
  }

  pub fn set_color_all(&mut self, color: Color) {
    for vertex in &mut self.vertices {
      vertex.color = color;
    }
  }

  /// Mark `index` as the first vertex of a hole. Starts are kept sorted and
  /// adding the same start twice has no effect.
  pub fn add_hole_start(&mut self, index: usize) -> Result<(), Error> {
    let len = self.vertices.len();
    if index >= len {
      return Err(Error::IndexOutOfRange { index, len });
    }
    if let Err(pos) = self.hole_starts.binary_search(&index) {
      self.hole_starts.insert(pos, index);
    }
    Ok(())
  }

  pub fn clear_holes(&mut self) {
    self.hole_starts.clear();
  }

  pub fn hole_starts(&self) -> &[usize] {
    &self.hole_starts
  }

  pub fn hole_count(&self) -> usize {
    self.hole_starts.len()
  }

  /// Vertices of hole `i`.
  pub fn hole(&self, i: usize) -> Result<&[Vertex<T>], Error> {
    let start = *self.hole_starts.get(i).ok_or(Error::IndexOutOfRange {
      index: i,
      len: self.hole_starts.len(),
    })?;
    let end = self
      .hole_starts
      .get(i + 1)
      .copied()
      .unwrap_or(self.vertices.len());
    Ok(&self.vertices[start..end])
  }

  /// Vertices before the first hole start.
  pub fn outer_boundary(&self) -> &[Vertex<T>] {
    let end = self
      .hole_starts
      .first()
      .copied()
      .unwrap_or(self.vertices.len());
    &self.vertices[..end]
  }

  pub fn settings(&self) -> &TriangulationSettings {
    &self.settings
  }

  /// Expect a clockwise outer boundary (and counter-clockwise holes).
  pub fn set_reverse_direction(&mut self, reverse_direction: bool) {
    self.settings.reverse_direction = reverse_direction;
  }

  pub fn set_triangle_limit(&mut self, triangle_limit: usize) {
    self.settings.triangle_limit = triangle_limit;
  }

  /// Triangles from the last successful [`update`](Polygon::update). Empty
  /// if it failed.
  pub fn triangles(&self) -> &[TriangleIds] {
    &self.triangles
  }

  /// One segment per triangle edge, suitable for a line-list wireframe.
  pub fn wireframe_segments(&self) -> Vec<(VertexId, VertexId)> {
    self
      .triangles
      .iter()
      .flat_map(|&(a, b, c)| [(a, b), (b, c), (c, a)])
      .collect()
  }

  fn check_triangles(&self) -> Result<(), Error> {
    let len = self.vertices.len();
    match self
      .triangles
      .iter()
      .flat_map(|&(a, b, c)| [a, b, c])
      .find(|id| id.usize() >= len)
    {
      Some(id) => Err(Error::IndexOutOfRange {
        index: id.usize(),
        len,
      }),
      None => Ok(()),
    }
  }
}

impl<T> Polygon<T>
where
  T: Clone,
{
  /// Three vertices per triangle, copied from the vertices the triangle
  /// references. Ready for a triangle-list draw call.
  pub fn fill_vertices(&self) -> Vec<Vertex<T>> {
    self
      .triangles
      .iter()
      .flat_map(|&(a, b, c)| [a, b, c])
      .map(|id| self.vertices[id.usize()].clone())
      .collect()
  }

  /// Two vertices per wireframe segment, all drawn in `color`.
  pub fn wireframe_vertices(&self, color: Color) -> Vec<Vertex<T>> {
    self
      .wireframe_segments()
      .into_iter()
      .flat_map(|(a, b)| [a, b])
      .map(|id| self.vertices[id.usize()].clone().with_color(color))
      .collect()
  }
}

impl<T> Polygon<T>
where
  T: PolygonScalar,
{
  /// Re-triangulate from the current vertices, holes and settings.
  ///
  /// On failure the triangle list is cleared, so the fill disappears rather
  /// than showing stale triangles, and the error is returned.
  pub fn update(&mut self) -> Result<(), Error> {
    match (&*self).triangulate() {
      Ok(triangles) => {
        self.triangles = triangles;
        debug_assert_ok!(self.check_triangles());
        Ok(())
      }
      Err(err) => {
        log::debug!("triangulation failed: {}", err);
        self.triangles.clear();
        Err(err)
      }
    }
  }

  fn triangle_views(&self) -> impl Iterator<Item = TriangleView<'_, T>> + '_ {
    self.triangles.iter().map(move |&(a, b, c)| {
      TriangleView::new([
        &self.vertices[a.usize()].position,
        &self.vertices[b.usize()].position,
        &self.vertices[c.usize()].position,
      ])
    })
  }

  /// Sum of the triangle areas.
  pub fn area(&self) -> f64 {
    self.triangle_views().map(|trig| trig.area()).sum()
  }

  /// True if `pt` lies inside or on the border of any triangle.
  pub fn contains(&self, pt: &Point<T, 2>) -> bool {
    self
      .triangle_views()
      .any(|trig| trig.locate(pt) != PointLocation::Outside)
  }

  /// Arithmetic mean of the outer boundary's vertex positions. The origin for
  /// an empty polygon.
  pub fn centroid(&self) -> Point<f64, 2> {
    let outer = self.outer_boundary();
    if outer.is_empty() {
      return Point::new([0.0, 0.0]);
    }
    let n = outer.len() as f64;
    let [x, y] = outer.iter().fold([0.0, 0.0], |[x, y], vertex| {
      let pt = vertex.position.to_f64();
      [x + pt[0], y + pt[1]]
    });
    Point::new([x / n, y / n])
  }

  /// Area-weighted mean of the triangle centroids. Falls back to
  /// [`centroid`](Polygon::centroid) when the triangles cover no area.
  pub fn center_of_mass(&self) -> Point<f64, 2> {
    let (total, x, y) = self
      .triangle_views()
      .fold((0.0, 0.0, 0.0), |(total, x, y), trig| {
        let area = trig.area();
        let c = trig.centroid();
        (total + area, x + area * c[0], y + area * c[1])
      });
    if total > 0.0 {
      Point::new([x / total, y / total])
    } else {
      self.centroid()
    }
  }

  /// Twice the signed area of the outer boundary. Positive when it winds
  /// counter-clockwise.
  pub fn signed_area_2x_outer(&self) -> f64 {
    let ring: Vec<VertexId> = (0..self.outer_boundary().len()).map(VertexId).collect();
    let points: Vec<Point<T, 2>> = self
      .outer_boundary()
      .iter()
      .map(|vertex| vertex.position.clone())
      .collect();
    signed_area_2x(&points, &ring)
  }
}
