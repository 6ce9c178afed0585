pub mod triangulation;

#[doc(inline)]
pub use triangulation::earclip::earclip;
#[doc(inline)]
pub use triangulation::{Triangulate, TriangulationSettings};
