pub mod fold;
pub mod mesh;
pub mod pattern;

pub use fold::FoldParams;
pub use mesh::TriangleMesh;
pub use pattern::FlatPattern;
