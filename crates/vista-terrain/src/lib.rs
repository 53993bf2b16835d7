//! Procedural height-field terrain: the elevation function, its memoization
//! cache, and the per-column ray-marching renderer that projects it into a
//! framebuffer.

mod cache;
mod height_field;
mod occlusion;
mod renderer;
mod shading;

pub use cache::{CachedHeightField, HeightCache, cell_key};
pub use height_field::{HeightField, HeightFieldParams, HeightQuery};
pub use occlusion::ColumnOcclusion;
pub use renderer::{TerrainFrameStats, TerrainRenderer, TerrainSettings};
pub use shading::{BiomeWeights, FrameLighting, TerrainShader};
