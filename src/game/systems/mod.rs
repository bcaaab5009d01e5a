pub mod placement;
pub mod retraction;
pub mod marking;
pub mod render;

pub use placement::*;
pub use retraction::*;
pub use marking::*;
pub use render::*;
