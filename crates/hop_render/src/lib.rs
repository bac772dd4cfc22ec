pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod rect_pipeline;
pub mod vertex;

pub use batch::RectBatch;
pub use camera::{Camera2D, CameraUniform};
pub use gpu_context::GpuContext;
pub use rect_pipeline::{RectPipeline, RectRenderer};
pub use vertex::RectVertex;
