pub mod fps_overlay;

pub use fps_overlay::{FpsOverlay, OverlayStyle};
