use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

/// Fixed-size window description. Dimensions are physical pixels so the
/// scaled-up pixel art maps 1:1 onto the surface.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let size = PhysicalSize::new(config.width, config.height);
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(size)
        .with_min_inner_size(size)
        .with_max_inner_size(size)
        .with_resizable(false);

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Failed to create window: {e}"))?;
    log::debug!("Window scale factor: {}", window.scale_factor());
    Ok(Arc::new(window))
}
