//! Frame-rate text overlay rendered via egui on top of the game scene.
//!
//! egui needs a split render because `egui_wgpu::Renderer::render()` wants a
//! `RenderPass<'static>` while `begin_render_pass` borrows the encoder:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references

use hop_core::time::TimeState;
use winit::window::Window;

#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub font_size: f32,
    pub color: [u8; 3],
    pub margin: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            color: [255, 255, 255],
            margin: 8.0,
        }
    }
}

pub struct FpsOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub style: OverlayStyle,
}

impl FpsOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
        style: OverlayStyle,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);
        log::debug!("FPS overlay ready (font size {})", style.font_size);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            style,
        }
    }

    /// Feed a window event to egui. The overlay is display-only, so the
    /// event is never reported as consumed.
    pub fn handle_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) {
        let _ = self.egui_winit_state.on_window_event(window, event);
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let style = self.style;
        let text = fps_label(time.smoothed_fps);
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Area::new(egui::Id::new("fps_overlay"))
                .fixed_pos([style.margin, style.margin])
                .interactable(false)
                .show(ctx, |ui| {
                    let [r, g, b] = style.color;
                    ui.label(
                        egui::RichText::new(text.as_str())
                            .size(style.font_size)
                            .monospace()
                            .color(egui::Color32::from_rgb(r, g, b)),
                    );
                });
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

pub fn fps_label(fps: f64) -> String {
    format!("FPS: {:.0}", fps.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_label_rounds_to_whole_frames() {
        assert_eq!(fps_label(59.6), "FPS: 60");
        assert_eq!(fps_label(30.2), "FPS: 30");
    }

    #[test]
    fn fps_label_never_negative() {
        assert_eq!(fps_label(-1.0), "FPS: 0");
    }
}
