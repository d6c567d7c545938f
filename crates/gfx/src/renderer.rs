use egui::{ClippedPrimitive, Context as EguiContext, viewport::ViewportId};
use egui_wgpu::{
    Renderer as EguiWgpuRenderer, ScreenDescriptor,
    wgpu::{
        Color, CommandEncoderDescriptor, CreateSurfaceError, Device, DeviceDescriptor, Features,
        Instance, InstanceDescriptor, Limits, LoadOp, MemoryHints, Operations, PowerPreference,
        PresentMode, Queue, RenderPassColorAttachment, RenderPassDescriptor, RequestAdapterError,
        RequestAdapterOptions, RequestDeviceError, StoreOp, Surface, SurfaceConfiguration,
        SurfaceError, SurfaceTexture, TextureUsages, TextureViewDescriptor, Trace,
    },
};
use egui_winit::State as EguiWinitState;
use std::fmt;
use std::sync::Arc;
use winit::{dpi::PhysicalSize, event::WindowEvent, window::Window};

#[derive(Debug)]
pub enum RendererError {
    Surface(CreateSurfaceError),
    Adapter(RequestAdapterError),
    Device(RequestDeviceError),
    /// The surface reported no usable texture format or alpha mode.
    UnsupportedSurface,
    /// Acquiring the next frame failed for a reason other than a resize.
    Frame(SurfaceError),
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::Surface(err) => write!(f, "failed to create surface: {err}"),
            RendererError::Adapter(err) => write!(f, "no suitable adapter: {err}"),
            RendererError::Device(err) => write!(f, "failed to open device: {err}"),
            RendererError::UnsupportedSurface => write!(f, "surface has no supported format"),
            RendererError::Frame(err) => write!(f, "failed to acquire frame: {err}"),
        }
    }
}

impl std::error::Error for RendererError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RendererError::Surface(err) => Some(err),
            RendererError::Adapter(err) => Some(err),
            RendererError::Device(err) => Some(err),
            RendererError::UnsupportedSurface => None,
            RendererError::Frame(err) => Some(err),
        }
    }
}

/// egui on top of a wgpu surface bound to one winit window.
pub struct Renderer {
    egui_context: EguiContext,
    egui_state: EguiWinitState,
    egui_renderer: EguiWgpuRenderer,
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    surface_config: SurfaceConfiguration,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let egui_context = EguiContext::default();

        let egui_state = EguiWinitState::new(
            egui_context.clone(),
            ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let instance = Instance::new(&InstanceDescriptor::default());
        let size = window.inner_size();
        let surface = instance
            .create_surface(window)
            .map_err(RendererError::Surface)?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .map_err(RendererError::Adapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("measure device"),
            required_features: Features::empty(),
            required_limits: Limits::default(),
            memory_hints: MemoryHints::Performance,
            trace: Trace::default(),
        }))
        .map_err(RendererError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RendererError::UnsupportedSurface)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RendererError::UnsupportedSurface)?;

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 0,
        };
        surface.configure(&device, &config);
        log::debug!(target: "measure.gfx", "surface configured: {format:?} {}x{}", config.width, config.height);

        let egui_renderer = EguiWgpuRenderer::new(&device, format, None, 1, true);

        Ok(Self {
            egui_context,
            egui_state,
            egui_renderer,
            surface,
            device,
            queue,
            surface_config: config,
        })
    }

    /// Forward a window event to egui. Returns `true` if egui wants a repaint.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).repaint
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.surface_config.width = new_size.width.max(1);
        self.surface_config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Build one egui frame with `build_ui` and present it.
    ///
    /// Transient surface states (lost, outdated, timed out) skip the frame;
    /// anything else is returned as [`RendererError::Frame`].
    pub fn render<F: FnOnce(&EguiContext)>(
        &mut self,
        window: &Window,
        build_ui: F,
    ) -> Result<(), RendererError> {
        let Some(frame) = self.acquire_frame()? else {
            return Ok(());
        };

        let raw_input = self.egui_state.take_egui_input(window);
        self.egui_context.begin_pass(raw_input);
        build_ui(&self.egui_context);
        let output = self.egui_context.end_pass();
        self.egui_state
            .handle_platform_output(window, output.platform_output);

        let clipped = self
            .egui_context
            .tessellate(output.shapes, output.pixels_per_point);
        let screen = ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: output.pixels_per_point,
        };

        for (id, delta) in &output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        self.draw(&frame, &clipped, &screen);
        for id in &output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        frame.present();
        Ok(())
    }

    fn acquire_frame(&mut self) -> Result<Option<SurfaceTexture>, RendererError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(SurfaceError::Lost) => {
                log::debug!(target: "measure.gfx", "surface lost; reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                Ok(None)
            }
            Err(SurfaceError::Outdated | SurfaceError::Timeout) => Ok(None),
            Err(err) => Err(RendererError::Frame(err)),
        }
    }

    fn draw(
        &mut self,
        frame: &SurfaceTexture,
        clipped: &[ClippedPrimitive],
        screen: &ScreenDescriptor,
    ) {
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("measure encoder"),
            });

        let callbacks = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            clipped,
            screen,
        );

        {
            let pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("measure egui pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color::BLACK),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut pass.forget_lifetime(), clipped, screen);
        }

        self.queue
            .submit(callbacks.into_iter().chain(Some(encoder.finish())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn frame_errors_keep_their_source() {
        let err = RendererError::Frame(SurfaceError::OutOfMemory);
        assert!(err.to_string().starts_with("failed to acquire frame: "));
        assert!(err.source().is_some());
        assert!(RendererError::UnsupportedSurface.source().is_none());
    }
}
