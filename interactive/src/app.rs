use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::program::ProgramError;

use triangle::rotation::RotationError;
use triangle::EXIT_FAILURE;
use triangle::scene::LoaderError;

use crate::pipeline::Pipeline;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
}

impl App {
    /// Opens the window and makes a GL 3.3 core context current on this thread.
    pub fn new(width: u32, height: u32) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(width, height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title("Rotated triangle");
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // the picker has to hand back a config, so an empty match
                // set is the one setup failure that panics instead of
                // becoming ContextAcquisition
                configs.reduce(|first, _| first).expect("no GL config to pick")
            })
            .map_err(|e| AppError::ContextAcquisition(e.to_string()))?;

        let window = window
            .ok_or_else(|| AppError::ContextAcquisition("window was not created".into()))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr) }
            .and_then(|context| context.make_current(&gl_window.surface))
            .map_err(|e| AppError::ContextAcquisition(e.to_string()))?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        log::info!("GL context ready, {}x{}", width, height);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
        })
    }

    pub fn run(self, mut pipeline: Pipeline) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
        } = self;

        let (width, height): (u32, u32) = gl_window.window.inner_size().into();
        pipeline.resize(width, height);

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if let (Some(w), Some(h)) =
                            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                        {
                            gl_window.surface.resize(&gl_context, w, h);
                            pipeline.resize(size.width, size.height);
                            gl_window.window.request_redraw();
                        }
                    }
                    WindowEvent::CloseRequested => {
                        log::debug!("window closed");
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    pipeline.draw();

                    if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                        log::error!("could not present frame: {e}");
                        control_flow.set_exit_with_code(EXIT_FAILURE);
                    }
                }
                _ => (),
            }
        })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();

        let zero_size = || AppError::ContextAcquisition("window has zero size".into());
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or_else(zero_size)?,
            NonZeroU32::new(height).ok_or_else(zero_size)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs) }
            .map_err(|e| AppError::ContextAcquisition(e.to_string()))?;

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to get the rendering context: {0}")]
    ContextAcquisition(String),
    #[error("failed to initialize shaders: {0}")]
    ShaderInitialization(ProgramError),
    #[error("failed to set up vertex data: {0}")]
    ResourceCreation(String),
    #[error(transparent)]
    Scene(#[from] LoaderError),
    #[error(transparent)]
    Rotation(#[from] RotationError),
}
