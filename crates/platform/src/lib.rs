use app_api::UiApp;
use gfx::{Renderer, RendererError};
use std::fmt;
use std::sync::Arc;
use std::{thread, time::Duration};
use winit::{
    application::ApplicationHandler,
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

pub mod logging;

const FRAME: Duration = Duration::from_millis(16); // ~60Hz

#[derive(Debug)]
pub enum PlatformError {
    EventLoop(EventLoopError),
    Window(OsError),
    Renderer(RendererError),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::EventLoop(err) => write!(f, "event loop: {err}"),
            PlatformError::Window(err) => write!(f, "failed to create window: {err}"),
            PlatformError::Renderer(err) => write!(f, "renderer: {err}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformError::EventLoop(err) => Some(err),
            PlatformError::Window(err) => Some(err),
            PlatformError::Renderer(err) => Some(err),
        }
    }
}

impl From<EventLoopError> for PlatformError {
    fn from(err: EventLoopError) -> Self {
        PlatformError::EventLoop(err)
    }
}

#[derive(Debug)]
enum UserEvent {
    Tick,
}

/// Open a window titled `title` and drive `app` until it is closed.
pub fn run<A: UiApp>(title: &str, app: A) -> Result<(), PlatformError> {
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let mut host = PlatformApp {
        app,
        title: title.to_string(),
        window: None,
        renderer: None,
        proxy: Some(proxy),
        ticker_started: false,
        exited: false,
        error: None,
    };
    event_loop.run_app(&mut host)?;
    host.shutdown();

    match host.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct PlatformApp<A: UiApp> {
    app: A,
    title: String,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    exited: bool,
    error: Option<PlatformError>,
}

impl<A: UiApp> PlatformApp<A> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PlatformError) {
        log::error!(target: "measure.platform", "{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn shutdown(&mut self) {
        if !self.exited {
            self.exited = true;
            self.app.on_exit();
        }
    }

    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;

        if let Some(proxy) = self.proxy.take() {
            thread::spawn(move || {
                loop {
                    if proxy.send_event(UserEvent::Tick).is_err() {
                        break;
                    }
                    thread::sleep(FRAME);
                }
            });
        }
    }
}

impl<A: UiApp> ApplicationHandler<UserEvent> for PlatformApp<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes().with_title(self.title.as_str());
            let window = match event_loop.create_window(attrs) {
                Ok(window) => Arc::new(window),
                Err(err) => return self.fail(event_loop, PlatformError::Window(err)),
            };
            match Renderer::new(Arc::clone(&window)) {
                Ok(renderer) => self.renderer = Some(renderer),
                Err(err) => return self.fail(event_loop, PlatformError::Renderer(err)),
            }
            self.window = Some(window);
        }

        self.start_ticker();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };

        if renderer.on_window_event(window, &event) {
            window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!(target: "measure.platform", "close requested");
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => renderer.resize(size),
            WindowEvent::RedrawRequested => {
                let app = &mut self.app;
                if let Err(err) = renderer.render(window, |ctx| app.ui(ctx)) {
                    self.fail(event_loop, PlatformError::Renderer(err));
                }
            }
            _ => {}
        }
    }
}
