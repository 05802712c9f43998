// Browser side of the particle field: mounts onto a canvas, drives the frame
// loop with requestAnimationFrame and follows window resizes until unmounted.

use crate::canvas::CanvasSurface;
use crate::config::FieldConfig;
use crate::error::{FieldError, Result};
use crate::field::ParticleField;
use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::particle::Size;
use crate::surface::Surface;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type BrowserLoop = FrameLoop<CanvasSurface, BrowserScheduler>;

pub struct BrowserScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for BrowserScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32> {
        let callback = self.callback.borrow();
        let closure = callback
            .as_ref()
            .ok_or_else(|| FieldError::Js("frame callback already released".to_owned()))?;
        Ok(self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())?)
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            console::warn_2(&"cancelAnimationFrame failed".into(), &err);
        }
    }
}

fn window() -> Result<Window> {
    web_sys::window().ok_or(FieldError::NoWindow)
}

fn viewport_size(window: &Window) -> Result<Size> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Size::new(width, height))
}

fn find_canvas(id: &str) -> Result<HtmlCanvasElement> {
    window()?
        .document()
        .ok_or(FieldError::NoDocument)?
        .get_element_by_id(id)
        .ok_or_else(|| FieldError::CanvasNotFound(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FieldError::CanvasNotFound(id.to_owned()))
}

struct Mounted {
    window: Window,
    frame_loop: Rc<RefCell<BrowserLoop>>,
    frame_callback: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
}

impl Mounted {
    fn new(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Mounted> {
        let window = window()?;
        let mut surface = CanvasSurface::new(canvas)?;
        let size = viewport_size(&window)?;
        surface.resize(size);
        let field = ParticleField::new(config, size)?;

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = BrowserScheduler {
            window: window.clone(),
            callback: frame_callback.clone(),
        };
        let frame_loop = Rc::new(RefCell::new(FrameLoop::new(field, surface, scheduler)));

        // Callbacks hold weak references, the handle is the only owner of the loop
        let weak_loop = Rc::downgrade(&frame_loop);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            #[cfg(feature = "frame-timing")]
            let _timer = crate::Timer::new("ParticleField::frame");
            if let Some(frame_loop) = weak_loop.upgrade() {
                let result = frame_loop.borrow_mut().on_frame();
                if let Err(err) = result {
                    console::warn_1(&format!("particle field stopped: {}", err).into());
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let weak_loop = Rc::downgrade(&frame_loop);
        let resize_window = window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let (Some(frame_loop), Ok(size)) = (weak_loop.upgrade(), viewport_size(&resize_window)) {
                frame_loop.borrow_mut().resize(size);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let mounted = Mounted {
            window,
            frame_loop,
            frame_callback,
            on_resize,
        };
        let started = mounted.frame_loop.borrow_mut().start();
        if let Err(err) = started {
            mounted.teardown();
            return Err(err);
        }
        Ok(mounted)
    }

    fn teardown(self) {
        self.frame_loop.borrow_mut().stop();
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
        {
            console::warn_2(&"failed to remove resize listener".into(), &err);
        }
        // nothing can call the frame closure any more, release it
        self.frame_callback.borrow_mut().take();
    }
}

/// Handle to a particle field running on a canvas. Dropping it (or `free()`
/// from js) unmounts the field.
#[wasm_bindgen]
pub struct ParticleFieldHandle {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
    pub fn mount(canvas: HtmlCanvasElement) -> ParticleFieldHandle {
        ParticleFieldHandle::mount_with_config(canvas, FieldConfig::default())
    }

    pub fn mount_with_count(canvas: HtmlCanvasElement, count: u32) -> ParticleFieldHandle {
        ParticleFieldHandle::mount_with_config(canvas, FieldConfig::default().with_count(count as usize))
    }

    /// `palette` is a comma separated list of css hex colours
    pub fn mount_with_palette(canvas: HtmlCanvasElement, palette: &str) -> ParticleFieldHandle {
        ParticleFieldHandle::from_result(
            FieldConfig::default()
                .with_hex_palette(palette)
                .and_then(|config| Mounted::new(canvas, config)),
        )
    }

    pub fn mount_by_id(id: &str) -> ParticleFieldHandle {
        ParticleFieldHandle::from_result(find_canvas(id).and_then(|canvas| Mounted::new(canvas, FieldConfig::default())))
    }

    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.teardown();
            console::debug_1(&"particle field unmounted".into());
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .map(|m| m.frame_loop.borrow().is_running())
            .unwrap_or(false)
    }

    pub fn particle_count(&self) -> u32 {
        self.mounted
            .as_ref()
            .map(|m| m.frame_loop.borrow().field().len() as u32)
            .unwrap_or(0)
    }
}

impl ParticleFieldHandle {
    pub fn mount_with_config(canvas: HtmlCanvasElement, config: FieldConfig) -> ParticleFieldHandle {
        ParticleFieldHandle::from_result(Mounted::new(canvas, config))
    }

    // A missing surface skips the effect silently, anything else is worth a warning
    fn from_result(result: Result<Mounted>) -> ParticleFieldHandle {
        match result {
            Ok(mounted) => {
                let count = mounted.frame_loop.borrow().field().len();
                console::debug_1(&format!("particle field mounted with {} particles", count).into());
                ParticleFieldHandle {
                    mounted: Some(mounted),
                }
            }
            Err(err) => {
                if err.is_surface_unavailable() {
                    console::debug_1(&format!("particle field skipped: {}", err).into());
                } else {
                    console::warn_1(&format!("particle field not started: {}", err).into());
                }
                ParticleFieldHandle { mounted: None }
            }
        }
    }
}

impl Drop for ParticleFieldHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}
