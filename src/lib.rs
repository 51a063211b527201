pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod ui;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use controller::{Action, ActionSet, FrameLoop, InputSnapshot, Simulation};
pub use model::{ConfigError, Entity, PhysicsConfig, PhysicsPreset, TimeStepConfig};
pub use view::{Renderer, SpriteLayout};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, UrlSearchParams, Window};

    use crate::controller::input::wasm::keyboard_event_to_input;
    use crate::controller::{FrameLoop, InputEvent, InputProcessor, InputState};
    use crate::logging;
    use crate::model::{PhysicsPreset, TimeStepConfig};
    use crate::view::CanvasRenderer;

    const CANVAS_SIZE: u32 = 800;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();
        let (window, document, canvas) = init_canvas(CANVAS_SIZE, CANVAS_SIZE)?;

        let preset = preset_from_query(&window)?;
        let start_time = now_seconds(&window);
        let mut frame_loop = FrameLoop::new(preset.config(), TimeStepConfig::default(), start_time)
            .map_err(|e| js_error(e.to_string()))?;
        tracing::info!(preset = preset.name(), "simulation ready");

        let input_state = Rc::new(RefCell::new(InputState::new()));
        let input_processor = InputProcessor::default();
        setup_input_listeners(&document, &window, input_state.clone(), input_processor.clone())?;

        let mut renderer = CanvasRenderer::new(&canvas)?;
        let window_for_loop = window.clone();
        RcCellCallback::new(window, move || {
            let snapshot = input_processor.snapshot(&input_state.borrow());
            frame_loop.frame(now_seconds(&window_for_loop), &snapshot, &mut renderer);
        })
        .start()
    }

    fn now_seconds(window: &Window) -> f64 {
        window.performance().map(|p| p.now()).unwrap_or(0.0) / 1000.0
    }

    /// `?preset=springy` selects a physics variant; absent means standard
    fn preset_from_query(window: &Window) -> Result<PhysicsPreset, JsValue> {
        let search = window.location().search()?;
        let params = UrlSearchParams::new_with_str(&search)?;
        match params.get("preset") {
            Some(name) => PhysicsPreset::from_name(&name).map_err(|e| js_error(e.to_string())),
            None => Ok(PhysicsPreset::default()),
        }
    }

    /// Setup keyboard and focus listeners feeding the shared input state
    fn setup_input_listeners(
        document: &Document,
        window: &Window,
        input_state: Rc<RefCell<InputState>>,
        input_processor: InputProcessor,
    ) -> Result<(), JsValue> {
        // Keyboard down
        {
            let input_state = input_state.clone();
            let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if input_processor.is_bound(&e.key()) {
                    e.prevent_default();
                }
                input_state.borrow_mut().process_event(&keyboard_event_to_input(&e, true));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
            keydown.forget();
        }

        // Keyboard up
        {
            let input_state = input_state.clone();
            let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                input_state.borrow_mut().process_event(&keyboard_event_to_input(&e, false));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
            keyup.forget();
        }

        // Focus loss - clear all keys
        {
            let input_state = input_state.clone();
            let blur = Closure::wrap(Box::new(move |_e: Event| {
                input_state.borrow_mut().process_event(&InputEvent::FocusLost);
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
            blur.forget();
        }

        // Visibility change - clear all keys
        {
            let doc = document.clone();
            let visibility = Closure::wrap(Box::new(move |_e: Event| {
                input_state
                    .borrow_mut()
                    .process_event(&InputEvent::VisibilityChanged { visible: !doc.hidden() });
            }) as Box<dyn FnMut(Event)>);
            document.add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
            visibility.forget();
        }

        Ok(())
    }

    fn init_canvas(width: u32, height: u32) -> Result<(Window, Document, HtmlCanvasElement), JsValue> {
        let window = web_sys::window().ok_or(js_error("no global `window`"))?;
        let document = window.document().ok_or(js_error("no document on window"))?;
        let body = document.body().ok_or(js_error("no body on document"))?;
        let canvas_el = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error("failed to create canvas"))?;
        canvas_el.set_width(width);
        canvas_el.set_height(height);
        body.append_child(&canvas_el)?;
        Ok((window, document, canvas_el))
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }

    /// requestAnimationFrame loop; each frame is scheduled only after the previous returns
    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut()>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) -> Result<(), JsValue> {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                inner.borrow_mut().as_mut()();

                // Recursively schedule next frame
                let cb_ref = callback_clone.borrow();
                if let Some(cb) = cb_ref.as_ref() {
                    if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        tracing::error!(?e, "requestAnimationFrame failed, loop stopped");
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(cb) = callback.borrow().as_ref() {
                self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            }

            // Leak the closure to keep it alive
            std::mem::forget(callback);
            Ok(())
        }
    }
}
