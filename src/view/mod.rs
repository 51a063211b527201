// VIEW: Rendering
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(not(target_arch = "wasm32"))]
pub mod gpu_init;

pub use render::{Paint, Rect, Renderer, SpriteLayout};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
#[cfg(not(target_arch = "wasm32"))]
pub use gpu_init::{GpuContext, GpuInitError};
