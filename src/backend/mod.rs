pub mod bvh;
mod context;
mod framebuffer;
mod renderer;

pub use context::Context;
pub use framebuffer::Framebuffer;
pub use renderer::Renderer;
