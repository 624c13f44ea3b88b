use std::path::PathBuf;
use std::time::Instant;

use crate::backend::{Context, Framebuffer, Renderer};
use crate::camera::PerspectiveCamera;
use crate::scene::World;
use crate::writer;

/// Filenames of the two checkpoint images.
pub const FIRST_FRAME: &str = "firstFrame.ppm";
pub const ACCUMULATED_FRAME: &str = "accumulatedFrame.ppm";

/// Progress of the render loop. Advances strictly forward; every pass is
/// blocking, so pass k's framebuffer writes are fully visible before pass
/// k + 1 begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    FramebufferReady,
    FirstFramePassed,
    Accumulating(u32),
    Done,
}

/// Drives the renderer through the first frame and the configured number
/// of accumulation passes, writing a checkpoint image after each stage.
pub struct RenderLoop<'a> {
    ctx: &'a Context,
    output_dir: PathBuf,
    state: LoopState,
}

impl<'a> RenderLoop<'a> {
    /// Checkpoints land in `output_dir`; the tool itself always passes the
    /// current working directory.
    pub fn new(ctx: &'a Context, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctx,
            output_dir: output_dir.into(),
            state: LoopState::Uninitialized,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run the whole state machine to completion.
    ///
    /// Checkpoint writes are diagnostic-only: a failed write is reported
    /// and the loop keeps going, so a full render with an unwritable
    /// destination still finishes cleanly.
    pub fn run(&mut self, renderer: &Renderer, camera: &PerspectiveCamera, world: &World) {
        let settings = self.ctx.settings();
        log::debug!("world bounds: {:?}", world.bounds());

        let mut fb = Framebuffer::new(self.ctx);
        fb.reset_accumulation();
        self.state = LoopState::FramebufferReady;

        renderer.render_frame(&mut fb, camera, world);
        self.state = LoopState::FirstFramePassed;
        self.write_checkpoint(&fb, FIRST_FRAME);

        let start = Instant::now();
        for pass in 1..=settings.accumulation_passes {
            self.state = LoopState::Accumulating(pass);
            renderer.render_frame(&mut fb, camera, world);
        }
        eprintln!("RENDERTIME {}", start.elapsed().as_millis());

        self.write_checkpoint(&fb, ACCUMULATED_FRAME);
        self.state = LoopState::Done;
    }

    fn write_checkpoint(&self, fb: &Framebuffer, name: &str) {
        let path = self.output_dir.join(name);
        let pixels = fb.map_color();
        if let Err(err) = writer::write_ppm(&path, fb.width(), fb.height(), &pixels) {
            // io::Error's display already carries the OS error code.
            eprintln!("writing '{}' failed: {}", path.display(), err);
        }
    }
}
