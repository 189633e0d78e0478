use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    compile::compiler::CompiledScene,
    eval::sampler::{FrameSample, PhysicsIntegrator},
    foundation::core::{FrameIndex, FrameRange, Fps},
    foundation::error::{LyricError, LyricResult},
    session::playhead::Playhead,
};

/// Shared flag checked between export frames.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportStats {
    pub frames: u64,
}

/// Fixed-step `1 / fps` walk over a scene.
pub struct ExportStepper<P> {
    playhead: Playhead<P>,
    fps: Fps,
    range: FrameRange,
    cancel: CancelToken,
}

impl<P: PhysicsIntegrator> ExportStepper<P> {
    /// Covers the whole song: frames `0..ceil(duration * fps)`, at least one frame.
    pub fn new(scene: Arc<CompiledScene>, fps: Fps, physics: P) -> LyricResult<Self> {
        Fps::new(fps.num, fps.den)?;
        let frames = fps.secs_to_frames_ceil(scene.duration()).max(1);
        let range = FrameRange::new(FrameIndex(0), FrameIndex(frames))?;
        Ok(Self {
            playhead: Playhead::new(scene, physics),
            fps,
            range,
            cancel: CancelToken::new(),
        })
    }

    pub fn with_range(mut self, range: FrameRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn range(&self) -> FrameRange {
        self.range
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Song time of `frame`.
    pub fn frame_time(&self, frame: FrameIndex) -> f64 {
        self.playhead.scene().song_start + self.fps.frames_to_secs(frame.0)
    }

    /// Step every frame of the range into `sink`. Cancellation is checked before each frame,
    /// so the sink only ever sees whole frames.
    #[tracing::instrument(skip_all, fields(start = self.range.start.0, end = self.range.end.0))]
    pub fn run<F>(&mut self, mut sink: F) -> LyricResult<ExportStats>
    where
        F: FnMut(FrameIndex, &FrameSample) -> LyricResult<()>,
    {
        self.playhead.rewind();
        let mut frames = 0u64;
        for f in self.range.start.0..self.range.end.0 {
            if self.cancel.is_cancelled() {
                tracing::debug!(frame = f, "export cancelled");
                return Err(LyricError::Cancelled { frame: f });
            }
            let frame = FrameIndex(f);
            let sample = self.playhead.sample(self.frame_time(frame));
            sink(frame, &sample)?;
            frames += 1;
        }
        tracing::debug!(frames, "export finished");
        Ok(ExportStats { frames })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/export.rs"]
mod tests;
