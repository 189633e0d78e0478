use std::sync::Arc;

use crate::{
    compile::compiler::{CompileOpts, CompiledScene, compile_scene},
    compile::fingerprint::{SceneFingerprint, fingerprint_of},
    eval::sampler::PhysicsIntegrator,
    foundation::core::Fps,
    foundation::error::LyricResult,
    layout::measure::TextMeasurer,
    payload::model::ScenePayload,
    session::export::ExportStepper,
    session::playhead::Playhead,
};

/// Owns the measurer and the current scene.
///
/// The scene sits behind an `Arc` that is replaced, never mutated, on recompile: a preview
/// or export holding the previous `Arc` keeps reading a consistent scene.
pub struct SceneSession<M> {
    measurer: M,
    opts: CompileOpts,
    scene: Arc<CompiledScene>,
    payload_digest: SceneFingerprint,
    revision: u64,
}

impl<M: TextMeasurer> SceneSession<M> {
    pub fn new(payload: &ScenePayload, mut measurer: M, opts: CompileOpts) -> LyricResult<Self> {
        let payload_digest = fingerprint_of(payload)?;
        let scene = compile_scene(payload, &mut measurer, &opts)?;
        Ok(Self {
            measurer,
            opts,
            scene: Arc::new(scene),
            payload_digest,
            revision: 0,
        })
    }

    pub fn scene(&self) -> Arc<CompiledScene> {
        Arc::clone(&self.scene)
    }

    pub fn opts(&self) -> &CompileOpts {
        &self.opts
    }

    /// Incremented on every recompile.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn payload_digest(&self) -> SceneFingerprint {
        self.payload_digest
    }

    /// Recompile for a new payload. Returns `false` when the payload is unchanged.
    pub fn update(&mut self, payload: &ScenePayload) -> LyricResult<bool> {
        let digest = fingerprint_of(payload)?;
        if digest == self.payload_digest {
            tracing::debug!(revision = self.revision, "payload unchanged, keeping scene");
            return Ok(false);
        }
        let scene = compile_scene(payload, &mut self.measurer, &self.opts)?;
        self.install(scene, digest);
        Ok(true)
    }

    /// Recompile with new options; the previous scene stays current on error.
    pub fn set_opts(&mut self, payload: &ScenePayload, opts: CompileOpts) -> LyricResult<()> {
        let digest = fingerprint_of(payload)?;
        let scene = compile_scene(payload, &mut self.measurer, &opts)?;
        self.opts = opts;
        self.install(scene, digest);
        Ok(())
    }

    fn install(&mut self, scene: CompiledScene, digest: SceneFingerprint) {
        self.scene = Arc::new(scene);
        self.payload_digest = digest;
        self.revision += 1;
        tracing::debug!(revision = self.revision, "scene swapped");
    }

    pub fn playhead<P: PhysicsIntegrator>(&self, physics: P) -> Playhead<P> {
        Playhead::new(self.scene(), physics)
    }

    pub fn exporter<P: PhysicsIntegrator>(
        &self,
        fps: Fps,
        physics: P,
    ) -> LyricResult<ExportStepper<P>> {
        ExportStepper::new(self.scene(), fps, physics)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scene_session.rs"]
mod tests;
