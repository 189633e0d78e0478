use std::sync::Arc;

use crate::{
    compile::compiler::CompiledScene,
    eval::sampler::{FrameSample, PhysicsIntegrator, sample_scene},
};

/// Time driver shared by live preview and offline export.
///
/// Each sample feeds the beats crossed since the previous sample to the integrator, ticks it
/// once, and samples the scene with the resulting state. Seeking backwards resets the
/// integrator, so preview and export see the same physics for the same sequence of times.
pub struct Playhead<P> {
    scene: Arc<CompiledScene>,
    physics: P,
    last_time: Option<f64>,
}

impl<P: PhysicsIntegrator> Playhead<P> {
    pub fn new(scene: Arc<CompiledScene>, physics: P) -> Self {
        Self {
            scene,
            physics,
            last_time: None,
        }
    }

    pub fn scene(&self) -> &Arc<CompiledScene> {
        &self.scene
    }

    /// Switch to a recompiled scene. The integrator keeps its state.
    pub fn set_scene(&mut self, scene: Arc<CompiledScene>) {
        self.scene = scene;
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// Forget the previous position and reset the integrator.
    pub fn rewind(&mut self) {
        self.physics.reset();
        self.last_time = None;
    }

    pub fn sample(&mut self, t: f64) -> FrameSample {
        match self.last_time {
            Some(prev) if t >= prev => {
                for beat in self
                    .scene
                    .beats
                    .iter()
                    .filter(|b| b.time > prev && b.time <= t)
                {
                    self.physics.on_beat(beat.magnitude, beat.is_downbeat);
                }
            }
            last => {
                // Fresh start or backward seek: only beats landing exactly on `t` fire.
                if last.is_some() {
                    self.physics.reset();
                }
                for beat in self.scene.beats.iter().filter(|b| b.time == t) {
                    self.physics.on_beat(beat.magnitude, beat.is_downbeat);
                }
            }
        }
        self.last_time = Some(t);
        let state = self.physics.tick();
        sample_scene(&self.scene, t, &state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/playhead.rs"]
mod tests;
