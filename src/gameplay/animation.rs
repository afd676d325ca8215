//! Named spritesheet clips and per-entity frame playback.
use bevy::prelude::*;
use smallvec::SmallVec;
use std::time::Duration;

use crate::core::config::{AnimationConfig, ClipConfig};
use crate::core::system::PresentationSet;
use crate::gameplay::state::scene_exists;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipName {
    Left,
    Turn,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    frames: SmallVec<[usize; 8]>,
    frame_time: Duration,
    looping: bool,
}

impl AnimationClip {
    pub fn from_config(cfg: &ClipConfig) -> Self {
        let frames: SmallVec<[usize; 8]> = if cfg.first <= cfg.last {
            (cfg.first..=cfg.last).collect()
        } else {
            SmallVec::from_slice(&[cfg.first])
        };
        Self {
            frames,
            frame_time: Duration::from_secs_f32(1.0 / cfg.fps.max(0.001)),
            looping: cfg.looping,
        }
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    pub fn first_frame(&self) -> usize {
        self.frames[0]
    }
}

#[derive(Resource, Debug, Clone)]
pub struct AnimationLibrary {
    left: AnimationClip,
    turn: AnimationClip,
    right: AnimationClip,
}

impl AnimationLibrary {
    pub fn from_config(cfg: &AnimationConfig) -> Self {
        Self {
            left: AnimationClip::from_config(&cfg.left),
            turn: AnimationClip::from_config(&cfg.turn),
            right: AnimationClip::from_config(&cfg.right),
        }
    }

    pub fn get(&self, name: ClipName) -> &AnimationClip {
        match name {
            ClipName::Left => &self.left,
            ClipName::Turn => &self.turn,
            ClipName::Right => &self.right,
        }
    }
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}

#[derive(Component, Debug, Clone)]
pub struct SpriteAnimator {
    clip: ClipName,
    cursor: usize,
    timer: Timer,
}

impl SpriteAnimator {
    pub fn new(clip: ClipName, library: &AnimationLibrary) -> Self {
        let c = library.get(clip);
        Self {
            clip,
            cursor: 0,
            timer: Timer::new(c.frame_time, TimerMode::Repeating),
        }
    }

    pub fn clip(&self) -> ClipName {
        self.clip
    }

    /// Switch clip unless it is already playing.
    pub fn play(&mut self, clip: ClipName, library: &AnimationLibrary) {
        if self.clip != clip {
            self.restart(clip, library);
        }
    }

    /// Switch clip and rewind it to its first frame.
    pub fn restart(&mut self, clip: ClipName, library: &AnimationLibrary) {
        *self = Self::new(clip, library);
    }

    pub fn frame(&self, library: &AnimationLibrary) -> usize {
        let frames = library.get(self.clip).frames();
        frames[self.cursor.min(frames.len() - 1)]
    }

    /// Advance playback; returns the atlas index to show.
    pub fn tick(&mut self, delta: Duration, library: &AnimationLibrary) -> usize {
        let clip = library.get(self.clip);
        self.timer.tick(delta);
        let steps = self.timer.times_finished_this_tick() as usize;
        if steps > 0 {
            let len = clip.frames().len();
            self.cursor = if clip.looping {
                (self.cursor + steps) % len
            } else {
                (self.cursor + steps).min(len - 1)
            };
        }
        self.frame(library)
    }
}

pub fn animate_sprites(
    time: Res<Time>,
    library: Res<AnimationLibrary>,
    mut q: Query<(&mut SpriteAnimator, &mut Sprite)>,
) {
    for (mut animator, mut sprite) in &mut q {
        let frame = animator.tick(time.delta(), &library);
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            if atlas.index != frame {
                atlas.index = frame;
            }
        }
    }
}

pub struct SpriteAnimationPlugin;

impl Plugin for SpriteAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationLibrary>().add_systems(
            Update,
            animate_sprites
                .in_set(PresentationSet)
                .run_if(scene_exists),
        );
    }
}
