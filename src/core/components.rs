use bevy::prelude::*;

/// Identifier of one game session (one constructed scene instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u32);

/// Tags every entity a session spawned; members of retired sessions are despawned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionMember(pub SessionId);

/// The controllable sprite.
#[derive(Component, Debug, Default)]
pub struct Player;

/// Number of surfaces the player's foot sensor currently touches.
#[derive(Component, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct GroundContacts(pub u32);

impl GroundContacts {
    pub fn is_grounded(&self) -> bool {
        self.0 > 0
    }
}

/// Thin sensor collider under the player's feet; `owner` is the player entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct FootSensor {
    pub owner: Entity,
}

/// Collectible; `slot` indexes the star pool.
#[derive(Component, Debug, Clone, Copy)]
pub struct Star {
    pub slot: usize,
}

/// Hazard; `slot` indexes the bomb pool.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bomb {
    pub slot: usize,
}

#[derive(Component, Debug, Default)]
pub struct Platform;

/// One of the four fixed walls enclosing the field.
#[derive(Component, Debug, Default)]
pub struct WorldBound;

#[derive(Component, Debug, Default)]
pub struct Background;

#[derive(Component, Debug, Default)]
pub struct ScoreText;

/// Axis-aligned half size used by the overlap rule.
#[derive(Component, Debug, Clone, Copy, Deref, DerefMut)]
pub struct HalfExtents(pub Vec2);
