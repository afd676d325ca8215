pub mod animation;
pub mod bombs;
pub mod player;
pub mod scene;
pub mod stars;
pub mod state;

use bevy::prelude::*;

use animation::SpriteAnimationPlugin;
use bombs::BombsPlugin;
use player::PlayerPlugin;
use scene::ScenePlugin;
use stars::StarsPlugin;

/// Everything that runs inside a session except image loading, so headless
/// apps can drive a scene with placeholder handles.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ScenePlugin,
            PlayerPlugin,
            StarsPlugin,
            BombsPlugin,
            SpriteAnimationPlugin,
        ));
    }
}
