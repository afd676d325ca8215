use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{SessionId, SessionMember, WorldBound};
use crate::core::config::GameConfig;
use crate::core::frame::SceneFrame;

pub const GROUP_WORLD: Group = Group::GROUP_1;
pub const GROUP_PLAYER: Group = Group::GROUP_2;
pub const GROUP_STAR: Group = Group::GROUP_3;
pub const GROUP_BOMB: Group = Group::GROUP_4;
pub const GROUP_FOOT: Group = Group::GROUP_5;

const WALL_NAME: [&str; 4] = ["WallBottom", "WallTop", "WallLeft", "WallRight"];
const WALL_THICKNESS: f32 = 16.0;

pub struct PhysicsSetupPlugin {
    pub pixels_per_meter: f32,
    pub debug_render: bool,
}

impl PhysicsSetupPlugin {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            pixels_per_meter: cfg.physics.pixels_per_meter.max(f32::EPSILON),
            debug_render: cfg.physics.debug_render,
        }
    }
}

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            self.pixels_per_meter,
        ));
        if self.debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

/// Re-enable the pipeline with scene gravity. Each session starts unpaused.
pub fn activate_physics(rapier: &mut Query<&mut RapierConfiguration>, cfg: &GameConfig) {
    for mut rc in rapier.iter_mut() {
        rc.gravity = Vect::new(0.0, -cfg.physics.gravity);
        rc.physics_pipeline_active = true;
    }
}

/// Freeze every body, not only the player.
pub fn pause_physics(rapier: &mut Query<&mut RapierConfiguration>) {
    for mut rc in rapier.iter_mut() {
        rc.physics_pipeline_active = false;
    }
}

pub fn world_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_WORLD, Group::ALL)
}

/// Static, full-friction body for platforms.
pub fn platform_body(half: Vec2) -> impl Bundle {
    (
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y),
        world_groups(),
    )
}

pub fn player_body(half: Vec2, bounce: f32) -> impl Bundle {
    (
        RigidBody::Dynamic,
        Collider::cuboid(half.x, half.y),
        Velocity::zero(),
        LockedAxes::ROTATION_LOCKED,
        Restitution {
            coefficient: bounce,
            combine_rule: CoefficientCombineRule::Max,
        },
        Friction {
            coefficient: 0.0,
            combine_rule: CoefficientCombineRule::Min,
        },
        CollisionGroups::new(GROUP_PLAYER, GROUP_WORLD | GROUP_BOMB),
        ActiveEvents::COLLISION_EVENTS,
    )
}

/// Sensor strip along the bottom edge of the player body.
pub fn foot_sensor(player_half: Vec2) -> impl Bundle {
    (
        Collider::cuboid(player_half.x * 0.8, 2.0),
        Sensor,
        CollisionGroups::new(GROUP_FOOT, GROUP_WORLD),
        ActiveEvents::COLLISION_EVENTS,
        Transform::from_xyz(0.0, -player_half.y, 0.0),
    )
}

/// Stars only collide with the world; the player overlap is resolved geometrically.
pub fn star_body(half: Vec2, bounce: f32) -> impl Bundle {
    (
        RigidBody::Dynamic,
        Collider::cuboid(half.x, half.y),
        Velocity::zero(),
        LockedAxes::ROTATION_LOCKED,
        Restitution {
            coefficient: bounce,
            combine_rule: CoefficientCombineRule::Max,
        },
        CollisionGroups::new(GROUP_STAR, GROUP_WORLD),
    )
}

pub fn bomb_body(radius: f32, bounce: f32, velocity: Vec2) -> impl Bundle {
    (
        RigidBody::Dynamic,
        Collider::ball(radius),
        Velocity::linear(velocity),
        GravityScale(0.0),
        Restitution {
            coefficient: bounce,
            combine_rule: CoefficientCombineRule::Max,
        },
        Friction {
            coefficient: 0.0,
            combine_rule: CoefficientCombineRule::Min,
        },
        Damping {
            linear_damping: 0.0,
            angular_damping: 0.0,
        },
        CollisionGroups::new(GROUP_BOMB, GROUP_WORLD | GROUP_PLAYER),
        ActiveEvents::COLLISION_EVENTS,
    )
}

/// Four fixed walls just outside the scene field.
pub fn spawn_world_bounds(commands: &mut Commands, frame: &SceneFrame, session: SessionId) {
    let half_w = frame.width * 0.5;
    let half_h = frame.height * 0.5;
    let t = WALL_THICKNESS;
    let walls = [
        (Vec2::new(0.0, -half_h - t), Vec2::new(half_w + 2.0 * t, t)),
        (Vec2::new(0.0, half_h + t), Vec2::new(half_w + 2.0 * t, t)),
        (Vec2::new(-half_w - t, 0.0), Vec2::new(t, half_h + 2.0 * t)),
        (Vec2::new(half_w + t, 0.0), Vec2::new(t, half_h + 2.0 * t)),
    ];
    for (index, (center, half)) in walls.into_iter().enumerate() {
        commands.spawn((
            Name::new(WALL_NAME[index]),
            WorldBound,
            SessionMember(session),
            platform_body(half),
            Transform::from_translation(center.extend(0.0)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_stars_off_the_player() {
        let star = CollisionGroups::new(GROUP_STAR, GROUP_WORLD);
        let player = CollisionGroups::new(GROUP_PLAYER, GROUP_WORLD | GROUP_BOMB);
        let interacts = |a: CollisionGroups, b: CollisionGroups| {
            a.memberships.intersects(b.filters) && b.memberships.intersects(a.filters)
        };
        assert!(!interacts(star, player));
        assert!(interacts(star, world_groups()));
        assert!(interacts(
            player,
            CollisionGroups::new(GROUP_BOMB, GROUP_WORLD | GROUP_PLAYER)
        ));
    }

    #[test]
    fn world_bounds_spawn_four_session_walls() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Startup, |mut commands: Commands| {
            spawn_world_bounds(&mut commands, &SceneFrame::default(), SessionId(7));
        });
        app.update();
        let mut q = app
            .world_mut()
            .query_filtered::<&SessionMember, With<WorldBound>>();
        let members: Vec<_> = q.iter(app.world()).collect();
        assert_eq!(members.len(), 4);
        assert!(members.iter().all(|m| m.0 == SessionId(7)));
    }
}
