use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::core::frame::SceneFrame;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_camera);
    }
}

/// Whole scene field always in view; letterboxed on other aspect ratios.
fn setup_camera(mut commands: Commands, frame: Option<Res<SceneFrame>>) {
    let frame = frame.map_or_else(SceneFrame::default, |f| *f);
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: frame.width,
                min_height: frame.height,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}
