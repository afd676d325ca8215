//! Start-button overlay. Visible until pressed; comes back a fixed delay after
//! a game over. Each press replaces the running session.
use bevy::prelude::*;
use std::time::Duration;

use super::session::{reap_retired_sessions, OverlayControl};
use crate::core::components::SessionMember;
use crate::core::config::{parse_hex_color, ButtonStyleConfig, GameConfig};
use crate::core::system::{configure_scene_sets, PresentationSet, SessionSet};
use crate::gameplay::state::{GameOver, SessionStarted, StartGame};

#[derive(Component, Debug, Default)]
pub struct StartButton;

fn spawn_start_button(commands: &mut Commands, style: &ButtonStyleConfig) {
    let half_height = style.height_px * 0.5;
    commands
        .spawn((
            Name::new("StartButton"),
            StartButton,
            Button,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(style.center_left_percent - style.width_percent * 0.5),
                top: Val::Percent(style.center_top_percent),
                width: Val::Percent(style.width_percent),
                height: Val::Px(style.height_px),
                margin: UiRect::top(Val::Px(-half_height)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(parse_hex_color(&style.background_color, Color::WHITE)),
            BorderRadius::all(Val::Px(style.border_radius_px)),
        ))
        .with_child((
            Text::new(style.text.clone()),
            TextFont {
                font_size: style.font_size,
                ..default()
            },
            TextColor(parse_hex_color(&style.text_color, Color::BLACK)),
        ));
}

/// Keep exactly one button alive while the overlay is visible, none otherwise.
pub fn sync_start_button(
    mut commands: Commands,
    overlay: Res<OverlayControl>,
    cfg: Res<GameConfig>,
    buttons: Query<Entity, With<StartButton>>,
) {
    match (overlay.visible(), buttons.is_empty()) {
        (true, true) => {
            spawn_start_button(&mut commands, &cfg.overlay.button);
            debug!(target: "overlay", "Start button shown");
        }
        (false, false) => {
            for e in &buttons {
                commands.entity(e).despawn();
            }
            debug!(target: "overlay", "Start button hidden");
        }
        _ => {}
    }
}

pub fn press_start_button(
    overlay: Res<OverlayControl>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    mut start: EventWriter<StartGame>,
) {
    if !overlay.visible() {
        return;
    }
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        start.write(StartGame);
    }
}

/// Coalesce start requests into one new session per frame.
pub fn start_game(
    mut requests: EventReader<StartGame>,
    mut overlay: ResMut<OverlayControl>,
    mut started: EventWriter<SessionStarted>,
) {
    if requests.read().count() == 0 {
        return;
    }
    let (id, retired) = overlay.start();
    match retired {
        Some(old) => info!(target: "overlay", "Session {} replaced by {}", old.id().0, id.0),
        None => info!(target: "overlay", "Session {} started", id.0),
    }
    started.write(SessionStarted { session: id });
}

pub fn schedule_restore_on_game_over(
    mut events: EventReader<GameOver>,
    mut overlay: ResMut<OverlayControl>,
) {
    for ev in events.read() {
        if overlay.schedule_restore(ev.session) {
            info!(target: "overlay", "Session {} over (score {}); restoring button", ev.session.0, ev.score);
        }
    }
}

pub fn tick_restore_timer(time: Res<Time>, mut overlay: ResMut<OverlayControl>) {
    if overlay.tick_restore(time.delta()) {
        info!(target: "overlay", "Start button restored");
    }
}

fn dispose_on_exit(
    mut commands: Commands,
    mut exits: EventReader<AppExit>,
    mut overlay: ResMut<OverlayControl>,
    members: Query<Entity, With<SessionMember>>,
) {
    if exits.read().next().is_none() {
        return;
    }
    if let Some(session) = overlay.dispose() {
        for e in &members {
            commands.entity(e).despawn();
        }
        info!(target: "overlay", "Disposed session {} on exit", session.id().0);
    }
}

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        let delay = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.overlay.restore_delay_secs)
            .unwrap_or(1.0)
            .max(0.0);
        let delay = Duration::try_from_secs_f32(delay).unwrap_or(Duration::from_secs(1));
        app.insert_resource(OverlayControl::new(delay))
            .init_resource::<GameConfig>()
            .add_event::<StartGame>()
            .add_event::<SessionStarted>()
            .add_event::<GameOver>()
            .add_systems(
                Update,
                (press_start_button, start_game, reap_retired_sessions)
                    .chain()
                    .in_set(SessionSet),
            )
            .add_systems(
                Update,
                (
                    schedule_restore_on_game_over,
                    tick_restore_timer,
                    sync_start_button,
                )
                    .chain()
                    .in_set(PresentationSet),
            )
            .add_systems(Last, dispose_on_exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GameConfig::default())
            .add_plugins(OverlayPlugin);
        app
    }

    fn button(app: &mut App) -> Option<Entity> {
        let mut q = app.world_mut().query_filtered::<Entity, With<StartButton>>();
        q.iter(app.world()).next()
    }

    #[test]
    fn button_is_shown_on_boot() {
        let mut app = overlay_app();
        app.update();
        assert!(button(&mut app).is_some());
        assert!(app.world().resource::<OverlayControl>().visible());
    }

    #[test]
    fn pressing_hides_button_and_starts_a_session() {
        let mut app = overlay_app();
        app.update();
        let b = button(&mut app).unwrap();
        app.world_mut().entity_mut(b).insert(Interaction::Pressed);
        app.update();
        app.update();
        let overlay = app.world().resource::<OverlayControl>();
        assert!(!overlay.visible());
        assert!(overlay.current_id().is_some());
        assert!(button(&mut app).is_none());
    }

    #[test]
    fn many_requests_in_one_frame_start_one_session() {
        let mut app = overlay_app();
        app.world_mut().send_event(StartGame);
        app.world_mut().send_event(StartGame);
        app.update();
        let events = app.world().resource::<Events<SessionStarted>>();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn infinite_restore_delay_falls_back_to_one_second() {
        let mut cfg = GameConfig::default();
        cfg.overlay.restore_delay_secs = f32::INFINITY;
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(cfg)
            .add_plugins(OverlayPlugin);
        let mut overlay = app.world_mut().resource_mut::<OverlayControl>();
        let (id, _) = overlay.start();
        assert!(overlay.schedule_restore(id));
        assert!(!overlay.tick_restore(Duration::from_millis(999)));
        assert!(overlay.tick_restore(Duration::from_millis(1)));
        assert!(overlay.visible());
    }

    #[test]
    fn exit_disposes_the_session() {
        let mut app = overlay_app();
        app.world_mut().send_event(StartGame);
        app.update();
        let id = app.world().resource::<OverlayControl>().current_id().unwrap();
        let member = app.world_mut().spawn(SessionMember(id)).id();
        app.world_mut().send_event(AppExit::Success);
        app.update();
        assert_eq!(app.world().resource::<OverlayControl>().current_id(), None);
        assert!(app.world().get_entity(member).is_err());
    }
}
