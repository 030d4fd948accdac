//! In-game HUD - where the player is and what the wall ahead offers.

use bevy::prelude::*;

use crate::core::{in_interactive_state, GameState, MapUpdated, PositionChanged};
use crate::navigation::NavigationState;
use crate::world::{GameMap, MapError};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the status text.
#[derive(Component)]
pub struct HudText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnExit(GameState::Loading), spawn_hud).add_systems(
        Update,
        update_hud_text.run_if(in_interactive_state),
    );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Top-right panel
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                right: Val::Px(20.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText,
            ));
        });
}

/// Status lines for the player at `nav`.
pub fn status_text(map: &GameMap, nav: &NavigationState, state: GameState) -> Result<String, MapError> {
    let room = map.room_at(nav.x, nav.y)?;
    let name = map.room_name(room)?;
    let room_line = if name.is_empty() {
        format!("Room {}", room)
    } else {
        format!("{} ({})", name, room)
    };

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let left = map.wall_exists(nav.x, nav.y, nav.direction.rotate_ccw())?;
    let right = map.wall_exists(nav.x, nav.y, nav.direction.rotate_cw())?;
    let sides = match (left, right) {
        (true, true) => "both sides",
        (true, false) => "left",
        (false, true) => "right",
        (false, false) => "none",
    };
    let mode = match state {
        GameState::Editing => "Editing",
        _ => "Playing",
    };

    Ok(format!(
        "{}\n({}, {}, {})\nDoor ahead: {}\nSide walls: {}\n{}",
        room_line,
        nav.x,
        nav.y,
        nav.direction,
        yes_no(map.have_door(nav.x, nav.y, nav.direction)?),
        sides,
        mode
    ))
}

/// Rewrite the text when the player moves, a wall changes or the mode flips.
fn update_hud_text(
    mut moved: EventReader<PositionChanged>,
    mut updated: EventReader<MapUpdated>,
    state: Res<State<GameState>>,
    map: Res<GameMap>,
    nav: Res<NavigationState>,
    mut text_query: Query<&mut Text, With<HudText>>,
) {
    let events = moved.read().count() + updated.read().count();
    if events == 0 && !state.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };
    match status_text(&map, &nav, *state.get()) {
        Ok(status) => text.0 = status,
        Err(e) => warn!("HUD cannot describe position: {}", e),
    }
}
