//! Keyboard and click driven movement.
//!
//! Keyboard moves commit immediately. Clicks walk the character across the view
//! first and commit the move on arrival; while a walk is running further input is
//! ignored.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::state::NavigationState;
use crate::core::{in_interactive_state, GameConfig, GameState, ObjectActivated, PositionChanged, WalkAnimation};
use crate::rendering::{ClickTarget, ViewLayout, WallInfo, WallQueryCache};
use crate::world::{Direction, GameMap, MapError};

/// One discrete move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
    Left,
    Right,
}

impl Step {
    /// Arrow keys and their moves.
    pub const KEYS: [(KeyCode, Step); 4] = [
        (KeyCode::ArrowUp, Step::Forward),
        (KeyCode::ArrowDown, Step::Back),
        (KeyCode::ArrowLeft, Step::Left),
        (KeyCode::ArrowRight, Step::Right),
    ];

    pub fn apply(self, state: NavigationState, map: &GameMap) -> Result<NavigationState, MapError> {
        match self {
            Step::Forward => state.cross_door(map),
            Step::Back => state.step_back(map),
            Step::Left => state.turn_left(map),
            Step::Right => state.turn_right(map),
        }
    }
}

/// Move to commit when a walk arrives, and where the character reappears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMove {
    pub target: NavigationState,
    pub landing_x: f32,
}

/// Where a click sends the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkPlan {
    pub destination: f32,
    pub pending: Option<PendingMove>,
}

/// The walking character: its horizontal offset and the walk in progress.
#[derive(Resource, Debug, Default)]
pub struct Walk {
    character_x: f32,
    animation: Option<WalkAnimation<Option<PendingMove>>>,
}

impl Walk {
    pub fn character_x(&self) -> f32 {
        self.animation
            .as_ref()
            .map_or(self.character_x, WalkAnimation::position)
    }

    /// -1.0 when walking left, 1.0 otherwise.
    pub fn facing(&self) -> f32 {
        self.animation.as_ref().map_or(1.0, WalkAnimation::facing)
    }

    pub fn is_walking(&self) -> bool {
        self.animation.is_some()
    }

    /// Place the character without walking, cancelling any walk.
    pub fn place(&mut self, x: f32) {
        self.animation = None;
        self.character_x = x;
    }

    /// Start walking, replacing any walk in progress.
    pub fn start(&mut self, plan: WalkPlan, speed: f32) {
        let from = self.character_x();
        self.animation = Some(WalkAnimation::new(from, plan.destination, speed, plan.pending));
    }

    /// Advance by `dt` seconds. On arrival the walk ends and its pending move, if
    /// any, is handed back.
    pub fn advance(&mut self, dt: f32) -> Option<PendingMove> {
        let animation = self.animation.as_mut()?;
        if !animation.advance(dt) {
            return None;
        }
        let finished = self.animation.take()?;
        self.character_x = finished.destination();
        finished.into_pending()
    }
}

/// Work out the walk for a click at `(x, y)` on the wall described by `info`.
pub fn plan_click(
    layout: &ViewLayout,
    info: &WallInfo,
    state: NavigationState,
    map: &GameMap,
    x: f32,
    y: f32,
) -> Result<WalkPlan, MapError> {
    let plan = if info.have_door && layout.door_rect(state.direction).contains(x, y) {
        WalkPlan {
            destination: x,
            pending: Some(PendingMove {
                target: state.cross_door(map)?,
                landing_x: x,
            }),
        }
    } else if layout.in_left_wall(x) {
        WalkPlan {
            destination: layout.left_stop(info),
            pending: Some(PendingMove {
                target: state.turn_left(map)?,
                landing_x: layout.after_left_turn(),
            }),
        }
    } else if layout.in_right_wall(x) {
        WalkPlan {
            destination: layout.right_stop(info),
            pending: Some(PendingMove {
                target: state.turn_right(map)?,
                landing_x: layout.after_right_turn(),
            }),
        }
    } else {
        WalkPlan {
            destination: x,
            pending: None,
        }
    };
    Ok(plan)
}

/// Commit `candidate` as the current position.
///
/// Returns the event to send, or `None` when nothing changed or the candidate is
/// off the map.
pub fn commit_move(
    current: &mut NavigationState,
    candidate: NavigationState,
    map: &GameMap,
    cache: &mut WallQueryCache,
) -> Option<PositionChanged> {
    if candidate == *current {
        return None;
    }
    let candidate = match candidate.checked(map) {
        Ok(candidate) => candidate,
        Err(e) => {
            warn!("Refusing move to ({}, {}, {}): {}", candidate.x, candidate.y, candidate.direction, e);
            return None;
        }
    };
    *current = candidate;
    cache.invalidate(candidate.x, candidate.y, candidate.direction);
    debug!("Moved to ({}, {}, {})", candidate.x, candidate.y, candidate.direction);
    Some(PositionChanged {
        x: candidate.x,
        y: candidate.y,
        direction: candidate.direction,
    })
}

/// The activation a click at `(x, y)` triggers, if it lands on a linked object
/// or on its resize handle.
pub fn activation_for(
    layout: &ViewLayout,
    info: &WallInfo,
    direction: Direction,
    x: f32,
    y: f32,
) -> Option<ObjectActivated> {
    let (ClickTarget::Object(index) | ClickTarget::ResizeHandle(index)) = layout.classify(info, direction, x, y) else {
        return None;
    };
    let (id, kind) = info
        .objects
        .iter()
        .find(|resolved| resolved.index == index)
        .and_then(|resolved| resolved.object.link())?;
    Some(ObjectActivated { id: id.to_string(), kind })
}

/// Set up movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<NavigationState>()
        .init_resource::<Walk>()
        .add_systems(OnExit(GameState::Loading), place_player)
        .add_systems(
            Update,
            (
                keyboard_movement,
                click_movement.run_if(in_state(GameState::Playing)),
                advance_walk,
            )
                .chain()
                .run_if(in_interactive_state),
        );
}

/// Put the player at the configured start, or at the default start if that is
/// off the map.
fn place_player(
    config: Res<GameConfig>,
    map: Res<GameMap>,
    layout: Res<ViewLayout>,
    mut nav: ResMut<NavigationState>,
    mut walk: ResMut<Walk>,
    mut moved: EventWriter<PositionChanged>,
) {
    let start = NavigationState::new(config.start_x, config.start_y, config.start_direction);
    *nav = start.checked(&map).unwrap_or_else(|e| {
        warn!("Configured start is unusable: {}. Starting at the default position.", e);
        NavigationState::default()
    });
    walk.place(layout.grid_size());
    info!("Player placed at ({}, {}, {})", nav.x, nav.y, nav.direction);
    moved.send(PositionChanged {
        x: nav.x,
        y: nav.y,
        direction: nav.direction,
    });
}

fn keyboard_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    map: Res<GameMap>,
    walk: Res<Walk>,
    mut nav: ResMut<NavigationState>,
    mut cache: ResMut<WallQueryCache>,
    mut moved: EventWriter<PositionChanged>,
) {
    if walk.is_walking() {
        return;
    }
    let Some(step) = Step::KEYS
        .iter()
        .find(|(key, _)| keyboard.just_pressed(*key))
        .map(|(_, step)| *step)
    else {
        return;
    };

    match step.apply(*nav, &map) {
        Ok(candidate) => {
            if let Some(event) = commit_move(&mut nav, candidate, &map, &mut cache) {
                moved.send(event);
            }
        }
        Err(e) => warn!("Cannot move {:?}: {}", step, e),
    }
}

#[allow(clippy::too_many_arguments)]
fn click_movement(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    map: Res<GameMap>,
    layout: Res<ViewLayout>,
    config: Res<GameConfig>,
    nav: Res<NavigationState>,
    mut cache: ResMut<WallQueryCache>,
    mut walk: ResMut<Walk>,
    mut activated: EventWriter<ObjectActivated>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = windows.get_single().ok().and_then(Window::cursor_position) else {
        return;
    };

    let info = match cache.get(&map, nav.x, nav.y, nav.direction) {
        Ok(info) => info,
        Err(e) => {
            warn!("No wall info at the current position: {}", e);
            return;
        }
    };

    if let Some(activation) = activation_for(&layout, info, nav.direction, cursor.x, cursor.y) {
        info!("Opening {:?} {}", activation.kind, activation.id);
        activated.send(activation);
    }

    if walk.is_walking() {
        return;
    }
    match plan_click(&layout, info, *nav, &map, cursor.x, cursor.y) {
        Ok(plan) => walk.start(plan, config.walk_speed),
        Err(e) => warn!("Cannot plan walk: {}", e),
    }
}

fn advance_walk(
    time: Res<Time>,
    map: Res<GameMap>,
    mut walk: ResMut<Walk>,
    mut nav: ResMut<NavigationState>,
    mut cache: ResMut<WallQueryCache>,
    mut moved: EventWriter<PositionChanged>,
) {
    let Some(pending) = walk.advance(time.delta_secs()) else {
        return;
    };
    if let Some(event) = commit_move(&mut nav, pending.target, &map, &mut cache) {
        walk.place(pending.landing_x);
        moved.send(event);
    }
}
