//! The facing-wall view, drawn with UI nodes.
//!
//! The whole view is rebuilt whenever the player moves, a wall changes, the
//! window is resized or the editor selection changes. Only the character marker
//! moves every frame.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use std::collections::HashMap;

use super::cache::{WallInfo, WallQueryCache};
use super::images::{ImageData, ImageHandle};
use super::layout::{ViewLayout, ViewRect, CHARACTER_WIDTH, RESIZE_HANDLE_HALF};
use super::plugin::invalidate_on_map_update;
use crate::core::{in_interactive_state, GameState, MapUpdated, PositionChanged};
use crate::editor::EditorSelection;
use crate::navigation::{NavigationState, Walk};
use crate::world::GameMap;

const FLOOR_COLOR: Color = Color::srgb(0.25, 0.22, 0.2);
const DOOR_COLOR: Color = Color::srgb(0.45, 0.3, 0.15);
const CHARACTER_COLOR: Color = Color::srgb(0.9, 0.75, 0.3);
const SELECTION_COLOR: Color = Color::srgb(1.0, 0.2, 0.2);

/// Root of the wall view.
#[derive(Component)]
pub struct WallView;

/// Everything under the root that is rebuilt on redraw.
#[derive(Component)]
struct WallViewPart;

/// The walking character.
#[derive(Component)]
pub struct CharacterMarker;

/// Set up wall view systems.
pub fn setup_view_systems(app: &mut App) {
    app.add_systems(OnExit(GameState::Loading), spawn_wall_view).add_systems(
        Update,
        (redraw_wall_view, move_character_marker)
            .chain()
            .after(invalidate_on_map_update)
            .run_if(in_interactive_state),
    );
}

fn spawn_wall_view(mut commands: Commands) {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::BLACK),
        WallView,
    ));
}

/// Multiply each channel of a room color by `factor`.
pub fn shade((r, g, b): (f32, f32, f32), factor: f32) -> Color {
    Color::srgb(r * factor, g * factor, b * factor)
}

fn rect_node(rect: ViewRect) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.x),
        top: Val::Px(rect.y),
        width: Val::Px(rect.width),
        height: Val::Px(rect.height),
        ..default()
    }
}

#[allow(clippy::too_many_arguments)]
fn redraw_wall_view(
    mut commands: Commands,
    mut moved: EventReader<PositionChanged>,
    mut updated: EventReader<MapUpdated>,
    layout: Res<ViewLayout>,
    map: Res<GameMap>,
    nav: Res<NavigationState>,
    selection: Option<Res<EditorSelection>>,
    mut cache: ResMut<WallQueryCache>,
    mut images: Option<ResMut<Assets<Image>>>,
    mut textures: Local<HashMap<String, Handle<Image>>>,
    mut roots: Query<(Entity, &mut BackgroundColor), With<WallView>>,
    parts: Query<Entity, With<WallViewPart>>,
) {
    let events = moved.read().count() + updated.read().count();
    let selection_changed = selection.as_ref().is_some_and(|s| s.is_changed());
    if events == 0 && !layout.is_changed() && !selection_changed {
        return;
    }
    let Ok((root, mut backdrop)) = roots.get_single_mut() else {
        return;
    };

    let info = match cache.get(&map, nav.x, nav.y, nav.direction) {
        Ok(info) => info,
        Err(e) => {
            warn!("Cannot draw wall at ({}, {}, {}): {}", nav.x, nav.y, nav.direction, e);
            return;
        }
    };

    for part in parts.iter() {
        commands.entity(part).despawn_recursive();
    }

    let factor = if info.wall_ahead { 1.0 } else { 0.5 };
    backdrop.0 = shade(info.wall_color, factor);

    let selected = selection.as_ref().and_then(|s| s.selected_index());
    let mut children = Vec::new();
    spawn_wall_shapes(&mut commands, &layout, info, nav.direction, &mut children);
    for resolved in &info.objects {
        let rect = layout.object_rect(resolved);
        let texture = images
            .as_deref_mut()
            .and_then(|assets| texture_for(&resolved.image, assets, &mut textures));
        children.push(spawn_object(&mut commands, rect, texture, selected == Some(resolved.index)));
    }

    let grid = layout.grid_size();
    children.push(
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(0.0),
                    width: Val::Px(CHARACTER_WIDTH),
                    height: Val::Px(grid * 3.0),
                    ..default()
                },
                BackgroundColor(CHARACTER_COLOR),
                CharacterMarker,
                WallViewPart,
            ))
            .id(),
    );

    commands.entity(root).add_children(&children);
}

fn spawn_wall_shapes(
    commands: &mut Commands,
    layout: &ViewLayout,
    info: &WallInfo,
    direction: crate::world::Direction,
    children: &mut Vec<Entity>,
) {
    let grid = layout.grid_size();
    let side = shade(info.wall_color, 0.8);

    let floor = ViewRect {
        x: 0.0,
        y: layout.height - grid,
        width: layout.width,
        height: grid,
    };
    children.push(commands.spawn((rect_node(floor), BackgroundColor(FLOOR_COLOR), WallViewPart)).id());

    if info.wall_ccw {
        let left = ViewRect {
            x: 0.0,
            y: 0.0,
            width: grid,
            height: layout.height,
        };
        children.push(commands.spawn((rect_node(left), BackgroundColor(side), WallViewPart)).id());
    }
    if info.wall_cw {
        let right = ViewRect {
            x: layout.width - grid,
            y: 0.0,
            width: grid,
            height: layout.height,
        };
        children.push(commands.spawn((rect_node(right), BackgroundColor(side), WallViewPart)).id());
    }
    if info.have_door {
        let door = layout.door_rect(direction);
        children.push(commands.spawn((rect_node(door), BackgroundColor(DOOR_COLOR), WallViewPart)).id());
    }
}

fn spawn_object(commands: &mut Commands, rect: ViewRect, texture: Option<Handle<Image>>, selected: bool) -> Entity {
    let mut node = rect_node(rect);
    let border = if selected { SELECTION_COLOR } else { Color::NONE };
    node.border = UiRect::all(Val::Px(if selected { 2.0 } else { 1.0 }));

    let mut object = commands.spawn((node, BorderColor(border), WallViewPart));
    match texture {
        Some(handle) => {
            object.insert(ImageNode::new(handle));
        }
        // Vector images are shown as their outline
        None => {
            object.insert(BorderColor(if selected { SELECTION_COLOR } else { Color::WHITE }));
        }
    }
    if selected {
        object.with_children(|parent| {
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(-RESIZE_HANDLE_HALF),
                    top: Val::Px(-RESIZE_HANDLE_HALF),
                    width: Val::Px(RESIZE_HANDLE_HALF * 2.0),
                    height: Val::Px(RESIZE_HANDLE_HALF * 2.0),
                    ..default()
                },
                BackgroundColor(SELECTION_COLOR),
            ));
        });
    }
    object.id()
}

/// GPU texture for a raster wall image, created once per path.
fn texture_for(
    image: &ImageHandle,
    assets: &mut Assets<Image>,
    textures: &mut HashMap<String, Handle<Image>>,
) -> Option<Handle<Image>> {
    let ImageData::Raster(rgba) = &image.data else {
        return None;
    };
    if let Some(handle) = textures.get(&image.path) {
        return Some(handle.clone());
    }
    let texture = Image::new(
        Extent3d {
            width: rgba.width(),
            height: rgba.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    let handle = assets.add(texture);
    textures.insert(image.path.clone(), handle.clone());
    Some(handle)
}

fn move_character_marker(walk: Res<Walk>, mut markers: Query<&mut Node, With<CharacterMarker>>) {
    for mut node in markers.iter_mut() {
        node.left = Val::Px(walk.character_x());
    }
}
