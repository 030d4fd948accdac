//! Memoized wall queries for the renderer and input handlers.
//!
//! A full wall query touches the grid, three walls, the room color, and every
//! object's image. Results are cached per `(x, y, direction)` and images per file
//! path. Mutations must call [`WallQueryCache::invalidate`] for the key they touch.

use bevy::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use super::images::{FileImageLoader, ImageHandle, ImageLoader};
use crate::world::{Direction, GameMap, MapError, WallKey, WallObject};

/// A wall object together with its loaded image.
#[derive(Debug, Clone)]
pub struct ResolvedObject {
    /// Position in the wall's object list.
    pub index: usize,
    pub object: WallObject,
    pub image: Arc<ImageHandle>,
}

impl ResolvedObject {
    /// Size in view pixels for a view of the given height.
    pub fn view_size(&self, view_height: f32) -> (f32, f32) {
        let scale = view_height * self.object.wall_scale / self.image.height.max(1.0);
        (self.image.width * scale, self.image.height * scale)
    }
}

/// Everything needed to draw the wall the player is facing.
#[derive(Debug, Clone)]
pub struct WallInfo {
    /// Whether there is a wall ahead at all
    pub wall_ahead: bool,
    /// Refreshed on every lookup, see [`WallQueryCache::get`]
    pub have_door: bool,
    /// A wall on the clockwise (right) side
    pub wall_cw: bool,
    /// A wall on the counter-clockwise (left) side
    pub wall_ccw: bool,
    pub wall_color: (f32, f32, f32),
    /// Objects whose image loaded; failed ones are skipped
    pub objects: Vec<ResolvedObject>,
}

/// Resource caching [`WallInfo`] per wall key and images per path.
#[derive(Resource)]
pub struct WallQueryCache {
    entries: HashMap<WallKey, WallInfo>,
    images: HashMap<String, Arc<ImageHandle>>,
    loader: Box<dyn ImageLoader>,
}

impl Default for WallQueryCache {
    fn default() -> Self {
        Self::new(FileImageLoader)
    }
}

impl WallQueryCache {
    pub fn new(loader: impl ImageLoader + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            images: HashMap::new(),
            loader: Box::new(loader),
        }
    }

    /// Wall info for `(x, y, direction)`, computed on first use.
    ///
    /// Door presence is never served from the cache: a door may be declared on the
    /// far side of the wall, which is a different key, so it is recomputed on every
    /// call.
    pub fn get(&mut self, map: &GameMap, x: i32, y: i32, direction: Direction) -> Result<&WallInfo, MapError> {
        let have_door = map.have_door(x, y, direction)?;
        let key = WallKey::new(x, y, direction);

        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                let info = entry.into_mut();
                info.have_door = have_door;
                Ok(info)
            }
            Entry::Vacant(entry) => {
                let info = build_info(map, key, have_door, &mut self.images, self.loader.as_ref())?;
                Ok(entry.insert(info))
            }
        }
    }

    /// Drop the entry for exactly this key. Returns whether one was cached.
    pub fn invalidate(&mut self, x: i32, y: i32, direction: Direction) -> bool {
        self.entries.remove(&WallKey::new(x, y, direction)).is_some()
    }

    /// Drop every entry, e.g. after loading a different map. Images stay cached.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_cached(&self, x: i32, y: i32, direction: Direction) -> bool {
        self.entries.contains_key(&WallKey::new(x, y, direction))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct images loaded so far.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

fn build_info(
    map: &GameMap,
    key: WallKey,
    have_door: bool,
    images: &mut HashMap<String, Arc<ImageHandle>>,
    loader: &dyn ImageLoader,
) -> Result<WallInfo, MapError> {
    let WallKey { x, y, direction } = key;
    let record = map.wall(x, y, direction)?;

    let mut objects = Vec::new();
    for (index, object) in record.map(|r| r.objects()).unwrap_or_default().iter().enumerate() {
        match resolve_image(images, loader, &object.image_file_name) {
            Ok(image) => objects.push(ResolvedObject {
                index,
                object: object.clone(),
                image,
            }),
            Err(e) => warn!("Skipping wall object at ({}, {}, {}): {}", x, y, direction, e),
        }
    }

    Ok(WallInfo {
        wall_ahead: record.is_some(),
        have_door,
        wall_cw: map.wall_exists(x, y, direction.rotate_cw())?,
        wall_ccw: map.wall_exists(x, y, direction.rotate_ccw())?,
        wall_color: map.wall_color(x, y)?,
        objects,
    })
}

fn resolve_image(
    images: &mut HashMap<String, Arc<ImageHandle>>,
    loader: &dyn ImageLoader,
    path: &str,
) -> Result<Arc<ImageHandle>, MapError> {
    if let Some(handle) = images.get(path) {
        return Ok(Arc::clone(handle));
    }
    let handle = Arc::new(loader.load(path)?);
    debug!("Loaded wall image {} ({}x{})", path, handle.width, handle.height);
    images.insert(path.to_string(), Arc::clone(&handle));
    Ok(handle)
}
