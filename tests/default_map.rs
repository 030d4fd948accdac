//! End-to-end checks against the compiled-in default map.

use roomwalk::navigation::NavigationState;
use roomwalk::rendering::{ImageData, ImageHandle, ImageLoader, WallQueryCache};
use roomwalk::world::{Direction, GameMap, MapData, MapError, WallObject};

struct FixedSizeLoader;

impl ImageLoader for FixedSizeLoader {
    fn load(&self, path: &str) -> Result<ImageHandle, MapError> {
        Ok(ImageHandle {
            path: path.to_string(),
            width: 64.0,
            height: 64.0,
            data: ImageData::Vector(String::new()),
        })
    }
}

#[test]
fn canonical_layout() {
    let map = GameMap::default();
    assert_eq!(map.grid().max_x(), 4);
    assert_eq!(map.grid().max_y(), 6);
    assert_eq!(map.room_at(0, 0), Ok('A'));
    assert_eq!(map.room_at(1, 2), Ok('D'));
    assert_eq!(map.room_at(3, 2), Ok('E'));
    assert_eq!(map.room_at(1, 4), Ok('H'));
    assert_eq!(map.room_at(3, 5), Ok('J'));
}

#[test]
fn every_cell_resolves_and_nothing_outside_does() {
    let map = GameMap::default();
    for y in -1..=6 {
        for x in -1..=4 {
            let inside = (0..4).contains(&x) && (0..6).contains(&y);
            match map.room_at(x, y) {
                Ok(_) => assert!(inside, "({x}, {y}) should be outside"),
                Err(e) => {
                    assert!(!inside, "({x}, {y}) should be inside");
                    assert_eq!(e, MapError::OutOfBounds { x, y });
                }
            }
        }
    }
}

#[test]
fn same_room_boundaries_have_no_wall() {
    let mut map = GameMap::default();
    // A spans the whole top row.
    assert!(!map.wall_exists(0, 0, Direction::E).unwrap());
    assert!(map.wall(0, 0, Direction::E).unwrap().is_none());
    let before = map.walls().len();
    assert!(map
        .add_object(0, 0, Direction::E, WallObject::new("clock.png", 50.0, 50.0, 0.2))
        .is_err());
    assert_eq!(map.walls().len(), before);
}

#[test]
fn doors_are_seen_from_both_sides() {
    let map = GameMap::default();
    for y in 0..6 {
        for x in 0..4 {
            for d in Direction::ALL {
                if !map.wall_exists(x, y, d).unwrap() {
                    continue;
                }
                let Some((nx, ny)) = map.neighbor(x, y, d) else {
                    continue;
                };
                assert_eq!(
                    map.have_door(x, y, d).unwrap(),
                    map.have_door(nx, ny, d.reverse()).unwrap(),
                    "door mismatch at ({x}, {y}, {d})"
                );
            }
        }
    }
}

#[test]
fn walk_from_entrance_down_to_the_bottom_row() {
    let map = GameMap::default();
    let mut s = NavigationState::new(0, 0, Direction::S);

    // A -> B (two cells deep)
    s = s.cross_door(&map).unwrap();
    assert_eq!(s, NavigationState::new(0, 2, Direction::S));
    // B -> F (two cells deep)
    s = s.cross_door(&map).unwrap();
    assert_eq!(s, NavigationState::new(0, 4, Direction::S));
    // F -> J
    s = s.cross_door(&map).unwrap();
    assert_eq!(s, NavigationState::new(0, 5, Direction::S));
    assert_eq!(map.room_at(s.x, s.y), Ok('J'));

    // Nothing further south.
    assert_eq!(s.cross_door(&map).unwrap(), s);
}

#[test]
fn turning_around_a_corner_cell() {
    let map = GameMap::default();
    // (3, 1) is the top of E; walls north, east and west.
    let mut s = NavigationState::new(3, 1, Direction::N);
    s = s.turn_right(&map).unwrap();
    assert_eq!(s, NavigationState::new(3, 1, Direction::E));
    // E continues south, so turning right now walks along it.
    s = s.turn_right(&map).unwrap();
    assert_eq!(s, NavigationState::new(3, 2, Direction::E));
}

#[test]
fn cache_follows_edits_only_where_invalidated() {
    let mut map = GameMap::default();
    let mut cache = WallQueryCache::new(FixedSizeLoader);

    assert!(cache.get(&map, 1, 4, Direction::S).unwrap().objects.is_empty());
    assert!(cache.get(&map, 3, 5, Direction::S).unwrap().objects.is_empty());

    map.add_object(1, 4, Direction::S, WallObject::new("map.png", 20.0, 30.0, 0.3))
        .unwrap();
    cache.invalidate(1, 4, Direction::S);

    let edited = cache.get(&map, 1, 4, Direction::S).unwrap();
    assert_eq!(edited.objects.len(), 1);
    assert!(edited.have_door);
    assert!(cache.get(&map, 3, 5, Direction::S).unwrap().objects.is_empty());
}

#[test]
fn map_survives_a_save_and_reload() {
    let mut map = GameMap::default();
    map.set_room_name('G', "Garden").unwrap();
    map.add_object(2, 3, Direction::S, WallObject::new("tree.svg", 40.0, 10.0, 0.5))
        .unwrap();

    let path = std::env::temp_dir().join("roomwalk_default_map_roundtrip.json");
    map.to_data().save(&path).unwrap();
    let reloaded = GameMap::from_data(MapData::load(&path).unwrap()).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded.room_name('G').unwrap(), "Garden");
    let objects = reloaded.wall(2, 3, Direction::S).unwrap().unwrap().objects();
    assert_eq!(objects[0].image_file_name, "tree.svg");
    assert!(reloaded.have_door(0, 0, Direction::S).unwrap());
}

#[test]
fn shipped_map_file_matches_the_default_map() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/data/map.json");
    let shipped = GameMap::from_data(MapData::load(path).unwrap()).unwrap();
    let default = GameMap::default();
    for y in 0..6 {
        for x in 0..4 {
            assert_eq!(shipped.room_at(x, y), default.room_at(x, y));
            for d in Direction::ALL {
                assert_eq!(shipped.have_door(x, y, d), default.have_door(x, y, d));
            }
        }
    }
    assert_eq!(shipped.room_name('C').unwrap(), "Corridor");
}
