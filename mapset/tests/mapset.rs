use mapset::{
    MAP_DESCRIPTOR_SIZE, MAP_NAME_LEN, MAP_WIDTH, MAPSET_NUM_MAPS, MapFlags, MapSetError,
    MapSetFlags, MapSetLoader, MapSetState, PLANE_WORDS, Plane, RLEW_TAG_REGISTERED,
    RLEW_TAG_SHAREWARE, RTL_VERSION, RXL_VERSION,
};
use std::fs;
use std::path::{Path, PathBuf};

struct TestMap {
    slot: usize,
    name: &'static str,
    tag: u16,
    flags: u32,
    planes: [Vec<u16>; 3],
}

/// A plane where every tile encodes its own position and plane number
fn patterned_plane(plane: u16) -> Vec<u16> {
    (0..PLANE_WORDS)
        .map(|i| {
            let (x, y) = (i % MAP_WIDTH, i / MAP_WIDTH);
            // long flat runs on the edges so compression has work to do
            if x < 8 {
                plane
            } else {
                (plane << 12) | (((y as u16) << 5) ^ x as u16)
            }
        })
        .collect()
}

fn test_map(slot: usize, name: &'static str, tag: u16) -> TestMap {
    TestMap {
        slot,
        name,
        tag,
        flags: 0,
        planes: [patterned_plane(0), patterned_plane(1), patterned_plane(2)],
    }
}

fn write_mapset(
    dir: &Path,
    file_name: &str,
    magic: &[u8; 4],
    version: u32,
    maps: &[TestMap],
) -> PathBuf {
    let mut descriptors = vec![0u8; MAPSET_NUM_MAPS * MAP_DESCRIPTOR_SIZE];
    let mut planes = Vec::new();
    let planes_start = 8 + descriptors.len();

    for map in maps {
        let mut offsets = [0u32; 3];
        let mut sizes = [0u32; 3];
        for (i, plane) in map.planes.iter().enumerate() {
            let bytes = rlew::words_to_le_bytes(&rlew::compress(plane, map.tag).unwrap());
            offsets[i] = (planes_start + planes.len()) as u32;
            sizes[i] = bytes.len() as u32;
            planes.extend_from_slice(&bytes);
        }

        let mut desc = Vec::with_capacity(MAP_DESCRIPTOR_SIZE);
        for v in [1, 0, map.tag as u32, map.flags] {
            desc.extend_from_slice(&u32::to_le_bytes(v));
        }
        for v in offsets.into_iter().chain(sizes) {
            desc.extend_from_slice(&v.to_le_bytes());
        }
        let mut name = [0u8; MAP_NAME_LEN];
        name[..map.name.len()].copy_from_slice(map.name.as_bytes());
        desc.extend_from_slice(&name);

        let start = map.slot * MAP_DESCRIPTOR_SIZE;
        descriptors[start..start + MAP_DESCRIPTOR_SIZE].copy_from_slice(&desc);
    }

    let mut data = magic.to_vec();
    data.extend_from_slice(&version.to_le_bytes());
    data.extend_from_slice(&descriptors);
    data.extend_from_slice(&planes);

    let path = dir.join(file_name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn load_registered_map() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_mapset(
        tmp.path(),
        "DARKWAR.RTL",
        b"RTL\0",
        RTL_VERSION,
        &[test_map(0, "THE HALLS OF EVIL", RLEW_TAG_REGISTERED)],
    );

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&path).unwrap();
    assert_eq!(loader.state(), MapSetState::MapSetLoaded);
    assert_eq!(loader.flags(), Some(MapSetFlags::SINGLEPLAYER));
    assert_eq!(loader.version(), Some(RTL_VERSION));
    assert_eq!(loader.path(), Some(path.as_path()));
    assert!(loader.get_plane(0).is_none());

    loader.load_map(0).unwrap();
    assert_eq!(loader.state(), MapSetState::MapLoaded);
    assert_eq!(loader.current_map(), Some(0));

    for i in 0..3 {
        let plane = loader.get_plane(i).unwrap();
        assert_eq!(plane.len(), PLANE_WORDS);
        assert_eq!(plane, patterned_plane(i as u16).as_slice());
    }
    assert!(loader.get_plane(3).is_none());

    let expected = patterned_plane(1)[5 * MAP_WIDTH + 20];
    assert_eq!(loader.tile(Plane::Sprites, 20, 5), Some(expected));
    assert_eq!(loader.tile(Plane::Walls, 128, 0), None);
    assert_eq!(loader.tile(Plane::Info, 0, 128), None);
}

#[test]
fn each_map_uses_its_own_tag() {
    let tmp = tempfile::tempdir().unwrap();
    let mut shareware = test_map(3, "SHAREWARE", RLEW_TAG_SHAREWARE);
    // a verbatim tag value in the data has to survive the round trip
    shareware.planes[0][200] = RLEW_TAG_SHAREWARE;
    shareware.planes[0][201] = RLEW_TAG_REGISTERED;
    let path = write_mapset(
        tmp.path(),
        "MIXED.RTL",
        b"RTL\0",
        RTL_VERSION,
        &[test_map(1, "REGISTERED", RLEW_TAG_REGISTERED), shareware],
    );

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&path).unwrap();

    loader.load_map(3).unwrap();
    let walls = loader.plane(Plane::Walls).unwrap();
    assert_eq!(walls[200], RLEW_TAG_SHAREWARE);
    assert_eq!(walls[201], RLEW_TAG_REGISTERED);

    loader.load_map(1).unwrap();
    assert_eq!(loader.current_map(), Some(1));
    assert_eq!(loader.plane(Plane::Walls).unwrap(), patterned_plane(0).as_slice());
}

#[test]
fn map_index_checks() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_mapset(
        tmp.path(),
        "DARKWAR.RTL",
        b"RTL\0",
        RTL_VERSION,
        &[test_map(0, "E1L1", RLEW_TAG_REGISTERED)],
    );

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&path).unwrap();

    assert!(matches!(loader.load_map(-1), Err(MapSetError::OutOfRange(-1))));
    assert!(matches!(loader.load_map(100), Err(MapSetError::OutOfRange(100))));
    assert!(matches!(loader.load_map(5), Err(MapSetError::NotUsed(5))));
    assert_eq!(loader.state(), MapSetState::MapSetLoaded);

    loader.load_map(0).unwrap();
    // a failed load leaves the current map in place
    assert!(matches!(loader.load_map(99), Err(MapSetError::NotUsed(99))));
    assert_eq!(loader.current_map(), Some(0));
    assert!(loader.get_plane(2).is_some());
}

#[test]
fn directory_accessors() {
    let tmp = tempfile::tempdir().unwrap();
    let mut pushwalls = test_map(42, "PUSHWALLS", RLEW_TAG_REGISTERED);
    pushwalls.flags = MapFlags::OPEN_PUSHWALLS.bits();
    let path = write_mapset(
        tmp.path(),
        "BATTLE.RTC",
        b"RTC\0",
        RXL_VERSION,
        &[test_map(7, "ARENA", RLEW_TAG_REGISTERED), pushwalls],
    );

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&path).unwrap();
    assert_eq!(
        loader.flags(),
        Some(MapSetFlags::COMMBAT | MapSetFlags::LUDICROUS)
    );

    let used: Vec<(usize, String)> = loader
        .used_maps()
        .map(|(i, desc)| (i, desc.name().into_owned()))
        .collect();
    assert_eq!(
        used,
        [(7, "ARENA".to_string()), (42, "PUSHWALLS".to_string())]
    );

    let desc = loader.map_info(42).unwrap();
    assert!(desc.flags.contains(MapFlags::OPEN_PUSHWALLS));
    assert_eq!(desc.rlew_tag(), RLEW_TAG_REGISTERED);
    assert!(!loader.map_info(0).unwrap().is_used());
    assert!(loader.map_info(100).is_none());
}

#[test]
fn state_transitions() {
    let tmp = tempfile::tempdir().unwrap();
    let first = write_mapset(
        tmp.path(),
        "FIRST.RTL",
        b"RTL\0",
        RTL_VERSION,
        &[test_map(0, "FIRST", RLEW_TAG_REGISTERED)],
    );
    let second = write_mapset(
        tmp.path(),
        "SECOND.RTR",
        b"RTR\0",
        RTL_VERSION,
        &[test_map(9, "SECOND", RLEW_TAG_SHAREWARE)],
    );

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&first).unwrap();
    loader.load_map(0).unwrap();

    loader.unload_map();
    assert_eq!(loader.state(), MapSetState::MapSetLoaded);
    assert!(loader.get_plane(0).is_none());
    assert_eq!(loader.current_map(), None);
    loader.unload_map();

    loader.load_map(0).unwrap();
    // a new map set drops the old map
    loader.load_mapset(&second).unwrap();
    assert_eq!(loader.state(), MapSetState::MapSetLoaded);
    assert_eq!(loader.flags(), Some(MapSetFlags::RANDROTT));
    assert!(matches!(loader.load_map(0), Err(MapSetError::NotUsed(0))));
    loader.load_map(9).unwrap();

    loader.unload_mapset();
    assert_eq!(loader.state(), MapSetState::Unloaded);
    assert!(matches!(loader.load_map(9), Err(MapSetError::NoMapSet)));
}

#[test]
fn bad_file_keeps_previous_mapset() {
    let tmp = tempfile::tempdir().unwrap();
    let good = write_mapset(
        tmp.path(),
        "GOOD.RTL",
        b"RTL\0",
        RTL_VERSION,
        &[test_map(0, "GOOD", RLEW_TAG_REGISTERED)],
    );
    let bad_magic = tmp.path().join("BAD.RTL");
    fs::write(&bad_magic, b"IWAD\x01\x01\0\0").unwrap();
    let bad_version = write_mapset(tmp.path(), "OLD.RTL", b"RTL\0", 0x0100, &[]);

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&good).unwrap();
    loader.load_map(0).unwrap();

    assert!(matches!(
        loader.load_mapset(&bad_magic),
        Err(MapSetError::UnknownFormat(m)) if &m == b"IWAD"
    ));
    assert!(matches!(
        loader.load_mapset(&bad_version),
        Err(MapSetError::UnsupportedVersion(0x0100))
    ));
    assert!(matches!(
        loader.load_mapset(tmp.path().join("MISSING.RTL")),
        Err(MapSetError::Io(_))
    ));

    assert_eq!(loader.path(), Some(good.as_path()));
    assert_eq!(loader.current_map(), Some(0));
}

#[test]
fn truncated_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("SHORT.RTL");
    let mut data = b"RTL\0".to_vec();
    data.extend_from_slice(&RTL_VERSION.to_le_bytes());
    data.extend_from_slice(&[0u8; MAP_DESCRIPTOR_SIZE * 10]);
    fs::write(&path, data).unwrap();

    let mut loader = MapSetLoader::new();
    assert!(matches!(
        loader.load_mapset(&path),
        Err(MapSetError::Truncated)
    ));
    assert_eq!(loader.state(), MapSetState::Unloaded);
}

#[test]
fn truncated_plane() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_mapset(
        tmp.path(),
        "CUT.RTL",
        b"RTL\0",
        RTL_VERSION,
        &[test_map(0, "CUT", RLEW_TAG_REGISTERED)],
    );
    let data = fs::read(&path).unwrap();
    fs::write(&path, &data[..data.len() - 4]).unwrap();

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&path).unwrap();
    assert!(matches!(loader.load_map(0), Err(MapSetError::Truncated)));
    assert_eq!(loader.state(), MapSetState::MapSetLoaded);
}

#[test]
fn oversized_plane_is_truncated() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_mapset(
        tmp.path(),
        "HUGE.RTL",
        b"RTL\0",
        RTL_VERSION,
        &[test_map(0, "HUGE", RLEW_TAG_REGISTERED)],
    );
    // claim a first plane of nearly 4 GiB in slot 0
    let mut data = fs::read(&path).unwrap();
    let size_field = 8 + 0x1c;
    data[size_field..size_field + 4].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
    fs::write(&path, data).unwrap();

    let mut loader = MapSetLoader::new();
    loader.load_mapset(&path).unwrap();
    assert_eq!(loader.map_info(0).unwrap().plane_sizes[0], 0xFFFF_FFF0);
    assert!(matches!(loader.load_map(0), Err(MapSetError::Truncated)));
    assert_eq!(loader.current_map(), None);
}
