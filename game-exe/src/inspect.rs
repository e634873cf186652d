//! Text reports for lumps and maps.

use lump_manager::{LumpIndex, LumpManager, LumpSource};
use mapset::{MapSetLoader, Plane};
use std::collections::HashMap;
use std::io::{Seek, SeekFrom};

/// How many of the most common wall tiles a map report lists
const TOP_TILES: usize = 8;

/// Where `name` has a directory slot, and where the data a load would return
/// comes from along with its size. The two differ when a search path
/// overrides a WAD, or when the newest slot is a null marker.
pub fn describe_lump(lumps: &LumpManager, name: &str) -> String {
    let location = match lumps.index_of(name) {
        Some(LumpIndex::Wad { wad, lump }) => {
            let file = lumps
                .wad(wad)
                .map(|w| w.file_path().display().to_string())
                .unwrap_or_default();
            format!("lump {lump} of {file}")
        }
        Some(LumpIndex::OnDiskOnly) => "on disk only".to_string(),
        None => return format!("{name}: not found"),
    };

    match loaded_from(lumps, name) {
        Some(source) => format!("{name}: {location}, {source}"),
        None => format!("{name}: {location}, null entry"),
    }
}

/// Size and origin of the copy `resolve_to_stream` hands out
fn loaded_from(lumps: &LumpManager, name: &str) -> Option<String> {
    let mut stream = lumps.resolve_to_stream(name)?;
    if stream.is_on_disk() {
        let size = stream.seek(SeekFrom::End(0)).ok()?;
        return Some(format!("{size} bytes from a search path"));
    }

    lumps.lookup_order().find_map(|source| match source {
        LumpSource::Wad(wad) => wad
            .lump_size(name)
            .map(|size| format!("{size} bytes from {}", wad.file_path().display())),
        LumpSource::Path(_) => None,
    })
}

pub fn describe_mapset(maps: &MapSetLoader) -> String {
    let (Some(path), Some(flags), Some(version)) = (maps.path(), maps.flags(), maps.version())
    else {
        return "No map set loaded".to_string();
    };

    let mut out = format!("{}: {flags:?}, version {version:#06x}\n", path.display());
    for (index, desc) in maps.used_maps() {
        out.push_str(&format!(
            "  {index:>2} {:<24} tag {:#06x}\n",
            desc.name(),
            desc.rlew_tag()
        ));
    }
    out
}

/// Name, tag and the wall tile histogram of the loaded map
pub fn describe_map(maps: &MapSetLoader) -> String {
    let (Some(index), Some(walls)) = (maps.current_map(), maps.plane(Plane::Walls)) else {
        return "No map loaded".to_string();
    };
    let Some(desc) = maps.map_info(index) else {
        return "No map loaded".to_string();
    };

    let histogram = tile_histogram(walls);
    let mut out = format!(
        "Map {index}: {}, tag {:#06x}, flags {:?}\n",
        desc.name(),
        desc.rlew_tag(),
        desc.flags
    );
    out.push_str(&format!("  {} distinct wall tiles\n", histogram.len()));
    for (tile, count) in histogram.iter().take(TOP_TILES) {
        out.push_str(&format!("  {tile:#06x} x {count}\n"));
    }
    out
}

/// Every distinct tile with its count, most common first. Ties are ordered by
/// tile value.
pub fn tile_histogram(plane: &[u16]) -> Vec<(u16, usize)> {
    let mut counts: HashMap<u16, usize> = HashMap::new();
    for tile in plane {
        *counts.entry(*tile).or_default() += 1;
    }

    let mut histogram: Vec<(u16, usize)> = counts.into_iter().collect();
    histogram.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    histogram
}
