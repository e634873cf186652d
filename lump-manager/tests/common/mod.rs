use std::fs;
use std::path::{Path, PathBuf};

/// A lump with no data is written as a null marker
pub fn write_wad(dir: &Path, file_name: &str, lumps: &[(&str, &[u8])]) -> PathBuf {
    let mut data = Vec::new();
    let mut entries = Vec::new();
    for (name, bytes) in lumps {
        let ofs = if bytes.is_empty() { 0 } else { 12 + data.len() as i32 };
        data.extend_from_slice(bytes);
        entries.push((ofs, bytes.len() as i32, *name));
    }
    write_wad_entries(dir, file_name, &data, &entries)
}

/// A PWAD with `data` straight after the header and a directory of
/// `(offset, size, name)` entries written exactly as given
pub fn write_wad_entries(
    dir: &Path,
    file_name: &str,
    data: &[u8],
    entries: &[(i32, i32, &str)],
) -> PathBuf {
    let dir_offset = 12 + data.len() as i32;
    let mut wad = Vec::new();
    wad.extend_from_slice(b"PWAD");
    wad.extend_from_slice(&(entries.len() as i32).to_le_bytes());
    wad.extend_from_slice(&dir_offset.to_le_bytes());
    wad.extend_from_slice(data);
    for (ofs, len, name) in entries {
        let mut raw = [0u8; 8];
        for (dst, src) in raw.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
        wad.extend_from_slice(&ofs.to_le_bytes());
        wad.extend_from_slice(&len.to_le_bytes());
        wad.extend_from_slice(&raw);
    }

    let path = dir.join(file_name);
    fs::write(&path, wad).unwrap();
    path
}

pub fn make_dir(root: &Path, name: &str) -> PathBuf {
    let path = root.join(name);
    fs::create_dir(&path).unwrap();
    path
}
