//! Minimal `.vox` writer for importer tests.

#![allow(dead_code)]

fn le(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn dict(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut out = le(&[pairs.len() as i32]);
    for s in pairs.iter().flat_map(|(k, v)| [k, v]) {
        out.extend(le(&[s.len() as i32]));
        out.extend_from_slice(s.as_bytes());
    }
    out
}

pub fn chunk(tag: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend(le(&[content.len() as i32, 0]));
    out.extend_from_slice(content);
    out
}

pub fn vox_file(children: &[Vec<u8>]) -> Vec<u8> {
    let body = children.concat();
    let mut out = b"VOX ".to_vec();
    out.extend(le(&[150]));
    out.extend_from_slice(b"MAIN");
    out.extend(le(&[0, body.len() as i32]));
    out.extend(body);
    out
}

/// `SIZE` + `XYZI` for one model; `voxels` are (x, y, z, color) in scene axes.
pub fn model(size: [i32; 3], voxels: &[[u8; 4]]) -> Vec<Vec<u8>> {
    let [x, y, z] = size;
    let mut xyzi = le(&[voxels.len() as i32]);
    for &[vx, vy, vz, c] in voxels {
        xyzi.extend([vx, vz, vy, c]);
    }
    vec![chunk(b"SIZE", &le(&[x, z, y])), chunk(b"XYZI", &xyzi)]
}

pub fn matl(id: i32, kind: &str) -> Vec<u8> {
    let mut content = le(&[id]);
    content.extend(dict(&[("_type", kind)]));
    chunk(b"MATL", &content)
}

pub fn transform(id: i32, child: i32, translation: &str) -> Vec<u8> {
    let mut content = le(&[id]);
    content.extend(dict(&[]));
    content.extend(le(&[child, -1, -1, 1]));
    content.extend(dict(&[("_t", translation)]));
    chunk(b"nTRN", &content)
}

pub fn group(id: i32, children: &[i32]) -> Vec<u8> {
    let mut content = le(&[id]);
    content.extend(dict(&[]));
    content.extend(le(&[children.len() as i32]));
    content.extend(le(children));
    chunk(b"nGRP", &content)
}

pub fn shape(id: i32, model: i32) -> Vec<u8> {
    let mut content = le(&[id]);
    content.extend(dict(&[]));
    content.extend(le(&[1, model]));
    content.extend(dict(&[]));
    chunk(b"nSHP", &content)
}
