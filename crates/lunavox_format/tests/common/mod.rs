//! In-memory `.vox` writer for tests.

#![allow(dead_code)]

/// Builds chunk payloads field by field.
#[derive(Default)]
pub struct Payload(Vec<u8>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn bytes(mut self, v: &[u8]) -> Self {
        self.0.extend_from_slice(v);
        self
    }

    pub fn string(self, s: &str) -> Self {
        self.i32(s.len() as i32).bytes(s.as_bytes())
    }

    pub fn dict(self, pairs: &[(&str, &str)]) -> Self {
        let mut out = self.i32(pairs.len() as i32);
        for (k, v) in pairs {
            out = out.string(k).string(v);
        }
        out
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

pub fn chunk(tag: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend((content.len() as u32).to_le_bytes());
    out.extend((children.len() as u32).to_le_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(children);
    out
}

/// A complete file whose `MAIN` chunk holds `children`.
pub fn vox_file(children: &[Vec<u8>]) -> Vec<u8> {
    let body = children.concat();
    let mut out = b"VOX ".to_vec();
    out.extend(150u32.to_le_bytes());
    out.extend(chunk(b"MAIN", &[], &body));
    out
}

pub fn pack(count: u32) -> Vec<u8> {
    chunk(b"PACK", &Payload::new().u32(count).build(), &[])
}

/// `SIZE` in file axis order (x, z, y).
pub fn size(x: i32, z: i32, y: i32) -> Vec<u8> {
    chunk(b"SIZE", &Payload::new().i32(x).i32(z).i32(y).build(), &[])
}

/// `XYZI` from file-order records (x, z, y, color).
pub fn xyzi(voxels: &[[u8; 4]]) -> Vec<u8> {
    let mut payload = Payload::new().u32(voxels.len() as u32);
    for v in voxels {
        payload = payload.bytes(v);
    }
    chunk(b"XYZI", &payload.build(), &[])
}

pub fn rgba(records: &[[u8; 4]; 256]) -> Vec<u8> {
    chunk(b"RGBA", &records.concat(), &[])
}

pub fn matl(id: i32, pairs: &[(&str, &str)]) -> Vec<u8> {
    chunk(b"MATL", &Payload::new().i32(id).dict(pairs).build(), &[])
}

pub fn transform(id: i32, child: i32, pose: &[(&str, &str)]) -> Vec<u8> {
    let payload = Payload::new()
        .i32(id)
        .dict(&[])
        .i32(child)
        .i32(-1)
        .i32(0)
        .i32(1)
        .dict(pose);
    chunk(b"nTRN", &payload.build(), &[])
}

pub fn group(id: i32, children: &[i32]) -> Vec<u8> {
    let mut payload = Payload::new().i32(id).dict(&[]).i32(children.len() as i32);
    for &c in children {
        payload = payload.i32(c);
    }
    chunk(b"nGRP", &payload.build(), &[])
}

pub fn shape(id: i32, model: i32) -> Vec<u8> {
    let payload = Payload::new().i32(id).dict(&[]).i32(1).i32(model).dict(&[]);
    chunk(b"nSHP", &payload.build(), &[])
}

pub fn layer(id: i32, name: &str) -> Vec<u8> {
    let payload = Payload::new().i32(id).dict(&[("_name", name)]).i32(-1);
    chunk(b"LAYR", &payload.build(), &[])
}
