// Fixture builders shared by the unit tests.

/// A box using the compact 32-bit size.
pub fn atom(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let size = (payload.len() + 8) as u32;

    let mut buf = Vec::with_capacity(size as usize);
    buf.extend_from_slice(&size.to_be_bytes());
    buf.extend_from_slice(kind);
    buf.extend_from_slice(payload);
    buf
}

/// A box using the 64-bit size extension.
pub fn atom_ext(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let size = (payload.len() + 16) as u64;

    let mut buf = Vec::with_capacity(size as usize);
    buf.extend_from_slice(&1u32.to_be_bytes());
    buf.extend_from_slice(kind);
    buf.extend_from_slice(&size.to_be_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// A box with a zero size, extending to the end of the file.
pub fn atom_to_end(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(payload.len() + 8);
    buf.extend_from_slice(&0u32.to_be_bytes());
    buf.extend_from_slice(kind);
    buf.extend_from_slice(payload);
    buf
}
