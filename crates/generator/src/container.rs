//! Byte layout of the placeholder sound files.
//!
//! The files are not real audio. They carry just enough structure (an ID3v2
//! tag followed by MPEG-1 Layer III frame headers over zeroed payloads) for a
//! browser media element to accept them and play silence.

/// Empty ID3v2.3 tag: magic, version 3.0, no flags, zero size
pub const ID3_PREFIX: [u8; 10] = *b"ID3\x03\x00\x00\x00\x00\x00\x00";

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, stereo, no CRC
pub const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// Zeroed payload following each frame header
pub const FRAME_PAYLOAD_LEN: usize = 144;

pub const FRAME_LEN: usize = FRAME_HEADER.len() + FRAME_PAYLOAD_LEN;

/// Size of the single static block the legacy generator writes
pub const LEGACY_LEN: usize = 64;

/// Total size of a container holding `frames` frames
pub const fn container_len(frames: usize) -> usize {
    ID3_PREFIX.len() + frames * FRAME_LEN
}

/// Build a silent container with `frames` frames
pub fn container_bytes(frames: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(container_len(frames));
    data.extend_from_slice(&ID3_PREFIX);
    for _ in 0..frames {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_PAYLOAD_LEN, 0);
    }
    data
}

/// The fixed block written by the legacy generator: one frame header, then zeros
pub fn legacy_bytes() -> Vec<u8> {
    let mut data = vec![0u8; LEGACY_LEN];
    data[..FRAME_HEADER.len()].copy_from_slice(&FRAME_HEADER);
    data
}
