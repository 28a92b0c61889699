use lofty::prelude::*;
use lofty::probe::Probe;
use serde::Serialize;
use std::path::Path;

/// Whether a file is recognized as audio by a tag/format reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeResult {
    Audio { duration_ms: u64 },
    Unrecognized { reason: String },
}

impl ProbeResult {
    pub fn is_audio(&self) -> bool {
        matches!(self, ProbeResult::Audio { .. })
    }
}

/// Probe a file's format from its extension and contents.
///
/// Never fails: read errors are folded into `Unrecognized`.
///
/// The generator's placeholders come back `Unrecognized`: their frame header
/// announces a 417-byte frame but each frame is only 148 bytes, which a strict
/// MPEG reader rejects. Browsers tolerate the short frames, so this only flags
/// that a file is still a placeholder rather than a real recording.
pub fn probe_file(path: &Path) -> ProbeResult {
    let probe = match Probe::open(path) {
        Ok(probe) => probe,
        Err(err) => {
            return ProbeResult::Unrecognized {
                reason: err.to_string(),
            };
        }
    };

    match probe.read() {
        Ok(tagged_file) => {
            let duration = tagged_file.properties().duration();
            ProbeResult::Audio {
                duration_ms: duration.as_millis() as u64,
            }
        }
        Err(err) => ProbeResult::Unrecognized {
            reason: err.to_string(),
        },
    }
}
