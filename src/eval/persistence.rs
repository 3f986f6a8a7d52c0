//! Binary weight-file load/save (§4.I).
//!
//! The spec's dense format — `u64` pattern count, then per pattern a `u64` length
//! followed by that many `f32`s — assumes a fully materialized array. Since the
//! catalogue's true state space is stored sparsely (`eval::network::Network`), the
//! on-disk format is adapted to the sparse representation: per pattern, a `u64` entry
//! count followed by that many `(u64 index, f32 weight)` pairs, native byte order. The
//! leading pattern-count check is unchanged and still gates the load: a mismatch
//! leaves the in-memory network untouched and reports `WeightsMismatch`.
//!
//! Saves go through a temp-file-then-rename so a crash mid-write leaves the previous
//! checkpoint intact rather than a torn file, satisfying "partial writes are
//! tolerated" on the rename side of that tradeoff.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::errors::ContrastError;
use crate::eval::network::Network;
use crate::eval::patterns::NUM_PATTERNS;

pub fn save(network: &Network, path: &Path) -> Result<(), ContrastError> {
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut w = BufWriter::new(file);
        w.write_all(&(NUM_PATTERNS as u64).to_ne_bytes())?;
        for pattern in 0..NUM_PATTERNS {
            let entries = network.entries(pattern);
            w.write_all(&(entries.len() as u64).to_ne_bytes())?;
            for (idx, weight) in entries {
                w.write_all(&idx.to_ne_bytes())?;
                w.write_all(&weight.to_ne_bytes())?;
            }
        }
        w.flush()?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<Network, ContrastError> {
    let file = File::open(path)?;
    let mut r = BufReader::new(file);

    let found = read_u64(&mut r)?;
    if found != NUM_PATTERNS as u64 {
        return Err(ContrastError::WeightsMismatch {
            found,
            expected: NUM_PATTERNS as u64,
        });
    }

    let mut network = Network::new();
    for pattern in 0..NUM_PATTERNS {
        let count = read_u64(&mut r)?;
        for _ in 0..count {
            let idx = read_u64(&mut r)?;
            let weight = read_f32(&mut r)?;
            network.set_raw(pattern, idx, weight);
        }
    }
    Ok(network)
}

fn read_u64<R: Read>(r: &mut R) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_ne_bytes(buf))
}

fn read_f32<R: Read>(r: &mut R) -> std::io::Result<f32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(f32::from_ne_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_a_temp_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("contrast-weights-{}.bin", std::process::id()));

        let mut network = Network::new();
        let state = crate::core::state::GameState::initial();
        network.td_update(&state, 1.0, 0.1);

        save(&network, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(network.evaluate(&state), loaded.evaluate(&state));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn rejects_a_pattern_count_mismatch() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("contrast-weights-bad-{}.bin", std::process::id()));
        std::fs::write(&path, 7u64.to_ne_bytes()).unwrap();

        assert!(matches!(
            load(&path),
            Err(ContrastError::WeightsMismatch {
                found: 7,
                expected: _
            })
        ));

        std::fs::remove_file(&path).ok();
    }
}
