use std::hash::Hasher;

use estimate_runtime::{Coordinate, MissionInputs};

/// A deterministic FNV-1a 64-bit hasher.
///
/// Used instead of `DefaultHasher` (which is randomized) so that input
/// fingerprints are stable across runs and processes.
#[derive(Debug)]
pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }

    fn write_str(&mut self, value: &str) {
        self.write_usize(value.len());
        self.write(value.as_bytes());
    }

    fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    fn write_coordinate(&mut self, point: Coordinate) {
        self.write_f64(point.lat);
        self.write_f64(point.lng);
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Fingerprint of an input snapshot, recorded on the estimate built from it.
pub fn fingerprint_inputs(inputs: &MissionInputs) -> u64 {
    let mut hasher = FnvHasher::new();
    hasher.write_str(&inputs.station);

    hasher.write_usize(inputs.sites.len());
    for site in &inputs.sites {
        hasher.write_u32(site.id.0);
        hasher.write_str(&site.name);
        hasher.write_coordinate(site.coordinate);
        hasher.write_usize(site.boundary.len());
        for vertex in &site.boundary {
            hasher.write_coordinate(*vertex);
        }
    }

    hasher.write_str(&inputs.manual_district);
    match inputs.custom_override {
        Some(point) => {
            hasher.write_u8(1);
            hasher.write_coordinate(point);
        }
        None => hasher.write_u8(0),
    }

    hasher.write_usize(inputs.personnel.len());
    for entry in &inputs.personnel {
        hasher.write_u32(entry.id.0);
        hasher.write_str(&entry.role);
        hasher.write_u32(entry.officers);
        hasher.write_u32(entry.days);
    }

    hasher.write_f64(inputs.fuel_price);
    hasher.write_u32(inputs.fleet_count);
    hasher.finish()
}
