// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving candidate fragments against the depth layers of a pixel.

use crate::buffers::{CLEAR_DEPTH, Fragment};

/// The depth layers of a single pixel, nearest first.
pub(crate) trait LayerSlots {
    /// The number of layers.
    fn layers(&self) -> usize;
    /// The contents of `layer`.
    fn get(&self, layer: usize) -> Fragment;
    /// Overwrite `layer`.
    fn set(&mut self, layer: usize, fragment: Fragment);
}

/// Insert `candidate` into the layers of a pixel, keeping them sorted nearest first.
///
/// The candidate moves into the first layer it is strictly closer than, and every fragment
/// from there on moves one layer back. Whatever falls off the last layer is dropped. Since
/// the comparison is strict, a fragment never overtakes one at exactly the same depth, so
/// ties keep the order in which the fragments arrived.
///
/// A candidate that is already stored, with the same triangle and the same depth bits, is
/// not inserted a second time. Resolving the same fragments into the same layers again thus
/// leaves them unchanged.
///
/// Returns whether the candidate was stored.
pub(crate) fn resolve(slots: &mut impl LayerSlots, candidate: Fragment) -> bool {
    if candidate.depth.is_nan() || candidate.depth >= CLEAR_DEPTH {
        return false;
    }

    let layers = slots.layers();
    let already_stored = (0..layers).map(|layer| slots.get(layer)).any(|stored| {
        stored.is_occupied()
            && stored.triangle_id == candidate.triangle_id
            && stored.depth.to_bits() == candidate.depth.to_bits()
    });
    if already_stored {
        return false;
    }

    let mut carried = candidate;
    let mut inserted = false;
    for layer in 0..layers {
        let current = slots.get(layer);
        if carried.depth < current.depth {
            slots.set(layer, carried);
            inserted = true;
            if !current.is_occupied() {
                break;
            }
            carried = current;
        }
    }

    inserted
}
