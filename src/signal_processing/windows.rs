//! Symmetric tapering windows for FIR design.

use futuredsp::windows;

use crate::config::WindowKind;

/// Window of the requested kind, symmetric and of length `len`
///
/// Windows of length 0 or 1 are all ones. The first half is mirrored onto
/// the second so that `w[n] == w[len - 1 - n]` holds bit for bit.
pub fn window(kind: WindowKind, len: usize) -> Vec<f64> {
    if len <= 1 {
        return vec![1.0; len];
    }
    let mut taps = match kind {
        WindowKind::Hamming => windows::hamming(len, false),
        WindowKind::Hann => windows::hann(len, false),
        WindowKind::Blackman => windows::blackman(len, false),
        WindowKind::Rectangular => windows::rect(len),
    };
    for n in 0..len / 2 {
        taps[len - 1 - n] = taps[n];
    }
    taps
}
