//! Entropy-backed index picking (`crypto.getRandomValues` in the browser).

/// Reduce 8 entropy bytes to an index in `[0, n)`. `n` must be non-zero.
///
/// Modulo bias is below 2^-40 for any board that fits on a screen.
pub fn index_from_entropy(bytes: [u8; 8], n: usize) -> usize {
    (u64::from_le_bytes(bytes) % n as u64) as usize
}

/// Uniform index in `[0, n)`. Falls back to 0 if the platform has no entropy source.
pub fn random_below(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut bytes = [0u8; 8];
    if let Err(e) = getrandom::getrandom(&mut bytes) {
        log::warn!("entropy unavailable ({}); using cell 0", e);
        return 0;
    }
    index_from_entropy(bytes, n)
}
