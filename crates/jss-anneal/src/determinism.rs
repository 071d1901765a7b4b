use jss_core::derive_substream_seed;

/// Derives the deterministic seed used for one read of a sampling call.
pub fn read_seed(call_seed: u64, read: usize) -> u64 {
    derive_substream_seed(call_seed, read as u64)
}
