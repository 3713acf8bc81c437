//! Per-stream RNG seeding with ChaCha8.
//!
//! Every consumer of randomness in a run gets its own ChaCha8 stream of the
//! run seed. Same seed -> same history, always.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stream used by the round engine to sample states.
pub const STATE_STREAM: u64 = 0;
/// Stream used by listeners for exploration draws.
pub const LISTENER_STREAM: u64 = 1;
/// Stream used by [`ClampedListener`](crate::strategy::ClampedListener) fallbacks.
pub const CLAMP_STREAM: u64 = 2;

/// Create a deterministic RNG for a given run seed and stream ID.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}
