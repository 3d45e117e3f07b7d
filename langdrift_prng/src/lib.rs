// Deterministic, portable pseudo-random number generator for langdrift.
//
// xoshiro256++ (Blackman & Vigna, 2019) seeded through SplitMix64, written
// out by hand so the output stream is identical on every platform and
// compiler. Every random decision in the engine goes through `DriftRng`:
// sentence sampling (`langdrift_lang::sampler`), per-turn rule selection
// (`langdrift_sim::session`) and the letter/word picks inside each mutation
// rule (`langdrift_sim::rules`).
//
// Streams are split with `fork()`: the session owns one generator and hands
// every language group a child generator derived from it. A group's draws
// therefore depend only on its own history, never on how many draws its
// siblings made before it in the same turn.
//
// **Critical constraint: determinism.** Given the same prior state, every
// method must produce the same output. No floating point in the core
// generator, no OS entropy, no stdlib hashing.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ generator, the engine's only source of randomness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftRng {
    s: [u64; 4],
}

impl DriftRng {
    /// Create a generator from a `u64` seed.
    ///
    /// SplitMix64 expands the seed into the 256-bit state, so nearby seeds
    /// still give unrelated streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Derive an independent child generator and advance this one.
    ///
    /// The child is seeded from the next output of `self`, so forking the
    /// same parent state always yields the same child.
    pub fn fork(&mut self) -> DriftRng {
        DriftRng::new(self.next_u64())
    }

    /// Next `u64` in the stream.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform integer in `[low, high)`, without modulo bias.
    ///
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Uniform `usize` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Uniform index into a collection of `len` items, or `None` if empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.range_usize(0, len))
        }
    }

    /// Pick one element uniformly. Returns `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).map(|i| &items[i])
    }
}

/// SplitMix64 step, used only to expand a seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
