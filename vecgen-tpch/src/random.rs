//! Seeded pseudo-random streams.
//!
//! Every generated column is backed by one linear congruential stream with a
//! fixed per-column seed and a fixed budget of draws per row. Unused draws are
//! burned at the end of each row, so a column's value at row `i` never depends
//! on how many draws another value in the same row happened to consume.
//! Streams can also be fast-forwarded to an arbitrary row in `O(log n)`
//! multiplications, which is what makes independent splits cheap.

use crate::distribution::Distribution;
use crate::text::TextPool;

/// Multiplier of the 32-bit congruential stream.
const MULTIPLIER: i64 = 16807;
/// Modulus of the 32-bit congruential stream, `2^31 - 1`.
const MODULUS: i64 = 2147483647;

/// A 32-bit congruential stream with a fixed draw budget per row.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomStream {
    seed: i64,
    usage: i32,
    seeds_per_row: i32,
}

impl RandomStream {
    pub fn new(seed: i64, seeds_per_row: i32) -> Self {
        Self {
            seed,
            usage: 0,
            seeds_per_row,
        }
    }

    /// Draws a value in `[lower, upper]`, both inclusive.
    pub fn next_int(&mut self, lower: i32, upper: i32) -> i32 {
        self.next_seed();

        // The reference arithmetic overflows when the requested range spans
        // the whole i32 domain (the alphanumeric stream asks for
        // `[0, i32::MAX]`); the wrap to i32::MIN is part of the sequence and
        // must be kept.
        let range = (upper - lower).wrapping_add(1) as f64;
        let value = ((self.seed as f64 / MODULUS as f64) * range) as i32;

        lower + value
    }

    fn next_seed(&mut self) -> i64 {
        self.seed = (self.seed * MULTIPLIER) % MODULUS;
        self.usage += 1;
        self.seed
    }

    /// Burns whatever remains of this row's draw budget.
    pub fn row_finished(&mut self) {
        self.advance_seed((self.seeds_per_row - self.usage) as i64);
        self.usage = 0;
    }

    /// Fast-forwards the stream past `row_count` whole rows.
    pub fn advance_rows(&mut self, row_count: u64) {
        if self.usage != 0 {
            self.row_finished();
        }
        self.advance_seed(self.seeds_per_row as i64 * row_count as i64);
    }

    // Applies `count` steps of the recurrence by squaring the multiplier.
    fn advance_seed(&mut self, mut count: i64) {
        let mut multiplier = MULTIPLIER;
        while count > 0 {
            if count % 2 != 0 {
                self.seed = (multiplier * self.seed) % MODULUS;
            }
            count /= 2;
            multiplier = (multiplier * multiplier) % MODULUS;
        }
    }
}

/// A 64-bit stream used for key columns once the key space outgrows i32.
///
/// The 64-bit recurrence only drives `next_long`; row skipping still uses the
/// 32-bit advance, which is a quirk of the benchmark definition that has to be
/// preserved for draw parity.
#[derive(Default, Debug, Clone, Copy)]
pub struct WideRandomStream {
    seed: i64,
    usage: i32,
    seeds_per_row: i32,
}

impl WideRandomStream {
    const WIDE_MULTIPLIER: i64 = 6364136223846793005;
    const WIDE_INCREMENT: i64 = 1;

    pub fn new(seed: i64, seeds_per_row: i32) -> Self {
        Self {
            seed,
            usage: 0,
            seeds_per_row,
        }
    }

    pub fn next_long(&mut self, lower: i64, upper: i64) -> i64 {
        self.seed = self
            .seed
            .wrapping_mul(Self::WIDE_MULTIPLIER)
            .wrapping_add(Self::WIDE_INCREMENT);
        self.usage += 1;

        lower + self.seed.abs() % (upper - lower + 1)
    }

    pub fn row_finished(&mut self) {
        self.advance_seed_32((self.seeds_per_row - self.usage) as i64);
        self.usage = 0;
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        if self.usage != 0 {
            self.row_finished();
        }
        self.advance_seed_32(self.seeds_per_row as i64 * row_count as i64);
    }

    fn advance_seed_32(&mut self, mut count: i64) {
        let mut multiplier = MULTIPLIER;
        while count > 0 {
            if count % 2 != 0 {
                self.seed = (multiplier * self.seed) % MODULUS;
            }
            count /= 2;
            multiplier = (multiplier * multiplier) % MODULUS;
        }
    }
}

/// Uniform draws from a fixed inclusive i32 range.
#[derive(Default, Debug, Clone, Copy)]
pub struct BoundedInt {
    lower: i32,
    upper: i32,
    stream: RandomStream,
}

impl BoundedInt {
    pub fn new(seed: i64, lower: i32, upper: i32) -> Self {
        Self::with_seeds_per_row(seed, lower, upper, 1)
    }

    pub fn with_seeds_per_row(seed: i64, lower: i32, upper: i32, seeds_per_row: i32) -> Self {
        Self {
            lower,
            upper,
            stream: RandomStream::new(seed, seeds_per_row),
        }
    }

    pub fn next_value(&mut self) -> i32 {
        self.stream.next_int(self.lower, self.upper)
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        self.stream.advance_rows(row_count);
    }

    pub fn row_finished(&mut self) {
        self.stream.row_finished();
    }
}

/// Uniform draws from a fixed inclusive i64 range.
///
/// Below the `wide` threshold this is the 32-bit stream widened on the way
/// out, so small and large scale factors share sequences where their key
/// spaces overlap the i32 domain.
#[derive(Default, Debug, Clone, Copy)]
pub struct BoundedLong {
    wide: bool,
    lower: i64,
    upper: i64,
    wide_stream: WideRandomStream,
    stream: RandomStream,
}

impl BoundedLong {
    pub fn new(seed: i64, wide: bool, lower: i64, upper: i64) -> Self {
        Self::with_seeds_per_row(seed, wide, lower, upper, 1)
    }

    pub fn with_seeds_per_row(
        seed: i64,
        wide: bool,
        lower: i64,
        upper: i64,
        seeds_per_row: i32,
    ) -> Self {
        Self {
            wide,
            lower,
            upper,
            wide_stream: WideRandomStream::new(seed, seeds_per_row),
            stream: RandomStream::new(seed, seeds_per_row),
        }
    }

    pub fn next_value(&mut self) -> i64 {
        if self.wide {
            self.wide_stream.next_long(self.lower, self.upper)
        } else {
            self.stream.next_int(self.lower as i32, self.upper as i32) as i64
        }
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        if self.wide {
            self.wide_stream.advance_rows(row_count);
        } else {
            self.stream.advance_rows(row_count);
        }
    }

    pub fn row_finished(&mut self) {
        if self.wide {
            self.wide_stream.row_finished();
        } else {
            self.stream.row_finished();
        }
    }
}

/// Random alphanumeric strings (addresses and similar filler columns).
#[derive(Debug, Clone, Copy)]
pub struct AlphaNumeric {
    stream: RandomStream,
    min_length: i32,
    max_length: i32,
}

impl AlphaNumeric {
    const CHARSET: &'static [u8] =
        b"0123456789abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ,";

    // Length draw plus up to eight packed character draws.
    const SEEDS_PER_ROW: i32 = 9;

    pub fn new(seed: i64, average_length: i32) -> Self {
        Self::with_seeds_per_row(seed, average_length, 1)
    }

    pub fn with_seeds_per_row(seed: i64, average_length: i32, seeds_per_row: i32) -> Self {
        Self {
            stream: RandomStream::new(seed, Self::SEEDS_PER_ROW * seeds_per_row),
            min_length: (average_length as f64 * 0.4) as i32,
            max_length: (average_length as f64 * 1.6) as i32,
        }
    }

    pub fn next_value(&mut self) -> String {
        let length = self.stream.next_int(self.min_length, self.max_length) as usize;
        let mut out = String::with_capacity(length);

        // One draw packs five six-bit characters.
        let mut bits: i64 = 0;
        for i in 0..length {
            if i % 5 == 0 {
                bits = self.stream.next_int(0, i32::MAX) as i64;
            }
            out.push(Self::CHARSET[(bits & 0x3f) as usize] as char);
            bits >>= 6;
        }
        out
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        self.stream.advance_rows(row_count);
    }

    pub fn row_finished(&mut self) {
        self.stream.row_finished();
    }
}

/// Phone numbers of the form `CC-DDD-DDD-DDDD`, country code keyed off the
/// nation.
#[derive(Debug, Clone, Copy)]
pub struct PhoneNumber {
    stream: RandomStream,
}

impl PhoneNumber {
    const COUNTRY_CODES: i64 = 90;

    pub fn new(seed: i64) -> Self {
        Self::with_seeds_per_row(seed, 1)
    }

    pub fn with_seeds_per_row(seed: i64, seeds_per_row: i32) -> Self {
        Self {
            stream: RandomStream::new(seed, 3 * seeds_per_row),
        }
    }

    pub fn next_value(&mut self, nation_key: i64) -> String {
        let country = 10 + nation_key % Self::COUNTRY_CODES;
        let local1 = self.stream.next_int(100, 999);
        let local2 = self.stream.next_int(100, 999);
        let local3 = self.stream.next_int(1000, 9999);
        format!("{country:02}-{local1:03}-{local2:03}-{local3:04}")
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        self.stream.advance_rows(row_count);
    }

    pub fn row_finished(&mut self) {
        self.stream.row_finished();
    }
}

/// Weighted picks from a static value distribution.
#[derive(Debug, Clone, Copy)]
pub struct PickString {
    stream: RandomStream,
    distribution: &'static Distribution,
}

impl PickString {
    pub fn new(seed: i64, distribution: &'static Distribution) -> Self {
        Self::with_seeds_per_row(seed, distribution, 1)
    }

    pub fn with_seeds_per_row(
        seed: i64,
        distribution: &'static Distribution,
        seeds_per_row: i32,
    ) -> Self {
        Self {
            stream: RandomStream::new(seed, seeds_per_row),
            distribution,
        }
    }

    pub fn next_value(&mut self) -> &'static str {
        self.distribution.random_value(&mut self.stream)
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        self.stream.advance_rows(row_count);
    }

    pub fn row_finished(&mut self) {
        self.stream.row_finished();
    }
}

/// Space-joined sequences of distinct values from one distribution
/// (part names are five distinct color words).
#[derive(Debug, Clone, Copy)]
pub struct WordSequence {
    stream: RandomStream,
    count: usize,
    distribution: &'static Distribution,
}

impl WordSequence {
    pub fn new(seed: i64, count: usize, distribution: &'static Distribution) -> Self {
        Self::with_seeds_per_row(seed, count, distribution, 1)
    }

    pub fn with_seeds_per_row(
        seed: i64,
        count: usize,
        distribution: &'static Distribution,
        seeds_per_row: i32,
    ) -> Self {
        Self {
            stream: RandomStream::new(seed, distribution.size() as i32 * seeds_per_row),
            count,
            distribution,
        }
    }

    pub fn next_value(&mut self) -> String {
        let mut values: Vec<&str> = self.distribution.values().collect();

        // Partial swap shuffle; only the first `count` slots matter.
        for current in 0..self.count {
            let swap = self
                .stream
                .next_int(current as i32, values.len() as i32 - 1) as usize;
            values.swap(current, swap);
        }
        values.truncate(self.count);
        values.join(" ")
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        self.stream.advance_rows(row_count);
    }

    pub fn row_finished(&mut self) {
        self.stream.row_finished();
    }
}

/// Comment text: random windows into the shared grammar-generated pool.
#[derive(Debug, Clone, Copy)]
pub struct TextFragment {
    stream: RandomStream,
    min_length: i32,
    max_length: i32,
}

impl TextFragment {
    pub fn new(seed: i64, average_length: f64) -> Self {
        Self::with_seeds_per_row(seed, average_length, 1)
    }

    pub fn with_seeds_per_row(seed: i64, average_length: f64, seeds_per_row: i32) -> Self {
        Self {
            // One draw for the offset, one for the length.
            stream: RandomStream::new(seed, seeds_per_row * 2),
            min_length: (average_length * 0.4) as i32,
            max_length: (average_length * 1.6) as i32,
        }
    }

    pub fn next_value(&mut self, pool: &'static TextPool) -> &'static str {
        let offset = self.stream.next_int(0, pool.size() - self.max_length);
        let length = self.stream.next_int(self.min_length, self.max_length);
        pool.text(offset, offset + length)
    }

    pub fn advance_rows(&mut self, row_count: u64) {
        self.stream.advance_rows(row_count);
    }

    pub fn row_finished(&mut self) {
        self.stream.row_finished();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_int_stays_in_range() {
        let mut rng = BoundedInt::new(933588178, 1, 7);
        for _ in 0..10_000 {
            let v = rng.next_value();
            assert!((1..=7).contains(&v));
            rng.row_finished();
        }
    }

    #[test]
    fn advance_rows_matches_step_by_step() {
        let mut stepped = BoundedInt::new(1066728069, 0, 2405);
        for _ in 0..1000 {
            stepped.next_value();
            stepped.row_finished();
        }

        let mut jumped = BoundedInt::new(1066728069, 0, 2405);
        jumped.advance_rows(1000);

        for _ in 0..100 {
            assert_eq!(stepped.next_value(), jumped.next_value());
            stepped.row_finished();
            jumped.row_finished();
        }
    }

    #[test]
    fn unused_draws_do_not_shift_the_stream() {
        // A stream with a budget of 4 that only draws once per row must
        // stay aligned with one that draws all four.
        let mut lazy = RandomStream::new(709314158, 4);
        let mut eager = RandomStream::new(709314158, 4);

        for _ in 0..50 {
            let a = lazy.next_int(0, 100);
            let b = eager.next_int(0, 100);
            assert_eq!(a, b);
            for _ in 0..3 {
                eager.next_int(0, 100);
            }
            lazy.row_finished();
            eager.row_finished();
        }
    }

    #[test]
    fn narrow_bounded_long_matches_bounded_int() {
        let mut long = BoundedLong::new(851767375, false, 1, 150_000);
        let mut int = BoundedInt::new(851767375, 1, 150_000);
        for _ in 0..1000 {
            assert_eq!(long.next_value(), int.next_value() as i64);
            long.row_finished();
            int.row_finished();
        }
    }

    #[test]
    fn alpha_numeric_lengths_cover_the_band() {
        let mut rng = AlphaNumeric::new(706178559, 25);
        let mut min_seen = usize::MAX;
        let mut max_seen = 0;
        for _ in 0..2000 {
            let v = rng.next_value();
            min_seen = min_seen.min(v.len());
            max_seen = max_seen.max(v.len());
            assert!(v.is_ascii());
            rng.row_finished();
        }
        assert!(min_seen <= 12);
        assert!(max_seen >= 38);
    }

    #[test]
    fn phone_number_shape() {
        let mut rng = PhoneNumber::new(884434366);
        let v = rng.next_value(7);
        assert_eq!(v.len(), 15);
        assert!(v.starts_with("17-"));
        let parts: Vec<&str> = v.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1].len(), 3);
        assert_eq!(parts[2].len(), 3);
        assert_eq!(parts[3].len(), 4);
    }
}
