use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of amount draws for template mutations.
///
/// `Seeded` draws uniformly; `Fixed` pins every draw to the same point of the
/// range (`0.0` = low end, `0.5` = midpoint, `1.0` = high end), which makes
/// mutation output predictable in tests.
#[derive(Debug, Clone)]
pub enum Randomizer {
    Seeded(StdRng),
    Fixed(f64),
}

impl Randomizer {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Seeds from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self::Seeded(StdRng::from_os_rng())
    }

    /// Every draw lands at `unit` of the range, clamped to `[0, 1]`.
    #[must_use]
    pub fn fixed(unit: f64) -> Self {
        Self::Fixed(unit.clamp(0.0, 1.0))
    }

    fn unit(&mut self) -> f64 {
        match self {
            Randomizer::Seeded(rng) => rng.random::<f64>(),
            Randomizer::Fixed(unit) => *unit,
        }
    }

    /// Uniform draw from `[base·(1−variation), base·(1+variation)]`, rounded to
    /// the nearest multiple of `precision`.
    ///
    /// May return `0` for small bases with wide variation.
    pub fn amount(&mut self, base: u64, variation: f64, precision: u64) -> u64 {
        let unit = self.unit();
        amount_at(base, variation, precision, unit)
    }

    /// Draws a component of `total` whose remainder must stay positive.
    ///
    /// When `total` holds at least two `precision` steps, the drawn part is
    /// clamped into `[precision, total − precision]`, so both the part and
    /// `total - part` are at least one step.
    ///
    /// Smaller totals cannot be split that way. They return half of `total`
    /// rounded to `precision`, which keeps the part a multiple of `precision`
    /// but may leave the part or the remainder at zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn part_of(&mut self, total: u64, base: u64, variation: f64, precision: u64) -> u64 {
        let step = precision.max(1);
        let part = self.amount(base, variation, precision);
        let ceiling = total.saturating_sub(step);
        if ceiling < step {
            return round_to(total as f64 / 2.0, step).min(total);
        }
        part.clamp(step, ceiling)
    }
}

/// Deterministic core of [`Randomizer::amount`]: the value at `unit` of the range.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn amount_at(base: u64, variation: f64, precision: u64, unit: f64) -> u64 {
    let variation = variation.clamp(0.0, 1.0);
    let base = base as f64;
    let min = base * (1.0 - variation);
    let max = base * (1.0 + variation);
    let raw = min + unit.clamp(0.0, 1.0) * (max - min);
    round_to(raw, precision)
}

/// Rounds to the nearest multiple of `precision` (half away from zero).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn round_to(value: f64, precision: u64) -> u64 {
    let precision = precision.max(1);
    let steps = (value.max(0.0) / precision as f64).round();
    (steps as u64).saturating_mul(precision)
}

/// Rounds an integer amount to the nearest multiple of `step`.
#[must_use]
pub fn snap(value: u64, step: u64) -> u64 {
    let step = step.max(1);
    value.saturating_add(step / 2) / step * step
}

/// Formats an amount with comma thousands separators (`2500000` → `2,500,000`).
#[must_use]
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_draw_returns_base() {
        let mut r = Randomizer::fixed(0.5);
        assert_eq!(r.amount(2_500_000, 0.4, 10_000), 2_500_000);
    }

    #[test]
    fn range_edges_are_reachable() {
        assert_eq!(amount_at(2_500_000, 0.4, 10_000, 0.0), 1_500_000);
        assert_eq!(amount_at(2_500_000, 0.4, 10_000, 1.0), 3_500_000);
    }

    #[test]
    fn seeded_draws_are_multiples_within_range() {
        let mut r = Randomizer::seeded(42);
        for _ in 0..500 {
            let value = r.amount(30_000, 0.5, 1_000);
            assert_eq!(value % 1_000, 0);
            assert!((15_000..=45_000).contains(&value), "{value}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Randomizer::seeded(7);
        let mut b = Randomizer::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.amount(1_000_000, 0.3, 10_000), b.amount(1_000_000, 0.3, 10_000));
        }
    }

    #[test]
    fn small_base_can_round_to_zero() {
        assert_eq!(amount_at(100, 0.5, 1_000, 0.0), 0);
    }

    #[test]
    fn part_of_keeps_remainder_positive() {
        // A part drawn at the top of its range would exceed the total.
        let mut r = Randomizer::fixed(1.0);
        let part = r.part_of(100_000, 200_000, 0.3, 10_000);
        assert_eq!(part, 90_000);

        // A part that rounds to zero is lifted to one step.
        let mut r = Randomizer::fixed(0.0);
        let part = r.part_of(100_000, 400, 0.5, 1_000);
        assert_eq!(part, 1_000);
    }

    #[test]
    fn part_of_rounds_half_of_degenerate_totals() {
        let mut r = Randomizer::fixed(0.5);
        // Half of 1,500 rounds to one step and leaves a 500 remainder.
        assert_eq!(r.part_of(1_500, 5_000, 0.2, 1_000), 1_000);
        // One step cannot be split into two positive steps.
        assert_eq!(r.part_of(1_000, 5_000, 0.2, 1_000), 1_000);
        assert_eq!(r.part_of(400, 5_000, 0.2, 1_000), 0);
        assert_eq!(r.part_of(1, 10, 0.0, 1), 1);
        assert_eq!(r.part_of(0, 10, 0.0, 1), 0);
        for total in [0, 1, 400, 1_000, 1_500, 1_999] {
            let part = r.part_of(total, 5_000, 0.2, 1_000);
            assert_eq!(part % 1_000, 0, "{total}");
            assert!(part <= total, "{total}");
        }
    }

    #[test]
    fn snap_rounds_to_step() {
        assert_eq!(snap(3_010_000, 30_000), 3_000_000);
        assert_eq!(snap(3_020_000, 30_000), 3_030_000);
        assert_eq!(snap(615_000, 5_000), 615_000);
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1_000), "1,000");
        assert_eq!(format_amount(2_500_000), "2,500,000");
        assert_eq!(format_amount(123_456_789), "123,456,789");
    }
}
