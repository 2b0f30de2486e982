//! Anti-whale withdrawal curve.
//!
//! Maps a participant's cumulative deposit to the part of it that may be
//! withdrawn. Small deposits stay fully liquid, the withdrawable share then
//! shrinks through the mid range fast enough that the absolute withdrawable
//! amount falls, and very large deposits get a flat 3%.
//!
//! The mid range is table driven: the withdrawable share is interpolated in
//! basis points over whole payment units between fixed calibration knots. All
//! arithmetic is integer and the function is total over non-negative `i128`.

/// Basis-point denominator.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Cumulative deposits up to this many whole units are fully withdrawable.
pub const FULL_LIQUIDITY_UNITS: i128 = 1;

/// Last whole-unit amount covered by the calibration knots.
pub const CURVE_CEILING_UNITS: i128 = 150;

/// Withdrawable share above the ceiling.
pub const HIGH_TIER_BPS: i128 = 300;

/// `(whole units, withdrawable bps)` calibration knots, strictly increasing in units.
const CURVE_KNOTS: [(i128, i128); 10] = [
    (1, 6_900),
    (4, 6_700),
    (10, 6_200),
    (13, 5_900),
    (20, 5_400),
    (40, 3_900),
    (90, 1_300),
    (121, 500),
    (130, 400),
    (150, 200),
];

/// Withdrawable share in basis points for a deposit of `units` whole units,
/// `FULL_LIQUIDITY_UNITS <= units <= CURVE_CEILING_UNITS`.
fn interpolated_bps(units: i128) -> i128 {
    let mut lower = CURVE_KNOTS[0];
    for &upper in CURVE_KNOTS.iter().skip(1) {
        if units <= upper.0 {
            let span = upper.0 - lower.0;
            let drop = lower.1 - upper.1;
            return lower.1 - drop * (units - lower.0) / span;
        }
        lower = upper;
    }
    lower.1
}

/// `amount * bps / 10_000` without overflowing for any non-negative `amount`.
fn apply_bps(amount: i128, bps: i128) -> i128 {
    let whole = amount / BPS_DENOMINATOR;
    let rest = amount % BPS_DENOMINATOR;
    whole * bps + rest * bps / BPS_DENOMINATOR
}

/// Amount of a cumulative deposit `accumulated` that may be withdrawn.
///
/// `unit` is one whole payment unit in its smallest denomination.
pub fn withdrawable(accumulated: i128, unit: i128) -> i128 {
    if accumulated <= 0 {
        return 0;
    }
    if accumulated <= FULL_LIQUIDITY_UNITS.saturating_mul(unit) {
        return accumulated;
    }
    if accumulated <= CURVE_CEILING_UNITS.saturating_mul(unit) {
        let bps = interpolated_bps(accumulated / unit);
        return apply_bps(accumulated, bps);
    }
    apply_bps(accumulated, HIGH_TIER_BPS)
}

/// Portion of a cumulative deposit that can never be withdrawn.
pub fn locked(accumulated: i128, unit: i128) -> i128 {
    if accumulated <= 0 {
        return 0;
    }
    accumulated - withdrawable(accumulated, unit)
}
