//! Bracket allocation over a tiered rate table.

use crate::config::Tier;

/// Total charge for `quantity` consumption units against an ordered tier
/// list whose final tier is the open-ended overflow bracket.
///
/// Bracket walk:
/// - The first bounded tier contributes its `unit_value` as a flat amount,
///   not scaled by quantity. This is the minimum-service bracket.
/// - Every later bounded tier contributes
///   `min(remaining, range_width) * unit_value`.
/// - Each bounded tier consumes `range_width` units of the remaining
///   quantity whether or not the quantity filled it.
/// - Once the bounded tiers are exhausted, the overflow tier absorbs
///   everything left at `remaining * unit_value`.
///
/// `quantity <= 0` (or NaN) allocates nothing. An empty tier list allocates
/// nothing. A single-tier table has no bounded brackets, so it degenerates
/// to `quantity * unit_value`.
pub fn allocate(tiers: &[Tier], quantity: f64) -> f64 {
    let Some((overflow, bounded)) = tiers.split_last() else {
        return 0.0;
    };

    let mut total = 0.0;
    let mut remaining = quantity;
    let mut bracket = 0;

    while remaining > 0.0 {
        match bounded.get(bracket) {
            Some(tier) => {
                total += if bracket == 0 {
                    tier.unit_value
                } else {
                    remaining.min(tier.range_width) * tier.unit_value
                };
                remaining -= tier.range_width;
                bracket += 1;
            }
            None => {
                total += remaining * overflow.unit_value;
                break;
            }
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tier(range_width: f64, unit_value: f64) -> Tier {
        Tier { range_width, unit_value }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    fn nonpositive_quantity_allocates_zero(#[case] quantity: f64) {
        let tiers = [tier(10.0, 5.0), tier(0.0, 2.0)];
        assert_eq!(allocate(&tiers, quantity), 0.0);
    }

    #[rstest]
    #[case(1.0)]
    #[case(100.0)]
    fn empty_table_allocates_zero(#[case] quantity: f64) {
        assert_eq!(allocate(&[], quantity), 0.0);
    }

    #[test]
    fn single_tier_table_is_purely_linear() {
        // Only an overflow bracket: allocate(q) == q * unit_value.
        let tiers = [tier(0.0, 3.0)];
        for quantity in [0.5, 1.0, 7.0, 250.0] {
            assert_eq!(allocate(&tiers, quantity), quantity * 3.0);
        }
    }

    #[test]
    fn first_bracket_is_flat_then_overflow_scales() {
        // 23 units: the first bracket contributes a flat 5 (not 10 * 5),
        // consumes 10 units, and the overflow picks up 13 * 2 = 26.
        let tiers = [tier(10.0, 5.0), tier(0.0, 2.0)];
        assert_eq!(allocate(&tiers, 23.0), 31.0);
    }

    #[test]
    fn middle_brackets_are_clamped_to_remaining_quantity() {
        let tiers = [tier(10.0, 5.0), tier(20.0, 1.0), tier(0.0, 2.0)];

        // 15 units: flat 5, then min(5, 20) * 1 = 5, nothing reaches overflow.
        assert_eq!(allocate(&tiers, 15.0), 10.0);

        // 40 units: flat 5, then min(30, 20) * 1 = 20, overflow 10 * 2 = 20.
        assert_eq!(allocate(&tiers, 40.0), 45.0);
    }

    #[test]
    fn quantity_inside_first_bracket_still_pays_the_flat_amount() {
        let tiers = [tier(10.0, 5.0), tier(0.0, 2.0)];
        assert_eq!(allocate(&tiers, 3.0), 5.0);
    }

    #[test]
    fn zero_width_bounded_tier_cannot_stall_the_walk() {
        // A zero-width middle bracket contributes nothing but the walk still
        // advances past it to the overflow tier.
        let tiers = [tier(10.0, 5.0), tier(0.0, 7.0), tier(0.0, 2.0)];
        assert_eq!(allocate(&tiers, 12.0), 5.0 + 0.0 + 2.0 * 2.0);
    }
}
