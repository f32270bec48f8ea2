//! Quantity resolution for UI-level transfer intents.

/// Resolve the quantity a transfer intent should move.
///
/// When the UI-level amount is unset (zero) or exceeds availability, the
/// entire available count moves. When the split modifier is active, half
/// the stack moves (`floor(available / 2)`, minimum 1).
pub const fn resolve_amount(requested: u32, available: u32, split: bool) -> u32 {
    if available == 0 {
        return 0;
    }
    if split && available > 1 {
        available / 2
    } else if requested == 0 || requested > available {
        available
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_amount_moves_everything() {
        assert_eq!(resolve_amount(0, 5, false), 5);
    }

    #[test]
    fn overshoot_moves_everything() {
        assert_eq!(resolve_amount(9, 5, false), 5);
    }

    #[test]
    fn explicit_amount_within_bounds() {
        assert_eq!(resolve_amount(2, 5, false), 2);
    }

    #[test]
    fn split_takes_half_rounded_down() {
        assert_eq!(resolve_amount(0, 5, true), 2);
        assert_eq!(resolve_amount(0, 4, true), 2);
    }

    #[test]
    fn split_of_single_unit_is_one() {
        assert_eq!(resolve_amount(0, 1, true), 1);
    }

    #[test]
    fn empty_source_resolves_to_zero() {
        assert_eq!(resolve_amount(3, 0, false), 0);
        assert_eq!(resolve_amount(0, 0, true), 0);
    }
}
