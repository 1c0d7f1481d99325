//! Donation amount selection and validation.

use serde::Serialize;
use std::fmt;

/// Amounts (pence) offered as one-tap presets on the give form.
pub const ALLOWED_PRESET_AMOUNTS: [i64; 6] = [500, 1000, 2000, 5000, 10000, 20000];

/// Smallest free-form donation, in pence.
pub const MIN_CUSTOM_AMOUNT_PENCE: i64 = 100;

/// Largest free-form donation, in pence.
pub const MAX_CUSTOM_AMOUNT_PENCE: i64 = 100_000_000;

/// How the donor chose the amount.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountSelection {
    /// One of [`ALLOWED_PRESET_AMOUNTS`], given in pence.
    Preset(Option<i64>),
    /// Free-form amount in pounds, as typed.
    Custom(Option<String>),
    /// Missing or unrecognised mode.
    Unspecified,
}

/// A validated donation amount in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DonationAmount(i64);

impl DonationAmount {
    /// Resolves a selection to a valid amount, or `None` if it is not acceptable.
    pub fn resolve(selection: &AmountSelection) -> Option<DonationAmount> {
        match selection {
            AmountSelection::Preset(Some(pence)) if ALLOWED_PRESET_AMOUNTS.contains(pence) => {
                Some(DonationAmount(*pence))
            }
            AmountSelection::Custom(Some(pounds)) => Self::from_pounds_text(pounds),
            _ => None,
        }
    }

    /// Converts a typed pounds value to pence, rounding to the nearest penny.
    fn from_pounds_text(pounds: &str) -> Option<DonationAmount> {
        let value: f64 = pounds.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }

        let pence = (value * 100.0).round();
        if pence < MIN_CUSTOM_AMOUNT_PENCE as f64 || pence > MAX_CUSTOM_AMOUNT_PENCE as f64 {
            return None;
        }

        Some(DonationAmount(pence as i64))
    }

    /// Wraps an amount reported by the payment provider. Must be positive.
    pub fn from_provider(pence: i64) -> Option<DonationAmount> {
        (pence > 0).then_some(DonationAmount(pence))
    }

    pub fn pence(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DonationAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn custom(text: &str) -> AmountSelection {
        AmountSelection::Custom(Some(text.to_string()))
    }

    #[test]
    fn every_preset_is_accepted() {
        for pence in ALLOWED_PRESET_AMOUNTS {
            let amount = DonationAmount::resolve(&AmountSelection::Preset(Some(pence))).unwrap();
            assert_eq!(amount.pence(), pence);
        }
    }

    #[test]
    fn preset_outside_the_list_is_rejected() {
        assert!(DonationAmount::resolve(&AmountSelection::Preset(Some(750))).is_none());
        assert!(DonationAmount::resolve(&AmountSelection::Preset(None)).is_none());
    }

    #[test]
    fn custom_below_floor_is_rejected() {
        assert!(DonationAmount::resolve(&custom("0.50")).is_none());
        assert!(DonationAmount::resolve(&custom("0.994")).is_none());
    }

    #[test]
    fn custom_two_hundred_fifty_pounds_is_25000_pence() {
        assert_eq!(DonationAmount::resolve(&custom("250.00")).unwrap().pence(), 25000);
    }

    #[test]
    fn custom_rounds_to_nearest_penny() {
        assert_eq!(DonationAmount::resolve(&custom(" 12.345 ")).unwrap().pence(), 1235);
        assert_eq!(DonationAmount::resolve(&custom("1")).unwrap().pence(), 100);
    }

    #[test]
    fn custom_non_numeric_or_infinite_is_rejected() {
        for text in ["", "abc", "£10", "inf", "NaN", "-5"] {
            assert!(DonationAmount::resolve(&custom(text)).is_none(), "{text}");
        }
    }

    #[test]
    fn custom_at_ceiling_is_accepted_and_above_rejected() {
        assert_eq!(
            DonationAmount::resolve(&custom("1000000")).unwrap().pence(),
            MAX_CUSTOM_AMOUNT_PENCE
        );
        assert!(DonationAmount::resolve(&custom("1000000.01")).is_none());
    }

    #[test]
    fn unspecified_mode_is_rejected() {
        assert!(DonationAmount::resolve(&AmountSelection::Unspecified).is_none());
    }

    #[test]
    fn display_formats_pounds_and_pence() {
        assert_eq!(DonationAmount(25005).to_string(), "250.05");
    }

    proptest! {
        #[test]
        fn resolved_custom_amounts_stay_within_bounds(pounds in -10_000.0f64..2_000_000.0) {
            if let Some(amount) = DonationAmount::resolve(&custom(&pounds.to_string())) {
                prop_assert!(amount.pence() >= MIN_CUSTOM_AMOUNT_PENCE);
                prop_assert!(amount.pence() <= MAX_CUSTOM_AMOUNT_PENCE);
            }
        }

        #[test]
        fn whole_pence_amounts_in_range_round_trip(pence in MIN_CUSTOM_AMOUNT_PENCE..=MAX_CUSTOM_AMOUNT_PENCE) {
            let text = format!("{}.{:02}", pence / 100, pence % 100);
            let amount = DonationAmount::resolve(&custom(&text));
            prop_assert_eq!(amount.map(|a| a.pence()), Some(pence));
        }
    }
}
