//! Giving: donation amounts, payment records, funds and Gift Aid.

mod amount;
mod donation;
mod errors;
mod fund;
mod gift_aid;

pub use amount::{
    AmountSelection, DonationAmount, ALLOWED_PRESET_AMOUNTS, MAX_CUSTOM_AMOUNT_PENCE,
    MIN_CUSTOM_AMOUNT_PENCE,
};
pub use donation::{Donation, DonationStatus};
pub use errors::GivingError;
pub use fund::{Fund, DEFAULT_FUND_NAME};
pub use gift_aid::{
    GiftAidDeclaration, GiftAidSetting, DECLARATION_WORDING_VERSION, GIFT_AID_SETTING_KEY,
};
