//! StartCheckoutHandler - validates a donation and opens a hosted checkout session.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, FundId};
use crate::domain::giving::{
    AmountSelection, Donation, DonationAmount, GiftAidDeclaration, GiftAidSetting, GivingError,
    GIFT_AID_SETTING_KEY,
};
use crate::domain::people::{AddressInput, AddressSnapshot};
use crate::ports::{
    CreateCheckoutRequest, DonationRepository, FundReader, GiftAidDeclarationRepository,
    PaymentProvider, ProfileRepository, SettingsRepository,
};

use crate::application::handlers::identity::EnsureProfileHandler;

/// Command to start a one-off donation.
#[derive(Debug, Clone)]
pub struct StartCheckoutCommand {
    pub user: AuthenticatedUser,
    /// Raw fund id from the form.
    pub fund_id: Option<String>,
    pub amount: AmountSelection,
    pub gift_aid: bool,
    pub declaration_accepted: bool,
    pub address: AddressInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCheckoutResult {
    /// Hosted checkout page to redirect the donor to.
    pub url: String,
    pub session_id: String,
    pub amount: DonationAmount,
}

/// Site-level values used to build the checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Public base URL, without trailing slash.
    pub site_url: String,
    pub currency: String,
}

impl CheckoutSettings {
    pub fn new(site_url: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
            currency: currency.into(),
        }
    }

    fn success_url(&self) -> String {
        format!("{}/give?status=success", self.site_url)
    }

    fn cancel_url(&self) -> String {
        format!("{}/give?status=cancelled", self.site_url)
    }
}

pub struct StartCheckoutHandler {
    profiles: Arc<dyn ProfileRepository>,
    funds: Arc<dyn FundReader>,
    settings: Arc<dyn SettingsRepository>,
    declarations: Arc<dyn GiftAidDeclarationRepository>,
    donations: Arc<dyn DonationRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    checkout: CheckoutSettings,
}

impl StartCheckoutHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        funds: Arc<dyn FundReader>,
        settings: Arc<dyn SettingsRepository>,
        declarations: Arc<dyn GiftAidDeclarationRepository>,
        donations: Arc<dyn DonationRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
        checkout: CheckoutSettings,
    ) -> Self {
        Self {
            profiles,
            funds,
            settings,
            declarations,
            donations,
            payment_provider,
            checkout,
        }
    }

    pub async fn handle(&self, cmd: StartCheckoutCommand) -> Result<StartCheckoutResult, GivingError> {
        let profile = EnsureProfileHandler::new(self.profiles.clone())
            .handle(&cmd.user)
            .await?;

        // 1. Amount
        let amount = DonationAmount::resolve(&cmd.amount).ok_or(GivingError::InvalidAmount)?;

        // 2. Fund
        let fund_id: FundId = cmd
            .fund_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| raw.parse().ok())
            .ok_or(GivingError::FundRequired)?;

        let fund = self
            .funds
            .find_active(&fund_id)
            .await?
            .ok_or(GivingError::FundNotFound)?;

        // 3. Gift Aid
        if cmd.gift_aid {
            let stored = self.settings.get(GIFT_AID_SETTING_KEY).await?;
            if !GiftAidSetting::from_stored(stored.as_ref()).enabled {
                return Err(GivingError::GiftAidDisabled);
            }
            if !cmd.declaration_accepted {
                return Err(GivingError::DeclarationRequired);
            }

            let snapshot = AddressSnapshot::resolve(&cmd.address, &profile)
                .ok_or(GivingError::AddressIncomplete)?;

            self.profiles.update_address(&cmd.user.id, &snapshot).await?;
            self.declarations
                .append(&GiftAidDeclaration::accept(cmd.user.id.clone(), snapshot))
                .await?;

            tracing::info!(user_id = %cmd.user.id, "Gift Aid declaration recorded");
        }

        // 4. Hosted session
        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), cmd.user.id.to_string());
        metadata.insert("fund_id".to_string(), fund.id.to_string());
        metadata.insert("gift_aid".to_string(), cmd.gift_aid.to_string());
        metadata.insert("amount_pence".to_string(), amount.pence().to_string());

        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                user_id: cmd.user.id.clone(),
                email: cmd.user.email.clone(),
                amount_pence: amount.pence(),
                currency: self.checkout.currency.clone(),
                product_name: fund.checkout_product_name(),
                description: "One-off donation".to_string(),
                success_url: self.checkout.success_url(),
                cancel_url: self.checkout.cancel_url(),
                metadata,
            })
            .await
            .map_err(|e| {
                tracing::error!(user_id = %cmd.user.id, error = %e, "Checkout session creation failed");
                GivingError::checkout_failed(e.message)
            })?;

        // 5. Pending record. The webhook upserts by session id, so a failed
        // insert here is recovered when the first event arrives.
        let donation = Donation::pending(
            cmd.user.id.clone(),
            fund.id,
            amount,
            self.checkout.currency.clone(),
            session.id.clone(),
            session.payment_intent_id.clone(),
        );
        if let Err(e) = self.donations.insert_pending(&donation).await {
            tracing::error!(session_id = %session.id, error = %e, "Failed to persist pending donation");
        }

        let url = session.url.ok_or_else(|| {
            tracing::error!(session_id = %session.id, "Checkout session has no URL");
            GivingError::CheckoutUrlMissing
        })?;

        tracing::info!(
            user_id = %cmd.user.id,
            session_id = %session.id,
            amount_pence = amount.pence(),
            gift_aid = cmd.gift_aid,
            "Checkout session created"
        );

        Ok(StartCheckoutResult {
            url,
            session_id: session.id,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::foundation::UserId;
    use crate::domain::giving::{DonationStatus, Fund};
    use crate::ports::{CheckoutSession, PaymentError};
    use serde_json::json;

    struct Fixture {
        store: Arc<InMemoryStore>,
        provider: MockPaymentProvider,
        handler: StartCheckoutHandler,
        fund: Fund,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let provider = MockPaymentProvider::new();
        let fund = Fund {
            id: FundId::new(),
            name: "Building Fund".to_string(),
            description: None,
            is_active: true,
        };
        store.add_fund(fund.clone());
        store.set_setting(GIFT_AID_SETTING_KEY, json!({"enabled": true}));

        let handler = StartCheckoutHandler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(provider.clone()),
            CheckoutSettings::new("https://church.example/", "gbp"),
        );
        Fixture {
            store,
            provider,
            handler,
            fund,
        }
    }

    fn command(fund: &Fund, amount: AmountSelection) -> StartCheckoutCommand {
        StartCheckoutCommand {
            user: AuthenticatedUser::new(
                UserId::new("donor-1").unwrap(),
                Some("donor@example.org".to_string()),
                None,
            ),
            fund_id: Some(fund.id.to_string()),
            amount,
            gift_aid: false,
            declaration_accepted: false,
            address: AddressInput::default(),
        }
    }

    fn custom(pounds: &str) -> AmountSelection {
        AmountSelection::Custom(Some(pounds.to_string()))
    }

    fn full_address() -> AddressInput {
        AddressInput {
            full_name: Some("Ada Lovelace".to_string()),
            address_line1: Some("1 Chapel Row".to_string()),
            city: Some("Bath".to_string()),
            postcode: Some("BA1 1AA".to_string()),
        }
    }

    #[tokio::test]
    async fn custom_amount_creates_session_and_pending_donation() {
        let f = fixture();

        let result = f.handler.handle(command(&f.fund, custom("250.00"))).await.unwrap();

        assert_eq!(result.amount.pence(), 25000);
        assert_eq!(result.url, "https://checkout.stripe.com/c/pay/cs_test_0001");

        let donations = f.store.donations();
        assert_eq!(donations.len(), 1);
        assert_eq!(donations[0].status, DonationStatus::Pending);
        assert_eq!(donations[0].stripe_session_id, "cs_test_0001");
        assert_eq!(donations[0].amount.pence(), 25000);

        let request = &f.provider.checkout_requests()[0];
        assert_eq!(request.product_name, "Donation: Building Fund");
        assert_eq!(request.success_url, "https://church.example/give?status=success");
        assert_eq!(request.cancel_url, "https://church.example/give?status=cancelled");
        assert_eq!(request.metadata.get("gift_aid").map(String::as_str), Some("false"));
        assert_eq!(request.metadata.get("amount_pence").map(String::as_str), Some("25000"));
    }

    #[tokio::test]
    async fn custom_amount_below_floor_is_rejected() {
        let f = fixture();

        let err = f.handler.handle(command(&f.fund, custom("0.50"))).await.unwrap_err();

        assert_eq!(err, GivingError::InvalidAmount);
        assert!(f.provider.checkout_requests().is_empty());
        assert!(f.store.donations().is_empty());
    }

    #[tokio::test]
    async fn preset_outside_allowed_set_is_rejected() {
        let f = fixture();

        let err = f
            .handler
            .handle(command(&f.fund, AmountSelection::Preset(Some(1234))))
            .await
            .unwrap_err();

        assert_eq!(err, GivingError::InvalidAmount);
    }

    #[tokio::test]
    async fn amount_is_checked_before_fund() {
        let f = fixture();
        let mut cmd = command(&f.fund, AmountSelection::Unspecified);
        cmd.fund_id = None;

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, GivingError::InvalidAmount);
    }

    #[tokio::test]
    async fn blank_or_malformed_fund_is_required() {
        let f = fixture();
        for raw in ["  ", "not-a-uuid"] {
            let mut cmd = command(&f.fund, AmountSelection::Preset(Some(1000)));
            cmd.fund_id = Some(raw.to_string());
            assert_eq!(f.handler.handle(cmd).await.unwrap_err(), GivingError::FundRequired);
        }
    }

    #[tokio::test]
    async fn inactive_fund_is_not_found() {
        let f = fixture();
        let inactive = Fund {
            id: FundId::new(),
            name: "Closed Appeal".to_string(),
            description: None,
            is_active: false,
        };
        f.store.add_fund(inactive.clone());

        let err = f
            .handler
            .handle(command(&inactive, AmountSelection::Preset(Some(1000))))
            .await
            .unwrap_err();

        assert_eq!(err, GivingError::FundNotFound);
    }

    #[tokio::test]
    async fn gift_aid_without_declaration_is_rejected_even_with_address() {
        let f = fixture();
        let mut cmd = command(&f.fund, AmountSelection::Preset(Some(1000)));
        cmd.gift_aid = true;
        cmd.declaration_accepted = false;
        cmd.address = full_address();

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, GivingError::DeclarationRequired);
        assert!(f.store.declarations().is_empty());
    }

    #[tokio::test]
    async fn gift_aid_disabled_is_rejected() {
        let f = fixture();
        f.store.set_setting(GIFT_AID_SETTING_KEY, json!({"enabled": false}));
        let mut cmd = command(&f.fund, AmountSelection::Preset(Some(1000)));
        cmd.gift_aid = true;
        cmd.declaration_accepted = true;

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, GivingError::GiftAidDisabled);
    }

    #[tokio::test]
    async fn gift_aid_with_incomplete_address_is_rejected() {
        let f = fixture();
        let mut cmd = command(&f.fund, AmountSelection::Preset(Some(1000)));
        cmd.gift_aid = true;
        cmd.declaration_accepted = true;
        cmd.address = AddressInput {
            postcode: None,
            ..full_address()
        };

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, GivingError::AddressIncomplete);
    }

    #[tokio::test]
    async fn gift_aid_records_declaration_and_updates_profile() {
        let f = fixture();
        let mut cmd = command(&f.fund, AmountSelection::Preset(Some(5000)));
        cmd.gift_aid = true;
        cmd.declaration_accepted = true;
        cmd.address = full_address();

        f.handler.handle(cmd).await.unwrap();

        let declarations = f.store.declarations();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].wording_version, "v1");
        assert_eq!(declarations[0].address_snapshot.postcode, "BA1 1AA");

        let profile = f.store.profile(&UserId::new("donor-1").unwrap()).unwrap();
        assert_eq!(profile.city.as_deref(), Some("Bath"));
        assert_eq!(
            f.provider.checkout_requests()[0].metadata.get("gift_aid").map(String::as_str),
            Some("true")
        );
    }

    #[tokio::test]
    async fn provider_failure_is_checkout_failed() {
        let f = fixture();
        f.provider.set_checkout_error(PaymentError::network("connection reset"));

        let err = f
            .handler
            .handle(command(&f.fund, AmountSelection::Preset(Some(1000))))
            .await
            .unwrap_err();

        assert!(matches!(err, GivingError::CheckoutFailed(_)));
        assert_eq!(err.message(), "Unable to start checkout right now.");
        assert!(f.store.donations().is_empty());
    }

    #[tokio::test]
    async fn missing_url_fails_after_pending_record_is_written() {
        let f = fixture();
        f.provider.set_checkout_session(CheckoutSession {
            id: "cs_test_nourl".to_string(),
            url: None,
            payment_intent_id: None,
        });

        let err = f
            .handler
            .handle(command(&f.fund, AmountSelection::Preset(Some(1000))))
            .await
            .unwrap_err();

        assert_eq!(err, GivingError::CheckoutUrlMissing);
        assert_eq!(f.store.donations()[0].stripe_session_id, "cs_test_nourl");
    }
}
