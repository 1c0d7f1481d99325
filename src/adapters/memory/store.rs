//! In-memory implementation of every storage port.
//!
//! One `InMemoryStore` plays the role of the whole database so joins
//! (registrations with events, check-ins with profile names) behave like the
//! SQL adapters. Unique constraints are enforced the same way too.
//!
//! Intended for tests and local runs without PostgreSQL.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::content::Sermon;
use crate::domain::events::{
    CheckInRecord, CheckInToken, Event, Registration, RegistrationStatus,
};
use crate::domain::foundation::{
    DomainError, EventId, FundId, RegistrationId, SermonId, Timestamp, UserId,
};
use crate::domain::giving::{Donation, DonationStatus, Fund, GiftAidDeclaration};
use crate::domain::people::{
    AddressSnapshot, Lead, PeopleFilter, PersonNote, PersonStatus, Profile, LEAD_STATUS_NEW,
};
use crate::ports::{
    AdminSummary, DashboardReader, DonationRepository, DonationUpsert, EventReader, FundReader,
    GiftAidDeclarationRepository, LeadRepository, PersonNoteRepository, ProfileRepository, ReconcileWrite, RegistrationInsert,
    RegistrationRepository, SermonReader, SettingsRepository, UpcomingRegistration,
};

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    notes: Vec<PersonNote>,
    funds: Vec<Fund>,
    donations: Vec<Donation>,
    declarations: Vec<GiftAidDeclaration>,
    settings: HashMap<String, serde_json::Value>,
    events: Vec<Event>,
    registrations: Vec<Registration>,
    sermons: Vec<Sermon>,
    leads: Vec<Lead>,
    /// Operation names that fail with a database error.
    failing: HashSet<&'static str>,
}

impl Tables {
    fn check(&self, operation: &'static str) -> Result<(), DomainError> {
        if self.failing.contains(operation) {
            return Err(DomainError::database(operation, "injected failure"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Seeding ===

    pub fn add_profile(&self, profile: Profile) {
        self.lock().profiles.push(profile);
    }

    pub fn add_fund(&self, fund: Fund) {
        self.lock().funds.push(fund);
    }

    pub fn add_event(&self, event: Event) {
        self.lock().events.push(event);
    }

    pub fn add_registration(&self, registration: Registration) {
        self.lock().registrations.push(registration);
    }

    pub fn add_sermon(&self, sermon: Sermon) {
        self.lock().sermons.push(sermon);
    }

    pub fn add_donation(&self, donation: Donation) {
        self.lock().donations.push(donation);
    }

    pub fn set_setting(&self, key: &str, value: serde_json::Value) {
        self.lock().settings.insert(key.to_string(), value);
    }

    /// Makes every later call of `operation` fail.
    pub fn fail_on(&self, operation: &'static str) {
        self.lock().failing.insert(operation);
    }

    // === Inspection ===

    pub fn profile(&self, user_id: &UserId) -> Option<Profile> {
        self.lock().profiles.iter().find(|p| &p.user_id == user_id).cloned()
    }

    pub fn donations(&self) -> Vec<Donation> {
        self.lock().donations.clone()
    }

    pub fn declarations(&self) -> Vec<GiftAidDeclaration> {
        self.lock().declarations.clone()
    }

    pub fn registrations(&self) -> Vec<Registration> {
        self.lock().registrations.clone()
    }

    pub fn notes(&self) -> Vec<PersonNote> {
        self.lock().notes.clone()
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.lock().leads.clone()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let tables = self.lock();
        tables.check("find profile")?;
        Ok(tables.profiles.iter().find(|p| &p.user_id == user_id).cloned())
    }

    async fn insert_if_absent(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut tables = self.lock();
        tables.check("insert profile")?;
        if !tables.profiles.iter().any(|p| p.user_id == profile.user_id) {
            tables.profiles.push(profile.clone());
        }
        Ok(())
    }

    async fn update_address(
        &self,
        user_id: &UserId,
        address: &AddressSnapshot,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock();
        tables.check("update profile address")?;
        if let Some(profile) = tables.profiles.iter_mut().find(|p| &p.user_id == user_id) {
            profile.apply_address(address);
        }
        Ok(())
    }

    async fn update_status_tags(
        &self,
        user_id: &UserId,
        status: PersonStatus,
        tags: &[String],
    ) -> Result<bool, DomainError> {
        let mut tables = self.lock();
        tables.check("update person")?;
        match tables.profiles.iter_mut().find(|p| &p.user_id == user_id) {
            Some(profile) => {
                profile.status = status;
                profile.tags = tags.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search(&self, filter: &PeopleFilter) -> Result<Vec<Profile>, DomainError> {
        let tables = self.lock();
        tables.check("search people")?;

        let needle = filter.query.as_ref().map(|q| q.to_lowercase());
        let mut matches: Vec<Profile> = tables
            .profiles
            .iter()
            .filter(|p| match &needle {
                Some(needle) => [&p.full_name, &p.email].iter().any(|field| {
                    field
                        .as_deref()
                        .map(|v| v.to_lowercase().contains(needle.as_str()))
                        .unwrap_or(false)
                }),
                None => true,
            })
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .filter(|p| filter.tag.as_ref().map_or(true, |t| p.tags.contains(t)))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn all_tags(&self) -> Result<Vec<Vec<String>>, DomainError> {
        let tables = self.lock();
        tables.check("list tags")?;
        Ok(tables.profiles.iter().map(|p| p.tags.clone()).collect())
    }
}

#[async_trait]
impl PersonNoteRepository for InMemoryStore {
    async fn list_for(&self, user_id: &UserId) -> Result<Vec<PersonNote>, DomainError> {
        let tables = self.lock();
        tables.check("list notes")?;
        let mut notes: Vec<PersonNote> = tables
            .notes
            .iter()
            .filter(|n| &n.profile_user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn insert(&self, note: &PersonNote) -> Result<(), DomainError> {
        let mut tables = self.lock();
        tables.check("insert note")?;
        tables.notes.push(note.clone());
        Ok(())
    }
}

#[async_trait]
impl FundReader for InMemoryStore {
    async fn find_active(&self, id: &FundId) -> Result<Option<Fund>, DomainError> {
        let tables = self.lock();
        tables.check("find fund")?;
        Ok(tables.funds.iter().find(|f| &f.id == id && f.is_active).cloned())
    }

    async fn find(&self, id: &FundId) -> Result<Option<Fund>, DomainError> {
        let tables = self.lock();
        tables.check("find fund")?;
        Ok(tables.funds.iter().find(|f| &f.id == id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Fund>, DomainError> {
        let tables = self.lock();
        tables.check("list funds")?;
        let mut funds: Vec<Fund> = tables.funds.iter().filter(|f| f.is_active).cloned().collect();
        funds.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(funds)
    }
}

#[async_trait]
impl DonationRepository for InMemoryStore {
    async fn insert_pending(&self, donation: &Donation) -> Result<(), DomainError> {
        let mut tables = self.lock();
        tables.check("insert donation")?;
        if tables
            .donations
            .iter()
            .any(|d| d.stripe_session_id == donation.stripe_session_id)
        {
            return Err(DomainError::database("insert donation", "duplicate stripe_session_id"));
        }
        tables.donations.push(donation.clone());
        Ok(())
    }

    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<Donation>, DomainError> {
        let tables = self.lock();
        tables.check("find donation")?;
        Ok(tables
            .donations
            .iter()
            .find(|d| d.stripe_session_id == session_id)
            .cloned())
    }

    async fn reconcile(&self, upsert: &DonationUpsert) -> Result<ReconcileWrite, DomainError> {
        let mut tables = self.lock();
        tables.check("reconcile donation")?;

        let accepted = DonationStatus::accepted_predecessors(upsert.status);
        match tables
            .donations
            .iter_mut()
            .find(|d| d.stripe_session_id == upsert.stripe_session_id)
        {
            Some(existing) if !accepted.contains(&existing.status) => Ok(ReconcileWrite::Rejected {
                current: existing.status,
            }),
            Some(existing) => {
                let previous = existing.status;
                existing.user_id = upsert.user_id.clone();
                existing.fund_id = upsert.fund_id;
                existing.amount = upsert.amount;
                existing.currency = upsert.currency.clone();
                existing.payment_intent_id = upsert.payment_intent_id.clone();
                existing.status = upsert.status;
                Ok(ReconcileWrite::Applied {
                    previous: Some(previous),
                })
            }
            None => {
                tables.donations.push(Donation {
                    id: Default::default(),
                    user_id: upsert.user_id.clone(),
                    fund_id: upsert.fund_id,
                    amount: upsert.amount,
                    currency: upsert.currency.clone(),
                    stripe_session_id: upsert.stripe_session_id.clone(),
                    payment_intent_id: upsert.payment_intent_id.clone(),
                    status: upsert.status,
                    created_at: Timestamp::now(),
                });
                Ok(ReconcileWrite::Applied { previous: None })
            }
        }
    }
}

#[async_trait]
impl GiftAidDeclarationRepository for InMemoryStore {
    async fn append(&self, declaration: &GiftAidDeclaration) -> Result<(), DomainError> {
        let mut tables = self.lock();
        tables.check("insert declaration")?;
        tables.declarations.push(declaration.clone());
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let tables = self.lock();
        tables.check("read setting")?;
        Ok(tables.settings.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError> {
        let mut tables = self.lock();
        tables.check("write setting")?;
        tables.settings.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[async_trait]
impl EventReader for InMemoryStore {
    async fn find_published(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let tables = self.lock();
        tables.check("find event")?;
        Ok(tables.events.iter().find(|e| &e.id == id && e.is_published).cloned())
    }

    async fn find(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let tables = self.lock();
        tables.check("find event")?;
        Ok(tables.events.iter().find(|e| &e.id == id).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Event>, DomainError> {
        let tables = self.lock();
        tables.check("list events")?;
        let mut events: Vec<Event> = tables.events.iter().filter(|e| e.is_published).cloned().collect();
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
        Ok(events)
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn count_for_event(&self, event_id: &EventId) -> Result<i64, DomainError> {
        let tables = self.lock();
        tables.check("count registrations")?;
        Ok(tables.registrations.iter().filter(|r| &r.event_id == event_id).count() as i64)
    }

    async fn find_for(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Registration>, DomainError> {
        let tables = self.lock();
        tables.check("find registration")?;
        Ok(tables
            .registrations
            .iter()
            .find(|r| &r.event_id == event_id && &r.user_id == user_id)
            .cloned())
    }

    async fn find(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        let tables = self.lock();
        tables.check("find registration")?;
        Ok(tables.registrations.iter().find(|r| &r.id == id).cloned())
    }

    async fn insert(&self, registration: &Registration) -> Result<RegistrationInsert, DomainError> {
        let mut tables = self.lock();
        tables.check("insert registration")?;
        if tables
            .registrations
            .iter()
            .any(|r| r.event_id == registration.event_id && r.user_id == registration.user_id)
        {
            return Ok(RegistrationInsert::Duplicate);
        }
        tables.registrations.push(registration.clone());
        Ok(RegistrationInsert::Inserted)
    }

    async fn check_in_by_token(
        &self,
        event_id: &EventId,
        token: &CheckInToken,
        at: Timestamp,
    ) -> Result<Option<Registration>, DomainError> {
        let mut tables = self.lock();
        tables.check("check in")?;
        Ok(tables
            .registrations
            .iter_mut()
            .find(|r| &r.event_id == event_id && r.check_in_token.as_ref() == Some(token))
            .map(|r| {
                r.status = RegistrationStatus::CheckedIn;
                r.checked_in_at = Some(at);
                r.clone()
            }))
    }

    async fn recent_check_ins(
        &self,
        event_id: &EventId,
        limit: i64,
    ) -> Result<Vec<CheckInRecord>, DomainError> {
        let tables = self.lock();
        tables.check("list check-ins")?;
        let mut records: Vec<CheckInRecord> = tables
            .registrations
            .iter()
            .filter(|r| &r.event_id == event_id)
            .filter_map(|r| {
                let checked_in_at = r.checked_in_at?;
                let full_name = tables
                    .profiles
                    .iter()
                    .find(|p| p.user_id == r.user_id)
                    .and_then(|p| p.full_name.clone());
                Some(CheckInRecord {
                    registration_id: r.id,
                    user_id: r.user_id.clone(),
                    full_name,
                    checked_in_at,
                })
            })
            .collect();
        records.sort_by(|a, b| b.checked_in_at.cmp(&a.checked_in_at));
        records.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(records)
    }

    async fn assign_token(
        &self,
        id: &RegistrationId,
        token: &CheckInToken,
    ) -> Result<Option<Registration>, DomainError> {
        let mut tables = self.lock();
        tables.check("assign token")?;
        Ok(tables.registrations.iter_mut().find(|r| &r.id == id).map(|r| {
            r.check_in_token = Some(token.clone());
            r.clone()
        }))
    }

    async fn list_upcoming_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<UpcomingRegistration>, DomainError> {
        let tables = self.lock();
        tables.check("list registrations")?;
        let mut upcoming: Vec<UpcomingRegistration> = tables
            .registrations
            .iter()
            .filter(|r| &r.user_id == user_id)
            .filter_map(|r| {
                let event = tables.events.iter().find(|e| e.id == r.event_id)?;
                event.is_upcoming(&now).then(|| UpcomingRegistration {
                    registration: r.clone(),
                    event: event.clone(),
                })
            })
            .collect();
        upcoming.sort_by(|a, b| a.event.starts_at.cmp(&b.event.starts_at));
        Ok(upcoming)
    }
}

#[async_trait]
impl SermonReader for InMemoryStore {
    async fn list_published(&self) -> Result<Vec<Sermon>, DomainError> {
        let tables = self.lock();
        tables.check("list sermons")?;
        let mut sermons: Vec<Sermon> = tables.sermons.iter().filter(|s| s.is_published).cloned().collect();
        sermons.sort_by(|a, b| b.preached_at.cmp(&a.preached_at));
        Ok(sermons)
    }

    async fn find_published(&self, id: &SermonId) -> Result<Option<Sermon>, DomainError> {
        let tables = self.lock();
        tables.check("find sermon")?;
        Ok(tables.sermons.iter().find(|s| &s.id == id && s.is_published).cloned())
    }
}

#[async_trait]
impl LeadRepository for InMemoryStore {
    async fn insert(&self, lead: &Lead) -> Result<(), DomainError> {
        let mut tables = self.lock();
        tables.check("insert lead")?;
        tables.leads.push(lead.clone());
        Ok(())
    }
}

#[async_trait]
impl DashboardReader for InMemoryStore {
    async fn admin_summary(&self) -> Result<AdminSummary, DomainError> {
        let tables = self.lock();
        tables.check("admin summary")?;
        Ok(AdminSummary {
            sermons: tables.sermons.len() as i64,
            events: tables.events.len() as i64,
            new_leads: tables
                .leads
                .iter()
                .filter(|lead| lead.status == LEAD_STATUS_NEW)
                .count() as i64,
        })
    }
}
