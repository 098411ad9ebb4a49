//! In-memory store implementations for testing

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use keystone_core::{EntityStore, ListFilter, Record};
use keystone_domain::{CrmError, Lead, LeadPatch, NewLead, Result as DomainResult};
use parking_lot::Mutex;

/// Lead store backed by a `Vec`, filtering with `ListFilter::matches`.
#[derive(Default)]
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
    next_id: AtomicU64,
}

impl MemoryLeadStore {
    pub fn len(&self) -> usize {
        self.leads.lock().len()
    }
}

fn field<'a>(lead: &'a Lead, name: &str) -> Option<&'a str> {
    match name {
        "firstName" => Some(lead.first_name.as_str()),
        "lastName" => Some(lead.last_name.as_str()),
        "email" => Some(lead.email.as_str()),
        "company" => lead.company.as_deref(),
        "status" => Some(lead.status.as_str()),
        "priority" => Some(lead.priority.as_str()),
        "assignedTo" => lead.assigned_to.as_deref(),
        _ => None,
    }
}

fn apply<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[async_trait]
impl EntityStore<Lead> for MemoryLeadStore {
    async fn list(&self, filter: &ListFilter) -> DomainResult<Vec<Lead>> {
        let mut leads: Vec<Lead> = self
            .leads
            .lock()
            .iter()
            .filter(|lead| filter.matches(|name| field(lead, name)))
            .cloned()
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn find(&self, id: &str) -> DomainResult<Option<Lead>> {
        Ok(self.leads.lock().iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, new: NewLead) -> DomainResult<Lead> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::seconds(i64::try_from(n).unwrap());
        let lead = Lead {
            id: format!("lead-{n}"),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            position: new.position,
            source: new.source,
            status: new.status,
            notes: new.notes,
            assigned_to: new.assigned_to,
            priority: new.priority,
            tags: new.tags,
            created_at,
            updated_at: created_at,
        };
        self.leads.lock().push(lead.clone());
        Ok(lead)
    }

    async fn update(&self, id: &str, patch: LeadPatch) -> DomainResult<Option<Lead>> {
        let mut leads = self.leads.lock();
        let Some(lead) = leads.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        apply(&mut lead.first_name, patch.first_name.flatten());
        apply(&mut lead.last_name, patch.last_name.flatten());
        apply(&mut lead.email, patch.email.flatten());
        apply(&mut lead.phone, patch.phone);
        apply(&mut lead.company, patch.company);
        apply(&mut lead.position, patch.position);
        apply(&mut lead.source, patch.source);
        apply(&mut lead.status, patch.status.flatten());
        apply(&mut lead.notes, patch.notes);
        apply(&mut lead.assigned_to, patch.assigned_to);
        apply(&mut lead.priority, patch.priority.flatten());
        apply(&mut lead.tags, patch.tags.flatten());
        Ok(Some(lead.clone()))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let mut leads = self.leads.lock();
        let before = leads.len();
        leads.retain(|l| l.id != id);
        Ok(leads.len() != before)
    }

    async fn count(&self) -> DomainResult<i64> {
        Ok(i64::try_from(self.len()).unwrap())
    }
}

/// A store whose every call fails with a database error.
pub struct FailingStore<R>(PhantomData<R>);

impl<R> Default for FailingStore<R> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

fn down() -> CrmError {
    CrmError::Database("database is locked".into())
}

#[async_trait]
impl<R: Record> EntityStore<R> for FailingStore<R> {
    async fn list(&self, _filter: &ListFilter) -> DomainResult<Vec<R::View>> {
        Err(down())
    }

    async fn find(&self, _id: &str) -> DomainResult<Option<R::View>> {
        Err(down())
    }

    async fn create(&self, _record: R::New) -> DomainResult<R::View> {
        Err(down())
    }

    async fn update(&self, _id: &str, _patch: R::Patch) -> DomainResult<Option<R::View>> {
        Err(down())
    }

    async fn delete(&self, _id: &str) -> DomainResult<bool> {
        Err(down())
    }

    async fn count(&self) -> DomainResult<i64> {
        Err(down())
    }
}
