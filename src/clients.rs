// 👤 Client Registry - identifier assignment, validation, lookup, search
//
// Identity: registry-assigned CLIENT-NNNN ids, never reused or mutated.
// The id counter and the client table live under one lock so an id is
// allocated in the same critical section that inserts the record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::error::{RegistryError, Result};

/// Date-of-birth wire format, also used to normalize stored values
const DOB_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// CLIENT RECORD
// ============================================================================

/// A registered person record.
///
/// Created only through `ClientRegistry::register`; there are no update or
/// delete operations, so every field is immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Registry-assigned identifier (e.g. "CLIENT-0001")
    pub id: String,

    /// Full name
    pub name: String,

    /// Date of birth, normalized to YYYY-MM-DD
    pub dob: String,

    /// Free-form contact information
    pub contact: String,
}

// ============================================================================
// CLIENT REGISTRY
// ============================================================================

/// Registry of all registered clients.
///
/// Cheap to clone - clones share the same underlying store, which is how the
/// server hands the registry to concurrent connections. Mutations serialize
/// through the write side of one `RwLock`; reads take the shared side and
/// never observe a partially-applied write.
#[derive(Clone)]
pub struct ClientRegistry {
    inner: Arc<RwLock<ClientStore>>,
}

struct ClientStore {
    /// Client records in registration order
    clients: Vec<Client>,

    /// Next identifier sequence number (starts at 1, advances only on
    /// successful registration)
    next_id: u64,
}

impl ClientRegistry {
    pub fn new() -> Self {
        ClientRegistry {
            inner: Arc::new(RwLock::new(ClientStore {
                clients: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Register a new client and return the stored record.
    ///
    /// Validation runs before the id is allocated: a rejected call does not
    /// consume an identifier. The 4-digit zero padding is cosmetic - once
    /// the counter passes 9999 the id simply gets wider.
    pub fn register(&self, name: &str, dob: &str, contact: &str) -> Result<Client> {
        if name.is_empty() || dob.is_empty() || contact.is_empty() {
            return Err(RegistryError::Validation(
                "Name, date of birth, and contact information are required.".to_string(),
            ));
        }

        // Rejects out-of-range components too (month 14, February 30th)
        let parsed = NaiveDate::parse_from_str(dob, DOB_FORMAT).map_err(|_| {
            RegistryError::Validation(
                "Invalid date format. Please use YYYY-MM-DD.".to_string(),
            )
        })?;

        let mut store = self.inner.write().unwrap();

        let id = format!("CLIENT-{:04}", store.next_id);
        store.next_id += 1;

        let client = Client {
            id,
            name: name.to_string(),
            dob: parsed.format(DOB_FORMAT).to_string(),
            contact: contact.to_string(),
        };
        store.clients.push(client.clone());
        tracing::debug!(id = %client.id, "client registered");

        Ok(client)
    }

    /// Find a client by id
    pub fn find_by_id(&self, id: &str) -> Result<Client> {
        let store = self.inner.read().unwrap();
        store
            .clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| {
                RegistryError::NotFound(format!("Client with ID {} not found.", id))
            })
    }

    /// Whether an id resolves to a registered client.
    ///
    /// Read-only existence check used by the enrollment ledger.
    pub fn contains(&self, id: &str) -> bool {
        let store = self.inner.read().unwrap();
        store.clients.iter().any(|c| c.id == id)
    }

    /// Case-insensitive substring search against id or name.
    ///
    /// Results come back in registration order; no match is an empty vec,
    /// not an error.
    pub fn search(&self, term: &str) -> Result<Vec<Client>> {
        if term.is_empty() {
            return Err(RegistryError::Validation(
                "Search term is required.".to_string(),
            ));
        }

        let needle = term.to_lowercase();
        let store = self.inner.read().unwrap();
        Ok(store
            .clients
            .iter()
            .filter(|c| {
                c.id.to_lowercase().contains(&needle)
                    || c.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    /// Number of registered clients
    pub fn count(&self) -> usize {
        let store = self.inner.read().unwrap();
        store.clients.len()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
