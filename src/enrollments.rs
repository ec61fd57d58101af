// 📋 Enrollment Ledger - links clients to health programs
//
// Holds a read-only handle to the client registry for existence checks and
// never mutates client data. The (clientId, program) pair is unique across
// the ledger for the lifetime of the process.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::catalog::ProgramCatalog;
use crate::clients::ClientRegistry;
use crate::error::{RegistryError, Result};

/// Enrollment timestamp format (service clock, not caller-supplied)
const ENROLLMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// ENROLLMENT RECORD
// ============================================================================

/// A record linking one client to one program.
///
/// Immutable and undeletable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// References an existing Client id
    pub client_id: String,

    /// One of the fixed catalog entries
    pub program: String,

    /// Stamped by the ledger at creation time, YYYY-MM-DD HH:MM:SS
    pub enrollment_date: String,
}

// ============================================================================
// ENROLLMENT LEDGER
// ============================================================================

/// Ledger of all program enrollments.
///
/// Like the client registry, clones share the same underlying store. The
/// duplicate check and the append run under a single write guard, so the
/// uniqueness invariant holds under concurrent writers.
#[derive(Clone)]
pub struct EnrollmentLedger {
    registry: ClientRegistry,
    catalog: ProgramCatalog,
    enrollments: Arc<RwLock<Vec<Enrollment>>>,
}

impl EnrollmentLedger {
    pub fn new(registry: ClientRegistry) -> Self {
        EnrollmentLedger {
            registry,
            catalog: ProgramCatalog::new(),
            enrollments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Enroll an existing client in a program.
    ///
    /// Clients are never deleted, so the existence check cannot go stale
    /// between the lookup and the append.
    pub fn enroll(&self, client_id: &str, program: &str) -> Result<Enrollment> {
        if client_id.is_empty() || program.is_empty() {
            return Err(RegistryError::Validation(
                "Client ID and program name are required.".to_string(),
            ));
        }

        if !self.registry.contains(client_id) {
            return Err(RegistryError::NotFound(format!(
                "Client with ID {} not found.",
                client_id
            )));
        }

        if !self.catalog.contains(program) {
            return Err(RegistryError::Validation(format!(
                "Invalid program name: {}",
                program
            )));
        }

        let mut enrollments = self.enrollments.write().unwrap();

        let duplicate = enrollments
            .iter()
            .any(|e| e.client_id == client_id && e.program == program);
        if duplicate {
            return Err(RegistryError::Conflict(format!(
                "Client {} is already enrolled in {}.",
                client_id, program
            )));
        }

        let enrollment = Enrollment {
            client_id: client_id.to_string(),
            program: program.to_string(),
            enrollment_date: Local::now().format(ENROLLMENT_DATE_FORMAT).to_string(),
        };
        enrollments.push(enrollment.clone());
        tracing::debug!(client_id = %enrollment.client_id, program = %enrollment.program, "enrollment recorded");

        Ok(enrollment)
    }

    /// All enrollments for a client, in enrollment order.
    ///
    /// Permissive, unlike client lookup: an empty or unknown id yields an
    /// empty vec, not an error.
    pub fn find_by_client(&self, client_id: &str) -> Vec<Enrollment> {
        let enrollments = self.enrollments.read().unwrap();
        enrollments
            .iter()
            .filter(|e| e.client_id == client_id)
            .cloned()
            .collect()
    }

    /// Number of enrollments in the ledger
    pub fn count(&self) -> usize {
        let enrollments = self.enrollments.read().unwrap();
        enrollments.len()
    }

    /// The program catalog this ledger validates against
    pub fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }
}

// ============================================================================
// TESTS
// ============================================================================
