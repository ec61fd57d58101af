// Registry Service - the operation surface the transport layer consumes
//
// Bundles the two stores behind the five operation contracts. Owns no state
// of its own; everything lives in the registry and the ledger.

use serde::Serialize;

use crate::clients::{Client, ClientRegistry};
use crate::enrollments::{Enrollment, EnrollmentLedger};
use crate::error::Result;

/// A client record joined with its program enrollments
#[derive(Debug, Clone, Serialize)]
pub struct ClientProfile {
    pub client: Client,
    pub enrollments: Vec<Enrollment>,
}

/// Facade over the client registry and the enrollment ledger.
///
/// Cheap to clone - clones share the same stores, which is how the server
/// shares one service across connections.
#[derive(Clone)]
pub struct RegistryService {
    clients: ClientRegistry,
    ledger: EnrollmentLedger,
}

impl RegistryService {
    pub fn new() -> Self {
        let clients = ClientRegistry::new();
        let ledger = EnrollmentLedger::new(clients.clone());
        RegistryService { clients, ledger }
    }

    /// Register a new client
    pub fn register_client(&self, name: &str, dob: &str, contact: &str) -> Result<Client> {
        self.clients.register(name, dob, contact)
    }

    /// Enroll an existing client in a program
    pub fn enroll_client(&self, client_id: &str, program: &str) -> Result<Enrollment> {
        self.ledger.enroll(client_id, program)
    }

    /// Case-insensitive search by id or name
    pub fn search_clients(&self, term: &str) -> Result<Vec<Client>> {
        self.clients.search(term)
    }

    /// A client joined with all of its enrollments.
    ///
    /// Fails with NotFound when the client does not exist; the attached
    /// enrollments lookup never fails.
    pub fn client_profile(&self, id: &str) -> Result<ClientProfile> {
        let client = self.clients.find_by_id(id)?;
        let enrollments = self.ledger.find_by_client(id);
        Ok(ClientProfile { client, enrollments })
    }

    /// All enrollments for a client (empty vec if none)
    pub fn enrollments_by_client(&self, id: &str) -> Vec<Enrollment> {
        self.ledger.find_by_client(id)
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    pub fn ledger(&self) -> &EnrollmentLedger {
        &self.ledger
    }
}

impl Default for RegistryService {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    #[test]
    fn test_end_to_end_scenario() {
        let service = RegistryService::new();

        let alice = service
            .register_client("Alice Smith", "1990-05-15", "555-1234")
            .unwrap();
        assert_eq!(alice.id, "CLIENT-0001");

        let bob = service
            .register_client("Bob Johnson", "1985-10-22", "555-5678")
            .unwrap();
        assert_eq!(bob.id, "CLIENT-0002");

        // First enrollment succeeds, repeat conflicts
        assert!(service.enroll_client("CLIENT-0001", "TB Program").is_ok());
        let repeat = service.enroll_client("CLIENT-0001", "TB Program");
        assert!(matches!(repeat, Err(RegistryError::Conflict(_))));

        let bad_program = service.enroll_client("CLIENT-0001", "Not A Program");
        assert!(matches!(bad_program, Err(RegistryError::Validation(_))));

        let results = service.search_clients("Smith").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Alice Smith");

        assert!(service.enrollments_by_client("CLIENT-0002").is_empty());
    }

    #[test]
    fn test_client_profile() {
        let service = RegistryService::new();

        service
            .register_client("Alice Smith", "1990-05-15", "555-1234")
            .unwrap();
        service.enroll_client("CLIENT-0001", "TB Program").unwrap();
        service
            .enroll_client("CLIENT-0001", "Malaria Program")
            .unwrap();

        let profile = service.client_profile("CLIENT-0001").unwrap();
        assert_eq!(profile.client.name, "Alice Smith");
        assert_eq!(profile.enrollments.len(), 2);
    }

    #[test]
    fn test_client_profile_unknown_client() {
        let service = RegistryService::new();

        let result = service.client_profile("CLIENT-0001");
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn test_client_profile_with_no_enrollments() {
        let service = RegistryService::new();

        service
            .register_client("Alice Smith", "1990-05-15", "555-1234")
            .unwrap();

        // Profile lookup itself succeeds; the enrollments part is just empty
        let profile = service.client_profile("CLIENT-0001").unwrap();
        assert!(profile.enrollments.is_empty());
    }

    #[test]
    fn test_enrollments_by_client_never_errors_on_empty_result() {
        let service = RegistryService::new();

        assert!(service.enrollments_by_client("CLIENT-0001").is_empty());
        assert!(service.enrollments_by_client("").is_empty());
    }

    #[test]
    fn test_profile_serializes_wire_field_names() {
        let service = RegistryService::new();

        service
            .register_client("Alice Smith", "1990-05-15", "555-1234")
            .unwrap();
        service.enroll_client("CLIENT-0001", "TB Program").unwrap();

        let profile = service.client_profile("CLIENT-0001").unwrap();
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["client"]["id"], "CLIENT-0001");
        assert_eq!(json["client"]["dob"], "1990-05-15");
        assert_eq!(json["enrollments"][0]["clientId"], "CLIENT-0001");
        assert_eq!(json["enrollments"][0]["program"], "TB Program");
        assert!(json["enrollments"][0]["enrollmentDate"].is_string());
    }
}
