//! # Lifecycle Flows
//!
//! Drives `CounterService` through whole record lifecycles and checks the
//! ledger bytes, the published events and the service statistics agree with
//! each returned record.
//!
//! ## Flows Tested:
//!
//! 1. **Initialize → Increment ×4 → Reset → Increment**: 4/4, 0/4, 1/5
//! 2. **Many owners**: records are independent and never collide
//! 3. **Namespaces and deployments**: same owner, separate records
//! 4. **Read path**: `exists`/`fetch` see every committed write

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use counter_accounts::{
        decode_record, AddressDeriver, CounterApi, CounterConfig, CounterError, CounterEvent,
        ErrorKind, Operation, CounterRequest, Pubkey, DEFAULT_NAMESPACE, RECORD_SPACE,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::support::{random_owner, Harness, PROGRAM_ID, START_TIME};

    // =============================================================================
    // SINGLE OWNER
    // =============================================================================

    #[test]
    fn test_full_lifecycle_scenario() {
        let h = Harness::new();
        let owner = Pubkey::new([1; 32]);
        let address = h.address_of(&owner);

        assert!(!h.service.exists(&address).unwrap());
        let created = h.service.initialize(&owner, &address).unwrap();
        assert_eq!((created.count, created.total_increments), (0, 0));
        assert_eq!(created.created_at, START_TIME);

        for expected in 1..=4 {
            let record = h.service.increment(&owner, &address).unwrap();
            assert_eq!(record.count, expected);
            assert_eq!(record.total_increments, expected);
        }

        let record = h.service.reset(&owner, &address).unwrap();
        assert_eq!((record.count, record.total_increments), (0, 4));

        let record = h.service.increment(&owner, &address).unwrap();
        assert_eq!((record.count, record.total_increments), (1, 5));

        // Ledger bytes match what the service returned
        let stored = decode_record(&h.raw(&address).unwrap()).unwrap();
        assert_eq!(stored, record);
        assert_eq!(stored.owner, owner);
        assert_eq!(stored.created_at, START_TIME);
    }

    #[test]
    fn test_created_at_is_fixed_at_creation() {
        let h = Harness::new();
        let owner = Pubkey::new([1; 32]);
        let address = h.initialized(&owner);

        h.clock.advance(3_600);
        let record = h.service.increment(&owner, &address).unwrap();
        assert_eq!(record.created_at, START_TIME);
    }

    #[test]
    fn test_events_follow_transitions() {
        let h = Harness::new();
        let owner = Pubkey::new([1; 32]);
        let address = h.initialized(&owner);

        h.service.increment(&owner, &address).unwrap();
        h.service.increment(&owner, &address).unwrap();
        h.service.reset(&owner, &address).unwrap();

        let events = h.events.events_for(&address);
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], CounterEvent::Initialized(_)));
        match &events[2] {
            CounterEvent::Incremented(p) => {
                assert_eq!(p.previous_count, 1);
                assert_eq!(p.count, 2);
            }
            other => panic!("expected Incremented, got {other:?}"),
        }
        match &events[3] {
            CounterEvent::Reset(p) => {
                assert_eq!(p.previous_count, 2);
                assert_eq!(p.total_increments, 2);
            }
            other => panic!("expected Reset, got {other:?}"),
        }
    }

    #[test]
    fn test_failures_publish_nothing() {
        let h = Harness::new();
        let owner = Pubkey::new([1; 32]);
        let address = h.address_of(&owner);

        assert!(h.service.increment(&owner, &address).is_err());
        h.service.initialize(&owner, &address).unwrap();
        assert!(h.service.initialize(&owner, &address).is_err());

        assert_eq!(h.events.len(), 1);
        let stats = h.service.stats();
        assert_eq!(stats.initialized, 1);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.rejections(ErrorKind::NotFound), 1);
        assert_eq!(stats.rejections(ErrorKind::AlreadyExists), 1);
    }

    #[test]
    fn test_execute_dispatches_requests() {
        let h = Harness::new();
        let owner = Pubkey::new([1; 32]);
        let target = h.address_of(&owner);

        for operation in [Operation::Initialize, Operation::Increment, Operation::Increment] {
            h.service
                .execute(&CounterRequest {
                    operation,
                    requester: owner,
                    target,
                })
                .unwrap();
        }

        assert_eq!(h.service.fetch(&target).unwrap().count, 2);
    }

    // =============================================================================
    // MANY OWNERS
    // =============================================================================

    #[test]
    fn test_owners_are_independent() {
        let h = Harness::new();
        let mut rng = StdRng::seed_from_u64(7);
        let owners: Vec<Pubkey> = (0..32).map(|_| random_owner(&mut rng)).collect();

        let addresses: HashSet<_> = owners.iter().map(|o| h.initialized(o)).collect();
        assert_eq!(addresses.len(), owners.len());
        assert_eq!(h.ledger.len(), owners.len());

        // Owner i increments i times
        for (i, owner) in owners.iter().enumerate() {
            let address = h.address_of(owner);
            for _ in 0..i {
                h.service.increment(owner, &address).unwrap();
            }
        }

        for (i, owner) in owners.iter().enumerate() {
            let record = h.service.fetch(&h.address_of(owner)).unwrap();
            assert_eq!(record.owner, *owner);
            assert_eq!(record.count, i as u64);
        }
    }

    #[test]
    fn test_every_record_uses_fixed_space() {
        let h = Harness::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..8 {
            let owner = random_owner(&mut rng);
            let address = h.initialized(&owner);
            assert_eq!(h.raw(&address).unwrap().len(), RECORD_SPACE);
        }
    }

    // =============================================================================
    // NAMESPACES AND DEPLOYMENTS
    // =============================================================================

    #[test]
    fn test_namespaces_share_ledger_without_collision() {
        let counters = Harness::new();
        let tallies = Harness::on_ledger(
            CounterConfig::default()
                .with_program_id(PROGRAM_ID)
                .with_namespace(&b"tally"[..]),
            counters.ledger.clone(),
        );
        let owner = Pubkey::new([1; 32]);

        let a = counters.initialized(&owner);
        let b = tallies.initialized(&owner);
        assert_ne!(a, b);

        counters.service.increment(&owner, &a).unwrap();
        assert_eq!(tallies.service.fetch(&b).unwrap().count, 0);
        assert_eq!(counters.ledger.len(), 2);
    }

    #[test]
    fn test_program_id_changes_addresses() {
        let owner = Pubkey::new([1; 32]);
        let first = AddressDeriver::new(PROGRAM_ID)
            .derive(DEFAULT_NAMESPACE, &owner)
            .unwrap();
        let second = AddressDeriver::new([0x5B; 32])
            .derive(DEFAULT_NAMESPACE, &owner)
            .unwrap();

        assert_ne!(first.0, second.0);
        assert_eq!(Harness::new().address_of(&owner), first.0);
    }

    #[test]
    fn test_address_is_stable_across_services() {
        let owner = Pubkey::new([9; 32]);
        assert_eq!(Harness::new().address_of(&owner), Harness::new().address_of(&owner));
    }

    // =============================================================================
    // READ PATH
    // =============================================================================

    #[test]
    fn test_fetch_missing_is_not_found() {
        let h = Harness::new();
        let address = h.address_of(&Pubkey::new([1; 32]));

        assert_eq!(
            h.service.fetch(&address),
            Err(CounterError::NotFound { address })
        );
        assert!(h.ledger.is_empty());
    }

    #[test]
    fn test_fetch_needs_no_authorization() {
        let h = Harness::new();
        let owner = Pubkey::new([1; 32]);
        let address = h.initialized(&owner);
        h.service.increment(&owner, &address).unwrap();

        // Anyone can read; reads do not go through the guard
        let record = h.service.fetch(&address).unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(h.service.stats().rejected, 0);
    }
}
