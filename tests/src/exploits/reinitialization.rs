//! # Re-initialization Attacks
//!
//! Attempts to wipe a record by creating it again, sequentially or by racing
//! many Initialize calls for the same owner, and racing mutations that must
//! each land exactly once.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use counter_accounts::{CounterApi, CounterError, Pubkey};

    use crate::support::{Harness, START_TIME};

    fn owner() -> Pubkey {
        Pubkey::new([0x42; 32])
    }

    #[test]
    fn test_second_initialize_keeps_progress() {
        let h = Harness::new();
        let address = h.initialized(&owner());
        for _ in 0..3 {
            h.service.increment(&owner(), &address).unwrap();
        }
        let before = h.raw(&address).unwrap();

        h.clock.advance(60);
        assert_eq!(
            h.service.initialize(&owner(), &address),
            Err(CounterError::AlreadyExists { address })
        );

        assert_eq!(h.raw(&address).unwrap(), before);
        let record = h.service.fetch(&address).unwrap();
        assert_eq!(record.count, 3);
        assert_eq!(record.created_at, START_TIME);
    }

    #[test]
    fn test_reinitialize_after_reset_still_rejected() {
        let h = Harness::new();
        let address = h.initialized(&owner());
        h.service.increment(&owner(), &address).unwrap();
        h.service.reset(&owner(), &address).unwrap();

        assert!(matches!(
            h.service.initialize(&owner(), &address),
            Err(CounterError::AlreadyExists { .. })
        ));
        assert_eq!(h.service.fetch(&address).unwrap().total_increments, 1);
    }

    #[test]
    fn test_racing_initialize_threads() {
        let h = Harness::new();
        let address = h.address_of(&owner());

        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| scope.spawn(|| h.service.initialize(&owner(), &address)))
                .collect();
            handles.into_iter().map(|t| t.join().unwrap()).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, CounterError::AlreadyExists { .. })));

        assert_eq!(h.ledger.len(), 1);
        assert_eq!(h.events.len(), 1);
        assert_eq!(h.service.stats().initialized, 1);
    }

    #[tokio::test]
    async fn test_racing_initialize_tasks() {
        let h = Harness::new();
        let address = h.address_of(&owner());

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let service = Arc::clone(&h.service);
            tasks.push(tokio::task::spawn_blocking(move || {
                service.initialize(&owner(), &address)
            }));
        }

        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(h.service.fetch(&address).unwrap().owner, owner());
    }

    #[test]
    fn test_racing_increments_all_land() {
        for _ in 0..10 {
            let h = Harness::new();
            let address = h.initialized(&owner());

            thread::scope(|scope| {
                for _ in 0..8 {
                    scope.spawn(|| {
                        for _ in 0..25 {
                            h.service.increment(&owner(), &address).unwrap();
                        }
                    });
                }
            });

            let record = h.service.fetch(&address).unwrap();
            assert_eq!(record.count, 200);
            assert_eq!(record.total_increments, 200);
            assert_eq!(h.events.len(), 201);
        }
    }

    #[test]
    fn test_racing_increment_and_reset_stay_consistent() {
        let h = Harness::new();
        let address = h.initialized(&owner());

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        h.service.increment(&owner(), &address).unwrap();
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..10 {
                    h.service.reset(&owner(), &address).unwrap();
                }
            });
        });

        // Every increment counted once, resets never touch the total
        let record = h.service.fetch(&address).unwrap();
        assert_eq!(record.total_increments, 100);
        assert!(record.count <= 100);
    }
}
