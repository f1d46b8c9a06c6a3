//! # Boundary Attacks
//!
//! Pushing a record to its numeric limits and feeding the service storage
//! that is not a valid record.

#[cfg(test)]
mod tests {
    use counter_accounts::{
        encode_record, record_discriminator, CounterApi, CounterError, CounterRecord, Pubkey,
        RECORD_SPACE,
    };

    use crate::support::{Harness, START_TIME};

    fn owner() -> Pubkey {
        Pubkey::new([0x0C; 32])
    }

    fn store(h: &Harness, record: &CounterRecord) -> counter_accounts::Address {
        let address = h.address_of(&record.owner);
        h.ledger.insert_raw(address, encode_record(record).to_vec());
        address
    }

    // =============================================================================
    // OVERFLOW
    // =============================================================================

    #[test]
    fn test_increment_at_max_count() {
        let h = Harness::new();
        let address = store(
            &h,
            &CounterRecord {
                count: u64::MAX,
                total_increments: u64::MAX,
                ..CounterRecord::new(owner(), START_TIME)
            },
        );
        let before = h.raw(&address).unwrap();

        assert!(matches!(
            h.service.increment(&owner(), &address),
            Err(CounterError::Overflow { .. })
        ));
        assert_eq!(h.raw(&address).unwrap(), before);
    }

    #[test]
    fn test_increment_at_max_total_after_reset() {
        let h = Harness::new();
        let address = store(
            &h,
            &CounterRecord {
                count: u64::MAX,
                total_increments: u64::MAX,
                ..CounterRecord::new(owner(), START_TIME)
            },
        );

        let record = h.service.reset(&owner(), &address).unwrap();
        assert_eq!(record.count, 0);
        assert_eq!(record.total_increments, u64::MAX);

        // count has room, total does not: neither field moves
        let before = h.raw(&address).unwrap();
        assert_eq!(
            h.service.increment(&owner(), &address),
            Err(CounterError::Overflow {
                field: "total_increments"
            })
        );
        assert_eq!(h.raw(&address).unwrap(), before);
    }

    #[test]
    fn test_last_increment_before_limit() {
        let h = Harness::new();
        let address = store(
            &h,
            &CounterRecord {
                count: u64::MAX - 1,
                total_increments: u64::MAX - 1,
                ..CounterRecord::new(owner(), START_TIME)
            },
        );

        let record = h.service.increment(&owner(), &address).unwrap();
        assert_eq!(record.count, u64::MAX);
        assert_eq!(record.total_increments, u64::MAX);
    }

    // =============================================================================
    // CORRUPT STORAGE
    // =============================================================================

    #[test]
    fn test_wrong_discriminator_rejected() {
        let h = Harness::new();
        let address = store(&h, &CounterRecord::new(owner(), START_TIME));

        let mut bytes = h.raw(&address).unwrap();
        bytes[0] ^= 0xFF;
        h.ledger.insert_raw(address, bytes.clone());

        assert!(matches!(
            h.service.increment(&owner(), &address),
            Err(CounterError::CorruptRecord { .. })
        ));
        assert_eq!(h.raw(&address).unwrap(), bytes);
    }

    #[test]
    fn test_count_above_total_rejected() {
        let h = Harness::new();
        let address = h.address_of(&owner());

        let mut bytes = encode_record(&CounterRecord::new(owner(), START_TIME)).to_vec();
        // count := 5 while total_increments stays 0
        bytes[40] = 5;
        h.ledger.insert_raw(address, bytes);

        assert!(matches!(
            h.service.reset(&owner(), &address),
            Err(CounterError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_truncated_record_rejected() {
        let h = Harness::new();
        let address = h.address_of(&owner());

        let mut bytes = record_discriminator().to_vec();
        bytes.extend_from_slice(owner().as_bytes());
        assert!(bytes.len() < RECORD_SPACE);
        h.ledger.insert_raw(address, bytes);

        assert!(matches!(
            h.service.fetch(&address),
            Err(CounterError::CorruptRecord { .. })
        ));
    }
}
