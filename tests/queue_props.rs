// tests/queue_props.rs
//! Property tests for queue ordering and ring buffer bounds

use faultline::capture::record::{ErrorKind, ErrorRecord};
use faultline::capture::replay_buffer::ReplayBuffer;
use faultline::storage::queue::ErrorQueue;
use proptest::prelude::*;

fn record(seq: usize) -> ErrorRecord {
    ErrorRecord::new(ErrorKind::Js, format!("e{}", seq))
}

proptest! {
    /// Any interleaving of take-front and front-reinsertion keeps records
    /// in their original relative order
    #[test]
    fn reinsertion_never_reorders(
        total in 1usize..50,
        takes in proptest::collection::vec(1usize..12, 1..8),
    ) {
        let queue = ErrorQueue::new(1_000);
        for i in 0..total {
            queue.push(record(i));
        }

        // Repeatedly fail a batch: take then reinsert
        for n in takes {
            let batch = queue.take_front(n);
            queue.reinsert_front(batch);
        }

        let messages: Vec<String> =
            queue.snapshot().iter().map(|r| r.message.clone()).collect();
        let expected: Vec<String> = (0..total).map(|i| format!("e{}", i)).collect();
        prop_assert_eq!(messages, expected);
    }

    /// The queue always drains oldest-first regardless of batch sizes
    #[test]
    fn drains_oldest_first(
        total in 1usize..60,
        sizes in proptest::collection::vec(1usize..10, 1..20),
    ) {
        let queue = ErrorQueue::new(1_000);
        for i in 0..total {
            queue.push(record(i));
        }

        let mut drained = Vec::new();
        for n in sizes {
            drained.extend(queue.take_front(n));
        }
        drained.extend(queue.drain_all());

        let messages: Vec<String> = drained.iter().map(|r| r.message.clone()).collect();
        let expected: Vec<String> = (0..total).map(|i| format!("e{}", i)).collect();
        prop_assert_eq!(messages, expected);
    }

    /// The ring buffer never exceeds its capacity and keeps the newest events
    #[test]
    fn ring_buffer_bounded_drop_oldest(pushes in 0usize..600) {
        let buffer = ReplayBuffer::new(200);
        for i in 0..pushes {
            buffer.push(serde_json::json!({ "seq": i }));
        }

        prop_assert!(buffer.len() <= 200);

        let drained = buffer.drain();
        if pushes > 200 {
            prop_assert_eq!(drained.len(), 200);
            prop_assert_eq!(drained[0]["seq"].as_u64(), Some((pushes - 200) as u64));
        } else {
            prop_assert_eq!(drained.len(), pushes);
        }
    }
}
