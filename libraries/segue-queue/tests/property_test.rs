//! Property-based tests for the queue controller
//!
//! Uses proptest to verify navigation invariants across many random inputs.

use proptest::prelude::*;
use segue_core::{Navigation, PlayMode, StaticPlaylist};
use segue_queue::{QueueConfig, QueueController};
use std::collections::HashSet;
use std::sync::Arc;

// ===== Helpers =====

fn queue(len: usize, mode: PlayMode, start: usize, seed: u64) -> QueueController {
    let ids: Vec<String> = (0..len).map(|i| format!("{}", 1000 + i)).collect();
    QueueController::new(
        Arc::new(StaticPlaylist::from_ids(ids)),
        QueueConfig {
            mode,
            start_index: start,
            shuffle_seed: Some(seed),
            ..QueueConfig::default()
        },
    )
}

fn arbitrary_mode() -> impl Strategy<Value = PlayMode> {
    prop_oneof![
        Just(PlayMode::Sequential),
        Just(PlayMode::RepeatOne),
        Just(PlayMode::RepeatAll),
        Just(PlayMode::Shuffle),
    ]
}

fn arbitrary_navigation() -> impl Strategy<Value = Navigation> {
    prop_oneof![
        Just(Navigation::Next),
        Just(Navigation::Previous),
        Just(Navigation::Repeat),
        (0usize..80).prop_map(Navigation::Index),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: entering shuffle yields a permutation centred on the current index
    #[test]
    fn shuffle_entry_is_centred_permutation(
        len in 1usize..60,
        start in 0usize..80,
        seed in any::<u64>(),
    ) {
        let mut q = queue(len, PlayMode::Sequential, start, seed);
        prop_assert!(q.set_mode(PlayMode::Shuffle));

        let order = q.shuffle_order().to_vec();
        let unique: HashSet<usize> = order.iter().copied().collect();
        prop_assert_eq!(order.len(), len);
        prop_assert_eq!(unique.len(), len);
        prop_assert!(order.iter().all(|&i| i < len));

        let current = q.current_index().unwrap();
        prop_assert_eq!(order[q.shuffle_pointer()], current);
        prop_assert!(q.history().is_empty());
    }

    /// Property: peek never mutates and always agrees with resolve
    #[test]
    fn peek_is_pure_and_predicts_resolve(
        len in 1usize..30,
        mode in arbitrary_mode(),
        seed in any::<u64>(),
        script in prop::collection::vec(arbitrary_navigation(), 1..40),
    ) {
        let mut q = queue(len, mode, 0, seed);

        for navigation in script {
            let before = q.snapshot();
            let peeked = q.peek(navigation);
            prop_assert_eq!(&q.snapshot(), &before);

            let resolved = q.resolve_index(navigation);
            prop_assert_eq!(peeked, resolved);
        }
    }

    /// Property: the current index always stays inside the list
    #[test]
    fn current_index_stays_in_range(
        len in 1usize..30,
        mode in arbitrary_mode(),
        seed in any::<u64>(),
        script in prop::collection::vec(arbitrary_navigation(), 1..60),
    ) {
        let mut q = queue(len, mode, 0, seed);
        for navigation in script {
            let index = q.resolve_index(navigation).unwrap();
            prop_assert!(index < len);
            prop_assert_eq!(q.current_index(), Some(index));
        }
    }

    /// Property: a full shuffle pass visits every index exactly once
    #[test]
    fn shuffle_pass_covers_every_index(
        len in 1usize..40,
        start in 0usize..40,
        seed in any::<u64>(),
    ) {
        let mut q = queue(len, PlayMode::Shuffle, start, seed);
        let mut visited = vec![q.current_index().unwrap()];
        for _ in 1..len {
            visited.push(q.resolve_index(Navigation::Next).unwrap());
        }

        let unique: HashSet<usize> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), len);
    }

    /// Property: going back through shuffle history retraces the forward path
    #[test]
    fn shuffle_back_retraces_forward_path(
        len in 2usize..40,
        steps in 1usize..40,
        seed in any::<u64>(),
    ) {
        let mut q = queue(len, PlayMode::Shuffle, 0, seed);
        let mut path = vec![q.current_index().unwrap()];
        for _ in 0..steps {
            path.push(q.resolve_index(Navigation::Next).unwrap());
        }

        path.pop();
        while let Some(expected) = path.pop() {
            prop_assert_eq!(q.resolve_index(Navigation::Previous), Some(expected));
        }
        prop_assert!(q.history().is_empty());
    }

    /// Property: list changes reclamp and recentre, never clear history
    #[test]
    fn list_change_reclamps_and_keeps_history(
        start in 0usize..20,
        steps in 0usize..10,
        seed in any::<u64>(),
    ) {
        let mut q = queue(20, PlayMode::Shuffle, start, seed);
        for _ in 0..steps {
            q.resolve(Navigation::Next);
        }
        let history = q.history();

        q.notify_list_changed();

        prop_assert_eq!(q.history(), history);
        let current = q.current_index().unwrap();
        prop_assert_eq!(q.shuffle_order()[q.shuffle_pointer()], current);
    }
}
