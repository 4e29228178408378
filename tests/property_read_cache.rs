use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use folio::{CacheKey, ManualClock, PostListOptions, ProjectListOptions, ReadCache, ResearchListOptions};
use proptest::prelude::*;

fn post_options() -> impl Strategy<Value = PostListOptions> {
    (proptest::option::of(0u32..50), any::<bool>()).prop_map(|(limit, include_unpublished)| {
        PostListOptions {
            limit,
            include_unpublished,
        }
    })
}

fn research_options() -> impl Strategy<Value = ResearchListOptions> {
    (
        proptest::option::of("[a-z]{0,6}"),
        proptest::option::of(0u32..50),
    )
        .prop_map(|(category, limit)| ResearchListOptions { category, limit })
}

proptest! {
    /// Property: equal options always produce equal keys
    #[test]
    fn prop_equal_options_equal_keys(options in post_options()) {
        let copy = options.clone();
        prop_assert_eq!(CacheKey::posts(&options).unwrap(), CacheKey::posts(&copy).unwrap());
    }

    /// Property: keys coincide exactly when the normalized options coincide
    #[test]
    fn prop_keys_follow_normalized_options(a in post_options(), b in post_options()) {
        let same_key = CacheKey::posts(&a).unwrap() == CacheKey::posts(&b).unwrap();
        prop_assert_eq!(same_key, a.normalized() == b.normalized());
    }

    #[test]
    fn prop_research_keys_follow_normalized_options(
        a in research_options(),
        b in research_options(),
    ) {
        let same_key = CacheKey::researches(&a).unwrap() == CacheKey::researches(&b).unwrap();
        prop_assert_eq!(same_key, a.normalized() == b.normalized());
    }

    /// Property: explicit defaults share the key of omitted settings
    #[test]
    fn prop_default_flags_are_equivalent(limit in proptest::option::of(1u32..50)) {
        let implicit = ProjectListOptions { limit, ..ProjectListOptions::default() };
        let explicit = ProjectListOptions { featured: false, limit };
        prop_assert_eq!(CacheKey::projects(&implicit).unwrap(), CacheKey::projects(&explicit).unwrap());
    }

    /// Property: listing keys and single-post keys never collide
    #[test]
    fn prop_operations_do_not_collide(slug in "[a-z0-9-]{1,20}", options in post_options()) {
        prop_assert_ne!(CacheKey::post(&slug), CacheKey::posts(&options).unwrap());
    }

    /// Property: within the TTL a key is fetched once no matter how many reads
    #[test]
    fn prop_fetch_once_within_ttl(reads in 1usize..20, step_secs in 0u64..15) {
        let clock = Arc::new(ManualClock::new());
        let cache = ReadCache::with_clock(Duration::from_secs(300), clock.clone());
        let calls = AtomicUsize::new(0);

        tokio_test::block_on(async {
            for _ in 0..reads {
                let value = cache
                    .cached_fetch("posts-{}", || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, String>(vec![1, 2, 3])
                    })
                    .await
                    .unwrap();
                assert_eq!(*value, vec![1, 2, 3]);
                clock.advance(Duration::from_secs(step_secs));
            }
        });

        // 20 reads * 14s stays under 300s
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Property: distinct keys never share storage
    #[test]
    fn prop_distinct_keys_isolated(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        prop_assume!(a != b);
        let cache = ReadCache::new();

        tokio_test::block_on(async {
            let va = cache
                .cached_fetch(a.as_str(), || async { Ok::<_, String>(a.clone()) })
                .await
                .unwrap();
            let vb = cache
                .cached_fetch(b.as_str(), || async { Ok::<_, String>(b.clone()) })
                .await
                .unwrap();
            assert_eq!(*va, a);
            assert_eq!(*vb, b);
            assert_eq!(cache.len().await, 2);
        });
    }
}
