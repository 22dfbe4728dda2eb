use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use envscope::{EnvironmentTarget, MemoryStore, ScopedEnvironmentProvider};

const KEYS: usize = 32;

fn seed(store: &MemoryStore, generation: usize) {
    for i in 0..KEYS {
        store.set(
            EnvironmentTarget::User,
            format!("Section__Key{}", i),
            Some(generation.to_string()),
        );
    }
}

#[test]
fn readers_never_observe_a_partial_load() {
    let store = Arc::new(MemoryStore::new());
    seed(&store, 0);
    let provider = Arc::new(
        ScopedEnvironmentProvider::new(store.clone(), EnvironmentTarget::User, None).unwrap(),
    );
    provider.load().unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let mut readers = vec![];
    for _ in 0..4 {
        let provider = provider.clone();
        let done = done.clone();
        readers.push(thread::spawn(move || {
            let mut observed = 0usize;
            while !done.load(Ordering::SeqCst) {
                let snapshot = provider.snapshot();
                assert_eq!(snapshot.len(), KEYS);
                let first = snapshot.get("section:key0").unwrap().to_string();
                for i in 0..KEYS {
                    let key = format!("section:key{}", i);
                    assert_eq!(snapshot.get(&key), Some(first.as_str()));
                }
                observed += 1;
            }
            observed
        }));
    }

    for generation in 1..50 {
        seed(&store, generation);
        provider.load().unwrap();
    }
    done.store(true, Ordering::SeqCst);

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(provider.get("Section:Key0").as_deref(), Some("49"));
}

#[test]
fn failed_reload_leaves_published_map_readable() {
    let store = Arc::new(MemoryStore::new());
    seed(&store, 1);
    let provider =
        ScopedEnvironmentProvider::new(store.clone(), EnvironmentTarget::User, None).unwrap();
    provider.load().unwrap();
    let before = provider.snapshot();

    seed(&store, 2);
    store.set_unavailable(EnvironmentTarget::User, true);
    assert!(provider.load().is_err());

    let after = provider.snapshot();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(provider.get("Section:Key5").as_deref(), Some("1"));
}
