//! Concurrent access to a shared table from many threads.

use std::collections::HashSet;
use std::thread;

use recordkeeper::db::{Database, PrimaryKey};

use crate::support::Note;

const THREADS: usize = 8;
const INSERTS_PER_THREAD: usize = 250;

#[test]
fn concurrent_inserts_never_duplicate_ids() {
    let db = Database::new();
    db.add_table::<Note>("notes").unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let notes = db.table::<Note>("notes").unwrap();
            thread::spawn(move || {
                (0..INSERTS_PER_THREAD)
                    .map(|i| {
                        let mut note = Note::new(&format!("{t}-{i}"));
                        notes.insert(&mut note).unwrap();
                        note.id
                    })
                    .collect::<Vec<PrimaryKey>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "duplicate id {id}");
        }
    }

    let total = (THREADS * INSERTS_PER_THREAD) as u64;
    let notes = db.table::<Note>("notes").unwrap();
    assert_eq!(ids.len() as u64, total);
    assert_eq!(notes.len().unwrap() as u64, total);
    assert_eq!(notes.last_id().unwrap(), PrimaryKey::new(total));
    assert_eq!(ids, (1..=total).map(PrimaryKey::new).collect::<HashSet<_>>());
}

#[test]
fn readers_and_writers_interleave() {
    let db = Database::new();
    let notes = db.add_table::<Note>("notes").unwrap();
    for i in 0..100 {
        notes.insert(&mut Note::new(&i.to_string())).unwrap();
    }

    let writer = {
        let notes = notes.clone();
        thread::spawn(move || {
            for id in 1..=100 {
                let mut note = notes.get(PrimaryKey::new(id)).unwrap();
                note.body = format!("updated {id}");
                notes.update(&note).unwrap();
                if id % 2 == 0 {
                    notes.delete(PrimaryKey::new(id)).unwrap();
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let notes = notes.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let found = notes.find(|_| true).unwrap();
                    assert!(found.windows(2).all(|w| w[0].id < w[1].id));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let remaining = notes.all().unwrap();
    assert_eq!(remaining.len(), 50);
    assert!(remaining.iter().all(|n| n.body.starts_with("updated")));
}
