use atomic_slot::AtomicSlot;
use std::sync::Arc;
use std::thread;

// A balance that many tellers deposit into and withdraw from without a lock.
// Withdrawals that would overdraw are refused rather than retried.
fn main() {
    let balance = Arc::new(AtomicSlot::new(1_000usize).unwrap());

    let tellers: Vec<_> = (0..4)
        .map(|teller| {
            let balance = balance.clone();
            thread::spawn(move || {
                let mut refused = 0;
                for i in 0..1_000usize {
                    if (i + teller) % 2 == 0 {
                        balance.fetch_update(|current| Some(current + 3)).unwrap();
                    } else if balance.fetch_update(|current| current.checked_sub(5)).is_err() {
                        refused += 1;
                    }
                }
                refused
            })
        })
        .collect();

    let refused: usize = tellers.into_iter().map(|t| t.join().unwrap()).sum();
    let withdrawn = 2_000 - refused;

    println!(
        "balance {} after 2000 deposits of 3 and {} withdrawals of 5 ({} refused)",
        balance.load(),
        withdrawn,
        refused
    );
    assert_eq!(balance.load(), 1_000 + 2_000 * 3 - withdrawn * 5);
}
