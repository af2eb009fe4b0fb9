use atomic_slot::{AtomicSlot, Stamped};

// Replays the classic ABA interleaving against a stamped slot: the value returns to
// what a stalled thread expects, but the stamp has moved on, so its update is refused.
fn main() {
    let head = match AtomicSlot::new(Stamped::new(7, 0)) {
        Ok(head) => head,
        Err(err) => {
            println!("stamped slots need a 64-bit word: {}", err);
            return;
        }
    };

    let stalled = head.load();
    println!("stalled thread read {:?}", stalled);

    for value in [9, 7].iter() {
        let current = head.load();
        assert!(head.compare_and_swap(current, current.next(*value)));
        println!("other thread moved the head to {:?}", head.load());
    }

    let replayed = head.compare_and_swap(stalled, stalled.next(1));
    println!("stalled thread's compare-and-swap succeeded: {}", replayed);
    assert!(!replayed);
}
