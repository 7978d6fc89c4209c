use crate::{EPOCH_MILLIS, Error, Poll, SnowflakeGenerator, SnowflakeId, SystemClock, TimeSource};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::thread::scope;

struct FixedTime {
    millis: i64,
}

impl TimeSource<i64> for FixedTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

/// Returns `values[index]`; the test moves `index` by hand.
struct MockStepTime {
    values: Vec<i64>,
    index: Cell<usize>,
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

impl TimeSource<i64> for SharedMockStepTime {
    fn current_millis(&self) -> i64 {
        self.clock.values[self.clock.index.get()]
    }
}

/// Returns the next value on every read and then sticks at the last one.
#[derive(Clone)]
struct AdvancingTime {
    values: Rc<Vec<i64>>,
    reads: Rc<Cell<usize>>,
}

impl AdvancingTime {
    fn new(values: Vec<i64>) -> Self {
        Self {
            values: Rc::new(values),
            reads: Rc::new(Cell::new(0)),
        }
    }
}

impl TimeSource<i64> for AdvancingTime {
    fn current_millis(&self) -> i64 {
        let read = self.reads.get();
        self.reads.set(read + 1);
        self.values[read.min(self.values.len() - 1)]
    }
}

trait PollExt {
    fn unwrap_ready(self) -> SnowflakeId;
    fn unwrap_pending(self) -> i64;
}

impl PollExt for Poll<SnowflakeId> {
    fn unwrap_ready(self) -> SnowflakeId {
        match self {
            Self::Ready { id } => id,
            Self::Pending { yield_for } => {
                panic!("unexpected pending (yield for: {yield_for})")
            }
        }
    }

    fn unwrap_pending(self) -> i64 {
        match self {
            Self::Ready { id } => panic!("unexpected ready ({id})"),
            Self::Pending { yield_for } => yield_for,
        }
    }
}

const fn at(delta: i64) -> i64 {
    EPOCH_MILLIS + delta
}

#[test]
fn construction_rejects_out_of_range_ids() {
    assert_eq!(
        SnowflakeGenerator::new(32, 0).unwrap_err(),
        Error::DatacenterIdOutOfRange {
            datacenter_id: 32,
            max: 31
        }
    );
    assert_eq!(
        SnowflakeGenerator::new(0, 32).unwrap_err(),
        Error::WorkerIdOutOfRange {
            worker_id: 32,
            max: 31
        }
    );
    assert!(matches!(
        SnowflakeGenerator::new(-1, 0),
        Err(Error::DatacenterIdOutOfRange { .. })
    ));
    assert!(matches!(
        SnowflakeGenerator::new(0, -1),
        Err(Error::WorkerIdOutOfRange { .. })
    ));
    assert!(SnowflakeGenerator::new(31, 31).is_ok());
}

#[test]
fn construction_accepts_every_valid_pair() {
    for dc in 0..=31 {
        for wk in 0..=31 {
            let generator = SnowflakeGenerator::new(dc, wk).unwrap();
            assert_eq!(generator.datacenter_id(), dc);
            assert_eq!(generator.worker_id(), wk);
        }
    }
}

#[test]
fn sequence_increments_within_same_tick() {
    let generator = SnowflakeGenerator::with_time(3, 4, FixedTime { millis: at(42) }).unwrap();

    let id1 = generator.try_poll_id().unwrap().unwrap_ready();
    let id2 = generator.try_poll_id().unwrap().unwrap_ready();
    let id3 = generator.try_poll_id().unwrap().unwrap_ready();

    assert_eq!(id1.timestamp(), 42);
    assert_eq!(id2.timestamp(), 42);
    assert_eq!(id3.timestamp(), 42);
    assert_eq!(id1.sequence(), 0);
    assert_eq!(id2.sequence(), 1);
    assert_eq!(id3.sequence(), 2);
    assert_eq!(id1.device_id(), (3, 4));
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn poll_returns_pending_when_sequence_exhausted() {
    let generator = SnowflakeGenerator::from_components(
        42,
        0,
        1,
        SnowflakeId::max_sequence(),
        FixedTime { millis: at(42) },
    )
    .unwrap();

    assert_eq!(generator.try_poll_id().unwrap().unwrap_pending(), 1);
}

#[test]
fn poll_handles_rollover() {
    let clock = Rc::new(MockStepTime {
        values: vec![at(42), at(43)],
        index: Cell::new(0),
    });
    let generator = SnowflakeGenerator::with_time(
        0,
        1,
        SharedMockStepTime {
            clock: Rc::clone(&clock),
        },
    )
    .unwrap();

    for i in 0..=SnowflakeId::max_sequence() {
        let id = generator.try_poll_id().unwrap().unwrap_ready();
        assert_eq!(id.sequence(), i);
        assert_eq!(id.timestamp(), 42);
    }

    assert_eq!(generator.try_poll_id().unwrap().unwrap_pending(), 1);

    clock.index.set(1);

    let id = generator.try_poll_id().unwrap().unwrap_ready();
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 0);
}

#[test]
fn next_val_waits_for_next_millisecond_when_exhausted() {
    let time = AdvancingTime::new(vec![at(42), at(42), at(42), at(43)]);
    let generator = SnowflakeGenerator::from_components(
        42,
        1,
        1,
        SnowflakeId::max_sequence(),
        time.clone(),
    )
    .unwrap();

    let id = generator.next_val().unwrap();
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 0);
    assert_eq!(time.reads.get(), 4);
}

#[test]
fn clock_regression_is_waited_out() {
    let time = AdvancingTime::new(vec![at(90), at(95), at(99), at(100)]);
    let generator = SnowflakeGenerator::from_components(100, 2, 2, 5, time.clone()).unwrap();

    let id = generator.next_val().unwrap();
    assert_eq!(id.timestamp(), 100);
    assert_eq!(id.sequence(), 6);
    assert_eq!(time.reads.get(), 4);
}

#[test]
fn poll_reports_regression_without_touching_state() {
    let clock = Rc::new(MockStepTime {
        values: vec![at(90), at(100)],
        index: Cell::new(0),
    });
    let generator = SnowflakeGenerator::from_components(
        100,
        0,
        0,
        5,
        SharedMockStepTime {
            clock: Rc::clone(&clock),
        },
    )
    .unwrap();

    assert_eq!(generator.try_poll_id().unwrap().unwrap_pending(), 10);

    clock.index.set(1);
    let id = generator.try_poll_id().unwrap().unwrap_ready();
    assert_eq!(id.timestamp(), 100);
    assert_eq!(id.sequence(), 6);
}

#[test]
fn exhausted_timestamp_window_is_an_error() {
    let max = SnowflakeId::max_timestamp();
    let generator = SnowflakeGenerator::with_time(0, 0, FixedTime { millis: at(max + 1) }).unwrap();

    let expected = Error::ClockExhausted {
        elapsed: max + 1,
        max,
    };
    assert_eq!(generator.next_val().unwrap_err(), expected);
    assert_eq!(generator.next_val().unwrap_err(), expected);
    assert_eq!(generator.try_poll_id().unwrap_err(), expected);
}

#[test]
fn last_millisecond_of_window_is_usable() {
    let max = SnowflakeId::max_timestamp();
    let generator = SnowflakeGenerator::with_time(31, 31, FixedTime { millis: at(max) }).unwrap();

    let id = generator.next_val().unwrap();
    assert_eq!(id.timestamp(), max);
    assert!(id.is_valid());
}

#[test]
fn clock_before_epoch_is_an_error() {
    let generator = SnowflakeGenerator::with_time(0, 0, FixedTime { millis: at(-1) }).unwrap();
    assert_eq!(
        generator.next_val().unwrap_err(),
        Error::ClockBeforeEpoch {
            now: at(-1),
            epoch: EPOCH_MILLIS
        }
    );
}

#[test]
fn clones_share_state() {
    let generator = SnowflakeGenerator::with_time(1, 2, SystemClock).unwrap();
    let other = generator.clone();

    let a = generator.next_val().unwrap();
    let b = other.next_val().unwrap();
    let c = generator.next_val().unwrap();
    assert!(a < b && b < c);
}

#[test]
fn generated_time_falls_within_call_window() {
    let generator = SnowflakeGenerator::new(0, 1).unwrap();

    let before = SystemClock.current_millis();
    let id = generator.next_val().unwrap();
    let after = SystemClock.current_millis();

    assert!(before <= id.gen_timestamp() && id.gen_timestamp() <= after);
    assert_eq!(id.gen_timestamp() - EPOCH_MILLIS, id.timestamp());
}

#[test]
fn next_val_is_monotonic() {
    const TOTAL_IDS: usize = 4096 * 64;

    let generator = SnowflakeGenerator::new(28, 11).unwrap();
    let mut last = generator.next_val().unwrap();

    for _ in 0..TOTAL_IDS {
        let id = generator.next_val().unwrap();
        assert!(id > last);
        assert!(id.timestamp() >= last.timestamp());
        if id.timestamp() == last.timestamp() {
            assert_eq!(id.sequence(), last.sequence() + 1);
        } else {
            assert_eq!(id.sequence(), 0);
        }
        assert_eq!(id.device_id(), (28, 11));
        last = id;
    }
}

#[test]
fn next_val_is_unique_across_threads() {
    const TOTAL_IDS: usize = 200_000;

    let threads = num_cpus::get().clamp(2, 16);
    let per_thread = TOTAL_IDS / threads;
    let generator = SnowflakeGenerator::new(0, 0).unwrap();

    let batches: Vec<Vec<SnowflakeId>> = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let generator = &generator;
                s.spawn(move || {
                    (0..per_thread)
                        .map(|_| generator.next_val().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut seen = HashSet::with_capacity(per_thread * threads);
    for batch in batches {
        // Per thread the ids must still be strictly increasing.
        assert!(batch.windows(2).all(|w| w[0] < w[1]));
        for id in batch {
            assert!(seen.insert(id), "duplicate id {id}");
            assert_eq!(id.device_id(), (0, 0));
        }
    }
    assert_eq!(seen.len(), per_thread * threads);
}

#[cfg(not(feature = "parking-lot"))]
#[test]
fn poisoned_lock_is_reported() {
    let generator = SnowflakeGenerator::new(0, 0).unwrap();
    let other = generator.clone();

    let result = std::thread::spawn(move || {
        let _guard = other.state.lock().unwrap();
        panic!("poison the generator lock");
    })
    .join();
    assert!(result.is_err());

    assert_eq!(generator.next_val().unwrap_err(), Error::LockPoisoned);
    assert_eq!(generator.try_poll_id().unwrap_err(), Error::LockPoisoned);
}
