// Quick benchmark for a one-screen summary of the median list against the
// sorted-vector baseline

use std::hint::black_box;
use std::time::Instant;

use median_list::list::{HintPolicy, ListConfig, MedianList};
use reference::NaiveMedian;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn time_ops<F: Fn() -> Option<u64>>(f: F, iterations: usize) -> f64 {
    // Warmup
    for _ in 0..3 {
        black_box(f());
    }

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(f());
    }
    let elapsed = start.elapsed();
    return elapsed.as_nanos() as f64 / iterations as f64;
}

fn row(size: usize, iterations: usize) {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<u64> = (0..size).map(|_| rng.gen_range(0..1_000_000)).collect();

    let list_ascending = time_ops(|| {
        let mut list = MedianList::new();
        for i in 0..size as u64 {
            let head = list.head();
            list.insert(i, i, head, None).ok()?;
        }
        list.median_value()
    }, iterations);

    let naive_ascending = time_ops(|| {
        let mut naive = NaiveMedian::new();
        for i in 0..size as u64 {
            naive.insert(i, i);
        }
        naive.median_value()
    }, iterations);

    let list_random = time_ops(|| {
        let mut list = MedianList::new();
        for (i, &value) in values.iter().enumerate() {
            list.insert_unhinted(i as u64, value).ok()?;
        }
        list.median_value()
    }, iterations);

    let naive_random = time_ops(|| {
        let mut naive = NaiveMedian::new();
        for (i, &value) in values.iter().enumerate() {
            naive.insert(i as u64, value);
        }
        naive.median_value()
    }, iterations);

    // Every key nudged once, hinted with its current neighbours
    let config = ListConfig::default().with_hint_policy(HintPolicy::ScanOnMiss);
    let mut base = MedianList::with_config(&config);
    for i in 0..size as u64 {
        let head = base.head();
        let _ = base.insert(i, i * 1000, head, None);
    }
    let list_drift = time_ops(|| {
        let mut list = base.clone();
        for key in 0..size as u64 {
            let value = list.value(key)? + 1500;
            let (lesser, greater) = (list.previous(key), list.next(key));
            list.update(key, value, lesser, greater).ok()?;
        }
        list.median_value()
    }, iterations);

    println!(
        "| {:>6} | {:>10.1} | {:>10.1} | {:>10.1} | {:>10.1} | {:>10.1} |",
        size,
        list_ascending / 1000.0,
        naive_ascending / 1000.0,
        list_random / 1000.0,
        naive_random / 1000.0,
        list_drift / 1000.0,
    );
}

fn main() {
    println!("\n=== Median List vs Naive (whole workload) ===\n");
    println!("All times in microseconds (us)\n");
    println!(
        "| {:>6} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} |",
        "Size", "List Asc", "Naive Asc", "List Rand", "Naive Rand", "List Drift"
    );
    println!("|--------|------------|------------|------------|------------|------------|");

    row(100, 200);
    row(1000, 50);
    row(10000, 5);

    println!();
}
