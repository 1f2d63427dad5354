//! Statistics Tests.
//!
//! Miss rates, AMAT (including the all-hit and empty edge cases) and the two
//! report formats.

use cachesim_core::HierarchyStats;
use cachesim_core::stats::LevelStats;
use pretty_assertions::assert_eq;

fn stats(near: (u64, u64, u64), far: (u64, u64, u64), memory_latency: u64) -> HierarchyStats {
    let level = |(accesses, misses, latency)| LevelStats {
        accesses,
        misses,
        latency,
    };
    HierarchyStats {
        near: level(near),
        far: level(far),
        memory_latency,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn level_miss_rate_and_hits() {
    let level = LevelStats {
        accesses: 8,
        misses: 2,
        latency: 1,
    };
    assert!(approx(level.miss_rate(), 0.25));
    assert_eq!(level.hits(), 6);
}

#[test]
fn level_miss_rate_is_nan_without_accesses() {
    assert!(LevelStats::default().miss_rate().is_nan());
    assert_eq!(LevelStats::default().hits(), 0);
}

#[test]
fn amat_combines_all_three_terms() {
    // 1 + 0.5 * 2 + 0.5 * 0.5 * 8
    let s = stats((4, 2, 1), (2, 1, 2), 8);
    assert!(approx(s.amat(), 4.0), "amat = {}", s.amat());
}

#[test]
fn amat_reference_figures() {
    // Miss rates 0.1 and 0.2 with 1/10/100-cycle latencies.
    let s = stats((10, 1, 1), (5, 1, 10), 100);
    assert!(approx(s.near_miss_rate(), 0.1));
    assert!(approx(s.far_miss_rate(), 0.2));
    assert!(approx(s.amat(), 4.0), "amat = {}", s.amat());
}

#[test]
fn amat_of_all_hit_trace_is_near_latency() {
    let s = stats((50, 0, 3), (0, 0, 10), 100);
    assert!(s.far_miss_rate().is_nan());
    assert!(approx(s.amat(), 3.0));
}

#[test]
fn amat_is_nan_without_accesses() {
    let s = stats((0, 0, 1), (0, 0, 10), 100);
    assert!(s.near_miss_rate().is_nan());
    assert!(s.amat().is_nan());
}

#[test]
fn rates_returns_both_miss_rates_and_amat() {
    let s = stats((10, 1, 1), (1, 1, 10), 100);
    let (l1, l2, amat) = s.rates();
    assert!(approx(l1, 0.1));
    assert!(approx(l2, 1.0));
    assert!(approx(amat, 12.0));
}

#[test]
fn summary_line_format() {
    let s = stats((10, 1, 1), (1, 1, 10), 100);
    assert_eq!(s.to_string(), "L1miss=0.100 L2miss=1.000 AccTimeAvg=12.000");
}

#[test]
fn summary_line_rounds_to_three_decimals() {
    let s = stats((3, 1, 1), (1, 0, 5), 100);
    assert_eq!(s.to_string(), "L1miss=0.333 L2miss=0.000 AccTimeAvg=2.667");
}

#[test]
fn detailed_report_lists_each_level() {
    let s = stats((10, 1, 1), (1, 1, 10), 100);
    let mut out = Vec::new();
    s.write_detailed(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("CACHE HIERARCHY STATISTICS"));
    assert!(text.contains("l1.accesses              10"));
    assert!(text.contains("l1.hits                  9"));
    assert!(text.contains("l2.misses                1"));
    assert!(text.contains("mem.latency              100 cycles"));
    assert!(text.contains("amat                     12.0000 cycles"));
}

#[test]
fn stats_serialize_to_json() {
    let s = stats((10, 1, 1), (1, 1, 10), 100);
    let json = serde_json::to_value(s).unwrap();
    assert_eq!(json["near"]["accesses"], 10);
    assert_eq!(json["far"]["latency"], 10);
    assert_eq!(json["memory_latency"], 100);
}
