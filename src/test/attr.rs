use crate::engine::{DataRate, parse_delay};
use crate::sim::SimTime;

#[test]
fn data_rate_parses_common_units() {
    let bps = |s: &str| s.parse::<DataRate>().expect(s).bps();
    assert_eq!(bps("5Mbps"), 5_000_000);
    assert_eq!(bps("1.5Gb/s"), 1_500_000_000);
    assert_eq!(bps("100kbps"), 100_000);
    assert_eq!(bps("10KBps"), 80_000);
    assert_eq!(bps("1MiB/s"), 8 * 1024 * 1024);
    assert_eq!(bps(" 64bps "), 64);
}

#[test]
fn data_rate_without_unit_is_bits_per_second() {
    let bps = |s: &str| s.parse::<DataRate>().expect(s).bps();
    assert_eq!(bps("5"), 5);
    assert_eq!(bps("1000000"), 1_000_000);
    assert_eq!(bps("2.5"), 3);
}

#[test]
fn data_rate_rejects_malformed_strings() {
    for bad in ["", "Mbps", "5 furlongs", "-5Mbps", "5.5.5Mbps"] {
        let err = bad.parse::<DataRate>().expect_err(bad);
        assert_eq!(err.attribute, "DataRate");
        assert_eq!(err.value, bad);
    }
}

#[test]
fn delay_parses_units_and_bare_seconds() {
    assert_eq!(parse_delay("10ms").expect("ms"), SimTime::from_millis(10));
    assert_eq!(parse_delay("250us").expect("us"), SimTime::from_micros(250));
    assert_eq!(parse_delay("2s").expect("s"), SimTime::from_secs(2));
    assert_eq!(parse_delay("1.5ms").expect("frac"), SimTime::from_micros(1500));
    assert_eq!(parse_delay("3").expect("bare"), SimTime::from_secs(3));
    assert_eq!(parse_delay("1min").expect("min"), SimTime::from_secs(60));
}

#[test]
fn delay_rejects_unknown_units() {
    let err = parse_delay("10 parsecs").expect_err("unknown unit");
    assert_eq!(err.attribute, "Delay");
    assert!(parse_delay("ms").is_err());
}
