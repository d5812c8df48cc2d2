use crate::sim::SimTime;

#[test]
fn sim_time_unit_conversions() {
    assert_eq!(SimTime::from_nanos(7), SimTime(7));
    assert_eq!(SimTime::from_micros(1), SimTime(1_000));
    assert_eq!(SimTime::from_millis(1), SimTime(1_000_000));
    assert_eq!(SimTime::from_secs(1), SimTime(1_000_000_000));
}

#[test]
fn sim_time_unit_conversions_saturate_on_overflow() {
    assert_eq!(SimTime::from_micros(u64::MAX), SimTime::MAX);
    assert_eq!(SimTime::from_millis(u64::MAX), SimTime::MAX);
    assert_eq!(SimTime::from_secs(u64::MAX), SimTime::MAX);
    assert_eq!(SimTime::MAX.saturating_add(SimTime(1)), SimTime::MAX);
}

#[test]
fn sim_time_displays_seconds() {
    assert_eq!(SimTime::from_secs(60).to_string(), "60.000000000s");
    assert_eq!(SimTime::from_millis(10).to_string(), "0.010000000s");
}
