use blockhook_types::Timestamp;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn now_is_after_epoch() {
    assert!(Timestamp::now().as_millis() > 0);
}

#[test]
fn from_millis_keeps_value() {
    assert_eq!(Timestamp::from_millis(1_700_000_000_123).as_millis(), 1_700_000_000_123);
}

// ── Ordering ─────────────────────────────────────────────────────

#[test]
fn ordering_follows_millis() {
    assert!(Timestamp::from_millis(10) < Timestamp::from_millis(11));
}

#[test]
fn advance_moves_forward_from_future_timestamp() {
    let far = Timestamp::from_millis(i64::MAX - 10);
    assert_eq!(far.advance().as_millis(), i64::MAX - 9);
}

#[test]
fn advance_from_past_jumps_to_now() {
    let past = Timestamp::from_millis(1_000);
    assert!(past.advance().as_millis() > 1_000_000);
}

// ── Conversion ───────────────────────────────────────────────────

#[test]
fn display_is_rfc3339() {
    let ts = Timestamp::from_millis(0);
    assert_eq!(ts.to_string(), "1970-01-01T00:00:00+00:00");
}

#[test]
fn out_of_range_datetime_is_error() {
    assert!(Timestamp::from_millis(i64::MAX).to_datetime().is_err());
}

#[test]
fn serializes_as_integer() {
    let json = serde_json::to_string(&Timestamp::from_millis(42)).unwrap();
    assert_eq!(json, "42");
}
