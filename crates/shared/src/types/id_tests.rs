use super::*;
use std::str::FromStr;

#[test]
fn test_typed_id_round_trips_raw_value() {
    let id = UserId::new(42);
    assert_eq!(id.into_inner(), 42);
    assert_eq!(i64::from(id), 42);
    assert_eq!(UserId::from(42), id);
}

#[test]
fn test_typed_id_display() {
    assert_eq!(format!("{}", GroupId::new(7)), "7");
}

#[test]
fn test_typed_id_from_str() {
    assert_eq!(ExpenseId::from_str("15").unwrap(), ExpenseId::new(15));
    assert_eq!(ExpenseId::from_str(" 15 ").unwrap(), ExpenseId::new(15));
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(UserId::from_str("abc").is_err());
    assert!(UserId::from_str("").is_err());
}

#[test]
fn test_typed_id_orders_by_raw_value() {
    let mut ids = vec![UserId::new(3), UserId::new(1), UserId::new(2)];
    ids.sort();
    assert_eq!(ids, vec![UserId::new(1), UserId::new(2), UserId::new(3)]);
}

#[test]
fn test_typed_id_serializes_as_plain_number() {
    let json = serde_json::to_string(&GroupId::new(9)).unwrap();
    assert_eq!(json, "9");

    let parsed: GroupId = serde_json::from_str("9").unwrap();
    assert_eq!(parsed, GroupId::new(9));
}
