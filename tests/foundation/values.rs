//! Integration tests for typed attribute values.

use orgshell_foundation::{AttributeValue, ValueType};

fn coerce(raw: &str, ty: &ValueType) -> Option<AttributeValue> {
    AttributeValue::coerce(raw, ty).ok()
}

#[test]
fn numbers_accept_separators() {
    assert_eq!(coerce("1_000", &ValueType::Integer), Some(AttributeValue::Integer(1000)));
    assert_eq!(coerce(" 42 ", &ValueType::Integer), Some(AttributeValue::Integer(42)));
    assert_eq!(coerce("2.5", &ValueType::Decimal), Some(AttributeValue::Decimal(2.5)));
    assert_eq!(coerce("inf", &ValueType::Decimal), None);
    assert_eq!(coerce("12abc", &ValueType::Integer), None);
}

#[test]
fn bools_accept_common_spellings() {
    for raw in ["true", "YES", "y", "1", "on"] {
        assert_eq!(coerce(raw, &ValueType::Bool), Some(AttributeValue::Bool(true)), "{raw}");
    }
    for raw in ["false", "No", "n", "0", "off"] {
        assert_eq!(coerce(raw, &ValueType::Bool), Some(AttributeValue::Bool(false)), "{raw}");
    }
    assert_eq!(coerce("maybe", &ValueType::Bool), None);
}

#[test]
fn dates_accept_several_formats() {
    for raw in ["2020-01-15", "2020/01/15", "15/01/2020"] {
        let value = coerce(raw, &ValueType::Date).unwrap();
        assert_eq!(value.to_string(), "2020-01-15", "{raw}");
    }
    assert_eq!(coerce("2020-13-01", &ValueType::Date), None);
}

#[test]
fn months_accept_numbers_and_names() {
    assert_eq!(coerce("12", &ValueType::Month), Some(AttributeValue::Month(12)));
    assert_eq!(coerce("dec", &ValueType::Month), Some(AttributeValue::Month(12)));
    assert_eq!(coerce("September", &ValueType::Month), Some(AttributeValue::Month(9)));
    assert_eq!(coerce("13", &ValueType::Month), None);
    assert_eq!(coerce("ju", &ValueType::Month), None);
}

#[test]
fn choices_return_the_canonical_option() {
    let currency = ValueType::choice(["EUR", "USD"]);
    assert_eq!(
        coerce("eur", &currency),
        Some(AttributeValue::Choice("EUR".to_string()))
    );
    let err = AttributeValue::coerce("YEN", &currency).unwrap_err();
    assert_eq!(err.to_string(), "expected one of EUR, USD, got 'YEN'");
}

#[test]
fn text_keeps_raw_input() {
    let value = coerce("  Spaces kept ", &ValueType::Text).unwrap();
    assert_eq!(value.as_str(), Some("  Spaces kept "));
    assert_eq!(value.type_name(), "text");
}
