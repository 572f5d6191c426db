//! Full pipeline tests over the standard vocabulary.

use orgshell_foundation::AttributeValue;
use orgshell_parser::{Operator, Parser, ParserConfig, TokenClass, stdlib};

fn parser() -> Parser {
    stdlib::parser().unwrap()
}

fn has(list: &[String], text: &str) -> bool {
    list.iter().any(|s| s == text)
}

// =============================================================================
// Recognition
// =============================================================================

#[test]
fn aliases_and_abbreviations_resolve_exactly() {
    let p = parser();
    let result = p.parse("new firm ACME cur=usd");
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(p.word_ids(&result), ["create", "company", "currency"]);
    assert!(result.tokens.iter().filter(|t| t.is_word()).all(|t| t.confidence == 100.0));
    assert_eq!(
        result.attribute_values["cur"],
        AttributeValue::Choice("USD".to_string())
    );
}

#[test]
fn typos_are_corrected_and_reported() {
    let p = parser();
    let result = p.parse("creat compny ACME curency=eur");
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(p.word_ids(&result), ["create", "company", "currency"]);
    assert_eq!(
        result.attribute_values["curency"],
        AttributeValue::Choice("EUR".to_string())
    );
    assert!(has(&result.suggestions, "Interpreted 'creat' as 'create'"));
    assert!(has(&result.suggestions, "Interpreted 'compny' as 'company'"));
}

#[test]
fn near_misses_become_suggestions() {
    let result = parser().parse("shw company");
    assert!(result.is_valid);
    assert!(has(&result.suggestions, "Did you mean 'show' instead of 'shw'?"));
    assert!(has(
        &result.suggestions,
        "Consider adding an action word (e.g., 'create', 'add', 'update', 'show', 'delete')"
    ));
}

#[test]
fn threshold_is_configurable() {
    let p = parser().with_config(ParserConfig::default().with_fuzzy_threshold(95.0));
    let result = p.parse("create compny");
    assert_eq!(p.word_ids(&result), ["create"]);
    assert_eq!(result.tokens[1].class, TokenClass::Unknown);
    assert!(has(&result.suggestions, "Did you mean 'company' instead of 'compny'?"));
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn quoted_values_keep_spaces() {
    let p = parser();
    let result = p.parse(r#"add brand vision="Reach orbit cheaply" name='Acme Rockets'"#);
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(
        result.attribute_values["vision"],
        AttributeValue::Text("Reach orbit cheaply".to_string())
    );
    assert_eq!(
        result.attribute_values["name"],
        AttributeValue::Text("Acme Rockets".to_string())
    );
}

#[test]
fn typed_attributes_are_coerced() {
    let result = parser().parse("cc ACME closing=dec incorporation=2019/06/01 unit=millions");
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(result.attribute_values["closing"], AttributeValue::Month(12));
    assert_eq!(result.attribute_values["incorporation"].to_string(), "2019-06-01");
    assert_eq!(
        result.attribute_values["unit"],
        AttributeValue::Choice("MILLIONS".to_string())
    );
}

#[test]
fn bad_values_are_warnings() {
    let p = parser();
    assert!(p.parse("create company ACME").is_valid);

    for (input, key, raw) in [
        ("create company ACME currency=YEN", "currency", "YEN"),
        ("create company ACME closing=13", "closing", "13"),
        ("create company ACME incorporation=2024-02-30", "incorporation", "2024-02-30"),
    ] {
        let result = p.parse(input);
        assert!(result.is_valid, "{input}: {:?}", result.errors);
        assert!(result.errors.is_empty());
        assert_eq!(result.attribute_values[key], AttributeValue::Text(raw.to_string()));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with(&format!("Invalid value for '{key}'")));
        assert!(result.selected_command.is_some());
    }

    let result = p.parse("create company ACME currency=YEN");
    assert_eq!(
        result.warnings,
        ["Invalid value for 'currency': expected one of EUR, USD, GBP, CHF, CAD, got 'YEN'"]
    );
}

#[test]
fn attribute_keys_are_kept_as_typed() {
    let p = parser();
    let result = p.parse("create company ACME curr=EUR currncy=USD");
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(p.word_ids(&result), ["create", "company", "currency", "currency"]);

    let keys: Vec<&str> = result.attribute_values.keys().map(String::as_str).collect();
    assert_eq!(keys, ["curr", "currncy"]);
    assert_eq!(result.attribute_values["curr"], AttributeValue::Choice("EUR".to_string()));
    assert_eq!(
        result.attribute_values["currncy"],
        AttributeValue::Choice("USD".to_string())
    );
}

#[test]
fn unknown_keys_keep_their_values() {
    let result = parser().parse("show offering revenue>=100");
    assert_eq!(
        result.attribute_values["revenue"],
        AttributeValue::Text("100".to_string())
    );
    let value = result.tokens.iter().find(|t| t.text == "100").unwrap();
    assert_eq!(value.operator, Some(Operator::Ge));
}

#[test]
fn fallback_entity_names_the_company() {
    let p = parser();
    let result = p.parse("show ACME-CORP");
    assert_eq!(result.entity_values["company_name"], "ACME-CORP");
    assert_eq!(p.selected(&result).map(|c| c.id()), Some("show_company"));
    assert!(has(&result.suggestions, "Missing required words: company"));
}

// =============================================================================
// Grammar and suggestions
// =============================================================================

#[test]
fn modifiers_sit_between_action_and_entity() {
    let p = parser();
    let result = p.parse("create holding company ACME");
    assert!(result.is_valid);
    assert_eq!(p.word_ids(&result), ["create", "holding", "company"]);

    let result = p.parse("create company holding ACME");
    assert!(!result.is_valid);
    assert!(result.errors[0].contains("'holding' (modifier)"));
}

#[test]
fn holding_company_names_are_values() {
    let p = parser();
    let result = p.parse("create holding company HoldCo --entity=SA");
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(p.word_ids(&result), ["create", "holding", "company", "entity"]);
    assert_eq!(result.entity_values["company_name"], "HoldCo");
    assert_eq!(result.attribute_values["entity"], AttributeValue::Choice("SA".to_string()));

    let result = p.parse("create operating company OpCo Inc");
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(p.word_ids(&result), ["create", "operating", "company"]);
}

#[test]
fn attributes_cannot_lead() {
    let result = parser().parse("currency=EUR create company");
    assert!(!result.is_valid);
    assert!(result.errors[0].starts_with("Attribute 'currency' cannot come before"));
    assert!(result.matching_commands.is_empty());
}

#[test]
fn attribute_hints_prefer_enumerated_attributes() {
    let result = parser().parse("create company ACME");
    assert!(has(
        &result.suggestions,
        "Consider adding attributes like entity=SA currency=EUR"
    ));
}

#[test]
fn shortcut_offsets_refer_to_expanded_text() {
    let result = parser().parse("sb name=Acme");
    assert_eq!(result.expanded, "show brand name=Acme");
    for token in &result.tokens {
        assert!(result.expanded[token.position..].starts_with(&token.text));
    }
}

#[test]
fn empty_input_is_reported() {
    let result = parser().parse("   ");
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        ["Command cannot be empty (at least 1 keyword required)"]
    );
}

#[test]
fn parser_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Parser>();

    let p = std::sync::Arc::new(parser());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = std::sync::Arc::clone(&p);
            std::thread::spawn(move || p.parse("cc ACME currency=EUR"))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
