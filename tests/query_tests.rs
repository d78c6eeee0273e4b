use smart_ios::ElementType;
use smart_ios::driver::query::{Attribute, ElementQuery, Locator, Strategy, TextMatch, escape_literal};

// ============================================================================
// Predicate dialect
// ============================================================================

#[test]
fn typed_predicate_checks_every_attribute() {
    let locator = Locator::predicate(
        ElementQuery::of_type(ElementType::Button).with_text(TextMatch::contains("Sign In", &Attribute::ALL)),
    );
    assert_eq!(
        locator.expression(),
        "type == 'XCUIElementTypeButton' AND (name CONTAINS[c] 'Sign In' OR label CONTAINS[c] 'Sign In' OR value CONTAINS[c] 'Sign In')"
    );
}

#[test]
fn caption_predicate_skips_value() {
    let locator = Locator::predicate(
        ElementQuery::of_type(ElementType::Button).with_text(TextMatch::contains("OK", &Attribute::CAPTION)),
    );
    assert_eq!(
        locator.expression(),
        "type == 'XCUIElementTypeButton' AND (name CONTAINS[c] 'OK' OR label CONTAINS[c] 'OK')"
    );
}

#[test]
fn quotes_and_backslashes_are_escaped() {
    let locator = Locator::predicate(ElementQuery::any().with_text(TextMatch::contains(r"Don't \ stop", &[Attribute::Label])));
    assert_eq!(locator.expression(), r"(label CONTAINS[c] 'Don\'t \\ stop')");
    assert_eq!(escape_literal("it's"), r"it\'s");
}

#[test]
fn empty_predicate_matches_everything() {
    assert_eq!(Locator::predicate(ElementQuery::any()).expression(), "TRUEPREDICATE");
}

// ============================================================================
// Class-chain dialect
// ============================================================================

#[test]
fn untyped_class_chain_with_text() {
    let locator = Locator::class_chain(ElementQuery::any().with_text(TextMatch::contains("Settings", &Attribute::ALL)));
    assert_eq!(
        locator.expression(),
        "**/*[`name CONTAINS[c] 'Settings' OR label CONTAINS[c] 'Settings' OR value CONTAINS[c] 'Settings'`]"
    );
}

#[test]
fn class_chain_with_ancestor() {
    let locator = Locator::class_chain(ElementQuery::of_type(ElementType::Button).within(ElementType::TabBar));
    assert_eq!(locator.expression(), "**/XCUIElementTypeTabBar/**/XCUIElementTypeButton");
}

#[test]
fn class_chain_with_index() {
    let locator = Locator::class_chain(ElementQuery::of_type(ElementType::Cell).nth(1));
    assert_eq!(locator.expression(), "**/XCUIElementTypeCell[1]");
}

#[test]
fn any_of_expands_every_needle() {
    let text = TextMatch::any_of(&["pencil", "edit"], &[Attribute::Name, Attribute::Label]);
    let locator = Locator::class_chain(ElementQuery::any().with_text(text));
    assert_eq!(
        locator.expression(),
        "**/*[`name CONTAINS[c] 'pencil' OR label CONTAINS[c] 'pencil' OR name CONTAINS[c] 'edit' OR label CONTAINS[c] 'edit'`]"
    );
}

#[test]
fn strategies_map_to_w3c_using_values() {
    assert_eq!(Strategy::Predicate.using(), "-ios predicate string");
    assert_eq!(Strategy::ClassChain.using(), "-ios class chain");
}
