use std::time::{Duration, Instant};

use smart_ios::driver::query::Strategy;
use smart_ios::{Action, ElementId, ElementType, Rect, SmartError};

use crate::common::{StubElement, automator, ms};

mod common;

// ============================================================================
// Strategy escalation
// ============================================================================

#[test]
fn first_listed_type_wins() {
    let mut auto = automator(vec![
        StubElement::new("txt", ElementType::StaticText).label("Continue"),
        StubElement::new("btn", ElementType::Button).label("Continue"),
    ]);

    let found = auto.find_by_text("Continue", None, ms(200)).unwrap();
    assert_eq!(found, ElementId::new("btn"));

    let found = auto
        .find_by_text("Continue", Some(&[ElementType::StaticText, ElementType::Button]), ms(200))
        .unwrap();
    assert_eq!(found, ElementId::new("txt"));
}

#[test]
fn match_is_case_insensitive_containment() {
    let mut auto = automator(vec![StubElement::new("login", ElementType::Button).name("LOG IN NOW")]);
    assert_eq!(auto.find_by_text("log in", None, ms(200)).unwrap(), ElementId::new("login"));
}

#[test]
fn class_chain_finds_types_outside_the_filter() {
    let mut auto = automator(vec![StubElement::new("avatar", ElementType::Image).label("Profile photo")]);

    let found = auto.find_by_text("Profile", None, ms(200)).unwrap();
    assert_eq!(found, ElementId::new("avatar"));
    assert!(auto.driver().queries_with(Strategy::ClassChain) >= 1);
}

#[test]
fn class_chain_used_when_predicates_fail() {
    let mut auto = automator(vec![StubElement::new("settings", ElementType::StaticText).label("Settings")]);
    auto.driver_mut().fail_predicates = true;

    assert_eq!(auto.find_by_text("Settings", None, ms(200)).unwrap(), ElementId::new("settings"));
}

#[test]
fn fuzzy_scan_tolerates_typos() {
    let mut auto = automator(vec![StubElement::new("next", ElementType::StaticText).label("Continu")]);
    assert_eq!(auto.find_by_text("Continue", None, ms(200)).unwrap(), ElementId::new("next"));
}

#[test]
fn fuzzy_scan_respects_threshold() {
    let mut auto = automator(vec![StubElement::new("logout", ElementType::Button).label("Logout")]);

    let err = auto.find_by_text("Settings", None, ms(50)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.query(), Some("Settings"));
    assert!(
        err.to_string().contains("could not locate element with text like 'Settings'"),
        "message: {}",
        err
    );
}

// ============================================================================
// Retry and deadline
// ============================================================================

#[test]
fn retries_until_element_appears() {
    let mut auto = automator(vec![StubElement::new("late", ElementType::Button).label("Done").appears_after(20)]);
    assert_eq!(auto.find_by_text("Done", None, Duration::from_secs(5)).unwrap(), ElementId::new("late"));
}

#[test]
fn zero_timeout_still_makes_one_attempt() {
    let mut auto = automator(vec![StubElement::new("ok", ElementType::Button).label("OK")]);
    assert_eq!(auto.find_by_text("OK", None, Duration::ZERO).unwrap(), ElementId::new("ok"));
}

#[test]
fn gives_up_shortly_after_timeout() {
    let mut auto = automator(vec![]);
    let started = Instant::now();
    let err = auto.find_by_text("Missing", None, ms(100)).unwrap_err();
    let elapsed = started.elapsed();

    assert!(err.is_not_found());
    assert!(elapsed >= ms(100), "returned early: {:?}", elapsed);
    assert!(elapsed < ms(1000), "overran: {:?}", elapsed);
}

#[test]
fn not_found_carries_last_driver_error() {
    let mut auto = automator(vec![StubElement::new("ok", ElementType::Button).label("OK")]);
    auto.driver_mut().fail_all_queries = true;

    match auto.find_by_text("OK", None, ms(30)).unwrap_err() {
        SmartError::NotFound { action, last_error, .. } => {
            assert_eq!(action, Action::Locate);
            assert!(last_error.unwrap_or_default().contains("session busy"));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn wait_for_text_returns_element() {
    let mut auto = automator(vec![StubElement::new("banner", ElementType::StaticText).label("Saved").appears_after(10)]);
    assert_eq!(auto.wait_for_text("saved", Duration::from_secs(5)).unwrap(), ElementId::new("banner"));
}

// ============================================================================
// Locatable elements and ranking
// ============================================================================

#[test]
fn find_locatable_skips_elements_without_rect() {
    let mut auto = automator(vec![
        StubElement::new("ghost", ElementType::Button).label("Next"),
        StubElement::new("real", ElementType::Button).label("Next").at(10.0, 20.0, 100.0, 44.0),
    ]);

    assert_eq!(auto.find_by_text("Next", None, ms(100)).unwrap(), ElementId::new("ghost"));

    let (element, rect) = auto.find_locatable("Next", None, ms(100)).unwrap();
    assert_eq!(element, ElementId::new("real"));
    assert_eq!(rect, Rect::new(10.0, 20.0, 100.0, 44.0));
}

#[test]
fn find_locatable_fails_when_nothing_is_measurable() {
    let mut auto = automator(vec![StubElement::new("ghost", ElementType::Button).label("Next")]);
    assert!(auto.find_locatable("Next", None, ms(30)).unwrap_err().is_not_found());
}

#[test]
fn ranking_is_stable_and_thresholded() {
    let mut auto = automator(vec![
        StubElement::new("draft", ElementType::Button).label("Save draft"),
        StubElement::new("save", ElementType::Button).label("Save"),
        StubElement::new("cancel", ElementType::Button).label("Cancel"),
    ]);
    let ids = ["draft", "save", "cancel"].iter().map(|id| ElementId::new(*id)).collect();

    let ranked = auto.rank_candidates("Save", ids);
    let order: Vec<&str> = ranked.iter().map(|r| r.element.as_str()).collect();
    assert_eq!(order, vec!["draft", "save"]);
    assert!(ranked.iter().all(|r| r.score == 1.0));
    assert_eq!(ranked[0].fingerprint, "Save draft");
}

#[test]
fn ranking_puts_exact_matches_before_fuzzy_ones() {
    let mut auto = automator(vec![
        StubElement::new("typo", ElementType::Button).label("Continu"),
        StubElement::new("exact", ElementType::Button).label("Continue to payment"),
    ]);
    let ids = vec![ElementId::new("typo"), ElementId::new("exact")];

    let ranked = auto.rank_candidates("Continue", ids);
    assert_eq!(ranked[0].element, ElementId::new("exact"));
    assert_eq!(ranked[1].element, ElementId::new("typo"));
}
