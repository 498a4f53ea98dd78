use super::*;
use crate::api::{FaultPolicy, Options, evaluate, evaluate_with};
use crate::diff::{Body, PathSegment, Reason, Slot, Status};
use serde_json::json;

fn is_odd(v: &Value) -> bool {
    matches!(v, Value::Int(i) if i % 2 != 0)
}

fn is_even(v: &Value) -> bool {
    matches!(v, Value::Int(i) if i % 2 == 0)
}

fn ints(items: &[i64]) -> Value {
    Value::Seq(items.iter().map(|&i| Value::Int(i)).collect())
}

fn key(k: &str) -> PathSegment {
    PathSegment::Key(k.into())
}

// --- Structural ----------------------------------------------------------------

#[test]
fn equals_is_reflexive_on_plain_values() {
    let cases = [
        json!(null),
        json!(true),
        json!(42),
        json!(1.5),
        json!("text"),
        json!([1, [2, 3], {"a": null}]),
        json!({"user": {"name": "Ana", "tags": ["x", "y"]}}),
    ];
    for case in cases {
        let actual = Value::from(case.clone());
        assert!(evaluate(equals(case.clone()), &actual).passed(), "equals({case}) should match itself");
    }

    let set = Value::set([1, 2, 3]);
    assert!(evaluate(equals(Spec::set([3, 1, 2])), &set).passed());
}

#[test]
fn order_sensitivity() {
    assert!(!evaluate(equals(json!([1, 3])), &ints(&[3, 1])).passed());
    assert!(evaluate(in_any_order([1, 3]), &ints(&[3, 1])).passed());
}

#[test]
fn map_default_dispatch_embeds() {
    let actual = Value::from(json!({"name": "Alfredo", "surname": "da Rocha Viana"}));
    assert!(evaluate(json!({"name": "Alfredo"}), &actual).passed());

    let exact = evaluate(equals(json!({"name": "Alfredo"})), &actual);
    assert!(!exact.passed());
    assert_eq!(exact.diff().at(&[key("name")]).map(|n| n.status()), Some(Status::Ok));
    assert_eq!(exact.diff().at(&[key("surname")]).map(|n| n.status()), Some(Status::Unexpected));
}

#[test]
fn embeds_is_weaker_than_equals() {
    let actual = Value::from(json!({"a": 1, "b": 2, "c": 3}));
    let full = json!({"a": 1, "b": 2, "c": 3});
    assert!(evaluate(equals(full.clone()), &actual).passed());

    for subset in [json!({}), json!({"a": 1}), json!({"b": 2, "c": 3}), full] {
        assert!(evaluate(embeds(subset.clone()), &actual).passed(), "embeds({subset}) should match");
    }
}

#[test]
fn embeds_sequence_is_an_ordered_subsequence() {
    assert!(evaluate(embeds(json!([1, 3])), &ints(&[1, 2, 3])).passed());
    assert!(!evaluate(embeds(json!([3, 1])), &ints(&[1, 2, 3])).passed());
}

#[test]
fn embeds_set_accepts_sequences_and_extra_members() {
    assert!(evaluate(embeds(Spec::set([1, 2])), &Value::set([3, 2, 1])).passed());
    assert!(evaluate(embeds(Spec::set([1, 2])), &ints(&[2, 5, 1])).passed());
    assert!(!evaluate(embeds(Spec::set([1, 4])), &Value::set([1, 2])).passed());
}

#[test]
fn shape_mismatch_is_a_leaf() {
    let out = evaluate(equals(json!({"a": 1})), &ints(&[1]));
    assert!(!out.passed());
    assert_eq!(out.diff().reason(), Some(&Reason::WrongShape));

    let out = evaluate(equals(1), &Value::from("1"));
    assert_eq!(out.diff().reason(), Some(&Reason::NotEqual));
}

#[test]
fn nested_raw_maps_embed_unless_overridden() {
    let actual = Value::from(json!({"user": {"name": "Ana", "admin": true}}));
    assert!(evaluate(equals(json!({"user": {"name": "Ana"}})), &actual).passed());
    assert!(!evaluate(match_equals(json!({"user": {"name": "Ana"}})), &actual).passed());
}

// --- Collections ---------------------------------------------------------------

#[test]
fn prefix_ignores_trailing_elements() {
    let out = evaluate(prefix([pred("is_odd", is_odd).into(), Spec::Int(3)]), &ints(&[1, 3, 5]));
    assert!(out.passed());
    match out.diff().body() {
        Body::Seq(children) => assert_eq!(children.len(), 3),
        other => panic!("expected a sequence diff, got {other:?}"),
    }

    let short = evaluate(prefix([1, 3]), &ints(&[1]));
    assert!(!short.passed());
    assert_eq!(short.diff().at(&[PathSegment::Index(1)]).map(|n| n.status()), Some(Status::Missing));
}

#[test]
fn duplicate_predicates_in_set_equals() {
    let odd = pred("is_odd", is_odd);
    let m = set_equals([odd.clone(), odd, pred("is_even", is_even)]);
    let out = evaluate(m, &Value::set([1, 2, 3]));

    assert!(out.passed());
    let paired = |e, a| out.diff().at(&[PathSegment::Slot(Slot::Paired { expected: e, actual: a })]).is_some();
    assert!(paired(0, 0) && paired(1, 2) && paired(2, 1));

    // A native set collapses the two identical predicates into one entry.
    let odd = pred("is_odd", is_odd);
    let collapsed = Spec::set([odd.clone(), odd, pred("is_even", is_even)]);
    assert!(!evaluate(collapsed, &Value::set([1, 2, 3])).passed());
}

#[test]
fn set_embeds_allows_leftover_members_only() {
    assert!(evaluate(set_embeds([pred("is_odd", is_odd)]), &Value::set([2, 3])).passed());
    assert!(!evaluate(set_embeds([pred("is_odd", is_odd)]), &Value::set([2, 4])).passed());
}

#[test]
fn in_any_order_requires_a_sequence() {
    let out = evaluate(in_any_order([1]), &Value::set([1]));
    assert_eq!(out.diff().reason(), Some(&Reason::WrongShape));
}

#[test]
fn seq_of_checks_every_element() {
    assert!(evaluate(seq_of(pred("is_odd", is_odd)), &ints(&[1, 3, 5])).passed());

    let out = evaluate(seq_of(pred("is_odd", is_odd)), &ints(&[1, 2]));
    assert_eq!(out.diff().at(&[PathSegment::Index(1)]).map(|n| n.status()), Some(Status::Mismatch));

    let empty = evaluate(seq_of(1), &ints(&[]));
    assert_eq!(empty.diff().reason(), Some(&Reason::Empty));
}

// --- Leaves --------------------------------------------------------------------

#[test]
fn absent_semantics() {
    let m = || equals(Spec::map([("a", Spec::from(absent())), ("b", Spec::Int(1))]));

    assert!(evaluate(m(), &Value::from(json!({"b": 1}))).passed());

    let out = evaluate(m(), &Value::from(json!({"a": 0, "b": 1})));
    assert!(!out.passed());
    assert_eq!(out.diff().at(&[key("a")]).map(|n| n.status()), Some(Status::Unexpected));
}

#[test]
fn within_delta_is_inclusive() {
    let cases = [(8, true), (12, true), (10, true), (7, false), (13, false)];
    for (actual, expected) in cases {
        let m = within_delta(10, 2.0).unwrap();
        assert_eq!(evaluate(m, &Value::Int(actual)).passed(), expected, "within_delta(10, 2) on {actual}");
    }

    let out = evaluate(within_delta(10, 2.0).unwrap(), &Value::Int(13));
    assert_eq!(out.diff().reason(), Some(&Reason::OutsideDelta { distance: 3.0 }));
    assert!(!evaluate(within_delta(10, 2.0).unwrap(), &Value::Float(f64::NAN)).passed());
    assert!(!evaluate(within_delta(10, 2.0).unwrap(), &Value::from("10")).passed());
}

#[test]
fn within_delta_rejects_bad_arguments() {
    assert!(matches!(within_delta("ten", 1.0), Err(MatchError::NonNumericCenter { found: "text" })));
    assert!(matches!(within_delta(f64::INFINITY, 1.0), Err(MatchError::NonNumericCenter { .. })));
    assert!(matches!(within_delta(1, -0.5), Err(MatchError::InvalidDelta(_))));
    assert!(matches!(within_delta(1, f64::NAN), Err(MatchError::InvalidDelta(_))));
}

#[test]
fn regex_is_unanchored_search() {
    let m = regex("b+").unwrap();
    assert!(evaluate(m.clone(), &Value::from("abbbc")).passed());
    assert_eq!(evaluate(m.clone(), &Value::from("ac")).diff().reason(), Some(&Reason::NoRegexMatch));
    assert_eq!(evaluate(m, &Value::Int(1)).diff().reason(), Some(&Reason::WrongShape));
    assert!(matches!(regex("("), Err(MatchError::Regex(_))));
}

#[test]
fn predicate_panic_is_isolated_per_element() {
    let fragile = pred("fragile", |v: &Value| match v {
        Value::Int(2) => panic!("cannot handle two"),
        Value::Int(i) => *i > 0,
        _ => false,
    });
    let out = evaluate(seq_of(fragile), &ints(&[1, 2, 3]));

    assert!(!out.passed());
    let statuses: Vec<Status> = (0..3).map(|i| out.diff().at(&[PathSegment::Index(i)]).unwrap().status()).collect();
    assert_eq!(statuses, vec![Status::Ok, Status::Mismatch, Status::Ok]);
    assert_eq!(
        out.diff().at(&[PathSegment::Index(1)]).unwrap().reason(),
        Some(&Reason::PredicateFault("cannot handle two".into()))
    );
}

#[test]
fn fallible_predicate_errors_are_faults() {
    let parse = pred_fallible("parses", |v: &Value| v.as_str().ok_or("not text").map(|s| s.parse::<i64>().is_ok()));

    assert!(evaluate(parse.clone(), &Value::from("12")).passed());
    assert_eq!(evaluate(parse.clone(), &Value::from("x")).diff().reason(), Some(&Reason::PredicateFalse));
    assert_eq!(evaluate(parse, &Value::Int(1)).diff().reason(), Some(&Reason::PredicateFault("not text".into())));
}

#[test]
#[should_panic(expected = "predicate parses raised an error")]
fn propagate_policy_raises_fallible_errors() {
    let parse = pred_fallible("parses", |_: &Value| Err::<bool, _>("nope"));
    let options = Options { fault_policy: FaultPolicy::Propagate };
    evaluate_with(parse, &Value::Null, &options);
}

#[test]
fn predicate_debug_shows_its_name() {
    assert_eq!(format!("{:?}", pred("is_odd", is_odd)), "Predicate(\"is_odd\")");
}

// --- Combinators ---------------------------------------------------------------

#[test]
fn match_with_overrides_apply_to_descendants_only() {
    let actual = Value::from(json!({"outer": {"inner": {"x": 1, "y": 2}}}));
    let table = OverrideTable::new().on(ShapeMask::MAP, equals);

    let scoped = json!({"outer": {"inner": {"x": 1}}});
    assert!(!evaluate(match_with(table.clone(), scoped.clone()), &actual).passed());

    let unscoped = Spec::map([("outer", Spec::map([("inner", Spec::from(json!({"x": 1})))]))]);
    assert!(evaluate(unscoped, &actual).passed());

    let local = Spec::map([("outer", match_with(table, json!({"inner": {"x": 1, "y": 2}})))]);
    assert!(evaluate(local, &Value::from(json!({"outer": {"inner": {"x": 1, "y": 2}}, "extra": 0}))).passed());
}

#[test]
fn innermost_override_wins() {
    let approx = OverrideTable::new().on(ShapeMask::NUMBER, |s: Spec| within_delta(s, 0.5).unwrap());
    let exact = OverrideTable::new().on(ShapeMask::NUMBER, equals);

    let spec = match_with(approx, Spec::map([("a", Spec::Int(1)), ("b", Spec::from(match_with(exact, 1)))]));
    let out = evaluate(spec, &Value::from(json!({"a": 1.3, "b": 1.3})));

    assert!(!out.passed());
    assert_eq!(out.diff().at(&[key("a")]).map(|n| n.status()), Some(Status::Ok));
    assert_eq!(out.diff().at(&[key("b")]).and_then(|n| n.reason()), Some(&Reason::NotEqual));
}

#[test]
fn match_roughly_tolerates_every_number() {
    let actual = Value::from(json!({"x": 1.01, "ys": [2.0, 2.99]}));
    assert!(evaluate(match_roughly(0.05, json!({"x": 1, "ys": [2, 3]})).unwrap(), &actual).passed());
    assert!(!evaluate(json!({"x": 1, "ys": [2, 3]}), &actual).passed());
    assert!(match_roughly(-1.0, json!(1)).is_err());
}

#[test]
fn mismatch_inverts() {
    assert!(evaluate(mismatch(1), &Value::Int(2)).passed());
    let out = evaluate(mismatch(1), &Value::Int(1));
    assert_eq!(out.diff().reason(), Some(&Reason::Negated));
}

#[test]
fn mismatch_keeps_predicate_faults_as_failures() {
    let broken = pred_fallible("broken", |_: &Value| Err::<bool, _>("no answer"));
    let out = evaluate(mismatch(broken), &Value::Int(1));

    assert!(!out.passed());
    assert_eq!(out.diff().reason(), Some(&Reason::PredicateFault("no answer".into())));

    let nested = evaluate(mismatch(json!({"a": 2})), &Value::from(json!({"a": 1})));
    assert!(nested.passed());
}

#[test]
fn any_of_and_all_of() {
    let odd = || pred("is_odd", is_odd);
    assert!(evaluate(any_of([Spec::Int(4), odd().into()]), &Value::Int(3)).passed());
    assert_eq!(evaluate(any_of([4, 6]), &Value::Int(3)).diff().reason(), Some(&Reason::NoAlternative));

    assert!(evaluate(all_of([odd(), within_delta(0, 5.0).unwrap()]), &Value::Int(3)).passed());
    let out = evaluate(all_of([odd(), within_delta(0, 1.0).unwrap()]), &Value::Int(3));
    assert_eq!(out.diff().reason(), Some(&Reason::OutsideDelta { distance: 3.0 }));
}

#[test]
fn evaluation_is_deterministic() {
    let odd = pred("is_odd", is_odd);
    let m = set_equals([Spec::from(odd.clone()), Spec::from(odd), Spec::Int(9)]);
    let actual = Value::set([1, 3, 5, 7]);

    let first = evaluate(m.clone(), &actual);
    for _ in 0..5 {
        assert_eq!(evaluate(m.clone(), &actual), first);
    }
}

#[test]
fn one_matcher_is_shared_across_threads() {
    let odd = pred("is_odd", is_odd);
    let m = set_equals([Spec::from(odd.clone()), Spec::from(odd), Spec::Int(4)]);
    let actual = Value::set([1, 3, 4]);
    let expected = evaluate(m.clone(), &actual);

    let outcomes: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| evaluate(m.clone(), &actual))).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(expected.passed());
    for outcome in outcomes {
        assert_eq!(outcome, expected);
    }
}
