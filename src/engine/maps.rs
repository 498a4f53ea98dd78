//! Key-by-key map matching.
//!
//! ```text
//! expected key present in actual   -> child outcome
//! expected key missing, absent     -> no node (satisfied)
//! expected key missing, otherwise  -> Missing
//! actual key not expected          -> Unexpected (Extras::Reject) | Ok (Extras::Ignore)
//! ```

use crate::classify::Scope;
use crate::diff::{DiffNode, Outcome};
use crate::spec::Spec;
use crate::value::Value;
use std::collections::BTreeMap;

/// How keys present in the actual map but not in the expectation are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extras {
    /// Equals: every extra key is a failure.
    Reject,
    /// Embeds: extra keys are kept in the diff as passing leaves.
    Ignore,
}

pub fn match_map(
    expected: &BTreeMap<String, Spec>,
    actual: &BTreeMap<String, Value>,
    extras: Extras,
    scope: &Scope<'_>,
) -> Outcome {
    let mut children = BTreeMap::new();

    for (key, spec) in expected {
        let matcher = scope.resolve(spec);
        match actual.get(key) {
            Some(value) => {
                children.insert(key.clone(), matcher.attempt_match(value, scope).into_diff());
            }
            None if matcher.accepts_missing() => {}
            None => {
                children.insert(key.clone(), DiffNode::missing(spec.clone()));
            }
        }
    }

    for (key, value) in actual.iter().filter(|(key, _)| !expected.contains_key(*key)) {
        let node = match extras {
            Extras::Reject => DiffNode::unexpected(value),
            Extras::Ignore => DiffNode::ok(value),
        };
        children.insert(key.clone(), node);
    }

    Outcome::from(DiffNode::map(children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{PathSegment, Status};
    use crate::matchers::{absent, all_of, any_of, embeds, equals};
    use serde_json::json;

    fn maps(expected: serde_json::Value, actual: serde_json::Value) -> (BTreeMap<String, Spec>, BTreeMap<String, Value>) {
        match (Spec::from(expected), Value::from(actual)) {
            (Spec::Map(e), Value::Map(a)) => (e, a),
            _ => panic!("fixtures must be maps"),
        }
    }

    fn status_at(outcome: &Outcome, key: &str) -> Option<Status> {
        outcome.diff().at(&[PathSegment::Key(key.into())]).map(|n| n.status())
    }

    #[test]
    fn reject_flags_extra_and_missing_keys() {
        let (e, a) = maps(json!({"a": 1, "b": 2}), json!({"a": 1, "c": 3}));
        let out = match_map(&e, &a, Extras::Reject, &Scope::default());

        assert!(!out.passed());
        assert_eq!(status_at(&out, "a"), Some(Status::Ok));
        assert_eq!(status_at(&out, "b"), Some(Status::Missing));
        assert_eq!(status_at(&out, "c"), Some(Status::Unexpected));
    }

    #[test]
    fn ignore_keeps_extra_keys_as_passing() {
        let (e, a) = maps(json!({"a": 1}), json!({"a": 1, "c": 3}));
        let out = match_map(&e, &a, Extras::Ignore, &Scope::default());

        assert!(out.passed());
        assert_eq!(status_at(&out, "c"), Some(Status::Ok));
        assert_eq!(out.diff().at(&[PathSegment::Key("c".into())]).and_then(|n| n.actual()), Some(&Value::Int(3)));
    }

    #[test]
    fn satisfied_absent_leaves_no_node() {
        let e = BTreeMap::from([("gone".to_string(), Spec::from(absent()))]);
        let a = BTreeMap::new();
        let out = match_map(&e, &a, Extras::Reject, &Scope::default());

        assert!(out.passed());
        assert_eq!(status_at(&out, "gone"), None);
    }

    #[test]
    fn every_key_is_evaluated_after_a_failure() {
        let (e, a) = maps(json!({"a": 0, "b": 2, "c": 3}), json!({"a": 1, "b": 2, "c": 4}));
        let out = match_map(&e, &a, Extras::Reject, &Scope::default());

        assert_eq!(status_at(&out, "a"), Some(Status::Mismatch));
        assert_eq!(status_at(&out, "b"), Some(Status::Ok));
        assert_eq!(status_at(&out, "c"), Some(Status::Mismatch));
    }

    #[test]
    fn absent_wrapped_in_other_matchers_still_accepts_a_missing_key() {
        let cases: Vec<(&str, Spec, bool)> = vec![
            ("any_of with absent", any_of([Spec::from(absent()), Spec::Int(1)]).into(), true),
            ("any_of without absent", any_of([1, 2]).into(), false),
            ("all_of of absents", all_of([absent(), absent()]).into(), true),
            ("all_of mixing absent", all_of([Spec::from(absent()), Spec::Int(1)]).into(), false),
            ("equals(absent)", equals(absent()).into(), true),
            ("embeds(absent)", embeds(absent()).into(), true),
            ("equals(raw)", equals(1).into(), false),
        ];
        for (name, spec, passes) in cases {
            let e = BTreeMap::from([("gone".to_string(), spec)]);
            let out = match_map(&e, &BTreeMap::new(), Extras::Reject, &Scope::default());
            assert_eq!(out.passed(), passes, "{name}");
            let expected_status = if passes { None } else { Some(Status::Missing) };
            assert_eq!(status_at(&out, "gone"), expected_status, "{name}");
        }
    }

    #[test]
    fn any_of_with_absent_still_checks_a_present_key() {
        let e = BTreeMap::from([("a".to_string(), Spec::from(any_of([Spec::from(absent()), Spec::Int(1)])))]);
        let ok = BTreeMap::from([("a".to_string(), Value::Int(1))]);
        let bad = BTreeMap::from([("a".to_string(), Value::Int(2))]);

        assert!(match_map(&e, &ok, Extras::Reject, &Scope::default()).passed());
        let out = match_map(&e, &bad, Extras::Reject, &Scope::default());
        assert_eq!(status_at(&out, "a"), Some(Status::Mismatch));
    }
}
