use proptest::prelude::*;
use scopefn::{scope, ScopeOption};
use std::cell::{Cell, RefCell};

proptest! {
    #[test]
    fn map_applies_once(v in any::<i64>()) {
        let calls = Cell::new(0);
        let out = scope(v).map(|it| {
            calls.set(calls.get() + 1);
            it.wrapping_mul(3)
        });
        prop_assert_eq!(out.into_inner(), v.wrapping_mul(3));
        prop_assert_eq!(calls.get(), 1);
    }

    #[test]
    fn also_sees_value_once(v in ".*") {
        let seen = RefCell::new(Vec::new());
        let out = scope(v.clone()).also(|it| seen.borrow_mut().push(it.clone()));
        prop_assert_eq!(out.into_inner(), v.clone());
        prop_assert_eq!(seen.into_inner(), vec![v]);
    }

    #[test]
    fn take_if_and_take_unless_are_complements(v in any::<i32>(), bound in any::<i32>()) {
        let predicate = |it: &i32| *it > bound;
        let kept = scope(v).take_if(predicate);
        let unless = scope(v).take_unless(predicate);
        prop_assert_eq!(kept.is_some(), predicate(&v));
        prop_assert_ne!(kept.is_some(), unless.is_some());
        prop_assert_eq!(kept.or(unless).into_inner(), Some(v));
    }

    #[test]
    fn skip_nullish_only_drops_none(v in proptest::option::of(any::<u16>())) {
        prop_assert_eq!(scope(v).skip_nullish().into_inner(), v);
    }

    #[test]
    fn vec_buffer_survives_chain(v in prop::collection::vec(any::<u8>(), 1..64)) {
        let ptr = v.as_ptr();
        let out = scope(v)
            .also(|_| {})
            .take_if(|it| !it.is_empty())
            .into_inner();
        prop_assert_eq!(out.map(|it| it.as_ptr()), Some(ptr));
    }
}
