//! Property tests for the single-subscription invariant.

mod common;

use common::{harness, Call};
use proptest::prelude::*;
use tag_timeline::LifecycleState;

#[derive(Clone, Debug)]
enum Op {
    Activate(&'static str),
    Change(&'static str),
    Deactivate,
}

fn scope_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("cats"), Just("dogs"), Just("birds")]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        scope_name().prop_map(Op::Activate),
        scope_name().prop_map(Op::Change),
        Just(Op::Deactivate),
    ]
}

proptest! {
    #[test]
    fn never_two_open_handles(ops in prop::collection::vec(op(), 1..40)) {
        let (log, mut controller) = harness();

        for op in ops {
            let _ = match op {
                Op::Activate(scope) => controller.activate(scope),
                Op::Change(scope) => controller.on_scope_change(scope),
                Op::Deactivate => {
                    controller.deactivate();
                    Ok(())
                }
            };

            prop_assert!(log.open_handles() <= 1);
            prop_assert_eq!(log.open_handles() == 1, controller.is_subscribed());
        }

        prop_assert!(log.max_open() <= 1);

        controller.deactivate();
        prop_assert_eq!(log.open_handles(), 0);
        prop_assert_eq!(controller.state(), LifecycleState::Inactive);
    }

    #[test]
    fn every_connect_uses_current_scope_topic(ops in prop::collection::vec(op(), 1..40)) {
        let (log, mut controller) = harness();

        for op in ops {
            let before = log.calls().len();
            let _ = match op {
                Op::Activate(scope) => controller.activate(scope),
                Op::Change(scope) => controller.on_scope_change(scope),
                Op::Deactivate => {
                    controller.deactivate();
                    Ok(())
                }
            };

            let new_calls = log.calls().split_off(before);
            for call in new_calls {
                if let Call::Connect { topic, .. } = call {
                    let scope = controller.current_scope().map(|s| s.as_str().to_string());
                    prop_assert_eq!(Some(topic), scope.map(|s| format!("hashtag&tag={}", s)));
                }
            }
        }
    }

    #[test]
    fn repeated_same_scope_change_is_silent(scope in scope_name(), repeats in 1usize..10) {
        let (log, mut controller) = harness();
        controller.activate(scope).unwrap();
        let before = log.calls();

        for _ in 0..repeats {
            controller.on_scope_change(scope).unwrap();
        }

        prop_assert_eq!(log.calls(), before);
    }
}
