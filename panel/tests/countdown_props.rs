//! Property tests for countdown reconciliation and action state.

use incinerator_panel::{ActionState, CountdownReconciler, RESYNC_TOLERANCE_MS};
use incinerator_types::Timestamp;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Wait(u64),
    Reading(Option<u64>),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u64..5_000).prop_map(Step::Wait),
        proptest::option::of(0u64..7_200).prop_map(Step::Reading),
    ]
}

proptest! {
    #[test]
    fn display_only_increases_on_resync(steps in proptest::collection::vec(step(), 1..60)) {
        let mut countdown = CountdownReconciler::new();
        let mut now = 0u64;
        let mut shown = countdown.displayed();

        for step in steps {
            match step {
                Step::Wait(ms) => {
                    now += ms;
                    let next = countdown.tick(Timestamp::from_millis(now));
                    prop_assert!(next <= shown, "tick raised {shown} to {next}");
                    shown = next;
                }
                Step::Reading(reading) => {
                    let before = countdown.target();
                    let resynced = countdown.observe(reading, Timestamp::from_millis(now));
                    let next = countdown.tick(Timestamp::from_millis(now));
                    if resynced {
                        if let (Some(old), Some(new)) = (before, countdown.target()) {
                            prop_assert!(new.millis_since(old).abs() > RESYNC_TOLERANCE_MS);
                        }
                    } else {
                        prop_assert!(next <= shown, "reading raised {shown} to {next}");
                    }
                    shown = next;
                }
            }
        }
    }

    #[test]
    fn reaches_zero_by_target(reading in 0u64..100_000, start in 0u64..1_000_000) {
        let mut countdown = CountdownReconciler::new();
        countdown.observe(Some(reading), Timestamp::from_millis(start));
        let target = start + reading * 1_000;
        prop_assert_eq!(countdown.tick(Timestamp::from_millis(target)), 0);
        prop_assert_eq!(countdown.tick(Timestamp::from_millis(target + 1_000)), 0);
        if reading > 0 {
            prop_assert!(countdown.tick(Timestamp::from_millis(target - 1_000)) >= 1);
        }
    }

    #[test]
    fn ready_iff_eligible_at_zero(
        eligible in proptest::option::of(any::<bool>()),
        secs in 0u64..10_000,
    ) {
        let state = ActionState::derive(eligible, secs, false);
        prop_assert_eq!(state == ActionState::Ready, eligible == Some(true) && secs == 0);
        prop_assert_eq!(
            matches!(state, ActionState::CoolingDown { .. }),
            secs > 0
        );
    }
}
