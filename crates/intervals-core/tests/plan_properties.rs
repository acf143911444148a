//! Property tests for plan derivation and the run state machine.

use intervals_core::{IntervalSettings, Phase, Plan, Session, Tick};
use proptest::prelude::*;

fn settings_strategy() -> impl Strategy<Value = IntervalSettings> {
    (1u32..=300, 0u32..=300, 0u32..=10).prop_map(|(w, r, n)| IntervalSettings::new(w, r, n))
}

#[test]
fn minimal_settings_give_one_second_pair() {
    let plan = Plan::from_settings(&IntervalSettings::new(1, 1, 0));
    assert_eq!(plan.steps(), &[1, 1]);
}

#[test]
fn default_settings_give_ten_alternating_steps() {
    let plan = Plan::from_settings(&IntervalSettings::new(60, 5, 4));
    assert_eq!(plan.steps(), &[60, 5, 60, 5, 60, 5, 60, 5, 60, 5]);
}

proptest! {
    #[test]
    fn plan_length_and_alternation(settings in settings_strategy()) {
        let plan = Plan::from_settings(&settings);
        prop_assert_eq!(plan.len(), 2 * (settings.repeat as usize + 1));
        for (i, (phase, secs)) in plan.iter().enumerate() {
            if i % 2 == 0 {
                prop_assert_eq!(phase, Phase::Work);
                prop_assert_eq!(secs, settings.work);
            } else {
                prop_assert_eq!(phase, Phase::Rest);
                prop_assert_eq!(secs, settings.rest);
            }
        }
    }

    #[test]
    fn no_repeat_is_one_pair(work in 1u32..=300, rest in 0u32..=300) {
        let plan = Plan::from_settings(&IntervalSettings::new(work, rest, 0));
        prop_assert_eq!(plan.steps(), &[work, rest][..]);
    }

    #[test]
    fn derivation_is_idempotent(settings in settings_strategy()) {
        prop_assert_eq!(Plan::from_settings(&settings), Plan::from_settings(&settings));
    }

    #[test]
    fn each_entry_takes_duration_plus_one_ticks(
        work in 1u32..=20,
        rest in 0u32..=20,
        repeat in 0u32..=3,
    ) {
        let settings = IntervalSettings::new(work, rest, repeat);
        let plan = Plan::from_settings(&settings);
        let mut session = Session::new(settings);

        for index in 0..plan.len() {
            let d = plan.get(index).unwrap();
            prop_assert_eq!(session.plan_index(), index);
            prop_assert_eq!(session.remaining_secs(), d);
            for _ in 0..d {
                let tick = session.tick();
                prop_assert!(
                    matches!(tick, Tick::Running { advanced: false, .. }),
                    "expected countdown tick, got {:?}",
                    tick
                );
            }
            let last = session.tick();
            if index + 1 < plan.len() {
                prop_assert!(
                    matches!(last, Tick::Running { advanced: true, .. }),
                    "expected advancing tick, got {:?}",
                    last
                );
                prop_assert_eq!(session.plan_index(), index + 1);
                prop_assert_eq!(session.remaining_secs(), plan.get(index + 1).unwrap());
            } else {
                prop_assert_eq!(last, Tick::Completed);
            }
        }
    }

    #[test]
    fn completion_fires_exactly_once(settings in settings_strategy().prop_map(|s| {
        IntervalSettings::new(s.work.min(10), s.rest.min(10), s.repeat)
    })) {
        let mut session = Session::new(settings);
        let mut completions = 0;
        let budget = session.plan().total_seconds() + session.plan().len() as u64 + 5;
        for _ in 0..budget {
            if session.tick() == Tick::Completed {
                completions += 1;
                prop_assert_eq!(session.plan_index(), session.plan().len());
            }
        }
        prop_assert_eq!(completions, 1);
    }
}
