//! Errors from every layer flow into `tourguide::Error` through `?` and map
//! to a recovery the host can act on.

use tourguide::prelude::*;
use tourguide::{MemoryStorage, MissingTarget, NavAction, StepResolver};

fn host() -> StaticHost {
    StaticHost::new(Rect::from_size(1024, 768))
        .with_element("#a", Rect::new(100, 100, 120, 40))
        .with_element("#b", Rect::new(400, 300, 120, 40))
}

fn run_script(guide: Guide, script: &[NavAction]) -> tourguide::Result<TourState> {
    let mut tour = TourController::new(guide, host());
    tour.start()?;
    for &action in script {
        tour.dispatch(action)?;
    }
    Ok(tour.state())
}

#[test]
fn veto_surfaces_as_stay_on_step() {
    let guide = Guide::new(vec![
        Step::at("#a").before_step_change(|_, _, _| Err(Veto::new("fill the form first"))),
        Step::at("#b"),
    ]);
    let err = run_script(guide, &[NavAction::Next]).unwrap_err();
    assert_eq!(err.error_type(), "tour");
    assert_eq!(err.recovery(), Recovery::StayOnStep);
    assert!(err.to_string().contains("fill the form first"));
}

#[test]
fn seen_guide_is_suppressed() {
    let storage = std::sync::Arc::new(MemoryStorage::new());
    let make = || Guide::new(vec![Step::at("#a")]).local_key("welcome");

    let mut first = TourController::new(make(), host()).with_storage(storage.clone());
    first.start().unwrap();
    first.next().unwrap();
    assert!(first.state().is_finished());

    let mut second = TourController::new(make(), host()).with_storage(storage);
    let err: Error = second.start().unwrap_err().into();
    assert_eq!(err.recovery(), Recovery::Suppress);
}

#[test]
fn missing_target_policies_map_to_recoveries() {
    let resolve_err: Error = StepResolver::new(&host())
        .resolve(&Step::at("#nowhere"))
        .unwrap_err()
        .into();
    assert_eq!(resolve_err.recovery(), Recovery::Unanchor);

    let guide = Guide::new(vec![Step::at("#nowhere"), Step::at("#a")])
        .missing_target(MissingTarget::Skip);
    let state = run_script(guide, &[]).unwrap();
    assert_eq!(state, TourState::Active(1));
}

#[test]
fn happy_path_completes() {
    let guide = Guide::new(vec![Step::at("#a"), Step::at("#b")]);
    let state = run_script(guide, &[NavAction::Next, NavAction::Next]).unwrap();
    assert_eq!(state, TourState::Completed);
}
