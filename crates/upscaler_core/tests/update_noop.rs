use upscaler_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn fresh_state_is_idle_with_controls_enabled() {
    let mut state = AppState::new();
    let view = state.view();

    assert_eq!(view.phase, upscaler_core::Phase::Idle);
    assert!(view.controls_enabled);
    assert_eq!(view.status_text, upscaler_core::IDLE_STATUS);
    assert_eq!(view.input_label(), "No input selected");
    assert!(!state.consume_dirty());
}

#[test]
fn view_is_unchanged_by_consuming_the_dirty_flag() {
    let (mut state, _) = update(AppState::new(), Msg::InputSelected("cat.png".into()));
    let before = state.view();

    assert!(state.consume_dirty());
    assert_eq!(state.view(), before);
}
