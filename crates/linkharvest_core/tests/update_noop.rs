use linkharvest_core::{update, AppState, Msg};

#[test]
fn inert_messages_leave_state_alone() {
    for msg in [Msg::NoOp, Msg::NoticeDismissed] {
        let state = AppState::new();
        let (next, effects) = update(state.clone(), msg.clone());
        assert_eq!(state, next, "{msg:?} changed state");
        assert!(effects.is_empty(), "{msg:?} produced effects");
    }
}

#[test]
fn show_selected_toggles_back() {
    let state = AppState::new();
    let (once, _) = update(state, Msg::ShowSelectedToggled);
    assert!(once.view().show_selected);

    let (twice, effects) = update(once, Msg::ShowSelectedToggled);
    assert!(!twice.view().show_selected);
    assert!(effects.is_empty());
}
