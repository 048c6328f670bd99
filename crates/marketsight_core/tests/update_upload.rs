use std::path::PathBuf;
use std::sync::Once;

use marketsight_core::{
    update, AppState, Effect, Msg, UploadCandidate, SUBMIT_LABEL_IDLE, SUBMIT_LABEL_UPLOADING,
    UPLOAD_FAILED_ALERT,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn candidate(name: &str) -> UploadCandidate {
    UploadCandidate::from_path(PathBuf::from("/data").join(name))
}

fn mounted_with_file(name: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Mounted);
    let (state, _) = update(state, Msg::FileSelected(Some(candidate(name))));
    state
}

fn submitting(name: &str) -> AppState {
    let (state, effects) = update(mounted_with_file(name), Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    state
}

fn assert_submit_invariant(state: &AppState) {
    let view = state.view();
    assert_eq!(
        view.submit_enabled,
        state.selected_file().is_some() && !state.is_uploading()
    );
}

#[test]
fn candidate_takes_file_name_from_path() {
    let candidate = candidate("prices.csv");
    assert_eq!(candidate.file_name, "prices.csv");
    assert_eq!(candidate.path, PathBuf::from("/data/prices.csv"));
}

#[test]
fn selecting_a_file_replaces_the_previous_one() {
    init_logging();
    let state = mounted_with_file("first.csv");
    let (mut state, effects) = update(state, Msg::FileSelected(Some(candidate("second.txt"))));

    assert!(effects.is_empty());
    assert_eq!(state.view().selected_file.as_deref(), Some("second.txt"));
    assert!(state.consume_dirty());
    assert_submit_invariant(&state);
}

#[test]
fn cancelling_the_picker_clears_the_selection() {
    init_logging();
    let (state, _) = update(mounted_with_file("prices.csv"), Msg::FileSelected(None));

    assert!(state.selected_file().is_none());
    assert!(!state.view().submit_enabled);
}

#[test]
fn submit_without_file_is_noop() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Mounted);
    assert!(!state.view().submit_enabled);

    let (next, effects) = update(state.clone(), Msg::SubmitClicked);
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn submit_sends_selected_file_and_sets_in_flight() {
    init_logging();
    let state = mounted_with_file("prices.csv");
    assert!(state.view().submit_enabled);
    assert_eq!(state.view().submit_label, SUBMIT_LABEL_IDLE);

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::UploadFile {
            path: PathBuf::from("/data/prices.csv"),
            file_name: "prices.csv".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.uploading);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_UPLOADING);
    assert_submit_invariant(&state);
}

#[test]
fn second_submit_while_in_flight_is_noop() {
    init_logging();
    let state = submitting("prices.csv");

    let (next, effects) = update(state.clone(), Msg::SubmitClicked);
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn successful_upload_clears_file_and_refreshes_once() {
    init_logging();
    let state = submitting("prices.csv");

    let (state, effects) = update(state, Msg::UploadFinished(Ok(())));

    assert!(!state.is_uploading());
    assert!(state.selected_file().is_none());
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::FetchJobs { .. }));
    assert_submit_invariant(&state);
}

#[test]
fn refresh_after_upload_uses_a_fresh_sequence() {
    init_logging();
    let (state, effects) = update(mounted_with_file("prices.csv"), Msg::PollTick);
    let Effect::FetchJobs { seq: tick_seq } = effects[0] else {
        panic!("expected FetchJobs");
    };
    let (state, _) = update(state, Msg::SubmitClicked);
    let (_state, effects) = update(state, Msg::UploadFinished(Ok(())));

    let Effect::FetchJobs { seq: refresh_seq } = effects[0] else {
        panic!("expected FetchJobs");
    };
    assert!(refresh_seq > tick_seq);
}

#[test]
fn failed_upload_alerts_once_and_releases_in_flight() {
    init_logging();
    let state = submitting("prices.csv");

    let (state, effects) = update(
        state,
        Msg::UploadFinished(Err("http status 500".to_string())),
    );

    assert!(!state.is_uploading());
    assert_eq!(
        effects,
        vec![Effect::ShowAlert {
            message: UPLOAD_FAILED_ALERT.to_string(),
        }]
    );
    assert_submit_invariant(&state);

    // A duplicate completion does not alert again.
    let (_state, effects) = update(state, Msg::UploadFinished(Err("again".to_string())));
    assert!(effects.is_empty());
}

#[test]
fn failed_upload_keeps_file_for_retry() {
    init_logging();
    let state = submitting("prices.csv");
    let (state, _) = update(state, Msg::UploadFinished(Err("network error".to_string())));

    assert_eq!(state.view().selected_file.as_deref(), Some("prices.csv"));
    assert!(state.view().submit_enabled);
}

#[test]
fn upload_finishing_after_unmount_does_not_refresh() {
    init_logging();
    let state = submitting("prices.csv");
    let (state, _) = update(state, Msg::Unmounted);
    let (state, effects) = update(state, Msg::UploadFinished(Ok(())));

    assert!(effects.is_empty());
    assert!(!state.is_uploading());
}

#[test]
fn poll_results_apply_while_upload_is_in_flight() {
    init_logging();
    let state = submitting("prices.csv");
    let (state, effects) = update(state, Msg::PollTick);
    let Effect::FetchJobs { seq } = effects[0] else {
        panic!("expected FetchJobs");
    };

    let (state, _) = update(state, Msg::JobsLoaded { seq, jobs: Vec::new() });
    assert!(state.is_uploading());
    assert!(state.view().placeholder.is_some());
}
