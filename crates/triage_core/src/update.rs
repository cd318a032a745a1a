use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(path) => {
            state.choose_file(path);
            Vec::new()
        }
        Msg::UploadClicked => state.start_upload().into_iter().collect(),
        Msg::UploadSucceeded { request_id, email } => {
            state.finish_upload(request_id, email);
            Vec::new()
        }
        Msg::UploadFailed { request_id } => {
            state.fail_upload(request_id);
            Vec::new()
        }
        Msg::BodyToggled => {
            state.toggle_body();
            Vec::new()
        }
        Msg::AttachmentToggled { index } => {
            state.toggle_attachment(index);
            Vec::new()
        }
        Msg::ProceedClicked => state.start_classification().into_iter().collect(),
        Msg::ClassifySucceeded { request_id, report } => {
            state.finish_classification(request_id, report);
            Vec::new()
        }
        Msg::ClassifyFailed { request_id } => {
            state.fail_classification(request_id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
