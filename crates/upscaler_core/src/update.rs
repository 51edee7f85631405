use crate::{AppState, Effect, FailureReason, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputSelected(path) => {
            // Selections only matter between jobs; a running job already holds its snapshot.
            if state.phase() == Phase::Idle {
                state.set_input(path);
            }
            Vec::new()
        }
        Msg::OutputSelected(path) => {
            if state.phase() == Phase::Idle {
                state.set_output(path);
            }
            Vec::new()
        }
        Msg::StartClicked => {
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            let config = state.config_snapshot();
            match config.missing_field() {
                Some(field) => {
                    let delay = state.settings().settle_delay;
                    let reason = FailureReason::Config(format!("no {field} selected"));
                    let job_id = state.reject_job(reason);
                    vec![Effect::ScheduleSettle { job_id, delay }]
                }
                None => {
                    let job_id = state.begin_job();
                    vec![Effect::StartJob { job_id, config }]
                }
            }
        }
        Msg::CancelRequested => match state.current_job() {
            Some(job_id) if state.is_running(job_id) => vec![Effect::CancelJob { job_id }],
            _ => Vec::new(),
        },
        Msg::JobStatus { job_id, text } => {
            state.apply_status(job_id, text);
            Vec::new()
        }
        Msg::JobDone { job_id, result } => {
            if state.apply_done(job_id, result) {
                vec![Effect::ScheduleSettle {
                    job_id,
                    delay: state.settings().settle_delay,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::Settled { job_id } => {
            state.apply_settled(job_id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
