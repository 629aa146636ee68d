//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use portcullis_core::action::Action;
use portcullis_core::session::{AuthOutcome, AuthRequest};
use portcullis_core::state::View;
use portcullis_core::store::Dispatch;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::views::{ConnectedLogin, ConnectedSignup, HomeCommand};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::AuthResolved(outcome) => handle_auth_outcome(app, outcome),
        UiEvent::AuthCancelled => vec![],
    }
}

fn handle_auth_outcome(app: &mut AppState, outcome: AuthOutcome) -> Vec<UiEffect> {
    match outcome {
        AuthOutcome::Dispatch(action) => {
            app.store.dispatch(action);
            sync_views(app);
            vec![]
        }
        AuthOutcome::OpenBrowser(url) => {
            app.notice = Some(format!("Continue in your browser: {url}"));
            vec![UiEffect::OpenBrowser {
                url: url.to_string(),
            }]
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }
    app.notice = None;

    if key.code == KeyCode::Esc {
        let effects = cancel_running(app);
        return if effects.is_empty() {
            vec![UiEffect::Quit]
        } else {
            effects
        };
    }

    let requests = match app.store.state().route.view() {
        View::Login => {
            let props = app.login_props();
            let mut handlers = ConnectedLogin::new(&mut app.store, &app.rules);
            app.login.handle_key(&props, key, &mut handlers);
            handlers.requests
        }
        View::Signup => {
            let props = app.signup_props();
            let mut handlers = ConnectedSignup::new(&mut app.store, &app.rules);
            app.signup.handle_key(&props, key, &mut handlers);
            handlers.requests
        }
        View::Home => match app.home.handle_key(key) {
            HomeCommand::Logout => {
                app.store.dispatch(Action::Logout);
                Vec::new()
            }
            HomeCommand::Quit => return vec![UiEffect::Quit],
            HomeCommand::None => Vec::new(),
        },
    };

    sync_views(app);
    requests
        .into_iter()
        .map(|request| run_auth(app, request))
        .collect()
}

fn run_auth(app: &mut AppState, request: AuthRequest) -> UiEffect {
    let kind = TaskKind::for_request(&request);
    UiEffect::RunAuth {
        task: app.task_seq.next_id(),
        kind,
        request,
    }
}

/// Lets the active view react to the latest store state.
fn sync_views(app: &mut AppState) {
    match app.store.state().route.view() {
        View::Login => {
            let props = app.login_props();
            let mut handlers = ConnectedLogin::new(&mut app.store, &app.rules);
            app.login.on_props(&props, &mut handlers);
        }
        View::Signup => {
            let props = app.signup_props();
            app.signup.on_props(&props);
        }
        View::Home => {}
    }
}

/// Cancels in-flight form requests and puts their forms back to idle.
fn cancel_running(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for kind in [
        TaskKind::Login,
        TaskKind::Signup,
        TaskKind::SocialAuth,
        TaskKind::EmailVerification,
    ] {
        let state = app.tasks.state_mut(kind);
        if !state.is_running() {
            continue;
        }
        let token = state.cancel.take();
        state.clear();
        effects.push(UiEffect::CancelTask { kind, token });

        match kind {
            TaskKind::Login => app.store.dispatch(Action::login_submit(false)),
            TaskKind::Signup => app.store.dispatch(Action::signup_submit(false)),
            TaskKind::SocialAuth | TaskKind::EmailVerification => {}
        }
        tracing::info!(?kind, "auth request cancelled");
    }
    if !effects.is_empty() {
        app.notice = Some("Cancelled".to_string());
    }
    effects
}

#[cfg(test)]
mod tests {
    use portcullis_core::config::Config;
    use portcullis_core::action::StatusMessage;
    use portcullis_core::form::{
        Credentials, FormError, PASSWORD, Session, SocialProvider, VERIFICATION_TOKEN,
    };
    use portcullis_core::state::HOME_PATH;
    use tokio_util::sync::CancellationToken;
    use url::Url;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::state::StartView;

    fn app() -> AppState {
        AppState::new(&Config::default(), StartView::Login, None)
    }

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, press(KeyCode::Char(c)));
        }
    }

    fn start(app: &mut AppState, kind: TaskKind, id: TaskId) -> CancellationToken {
        let token = CancellationToken::new();
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted {
                    id,
                    cancel: Some(token.clone()),
                },
            },
        );
        token
    }

    fn complete(kind: TaskKind, id: TaskId, outcome: AuthOutcome) -> UiEvent {
        UiEvent::TaskCompleted {
            kind,
            completed: TaskCompleted {
                id,
                result: Box::new(UiEvent::AuthResolved(outcome)),
            },
        }
    }

    #[test]
    fn test_typing_updates_store() {
        let mut app = app();
        type_text(&mut app, "christian");
        assert_eq!(app.store.state().login.credentials.username, "christian");
    }

    #[test]
    fn test_submit_emits_run_auth() {
        let mut app = app();
        type_text(&mut app, "christian");
        app.login.focus(PASSWORD);
        type_text(&mut app, "123456");

        let effects = update(&mut app, press(KeyCode::Enter));

        assert!(app.store.state().login.submitting);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::RunAuth {
                kind: TaskKind::Login,
                request: AuthRequest::Login(c),
                ..
            }] if *c == Credentials::new("christian", "123456")
        ));
    }

    #[test]
    fn test_invalid_submit_sets_error_without_request() {
        let mut app = app();
        app.login.focus(PASSWORD);

        let effects = update(&mut app, press(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(
            app.store.state().login.error,
            Some(FormError::new("Username or email is required"))
        );
    }

    #[test]
    fn test_login_success_redirects_to_next_path() {
        let mut app = app();
        start(&mut app, TaskKind::Login, TaskId(0));
        let outcome = AuthOutcome::Dispatch(Action::LoginSuccess(Session {
            username: "christian".to_string(),
            token: "jwt".to_string(),
        }));

        update(&mut app, complete(TaskKind::Login, TaskId(0), outcome));

        let state = app.store.state();
        assert!(state.current_user.is_logged_in);
        assert_eq!(state.route.path, HOME_PATH);
        assert!(!app.tasks.is_any_running());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut app = app();
        start(&mut app, TaskKind::Login, TaskId(1));
        let outcome = AuthOutcome::Dispatch(Action::LoginFailure(FormError::new(
            "Invalid username or password",
        )));

        update(&mut app, complete(TaskKind::Login, TaskId(0), outcome));

        assert_eq!(app.store.state().login.error, None);
        assert!(app.tasks.state(TaskKind::Login).is_running());
    }

    #[test]
    fn test_esc_cancels_running_login() {
        let mut app = app();
        app.store.dispatch(Action::login_submit(true));
        let token = start(&mut app, TaskKind::Login, TaskId(3));

        let effects = update(&mut app, press(KeyCode::Esc));

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::Login,
                token: Some(_)
            }]
        ));
        assert!(!app.store.state().login.submitting);
        assert!(!app.tasks.is_any_running());
        // The token is handed to the runtime, not cancelled here.
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_esc_when_idle_quits() {
        let mut app = app();
        let effects = update(&mut app, press(KeyCode::Esc));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_social_outcome_opens_browser() {
        let mut app = app();
        let url = Url::parse("https://api.example/auth/google").unwrap();
        start(&mut app, TaskKind::SocialAuth, TaskId(0));

        let effects = update(
            &mut app,
            complete(TaskKind::SocialAuth, TaskId(0), AuthOutcome::OpenBrowser(url)),
        );

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::OpenBrowser { url }] if url == "https://api.example/auth/google"
        ));
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_social_icon_emits_social_request() {
        let mut app = app();
        app.login.focus("social-twitter");
        let effects = update(&mut app, press(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::RunAuth {
                request: AuthRequest::Social(SocialProvider::Twitter),
                ..
            }]
        ));
    }

    #[test]
    fn test_logout_from_home_returns_to_login() {
        let mut app = app();
        app.store.dispatch(Action::LoginSuccess(Session {
            username: "christian".to_string(),
            token: "jwt".to_string(),
        }));
        app.store.dispatch(Action::navigate(HOME_PATH));

        update(&mut app, press(KeyCode::Char('l')));

        let state = app.store.state();
        assert!(!state.current_user.is_logged_in);
        assert_eq!(state.route.view(), View::Login);
    }

    #[test]
    fn test_flip_to_signup_and_back() {
        let mut app = app();
        app.login.focus("flip-login");
        update(&mut app, press(KeyCode::Enter));
        assert_eq!(app.store.state().route.view(), View::Signup);

        app.signup.focus("flip-signup");
        update(&mut app, press(KeyCode::Enter));
        assert_eq!(app.store.state().route.view(), View::Login);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_verify_after_signup_runs_and_shows_confirmation() {
        let mut app = AppState::new(&Config::default(), StartView::Signup, None);
        start(&mut app, TaskKind::Signup, TaskId(0));
        let created = AuthOutcome::Dispatch(Action::SignupSuccess(StatusMessage {
            message: "Account created. Verification token: tok-1".to_string(),
        }));
        update(&mut app, complete(TaskKind::Signup, TaskId(0), created));
        assert_eq!(app.signup.focused(), VERIFICATION_TOKEN);

        type_text(&mut app, "tok-1");
        let effects = update(&mut app, press(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::RunAuth {
                kind: TaskKind::EmailVerification,
                request: AuthRequest::VerifyEmail(token),
                ..
            }] if token == "tok-1"
        ));

        start(&mut app, TaskKind::EmailVerification, TaskId(1));
        let verified = AuthOutcome::Dispatch(Action::EmailVerificationSuccess(
            "Your email has been verified".to_string(),
        ));
        update(&mut app, complete(TaskKind::EmailVerification, TaskId(1), verified));
        assert_eq!(app.signup_props().confirm_message, "Your email has been verified");
        assert!(!app.tasks.is_any_running());
    }

    #[test]
    fn test_esc_cancels_running_verification() {
        let mut app = AppState::new(&Config::default(), StartView::Signup, None);
        start(&mut app, TaskKind::EmailVerification, TaskId(2));

        let effects = update(&mut app, press(KeyCode::Esc));

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::EmailVerification,
                ..
            }]
        ));
        assert_eq!(app.notice.as_deref(), Some("Cancelled"));
    }
}
