//! Application state owned by the runtime and mutated only by `update`.

use portcullis_core::action::Action;
use portcullis_core::config::Config;
use portcullis_core::props::{map_signup_state_to_props, map_state_to_props};
use portcullis_core::state::{LOGIN_PATH, SIGNUP_PATH};
use portcullis_core::store::{Dispatch, Store};
use portcullis_core::validation::ValidationRules;

use crate::common::{TaskSeq, Tasks};
use crate::views::{HomeProps, HomeView, LoginProps, LoginView, SignupProps, SignupView};

/// Which form the TUI opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartView {
    #[default]
    Login,
    Signup,
}

impl StartView {
    pub fn path(self) -> &'static str {
        match self {
            StartView::Login => LOGIN_PATH,
            StartView::Signup => SIGNUP_PATH,
        }
    }
}

pub struct AppState {
    pub store: Store,
    pub login: LoginView,
    pub signup: SignupView,
    pub home: HomeView,
    pub rules: ValidationRules,
    /// Redirect target after login.
    pub next_path: Option<String>,
    pub tasks: Tasks,
    pub task_seq: TaskSeq,
    /// Transient status line text.
    pub notice: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config, start: StartView, next_path: Option<String>) -> Self {
        let mut store = Store::new();
        store.dispatch(Action::navigate(start.path()));
        Self {
            store,
            login: LoginView::new(),
            signup: SignupView::new(),
            home: HomeView,
            rules: config.validation.clone(),
            next_path: next_path.or_else(|| Some(config.next_path.clone())),
            tasks: Tasks::default(),
            task_seq: TaskSeq::default(),
            notice: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn login_props(&self) -> LoginProps {
        LoginProps::new(map_state_to_props(self.store.state()), self.next_path.clone())
    }

    pub fn signup_props(&self) -> SignupProps {
        map_signup_state_to_props(self.store.state())
    }

    pub fn home_props(&self) -> HomeProps {
        HomeProps::from_state(self.store.state())
    }
}
