use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{inline_error, input_value, AppClient};
use crate::error::MIN_PASSWORD_LEN;
use crate::session::{Session, SessionController};
use crate::views::auth::{self, AuthMode, AuthOutcome, REGISTERED_NOTICE};

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub api: AppClient,
    pub sessions: SessionController,
    pub on_authenticated: Callback<Session>,
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let mode = use_state(|| AuthMode::Login);
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let mode = mode.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let api = props.api.clone();
        let sessions = props.sessions.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let current_mode = *mode;
            let email_val = (*email).clone();
            let password_val = (*password).clone();

            loading.set(true);
            error.set(None);
            notice.set(None);

            let mode = mode.clone();
            let password = password.clone();
            let error = error.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            let api = api.clone();
            let sessions = sessions.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                match auth::submit(current_mode, &email_val, &password_val, &api, &sessions).await {
                    Ok(AuthOutcome::LoggedIn(session)) => on_authenticated.emit(session),
                    Ok(AuthOutcome::Registered) => {
                        notice.set(Some(REGISTERED_NOTICE.to_string()));
                        password.set("".to_string());
                        mode.set(AuthMode::Login);
                    }
                    Err(err) => {
                        log::warn!("authentication failed: {err}");
                        error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let toggle_mode = {
        let mode = mode.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            mode.set(mode.toggled());
        })
    };

    let is_login = *mode == AuthMode::Login;

    html! {
        <div class="auth-container">
            <div class="auth-card">
                <h2>{ if is_login { "Log in" } else { "Sign up" } }</h2>
                <p class="auth-subtitle">
                    { if is_login { "Access your Ahorrista account." } else { "Create an account to start saving." } }
                </p>

                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            id="email"
                            type="email"
                            value={(*email).clone()}
                            oninput={{
                                let email = email.clone();
                                Callback::from(move |e: InputEvent| email.set(input_value(&e)))
                            }}
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            id="password"
                            type="password"
                            placeholder={format!("At least {} characters", MIN_PASSWORD_LEN)}
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| password.set(input_value(&e)))
                            }}
                        />
                    </div>

                    { inline_error(&error) }
                    if let Some(msg) = &*notice {
                        <div class="notice-message">{ msg.clone() }</div>
                    }

                    <button type="submit" class="submit-btn" disabled={*loading}>
                        { if *loading { "Please wait..." } else if is_login { "Log in" } else { "Sign up" } }
                    </button>
                </form>

                <p class="toggle-auth">
                    { if is_login { "No account?" } else { "Already have an account?" } }
                    <button type="button" class="toggle-btn" onclick={toggle_mode}>
                        { if is_login { "Sign up" } else { "Log in" } }
                    </button>
                </p>
            </div>
        </div>
    }
}
