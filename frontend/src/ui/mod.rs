//! Yew components. Only built for `wasm32`.

mod auth;
mod detail;
mod expense_form;
mod goals;
mod summary;

use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::ApiClient;
use crate::browser::{GlooTransport, LocalStorageStore};
use crate::config::Config;
use crate::session::{Session, SessionController};
use crate::views::summary::Period;

use auth::AuthScreen;
use detail::DetailPage;
use expense_form::ExpenseFormModal;
use goals::GoalsPage;
use summary::SummaryPage;

pub type AppClient = ApiClient<GlooTransport>;

/// What every authenticated view can reach: the API client carrying the
/// current token, and the signed-in account.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub api: AppClient,
    pub session: Session,
}

/// Mounts the application on `<body>`.
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Summary,
    Goals,
}

#[derive(Clone, PartialEq)]
struct SelectedCategory {
    id: i64,
    name: String,
}

#[function_component(App)]
fn app() -> Html {
    let config = use_state(Config::from_build_env);
    let sessions = use_state(|| SessionController::new(Rc::new(LocalStorageStore)));
    let session = {
        let sessions = sessions.clone();
        use_state(move || sessions.restore())
    };

    if !session.is_authenticated() {
        let on_authenticated = {
            let session = session.clone();
            Callback::from(move |next: Session| session.set(next))
        };
        let api = ApiClient::new(&config, GlooTransport);
        return html! {
            <AuthScreen api={api} sessions={(*sessions).clone()} on_authenticated={on_authenticated} />
        };
    }

    let context = AppContext {
        api: ApiClient::new(&config, GlooTransport).with_token(session.token().map(str::to_string)),
        session: (*session).clone(),
    };

    let on_logout = {
        let session = session.clone();
        let sessions = sessions.clone();
        Callback::from(move |_: MouseEvent| session.set(sessions.logout()))
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            <Shell on_logout={on_logout} />
        </ContextProvider<AppContext>>
    }
}

#[derive(Properties, PartialEq)]
struct ShellProps {
    on_logout: Callback<MouseEvent>,
}

#[function_component(Shell)]
fn shell(props: &ShellProps) -> Html {
    let active_page = use_state(|| Page::Summary);
    let period = use_state(Period::current);
    let selected = use_state(|| None::<SelectedCategory>);
    let show_form = use_state(|| false);
    let refresh_key = use_state(|| 0u32);
    let account = use_context::<AppContext>()
        .and_then(|ctx| ctx.session.account_email().map(str::to_string))
        .unwrap_or_default();

    let on_period = {
        let period = period.clone();
        Callback::from(move |p: Period| period.set(p))
    };
    let on_select = {
        let selected = selected.clone();
        Callback::from(move |(id, name): (i64, String)| selected.set(Some(SelectedCategory { id, name })))
    };
    let on_back = {
        let selected = selected.clone();
        Callback::from(move |_: MouseEvent| selected.set(None))
    };
    let open_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: MouseEvent| show_form.set(true))
    };
    let close_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: ()| show_form.set(false))
    };
    let on_created = {
        let refresh_key = refresh_key.clone();
        Callback::from(move |_: ()| refresh_key.set(*refresh_key + 1))
    };
    let nav = |page: Page, label: &'static str| {
        let active_page = active_page.clone();
        let class_name = if *active_page == page { "nav-btn active" } else { "nav-btn" };
        html! {
            <button type="button" class={class_name} onclick={Callback::from(move |_: MouseEvent| active_page.set(page))}>
                { label }
            </button>
        }
    };

    let content = match *active_page {
        Page::Goals => html! { <GoalsPage /> },
        Page::Summary => match &*selected {
            Some(cat) => html! {
                <DetailPage
                    key={format!("{}-{}", cat.id, *refresh_key)}
                    category_id={cat.id}
                    category_name={cat.name.clone()}
                    period={*period}
                    on_back={on_back}
                />
            },
            None => html! {
                <SummaryPage
                    key={(*refresh_key).to_string()}
                    period={*period}
                    on_period={on_period}
                    on_select={on_select}
                />
            },
        },
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"Ahorrista"}</h1>
                <nav>
                    { nav(Page::Summary, "Summary") }
                    { nav(Page::Goals, "Goals") }
                </nav>
                <div class="header-actions">
                    <span>{ format!("Hello, {}", account) }</span>
                    <button onclick={open_form} class="new-expense-btn">{"+ New expense"}</button>
                    <button onclick={props.on_logout.clone()} class="logout-btn">{"Log out"}</button>
                </div>
            </header>
            <main class="app-main">{ content }</main>
            if *show_form {
                <ExpenseFormModal on_created={on_created} on_close={close_form} />
            }
        </div>
    }
}

fn input_value(e: &InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

fn select_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

fn inline_error(message: &Option<String>) -> Html {
    match message {
        Some(msg) => html! { <div class="error-message">{ msg.clone() }</div> },
        None => html! {},
    }
}
