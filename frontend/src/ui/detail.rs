use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{inline_error, AppContext};
use crate::format::{format_currency, format_date};
use crate::views::detail::{self, total, ExpenseList, ExpenseListAction};
use crate::views::summary::Period;
use crate::views::RequestSeq;

#[derive(Properties, PartialEq)]
pub struct DetailPageProps {
    pub category_id: i64,
    pub category_name: String,
    pub period: Period,
    pub on_back: Callback<MouseEvent>,
}

impl Reducible for ExpenseList {
    type Action = ExpenseListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[function_component(DetailPage)]
pub fn detail_page(props: &DetailPageProps) -> Html {
    let ctx = use_context::<AppContext>();
    let expenses = use_reducer(ExpenseList::default);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);
    let action_error = use_state(|| None::<String>);
    let seq = use_mut_ref(RequestSeq::default);

    {
        let expenses = expenses.dispatcher();
        let loading = loading.clone();
        let load_error = load_error.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        use_effect_with_deps(
            move |(category_id, period): &(i64, Period)| {
                let (category_id, period) = (*category_id, *period);
                if let Some(api) = api {
                    let ticket = seq.borrow().issue();
                    loading.set(true);
                    load_error.set(None);
                    spawn_local(async move {
                        let result = detail::load(&api, period, category_id).await;
                        seq.borrow().apply_if_current(ticket, result, |result| {
                            match result {
                                Ok(list) => expenses.dispatch(ExpenseListAction::Loaded(list)),
                                Err(err) => load_error.set(Some(format!("Could not load expenses: {err}"))),
                            }
                            loading.set(false);
                        });
                    });
                }
                || ()
            },
            (props.category_id, props.period),
        );
    }

    let on_delete = {
        let expenses = expenses.dispatcher();
        let action_error = action_error.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        Callback::from(move |id: i64| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this expense?").ok())
                .unwrap_or(false);
            let Some(api) = api.clone() else { return };
            if !confirmed {
                return;
            }
            let expenses = expenses.clone();
            let action_error = action_error.clone();
            spawn_local(async move {
                match detail::delete(&api, id).await {
                    Ok(removed) => {
                        action_error.set(None);
                        expenses.dispatch(removed);
                    }
                    Err(err) => action_error.set(Some(format!("Could not delete the expense: {err}"))),
                }
            });
        })
    };

    if *loading {
        return html! { <div class="loading">{"Loading expenses..."}</div> };
    }
    if let Some(msg) = &*load_error {
        return html! { <div class="error">{ msg.clone() }</div> };
    }

    html! {
        <div class="expense-detail">
            <div class="detail-header">
                <button onclick={props.on_back.clone()} class="back-btn">{"← Back"}</button>
                <h2>{ format!("Details: {}", props.category_name) }</h2>
                <p>{ format!("Total: {} | {} expenses", format_currency(total(&expenses.records)), expenses.records.len()) }</p>
            </div>

            { inline_error(&action_error) }

            <div class="expenses-list">
                { for expenses.records.iter().map(|expense| {
                    let on_delete = on_delete.clone();
                    let id = expense.id;
                    html! {
                        <div key={expense.id} class="expense-item">
                            <div class="expense-info">
                                <h4>{ expense.description.clone() }</h4>
                                <p class="expense-date">{ format_date(expense.date) }</p>
                            </div>
                            <div class="expense-actions">
                                <span class="expense-amount">{ format_currency(expense.amount) }</span>
                                <button
                                    class="delete-btn"
                                    title="Delete expense"
                                    onclick={Callback::from(move |_: MouseEvent| on_delete.emit(id))}
                                >
                                    {"Delete"}
                                </button>
                            </div>
                        </div>
                    }
                }) }
            </div>

            if expenses.records.is_empty() {
                <div class="no-data">{"No expenses in this category for the selected period"}</div>
            }
        </div>
    }
}
