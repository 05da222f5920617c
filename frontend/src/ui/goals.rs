use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{inline_error, input_value, select_value, AppContext};
use crate::format::{format_currency, month_name};
use crate::views::goals::{self, GoalDraft, GoalList, GoalListAction};
use crate::views::summary::Period;
use crate::views::RequestSeq;

impl Reducible for GoalList {
    type Action = GoalListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[function_component(GoalsPage)]
pub fn goals_page() -> Html {
    let ctx = use_context::<AppContext>();
    let goal_list = use_reducer(GoalList::default);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);
    let form_error = use_state(|| None::<String>);
    let draft = use_state(|| GoalDraft {
        amount: String::new(),
        period: Period::current(),
        description: String::new(),
    });
    let editing = use_state(|| None::<(i64, String)>);
    let seq = use_mut_ref(RequestSeq::default);

    {
        let goal_list = goal_list.dispatcher();
        let loading = loading.clone();
        let load_error = load_error.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        use_effect_with_deps(
            move |_| {
                if let Some(api) = api {
                    let ticket = seq.borrow().issue();
                    spawn_local(async move {
                        let result = goals::load(&api).await;
                        seq.borrow().apply_if_current(ticket, result, |result| {
                            match result {
                                Ok(list) => goal_list.dispatch(GoalListAction::Loaded(list)),
                                Err(err) => load_error.set(Some(format!("Could not load goals: {err}"))),
                            }
                            loading.set(false);
                        });
                    });
                }
                || ()
            },
            (),
        );
    }

    let on_create = {
        let goal_list = goal_list.dispatcher();
        let draft = draft.clone();
        let form_error = form_error.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(api) = api.clone() else { return };
            let submitted = (*draft).clone();
            let goal_list = goal_list.clone();
            let draft = draft.clone();
            let form_error = form_error.clone();
            spawn_local(async move {
                match goals::create(&api, &submitted).await {
                    Ok(added) => {
                        form_error.set(None);
                        goal_list.dispatch(added);
                        draft.set(GoalDraft {
                            amount: String::new(),
                            description: String::new(),
                            ..submitted
                        });
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_save_amount = {
        let goal_list = goal_list.dispatcher();
        let editing = editing.clone();
        let form_error = form_error.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        Callback::from(move |_: MouseEvent| {
            let Some(api) = api.clone() else { return };
            let Some((id, amount)) = (*editing).clone() else { return };
            let goal_list = goal_list.clone();
            let editing = editing.clone();
            let form_error = form_error.clone();
            spawn_local(async move {
                match goals::update_amount(&api, id, &amount).await {
                    Ok(replaced) => {
                        form_error.set(None);
                        goal_list.dispatch(replaced);
                        editing.set(None);
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_amount = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            draft.set(GoalDraft {
                amount: input_value(&e),
                ..(*draft).clone()
            })
        })
    };
    let on_description = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            draft.set(GoalDraft {
                description: input_value(&e),
                ..(*draft).clone()
            })
        })
    };
    let on_month = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            if let Ok(month) = select_value(&e).parse::<u32>() {
                let period = Period { month, ..draft.period };
                draft.set(GoalDraft { period, ..(*draft).clone() });
            }
        })
    };
    let on_year = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Ok(year) = input_value(&e).trim().parse::<i32>() {
                let period = Period { year, ..draft.period };
                draft.set(GoalDraft { period, ..(*draft).clone() });
            }
        })
    };
    let on_edit_input = {
        let editing = editing.clone();
        Callback::from(move |e: InputEvent| {
            if let Some((id, _)) = *editing {
                editing.set(Some((id, input_value(&e))));
            }
        })
    };
    let on_cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(None))
    };

    if *loading {
        return html! { <div class="loading">{"Loading goals..."}</div> };
    }
    if let Some(msg) = &*load_error {
        return html! { <div class="error">{ msg.clone() }</div> };
    }

    html! {
        <div class="goals">
            <h2>{"Savings goals"}</h2>

            <form class="goal-form" onsubmit={on_create}>
                <input type="number" step="0.01" min="0" placeholder="Amount" value={draft.amount.clone()} oninput={on_amount} />
                <select onchange={on_month}>
                    { for (1..=12u32).map(|m| html! {
                        <option value={m.to_string()} selected={m == draft.period.month}>{ month_name(m) }</option>
                    }) }
                </select>
                <input type="number" value={draft.period.year.to_string()} oninput={on_year} />
                <input type="text" placeholder="Description (optional)" value={draft.description.clone()} oninput={on_description} />
                <button type="submit" class="submit-btn">{"Add goal"}</button>
            </form>

            { inline_error(&form_error) }

            <div class="goals-list">
                { for goal_list.goals.iter().map(|goal| {
                    let is_editing = matches!(&*editing, Some((id, _)) if *id == goal.id);
                    let start_edit = {
                        let editing = editing.clone();
                        let id = goal.id;
                        let amount = goal.amount.to_string();
                        Callback::from(move |_: MouseEvent| editing.set(Some((id, amount.clone()))))
                    };
                    html! {
                        <div key={goal.id} class="goal-item">
                            <div class="goal-info">
                                <h4>{ format!("{} {}", month_name(goal.month), goal.year) }</h4>
                                if let Some(desc) = &goal.description {
                                    <p>{ desc.clone() }</p>
                                }
                            </div>
                            if is_editing {
                                <div class="goal-edit">
                                    <input
                                        type="number"
                                        step="0.01"
                                        min="0"
                                        value={editing.as_ref().map(|(_, v)| v.clone()).unwrap_or_default()}
                                        oninput={on_edit_input.clone()}
                                    />
                                    <button onclick={on_save_amount.clone()} class="save-btn">{"Save"}</button>
                                    <button onclick={on_cancel_edit.clone()} class="cancel-btn">{"Cancel"}</button>
                                </div>
                            } else {
                                <div class="goal-actions">
                                    <span class="goal-amount">{ format_currency(goal.amount) }</span>
                                    <button onclick={start_edit} class="edit-btn">{"Edit"}</button>
                                </div>
                            }
                        </div>
                    }
                }) }
            </div>

            if goal_list.goals.is_empty() {
                <div class="no-data">{"No goals yet"}</div>
            }
        </div>
    }
}
