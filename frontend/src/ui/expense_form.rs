use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use super::{inline_error, input_value, select_value, AppContext};
use crate::format::CURRENCY_SYMBOL;
use crate::model::Category;
use crate::views::expense_form::{self, parse_category_choice, ExpenseDraft};

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    pub on_created: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ExpenseFormModal)]
pub fn expense_form_modal(props: &ExpenseFormProps) -> Html {
    let ctx = use_context::<AppContext>();
    let categories = use_state(Vec::<Category>::new);
    let draft = use_state(|| ExpenseDraft::dated(chrono::Local::now().date_naive()));
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    {
        let categories = categories.clone();
        let error = error.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        use_effect_with_deps(
            move |_| {
                if let Some(api) = api {
                    spawn_local(async move {
                        match api.list_categories().await {
                            Ok(list) => categories.set(list),
                            Err(err) => error.set(Some(format!("Could not load categories: {err}"))),
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let saving = saving.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        let on_created = props.on_created.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(api) = api.clone() else { return };
            let current = (*draft).clone();
            error.set(None);
            saving.set(true);

            let error = error.clone();
            let saving = saving.clone();
            let on_created = on_created.clone();
            let on_close = on_close.clone();
            spawn_local(async move {
                match expense_form::submit(&api, &current).await {
                    Ok(_) => {
                        saving.set(false);
                        on_created.emit(());
                        on_close.emit(());
                    }
                    Err(err) => {
                        error.set(Some(err.to_string()));
                        saving.set(false);
                    }
                }
            });
        })
    };

    let edit = |update: fn(&mut ExpenseDraft, String)| {
        let draft = draft.clone();
        move |value: String| {
            let mut next = (*draft).clone();
            update(&mut next, value);
            draft.set(next);
        }
    };
    let on_amount = {
        let apply = edit(|d, v| d.amount = v);
        Callback::from(move |e: InputEvent| apply(input_value(&e)))
    };
    let on_description = {
        let apply = edit(|d, v| d.description = v);
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            apply(area.value())
        })
    };
    let on_category = {
        let apply = edit(|d, v| d.category_id = parse_category_choice(&v));
        Callback::from(move |e: Event| apply(select_value(&e)))
    };
    let on_date = {
        let apply = edit(|d, v| d.date = v);
        Callback::from(move |e: InputEvent| apply(input_value(&e)))
    };
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let selected = draft.category_id.unwrap_or(0);

    html! {
        <div class="expense-form-overlay">
            <div class="expense-form-modal">
                <div class="form-header">
                    <h3>{"New expense"}</h3>
                    <button onclick={on_cancel.clone()} class="close-btn">{"×"}</button>
                </div>

                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="amount">{ format!("Amount ({})", CURRENCY_SYMBOL) }</label>
                        <input id="amount" type="number" step="0.01" min="0" value={draft.amount.clone()} oninput={on_amount} />
                    </div>
                    <div class="form-group">
                        <label for="description">{"Description"}</label>
                        <textarea id="description" rows="3" value={draft.description.clone()} oninput={on_description} />
                    </div>
                    <div class="form-group">
                        <label for="category">{"Category"}</label>
                        <select id="category" onchange={on_category}>
                            <option value="0" selected={selected == 0}>{"Select a category"}</option>
                            { for categories.iter().map(|c| html! {
                                <option key={c.id} value={c.id.to_string()} selected={selected == c.id}>{ c.name.clone() }</option>
                            }) }
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="date">{"Date"}</label>
                        <input id="date" type="date" value={draft.date.clone()} oninput={on_date} />
                    </div>

                    { inline_error(&error) }

                    <div class="form-actions">
                        <button type="button" onclick={on_cancel} class="cancel-btn">{"Cancel"}</button>
                        <button type="submit" class="submit-btn" disabled={*saving}>
                            { if *saving { "Saving..." } else { "Save expense" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
