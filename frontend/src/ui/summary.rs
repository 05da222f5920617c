use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{select_value, AppContext};
use crate::format::{format_currency, format_share, month_name};
use crate::model::CategorySummary;
use crate::summary::{grand_total, share_percent};
use crate::views::summary::{self, year_options, Period};
use crate::views::RequestSeq;

#[derive(Properties, PartialEq)]
pub struct SummaryPageProps {
    pub period: Period,
    pub on_period: Callback<Period>,
    pub on_select: Callback<(i64, String)>,
}

#[function_component(SummaryPage)]
pub fn summary_page(props: &SummaryPageProps) -> Html {
    let ctx = use_context::<AppContext>();
    let rows = use_state(Vec::<CategorySummary>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let seq = use_mut_ref(RequestSeq::default);

    {
        let rows = rows.clone();
        let loading = loading.clone();
        let error = error.clone();
        let api = ctx.as_ref().map(|c| c.api.clone());
        use_effect_with_deps(
            move |period: &Period| {
                let period = *period;
                if let Some(api) = api {
                    let ticket = seq.borrow().issue();
                    loading.set(true);
                    error.set(None);
                    spawn_local(async move {
                        let result = summary::load(&api, period).await;
                        seq.borrow().apply_if_current(ticket, result, |result| {
                            match result {
                                Ok(list) => rows.set(list),
                                Err(err) => error.set(Some(format!("Could not load the summary: {err}"))),
                            }
                            loading.set(false);
                        });
                    });
                }
                || ()
            },
            props.period,
        );
    }

    let period = props.period;
    let total = grand_total(&rows);
    let today = chrono::Local::now().date_naive();

    let on_month = {
        let on_period = props.on_period.clone();
        Callback::from(move |e: Event| {
            if let Ok(month) = select_value(&e).parse::<u32>() {
                on_period.emit(Period { month, ..period });
            }
        })
    };
    let on_year = {
        let on_period = props.on_period.clone();
        Callback::from(move |e: Event| {
            if let Ok(year) = select_value(&e).parse::<i32>() {
                on_period.emit(Period { year, ..period });
            }
        })
    };
    let on_reset = {
        let on_period = props.on_period.clone();
        Callback::from(move |_: MouseEvent| on_period.emit(Period::current()))
    };

    if *loading {
        return html! { <div class="loading">{"Loading summary..."}</div> };
    }
    if let Some(msg) = &*error {
        return html! { <div class="error">{ msg.clone() }</div> };
    }

    html! {
        <div class="expense-summary">
            <div class="summary-header">
                <h2>{"Expense summary"}</h2>
                <div class="filters">
                    <select onchange={on_month}>
                        { for (1..=12u32).map(|m| html! {
                            <option value={m.to_string()} selected={m == period.month}>{ month_name(m) }</option>
                        }) }
                    </select>
                    <select onchange={on_year}>
                        { for year_options(today).into_iter().map(|y| html! {
                            <option value={y.to_string()} selected={y == period.year}>{ y.to_string() }</option>
                        }) }
                    </select>
                    <button onclick={on_reset} class="reset-btn">{"Current month"}</button>
                </div>
            </div>

            <div class="total-amount">
                <h3>{ format!("Total for the month: {}", format_currency(total)) }</h3>
            </div>

            <div class="categories-grid">
                { for rows.iter().map(|item| {
                    let on_select = props.on_select.clone();
                    let id = item.category_id;
                    let name = item.category_name.clone();
                    html! {
                        <div
                            key={item.category_id}
                            class="category-card"
                            onclick={Callback::from(move |_: MouseEvent| on_select.emit((id, name.clone())))}
                        >
                            <h4>{ item.category_name.clone() }</h4>
                            <p class="amount">{ format_currency(item.total_amount) }</p>
                            <p class="percentage">{ format_share(share_percent(item.total_amount, total)) }</p>
                        </div>
                    }
                }) }
            </div>

            if rows.is_empty() {
                <div class="no-data">{"No expenses recorded for this period"}</div>
            }
        </div>
    }
}
