use yew::prelude::*;

use crate::components::chart::Chart;
use crate::components::status::{EmptyState, ErrorPanel, Loading};
use crate::hooks::use_query::{QueryView, use_price_history};

/// Chart of all recorded prices plus a table of the latest records.
#[function_component(PriceTrends)]
pub fn price_trends() -> Html {
    let state = use_price_history();

    match state.view() {
        QueryView::Loading => html! { <Loading label="Loading price trends..." /> },
        QueryView::Error(msg) => html! {
            <ErrorPanel context="price trends" message={msg.to_string()} />
        },
        QueryView::Empty => html! {
            <>
                <section class="card">
                    <h2>{"Price Trends Over Time"}</h2>
                    <EmptyState message="No price data available for trends" />
                </section>
                <section class="card">
                    <h2>{"Recent Price Records"}</h2>
                    <EmptyState message="No price records found" />
                </section>
            </>
        },
        QueryView::Ready(history) => html! {
            <>
                <section class="card">
                    <h2>{"Price Trends Over Time"}</h2>
                    <Chart history={history.clone()} />
                </section>
                <section class="card">
                    <h2>{"Recent Price Records"}</h2>
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Date"}</th>
                                <th>{"Product"}</th>
                                <th>{"Supplier"}</th>
                                <th class="numeric">{"Price"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {
                                history.recent_records().into_iter().map(|r| html! {
                                    <tr key={r.id}>
                                        <td>{r.date}</td>
                                        <td>{r.product}</td>
                                        <td>{r.supplier}</td>
                                        <td class="numeric">{format!("${}", r.price)}</td>
                                    </tr>
                                }).collect::<Html>()
                            }
                        </tbody>
                    </table>
                </section>
            </>
        },
    }
}
