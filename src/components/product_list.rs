use yew::prelude::*;

use crate::components::status::{EmptyState, ErrorPanel, Loading};
use crate::hooks::use_query::{QueryView, use_products};

#[function_component(ProductList)]
pub fn product_list() -> Html {
    let state = use_products();

    match state.view() {
        QueryView::Loading => html! { <Loading label="Loading products..." /> },
        QueryView::Error(msg) => html! {
            <ErrorPanel context="products" message={msg.to_string()} />
        },
        QueryView::Empty => html! {
            <section class="card">
                <h2>{"Product List (0 items)"}</h2>
                <EmptyState
                    message="No products found"
                    hint={AttrValue::from("Products are added by an administrator")} />
            </section>
        },
        QueryView::Ready(products) => html! {
            <section class="card">
                <h2>{format!("Product List ({} items)", products.len())}</h2>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"ID"}</th>
                            <th>{"Product Name"}</th>
                            <th>{"Unit"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {
                            products.iter().map(|p| html! {
                                <tr key={p.id}>
                                    <td class="id">{p.id.to_string()}</td>
                                    <td>{&p.name}</td>
                                    <td>{&p.unit}</td>
                                </tr>
                            }).collect::<Html>()
                        }
                    </tbody>
                </table>
            </section>
        },
    }
}
