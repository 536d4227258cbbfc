use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_price_recorder::use_price_recorder;
use crate::hooks::use_query::{use_products, use_suppliers};
use crate::models::draft::DraftField;

/// Form recording a new price observation.
#[function_component(AddPriceForm)]
pub fn add_price_form() -> Html {
    let recorder = use_price_recorder();
    let products = use_products();
    let suppliers = use_suppliers();

    let select_handler = |field: DraftField| {
        let on_change = recorder.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit((field, select.value()));
        })
    };

    let on_price = {
        let on_change = recorder.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((DraftField::Price, input.value()));
        })
    };

    let onsubmit = {
        let on_submit = recorder.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let draft = &recorder.draft;

    let product_options = products
        .data()
        .map(|products| {
            products
                .iter()
                .map(|p| {
                    let value = p.id.to_string();
                    let selected = draft.product_id == value;
                    html! { <option key={p.id} {value} {selected}>{p.label()}</option> }
                })
                .collect::<Html>()
        })
        .unwrap_or_default();

    let supplier_options = suppliers
        .data()
        .map(|suppliers| {
            suppliers
                .iter()
                .map(|s| {
                    let value = s.id.to_string();
                    let selected = draft.supplier_id == value;
                    html! { <option key={s.id} {value} {selected}>{&s.name}</option> }
                })
                .collect::<Html>()
        })
        .unwrap_or_default();

    html! {
        <section class="card narrow">
            <h2>{"Add New Price"}</h2>
            <form class="price-form" {onsubmit}>
                <label for="product">{"Product"}</label>
                <select id="product" onchange={select_handler(DraftField::Product)}
                    disabled={products.is_loading()}>
                    <option value="" selected={draft.product_id.is_empty()}>
                        {"Select a product"}
                    </option>
                    {product_options}
                </select>

                <label for="supplier">{"Supplier"}</label>
                <select id="supplier" onchange={select_handler(DraftField::Supplier)}
                    disabled={suppliers.is_loading()}>
                    <option value="" selected={draft.supplier_id.is_empty()}>
                        {"Select a supplier"}
                    </option>
                    {supplier_options}
                </select>

                <label for="price">{"Price"}</label>
                <div class="price-field">
                    <span class="currency">{"$"}</span>
                    <input id="price" type="number" step="0.01" min="0" placeholder="0.00"
                        value={draft.price.clone()} oninput={on_price} />
                </div>

                <button type="submit" class="primary" disabled={recorder.submitting}>
                    {if recorder.submitting { "Adding Price..." } else { "Add Price" }}
                </button>
            </form>
        </section>
    }
}
