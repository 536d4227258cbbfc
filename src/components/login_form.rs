use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_credentials::use_credentials;
use crate::models::credentials::{CredentialForm, CredentialMode, Market};

/// Sign-in / sign-up screen shown while nobody is authenticated.
#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let handle = use_credentials();
    let show_password = use_state(|| false);
    let mode = handle.mode;

    // Builds an input handler that writes one field of the form
    let field = |write: fn(&mut CredentialForm, String)| {
        let form = handle.form.clone();
        let set_form = handle.set_form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = form.clone();
            write(&mut next, input.value());
            set_form.emit(next);
        })
    };

    let on_market = {
        let form = handle.form.clone();
        let set_form = handle.set_form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_form.emit(CredentialForm {
                market: select.value(),
                ..form.clone()
            });
        })
    };

    let onsubmit = {
        let on_submit = handle.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_| show_password.set(!*show_password))
    };

    let toggle_mode = {
        let toggle = handle.toggle_mode.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            toggle.emit(());
        })
    };

    let (heading, subheading, switch_prompt, switch_label) = match mode {
        CredentialMode::SignIn => (
            "Welcome Back",
            "Please sign in to your account",
            "Don't have an account?",
            "Sign up here",
        ),
        CredentialMode::SignUp => (
            "Create Account",
            "Fill in your details to get started",
            "Already have an account?",
            "Sign in here",
        ),
    };

    html! {
        <div class="login-screen">
            <form class="login-card" {onsubmit}>
                <h1>{heading}</h1>
                <p class="subheading">{subheading}</p>

                if mode == CredentialMode::SignUp {
                    <label for="id">{"User ID"}</label>
                    <input id="id" type="text" placeholder="Enter your ID" required=true
                        value={handle.form.id.clone()}
                        oninput={field(|f, v| f.id = v)} />

                    <label for="name">{"Full Name"}</label>
                    <input id="name" type="text" placeholder="Enter your full name" required=true
                        value={handle.form.name.clone()}
                        oninput={field(|f, v| f.name = v)} />
                }

                <label for="email">{"Email Address"}</label>
                <input id="email" type="email" placeholder="Enter your email" required=true
                    value={handle.form.email.clone()}
                    oninput={field(|f, v| f.email = v)} />

                if mode == CredentialMode::SignUp {
                    <label for="market">{"Market Sector"}</label>
                    <select id="market" required=true onchange={on_market}>
                        <option value="" selected={handle.form.market.is_empty()} disabled=true>
                            {"Select your market sector"}
                        </option>
                        {
                            Market::all().iter().map(|m| {
                                let value = m.value();
                                let selected = handle.form.market == value;
                                html! { <option {value} {selected}>{m.label()}</option> }
                            }).collect::<Html>()
                        }
                    </select>
                }

                <label for="password">{"Password"}</label>
                <div class="password-field">
                    <input id="password" required=true placeholder="Enter your password"
                        type={if *show_password { "text" } else { "password" }}
                        value={handle.form.password.clone()}
                        oninput={field(|f, v| f.password = v)} />
                    <button type="button" class="password-toggle" onclick={toggle_password}
                        aria-label={if *show_password { "Hide password" } else { "Show password" }}>
                        {if *show_password { "🙈" } else { "👁" }}
                    </button>
                </div>

                <button type="submit" class="primary" disabled={handle.submitting}>
                    {if handle.submitting { mode.pending_label() } else { mode.submit_label() }}
                </button>

                <p class="mode-switch">
                    {switch_prompt}{" "}
                    <a href="#" onclick={toggle_mode}>{switch_label}</a>
                </p>
            </form>
        </div>
    }
}
