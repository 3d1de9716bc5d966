//! Signup page collecting the account and optional profile fields.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::SignupProfile;
use crate::state::auth::SessionContext;
use crate::util::auth::{DEFAULT_AFTER_LOGIN, install_auth_redirect};

pub const MIN_PASSWORD_LEN: usize = 6;

const GENDER_OPTIONS: [(&str, &str); 4] = [
    ("female", "Female"),
    ("male", "Male"),
    ("other", "Other"),
    ("prefer-not-to-say", "Prefer not to say"),
];

const LANGUAGE_OPTIONS: [(&str, &str); 5] = [
    ("english", "English"),
    ("spanish", "Spanish"),
    ("french", "French"),
    ("mandarin", "Mandarin"),
    ("other", "Other"),
];

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub location: String,
    pub language: String,
    pub interests: String,
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let gender = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let language = RwSignal::new(String::new());
    let interests = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    install_auth_redirect(session.auth, DEFAULT_AFTER_LOGIN.to_owned(), navigate.clone());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = SignupForm {
            name: name.get(),
            email: email.get(),
            password: password.get(),
            gender: gender.get(),
            location: location.get(),
            language: language.get(),
            interests: interests.get(),
        };
        let profile = match validate_signup_input(&form) {
            Ok(profile) => profile,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let Some(gateway) = session.gateway() else {
                    return;
                };
                let result = gateway.signup(&profile).await;
                session.sync();
                match result {
                    Ok(_) => navigate(DEFAULT_AFTER_LOGIN, leptos_router::NavigateOptions::default()),
                    Err(e) => info.set(crate::util::auth::failure_notice(&e)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (profile, &navigate);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Join the community"</h1>
                <p class="login-card__subtitle">"Create your mentorship portal account"</p>
                <form class="login-form" on:submit=on_submit>
                    <TextField value=name placeholder="Full Name"/>
                    <TextField value=email placeholder="Email" kind="email"/>
                    <TextField value=password placeholder="Password" kind="password"/>
                    <SelectField value=gender placeholder="Select Gender" options=&GENDER_OPTIONS/>
                    <TextField value=location placeholder="Location"/>
                    <SelectField value=language placeholder="Preferred Language" options=&LANGUAGE_OPTIONS/>
                    <TextField value=interests placeholder="Interests (comma separated)"/>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already have an account? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}

#[component]
fn TextField(
    value: RwSignal<String>,
    placeholder: &'static str,
    #[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
    view! {
        <input
            class="login-input"
            type=kind
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

#[component]
fn SelectField(
    value: RwSignal<String>,
    placeholder: &'static str,
    options: &'static [(&'static str, &'static str)],
) -> impl IntoView {
    view! {
        <select
            class="login-input"
            prop:value=move || value.get()
            on:change=move |ev| value.set(event_target_value(&ev))
        >
            <option value="">{placeholder}</option>
            {options
                .iter()
                .map(|(option, label)| view! { <option value=*option>{*label}</option> })
                .collect_view()}
        </select>
    }
}

/// Check required fields and drop blank optional ones.
pub fn validate_signup_input(form: &SignupForm) -> Result<SignupProfile, &'static str> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err("Name, email and password are required.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    Ok(SignupProfile {
        name: name.to_owned(),
        email: email.to_owned(),
        password: form.password.clone(),
        gender: optional(&form.gender),
        location: optional(&form.location),
        language: optional(&form.language),
        interests: optional(&form.interests),
    })
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
