//! Route guard wrapping protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every authenticated route in `app.rs`. Verification runs only in the
//! browser; during SSR the guard renders its loading state and hydration
//! takes over from there.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::util::auth::{GuardState, ViewLiveness, login_redirect_path};

/// Render `children` only once the stored credential is verified.
///
/// Rejected credentials redirect to the login page with the attempted path
/// as `next`. An unreachable backend shows an error with a Retry button.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let guard = RwSignal::new(GuardState::Checking);
    let attempt = RwSignal::new(0_u32);
    let liveness = ViewLiveness::new();

    #[cfg(feature = "hydrate")]
    {
        let session = expect_context::<crate::state::auth::SessionContext>();
        let liveness = liveness.clone();
        Effect::new(move || {
            attempt.track();
            guard.set(GuardState::Checking);
            let Some(gateway) = session.gateway() else {
                return;
            };
            let liveness = liveness.clone();
            leptos::task::spawn_local(async move {
                let decide = crate::util::auth::resolve_guard(&gateway);
                if let Some(state) = crate::util::auth::run_while_alive(&liveness, decide).await {
                    log::debug!("route guard: {state:?}");
                    session.sync();
                    guard.set(state);
                }
            });
        });

        // A data call that hits an expired credential, or a logout, clears the
        // session after access was granted.
        Effect::new(move || {
            let lost = session.auth.with(|a| !a.loading && !a.is_authenticated());
            if lost && guard.get_untracked() == GuardState::Allowed {
                guard.set(GuardState::Redirect);
            }
        });
    }

    on_cleanup(move || liveness.dispose());

    let navigate = use_navigate();
    let location = use_location();
    Effect::new(move || {
        if guard.get() == GuardState::Redirect {
            let target = login_redirect_path(&location.pathname.get_untracked());
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        {move || match guard.get() {
            GuardState::Allowed => children().into_any(),
            GuardState::Unreachable(message) => {
                view! {
                    <div class="route-guard route-guard--error">
                        <p class="route-guard__message">{message}</p>
                        <button
                            class="route-guard__retry"
                            on:click=move |_| attempt.update(|n| *n += 1)
                        >
                            "Retry"
                        </button>
                    </div>
                }
                    .into_any()
            }
            GuardState::Checking | GuardState::Redirect => {
                view! {
                    <div class="route-guard route-guard--loading">
                        <span class="route-guard__spinner"></span>
                        <p>"Checking your session..."</p>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
