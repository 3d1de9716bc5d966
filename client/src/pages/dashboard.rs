//! Dashboard page with the member profile, notifications, achievements,
//! insights and recommended courses.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered inside `ProtectedRoute`, so a verified credential exists when the
//! page mounts. Data calls that discover an expired credential clear the
//! session and the guard takes the visitor back to login.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::types::{Achievement, Course, Insight, Notification, UserProfile};
use crate::state::auth::SessionContext;
use crate::util::auth::ViewLiveness;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let profile = RwSignal::new(None::<UserProfile>);
    let notifications = RwSignal::new(Vec::<Notification>::new());
    let achievements = RwSignal::new(Vec::<Achievement>::new());
    let insights = RwSignal::new(Vec::<Insight>::new());
    let courses = RwSignal::new(Vec::<Course>::new());
    let info = RwSignal::new(String::new());
    let liveness = ViewLiveness::new();

    #[cfg(feature = "hydrate")]
    {
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            let Some(gateway) = session.gateway() else {
                return;
            };
            let loaded = crate::util::auth::run_while_alive(&liveness, async {
                futures::join!(
                    gateway.fetch_profile(),
                    gateway.fetch_notifications(),
                    gateway.fetch_achievements(),
                    gateway.fetch_insights(),
                    gateway.fetch_courses(),
                )
            })
            .await;
            let Some((profile_result, notifications_result, achievements_result, insights_result, courses_result)) =
                loaded
            else {
                return;
            };
            match profile_result {
                Ok(p) => profile.set(Some(p)),
                Err(e) => info.set(e.to_string()),
            }
            match notifications_result {
                Ok(list) => notifications.set(list),
                Err(e) => info.set(e.to_string()),
            }
            // Secondary panels stay empty on failure.
            match achievements_result {
                Ok(list) => achievements.set(list),
                Err(e) => log::warn!("achievements unavailable: {e}"),
            }
            match insights_result {
                Ok(list) => insights.set(list),
                Err(e) => log::warn!("insights unavailable: {e}"),
            }
            match courses_result {
                Ok(list) => courses.set(list),
                Err(e) => log::warn!("courses unavailable: {e}"),
            }
            session.sync();
        });
    }

    on_cleanup(move || liveness.dispose());

    let on_mark_read = Callback::new(move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let Some(gateway) = session.gateway() else {
                return;
            };
            match gateway.mark_notification_read(&id).await {
                Ok(()) => {
                    let _ = notifications.try_update(|list| mark_read_locally(list, &id));
                }
                Err(e) => {
                    let _ = info.try_set(e.to_string());
                    session.sync();
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    // The view leaves as soon as the session is gone; the backend is told
    // afterwards.
    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(gateway) = session.gateway() else {
                return;
            };
            let token = gateway.end_session();
            session.sync();
            if let Some(token) = token {
                leptos::task::spawn_local(async move { gateway.notify_logout(token).await });
            }
        }
    };

    let display_name = move || {
        let fallback = session.auth.with(|a| a.user.as_ref().map(|u| u.name.clone()));
        greeting_name(profile.get().as_ref(), fallback.as_deref())
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <div class="dashboard-avatar">
                    {move || match profile.get() {
                        Some(UserProfile { avatar: Some(src), .. }) => {
                            view! { <img class="dashboard-avatar__img" src=src alt="avatar"/> }.into_any()
                        }
                        Some(p) => view! { <span>{p.display_initials()}</span> }.into_any(),
                        None => view! { <span></span> }.into_any(),
                    }}
                </div>
                <div class="dashboard-header__identity">
                    <h1>{move || format!("Welcome back, {}", display_name())}</h1>
                    <p class="dashboard-header__title">
                        {move || profile.get().and_then(|p| p.title).unwrap_or_default()}
                    </p>
                </div>
                <nav class="dashboard-header__nav">
                    <a href="/resources">"Resources"</a>
                    <a href="/funding">"Funding"</a>
                    <button class="dashboard-logout" on:click=on_logout>
                        "Log out"
                    </button>
                </nav>
            </header>

            <Show when=move || !info.get().is_empty()>
                <p class="dashboard-message">{move || info.get()}</p>
            </Show>

            <section class="dashboard-badges">
                <h2>"Badges"</h2>
                <ul>
                    {move || {
                        profile
                            .get()
                            .map(|p| p.badges)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|badge| view! { <li class="dashboard-badge">{badge}</li> })
                            .collect_view()
                    }}
                </ul>
                <h2>"Expertise"</h2>
                <ul>
                    {move || {
                        profile
                            .get()
                            .map(|p| p.expertise)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|skill| view! { <li class="dashboard-skill">{skill}</li> })
                            .collect_view()
                    }}
                </ul>
            </section>

            <section class="dashboard-achievements">
                <h2>"Achievements"</h2>
                <ul>
                    {move || {
                        achievements
                            .get()
                            .into_iter()
                            .map(|a| {
                                view! {
                                    <li class="dashboard-achievement">
                                        <span>{a.title}</span>
                                        <div class="dashboard-progress">
                                            <div
                                                class="dashboard-progress__bar"
                                                style:width=progress_width(a.progress)
                                            ></div>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </section>

            <section class="dashboard-insights">
                <h2>"Insights"</h2>
                <ul>
                    {move || {
                        insights
                            .get()
                            .into_iter()
                            .map(|i| {
                                view! {
                                    <li class="dashboard-insight" data-kind=i.kind>
                                        {i.title}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </section>

            <section class="dashboard-courses">
                <h2>"Recommended Courses"</h2>
                <ul>
                    {move || {
                        courses
                            .get()
                            .into_iter()
                            .map(|c| {
                                view! {
                                    <li class="dashboard-course">
                                        {match c.link {
                                            Some(href) => view! { <a href=href>{c.name}</a> }.into_any(),
                                            None => view! { <strong>{c.name}</strong> }.into_any(),
                                        }}
                                        {c.description.map(|d| view! { <p>{d}</p> })}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </section>

            <section class="dashboard-notifications">
                <h2>
                    "Notifications "
                    <span class="dashboard-notifications__count">
                        {move || notifications.with(|list| unread_count(list))}
                    </span>
                </h2>
                <ul>
                    <For
                        each=move || notifications.get()
                        key=|n| (n.id.clone(), n.read)
                        children=move |n: Notification| {
                            let id = n.id.clone();
                            let class = if n.read {
                                "dashboard-notification dashboard-notification--read"
                            } else {
                                "dashboard-notification"
                            };
                            view! {
                                <li class=class>
                                    <strong>{n.title}</strong>
                                    {n.message.map(|m| view! { <p>{m}</p> })}
                                    <span class="dashboard-notification__time">{n.time}</span>
                                    {(!n.read)
                                        .then(|| {
                                            view! {
                                                <button on:click=move |_| on_mark_read.run(id.clone())>
                                                    "Mark as read"
                                                </button>
                                            }
                                        })}
                                </li>
                            }
                        }
                    />
                </ul>
            </section>
        </div>
    }
}

/// CSS width for an achievement bar; progress is a percentage.
pub fn progress_width(progress: f64) -> String {
    let clamped = if progress.is_finite() { progress.clamp(0.0, 100.0) } else { 0.0 };
    format!("{clamped:.0}%")
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Flag `id` read in the local list after the backend confirmed it.
pub fn mark_read_locally(notifications: &mut [Notification], id: &str) {
    for n in notifications.iter_mut().filter(|n| n.id == id) {
        n.read = true;
    }
}

/// Name for the greeting: profile name, then session user name, then "there".
pub fn greeting_name(profile: Option<&UserProfile>, fallback: Option<&str>) -> String {
    profile
        .map(|p| p.name.trim())
        .filter(|name| !name.is_empty())
        .or_else(|| fallback.map(str::trim).filter(|name| !name.is_empty()))
        .unwrap_or("there")
        .to_owned()
}
