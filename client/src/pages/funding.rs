//! Funding overview: monthly award totals, summary cards and top projects.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered inside `ProtectedRoute`. Switching the time range re-fetches the
//! statistics; a sequence number keeps a slow reply for the previous range
//! from overwriting the current one. Success stories load once.

#[cfg(test)]
#[path = "funding_test.rs"]
mod funding_test;

use leptos::prelude::*;

use crate::net::types::{FundingEntry, SuccessStory, TimeRange};
use crate::state::funding::{format_usd, monthly_totals, peak, summarize, summary_cards};
use crate::util::auth::ViewLiveness;

#[component]
pub fn FundingPage() -> impl IntoView {
    let session = expect_context::<crate::state::auth::SessionContext>();
    let range = RwSignal::new(TimeRange::default());
    let entries = RwSignal::new(Vec::<FundingEntry>::new());
    let stories = RwSignal::new(Vec::<SuccessStory>::new());
    let loading = RwSignal::new(true);
    let info = RwSignal::new(String::new());
    let liveness = ViewLiveness::new();

    #[cfg(feature = "hydrate")]
    {
        use crate::util::auth::run_while_alive;

        let latest = StoredValue::new(0_u64);

        let stories_alive = liveness.clone();
        leptos::task::spawn_local(async move {
            let Some(gateway) = session.gateway() else {
                return;
            };
            match run_while_alive(&stories_alive, gateway.fetch_success_stories()).await {
                Some(Ok(list)) => stories.set(list),
                Some(Err(e)) => log::warn!("success stories unavailable: {e}"),
                None => {}
            }
        });

        let fetch_alive = liveness.clone();
        Effect::new(move || {
            let selected = range.get();
            latest.update_value(|n| *n += 1);
            let seq = latest.get_value();
            loading.set(true);
            let alive = fetch_alive.clone();
            leptos::task::spawn_local(async move {
                let Some(gateway) = session.gateway() else {
                    return;
                };
                let Some(result) = run_while_alive(&alive, gateway.fetch_funding_statistics(selected)).await else {
                    return;
                };
                if latest.try_get_value() != Some(seq) {
                    return;
                }
                match result {
                    Ok(statistics) => {
                        entries.set(statistics.data_points);
                        info.set(String::new());
                    }
                    Err(e) => {
                        info.set(crate::util::auth::failure_notice(&e));
                        session.sync();
                    }
                }
                loading.set(false);
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    on_cleanup(move || liveness.dispose());

    let months = Memo::new(move |_| entries.with(|list| monthly_totals(list)));
    let cards = Memo::new(move |_| entries.with(|list| summary_cards(&summarize(list))));

    view! {
        <div class="funding-page">
            <header class="funding-header">
                <h1>"Funding Overview"</h1>
                <a href="/dashboard">"Dashboard"</a>
                <div class="funding-range">
                    {TimeRange::ALL
                        .into_iter()
                        .map(|option| {
                            view! {
                                <button
                                    class=move || range_class(option, range.get())
                                    on:click=move |_| range.set(option)
                                >
                                    {option.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </header>

            <Show when=move || !info.get().is_empty()>
                <p class="funding-message">{move || info.get()}</p>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="funding-loading">"Loading funding data..."</p> }
            >
                <ul class="funding-cards">
                    {move || {
                        cards
                            .get()
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <li class="funding-card">
                                        <span>{label}</span>
                                        <strong>{value}</strong>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>

                <Show
                    when=move || months.with(|m| !m.is_empty())
                    fallback=|| view! { <p class="funding-empty">"No funding awarded in this period."</p> }
                >
                    <ol class="funding-chart">
                        {move || {
                            let totals = months.get();
                            let max = peak(&totals);
                            totals
                                .into_iter()
                                .map(|m| {
                                    let width = format!("{:.1}%", m.share_of(max));
                                    view! {
                                        <li class="funding-chart__row">
                                            <span class="funding-chart__month">{m.month}</span>
                                            <div class="funding-chart__bar" style:width=width></div>
                                            <span class="funding-chart__amount">{format_usd(m.total)}</span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ol>
                </Show>
            </Show>

            <section class="funding-stories">
                <h2>"Success Stories"</h2>
                <ul>
                    <For
                        each=move || stories.get()
                        key=|s| s.id.clone()
                        children=|s: SuccessStory| {
                            view! {
                                <li class="funding-story">
                                    <h3>{story_title(&s)}</h3>
                                    <span class="funding-story__amount">{format_usd(s.amount)}</span>
                                    <span class="funding-story__meta">{format!("{} · {}", s.category, s.date)}</span>
                                    {s.description.map(|d| view! { <p>{d}</p> })}
                                </li>
                            }
                        }
                    />
                </ul>
            </section>
        </div>
    }
}

fn range_class(option: TimeRange, selected: TimeRange) -> &'static str {
    if option == selected { "funding-range__option funding-range__option--active" } else { "funding-range__option" }
}

/// Heading for a story card; untitled projects fall back to their category.
pub fn story_title(story: &SuccessStory) -> String {
    let title = story.title.trim();
    if !title.is_empty() {
        return title.to_owned();
    }
    match story.category.trim() {
        "" => "Funded project".to_owned(),
        category => format!("{category} project"),
    }
}
