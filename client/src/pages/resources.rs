//! Resource directory with category, search, and attribute filters.
//!
//! DESIGN
//! ======
//! Filter changes re-query the backend. Each fetch takes a sequence number
//! and only the latest one may write results, so a slow reply for an older
//! filter set never overwrites a newer listing. A successful submission from
//! the add-resource form bumps a refresh counter that re-runs the same fetch.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use leptos::prelude::*;

use crate::net::types::{NewResource, PortalStats, Resource};
use crate::state::resources::{
    ANY_CATEGORY, DURATION_OPTIONS, FilterField, KIND_OPTIONS, RATING_OPTIONS, ResourceFilters,
};
use crate::util::auth::ViewLiveness;

#[component]
pub fn ResourcesPage() -> impl IntoView {
    let session = expect_context::<crate::state::auth::SessionContext>();
    let filters = RwSignal::new(ResourceFilters::default());
    let categories = RwSignal::new(vec![ANY_CATEGORY.to_owned()]);
    let resources = RwSignal::new(Vec::<Resource>::new());
    let loading = RwSignal::new(true);
    let info = RwSignal::new(String::new());
    let stats = RwSignal::new(PortalStats::new());
    let refresh = RwSignal::new(0_u32);
    let liveness = ViewLiveness::new();

    #[cfg(feature = "hydrate")]
    {
        use crate::util::auth::run_while_alive;

        let query = Memo::new(move |_| filters.with(ResourceFilters::to_query));
        let latest = StoredValue::new(0_u64);

        let categories_alive = liveness.clone();
        leptos::task::spawn_local(async move {
            let Some(gateway) = session.gateway() else {
                return;
            };
            match run_while_alive(&categories_alive, gateway.fetch_categories()).await {
                Some(Ok(names)) => categories.set(crate::state::resources::category_options(names)),
                Some(Err(e)) => log::warn!("categories unavailable: {e}"),
                None => {}
            }
        });

        let stats_alive = liveness.clone();
        leptos::task::spawn_local(async move {
            let Some(gateway) = session.gateway() else {
                return;
            };
            match run_while_alive(&stats_alive, gateway.fetch_stats()).await {
                Some(Ok(counters)) => stats.set(counters),
                Some(Err(e)) => log::warn!("directory stats unavailable: {e}"),
                None => {}
            }
        });

        let fetch_alive = liveness.clone();
        Effect::new(move || {
            refresh.track();
            let query = query.get();
            latest.update_value(|n| *n += 1);
            let seq = latest.get_value();
            loading.set(true);
            let alive = fetch_alive.clone();
            leptos::task::spawn_local(async move {
                let Some(gateway) = session.gateway() else {
                    return;
                };
                let Some(result) = run_while_alive(&alive, gateway.fetch_resources(&query)).await else {
                    return;
                };
                if latest.try_get_value() != Some(seq) {
                    return;
                }
                match result {
                    Ok(list) => {
                        resources.set(list);
                        info.set(String::new());
                    }
                    Err(e) => {
                        info.set(e.to_string());
                        session.sync();
                    }
                }
                loading.set(false);
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session, refresh);

    on_cleanup(move || liveness.dispose());

    let select = move |label: &'static str, field: FilterField, options: Vec<String>| {
        view! {
            <label class="resources-filter">
                <span>{label}</span>
                <select
                    prop:value=move || filters.with(|f| current_value(f, field).to_owned())
                    on:change=move |ev| filters.update(|f| f.set(field, event_target_value(&ev)))
                >
                    {options
                        .into_iter()
                        .map(|o| {
                            let label = o.clone();
                            view! { <option value=o>{label}</option> }
                        })
                        .collect_view()}
                </select>
            </label>
        }
    };

    view! {
        <div class="resources-page">
            <header class="resources-header">
                <h1>"Resource Directory"</h1>
                <a href="/dashboard">"Dashboard"</a>
            </header>

            <ul class="resources-stats">
                {move || {
                    stats
                        .get()
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <li class="resources-stat">
                                    <strong>{format_count(value)}</strong>
                                    <span>{label}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>

            <div class="resources-toolbar">
                <input
                    class="resources-search"
                    type="search"
                    placeholder="Search resources..."
                    prop:value=move || filters.with(|f| f.search.clone())
                    on:input=move |ev| filters.update(|f| f.search = event_target_value(&ev))
                />
                <button
                    class="resources-filter-toggle"
                    on:click=move |_| filters.update(ResourceFilters::toggle_expanded)
                >
                    "Filters"
                </button>
                <Show when=move || filters.with(ResourceFilters::is_filtered)>
                    <button
                        class="resources-filter-clear"
                        on:click=move |_| filters.update(ResourceFilters::clear)
                    >
                        "Clear filters"
                    </button>
                </Show>
            </div>

            <nav class="resources-categories">
                {move || {
                    categories
                        .get()
                        .into_iter()
                        .map(|name| {
                            let selected = name.clone();
                            let active = move || filters.with(|f| f.category == selected);
                            let pick = name.clone();
                            view! {
                                <button
                                    class=move || {
                                        if active() {
                                            "resources-category resources-category--active"
                                        } else {
                                            "resources-category"
                                        }
                                    }
                                    on:click=move |_| filters.update(|f| f.set(FilterField::Category, pick.clone()))
                                >
                                    {name}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </nav>

            <Show when=move || filters.with(|f| f.expanded)>
                <div class="resources-filters">
                    {select("Type", FilterField::Kind, to_owned_options(&KIND_OPTIONS))}
                    {select("Duration", FilterField::Duration, to_owned_options(&DURATION_OPTIONS))}
                    {select("Rating", FilterField::Rating, to_owned_options(&RATING_OPTIONS))}
                </div>
            </Show>

            <AddResourceForm categories=categories refresh=refresh/>

            <Show when=move || !info.get().is_empty()>
                <p class="resources-message">{move || info.get()}</p>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="resources-loading">"Loading resources..."</p> }
            >
                <Show
                    when=move || resources.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="resources-empty">"No resources match these filters."</p> }
                >
                    <ul class="resources-list">
                        <For
                            each=move || resources.get()
                            key=|r| r.id.clone()
                            children=|r: Resource| {
                                let facts = resource_facts(&r);
                                view! {
                                    <li class="resource-card">
                                        <h3>{r.title}</h3>
                                        <span class="resource-card__category">{r.category}</span>
                                        <p>{r.description}</p>
                                        <ul class="resource-card__facts">
                                            {facts.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                                        </ul>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

/// Inline form for `POST /add-resource`. The listing reloads after a
/// successful submission.
#[component]
fn AddResourceForm(categories: RwSignal<Vec<String>>, refresh: RwSignal<u32>) -> impl IntoView {
    let session = expect_context::<crate::state::auth::SessionContext>();
    let title = RwSignal::new(String::new());
    let link = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let notice = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let user_id = session.auth.with(|a| a.user.as_ref().map(|u| u.id.clone()));
        let draft = match validate_new_resource(
            &title.get(),
            &link.get(),
            &category.get(),
            &description.get(),
            user_id.as_deref(),
        ) {
            Ok(draft) => draft,
            Err(msg) => {
                notice.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        notice.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let Some(gateway) = session.gateway() else {
                let _ = busy.try_set(false);
                return;
            };
            match gateway.add_resource(&draft).await {
                Ok(message) => {
                    let _ = notice.try_set(message.unwrap_or_else(|| "Resource added.".to_owned()));
                    for field in [title, link, category, description] {
                        let _ = field.try_set(String::new());
                    }
                    let _ = refresh.try_update(|n| *n = n.wrapping_add(1));
                }
                Err(e) => {
                    let _ = notice.try_set(crate::util::auth::failure_notice(&e));
                    session.sync();
                }
            }
            let _ = busy.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (draft, refresh);
    };

    let text_input = move |placeholder: &'static str, field: RwSignal<String>| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || field.get()
                on:input=move |ev| field.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form class="resources-add" on:submit=on_submit>
            <h2>"Share a resource"</h2>
            {text_input("Title", title)}
            {text_input("https://...", link)}
            <select
                prop:value=move || category.get()
                on:change=move |ev| category.set(event_target_value(&ev))
            >
                <option value="">"Choose a category"</option>
                {move || {
                    categories
                        .get()
                        .into_iter()
                        .filter(|name| name != ANY_CATEGORY)
                        .map(|name| {
                            let label = name.clone();
                            view! { <option value=name>{label}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <textarea
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            ></textarea>
            <button type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Submitting..." } else { "Add resource" }}
            </button>
            <Show when=move || !notice.get().is_empty()>
                <p class="resources-add__notice">{move || notice.get()}</p>
            </Show>
        </form>
    }
}

/// Check the add-resource form and build its request body.
pub fn validate_new_resource(
    title: &str,
    link: &str,
    category: &str,
    description: &str,
    user_id: Option<&str>,
) -> Result<NewResource, &'static str> {
    let title = title.trim();
    let link = link.trim();
    let category = category.trim();
    if title.is_empty() || link.is_empty() || category.is_empty() || category == ANY_CATEGORY {
        return Err("Title, link and category are required.");
    }
    if !(link.starts_with("https://") || link.starts_with("http://")) {
        return Err("Links must start with http:// or https://.");
    }
    let Some(user_id) = user_id.filter(|id| !id.trim().is_empty()) else {
        return Err("Your session has ended. Please log in again.");
    };
    Ok(NewResource {
        title: title.to_owned(),
        link: link.to_owned(),
        category: category.to_owned(),
        description: description.trim().to_owned(),
        user_id: user_id.to_owned(),
    })
}

/// Counter as shown in the stats strip: whole numbers without a fraction.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn current_value(filters: &ResourceFilters, field: FilterField) -> &str {
    match field {
        FilterField::Category => &filters.category,
        FilterField::Kind => &filters.kind,
        FilterField::Duration => &filters.duration,
        FilterField::Rating => &filters.rating,
    }
}

fn to_owned_options(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| (*o).to_owned()).collect()
}

/// Card fact lines for the fields a resource actually carries.
pub fn resource_facts(resource: &Resource) -> Vec<String> {
    let mut facts = Vec::new();
    if let Some(rating) = resource.rating {
        facts.push(format!("{rating}/5"));
    }
    if let Some(duration) = resource.duration.as_deref().filter(|d| !d.trim().is_empty()) {
        facts.push(duration.to_owned());
    }
    if let Some(members) = resource.members.filter(|m| *m > 0) {
        facts.push(format!("{members} members"));
    }
    facts
}
