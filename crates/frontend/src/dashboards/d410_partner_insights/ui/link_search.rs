use contracts::dashboards::d410_partner_insights::LinkOption;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d410_partner_insights::api;

/// Pause after the last keystroke before the lookup fires
const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Text input with live-search suggestions for one link doctype.
///
/// Keystrokes only drive the suggestion list; `on_pick` fires when an option
/// is chosen.
#[component]
pub fn LinkSearch(
    doctype: &'static str,
    #[prop(into)] placeholder: String,
    on_pick: Callback<LinkOption>,
) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let options = RwSignal::new(Vec::<LinkOption>::new());
    let open = RwSignal::new(false);
    let search_seq = StoredValue::new(0u64);
    // Clearing the input after a pick must not reopen the list
    let skip_next_search = StoredValue::new(false);

    let search = move |txt: String| {
        search_seq.update_value(|s| *s += 1);
        let seq = search_seq.get_value();

        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if search_seq.get_value() != seq {
                return;
            }
            match api::get_link_options(doctype, &txt).await {
                Ok(found) => {
                    // A newer keystroke owns the list by now
                    if search_seq.get_value() == seq {
                        options.set(found);
                        open.set(true);
                    }
                }
                Err(e) => log::error!("D410: {} lookup failed: {}", doctype, e),
            }
        });
    };

    Effect::watch(
        move || query.get(),
        move |txt, _, _| {
            if skip_next_search.get_value() {
                skip_next_search.set_value(false);
                return;
            }
            search(txt.clone())
        },
        false,
    );

    let pick = move |option: LinkOption| {
        open.set(false);
        search_seq.update_value(|s| *s += 1);
        if !query.get_untracked().is_empty() {
            skip_next_search.set_value(true);
            query.set(String::new());
        }
        on_pick.run(option);
    };

    view! {
        <div
            class="link-search"
            on:focusin=move |_| search(query.get_untracked())
            on:focusout=move |_| open.set(false)
        >
            <Input value=query placeholder=placeholder />
            <Show when=move || open.get() && !options.with(|o| o.is_empty())>
                <div class="link-search__options">
                    <For
                        each=move || options.get()
                        key=|option| option.value.clone()
                        children=move |option| {
                            let label = if option.label == option.value {
                                option.value.clone()
                            } else {
                                format!("{}: {}", option.value, option.label)
                            };
                            view! {
                                <div
                                    class="link-search__option"
                                    on:mousedown=move |ev| {
                                        ev.prevent_default();
                                        pick(option.clone());
                                    }
                                >
                                    {label}
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
