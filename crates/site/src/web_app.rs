use std::collections::BTreeMap;

use dialog_runtime::{Dialog, DialogRole};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Dialog showcase" />
        <Meta name="description" content="Modal and non-modal dialog demos." />

        <main class="site-root">
            <DialogShowcase />
        </main>
    }
}

#[component]
pub fn DialogShowcase() -> impl IntoView {
    let modal_open = create_rw_signal(false);
    let popover_open = create_rw_signal(false);
    let confirm_open = create_rw_signal(false);
    let open_count = create_rw_signal(0u32);

    let describedby = BTreeMap::from([("describedby".to_string(), "modal-body".to_string())]);

    view! {
        <section class="showcase">
            <h1>"Dialogs"</h1>
            <p>{move || format!("Dialogs opened: {}", open_count.get())}</p>
            <button type="button" on:click=move |_| modal_open.set(true)>"Open modal"</button>
            <button type="button" on:click=move |_| popover_open.set(true)>"Open non-modal"</button>
            <button type="button" on:click=move |_| confirm_open.set(true)>"Delete draft"</button>

            <Dialog
                open=modal_open
                modal=true
                underlay=true
                title="Settings"
                aria=describedby
                on_open=move |_| open_count.update(|count| *count += 1)
                on_request_close=move |_| modal_open.set(false)
            >
                <p id="modal-body">
                    "Focus stays inside until you press Escape or the close button."
                </p>
                <input type="text" placeholder="Display name" />
            </Dialog>

            <Dialog
                open=popover_open
                title="Quick note"
                on_open=move |_| open_count.update(|count| *count += 1)
                on_request_close=move |_| popover_open.set(false)
            >
                <p>"Click outside or move focus away to dismiss."</p>
            </Dialog>

            <Dialog
                open=confirm_open
                modal=true
                underlay=true
                closeable=false
                role=DialogRole::AlertDialog
                title="Delete draft?"
                on_open=move |_| open_count.update(|count| *count += 1)
            >
                <p>"This cannot be undone."</p>
                <button type="button" on:click=move |_| confirm_open.set(false)>"Delete"</button>
                <button type="button" on:click=move |_| confirm_open.set(false)>"Keep"</button>
            </Dialog>
        </section>
    }
}
