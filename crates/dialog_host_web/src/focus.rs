//! DOM focus adapter keyed by element id.

use dialog_host::{FocusService, FocusSnapshot};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser focus service backed by `document.activeElement` and `HTMLElement.focus()`.
pub struct WebFocusService;

impl FocusService for WebFocusService {
    fn snapshot(&self, region_id: &str) -> FocusSnapshot {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return FocusSnapshot::outside();
            };
            let Some(region) = document.get_element_by_id(region_id) else {
                return FocusSnapshot::outside();
            };
            let Some(active) = document.active_element() else {
                return FocusSnapshot::outside();
            };
            let active: &web_sys::Node = active.as_ref();
            FocusSnapshot {
                contains_focus: region.contains(Some(active)),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = region_id;
            FocusSnapshot::outside()
        }
    }

    fn focus(&self, region_id: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let region_id = region_id.to_string();
            // The region may only exist once the current render has been applied.
            let callback = Closure::once_into_js(move || {
                let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                    return;
                };
                let Some(element) = document.get_element_by_id(&region_id) else {
                    return;
                };
                if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                    let _ = element.focus();
                }
            });
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = region_id;
    }
}
