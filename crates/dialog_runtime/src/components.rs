//! Leptos embedding of the dialog: reactive properties in, live DOM out.
//!
//! The element structure is mounted once per layout (see [`ViewNode::layout`]); property changes
//! patch attributes and text of the existing elements so caller children and focus survive.

use std::collections::BTreeMap;

use dialog_host::{DialogHostServices, ThemeClassMap};
use leptos::*;

use crate::{
    host::default_host_services,
    instance::DialogInstance,
    model::{DialogCallback, DialogProps as ModelDialogProps, DialogRole},
    reducer::DialogAction,
    view::{ElementTag, LayoutChild, ViewNode},
};

const MAX_SETTLE_PASSES: usize = 4;

#[component]
/// Renders a dialog whose open state is owned by the caller.
///
/// The dialog re-evaluates on every property change and after every document focus change, so
/// the focus trap sees where focus settled. It never closes itself; it calls `on_request_close`.
pub fn Dialog(
    #[prop(into)] open: MaybeSignal<bool>,
    #[prop(optional, into)] modal: MaybeSignal<bool>,
    #[prop(default = MaybeSignal::Static(true), into)] closeable: MaybeSignal<bool>,
    #[prop(optional, into)] underlay: MaybeSignal<bool>,
    #[prop(optional, into)] title: MaybeSignal<String>,
    #[prop(optional, into)] close_text: Option<MaybeSignal<String>>,
    #[prop(optional, into)] role: MaybeSignal<DialogRole>,
    #[prop(optional, into)] enter_animation: Option<MaybeSignal<String>>,
    #[prop(optional, into)] exit_animation: Option<MaybeSignal<String>>,
    #[prop(optional, into)] aria: MaybeSignal<BTreeMap<String, String>>,
    #[prop(optional)] theme: Option<ThemeClassMap>,
    #[prop(optional)] extra_classes: BTreeMap<String, String>,
    #[prop(optional)] classes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    #[prop(optional, into)] on_open: Option<Callback<()>>,
    #[prop(optional, into)] on_request_close: Option<Callback<()>>,
    #[prop(optional)] host: Option<DialogHostServices>,
    children: ChildrenFn,
) -> impl IntoView {
    let instance = DialogInstance::new(host.unwrap_or_else(default_host_services));
    let focus_changed = create_trigger();

    // focusout fires before focusin; wait a frame so the pass sees the settled target.
    let schedule_focus_pass = move || request_animation_frame(move || focus_changed.notify());
    let focus_in_listener = window_event_listener(ev::focusin, move |_| schedule_focus_pass());
    let focus_out_listener = window_event_listener(ev::focusout, move |_| schedule_focus_pass());

    let inputs = DialogInputs {
        open,
        modal,
        closeable,
        underlay,
        title,
        close_text,
        role,
        enter_animation,
        exit_animation,
        aria,
        theme,
        extra_classes,
        classes,
        on_open: on_open.map(|callback| DialogCallback::new(move || callback.call(()))),
        on_request_close: on_request_close
            .map(|callback| DialogCallback::new(move || callback.call(()))),
    };
    let tree = bind_dialog(instance.clone(), inputs, focus_changed);

    on_cleanup({
        let instance = instance.clone();
        move || {
            focus_in_listener.remove();
            focus_out_listener.remove();
            instance.release();
        }
    });

    let mount = Mount {
        tree,
        instance,
        children,
    };
    mount_element("root", ElementTag::Div, false, &mount)
}

/// Reactive property sources of one mounted dialog.
#[derive(Clone)]
pub(crate) struct DialogInputs {
    pub(crate) open: MaybeSignal<bool>,
    pub(crate) modal: MaybeSignal<bool>,
    pub(crate) closeable: MaybeSignal<bool>,
    pub(crate) underlay: MaybeSignal<bool>,
    pub(crate) title: MaybeSignal<String>,
    pub(crate) close_text: Option<MaybeSignal<String>>,
    pub(crate) role: MaybeSignal<DialogRole>,
    pub(crate) enter_animation: Option<MaybeSignal<String>>,
    pub(crate) exit_animation: Option<MaybeSignal<String>>,
    pub(crate) aria: MaybeSignal<BTreeMap<String, String>>,
    pub(crate) theme: Option<ThemeClassMap>,
    pub(crate) extra_classes: BTreeMap<String, String>,
    pub(crate) classes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    pub(crate) on_open: Option<DialogCallback>,
    pub(crate) on_request_close: Option<DialogCallback>,
}

impl DialogInputs {
    /// Current properties; reading tracks every signal source.
    pub(crate) fn read(&self) -> ModelDialogProps {
        ModelDialogProps {
            open: self.open.get(),
            modal: self.modal.get(),
            closeable: self.closeable.get(),
            underlay: self.underlay.get(),
            title: self.title.get(),
            close_text: self.close_text.as_ref().map(|text| text.get()),
            role: self.role.get(),
            enter_animation: self.enter_animation.as_ref().map(|name| name.get()),
            exit_animation: self.exit_animation.as_ref().map(|name| name.get()),
            aria: self.aria.get(),
            theme: self.theme.clone(),
            extra_classes: self.extra_classes.clone(),
            classes: self.classes.clone(),
            on_open: self.on_open.clone(),
            on_request_close: self.on_request_close.clone(),
        }
    }
}

/// Renders until the properties stop changing under the callbacks the pass itself fired.
///
/// Writes made by `on_open` or `on_request_close` during a pass do not re-run the effect that
/// performs the pass, so they are picked up here instead.
pub(crate) fn settle_render(instance: &DialogInstance, inputs: &DialogInputs) -> ViewNode {
    let mut props = inputs.read();
    let mut passes = 1;
    loop {
        let view = instance.render(props.clone());
        let next = inputs.read();
        if next == props {
            return view;
        }
        if passes == MAX_SETTLE_PASSES {
            logging::warn!("dialog properties still changing after {passes} render passes");
            return view;
        }
        props = next;
        passes += 1;
    }
}

/// Creates the render effect and returns the published view tree.
///
/// The tree is republished only when it differs from the previous one.
pub(crate) fn bind_dialog(
    instance: DialogInstance,
    inputs: DialogInputs,
    focus_changed: Trigger,
) -> RwSignal<Option<ViewNode>> {
    let tree = create_rw_signal(None::<ViewNode>);
    create_effect(move |_| {
        focus_changed.track();
        let next = settle_render(&instance, &inputs);
        if tree.with_untracked(|current| current.as_ref() != Some(&next)) {
            tree.set(Some(next));
        }
    });
    tree
}

/// Action bound to the click target `key` in the current tree.
pub(crate) fn click_action(tree: Option<&ViewNode>, key: &str) -> Option<DialogAction> {
    tree.and_then(|root| root.find(key))
        .and_then(|node| node.on_click.clone())
}

#[derive(Clone)]
struct Mount {
    tree: RwSignal<Option<ViewNode>>,
    instance: DialogInstance,
    children: ChildrenFn,
}

fn with_node<T>(
    tree: RwSignal<Option<ViewNode>>,
    key: &'static str,
    f: impl FnOnce(&ViewNode) -> T,
) -> Option<T> {
    tree.with(|root| root.as_ref().and_then(|root| root.find(key)).map(f))
}

fn mount_element(key: &'static str, tag: ElementTag, clickable: bool, mount: &Mount) -> View {
    let tree = mount.tree;
    let node_ref = create_node_ref::<html::AnyElement>();
    let mut element = match tag {
        ElementTag::Div => html::div().into_any(),
        ElementTag::Button => html::button().into_any(),
        ElementTag::Span => html::span().into_any(),
    }
    .node_ref(node_ref);

    create_effect(move |applied: Option<BTreeMap<String, String>>| {
        let next = with_node(tree, key, ViewNode::dom_attributes).unwrap_or_default();
        if let Some(element) = node_ref.get() {
            for stale in applied.iter().flatten().map(|(name, _)| name) {
                if !next.contains_key(stale) {
                    let _ = element.remove_attribute(stale);
                }
            }
            for (name, value) in &next {
                let _ = element.set_attribute(name, value);
            }
        }
        next
    });

    if clickable {
        let instance = mount.instance.clone();
        element = element.on(ev::click, move |ev| {
            ev.stop_propagation();
            if let Some(action) = tree.with_untracked(|root| click_action(root.as_ref(), key)) {
                instance.dispatch(action);
            }
        });
    }

    let layout = create_memo(move |_| with_node(tree, key, ViewNode::layout).unwrap_or_default());
    let mount = mount.clone();
    element
        .child(move || {
            layout
                .get()
                .into_iter()
                .map(|child| mount_child(key, child, &mount))
                .collect_view()
        })
        .into_view()
}

fn mount_child(parent: &'static str, child: LayoutChild, mount: &Mount) -> View {
    match child {
        LayoutChild::Element {
            key,
            tag,
            clickable,
        } => mount_element(key, tag, clickable, mount),
        LayoutChild::Text(index) => {
            let tree = mount.tree;
            (move || {
                with_node(tree, parent, |node| {
                    node.text_at(index).unwrap_or_default().to_string()
                })
                .unwrap_or_default()
            })
            .into_view()
        }
        LayoutChild::Slot => (mount.children)().into_view(),
    }
}
