//! Pure view-tree rendering for one dialog.
//!
//! [`render_dialog`] turns current properties and instance ids into an abstract element tree. The
//! embedding layer (see [`crate::components`]) is responsible for turning it into live DOM. Click
//! handlers are described as the [`DialogAction`] they dispatch.

use std::collections::BTreeMap;

use dialog_host::{MessageBundle, ThemeResolver, CLOSE_MESSAGE_KEY};

use crate::{
    model::{DialogIds, DialogProps},
    reducer::DialogAction,
};

/// Semantic class keys resolved through the active theme.
pub mod classes {
    /// Outer container.
    pub const ROOT: &str = "root";
    /// Main dialog region.
    pub const MAIN: &str = "main";
    /// Title block.
    pub const TITLE: &str = "title";
    /// Close control.
    pub const CLOSE: &str = "close";
    /// Icon inside the close control.
    pub const CLOSE_ICON: &str = "closeIcon";
    /// Content region wrapping caller children.
    pub const CONTENT: &str = "content";
    /// Visible underlay styling.
    pub const UNDERLAY_VISIBLE: &str = "underlayVisible";
    /// Default enter animation.
    pub const ENTER: &str = "enter";
    /// Default exit animation.
    pub const EXIT: &str = "exit";

    /// Fixed underlay class applied regardless of theme.
    pub const FIXED_UNDERLAY: &str = "dialog-underlay";
    /// Fixed underlay enter animation.
    pub const FIXED_FADE_IN: &str = "dialog-fade-in";
    /// Fixed underlay exit animation.
    pub const FIXED_FADE_OUT: &str = "dialog-fade-out";

    /// Nested-widget key under which close icon overrides live in `DialogProps::classes`.
    pub const ICON_WIDGET: &str = "icon";
}

/// Attribute carrying the exit animation class for the embedding stylesheet.
pub const EXIT_ANIMATION_ATTRIBUTE: &str = "data-exit-animation";

/// Fallback when the locale bundle lacks a close phrase.
const DEFAULT_CLOSE_PHRASE: &str = "close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Element tags produced by the dialog.
pub enum ElementTag {
    /// `<div>`.
    Div,
    /// `<button>`.
    Button,
    /// `<span>`.
    Span,
}

#[derive(Debug, Clone, PartialEq)]
/// Child entry of a [`ViewNode`].
pub enum ViewChild {
    /// Nested element.
    Element(ViewNode),
    /// Text node.
    Text(String),
    /// Placeholder for caller-supplied children.
    Slot,
}

#[derive(Debug, Clone, PartialEq)]
/// Abstract element description.
pub struct ViewNode {
    /// Element tag.
    pub tag: ElementTag,
    /// Stable key, unique within the tree.
    pub key: &'static str,
    /// DOM id.
    pub id: Option<String>,
    /// Resolved visual classes.
    pub classes: Vec<String>,
    /// Remaining attributes (role, ARIA, tabindex, type).
    pub attributes: BTreeMap<String, String>,
    /// Action dispatched on click; the click must not propagate further.
    pub on_click: Option<DialogAction>,
    /// Animation class applied when the element enters.
    pub enter_animation: Option<String>,
    /// Animation class applied when the element leaves.
    pub exit_animation: Option<String>,
    /// Children in document order.
    pub children: Vec<ViewChild>,
}

impl ViewNode {
    fn new(tag: ElementTag, key: &'static str) -> Self {
        Self {
            tag,
            key,
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            on_click: None,
            enter_animation: None,
            exit_animation: None,
            children: Vec::new(),
        }
    }

    fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    fn with_child(mut self, child: ViewChild) -> Self {
        self.children.push(child);
        self
    }

    /// Finds the first element with `key` in this subtree, depth first.
    pub fn find(&self, key: &str) -> Option<&ViewNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            ViewChild::Element(node) => node.find(key),
            ViewChild::Text(_) | ViewChild::Slot => None,
        })
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                ViewChild::Element(node) => text.push_str(&node.text_content()),
                ViewChild::Text(value) => text.push_str(value),
                ViewChild::Slot => {}
            }
        }
        text
    }

    /// Returns the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the text of the `index`-th child when it is a text node.
    pub fn text_at(&self, index: usize) -> Option<&str> {
        match self.children.get(index) {
            Some(ViewChild::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Shape of the direct children, ignoring their attributes and text.
    ///
    /// Two renders with equal layouts can be applied by patching the existing elements.
    pub fn layout(&self) -> Vec<LayoutChild> {
        self.children
            .iter()
            .enumerate()
            .map(|(index, child)| match child {
                ViewChild::Element(node) => LayoutChild::Element {
                    key: node.key,
                    tag: node.tag,
                    clickable: node.on_click.is_some(),
                },
                ViewChild::Text(_) => LayoutChild::Text(index),
                ViewChild::Slot => LayoutChild::Slot,
            })
            .collect()
    }

    /// Every DOM attribute of this element, including `id`, `class` and the exit animation hook.
    ///
    /// The enter animation is applied as a class.
    pub fn dom_attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = self.attributes.clone();
        if let Some(id) = &self.id {
            attributes.insert("id".to_string(), id.clone());
        }
        let class_list: Vec<&str> = self
            .classes
            .iter()
            .chain(self.enter_animation.iter())
            .map(String::as_str)
            .collect();
        if !class_list.is_empty() {
            attributes.insert("class".to_string(), class_list.join(" "));
        }
        if let Some(exit_animation) = &self.exit_animation {
            attributes.insert(EXIT_ANIMATION_ATTRIBUTE.to_string(), exit_animation.clone());
        }
        attributes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One entry of [`ViewNode::layout`].
pub enum LayoutChild {
    /// Nested element identified by its key.
    Element {
        /// Key of the nested element.
        key: &'static str,
        /// Tag of the nested element.
        tag: ElementTag,
        /// Whether the element handles clicks (and stops their propagation).
        clickable: bool,
    },
    /// Text node at this child index.
    Text(usize),
    /// Caller children.
    Slot,
}

/// Everything [`render_dialog`] reads.
pub struct DialogRenderInput<'a> {
    /// Current properties.
    pub props: &'a DialogProps,
    /// Instance ids.
    pub ids: &'a DialogIds,
    /// Active theme (instance override or host theme).
    pub theme: &'a dyn ThemeResolver,
    /// Common message bundle for the active locale.
    pub messages: &'a MessageBundle,
}

impl DialogRenderInput<'_> {
    fn classes(&self, class_name: &str) -> Vec<String> {
        let mut resolved: Vec<String> = self.theme.class(class_name).into_iter().collect();
        if let Some(extra) = self.props.extra_classes.get(class_name) {
            resolved.extend(extra.split_whitespace().map(str::to_string));
        }
        resolved
    }

    fn icon_classes(&self) -> Vec<String> {
        let mut resolved = self.classes(classes::CLOSE_ICON);
        if let Some(overrides) = self
            .props
            .classes
            .get(classes::ICON_WIDGET)
            .and_then(|widget| widget.get(classes::ROOT))
        {
            resolved.extend(overrides.iter().cloned());
        }
        resolved
    }
}

/// Close text used when the caller supplies none: the localized phrase followed by the title.
pub fn default_close_text(messages: &MessageBundle, title: &str) -> String {
    let phrase = messages.get_or(CLOSE_MESSAGE_KEY, DEFAULT_CLOSE_PHRASE);
    if title.is_empty() {
        phrase.to_string()
    } else {
        format!("{phrase} {title}")
    }
}

/// Normalizes caller ARIA keys to lowercase `aria-*` attribute names.
pub fn format_aria_attributes(aria: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    aria.iter()
        .filter_map(|(key, value)| {
            let key = key.trim().to_ascii_lowercase();
            let name = key.strip_prefix("aria-").unwrap_or(&key);
            (!name.is_empty()).then(|| (format!("aria-{name}"), value.clone()))
        })
        .collect()
}

/// Renders the dialog tree for the current properties.
///
/// A closed dialog renders only its empty outer container.
pub fn render_dialog(input: &DialogRenderInput<'_>) -> ViewNode {
    let root = ViewNode::new(ElementTag::Div, "root").with_classes(input.classes(classes::ROOT));
    if !input.props.open {
        return root;
    }

    root.with_child(ViewChild::Element(render_underlay(input)))
        .with_child(ViewChild::Element(render_main(input)))
}

fn render_underlay(input: &DialogRenderInput<'_>) -> ViewNode {
    let mut underlay_classes = if input.props.underlay {
        input.classes(classes::UNDERLAY_VISIBLE)
    } else {
        Vec::new()
    };
    underlay_classes.push(classes::FIXED_UNDERLAY.to_string());

    let mut underlay = ViewNode::new(ElementTag::Div, "underlay").with_classes(underlay_classes);
    underlay.enter_animation = Some(classes::FIXED_FADE_IN.to_string());
    underlay.exit_animation = Some(classes::FIXED_FADE_OUT.to_string());
    underlay.on_click = Some(DialogAction::UnderlayClicked);
    underlay
}

fn render_main(input: &DialogRenderInput<'_>) -> ViewNode {
    let props = input.props;
    let mut main =
        ViewNode::new(ElementTag::Div, "main").with_classes(input.classes(classes::MAIN));
    main.id = Some(input.ids.main_id().to_string());
    main.attributes = format_aria_attributes(&props.aria);
    main = main
        .with_attribute("aria-labelledby", input.ids.title_id())
        .with_attribute("role", props.role.as_str())
        .with_attribute("tabindex", "-1");
    main.enter_animation = props
        .enter_animation
        .clone()
        .or_else(|| input.theme.class(classes::ENTER));
    main.exit_animation = props
        .exit_animation
        .clone()
        .or_else(|| input.theme.class(classes::EXIT));

    let content = ViewNode::new(ElementTag::Div, "content")
        .with_classes(input.classes(classes::CONTENT))
        .with_child(ViewChild::Slot);

    main.with_child(ViewChild::Element(render_title(input)))
        .with_child(ViewChild::Element(content))
}

fn render_title(input: &DialogRenderInput<'_>) -> ViewNode {
    let props = input.props;
    let mut heading = ViewNode::new(ElementTag::Div, "title-text")
        .with_child(ViewChild::Text(props.title.clone()));
    heading.id = Some(input.ids.title_id().to_string());

    let title = ViewNode::new(ElementTag::Div, "title")
        .with_classes(input.classes(classes::TITLE))
        .with_child(ViewChild::Element(heading));
    if !props.closeable {
        return title;
    }

    let close_text = props
        .close_text
        .clone()
        .unwrap_or_else(|| default_close_text(input.messages, &props.title));
    let icon = ViewNode::new(ElementTag::Span, "close-icon")
        .with_classes(input.icon_classes())
        .with_attribute("aria-hidden", "true");
    let mut close = ViewNode::new(ElementTag::Button, "close")
        .with_classes(input.classes(classes::CLOSE))
        .with_attribute("type", "button")
        .with_child(ViewChild::Text(close_text))
        .with_child(ViewChild::Element(icon));
    close.on_click = Some(DialogAction::CloseButtonActivated);

    title.with_child(ViewChild::Element(close))
}

#[cfg(test)]
mod tests {
    use dialog_host::{NoopThemeResolver, ThemeClassMap};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DialogRole;

    fn theme() -> ThemeClassMap {
        ThemeClassMap::from_pairs([
            ("root", "t-root"),
            ("main", "t-main"),
            ("title", "t-title"),
            ("close", "t-close"),
            ("closeIcon", "t-close-icon"),
            ("content", "t-content"),
            ("underlayVisible", "t-underlay"),
            ("enter", "t-enter"),
            ("exit", "t-exit"),
        ])
    }

    fn english() -> MessageBundle {
        MessageBundle::from_pairs([(CLOSE_MESSAGE_KEY, "close")])
    }

    fn render(props: &DialogProps, theme: &dyn ThemeResolver) -> (ViewNode, DialogIds) {
        let ids = DialogIds::allocate();
        let messages = english();
        let tree = render_dialog(&DialogRenderInput {
            props,
            ids: &ids,
            theme,
            messages: &messages,
        });
        (tree, ids)
    }

    #[test]
    fn closed_dialog_renders_only_the_outer_container() {
        let (tree, _) = render(&DialogProps::default(), &theme());

        assert_eq!(tree.key, "root");
        assert_eq!(tree.classes, vec!["t-root".to_string()]);
        assert!(tree.children.is_empty());
    }

    #[test]
    fn open_dialog_wires_title_association_and_role() {
        let props = DialogProps {
            open: true,
            title: "Settings".to_string(),
            role: DialogRole::AlertDialog,
            ..DialogProps::default()
        };
        let (tree, ids) = render(&props, &theme());

        let main = tree.find("main").expect("main region");
        assert_eq!(main.id.as_deref(), Some(ids.main_id()));
        assert_eq!(main.attribute("aria-labelledby"), Some(ids.title_id()));
        assert_eq!(main.attribute("role"), Some("alertdialog"));
        assert_eq!(main.attribute("tabindex"), Some("-1"));
        assert_eq!(main.enter_animation.as_deref(), Some("t-enter"));
        assert_eq!(main.exit_animation.as_deref(), Some("t-exit"));

        let heading = tree.find("title-text").expect("title text");
        assert_eq!(heading.id.as_deref(), Some(ids.title_id()));
        assert_eq!(heading.text_content(), "Settings");
        assert_eq!(
            tree.find("content").map(|content| content.children.clone()),
            Some(vec![ViewChild::Slot])
        );
    }

    #[test]
    fn default_close_text_joins_localized_phrase_and_title() {
        let props = DialogProps {
            open: true,
            title: "Preferences".to_string(),
            ..DialogProps::default()
        };
        let (tree, _) = render(&props, &theme());

        let close = tree.find("close").expect("close control");
        assert_eq!(close.text_content(), "close Preferences");
        assert_eq!(close.on_click, Some(DialogAction::CloseButtonActivated));
        assert_eq!(close.attribute("type"), Some("button"));
    }

    #[test]
    fn explicit_close_text_wins_and_uncloseable_hides_the_control() {
        let props = DialogProps {
            open: true,
            title: "Preferences".to_string(),
            close_text: Some("Dismiss".to_string()),
            ..DialogProps::default()
        };
        let (tree, _) = render(&props, &theme());
        assert_eq!(tree.find("close").map(ViewNode::text_content), Some("Dismiss".to_string()));

        let props = DialogProps {
            closeable: false,
            ..props
        };
        let (tree, _) = render(&props, &theme());
        assert!(tree.find("close").is_none());
    }

    #[test]
    fn underlay_styling_follows_the_underlay_property() {
        let visible = DialogProps {
            open: true,
            underlay: true,
            ..DialogProps::default()
        };
        let (tree, _) = render(&visible, &theme());
        let underlay = tree.find("underlay").expect("underlay");
        assert_eq!(
            underlay.classes,
            vec!["t-underlay".to_string(), classes::FIXED_UNDERLAY.to_string()]
        );
        assert_eq!(underlay.on_click, Some(DialogAction::UnderlayClicked));
        assert_eq!(underlay.enter_animation.as_deref(), Some(classes::FIXED_FADE_IN));

        let hidden = DialogProps {
            underlay: false,
            ..visible
        };
        let (tree, _) = render(&hidden, &theme());
        assert_eq!(
            tree.find("underlay").map(|node| node.classes.clone()),
            Some(vec![classes::FIXED_UNDERLAY.to_string()])
        );
    }

    #[test]
    fn aria_attributes_are_normalized_and_cannot_replace_the_title_link() {
        let props = DialogProps {
            open: true,
            aria: BTreeMap::from([
                ("describedby".to_string(), "help".to_string()),
                ("Aria-Live".to_string(), "polite".to_string()),
                ("labelledby".to_string(), "elsewhere".to_string()),
                (" ".to_string(), "ignored".to_string()),
            ]),
            ..DialogProps::default()
        };
        let (tree, ids) = render(&props, &theme());

        let main = tree.find("main").expect("main region");
        assert_eq!(main.attribute("aria-describedby"), Some("help"));
        assert_eq!(main.attribute("aria-live"), Some("polite"));
        assert_eq!(main.attribute("aria-labelledby"), Some(ids.title_id()));
        assert_eq!(main.attribute("aria-"), None);
    }

    #[test]
    fn extra_classes_and_icon_overrides_append_to_theme_classes() {
        let props = DialogProps {
            open: true,
            extra_classes: BTreeMap::from([("main".to_string(), "wide  tall".to_string())]),
            classes: BTreeMap::from([(
                classes::ICON_WIDGET.to_string(),
                BTreeMap::from([("root".to_string(), vec!["icon-x".to_string()])]),
            )]),
            enter_animation: Some("slide-in".to_string()),
            ..DialogProps::default()
        };
        let (tree, _) = render(&props, &theme());

        assert_eq!(
            tree.find("main").map(|node| node.classes.clone()),
            Some(vec!["t-main".to_string(), "wide".to_string(), "tall".to_string()])
        );
        assert_eq!(
            tree.find("main").and_then(|node| node.enter_animation.clone()),
            Some("slide-in".to_string())
        );
        assert_eq!(
            tree.find("close-icon").map(|node| node.classes.clone()),
            Some(vec!["t-close-icon".to_string(), "icon-x".to_string()])
        );
    }

    #[test]
    fn unthemed_dialog_still_renders_structure() {
        let props = DialogProps {
            open: true,
            ..DialogProps::default()
        };
        let (tree, _) = render(&props, &NoopThemeResolver);

        assert!(tree.classes.is_empty());
        assert_eq!(tree.find("main").and_then(|node| node.enter_animation.clone()), None);
        assert_eq!(tree.find("close").map(ViewNode::text_content), Some("close".to_string()));
    }

    #[test]
    fn dom_attributes_fold_id_classes_and_animations() {
        let props = DialogProps {
            open: true,
            title: "Settings".to_string(),
            ..DialogProps::default()
        };
        let (tree, ids) = render(&props, &theme());

        let main = tree.find("main").expect("main region").dom_attributes();
        assert_eq!(main.get("id").map(String::as_str), Some(ids.main_id()));
        assert_eq!(main.get("class").map(String::as_str), Some("t-main t-enter"));
        assert_eq!(main.get(EXIT_ANIMATION_ATTRIBUTE).map(String::as_str), Some("t-exit"));
        assert_eq!(main.get("role").map(String::as_str), Some("dialog"));

        let heading = tree.find("title-text").expect("title text");
        assert_eq!(heading.text_at(0), Some("Settings"));
        assert_eq!(heading.text_at(1), None);
        assert_eq!(heading.layout(), vec![LayoutChild::Text(0)]);
    }

    #[test]
    fn layout_ignores_text_and_attribute_changes() {
        let first = DialogProps {
            open: true,
            title: "Settings".to_string(),
            ..DialogProps::default()
        };
        let second = DialogProps {
            title: "Profile".to_string(),
            underlay: true,
            aria: BTreeMap::from([("describedby".to_string(), "help".to_string())]),
            ..first.clone()
        };
        let (before, _) = render(&first, &theme());
        let (after, _) = render(&second, &theme());

        for key in ["root", "main", "title", "title-text", "close", "content"] {
            assert_eq!(
                before.find(key).map(ViewNode::layout),
                after.find(key).map(ViewNode::layout),
                "layout of {key}"
            );
        }

        let uncloseable = DialogProps {
            closeable: false,
            ..first
        };
        let (without_close, _) = render(&uncloseable, &theme());
        assert_ne!(
            before.find("title").map(ViewNode::layout),
            without_close.find("title").map(ViewNode::layout)
        );
    }
}
