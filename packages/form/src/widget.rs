use serde::Serialize;

/// One editable widget in a rendered form.
///
/// Widgets are a derived view: the block's JSON payload stays the source of
/// truth, and every leaf carries the content path its edits write back
/// through. Presentation state (collapsed groups, focus) lives in the host
/// and never touches the underlying value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Widget {
    /// Single-line input; `numeric` inputs coerce back to numbers on write
    Text {
        path: String,
        label: String,
        value: String,
        numeric: bool,
        required: bool,
    },

    /// Multi-line input
    Textarea {
        path: String,
        label: String,
        value: String,
        required: bool,
    },

    /// Enumerated choice
    Select {
        path: String,
        label: String,
        value: String,
        options: Vec<String>,
        required: bool,
    },

    /// Asset URL input; the referenced asset is resolved externally
    Media {
        path: String,
        label: String,
        url: String,
        required: bool,
    },

    /// Ordered string list with append / remove-by-index
    TagList {
        path: String,
        label: String,
        tags: Vec<String>,
    },

    /// Collapsible group of an object's property widgets
    Group {
        path: String,
        label: String,
        children: Vec<Widget>,
    },

    /// Homogeneous list; `scalar_items` distinguishes a bare scalar list
    /// from a list of structured groups
    List {
        path: String,
        label: String,
        scalar_items: bool,
        children: Vec<Widget>,
    },

    /// Schema/value shape mismatch; shown unconfigured instead of failing
    Unconfigured {
        path: String,
        label: String,
        reason: String,
    },
}

impl Widget {
    /// The content path this widget (or subtree) writes back through.
    pub fn path(&self) -> &str {
        match self {
            Widget::Text { path, .. }
            | Widget::Textarea { path, .. }
            | Widget::Select { path, .. }
            | Widget::Media { path, .. }
            | Widget::TagList { path, .. }
            | Widget::Group { path, .. }
            | Widget::List { path, .. }
            | Widget::Unconfigured { path, .. } => path,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Widget::Text { label, .. }
            | Widget::Textarea { label, .. }
            | Widget::Select { label, .. }
            | Widget::Media { label, .. }
            | Widget::TagList { label, .. }
            | Widget::Group { label, .. }
            | Widget::List { label, .. }
            | Widget::Unconfigured { label, .. } => label,
        }
    }
}

/// A fully rendered form: the widget per top-level schema property, in
/// schema order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Form {
    pub widgets: Vec<Widget>,
}

impl Form {
    /// Find a widget anywhere in the tree by its content path.
    pub fn find(&self, path: &str) -> Option<&Widget> {
        fn walk<'a>(widget: &'a Widget, path: &str) -> Option<&'a Widget> {
            if widget.path() == path {
                return Some(widget);
            }
            match widget {
                Widget::Group { children, .. } | Widget::List { children, .. } => {
                    children.iter().find_map(|child| walk(child, path))
                }
                _ => None,
            }
        }
        self.widgets.iter().find_map(|widget| walk(widget, path))
    }
}
