#![forbid(unsafe_code)]

//! Per-row presentation data and a plain-text rendering of the list.
//!
//! A list renderer needs, for each row: how far to indent it, whether to show
//! the expand affordance and in which state, the two text lines, and whether
//! to draw the alternate background. Rows share one fixed height.

use unicode_width::UnicodeWidthStr;
use vtree_core::ViewTree;

use crate::config::InspectorConfig;
use crate::entry::EntryView;
use crate::model::ExpansionList;

/// State of the expand/collapse affordance on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// The view has no children; no affordance is shown.
    Hidden,
    /// Children available, not shown.
    Collapsed,
    /// Children shown.
    Expanded,
}

impl Affordance {
    fn of(view: &EntryView<'_>) -> Self {
        match (view.has_children(), view.is_expanded()) {
            (false, _) => Self::Hidden,
            (true, false) => Self::Collapsed,
            (true, true) => Self::Expanded,
        }
    }

    /// Glyph drawn for this state.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Hidden => " ",
            Self::Collapsed => "\u{25B6}",
            Self::Expanded => "\u{25BC}",
        }
    }
}

/// Everything a renderer needs to draw one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPresentation {
    /// Row position in the list.
    pub index: usize,
    /// Row depth.
    pub depth: usize,
    /// Horizontal content offset in points.
    pub indent: f64,
    /// Row height in points.
    pub height: f64,
    /// Expand affordance state.
    pub affordance: Affordance,
    /// First line: the class name.
    pub title: String,
    /// Second line: the frame.
    pub subtitle: String,
    /// Draw the alternate background (even depths).
    pub striped: bool,
}

/// Presentation for the row at `index`.
///
/// # Panics
///
/// Panics if `index >= list.count()`.
pub fn present<T: ViewTree + ?Sized>(
    list: &ExpansionList,
    tree: &T,
    index: usize,
    config: &InspectorConfig,
) -> RowPresentation {
    let view = list.entry(tree, index);
    RowPresentation {
        index,
        depth: view.depth(),
        indent: config.indent_for(view.depth()),
        height: config.row_height,
        affordance: Affordance::of(&view),
        title: view.display_name().to_owned(),
        subtitle: format!("Frame: {}", view.frame()),
        striped: view.depth() % 2 == 0,
    }
}

/// Presentation for every row, in order.
pub fn present_all<T: ViewTree + ?Sized>(
    list: &ExpansionList,
    tree: &T,
    config: &InspectorConfig,
) -> Vec<RowPresentation> {
    (0..list.count())
        .map(|i| present(list, tree, i, config))
        .collect()
}

/// Total height of the list in points.
pub fn content_height(list: &ExpansionList, config: &InspectorConfig) -> f64 {
    list.count() as f64 * config.row_height
}

/// Render the visible rows as text, one line per row.
///
/// Each line is the indented affordance glyph and class name, padded so the
/// frames line up in a column. Hidden views are tagged.
///
/// ```text
/// ▼ UIView       Frame: (0.0, 0.0, 375.0, 812.0)
///   ▶ UIView     Frame: (50.0, 100.0, 200.0, 150.0)
///     UIButton   Frame: (87.5, 712.0, 200.0, 50.0)
/// ```
pub fn render_text<T: ViewTree + ?Sized>(list: &ExpansionList, tree: &T) -> String {
    let heads: Vec<String> = (0..list.count())
        .map(|i| {
            let view = list.entry(tree, i);
            format!(
                "{}{} {}",
                "  ".repeat(view.depth()),
                Affordance::of(&view).glyph(),
                view.display_name()
            )
        })
        .collect();
    let column = heads.iter().map(|h| h.width()).max().unwrap_or(0);

    let mut out = String::new();
    for (head, entry) in heads.iter().zip(list.iter()) {
        out.push_str(head);
        out.push_str(&" ".repeat(column - head.width() + 3));
        out.push_str(&format!("Frame: {}", entry.frame()));
        if entry.is_hidden() {
            out.push_str(" [hidden]");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtree_core::{NodeId, Rect, ViewArena, ViewSpec};

    fn sample() -> (ViewArena, NodeId) {
        ViewArena::from_spec(
            ViewSpec::new("UIView")
                .with_frame(Rect::new(0.0, 0.0, 375.0, 812.0))
                .child(
                    ViewSpec::new("UIStackView")
                        .with_frame(Rect::new(50.0, 100.0, 200.0, 150.0))
                        .child(ViewSpec::new("UILabel").with_hidden(true)),
                )
                .child(ViewSpec::new("UIButton").with_frame(Rect::new(87.5, 712.0, 200.0, 50.0))),
        )
    }

    #[test]
    fn affordance_follows_children_and_state() {
        let (arena, root) = sample();
        let config = InspectorConfig::default();
        let mut list = ExpansionList::new(&arena, root);
        assert_eq!(
            present(&list, &arena, 0, &config).affordance,
            Affordance::Collapsed
        );

        list.toggle(&arena, 0);
        let rows = present_all(&list, &arena, &config);
        assert_eq!(rows[0].affordance, Affordance::Expanded);
        assert_eq!(rows[1].affordance, Affordance::Collapsed);
        assert_eq!(rows[2].affordance, Affordance::Hidden);
    }

    #[test]
    fn metrics_follow_config() {
        let (arena, root) = sample();
        let config = InspectorConfig::default();
        let mut list = ExpansionList::new(&arena, root);
        list.toggle(&arena, 0);
        let row = present(&list, &arena, 1, &config);
        assert_eq!(row.depth, 1);
        assert_eq!(row.indent, 28.0);
        assert_eq!(row.height, 50.0);
        assert!(!row.striped);
        assert_eq!(row.title, "UIStackView");
        assert_eq!(row.subtitle, "Frame: (50.0, 100.0, 200.0, 150.0)");
        assert!(present(&list, &arena, 0, &config).striped);
        assert_eq!(content_height(&list, &config), 150.0);
    }

    #[test]
    fn text_rendering_aligns_frames() {
        let (arena, root) = sample();
        let mut list = ExpansionList::new(&arena, root);
        list.toggle(&arena, 0);
        list.toggle(&arena, 1);

        let text = render_text(&list, &arena);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("\u{25BC} UIView"));
        assert!(lines[1].starts_with("  \u{25BC} UIStackView"));
        assert!(lines[2].starts_with("      UILabel"));
        assert!(lines[2].ends_with("[hidden]"));
        assert!(lines[3].starts_with("    UIButton"));

        let widths: Vec<usize> = lines
            .iter()
            .map(|l| l[..l.find("Frame:").unwrap()].width())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }
}
