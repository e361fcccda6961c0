#![forbid(unsafe_code)]

//! Sample screen used when no other hierarchy is available.

use vtree_core::{NodeId, Rect, ViewArena, ViewSpec};

/// A phone-sized screen: a nested card holding a label, and a button.
///
/// ```text
/// UIView (0, 0, 375, 812)
/// ├── UIView (50, 100, 200, 150)
/// │   └── UIView (20, 20, 100, 80)
/// │       └── UILabel (10, 30, 80, 20)
/// └── UIButton (87.5, 712, 200, 50)
///     └── UILabel (0, 0, 200, 50)
/// ```
pub fn sample_screen() -> (ViewArena, NodeId) {
    ViewArena::from_spec(
        ViewSpec::new("UIView")
            .with_frame(Rect::new(0.0, 0.0, 375.0, 812.0))
            .child(
                ViewSpec::new("UIView")
                    .with_frame(Rect::new(50.0, 100.0, 200.0, 150.0))
                    .child(
                        ViewSpec::new("UIView")
                            .with_frame(Rect::new(20.0, 20.0, 100.0, 80.0))
                            .with_alpha(0.9)
                            .child(
                                ViewSpec::new("UILabel")
                                    .with_frame(Rect::new(10.0, 30.0, 80.0, 20.0)),
                            ),
                    ),
            )
            .child(
                ViewSpec::new("UIButton")
                    .with_frame(Rect::new(87.5, 712.0, 200.0, 50.0))
                    .child(
                        ViewSpec::new("UILabel")
                            .with_frame(Rect::new(0.0, 0.0, 200.0, 50.0))
                            .with_hidden(true),
                    ),
            ),
    )
}
