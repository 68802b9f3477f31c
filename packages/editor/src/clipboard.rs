//! # Clipboard
//!
//! The platform copy command only works on a focused, fully selected text
//! buffer. [`ClipboardPlatform`] is that seam: the host stages the text,
//! runs the copy, and clears the buffer again. [`StagedText`] guarantees the
//! clear happens on every path out of a copy.

use crate::config::CopyMessages;
use mailgen_common::{was_inside_interactive_region, Point, Rect, VNode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const COPY_POPOUT_ID: &str = "copyPopout";
pub const COPY_DONE_ID: &str = "copyDone";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipboardError {
    #[error("Clipboard is not available: {0}")]
    Unavailable(String),

    #[error("Copy command failed: {0}")]
    CopyFailed(String),
}

/// Host clipboard access
pub trait ClipboardPlatform {
    /// Put `text` into a transient, selected buffer
    fn stage(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Run the platform copy command on the staged buffer
    fn exec_copy(&mut self) -> Result<bool, ClipboardError>;

    /// Remove the transient buffer
    fn clear_stage(&mut self);
}

/// Staged buffer that is cleared when dropped
pub struct StagedText<'a> {
    platform: &'a mut dyn ClipboardPlatform,
}

impl<'a> StagedText<'a> {
    pub fn stage(platform: &'a mut dyn ClipboardPlatform, text: &str) -> Result<Self, ClipboardError> {
        let staged = Self { platform };
        staged.platform.stage(text)?;
        Ok(staged)
    }

    pub fn copy(&mut self) -> Result<bool, ClipboardError> {
        self.platform.exec_copy()
    }
}

impl Drop for StagedText<'_> {
    fn drop(&mut self) {
        self.platform.clear_stage();
    }
}

/// In-process clipboard for native hosts and tests
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    staged: Option<String>,
    contents: Option<String>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose copy command always fails
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn staged(&self) -> Option<&str> {
        self.staged.as_deref()
    }
}

impl ClipboardPlatform for MemoryClipboard {
    fn stage(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.staged = Some(text.to_string());
        Ok(())
    }

    fn exec_copy(&mut self) -> Result<bool, ClipboardError> {
        if self.deny {
            return Err(ClipboardError::CopyFailed("permission denied".to_string()));
        }
        match &self.staged {
            Some(text) => {
                self.contents = Some(text.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear_stage(&mut self) {
        self.staged = None;
    }
}

/// Result of one copy attempt, as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyOutcome {
    pub copied: bool,
    pub heading: String,
    pub message: String,
    /// The export string, kept for manual copying
    pub export: String,
}

impl CopyOutcome {
    pub fn new(copied: bool, messages: &CopyMessages, export: String) -> Self {
        let (heading, message) = if copied {
            (&messages.success_heading, &messages.success_message)
        } else {
            (&messages.failure_heading, &messages.failure_message)
        };
        Self {
            copied,
            heading: heading.clone(),
            message: message.clone(),
            export,
        }
    }
}

/// Message panel shown after a copy attempt
#[derive(Debug, Clone, Default)]
pub struct CopyPopout {
    outcome: Option<CopyOutcome>,
    position: Option<Point>,
    visible: bool,
    region: Option<Rect>,
}

impl CopyPopout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn outcome(&self) -> Option<&CopyOutcome> {
        self.outcome.as_ref()
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn set_region(&mut self, region: Rect) {
        self.region = Some(region);
    }

    /// Show next to the control that triggered the copy. The page scroll is
    /// not added here.
    pub fn show(&mut self, outcome: CopyOutcome, anchor: Rect, offset: f64) {
        self.position = Some(Point::new(anchor.right + offset, anchor.top));
        self.outcome = Some(outcome);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Hide unless the click landed inside the panel. Returns whether it hid.
    pub fn handle_click(&mut self, point: Point) -> bool {
        if !self.visible || was_inside_interactive_region(point, self.region.as_slice()) {
            return false;
        }
        self.hide();
        true
    }

    pub fn render(&self) -> VNode {
        let mut panel = VNode::element("div")
            .with_id(COPY_POPOUT_ID)
            .with_class("popoutCtn")
            .with_class("copyPopout");
        if !self.visible {
            panel = panel.with_class("hide");
        }
        if let Some(position) = self.position {
            panel = panel.with_attr(
                "style",
                format!("top: {}px; left: {}px;", position.y, position.x),
            );
        }

        if let Some(outcome) = &self.outcome {
            panel = panel
                .with_child(VNode::element("h3").with_child(VNode::text(&outcome.heading)))
                .with_child(VNode::element("p").with_child(VNode::text(&outcome.message)))
                .with_child(
                    VNode::element("textarea")
                        .with_class("copyTextarea")
                        .with_attr("readonly", "readonly")
                        .with_child(VNode::text(&outcome.export)),
                );
        }

        panel.with_child(
            VNode::element("button")
                .with_id(COPY_DONE_ID)
                .with_class("standardBtn")
                .with_attr("type", "button")
                .with_child(VNode::text("Done")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ThrowingClipboard {
        cleared: bool,
    }

    impl ClipboardPlatform for ThrowingClipboard {
        fn stage(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }

        fn exec_copy(&mut self) -> Result<bool, ClipboardError> {
            Err(ClipboardError::Unavailable("no focus".to_string()))
        }

        fn clear_stage(&mut self) {
            self.cleared = true;
        }
    }

    #[test]
    fn test_staged_text_clears_on_success() {
        let mut clipboard = MemoryClipboard::new();
        {
            let mut staged = StagedText::stage(&mut clipboard, "<table></table>").unwrap();
            assert!(staged.copy().unwrap());
        }
        assert_eq!(clipboard.contents(), Some("<table></table>"));
        assert_eq!(clipboard.staged(), None);
    }

    #[test]
    fn test_staged_text_clears_on_failure() {
        let mut clipboard = ThrowingClipboard { cleared: false };
        {
            let mut staged = StagedText::stage(&mut clipboard, "x").unwrap();
            assert!(staged.copy().is_err());
        }
        assert!(clipboard.cleared);
    }

    #[test]
    fn test_outcome_messages() {
        let messages = CopyMessages::default();
        let ok = CopyOutcome::new(true, &messages, "html".to_string());
        assert_eq!(ok.heading, "Email content copied!");

        let failed = CopyOutcome::new(false, &messages, "html".to_string());
        assert_eq!(failed.heading, "Uh oh...");
        assert!(failed.message.starts_with("We couldn't copy"));
    }

    #[test]
    fn test_popout_position_and_dismissal() {
        let mut popout = CopyPopout::new();
        let outcome = CopyOutcome::new(true, &CopyMessages::default(), "<tr></tr>".to_string());
        popout.show(outcome, Rect::new(10.0, 700.0, 110.0, 730.0), 25.0);
        popout.set_region(Rect::new(135.0, 700.0, 400.0, 900.0));

        assert_eq!(popout.position(), Some(Point::new(135.0, 700.0)));
        assert!(!popout.handle_click(Point::new(200.0, 800.0)));
        assert!(popout.handle_click(Point::new(5.0, 5.0)));
        assert!(!popout.is_visible());
    }

    #[test]
    fn test_popout_render_has_manual_fallback() {
        let mut popout = CopyPopout::new();
        let outcome = CopyOutcome::new(false, &CopyMessages::default(), "<tr></tr>".to_string());
        popout.show(outcome, Rect::default(), 25.0);

        let node = popout.render();
        let tags: Vec<_> = node.children().iter().filter_map(VNode::tag).collect();
        assert_eq!(tags, vec!["h3", "p", "textarea", "button"]);
        assert_eq!(node.children()[2].text_content(), "<tr></tr>");
        assert!(!node.has_class("hide"));
    }
}
