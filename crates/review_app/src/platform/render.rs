use review_core::{Decision, ReviewViewModel, SaveMode, SessionPhase, StatusLine};

/// Renders the view model as the block of text printed after each change.
pub fn render(view: &ReviewViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    match view.phase {
        SessionPhase::NotStarted => {
            if view.rater_label.is_empty() {
                lines.push("Enter your name with `start <name>`.".to_string());
            } else {
                lines.push(format!("Rater: {}", view.rater_label));
            }
        }
        SessionPhase::InProgress => {
            lines.push(format!(
                "Image {} of {}  (rater {})",
                view.position + 1,
                view.total,
                view.rater_label
            ));
            if let Some(current) = &view.current {
                let choice = match current.decision {
                    Some(Decision::Accept) => "accept",
                    Some(Decision::Deny) => "deny",
                    None => "undecided",
                };
                lines.push(format!("  {}  [{}]", current.id, choice));
            }
        }
        SessionPhase::Complete => lines.push("No more images.".to_string()),
    }

    if let Some(status) = status_text(&view.status) {
        lines.push(status);
    }
    if view.mode == SaveMode::Export && view.phase != SessionPhase::NotStarted {
        lines.push(format!("Decided {} of {}", view.decided, view.total));
    }
    if let Some(hints) = key_hints(view) {
        lines.push(hints);
    }
    lines
}

fn status_text(status: &StatusLine) -> Option<String> {
    match status {
        StatusLine::Idle => None,
        StatusLine::Loading => Some("Loading images...".to_string()),
        StatusLine::Saving => Some("Saving...".to_string()),
        StatusLine::Exporting => Some("Exporting...".to_string()),
        StatusLine::Error(message) => Some(format!("Error: {message}")),
        StatusLine::Complete => Some("All decisions recorded. Thank you!".to_string()),
        StatusLine::Exported(path) => Some(format!("Exported to {path}")),
    }
}

fn key_hints(view: &ReviewViewModel) -> Option<String> {
    let mut hints = Vec::new();
    if view.can_start {
        hints.push("start [name]");
    }
    if view.can_decide {
        hints.push("a accept");
        hints.push("d deny");
    }
    if view.can_advance {
        hints.push("n next");
    }
    if view.can_export {
        hints.push("e export");
    }
    if hints.is_empty() {
        return None;
    }
    hints.push("q quit");
    Some(format!("[{}]", hints.join(" | ")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use review_core::{CurrentItemView, ItemId};

    use super::*;

    #[test]
    fn in_progress_shows_position_and_choice() {
        let view = ReviewViewModel {
            mode: SaveMode::Remote,
            phase: SessionPhase::InProgress,
            rater_label: "alice".to_string(),
            position: 1,
            total: 3,
            current: Some(CurrentItemView {
                id: ItemId::new("b.png"),
                display_ref: "images/b.png".to_string(),
                decision: None,
            }),
            can_decide: true,
            status: StatusLine::Error("Save failed (HTTP 500). Please try again.".to_string()),
            ..ReviewViewModel::default()
        };

        assert_eq!(
            render(&view),
            vec![
                "Image 2 of 3  (rater alice)".to_string(),
                "  b.png  [undecided]".to_string(),
                "Error: Save failed (HTTP 500). Please try again.".to_string(),
                "[a accept | d deny | q quit]".to_string(),
            ]
        );
    }

    #[test]
    fn complete_export_session_offers_export() {
        let view = ReviewViewModel {
            mode: SaveMode::Export,
            phase: SessionPhase::Complete,
            position: 2,
            total: 2,
            decided: 2,
            can_export: true,
            status: StatusLine::Complete,
            ..ReviewViewModel::default()
        };

        assert_eq!(
            render(&view),
            vec![
                "No more images.".to_string(),
                "All decisions recorded. Thank you!".to_string(),
                "Decided 2 of 2".to_string(),
                "[e export | q quit]".to_string(),
            ]
        );
    }

    #[test]
    fn busy_session_has_no_hints() {
        let view = ReviewViewModel {
            phase: SessionPhase::NotStarted,
            rater_label: "bob".to_string(),
            status: StatusLine::Loading,
            busy: true,
            ..ReviewViewModel::default()
        };
        assert_eq!(
            render(&view),
            vec!["Rater: bob".to_string(), "Loading images...".to_string()]
        );
    }
}
