use matcher_core::{AppViewModel, JobCardView, Phase};
use v_htmlescape::escape;

use super::constants::*;
use super::dom::DomCommand;

/// Full page render for a view; every element the controller owns is set.
pub fn render(view: &AppViewModel) -> Vec<DomCommand> {
    let mut cmds = Vec::with_capacity(16 + view.cards.len());

    for (element, phase) in [
        (SECTION_UPLOAD, Phase::Upload),
        (SECTION_LOADING, Phase::Loading),
        (SECTION_RESULTS, Phase::Results),
    ] {
        cmds.push(DomCommand::SetVisible {
            element,
            visible: view.phase == phase,
        });
    }

    let (name, size) = match &view.selected_file {
        Some(file) => (file.name.clone(), file.size_label.clone()),
        None => (String::new(), String::new()),
    };
    cmds.push(DomCommand::SetVisible {
        element: UPLOAD_AREA,
        visible: view.selected_file.is_none(),
    });
    cmds.push(DomCommand::SetClass {
        element: UPLOAD_AREA,
        class: CLASS_DRAGOVER,
        present: view.upload_highlighted,
    });
    cmds.push(DomCommand::SetVisible {
        element: PANEL_SELECTED_FILE,
        visible: view.selected_file.is_some(),
    });
    cmds.push(DomCommand::SetText {
        element: LABEL_FILE_NAME,
        text: name,
    });
    cmds.push(DomCommand::SetText {
        element: LABEL_FILE_SIZE,
        text: size,
    });
    cmds.push(DomCommand::SetEnabled {
        element: BUTTON_ANALYZE,
        enabled: view.analyze_enabled,
    });

    for (element, step) in STEP_MARKERS.into_iter().zip(&view.steps) {
        cmds.push(DomCommand::SetClass {
            element,
            class: CLASS_ACTIVE,
            present: step.active,
        });
    }

    cmds.push(DomCommand::ClearChildren {
        element: GRID_RESULTS,
    });
    cmds.extend(view.cards.iter().map(|card| DomCommand::AppendCard {
        element: GRID_RESULTS,
        card: card.clone(),
    }));

    cmds
}

/// Markup for one result card; all text is escaped.
pub fn card_html(card: &JobCardView) -> String {
    format!(
        r#"<div class="job-card" style="animation-delay: {delay}s">
    <div class="job-header">
        <div class="company-name">{company}</div>
        <h3 class="job-title">{role}</h3>
    </div>
    <p class="job-description">{description}</p>
    <div class="job-footer">
        <div class="match-score">{score}</div>
        <a href="{link}" class="apply-btn" target="_blank" rel="noopener noreferrer">Apply Now</a>
    </div>
</div>"#,
        delay = format_delay_secs(card.reveal_delay_ms),
        company = escape(&card.company),
        role = escape(&card.role),
        description = escape(&card.description),
        score = escape(&card.match_label),
        link = escape(&card.apply_link),
    )
}

fn format_delay_secs(ms: u64) -> String {
    if ms % 1000 == 0 {
        format!("{}", ms / 1000)
    } else {
        let text = format!("{}.{:03}", ms / 1000, ms % 1000);
        text.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_render_as_seconds() {
        assert_eq!(format_delay_secs(0), "0");
        assert_eq!(format_delay_secs(100), "0.1");
        assert_eq!(format_delay_secs(1200), "1.2");
        assert_eq!(format_delay_secs(2000), "2");
    }

    #[test]
    fn markup_is_escaped() {
        let card = JobCardView {
            company: r#"<b>"R&D"<b>"#.to_string(),
            role: "<script>".to_string(),
            description: String::new(),
            match_label: "50% Match".to_string(),
            apply_link: "#".to_string(),
            reveal_delay_ms: 0,
        };
        let html = card_html(&card);

        assert!(html.contains("&lt;b&gt;&quot;R&amp;D&quot;&lt;b&gt;"));
        assert!(html.contains(r#"<h3 class="job-title">&lt;script&gt;</h3>"#));
        assert!(!html.contains("<script>"));
    }
}
