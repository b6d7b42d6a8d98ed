use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use looped_core::upload::UPLOAD_ERROR_MESSAGE;
use looped_core::{App, StatusMark, UploadPhase};

use super::{panel, BLUE, GREEN, RED, SUBTEXT0, SURFACE1, TEAL, TEXT, YELLOW};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let upload = &app.upload;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let file = upload.file_name.as_deref().unwrap_or("No file selected");
    let mut lines = vec![
        Line::from(vec![
            Span::styled("File: ", Style::default().fg(SUBTEXT0)),
            Span::styled(file.to_string(), Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    let (message, color) = match upload.phase {
        UploadPhase::Idle => ("Press o to pick a textbook, slides or notes.".to_string(), SUBTEXT0),
        UploadPhase::Uploading => (upload.progress_message.clone(), BLUE),
        UploadPhase::Processing => (upload.processing_message().to_string(), YELLOW),
        UploadPhase::Completed => (
            format!("Done! {} clips generated.", upload.generated.len()),
            GREEN,
        ),
        UploadPhase::Error => (format!("{UPLOAD_ERROR_MESSAGE} (r to retry)"), RED),
    };
    lines.push(Line::from(Span::styled(message, Style::default().fg(color))));
    lines.push(Line::from(""));

    let rows: Vec<Span> = upload
        .status_rows()
        .iter()
        .map(|(label, mark)| {
            let color = match mark {
                StatusMark::Done => GREEN,
                StatusMark::Active => YELLOW,
                StatusMark::Pending => SUBTEXT0,
            };
            Span::styled(format!("{} {label}   ", mark.symbol()), Style::default().fg(color))
        })
        .collect();
    lines.push(Line::from(rows));

    frame.render_widget(
        Paragraph::new(lines).block(panel("Upload".to_string(), true)).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let title = match &upload.job_id {
        Some(job) => format!("Generated clips (job {job})"),
        None => "Generated clips".to_string(),
    };
    let items: Vec<ListItem> = upload
        .generated
        .iter()
        .map(|video| {
            ListItem::new(vec![
                Line::from(Span::styled(video.title.clone(), Style::default().fg(TEXT))),
                Line::from(Span::styled(
                    format!("   {} · {}", video.topic, video.duration_label().unwrap_or_default()),
                    Style::default().fg(TEAL),
                )),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(panel(title, false))
        .highlight_style(Style::default().bg(SURFACE1));
    frame.render_widget(list, chunks[1]);
}
