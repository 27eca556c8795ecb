//! Dashboard rendering.

use super::app::{DashboardApp, PendingDelete};
use crate::format;
use datadeck_core::chart::{chart_points, ChartKind};
use datadeck_core::view::{DashboardState, ViewMode};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, BarChart, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, List, ListItem,
    ListState, Paragraph, Row, Table,
};
use ratatui::Frame;

const PIE_PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Red,
    Color::Blue,
];

pub fn draw(frame: &mut Frame, app: &DashboardApp) {
    let state = app.dashboard().state();
    let chunks =
        Layout::vertical([Constraint::Min(5), Constraint::Length(2)]).split(frame.size());
    let body = Layout::horizontal([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(chunks[0]);

    draw_sidebar(frame, body[0], state);
    match state.mode {
        ViewMode::Table => draw_table(frame, body[1], state),
        ViewMode::Chart => draw_chart(frame, body[1], state),
    }
    draw_footer(frame, chunks[1], app);

    if let Some(pending) = app.confirm_delete() {
        draw_confirm(frame, pending);
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let items: Vec<ListItem> = state
        .datasets
        .iter()
        .map(|d| ListItem::new(d.filename.clone()))
        .collect();
    let selected = state
        .selected
        .as_deref()
        .and_then(|id| state.datasets.iter().position(|d| d.id == id));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Datasets"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_table(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default().borders(Borders::ALL).title("Table");
    let Some(table) = &state.table else {
        let text = if state.selected.is_some() {
            "Loading table data..."
        } else {
            "No dataset selected."
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let inner_chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(block.inner(area));
    frame.render_widget(block, area);

    if let Some(summary) = state.selected_summary() {
        let info = format!(
            "{} rows, {} columns, {}, uploaded {}",
            summary.row_count,
            summary.column_count,
            summary.file_size_mb(),
            format::upload_date(&summary.upload_date)
        );
        frame.render_widget(
            Paragraph::new(info).style(Style::default().fg(Color::DarkGray)),
            inner_chunks[0],
        );
    }

    let columns = table.columns();
    if columns.is_empty() {
        frame.render_widget(Paragraph::new("This page has no rows."), inner_chunks[1]);
    } else {
        let header = Row::new(
            columns
                .iter()
                .map(|c| Cell::from(c.clone()))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = table
            .rows
            .iter()
            .map(|row| {
                Row::new(
                    columns
                        .iter()
                        .map(|c| Cell::from(row.get(c).map(cell_text).unwrap_or_default()))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        let widths = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
        frame.render_widget(Table::new(rows, widths).header(header), inner_chunks[1]);
    }

    let pager = format!("Page {} of {}", table.page, table.total_pages.max(1));
    frame.render_widget(
        Paragraph::new(pager)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        inner_chunks[2],
    );
}

fn draw_chart(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match state.chart.column() {
        Some(column) => format!(
            "Chart - {} | {} by {}",
            state.chart.kind, state.chart.aggregation, column
        ),
        None => "Chart".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.chart.column().is_none() {
        frame.render_widget(
            Paragraph::new("Select a column to generate a chart (press c)."),
            inner,
        );
        return;
    }
    let Some(rows) = &state.chart_data else {
        frame.render_widget(Paragraph::new("Loading chart data..."), inner);
        return;
    };

    let points = chart_points(rows, &state.chart);
    if points.is_empty() {
        frame.render_widget(Paragraph::new("No numeric data to chart."), inner);
        return;
    }

    match state.chart.kind {
        ChartKind::Bar => draw_bar_chart(frame, inner, &points),
        ChartKind::Line => draw_line_chart(frame, inner, &points),
        ChartKind::Pie => draw_pie_chart(frame, inner, &points),
    }
}

fn draw_bar_chart(frame: &mut Frame, area: Rect, points: &[(String, f64)]) {
    let bars: Vec<(&str, u64)> = points
        .iter()
        .map(|(name, value)| (name.as_str(), value.max(0.0).round() as u64))
        .collect();
    let chart = BarChart::default()
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(&bars);
    frame.render_widget(chart, area);
}

fn draw_line_chart(frame: &mut Frame, area: Rect, points: &[(String, f64)]) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (_, value))| (i as f64, *value))
        .collect();
    let max_y = data.iter().map(|(_, y)| *y).fold(f64::MIN, f64::max);
    let min_y = data.iter().map(|(_, y)| *y).fold(f64::MAX, f64::min).min(0.0);
    let max_x = (data.len() as f64 - 1.0).max(1.0);

    let dataset = Dataset::default()
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);
    let x_labels = vec![
        Span::raw(points.first().map(|(n, _)| n.clone()).unwrap_or_default()),
        Span::raw(points.last().map(|(n, _)| n.clone()).unwrap_or_default()),
    ];
    let y_labels = vec![
        Span::raw(format!("{min_y:.0}")),
        Span::raw(format!("{max_y:.0}")),
    ];
    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds([0.0, max_x]).labels(x_labels))
        .y_axis(Axis::default().bounds([min_y, max_y]).labels(y_labels));
    frame.render_widget(chart, area);
}

/// No pie widget in the toolkit; render each slice as a proportional
/// colored bar with its share.
fn draw_pie_chart(frame: &mut Frame, area: Rect, points: &[(String, f64)]) {
    let total: f64 = points.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        frame.render_widget(Paragraph::new("No positive values to chart."), area);
        return;
    }

    let bar_width = area.width.saturating_sub(30).max(10) as f64;
    let lines: Vec<Line> = points
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let share = value.max(0.0) / total;
            let filled = (share * bar_width).round() as usize;
            let color = PIE_PALETTE[i % PIE_PALETTE.len()];
            Line::from(vec![
                Span::raw(format!("{name:<16.16} ")),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::raw(format!(" {value:.1} ({:.0}%)", share * 100.0)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let chunks =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
    let hints = "q quit | r refresh | up/down dataset | tab table/chart | left/right page | \
                 c column | a aggregation | k chart kind | d delete";
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    let state = app.dashboard().state();
    let status = if let Some(error) = &state.error {
        Line::styled(
            format!("{error} (press e to dismiss)"),
            Style::default().fg(Color::Red),
        )
    } else if state.loading || app.dashboard().busy() {
        Line::styled("Loading...", Style::default().fg(Color::Yellow))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(status), chunks[1]);
}

fn draw_confirm(frame: &mut Frame, pending: &PendingDelete) {
    let area = centered_rect(50, 5, frame.size());
    let text = vec![
        Line::raw(format!("Delete \"{}\"?", pending.filename)),
        Line::raw("This cannot be undone."),
        Line::styled("y confirm / n cancel", Style::default().fg(Color::DarkGray)),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Confirm delete"));
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn centered_rect(width: u16, height: u16, container: Rect) -> Rect {
    let width = width.min(container.width);
    let height = height.min(container.height);
    Rect {
        x: container.x + (container.width - width) / 2,
        y: container.y + (container.height - height) / 2,
        width,
        height,
    }
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
