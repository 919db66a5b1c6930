//! Loaded forecast: range summary plus one column per day

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::state::{DailyForecast, TempUnit, WeatherData};

pub struct Weather7DayDisplayProps<'a> {
    pub weather: &'a WeatherData,
    pub unit: TempUnit,
}

/// Summary line plus one column per day.
#[derive(Default)]
pub struct Weather7DayDisplay;

impl Component<Action> for Weather7DayDisplay {
    type Props<'a> = Weather7DayDisplayProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let weather = props.weather;
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);

        frame.render_widget(Paragraph::new(summary_line(weather, props.unit)), chunks[0]);

        let count = weather.days.len() as u32;
        if count == 0 {
            return;
        }
        let columns =
            Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count))).split(chunks[1]);

        for (day, column) in weather.days.iter().zip(columns.iter().copied()) {
            render_day(frame, column, day, props.unit);
        }
    }
}

fn summary_line(weather: &WeatherData, unit: TempUnit) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{} days", weather.days.len()),
        Style::default().fg(Color::White).bold(),
    )];
    if let Some((low, high)) = weather.temperature_range() {
        spans.push(Span::styled(
            format!("  {} .. {}", unit.format(low), unit.format(high)),
            Style::default().fg(Color::Yellow),
        ));
    }
    if !weather.timezone.is_empty() {
        spans.push(Span::styled(
            format!("  ({})", weather.timezone),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans).centered()
}

fn render_day(frame: &mut Frame, area: Rect, day: &DailyForecast, unit: TempUnit) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            day.weekday(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(day.date_label(), dim)),
        Line::from(Span::styled(
            format!("↑ {}", unit.format(day.temp_max)),
            Style::default().fg(Color::Rgb(255, 160, 80)),
        )),
        Line::from(Span::styled(
            format!("↓ {}", unit.format(day.temp_min)),
            Style::default().fg(Color::Rgb(120, 170, 255)),
        )),
    ];
    if let Some(chance) = day.precipitation_probability {
        lines.push(Line::from(Span::styled(format!("{}% rain", chance), dim)));
    }
    if let Some(wind) = day.wind_speed_max {
        lines.push(Line::from(Span::styled(format!("{:.0} km/h", wind), dim)));
    }
    lines.push(Line::from(Span::styled(
        day.description(),
        Style::default().fg(Color::White),
    )));

    let lines: Vec<Line> = lines.into_iter().map(Line::centered).collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
