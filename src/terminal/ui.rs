use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use std::time::Instant;

use crate::auth::AuthTab;
use crate::auth::password::Strength;
use crate::domain::email::Folder;
use crate::mailbox::compose::{ComposeField, ComposeState};
use crate::mailbox::view::ListView;
use crate::notify::Level;
use crate::terminal::state::{App, AuthField, AuthScreen, Focus, MailboxScreen, Screen};

pub fn render(f: &mut Frame, app: &App, now: Instant) {
    match &app.screen {
        Screen::Auth(s) => render_auth(f, s, now),
        Screen::Mailbox(s) => render_mailbox(f, s, now),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(mid);
    center
}

fn bold(s: &str) -> Span<'_> {
    Span::styled(s, Style::default().add_modifier(Modifier::BOLD))
}

fn hint_line(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = vec![];
    for &(key, what) in pairs {
        spans.push(bold(key));
        spans.push(Span::raw(format!(" {what}  ")));
    }
    Line::from(spans)
}

fn input_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), style),
        Span::raw(value),
        Span::styled(cursor, style),
    ])
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Info => Color::Cyan,
        Level::Success => Color::Green,
        Level::Error => Color::Red,
    }
}

fn render_auth(f: &mut Frame, s: &AuthScreen, now: Instant) {
    let ctrl = &s.ctrl;
    let area = centered(f.area(), 64, 20);
    f.render_widget(Clear, area);
    let block = Block::bordered().title(" Webmail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [tabs_area, form_area, presets_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(7),
        Constraint::Length(ctrl.presets().len() as u16 + 1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let selected = match ctrl.tab() {
        AuthTab::Login => 0,
        AuthTab::Register => 1,
    };
    let tabs = Tabs::new(vec!["Login", "Register"])
        .select(selected)
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tabs, tabs_area);

    let mask = |p: &str| "*".repeat(p.chars().count());
    let mut lines = vec![];
    match ctrl.tab() {
        AuthTab::Login => {
            lines.push(input_line("Email", ctrl.login.email.clone(), s.field == AuthField::Email));
            lines.push(input_line(
                "Password",
                mask(&ctrl.login.password),
                s.field == AuthField::Password,
            ));
        }
        AuthTab::Register => {
            lines.push(input_line(
                "Email",
                ctrl.register.email.clone(),
                s.field == AuthField::Email,
            ));
            lines.push(input_line(
                "Password",
                mask(&ctrl.register.password),
                s.field == AuthField::Password,
            ));
            lines.push(input_line(
                "Confirm",
                mask(&ctrl.register.confirm),
                s.field == AuthField::Confirm,
            ));
            if let Some(strength) = ctrl.password_strength() {
                let color = match strength {
                    Strength::Strong => Color::Green,
                    Strength::Medium => Color::Yellow,
                    Strength::Weak | Strength::VeryWeak => Color::Red,
                };
                lines.push(Line::from(vec![
                    Span::raw("Strength  "),
                    Span::styled(strength.label(), Style::default().fg(color)),
                ]));
            }
        }
    }
    lines.push(Line::raw(""));
    if let Some(err) = ctrl.inline_error_at(now) {
        lines.push(Line::styled(format!("! {err}"), Style::default().fg(Color::Red)));
    }
    if let Some(notice) = ctrl.notice_at(now) {
        lines.push(Line::styled(notice.to_string(), Style::default().fg(Color::Cyan)));
    }
    if ctrl.is_pending() {
        lines.push(Line::styled("Please wait...", Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(Text::from(lines)), form_area);

    let presets: Vec<Line> = ctrl
        .presets()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let label = ctrl.quick_fill_label(i, now);
            let style = if label == "Filled" {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                bold(if i < 12 { FKEYS[i] } else { "" }),
                Span::raw(format!(" {} ", p.email)),
                Span::styled(format!("[{label}]"), style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(Text::from(presets)), presets_area);

    f.render_widget(
        Paragraph::new(hint_line(&[
            ("Enter", "submit"),
            ("Tab", "field"),
            ("^T", "login/register"),
            ("Esc", "quit"),
        ])),
        hint_area,
    );

    if let Some(alert) = ctrl.alert() {
        let a = centered(f.area(), 50, 5);
        f.render_widget(Clear, a);
        let p = Paragraph::new(Text::from(vec![
            Line::raw(alert.to_string()),
            Line::styled("Enter to dismiss", Style::default().fg(Color::DarkGray)),
        ]))
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Notice ").border_style(Style::default().fg(Color::Red)));
        f.render_widget(p, a);
    }
}

const FKEYS: [&str; 12] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

fn render_mailbox(f: &mut Frame, s: &MailboxScreen, now: Instant) {
    let ctrl = &s.ctrl;
    let [top, main, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    // folder tabs + who is signed in
    let [tabs_area, user_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(40)]).areas(top);
    let active = Folder::ALL
        .iter()
        .position(|x| *x == ctrl.folder())
        .unwrap_or(0);
    let tabs = Tabs::new(
        Folder::ALL
            .iter()
            .enumerate()
            .map(|(i, x)| format!("{} {}", i + 1, x.title())),
    )
    .select(active)
    .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    .block(Block::bordered());
    f.render_widget(tabs, tabs_area);
    f.render_widget(
        Paragraph::new(ctrl.session().user_email.clone()).block(Block::bordered().title(" User ")),
        user_area,
    );

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(main);
    let border = |focused: bool| {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    // list
    let list_block = Block::default()
        .title(format!(" {} ", ctrl.header()))
        .borders(Borders::ALL)
        .border_style(border(s.focus == Focus::List));
    match ctrl.list_view() {
        ListView::Loading => {
            f.render_widget(Paragraph::new("Loading...").block(list_block), left);
        }
        ListView::Unavailable => {
            f.render_widget(
                Paragraph::new(Line::styled(
                    "Could not load this folder, press r to retry",
                    Style::default().fg(Color::Red),
                ))
                .block(list_block),
                left,
            );
        }
        ListView::Empty(text) => {
            f.render_widget(
                Paragraph::new(Line::styled(text, Style::default().fg(Color::DarkGray)))
                    .block(list_block),
                left,
            );
        }
        ListView::Rows(rows) => {
            let items: Vec<ListItem> = rows
                .into_iter()
                .map(|r| {
                    let mut head_style = Style::default().fg(Color::Cyan);
                    if r.selected {
                        head_style = head_style.add_modifier(Modifier::REVERSED);
                    }
                    let mut subject = vec![];
                    if r.spam {
                        subject.push(Span::styled("! ", Style::default().fg(Color::Red)));
                    }
                    subject.push(Span::styled(
                        r.subject,
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                    ListItem::new(Text::from(vec![
                        Line::from(vec![
                            Span::styled(r.contact, head_style),
                            Span::raw("  "),
                            Span::styled(r.date, Style::default().fg(Color::DarkGray)),
                        ]),
                        Line::from(subject),
                        Line::styled(r.preview, Style::default().fg(Color::Gray)),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(list_block)
                .highlight_symbol("➜ ")
                .highlight_style(Style::default().fg(Color::Green));
            f.render_stateful_widget(list, left, &mut s.list_state.clone());
        }
    }

    // detail
    let body_block = Block::default()
        .title(" Email ")
        .borders(Borders::ALL)
        .border_style(border(s.focus == Focus::Body));
    let body = match ctrl.detail() {
        Some(d) => {
            let mut lines = vec![
                Line::styled(d.subject.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Line::from(vec![
                    Span::styled(d.contact_label, Style::default().fg(Color::DarkGray)),
                    Span::raw(format!(" {}", d.contact_email)),
                ]),
                Line::styled(d.date.clone(), Style::default().fg(Color::DarkGray)),
                Line::raw(""),
            ];
            lines.extend(d.paragraphs.iter().map(|p| Line::raw(p.clone())));
            Text::from(lines)
        }
        None => Text::from("Select an email and press Enter to read it."),
    };
    f.render_widget(
        Paragraph::new(body)
            .block(body_block)
            .wrap(Wrap { trim: false })
            .scroll((s.body_scroll, 0)),
        right,
    );

    f.render_widget(
        Paragraph::new(hint_line(&[
            ("1/2/3", "folder"),
            ("j/k", "move"),
            ("Enter", "open"),
            ("Tab", "focus"),
            ("c", "compose"),
            ("r", "reload"),
            ("L", "logout"),
            ("q", "quit"),
        ])),
        footer,
    );

    if let Some(compose) = ctrl.compose() {
        render_compose(f, compose, now);
    }

    // notifications, newest at the bottom
    let toasts: Vec<_> = ctrl.toasts().live_at(now).collect();
    if !toasts.is_empty() {
        let height = toasts.len() as u16 + 2;
        let area = f.area();
        let width = area.width.min(48);
        let rect = Rect {
            x: area.x + area.width - width,
            y: area.y + area.height.saturating_sub(height + 1),
            width,
            height: height.min(area.height),
        };
        let lines: Vec<Line> = toasts
            .iter()
            .map(|t| Line::styled(t.message.clone(), Style::default().fg(level_color(t.level))))
            .collect();
        f.render_widget(Clear, rect);
        f.render_widget(Paragraph::new(Text::from(lines)).block(Block::bordered()), rect);
    }
}

fn render_compose(f: &mut Frame, c: &ComposeState, now: Instant) {
    let area = centered(f.area(), 70, 20);
    f.render_widget(Clear, area);
    let block = Block::bordered()
        .title(" New email ")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [fields_area, content_area, status_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let recipient = match (c.recipient(), c.recipients().is_empty()) {
        (Some(r), _) => format!("< {r} >"),
        (None, true) => "(loading recipients)".to_string(),
        (None, false) => "< choose a recipient >".to_string(),
    };
    f.render_widget(
        Paragraph::new(Text::from(vec![
            input_line("To", recipient, c.field == ComposeField::Recipient),
            input_line("Subject", c.subject.clone(), c.field == ComposeField::Subject),
        ])),
        fields_area,
    );

    let content_style = if c.field == ComposeField::Content {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(
        Paragraph::new(c.content.clone())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title(" Content ").border_style(content_style)),
        content_area,
    );

    let status = if c.sending {
        Line::styled("Sending...", Style::default().fg(Color::DarkGray))
    } else if let Some(err) = c.error_at(now) {
        Line::styled(format!("! {err}"), Style::default().fg(Color::Red))
    } else {
        Line::raw("")
    };
    f.render_widget(Paragraph::new(status), status_area);

    f.render_widget(
        Paragraph::new(hint_line(&[
            ("^S", "send"),
            ("Tab", "field"),
            ("←/→", "recipient"),
            ("Esc", "cancel"),
        ])),
        hint_area,
    );
}
