use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::auth::AuthTab;
use crate::domain::email::Folder;
use crate::mailbox::compose::ComposeField;
use crate::flow::Step;
use crate::terminal::state::{App, AuthScreen, Focus, MailboxScreen, Screen};

/// Returns `true` when the user asked to quit.
pub fn handle_key(key: KeyEvent, app: &mut App) -> Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    let (quit, step) = match &mut app.screen {
        Screen::Auth(s) => handle_auth_keys(key, ctrl, s),
        Screen::Mailbox(s) if s.ctrl.compose().is_some() => {
            (false, handle_compose_keys(key, ctrl, s))
        }
        Screen::Mailbox(s) => handle_mailbox_keys(key, s),
    };
    app.dispatch(step)?;
    Ok(quit)
}

fn handle_auth_keys(key: KeyEvent, ctrl: bool, s: &mut AuthScreen) -> (bool, Step) {
    if s.ctrl.alert().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            s.ctrl.dismiss_alert();
        }
        return (false, Step::Idle);
    }

    match key.code {
        KeyCode::Esc => return (true, Step::Idle),
        KeyCode::Char('t') if ctrl => {
            let tab = match s.ctrl.tab() {
                AuthTab::Login => AuthTab::Register,
                AuthTab::Register => AuthTab::Login,
            };
            s.switch_tab(tab);
        }
        KeyCode::F(n) if n >= 1 => {
            if s.ctrl.quick_fill(n as usize - 1) {
                s.field = Default::default();
            }
        }
        KeyCode::Tab | KeyCode::Down => s.move_field(1),
        KeyCode::BackTab | KeyCode::Up => s.move_field(-1),
        KeyCode::Enter => {
            let step = match s.ctrl.tab() {
                AuthTab::Login => s.ctrl.submit_login(),
                AuthTab::Register => s.ctrl.submit_register(),
            };
            return (false, step);
        }
        KeyCode::Backspace => {
            s.field_mut().pop();
        }
        KeyCode::Char(c) if !ctrl => s.field_mut().push(c),
        _ => {}
    }
    (false, Step::Idle)
}

fn handle_mailbox_keys(key: KeyEvent, s: &mut MailboxScreen) -> (bool, Step) {
    let step = match key.code {
        KeyCode::Char('q') => return (true, Step::Idle),
        KeyCode::Esc => {
            if s.focus == Focus::Body {
                s.focus = Focus::List;
                return (false, Step::Idle);
            }
            return (true, Step::Idle);
        }
        KeyCode::Char('1') => s.ctrl.select_folder(Folder::Inbox),
        KeyCode::Char('2') => s.ctrl.select_folder(Folder::Sent),
        KeyCode::Char('3') => s.ctrl.select_folder(Folder::Spam),
        KeyCode::Char('r') => s.ctrl.select_folder(s.ctrl.folder()),
        KeyCode::Char('c') => s.ctrl.open_compose(),
        KeyCode::Char('L') => s.ctrl.logout(),
        KeyCode::Tab => {
            s.focus = match s.focus {
                Focus::List => Focus::Body,
                Focus::Body => Focus::List,
            };
            Step::Idle
        }
        KeyCode::Enter => match s.cursor_id() {
            Some(id) => s.ctrl.open_email(id),
            None => Step::Idle,
        },
        KeyCode::Down | KeyCode::Char('j') => {
            match s.focus {
                Focus::List => s.move_cursor(1),
                Focus::Body => s.scroll_body(1),
            }
            Step::Idle
        }
        KeyCode::Up | KeyCode::Char('k') => {
            match s.focus {
                Focus::List => s.move_cursor(-1),
                Focus::Body => s.scroll_body(-1),
            }
            Step::Idle
        }
        KeyCode::PageDown => {
            s.scroll_body(10);
            Step::Idle
        }
        KeyCode::PageUp => {
            s.scroll_body(-10);
            Step::Idle
        }
        _ => Step::Idle,
    };
    (false, step)
}

fn handle_compose_keys(key: KeyEvent, ctrl: bool, s: &mut MailboxScreen) -> Step {
    if key.code == KeyCode::Esc {
        s.ctrl.dismiss_compose();
        return Step::Idle;
    }
    if ctrl && key.code == KeyCode::Char('s') {
        return s.ctrl.submit_compose();
    }
    let Some(compose) = s.ctrl.compose_mut() else {
        return Step::Idle;
    };
    match key.code {
        KeyCode::Tab => compose.next_field(),
        KeyCode::BackTab => compose.prev_field(),
        KeyCode::Left if compose.field == ComposeField::Recipient => compose.cycle_recipient(-1),
        KeyCode::Right if compose.field == ComposeField::Recipient => compose.cycle_recipient(1),
        KeyCode::Enter if compose.field == ComposeField::Content => compose.input('\n'),
        KeyCode::Enter => compose.next_field(),
        KeyCode::Backspace => compose.backspace(),
        KeyCode::Char(c) if !ctrl => compose.input(c),
        _ => {}
    }
    Step::Idle
}
