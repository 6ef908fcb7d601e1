use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::{
    constants::TIME_SETTINGS,
    persistence,
    storage::{FileStore, KeyValueStore},
    store::ActivityStore,
};

mod event_handlers;
mod form_state;
mod render_views;
mod ui_helpers;
mod view_style;

use form_state::FormState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Form,
    List,
}

struct App {
    store: ActivityStore,
    form: FormState,
    focus: Focus,
    selected_index: usize,
    status: Option<String>,
    render_needed: bool,
}

impl App {
    fn new<K>(kv: K) -> Self
    where
        K: KeyValueStore + 'static,
    {
        Self {
            store: persistence::open_store(kv),
            form: FormState::default(),
            focus: Focus::Form,
            selected_index: 0,
            status: None,
            render_needed: true,
        }
    }

    fn in_form(&self) -> bool {
        matches!(self.focus, Focus::Form)
    }

    fn is_editing(&self) -> bool {
        self.store.active_id().is_some()
    }

    fn selected_activity_id(&self) -> Option<String> {
        self.store
            .activities()
            .get(self.selected_index)
            .map(|activity| activity.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.store.activities().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

pub fn run_ui() -> Result<(), io::Error> {
    let mut app = App::new(FileStore::open_default());
    info!(
        activities = app.store.activities().len(),
        "starting terminal ui"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), io::Error> {
    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let poll_rate = Duration::from_millis(TIME_SETTINGS.poll_ms);
    let mut last_render = Instant::now();

    loop {
        if last_render.elapsed() >= render_rate && app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
            last_render = Instant::now();
        }

        if event::poll(poll_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break;
                    }
                    app.render_needed = true;
                }
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    info!("leaving terminal ui");
    Ok(())
}
