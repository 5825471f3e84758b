use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::config_io::load_config;
use crate::model::config::AppConfig;
use crate::model::list::TaskList;
use crate::model::task::{Priority, Status, Task, TaskId};
use crate::notify::{Notifier, NotifyEvent};
use crate::ops::views::{self, SortKey};

use super::input;
use super::render;
use super::theme::Theme;

/// Format for due dates in the form and the list
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Which status partition is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    All,
    Upcoming,
    Completed,
}

impl View {
    pub const ALL: [View; 3] = [View::All, View::Upcoming, View::Completed];

    pub fn label(self) -> &'static str {
        match self {
            View::All => "All",
            View::Upcoming => "Upcoming",
            View::Completed => "Completed",
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Filter,
    Form,
    Confirm,
}

/// Pending confirmation for an irreversible delete
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteTask { id: TaskId },
    DeleteAll,
}

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Due,
    Status,
    Priority,
    Reminder,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Task name",
            FormField::Due => "Due date",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::Reminder => "Reminder",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Name | FormField::Due)
    }
}

/// State of the add/edit popup
#[derive(Debug, Clone)]
pub struct FormState {
    /// None = add form, Some(id) = edit form for that task
    pub target: Option<TaskId>,
    pub field: FormField,
    pub name: String,
    /// Byte cursor into `name`
    pub name_cursor: usize,
    pub due: String,
    /// Byte cursor into `due`
    pub due_cursor: usize,
    pub status: Status,
    pub priority: Priority,
    pub reminder: bool,
    /// Validation message shown inside the popup
    pub error: Option<String>,
}

impl FormState {
    /// Fresh add form, due defaulting to the current time
    pub fn add(now: NaiveDateTime) -> Self {
        let due = now.format(DATE_FORMAT).to_string();
        FormState {
            target: None,
            field: FormField::Name,
            name: String::new(),
            name_cursor: 0,
            due_cursor: due.len(),
            due,
            status: Status::Pending,
            priority: Priority::Low,
            reminder: true,
            error: None,
        }
    }

    /// Edit form prefilled from an existing task
    pub fn edit(task: &Task) -> Self {
        let due = task.due.format(DATE_FORMAT).to_string();
        FormState {
            target: Some(task.id),
            field: FormField::Name,
            name_cursor: task.name.len(),
            name: task.name.clone(),
            due_cursor: due.len(),
            due,
            status: task.status,
            priority: task.priority,
            reminder: false,
            error: None,
        }
    }

    /// Field order for this form. The add form collects a reminder choice;
    /// the edit form exposes status instead.
    pub fn fields(&self) -> &'static [FormField] {
        if self.target.is_none() {
            &[
                FormField::Name,
                FormField::Due,
                FormField::Priority,
                FormField::Reminder,
            ]
        } else {
            &[
                FormField::Name,
                FormField::Due,
                FormField::Status,
                FormField::Priority,
            ]
        }
    }

    pub fn title(&self) -> &'static str {
        if self.target.is_none() {
            "Add Task"
        } else {
            "Edit Task"
        }
    }
}

/// A transient notice shown in the status row until its deadline
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub expires: Instant,
}

/// Main application state
pub struct App {
    pub tasks: TaskList,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub notifier: Notifier,
    /// Active sort; None = insertion order
    pub sort: Option<SortKey>,
    /// Live filter query (empty = no filter)
    pub filter_input: String,
    /// Cursor index into the visible rows
    pub cursor: usize,
    pub scroll_offset: usize,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmAction>,
    pub show_help: bool,
    /// Transient warning (nothing selected etc.); cleared on next keypress
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Timed notification echo for the status row
    pub toast: Option<Toast>,
    /// Tasks whose due reminder already fired this session
    pub notified: HashSet<TaskId>,
}

impl App {
    pub fn new(config: &AppConfig, notifier: Notifier) -> Self {
        App {
            tasks: TaskList::new(),
            view: View::All,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            notifier,
            sort: None,
            filter_input: String::new(),
            cursor: 0,
            scroll_offset: 0,
            form: None,
            confirm: None,
            show_help: false,
            status_message: None,
            status_is_error: false,
            toast: None,
            notified: HashSet::new(),
        }
    }

    /// The rows currently on screen: the active status partition of the
    /// filtered list, ordered by the active sort. A pure projection; the
    /// model itself is never reordered or hidden.
    pub fn visible_ids(&self) -> Vec<TaskId> {
        let all = self.tasks.tasks();
        let mut rows: Vec<&Task> = views::filter_indices(&self.tasks, &self.filter_input)
            .map(|index| &all[index])
            .filter(|task| match self.view {
                View::All => true,
                View::Upcoming => task.status == Status::Pending,
                View::Completed => task.status == Status::Completed,
            })
            .collect();
        if let Some(key) = self.sort {
            views::sort_rows(&mut rows, key);
        }
        rows.iter().map(|task| task.id).collect()
    }

    /// The task under the cursor, if any row is visible
    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible_ids().get(self.cursor).copied()
    }

    /// Keep the cursor inside the visible rows
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_ids().len();
        if count == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(count - 1);
        }
    }

    /// Regex for highlighting filter matches in the list (literal match,
    /// case-insensitive).
    pub fn filter_highlight_re(&self) -> Option<Regex> {
        if self.filter_input.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(&self.filter_input))).ok()
    }

    /// Show a warning in the status row
    pub fn warn(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
        self.status_is_error = true;
    }

    /// Dispatch an event to the notifier and echo it in the status row
    pub fn announce(&mut self, event: NotifyEvent) {
        let notice = self.notifier.notify(&event);
        self.toast = Some(Toast {
            text: format!("{}: {}", notice.title, notice.message),
            expires: Instant::now() + notice.timeout,
        });
    }

    /// Event-loop tick: expire the toast, fire due reminders.
    ///
    /// Reminders are serviced here, between input events, so everything
    /// stays on the single UI thread.
    pub fn on_tick(&mut self) {
        if let Some(toast) = &self.toast
            && Instant::now() >= toast.expires
        {
            self.toast = None;
        }

        let now = chrono::Local::now().naive_local();
        self.fire_due_reminders(now);
    }

    /// Fire a one-shot notice for each newly due reminder task
    pub fn fire_due_reminders(&mut self, now: NaiveDateTime) {
        let due: Vec<(TaskId, String, NaiveDateTime)> =
            views::due_reminders(&self.tasks, now, &self.notified)
                .map(|task| (task.id, task.name.clone(), task.due))
                .collect();
        for (id, name, due_at) in due {
            self.notified.insert(id);
            self.announce(NotifyEvent::TaskDue { name, due: due_at });
        }
    }
}

/// Run the TUI application
pub fn run(config_path: Option<&Path>, no_notify: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let notifier = if no_notify {
        Notifier::disabled()
    } else {
        Notifier::new(&config.notifications)
    };
    let mut app = App::new(&config, notifier);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.on_tick();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::task_ops::{add_task, mark_done};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn due(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn test_app() -> App {
        App::new(&AppConfig::default(), Notifier::disabled())
    }

    fn names(app: &App) -> Vec<String> {
        app.visible_ids()
            .iter()
            .map(|&id| app.tasks.get(id).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn visible_rows_compose_filter_partition_and_sort() {
        let mut app = test_app();
        add_task(&mut app.tasks, "Buy milk", due(3), Priority::Low, false).unwrap();
        let b = add_task(&mut app.tasks, "Buy bread", due(1), Priority::High, false).unwrap();
        add_task(&mut app.tasks, "Call bank", due(2), Priority::Medium, false).unwrap();
        mark_done(&mut app.tasks, b).unwrap();

        // All view, insertion order
        assert_eq!(names(&app), vec!["Buy milk", "Buy bread", "Call bank"]);

        // Filter narrows by name, case-insensitive
        app.filter_input = "buy".to_string();
        assert_eq!(names(&app), vec!["Buy milk", "Buy bread"]);

        // Partition applies on top of the filter
        app.view = View::Upcoming;
        assert_eq!(names(&app), vec!["Buy milk"]);
        app.view = View::Completed;
        assert_eq!(names(&app), vec!["Buy bread"]);

        // Sort applies last
        app.view = View::All;
        app.filter_input.clear();
        app.sort = Some(SortKey::Priority);
        assert_eq!(names(&app), vec!["Buy bread", "Call bank", "Buy milk"]);

        // The projection never touched the model
        let stored: Vec<&str> = app.tasks.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(stored, vec!["Buy milk", "Buy bread", "Call bank"]);
    }

    #[test]
    fn cursor_clamps_to_visible_rows() {
        let mut app = test_app();
        add_task(&mut app.tasks, "A", due(1), Priority::Low, false).unwrap();
        add_task(&mut app.tasks, "B", due(1), Priority::Low, false).unwrap();
        app.cursor = 5;
        app.clamp_cursor();
        assert_eq!(app.cursor, 1);
        app.filter_input = "zzz".to_string();
        app.clamp_cursor();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn due_reminder_fires_once_and_toasts() {
        let mut app = test_app();
        add_task(&mut app.tasks, "Dentist", due(1), Priority::High, true).unwrap();

        app.fire_due_reminders(due(2));
        let toast = app.toast.clone().expect("reminder should toast");
        assert!(toast.text.contains("Task Due"));
        assert!(toast.text.contains("Dentist"));

        app.toast = None;
        app.fire_due_reminders(due(3));
        assert!(app.toast.is_none());
    }

    #[test]
    fn filter_highlight_escapes_regex_metacharacters() {
        let mut app = test_app();
        app.filter_input = "a+b".to_string();
        let re = app.filter_highlight_re().unwrap();
        assert!(re.is_match("A+B"));
        assert!(!re.is_match("aab"));
    }
}
