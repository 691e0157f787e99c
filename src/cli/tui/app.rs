//! Form state and key handling

use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::domain::{Condition, InventoryLedger};

/// Which input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Isbn,
    Condition,
    Location,
    Quantity,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Isbn, Field::Condition, Field::Location, Field::Quantity];

    fn next(self) -> Self {
        match self {
            Field::Isbn => Field::Condition,
            Field::Condition => Field::Location,
            Field::Location => Field::Quantity,
            Field::Quantity => Field::Isbn,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Isbn => Field::Quantity,
            Field::Condition => Field::Isbn,
            Field::Location => Field::Condition,
            Field::Quantity => Field::Location,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Isbn => "ISBN",
            Field::Condition => "Condition",
            Field::Location => "Location",
            Field::Quantity => "Quantity",
        }
    }
}

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Form state
pub struct App {
    ledger: InventoryLedger,
    export_dir: PathBuf,

    isbn: String,
    condition: Option<Condition>,
    location: String,
    quantity: String,

    focus: Field,
    status: Option<Status>,
    last_export: Option<PathBuf>,
    should_quit: bool,
}

pub const HELP: &str =
    "Tab:next  Enter:add  Space:New/Used  F2:lock condition  F3:lock location  F5:export  Esc:quit";

impl App {
    pub fn new(ledger: InventoryLedger, export_dir: PathBuf) -> Self {
        Self {
            ledger,
            export_dir,
            isbn: String::new(),
            condition: None,
            location: String::new(),
            quantity: String::new(),
            focus: Field::Isbn,
            status: Some(Status::Info(HELP.to_string())),
            last_export: None,
            should_quit: false,
        }
    }

    /// Run the main loop until the user quits
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        views::form::draw(frame, self);
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,

            KeyCode::F(2) => self.toggle_condition_lock(),
            KeyCode::F(3) => self.toggle_location_lock(),
            KeyCode::F(5) => self.export(),
            KeyCode::Char('e') if ctrl => self.export(),

            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

            KeyCode::Enter => {
                if self.focus == Field::Quantity {
                    self.submit();
                } else {
                    self.focus = self.focus.next();
                }
            }

            _ if self.focus == Field::Condition => self.handle_condition_key(key.code),

            KeyCode::Backspace | KeyCode::Char(_) if self.is_locked(self.focus) => {
                self.status = Some(Status::Error("Location is locked (F3 to unlock)".to_string()));
            }

            KeyCode::Backspace => {
                if let Some(buf) = self.focused_buffer() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(buf) = self.focused_buffer() {
                    buf.push(c);
                }
            }

            _ => {}
        }
    }

    /// The condition field is a two-value selector, not free text
    fn handle_condition_key(&mut self, code: KeyCode) {
        if self.ledger.locked_condition().is_some() {
            self.status = Some(Status::Error("Condition is locked (F2 to unlock)".to_string()));
            return;
        }

        self.condition = match code {
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Condition::New),
            KeyCode::Char('u') | KeyCode::Char('U') => Some(Condition::Used),
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => Some(
                self.condition
                    .map(Condition::toggle)
                    .unwrap_or(Condition::ALL[0]),
            ),
            KeyCode::Backspace | KeyCode::Delete => None,
            _ => self.condition,
        };
    }

    /// Text buffer for the focused field, if it accepts typing
    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Isbn => Some(&mut self.isbn),
            Field::Location if self.ledger.locked_location().is_some() => None,
            Field::Location => Some(&mut self.location),
            Field::Quantity => Some(&mut self.quantity),
            Field::Condition => None,
        }
    }

    fn toggle_condition_lock(&mut self) {
        if self.ledger.locked_condition().is_some() {
            self.ledger.set_locked_condition(None);
            self.status = Some(Status::Info("Condition unlocked".to_string()));
            return;
        }

        match self.condition {
            Some(condition) => {
                self.ledger.set_locked_condition(Some(condition));
                self.status = Some(Status::Info(format!("Condition locked to {}", condition)));
            }
            None => {
                self.status = Some(Status::Error("Select a condition before locking it".to_string()));
            }
        }
    }

    fn toggle_location_lock(&mut self) {
        if self.ledger.locked_location().is_some() {
            self.ledger.set_locked_location(None);
            self.status = Some(Status::Info("Location unlocked".to_string()));
            return;
        }

        let location = self.location.trim();
        if location.is_empty() {
            self.status = Some(Status::Error("Enter a location before locking it".to_string()));
        } else {
            self.status = Some(Status::Info(format!("Location locked to {}", location)));
            self.ledger.set_locked_location(Some(location.to_string()));
        }
    }

    /// Effective condition, preferring the lock
    pub fn effective_condition(&self) -> Option<Condition> {
        self.ledger.locked_condition().or(self.condition)
    }

    /// Effective location, preferring the lock
    pub fn effective_location(&self) -> &str {
        self.ledger.locked_location().unwrap_or(&self.location)
    }

    /// Validate the current fields and append an entry
    fn submit(&mut self) {
        let condition = self.effective_condition().map(|c| c.as_str()).unwrap_or("");
        let location = self.effective_location().to_string();

        match self.ledger.add_entry(&self.isbn, condition, &location, &self.quantity) {
            Ok(added) => {
                self.status = Some(Status::Info(format!(
                    "Added {} ({} x{})",
                    added.entry.sku(),
                    added.entry.location(),
                    added.entry.quantity()
                )));
                self.clear_fields();
            }
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }

    /// Clear the unlocked fields and return focus to ISBN
    fn clear_fields(&mut self) {
        self.isbn.clear();
        self.quantity.clear();
        if self.ledger.locked_condition().is_none() {
            self.condition = None;
        }
        if self.ledger.locked_location().is_none() {
            self.location.clear();
        }
        self.focus = Field::Isbn;
    }

    fn export(&mut self) {
        match self.ledger.export_to_file(&self.export_dir) {
            Ok(path) => {
                self.status = Some(Status::Info(format!("Data exported to {}", path.display())));
                self.last_export = Some(path);
            }
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }

    // Accessors for views

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn last_export(&self) -> Option<&Path> {
        self.last_export.as_deref()
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Text shown in a field's input box
    pub fn field_value(&self, field: Field) -> String {
        match field {
            Field::Isbn => self.isbn.clone(),
            Field::Condition => self
                .effective_condition()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            Field::Location => self.effective_location().to_string(),
            Field::Quantity => self.quantity.clone(),
        }
    }

    pub fn is_locked(&self, field: Field) -> bool {
        match field {
            Field::Condition => self.ledger.locked_condition().is_some(),
            Field::Location => self.ledger.locked_location().is_some(),
            Field::Isbn | Field::Quantity => false,
        }
    }
}
