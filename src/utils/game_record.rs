//! Timestamped game transcript.
//!
//! Headers are written PGN-style (`[Key "value"]`), followed by one line per
//! recorded entry, numbered in play order.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::game_state::chess_rules::GameStatus;
use crate::game_state::chess_types::{Coordinate, Faction, PieceKind};
use crate::utils::coordinates::coordinate_to_algebraic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEntry {
    Move {
        faction: Faction,
        kind: PieceKind,
        from: Coordinate,
        to: Coordinate,
        captured: Option<PieceKind>,
    },
    Note(String),
}

impl RecordEntry {
    fn render(&self) -> String {
        match self {
            RecordEntry::Move {
                faction,
                kind,
                from,
                to,
                captured,
            } => {
                let mut text = format!(
                    "{faction} {kind} {}-{}",
                    coordinate_to_algebraic(*from),
                    coordinate_to_algebraic(*to)
                );
                if let Some(taken) = captured {
                    text.push_str(&format!(" x{taken}"));
                }
                text
            }
            RecordEntry::Note(note) => format!("; {note}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    started: DateTime<Local>,
    headers: BTreeMap<String, String>,
    entries: Vec<RecordEntry>,
}

impl GameRecord {
    pub fn new(initial_layout: &str) -> Self {
        let started = Local::now();
        let mut headers = BTreeMap::new();
        headers.insert("Event".to_owned(), "Zombie Chess Game".to_owned());
        headers.insert("Date".to_owned(), started.format("%Y.%m.%d").to_string());
        headers.insert("Time".to_owned(), started.format("%H:%M:%S").to_string());
        headers.insert("Layout".to_owned(), initial_layout.to_owned());
        headers.insert("Result".to_owned(), "*".to_owned());
        Self {
            started,
            headers,
            entries: Vec::new(),
        }
    }

    pub fn started(&self) -> DateTime<Local> {
        self.started
    }

    pub fn set_header(&mut self, key: &str, value: &str) {
        self.headers.insert(key.to_owned(), value.to_owned());
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn push(&mut self, entry: RecordEntry) {
        self.entries.push(entry);
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.entries.push(RecordEntry::Note(note.into()));
    }

    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    pub fn move_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, RecordEntry::Move { .. }))
            .count()
    }

    pub fn finish(&mut self, status: GameStatus) {
        let result = match status {
            GameStatus::Won(Faction::White) => "1-0",
            GameStatus::Won(_) => "0-1",
            GameStatus::Ongoing => "*",
        };
        self.set_header("Result", result);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.headers {
            out.push_str(&format!("[{key} \"{}\"]\n", escape_value(value)));
        }
        out.push('\n');

        let mut number = 0usize;
        for entry in &self.entries {
            match entry {
                RecordEntry::Move { .. } => {
                    number += 1;
                    out.push_str(&format!("{number}. {}\n", entry.render()));
                }
                RecordEntry::Note(_) => {
                    out.push_str(&entry.render());
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
