// Application state: the draft engine plus the view state the TUI renders.
//
// Key presses become `UserCommand`s; `App::handle` applies them to the
// engine and records a status line for the user.

use tracing::{info, warn};

use warroom_core::draft::{ByeConflict, DraftEngine, DraftOutcome, NotDraftedReason};
use warroom_core::player::PlayerId;

use crate::tui::ViewState;

/// Actions the user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Draft the given player onto the roster.
    Draft(PlayerId),
    Quit,
}

pub struct App {
    pub engine: DraftEngine,
    pub view: ViewState,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: DraftEngine) -> Self {
        App {
            engine,
            view: ViewState::default(),
            should_quit: false,
        }
    }

    /// Apply a command. Rejected drafts only produce a status message.
    pub fn handle(&mut self, command: UserCommand) {
        match command {
            UserCommand::Draft(id) => self.draft(id),
            UserCommand::Quit => {
                info!("Quit command received");
                self.should_quit = true;
            }
        }
    }

    fn draft(&mut self, id: PlayerId) {
        let message = match self.engine.draft_player(id) {
            DraftOutcome::Drafted => self.drafted_message(id),
            DraftOutcome::NotDrafted(NotDraftedReason::AlreadyDrafted) => {
                let name = self
                    .engine
                    .player(id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|_| id.to_string());
                format!("{} is already on your roster", name)
            }
            DraftOutcome::NotDrafted(NotDraftedReason::UnknownPlayer) => {
                warn!("Draft requested for unknown player id {}", id);
                format!("No player with id {}", id)
            }
        };
        self.view.status_message = Some(message);
        self.view.clamp_selection(self.engine.available_ids().len());
    }

    fn drafted_message(&self, id: PlayerId) -> String {
        let Ok(player) = self.engine.player(id) else {
            return format!("Drafted player {}", id);
        };
        let mut message = format!(
            "Drafted {} ({} {}) with pick {}",
            player.name,
            player.position,
            player.team,
            self.engine.pick_count()
        );
        if let Some(week) = player.bye_week {
            let count = self.engine.bye_week_count(week);
            if let Some(level) = ByeConflict::from_count(count) {
                message.push_str(&format!(
                    " -- bye week {} {}: {} players",
                    week,
                    level.label(),
                    count
                ));
            }
        }
        message
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
