//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::router::Route;
use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop, starting at `initial` once the session is known
    pub async fn run(
        mut self,
        initial: Route,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        self.state.start(initial);
        self.flush();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.flush();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.flush();
                }
                else => break,
            }
        }
    }

    /// Forward queued calls, then publish a fresh snapshot
    fn flush(&mut self) {
        for cmd in self.state.take_commands() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::Navigate(route) => self.state.navigate(route),
            UiEvent::Back => self.state.back(),
            UiEvent::Logout => self.state.logout(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::Submit => self.state.submit(),

            // Lists
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::OpenSelected => self.state.open_selected(),
            UiEvent::Reload => self.state.reload(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Catalog
            UiEvent::NextGenre => self.state.next_genre(),
            UiEvent::PrevGenre => self.state.prev_genre(),

            // Review form
            UiEvent::RatingUp => self.state.rating_up(),
            UiEvent::RatingDown => self.state.rating_down(),

            // Admin
            UiEvent::EditSelected => self.state.edit_selected(),
            UiEvent::DeleteSelected => self.state.delete_selected(),
            UiEvent::NewMovie => self.state.new_movie(),
            UiEvent::CancelEdit => self.state.cancel_edit(),

            // Profile
            UiEvent::EditProfile => self.state.edit_profile(),

            // Popups and appearance
            UiEvent::ToggleTheme => self.state.toggle_theme(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
