//! Input handling: maps key/mouse/frame events to carousel calls.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

use crate::core::{CarouselEvent, GestureEvent};

use super::state::AppState;

/// Process a key event.  The carousel itself is pointer-only; keys just quit.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        state.should_quit = true;
    }
}

/// Route a mouse event to the deck under the press.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, at: Instant) {
    let Some(gesture) = state.input.normalize(&mouse, at) else {
        return;
    };

    let deck = match gesture {
        GestureEvent::Start { .. } => {
            if state.active_deck.is_some() {
                // A press without a release in between; the first one wins.
                return;
            }
            let Some(deck) = state.layout().deck_at(mouse.column, mouse.row) else {
                return;
            };
            deck
        }
        GestureEvent::Move { .. } | GestureEvent::End { .. } => {
            let Some(deck) = state.active_deck else {
                return;
            };
            deck
        }
    };

    state.last_x = state.input.x(mouse.column);
    dispatch(state, deck, gesture);
}

/// Treat focus loss like the pointer leaving the surface: release any drag
/// where the pointer was last seen.
pub fn handle_focus_lost(state: &mut AppState, at: Instant) {
    let Some(deck) = state.active_deck else {
        return;
    };
    let gesture = GestureEvent::End {
        x: state.last_x,
        at: state.input.timestamp(at),
    };
    dispatch(state, deck, gesture);
}

/// Advance every deck by one frame.
pub fn handle_frame(state: &mut AppState, now: Instant) {
    let now = state.input.timestamp(now);
    for deck in 0..state.decks.len() {
        if let Some(event) = state.decks[deck].tick(now) {
            report(state, deck, event);
        }
    }
}

/// Cancel every pending timer and animation before the app exits.
pub fn shutdown(state: &mut AppState) {
    state.active_deck = None;
    for deck in &mut state.decks {
        deck.dispose();
    }
}

fn dispatch(state: &mut AppState, deck: usize, gesture: GestureEvent) {
    let Some(carousel) = state.decks.get_mut(deck) else {
        return;
    };
    let event = carousel.handle(gesture);
    state.active_deck = carousel.is_dragging().then_some(deck);
    if let Some(event) = event {
        report(state, deck, event);
    }
}

fn report(state: &mut AppState, deck: usize, event: CarouselEvent<String>) {
    match event {
        CarouselEvent::Click { card } => {
            tracing::info!("deck {deck}: click on {card}");
            state.status_message = Some(format!("CLICK: {card}"));
        }
        CarouselEvent::Advanced { index, auto } => {
            tracing::debug!("deck {deck}: now showing card {index} (auto={auto})");
        }
        CarouselEvent::Returned => {
            tracing::debug!("deck {deck}: drag cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_focus_lost, handle_frame, handle_key, handle_mouse, shutdown};
    use crate::app::state::AppState;
    use crate::config::{DeckSpec, Settings};
    use crate::core::Mode;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;
    use std::time::{Duration, Instant};

    fn app() -> (AppState, Instant) {
        let origin = Instant::now();
        let mut state =
            AppState::new(&DeckSpec::defaults(), Settings::default(), origin).expect("valid decks");
        state.terminal_area = Rect::new(0, 0, 80, 30);
        (state, origin)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn quit_keys() {
        let (mut state, _) = app();
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!state.should_quit);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(state.should_quit);
    }

    #[test]
    fn tap_on_second_deck_reports_click() {
        let (mut state, t0) = app();
        // Deck 0 occupies rows 0..6 (4 card rows), deck 1 starts at row 7.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 10), t0);
        assert_eq!(state.active_deck, Some(1));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 40, 10), t0 + ms(90));
        assert_eq!(state.active_deck, None);
        assert_eq!(state.status_message.as_deref(), Some("CLICK: indigo"));
        assert_eq!(state.decks[0].mode(), Mode::Idle);
    }

    #[test]
    fn press_outside_card_bands_is_ignored() {
        let (mut state, t0) = app();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 0), t0);
        assert_eq!(state.active_deck, None);
        assert!(state.decks.iter().all(|deck| !deck.is_dragging()));
    }

    #[test]
    fn drag_follows_press_deck_and_commits() {
        let (mut state, t0) = app();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 2), t0);
        // Wander over the other deck; the drag stays with deck 0.
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 60, 10), t0 + ms(50));
        assert_eq!(state.decks[0].offset(), 160.0);
        assert!(!state.decks[1].is_dragging());

        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 60, 10), t0 + ms(100));
        assert_eq!(state.decks[0].mode(), Mode::Resolving);
        handle_frame(&mut state, t0 + ms(700));
        assert_eq!(state.decks[0].current_index(), 1);
        assert_eq!(state.decks[1].current_index(), 0);
    }

    #[test]
    fn focus_loss_releases_the_drag() {
        let (mut state, t0) = app();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 2), t0);
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 36, 2), t0 + ms(400));
        handle_focus_lost(&mut state, t0 + ms(800));
        assert_eq!(state.active_deck, None);
        assert_eq!(state.decks[0].mode(), Mode::Resolving);
        handle_frame(&mut state, t0 + ms(1400));
        assert_eq!(state.decks[0].current_index(), 0);
        assert_eq!(state.decks[0].offset(), 0.0);
    }

    #[test]
    fn idle_decks_auto_advance_together() {
        let (mut state, t0) = app();
        handle_frame(&mut state, t0 + ms(3000));
        handle_frame(&mut state, t0 + ms(3600));
        assert!(state.decks.iter().all(|deck| deck.current_index() == 1));
    }

    #[test]
    fn shutdown_disposes_every_deck() {
        let (mut state, t0) = app();
        shutdown(&mut state);
        assert!(state.decks.iter().all(|deck| deck.is_disposed()));
        handle_frame(&mut state, t0 + ms(10_000));
        assert!(state.decks.iter().all(|deck| deck.current_index() == 0));
    }
}
