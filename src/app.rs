//! Event loop: timer-driven refreshes plus keyboard control

use crate::{display::Display, error::BoardError, refresh::Refresher};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use std::io;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Actions a key press can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Leave the loop
    Quit,
    /// Advance the sort key
    ToggleSort,
    /// Refresh immediately
    Refresh,
    /// No action
    None,
}

/// Maps a key press to an action
pub fn key_to_action(key: KeyEvent) -> AppAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => AppAction::Quit,
        KeyCode::Char('r') if ctrl => AppAction::ToggleSort,
        KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
        KeyCode::Char('s') => AppAction::ToggleSort,
        KeyCode::Char('r') => AppAction::Refresh,
        _ => AppAction::None,
    }
}

/// Runs the board until a quit key or the end of the input stream
///
/// Draws one frame immediately, then refreshes every `interval`. The timer
/// is re-armed after each refresh, whether it came from the timer or from
/// the refresh key.
pub async fn run<D, S>(
    refresher: &mut Refresher,
    display: &mut D,
    mut events: S,
    interval: Duration,
) -> Result<(), BoardError>
where
    D: Display + ?Sized,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    tracing::info!(
        provider = refresher.provider_name(),
        refresh_interval_secs = interval.as_secs(),
        "Starting quote board"
    );

    refresher.refresh(display).await?;
    let mut deadline = Instant::now() + interval;

    // The deadline is absolute and moves only after a refresh. Input that
    // does not refresh leaves it alone, so key presses never postpone the
    // next timed refresh.
    loop {
        tokio::select! {
            _ = sleep_until(deadline) => {
                refresher.refresh(display).await?;
                deadline = Instant::now() + interval;
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match key_to_action(key) {
                        AppAction::Quit => {
                            tracing::info!("Quit requested");
                            return Ok(());
                        }
                        AppAction::ToggleSort => {
                            refresher.toggle_sort();
                        }
                        AppAction::Refresh => {
                            refresher.refresh(display).await?;
                            deadline = Instant::now() + interval;
                        }
                        AppAction::None => {}
                    }
                }
                Some(Ok(Event::Resize(width, height))) => {
                    tracing::debug!(width, height, "Terminal resized");
                    display.redraw()?;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(BoardError::Display(e)),
                None => {
                    tracing::info!("Input closed");
                    return Ok(());
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        provider::mock::MockProvider,
        render::BoardFrame,
        store::SnapshotStore,
        types::{Attribute, Instrument},
    };
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingDisplay {
        frames: Vec<BoardFrame>,
        redraws: usize,
    }

    impl Display for CountingDisplay {
        fn present(&mut self, frame: &BoardFrame) -> Result<(), BoardError> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn redraw(&mut self) -> Result<(), BoardError> {
            self.redraws += 1;
            Ok(())
        }
    }

    fn key(code: KeyCode) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn refresher(provider: Arc<MockProvider>) -> Refresher {
        let store = SnapshotStore::new(
            vec![Instrument::with_label("Dow", ".DJI")],
            vec![Instrument::new("EA"), Instrument::new("AMZN")],
        );
        Refresher::new(Arc::new(store), provider)
    }

    #[test]
    fn test_key_bindings() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        let plain = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert_eq!(key_to_action(plain('q')), AppAction::Quit);
        assert_eq!(key_to_action(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), AppAction::Quit);
        assert_eq!(key_to_action(ctrl('c')), AppAction::Quit);
        assert_eq!(key_to_action(ctrl('r')), AppAction::ToggleSort);
        assert_eq!(key_to_action(plain('s')), AppAction::ToggleSort);
        assert_eq!(key_to_action(plain('r')), AppAction::Refresh);
        assert_eq!(key_to_action(plain('x')), AppAction::None);
        assert_eq!(key_to_action(plain('c')), AppAction::None);
    }

    #[tokio::test]
    async fn test_quit_after_initial_frame() {
        let provider = Arc::new(MockProvider::new());
        let mut refresher = refresher(provider.clone());
        let mut display = CountingDisplay::default();

        let events = futures::stream::iter(vec![key(KeyCode::Char('q'))]);
        run(&mut refresher, &mut display, events, Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(display.frames.len(), 1);
        assert_eq!(display.frames[0].rows.len(), 4);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_toggle_then_refresh_key() {
        let provider = Arc::new(MockProvider::new());
        let mut refresher = refresher(provider.clone());
        let mut display = CountingDisplay::default();

        let events = futures::stream::iter(vec![
            key(KeyCode::Char('x')),
            key(KeyCode::Char('s')),
            key(KeyCode::Char('r')),
            Ok(Event::Resize(80, 24)),
            key(KeyCode::Esc),
            key(KeyCode::Char('r')),
        ]);
        run(&mut refresher, &mut display, events, Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(refresher.sort_key(), Attribute::Ticker);
        assert_eq!(display.frames.len(), 2);
        assert_eq!(display.redraws, 1);
        assert!(display.frames[1].rows[2].text().starts_with("AMZN"));
    }

    #[tokio::test]
    async fn test_timer_triggers_refresh() {
        let provider = Arc::new(MockProvider::new());
        let mut refresher = refresher(provider.clone());
        let mut display = CountingDisplay::default();

        let events = futures::stream::pending::<io::Result<Event>>();
        let result = tokio::time::timeout(
            Duration::from_millis(200),
            run(&mut refresher, &mut display, events, Duration::from_millis(20)),
        )
        .await;

        assert!(result.is_err());
        assert!(display.frames.len() >= 3);
    }

    #[tokio::test]
    async fn test_key_presses_do_not_postpone_timer() {
        let provider = Arc::new(MockProvider::new());
        let mut refresher = refresher(provider.clone());
        let mut display = CountingDisplay::default();

        // an ignored key every 5ms, well inside the 30ms interval
        let events = futures::stream::unfold((), |()| async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Some((key(KeyCode::Char('x')), ()))
        })
        .boxed();
        let result = tokio::time::timeout(
            Duration::from_millis(200),
            run(&mut refresher, &mut display, events, Duration::from_millis(30)),
        )
        .await;

        assert!(result.is_err());
        assert!(display.frames.len() >= 3);
    }

    #[tokio::test]
    async fn test_input_error_is_fatal() {
        let provider = Arc::new(MockProvider::new());
        let mut refresher = refresher(provider);
        let mut display = CountingDisplay::default();

        let events = futures::stream::iter(vec![Err(io::Error::other("tty gone"))]);
        let result = run(&mut refresher, &mut display, events, Duration::from_secs(3600)).await;
        assert!(matches!(result, Err(BoardError::Display(_))));
    }
}
