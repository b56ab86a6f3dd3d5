//! Event loop.
//!
//! The runtime owns the [`AppState`] and is the only code that executes
//! [`Action`]s. Three sources feed [`handle_event`]:
//!
//! - lines typed on stdin, parsed by [`parse_command`]
//! - [`WorkerResponse`]s from the background worker
//! - expiry ticks of notification dismiss timers
//!
//! Only one dismiss timer is armed at a time; arming a new one aborts the
//! previous task.

use crate::app::{handle_event, Action, AppState, Event, NotificationKind};
use crate::catalog::CatalogStore;
use crate::domain::Result;
use crate::infrastructure::{ClipboardSink, GenerationService};
use crate::storage::PreferenceStore;
use crate::ui::{helpers, parse_command, render};
use crate::worker::{CatalogWorker, WorkerResponse};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

pub const DEFAULT_ROWS: usize = 24;
pub const DEFAULT_COLS: usize = 80;

pub struct Runtime<W: Write> {
    state: AppState,
    worker: CatalogWorker,
    responses: UnboundedReceiver<WorkerResponse>,
    expiry_tx: UnboundedSender<u64>,
    expiry_rx: UnboundedReceiver<u64>,
    dismiss_timer: Option<AbortHandle>,
    preferences: Box<dyn PreferenceStore>,
    clipboard: Box<dyn ClipboardSink + Send>,
    out: W,
    rows: usize,
    cols: usize,
    running: bool,
}

impl<W: Write> Runtime<W> {
    pub fn new(
        state: AppState,
        store: Arc<CatalogStore>,
        generator: Arc<dyn GenerationService>,
        preferences: Box<dyn PreferenceStore>,
        clipboard: Box<dyn ClipboardSink + Send>,
        out: W,
    ) -> Self {
        let (response_tx, responses) = mpsc::unbounded_channel();
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        Self {
            state,
            worker: CatalogWorker::new(store, generator, response_tx),
            responses,
            expiry_tx,
            expiry_rx,
            dismiss_timer: None,
            preferences,
            clipboard,
            out,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            running: true,
        }
    }

    #[must_use]
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows.max(8);
        self.cols = cols.max(20);
        self
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Consumes the runtime, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Draws the first frame and processes input until `quit` or end of
    /// input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R: AsyncBufRead + Unpin>(mut self, input: R) -> Result<W> {
        self.draw()?;
        let mut lines = input.lines();

        while self.running {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => self.handle_line(&line)?,
                    None => {
                        tracing::debug!("input closed");
                        break;
                    }
                },
                event = self.next_background_event() => self.dispatch(event)?,
            }
        }

        if let Some(timer) = self.dismiss_timer.take() {
            timer.abort();
        }
        tracing::debug!("event loop finished");
        Ok(self.out)
    }

    /// Parses and dispatches one input line. Unparseable lines become an
    /// error notification.
    ///
    /// # Errors
    ///
    /// Returns an error if redrawing fails.
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        match parse_command(line) {
            Ok(Some(event)) => self.dispatch(event),
            Ok(None) => self.draw(),
            Err(e) => {
                tracing::debug!(error = %e, line = %line, "input rejected");
                let notice = self.state.notify(NotificationKind::Error, e.to_string());
                self.run_actions(vec![notice]);
                self.draw()
            }
        }
    }

    /// Waits for the next worker response or notification expiry.
    pub async fn next_background_event(&mut self) -> Event {
        tokio::select! {
            Some(response) = self.responses.recv() => Event::WorkerResponse(response),
            Some(id) = self.expiry_rx.recv() => Event::NotificationExpired(id),
            else => std::future::pending().await,
        }
    }

    /// Feeds `event` through the handler, executes the resulting actions
    /// (and the events they report back), then redraws if anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler or redrawing fails.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        let mut queue = VecDeque::from([event]);
        let mut redraw = false;

        while let Some(event) = queue.pop_front() {
            let (changed, actions) = handle_event(&mut self.state, &event)?;
            redraw |= changed;
            let (follow_ups, notified) = self.run_actions(actions);
            redraw |= notified;
            queue.extend(follow_ups);
        }

        if redraw && self.running {
            self.draw()?;
        }
        Ok(())
    }

    /// Executes `actions` in order. Returns the events they produced and
    /// whether a notification was raised along the way.
    fn run_actions(&mut self, actions: Vec<Action>) -> (Vec<Event>, bool) {
        let mut follow_ups = Vec::new();
        let mut notified = false;
        let mut pending = VecDeque::from(actions);

        while let Some(action) = pending.pop_front() {
            match action {
                Action::PostToWorker(message) => self.worker.dispatch(message),
                Action::ScheduleDismiss { id, after } => self.arm_dismiss(id, after),
                Action::CopyToClipboard(text) => {
                    let outcome = self.clipboard.copy(&text).map_err(|e| e.to_string());
                    follow_ups.push(Event::ClipboardResult(outcome));
                }
                Action::SaveIdentity(identity) => {
                    if let Err(e) = self.preferences.save_identity(&identity) {
                        tracing::error!(error = %e, "failed to save identity");
                        pending.push_back(self.state.notify(NotificationKind::Error, format!("Could not save identity: {e}")));
                        notified = true;
                    }
                }
                Action::ClearIdentity => {
                    if let Err(e) = self.preferences.clear_identity() {
                        tracing::error!(error = %e, "failed to clear identity");
                        pending.push_back(self.state.notify(NotificationKind::Error, format!("Could not clear identity: {e}")));
                        notified = true;
                    }
                }
                Action::SaveTheme(mode) => {
                    if let Err(e) = self.preferences.save_theme(mode) {
                        tracing::warn!(error = %e, "failed to save theme");
                    }
                }
                Action::Quit => {
                    tracing::debug!("quit requested");
                    self.running = false;
                }
            }
        }
        (follow_ups, notified)
    }

    fn arm_dismiss(&mut self, id: u64, after: Duration) {
        if let Some(previous) = self.dismiss_timer.take() {
            previous.abort();
        }
        let expiry_tx = self.expiry_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = expiry_tx.send(id);
        });
        self.dismiss_timer = Some(task.abort_handle());
    }

    fn draw(&mut self) -> Result<()> {
        let screen_rows = self.rows - 1;
        let vm = self.state.compute_viewmodel(screen_rows, self.cols);
        render(&vm, self.state.theme(), screen_rows, self.cols, &mut self.out)?;
        helpers::position_cursor(&mut self.out, self.rows, 1)?;
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Overlay, RequestState, ThemeMode};
    use crate::catalog::CatalogSource;
    use crate::domain::{CatalogError, Category, GenerationRequest, Identity, Item};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticSource;

    #[async_trait]
    impl CatalogSource for StaticSource {
        async fn fetch(&self, category: Category) -> Result<Vec<Item>> {
            Ok(match category {
                Category::Products => vec![
                    Item::named("IntelliJ IDEA").with_code("II"),
                    Item::named("DataGrip").with_code("DB"),
                ],
                Category::Plugins => vec![Item::named("Rainbow Brackets")],
            })
        }
    }

    struct StaticGenerator;

    #[async_trait]
    impl GenerationService for StaticGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            Ok(format!("KEY-{}", request.item_code.as_deref().unwrap_or("NONE")))
        }
    }

    #[derive(Default)]
    struct Recorded {
        identity: Option<Identity>,
        theme: Option<ThemeMode>,
        copied: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Recorded>>);

    impl PreferenceStore for Shared {
        fn identity(&self) -> Result<Option<Identity>> {
            Ok(self.0.lock().unwrap().identity.clone())
        }
        fn save_identity(&mut self, identity: &Identity) -> Result<()> {
            self.0.lock().unwrap().identity = Some(identity.clone());
            Ok(())
        }
        fn clear_identity(&mut self) -> Result<()> {
            self.0.lock().unwrap().identity = None;
            Ok(())
        }
        fn theme(&self) -> Result<Option<ThemeMode>> {
            Ok(self.0.lock().unwrap().theme)
        }
        fn save_theme(&mut self, mode: ThemeMode) -> Result<()> {
            self.0.lock().unwrap().theme = Some(mode);
            Ok(())
        }
    }

    impl ClipboardSink for Shared {
        fn copy(&mut self, text: &str) -> Result<()> {
            if text.is_empty() {
                return Err(CatalogError::Clipboard("nothing to copy".to_string()));
            }
            self.0.lock().unwrap().copied.push(text.to_string());
            Ok(())
        }
    }

    fn runtime(shared: &Shared, ttl: Duration) -> Runtime<Vec<u8>> {
        let state = AppState::new(Identity::new("Acme", "Jane"), ThemeMode::Dark).with_notification_ttl(ttl);
        Runtime::new(
            state,
            Arc::new(CatalogStore::new(Arc::new(StaticSource))),
            Arc::new(StaticGenerator),
            Box::new(shared.clone()),
            Box::new(shared.clone()),
            Vec::new(),
        )
    }

    async fn pump(runtime: &mut Runtime<Vec<u8>>) {
        let event = runtime.next_background_event().await;
        runtime.dispatch(event).unwrap();
    }

    #[tokio::test]
    async fn browse_generate_and_copy() {
        let shared = Shared::default();
        let mut rt = runtime(&shared, Duration::from_secs(60));

        rt.handle_line("go products").unwrap();
        pump(&mut rt).await;
        assert_eq!(rt.state().ranked.len(), 2);

        rt.handle_line("/grip").unwrap();
        rt.handle_line("pick 1").unwrap();
        assert_eq!(rt.state().overlay, Overlay::Parameters);

        rt.handle_line("generate").unwrap();
        assert!(rt.state().orchestrator.state().is_in_flight());
        pump(&mut rt).await;
        assert_eq!(rt.state().overlay, Overlay::Result);
        assert_eq!(rt.state().orchestrator.state(), &RequestState::Success("KEY-DB".to_string()));

        rt.handle_line("copy").unwrap();
        assert_eq!(shared.0.lock().unwrap().copied, vec!["KEY-DB".to_string()]);
        assert_eq!(
            rt.state().notification.as_ref().map(|n| n.message.as_str()),
            Some("Copied to clipboard")
        );

        let screen = String::from_utf8(rt.into_output()).unwrap();
        assert!(screen.contains("KEY-DB"));
    }

    #[tokio::test]
    async fn preferences_are_persisted() {
        let shared = Shared::default();
        let mut rt = runtime(&shared, Duration::from_secs(60));

        rt.handle_line("theme").unwrap();
        rt.handle_line("identity Initech | Peter").unwrap();
        {
            let recorded = shared.0.lock().unwrap();
            assert_eq!(recorded.theme, Some(ThemeMode::Light));
            assert_eq!(recorded.identity, Some(Identity::new("Initech", "Peter")));
        }

        rt.handle_line("forget").unwrap();
        assert_eq!(shared.0.lock().unwrap().identity, None);
        assert_eq!(rt.state().overlay, Overlay::Identity);
    }

    #[tokio::test]
    async fn newer_notification_cancels_older_timer() {
        let shared = Shared::default();
        let mut rt = runtime(&shared, Duration::from_millis(20));

        rt.handle_line("bogus").unwrap();
        rt.handle_line("pick 0").unwrap();
        let second = rt.state().notification.as_ref().map(|n| n.id);

        let event = rt.next_background_event().await;
        assert_eq!(Some(event.clone()), second.map(Event::NotificationExpired));
        rt.dispatch(event).unwrap();
        assert!(rt.state().notification.is_none());
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let shared = Shared::default();
        let rt = runtime(&shared, Duration::from_secs(60));
        let out = rt.run(&b"theme\nquit\ntheme\n"[..]).await.unwrap();
        assert!(!out.is_empty());
        assert_eq!(shared.0.lock().unwrap().theme, Some(ThemeMode::Light));
    }
}
