//! Fetch/init controller.
//!
//! Owns the only mutable state in the viewer: the [`ViewState`] and the
//! [`Surface`] it renders into. Lifecycle:
//!
//! ```text
//! Loading ──fetch ok──▶ Ready ──input (debounced)──▶ Ready (filtered)
//!    │
//!    └──fetch/parse/server failure──▶ Error   (search stays inert)
//! ```
//!
//! All mutation happens on the task driving [`Controller::run`]; input
//! events arrive over a channel and the debounce timer lives in the same
//! `select!` loop, so render passes never interleave.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use card_viewer_core::render::CardTemplate;
use card_viewer_core::source::CardSource;
use card_viewer_core::state::ViewState;
use card_viewer_core::surface::{render_pass, Surface, LOADING_STATUS};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::debounce::Debouncer;
use crate::error::ViewerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    /// Carries the status line shown to the user.
    Error(String),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Loading => write!(f, "loading"),
            Phase::Ready => write!(f, "ready"),
            Phase::Error(msg) => write!(f, "error ({})", msg),
        }
    }
}

pub struct Controller<S: Surface> {
    source: Arc<dyn CardSource>,
    surface: S,
    template: CardTemplate,
    debounce: Duration,
    phase: Phase,
    state: Option<ViewState>,
    flush_on_close: bool,
}

impl<S: Surface> Controller<S> {
    pub fn new(source: Arc<dyn CardSource>, surface: S, debounce: Duration) -> Self {
        Self {
            source,
            surface,
            template: CardTemplate::default(),
            debounce,
            phase: Phase::Loading,
            state: None,
            flush_on_close: false,
        }
    }

    /// Applies a still-pending query when the input channel closes instead
    /// of discarding it. Off by default.
    pub fn flush_on_close(mut self, flush: bool) -> Self {
        self.flush_on_close = flush;
        self
    }

    /// Replaces the default card template.
    pub fn with_template(mut self, template: CardTemplate) -> Self {
        let missing = template.missing_slots();
        if !missing.is_empty() {
            warn!(?missing, "card template lacks slots; they will not be rendered");
        }
        self.template = template;
        self
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn state(&self) -> Option<&ViewState> {
        self.state.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Performs the single startup fetch and the initial render.
    ///
    /// On failure the status line shows `Error: {message}`, no cards are
    /// rendered, and the controller stays in [`Phase::Error`]. Calling this
    /// again after the first attempt does not refetch.
    pub async fn start(&mut self) -> Result<usize, ViewerError> {
        match &self.phase {
            Phase::Loading => {}
            Phase::Ready => {
                warn!("controller already started; not refetching");
                return Ok(self.state.as_ref().map_or(0, ViewState::displayed_len));
            }
            Phase::Error(_) => return Err(ViewerError::NotReady(self.phase.to_string())),
        }

        self.surface.set_status(LOADING_STATUS);

        match self.source.fetch_cards().await {
            Ok(raws) => {
                let state = ViewState::from_raw(&raws);
                let shown = render_pass(&mut self.surface, &self.template, state.displayed());
                info!(source = %self.source.describe(), cards = shown, "cards loaded");
                self.state = Some(state);
                self.phase = Phase::Ready;
                Ok(shown)
            }
            Err(e) => {
                let line = e.status_line();
                warn!(
                    source = %self.source.describe(),
                    kind = e.kind(),
                    error = %e,
                    "failed to load cards"
                );
                self.surface.set_status(&line);
                self.phase = Phase::Error(line);
                Err(e.into())
            }
        }
    }

    /// Filters the full set by `query` and re-renders. Ready phase only.
    pub fn apply_query(&mut self, query: &str) -> Result<usize, ViewerError> {
        let next = match (&self.phase, &self.state) {
            (Phase::Ready, Some(state)) => state.with_query(query),
            _ => return Err(ViewerError::NotReady(self.phase.to_string())),
        };
        let shown = render_pass(&mut self.surface, &self.template, next.displayed());
        debug!(query, shown, "query applied");
        self.state = Some(next);
        Ok(shown)
    }

    /// Drives debounced search until `inputs` closes, then hands back the
    /// surface.
    ///
    /// Each received value is the search box's full current text. Values
    /// arriving within the debounce delay of each other collapse into one
    /// render pass using the last value. A pending value is discarded when
    /// the channel closes unless [`Controller::flush_on_close`] is set.
    /// Outside [`Phase::Ready`] this returns at once without reading any
    /// input.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<String>) -> S {
        if self.phase != Phase::Ready {
            debug!(phase = %self.phase, "search disabled");
            return self.surface;
        }

        let mut debouncer = Debouncer::new(self.debounce);
        loop {
            tokio::select! {
                event = inputs.recv() => match event {
                    Some(query) => {
                        if debouncer.arm(query) {
                            trace!("pending query superseded");
                        }
                    }
                    None => {
                        match debouncer.cancel() {
                            Some(query) if self.flush_on_close => {
                                debug!("input closed; applying pending query");
                                if let Err(e) = self.apply_query(&query) {
                                    warn!(error = %e, "query not applied");
                                }
                            }
                            Some(_) => debug!("input closed; discarding pending query"),
                            None => {}
                        }
                        break;
                    }
                },
                query = debouncer.settled() => {
                    if let Err(e) = self.apply_query(&query) {
                        warn!(error = %e, "query not applied");
                    }
                }
            }
        }
        self.surface
    }
}
