//! Selection lifecycle as an explicit state machine.
//!
//! The host page feeds [`Event`]s in and performs the returned [`Effect`]s;
//! the machine itself never touches the page. This keeps the debounce and
//! teardown rules auditable and testable without a real document.

use std::time::Duration;

use crate::suggestion::Suggestion;

/// Where a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    FormField,
    RichContent,
}

/// A raw selection-change notification. The host resolves the text before
/// handing it over: the field substring between selection start and end for
/// form fields, the stringified page selection otherwise.
#[derive(Debug, Clone)]
pub struct RawSelection {
    /// Untrimmed selected text.
    pub text: String,
    pub source: SourceKind,
    pub range_start: usize,
    pub range_end: usize,
    /// True when the selection anchor lies inside the result panel.
    pub inside_result_panel: bool,
}

/// A stabilized, non-empty selection. Immutable once captured; replaced or
/// discarded on the next selection event or dismissal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// Trimmed selected text.
    pub text: String,
    pub source: SourceKind,
    pub range_start: usize,
    pub range_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    Debouncing,
    AffordanceShown,
    Checking,
    ResultShown,
}

/// Events fed to the watcher by the host.
#[derive(Debug, Clone)]
pub enum Event {
    SelectionChanged(RawSelection),
    DebounceElapsed,
    /// Scroll, resize, or field scroll while the affordance is visible.
    ViewportMoved,
    AffordanceActivated,
    CheckCompleted(Vec<Suggestion>),
    CheckFailed(String),
    EscapePressed,
    ResultDismissed,
}

/// Side effects the host must perform in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartDebounce(Duration),
    CancelDebounce,
    /// Insert the affordance; the host resolves the anchor point via the
    /// caret locator (form fields) or the native selection rectangle.
    ShowAffordance(SelectionSnapshot),
    RemoveAffordance,
    /// Attach scroll/resize (and field scroll) listeners that keep the
    /// affordance anchored.
    AttachTracking,
    DetachTracking,
    Reposition(SelectionSnapshot),
    ShowBusy,
    ShowIdleIcon,
    BeginCheck(String),
    PresentResult {
        text: String,
        suggestions: Vec<Suggestion>,
    },
    DismissResult,
}

pub struct SelectionWatcher {
    state: WatcherState,
    debounce: Duration,
    pending: Option<RawSelection>,
    snapshot: Option<SelectionSnapshot>,
    /// Whether tracking listeners are currently attached. Attach and detach
    /// effects are emitted only on transitions of this flag, so at most one
    /// listener set is ever live.
    tracking: bool,
}

impl SelectionWatcher {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

    pub fn new(debounce: Duration) -> Self {
        Self {
            state: WatcherState::Idle,
            debounce,
            pending: None,
            snapshot: None,
            tracking: false,
        }
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    pub fn snapshot(&self) -> Option<&SelectionSnapshot> {
        self.snapshot.as_ref()
    }

    /// Processes one event and returns the effects the host must perform.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SelectionChanged(raw) => self.on_selection_changed(raw),
            Event::DebounceElapsed => self.on_debounce_elapsed(),
            Event::ViewportMoved => self.on_viewport_moved(),
            Event::AffordanceActivated => self.on_activated(),
            Event::CheckCompleted(suggestions) => self.on_check_completed(suggestions),
            Event::CheckFailed(reason) => self.on_check_failed(&reason),
            Event::EscapePressed | Event::ResultDismissed => self.on_dismissed(),
        }
    }

    fn on_selection_changed(&mut self, raw: RawSelection) -> Vec<Effect> {
        // The user is selecting text inside the suggestions; leave the
        // panel alone.
        if self.state == WatcherState::ResultShown && raw.inside_result_panel {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.state == WatcherState::Debouncing {
            effects.push(Effect::CancelDebounce);
        }
        self.teardown_affordance(&mut effects);
        if self.state == WatcherState::ResultShown {
            effects.push(Effect::DismissResult);
        }

        effects.push(Effect::StartDebounce(self.debounce));
        self.pending = Some(raw);
        self.snapshot = None;
        self.state = WatcherState::Debouncing;
        effects
    }

    fn on_debounce_elapsed(&mut self) -> Vec<Effect> {
        if self.state != WatcherState::Debouncing {
            return Vec::new();
        }

        let raw = match self.pending.take() {
            Some(raw) => raw,
            None => {
                self.state = WatcherState::Idle;
                return Vec::new();
            }
        };

        let text = raw.text.trim();
        if text.is_empty() {
            // Whitespace-only selection: abort silently.
            self.state = WatcherState::Idle;
            return Vec::new();
        }

        let snapshot = SelectionSnapshot {
            text: text.to_string(),
            source: raw.source,
            range_start: raw.range_start,
            range_end: raw.range_end,
        };
        self.snapshot = Some(snapshot.clone());
        self.state = WatcherState::AffordanceShown;
        self.tracking = true;
        vec![Effect::ShowAffordance(snapshot), Effect::AttachTracking]
    }

    fn on_viewport_moved(&mut self) -> Vec<Effect> {
        match (self.state, &self.snapshot) {
            (WatcherState::AffordanceShown, Some(snapshot)) => {
                vec![Effect::Reposition(snapshot.clone())]
            }
            _ => Vec::new(),
        }
    }

    fn on_activated(&mut self) -> Vec<Effect> {
        match self.state {
            WatcherState::AffordanceShown => {
                let text = match &self.snapshot {
                    Some(snapshot) => snapshot.text.clone(),
                    None => return Vec::new(),
                };
                self.state = WatcherState::Checking;
                let mut effects = Vec::new();
                if self.tracking {
                    self.tracking = false;
                    effects.push(Effect::DetachTracking);
                }
                effects.push(Effect::ShowBusy);
                effects.push(Effect::BeginCheck(text));
                effects
            }
            WatcherState::Checking => {
                // One request per affordance.
                log::debug!("check already in flight, ignoring activation");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_check_completed(&mut self, suggestions: Vec<Suggestion>) -> Vec<Effect> {
        if self.state != WatcherState::Checking {
            log::debug!("dropping stale check result");
            return Vec::new();
        }
        let text = match self.snapshot.take() {
            Some(snapshot) => snapshot.text,
            None => return Vec::new(),
        };
        self.state = WatcherState::ResultShown;
        vec![
            Effect::RemoveAffordance,
            Effect::PresentResult { text, suggestions },
        ]
    }

    fn on_check_failed(&mut self, reason: &str) -> Vec<Effect> {
        if self.state != WatcherState::Checking {
            return Vec::new();
        }
        log::error!("spell check failed: {reason}");
        // Back to the ready icon; the user may try again. No retry on our
        // own and no re-attach, the anchor listeners were released when the
        // check started.
        self.state = WatcherState::AffordanceShown;
        vec![Effect::ShowIdleIcon]
    }

    fn on_dismissed(&mut self) -> Vec<Effect> {
        if self.state != WatcherState::ResultShown {
            return Vec::new();
        }
        self.state = WatcherState::Idle;
        self.snapshot = None;
        vec![Effect::DismissResult]
    }

    fn teardown_affordance(&mut self, effects: &mut Vec<Effect>) {
        if matches!(
            self.state,
            WatcherState::AffordanceShown | WatcherState::Checking
        ) {
            effects.push(Effect::RemoveAffordance);
        }
        if self.tracking {
            self.tracking = false;
            effects.push(Effect::DetachTracking);
        }
    }
}
