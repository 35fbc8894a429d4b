//! Application and per-request state machines.
//!
//! Neither machine enforces illegal transitions with a `Result` return — both are
//! advisory bookkeeping the application and the executor update as they go, matched
//! against in tests and exposed for observability. A violated transition is a
//! framework bug, not a recoverable runtime condition.

/// Whole-application lifecycle. Transitions move strictly left to right; `SHUTTING_DOWN`
/// is the only state with an outgoing edge that does not feed `EXITED` on a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationState {
    Created,
    Booted,
    Initialized,
    Serving,
    ShuttingDown,
    Exited,
}

impl ApplicationState {
    pub fn can_transition_to(self, next: ApplicationState) -> bool {
        use ApplicationState::*;
        matches!(
            (self, next),
            (Created, Booted)
                | (Booted, Initialized)
                | (Initialized, Serving)
                | (Serving, ShuttingDown)
                | (ShuttingDown, Exited)
        )
    }
}

/// Per-request lifecycle. `Failed` is reachable from every non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestState {
    Received,
    Routed,
    HookPre,
    Middleware,
    Invoked,
    HookPost,
    Shaped,
    Sent,
    Failed,
}

impl RequestState {
    pub fn can_transition_to(self, next: RequestState) -> bool {
        use RequestState::*;
        if next == Failed {
            return self != Sent && self != Failed;
        }
        matches!(
            (self, next),
            (Received, Routed)
                | (Routed, HookPre)
                | (Routed, Middleware)
                | (Routed, Invoked)
                | (HookPre, Middleware)
                | (HookPre, Invoked)
                | (Middleware, Invoked)
                | (Invoked, HookPost)
                | (Invoked, Shaped)
                | (HookPost, Shaped)
                | (Shaped, Sent)
        )
    }
}
