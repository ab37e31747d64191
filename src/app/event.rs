use super::activity::ActivityResult;

/// Events delivered to the active activity on each update.
pub enum Event {
    /// Raw terminal input.
    Term(crossterm::event::Event),
    /// The activity became active again after the one above it popped,
    /// carrying that activity's result if it produced one.
    ActiveAfterPop(Option<ActivityResult>),
}
