/// Where a chat is in its conversation with the bot.
///
/// The quiz itself lives in [`Sessions`](crate::session::Sessions); this only
/// routes updates to the right handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizState {
    #[default]
    Start,
    Answering,
    Finished,
}

impl QuizState {
    pub fn after(finished: bool) -> Self {
        if finished {
            QuizState::Finished
        } else {
            QuizState::Answering
        }
    }
}
