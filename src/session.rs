use std::collections::HashMap;

use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::quiz::Quiz;
use crate::view::QuizView;

/// One quiz per chat, serialized behind a single lock.
///
/// Every answer and reset for a chat goes through [`Sessions::update`], so the
/// pointer and counter of a quiz are never touched by two handlers at once.
#[derive(Debug, Default)]
pub struct Sessions {
    chats: Mutex<Chats>,
}

#[derive(Debug, Default)]
struct Chats {
    views: HashMap<ChatId, QuizView>,
    /// Last round of chats whose session ended, so a later session never
    /// reuses the callback data of an old keyboard.
    ended: HashMap<ChatId, u64>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session, replacing any quiz the chat was already running.
    ///
    /// The new session continues the chat's round count; returns its round.
    pub async fn begin(&self, chat: ChatId, quiz: Quiz) -> u64 {
        let mut chats = self.chats.lock().await;
        let previous = match chats.views.remove(&chat) {
            Some(view) => Some(view.round()),
            None => chats.ended.remove(&chat),
        };
        let round = previous.map_or(0, |round| round.wrapping_add(1));
        chats.views.insert(chat, QuizView::with_round(quiz, round));
        round
    }

    pub async fn update<T>(&self, chat: ChatId, f: impl FnOnce(&mut QuizView) -> T) -> Option<T> {
        self.chats.lock().await.views.get_mut(&chat).map(f)
    }

    /// Drops the chat's session; `false` when there was none.
    pub async fn end(&self, chat: ChatId) -> bool {
        let mut chats = self.chats.lock().await;
        match chats.views.remove(&chat) {
            Some(view) => {
                chats.ended.insert(chat, view.round());
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.chats.lock().await.views.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chats.lock().await.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::deck::Deck;
    use crate::view::{Feedback, QuestionFrame, QuizRenderer, Score};

    struct Discard;

    impl QuizRenderer for Discard {
        fn show_question(&mut self, _: &QuestionFrame<'_>) {}
        fn show_feedback(&mut self, _: &Feedback<'_>) {}
        fn transition(&mut self, _: std::time::Duration) {}
        fn show_result(&mut self, _: &Score) {}
    }

    async fn current_index(sessions: &Sessions, chat: ChatId) -> Option<usize> {
        sessions
            .update(chat, |view| view.quiz().current_question_index())
            .await
    }

    #[tokio::test]
    async fn sessions_are_per_chat() {
        let deck = Deck::sample();
        let sessions = Sessions::new();
        sessions.begin(ChatId(1), deck.quiz()).await;
        sessions.begin(ChatId(2), deck.quiz()).await;

        let answered = sessions
            .update(ChatId(1), |view| view.select_option(1, &mut Discard))
            .await;
        assert_eq!(answered, Some(Some(true)));

        assert_eq!(current_index(&sessions, ChatId(1)).await, Some(1));
        assert_eq!(current_index(&sessions, ChatId(2)).await, Some(0));
        assert_eq!(current_index(&sessions, ChatId(3)).await, None);
    }

    #[tokio::test]
    async fn begin_replaces_and_end_removes() {
        let deck = Deck::sample();
        let sessions = Sessions::new();
        sessions.begin(ChatId(7), deck.quiz()).await;
        sessions
            .update(ChatId(7), |view| view.select_option(0, &mut Discard))
            .await;

        sessions.begin(ChatId(7), deck.quiz()).await;
        assert_eq!(current_index(&sessions, ChatId(7)).await, Some(0));
        assert_eq!(sessions.len().await, 1);

        assert!(sessions.end(ChatId(7)).await);
        assert!(!sessions.end(ChatId(7)).await);
        assert!(sessions.is_empty().await);
    }

    #[tokio::test]
    async fn rounds_keep_counting_across_sessions() {
        let deck = Deck::sample();
        let sessions = Sessions::new();
        assert_eq!(sessions.begin(ChatId(5), deck.quiz()).await, 0);
        assert_eq!(sessions.begin(ChatId(4), deck.quiz()).await, 0);

        sessions.update(ChatId(5), |view| view.reset(&mut Discard)).await;
        assert_eq!(sessions.begin(ChatId(5), deck.quiz()).await, 2);

        assert!(sessions.end(ChatId(5)).await);
        assert_eq!(sessions.begin(ChatId(5), deck.quiz()).await, 3);
        assert_eq!(
            sessions.update(ChatId(5), |view| view.round()).await,
            Some(3)
        );
        assert_eq!(sessions.update(ChatId(4), |view| view.round()).await, Some(0));
    }

    #[tokio::test]
    async fn concurrent_answers_stay_in_bounds() {
        let deck = Deck::sample();
        let total = deck.questions().len();
        let sessions = Arc::new(Sessions::new());
        sessions.begin(ChatId(9), deck.quiz()).await;

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let sessions = Arc::clone(&sessions);
                tokio::spawn(async move {
                    sessions
                        .update(ChatId(9), |view| view.select_option(i % 4, &mut Discard))
                        .await
                })
            })
            .collect();
        let mut accepted = 0;
        for task in tasks {
            if let Some(Some(_)) = task.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, total);
        let (index, correct) = sessions
            .update(ChatId(9), |view| {
                (view.quiz().current_question_index(), view.quiz().correct_answers_count())
            })
            .await
            .unwrap();
        assert_eq!(index, total);
        assert!(correct <= index);
    }
}
