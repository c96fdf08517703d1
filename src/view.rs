//! Presentation driver for a [`Quiz`].
//!
//! [`QuizView`] owns the quiz and tells a host-supplied [`QuizRenderer`] what
//! to show: the current question, feedback on each answer, a timed transition
//! and finally the score. The renderer decides what that looks like.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::layout::{Layout, Size};
use crate::quiz::{Question, Quiz, QuizConfig};

/// Observer notified by [`QuizView`] whenever something should be drawn.
pub trait QuizRenderer {
    fn show_question(&mut self, frame: &QuestionFrame<'_>);

    fn show_feedback(&mut self, feedback: &Feedback<'_>);

    /// Fade between two screens; the next `show_*` call follows it.
    fn transition(&mut self, duration: Duration);

    fn show_result(&mut self, score: &Score);
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionFrame<'a> {
    pub question: &'a Question,
    /// Which pass through the quiz this is, see [`QuizView::round`].
    pub round: u64,
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub progress: f32,
    pub config: &'a QuizConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct Feedback<'a> {
    pub question: &'a Question,
    pub selected: usize,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your score: {}/{}", self.correct, self.total)
    }
}

#[derive(Debug)]
pub struct QuizView {
    quiz: Quiz,
    round: u64,
}

impl QuizView {
    pub fn new(quiz: Quiz) -> Self {
        Self::with_round(quiz, 0)
    }

    pub fn with_round(quiz: Quiz, round: u64) -> Self {
        Self { quiz, round }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Counts passes through the quiz; every [`QuizView::reset`] starts a new one.
    ///
    /// Input drawn for an earlier round can be told apart from the current one
    /// even when it points at the same question.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn score(&self) -> Score {
        Score {
            correct: self.quiz.correct_answers_count(),
            total: self.quiz.question_count(),
        }
    }

    /// Fill level of the progress bar.
    ///
    /// Empty on the first question, full once finished, and otherwise the
    /// answered share of every question but the last.
    pub fn progress(&self) -> f32 {
        if self.quiz.is_finished() {
            return 1.0;
        }
        match self.quiz.current_question_index() {
            0 => 0.0,
            index => index as f32 / (self.quiz.question_count() - 1) as f32,
        }
    }

    /// Geometry for the current question, `None` once finished.
    pub fn layout(&self, size: Size) -> Option<Layout> {
        let question = self.quiz.current_question()?;
        Some(Layout::compute(
            self.quiz.config(),
            size,
            question.options().len(),
        ))
    }

    pub fn present<R: QuizRenderer + ?Sized>(&self, renderer: &mut R) {
        match self.quiz.current_question() {
            Some(question) => renderer.show_question(&QuestionFrame {
                question,
                round: self.round,
                number: self.quiz.current_question_index() + 1,
                total: self.quiz.question_count(),
                progress: self.progress(),
                config: self.quiz.config(),
            }),
            None => renderer.show_result(&self.score()),
        }
    }

    /// Answers the current question with `index` and moves on.
    ///
    /// Returns `None` and renders nothing when there is no question to answer.
    pub fn select_option<R: QuizRenderer + ?Sized>(
        &mut self,
        index: usize,
        renderer: &mut R,
    ) -> Option<bool> {
        let question = self.quiz.current_question()?.clone();
        let is_correct = self.quiz.check_answer(index);
        debug!(
            question = question.label(),
            selected = index,
            is_correct,
            "answer checked"
        );

        renderer.show_feedback(&Feedback {
            question: &question,
            selected: index,
            is_correct,
        });
        renderer.transition(self.quiz.config().animation_duration);
        self.present(renderer);
        Some(is_correct)
    }

    pub fn reset<R: QuizRenderer + ?Sized>(&mut self, renderer: &mut R) {
        renderer.transition(self.quiz.config().animation_duration);
        self.quiz.reset_quiz();
        self.round = self.round.wrapping_add(1);
        debug!(round = self.round, questions = self.quiz.question_count(), "quiz reset");
        self.present(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Event {
        Question { number: usize, total: usize, progress: f32 },
        Feedback { selected: usize, is_correct: bool },
        Transition(Duration),
        Result(Score),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl QuizRenderer for Recorder {
        fn show_question(&mut self, frame: &QuestionFrame<'_>) {
            self.0.push(Event::Question {
                number: frame.number,
                total: frame.total,
                progress: frame.progress,
            });
        }

        fn show_feedback(&mut self, feedback: &Feedback<'_>) {
            self.0.push(Event::Feedback {
                selected: feedback.selected,
                is_correct: feedback.is_correct,
            });
        }

        fn transition(&mut self, duration: Duration) {
            self.0.push(Event::Transition(duration));
        }

        fn show_result(&mut self, score: &Score) {
            self.0.push(Event::Result(*score));
        }
    }

    fn view(corrects: &[usize]) -> QuizView {
        let questions = corrects
            .iter()
            .map(|&c| Question::new("q", vec!["a".into(), "b".into(), "c".into()], c))
            .collect();
        QuizView::new(Quiz::new(questions, QuizConfig::default()))
    }

    const FADE: Duration = Duration::from_millis(700);

    #[test]
    fn present_shows_first_question() {
        let view = view(&[0, 1, 2]);
        let mut recorder = Recorder::default();
        view.present(&mut recorder);

        assert_eq!(
            recorder.0,
            vec![Event::Question {
                number: 1,
                total: 3,
                progress: 0.0
            }]
        );
    }

    #[test]
    fn answering_walks_to_result() {
        let mut view = view(&[0, 1, 2]);
        let mut recorder = Recorder::default();

        assert_eq!(view.select_option(0, &mut recorder), Some(true));
        assert_eq!(view.select_option(0, &mut recorder), Some(false));
        assert_eq!(view.select_option(2, &mut recorder), Some(true));

        assert_eq!(
            recorder.0,
            vec![
                Event::Feedback { selected: 0, is_correct: true },
                Event::Transition(FADE),
                Event::Question { number: 2, total: 3, progress: 0.5 },
                Event::Feedback { selected: 0, is_correct: false },
                Event::Transition(FADE),
                Event::Question { number: 3, total: 3, progress: 1.0 },
                Event::Feedback { selected: 2, is_correct: true },
                Event::Transition(FADE),
                Event::Result(Score { correct: 2, total: 3 }),
            ]
        );
        assert_eq!(view.score().to_string(), "Your score: 2/3");
    }

    #[test]
    fn finished_view_ignores_taps() {
        let mut view = view(&[1]);
        let mut recorder = Recorder::default();
        view.select_option(1, &mut recorder);
        recorder.0.clear();

        assert_eq!(view.select_option(1, &mut recorder), None);
        assert!(recorder.0.is_empty());
        assert_eq!(view.score(), Score { correct: 1, total: 1 });
    }

    #[test]
    fn reset_fades_back_to_first_question() {
        let mut view = view(&[1, 1]);
        let mut recorder = Recorder::default();
        view.select_option(1, &mut recorder);
        view.select_option(0, &mut recorder);
        recorder.0.clear();

        view.reset(&mut recorder);

        assert_eq!(
            recorder.0,
            vec![
                Event::Transition(FADE),
                Event::Question { number: 1, total: 2, progress: 0.0 },
            ]
        );
        assert_eq!(view.score(), Score { correct: 0, total: 2 });
        assert_eq!(view.round(), 1);
    }

    #[test]
    fn answers_keep_the_round() {
        let mut view = QuizView::with_round(view(&[0, 0]).quiz, 5);
        view.select_option(0, &mut Recorder::default());
        assert_eq!(view.round(), 5);

        view.reset(&mut Recorder::default());
        view.reset(&mut Recorder::default());
        assert_eq!(view.round(), 7);
    }

    #[test]
    fn empty_quiz_presents_result() {
        let view = view(&[]);
        let mut recorder = Recorder::default();
        view.present(&mut recorder);

        assert_eq!(recorder.0, vec![Event::Result(Score { correct: 0, total: 0 })]);
        assert_eq!(view.progress(), 1.0);
        assert!(view.layout(Size::new(300.0, 400.0)).is_none());
    }

    #[test]
    fn layout_tracks_current_options() {
        let view = view(&[0]);
        let layout = view.layout(Size::new(300.0, 420.0)).unwrap();
        assert_eq!(layout.options.len(), 3);
    }
}
