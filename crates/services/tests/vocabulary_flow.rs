use std::collections::HashMap;
use std::sync::Arc;

use lingua_core::model::{LanguageId, PracticeTarget, SessionConfig, SessionId};
use lingua_core::time::fixed_clock;
use services::{InMemoryPracticeApi, VocabularyEvent, VocabularySession, VocabularyState};

const GERMAN: LanguageId = LanguageId::new(3);

fn seeded_api() -> (InMemoryPracticeApi, HashMap<String, String>) {
    let api = InMemoryPracticeApi::new();
    let mut answers = HashMap::new();
    for (word, translation) in [
        ("Hund", "dog"),
        ("Katze", "cat"),
        ("Haus", "house"),
        ("Baum", "tree"),
        ("Wasser", "water"),
        ("Brot", "bread"),
        ("Buch", "book"),
        ("Stadt", "city"),
        ("Zug", "train"),
        ("Apfel", "apple"),
    ] {
        api.add_word(GERMAN, word, Some(translation));
        answers.insert(word.to_string(), translation.to_string());
    }
    (api, answers)
}

#[tokio::test]
async fn ten_answers_score_the_correct_selections() {
    let (api, answers) = seeded_api();
    let mut session = VocabularySession::new(
        Arc::new(api.clone()),
        SessionConfig::new(SessionId::new(42), GERMAN, "German"),
    )
    .with_clock(fixed_clock())
    .with_seed(2024);
    session.start().await;
    assert_eq!(session.total_questions(), 10);

    let mut expected_score = 0;
    let mut last_index = session.current_index();
    for round in 0..10 {
        let VocabularyState::Question(prompt) = session.state().clone() else {
            panic!("round {round}: expected a question, got {:?}", session.state());
        };
        assert_eq!(prompt.number, round + 1);

        // Alternate between the right answer and the first wrong one.
        let correct = answers[&prompt.word].as_str();
        let index = if round % 3 == 0 {
            prompt
                .options
                .iter()
                .position(|option| option.label() != correct)
                .unwrap()
        } else {
            expected_score += 1;
            prompt
                .options
                .iter()
                .position(|option| option.label() == correct)
                .unwrap()
        };
        session
            .handle(VocabularyEvent::Select(index))
            .await
            .unwrap();
        session.handle(VocabularyEvent::Next).await.unwrap();

        if round < 9 {
            assert_eq!(session.current_index(), last_index + 1);
        }
        last_index = session.current_index();
    }

    assert_eq!(session.current_index(), session.total_questions());
    let VocabularyState::Results(results) = session.state().clone() else {
        panic!("expected results, got {:?}", session.state());
    };
    assert_eq!(results.total_answered, 10);
    assert_eq!(results.score, expected_score);
    assert_eq!(results.accuracy, 60);

    session.flush_tracking().await;
    let records = api.records();
    assert_eq!(records.len(), 10);
    assert!(records.iter().all(|record| {
        record.session_id == SessionId::new(42)
            && matches!(record.target, PracticeTarget::Vocabulary(_))
    }));
    assert_eq!(
        records.iter().filter(|record| record.is_correct).count(),
        usize::try_from(expected_score).unwrap()
    );

    let reports = api.end_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].correct_answers, expected_score);
    assert_eq!(reports[0].words_practiced, 10);
}

#[tokio::test]
async fn ticker_stops_once_results_show() {
    let (api, _) = seeded_api();
    let mut session = VocabularySession::new(
        Arc::new(api),
        SessionConfig::new(SessionId::new(1), GERMAN, "German"),
    )
    .with_question_limit(1)
    .with_seed(1);
    session.start().await;
    let mut updates = session.elapsed_updates();

    session.select(0).unwrap();
    session.next().unwrap();
    assert!(matches!(session.state(), VocabularyState::Results(_)));

    // Once stopped, no further ticks are published.
    let _ = updates.borrow_and_update();
    tokio::time::pause();
    tokio::time::advance(std::time::Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    assert!(!updates.has_changed().unwrap_or(false));
}
