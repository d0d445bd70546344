use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rehearse::capability::{NoMedia, ScriptedRecognizer, Unsupported};
use rehearse::questions::QuestionScript;
use rehearse::runtime::{FixedTicker, InterviewEvent, Runner, TestEventSource};
use rehearse::session::{Difficulty, ExperienceLevel, FinishReason, InterviewType, SessionConfig};
use rehearse::timer::SecondClock;
use rehearse::{Room, Route, SessionContext};

fn context(minutes: u32) -> SessionContext {
    let mut ctx = SessionContext::new();
    ctx.set_config(SessionConfig {
        role: "Platform Engineer".into(),
        company: None,
        experience_level: ExperienceLevel::Senior,
        interview_type: InterviewType::Technical,
        duration_minutes: minutes,
        difficulty: Difficulty::Medium,
    });
    ctx
}

fn key(c: char) -> InterviewEvent {
    InterviewEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> InterviewEvent {
    InterviewEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

// Every idle poll counts as a full session second so the clock advances quickly.
fn fast_runner(rx: mpsc::Receiver<InterviewEvent>) -> Runner<TestEventSource, FixedTicker> {
    Runner::with_clock(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
        SecondClock::new(Duration::from_secs(1)),
    )
}

// Drives a room through Runner/TestEventSource without a TTY.
fn drive(
    runner: &mut Runner<TestEventSource, FixedTicker>,
    room: &mut Room,
    ctx: &mut SessionContext,
    steps: u32,
) -> Option<Route> {
    for _ in 0..steps {
        let next = match runner.step() {
            InterviewEvent::Second(secs) => (0..secs).find_map(|_| room.on_second(ctx)),
            InterviewEvent::Tick | InterviewEvent::Resize => None,
            InterviewEvent::Key(k) => match k.code {
                KeyCode::Enter => room.submit(ctx),
                KeyCode::Esc => room.end(ctx),
                KeyCode::Char(c) => {
                    room.type_char(c);
                    None
                }
                _ => None,
            },
        };
        if next.is_some() {
            return next;
        }
    }
    None
}

#[test]
fn headless_answers_every_question() {
    let script = QuestionScript {
        name: "pair".into(),
        questions: vec!["first?".into(), "second?".into()],
    };
    let mut ctx = context(15);
    let mut room = Room::enter(&ctx, &script, &NoMedia, Box::new(Unsupported)).unwrap();

    let (tx, rx) = mpsc::channel();
    for event in [key('o'), key('k'), enter(), key('y'), key('o'), enter()] {
        tx.send(event).unwrap();
    }
    drop(tx);

    let mut runner = fast_runner(rx);
    let next = drive(&mut runner, &mut room, &mut ctx, 50);

    assert_eq!(next, Some(Route::Results));
    let result = ctx.result().unwrap();
    assert_eq!(result.answers, vec!["ok".to_string(), "yo".to_string()]);
    assert_eq!(result.completion_rate, 100.0);
    assert_eq!(result.finish_reason, FinishReason::AllAnswered);
    assert_eq!(result.total_time_secs, 0);
}

#[test]
fn headless_session_finishes_by_time() {
    let mut ctx = context(15);
    let mut room = Room::enter(&ctx, &QuestionScript::default(), &NoMedia, Box::new(Unsupported)).unwrap();

    // disconnected source: every step is an idle poll
    let (tx, rx) = mpsc::channel::<InterviewEvent>();
    drop(tx);
    let mut runner = fast_runner(rx);
    let next = drive(&mut runner, &mut room, &mut ctx, 2000);

    assert_eq!(next, Some(Route::Results));
    assert!(!room.timer_running());
    let result = ctx.result().unwrap();
    assert_eq!(result.finish_reason, FinishReason::TimeExpired);
    assert_eq!(result.total_time_secs, 900);
    assert_eq!(result.completion_rate, 12.5);
    assert!(result.answers.is_empty());
}

#[test]
fn headless_voice_transcript_becomes_answer() {
    let mut ctx = context(30);
    let mut room = Room::enter(
        &ctx,
        &QuestionScript::default(),
        &NoMedia,
        Box::new(ScriptedRecognizer::new("led the migration")),
    )
    .unwrap();
    room.start_listening().unwrap();

    for _ in 0..3 {
        assert_eq!(room.on_second(&mut ctx), None);
    }
    assert_eq!(room.draft(), "led the migration");
    assert!(!room.is_listening());

    assert_eq!(room.submit(&mut ctx), None);
    assert_eq!(room.question_number(), 2);
    assert_eq!(room.answers(), ["led the migration".to_string()]);
}
