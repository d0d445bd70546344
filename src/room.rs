use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::capability::{MediaCapture, MediaHandle, SpeechRecognizer};
use crate::context::{Route, SessionContext};
use crate::error::{CapabilityError, InterviewError};
use crate::questions::QuestionScript;
use crate::sequencer::QuestionSequencer;
use crate::session::{completion_rate, FinishReason, SessionConfig, SessionResult};
use crate::timer::{CountdownTimer, TickOutcome};

/// One-shot gate: only the first `close` wins.
#[derive(Debug, Default)]
pub struct FinalizeLatch {
    closed: AtomicBool,
}

impl FinalizeLatch {
    /// Returns true exactly once, for the caller that closed the latch.
    pub fn close(&self) -> bool {
        self.closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// A live interview: owns the countdown, the question cursor and the answers
/// for the duration of one session.
pub struct Room {
    config: SessionConfig,
    sequencer: QuestionSequencer,
    timer: CountdownTimer,
    answers: Vec<String>,
    answer_times: Vec<u64>,
    question_elapsed: u64,
    draft: String,
    recording: bool,
    media: Option<MediaHandle>,
    speech: Box<dyn SpeechRecognizer>,
    latch: FinalizeLatch,
}

impl Room {
    /// Start a session from the configuration in `ctx`.
    ///
    /// Fails before any timer exists when no configuration was set, or when the
    /// stored one has an empty role or an unlisted duration. Missing media devices
    /// only degrade the room.
    pub fn enter(
        ctx: &SessionContext,
        script: &QuestionScript,
        media: &dyn MediaCapture,
        speech: Box<dyn SpeechRecognizer>,
    ) -> Result<Self, InterviewError> {
        let config = ctx
            .config()
            .cloned()
            .ok_or(InterviewError::MissingConfiguration)?
            .validated()?;
        let sequencer = script.sequencer()?;

        let media = match media.acquire() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "continuing without camera");
                None
            }
        };
        if !speech.is_available() {
            info!("{}", CapabilityError::SpeechRecognitionUnavailable);
        }

        info!(
            role = %config.role,
            kind = %config.interview_type,
            minutes = config.duration_minutes,
            questions = sequencer.len(),
            "interview started"
        );

        Ok(Self {
            timer: CountdownTimer::new(config.duration_secs()),
            config,
            sequencer,
            answers: Vec::new(),
            answer_times: Vec::new(),
            question_elapsed: 0,
            draft: String::new(),
            recording: false,
            media,
            speech,
            latch: FinalizeLatch::default(),
        })
    }

    /// Advance the session by one second.
    pub fn on_second(&mut self, ctx: &mut SessionContext) -> Option<Route> {
        if self.is_terminated() {
            return None;
        }

        self.question_elapsed += 1;
        if let Some(transcript) = self.speech.poll() {
            self.draft = transcript;
        }

        match self.timer.tick() {
            TickOutcome::Expired => self.finalize(ctx, FinishReason::TimeExpired),
            TickOutcome::Ticked | TickOutcome::Idle => None,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if !self.is_terminated() {
            self.draft.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    pub fn can_submit(&self) -> bool {
        !self.is_terminated() && !self.draft.trim().is_empty()
    }

    /// Record the current draft as the answer to the current question.
    ///
    /// Blank drafts are ignored. Answering the last question ends the session.
    pub fn submit(&mut self, ctx: &mut SessionContext) -> Option<Route> {
        self.submit_answer(ctx, None)
    }

    /// Submit `answer` directly, bypassing the draft buffer.
    pub fn submit_text(&mut self, ctx: &mut SessionContext, answer: &str) -> Option<Route> {
        self.submit_answer(ctx, Some(answer))
    }

    fn submit_answer(&mut self, ctx: &mut SessionContext, answer: Option<&str>) -> Option<Route> {
        let answer = answer.unwrap_or(&self.draft).to_string();
        if self.is_terminated() || answer.trim().is_empty() {
            return None;
        }

        self.answers.push(answer);
        self.answer_times.push(self.question_elapsed);

        if self.sequencer.has_next() {
            self.sequencer.advance();
            self.on_question_changed();
            None
        } else {
            self.finalize(ctx, FinishReason::AllAnswered)
        }
    }

    /// Move on without answering. Never ends the session.
    pub fn skip(&mut self) -> bool {
        if self.is_terminated() || !self.sequencer.advance() {
            return false;
        }
        self.on_question_changed();
        true
    }

    pub fn end(&mut self, ctx: &mut SessionContext) -> Option<Route> {
        self.finalize(ctx, FinishReason::EndedEarly)
    }

    /// Compute and store the session result, then hand back the next route.
    ///
    /// Every ending trigger funnels through here; only the first call has any
    /// effect and later ones return `None`.
    pub fn finalize(&mut self, ctx: &mut SessionContext, reason: FinishReason) -> Option<Route> {
        if !self.latch.close() {
            return None;
        }

        self.timer.stop();
        self.speech.stop();
        if let Some(media) = self.media.as_mut() {
            media.release();
        }
        self.recording = false;

        let questions_asked = self.sequencer.asked().to_vec();
        let result = SessionResult {
            config: self.config.clone(),
            answers: self.answers.clone(),
            completion_rate: completion_rate(questions_asked.len(), self.sequencer.len()),
            questions_asked,
            question_total: self.sequencer.len(),
            total_time_secs: self.timer.elapsed_secs(),
            answer_times: self.answer_times.clone(),
            finish_reason: reason,
            finished_at: Local::now(),
        };

        info!(
            reason = %reason,
            answered = result.answers.len(),
            completion = result.completion_rate,
            secs = result.total_time_secs,
            "interview finalized"
        );
        ctx.set_result(result);
        Some(Route::Results)
    }

    fn on_question_changed(&mut self) {
        self.draft.clear();
        self.question_elapsed = 0;
        self.speech.stop();
    }

    pub fn toggle_recording(&mut self) -> bool {
        if !self.is_terminated() {
            self.recording = !self.recording;
        }
        self.recording
    }

    pub fn toggle_camera(&mut self) -> bool {
        self.media.as_mut().is_some_and(MediaHandle::toggle_camera)
    }

    pub fn toggle_mic(&mut self) -> bool {
        self.media.as_mut().is_some_and(MediaHandle::toggle_mic)
    }

    /// Start voice input. The recognizer's interim transcripts replace the draft.
    pub fn start_listening(&mut self) -> Result<(), CapabilityError> {
        if self.speech.is_listening() || self.is_terminated() {
            return Ok(());
        }
        self.speech.start()
    }

    pub fn is_terminated(&self) -> bool {
        self.latch.is_closed()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_question(&self) -> Result<&str, InterviewError> {
        self.sequencer.current()
    }

    /// 1-based position of the current question.
    pub fn question_number(&self) -> usize {
        self.sequencer.cursor() + 1
    }

    pub fn question_total(&self) -> usize {
        self.sequencer.len()
    }

    pub fn has_next(&self) -> bool {
        self.sequencer.has_next()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.timer.remaining_secs()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn question_elapsed(&self) -> u64 {
        self.question_elapsed
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn media(&self) -> Option<&MediaHandle> {
        self.media.as_ref()
    }

    pub fn voice_available(&self) -> bool {
        self.speech.is_available()
    }

    pub fn is_listening(&self) -> bool {
        self.speech.is_listening()
    }
}

impl Drop for Room {
    fn drop(&mut self) {
        if !self.is_terminated() {
            info!("left interview room before it finished");
        }
        self.timer.stop();
        self.speech.stop();
        if let Some(media) = self.media.as_mut() {
            media.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{NoMedia, ScriptedRecognizer, Unsupported};
    use crate::session::{Difficulty, ExperienceLevel, InterviewType};
    use assert_matches::assert_matches;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeCamera;

    struct TrackedCamera(Rc<Cell<bool>>);

    impl MediaCapture for TrackedCamera {
        fn acquire(&self) -> Result<MediaHandle, CapabilityError> {
            let released = Rc::clone(&self.0);
            Ok(MediaHandle::new("tracked").with_release_hook(move || released.set(true)))
        }
    }

    struct TrackedSpeech {
        listening: bool,
        stopped: Rc<Cell<bool>>,
    }

    impl SpeechRecognizer for TrackedSpeech {
        fn is_available(&self) -> bool {
            true
        }

        fn start(&mut self) -> Result<(), CapabilityError> {
            self.listening = true;
            Ok(())
        }

        fn stop(&mut self) {
            if self.listening {
                self.stopped.set(true);
            }
            self.listening = false;
        }

        fn is_listening(&self) -> bool {
            self.listening
        }

        fn poll(&mut self) -> Option<String> {
            None
        }
    }

    impl MediaCapture for FakeCamera {
        fn acquire(&self) -> Result<MediaHandle, CapabilityError> {
            Ok(MediaHandle::new("fake"))
        }
    }

    fn ctx_with(minutes: u32) -> SessionContext {
        let mut ctx = SessionContext::new();
        ctx.set_config(SessionConfig {
            role: "Backend Engineer".into(),
            company: Some("Acme".into()),
            experience_level: ExperienceLevel::Mid,
            interview_type: InterviewType::Behavioral,
            duration_minutes: minutes,
            difficulty: Difficulty::Medium,
        });
        ctx
    }

    fn room(ctx: &SessionContext) -> Room {
        Room::enter(ctx, &QuestionScript::default(), &NoMedia, Box::new(Unsupported)).unwrap()
    }

    #[test]
    fn latch_closes_once() {
        let latch = FinalizeLatch::default();
        assert!(!latch.is_closed());
        assert!(latch.close());
        assert!(!latch.close());
        assert!(latch.is_closed());
    }

    #[test]
    fn enter_without_config_is_rejected() {
        let ctx = SessionContext::new();
        let result = Room::enter(
            &ctx,
            &QuestionScript::default(),
            &NoMedia,
            Box::new(Unsupported),
        );
        assert_matches!(result.err(), Some(InterviewError::MissingConfiguration));
    }

    #[test]
    fn enter_rejects_invalid_stored_config() {
        let mut ctx = ctx_with(15);
        let mut config = ctx.config().cloned().unwrap();
        config.role = "  ".into();
        ctx.set_config(config.clone());
        let result = Room::enter(&ctx, &QuestionScript::default(), &NoMedia, Box::new(Unsupported));
        assert_matches!(result.err(), Some(InterviewError::EmptyRole));

        config.role = "Engineer".into();
        config.duration_minutes = 0;
        ctx.set_config(config);
        let result = Room::enter(&ctx, &QuestionScript::default(), &NoMedia, Box::new(Unsupported));
        assert_matches!(result.err(), Some(InterviewError::InvalidDuration(0)));
    }

    #[test]
    fn enter_trims_stored_role() {
        let mut ctx = ctx_with(15);
        let mut config = ctx.config().cloned().unwrap();
        config.role = " Engineer ".into();
        ctx.set_config(config);
        assert_eq!(room(&ctx).config().role, "Engineer");
    }

    #[test]
    fn enter_starts_timer_at_full_duration() {
        let ctx = ctx_with(45);
        let room = room(&ctx);
        assert_eq!(room.remaining_secs(), 2700);
        assert_eq!(room.elapsed_secs(), 0);
        assert!(room.timer_running());
        assert_eq!(room.question_number(), 1);
        assert!(room.media().is_none());
        assert!(!room.voice_available());
    }

    #[test]
    fn blank_answers_are_ignored() {
        let mut ctx = ctx_with(15);
        let mut room = room(&ctx);
        for c in "   ".chars() {
            room.type_char(c);
        }
        assert!(!room.can_submit());
        assert_eq!(room.submit(&mut ctx), None);
        assert!(room.answers().is_empty());
        assert_eq!(room.question_number(), 1);
    }

    #[test]
    fn submit_advances_and_clears_draft() {
        let mut ctx = ctx_with(15);
        let mut room = room(&ctx);
        room.on_second(&mut ctx);
        room.on_second(&mut ctx);
        for c in "I build APIs".chars() {
            room.type_char(c);
        }
        room.backspace();
        assert_eq!(room.draft(), "I build API");

        assert_eq!(room.submit(&mut ctx), None);
        assert_eq!(room.answers(), &["I build API".to_string()]);
        assert_eq!(room.question_number(), 2);
        assert_eq!(room.draft(), "");
        assert_eq!(room.question_elapsed(), 0);
    }

    #[test]
    fn last_answer_finalizes() {
        let mut ctx = ctx_with(30);
        let mut room = room(&ctx);
        let mut routes = Vec::new();
        for i in 0..8 {
            room.on_second(&mut ctx);
            routes.push(room.submit_text(&mut ctx, &format!("answer {i}")));
        }
        assert!(routes[..7].iter().all(Option::is_none));
        assert_eq!(routes[7], Some(Route::Results));
        assert!(room.is_terminated());
        assert!(!room.timer_running());

        let result = ctx.result().unwrap();
        assert_eq!(result.answers.len(), 8);
        assert_eq!(result.answers[7], "answer 7");
        assert_eq!(result.completion_rate, 100.0);
        assert_eq!(result.total_time_secs, 8);
        assert_eq!(result.answer_times, vec![1; 8]);
        assert_eq!(result.finish_reason, FinishReason::AllAnswered);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut ctx = ctx_with(15);
        let mut room = room(&ctx);
        room.submit_text(&mut ctx, "first");

        assert_eq!(room.end(&mut ctx), Some(Route::Results));
        let first = ctx.result().cloned().unwrap();

        assert_eq!(room.finalize(&mut ctx, FinishReason::TimeExpired), None);
        assert_eq!(room.end(&mut ctx), None);
        assert_eq!(room.submit_text(&mut ctx, "late"), None);
        assert_eq!(ctx.result().unwrap(), &first);
        assert_eq!(first.finish_reason, FinishReason::EndedEarly);
    }

    #[test]
    fn expiry_and_last_answer_on_same_second() {
        let mut ctx = SessionContext::new();
        ctx.set_config(ctx_with(15).config().cloned().unwrap());
        let script = QuestionScript {
            name: "one".into(),
            questions: vec!["only".into()],
        };
        let mut room =
            Room::enter(&ctx, &script, &NoMedia, Box::new(Unsupported)).unwrap();
        for _ in 0..899 {
            assert_eq!(room.on_second(&mut ctx), None);
        }

        // last answer lands first, the expiring tick must not finalize again
        assert_eq!(room.submit_text(&mut ctx, "done"), Some(Route::Results));
        assert_eq!(room.on_second(&mut ctx), None);
        assert_eq!(ctx.result().unwrap().finish_reason, FinishReason::AllAnswered);
        assert_eq!(ctx.result().unwrap().total_time_secs, 899);
    }

    #[test]
    fn expiry_without_answers() {
        let mut ctx = ctx_with(15);
        let mut room = room(&ctx);
        let mut navigations = 0;
        for _ in 0..1000 {
            if room.on_second(&mut ctx).is_some() {
                navigations += 1;
            }
        }
        assert_eq!(navigations, 1);
        let result = ctx.result().unwrap();
        assert_eq!(result.finish_reason, FinishReason::TimeExpired);
        assert_eq!(result.total_time_secs, 900);
        assert_eq!(result.completion_rate, 12.5);
        assert!(result.answers.is_empty());
        assert_eq!(result.questions_asked.len(), 1);
    }

    #[test]
    fn skip_never_finalizes() {
        let mut ctx = ctx_with(15);
        let mut room = room(&ctx);
        let mut skipped = 0;
        for _ in 0..20 {
            if room.skip() {
                skipped += 1;
            }
        }
        assert_eq!(skipped, 7);
        assert!(!room.has_next());
        assert!(!room.is_terminated());
        assert!(ctx.result().is_none());

        room.end(&mut ctx);
        assert_eq!(ctx.result().unwrap().completion_rate, 100.0);
    }

    #[test]
    fn five_of_eight_reached() {
        let mut ctx = ctx_with(30);
        let mut room = room(&ctx);
        for i in 0..4 {
            room.submit_text(&mut ctx, &format!("answer {i}"));
        }
        room.end(&mut ctx);
        let result = ctx.result().unwrap();
        assert_eq!(result.questions_asked.len(), 5);
        assert_eq!(result.completion_rate, 62.5);
    }

    #[test]
    fn finalize_releases_media_and_stops_recording() {
        let mut ctx = ctx_with(15);
        let mut room = Room::enter(
            &ctx,
            &QuestionScript::default(),
            &FakeCamera,
            Box::new(Unsupported),
        )
        .unwrap();
        assert!(room.media().unwrap().camera_on());
        assert!(!room.toggle_camera());
        assert!(room.toggle_recording());

        room.end(&mut ctx);
        assert!(room.media().unwrap().is_released());
        assert!(!room.is_recording());
        assert!(!room.toggle_recording());
    }

    #[test]
    fn dropping_unfinished_room_releases_capabilities() {
        let released = Rc::new(Cell::new(false));
        let stopped = Rc::new(Cell::new(false));
        let mut ctx = ctx_with(15);
        let mut room = Room::enter(
            &ctx,
            &QuestionScript::default(),
            &TrackedCamera(Rc::clone(&released)),
            Box::new(TrackedSpeech {
                listening: false,
                stopped: Rc::clone(&stopped),
            }),
        )
        .unwrap();
        room.start_listening().unwrap();
        room.on_second(&mut ctx);
        assert!(!released.get());
        assert!(!stopped.get());

        drop(room);
        assert!(released.get());
        assert!(stopped.get());
        assert!(ctx.result().is_none());
    }

    #[test]
    fn toggles_without_media_stay_off() {
        let ctx = ctx_with(15);
        let mut room = room(&ctx);
        assert!(!room.toggle_camera());
        assert!(!room.toggle_mic());
    }

    #[test]
    fn voice_input_replaces_draft() {
        let mut ctx = ctx_with(15);
        let mut room = Room::enter(
            &ctx,
            &QuestionScript::default(),
            &NoMedia,
            Box::new(ScriptedRecognizer::new("hello there")),
        )
        .unwrap();
        room.type_char('x');
        room.start_listening().unwrap();
        assert!(room.is_listening());

        room.on_second(&mut ctx);
        assert_eq!(room.draft(), "hello");
        room.on_second(&mut ctx);
        assert_eq!(room.draft(), "hello there");
        assert!(!room.is_listening());

        assert_eq!(room.submit(&mut ctx), None);
        assert_eq!(room.answers(), &["hello there".to_string()]);
    }

    #[test]
    fn voice_input_unavailable_is_reported() {
        let ctx = ctx_with(15);
        let mut room = room(&ctx);
        assert_matches!(
            room.start_listening(),
            Err(CapabilityError::SpeechRecognitionUnavailable)
        );
    }
}
