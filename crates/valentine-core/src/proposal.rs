//! The interaction state machine behind the card.
//!
//! Two independent tracks, [`OrangePhase`] and [`NoButtonPhase`], plus the
//! confirmation flag. Every operation is total: an event that has no meaning
//! in the current phase leaves the state untouched.
//!
//! The only cross-track coupling is at `LeaningNo`: the conversation checks
//! whether the No button was chased away before bringing it back.

use crate::phase::{AfterApology, NoButtonPhase, OrangePhase, AFTER_APOLOGY_POLICY};
use crate::scheduler::{Scheduler, SequenceTick};
use crate::sequence::{Script, SequenceRun, SequenceRunner};

/// Settings fixed for the lifetime of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalConfig {
    pub after_apology: AfterApology,
    pub script: Script,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            after_apology: AFTER_APOLOGY_POLICY,
            script: Script::think_it_over(),
        }
    }
}

/// State of one proposal card.
#[derive(Debug)]
pub struct Proposal {
    config: ProposalConfig,
    orange: OrangePhase,
    no: NoButtonPhase,
    /// Once set, never cleared.
    confirmed: bool,
    modal_open: bool,
    override_text: Option<String>,
    runner: SequenceRunner,
    active_run: Option<SequenceRun>,
}

impl Default for Proposal {
    fn default() -> Self {
        Self::new(ProposalConfig::default())
    }
}

impl Proposal {
    pub fn new(config: ProposalConfig) -> Self {
        Self {
            config,
            orange: OrangePhase::Initial,
            no: NoButtonPhase::Visible,
            confirmed: false,
            modal_open: false,
            override_text: None,
            runner: SequenceRunner::new(),
            active_run: None,
        }
    }

    pub fn config(&self) -> &ProposalConfig {
        &self.config
    }

    pub fn orange_phase(&self) -> OrangePhase {
        self.orange
    }

    pub fn no_phase(&self) -> NoButtonPhase {
        self.no
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Text from the running script, if a step has fired.
    pub fn override_text(&self) -> Option<&str> {
        self.override_text.as_deref()
    }

    pub fn is_sequence_running(&self) -> bool {
        self.active_run.is_some()
    }

    fn confirm(&mut self) {
        if !self.confirmed {
            tracing::info!("Proposal accepted");
        }
        self.confirmed = true;
        self.modal_open = true;
    }

    fn set_orange(&mut self, next: OrangePhase) {
        tracing::debug!("Orange phase {} -> {}", self.orange, next);
        self.orange = next;
    }

    fn set_no(&mut self, next: NoButtonPhase) {
        tracing::debug!("No phase {} -> {}", self.no, next);
        self.no = next;
    }

    /// Yes was clicked.
    pub fn on_yes_click(&mut self) {
        self.confirm();
    }

    /// The pointer entered the No button.
    pub fn on_no_hover(&mut self) {
        if self.no == NoButtonPhase::Visible {
            self.set_no(NoButtonPhase::Hidden);
        } else {
            tracing::trace!("No hover ignored in phase {}", self.no);
        }
    }

    /// No was clicked. Only the restored button does anything.
    pub fn on_no_click(&mut self) {
        if self.no == NoButtonPhase::Restored {
            self.set_no(NoButtonPhase::ClickedSike);
            self.confirm();
        } else {
            tracing::trace!("No click ignored in phase {}", self.no);
        }
    }

    /// The Orange button was clicked.
    pub fn on_orange_click<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        match self.orange {
            OrangePhase::Initial => self.set_orange(OrangePhase::Husband),
            OrangePhase::Husband => self.start_sequence(scheduler),
            OrangePhase::LeaningNo => {
                let next = if self.no == NoButtonPhase::Hidden {
                    OrangePhase::RestoreNo
                } else {
                    OrangePhase::Sad
                };
                self.set_orange(next);
                // A No that already turned into a yes stays that way
                if self.no != NoButtonPhase::ClickedSike {
                    self.set_no(NoButtonPhase::Restored);
                }
            }
            OrangePhase::Sad | OrangePhase::RestoreNo => {
                self.set_orange(self.config.after_apology.terminal_phase());
            }
            OrangePhase::TimerActive | OrangePhase::Hidden => {
                tracing::trace!("Orange click ignored in phase {}", self.orange);
            }
        }
    }

    fn start_sequence<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(previous) = self.active_run.take() {
            previous.cancel(scheduler);
        }
        self.override_text = None;
        self.set_orange(OrangePhase::TimerActive);
        self.active_run = Some(self.runner.start(&self.config.script, scheduler));
    }

    /// A scheduled step of the running script fired.
    pub fn on_tick(&mut self, tick: SequenceTick) {
        let current = self.active_run.as_ref().map(|r| r.id());
        if current != Some(tick.run) {
            tracing::debug!("Discarding stale tick from run {}", tick.run.0);
            return;
        }

        let Some(step) = self.config.script.step(tick.step) else {
            tracing::debug!("Discarding tick for unknown step {}", tick.step);
            return;
        };

        if self.config.script.is_last(tick.step) {
            // Every timer of the run has fired by now
            self.active_run = None;
            self.override_text = None;
            self.set_orange(OrangePhase::LeaningNo);
        } else {
            tracing::debug!("Script step {}: {}", tick.step, step.text);
            self.override_text = Some(step.text.clone());
        }
    }

    /// The heart modal's close control was used.
    pub fn on_modal_close(&mut self) {
        self.modal_open = false;
    }

    /// Cancels any in-flight script; call when the card goes away.
    pub fn dispose<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(run) = self.active_run.take() {
            run.cancel(scheduler);
        }
        self.override_text = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;
    use crate::scheduler::VirtualScheduler;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn advance(p: &mut Proposal, sched: &mut VirtualScheduler, by: Duration) {
        for tick in sched.advance(by) {
            p.on_tick(tick);
        }
    }

    /// Drives a fresh card to the given orange phase with the No button visible.
    fn at_phase(target: OrangePhase, sched: &mut VirtualScheduler) -> Proposal {
        let mut p = Proposal::default();
        while p.orange_phase() != target {
            if p.orange_phase() == OrangePhase::TimerActive {
                advance(&mut p, sched, ms(5000));
            } else {
                p.on_orange_click(sched);
            }
        }
        p
    }

    #[test]
    fn test_initial_state() {
        let p = Proposal::default();
        assert_eq!(p.orange_phase(), OrangePhase::Initial);
        assert_eq!(p.no_phase(), NoButtonPhase::Visible);
        assert!(!p.is_confirmed());
        assert!(!p.is_modal_open());
        assert_eq!(p.override_text(), None);
        assert!(!p.is_sequence_running());
    }

    /// One card per reachable (orange, no) combination.
    fn reachable_states() -> Vec<(Proposal, VirtualScheduler)> {
        let mut states = Vec::new();

        for target in [
            OrangePhase::Initial,
            OrangePhase::Husband,
            OrangePhase::TimerActive,
            OrangePhase::LeaningNo,
        ] {
            for hide_no in [false, true] {
                let mut sched = VirtualScheduler::new();
                let mut p = at_phase(target, &mut sched);
                if hide_no {
                    p.on_no_hover();
                }
                states.push((p, sched));
            }
        }

        // Past LeaningNo: Sad or RestoreNo, optionally acknowledged, with the
        // No button restored or already clicked
        for hide_no in [false, true] {
            for acknowledge in [false, true] {
                for sike in [false, true] {
                    let mut sched = VirtualScheduler::new();
                    let mut p = at_phase(OrangePhase::LeaningNo, &mut sched);
                    if hide_no {
                        p.on_no_hover();
                    }
                    p.on_orange_click(&mut sched);
                    if acknowledge {
                        p.on_orange_click(&mut sched);
                    }
                    if sike {
                        p.on_no_click();
                        p.on_modal_close();
                    }
                    states.push((p, sched));
                }
            }
        }

        states
    }

    #[test]
    fn test_yes_click_confirms_without_touching_phases() {
        let mut oranges = HashSet::new();
        let mut nos = HashSet::new();

        for (mut p, sched) in reachable_states() {
            let orange = p.orange_phase();
            let no = p.no_phase();
            let pending = sched.pending();
            let running = p.is_sequence_running();
            oranges.insert(orange);
            nos.insert(no);

            p.on_yes_click();
            p.on_yes_click();

            assert!(p.is_confirmed(), "not confirmed at {orange}/{no}");
            assert!(p.is_modal_open());
            assert_eq!(p.orange_phase(), orange);
            assert_eq!(p.no_phase(), no);
            assert_eq!(sched.pending(), pending);
            assert_eq!(p.is_sequence_running(), running);
        }

        // Every phase of both tracks was exercised
        assert_eq!(oranges.len(), 7);
        assert_eq!(nos.len(), 4);
    }

    #[test]
    fn test_replayed_conversation_keeps_sike() {
        let mut sched = VirtualScheduler::new();
        let mut p = Proposal::new(ProposalConfig {
            after_apology: AfterApology::ResetToInitial,
            ..ProposalConfig::default()
        });

        p.on_orange_click(&mut sched);
        p.on_orange_click(&mut sched);
        advance(&mut p, &mut sched, ms(4500));
        p.on_orange_click(&mut sched);
        p.on_no_click();
        assert_eq!(p.no_phase(), NoButtonPhase::ClickedSike);

        // Apologise, start over and lean towards no again
        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::Initial);
        p.on_orange_click(&mut sched);
        p.on_orange_click(&mut sched);
        advance(&mut p, &mut sched, ms(4500));
        p.on_orange_click(&mut sched);

        assert_eq!(p.orange_phase(), OrangePhase::Sad);
        assert_eq!(p.no_phase(), NoButtonPhase::ClickedSike);
        assert!(p.is_confirmed());
    }

    #[test]
    fn test_no_hover() {
        let mut p = Proposal::default();
        p.on_no_hover();
        assert_eq!(p.no_phase(), NoButtonPhase::Hidden);
        p.on_no_hover();
        assert_eq!(p.no_phase(), NoButtonPhase::Hidden);
    }

    #[test]
    fn test_no_hover_does_not_hide_restored() {
        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::LeaningNo, &mut sched);
        p.on_orange_click(&mut sched);
        assert_eq!(p.no_phase(), NoButtonPhase::Restored);

        p.on_no_hover();
        assert_eq!(p.no_phase(), NoButtonPhase::Restored);

        p.on_no_click();
        p.on_no_hover();
        assert_eq!(p.no_phase(), NoButtonPhase::ClickedSike);
    }

    #[test]
    fn test_no_click_only_counts_when_restored() {
        let mut p = Proposal::default();
        p.on_no_click();
        assert_eq!(p.no_phase(), NoButtonPhase::Visible);
        assert!(!p.is_confirmed());

        p.on_no_hover();
        p.on_no_click();
        assert_eq!(p.no_phase(), NoButtonPhase::Hidden);
        assert!(!p.is_confirmed());

        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::LeaningNo, &mut sched);
        p.on_orange_click(&mut sched);
        p.on_no_click();
        assert_eq!(p.no_phase(), NoButtonPhase::ClickedSike);
        assert!(p.is_confirmed());
        assert!(p.is_modal_open());

        p.on_modal_close();
        p.on_no_click();
        assert_eq!(p.no_phase(), NoButtonPhase::ClickedSike);
        assert!(!p.is_modal_open());
    }

    #[test]
    fn test_orange_initial_to_husband() {
        let mut sched = VirtualScheduler::new();
        let mut p = Proposal::default();
        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::Husband);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_husband_click_starts_sequence() {
        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::Husband, &mut sched);

        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::TimerActive);
        assert!(p.is_sequence_running());
        assert_eq!(sched.pending(), 5);
        assert_eq!(p.override_text(), None);

        advance(&mut p, &mut sched, Duration::ZERO);
        assert_eq!(p.override_text(), Some("Okay, here you go..."));

        advance(&mut p, &mut sched, ms(1500));
        assert_eq!(p.override_text(), Some("3..."));

        advance(&mut p, &mut sched, ms(1000));
        assert_eq!(p.override_text(), Some("2..."));

        advance(&mut p, &mut sched, ms(999));
        assert_eq!(p.override_text(), Some("2..."));
        advance(&mut p, &mut sched, ms(1));
        assert_eq!(p.override_text(), Some("1..."));
        assert_eq!(p.orange_phase(), OrangePhase::TimerActive);

        advance(&mut p, &mut sched, ms(1000));
        assert_eq!(p.orange_phase(), OrangePhase::LeaningNo);
        assert_eq!(p.override_text(), None);
        assert!(!p.is_sequence_running());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_orange_ignored_while_timer_active() {
        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::TimerActive, &mut sched);

        p.on_orange_click(&mut sched);
        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::TimerActive);
        assert_eq!(sched.pending(), 5);
    }

    #[test]
    fn test_leaning_no_with_visible_no_goes_sad() {
        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::LeaningNo, &mut sched);
        assert_eq!(p.no_phase(), NoButtonPhase::Visible);

        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::Sad);
        assert_eq!(p.no_phase(), NoButtonPhase::Restored);
    }

    #[test]
    fn test_leaning_no_with_hidden_no_restores_it() {
        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::LeaningNo, &mut sched);
        p.on_no_hover();

        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::RestoreNo);
        assert_eq!(p.no_phase(), NoButtonPhase::Restored);
    }

    #[test]
    fn test_apology_hides_orange() {
        let mut sched = VirtualScheduler::new();
        for phase in [OrangePhase::Sad, OrangePhase::RestoreNo] {
            let mut p = at_phase(OrangePhase::LeaningNo, &mut sched);
            if phase == OrangePhase::RestoreNo {
                p.on_no_hover();
            }
            p.on_orange_click(&mut sched);
            assert_eq!(p.orange_phase(), phase);

            p.on_orange_click(&mut sched);
            assert_eq!(p.orange_phase(), OrangePhase::Hidden);
            assert_eq!(p.no_phase(), NoButtonPhase::Restored);

            p.on_orange_click(&mut sched);
            assert_eq!(p.orange_phase(), OrangePhase::Hidden);
            assert_eq!(sched.pending(), 0);
        }
    }

    #[test]
    fn test_apology_resets_under_reset_policy() {
        let mut sched = VirtualScheduler::new();
        let mut p = Proposal::new(ProposalConfig {
            after_apology: AfterApology::ResetToInitial,
            ..ProposalConfig::default()
        });

        p.on_orange_click(&mut sched);
        p.on_orange_click(&mut sched);
        advance(&mut p, &mut sched, ms(4500));
        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::Sad);

        p.on_orange_click(&mut sched);
        assert_eq!(p.orange_phase(), OrangePhase::Initial);
        assert_eq!(p.no_phase(), NoButtonPhase::Restored);
    }

    #[test]
    fn test_dispose_cancels_run() {
        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::Husband, &mut sched);
        p.on_orange_click(&mut sched);
        advance(&mut p, &mut sched, ms(1500));
        assert_eq!(p.override_text(), Some("3..."));

        p.dispose(&mut sched);
        assert_eq!(sched.pending(), 0);
        assert!(!p.is_sequence_running());

        advance(&mut p, &mut sched, ms(10_000));
        assert_eq!(p.orange_phase(), OrangePhase::TimerActive);
        assert_eq!(p.override_text(), None);
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut sched = VirtualScheduler::new();
        let mut p = at_phase(OrangePhase::Husband, &mut sched);
        p.on_orange_click(&mut sched);

        // Capture a tick, then tear the run down before delivering it
        let ticks = sched.advance(ms(4500));
        p.dispose(&mut sched);
        for tick in ticks {
            p.on_tick(tick);
        }

        assert_eq!(p.orange_phase(), OrangePhase::TimerActive);
        assert_eq!(p.override_text(), None);
    }

    #[test]
    fn test_modal_close_keeps_confirmation() {
        let mut p = Proposal::default();
        p.on_yes_click();
        p.on_modal_close();
        assert!(p.is_confirmed());
        assert!(!p.is_modal_open());

        p.on_yes_click();
        assert!(p.is_modal_open());
    }
}
