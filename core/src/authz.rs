//! Clan authorization gate.
//!
//! Nothing is detected or delivered for sessions outside the configured clan.
//! Membership data loads a few seconds after the login callback, so the gate
//! is a tick-polled state machine rather than a one-shot check: it probes on
//! a doubling backoff and only gives up after the attempt budget, landing in
//! a terminal `Denied` that a new login re-arms.

use chrono::{DateTime, TimeDelta, Utc};
use reval_types::ClanPolicy;

use crate::client::GameView;

/// Probe attempts before the gate gives up on a session.
const MAX_ATTEMPTS: u32 = 10;
/// First retry delay; doubles per attempt.
const BASE_DELAY_SECS: i64 = 1;
/// Backoff ceiling.
const MAX_DELAY_SECS: i64 = 60;

/// One synchronous authorization check against currently-known host state.
pub fn is_authorized(view: &dyn GameView, policy: &ClanPolicy) -> bool {
    if !view.logged_in() {
        return false;
    }
    let Some(clan) = view.clan() else {
        return false;
    };
    clan.clan_name.eq_ignore_ascii_case(&policy.clan_name) && clan.rank >= policy.min_rank
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No session to authorize.
    Idle,
    /// Between probes; `attempt` probes have failed so far.
    Probing { attempt: u32 },
    Granted,
    /// Attempt budget exhausted. Terminal until the next `arm`.
    Denied,
}

/// Tick-polled authorization state machine.
///
/// Time is always passed in by the caller so tests can drive the backoff
/// schedule synthetically.
#[derive(Debug)]
pub struct AuthzGate {
    policy: ClanPolicy,
    state: GateState,
    next_probe: Option<DateTime<Utc>>,
}

impl AuthzGate {
    pub fn new(policy: ClanPolicy) -> Self {
        Self { policy, state: GateState::Idle, next_probe: None }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn granted(&self) -> bool {
        self.state == GateState::Granted
    }

    /// Start probing a fresh session. Called on every login.
    pub fn arm(&mut self, now: DateTime<Utc>) {
        self.state = GateState::Probing { attempt: 0 };
        self.next_probe = Some(now);
    }

    /// Drop back to idle. Called on logout.
    pub fn disarm(&mut self) {
        self.state = GateState::Idle;
        self.next_probe = None;
    }

    /// Run one poll step. Returns the state after the step; cheap to call
    /// every tick since off-schedule polls return immediately.
    pub fn poll(&mut self, view: &dyn GameView, now: DateTime<Utc>) -> GateState {
        let GateState::Probing { attempt } = self.state else {
            return self.state;
        };
        if self.next_probe.is_some_and(|due| now < due) {
            return self.state;
        }

        if is_authorized(view, &self.policy) {
            tracing::info!(clan = %self.policy.clan_name, "clan authorization granted");
            self.state = GateState::Granted;
            self.next_probe = None;
        } else if attempt + 1 >= MAX_ATTEMPTS {
            tracing::warn!(
                clan = %self.policy.clan_name,
                attempts = MAX_ATTEMPTS,
                "clan authorization denied; giving up until next login"
            );
            self.state = GateState::Denied;
            self.next_probe = None;
        } else {
            let delay = (BASE_DELAY_SECS << attempt).min(MAX_DELAY_SECS);
            self.state = GateState::Probing { attempt: attempt + 1 };
            self.next_probe = Some(now + TimeDelta::seconds(delay));
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StubView;

    fn policy() -> ClanPolicy {
        ClanPolicy { clan_name: "Reval".to_string(), min_rank: 2 }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_is_authorized_requires_clan_and_rank() {
        let mut view = StubView::logged_in();
        assert!(!is_authorized(&view, &policy()), "clan still loading");

        view = view.with_clan("Reval", 1);
        assert!(!is_authorized(&view, &policy()), "rank below minimum");

        view = view.with_clan("reval", 2);
        assert!(is_authorized(&view, &policy()), "clan name compares case-insensitively");

        view.logged_in = false;
        assert!(!is_authorized(&view, &policy()));
    }

    #[test]
    fn test_gate_grants_once_clan_loads() {
        let mut gate = AuthzGate::new(policy());
        let mut view = StubView::logged_in();
        gate.arm(t0());

        // Clan not loaded yet: first probe fails, schedules a retry.
        assert_eq!(gate.poll(&view, t0()), GateState::Probing { attempt: 1 });
        // Polling again before the retry is due changes nothing.
        assert_eq!(gate.poll(&view, t0()), GateState::Probing { attempt: 1 });

        view = view.with_clan("Reval", 3);
        // Still ahead of schedule.
        assert_eq!(
            gate.poll(&view, t0() + TimeDelta::milliseconds(500)),
            GateState::Probing { attempt: 1 }
        );
        assert_eq!(gate.poll(&view, t0() + TimeDelta::seconds(1)), GateState::Granted);
        assert!(gate.granted());
    }

    #[test]
    fn test_gate_exhausts_budget_into_denied() {
        let mut gate = AuthzGate::new(policy());
        let view = StubView::logged_in(); // clan never loads
        let mut now = t0();
        gate.arm(now);

        for _ in 0..MAX_ATTEMPTS {
            gate.poll(&view, now);
            // Jump far past whatever delay was scheduled.
            now += TimeDelta::seconds(MAX_DELAY_SECS + 1);
        }
        assert_eq!(gate.state(), GateState::Denied);

        // Terminal: even an authorized view cannot flip it without re-arming.
        let ok_view = StubView::logged_in().with_clan("Reval", 5);
        assert_eq!(gate.poll(&ok_view, now), GateState::Denied);

        gate.arm(now);
        assert_eq!(gate.poll(&ok_view, now), GateState::Granted);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let mut gate = AuthzGate::new(policy());
        let view = StubView::logged_in();
        gate.arm(t0());

        // Attempt 1 at t0 schedules the next probe 1s out.
        gate.poll(&view, t0());
        assert_eq!(gate.poll(&view, t0() + TimeDelta::milliseconds(999)), GateState::Probing { attempt: 1 });
        // Attempt 2 at +1s schedules 2s out.
        assert_eq!(gate.poll(&view, t0() + TimeDelta::seconds(1)), GateState::Probing { attempt: 2 });
        let due = t0() + TimeDelta::seconds(1);
        assert_eq!(gate.poll(&view, due + TimeDelta::seconds(1)), GateState::Probing { attempt: 2 });
        assert_eq!(gate.poll(&view, due + TimeDelta::seconds(2)), GateState::Probing { attempt: 3 });
    }

    #[test]
    fn test_disarm_goes_idle() {
        let mut gate = AuthzGate::new(policy());
        gate.arm(t0());
        gate.disarm();
        assert_eq!(gate.state(), GateState::Idle);
        let view = StubView::logged_in().with_clan("Reval", 5);
        assert_eq!(gate.poll(&view, t0()), GateState::Idle, "idle gate never probes");
    }
}
