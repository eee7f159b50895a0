//! Refresh trigger gating.
//!
//! Pure decision over (schedule config, trigger metadata, current
//! instant): authorization first, then the time-of-day window in the
//! configured named zone. No side effects, so boundary minutes are unit
//! testable with injected instants.

use crate::config::ScheduleConfig;
use crate::{Error, Result};
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Metadata of an inbound refresh trigger.
#[derive(Debug, Clone, Default)]
pub struct TriggerContext {
    /// Client signature string (`User-Agent`).
    pub user_agent: String,
    /// Shared secret supplied with the request (`X-Cron-Secret`).
    pub provided_secret: Option<String>,
    /// Manual override of the time window (`force=1`).
    pub force: bool,
}

/// Outcome of gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Authorized and inside the window (or forced).
    Proceed,
    /// Authorized, but outside the target hour:minute.
    SkipNotScheduled,
    /// Neither scheduler signature nor matching secret.
    RejectUnauthorized,
}

/// Evaluate a refresh trigger.
///
/// Authorization passes if the User-Agent carries the scheduler
/// signature, or a non-empty configured secret exactly equals the
/// supplied one. The force flag bypasses the time window but never
/// authorization. An unknown time zone name is a configuration error.
pub fn evaluate(
    schedule: &ScheduleConfig,
    trigger: &TriggerContext,
    now: DateTime<Utc>,
) -> Result<GateDecision> {
    if !is_authorized(schedule, trigger) {
        return Ok(GateDecision::RejectUnauthorized);
    }

    if trigger.force || is_target_time(schedule, now)? {
        Ok(GateDecision::Proceed)
    } else {
        Ok(GateDecision::SkipNotScheduled)
    }
}

fn is_authorized(schedule: &ScheduleConfig, trigger: &TriggerContext) -> bool {
    let sig = &schedule.scheduler_user_agent;
    if !sig.is_empty() && trigger.user_agent.contains(sig.as_str()) {
        return true;
    }
    match trigger.provided_secret.as_deref() {
        Some(provided) => !schedule.secret.is_empty() && schedule.secret == provided,
        None => false,
    }
}

/// Whether `now` falls on the configured hour:minute in the scheduling
/// zone.
pub fn is_target_time(schedule: &ScheduleConfig, now: DateTime<Utc>) -> Result<bool> {
    let tz: Tz = schedule
        .timezone
        .parse()
        .map_err(|_| Error::Misconfigured(format!("unknown time zone: {}", schedule.timezone)))?;
    let local = now.with_timezone(&tz);
    Ok(local.hour() == schedule.hour && local.minute() == schedule.minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn schedule() -> ScheduleConfig {
        ScheduleConfig {
            secret: "topsecret".to_string(),
            ..ScheduleConfig::default()
        }
    }

    fn scheduler_trigger() -> TriggerContext {
        TriggerContext {
            user_agent: "vercel-cron/1.0".to_string(),
            ..TriggerContext::default()
        }
    }

    /// 2025-01-15 00:05 Berlin == 2025-01-14 23:05 UTC (winter, +01:00).
    fn berlin_midnight_five() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 14, 23, 5, 0).unwrap()
    }

    #[test]
    fn test_scheduler_signature_on_target_minute_proceeds() {
        let decision = evaluate(&schedule(), &scheduler_trigger(), berlin_midnight_five()).unwrap();
        assert_eq!(decision, GateDecision::Proceed);
    }

    #[test]
    fn test_unauthorized_rejected_regardless_of_time() {
        let trigger = TriggerContext {
            user_agent: "curl/8.0".to_string(),
            provided_secret: Some("wrong".to_string()),
            force: true,
        };
        let decision = evaluate(&schedule(), &trigger, berlin_midnight_five()).unwrap();
        assert_eq!(decision, GateDecision::RejectUnauthorized);
    }

    #[test]
    fn test_matching_secret_authorizes() {
        let trigger = TriggerContext {
            user_agent: "curl/8.0".to_string(),
            provided_secret: Some("topsecret".to_string()),
            force: false,
        };
        let decision = evaluate(&schedule(), &trigger, berlin_midnight_five()).unwrap();
        assert_eq!(decision, GateDecision::Proceed);
    }

    #[test]
    fn test_empty_configured_secret_never_matches() {
        let cfg = ScheduleConfig {
            secret: String::new(),
            scheduler_user_agent: "vercel-cron/1.0".to_string(),
            ..ScheduleConfig::default()
        };
        let trigger = TriggerContext {
            user_agent: "curl/8.0".to_string(),
            provided_secret: Some(String::new()),
            force: false,
        };
        let decision = evaluate(&cfg, &trigger, berlin_midnight_five()).unwrap();
        assert_eq!(decision, GateDecision::RejectUnauthorized);
    }

    #[test]
    fn test_boundary_minutes() {
        let cfg = schedule();
        let trigger = scheduler_trigger();
        for (minute, expected) in [
            (4, GateDecision::SkipNotScheduled),
            (5, GateDecision::Proceed),
            (6, GateDecision::SkipNotScheduled),
        ] {
            let now = Utc.with_ymd_and_hms(2025, 1, 14, 23, minute, 0).unwrap();
            assert_eq!(evaluate(&cfg, &trigger, now).unwrap(), expected, "minute {minute}");
        }
    }

    #[test]
    fn test_force_bypasses_window_only() {
        let trigger = TriggerContext {
            force: true,
            ..scheduler_trigger()
        };
        let off_window = Utc.with_ymd_and_hms(2025, 1, 14, 12, 30, 0).unwrap();
        assert_eq!(
            evaluate(&schedule(), &trigger, off_window).unwrap(),
            GateDecision::Proceed
        );
    }

    #[test]
    fn test_window_follows_summer_offset() {
        // 2025-07-01 00:05 Berlin == 2025-06-30 22:05 UTC (+02:00).
        let cfg = schedule();
        let now = Utc.with_ymd_and_hms(2025, 6, 30, 22, 5, 0).unwrap();
        assert_eq!(
            evaluate(&cfg, &scheduler_trigger(), now).unwrap(),
            GateDecision::Proceed
        );
    }

    #[test]
    fn test_unknown_zone_is_misconfigured() {
        let cfg = ScheduleConfig {
            timezone: "Mars/Olympus".to_string(),
            ..schedule()
        };
        let err = evaluate(&cfg, &scheduler_trigger(), berlin_midnight_five())
            .expect_err("bad zone must fail");
        assert!(matches!(err, Error::Misconfigured(_)));
    }
}
