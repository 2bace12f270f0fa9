//! Hourly rate-limit gate — per-user and installation-wide counters.
//!
//! Checked before a request is built. Over-limit produces a structured
//! [`RateLimitDenial`], never an error the caller has to catch; retrying is
//! the caller's decision. Counters use a sliding one-hour window of request
//! timestamps behind a `parking_lot` mutex.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use claudegate_core::config::ProviderSettings;

/// The counting window.
const WINDOW: Duration = Duration::from_secs(3600);

/// Which limit denied the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDenial {
    /// The requesting user is over their hourly limit.
    User,
    /// The installation as a whole is over its hourly limit.
    Global,
}

/// Rate-limit thresholds, taken from the provider settings.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub enable_user_limit: bool,
    pub user_limit: u32,
    pub enable_global_limit: bool,
    pub global_limit: u32,
}

impl From<&ProviderSettings> for RateLimitConfig {
    fn from(settings: &ProviderSettings) -> Self {
        RateLimitConfig {
            enable_user_limit: settings.enable_user_rate_limit,
            user_limit: settings.user_rate_limit,
            enable_global_limit: settings.enable_global_rate_limit,
            global_limit: settings.global_rate_limit,
        }
    }
}

/// Sliding-window request counters.
#[derive(Debug, Default)]
struct Counters {
    global: Vec<Instant>,
    per_user: HashMap<String, Vec<Instant>>,
}

impl Counters {
    /// Drop entries older than the window.
    fn prune(&mut self, now: Instant) {
        let cutoff = now.checked_sub(WINDOW);
        let Some(cutoff) = cutoff else {
            return; // process younger than the window, nothing to prune
        };
        self.global.retain(|&t| t > cutoff);
        self.per_user.retain(|_, times| {
            times.retain(|&t| t > cutoff);
            !times.is_empty()
        });
    }
}

/// Hourly rate limiter shared by all requests through one provider.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    counters: Mutex<Counters>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        RateLimiter {
            config,
            counters: Mutex::new(Counters::default()),
        }
    }

    /// Check both limits for `user_id` and, if admitted, record the request.
    ///
    /// Denied requests are not recorded, so a denial never consumes quota.
    pub fn check_and_record(&self, user_id: &str) -> Result<(), RateLimitDenial> {
        self.check_and_record_at(user_id, Instant::now())
    }

    fn check_and_record_at(&self, user_id: &str, now: Instant) -> Result<(), RateLimitDenial> {
        let mut counters = self.counters.lock();
        counters.prune(now);

        if self.config.enable_user_limit {
            let used = counters
                .per_user
                .get(user_id)
                .map_or(0, |times| times.len()) as u32;
            if used >= self.config.user_limit {
                return Err(RateLimitDenial::User);
            }
        }

        if self.config.enable_global_limit {
            if counters.global.len() as u32 >= self.config.global_limit {
                return Err(RateLimitDenial::Global);
            }
        }

        counters.global.push(now);
        counters
            .per_user
            .entry(user_id.to_string())
            .or_default()
            .push(now);
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
