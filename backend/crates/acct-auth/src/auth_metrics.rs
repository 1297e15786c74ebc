use metrics::counter;

/// Counters for the session lifecycle
#[derive(Clone)]
pub struct AuthMetrics {
    prefix: &'static str,
}

impl AuthMetrics {
    pub fn new() -> Self {
        Self { prefix: "acct_auth" }
    }

    pub fn login_succeeded(&self) {
        counter!(format!("{}.logins.succeeded", self.prefix)).increment(1);
    }

    pub fn login_failed(&self, reason: &str) {
        counter!(format!("{}.logins.failed", self.prefix)).increment(1);
        counter!(format!("{}.logins.failed.{}", self.prefix, reason)).increment(1);
    }

    pub fn refresh_rotated(&self) {
        counter!(format!("{}.refresh.rotated", self.prefix)).increment(1);
    }

    /// A rejected refresh; `stale` reasons may indicate token replay
    pub fn refresh_rejected(&self, reason: &str) {
        counter!(format!("{}.refresh.rejected", self.prefix)).increment(1);
        counter!(format!("{}.refresh.rejected.{}", self.prefix, reason)).increment(1);
    }

    pub fn logout(&self) {
        counter!(format!("{}.logouts", self.prefix)).increment(1);
    }

    pub fn password_changed(&self) {
        counter!(format!("{}.password_changes", self.prefix)).increment(1);
    }

    pub fn authenticated(&self) {
        counter!(format!("{}.authentications.succeeded", self.prefix)).increment(1);
    }

    pub fn authentication_rejected(&self, reason: &str) {
        counter!(format!("{}.authentications.rejected", self.prefix)).increment(1);
        counter!(format!("{}.authentications.rejected.{}", self.prefix, reason)).increment(1);
    }
}

impl Default for AuthMetrics {
    fn default() -> Self {
        Self::new()
    }
}
