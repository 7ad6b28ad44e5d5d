use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("careline.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("careline.client.request_errors");

pub(crate) static SESSIONS_CREATED: Counter = Counter::new("careline.sessions.created");
pub(crate) static MESSAGES_SENT: Counter = Counter::new("careline.messages.sent");
pub(crate) static DECISIONS_RECEIVED: Counter = Counter::new("careline.decisions.received");
pub(crate) static ENVELOPE_FALLBACKS: Counter = Counter::new("careline.envelope.fallbacks");

pub(crate) static HISTORY_WRITES: Counter = Counter::new("careline.history.writes");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&SESSIONS_CREATED);
    collector.register_counter(&MESSAGES_SENT);
    collector.register_counter(&DECISIONS_RECEIVED);
    collector.register_counter(&ENVELOPE_FALLBACKS);

    collector.register_counter(&HISTORY_WRITES);
}
