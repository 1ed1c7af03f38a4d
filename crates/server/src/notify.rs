//! Fire-and-forget member notifications.

use engine::ParticipantId;

/// Outbound notification sink. Delivery is best-effort; failures are the
/// sink's problem, never the caller's.
pub trait NotificationSink: Send + Sync {
    fn group_created(&self, member: &ParticipantId, group_name: &str, created_by: &ParticipantId);

    fn member_added(&self, member: &ParticipantId, group_name: &str, added_by: &ParticipantId);

    fn expense_added(&self, debtor: &ParticipantId, amount_owed: f64, group_name: &str);
}

/// Default sink: structured log lines only.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn group_created(&self, member: &ParticipantId, group_name: &str, created_by: &ParticipantId) {
        tracing::info!(%member, group_name, %created_by, "notify: group created");
    }

    fn member_added(&self, member: &ParticipantId, group_name: &str, added_by: &ParticipantId) {
        tracing::info!(%member, group_name, %added_by, "notify: member added");
    }

    fn expense_added(&self, debtor: &ParticipantId, amount_owed: f64, group_name: &str) {
        tracing::info!(%debtor, amount_owed, group_name, "notify: expense added");
    }
}
