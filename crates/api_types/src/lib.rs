use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        pub description: Option<String>,
        /// Member emails. The creator is added automatically if missing.
        pub members: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupCreated {
        pub id: String,
        pub name: String,
        pub members: Vec<MemberView>,
    }

    /// Request body for adding or reactivating a member.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberUpsert {
        pub email: String,
        /// Grants group administration rights.
        pub admin: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub email: String,
        pub admin: bool,
    }

    /// Request body for renaming or re-describing a group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupUpdate {
        pub name: String,
        pub description: Option<String>,
    }

    /// Group metadata plus the raw expense ledger.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupDetail {
        pub id: String,
        pub name: String,
        pub description: Option<String>,
        pub members: Vec<MemberView>,
        pub expenses: Vec<super::expense::ExpenseView>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareNew {
        pub owed_by: String,
        pub amount_owed: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub paid_by: String,
        pub total_amount: f64,
        pub shares: Vec<ShareNew>,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareView {
        pub owed_by: String,
        pub amount_owed: f64,
    }

    /// One recorded expense as it appears in the group ledger.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub paid_by: String,
        pub total_amount: f64,
        pub shares: Vec<ShareView>,
        pub occurred_at: DateTime<FixedOffset>,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferView {
        pub from: String,
        pub to: String,
        pub amount: f64,
    }

    /// Net balance per group member; positive = the group owes them.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub email: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub balances: Vec<BalanceView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransfersResponse {
        pub transfers: Vec<TransferView>,
    }

    /// One caller's settlement view within a group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementResponse {
        pub transfers: Vec<TransferView>,
        /// Signed net position: positive = net owed, negative = owes.
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupSummary {
        pub group_id: String,
        pub name: String,
        pub settlement_amount: f64,
    }

    /// Per-group settlement scalars for the caller, plus their sum.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub total_settlement_amount: f64,
        pub groups: Vec<GroupSummary>,
    }
}
