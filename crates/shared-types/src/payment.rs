use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{matches_search, push_number, push_selected, QueryParams, UserRef, ALL};

pub const TRANSACTION_TYPES: &[&str] = &["deposit", "payment", "refund", "payout", "fee"];
pub const TRANSACTION_STATUSES: &[&str] = &["pending", "completed", "failed", "refunded", "cancelled"];

/// Payment volume and health for a reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialMetrics {
    pub total_volume: f64,
    pub daily_volume: f64,
    pub weekly_volume: f64,
    pub monthly_volume: f64,
    pub platform_fees: f64,
    pub escrow_balance: f64,
    pub active_escrow_accounts: u64,
    pub pending_payments: u64,
    pub pending_payouts: f64,
    pub failed_payments: u64,
    pub refunds_processed: f64,
    pub average_transaction_size: f64,
    pub payment_success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(rename = "type", default)]
    pub transaction_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payer: Option<UserRef>,
    #[serde(default)]
    pub payee: Option<UserRef>,
    #[serde(default)]
    pub initiated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// The processor reference when present, else the record id.
    pub fn reference(&self) -> &str {
        self.transaction_id.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    pub transaction_type: String,
    pub status: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            transaction_type: ALL.to_string(),
            status: ALL.to_string(),
            date_from: None,
            date_to: None,
            amount_min: None,
            amount_max: None,
        }
    }
}

impl TransactionQuery {
    pub fn to_query(&self) -> QueryParams {
        let mut params = self.export_query();
        push_number(&mut params, "amount_min", self.amount_min);
        push_number(&mut params, "amount_max", self.amount_max);
        params
    }

    /// Exports are filtered by type, status and date only.
    pub fn export_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_selected(&mut params, "type", &self.transaction_type);
        push_selected(&mut params, "status", &self.status);
        if let Some(d) = self.date_from {
            params.push(("date_from", d.to_string()));
        }
        if let Some(d) = self.date_to {
            params.push(("date_to", d.to_string()));
        }
        params
    }
}

pub fn search_transactions<'a>(transactions: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| {
            matches_search(
                query,
                [
                    t.transaction_id.as_deref(),
                    t.payer.as_ref().and_then(|p| p.full_name.as_deref()),
                    t.payee.as_ref().and_then(|p| p.full_name.as_deref()),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metrics_decode_camel_case_with_defaults() {
        let m: FinancialMetrics =
            serde_json::from_str(r#"{"totalVolume":125000.5,"paymentSuccessRate":98.25}"#).unwrap();
        assert_eq!(m.total_volume, 125000.5);
        assert_eq!(m.payment_success_rate, 98.25);
        assert_eq!(m.failed_payments, 0);
    }

    #[test]
    fn export_query_drops_amount_bounds() {
        let q = TransactionQuery {
            status: "failed".into(),
            amount_min: Some(10.0),
            ..TransactionQuery::default()
        };
        assert_eq!(q.export_query(), vec![("status", "failed".to_string())]);
        assert_eq!(
            q.to_query(),
            vec![("status", "failed".to_string()), ("amount_min", "10".to_string())]
        );
    }

    #[test]
    fn search_by_party_name() {
        let txs: Vec<Transaction> = serde_json::from_str(
            r#"[{"id":"1","type":"payment","transaction_id":"ch_123","payer":{"full_name":"Ivy Stone"}},
                {"id":"2","type":"payout","payee":{"full_name":"Arc Builders"}}]"#,
        )
        .unwrap();
        assert_eq!(search_transactions(&txs, "stone")[0].id, "1");
        assert_eq!(search_transactions(&txs, "CH_1")[0].reference(), "ch_123");
        assert_eq!(search_transactions(&txs, "arc")[0].reference(), "2");
    }
}
