use crate::models::Transaction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional predicates over the transaction list. Every supplied predicate
/// must hold; an absent one imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    /// Quick search: vehicle number or toll booth id.
    pub q: Option<String>,
    pub vehicle_number: Option<String>,
    pub owner_name: Option<String>,
    pub vehicle_type: Option<String>,
    pub toll_booth: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Blank text and the `all` sentinel from select boxes mean "no constraint".
fn text_constraint(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn select_constraint(value: &Option<String>) -> Option<&str> {
    text_constraint(value).filter(|v| !v.eq_ignore_ascii_case("all"))
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(q) = text_constraint(&self.q) {
            if !(contains_ignore_case(&tx.vehicle_number, q) || contains_ignore_case(&tx.toll_booth, q)) {
                return false;
            }
        }
        if let Some(number) = text_constraint(&self.vehicle_number) {
            if !contains_ignore_case(&tx.vehicle_number, number) {
                return false;
            }
        }
        if let Some(owner) = text_constraint(&self.owner_name) {
            if !contains_ignore_case(&tx.owner_name, owner) {
                return false;
            }
        }
        if let Some(vehicle_type) = select_constraint(&self.vehicle_type) {
            if tx.vehicle_type != vehicle_type {
                return false;
            }
        }
        if let Some(booth) = select_constraint(&self.toll_booth) {
            if tx.toll_booth != booth {
                return false;
            }
        }

        let date = tx.timestamp.date_naive();
        if self.date_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| date > to) {
            return false;
        }
        if self.amount_min.is_some_and(|min| tx.amount < min) {
            return false;
        }
        if self.amount_max.is_some_and(|max| tx.amount > max) {
            return false;
        }

        true
    }

    /// Matching transactions, preserving input order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect()
    }

    /// Labels of the predicates that constrain the result.
    pub fn active_filters(&self) -> Vec<String> {
        let mut active = Vec::new();
        if text_constraint(&self.vehicle_number).is_some() {
            active.push("Vehicle Number");
        }
        if text_constraint(&self.owner_name).is_some() {
            active.push("Owner Name");
        }
        if select_constraint(&self.vehicle_type).is_some() {
            active.push("Vehicle Type");
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            active.push("Date Range");
        }
        if select_constraint(&self.toll_booth).is_some() {
            active.push("Toll Booth");
        }
        if self.amount_min.is_some() || self.amount_max.is_some() {
            active.push("Amount Range");
        }
        if text_constraint(&self.q).is_some() {
            active.push("Search");
        }
        active.into_iter().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::transaction;
    use chrono::{TimeZone, Utc};

    fn fixtures() -> Vec<Transaction> {
        let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 3, d, h, 30, 0).unwrap();
        let owned_by = |mut tx: Transaction, owner: &str| {
            tx.owner_name = owner.to_string();
            tx
        };
        vec![
            owned_by(transaction("tx_5", "ABC-1234", "car", "TB001", 5.5, day(5, 23)), "Jane Doe"),
            owned_by(transaction("tx_4", "TRK-0001", "truck", "TB002", 14.5, day(4, 8)), "Bob Hauler"),
            owned_by(transaction("tx_3", "MOTO-77", "motorcycle", "TB003", 2.375, day(3, 12)), "Ann Rider"),
            owned_by(transaction("tx_2", "BUS-42", "bus", "TB005", 12.75, day(2, 0)), "City Transit"),
            owned_by(transaction("tx_1", "abc-9999", "car", "TB004", 6.0, day(1, 6)), "John Doe"),
        ]
    }

    fn ids(txs: &[Transaction]) -> Vec<&str> {
        txs.iter().map(|tx| tx.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let txs = fixtures();
        let filter = TransactionFilter::default();
        assert_eq!(filter.apply(&txs).len(), txs.len());
        assert!(filter.active_filters().is_empty());
    }

    #[test]
    fn substring_matches_ignore_case() {
        let txs = fixtures();
        let filter = TransactionFilter {
            vehicle_number: Some("abc".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&txs)), vec!["tx_5", "tx_1"]);

        let filter = TransactionFilter {
            owner_name: Some("DOE".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&txs)), vec!["tx_5", "tx_1"]);
    }

    #[test]
    fn quick_search_covers_vehicle_and_booth() {
        let txs = fixtures();
        let filter = TransactionFilter {
            q: Some("tb00".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&txs).len(), 5);

        let filter = TransactionFilter {
            q: Some("moto".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&txs)), vec!["tx_3"]);
    }

    #[test]
    fn select_filters_are_exact_and_all_is_ignored() {
        let txs = fixtures();
        let filter = TransactionFilter {
            vehicle_type: Some("car".into()),
            toll_booth: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&txs)), vec!["tx_5", "tx_1"]);
        assert_eq!(filter.active_filters(), vec!["Vehicle Type"]);

        let filter = TransactionFilter {
            toll_booth: Some("TB00".into()),
            ..Default::default()
        };
        assert!(filter.apply(&txs).is_empty());
    }

    #[test]
    fn date_range_is_inclusive_of_whole_days() {
        let txs = fixtures();
        let filter = TransactionFilter {
            date_from: NaiveDate::from_ymd_opt(2024, 3, 2),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 5),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&txs)), vec!["tx_5", "tx_4", "tx_3", "tx_2"]);
    }

    #[test]
    fn amount_range_is_inclusive() {
        let txs = fixtures();
        let filter = TransactionFilter {
            amount_min: Some(5.5),
            amount_max: Some(12.75),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&txs)), vec!["tx_5", "tx_2", "tx_1"]);
        assert_eq!(filter.active_filters(), vec!["Amount Range"]);
    }

    #[test]
    fn predicates_compose_in_any_order() {
        let txs = fixtures();
        let by_type = TransactionFilter {
            vehicle_type: Some("car".into()),
            ..Default::default()
        };
        let by_amount = TransactionFilter {
            amount_min: Some(6.0),
            ..Default::default()
        };
        let combined = TransactionFilter {
            vehicle_type: Some("car".into()),
            amount_min: Some(6.0),
            ..Default::default()
        };

        let type_then_amount = by_amount.apply(&by_type.apply(&txs));
        let amount_then_type = by_type.apply(&by_amount.apply(&txs));
        assert_eq!(type_then_amount, amount_then_type);
        assert_eq!(type_then_amount, combined.apply(&txs));
        assert_eq!(ids(&type_then_amount), vec!["tx_1"]);
    }

    #[test]
    fn deserializes_from_query_string_shape() {
        let filter: TransactionFilter = serde_json::from_value(serde_json::json!({
            "vehicleType": "truck",
            "dateFrom": "2024-03-01",
            "amountMax": 20.0,
        }))
        .unwrap();
        assert_eq!(filter.vehicle_type.as_deref(), Some("truck"));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.amount_max, Some(20.0));
    }
}
