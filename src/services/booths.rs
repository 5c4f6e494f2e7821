use crate::{
    error::TollError,
    models::{BoothStatus, BoothSummary, FeeQuote, TollBooth, Transaction, VehicleType},
    services::wallet::WalletService,
};
use chrono::NaiveDate;

/// Fixed catalog of collection points.
#[derive(Debug, Clone)]
pub struct BoothRegistry {
    booths: Vec<TollBooth>,
}

impl Default for BoothRegistry {
    fn default() -> Self {
        let booth = |id: &str, name: &str, location: &str, status, fee| TollBooth {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            status,
            fee,
        };

        Self::new(vec![
            booth("TB001", "Highway 101 North", "Mile 45.2", BoothStatus::Active, 5.5),
            booth("TB002", "Interstate 95 South", "Mile 78.9", BoothStatus::Active, 7.25),
            booth("TB003", "Route 66 East", "Mile 12.4", BoothStatus::Maintenance, 4.75),
            booth("TB004", "Pacific Coast Highway", "Mile 156.7", BoothStatus::Active, 6.0),
            booth("TB005", "Golden Gate Bridge", "San Francisco", BoothStatus::Active, 8.5),
        ])
    }
}

impl BoothRegistry {
    pub fn new(booths: Vec<TollBooth>) -> Self {
        Self { booths }
    }

    pub fn all(&self) -> &[TollBooth] {
        &self.booths
    }

    pub fn get(&self, id: &str) -> Option<&TollBooth> {
        self.booths.iter().find(|b| b.id.eq_ignore_ascii_case(id))
    }

    pub fn fee(&self, booth_id: &str, vehicle_type: VehicleType) -> Result<f64, TollError> {
        let booth = self
            .get(booth_id)
            .ok_or_else(|| TollError::UnknownTollBooth(booth_id.to_string()))?;
        Ok(booth.fee * vehicle_type.multiplier())
    }

    pub fn quote(
        &self,
        booth_id: &str,
        vehicle_type: VehicleType,
        wallet: &WalletService,
    ) -> Result<FeeQuote, TollError> {
        let amount_usd = self.fee(booth_id, vehicle_type)?;
        let booth = self
            .get(booth_id)
            .ok_or_else(|| TollError::UnknownTollBooth(booth_id.to_string()))?;

        Ok(FeeQuote {
            booth_id: booth.id.clone(),
            vehicle_type,
            multiplier: vehicle_type.multiplier(),
            amount_usd,
            amount_eth: wallet.usd_to_eth(amount_usd),
            amount_wei: wallet.usd_to_wei_hex(amount_usd),
            collection_address: wallet.collection_address().to_string(),
        })
    }

    /// Catalog with revenue and vehicle counts for `day`.
    pub fn summaries(&self, transactions: &[Transaction], day: NaiveDate) -> Vec<BoothSummary> {
        self.all()
            .iter()
            .map(|booth| {
                let (vehicle_count, daily_revenue) = transactions
                    .iter()
                    .filter(|tx| tx.toll_booth == booth.id && tx.timestamp.date_naive() == day)
                    .fold((0u64, 0.0), |(count, revenue), tx| (count + 1, revenue + tx.amount));

                BoothSummary {
                    booth: booth.clone(),
                    daily_revenue,
                    vehicle_count,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::transaction;
    use chrono::{Duration, Utc};

    fn wallet() -> WalletService {
        WalletService::new(2000.0, "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6")
    }

    #[test]
    fn catalog_has_five_booths() {
        let registry = BoothRegistry::default();
        assert_eq!(registry.all().len(), 5);
        assert_eq!(registry.get("TB003").unwrap().status, BoothStatus::Maintenance);
        assert_eq!(registry.get("tb005").unwrap().fee, 8.5);
        assert!(registry.get("TB999").is_none());
    }

    #[test]
    fn custom_catalog_replaces_defaults() {
        let registry = BoothRegistry::new(vec![TollBooth {
            id: "BR001".to_string(),
            name: "Harbor Bridge".to_string(),
            location: "Pier 3".to_string(),
            status: BoothStatus::Active,
            fee: 3.0,
        }]);

        assert_eq!(registry.all().len(), 1);
        assert!(registry.get("TB001").is_none());
        assert_eq!(registry.fee("br001", VehicleType::Bus).unwrap(), 4.5);

        let summaries = registry.summaries(&[], Utc::now().date_naive());
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].booth.id, "BR001");
    }

    #[test]
    fn fees_apply_vehicle_multiplier() {
        let registry = BoothRegistry::default();
        assert_eq!(registry.fee("TB001", VehicleType::Car).unwrap(), 5.5);
        assert_eq!(registry.fee("TB002", VehicleType::Truck).unwrap(), 14.5);
        assert_eq!(registry.fee("TB003", VehicleType::Motorcycle).unwrap(), 2.375);
        assert_eq!(registry.fee("TB005", VehicleType::Bus).unwrap(), 12.75);
    }

    #[test]
    fn quote_includes_eth_amount() {
        let quote = BoothRegistry::default()
            .quote("TB001", VehicleType::Car, &wallet())
            .unwrap();
        assert_eq!(quote.amount_usd, 5.5);
        assert_eq!(quote.amount_eth, "0.002750");
        assert_eq!(quote.amount_wei, "0x9c51c4521e000");
        assert_eq!(quote.collection_address, wallet().collection_address());
    }

    #[test]
    fn unknown_booth_is_an_error() {
        let err = BoothRegistry::default()
            .quote("TB999", VehicleType::Car, &wallet())
            .unwrap_err();
        assert!(matches!(err, TollError::UnknownTollBooth(id) if id == "TB999"));
    }

    #[test]
    fn summaries_count_only_the_given_day() {
        let now = Utc::now();
        let txs = vec![
            transaction("tx_3", "ABC-1234", "car", "TB001", 5.5, now),
            transaction("tx_2", "TRK-0001", "truck", "TB001", 11.0, now),
            transaction("tx_1", "ABC-1234", "car", "TB001", 5.5, now - Duration::days(2)),
        ];
        let summaries = BoothRegistry::default().summaries(&txs, now.date_naive());
        let tb001 = summaries.iter().find(|s| s.booth.id == "TB001").unwrap();
        assert_eq!(tb001.vehicle_count, 2);
        assert_eq!(tb001.daily_revenue, 16.5);
        assert!(summaries
            .iter()
            .filter(|s| s.booth.id != "TB001")
            .all(|s| s.vehicle_count == 0));
    }
}
