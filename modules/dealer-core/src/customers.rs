//! Customer 360 directory.

use dealer_client::{CustomerProfile, DealerClient, HistoryEntry};

use crate::error::Result;

/// Name matches ignore case; phone matches are raw substrings.
pub fn search<'a>(profiles: &'a [CustomerProfile], term: &str) -> Vec<&'a CustomerProfile> {
    let lowered = term.to_lowercase();
    profiles
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&lowered) || c.phone.contains(term))
        .collect()
}

/// A profile's history, newest first.
pub fn timeline(profile: &CustomerProfile) -> Vec<&HistoryEntry> {
    let mut entries: Vec<_> = profile.history.iter().collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

pub async fn load_directory(client: &DealerClient) -> Result<Vec<CustomerProfile>> {
    let profiles = client.customer_profiles().await?;
    tracing::debug!(count = profiles.len(), "Customer directory loaded");
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_client::HistoryKind;

    fn profile(name: &str, phone: &str) -> CustomerProfile {
        CustomerProfile {
            name: name.into(),
            phone: phone.into(),
            lifetime_value: 0.0,
            history: Vec::new(),
        }
    }

    fn entry(date: &str, amount: f64) -> HistoryEntry {
        HistoryEntry {
            kind: HistoryKind::Service,
            date: date.parse().unwrap(),
            status: "COMPLETED".into(),
            description: "Oil".into(),
            amount,
        }
    }

    #[test]
    fn search_by_name_or_phone() {
        let all = vec![profile("Sam Ortiz", "555-0142"), profile("Dana Reyes", "555-0100")];
        assert_eq!(search(&all, "ORTIZ").len(), 1);
        assert_eq!(search(&all, "0100")[0].name, "Dana Reyes");
        assert_eq!(search(&all, "").len(), 2);
    }

    #[test]
    fn timeline_is_newest_first() {
        let mut p = profile("Sam", "1");
        p.history = vec![
            entry("2025-01-01T00:00:00Z", 1.0),
            entry("2026-01-01T00:00:00Z", 2.0),
            entry("2025-06-01T00:00:00Z", 3.0),
        ];
        let amounts: Vec<_> = timeline(&p).iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0, 1.0]);
    }
}
