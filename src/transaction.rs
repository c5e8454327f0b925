//! Transaction records shown on the fraud dashboard

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u32);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Transfer,
    Withdrawal,
    Deposit,
    Payment,
    #[serde(other)]
    Other,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Transfer => "transfer",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Deposit => "deposit",
            TransactionKind::Payment => "payment",
            TransactionKind::Other => "other",
        }
    }
}

/// Stored risk level. Anything outside low/medium/high deserializes to
/// `Unknown` and is rendered with the neutral badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    /// Badge classes, total over every level
    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskLevel::High => "bg-red-100 text-red-800",
            RiskLevel::Medium => "bg-yellow-100 text-yellow-800",
            RiskLevel::Low => "bg-green-100 text-green-800",
            RiskLevel::Unknown => "bg-gray-100 text-gray-800",
        }
    }

    pub fn badge_label(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub location: String,
    /// ISO 8601 date-time, kept as written
    pub timestamp: String,
    pub risk: RiskLevel,
    pub flags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_class_per_level() {
        assert_eq!(RiskLevel::High.badge_class(), "bg-red-100 text-red-800");
        assert_eq!(RiskLevel::Medium.badge_class(), "bg-yellow-100 text-yellow-800");
        assert_eq!(RiskLevel::Low.badge_class(), "bg-green-100 text-green-800");
        assert_eq!(RiskLevel::Unknown.badge_class(), "bg-gray-100 text-gray-800");
    }

    #[test]
    fn test_unrecognized_risk_falls_back() {
        let risk: RiskLevel = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(risk, RiskLevel::Unknown);
        assert_eq!(risk.badge_label(), "UNKNOWN");
    }

    #[test]
    fn test_transaction_from_json() {
        let raw = r#"{
            "id": 7,
            "amount": 1200.5,
            "type": "withdrawal",
            "location": "Kathmandu, Nepal",
            "timestamp": "2024-03-16T08:00:00",
            "risk": "low",
            "flags": ["Odd hour"]
        }"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.id, TransactionId(7));
        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.risk, RiskLevel::Low);
        assert_eq!(tx.flags, vec!["Odd hour".to_string()]);
    }

    #[test]
    fn test_unrecognized_kind_is_other() {
        let kind: TransactionKind = serde_json::from_str("\"crypto\"").unwrap();
        assert_eq!(kind, TransactionKind::Other);
        assert_eq!(kind.label(), "other");
    }
}
