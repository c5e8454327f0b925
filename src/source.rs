use async_trait::async_trait;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::transaction::{RiskLevel, Transaction, TransactionId, TransactionKind};

/// Supplies the transactions the dashboard displays.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn transactions(&self) -> Result<Vec<Transaction>, SourceError>;

    /// Short name used in logs and the startup banner
    fn describe(&self) -> String;
}

lazy_static! {
    static ref BUILTIN_TRANSACTIONS: Vec<Transaction> = vec![
        Transaction {
            id: TransactionId(1),
            amount: 25000.0,
            kind: TransactionKind::Transfer,
            location: "Mumbai, India".to_string(),
            timestamp: "2024-03-15T10:30:00".to_string(),
            risk: RiskLevel::High,
            flags: vec!["Unusual location".to_string(), "Large amount".to_string()],
        },
        Transaction {
            id: TransactionId(2),
            amount: 15000.0,
            kind: TransactionKind::Withdrawal,
            location: "Delhi, India".to_string(),
            timestamp: "2024-03-15T11:45:00".to_string(),
            risk: RiskLevel::Medium,
            flags: vec!["Multiple attempts".to_string()],
        },
        Transaction {
            id: TransactionId(3),
            amount: 50000.0,
            kind: TransactionKind::Transfer,
            location: "Pokhara, Nepal".to_string(),
            timestamp: "2024-03-15T12:15:00".to_string(),
            risk: RiskLevel::High,
            flags: vec![
                "International transaction".to_string(),
                "Large amount".to_string(),
                "New recipient".to_string(),
            ],
        },
    ];
}

/// The compiled-in demo dataset
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

#[async_trait]
impl TransactionSource for BuiltinSource {
    async fn transactions(&self) -> Result<Vec<Transaction>, SourceError> {
        Ok(BUILTIN_TRANSACTIONS.clone())
    }

    fn describe(&self) -> String {
        "built-in dataset".to_string()
    }
}

/// A dataset read from a JSON file once at startup
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl JsonFileSource {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();

        tracing::debug!(path = %path.display(), "📂 Loading transaction data file");

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io { path: path.clone(), source })?;
        let transactions: Vec<Transaction> = serde_json::from_str(&raw)
            .map_err(|source| SourceError::Parse { path: path.clone(), source })?;

        validate(&transactions)?;

        tracing::info!(
            path = %path.display(),
            transactions = transactions.len(),
            "✅ Transaction data loaded"
        );

        Ok(JsonFileSource { path, transactions })
    }
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn transactions(&self) -> Result<Vec<Transaction>, SourceError> {
        Ok(self.transactions.clone())
    }

    fn describe(&self) -> String {
        format!("{} ({} transactions)", self.path.display(), self.transactions.len())
    }
}

/// Ids must be unique and amounts positive.
pub fn validate(transactions: &[Transaction]) -> Result<(), SourceError> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for tx in transactions {
        if !seen.insert(tx.id) {
            return Err(SourceError::DuplicateId(tx.id));
        }
        if !tx.amount.is_finite() || tx.amount <= 0.0 {
            return Err(SourceError::InvalidAmount { id: tx.id, amount: tx.amount });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("smartbank-{}-{}.json", std::process::id(), name))
    }

    async fn write_fixture(name: &str, body: &str) -> PathBuf {
        let path = fixture_path(name);
        tokio::fs::write(&path, body).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_builtin_dataset_ids() {
        let txs = BuiltinSource.transactions().await.unwrap();
        let ids: Vec<u32> = txs.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(validate(&txs).is_ok());
    }

    #[tokio::test]
    async fn test_builtin_pokhara_record() {
        let txs = BuiltinSource.transactions().await.unwrap();
        let tx = txs.iter().find(|t| t.id == TransactionId(3)).unwrap();
        assert_eq!(tx.amount, 50000.0);
        assert_eq!(tx.location, "Pokhara, Nepal");
        assert_eq!(tx.risk, RiskLevel::High);
        assert_eq!(
            tx.flags,
            vec!["International transaction", "Large amount", "New recipient"]
        );
    }

    #[tokio::test]
    async fn test_json_file_loads() {
        let path = write_fixture(
            "ok",
            r#"[
                {"id": 10, "amount": 900, "type": "payment", "location": "Lalitpur",
                 "timestamp": "2024-04-01T09:00:00", "risk": "low", "flags": []},
                {"id": 11, "amount": 120000, "type": "transfer", "location": "Bhaktapur",
                 "timestamp": "2024-04-01T22:10:00", "risk": "severe", "flags": ["Night"]}
            ]"#,
        )
        .await;

        let source = JsonFileSource::load(&path).await.unwrap();
        let txs = source.transactions().await.unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[1].risk, RiskLevel::Unknown);
        assert!(source.describe().contains("2 transactions"));

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_sample_data_file_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/transactions.sample.json");
        let source = JsonFileSource::load(&path).await.unwrap();
        let txs = source.transactions().await.unwrap();
        let builtin = BuiltinSource.transactions().await.unwrap();

        assert_eq!(txs.len(), 4);
        assert_eq!(&txs[..3], &builtin[..]);
        assert_eq!(txs[3].kind, TransactionKind::Payment);
    }

    #[tokio::test]
    async fn test_json_file_rejects_duplicate_ids() {
        let path = write_fixture(
            "dup",
            r#"[
                {"id": 1, "amount": 5, "type": "payment", "location": "A",
                 "timestamp": "2024-04-01T09:00:00", "risk": "low", "flags": []},
                {"id": 1, "amount": 6, "type": "payment", "location": "B",
                 "timestamp": "2024-04-01T09:00:00", "risk": "low", "flags": []}
            ]"#,
        )
        .await;

        let err = JsonFileSource::load(&path).await.unwrap_err();
        assert!(matches!(err, SourceError::DuplicateId(TransactionId(1))));

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_json_file_rejects_non_positive_amount() {
        let path = write_fixture(
            "amount",
            r#"[{"id": 4, "amount": 0, "type": "deposit", "location": "A",
                 "timestamp": "2024-04-01T09:00:00", "risk": "medium", "flags": []}]"#,
        )
        .await;

        let err = JsonFileSource::load(&path).await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidAmount { id: TransactionId(4), .. }));

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_json_file_missing_and_malformed() {
        let missing = fixture_path("missing");
        let err = JsonFileSource::load(&missing).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));

        let path = write_fixture("bad", "{ not json").await;
        let err = JsonFileSource::load(&path).await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        tokio::fs::remove_file(&path).await.ok();
    }
}
