use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use itertools::Itertools;

use crate::format::DisplayFormat;
use crate::routes::AppState;
use crate::shell::{escape, icon, page};
use crate::transaction::{RiskLevel, Transaction, TransactionId};

pub const PLACEHOLDER: &str = "Select a transaction to view details";

/// Which transaction, if any, is shown in the details panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<TransactionId>,
}

impl Selection {
    pub fn none() -> Self {
        Selection { selected: None }
    }

    pub fn select(&mut self, id: TransactionId) {
        self.selected = Some(id);
    }

    pub fn selected(&self) -> Option<TransactionId> {
        self.selected
    }

    /// Missing, empty or non-numeric values mean nothing is selected.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut selection = Selection::none();
        if let Some(id) = raw.and_then(|v| v.trim().parse::<u32>().ok()) {
            selection.select(TransactionId(id));
        }
        selection
    }

    /// The last `selected` pair wins, as it is the most recent click.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let raw = pairs
            .iter()
            .rev()
            .find(|(key, _)| key == "selected")
            .map(|(_, value)| value.as_str());
        Selection::from_query(raw)
    }

    pub fn resolve<'a>(&self, transactions: &'a [Transaction]) -> Option<&'a Transaction> {
        let id = self.selected?;
        transactions.iter().find(|tx| tx.id == id)
    }
}

/// Raw query pairs. Repeated or malformed parameters never reject the request.
pub type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTone {
    Warning,
    Success,
    Info,
}

impl StatTone {
    pub fn text_class(&self) -> &'static str {
        match self {
            StatTone::Warning => "text-yellow-600",
            StatTone::Success => "text-green-600",
            StatTone::Info => "text-blue-600",
        }
    }
}

pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub icon: &'static str,
    pub tone: StatTone,
}

pub const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        title: "Suspicious Transactions",
        value: "24",
        change: "+12%",
        icon: "alert-triangle",
        tone: StatTone::Warning,
    },
    StatCard {
        title: "Prevented Fraud",
        value: "₹2.4M",
        change: "+18%",
        icon: "shield",
        tone: StatTone::Success,
    },
    StatCard {
        title: "Average Response Time",
        value: "45s",
        change: "-10s",
        icon: "clock",
        tone: StatTone::Success,
    },
    StatCard {
        title: "Detection Accuracy",
        value: "98.5%",
        change: "+2.3%",
        icon: "credit-card",
        tone: StatTone::Info,
    },
];

struct RiskPattern {
    pattern: &'static str,
    risk: RiskLevel,
    count: u32,
}

const RISK_PATTERNS: [RiskPattern; 4] = [
    RiskPattern { pattern: "Multiple transactions from different locations", risk: RiskLevel::High, count: 12 },
    RiskPattern { pattern: "Unusual transaction timing", risk: RiskLevel::Medium, count: 8 },
    RiskPattern { pattern: "Frequent small transfers", risk: RiskLevel::Medium, count: 15 },
    RiskPattern { pattern: "Large international transfers", risk: RiskLevel::High, count: 5 },
];

struct PreventiveMeasure {
    title: &'static str,
    description: &'static str,
    status: &'static str,
}

const PREVENTIVE_MEASURES: [PreventiveMeasure; 4] = [
    PreventiveMeasure {
        title: "Two-Factor Authentication",
        description: "Enabled for all high-risk transactions",
        status: "Active",
    },
    PreventiveMeasure {
        title: "Location Monitoring",
        description: "Track unusual transaction locations",
        status: "Active",
    },
    PreventiveMeasure {
        title: "Amount Thresholds",
        description: "Automatic flagging of large transactions",
        status: "Active",
    },
    PreventiveMeasure {
        title: "Pattern Recognition",
        description: "ML-based suspicious pattern detection",
        status: "Active",
    },
];

/// Fraud dashboard, mounted at `/` and `/fraud`
pub async fn fraud_dashboard(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let selection = Selection::from_pairs(&pairs);

    let transactions = state.source.transactions().await.map_err(|e| {
        tracing::error!(
            error = %e,
            source = %state.source.describe(),
            "❌ Failed to load transactions"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(page(
                "Fraud Detection",
                r#"<div class="bg-white rounded-lg shadow p-6 text-red-600">Transactions are unavailable right now.</div>"#,
            )),
        )
    })?;

    tracing::debug!(
        transactions = transactions.len(),
        selected = ?selection.selected(),
        "📊 Rendering fraud dashboard"
    );

    let content = render_dashboard(&transactions, selection, &state.display);
    Ok(Html(page("Fraud Detection - SmartBank Analytics", &content)))
}

/// Dashboard body as a pure function of the list and the selection.
pub fn render_dashboard(
    transactions: &[Transaction],
    selection: Selection,
    fmt: &DisplayFormat,
) -> String {
    let stats = STAT_CARDS.iter().map(stat_card).join("\n");

    let cards = transactions
        .iter()
        .map(|tx| transaction_card(tx, selection.selected() == Some(tx.id), fmt))
        .join("\n");

    let details = match selection.resolve(transactions) {
        Some(tx) => transaction_details(tx, fmt),
        None => format!(
            r#"<div id="details" class="bg-white rounded-lg shadow p-6 h-full flex items-center justify-center text-gray-500">{}</div>"#,
            PLACEHOLDER
        ),
    };

    format!(
        r#"<div class="space-y-6">
  <div class="flex items-center justify-between">
    <h1 class="text-2xl font-bold text-gray-900">Fraud Detection</h1>
    {shield}
  </div>
  <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
{stats}
  </div>
  <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
    <div class="lg:col-span-2">
      <div class="bg-white rounded-lg shadow">
        <div class="p-6">
          <h2 class="text-xl font-semibold text-gray-900 mb-4">Suspicious Transactions</h2>
          <div class="space-y-4 max-h-[32rem] overflow-y-auto">
{cards}
          </div>
        </div>
      </div>
    </div>
    <div class="lg:col-span-1">
{details}
    </div>
  </div>
  <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
{patterns}
{measures}
  </div>
</div>"#,
        shield = icon("shield-alert", "h-8 w-8 text-indigo-600"),
        stats = stats,
        cards = cards,
        details = details,
        patterns = risk_patterns(),
        measures = preventive_measures(),
    )
}

fn stat_card(card: &StatCard) -> String {
    let tone = card.tone.text_class();
    format!(
        r#"<div class="bg-white rounded-lg shadow p-6">
  <div class="flex items-center justify-between">
    <div class="{tone}">{icon}</div>
    <span class="text-sm font-medium {tone}">{change}</span>
  </div>
  <h3 class="text-xl font-semibold text-gray-900 mt-4">{value}</h3>
  <p class="text-sm text-gray-600">{title}</p>
</div>"#,
        tone = tone,
        icon = icon(card.icon, "h-6 w-6"),
        change = escape(card.change),
        value = escape(card.value),
        title = escape(card.title),
    )
}

fn transaction_card(tx: &Transaction, selected: bool, fmt: &DisplayFormat) -> String {
    let border = if selected {
        "border-indigo-500 bg-indigo-50"
    } else {
        "border-gray-200 hover:border-indigo-300"
    };
    format!(
        r#"<a href="?selected={id}" data-transaction="{id}" class="block border rounded-lg p-4 cursor-pointer transition-all {border}">
  <div class="flex justify-between items-start">
    <div>
      <div class="flex items-center space-x-2">
        <span class="font-medium text-gray-900">{amount}</span>
        <span class="text-xs px-2 py-1 rounded-full {badge_class}">{badge}</span>
      </div>
      <div class="flex items-center mt-2 text-sm text-gray-600">
        {pin}
        {location}
      </div>
    </div>
    {arrow}
  </div>
</a>"#,
        id = tx.id,
        border = border,
        amount = escape(&fmt.amount(tx.amount)),
        badge_class = tx.risk.badge_class(),
        badge = tx.risk.badge_label(),
        pin = icon("map-pin", "h-4 w-4 mr-1"),
        location = escape(&tx.location),
        arrow = icon("arrow-up-right", "h-5 w-5 text-gray-400"),
    )
}

fn detail_field(label: &str, value_class: &str, value: &str) -> String {
    format!(
        r#"    <div>
      <h3 class="text-sm font-medium text-gray-500">{}</h3>
      <p class="mt-1 {}">{}</p>
    </div>"#,
        label, value_class, value
    )
}

fn transaction_details(tx: &Transaction, fmt: &DisplayFormat) -> String {
    let flags = tx
        .flags
        .iter()
        .map(|flag| {
            format!(
                r#"        <div class="risk-flag flex items-center text-sm text-red-600">{}{}</div>"#,
                icon("alert-triangle", "h-4 w-4 mr-2"),
                escape(flag)
            )
        })
        .join("\n");

    format!(
        r#"<div id="details" data-transaction="{id}" class="bg-white rounded-lg shadow p-6">
  <div class="flex items-center justify-between mb-4">
    <h2 class="text-xl font-semibold text-gray-900">Transaction Details</h2>
    <span class="text-xs px-2 py-1 rounded-full {badge_class}">{badge}</span>
  </div>
  <div class="space-y-4">
{amount}
{kind}
{location}
{timestamp}
    <div>
      <h3 class="text-sm font-medium text-gray-500">Risk Flags</h3>
      <div class="mt-2 space-y-2">
{flags}
      </div>
    </div>
  </div>
</div>"#,
        id = tx.id,
        badge_class = tx.risk.badge_class(),
        badge = tx.risk.badge_label(),
        amount = detail_field(
            "Amount",
            "text-lg font-semibold text-gray-900",
            &escape(&fmt.amount(tx.amount))
        ),
        kind = detail_field("Type", "text-gray-900 capitalize", tx.kind.label()),
        location = detail_field("Location", "text-gray-900", &escape(&tx.location)),
        timestamp = detail_field("Timestamp", "text-gray-900", &escape(&fmt.timestamp(&tx.timestamp))),
        flags = flags,
    )
}

fn risk_patterns() -> String {
    let rows = RISK_PATTERNS
        .iter()
        .map(|item| {
            format!(
                r#"      <div class="flex items-center justify-between p-4 border rounded-lg">
        <div>
          <p class="font-medium text-gray-900">{}</p>
          <p class="text-sm text-gray-600 mt-1">Occurrences: {}</p>
        </div>
        <span class="px-3 py-1 rounded-full text-sm {}">{}</span>
      </div>"#,
                item.pattern,
                item.count,
                item.risk.badge_class(),
                item.risk.title()
            )
        })
        .join("\n");

    format!(
        r#"<div class="bg-white rounded-lg shadow p-6">
    <h2 class="text-xl font-semibold text-gray-900 mb-4">Identified Risk Patterns</h2>
    <div class="space-y-4">
{}
    </div>
  </div>"#,
        rows
    )
}

fn preventive_measures() -> String {
    let rows = PREVENTIVE_MEASURES
        .iter()
        .map(|measure| {
            format!(
                r#"      <div class="flex items-center p-4 border rounded-lg" data-status="{}">
        {}
        <div>
          <p class="font-medium text-gray-900">{}</p>
          <p class="text-sm text-gray-600">{}</p>
        </div>
      </div>"#,
                measure.status,
                icon("shield", "h-6 w-6 text-green-600 mr-4"),
                measure.title,
                measure.description
            )
        })
        .join("\n");

    format!(
        r#"<div class="bg-white rounded-lg shadow p-6">
    <h2 class="text-xl font-semibold text-gray-900 mb-4">Preventive Measures</h2>
    <div class="space-y-4">
{}
    </div>
  </div>"#,
        rows
    )
}
