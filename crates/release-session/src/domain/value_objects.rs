//! # Domain Value Objects
//!
//! Amounts, session states, input events and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::BeneficiaryCode;

/// How an allotment's budget is denominated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetKind {
    /// Cash, in pesos.
    Money,
    /// Goods, as quantity + unit.
    InKind,
}

/// Peso amount stored in centavos.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Amount from centavos.
    pub const fn from_centavos(centavos: u64) -> Self {
        Self(centavos)
    }

    /// Amount from whole pesos.
    pub const fn from_pesos(pesos: u64) -> Self {
        Self(pesos * 100)
    }

    /// Raw centavos.
    pub const fn centavos(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₱ {}.{:02}", group_thousands(self.0 / 100), self.0 % 100)
    }
}

/// A budget or share: money XOR quantity+unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Amount {
    /// Cash amount.
    Money {
        /// Value in centavos.
        centavos: u64,
    },
    /// Goods.
    InKind {
        /// Count of units.
        quantity: u64,
        /// Unit label, e.g. "kg" or "packs".
        unit: String,
    },
}

impl Amount {
    /// Money amount.
    pub fn money(money: Money) -> Self {
        Amount::Money {
            centavos: money.centavos(),
        }
    }

    /// In-kind amount.
    pub fn in_kind(quantity: u64, unit: impl Into<String>) -> Self {
        Amount::InKind {
            quantity,
            unit: unit.into(),
        }
    }

    /// Which budget kind this amount belongs to.
    pub fn kind(&self) -> BudgetKind {
        match self {
            Amount::Money { .. } => BudgetKind::Money,
            Amount::InKind { .. } => BudgetKind::InKind,
        }
    }

    /// Budget form: `₱ 1,234.50` or `500 kg`.
    pub fn budget_text(&self) -> String {
        match self {
            Amount::Money { centavos } => Money::from_centavos(*centavos).to_string(),
            Amount::InKind { quantity, unit } => {
                format!("{} {}", quantity, unit.trim()).trim().to_string()
            }
        }
    }

    /// Share form: `₱ 1,234.50` or `1,200 kg`; `-` when the unit is blank.
    pub fn share_text(&self) -> String {
        match self {
            Amount::Money { centavos } => Money::from_centavos(*centavos).to_string(),
            Amount::InKind { quantity, unit } if !unit.trim().is_empty() => {
                format!("{} {}", group_thousands(*quantity), unit.trim())
            }
            Amount::InKind { .. } => "-".to_string(),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Release session state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No session; input is not captured.
    #[default]
    Closed,
    /// Scanning accepted.
    Open,
    /// A match is waiting for confirm/cancel; scanning suspended.
    AwaitingConfirmation,
}

impl SessionState {
    /// Whether keyboard input is routed to the engine.
    pub fn captures_input(self) -> bool {
        !matches!(self, SessionState::Closed)
    }
}

/// Notification severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Scan accepted or release committed.
    Success,
    /// Non-fatal rejection, e.g. already released.
    Warning,
    /// Failure, e.g. scan not found or ledger write failed.
    Error,
}

/// A live toast notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the operator.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// Identifies which `show` call produced this notification.
    pub expiry_token: u64,
}

/// Keys the engine distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// Tab; a terminator when configured.
    Tab,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Any other non-text key.
    Other,
}

/// Raw input event forwarded by the hosting UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Text composition (one or more characters).
    Text(String),
    /// Key down.
    Key(Key),
}

impl InputEvent {
    /// Single character of text.
    pub fn char(ch: char) -> Self {
        InputEvent::Text(ch.to_string())
    }
}

/// Result of matching a completed scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Matched an unreleased entry; confirmation opened.
    Accepted(BeneficiaryCode),
    /// No roster entry has this code.
    NotFound(String),
    /// Matched an entry that is already released.
    AlreadyReleased(BeneficiaryCode),
    /// Terminator with empty buffer; ignored.
    Empty,
    /// Scan arrived while not scanning.
    Ignored,
}

/// Result of a successful confirm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// This terminal wrote the release.
    Released(BeneficiaryCode),
    /// Ledger already showed the entry released; nothing written.
    AlreadyRecorded(BeneficiaryCode),
}

/// What the engine did with an input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not consumed; the UI may handle it.
    PassThrough,
    /// Text appended to the scan buffer.
    Buffered,
    /// Consumed without effect (scanning suspended or noise).
    Swallowed,
    /// A terminator completed a scan.
    Scanned(ScanOutcome),
    /// Enter confirmed the pending release.
    Confirmed(ConfirmOutcome),
    /// Enter tried to confirm but the ledger failed; still pending.
    ConfirmFailed,
    /// Escape cancelled the pending release.
    Cancelled,
}

/// Released/total counter for the session roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    /// Released entries.
    pub released: usize,
    /// All entries.
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Released: {}/{}", self.released, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(Money::from_centavos(0).to_string(), "₱ 0.00");
        assert_eq!(Money::from_centavos(123_450).to_string(), "₱ 1,234.50");
        assert_eq!(Money::from_pesos(1_000_000).to_string(), "₱ 1,000,000.00");
    }

    #[test]
    fn test_in_kind_texts() {
        let amount = Amount::in_kind(1200, " kg ");
        assert_eq!(amount.share_text(), "1,200 kg");
        assert_eq!(amount.budget_text(), "1200 kg");
        assert_eq!(amount.kind(), BudgetKind::InKind);
    }

    #[test]
    fn test_in_kind_without_unit() {
        let amount = Amount::in_kind(3, "");
        assert_eq!(amount.share_text(), "-");
        assert_eq!(amount.budget_text(), "3");
    }

    #[test]
    fn test_amount_serde_shape() {
        let json = serde_json::to_string(&Amount::money(Money::from_pesos(5))).unwrap();
        assert_eq!(json, r#"{"kind":"money","centavos":500}"#);
        let back: Amount = serde_json::from_str(r#"{"kind":"in_kind","quantity":2,"unit":"sacks"}"#).unwrap();
        assert_eq!(back, Amount::in_kind(2, "sacks"));
    }

    #[test]
    fn test_progress_text() {
        let p = Progress { released: 3, total: 10 };
        assert_eq!(p.to_string(), "Released: 3/10");
    }

    #[test]
    fn test_state_capture() {
        assert!(!SessionState::Closed.captures_input());
        assert!(SessionState::Open.captures_input());
        assert!(SessionState::AwaitingConfirmation.captures_input());
    }
}
