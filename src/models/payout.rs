use serde::{Deserialize, Serialize};
use crate::errors::DashboardError;
use crate::models::de::null_as_default;

/// Estado con el que el cliente crea todos los payouts
pub const PAYOUT_STATUS_PENDING: &str = "pending";

/// Estados que cuentan como dinero ya pagado
const PAID_OUT_STATUSES: [&str; 2] = ["approved", "paid"];

/// Payout tal como lo devuelve el backend (solo lectura)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bank_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_holder: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ifsc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl PayoutRequest {
    pub fn is_paid_out(&self) -> bool {
        PAID_OUT_STATUSES.contains(&self.status.as_str())
    }
}

/// Total pagado: suma de `amount` de los payouts approved/paid
pub fn compute_paid_out(payouts: &[PayoutRequest]) -> f64 {
    payouts
        .iter()
        .filter(|p| p.is_paid_out())
        .map(|p| p.amount)
        .sum()
}

/// Campos editables del formulario de payout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutField {
    Amount,
    BankName,
    AccountHolder,
    AccountNumber,
    Ifsc,
}

/// Borrador del formulario, tal cual lo tipea el usuario
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PayoutDraft {
    pub amount: String,
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
    pub ifsc: String,
    /// Ignorado al enviar: el status siempre es "pending"
    pub status: Option<String>,
}

impl PayoutDraft {
    pub fn set(&mut self, field: PayoutField, value: String) {
        match field {
            PayoutField::Amount => self.amount = value,
            PayoutField::BankName => self.bank_name = value,
            PayoutField::AccountHolder => self.account_holder = value,
            PayoutField::AccountNumber => self.account_number = value,
            PayoutField::Ifsc => self.ifsc = value,
        }
    }

    pub fn get(&self, field: PayoutField) -> &str {
        match field {
            PayoutField::Amount => &self.amount,
            PayoutField::BankName => &self.bank_name,
            PayoutField::AccountHolder => &self.account_holder,
            PayoutField::AccountNumber => &self.account_number,
            PayoutField::Ifsc => &self.ifsc,
        }
    }
}

/// Body de `POST /api/payouts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePayoutRequest {
    pub amount: f64,
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
    pub ifsc: String,
    pub status: String,
    pub school_id: String,
}

impl CreatePayoutRequest {
    pub fn from_draft(draft: &PayoutDraft, school_id: &str) -> Result<Self, DashboardError> {
        Ok(Self {
            amount: parse_amount(&draft.amount)?,
            bank_name: draft.bank_name.clone(),
            account_holder: draft.account_holder.clone(),
            account_number: draft.account_number.clone(),
            ifsc: draft.ifsc.clone(),
            status: PAYOUT_STATUS_PENDING.to_string(),
            school_id: school_id.to_string(),
        })
    }
}

/// Parsea el monto del formulario. Texto no numérico o no finito se rechaza.
pub fn parse_amount(raw: &str) -> Result<f64, DashboardError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| DashboardError::InvalidAmount(raw.to_string()))
}
