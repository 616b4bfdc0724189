use super::{generate_id, timestamp_now};
use crate::schema::invoices;
use chrono::{Duration, NaiveDateTime};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::PaymentStatus"]
pub enum PaymentStatus {
    #[db_rename = "PENDING"]
    #[serde(rename = "PENDING")]
    Pending,
    #[db_rename = "PAID"]
    #[serde(rename = "PAID")]
    Paid,
}

impl PaymentStatus {
    pub fn parse(s: &str) -> Result<PaymentStatus, String> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            other => Err(format!(
                "{} is not a valid payment status, expected PENDING or PAID.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl PaymentMethod {
    /// An empty string is accepted and means "not chosen yet".
    pub fn parse(s: &str) -> Result<Option<PaymentMethod>, String> {
        match s {
            "" => Ok(None),
            "CARD" => Ok(Some(PaymentMethod::Card)),
            "CASH" => Ok(Some(PaymentMethod::Cash)),
            other => Err(format!(
                "{} is not a valid payment method, expected CARD, CASH or empty.",
                other
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Invoice {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub invoice_id: String,
    pub order_id: String,
    pub payment_method: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_due_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Invoice {
    /// Status defaults to `PENDING`; payment is due one day after creation.
    pub fn new(
        order_id: String,
        payment_method: Option<PaymentMethod>,
        payment_status: Option<PaymentStatus>,
    ) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            invoice_id: generate_id(),
            order_id,
            payment_method: payment_method.map(|method| method.as_str().to_string()),
            payment_status: payment_status.unwrap_or(PaymentStatus::Pending),
            payment_due_date: now + Duration::days(1),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &InvoiceChanges) {
        if let Some(payment_method) = &changes.payment_method {
            self.payment_method = payment_method.clone();
        }
        if let Some(payment_status) = changes.payment_status {
            self.payment_status = payment_status;
        }
        self.updated_at = changes.updated_at;
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
pub struct InvoiceChanges {
    /// `Some(None)` clears the chosen method.
    pub payment_method: Option<Option<String>>,
    pub payment_status: Option<PaymentStatus>,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_none, assert_ok_eq};

    #[test]
    fn new_invoices_are_pending_and_due_next_day() {
        let invoice = Invoice::new("o1".to_string(), None, None);
        assert_eq!(invoice.payment_status, PaymentStatus::Pending);
        assert_eq!(invoice.payment_due_date, invoice.created_at + Duration::days(1));
        assert_none!(invoice.payment_method);
    }

    #[test]
    fn payment_method_accepts_empty() {
        assert_ok_eq!(PaymentMethod::parse(""), None);
        assert_ok_eq!(PaymentMethod::parse("CARD"), Some(PaymentMethod::Card));
        assert_err!(PaymentMethod::parse("CHEQUE"));
    }

    #[test]
    fn an_explicit_empty_method_clears_the_stored_one() {
        let mut invoice = Invoice::new("o1".to_string(), Some(PaymentMethod::Card), None);
        let mut changes = InvoiceChanges {
            payment_method: None,
            payment_status: Some(PaymentStatus::Paid),
            updated_at: timestamp_now(),
        };
        invoice.apply(&changes);
        assert_eq!(invoice.payment_method.as_deref(), Some("CARD"));

        changes.payment_method = Some(None);
        invoice.apply(&changes);
        assert_none!(invoice.payment_method);
        assert_eq!(invoice.payment_status, PaymentStatus::Paid);
    }
}
