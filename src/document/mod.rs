//! Sales and purchase documents and their footer totals.
//!
//! A document collects article lines and produces the four figures printed
//! at its foot: net total (HT), VAT (TVA), stamp duty (timbre) and the grand
//! total (TTC), which is then spelled out in words.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{
    amount::MonetaryAmount,
    errors::{AmountError, Result, StockError},
    speller::{AmountSpeller, SpelledAmount},
};

/// Kind of commercial document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    DeliveryNote,
    ProformaInvoice,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Facture",
            DocumentKind::DeliveryNote => "Bon de livraison",
            DocumentKind::ProformaInvoice => "Facture proforma",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentKind {
    type Err = StockError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "invoice" | "facture" | "f" => Ok(DocumentKind::Invoice),
            "delivery" | "delivery-note" | "bl" => Ok(DocumentKind::DeliveryNote),
            "proforma" | "fprof" => Ok(DocumentKind::ProformaInvoice),
            other => Err(StockError::InvalidInput(format!(
                "unknown document kind `{}` (use invoice, delivery or proforma)",
                other
            ))),
        }
    }
}

/// How the customer settles the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    Cash,
    Cheque,
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMode::Cash => f.write_str("Espèces"),
            PaymentMode::Cheque => f.write_str("Chèque"),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = StockError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "cash" | "especes" | "espèces" => Ok(PaymentMode::Cash),
            "cheque" | "chèque" | "check" => Ok(PaymentMode::Cheque),
            other => Err(StockError::InvalidInput(format!(
                "unknown payment mode `{}` (use cash or cheque)",
                other
            ))),
        }
    }
}

/// Stamp duty: a percentage of the net total, capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampDutyPolicy {
    pub rate_percent: Decimal,
    pub cap: Decimal,
}

impl Default for StampDutyPolicy {
    fn default() -> Self {
        Self {
            rate_percent: Decimal::ONE,
            cap: Decimal::new(2500, 0),
        }
    }
}

impl StampDutyPolicy {
    /// Only invoices settled in cash carry stamp duty.
    pub fn applies_to(&self, kind: DocumentKind, payment: PaymentMode) -> bool {
        kind == DocumentKind::Invoice && payment == PaymentMode::Cash
    }

    pub fn duty_on(&self, net: Decimal) -> Result<Decimal> {
        let duty = percent_of(net, self.rate_percent, "stamp duty")?;
        Ok(duty.min(self.cap))
    }
}

/// One article line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub article: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub vat_rate: Decimal,
}

impl DocumentLine {
    pub fn new(
        article: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        vat_rate: Decimal,
    ) -> Result<Self> {
        let article = article.into().trim().to_string();
        if article.is_empty() {
            return Err(StockError::InvalidInput("article code is required".into()));
        }
        if quantity <= Decimal::ZERO {
            return Err(StockError::InvalidInput(format!(
                "quantity for `{}` must be positive",
                article
            )));
        }
        if unit_price < Decimal::ZERO {
            return Err(StockError::InvalidInput(format!(
                "unit price for `{}` cannot be negative",
                article
            )));
        }
        if vat_rate < Decimal::ZERO || vat_rate > Decimal::ONE_HUNDRED {
            return Err(StockError::InvalidInput(format!(
                "VAT rate for `{}` must be between 0 and 100",
                article
            )));
        }
        Ok(Self {
            article,
            quantity,
            unit_price,
            vat_rate,
        })
    }

    /// Quantity times unit price, unrounded.
    pub fn line_total(&self) -> Result<Decimal> {
        self.quantity
            .checked_mul(self.unit_price)
            .ok_or_else(|| overflow(format!("line total for `{}`", self.article)))
    }

    pub fn vat_amount(&self) -> Result<Decimal> {
        percent_of(self.line_total()?, self.vat_rate, "VAT")
    }
}

/// Footer figures of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub net: MonetaryAmount,
    pub vat: MonetaryAmount,
    pub stamp: MonetaryAmount,
    pub gross: MonetaryAmount,
}

impl DocumentTotals {
    /// Spells the grand total.
    pub fn spell(&self, speller: &AmountSpeller) -> SpelledAmount {
        speller.spell(self.gross)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub number: String,
    pub kind: DocumentKind,
    #[serde(default)]
    pub payment: PaymentMode,
    #[serde(default)]
    lines: Vec<DocumentLine>,
}

impl Document {
    pub fn new(number: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            number: number.into(),
            kind,
            payment: PaymentMode::default(),
            lines: Vec::new(),
        }
    }

    pub fn set_payment(&mut self, payment: PaymentMode) {
        self.payment = payment;
    }

    /// Adds a line, replacing any existing line for the same article.
    pub fn upsert_line(&mut self, line: DocumentLine) {
        match self
            .lines
            .iter_mut()
            .find(|existing| existing.article == line.article)
        {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
    }

    pub fn remove_line(&mut self, article: &str) -> Option<DocumentLine> {
        let index = self
            .lines
            .iter()
            .position(|line| line.article == article)?;
        Some(self.lines.remove(index))
    }

    pub fn lines(&self) -> &[DocumentLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self, policy: &StampDutyPolicy) -> Result<DocumentTotals> {
        let net = checked_sum(self.lines.iter().map(DocumentLine::line_total), "net total")?;
        let vat = checked_sum(self.lines.iter().map(DocumentLine::vat_amount), "VAT total")?;
        let stamp = if policy.applies_to(self.kind, self.payment) {
            policy.duty_on(net)?
        } else {
            Decimal::ZERO
        };

        let net = MonetaryAmount::from_decimal(to_cents(net))?;
        let vat = MonetaryAmount::from_decimal(to_cents(vat))?;
        let stamp = MonetaryAmount::from_decimal(to_cents(stamp))?;
        let gross = MonetaryAmount::from_decimal(
            net.to_decimal() + vat.to_decimal() + stamp.to_decimal(),
        )?;

        tracing::debug!(
            number = %self.number,
            kind = ?self.kind,
            %net,
            %vat,
            %stamp,
            %gross,
            "computed document totals"
        );
        Ok(DocumentTotals {
            net,
            vat,
            stamp,
            gross,
        })
    }
}

/// Rounds to cents, half away from zero.
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(what: impl Into<String>) -> StockError {
    StockError::InvalidAmount(AmountError::OutOfRange(what.into()))
}

fn percent_of(base: Decimal, rate: Decimal, what: &str) -> Result<Decimal> {
    base.checked_mul(rate)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow(what))
}

fn checked_sum(
    mut values: impl Iterator<Item = Result<Decimal>>,
    what: &str,
) -> Result<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value?).ok_or_else(|| overflow(what))
    })
}
